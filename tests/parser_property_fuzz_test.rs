use filter_form_tester::FilterPage;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::test_runner::TestCaseResult;

fn tag_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just("div"),
        Just("span"),
        Just("p"),
        Just("form"),
        Just("select"),
        Just("option"),
        Just("input"),
        Just("textarea"),
        Just("button"),
        Just("fieldset"),
        Just("label"),
        Just("br"),
    ]
    .prop_map(str::to_string)
    .boxed()
}

fn attr_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        Just(" id=\"x\"".to_string()),
        Just(" id=x".to_string()),
        Just(" class='a b'".to_string()),
        Just(" type=\"text\"".to_string()),
        Just(" type=email".to_string()),
        Just(" name=\"q\"".to_string()),
        Just(" value=\"se ed\"".to_string()),
        Just(" checked".to_string()),
        Just(" disabled".to_string()),
        Just(" selected".to_string()),
        Just(" data-x=\"1\" data-y='2'".to_string()),
    ]
    .boxed()
}

fn text_strategy() -> BoxedStrategy<String> {
    prop_oneof![
        Just(String::new()),
        Just("plain text".to_string()),
        Just("a &amp; b".to_string()),
        Just("  spaced  ".to_string()),
        Just("日本語のテキスト".to_string()),
        Just("> stray bracket".to_string()),
    ]
    .boxed()
}

fn fragment_strategy() -> BoxedStrategy<String> {
    let leaf = prop_oneof![
        text_strategy(),
        (tag_strategy(), attr_strategy())
            .prop_map(|(tag, attrs)| format!("<{tag}{attrs}>")),
        (tag_strategy(), attr_strategy())
            .prop_map(|(tag, attrs)| format!("<{tag}{attrs} />")),
        tag_strategy().prop_map(|tag| format!("</{tag}>")),
        text_strategy().prop_map(|text| format!("<!-- {text} -->")),
        Just("<!DOCTYPE html>".to_string()),
        Just("<script>let a = \"<div>\" < 2;</script>".to_string()),
    ]
    .boxed();

    leaf.prop_recursive(4, 64, 6, |inner| {
        prop_oneof![
            (tag_strategy(), attr_strategy(), vec(inner.clone(), 0..4)).prop_map(
                |(tag, attrs, children)| format!(
                    "<{tag}{attrs}>{}</{tag}>",
                    children.join("")
                )
            ),
            vec(inner, 0..4).prop_map(|parts| parts.join("")),
        ]
    })
    .boxed()
}

fn assert_parse_never_panics(html: &str) -> TestCaseResult {
    let outcome = std::panic::catch_unwind(|| FilterPage::from_html(html));
    prop_assert!(
        outcome.is_ok(),
        "FilterPage::from_html panicked for generated markup:\n{html}"
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn generated_markup_never_panics_the_parser(fragment in fragment_strategy()) {
        assert_parse_never_panics(&fragment)?;
    }

    #[test]
    fn generated_forms_parse_and_answer_queries(fragments in vec(fragment_strategy(), 0..4)) {
        let html = format!(
            r#"<form id="filter-form" action="/list">{}</form>"#,
            fragments.join("")
        );
        let page = FilterPage::from_html(&html);
        if let Ok(page) = page {
            // Queries on whatever parsed must not panic either.
            let outcome = std::panic::catch_unwind(|| {
                let _ = page.exists("#filter-form");
                let _ = page.exists("select, input[type=text], input[type=email]");
            });
            prop_assert!(outcome.is_ok(), "selector query panicked for:\n{html}");
        }
    }
}

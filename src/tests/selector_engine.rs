use super::*;

fn fixture() -> Result<FilterPage> {
    FilterPage::from_html(
        r#"
        <div id="wrap" class="panel filters">
          <form id="f">
            <input type="text" name="q" class="field wide">
            <input type="checkbox" name="active" checked>
            <select name="category" required>
              <option value="">All</option>
            </select>
          </form>
          <p class="hint">type to filter</p>
        </div>
        <p class="hint outer">outer hint</p>
        "#,
    )
}

#[test]
fn id_fast_path_finds_the_indexed_node() -> Result<()> {
    let page = fixture()?;
    page.assert_exists("#wrap")?;
    assert!(!page.exists("#missing")?);
    Ok(())
}

#[test]
fn tag_class_and_compound_steps_match() -> Result<()> {
    let page = fixture()?;
    page.assert_exists("div.panel")?;
    page.assert_exists("input.field.wide")?;
    assert!(!page.exists("span.panel")?);
    Ok(())
}

#[test]
fn attribute_conditions_match_existence_and_equality() -> Result<()> {
    let page = fixture()?;
    page.assert_exists("input[name]")?;
    page.assert_exists("input[name=q]")?;
    page.assert_exists(r#"select[name="category"]"#)?;
    assert!(!page.exists("input[name=zzz]")?);
    Ok(())
}

#[test]
fn descendant_and_child_combinators_differ() -> Result<()> {
    let page = fixture()?;
    page.assert_exists("#wrap input[name=q]")?;
    page.assert_exists("#wrap > form")?;
    assert!(!page.exists("#wrap > input[name=q]")?);
    Ok(())
}

#[test]
fn comma_groups_union_their_matches() -> Result<()> {
    let page = fixture()?;
    let hints = page.text_of("p.hint")?;
    assert_eq!(hints, "type to filter");
    page.assert_exists("form, #missing")?;
    Ok(())
}

#[test]
fn pseudo_classes_reflect_control_state() -> Result<()> {
    let page = fixture()?;
    page.assert_exists("input:checked")?;
    page.assert_exists("select:required")?;
    page.assert_exists("input[name=q]:optional")?;
    page.assert_exists("input:enabled")?;
    page.assert_exists("p:not(.outer)")?;
    assert!(!page.exists("input[name=q]:checked")?);
    Ok(())
}

#[test]
fn universal_selector_matches_every_element() -> Result<()> {
    let page = fixture()?;
    page.assert_exists("#wrap > *")?;
    Ok(())
}

#[test]
fn unsupported_selectors_are_typed_errors() -> Result<()> {
    let page = fixture()?;
    for selector in ["", "div ~ p", "p::first-line", "div >", "a,,b"] {
        match page.exists(selector) {
            Err(Error::UnsupportedSelector(_)) => {}
            other => panic!("expected UnsupportedSelector for {selector:?}, got {other:?}"),
        }
    }
    Ok(())
}

use super::*;

#[test]
fn get_submission_serializes_entries_into_the_query() -> Result<()> {
    let mut page = filter_page()?;
    page.select_option("select[name=category]", "books")?;
    page.type_text("input[name=search]", "two words")?;
    page.submit("#filter-form")?;

    let submissions = page.take_submissions();
    assert_eq!(submissions.len(), 1);
    let record = &submissions[0];
    assert_eq!(record.method, SubmitMethod::Get);
    assert_eq!(record.action, "http://filters.local/list");
    assert_eq!(record.from, DEFAULT_DOCUMENT_URL);
    assert_eq!(
        record.to,
        "http://filters.local/list?category=books&group=&search=two+words&contact="
    );
    assert_eq!(page.document_url(), record.to);
    Ok(())
}

#[test]
fn post_submission_keeps_entries_out_of_the_url() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f" action="/save" method="post">
          <input type="text" name="title" value="draft">
        </form>
        "#,
    )?;
    page.submit("#f")?;

    let submissions = page.take_submissions();
    assert_eq!(submissions[0].method, SubmitMethod::Post);
    assert_eq!(submissions[0].to, "http://filters.local/save");
    assert_eq!(
        submissions[0].entries,
        vec![("title".to_string(), "draft".to_string())]
    );
    Ok(())
}

#[test]
fn urlencoding_escapes_reserved_bytes_and_keeps_safe_ones() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input type="text" name="q" value="a&b=c *-._"></form>"#,
    )?;
    page.submit("#f")?;
    let record = page.take_submissions().remove(0);
    assert_eq!(record.entries, vec![("q".to_string(), "a&b=c *-._".to_string())]);
    assert!(record.to.ends_with("?q=a%26b%3Dc+*-._"));
    Ok(())
}

#[test]
fn empty_action_resubmits_to_the_document_url() -> Result<()> {
    let mut page = FilterPage::from_html_with_url(
        "http://filters.local/list?old=1#top",
        r#"<form id="f"><input type="text" name="q" value="x"></form>"#,
    )?;
    page.submit("#f")?;
    let record = page.take_submissions().remove(0);
    assert_eq!(record.to, "http://filters.local/list?q=x");
    Ok(())
}

#[test]
fn relative_actions_resolve_against_the_document_url() -> Result<()> {
    let cases = [
        ("archive", "http://filters.local/app/archive?q=x"),
        ("./archive", "http://filters.local/app/archive?q=x"),
        ("../top", "http://filters.local/top?q=x"),
        ("/rooted", "http://filters.local/rooted?q=x"),
        ("?fresh=1", "http://filters.local/app/list?q=x"),
        ("https://other.example/hit", "https://other.example/hit?q=x"),
        ("//peer.example/hit", "http://peer.example/hit?q=x"),
    ];
    for (action, expected) in cases {
        let html = format!(
            r#"<form id="f" action="{action}"><input type="text" name="q" value="x"></form>"#
        );
        let mut page = FilterPage::from_html_with_url("http://filters.local/app/list", &html)?;
        page.submit("#f")?;
        let record = page.take_submissions().remove(0);
        assert_eq!(record.to, expected, "action {action:?}");
    }
    Ok(())
}

#[test]
fn unsuccessful_controls_stay_out_of_the_entries() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f">
          <input type="text" name="named" value="in">
          <input type="text" value="unnamed">
          <input type="text" name="off" value="x" disabled>
          <input type="checkbox" name="unchecked" value="v">
          <input type="checkbox" name="checked" value="v" checked>
          <input type="submit" name="go" value="Go">
          <button name="btn" value="b">B</button>
          <fieldset disabled><input type="text" name="fenced" value="x"></fieldset>
        </form>
        "#,
    )?;
    page.submit("#f")?;
    let record = page.take_submissions().remove(0);
    assert_eq!(
        record.entries,
        vec![
            ("named".to_string(), "in".to_string()),
            ("checked".to_string(), "v".to_string()),
        ]
    );
    Ok(())
}

#[test]
fn checked_checkbox_without_value_submits_on() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input type="checkbox" name="flag" checked></form>"#,
    )?;
    page.submit("#f")?;
    let record = page.take_submissions().remove(0);
    assert_eq!(record.entries, vec![("flag".to_string(), "on".to_string())]);
    Ok(())
}

#[test]
fn charset_marker_entry_reports_utf8() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input type="hidden" name="_charset_"></form>"#,
    )?;
    page.submit("#f")?;
    let record = page.take_submissions().remove(0);
    assert_eq!(
        record.entries,
        vec![("_charset_".to_string(), "UTF-8".to_string())]
    );
    Ok(())
}

#[test]
fn controls_attached_by_form_attribute_submit_with_their_form() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f" action="/list"></form>
        <input type="text" name="outside" value="x" form="f">
        "#,
    )?;
    page.submit("#f")?;
    let record = page.take_submissions().remove(0);
    assert_eq!(record.entries, vec![("outside".to_string(), "x".to_string())]);
    Ok(())
}

#[test]
fn clicking_a_submit_button_submits_the_owning_form() -> Result<()> {
    let mut page = filter_page()?;
    page.click("#apply")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn navigation_swaps_in_a_registered_result_page() -> Result<()> {
    let mut page = filter_page()?;
    page.set_result_page(
        "/list?category=&group=&search=&contact=",
        r#"<h1 id="heading">All results</h1>"#,
    );
    page.run_filter_reset(&FilterReset::new())?;
    page.assert_text("#heading", "All results")?;
    assert!(!page.exists("#filter-form")?);
    Ok(())
}

#[test]
fn document_swap_drops_stale_trigger_bindings() -> Result<()> {
    let mut page = filter_page()?;
    page.bind_reset_trigger("#clear-filters", FilterReset::new())?;
    page.set_result_page(
        "/list?category=&group=&search=&contact=",
        r#"<button id="clear-filters" type="button">Clear Filters</button>"#,
    );
    page.click("#clear-filters")?;
    assert_eq!(page.submission_count(), 1);

    // Same id on the new document, but the binding is gone.
    page.click("#clear-filters")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn trace_log_limit_caps_retained_lines() -> Result<()> {
    let mut page = filter_page()?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.set_trace_log_limit(2)?;
    page.run_filter_reset(&FilterReset::new())?;

    let logs = page.take_trace_logs();
    assert_eq!(logs.len(), 2);
    assert!(page.set_trace_log_limit(0).is_err());
    Ok(())
}

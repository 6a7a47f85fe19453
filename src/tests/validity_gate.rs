use super::*;

#[test]
fn missing_required_value_blocks_interactive_submission() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f">
          <input type="text" name="q" required>
          <button id="go" type="submit">Go</button>
        </form>
        "#,
    )?;
    page.click("#go")?;
    assert_eq!(page.submission_count(), 0);

    page.type_text("input[name=q]", "value")?;
    page.click("#go")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn programmatic_submit_bypasses_the_gate() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input type="text" name="q" required></form>"#,
    )?;
    page.submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn novalidate_and_formnovalidate_skip_the_gate() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="a" novalidate>
          <input type="text" name="q" required>
        </form>
        <form id="b">
          <input type="text" name="q" required>
          <button id="force" type="submit" formnovalidate>Force</button>
        </form>
        "#,
    )?;
    page.request_submit("#a")?;
    page.click("#force")?;
    assert_eq!(page.submission_count(), 2);
    Ok(())
}

#[test]
fn required_radio_group_is_satisfied_by_any_member() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f">
          <input id="r1" type="radio" name="scope" value="all" required>
          <input id="r2" type="radio" name="scope" value="mine">
        </form>
        "#,
    )?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 0);

    page.set_checked("#r2", true)?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn required_checkbox_must_itself_be_checked() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input id="cb" type="checkbox" name="agree" required></form>"#,
    )?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 0);

    page.set_checked("#cb", true)?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn required_select_needs_a_non_empty_value() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f">
          <select name="category" required>
            <option value="">All</option>
            <option value="books">Books</option>
          </select>
        </form>
        "#,
    )?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 0);

    page.select_option("select[name=category]", "books")?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn disabled_required_controls_do_not_block() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input type="text" name="q" required disabled></form>"#,
    )?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn pattern_attribute_must_match_the_whole_value() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f">
          <input id="code" type="text" name="code" pattern="[0-9]{3}">
        </form>
        "#,
    )?;
    page.type_text("#code", "12a")?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 0);

    // Partial matches are not enough.
    page.type_text("#code", "1234")?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 0);

    page.type_text("#code", "123")?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn empty_values_and_broken_patterns_constrain_nothing() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="a"><input type="text" name="q" pattern="[0-9]{3}"></form>
        <form id="b"><input type="text" name="q" value="x" pattern="[unclosed"></form>
        "#,
    )?;
    page.request_submit("#a")?;
    page.request_submit("#b")?;
    assert_eq!(page.submission_count(), 2);
    Ok(())
}

#[test]
fn email_inputs_must_look_like_an_address() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"
        <form id="f">
          <input id="mail" type="email" name="contact">
        </form>
        "#,
    )?;
    page.type_text("#mail", "not-an-address")?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 0);

    page.type_text("#mail", "a@b.com")?;
    page.request_submit("#f")?;
    assert_eq!(page.submission_count(), 1);
    Ok(())
}

#[test]
fn blocked_interactive_submission_leaves_a_trace_line() -> Result<()> {
    let mut page = FilterPage::from_html(
        r#"<form id="f"><input type="text" name="q" required></form>"#,
    )?;
    page.enable_trace(true);
    page.set_trace_stderr(false);
    page.request_submit("#f")?;

    let logs = page.take_trace_logs();
    assert!(logs.iter().any(|line| line.contains("blocked")));
    Ok(())
}

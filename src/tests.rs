use super::*;

mod selector_engine;
mod submission_and_navigation;
mod validity_gate;

pub(crate) const FILTER_PAGE_HTML: &str = r#"
    <form id="filter-form" action="/list" method="get">
      <select name="category">
        <option value="">All categories</option>
        <option value="books">Books</option>
        <option value="music">Music</option>
      </select>
      <select name="group">
        <option value="">All groups</option>
        <option value="staff">Staff</option>
        <option value="members">Members</option>
      </select>
      <input type="text" name="search" value="">
      <input type="email" name="contact" value="">
      <input type="checkbox" name="active" value="yes">
      <button id="apply" type="submit">Apply</button>
      <button id="clear-filters" type="button">Clear Filters</button>
    </form>
"#;

pub(crate) fn filter_page() -> Result<FilterPage> {
    FilterPage::from_html(FILTER_PAGE_HTML)
}

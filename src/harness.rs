use super::*;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug)]
pub struct FilterPage {
    pub(crate) dom: Dom,
    pub(crate) document_url: String,
    pub(crate) bindings: ResetBindings,
    pub(crate) submissions: Vec<SubmissionRecord>,
    pub(crate) reset_reports: Vec<ResetReport>,
    pub(crate) result_pages: HashMap<String, String>,
    trace: bool,
    trace_submissions: bool,
    trace_resets: bool,
    trace_logs: Vec<String>,
    trace_log_limit: usize,
    trace_to_stderr: bool,
}

impl FilterPage {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_url(DEFAULT_DOCUMENT_URL, html)
    }

    pub fn from_html_with_url(url: &str, html: &str) -> Result<Self> {
        let dom = parse_document(html)?;
        Ok(Self {
            dom,
            document_url: url.to_string(),
            bindings: ResetBindings::default(),
            submissions: Vec::new(),
            reset_reports: Vec::new(),
            result_pages: HashMap::new(),
            trace: false,
            trace_submissions: true,
            trace_resets: true,
            trace_logs: Vec::new(),
            trace_log_limit: 10_000,
            trace_to_stderr: true,
        })
    }

    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.trace = enabled;
    }

    pub fn set_trace_stderr(&mut self, enabled: bool) {
        self.trace_to_stderr = enabled;
    }

    pub fn set_trace_submissions(&mut self, enabled: bool) {
        self.trace_submissions = enabled;
    }

    pub fn set_trace_resets(&mut self, enabled: bool) {
        self.trace_resets = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::InvalidOperation(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.trace_log_limit = max_entries;
        while self.trace_logs.len() > self.trace_log_limit {
            self.trace_logs.remove(0);
        }
        Ok(())
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        std::mem::take(&mut self.trace_logs)
    }

    pub(crate) fn trace_line(&mut self, line: String) {
        if self.trace {
            if self.trace_to_stderr {
                eprintln!("{line}");
            }
            if self.trace_logs.len() >= self.trace_log_limit {
                self.trace_logs.remove(0);
            }
            self.trace_logs.push(line);
        }
    }

    pub(crate) fn trace_submission_line(&mut self, line: String) {
        if self.trace && self.trace_submissions {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_reset_line(&mut self, line: String) {
        if self.trace && self.trace_resets {
            self.trace_line(line);
        }
    }

    pub(crate) fn trace_node_label(&self, node: NodeId) -> String {
        if let Some(id) = self.dom.attr(node, "id") {
            if !id.is_empty() {
                return format!("#{id}");
            }
        }
        self.dom
            .tag_name(node)
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| format!("node-{}", node.0))
    }

    pub(crate) fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.to_string()))
    }

    pub(crate) fn node_snippet(&self, node_id: NodeId) -> String {
        truncate_chars(&self.dom.dump_node(node_id), 200)
    }

    pub fn type_text(&mut self, selector: &str, text: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.is_effectively_disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .ok_or_else(|| Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: "non-element".into(),
            })?
            .to_ascii_lowercase();
        if tag != "input" && tag != "textarea" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input or textarea".into(),
                actual: tag,
            });
        }

        if let Some(kind) = effective_input_type(&self.dom, target) {
            if kind == "hidden" || kind == "image" {
                return Ok(());
            }
        }
        if self.dom.readonly(target) {
            return Ok(());
        }

        stacker::grow(32 * 1024 * 1024, || self.dom.set_value(target, text))
    }

    pub fn set_checked(&mut self, selector: &str, checked: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.is_effectively_disabled(target) {
            return Ok(());
        }

        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "input" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: tag,
            });
        }
        let kind = effective_input_type(&self.dom, target).unwrap_or_default();
        if kind != "checkbox" && kind != "radio" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "input[type=checkbox|radio]".into(),
                actual: format!("input[type={kind}]"),
            });
        }

        stacker::grow(32 * 1024 * 1024, || {
            self.dom.set_checked(target, checked)?;
            if checked && kind == "radio" {
                self.uncheck_other_radios_in_group(target)?;
            }
            Ok(())
        })
    }

    pub fn select_option(&mut self, selector: &str, value: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.is_effectively_disabled(target) {
            return Ok(());
        }
        self.require_select(selector, target)?;
        self.dom.set_select_value(target, value)
    }

    /// Selects the option whose visible label matches `label`. Both sides are
    /// NFC-normalized and whitespace-trimmed before comparison, so fixtures
    /// with composed and decomposed label text behave the same.
    pub fn select_option_by_label(&mut self, selector: &str, label: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        if self.is_effectively_disabled(target) {
            return Ok(());
        }
        self.require_select(selector, target)?;

        let wanted: String = label.trim().nfc().collect();
        let mut options = Vec::new();
        self.dom.collect_select_options(target, &mut options);
        let position = options.iter().position(|option| {
            let text: String = self.dom.text_content(*option).trim().nfc().collect();
            text == wanted
        });
        let Some(position) = position else {
            return Err(Error::SelectorNotFound(format!(
                "{selector} option labelled '{label}'"
            )));
        };
        self.dom.set_selected_index(target, position as i64)
    }

    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || self.click_node(target))
    }

    pub(crate) fn click_node(&mut self, target: NodeId) -> Result<()> {
        if self.is_effectively_disabled(target) {
            return Ok(());
        }

        // A bound reset trigger replaces the tag's default click action.
        if let Some(reset) = self.bindings.lookup(target).cloned() {
            let _ = self.run_filter_reset_inner(&reset)?;
            return Ok(());
        }

        if is_checkbox_input(&self.dom, target) {
            let current = self.dom.checked(target)?;
            self.dom.set_checked(target, !current)?;
            return Ok(());
        }

        if is_radio_input(&self.dom, target) {
            if !self.dom.checked(target)? {
                self.dom.set_checked(target, true)?;
                self.uncheck_other_radios_in_group(target)?;
            }
            return Ok(());
        }

        if is_submit_control(&self.dom, target) {
            if let Some(form) = self.resolve_form_for_submit(target) {
                self.request_submit_node(form, Some(target))?;
            }
            return Ok(());
        }

        if is_reset_control(&self.dom, target) {
            self.reset_form_node(target)?;
        }

        Ok(())
    }

    /// Programmatic submission, as `form.submit()`: no validity gate.
    pub fn submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = self.resolve_form_for_submit(target) else {
            return Ok(());
        };
        stacker::grow(32 * 1024 * 1024, || self.submit_form_node(form))
    }

    /// Interactive submission, as `form.requestSubmit()`: the validity gate
    /// applies unless the form opts out.
    pub fn request_submit(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let Some(form) = self.resolve_form_for_submit(target) else {
            return Ok(());
        };
        stacker::grow(32 * 1024 * 1024, || self.request_submit_node(form, None))
    }

    /// Native reset-button semantics for the form owning `selector`.
    pub fn reset_form(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        stacker::grow(32 * 1024 * 1024, || self.reset_form_node(target))
    }

    pub(crate) fn reset_form_node(&mut self, target: NodeId) -> Result<()> {
        let Some(form) = self.resolve_form_for_submit(target) else {
            return Ok(());
        };
        let restored = self.restore_form_defaults(form)?;
        let label = self.trace_node_label(form);
        self.trace_reset_line(format!("[reset] native form={label} restored={restored}"));
        Ok(())
    }

    pub fn value_of(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        self.dom.value(target)
    }

    pub fn checked_of(&self, selector: &str) -> Result<bool> {
        let target = self.select_one(selector)?;
        self.dom.checked(target)
    }

    pub fn selected_index_of(&self, selector: &str) -> Result<i64> {
        let target = self.select_one(selector)?;
        self.dom.selected_index(target)
    }

    pub fn text_of(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.text_content(target))
    }

    pub fn exists(&self, selector: &str) -> Result<bool> {
        Ok(self.dom.query_selector(selector)?.is_some())
    }

    pub fn dump_dom(&self, selector: &str) -> Result<String> {
        let target = self.select_one(selector)?;
        Ok(self.dom.dump_node(target))
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.text_content(target);
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_value(&self, selector: &str, expected: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.value(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual,
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_checked(&self, selector: &str, expected: bool) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.checked(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_selected_index(&self, selector: &str, expected: i64) -> Result<()> {
        let target = self.select_one(selector)?;
        let actual = self.dom.selected_index(target)?;
        if actual != expected {
            return Err(Error::AssertionFailed {
                selector: selector.to_string(),
                expected: expected.to_string(),
                actual: actual.to_string(),
                dom_snippet: self.node_snippet(target),
            });
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        let _ = self.select_one(selector)?;
        Ok(())
    }

    fn require_select(&self, selector: &str, target: NodeId) -> Result<()> {
        let tag = self
            .dom
            .tag_name(target)
            .unwrap_or_default()
            .to_ascii_lowercase();
        if tag != "select" {
            return Err(Error::TypeMismatch {
                selector: selector.to_string(),
                expected: "select".into(),
                actual: tag,
            });
        }
        Ok(())
    }
}

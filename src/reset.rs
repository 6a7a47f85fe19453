use super::*;

pub const DEFAULT_FILTER_FORM_SELECTOR: &str = "#filter-form";

/// How a filter reset treats the controls of its target form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Typed clear: every select goes to its first option, every text and
    /// email input to the empty string. Checkables keep their state.
    ClearByType,
    /// Native reset-button semantics for every control in the form.
    RestoreDefaults,
}

impl ResetPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ClearByType => "clear-by-type",
            Self::RestoreDefaults => "restore-defaults",
        }
    }
}

/// Outcome of one by-name select lookup performed during a reset. A missing
/// control is a recorded skip, never a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlLookup {
    Found { name: String },
    Missing { name: String },
}

impl ControlLookup {
    pub fn name(&self) -> &str {
        match self {
            Self::Found { name } | Self::Missing { name } => name,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// Stored description of one filter-form reset: which form it targets, what
/// policy it applies, and which named selects it forces back to their first
/// option before resubmitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterReset {
    pub(crate) form_selector: String,
    pub(crate) policy: ResetPolicy,
    pub(crate) forced_selects: Vec<String>,
}

impl Default for FilterReset {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterReset {
    pub fn new() -> Self {
        Self {
            form_selector: DEFAULT_FILTER_FORM_SELECTOR.to_string(),
            policy: ResetPolicy::ClearByType,
            forced_selects: Vec::new(),
        }
    }

    /// The superseded variant the clear-by-type contract replaced: native
    /// reset plus the two listing dropdowns forced to their first option.
    pub fn legacy() -> Self {
        Self {
            form_selector: DEFAULT_FILTER_FORM_SELECTOR.to_string(),
            policy: ResetPolicy::RestoreDefaults,
            forced_selects: vec!["category".to_string(), "group".to_string()],
        }
    }

    pub fn for_form(selector: &str) -> Self {
        Self {
            form_selector: selector.to_string(),
            ..Self::new()
        }
    }

    pub fn with_policy(mut self, policy: ResetPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn force_select(mut self, name: &str) -> Self {
        self.forced_selects.push(name.to_string());
        self
    }

    pub fn form_selector(&self) -> &str {
        &self.form_selector
    }

    pub fn policy(&self) -> ResetPolicy {
        self.policy
    }
}

/// What one reset invocation did, in order of application.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetReport {
    pub selects_cleared: usize,
    pub texts_cleared: usize,
    pub emails_cleared: usize,
    pub controls_restored: usize,
    pub forced: Vec<ControlLookup>,
    pub submitted: bool,
}

/// Reset descriptions bound to trigger elements of the current document.
/// Node ids are only meaningful for the document they were bound against,
/// so a document swap clears the store.
#[derive(Debug, Clone, Default)]
pub(crate) struct ResetBindings {
    entries: Vec<(NodeId, FilterReset)>,
}

impl ResetBindings {
    pub(crate) fn bind(&mut self, trigger: NodeId, reset: FilterReset) {
        if let Some(slot) = self.entries.iter_mut().find(|(node, _)| *node == trigger) {
            slot.1 = reset;
        } else {
            self.entries.push((trigger, reset));
        }
    }

    pub(crate) fn lookup(&self, trigger: NodeId) -> Option<&FilterReset> {
        self.entries
            .iter()
            .find(|(node, _)| *node == trigger)
            .map(|(_, reset)| reset)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FilterPage {
    /// Binds a reset description to a trigger element; clicking that element
    /// afterwards runs the reset instead of the tag's default click action.
    pub fn bind_reset_trigger(&mut self, selector: &str, reset: FilterReset) -> Result<()> {
        let trigger = self.select_one(selector)?;
        let label = self.trace_node_label(trigger);
        self.trace_reset_line(format!(
            "[reset] bound trigger={label} form={}",
            reset.form_selector
        ));
        self.bindings.bind(trigger, reset);
        Ok(())
    }

    pub fn run_filter_reset(&mut self, reset: &FilterReset) -> Result<ResetReport> {
        let reset = reset.clone();
        stacker::grow(32 * 1024 * 1024, || self.run_filter_reset_inner(&reset))
    }

    pub(crate) fn run_filter_reset_inner(&mut self, reset: &FilterReset) -> Result<ResetReport> {
        let form = self
            .dom
            .query_selector(&reset.form_selector)?
            .ok_or_else(|| Error::SelectorNotFound(reset.form_selector.clone()))?;
        if !self
            .dom
            .tag_name(form)
            .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
        {
            return Err(Error::TypeMismatch {
                selector: reset.form_selector.clone(),
                expected: "form".into(),
                actual: self.dom.tag_name(form).unwrap_or("non-element").into(),
            });
        }

        let mut report = ResetReport::default();
        match reset.policy {
            ResetPolicy::ClearByType => self.clear_controls_by_type(form, &mut report)?,
            ResetPolicy::RestoreDefaults => {
                report.controls_restored = self.restore_form_defaults(form)?;
            }
        }

        for name in &reset.forced_selects {
            match self.named_select_in_form(form, name)? {
                Some(select) => {
                    self.dom.set_selected_index(select, 0)?;
                    report.forced.push(ControlLookup::Found { name: name.clone() });
                }
                None => {
                    report.forced.push(ControlLookup::Missing { name: name.clone() });
                }
            }
        }

        let label = self.trace_node_label(form);
        self.trace_reset_line(format!(
            "[reset] form={label} policy={} selects={} texts={} emails={} restored={} forced={}",
            reset.policy.as_str(),
            report.selects_cleared,
            report.texts_cleared,
            report.emails_cleared,
            report.controls_restored,
            report.forced.len()
        ));

        // The resubmission must observe the cleared values, so it always runs
        // last. It takes the programmatic path: no validity gate.
        self.submit_form_node(form)?;
        report.submitted = true;

        self.reset_reports.push(report.clone());
        Ok(report)
    }

    fn clear_controls_by_type(&mut self, form: NodeId, report: &mut ResetReport) -> Result<()> {
        for control in self.form_elements(form)? {
            if self
                .dom
                .tag_name(control)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("select"))
            {
                self.dom.set_selected_index(control, 0)?;
                report.selects_cleared += 1;
                continue;
            }
            if is_text_input(&self.dom, control) {
                self.dom.set_value(control, "")?;
                report.texts_cleared += 1;
                continue;
            }
            if is_email_input(&self.dom, control) {
                self.dom.set_value(control, "")?;
                report.emails_cleared += 1;
            }
        }
        Ok(())
    }

    fn named_select_in_form(&self, form: NodeId, name: &str) -> Result<Option<NodeId>> {
        for control in self.form_elements(form)? {
            if !self
                .dom
                .tag_name(control)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("select"))
            {
                continue;
            }
            if self.dom.attr(control, "name").as_deref() == Some(name) {
                return Ok(Some(control));
            }
        }
        Ok(None)
    }

    pub fn reset_report_count(&self) -> usize {
        self.reset_reports.len()
    }

    pub fn take_reset_reports(&mut self) -> Vec<ResetReport> {
        std::mem::take(&mut self.reset_reports)
    }
}

use super::*;

pub(crate) fn is_form_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    element.tag_name.eq_ignore_ascii_case("input")
        || element.tag_name.eq_ignore_ascii_case("select")
        || element.tag_name.eq_ignore_ascii_case("textarea")
        || element.tag_name.eq_ignore_ascii_case("button")
}

// Lowered type attribute of an input, "text" when absent. None for anything
// that is not an input element.
pub(crate) fn effective_input_type(dom: &Dom, node_id: NodeId) -> Option<String> {
    let element = dom.element(node_id)?;
    if !element.tag_name.eq_ignore_ascii_case("input") {
        return None;
    }
    Some(
        element
            .attrs
            .get("type")
            .map(|kind| kind.to_ascii_lowercase())
            .unwrap_or_else(|| "text".to_string()),
    )
}

pub(crate) fn is_checkbox_input(dom: &Dom, node_id: NodeId) -> bool {
    effective_input_type(dom, node_id).is_some_and(|kind| kind == "checkbox")
}

pub(crate) fn is_radio_input(dom: &Dom, node_id: NodeId) -> bool {
    effective_input_type(dom, node_id).is_some_and(|kind| kind == "radio")
}

pub(crate) fn is_text_input(dom: &Dom, node_id: NodeId) -> bool {
    effective_input_type(dom, node_id).is_some_and(|kind| kind == "text")
}

pub(crate) fn is_email_input(dom: &Dom, node_id: NodeId) -> bool {
    effective_input_type(dom, node_id).is_some_and(|kind| kind == "email")
}

pub(crate) fn is_file_input(dom: &Dom, node_id: NodeId) -> bool {
    effective_input_type(dom, node_id).is_some_and(|kind| kind == "file")
}

pub(crate) fn is_submit_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if element.tag_name.eq_ignore_ascii_case("button") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(true);
    }

    if element.tag_name.eq_ignore_ascii_case("input") {
        return element
            .attrs
            .get("type")
            .map(|kind| kind.eq_ignore_ascii_case("submit"))
            .unwrap_or(false);
    }

    false
}

pub(crate) fn is_reset_control(dom: &Dom, node_id: NodeId) -> bool {
    let Some(element) = dom.element(node_id) else {
        return false;
    };

    if !element.tag_name.eq_ignore_ascii_case("button")
        && !element.tag_name.eq_ignore_ascii_case("input")
    {
        return false;
    }

    element
        .attrs
        .get("type")
        .map(|kind| kind.eq_ignore_ascii_case("reset"))
        .unwrap_or(false)
}

impl FilterPage {
    // The form attribute reassociates a control anywhere in the document;
    // without it the owner is the nearest form ancestor.
    pub(crate) fn form_owner(&self, node_id: NodeId) -> Option<NodeId> {
        if self
            .dom
            .tag_name(node_id)
            .map(|t| t.eq_ignore_ascii_case("form"))
            .unwrap_or(false)
        {
            return Some(node_id);
        }
        if let Some(form_id) = self.dom.attr(node_id, "form") {
            let owner = self.dom.by_id(&form_id)?;
            if self
                .dom
                .tag_name(owner)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("form"))
            {
                return Some(owner);
            }
            return None;
        }
        self.dom.find_ancestor_by_tag(node_id, "form")
    }

    pub(crate) fn resolve_form_for_submit(&self, target: NodeId) -> Option<NodeId> {
        self.form_owner(target)
    }

    // Controls owned by the form, in document order.
    pub(crate) fn form_elements(&self, form: NodeId) -> Result<Vec<NodeId>> {
        let tag = self
            .dom
            .tag_name(form)
            .ok_or_else(|| Error::InvalidOperation("controls target is not an element".into()))?;
        if !tag.eq_ignore_ascii_case("form") {
            return Err(Error::InvalidOperation(format!(
                "{} is not a form",
                self.trace_node_label(form)
            )));
        }

        let mut out = Vec::new();
        for node in self.dom.all_element_nodes() {
            if !is_form_control(&self.dom, node) {
                continue;
            }
            if self.form_owner(node) == Some(form) {
                out.push(node);
            }
        }
        Ok(out)
    }

    pub(crate) fn is_effectively_disabled(&self, node: NodeId) -> bool {
        if self.dom.disabled(node) {
            return true;
        }
        if !is_form_control(&self.dom, node) {
            return false;
        }

        let mut cursor = self.dom.parent(node);
        while let Some(parent) = cursor {
            if self
                .dom
                .tag_name(parent)
                .is_some_and(|tag| tag.eq_ignore_ascii_case("fieldset"))
                && self.dom.disabled(parent)
            {
                return true;
            }
            cursor = self.dom.parent(parent);
        }

        false
    }

    pub(crate) fn uncheck_other_radios_in_group(&mut self, target: NodeId) -> Result<()> {
        let target_name = self.dom.attr(target, "name").unwrap_or_default();
        if target_name.is_empty() {
            return Ok(());
        }
        let target_form = self.form_owner(target);

        for node in self.dom.all_element_nodes() {
            if node == target {
                continue;
            }
            if !is_radio_input(&self.dom, node) {
                continue;
            }
            if self.dom.attr(node, "name").unwrap_or_default() != target_name {
                continue;
            }
            if self.form_owner(node) != target_form {
                continue;
            }
            if self.dom.checked(node)? {
                self.dom.set_checked(node, false)?;
            }
        }

        Ok(())
    }

    // Native reset semantics: checkables fall back to their checked attribute,
    // selects re-derive the value from option markup, textareas return to their
    // initial text, file inputs empty out, everything else takes the value
    // attribute.
    pub(crate) fn restore_form_defaults(&mut self, form: NodeId) -> Result<usize> {
        let controls = self.form_elements(form)?;
        let mut restored = 0usize;

        for control in controls {
            if is_checkbox_input(&self.dom, control) || is_radio_input(&self.dom, control) {
                let default_checked = self.dom.attr(control, "checked").is_some();
                self.dom.set_checked(control, default_checked)?;
                restored += 1;
                continue;
            }

            if self
                .dom
                .tag_name(control)
                .map(|tag| tag.eq_ignore_ascii_case("select"))
                .unwrap_or(false)
            {
                self.dom.sync_select_value(control)?;
                restored += 1;
                continue;
            }

            if self
                .dom
                .tag_name(control)
                .map(|tag| tag.eq_ignore_ascii_case("textarea"))
                .unwrap_or(false)
            {
                let initial = self.dom.text_content(control);
                self.dom.set_value(control, &initial)?;
                restored += 1;
                continue;
            }

            if is_file_input(&self.dom, control) {
                self.dom.set_value(control, "")?;
                restored += 1;
                continue;
            }

            let default_value = self.dom.attr(control, "value").unwrap_or_default();
            self.dom.set_value(control, &default_value)?;
            restored += 1;
        }

        Ok(restored)
    }
}

use super::*;

// HTML5 email production, anchored. Deliberately looser than RFC 5322.
const EMAIL_SHAPE_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

impl FilterPage {
    pub(crate) fn form_is_valid_for_submit(&self, form: NodeId) -> Result<bool> {
        let controls = self.form_elements(form)?;
        for control in &controls {
            if !self.required_control_satisfied(*control, &controls)? {
                return Ok(false);
            }
            if !self.pattern_constraint_satisfied(*control)? {
                return Ok(false);
            }
            if !self.email_constraint_satisfied(*control)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub(crate) fn required_control_satisfied(
        &self,
        control: NodeId,
        controls: &[NodeId],
    ) -> Result<bool> {
        if self.is_effectively_disabled(control) || !self.dom.required(control) {
            return Ok(true);
        }

        let tag = self
            .dom
            .tag_name(control)
            .ok_or_else(|| Error::InvalidOperation("required target is not an element".into()))?;

        if tag.eq_ignore_ascii_case("input") {
            let kind = self
                .dom
                .attr(control, "type")
                .unwrap_or_else(|| "text".into())
                .to_ascii_lowercase();
            if !Self::input_supports_required(kind.as_str()) {
                return Ok(true);
            }
            if kind == "checkbox" {
                return self.dom.checked(control);
            }
            if kind == "radio" {
                if self.dom.checked(control)? {
                    return Ok(true);
                }
                let name = self.dom.attr(control, "name").unwrap_or_default();
                if name.is_empty() {
                    return Ok(false);
                }
                for candidate in controls {
                    if *candidate == control {
                        continue;
                    }
                    if !is_radio_input(&self.dom, *candidate) {
                        continue;
                    }
                    if self.dom.attr(*candidate, "name").unwrap_or_default() != name {
                        continue;
                    }
                    if self.dom.checked(*candidate)? {
                        return Ok(true);
                    }
                }
                return Ok(false);
            }
            return Ok(!self.dom.value(control)?.is_empty());
        }

        if tag.eq_ignore_ascii_case("select") || tag.eq_ignore_ascii_case("textarea") {
            return Ok(!self.dom.value(control)?.is_empty());
        }

        Ok(true)
    }

    fn input_supports_required(kind: &str) -> bool {
        !matches!(
            kind,
            "hidden" | "range" | "color" | "button" | "submit" | "reset" | "image"
        )
    }

    fn input_supports_pattern(kind: &str) -> bool {
        matches!(
            kind,
            "text" | "search" | "url" | "tel" | "email" | "password"
        )
    }

    pub(crate) fn pattern_constraint_satisfied(&self, control: NodeId) -> Result<bool> {
        let Some(kind) = effective_input_type(&self.dom, control) else {
            return Ok(true);
        };
        if !Self::input_supports_pattern(kind.as_str()) {
            return Ok(true);
        }
        if self.is_effectively_disabled(control) {
            return Ok(true);
        }

        let value = self.dom.value(control)?;
        if value.is_empty() {
            return Ok(true);
        }

        let Some(pattern) = self.dom.attr(control, "pattern") else {
            return Ok(true);
        };

        // An author pattern that does not compile constrains nothing.
        let Ok(regex) = fancy_regex::Regex::new(&format!("^(?:{pattern})$")) else {
            return Ok(true);
        };
        Ok(regex.is_match(&value).unwrap_or(true))
    }

    pub(crate) fn email_constraint_satisfied(&self, control: NodeId) -> Result<bool> {
        if !is_email_input(&self.dom, control) {
            return Ok(true);
        }
        if self.is_effectively_disabled(control) {
            return Ok(true);
        }

        let value = self.dom.value(control)?;
        if value.is_empty() {
            return Ok(true);
        }

        let regex = fancy_regex::Regex::new(EMAIL_SHAPE_PATTERN)
            .map_err(|err| Error::InvalidOperation(format!("email shape regex: {err}")))?;
        Ok(regex.is_match(&value).unwrap_or(true))
    }
}

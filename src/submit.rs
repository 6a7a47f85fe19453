use super::*;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitMethod {
    Get,
    Post,
}

impl SubmitMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
        }
    }
}

impl fmt::Display for SubmitMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// One performed form submission. For GET the entries also appear as the query
// of `to`; for POST they ride along as the would-be request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionRecord {
    pub method: SubmitMethod,
    pub action: String,
    pub entries: Vec<(String, String)>,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UrlParts {
    pub(crate) scheme: String,
    pub(crate) authority: String,
    pub(crate) path: String,
    pub(crate) query: String,
    pub(crate) fragment: String,
}

impl UrlParts {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let (scheme, rest) = input.split_once("://")?;
        if scheme.is_empty()
            || !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        {
            return None;
        }

        let (rest, fragment) = match rest.split_once('#') {
            Some((head, fragment)) => (head, fragment.to_string()),
            None => (rest, String::new()),
        };
        let (rest, query) = match rest.split_once('?') {
            Some((head, query)) => (head, query.to_string()),
            None => (rest, String::new()),
        };
        let (authority, path) = match rest.find('/') {
            Some(pos) => (&rest[..pos], rest[pos..].to_string()),
            None => (rest, String::new()),
        };
        if authority.is_empty() {
            return None;
        }

        Some(Self {
            scheme: scheme.to_ascii_lowercase(),
            authority: authority.to_string(),
            path,
            query,
            fragment,
        })
    }

    pub(crate) fn href(&self) -> String {
        let mut out = format!("{}://{}", self.scheme, self.authority);
        if self.path.is_empty() {
            out.push('/');
        } else {
            out.push_str(&self.path);
        }
        if !self.query.is_empty() {
            out.push('?');
            out.push_str(&self.query);
        }
        if !self.fragment.is_empty() {
            out.push('#');
            out.push_str(&self.fragment);
        }
        out
    }
}

pub(crate) fn normalize_path(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    let mut out = String::from("/");
    out.push_str(&segments.join("/"));
    if path.ends_with('/') && out != "/" {
        out.push('/');
    }
    out
}

pub(crate) fn resolve_submit_url(document_url: &str, action: &str) -> String {
    let action = action.trim();
    let Some(base) = UrlParts::parse(document_url) else {
        if action.is_empty() {
            return document_url.to_string();
        }
        return action.to_string();
    };

    if action.is_empty() {
        // An empty action resubmits to the document URL minus its fragment.
        let mut next = base;
        next.fragment.clear();
        return next.href();
    }

    if let Some(parts) = UrlParts::parse(action) {
        return parts.href();
    }

    if let Some(rest) = action.strip_prefix("//") {
        let candidate = format!("{}://{}", base.scheme, rest);
        return UrlParts::parse(&candidate)
            .map(|parts| parts.href())
            .unwrap_or(candidate);
    }

    let mut next = base;
    next.fragment.clear();

    if let Some(rest) = action.strip_prefix('#') {
        next.fragment = rest.to_string();
        return next.href();
    }

    let (action, fragment) = match action.split_once('#') {
        Some((head, fragment)) => (head, fragment.to_string()),
        None => (action, String::new()),
    };
    next.fragment = fragment;

    if let Some(rest) = action.strip_prefix('?') {
        next.query = rest.to_string();
        return next.href();
    }

    let (action, query) = match action.split_once('?') {
        Some((head, query)) => (head, query.to_string()),
        None => (action, String::new()),
    };
    next.query = query;

    if action.starts_with('/') {
        next.path = normalize_path(action);
        return next.href();
    }

    let base_dir = match next.path.rsplit_once('/') {
        Some((prefix, _)) if !prefix.is_empty() => format!("{prefix}/"),
        _ => "/".to_string(),
    };
    next.path = normalize_path(&format!("{base_dir}{action}"));
    next.href()
}

pub(crate) fn with_query(url: &str, query: &str) -> String {
    if let Some(mut parts) = UrlParts::parse(url) {
        parts.query = query.to_string();
        parts.fragment.clear();
        return parts.href();
    }
    if query.is_empty() {
        url.to_string()
    } else {
        format!("{url}?{query}")
    }
}

pub(crate) fn encode_form_urlencoded_component(src: &str) -> String {
    let mut out = String::new();
    for b in src.as_bytes() {
        if is_form_urlencoded_unescaped_byte(*b) {
            out.push(*b as char);
        } else if *b == b' ' {
            out.push('+');
        } else {
            out.push('%');
            out.push(to_hex_upper((*b >> 4) & 0x0F));
            out.push(to_hex_upper(*b & 0x0F));
        }
    }
    out
}

pub(crate) fn serialize_form_urlencoded(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                encode_form_urlencoded_component(name),
                encode_form_urlencoded_component(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

pub(crate) fn is_form_urlencoded_unescaped_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'*' | b'-' | b'.' | b'_')
}

pub(crate) fn to_hex_upper(nibble: u8) -> char {
    match nibble {
        0..=9 => (b'0' + nibble) as char,
        10..=15 => (b'A' + (nibble - 10)) as char,
        _ => '?',
    }
}

impl FilterPage {
    pub(crate) fn form_data_entries(&self, form: NodeId) -> Result<Vec<(String, String)>> {
        let mut out = Vec::new();
        for control in self.form_elements(form)? {
            if !self.is_successful_form_data_control(control)? {
                continue;
            }
            let name = self.dom.attr(control, "name").unwrap_or_default();
            let value = if effective_input_type(&self.dom, control)
                .is_some_and(|kind| kind == "hidden")
                && name == "_charset_"
            {
                "UTF-8".to_string()
            } else {
                self.form_data_control_value(control)?
            };
            out.push((name, value));
        }
        Ok(out)
    }

    pub(crate) fn is_successful_form_data_control(&self, control: NodeId) -> Result<bool> {
        if self.is_effectively_disabled(control) {
            return Ok(false);
        }
        let name = self.dom.attr(control, "name").unwrap_or_default();
        if name.is_empty() {
            return Ok(false);
        }

        let tag = self
            .dom
            .tag_name(control)
            .ok_or_else(|| Error::InvalidOperation("form data target is not an element".into()))?;

        if tag.eq_ignore_ascii_case("button") {
            return Ok(false);
        }

        if tag.eq_ignore_ascii_case("input") {
            let kind = self
                .dom
                .attr(control, "type")
                .unwrap_or_default()
                .to_ascii_lowercase();
            if matches!(
                kind.as_str(),
                "button" | "submit" | "reset" | "file" | "image"
            ) {
                return Ok(false);
            }
            if kind == "checkbox" || kind == "radio" {
                return self.dom.checked(control);
            }
        }

        Ok(true)
    }

    pub(crate) fn form_data_control_value(&self, control: NodeId) -> Result<String> {
        let mut value = self.dom.value(control)?;
        if value.is_empty()
            && (is_checkbox_input(&self.dom, control) || is_radio_input(&self.dom, control))
        {
            value = "on".into();
        }
        Ok(value)
    }

    // Programmatic submission path. Skips the validity gate the way
    // form.submit() does.
    pub(crate) fn submit_form_node(&mut self, form: NodeId) -> Result<()> {
        self.perform_submission(form)
    }

    // Interactive submission path: requestSubmit and submit-button clicks.
    pub(crate) fn request_submit_node(
        &mut self,
        form: NodeId,
        submitter: Option<NodeId>,
    ) -> Result<()> {
        let skip_validation = self.dom.attr(form, "novalidate").is_some()
            || submitter.is_some_and(|node| self.dom.attr(node, "formnovalidate").is_some());

        if !skip_validation && !self.form_is_valid_for_submit(form)? {
            let label = self.trace_node_label(form);
            self.trace_submission_line(format!("[submit] blocked form={label} reason=invalid"));
            return Ok(());
        }
        self.perform_submission(form)
    }

    pub(crate) fn perform_submission(&mut self, form: NodeId) -> Result<()> {
        let entries = self.form_data_entries(form)?;
        let method = if self
            .dom
            .attr(form, "method")
            .is_some_and(|m| m.eq_ignore_ascii_case("post"))
        {
            SubmitMethod::Post
        } else {
            SubmitMethod::Get
        };
        let action = resolve_submit_url(
            &self.document_url,
            &self.dom.attr(form, "action").unwrap_or_default(),
        );
        let to = match method {
            SubmitMethod::Get => with_query(&action, &serialize_form_urlencoded(&entries)),
            SubmitMethod::Post => action.clone(),
        };
        let from = self.document_url.clone();

        let label = self.trace_node_label(form);
        self.trace_submission_line(format!(
            "[submit] form={label} method={method} entries={}",
            entries.len()
        ));
        self.trace_submission_line(format!("[nav] from={from} to={to}"));

        self.document_url = to.clone();
        self.submissions.push(SubmissionRecord {
            method,
            action,
            entries,
            from,
            to: to.clone(),
        });
        self.load_result_page_if_exists(&to)?;
        Ok(())
    }

    pub(crate) fn load_result_page_if_exists(&mut self, url: &str) -> Result<bool> {
        let Some(html) = self.result_pages.get(url).cloned() else {
            return Ok(false);
        };
        self.replace_document_with_html(&html)?;
        self.trace_submission_line(format!("[nav] loaded result page for {url}"));
        Ok(true)
    }

    pub(crate) fn replace_document_with_html(&mut self, html: &str) -> Result<()> {
        self.dom = parse_document(html)?;
        // Trigger bindings refer to nodes of the replaced document.
        self.bindings.clear();
        Ok(())
    }

    pub fn set_result_page(&mut self, url: &str, html: &str) {
        let resolved = resolve_submit_url(&self.document_url, url);
        self.result_pages.insert(resolved, html.to_string());
    }

    pub fn clear_result_pages(&mut self) {
        self.result_pages.clear();
    }

    pub fn submission_count(&self) -> usize {
        self.submissions.len()
    }

    pub fn take_submissions(&mut self) -> Vec<SubmissionRecord> {
        std::mem::take(&mut self.submissions)
    }
}

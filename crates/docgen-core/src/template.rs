//! `$NAME` text templates.
//!
//! Grammar: `$$` is a literal dollar, `$NAME` and `${NAME}` are placeholders
//! where `NAME` matches `[_A-Za-z][_A-Za-z0-9]*`. Any other `$` is an error,
//! as is a placeholder with no value supplied.

use crate::error::{DocgenError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))")
            .expect("placeholder pattern is valid")
    })
}

/// A parsed-on-demand text template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    /// `name` is only used in error messages.
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Names of all placeholders, in order of first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for caps in placeholder_pattern().captures_iter(&self.text) {
            if let Some(name) = caps.name("named").or_else(|| caps.name("braced")) {
                if !seen.iter().any(|s: &String| s == name.as_str()) {
                    seen.push(name.as_str().to_string());
                }
            }
        }
        seen
    }

    /// Replace every placeholder with its value from `values`.
    pub fn substitute(&self, values: &BTreeMap<&str, String>) -> Result<String> {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0;

        for caps in placeholder_pattern().captures_iter(&self.text) {
            let whole = caps.get(0).expect("group 0 always matches");
            out.push_str(&self.text[last..whole.start()]);
            last = whole.end();

            if caps.name("escaped").is_some() {
                out.push('$');
            } else if let Some(name) = caps.name("named").or_else(|| caps.name("braced")) {
                let value = values.get(name.as_str()).ok_or_else(|| {
                    DocgenError::Template(format!(
                        "{}: no value for placeholder ${}",
                        self.name,
                        name.as_str()
                    ))
                })?;
                out.push_str(value);
            } else {
                let line = self.text[..whole.start()].lines().count().max(1);
                return Err(DocgenError::Template(format!(
                    "{}: invalid placeholder on line {}",
                    self.name, line
                )));
            }
        }

        out.push_str(&self.text[last..]);
        Ok(out)
    }
}

//! Minimal `{{ name }}` placeholder substitution for job descriptors.
//!
//! Single braces are left alone so shell expansions such as `${nproc}` pass
//! through untouched.

use std::collections::BTreeMap;

use shear_core::errors::{ErrorInfo, ShearError};

fn template_error(code: &str, message: &str, key: &str) -> ShearError {
    ShearError::Template(ErrorInfo::new(code, message).with_context("key", key))
}

/// Named values substituted into a template.
pub type TemplateVars = BTreeMap<&'static str, String>;

/// Replaces every `{{ key }}` in `template` with its value from `vars`.
pub fn render(template: &str, vars: &TemplateVars) -> Result<String, ShearError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after.find("}}").ok_or_else(|| {
            template_error("unclosed-placeholder", "placeholder is not closed", "")
        })?;
        let key = after[..end].trim();
        let value = vars.get(key).ok_or_else(|| {
            template_error(
                "unknown-placeholder",
                "template references a value that was not provided",
                key,
            )
        })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

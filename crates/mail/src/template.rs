//! Compiled-in HTML email templates and a minimal placeholder renderer.
//!
//! Templates use `{{ key }}` placeholders filled from a JSON object. String
//! values are HTML-escaped; numbers and booleans are printed verbatim.

use serde_json::Value;

use crate::error::MailError;

/// Template used by [`crate::MailService::send_verification_email`].
pub const VERIFICATION_EMAIL: &str = "auth/verificationEmail";

/// Every template the service can render, keyed by name.
const TEMPLATES: &[(&str, &str)] = &[(
    VERIFICATION_EMAIL,
    include_str!("../templates/auth/verification_email.html"),
)];

/// Strip a trailing `.html` so `auth/x` and `auth/x.html` resolve alike.
pub fn normalize_name(name: &str) -> &str {
    let name = name.trim();
    name.strip_suffix(".html").unwrap_or(name)
}

/// Look up a template source by name.
pub fn source(name: &str) -> Result<&'static str, MailError> {
    let name = normalize_name(name);
    TEMPLATES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, body)| *body)
        .ok_or_else(|| MailError::TemplateNotFound(name.to_string()))
}

/// Render the named template with `data`.
pub fn render(name: &str, data: &Value) -> Result<String, MailError> {
    render_source(source(name)?, data)
}

/// Render an arbitrary template string with `data`.
pub fn render_source(template: &str, data: &Value) -> Result<String, MailError> {
    let values = data
        .as_object()
        .ok_or_else(|| MailError::Template("template data must be a JSON object".into()))?;

    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| MailError::Template("unterminated placeholder".into()))?;
        let key = after[..end].trim();

        match values.get(key) {
            Some(Value::String(s)) => out.push_str(&escape_html(s)),
            Some(Value::Number(n)) => out.push_str(&n.to_string()),
            Some(Value::Bool(b)) => out.push_str(if *b { "true" } else { "false" }),
            Some(Value::Null) | None => {
                return Err(MailError::Template(format!("missing value for `{key}`")));
            }
            Some(_) => {
                return Err(MailError::Template(format!(
                    "value for `{key}` must be a string, number or boolean"
                )));
            }
        }

        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ABOUTME: `{NAME}` placeholder substitution for subcommands and compose paths.
// ABOUTME: `{{` and `}}` escape literal braces; other braces pass through untouched.

use std::collections::BTreeMap;

use super::CommandError;

/// Replace every `{NAME}` in `template` with its value from `vars`.
///
/// `NAME` must look like an environment variable name. Text in braces that
/// does not (for example `{ a b }`) is copied as-is.
pub fn substitute(template: &str, vars: &BTreeMap<String, String>) -> Result<String, CommandError> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push_str(&tail[..1]);
            rest = &tail[2..];
            continue;
        }

        if let Some(var) = placeholder(tail) {
            let value = vars
                .get(var)
                .ok_or_else(|| CommandError::UnresolvedPlaceholder {
                    var: var.to_string(),
                    template: template.to_string(),
                })?;
            out.push_str(value);
            rest = &tail[var.len() + 2..];
            continue;
        }

        out.push_str(&tail[..1]);
        rest = &tail[1..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Name inside a leading `{NAME}`, if `s` starts with one.
fn placeholder(s: &str) -> Option<&str> {
    let inner = s.strip_prefix('{')?;
    let end = inner.find('}')?;
    let name = &inner[..end];

    let mut chars = name.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some(name)
}

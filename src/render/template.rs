//! Literal template substitution.
//!
//! # Syntax
//!
//! - `{{name}}` - Substitutes the value of `name` when it is defined
//! - Any other text, including `{{unknown}}`, is copied unchanged
//!
//! There is no escaping, nesting, or whitespace trimming inside tokens:
//! `{{ name }}` is not the same token as `{{name}}`.

use std::collections::BTreeMap;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Render a template string by substituting known tokens.
///
/// Substitution is single-pass: a value that itself contains `{{token}}` is
/// inserted as-is and never expanded again.
///
/// # Examples
///
/// ```ignore
/// let vars = BTreeMap::from([("name".to_string(), "Alice".to_string())]);
/// assert_eq!(render_template("Hi {{name}} {{x}}", &vars), "Hi Alice {{x}}");
/// ```
pub fn render_template(template: &str, variables: &BTreeMap<String, String>) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find(OPEN) {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + OPEN.len()..];

        let Some(end) = after_open.find(CLOSE) else {
            // No closing braces left anywhere; the tail is plain text.
            break;
        };

        let name = &after_open[..end];
        match variables.get(name) {
            Some(value) => {
                result.push_str(value);
                rest = &after_open[end + CLOSE.len()..];
            }
            _ => {
                // Advance one brace so `{{{known}}}` and `{{ {{known}}` still
                // find the real token.
                result.push('{');
                rest = &rest[start + 1..];
            }
        }
    }

    result.push_str(rest);
    result
}

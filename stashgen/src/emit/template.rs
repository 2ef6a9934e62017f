//! Placeholder substitution for artifact templates
//!
//! Placeholders are written `{{name}}` so single braces in generated source pass through
//! untouched. Every placeholder in a template must have a value.

use error_stack::Report;

use crate::error::{Error, Result};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Substitute every `{{placeholder}}` in `template` with its value
///
/// The template is scanned once, so placeholder text inside a substituted value is copied
/// as is. An empty `{{}}` or an unterminated `{{` is literal text.
pub fn render_template(template: &str, values: &[(&str, &str)]) -> Result<String> {
    let mut rendered = String::with_capacity(template.len());
    let mut remaining = template;

    while let Some(start) = remaining.find(OPEN) {
        let after_open = &remaining[start + OPEN.len()..];
        let Some(end) = after_open.find(CLOSE) else {
            break;
        };
        let placeholder = &after_open[..end];
        rendered.push_str(&remaining[..start]);
        if placeholder.is_empty() {
            rendered.push_str(OPEN);
            rendered.push_str(CLOSE);
        } else {
            let Some((_, value)) = values.iter().find(|(name, _)| *name == placeholder) else {
                return Err(Report::new(Error::missing_placeholder(placeholder)));
            };
            rendered.push_str(value);
        }
        remaining = &after_open[end + CLOSE.len()..];
    }
    rendered.push_str(remaining);

    Ok(rendered)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests")]
mod tests {
    use super::*;

    #[test]
    fn test_substitutes_every_occurrence() {
        let rendered = render_template(
            "class {{name}} { {{name}} copy; }",
            &[("name", "Main"), ("unused", "x")],
        )
        .unwrap();
        assert_eq!(rendered, "class Main { Main copy; }");
    }

    #[test]
    fn test_missing_value_is_an_error() {
        let error = render_template("extends {{parent}}", &[]).unwrap_err();
        assert!(matches!(error.current_context(), Error::Template(_)));
    }

    #[test]
    fn test_unterminated_placeholder_is_left_alone() {
        assert_eq!(render_template("a {{b", &[]).unwrap(), "a {{b");
    }

    #[test]
    fn test_substituted_values_are_not_rendered_again() {
        let rendered = render_template(
            "{{field}} = {{key}};",
            &[("field", "a{{key}}b"), ("key", "\"k\"")],
        )
        .unwrap();
        assert_eq!(rendered, "a{{key}}b = \"k\";");
    }

    #[test]
    fn test_empty_placeholder_is_literal() {
        assert_eq!(render_template("{{}} {{x}}", &[("x", "1")]).unwrap(), "{{}} 1");
    }
}

//! Prompt template filling
//!
//! Templates are plain strings with `{name}` placeholders. Substitution is
//! literal; a placeholder with no matching variable is left as-is.

/// Fill `{name}` placeholders in a template
pub fn fill(template: &str, vars: &[(&str, &str)]) -> String {
    let mut text = template.to_string();
    for (name, value) in vars {
        text = text.replace(&format!("{{{name}}}"), value);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_substitutes_named_placeholders() {
        let text = fill("research {topic} for {query}", &[
            ("topic", "semiconductors"),
            ("query", "TSMC capacity"),
        ]);
        assert_eq!(text, "research semiconductors for TSMC capacity");
    }

    #[test]
    fn test_fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{a} {b}", &[("a", "x")]), "x {b}");
    }

    #[test]
    fn test_fill_repeated_placeholder() {
        assert_eq!(fill("{q} and {q}", &[("q", "y")]), "y and y");
    }
}

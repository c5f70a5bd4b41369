//! Minimal markup scanning.
//!
//! Finds opening tags by name and tokenizes their `name="value"` attribute
//! pairs in a single pass. This is deliberately not an XML parser: the
//! bounded element subset this crate understands does not need one, and a
//! linear scan cannot backtrack pathologically on malformed input.

/// An opening tag and its attributes, borrowed from the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Element<'a> {
    attrs: Vec<(&'a str, &'a str)>,
}

impl<'a> Element<'a> {
    /// Raw attribute value, if the attribute is present.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.attrs
            .iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| *value)
    }

    /// Attribute parsed as a number. `None` when absent or unparseable.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.attr(name)?.trim().parse().ok()
    }

    /// Attribute parsed as a number, defaulting to zero when absent,
    /// the common rule for basic-shape geometry attributes.
    pub fn number_or_zero(&self, name: &str) -> f64 {
        self.number(name).unwrap_or(0.0)
    }
}

/// All opening `<tag …>` elements named `tag`, in source order.
pub fn elements<'a>(text: &'a str, tag: &str) -> Vec<Element<'a>> {
    let mut found = Vec::new();
    let needle = format!("<{tag}");
    for (start, _) in text.match_indices(&needle) {
        let rest = &text[start + needle.len()..];
        // Reject prefix matches such as "<pathological" for "<path".
        if rest
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-')
        {
            continue;
        }
        found.push(Element {
            attrs: parse_attrs(rest),
        });
    }
    found
}

/// Tokenize `name="value"` pairs until the tag closes (or the input ends,
/// for unterminated markup). Single or double quotes are accepted, as are
/// unquoted values and bare boolean attributes.
fn parse_attrs(s: &str) -> Vec<(&str, &str)> {
    let bytes = s.as_bytes();
    let mut attrs = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        // Skip whitespace and the '/' of a self-closing tag.
        while i < bytes.len() && (bytes[i].is_ascii_whitespace() || bytes[i] == b'/') {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] == b'>' || bytes[i] == b'<' {
            break;
        }

        let name_start = i;
        while i < bytes.len() && is_name_byte(bytes[i]) {
            i += 1;
        }
        if i == name_start {
            // Not an attribute name; stray byte inside the tag.
            i += 1;
            continue;
        }
        let name = &s[name_start..i];

        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() || bytes[i] != b'=' {
            // Boolean attribute with no value.
            attrs.push((name, ""));
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let value = if bytes[i] == b'"' || bytes[i] == b'\'' {
            let quote = bytes[i];
            i += 1;
            let value_start = i;
            while i < bytes.len() && bytes[i] != quote {
                i += 1;
            }
            let value = &s[value_start..i];
            if i < bytes.len() {
                i += 1;
            }
            value
        } else {
            let value_start = i;
            while i < bytes.len() && !bytes[i].is_ascii_whitespace() && bytes[i] != b'>' {
                i += 1;
            }
            &s[value_start..i]
        };
        attrs.push((name, value));
    }
    attrs
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_elements_by_tag() {
        let text = r#"<svg><rect x="1"/><circle r="2"/><rect x="3"/></svg>"#;
        let rects = elements(text, "rect");
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].attr("x"), Some("1"));
        assert_eq!(rects[1].attr("x"), Some("3"));
    }

    #[test]
    fn tag_match_respects_word_boundary() {
        let text = r#"<path d="M0 0"/><pathological d="nope"/>"#;
        assert_eq!(elements(text, "path").len(), 1);
    }

    #[test]
    fn single_and_double_quotes() {
        let text = r#"<rect x='1' y="2"/>"#;
        let el = &elements(text, "rect")[0];
        assert_eq!(el.number("x"), Some(1.0));
        assert_eq!(el.number("y"), Some(2.0));
    }

    #[test]
    fn unquoted_values_and_boolean_attributes() {
        let text = "<rect x=5 hidden width=10>";
        let el = &elements(text, "rect")[0];
        assert_eq!(el.number("x"), Some(5.0));
        assert_eq!(el.attr("hidden"), Some(""));
        assert_eq!(el.number("width"), Some(10.0));
    }

    #[test]
    fn attributes_spanning_lines() {
        let text = "<rect\n  x=\"1\"\n  y=\"2\"\n/>";
        let el = &elements(text, "rect")[0];
        assert_eq!(el.number("x"), Some(1.0));
        assert_eq!(el.number("y"), Some(2.0));
    }

    #[test]
    fn missing_attribute_is_none_and_defaults_to_zero() {
        let text = r#"<rect width="10"/>"#;
        let el = &elements(text, "rect")[0];
        assert_eq!(el.number("x"), None);
        assert_eq!(el.number_or_zero("x"), 0.0);
    }

    #[test]
    fn attrs_stop_at_tag_close() {
        let text = r#"<rect x="1"/> y="2""#;
        let el = &elements(text, "rect")[0];
        assert_eq!(el.attr("y"), None);
    }

    #[test]
    fn unterminated_tag_does_not_panic() {
        let text = r#"<rect x="1"#;
        let el = &elements(text, "rect")[0];
        assert_eq!(el.attr("x"), Some("1"));
    }
}

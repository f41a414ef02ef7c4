//! Interpolation token extraction (`{{ expr }}`).

use lvue_relief::ast::{InterpolationData, InterpolationMap};

/// Collect every `open expr close` token in `text`, keyed by the trimmed
/// expression. Returns `None` when nothing was found.
///
/// Tokens do not nest: an opening delimiter seen before the closing one
/// restarts the token there. Empty expressions are skipped.
pub fn extract_interpolations(text: &str, open: &str, close: &str) -> Option<InterpolationMap> {
    if open.is_empty() || close.is_empty() {
        return None;
    }

    let mut data = InterpolationMap::default();
    let mut cursor = 0;
    while let Some(found) = text[cursor..].find(open) {
        let mut start = cursor + found;
        let Some(len) = text[start + open.len()..].find(close) else {
            break;
        };
        let end = start + open.len() + len;

        // Innermost opening delimiter wins
        if let Some(inner) = text[start + open.len()..end].rfind(open) {
            start += open.len() + inner;
        }

        let expression = text[start + open.len()..end].trim();
        if !expression.is_empty() {
            let raw_token = &text[start..end + close.len()];
            data.insert(expression.into(), InterpolationData::new(raw_token));
        }
        cursor = end + close.len();
    }

    (!data.is_empty()).then_some(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<(String, String)> {
        extract_interpolations(text, "{{", "}}")
            .map(|data| {
                data.into_iter()
                    .map(|(k, v)| (k.to_string(), v.raw_token.to_string()))
                    .collect()
            })
            .unwrap_or_default()
    }

    #[test]
    fn test_single_token() {
        assert_eq!(
            extract("{{ item }}"),
            [("item".to_string(), "{{ item }}".to_string())]
        );
    }

    #[test]
    fn test_multiple_tokens_in_order() {
        assert_eq!(
            extract("Hi {{ first }} {{last}}, {{ first }}!"),
            [
                ("first".to_string(), "{{ first }}".to_string()),
                ("last".to_string(), "{{last}}".to_string()),
            ]
        );
    }

    #[test]
    fn test_call_expression() {
        assert_eq!(
            extract("{{ format(date) }}"),
            [("format(date)".to_string(), "{{ format(date) }}".to_string())]
        );
    }

    #[test]
    fn test_nested_open_restarts_token() {
        assert_eq!(
            extract("{{ a {{ b }}"),
            [("b".to_string(), "{{ b }}".to_string())]
        );
    }

    #[test]
    fn test_no_tokens() {
        assert!(extract_interpolations("plain text", "{{", "}}").is_none());
        assert!(extract_interpolations("{{ unclosed", "{{", "}}").is_none());
        assert!(extract_interpolations("{{   }}", "{{", "}}").is_none());
    }

    #[test]
    fn test_custom_delimiters() {
        let data = extract_interpolations("[[ total ]]", "[[", "]]").unwrap();
        assert_eq!(data["total"].raw_token, "[[ total ]]");
    }
}

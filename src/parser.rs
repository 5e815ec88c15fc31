//! Definition-string tokenizer and typed option accessors.
//!
//! A parameter definition is a single line of whitespace-separated
//! `key=value` options:
//!
//! ```text
//! name=Output Gain label=dB min=-60 max=12 default=0 nsteps=0 auto=true
//! mode=[Low Cut, High Cut, Band Pass] default=1
//! ```
//!
//! [`parse_options`] turns one such line into an option-name → token-list
//! map; the `as_*` accessors interpret a token list as a concrete type.
//! Parsing never fails: malformed tokens degrade to each accessor's
//! fallback (`0`, `0.0`, `false`, empty string). Callers are expected to
//! probe the map for presence first and substitute their own defaults for
//! absent options; the accessors are only defined over present ones.

use std::collections::HashMap;

/// Tokenize a definition string into an option map.
///
/// Grammar:
/// - `key=value` opens a new option (`key` is ASCII alphanumeric or `_`);
///   a repeated key replaces the earlier entry.
/// - Bare tokens append to the most recently opened option, so string
///   values may span several words (`name=Output Gain`).
/// - `key=[a, b, c]` collects a comma-separated list; the brackets may
///   span whitespace. An unterminated list is closed at end of input.
/// - Tokens before the first key are ignored.
pub fn parse_options(text: &str) -> HashMap<String, Vec<String>> {
    let mut options: HashMap<String, Vec<String>> = HashMap::new();
    let mut current: Option<String> = None;
    // (key, buffered list text) while inside an open bracket
    let mut open_list: Option<(String, String)> = None;

    for token in text.split_whitespace() {
        if let Some((key, buffer)) = open_list.as_mut() {
            if let Some(end) = token.find(']') {
                buffer.push(' ');
                buffer.push_str(&token[..end]);
                let key = key.clone();
                options.insert(key.clone(), split_list(buffer));
                current = Some(key);
                open_list = None;
            } else {
                buffer.push(' ');
                buffer.push_str(token);
            }
            continue;
        }

        match split_key(token) {
            Some((key, rest)) => {
                if let Some(rest) = rest.strip_prefix('[') {
                    if let Some(end) = rest.find(']') {
                        options.insert(key.to_string(), split_list(&rest[..end]));
                        current = Some(key.to_string());
                    } else {
                        open_list = Some((key.to_string(), rest.to_string()));
                    }
                } else {
                    let mut tokens = Vec::new();
                    if !rest.is_empty() {
                        tokens.push(rest.to_string());
                    }
                    options.insert(key.to_string(), tokens);
                    current = Some(key.to_string());
                }
            }
            None => {
                if let Some(key) = &current {
                    if let Some(tokens) = options.get_mut(key) {
                        tokens.push(token.to_string());
                    }
                }
            }
        }
    }

    if let Some((key, buffer)) = open_list {
        options.insert(key, split_list(&buffer));
    }

    options
}

/// Split `key=rest` if `key` is a valid option identifier.
fn split_key(token: &str) -> Option<(&str, &str)> {
    let eq = token.find('=')?;
    let (key, rest) = (&token[..eq], &token[eq + 1..]);
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_') {
        return None;
    }
    Some((key, rest))
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .map(String::from)
        .collect()
}

/// Tokens joined back into a single space-separated string.
pub fn as_string(tokens: &[String]) -> String {
    tokens.join(" ")
}

/// First token as a float; `0.0` when missing or malformed.
pub fn as_float(tokens: &[String]) -> f32 {
    tokens
        .first()
        .and_then(|token| token.parse().ok())
        .unwrap_or(0.0)
}

/// First token as an integer; a float literal is truncated toward zero;
/// `0` when missing or malformed.
pub fn as_integer(tokens: &[String]) -> i32 {
    let Some(token) = tokens.first() else {
        return 0;
    };
    token
        .parse::<i32>()
        .ok()
        .or_else(|| token.parse::<f32>().ok().map(|value| value as i32))
        .unwrap_or(0)
}

/// First token as a boolean.
///
/// `true`, `yes` and `on` (case-insensitive) are truthy; any other token
/// is parsed as a number and is truthy iff non-zero. Missing or malformed
/// tokens are `false`.
pub fn as_bool(tokens: &[String]) -> bool {
    let Some(token) = tokens.first() else {
        return false;
    };
    if ["true", "yes", "on"]
        .iter()
        .any(|word| token.eq_ignore_ascii_case(word))
    {
        return true;
    }
    token.parse::<f32>().map(|value| value != 0.0).unwrap_or(false)
}

/// Token list as-is (for `key=[...]` options).
pub fn as_list(tokens: &[String]) -> Vec<String> {
    tokens.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_options() {
        let options = parse_options("name=Gain min=0 max=1");
        assert_eq!(options["name"], vec!["Gain"]);
        assert_eq!(options["min"], vec!["0"]);
        assert_eq!(options["max"], vec!["1"]);
        assert!(!options.contains_key("default"));
    }

    #[test]
    fn test_multi_word_string() {
        let options = parse_options("name=Output Gain label=dB");
        assert_eq!(as_string(&options["name"]), "Output Gain");
        assert_eq!(as_string(&options["label"]), "dB");
    }

    #[test]
    fn test_list_with_spaces() {
        let options = parse_options("mode=[Low Cut, High Cut, Band Pass] default=1");
        assert_eq!(
            as_list(&options["mode"]),
            vec!["Low Cut", "High Cut", "Band Pass"]
        );
        assert_eq!(as_float(&options["default"]), 1.0);
    }

    #[test]
    fn test_compact_list() {
        let options = parse_options("list=[Low,Mid,High]");
        assert_eq!(as_list(&options["list"]), vec!["Low", "Mid", "High"]);
    }

    #[test]
    fn test_unterminated_list_closes_at_end() {
        let options = parse_options("list=[Low, Mid, High");
        assert_eq!(as_list(&options["list"]), vec!["Low", "Mid", "High"]);
    }

    #[test]
    fn test_last_key_wins() {
        let options = parse_options("min=0 min=-1");
        assert_eq!(as_float(&options["min"]), -1.0);
    }

    #[test]
    fn test_leading_garbage_ignored() {
        let options = parse_options("noise ]weird name=Ok");
        assert_eq!(options.len(), 1);
        assert_eq!(as_string(&options["name"]), "Ok");
    }

    #[test]
    fn test_as_float_fallback() {
        assert_eq!(as_float(&["abc".to_string()]), 0.0);
        assert_eq!(as_float(&[]), 0.0);
        assert_eq!(as_float(&["-2.5".to_string()]), -2.5);
    }

    #[test]
    fn test_as_integer() {
        assert_eq!(as_integer(&["16".to_string()]), 16);
        assert_eq!(as_integer(&["2.9".to_string()]), 2);
        assert_eq!(as_integer(&["junk".to_string()]), 0);
        assert_eq!(as_integer(&[]), 0);
    }

    #[test]
    fn test_as_bool_truthy_tokens() {
        for token in ["true", "True", "YES", "on", "1", "2.5"] {
            assert!(as_bool(&[token.to_string()]), "{} should be truthy", token);
        }
        for token in ["false", "off", "no", "0", "0.0", "junk"] {
            assert!(!as_bool(&[token.to_string()]), "{} should be falsy", token);
        }
        assert!(!as_bool(&[]));
    }

    #[test]
    fn test_empty_value_yields_empty_tokens() {
        let options = parse_options("label= min=0");
        assert_eq!(as_string(&options["label"]), "");
        assert_eq!(as_float(&options["label"]), 0.0);
    }
}

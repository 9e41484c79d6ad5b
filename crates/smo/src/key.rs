//! Key transformation strategies applied by keyed containers.

use std::fmt;
use std::sync::Arc;

use crate::path::PathSegment;

/// Caller-supplied key conversion. Receives the full coding path, whose last
/// segment is the key being converted, and returns the key to use.
pub type KeyConverter = Arc<dyn Fn(&[PathSegment]) -> String + Send + Sync>;

/// How object keys found in the data are rewritten before lookup.
#[derive(Clone, Default)]
pub enum KeyDecodingStrategy {
    /// Keys are used as they appear in the data.
    #[default]
    UseDefaultKeys,
    /// `snake_case` keys are converted to `camelCase`.
    ConvertFromSnakeCase,
    Custom(KeyConverter),
}

impl KeyDecodingStrategy {
    pub fn custom(f: impl Fn(&[PathSegment]) -> String + Send + Sync + 'static) -> Self {
        KeyDecodingStrategy::Custom(Arc::new(f))
    }
}

impl fmt::Debug for KeyDecodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyDecodingStrategy::UseDefaultKeys => f.write_str("UseDefaultKeys"),
            KeyDecodingStrategy::ConvertFromSnakeCase => f.write_str("ConvertFromSnakeCase"),
            KeyDecodingStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// How caller-facing keys are rewritten before being stored.
#[derive(Clone, Default)]
pub enum KeyEncodingStrategy {
    #[default]
    UseDefaultKeys,
    /// `camelCase` keys are converted to `snake_case`.
    ConvertToSnakeCase,
    Custom(KeyConverter),
}

impl KeyEncodingStrategy {
    pub fn custom(f: impl Fn(&[PathSegment]) -> String + Send + Sync + 'static) -> Self {
        KeyEncodingStrategy::Custom(Arc::new(f))
    }
}

impl fmt::Debug for KeyEncodingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyEncodingStrategy::UseDefaultKeys => f.write_str("UseDefaultKeys"),
            KeyEncodingStrategy::ConvertToSnakeCase => f.write_str("ConvertToSnakeCase"),
            KeyEncodingStrategy::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Converts `snake_case` to `camelCase`.
///
/// Leading and trailing underscores are kept. A key without inner
/// underscores is returned unchanged; otherwise the first word is
/// lowercased and the following words are capitalized.
pub fn convert_from_snake_case(key: &str) -> String {
    let Some(start) = key.find(|c| c != '_') else {
        return key.to_owned();
    };
    let end = key.trim_end_matches('_').len();
    let (leading, body, trailing) = (&key[..start], &key[start..end], &key[end..]);

    let words: Vec<&str> = body.split('_').filter(|w| !w.is_empty()).collect();
    if words.len() == 1 {
        return key.to_owned();
    }

    let mut out = String::with_capacity(key.len());
    out.push_str(leading);
    out.push_str(&words[0].to_lowercase());
    for word in &words[1..] {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out.push_str(trailing);
    out
}

/// Converts `camelCase` to `snake_case`.
///
/// Runs of capitals are treated as one word, ending at the capital that
/// precedes a lowercase letter: `myURLValue` becomes `my_url_value`.
pub fn convert_to_snake_case(key: &str) -> String {
    if key.is_empty() {
        return String::new();
    }
    let chars: Vec<char> = key.chars().collect();
    let end = chars.len();
    let mut words: Vec<(usize, usize)> = Vec::new();
    let mut word_start = 0;
    let mut search_start = 1;

    while let Some(upper) = (search_start..end).find(|&i| chars[i].is_uppercase()) {
        words.push((word_start, upper));
        let Some(lower) = (upper..end).find(|&i| chars[i].is_lowercase()) else {
            word_start = upper;
            break;
        };
        if lower == upper + 1 {
            word_start = upper;
        } else {
            words.push((upper, lower - 1));
            word_start = lower - 1;
        }
        search_start = lower + 1;
    }
    words.push((word_start, end));

    words
        .iter()
        .map(|&(from, to)| chars[from..to].iter().collect::<String>().to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_snake_case() {
        assert_eq!(convert_to_snake_case("userName"), "user_name");
        assert_eq!(convert_to_snake_case("name"), "name");
        assert_eq!(convert_to_snake_case("myURLValue"), "my_url_value");
        assert_eq!(convert_to_snake_case("oneTwoThree"), "one_two_three");
        assert_eq!(convert_to_snake_case("already_snake"), "already_snake");
        assert_eq!(convert_to_snake_case("x"), "x");
        assert_eq!(convert_to_snake_case(""), "");
    }

    #[test]
    fn from_snake_case() {
        assert_eq!(convert_from_snake_case("user_name"), "userName");
        assert_eq!(convert_from_snake_case("one_two_three"), "oneTwoThree");
        assert_eq!(convert_from_snake_case("_private_key_"), "_privateKey_");
        assert_eq!(convert_from_snake_case("double__gap"), "doubleGap");
        assert_eq!(convert_from_snake_case("ALL_CAPS"), "allCaps");
        assert_eq!(convert_from_snake_case("camelCase"), "camelCase");
        assert_eq!(convert_from_snake_case("___"), "___");
        assert_eq!(convert_from_snake_case(""), "");
    }

    #[test]
    fn snake_case_round_trip_for_simple_identifiers() {
        for key in ["userName", "deviceId", "batteryLevel", "a", "fooBarBaz"] {
            let snake = convert_to_snake_case(key);
            assert_eq!(convert_from_snake_case(&snake), key, "via {snake}");
        }
    }

    #[test]
    fn strategy_debug_hides_closure() {
        let s = KeyDecodingStrategy::custom(|path| path.len().to_string());
        assert_eq!(format!("{s:?}"), "Custom(..)");
        assert_eq!(format!("{:?}", KeyEncodingStrategy::default()), "UseDefaultKeys");
    }
}

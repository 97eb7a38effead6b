//! Name normalization into comparison keys.

use std::borrow::Borrow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Comparison form of a name. Distinct raw names may share a key.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Folds a raw name into its [`NormalizedKey`].
///
/// - Compatibility-decomposes (NFKD) and drops combining marks
/// - Lowercases
/// - Keeps only alphanumeric and separator characters
/// - Collapses separator runs into one space and trims
///
/// The function is idempotent: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(raw: &str) -> NormalizedKey {
    let folded: String = raw
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || is_separator(*c))
        .collect();
    let words: Vec<&str> = folded
        .split(is_separator)
        .filter(|word| !word.is_empty())
        .collect();
    NormalizedKey(words.join(" "))
}

/// Unicode whitespace plus the ASCII information separators (U+001C to U+001F).
fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\u{1c}'..='\u{1f}').contains(&c)
}

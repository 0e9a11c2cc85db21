// Query and field text normalization
//
// *La Question* (The Question) - Fold free text into comparable character sequences

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Text folded for matching, with a map back to the source characters
///
/// Folding applies compatibility decomposition, drops combining marks,
/// lowercases and collapses whitespace runs to a single space, so `"Élodie"`
/// and `"elodie"` compare equal. `origins[i]` is the char offset in the source
/// string that produced `chars[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedText {
    /// Folded characters
    pub chars: Vec<char>,

    /// Source char offset of each folded character
    pub origins: Vec<usize>,
}

impl NormalizedText {
    /// Fold a field value
    pub fn new(text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut origins = Vec::with_capacity(text.len());

        for (offset, ch) in text.chars().enumerate() {
            for folded in std::iter::once(ch)
                .nfkd()
                .filter(|c| !is_combining_mark(*c))
                .flat_map(char::to_lowercase)
            {
                if folded.is_whitespace() {
                    if chars.last() == Some(&' ') {
                        continue;
                    }
                    chars.push(' ');
                } else {
                    chars.push(folded);
                }
                origins.push(offset);
            }
        }

        Self { chars, origins }
    }

    /// Number of folded characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Whether nothing survived folding
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Map a half-open range of folded characters back to source char offsets
    pub fn source_span(&self, start: usize, end: usize) -> Option<(usize, usize)> {
        if start >= end || end > self.origins.len() {
            return None;
        }
        Some((self.origins[start], self.origins[end - 1] + 1))
    }
}

/// A non-empty, folded search pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPattern {
    /// Original query text
    pub original: String,

    /// Folded pattern characters, inner whitespace collapsed to one space
    pub chars: Vec<char>,
}

impl QueryPattern {
    /// Parse a query, returning `None` when it is empty or whitespace-only
    pub fn parse(query: &str) -> Option<Self> {
        let folded = NormalizedText::new(query).chars;

        let start = folded.iter().position(|c| *c != ' ')?;
        let end = folded.iter().rposition(|c| *c != ' ')? + 1;

        Some(Self {
            original: query.to_string(),
            chars: folded[start..end].to_vec(),
        })
    }

    /// Pattern length in folded characters
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; empty queries never produce a pattern
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

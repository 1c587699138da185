//! Decode OpenAlex abstract inverted index to plaintext
//!
//! OpenAlex stores abstracts as inverted indexes for legal reasons:
//! ```json
//! {"Despite": [0], "growing": [1], "interest": [2, 50], ...}
//! ```
//!
//! This module reconstructs the original text by position.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::decode::{Decode, Decoder, decode_value};
use crate::error::DecodeError;
use crate::kind::EntityKind;

/// Typed `abstract_inverted_index`: word → positions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct InvertedIndex(pub BTreeMap<String, Vec<u32>>);

impl InvertedIndex {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of word occurrences (abstract length in tokens)
    pub fn token_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// Space-separated words in original order
    ///
    /// # Example
    /// ```
    /// use std::collections::BTreeMap;
    /// use aletheca_openalex::abstract_decode::InvertedIndex;
    ///
    /// let index = InvertedIndex(BTreeMap::from([
    ///     ("world".to_string(), vec![1]),
    ///     ("Hello".to_string(), vec![0]),
    /// ]));
    /// assert_eq!(index.to_text(), "Hello world");
    /// ```
    pub fn to_text(&self) -> String {
        let mut pairs: Vec<(u32, &str)> = self
            .0
            .iter()
            .flat_map(|(word, positions)| positions.iter().map(move |p| (*p, word.as_str())))
            .collect();
        pairs.sort_by_key(|(pos, _)| *pos);
        let words: Vec<&str> = pairs.into_iter().map(|(_, w)| w).collect();
        words.join(" ")
    }
}

impl Decode for InvertedIndex {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        BTreeMap::<String, Vec<u32>>::decode(value, cx).map(Self)
    }
}

/// Plaintext abstract from a raw `abstract_inverted_index` value.
///
/// `None` when the value is absent, `null`, malformed, or empty.
///
/// # Example
/// ```
/// use serde_json::json;
/// use aletheca_openalex::decode_abstract;
///
/// let index = json!({"Hello": [0], "world": [1]});
/// assert_eq!(decode_abstract(Some(&index)).as_deref(), Some("Hello world"));
/// ```
pub fn decode_abstract(value: Option<&Value>) -> Option<String> {
    let value = value.filter(|v| !v.is_null())?;
    let (index, _) = decode_value::<InvertedIndex>(EntityKind::Work, value).ok()?;
    let text = index.to_text();
    if text.is_empty() { None } else { Some(text) }
}

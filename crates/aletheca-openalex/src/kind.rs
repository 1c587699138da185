//! OpenAlex entity kinds

use std::fmt;

use serde_json::Value;

use crate::ids::{IdType, determine_id_type};

/// OpenAlex entity types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    /// Academic works (papers, articles, etc.)
    Work,
    /// Researchers and authors
    Author,
    /// Journals, repositories, conferences
    Source,
    /// Universities, research organizations
    Institution,
    /// Academic publishers
    Publisher,
    /// Research topics (hierarchical classification)
    Topic,
    /// Legacy concept tagging (Wikidata-based)
    Concept,
    /// Funding organizations
    Funder,
    /// Keywords extracted from works
    Keyword,
}

impl EntityKind {
    /// Parse entity from singular or plural name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        let singular = name.strip_suffix('s').unwrap_or(&name);
        Self::all().iter().copied().find(|k| k.as_str() == singular)
    }

    /// Singular lowercase tag (`work`, `author`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Author => "author",
            Self::Source => "source",
            Self::Institution => "institution",
            Self::Publisher => "publisher",
            Self::Topic => "topic",
            Self::Concept => "concept",
            Self::Funder => "funder",
            Self::Keyword => "keyword",
        }
    }

    /// API collection path segment (`works`, `authors`, ...)
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Work => "works",
            Self::Author => "authors",
            Self::Source => "sources",
            Self::Institution => "institutions",
            Self::Publisher => "publishers",
            Self::Topic => "topics",
            Self::Concept => "concepts",
            Self::Funder => "funders",
            Self::Keyword => "keywords",
        }
    }

    /// Leading letter of the short OpenAlex id (`W2741809807`).
    ///
    /// Keywords use slug ids and have no prefix letter.
    pub fn id_prefix(&self) -> Option<char> {
        match self {
            Self::Work => Some('W'),
            Self::Author => Some('A'),
            Self::Source => Some('S'),
            Self::Institution => Some('I'),
            Self::Publisher => Some('P'),
            Self::Topic => Some('T'),
            Self::Concept => Some('C'),
            Self::Funder => Some('F'),
            Self::Keyword => None,
        }
    }

    pub fn from_id_prefix(prefix: char) -> Option<Self> {
        let prefix = prefix.to_ascii_uppercase();
        Self::all()
            .iter()
            .copied()
            .find(|k| k.id_prefix() == Some(prefix))
    }

    /// List all available entities
    pub fn all() -> &'static [EntityKind] {
        &[
            Self::Work,
            Self::Author,
            Self::Source,
            Self::Institution,
            Self::Publisher,
            Self::Topic,
            Self::Concept,
            Self::Funder,
            Self::Keyword,
        ]
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Guess the kind of a raw entity payload from its `id`.
pub fn infer_kind(raw: &Value) -> Option<EntityKind> {
    let id = raw.get("id")?.as_str()?;
    match determine_id_type(id) {
        IdType::OpenAlex(kind) => Some(kind),
        _ => None,
    }
}

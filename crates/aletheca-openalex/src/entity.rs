//! Entity dispatch: decode a raw payload by kind tag

use serde::Serialize;
use serde_json::Value;

use crate::decode::{Decode, Decoder, decode_value};
use crate::error::DecodeError;
use crate::kind::EntityKind;
use crate::schema::{
    Author, Concept, Funder, Institution, Keyword, Publisher, Source, Topic, Work,
};

/// A hydrated OpenAlex entity record.
pub trait Record: Decode + Serialize {
    const KIND: EntityKind;

    /// Canonical id (never empty)
    fn id(&self) -> &str;

    fn display_name(&self) -> &str;
}

/// Any hydrated entity. Encodes as the bare record (no tag).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Work(Box<Work>),
    Author(Box<Author>),
    Source(Box<Source>),
    Institution(Box<Institution>),
    Publisher(Box<Publisher>),
    Topic(Box<Topic>),
    Concept(Box<Concept>),
    Funder(Box<Funder>),
    Keyword(Box<Keyword>),
}

macro_rules! each_entity {
    ($entity:expr, $record:ident => $body:expr) => {
        match $entity {
            Entity::Work($record) => $body,
            Entity::Author($record) => $body,
            Entity::Source($record) => $body,
            Entity::Institution($record) => $body,
            Entity::Publisher($record) => $body,
            Entity::Topic($record) => $body,
            Entity::Concept($record) => $body,
            Entity::Funder($record) => $body,
            Entity::Keyword($record) => $body,
        }
    };
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Work(_) => EntityKind::Work,
            Self::Author(_) => EntityKind::Author,
            Self::Source(_) => EntityKind::Source,
            Self::Institution(_) => EntityKind::Institution,
            Self::Publisher(_) => EntityKind::Publisher,
            Self::Topic(_) => EntityKind::Topic,
            Self::Concept(_) => EntityKind::Concept,
            Self::Funder(_) => EntityKind::Funder,
            Self::Keyword(_) => EntityKind::Keyword,
        }
    }

    pub fn id(&self) -> &str {
        each_entity!(self, r => r.id())
    }

    pub fn display_name(&self) -> &str {
        each_entity!(self, r => r.display_name())
    }

    /// Wire-shaped JSON for this entity
    pub fn to_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }

    pub fn as_work(&self) -> Option<&Work> {
        match self {
            Self::Work(work) => Some(work.as_ref()),
            _ => None,
        }
    }
}

macro_rules! impl_from_record {
    ($($variant:ident),+) => {
        $(
            impl From<$variant> for Entity {
                fn from(record: $variant) -> Self {
                    Entity::$variant(Box::new(record))
                }
            }
        )+
    };
}

impl_from_record!(Work, Author, Source, Institution, Publisher, Topic, Concept, Funder, Keyword);

/// A decoded entity together with its non-fatal issues
#[derive(Debug, Clone)]
pub struct Decoded {
    pub entity: Entity,
    pub issues: Vec<DecodeError>,
}

/// Decode `raw` as an entity of `kind`.
pub fn decode(kind: EntityKind, raw: &Value) -> Result<Entity, DecodeError> {
    decode_with_issues(kind, raw).map(|decoded| decoded.entity)
}

/// Like [`decode`], also returning the issues collected along the way.
pub fn decode_with_issues(kind: EntityKind, raw: &Value) -> Result<Decoded, DecodeError> {
    decode_in(Decoder::new(kind), raw)
}

/// Decode with a prepared context (kind and path prefix come from `cx`).
pub(crate) fn decode_in(mut cx: Decoder, raw: &Value) -> Result<Decoded, DecodeError> {
    fn run<T: Record>(raw: &Value, cx: &mut Decoder) -> Result<Entity, DecodeError>
    where
        Entity: From<T>,
    {
        T::decode(raw, cx).map(Entity::from)
    }

    let entity = match cx.entity() {
        EntityKind::Work => run::<Work>(raw, &mut cx),
        EntityKind::Author => run::<Author>(raw, &mut cx),
        EntityKind::Source => run::<Source>(raw, &mut cx),
        EntityKind::Institution => run::<Institution>(raw, &mut cx),
        EntityKind::Publisher => run::<Publisher>(raw, &mut cx),
        EntityKind::Topic => run::<Topic>(raw, &mut cx),
        EntityKind::Concept => run::<Concept>(raw, &mut cx),
        EntityKind::Funder => run::<Funder>(raw, &mut cx),
        EntityKind::Keyword => run::<Keyword>(raw, &mut cx),
    }?;
    Ok(Decoded {
        entity,
        issues: cx.into_issues(),
    })
}

/// Typed decode of a concrete record, discarding non-fatal issues.
pub fn decode_record<T: Record>(raw: &Value) -> Result<T, DecodeError> {
    decode_value::<T>(T::KIND, raw).map(|(record, _)| record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use serde_json::json;

    fn keyword() -> Value {
        json!({
            "id": "https://openalex.org/keywords/cell-biology",
            "display_name": "Cell Biology",
            "works_count": 10,
            "cited_by_count": 20,
            "created_date": "2024-04-10",
            "updated_date": "2024-04-10"
        })
    }

    #[test]
    fn dispatch_by_kind() {
        let entity = decode(EntityKind::Keyword, &keyword()).unwrap();
        assert_eq!(entity.kind(), EntityKind::Keyword);
        assert_eq!(entity.id(), "https://openalex.org/keywords/cell-biology");
        assert_eq!(entity.display_name(), "Cell Biology");
        assert!(entity.as_work().is_none());
        assert_eq!(entity.to_json().unwrap(), keyword());
    }

    #[test]
    fn wrong_kind_fails_with_that_kind() {
        let err = decode(EntityKind::Funder, &keyword()).unwrap_err();
        assert_eq!(err.entity(), EntityKind::Funder);
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField);
    }

    #[test]
    fn non_object_payload() {
        let err = decode(EntityKind::Work, &json!("W1")).unwrap_err();
        assert!(err.path().is_root());
        assert!(matches!(err.kind(), DecodeErrorKind::MalformedNesting { .. }));
    }

    #[test]
    fn typed_decode() {
        let kw: Keyword = decode_record(&keyword()).unwrap();
        assert_eq!(kw.works_count, 10);
        let entity: Entity = kw.into();
        assert_eq!(entity.kind(), EntityKind::Keyword);
    }

    #[test]
    fn issues_are_returned() {
        let mut raw = keyword();
        raw["works_count"] = json!(10.0);
        let decoded = decode_with_issues(EntityKind::Keyword, &raw).unwrap();
        assert!(decoded.issues.is_empty());
        assert_eq!(decoded.entity.id(), "https://openalex.org/keywords/cell-biology");
    }
}

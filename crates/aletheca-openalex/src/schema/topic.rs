//! Topic entity and the Domain → Field → Subfield → Topic taxonomy

use serde::Serialize;
use serde_json::{Map, Value};

use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::kind::EntityKind;

/// One node of the topic taxonomy (id + display name only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Taxon {
    pub id: String,
    pub display_name: String,
}

pub type Domain = Taxon;
pub type Field = Taxon;
pub type Subfield = Taxon;
pub type TopicMinimal = Taxon;

impl Decode for Taxon {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
        })
    }
}

/// Ancestor chain embedded in every topic reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicLineage {
    pub subfield: Subfield,
    pub field: Field,
    pub domain: Domain,
}

impl TopicLineage {
    /// Read the three ancestor keys from the enclosing object.
    pub fn from_object(obj: &Map<String, Value>, cx: &mut Decoder) -> Result<Self, DecodeError> {
        Ok(Self {
            subfield: cx.required(obj, "subfield")?,
            field: cx.required(obj, "field")?,
            domain: cx.required(obj, "domain")?,
        })
    }
}

/// Topic as attached to a work, with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DehydratedTopic {
    pub id: String,
    pub display_name: String,
    pub score: f64,
    #[serde(flatten)]
    pub lineage: TopicLineage,
}

impl Decode for DehydratedTopic {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            score: cx.required(obj, "score")?,
            lineage: TopicLineage::from_object(obj, cx)?,
        })
    }
}

/// Topic with a work count (author/source/institution `topics`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicCount {
    pub id: String,
    pub display_name: String,
    pub count: i64,
    #[serde(flatten)]
    pub lineage: TopicLineage,
}

impl Decode for TopicCount {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            count: cx.required(obj, "count")?,
            lineage: TopicLineage::from_object(obj, cx)?,
        })
    }
}

/// Topic with its share of an entity's output (`topic_share`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicShare {
    pub id: String,
    pub display_name: String,
    pub value: f64,
    #[serde(flatten)]
    pub lineage: TopicLineage,
}

impl Decode for TopicShare {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            value: cx.required(obj, "value")?,
            lineage: TopicLineage::from_object(obj, cx)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicIds {
    pub openalex: String,
    pub wikidata: Option<String>,
    pub wikipedia: Option<String>,
}

impl Decode for TopicIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            wikidata: cx.optional(obj, "wikidata"),
            wikipedia: cx.optional(obj, "wikipedia"),
        })
    }
}

/// OpenAlex Topic (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Topic {
    pub id: String,
    pub display_name: String,
    pub description: String,
    pub keywords: Vec<String>,
    pub ids: TopicIds,
    #[serde(flatten)]
    pub lineage: TopicLineage,
    pub siblings: Vec<TopicMinimal>,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub works_api_url: String,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Topic {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            description: cx.required(obj, "description")?,
            keywords: cx.required(obj, "keywords")?,
            ids: cx.required(obj, "ids")?,
            lineage: TopicLineage::from_object(obj, cx)?,
            siblings: cx.list(obj, "siblings"),
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            works_api_url: cx.required(obj, "works_api_url")?,
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Topic {
    const KIND: EntityKind = EntityKind::Topic;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use serde_json::json;

    fn sample_topic() -> Value {
        json!({
            "id": "https://openalex.org/T11636",
            "display_name": "Artificial Intelligence in Medicine",
            "description": "This cluster of papers explores the application of AI in healthcare.",
            "keywords": ["Artificial Intelligence", "Healthcare", "Machine Learning"],
            "ids": {"openalex": "https://openalex.org/T11636", "wikipedia": "https://en.wikipedia.org/wiki/AI_in_healthcare"},
            "subfield": {"id": "https://openalex.org/subfields/1702", "display_name": "Artificial Intelligence"},
            "field": {"id": "https://openalex.org/fields/17", "display_name": "Computer Science"},
            "domain": {"id": "https://openalex.org/domains/3", "display_name": "Physical Sciences"},
            "siblings": [
                {"id": "https://openalex.org/T10028", "display_name": "Topic Modeling"},
                {"id": "https://openalex.org/T10036"}
            ],
            "works_count": 85733,
            "cited_by_count": 1017425,
            "works_api_url": "https://api.openalex.org/works?filter=topics.id:T11636",
            "created_date": "2024-01-23",
            "updated_date": "2024-06-17T13:43:55.528431"
        })
    }

    #[test]
    fn parse_topic() {
        let mut cx = Decoder::new(EntityKind::Topic);
        let topic = Topic::decode(&sample_topic(), &mut cx).unwrap();
        assert_eq!(topic.lineage.domain.display_name, "Physical Sciences");
        assert_eq!(topic.lineage.field.display_name, "Computer Science");
        assert_eq!(topic.keywords.len(), 3);
        assert_eq!(topic.ids.wikidata, None);
        // Sibling without display_name is dropped, not fatal
        assert_eq!(topic.siblings.len(), 1);
        assert_eq!(cx.issues().len(), 1);
        assert_eq!(cx.issues()[0].path().to_string(), "siblings[1].display_name");
    }

    #[test]
    fn topic_requires_hierarchy() {
        let mut raw = sample_topic();
        raw.as_object_mut().unwrap().remove("domain");
        let err = Topic::decode(&raw, &mut Decoder::new(EntityKind::Topic)).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField);
        assert_eq!(err.path().to_string(), "domain");
    }

    #[test]
    fn topic_keywords_are_strict() {
        let mut raw = sample_topic();
        raw["keywords"] = json!(["ok", 5]);
        let err = Topic::decode(&raw, &mut Decoder::new(EntityKind::Topic)).unwrap_err();
        assert_eq!(err.path().to_string(), "keywords[1]");
    }

    #[test]
    fn lineage_is_flattened_on_encode() {
        let topic = Topic::decode(&sample_topic(), &mut Decoder::new(EntityKind::Topic)).unwrap();
        let encoded = serde_json::to_value(&topic).unwrap();
        assert_eq!(encoded["field"]["display_name"], "Computer Science");
        assert!(encoded.get("lineage").is_none());
    }
}

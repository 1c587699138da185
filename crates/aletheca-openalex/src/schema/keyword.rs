//! Keyword entity

use serde::Serialize;
use serde_json::Value;

use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::kind::EntityKind;

/// Keyword as attached to a work, with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DehydratedKeyword {
    pub id: String,
    pub display_name: String,
    pub score: f64,
}

impl Decode for DehydratedKeyword {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            score: cx.required(obj, "score")?,
        })
    }
}

/// OpenAlex Keyword (hydrated)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub id: String,
    pub display_name: String,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Keyword {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Keyword {
    const KIND: EntityKind = EntityKind::Keyword;

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
    use serde_json::json;

    #[test]
    fn parse_keyword() {
        let raw = json!({
            "id": "https://openalex.org/keywords/deep-learning",
            "display_name": "Deep Learning",
            "works_count": 281736,
            "cited_by_count": 2637517,
            "created_date": "2024-04-10",
            "updated_date": "2024-05-09T05:00:04.062741",
            "works_api_url": "https://api.openalex.org/works?filter=keywords.id:keywords/deep-learning"
        });
        let kw = Keyword::decode(&raw, &mut Decoder::new(EntityKind::Keyword)).unwrap();
        assert_eq!(kw.display_name, "Deep Learning");
        assert_eq!(kw.works_count, 281736);
        assert_eq!(crate::ids::short_id(kw.id()), "deep-learning");
    }

    #[test]
    fn dehydrated_keyword_score_from_string() {
        let raw = json!({"id": "https://openalex.org/keywords/x", "display_name": "X", "score": "0.42"});
        let kw = DehydratedKeyword::decode(&raw, &mut Decoder::new(EntityKind::Work)).unwrap();
        assert_eq!(kw.score, 0.42);
    }
}

//! Concept entity (legacy Wikidata-based tagging)

use serde::Serialize;
use serde_json::Value;

use super::common::{International, SummaryStats, YearCount};
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::kind::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptIds {
    pub openalex: String,
    pub mag: Option<i64>,
    pub umls_cui: Vec<String>,
    pub umls_aui: Vec<String>,
    pub wikidata: Option<String>,
    pub wikipedia: Option<String>,
}

impl Decode for ConceptIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            mag: cx.optional(obj, "mag"),
            umls_cui: cx.list(obj, "umls_cui"),
            umls_aui: cx.list(obj, "umls_aui"),
            wikidata: cx.optional(obj, "wikidata"),
            wikipedia: cx.optional(obj, "wikipedia"),
        })
    }
}

/// Concept reference with its level in the hierarchy (0–5) and a score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DehydratedConcept {
    pub id: String,
    pub display_name: String,
    pub wikidata: String,
    pub level: i32,
    pub score: f64,
}

impl Decode for DehydratedConcept {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            wikidata: cx.required(obj, "wikidata")?,
            level: cx.required(obj, "level")?,
            score: cx.required(obj, "score")?,
        })
    }
}

/// OpenAlex Concept (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Concept {
    pub id: String,
    pub display_name: String,
    pub wikidata: String,
    pub level: i32,
    pub description: Option<String>,
    pub ids: ConceptIds,
    pub international: International,
    pub image_url: Option<String>,
    pub image_thumbnail_url: Option<String>,
    pub ancestors: Vec<DehydratedConcept>,
    pub related_concepts: Vec<DehydratedConcept>,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub summary_stats: SummaryStats,
    pub counts_by_year: Vec<YearCount>,
    pub works_api_url: String,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Concept {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            wikidata: cx.required(obj, "wikidata")?,
            level: cx.required(obj, "level")?,
            description: cx.optional(obj, "description"),
            ids: cx.required(obj, "ids")?,
            international: cx.or_default(obj, "international"),
            image_url: cx.optional(obj, "image_url"),
            image_thumbnail_url: cx.optional(obj, "image_thumbnail_url"),
            ancestors: cx.list(obj, "ancestors"),
            related_concepts: cx.list(obj, "related_concepts"),
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            summary_stats: cx.required(obj, "summary_stats")?,
            counts_by_year: cx.list(obj, "counts_by_year"),
            works_api_url: cx.required(obj, "works_api_url")?,
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Concept {
    const KIND: EntityKind = EntityKind::Concept;

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
    fn parse_concept() {
        let raw = json!({
            "id": "https://openalex.org/C71924100",
            "wikidata": "https://www.wikidata.org/wiki/Q11190",
            "display_name": "Medicine",
            "level": 0,
            "description": "field of study for diagnosing, treating and preventing disease",
            "works_count": 65000000,
            "cited_by_count": 500000000,
            "summary_stats": {"2yr_mean_citedness": 1.2, "h_index": 3000, "i10_index": 9000000},
            "ids": {
                "openalex": "https://openalex.org/C71924100",
                "wikidata": "https://www.wikidata.org/wiki/Q11190",
                "mag": "71924100",
                "umls_cui": ["C0025118", "C0013227"]
            },
            "international": {"display_name": {"de": "Medizin", "fr": "médecine"}},
            "ancestors": [],
            "related_concepts": [
                {"id": "https://openalex.org/C126322002", "wikidata": "https://www.wikidata.org/wiki/Q11180", "display_name": "Internal medicine", "level": 1, "score": 2.5},
                {"id": "https://openalex.org/C2", "display_name": "No wikidata", "level": 1, "score": 1.0}
            ],
            "counts_by_year": [{"year": 2024, "works_count": 10, "cited_by_count": 20}],
            "works_api_url": "https://api.openalex.org/works?filter=concepts.id:C71924100",
            "created_date": "2016-06-24",
            "updated_date": "2024-06-17T09:20:03.117287"
        });
        let mut cx = Decoder::new(EntityKind::Concept);
        let concept = Concept::decode(&raw, &mut cx).unwrap();
        assert_eq!(concept.level, 0);
        assert_eq!(concept.ids.mag, Some(71924100));
        assert_eq!(concept.ids.umls_cui.len(), 2);
        assert!(concept.ids.umls_aui.is_empty());
        assert_eq!(concept.international.display_name["de"], "Medizin");
        assert_eq!(concept.related_concepts.len(), 1);
        assert_eq!(cx.issues().len(), 1);
        assert!(concept.image_url.is_none());
    }
}

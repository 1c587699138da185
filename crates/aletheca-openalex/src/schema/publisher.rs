//! Publisher entity

use serde::Serialize;
use serde_json::Value;

use super::common::{Role, SummaryStats, YearCount};
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::ids::short_id;
use crate::kind::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublisherIds {
    pub openalex: String,
    pub ror: Option<String>,
    pub wikidata: Option<String>,
}

impl Decode for PublisherIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            ror: cx.optional(obj, "ror"),
            wikidata: cx.optional(obj, "wikidata"),
        })
    }
}

/// OpenAlex Publisher (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Publisher {
    pub id: String,
    pub display_name: String,
    pub alternate_titles: Vec<String>,
    pub hierarchy_level: i32,
    pub parent_publisher: Option<String>,
    pub lineage: Vec<String>,
    pub country_codes: Vec<String>,
    pub homepage_url: Option<String>,
    pub image_url: Option<String>,
    pub image_thumbnail_url: Option<String>,
    pub ids: PublisherIds,
    pub roles: Vec<Role>,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub summary_stats: SummaryStats,
    pub counts_by_year: Vec<YearCount>,
    pub sources_api_url: String,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Publisher {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            alternate_titles: cx.list(obj, "alternate_titles"),
            hierarchy_level: cx.required(obj, "hierarchy_level")?,
            parent_publisher: cx.optional(obj, "parent_publisher"),
            lineage: cx.list(obj, "lineage"),
            country_codes: cx.list(obj, "country_codes"),
            homepage_url: cx.optional(obj, "homepage_url"),
            image_url: cx.optional(obj, "image_url"),
            image_thumbnail_url: cx.optional(obj, "image_thumbnail_url"),
            ids: cx.required(obj, "ids")?,
            roles: cx.list(obj, "roles"),
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            summary_stats: cx.required(obj, "summary_stats")?,
            counts_by_year: cx.list(obj, "counts_by_year"),
            sources_api_url: cx.required(obj, "sources_api_url")?,
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Publisher {
    const KIND: EntityKind = EntityKind::Publisher;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Publisher {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    pub fn parent_publisher_id(&self) -> Option<&str> {
        self.parent_publisher.as_deref().map(short_id)
    }

    /// Short ids from the root publisher down to this one
    pub fn lineage_ids(&self) -> Vec<&str> {
        self.lineage.iter().map(|id| short_id(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::RoleKind;
    use serde_json::json;

    #[test]
    fn parse_publisher() {
        let raw = json!({
            "id": "https://openalex.org/P4310320990",
            "display_name": "Elsevier BV",
            "alternate_titles": ["Elsevier", "elsevier.com"],
            "hierarchy_level": "1",
            "parent_publisher": "https://openalex.org/P4310311775",
            "lineage": ["https://openalex.org/P4310311775", "https://openalex.org/P4310320990"],
            "country_codes": ["NL", null],
            "homepage_url": "https://www.elsevier.com/",
            "ids": {
                "openalex": "https://openalex.org/P4310320990",
                "ror": "https://ror.org/02scfj030",
                "wikidata": "https://www.wikidata.org/entity/Q746413"
            },
            "roles": [
                {"role": "publisher", "id": "https://openalex.org/P4310320990", "works_count": 20000000},
                {"role": "funder", "id": "https://openalex.org/F4320323386", "works_count": 17}
            ],
            "works_count": 20000000,
            "cited_by_count": 400000000,
            "summary_stats": {"2yr_mean_citedness": 3.1, "h_index": 2900, "i10_index": 7000000},
            "counts_by_year": [],
            "sources_api_url": "https://api.openalex.org/sources?filter=host_organization.id:P4310320990",
            "updated_date": "2024-06-17T05:46:29.418467",
            "created_date": "2017-08-08"
        });
        let mut cx = Decoder::new(EntityKind::Publisher);
        let publisher = Publisher::decode(&raw, &mut cx).unwrap();
        assert_eq!(publisher.hierarchy_level, 1);
        assert_eq!(publisher.parent_publisher_id(), Some("P4310311775"));
        assert_eq!(publisher.lineage_ids(), vec!["P4310311775", "P4310320990"]);
        assert_eq!(publisher.country_codes, vec!["NL".to_string()]);
        assert_eq!(publisher.roles[1].role, RoleKind::Funder);
        assert!(publisher.image_url.is_none());
        assert!(cx.issues().is_empty());
    }
}

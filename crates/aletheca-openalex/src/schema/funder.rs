//! Funder entity

use serde::Serialize;
use serde_json::Value;

use super::common::{Role, SummaryStats, YearCount};
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::kind::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunderIds {
    pub openalex: String,
    pub doi: Option<String>,
    pub crossref: Option<String>,
    pub ror: Option<String>,
    pub wikidata: Option<String>,
}

impl Decode for FunderIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            doi: cx.optional(obj, "doi"),
            crossref: cx.optional(obj, "crossref"),
            ror: cx.optional(obj, "ror"),
            wikidata: cx.optional(obj, "wikidata"),
        })
    }
}

/// OpenAlex Funder (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Funder {
    pub id: String,
    pub display_name: String,
    pub alternate_titles: Vec<String>,
    pub country_code: Option<String>,
    pub description: Option<String>,
    pub homepage_url: Option<String>,
    pub image_url: Option<String>,
    pub image_thumbnail_url: Option<String>,
    pub ids: FunderIds,
    pub grants_count: i64,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub summary_stats: SummaryStats,
    pub counts_by_year: Vec<YearCount>,
    pub roles: Vec<Role>,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Funder {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            alternate_titles: cx.list(obj, "alternate_titles"),
            country_code: cx.optional(obj, "country_code"),
            description: cx.optional(obj, "description"),
            homepage_url: cx.optional(obj, "homepage_url"),
            image_url: cx.optional(obj, "image_url"),
            image_thumbnail_url: cx.optional(obj, "image_thumbnail_url"),
            ids: cx.required(obj, "ids")?,
            grants_count: cx.required(obj, "grants_count")?,
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            summary_stats: cx.required(obj, "summary_stats")?,
            counts_by_year: cx.list(obj, "counts_by_year"),
            roles: cx.list(obj, "roles"),
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Funder {
    const KIND: EntityKind = EntityKind::Funder;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

//! Source entity (journals, repositories, conferences, ...)

use serde::Serialize;
use serde_json::Value;

use super::common::{SummaryStats, YearCount};
use super::concept::DehydratedConcept;
use super::topic::{TopicCount, TopicShare};
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::ids::short_id;
use crate::kind::EntityKind;
use crate::vocab::SourceType;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceIds {
    pub openalex: String,
    pub fatcat: Option<String>,
    pub issn: Vec<String>,
    pub issn_l: Option<String>,
    pub mag: Option<i64>,
    pub wikidata: Option<String>,
}

impl Decode for SourceIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            fatcat: cx.optional(obj, "fatcat"),
            issn: cx.list(obj, "issn"),
            issn_l: cx.optional(obj, "issn_l"),
            mag: cx.optional(obj, "mag"),
            wikidata: cx.optional(obj, "wikidata"),
        })
    }
}

/// Source reference embedded in a work's locations
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DehydratedSource {
    pub id: String,
    pub display_name: String,
    pub issn_l: Option<String>,
    pub issn: Vec<String>,
    pub is_oa: bool,
    pub is_in_doaj: bool,
    pub is_core: bool,
    pub host_organization: Option<String>,
    pub host_organization_name: Option<String>,
    pub host_organization_lineage: Vec<String>,
    #[serde(rename = "type")]
    pub source_type: SourceType,
}

impl Decode for DehydratedSource {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            issn_l: cx.optional(obj, "issn_l"),
            issn: cx.list(obj, "issn"),
            is_oa: cx.required(obj, "is_oa")?,
            is_in_doaj: cx.required(obj, "is_in_doaj")?,
            is_core: cx.required(obj, "is_core")?,
            host_organization: cx.optional(obj, "host_organization"),
            host_organization_name: cx.optional(obj, "host_organization_name"),
            host_organization_lineage: cx.list(obj, "host_organization_lineage"),
            source_type: cx.required(obj, "type")?,
        })
    }
}

/// Article processing charge in one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApcPrice {
    pub price: i64,
    pub currency: String,
}

impl Decode for ApcPrice {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            price: cx.required(obj, "price")?,
            currency: cx.required(obj, "currency")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Society {
    pub url: Option<String>,
    pub organization: Option<String>,
}

impl Decode for Society {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            url: cx.optional(obj, "url"),
            organization: cx.optional(obj, "organization"),
        })
    }
}

/// OpenAlex Source (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Source {
    pub id: String,
    pub display_name: String,
    pub abbreviated_title: Option<String>,
    pub alternate_titles: Vec<String>,
    pub issn_l: Option<String>,
    pub issn: Vec<String>,
    pub ids: SourceIds,
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub is_oa: bool,
    pub is_in_doaj: bool,
    pub is_core: bool,
    pub is_indexed_in_scopus: bool,
    pub host_organization: Option<String>,
    pub host_organization_name: Option<String>,
    pub host_organization_lineage: Vec<String>,
    pub country_code: Option<String>,
    pub homepage_url: Option<String>,
    pub apc_prices: Vec<ApcPrice>,
    pub apc_usd: Option<i64>,
    pub societies: Vec<Society>,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub summary_stats: SummaryStats,
    pub counts_by_year: Vec<YearCount>,
    pub x_concepts: Vec<DehydratedConcept>,
    pub topics: Vec<TopicCount>,
    pub topic_share: Vec<TopicShare>,
    pub works_api_url: String,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Source {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            abbreviated_title: cx.optional(obj, "abbreviated_title"),
            alternate_titles: cx.list(obj, "alternate_titles"),
            issn_l: cx.optional(obj, "issn_l"),
            issn: cx.list(obj, "issn"),
            ids: cx.required(obj, "ids")?,
            source_type: cx.required(obj, "type")?,
            is_oa: cx.required(obj, "is_oa")?,
            is_in_doaj: cx.required(obj, "is_in_doaj")?,
            is_core: cx.required(obj, "is_core")?,
            is_indexed_in_scopus: cx.or_default(obj, "is_indexed_in_scopus"),
            host_organization: cx.optional(obj, "host_organization"),
            host_organization_name: cx.optional(obj, "host_organization_name"),
            host_organization_lineage: cx.list(obj, "host_organization_lineage"),
            country_code: cx.optional(obj, "country_code"),
            homepage_url: cx.optional(obj, "homepage_url"),
            apc_prices: cx.list(obj, "apc_prices"),
            apc_usd: cx.optional(obj, "apc_usd"),
            societies: cx.list(obj, "societies"),
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            summary_stats: cx.required(obj, "summary_stats")?,
            counts_by_year: cx.list(obj, "counts_by_year"),
            x_concepts: cx.list(obj, "x_concepts"),
            topics: cx.list(obj, "topics"),
            topic_share: cx.list(obj, "topic_share"),
            works_api_url: cx.required(obj, "works_api_url")?,
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Source {
    const KIND: EntityKind = EntityKind::Source;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Source {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// Short id of the host organization (publisher or institution)
    pub fn host_organization_id(&self) -> Option<&str> {
        self.host_organization.as_deref().map(short_id)
    }
}

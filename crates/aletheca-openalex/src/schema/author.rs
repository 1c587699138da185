//! Author entity

use serde::Serialize;
use serde_json::Value;

use super::common::{SummaryStats, YearCount};
use super::concept::DehydratedConcept;
use super::institution::DehydratedInstitution;
use super::topic::{TopicCount, TopicShare};
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::ids::short_id;
use crate::kind::EntityKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorIds {
    pub openalex: String,
    pub orcid: Option<String>,
    pub scopus: Option<String>,
    pub twitter: Option<String>,
    pub wikipedia: Option<String>,
}

impl Decode for AuthorIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            orcid: cx.optional(obj, "orcid"),
            scopus: cx.optional(obj, "scopus"),
            twitter: cx.optional(obj, "twitter"),
            wikipedia: cx.optional(obj, "wikipedia"),
        })
    }
}

/// Author reference embedded in a work's authorships
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DehydratedAuthor {
    pub id: String,
    pub display_name: String,
    pub orcid: Option<String>,
}

impl Decode for DehydratedAuthor {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            orcid: cx.optional(obj, "orcid"),
        })
    }
}

/// Entry of `Author.affiliations`: an institution and the years it was listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionWithYears {
    pub institution: DehydratedInstitution,
    pub years: Vec<i32>,
}

impl Decode for InstitutionWithYears {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            institution: cx.required(obj, "institution")?,
            years: cx.list(obj, "years"),
        })
    }
}

/// OpenAlex Author (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub id: String,
    pub display_name: String,
    pub orcid: Option<String>,
    pub display_name_alternatives: Vec<String>,
    pub ids: AuthorIds,
    pub works_count: i64,
    pub cited_by_count: i64,
    pub summary_stats: SummaryStats,
    pub affiliations: Vec<InstitutionWithYears>,
    pub last_known_institutions: Vec<DehydratedInstitution>,
    pub x_concepts: Vec<DehydratedConcept>,
    pub topics: Vec<TopicCount>,
    pub topic_share: Vec<TopicShare>,
    pub counts_by_year: Vec<YearCount>,
    pub works_api_url: Option<String>,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Author {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            orcid: cx.optional(obj, "orcid"),
            display_name_alternatives: cx.list(obj, "display_name_alternatives"),
            ids: cx.required(obj, "ids")?,
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
            summary_stats: cx.required(obj, "summary_stats")?,
            affiliations: cx.list(obj, "affiliations"),
            last_known_institutions: cx.list(obj, "last_known_institutions"),
            x_concepts: cx.list(obj, "x_concepts"),
            topics: cx.list(obj, "topics"),
            topic_share: cx.list(obj, "topic_share"),
            counts_by_year: cx.list(obj, "counts_by_year"),
            works_api_url: cx.optional(obj, "works_api_url"),
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Author {
    const KIND: EntityKind = EntityKind::Author;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Author {
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    pub fn h_index(&self) -> i64 {
        self.summary_stats.h_index
    }

    /// Short ids of every institution in `affiliations`
    pub fn affiliation_ids(&self) -> Vec<&str> {
        self.affiliations
            .iter()
            .map(|a| short_id(&a.institution.id))
            .collect()
    }

    pub fn last_known_institution_ids(&self) -> Vec<&str> {
        self.last_known_institutions
            .iter()
            .map(|i| short_id(&i.id))
            .collect()
    }
}

//! Institution entity and its dehydrated forms

use serde::Serialize;
use serde_json::Value;

use super::common::{International, Role, SummaryStats, YearCount};
use super::concept::DehydratedConcept;
use super::topic::{TopicCount, TopicShare};
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::kind::EntityKind;
use crate::vocab::{InstitutionRelationship, InstitutionType};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstitutionIds {
    pub openalex: String,
    pub ror: Option<String>,
    pub grid: Option<String>,
    pub mag: Option<i64>,
    pub wikidata: Option<String>,
    pub wikipedia: Option<String>,
}

impl Decode for InstitutionIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            ror: cx.optional(obj, "ror"),
            grid: cx.optional(obj, "grid"),
            mag: cx.optional(obj, "mag"),
            wikidata: cx.optional(obj, "wikidata"),
            wikipedia: cx.optional(obj, "wikipedia"),
        })
    }
}

/// Institution reference embedded in works and authors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DehydratedInstitution {
    pub id: String,
    pub display_name: String,
    pub ror: Option<String>,
    /// ISO 3166-1 alpha-2
    pub country_code: Option<String>,
    #[serde(rename = "type")]
    pub institution_type: Option<InstitutionType>,
    pub lineage: Vec<String>,
}

impl Decode for DehydratedInstitution {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            ror: cx.optional(obj, "ror"),
            country_code: cx.optional(obj, "country_code"),
            institution_type: cx.optional(obj, "type"),
            lineage: cx.list(obj, "lineage"),
        })
    }
}

/// Entry of `associated_institutions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedInstitution {
    #[serde(flatten)]
    pub institution: DehydratedInstitution,
    pub relationship: Option<InstitutionRelationship>,
}

impl Decode for RelatedInstitution {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let institution = DehydratedInstitution::decode(value, cx)?;
        let obj = cx.object(value)?;
        Ok(Self {
            institution,
            relationship: cx.optional(obj, "relationship"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Geo {
    pub city: Option<String>,
    pub geonames_city_id: Option<String>,
    pub region: Option<String>,
    pub country_code: Option<String>,
    pub country: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Decode for Geo {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            city: cx.optional(obj, "city"),
            geonames_city_id: cx.optional(obj, "geonames_city_id"),
            region: cx.optional(obj, "region"),
            country_code: cx.optional(obj, "country_code"),
            country: cx.optional(obj, "country"),
            latitude: cx.optional(obj, "latitude"),
            longitude: cx.optional(obj, "longitude"),
        })
    }
}

/// Repository hosted by an institution
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub id: String,
    pub display_name: String,
    pub host_organization: Option<String>,
    pub host_organization_name: Option<String>,
    pub host_organization_lineage: Vec<String>,
}

impl Decode for Repository {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            host_organization: cx.optional(obj, "host_organization"),
            host_organization_name: cx.optional(obj, "host_organization_name"),
            host_organization_lineage: cx.list(obj, "host_organization_lineage"),
        })
    }
}

/// OpenAlex Institution (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Institution {
    pub id: String,
    pub display_name: String,
    pub ror: Option<String>,
    pub ids: InstitutionIds,
    #[serde(rename = "type")]
    pub institution_type: InstitutionType,
    pub type_id: Option<String>,
    pub country_code: Option<String>,
    pub geo: Option<Geo>,
    pub homepage_url: Option<String>,
    pub image_url: Option<String>,
    pub image_thumbnail_url: Option<String>,
    pub display_name_acronyms: Vec<String>,
    pub display_name_alternatives: Vec<String>,
    pub international: International,
    pub is_super_system: bool,
    pub lineage: Vec<String>,
    pub associated_institutions: Vec<RelatedInstitution>,
    pub repositories: Vec<Repository>,
    pub roles: Vec<Role>,
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

impl Decode for Institution {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            ror: cx.optional(obj, "ror"),
            ids: cx.required(obj, "ids")?,
            institution_type: cx.required(obj, "type")?,
            type_id: cx.optional(obj, "type_id"),
            country_code: cx.optional(obj, "country_code"),
            geo: cx.optional(obj, "geo"),
            homepage_url: cx.optional(obj, "homepage_url"),
            image_url: cx.optional(obj, "image_url"),
            image_thumbnail_url: cx.optional(obj, "image_thumbnail_url"),
            display_name_acronyms: cx.list(obj, "display_name_acronyms"),
            display_name_alternatives: cx.list(obj, "display_name_alternatives"),
            international: cx.or_default(obj, "international"),
            is_super_system: cx.required(obj, "is_super_system")?,
            lineage: cx.list(obj, "lineage"),
            associated_institutions: cx.list(obj, "associated_institutions"),
            repositories: cx.list(obj, "repositories"),
            roles: cx.list(obj, "roles"),
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

impl Record for Institution {
    const KIND: EntityKind = EntityKind::Institution;

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

    fn cx() -> Decoder {
        Decoder::new(EntityKind::Institution)
    }

    #[test]
    fn related_institution_composes_base() {
        let raw = json!({
            "id": "https://openalex.org/I2802101240",
            "ror": "https://ror.org/00s1kgp29",
            "display_name": "Sinai Health System",
            "country_code": "CA",
            "type": "healthcare",
            "relationship": "related"
        });
        let related = RelatedInstitution::decode(&raw, &mut cx()).unwrap();
        assert_eq!(related.institution.institution_type, Some(InstitutionType::Healthcare));
        assert_eq!(related.relationship, Some(InstitutionRelationship::Related));
        assert!(related.institution.lineage.is_empty());

        let encoded = serde_json::to_value(&related).unwrap();
        assert_eq!(encoded["type"], "healthcare");
        assert_eq!(encoded["relationship"], "related");
        assert!(encoded.get("institution").is_none());
    }

    #[test]
    fn dehydrated_unknown_type_is_kept() {
        let raw = json!({"id": "https://openalex.org/I1", "display_name": "X", "type": "funder"});
        let mut cx = cx();
        let inst = DehydratedInstitution::decode(&raw, &mut cx).unwrap();
        assert_eq!(
            inst.institution_type,
            Some(InstitutionType::Unrecognized("funder".into()))
        );
        assert_eq!(cx.issues().len(), 1);
    }

    #[test]
    fn geo_partial() {
        let raw = json!({"city": "Toronto", "latitude": 43.65, "longitude": "-79.38"});
        let geo = Geo::decode(&raw, &mut cx()).unwrap();
        assert_eq!(geo.city.as_deref(), Some("Toronto"));
        assert_eq!(geo.longitude, Some(-79.38));
        assert!(geo.country.is_none());
    }
}

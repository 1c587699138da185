//! Work entity (papers, books, datasets, ...)

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use super::author::DehydratedAuthor;
use super::concept::DehydratedConcept;
use super::institution::DehydratedInstitution;
use super::keyword::DehydratedKeyword;
use super::source::DehydratedSource;
use super::topic::DehydratedTopic;
use crate::abstract_decode::InvertedIndex;
use crate::decode::{Decode, Decoder};
use crate::entity::Record;
use crate::error::DecodeError;
use crate::ids::{short_doi, short_id};
use crate::kind::EntityKind;
use crate::vocab::{
    AuthorPosition, FulltextOrigin, IndexSource, LocationVersion, OaStatus, WorkType,
    WorkTypeCrossref,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkIds {
    pub openalex: String,
    pub doi: Option<String>,
    pub mag: Option<i64>,
    pub pmid: Option<String>,
    pub pmcid: Option<String>,
}

impl Decode for WorkIds {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            openalex: cx.required(obj, "openalex")?,
            doi: cx.optional(obj, "doi"),
            mag: cx.optional(obj, "mag"),
            pmid: cx.optional(obj, "pmid"),
            pmcid: cx.optional(obj, "pmcid"),
        })
    }
}

/// Raw affiliation string and the institutions it was matched to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Affiliation {
    pub raw_affiliation_string: String,
    pub institution_ids: Vec<String>,
}

impl Decode for Affiliation {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            raw_affiliation_string: cx.required(obj, "raw_affiliation_string")?,
            institution_ids: cx.list(obj, "institution_ids"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Authorship {
    pub author: DehydratedAuthor,
    pub author_position: Option<AuthorPosition>,
    pub raw_author_name: String,
    pub is_corresponding: bool,
    pub countries: Vec<String>,
    pub affiliations: Vec<Affiliation>,
    pub institutions: Vec<DehydratedInstitution>,
    pub raw_affiliation_strings: Vec<String>,
}

impl Decode for Authorship {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            author: cx.required(obj, "author")?,
            author_position: cx.optional(obj, "author_position"),
            raw_author_name: cx.required(obj, "raw_author_name")?,
            is_corresponding: cx.required(obj, "is_corresponding")?,
            countries: cx.list(obj, "countries"),
            affiliations: cx.list(obj, "affiliations"),
            institutions: cx.list(obj, "institutions"),
            raw_affiliation_strings: cx.list(obj, "raw_affiliation_strings"),
        })
    }
}

/// Article processing charge (`apc_list` / `apc_paid`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApcData {
    pub value: i64,
    pub currency: String,
    pub value_usd: i64,
    pub provenance: Option<String>,
}

impl Decode for ApcData {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            value: cx.required(obj, "value")?,
            currency: cx.required(obj, "currency")?,
            value_usd: cx.required(obj, "value_usd")?,
            provenance: cx.optional(obj, "provenance"),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Biblio {
    pub volume: Option<String>,
    pub issue: Option<String>,
    pub first_page: Option<String>,
    pub last_page: Option<String>,
}

impl Decode for Biblio {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            volume: cx.optional(obj, "volume"),
            issue: cx.optional(obj, "issue"),
            first_page: cx.optional(obj, "first_page"),
            last_page: cx.optional(obj, "last_page"),
        })
    }
}

/// MeSH tag (PubMed works only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mesh {
    pub descriptor_ui: String,
    pub descriptor_name: String,
    pub qualifier_ui: String,
    pub qualifier_name: String,
    pub is_major_topic: bool,
}

impl Decode for Mesh {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            descriptor_ui: cx.required(obj, "descriptor_ui")?,
            descriptor_name: cx.required(obj, "descriptor_name")?,
            qualifier_ui: cx.required(obj, "qualifier_ui")?,
            qualifier_name: cx.required(obj, "qualifier_name")?,
            is_major_topic: cx.required(obj, "is_major_topic")?,
        })
    }
}

/// Where a work is hosted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub is_oa: bool,
    pub is_accepted: bool,
    pub is_published: bool,
    pub landing_page_url: Option<String>,
    pub pdf_url: Option<String>,
    pub license: Option<String>,
    pub source: Option<DehydratedSource>,
    pub version: Option<LocationVersion>,
}

impl Decode for Location {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            is_oa: cx.required(obj, "is_oa")?,
            is_accepted: cx.required(obj, "is_accepted")?,
            is_published: cx.required(obj, "is_published")?,
            landing_page_url: cx.optional(obj, "landing_page_url"),
            pdf_url: cx.optional(obj, "pdf_url"),
            license: cx.optional(obj, "license"),
            source: cx.optional(obj, "source"),
            version: cx.optional(obj, "version"),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenAccess {
    pub is_oa: bool,
    pub oa_status: OaStatus,
    pub oa_url: Option<String>,
    pub any_repository_has_fulltext: bool,
}

impl Decode for OpenAccess {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            is_oa: cx.required(obj, "is_oa")?,
            oa_status: cx.required(obj, "oa_status")?,
            oa_url: cx.optional(obj, "oa_url"),
            any_repository_has_fulltext: cx.required(obj, "any_repository_has_fulltext")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grant {
    pub funder: Option<String>,
    pub funder_display_name: Option<String>,
    pub award_id: Option<String>,
}

impl Decode for Grant {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            funder: cx.optional(obj, "funder"),
            funder_display_name: cx.optional(obj, "funder_display_name"),
            award_id: cx.optional(obj, "award_id"),
        })
    }
}

/// UN Sustainable Development Goal with its relevance score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sdg {
    pub id: String,
    pub display_name: String,
    pub score: f64,
}

impl Decode for Sdg {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            score: cx.required(obj, "score")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CitationNormalizedPercentile {
    pub value: f64,
    pub is_in_top_1_percent: bool,
    pub is_in_top_10_percent: bool,
}

impl Decode for CitationNormalizedPercentile {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            value: cx.required(obj, "value")?,
            is_in_top_1_percent: cx.required(obj, "is_in_top_1_percent")?,
            is_in_top_10_percent: cx.required(obj, "is_in_top_10_percent")?,
        })
    }
}

/// Citations received in one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitationYearCount {
    pub year: i32,
    pub cited_by_count: i64,
}

impl Decode for CitationYearCount {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            year: cx.required(obj, "year")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
        })
    }
}

/// Citation percentile among works of the same publication year
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PercentileYear {
    pub min: Option<i64>,
    pub max: Option<i64>,
}

impl Decode for PercentileYear {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            min: cx.optional(obj, "min"),
            max: cx.optional(obj, "max"),
        })
    }
}

/// OpenAlex Work (hydrated)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Work {
    /// OpenAlex ID (e.g., "https://openalex.org/W2741809807")
    pub id: String,
    pub display_name: String,
    pub title: String,
    pub doi: Option<String>,
    pub ids: WorkIds,
    pub publication_year: i32,
    /// YYYY-MM-DD
    pub publication_date: String,
    /// ISO 639-1
    pub language: Option<String>,
    #[serde(rename = "type")]
    pub work_type: WorkType,
    pub type_crossref: Option<WorkTypeCrossref>,
    pub indexed_in: Vec<IndexSource>,
    pub open_access: OpenAccess,
    pub authorships: Vec<Authorship>,
    pub corresponding_author_ids: Vec<String>,
    pub corresponding_institution_ids: Vec<String>,
    pub countries_distinct_count: i64,
    pub institutions_distinct_count: i64,
    pub institution_assertions: Vec<Value>,
    pub apc_list: Option<ApcData>,
    pub apc_paid: Option<ApcData>,
    pub fwci: Option<f64>,
    pub has_fulltext: bool,
    pub fulltext_origin: Option<FulltextOrigin>,
    pub cited_by_count: i64,
    pub citation_normalized_percentile: Option<CitationNormalizedPercentile>,
    pub cited_by_percentile_year: PercentileYear,
    pub biblio: Option<Biblio>,
    pub is_retracted: bool,
    pub is_paratext: bool,
    pub primary_topic: Option<DehydratedTopic>,
    pub topics: Vec<DehydratedTopic>,
    pub keywords: Vec<DehydratedKeyword>,
    pub concepts: Vec<DehydratedConcept>,
    pub mesh: Vec<Mesh>,
    pub license: Option<String>,
    pub locations_count: i64,
    pub locations: Vec<Location>,
    pub primary_location: Option<Location>,
    pub best_oa_location: Option<Location>,
    pub sustainable_development_goals: Vec<Sdg>,
    pub grants: Vec<Grant>,
    pub datasets: Vec<Value>,
    pub versions: Vec<Value>,
    pub referenced_works_count: Option<i64>,
    pub referenced_works: Vec<String>,
    pub related_works: Vec<String>,
    pub abstract_inverted_index: Option<InvertedIndex>,
    pub cited_by_api_url: Option<String>,
    pub counts_by_year: Vec<CitationYearCount>,
    pub created_date: String,
    pub updated_date: String,
}

impl Decode for Work {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            id: cx.identifier(obj)?,
            display_name: cx.required(obj, "display_name")?,
            title: cx.required(obj, "title")?,
            doi: cx.optional(obj, "doi"),
            ids: cx.required(obj, "ids")?,
            publication_year: cx.required(obj, "publication_year")?,
            publication_date: cx.required(obj, "publication_date")?,
            language: cx.optional(obj, "language"),
            work_type: cx.required(obj, "type")?,
            type_crossref: cx.optional(obj, "type_crossref"),
            indexed_in: cx.list(obj, "indexed_in"),
            open_access: cx.required(obj, "open_access")?,
            authorships: cx.list(obj, "authorships"),
            corresponding_author_ids: cx.list(obj, "corresponding_author_ids"),
            corresponding_institution_ids: cx.list(obj, "corresponding_institution_ids"),
            countries_distinct_count: cx.required(obj, "countries_distinct_count")?,
            institutions_distinct_count: cx.required(obj, "institutions_distinct_count")?,
            institution_assertions: cx.list(obj, "institution_assertions"),
            apc_list: cx.optional(obj, "apc_list"),
            apc_paid: cx.optional(obj, "apc_paid"),
            fwci: cx.optional(obj, "fwci"),
            has_fulltext: cx.required(obj, "has_fulltext")?,
            fulltext_origin: cx.optional(obj, "fulltext_origin"),
            cited_by_count: cx.required(obj, "cited_by_count")?,
            citation_normalized_percentile: cx.optional(obj, "citation_normalized_percentile"),
            cited_by_percentile_year: cx.or_default(obj, "cited_by_percentile_year"),
            biblio: cx.optional(obj, "biblio"),
            is_retracted: cx.required(obj, "is_retracted")?,
            is_paratext: cx.required(obj, "is_paratext")?,
            primary_topic: cx.optional(obj, "primary_topic"),
            topics: cx.list(obj, "topics"),
            keywords: cx.list(obj, "keywords"),
            concepts: cx.list(obj, "concepts"),
            mesh: cx.list(obj, "mesh"),
            license: cx.optional(obj, "license"),
            locations_count: cx.required(obj, "locations_count")?,
            locations: cx.list(obj, "locations"),
            primary_location: cx.optional(obj, "primary_location"),
            best_oa_location: cx.optional(obj, "best_oa_location"),
            sustainable_development_goals: cx.list(obj, "sustainable_development_goals"),
            grants: cx.list(obj, "grants"),
            datasets: cx.list(obj, "datasets"),
            versions: cx.list(obj, "versions"),
            referenced_works_count: cx.optional(obj, "referenced_works_count"),
            referenced_works: cx.list(obj, "referenced_works"),
            related_works: cx.list(obj, "related_works"),
            abstract_inverted_index: cx.optional(obj, "abstract_inverted_index"),
            cited_by_api_url: cx.optional(obj, "cited_by_api_url"),
            counts_by_year: cx.list(obj, "counts_by_year"),
            created_date: cx.required(obj, "created_date")?,
            updated_date: cx.required(obj, "updated_date")?,
        })
    }
}

impl Record for Work {
    const KIND: EntityKind = EntityKind::Work;

    fn id(&self) -> &str {
        &self.id
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }
}

/// Display names of a topic's ancestors, root first
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicPath<'a> {
    pub domain: &'a str,
    pub field: &'a str,
    pub subfield: &'a str,
    pub topic: &'a str,
}

impl Work {
    /// Short ID (e.g., "https://openalex.org/W123" -> "W123")
    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }

    /// `10.x/y` form of the DOI
    pub fn short_doi(&self) -> Option<String> {
        self.doi.as_deref().and_then(short_doi)
    }

    /// Abstract reconstructed from the inverted index
    pub fn abstract_text(&self) -> Option<String> {
        self.abstract_inverted_index
            .as_ref()
            .map(InvertedIndex::to_text)
            .filter(|s| !s.is_empty())
    }

    /// Short author IDs in authorship order
    pub fn author_ids(&self) -> Vec<&str> {
        self.authorships
            .iter()
            .map(|a| short_id(&a.author.id))
            .collect()
    }

    /// Short institution IDs across all authorships (sorted, deduplicated)
    pub fn institution_ids(&self) -> Vec<&str> {
        let mut ids: Vec<_> = self
            .authorships
            .iter()
            .flat_map(|a| &a.institutions)
            .map(|i| short_id(&i.id))
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    pub fn is_oa(&self) -> bool {
        self.open_access.is_oa
    }

    pub fn oa_status(&self) -> &OaStatus {
        &self.open_access.oa_status
    }

    pub fn primary_topic_id(&self) -> Option<&str> {
        self.primary_topic.as_ref().map(|t| short_id(&t.id))
    }

    /// Domain → field → subfield → topic names of the primary topic
    pub fn primary_topic_path(&self) -> Option<TopicPath<'_>> {
        self.primary_topic.as_ref().map(|t| TopicPath {
            domain: &t.lineage.domain.display_name,
            field: &t.lineage.field.display_name,
            subfield: &t.lineage.subfield.display_name,
            topic: &t.display_name,
        })
    }

    /// Source (venue) of the primary location
    pub fn source(&self) -> Option<&DehydratedSource> {
        self.primary_location
            .as_ref()
            .and_then(|loc| loc.source.as_ref())
    }

    pub fn source_id(&self) -> Option<&str> {
        self.source().map(|s| short_id(&s.id))
    }

    pub fn pmid(&self) -> Option<&str> {
        self.ids.pmid.as_deref()
    }

    pub fn pmcid(&self) -> Option<&str> {
        self.ids.pmcid.as_deref()
    }

    pub fn mag(&self) -> Option<i64> {
        self.ids.mag
    }

    /// `publication_date` as a calendar date, when well-formed
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.publication_date, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use serde_json::json;

    fn sample_work() -> Value {
        json!({
            "id": "https://openalex.org/W2741809807",
            "doi": "https://doi.org/10.7717/peerj.4375",
            "title": "The state of OA",
            "display_name": "The state of OA",
            "publication_year": 2018,
            "publication_date": "2018-02-13",
            "ids": {
                "openalex": "https://openalex.org/W2741809807",
                "doi": "https://doi.org/10.7717/peerj.4375",
                "mag": "2741809807",
                "pmid": "https://pubmed.ncbi.nlm.nih.gov/29456894"
            },
            "language": "en",
            "type": "article",
            "type_crossref": "journal-article",
            "indexed_in": ["crossref", "doaj", "pubmed"],
            "open_access": {
                "is_oa": true,
                "oa_status": "gold",
                "oa_url": "https://doi.org/10.7717/peerj.4375",
                "any_repository_has_fulltext": true
            },
            "authorships": [
                {
                    "author_position": "first",
                    "author": {"id": "https://openalex.org/A5023888391", "display_name": "Jason Priem", "orcid": null},
                    "institutions": [{"id": "https://openalex.org/I4200000001", "display_name": "OurResearch", "type": "nonprofit"}],
                    "countries": ["US"],
                    "is_corresponding": true,
                    "raw_author_name": "Jason Priem",
                    "raw_affiliation_strings": ["Impactstory"],
                    "affiliations": [{"raw_affiliation_string": "Impactstory", "institution_ids": ["https://openalex.org/I4200000001"]}]
                },
                {
                    "author_position": "last",
                    "author": {"id": "https://openalex.org/A5006181429", "display_name": "Heather Piwowar"},
                    "institutions": [{"id": "https://openalex.org/I4200000001", "display_name": "OurResearch"}],
                    "is_corresponding": false,
                    "raw_author_name": "Heather Piwowar"
                }
            ],
            "countries_distinct_count": 1,
            "institutions_distinct_count": 1,
            "has_fulltext": true,
            "fulltext_origin": "ngrams",
            "cited_by_count": 900,
            "citation_normalized_percentile": {"value": 0.99, "is_in_top_1_percent": true, "is_in_top_10_percent": true},
            "cited_by_percentile_year": {"min": 99, "max": 100},
            "biblio": {"volume": "6", "issue": null, "first_page": "e4375", "last_page": "e4375"},
            "is_retracted": false,
            "is_paratext": false,
            "primary_topic": {
                "id": "https://openalex.org/T10102",
                "display_name": "scientometrics and bibliometrics research",
                "score": 0.99,
                "subfield": {"id": "https://openalex.org/subfields/1804", "display_name": "Statistics, Probability and Uncertainty"},
                "field": {"id": "https://openalex.org/fields/18", "display_name": "Decision Sciences"},
                "domain": {"id": "https://openalex.org/domains/2", "display_name": "Social Sciences"}
            },
            "keywords": [{"id": "https://openalex.org/keywords/open-access", "display_name": "Open Access", "score": 0.6}],
            "locations_count": 2,
            "primary_location": {
                "is_oa": true,
                "landing_page_url": "https://doi.org/10.7717/peerj.4375",
                "pdf_url": null,
                "source": {
                    "id": "https://openalex.org/S1983995261",
                    "display_name": "PeerJ",
                    "issn_l": "2167-8359",
                    "issn": ["2167-8359"],
                    "is_oa": true,
                    "is_in_doaj": true,
                    "is_core": true,
                    "host_organization": "https://openalex.org/P4310320104",
                    "type": "journal"
                },
                "license": "cc-by",
                "version": "publishedVersion",
                "is_accepted": true,
                "is_published": true
            },
            "referenced_works_count": 2,
            "referenced_works": ["https://openalex.org/W1", null, "https://openalex.org/W2"],
            "abstract_inverted_index": {"Despite": [0], "growing": [1], "interest": [2]},
            "counts_by_year": [{"year": 2024, "cited_by_count": 100}],
            "datasets": [],
            "versions": [],
            "updated_date": "2024-06-16T00:00:00",
            "created_date": "2017-08-08"
        })
    }

    fn decode(raw: &Value) -> Result<(Work, Vec<DecodeError>), DecodeError> {
        crate::decode::decode_value(EntityKind::Work, raw)
    }

    #[test]
    fn parse_work() {
        let (work, issues) = decode(&sample_work()).unwrap();
        assert!(issues.is_empty(), "{issues:?}");
        assert_eq!(work.short_id(), "W2741809807");
        assert_eq!(work.short_doi().as_deref(), Some("10.7717/peerj.4375"));
        assert_eq!(work.work_type, WorkType::Article);
        assert_eq!(work.type_crossref, Some(WorkTypeCrossref::JournalArticle));
        assert_eq!(work.mag(), Some(2741809807));
        assert_eq!(work.oa_status(), &OaStatus::Gold);
        assert_eq!(work.author_ids(), vec!["A5023888391", "A5006181429"]);
        assert_eq!(work.institution_ids(), vec!["I4200000001"]);
        assert_eq!(work.abstract_text().as_deref(), Some("Despite growing interest"));
        assert_eq!(work.source_id(), Some("S1983995261"));
        assert_eq!(work.referenced_works.len(), 2);
        assert_eq!(work.cited_by_percentile_year.max, Some(100));
        assert_eq!(work.published_on(), NaiveDate::from_ymd_opt(2018, 2, 13));

        let path = work.primary_topic_path().unwrap();
        assert_eq!(path.domain, "Social Sciences");
        assert_eq!(path.field, "Decision Sciences");
    }

    #[test]
    fn made_up_type_is_kept() {
        let mut raw = sample_work();
        raw["type"] = json!("made-up-type");
        let (work, issues) = decode(&raw).unwrap();
        assert_eq!(work.work_type, WorkType::Unrecognized("made-up-type".into()));
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0].kind(),
            DecodeErrorKind::UnrecognizedEnumValue { .. }
        ));
        assert_eq!(issues[0].path().to_string(), "type");
    }

    #[test]
    fn broken_authorship_is_dropped() {
        let mut raw = sample_work();
        raw["authorships"][1]["author"]
            .as_object_mut()
            .unwrap()
            .remove("id");
        let (work, issues) = decode(&raw).unwrap();
        assert_eq!(work.authorships.len(), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path().to_string(), "authorships[1].author.id");
    }

    #[test]
    fn dropped_authorship_keeps_no_inner_issues() {
        let mut raw = sample_work();
        raw["authorships"][0]["author_position"] = json!("sole");
        raw["authorships"][0]
            .as_object_mut()
            .unwrap()
            .remove("raw_author_name");
        let (work, issues) = decode(&raw).unwrap();
        assert_eq!(work.authorships.len(), 1);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), &DecodeErrorKind::MissingRequiredField);
        assert_eq!(
            issues[0].path().to_string(),
            "authorships[0].raw_author_name"
        );
    }

    #[test]
    fn publication_year_must_be_integer() {
        let mut raw = sample_work();
        raw["publication_year"] = json!("twenty");
        let err = decode(&raw).unwrap_err();
        assert_eq!(
            err.to_string(),
            "work: type mismatch at `publication_year`: expected integer, found string"
        );
    }

    #[test]
    fn malformed_optional_nested_degrades() {
        let mut raw = sample_work();
        raw["biblio"] = json!("6(1)");
        raw["apc_list"] = json!({"value": 1395, "currency": "USD"});
        let (work, issues) = decode(&raw).unwrap();
        assert!(work.biblio.is_none());
        assert!(work.apc_list.is_none());
        let paths: Vec<String> = issues.iter().map(|i| i.path().to_string()).collect();
        assert_eq!(paths, vec!["apc_list.value_usd", "biblio"]);
    }

    #[test]
    fn encode_keeps_wire_names() {
        let (work, _) = decode(&sample_work()).unwrap();
        let encoded = serde_json::to_value(&work).unwrap();
        assert_eq!(encoded["type"], "article");
        assert_eq!(encoded["primary_location"]["version"], "publishedVersion");
        assert_eq!(encoded["primary_topic"]["domain"]["display_name"], "Social Sciences");
        assert_eq!(encoded["abstract_inverted_index"]["growing"], json!([1]));
        assert_eq!(encoded["apc_list"], Value::Null);

        let (again, _) = decode(&encoded).unwrap();
        assert_eq!(again, work);
    }
}

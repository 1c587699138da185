//! Typed OpenAlex entities
//!
//! One module per entity kind; each holds the hydrated record, its
//! identifier bundle and the dehydrated forms embedded in other entities.

pub mod author;
pub mod common;
pub mod concept;
pub mod funder;
pub mod institution;
pub mod keyword;
pub mod publisher;
pub mod source;
pub mod topic;
pub mod work;

pub use author::{Author, AuthorIds, DehydratedAuthor, InstitutionWithYears};
pub use common::{International, Role, SummaryStats, YearCount};
pub use concept::{Concept, ConceptIds, DehydratedConcept};
pub use funder::{Funder, FunderIds};
pub use institution::{
    DehydratedInstitution, Geo, Institution, InstitutionIds, RelatedInstitution, Repository,
};
pub use keyword::{DehydratedKeyword, Keyword};
pub use publisher::{Publisher, PublisherIds};
pub use source::{ApcPrice, DehydratedSource, Society, Source, SourceIds};
pub use topic::{
    DehydratedTopic, Domain, Field, Subfield, Taxon, Topic, TopicCount, TopicIds, TopicLineage,
    TopicMinimal, TopicShare,
};
pub use work::{
    Affiliation, ApcData, Authorship, Biblio, CitationNormalizedPercentile, CitationYearCount,
    Grant, Location, Mesh, OpenAccess, PercentileYear, Sdg, TopicPath, Work, WorkIds,
};

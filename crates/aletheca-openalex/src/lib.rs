//! Aletheca OpenAlex - typed OpenAlex entities and a tolerant JSON decoder
//!
//! This crate turns loosely structured OpenAlex API payloads into typed
//! records. Missing optional fields become `None`/empty, unknown keys are
//! ignored, and values outside a closed vocabulary are kept as an
//! `Unrecognized` sentinel. Only a missing or mistyped required field fails
//! a record.
//!
//! # Example
//!
//! ```
//! use aletheca_openalex::{EntityKind, decode_with_issues};
//! use serde_json::json;
//!
//! let raw = json!({
//!     "id": "https://openalex.org/keywords/deep-learning",
//!     "display_name": "Deep Learning",
//!     "works_count": 281736,
//!     "cited_by_count": 2637517,
//!     "created_date": "2024-04-10",
//!     "updated_date": "2024-05-09T05:00:04.062741",
//!     "works_api_url": "https://api.openalex.org/works?filter=keywords.id:deep-learning"
//! });
//!
//! let decoded = decode_with_issues(EntityKind::Keyword, &raw).unwrap();
//! assert_eq!(decoded.entity.display_name(), "Deep Learning");
//! assert!(decoded.issues.is_empty());
//! ```

pub mod abstract_decode;
pub mod batch;
pub mod decode;
pub mod entity;
pub mod error;
pub mod ids;
pub mod kind;
pub mod page;
pub mod schema;
pub mod vocab;
pub mod wire;

// Re-exports for convenience
pub use abstract_decode::{InvertedIndex, decode_abstract};
pub use batch::{BatchReport, ItemReport, decode_batch, decode_batch_par};
pub use decode::{Decode, Decoder};
pub use entity::{Decoded, Entity, Record, decode, decode_record, decode_with_issues};
pub use error::{DecodeError, DecodeErrorKind, FieldPath, PathSegment, Shape};
pub use ids::{IdType, determine_id_type, normalize_doi, short_doi, short_id};
pub use kind::{EntityKind, infer_kind};
pub use page::{GroupBucket, Meta, Page, decode_page};
pub use schema::{
    Author, Concept, Funder, Institution, Keyword, Publisher, Source, Topic, Work,
};

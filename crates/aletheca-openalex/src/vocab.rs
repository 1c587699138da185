//! Closed-set string vocabularies
//!
//! OpenAlex adds new values to these sets over time, so each enum carries an
//! `Unrecognized` arm holding the raw string. Decoding an unknown value is
//! never fatal: it yields the sentinel and records an
//! [`UnrecognizedEnumValue`](crate::error::DecodeErrorKind::UnrecognizedEnumValue) issue.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::decode::{Decode, Decoder};
use crate::error::{DecodeError, DecodeErrorKind, Shape};

macro_rules! vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
            /// Value outside the known set, kept verbatim
            Unrecognized(String),
        }

        impl $name {
            /// Human-readable vocabulary name used in diagnostics
            pub const VOCABULARY: &'static str = $label;

            /// Wire spellings of the known values
            pub const KNOWN: &'static [&'static str] = &[$($wire),+];

            pub fn from_wire(s: &str) -> Option<Self> {
                match s {
                    $($wire => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// Parse a wire value, falling back to the sentinel.
            pub fn parse(s: &str) -> Self {
                Self::from_wire(s).unwrap_or_else(|| Self::Unrecognized(s.to_string()))
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(Self::$variant => $wire,)+
                    Self::Unrecognized(raw) => raw.as_str(),
                }
            }

            pub fn is_unrecognized(&self) -> bool {
                matches!(self, Self::Unrecognized(_))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl Decode for $name {
            fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
                let Some(raw) = value.as_str() else {
                    return Err(cx.mismatch(Shape::String, value));
                };
                if let Some(known) = Self::from_wire(raw) {
                    return Ok(known);
                }
                let issue = cx.error(DecodeErrorKind::UnrecognizedEnumValue {
                    vocabulary: $label,
                    value: raw.to_string(),
                });
                cx.report(issue);
                Ok(Self::Unrecognized(raw.to_string()))
            }
        }
    };
}

vocabulary! {
    /// OpenAlex work type
    WorkType, "work type" {
        Article => "article",
        BookChapter => "book-chapter",
        BookSection => "book-section",
        Book => "book",
        Dataset => "dataset",
        Database => "database",
        Dissertation => "dissertation",
        Editorial => "editorial",
        Erratum => "erratum",
        Grant => "grant",
        Letter => "letter",
        Libguides => "libguides",
        Other => "other",
        Paratext => "paratext",
        PeerReview => "peer-review",
        Preprint => "preprint",
        ReferenceEntry => "reference-entry",
        Report => "report",
        ReportComponent => "report-component",
        Retraction => "retraction",
        Review => "review",
        Software => "software",
        Standard => "standard",
        SupplementaryMaterials => "supplementary-materials",
    }
}

vocabulary! {
    /// Crossref work type as echoed by OpenAlex (`type_crossref`)
    WorkTypeCrossref, "crossref work type" {
        BookSection => "book-section",
        Monograph => "monograph",
        ReportComponent => "report-component",
        Report => "report",
        PeerReview => "peer-review",
        BookTrack => "book-track",
        JournalArticle => "journal-article",
        BookPart => "book-part",
        Other => "other",
        Book => "book",
        JournalVolume => "journal-volume",
        BookSet => "book-set",
        ReferenceEntry => "reference-entry",
        ProceedingsArticle => "proceedings-article",
        Journal => "journal",
        Component => "component",
        BookChapter => "book-chapter",
        ProceedingsSeries => "proceedings-series",
        ReportSeries => "report-series",
        Proceedings => "proceedings",
        Database => "database",
        Standard => "standard",
        ReferenceBook => "reference-book",
        PostedContent => "posted-content",
        JournalIssue => "journal-issue",
        Dissertation => "dissertation",
        Grant => "grant",
        Dataset => "dataset",
        BookSeries => "book-series",
        EditedBook => "edited-book",
    }
}

vocabulary! {
    SourceType, "source type" {
        Journal => "journal",
        Repository => "repository",
        Conference => "conference",
        EbookPlatform => "ebook platform",
        BookSeries => "book series",
        Metadata => "metadata",
        Other => "other",
    }
}

vocabulary! {
    InstitutionType, "institution type" {
        Education => "education",
        Healthcare => "healthcare",
        Company => "company",
        Archive => "archive",
        Nonprofit => "nonprofit",
        Government => "government",
        Facility => "facility",
        Other => "other",
    }
}

vocabulary! {
    /// Open access status of a work
    OaStatus, "OA status" {
        Diamond => "diamond",
        Gold => "gold",
        Green => "green",
        Hybrid => "hybrid",
        Bronze => "bronze",
        Closed => "closed",
    }
}

vocabulary! {
    AuthorPosition, "author position" {
        First => "first",
        Middle => "middle",
        Last => "last",
    }
}

vocabulary! {
    /// Manuscript version hosted at a location
    LocationVersion, "location version" {
        Published => "publishedVersion",
        Accepted => "acceptedVersion",
        Submitted => "submittedVersion",
    }
}

vocabulary! {
    InstitutionRelationship, "institution relationship" {
        Parent => "parent",
        Child => "child",
        Related => "related",
    }
}

vocabulary! {
    /// Role an organization plays (one organization may hold several)
    RoleKind, "role" {
        Funder => "funder",
        Publisher => "publisher",
        Institution => "institution",
    }
}

vocabulary! {
    FulltextOrigin, "fulltext origin" {
        Pdf => "pdf",
        Ngrams => "ngrams",
    }
}

vocabulary! {
    /// Upstream index a work appears in (`indexed_in`)
    IndexSource, "index" {
        Arxiv => "arxiv",
        Crossref => "crossref",
        Doaj => "doaj",
        Pubmed => "pubmed",
    }
}

//! Shapes shared by several entity kinds

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::decode::{Decode, Decoder};
use crate::error::DecodeError;
use crate::vocab::RoleKind;
use crate::wire::wire_key;

/// Citation summary statistics.
///
/// The wire key `2yr_mean_citedness` is translated through [`crate::wire`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub two_yr_mean_citedness: f64,
    pub h_index: i64,
    pub i10_index: i64,
}

impl Decode for SummaryStats {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            two_yr_mean_citedness: cx.required(obj, wire_key("two_yr_mean_citedness"))?,
            h_index: cx.required(obj, "h_index")?,
            i10_index: cx.required(obj, "i10_index")?,
        })
    }
}

impl Serialize for SummaryStats {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("SummaryStats", 3)?;
        s.serialize_field(
            wire_key("two_yr_mean_citedness"),
            &self.two_yr_mean_citedness,
        )?;
        s.serialize_field("h_index", &self.h_index)?;
        s.serialize_field("i10_index", &self.i10_index)?;
        s.end()
    }
}

/// Per-year works and citation counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearCount {
    pub year: i32,
    pub works_count: i64,
    pub cited_by_count: i64,
}

impl Decode for YearCount {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            year: cx.required(obj, "year")?,
            works_count: cx.required(obj, "works_count")?,
            cited_by_count: cx.required(obj, "cited_by_count")?,
        })
    }
}

/// One role of an organization (funder / publisher / institution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Role {
    pub role: RoleKind,
    pub id: String,
    pub works_count: i64,
}

impl Decode for Role {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            role: cx.required(obj, "role")?,
            id: cx.identifier(obj)?,
            works_count: cx.required(obj, "works_count")?,
        })
    }
}

/// Localized display names, keyed by language code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct International {
    pub display_name: BTreeMap<String, String>,
}

impl Decode for International {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            display_name: cx.or_default(obj, "display_name"),
        })
    }
}

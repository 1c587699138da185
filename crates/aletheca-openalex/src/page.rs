//! Paginated list responses (`meta` + `results`)

use serde::Serialize;
use serde_json::Value;

use crate::batch::{BatchReport, decode_nested_list};
use crate::decode::{Decode, Decoder};
use crate::error::{DecodeError, PathSegment};
use crate::kind::EntityKind;

/// Pagination metadata of a list response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Meta {
    pub count: i64,
    pub db_response_time_ms: i64,
    pub page: i64,
    pub per_page: i64,
    pub groups_count: Option<i64>,
    /// Present when paging with `cursor=*`
    pub next_cursor: Option<String>,
}

impl Decode for Meta {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            count: cx.required(obj, "count")?,
            db_response_time_ms: cx.required(obj, "db_response_time_ms")?,
            page: cx.required(obj, "page")?,
            per_page: cx.required(obj, "per_page")?,
            groups_count: cx.optional(obj, "groups_count"),
            next_cursor: cx.optional(obj, "next_cursor"),
        })
    }
}

impl Meta {
    /// Number of pages at this page size
    pub fn page_count(&self) -> i64 {
        if self.per_page <= 0 || self.count <= 0 {
            return 0;
        }
        let (full, rest) = (self.count / self.per_page, self.count % self.per_page);
        if rest > 0 { full + 1 } else { full }
    }

    pub fn has_next(&self) -> bool {
        if self.next_cursor.is_some() {
            return true;
        }
        match self.page.checked_mul(self.per_page) {
            Some(seen) => seen < self.count,
            None => false,
        }
    }
}

/// One bucket of a `group_by` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupBucket {
    pub key: String,
    pub key_display_name: String,
    pub count: i64,
}

impl Decode for GroupBucket {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        Ok(Self {
            key: cx.required(obj, "key")?,
            key_display_name: cx.required(obj, "key_display_name")?,
            count: cx.required(obj, "count")?,
        })
    }
}

/// A decoded list response; each result carries its own outcome
#[derive(Debug, Clone)]
pub struct Page {
    pub kind: EntityKind,
    pub meta: Meta,
    pub group_by: Vec<GroupBucket>,
    pub results: BatchReport,
}

/// Decode a paginated envelope of `kind` entities.
///
/// `meta` and the shape of `results` are required; a malformed result only
/// fails that item.
pub fn decode_page(kind: EntityKind, raw: &Value) -> Result<Page, DecodeError> {
    let mut cx = Decoder::new(kind);
    let obj = cx.object(raw)?;
    let meta: Meta = cx.required(obj, "meta")?;
    let group_by: Vec<GroupBucket> = cx.list(obj, "group_by");

    let items = cx.nested(PathSegment::Key("results".to_string()), |cx| {
        match obj.get("results") {
            None | Some(Value::Null) => Ok(&[][..]),
            Some(value) => cx.array(value),
        }
    })?;
    let results = decode_nested_list(kind, "results", items);

    for issue in cx.into_issues() {
        log::debug!("page envelope: {issue}");
    }
    log::debug!(
        "{} page {}: {} of {} results decoded",
        kind.collection(),
        meta.page,
        results.success_count(),
        results.len()
    );

    Ok(Page {
        kind,
        meta,
        group_by,
        results,
    })
}

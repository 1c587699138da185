//! Per-item batch decoding
//!
//! A malformed record never aborts its batch: each item is decoded on its own
//! and the outcome recorded in input order.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde_json::Value;

use crate::decode::Decoder;
use crate::entity::{Decoded, Entity, decode_in};
use crate::error::{DecodeError, FieldPath, PathSegment};
use crate::kind::EntityKind;

/// Outcome of decoding one item of a batch
#[derive(Debug, Clone)]
pub struct ItemReport {
    /// Position in the input
    pub index: usize,
    pub outcome: Result<Decoded, DecodeError>,
}

impl ItemReport {
    /// Decode one item; error paths start below `prefix`.
    pub fn decode_at(index: usize, kind: EntityKind, raw: &Value, prefix: FieldPath) -> Self {
        Self {
            index,
            outcome: decode_in(Decoder::with_prefix(kind, prefix), raw),
        }
    }

    pub fn decode(index: usize, kind: EntityKind, raw: &Value) -> Self {
        Self::decode_at(index, kind, raw, FieldPath::root())
    }

    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn entity(&self) -> Option<&Entity> {
        self.outcome.as_ref().ok().map(|d| &d.entity)
    }

    pub fn error(&self) -> Option<&DecodeError> {
        self.outcome.as_ref().err()
    }

    /// Non-fatal issues (empty for failed items)
    pub fn issues(&self) -> &[DecodeError] {
        match &self.outcome {
            Ok(decoded) => &decoded.issues,
            Err(_) => &[],
        }
    }
}

/// Per-item outcomes of a batch, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    items: Vec<ItemReport>,
}

impl BatchReport {
    pub fn new(items: Vec<ItemReport>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ItemReport] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn successes(&self) -> impl Iterator<Item = &Entity> {
        self.items.iter().filter_map(ItemReport::entity)
    }

    /// Failed items as `(index, error)`
    pub fn failures(&self) -> impl Iterator<Item = (usize, &DecodeError)> {
        self.items
            .iter()
            .filter_map(|item| item.error().map(|e| (item.index, e)))
    }

    pub fn success_count(&self) -> usize {
        self.items.iter().filter(|item| item.is_ok()).count()
    }

    pub fn failure_count(&self) -> usize {
        self.len() - self.success_count()
    }

    /// Total non-fatal issues across successful items
    pub fn issue_count(&self) -> usize {
        self.items.iter().map(|item| item.issues().len()).sum()
    }

    /// Issue and failure counts keyed by error label
    pub fn counts_by_label(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for item in &self.items {
            let errors = item.error().into_iter().chain(item.issues());
            for err in errors {
                *counts.entry(err.kind().label()).or_insert(0) += 1;
            }
        }
        counts
    }

    pub fn into_entities(self) -> Vec<Entity> {
        self.items
            .into_iter()
            .filter_map(|item| item.outcome.ok().map(|d| d.entity))
            .collect()
    }

    pub fn extend(&mut self, other: BatchReport) {
        self.items.extend(other.items);
    }

    pub fn log(&self, label: &str) {
        let failed = self.failure_count();
        let summary = format!(
            "{label}: {}/{} decoded ({} failed, {} issues)",
            self.success_count(),
            self.len(),
            failed,
            self.issue_count()
        );
        if failed > 0 {
            log::warn!("{summary}");
            for (index, err) in self.failures() {
                log::debug!("  item {index}: {err}");
            }
        } else {
            log::info!("{summary}");
        }
    }
}

impl FromIterator<ItemReport> for BatchReport {
    fn from_iter<I: IntoIterator<Item = ItemReport>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Decode every item of `items` as `kind`.
pub fn decode_batch(kind: EntityKind, items: &[Value]) -> BatchReport {
    items
        .iter()
        .enumerate()
        .map(|(index, raw)| ItemReport::decode(index, kind, raw))
        .collect()
}

/// Parallel [`decode_batch`]; outcomes keep input order.
pub fn decode_batch_par(kind: EntityKind, items: &[Value]) -> BatchReport {
    let reports: Vec<ItemReport> = items
        .par_iter()
        .enumerate()
        .map(|(index, raw)| ItemReport::decode(index, kind, raw))
        .collect();
    BatchReport::new(reports)
}

/// Decode a list nested under `key` with paths like `key[i].field`.
pub(crate) fn decode_nested_list(kind: EntityKind, key: &str, items: &[Value]) -> BatchReport {
    let base = FieldPath::root().join(PathSegment::Key(key.to_string()));
    items
        .iter()
        .enumerate()
        .map(|(index, raw)| {
            let prefix = base.join(PathSegment::Index(index));
            ItemReport::decode_at(index, kind, raw, prefix)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeErrorKind;
    use serde_json::json;

    fn keyword(slug: &str) -> Value {
        json!({
            "id": format!("https://openalex.org/keywords/{slug}"),
            "display_name": slug,
            "works_count": 1,
            "cited_by_count": 2,
            "created_date": "2024-04-10",
            "updated_date": "2024-04-10"
        })
    }

    fn mixed_batch() -> Vec<Value> {
        vec![
            keyword("a"),
            json!({"display_name": "no id"}),
            keyword("b"),
            json!(null),
        ]
    }

    #[test]
    fn failures_do_not_abort() {
        let report = decode_batch(EntityKind::Keyword, &mixed_batch());
        assert_eq!(report.len(), 4);
        assert_eq!(report.success_count(), 2);
        assert_eq!(report.failure_count(), 2);

        let failed: Vec<usize> = report.failures().map(|(i, _)| i).collect();
        assert_eq!(failed, vec![1, 3]);
        let ids: Vec<&str> = report.successes().map(Entity::id).collect();
        assert_eq!(
            ids,
            vec![
                "https://openalex.org/keywords/a",
                "https://openalex.org/keywords/b"
            ]
        );
    }

    #[test]
    fn parallel_matches_sequential() {
        let items: Vec<Value> = (0..64)
            .map(|i| {
                if i % 5 == 0 {
                    json!({"id": ""})
                } else {
                    keyword(&format!("k{i}"))
                }
            })
            .collect();
        let seq = decode_batch(EntityKind::Keyword, &items);
        let par = decode_batch_par(EntityKind::Keyword, &items);
        assert_eq!(seq.success_count(), par.success_count());
        let seq_idx: Vec<usize> = seq.items().iter().map(|i| i.index).collect();
        let par_idx: Vec<usize> = par.items().iter().map(|i| i.index).collect();
        assert_eq!(seq_idx, par_idx);
        assert_eq!(par.failure_count(), 13);
    }

    #[test]
    fn counts_by_label() {
        let report = decode_batch(EntityKind::Keyword, &mixed_batch());
        let counts = report.counts_by_label();
        assert_eq!(counts["MissingRequiredField"], 1);
        assert_eq!(counts["MalformedNesting"], 1);
    }

    #[test]
    fn nested_list_prefixes_paths() {
        let report = decode_nested_list(EntityKind::Keyword, "results", &mixed_batch());
        let (_, err) = report.failures().next().unwrap();
        assert_eq!(err.path().to_string(), "results[1].id");
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField);
    }

    #[test]
    fn into_entities_drops_failures() {
        let entities = decode_batch(EntityKind::Keyword, &mixed_batch()).into_entities();
        assert_eq!(entities.len(), 2);
    }
}

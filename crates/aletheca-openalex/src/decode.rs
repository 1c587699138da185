//! Tolerant JSON → record decoding
//!
//! Every record type implements [`Decode`], reading its fields through a
//! [`Decoder`] context. The context tracks the field path for error
//! reporting and collects non-fatal issues:
//!
//! - [`Decoder::required`] fails the record when the key is absent or mistyped.
//! - [`Decoder::optional`] / [`Decoder::or_default`] yield `None`/default for
//!   absent or `null` keys; a malformed value is recorded as an issue and
//!   dropped.
//! - [`Decoder::list`] decodes each element independently; malformed elements
//!   are recorded and dropped, `null` elements are skipped.
//!
//! Keys not read by a record are ignored.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::error::{DecodeError, DecodeErrorKind, FieldPath, PathSegment, Shape};
use crate::kind::EntityKind;

/// A type that can be built from an untyped JSON value.
pub trait Decode: Sized {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError>;
}

/// Decoding context for a single entity payload.
#[derive(Debug)]
pub struct Decoder {
    entity: EntityKind,
    path: FieldPath,
    issues: Vec<DecodeError>,
}

impl Decoder {
    pub fn new(entity: EntityKind) -> Self {
        Self::with_prefix(entity, FieldPath::root())
    }

    /// Decoder whose error paths start below `prefix` (e.g. `results[3]`).
    pub fn with_prefix(entity: EntityKind, prefix: FieldPath) -> Self {
        Self {
            entity,
            path: prefix,
            issues: Vec::new(),
        }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Non-fatal issues collected so far.
    pub fn issues(&self) -> &[DecodeError] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<DecodeError> {
        self.issues
    }

    /// Error of the given kind at the current path.
    pub fn error(&self, kind: DecodeErrorKind) -> DecodeError {
        DecodeError::new(self.entity, self.path.clone(), kind)
    }

    /// Shape mismatch error at the current path.
    pub fn mismatch(&self, expected: Shape, found: &Value) -> DecodeError {
        self.error(DecodeErrorKind::mismatch(expected, Shape::of(found)))
    }

    /// Record a non-fatal issue.
    pub fn report(&mut self, issue: DecodeError) {
        log::debug!("{issue}");
        self.issues.push(issue);
    }

    /// Run `f` one segment deeper in the path.
    pub fn nested<R>(&mut self, segment: PathSegment, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment);
        let result = f(self);
        self.path.pop();
        result
    }

    pub fn object<'v>(&self, value: &'v Value) -> Result<&'v Map<String, Value>, DecodeError> {
        value
            .as_object()
            .ok_or_else(|| self.mismatch(Shape::Object, value))
    }

    pub fn array<'v>(&self, value: &'v Value) -> Result<&'v [Value], DecodeError> {
        value
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| self.mismatch(Shape::Array, value))
    }

    /// Run a decode whose failure only drops the value.
    ///
    /// On failure, issues raised inside `f` are discarded and the failure
    /// itself is reported in their place.
    fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, DecodeError>) -> Option<T> {
        let mark = self.issues.len();
        match f(self) {
            Ok(v) => Some(v),
            Err(e) => {
                self.issues.truncate(mark);
                self.report(e);
                None
            }
        }
    }

    /// Decode a key that must be present and well-typed.
    pub fn required<T: Decode>(
        &mut self,
        obj: &Map<String, Value>,
        key: &str,
    ) -> Result<T, DecodeError> {
        self.nested(PathSegment::Key(key.to_string()), |cx| match obj.get(key) {
            Some(value) => T::decode(value, cx),
            None => Err(cx.error(DecodeErrorKind::MissingRequiredField)),
        })
    }

    /// Decode a key that may be absent, `null`, or malformed.
    pub fn optional<T: Decode>(&mut self, obj: &Map<String, Value>, key: &str) -> Option<T> {
        self.nested(PathSegment::Key(key.to_string()), |cx| match obj.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => cx.attempt(|cx| T::decode(value, cx)),
        })
    }

    pub fn or_default<T: Decode + Default>(&mut self, obj: &Map<String, Value>, key: &str) -> T {
        self.optional(obj, key).unwrap_or_default()
    }

    /// Decode an optional list, dropping malformed and `null` elements.
    pub fn list<T: Decode>(&mut self, obj: &Map<String, Value>, key: &str) -> Vec<T> {
        self.nested(PathSegment::Key(key.to_string()), |cx| {
            let items = match obj.get(key) {
                None | Some(Value::Null) => return Vec::new(),
                Some(Value::Array(items)) => items,
                Some(other) => {
                    let issue = cx.mismatch(Shape::Array, other);
                    cx.report(issue);
                    return Vec::new();
                }
            };
            let mut out = Vec::with_capacity(items.len());
            for (idx, item) in items.iter().enumerate() {
                if item.is_null() {
                    continue;
                }
                let decoded =
                    cx.nested(PathSegment::Index(idx), |cx| cx.attempt(|cx| T::decode(item, cx)));
                out.extend(decoded);
            }
            out
        })
    }

    /// Canonical `id` of a record: required and non-empty.
    pub fn identifier(&mut self, obj: &Map<String, Value>) -> Result<String, DecodeError> {
        let id: String = self.required(obj, "id")?;
        if id.trim().is_empty() {
            return Err(self.nested(PathSegment::Key("id".to_string()), |cx| {
                cx.error(DecodeErrorKind::MissingRequiredField)
            }));
        }
        Ok(id)
    }
}

/// Decode `value` as `T`, returning the value together with its non-fatal issues.
pub fn decode_value<T: Decode>(
    entity: EntityKind,
    value: &Value,
) -> Result<(T, Vec<DecodeError>), DecodeError> {
    let mut cx = Decoder::new(entity);
    let decoded = T::decode(value, &mut cx)?;
    Ok((decoded, cx.into_issues()))
}

// === Scalar and container impls ===

impl Decode for String {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        match value {
            Value::String(s) => Ok(s.clone()),
            other => Err(cx.mismatch(Shape::String, other)),
        }
    }
}

impl Decode for bool {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        match value {
            Value::Bool(b) => Ok(*b),
            other => Err(cx.mismatch(Shape::Bool, other)),
        }
    }
}

/// Integers also accept integral floats (`5.0`) and numeric strings (`"2741809807"`).
impl Decode for i64 {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let coerced = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        };
        coerced.ok_or_else(|| cx.mismatch(Shape::Integer, value))
    }
}

impl Decode for i32 {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let wide = i64::decode(value, cx)?;
        i32::try_from(wide).map_err(|_| cx.mismatch(Shape::Integer, value))
    }
}

impl Decode for u32 {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let wide = i64::decode(value, cx)?;
        u32::try_from(wide).map_err(|_| cx.mismatch(Shape::Integer, value))
    }
}

impl Decode for f64 {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let coerced = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        };
        coerced.ok_or_else(|| cx.mismatch(Shape::Number, value))
    }
}

/// Opaque passthrough for fields with no declared shape.
impl Decode for Value {
    fn decode(value: &Value, _cx: &mut Decoder) -> Result<Self, DecodeError> {
        Ok(value.clone())
    }
}

/// Strict list: the first malformed element fails the whole list.
/// `null` elements are skipped.
impl<T: Decode> Decode for Vec<T> {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let items = cx.array(value)?;
        let mut out = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            if item.is_null() {
                continue;
            }
            out.push(cx.nested(PathSegment::Index(idx), |cx| T::decode(item, cx))?);
        }
        Ok(out)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
        let obj = cx.object(value)?;
        let mut out = BTreeMap::new();
        for (key, item) in obj {
            if item.is_null() {
                continue;
            }
            let decoded = cx.nested(PathSegment::Key(key.clone()), |cx| T::decode(item, cx))?;
            out.insert(key.clone(), decoded);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, PartialEq)]
    struct Pair {
        id: String,
        count: i64,
        label: Option<String>,
        tags: Vec<String>,
    }

    impl Decode for Pair {
        fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
            let obj = cx.object(value)?;
            Ok(Self {
                id: cx.identifier(obj)?,
                count: cx.required(obj, "count")?,
                label: cx.optional(obj, "label"),
                tags: cx.list(obj, "tags"),
            })
        }
    }

    #[derive(Debug)]
    struct Labelled {
        label: Option<String>,
        count: i64,
    }

    impl Decode for Labelled {
        fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
            let obj = cx.object(value)?;
            Ok(Self {
                label: cx.optional(obj, "label"),
                count: cx.required(obj, "count")?,
            })
        }
    }

    #[derive(Debug)]
    struct Holder {
        first: Option<Labelled>,
        rest: Vec<Labelled>,
    }

    impl Decode for Holder {
        fn decode(value: &Value, cx: &mut Decoder) -> Result<Self, DecodeError> {
            let obj = cx.object(value)?;
            Ok(Self {
                first: cx.optional(obj, "first"),
                rest: cx.list(obj, "rest"),
            })
        }
    }

    fn decode_pair(value: Value) -> Result<(Pair, Vec<DecodeError>), DecodeError> {
        decode_value(EntityKind::Work, &value)
    }

    #[test]
    fn required_and_defaults() {
        let (pair, issues) = decode_pair(json!({"id": "X1", "count": 3})).unwrap();
        assert_eq!(
            pair,
            Pair {
                id: "X1".into(),
                count: 3,
                label: None,
                tags: vec![]
            }
        );
        assert!(issues.is_empty());
    }

    #[test]
    fn missing_required() {
        let err = decode_pair(json!({"id": "X1"})).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField);
        assert_eq!(err.path().to_string(), "count");
    }

    #[test]
    fn empty_id_is_missing() {
        let err = decode_pair(json!({"id": " ", "count": 1})).unwrap_err();
        assert_eq!(err.kind(), &DecodeErrorKind::MissingRequiredField);
        assert_eq!(err.path().to_string(), "id");
    }

    #[test]
    fn required_type_mismatch() {
        let err = decode_pair(json!({"id": "X1", "count": "many"})).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::TypeMismatch {
                expected: Shape::Integer,
                actual: Shape::String
            }
        );
    }

    #[test]
    fn not_an_object() {
        let err = decode_pair(json!(["X1"])).unwrap_err();
        assert_eq!(
            err.kind(),
            &DecodeErrorKind::MalformedNesting {
                expected: Shape::Object,
                actual: Shape::Array
            }
        );
        assert!(err.path().is_root());
    }

    #[test]
    fn optional_malformed_is_dropped_with_issue() {
        let (pair, issues) =
            decode_pair(json!({"id": "X1", "count": 1, "label": {"nested": true}})).unwrap();
        assert_eq!(pair.label, None);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path().to_string(), "label");
    }

    #[test]
    fn list_elements_independent() {
        let (pair, issues) =
            decode_pair(json!({"id": "X1", "count": 1, "tags": ["a", 2, null, "b"]})).unwrap();
        assert_eq!(pair.tags, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].path().to_string(), "tags[1]");
    }

    #[test]
    fn dropped_values_only_report_the_drop() {
        let raw = json!({
            "first": {"label": 5},
            "rest": [{"label": 5, "count": 1}, {"label": 6}]
        });
        let (holder, issues) = decode_value::<Holder>(EntityKind::Work, &raw).unwrap();
        assert!(holder.first.is_none());
        assert_eq!(holder.rest.len(), 1);
        assert_eq!(holder.rest[0].count, 1);
        assert_eq!(holder.rest[0].label, None);

        let paths: Vec<String> = issues.iter().map(|i| i.path().to_string()).collect();
        assert_eq!(paths, vec!["first.count", "rest[0].label", "rest[1].count"]);
        assert_eq!(issues[0].kind(), &DecodeErrorKind::MissingRequiredField);
    }

    #[test]
    fn list_scalar_instead_of_list() {
        let (pair, issues) = decode_pair(json!({"id": "X1", "count": 1, "tags": "a"})).unwrap();
        assert!(pair.tags.is_empty());
        assert_eq!(
            issues[0].kind(),
            &DecodeErrorKind::MalformedNesting {
                expected: Shape::Array,
                actual: Shape::String
            }
        );
    }

    #[test]
    fn integer_coercion() {
        let mut cx = Decoder::new(EntityKind::Work);
        assert_eq!(i64::decode(&json!(5), &mut cx), Ok(5));
        assert_eq!(i64::decode(&json!(5.0), &mut cx), Ok(5));
        assert_eq!(i64::decode(&json!("2741809807"), &mut cx), Ok(2741809807));
        assert!(i64::decode(&json!(5.5), &mut cx).is_err());
        assert!(i64::decode(&json!(true), &mut cx).is_err());
        assert!(i32::decode(&json!(5_000_000_000i64), &mut cx).is_err());
        assert!(u32::decode(&json!(-1), &mut cx).is_err());
    }

    #[test]
    fn float_coercion() {
        let mut cx = Decoder::new(EntityKind::Work);
        assert_eq!(f64::decode(&json!(1), &mut cx), Ok(1.0));
        assert_eq!(f64::decode(&json!(0.25), &mut cx), Ok(0.25));
        assert_eq!(f64::decode(&json!("1.5"), &mut cx), Ok(1.5));
        assert!(f64::decode(&json!("NaN"), &mut cx).is_err());
        assert!(f64::decode(&json!(null), &mut cx).is_err());
    }

    #[test]
    fn strict_vec_reports_index() {
        let mut cx = Decoder::new(EntityKind::Topic);
        let err = Vec::<String>::decode(&json!(["a", 1]), &mut cx).unwrap_err();
        assert_eq!(err.path().to_string(), "[1]");
    }

    #[test]
    fn map_decode() {
        let mut cx = Decoder::new(EntityKind::Concept);
        let map =
            BTreeMap::<String, String>::decode(&json!({"en": "Biology", "de": null}), &mut cx)
                .unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["en"], "Biology");
    }

    #[test]
    fn prefix_is_kept_in_paths() {
        let prefix = FieldPath::root()
            .join(PathSegment::Key("results".into()))
            .join(PathSegment::Index(1));
        let mut cx = Decoder::with_prefix(EntityKind::Work, prefix);
        let err = Pair::decode(&json!({"count": 1}), &mut cx).unwrap_err();
        assert_eq!(err.path().to_string(), "results[1].id");
    }
}

//! Decode error taxonomy and field paths

use std::fmt;

use serde_json::Value;

use crate::kind::EntityKind;

/// One step in a field path: an object key or a list index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Dotted/indexed location of a value inside a payload, e.g. `authorships[0].author.id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn pop(&mut self) {
        self.0.pop();
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Key of the innermost segment, if it is a key.
    pub fn last_key(&self) -> Option<&str> {
        match self.0.last() {
            Some(PathSegment::Key(k)) => Some(k),
            _ => None,
        }
    }

    /// New path with `self` as prefix.
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(k) if i == 0 => write!(f, "{k}")?,
                PathSegment::Key(k) => write!(f, ".{k}")?,
                PathSegment::Index(idx) => write!(f, "[{idx}]")?,
            }
        }
        Ok(())
    }
}

/// JSON value shape, used to describe expected vs. actual values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Integer,
    Number,
    String,
    Array,
    Object,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub fn is_container(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "list",
            Self::Object => "object",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What went wrong at a given path.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeErrorKind {
    /// A required attribute is absent from the input.
    MissingRequiredField,
    /// A scalar is present but not coercible to the declared type.
    TypeMismatch { expected: Shape, actual: Shape },
    /// A closed-set field holds a value outside its vocabulary.
    /// Never fatal: the field decodes to its `Unrecognized` sentinel.
    UnrecognizedEnumValue {
        vocabulary: &'static str,
        value: String,
    },
    /// An object or list was expected and something else was found, or vice versa.
    MalformedNesting { expected: Shape, actual: Shape },
}

impl DecodeErrorKind {
    /// Classify a shape mismatch as nesting or scalar type error.
    pub fn mismatch(expected: Shape, actual: Shape) -> Self {
        if expected.is_container() || actual.is_container() {
            Self::MalformedNesting { expected, actual }
        } else {
            Self::TypeMismatch { expected, actual }
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::MissingRequiredField => "MissingRequiredField",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::UnrecognizedEnumValue { .. } => "UnrecognizedEnumValue",
            Self::MalformedNesting { .. } => "MalformedNesting",
        }
    }
}

/// Error produced while decoding one entity payload.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    entity: EntityKind,
    path: FieldPath,
    kind: DecodeErrorKind,
}

impl DecodeError {
    pub fn new(entity: EntityKind, path: FieldPath, kind: DecodeErrorKind) -> Self {
        Self { entity, path, kind }
    }

    pub fn entity(&self) -> EntityKind {
        self.entity
    }

    pub fn path(&self) -> &FieldPath {
        &self.path
    }

    pub fn kind(&self) -> &DecodeErrorKind {
        &self.kind
    }

    /// Whether the decode that produced this error still yielded a value.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.kind, DecodeErrorKind::UnrecognizedEnumValue { .. })
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DecodeErrorKind::MissingRequiredField => {
                write!(f, "{}: missing required field `{}`", self.entity, self.path)
            }
            DecodeErrorKind::TypeMismatch { expected, actual } => write!(
                f,
                "{}: type mismatch at `{}`: expected {expected}, found {actual}",
                self.entity, self.path
            ),
            DecodeErrorKind::UnrecognizedEnumValue { vocabulary, value } => write!(
                f,
                "{}: unrecognized {vocabulary} value {value:?} at `{}`",
                self.entity, self.path
            ),
            DecodeErrorKind::MalformedNesting { expected, actual } => write!(
                f,
                "{}: malformed nesting at `{}`: expected {expected}, found {actual}",
                self.entity, self.path
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

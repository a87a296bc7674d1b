//! Element types.
//!
//! Any `Clone + Eq + Hash` value can be a set member once it implements [`Element`]; this
//! module provides the implementations for the standard types, a dynamic [`Value`] for
//! heterogeneous data, and [`MathElement`], a value annotated with metadata.

use crate::error::{MathError, Result};
use crate::traits::Element;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

macro_rules! impl_element {
    ($($t:ty),* $(,)?) => {
        $(impl Element for $t {})*
    };
}

impl_element!(
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    bool,
    char,
    String,
    &'static str,
    ()
);

impl<A: Element, B: Element> Element for (A, B) {
    fn validate(&self) -> Result<()> {
        self.0.validate()?;
        self.1.validate()
    }
}

impl<A: Element, B: Element, C: Element> Element for (A, B, C) {
    fn validate(&self) -> Result<()> {
        self.0.validate()?;
        self.1.validate()?;
        self.2.validate()
    }
}

impl<E: Element> Element for Option<E> {
    fn validate(&self) -> Result<()> {
        match self {
            Some(inner) => inner.validate(),
            None => Ok(()),
        }
    }
}

impl<E: Element> Element for Vec<E> {
    fn validate(&self) -> Result<()> {
        self.iter().try_for_each(Element::validate)
    }
}

/// A dynamically typed element, for sets whose members do not share one Rust type.
///
/// Floats compare by canonical bit pattern, so `-0.0 == 0.0`. NaN is rejected by
/// `validate`, which makes any set containing one fail to construct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Text(String),
    Bool(bool),
    Float(f64),
    Tuple(Vec<Value>),
}

fn canonical_bits(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else {
        x.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Tuple(a), Value::Tuple(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Int(v) => v.hash(state),
            Value::Text(v) => v.hash(state),
            Value::Bool(v) => v.hash(state),
            Value::Float(v) => canonical_bits(*v).hash(state),
            Value::Tuple(items) => items.hash(state),
        }
    }
}

impl Element for Value {
    fn validate(&self) -> Result<()> {
        match self {
            Value::Float(v) if v.is_nan() => Err(MathError::validation(
                self,
                "NaN is not equal to itself and cannot be a set member",
            )),
            Value::Tuple(items) => items.iter().try_for_each(Element::validate),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{v}"),
            Value::Text(v) => write!(f, "{v}"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Float(v) if *v == 0.0 => write!(f, "0"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// A metadata entry attached to a `MathElement`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MetaValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

pub type Metadata = BTreeMap<String, MetaValue>;

/// A value together with descriptive metadata.
///
/// Metadata is part of the element's identity: the same value annotated differently is a
/// different element.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MathElement<V> {
    value: V,
    #[serde(default)]
    metadata: Metadata,
}

impl<V: Element> MathElement<V> {
    pub fn new(value: V) -> Self {
        Self {
            value,
            metadata: Metadata::new(),
        }
    }

    pub fn with_metadata(value: V, metadata: Metadata) -> Result<Self> {
        let element = Self { value, metadata };
        element.validate()?;
        Ok(element)
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn into_value(self) -> V {
        self.value
    }
}

impl<V: Element> Element for MathElement<V> {
    fn validate(&self) -> Result<()> {
        if self.metadata.keys().any(|k| k.is_empty()) {
            return Err(MathError::validation(self, "metadata keys must be non-empty"));
        }
        self.value.validate()
    }
}

impl<V: fmt::Display> fmt::Display for MathElement<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

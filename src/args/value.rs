//! Slot values: the tagged sum type stored in argument containers.
//!
//! Every storable value is one variant of [`Value`]. Equality is structural:
//! sequences compare element-by-element, maps key-by-key and records
//! field-by-field. [`Value::Wildcard`] is the pattern-only sentinel; it is a
//! distinct variant so it can never alias a domain value.

#![allow(missing_docs)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// One slot of an argument container.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Nil,
    /// Pattern sentinel that matches any value in the same position.
    Wildcard,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
    Str(String),
    Bytes(Vec<u8>),
    Strings(Vec<String>),
    List(Vec<Value>),
    /// Key-ordered mapping; rendering and equality follow key order.
    Map(BTreeMap<String, Value>),
    Record(Record),
    Error(ErrorValue),
    /// Writable output slot shared with the caller.
    Slot(OutSlot),
}

/// Variant tag of a [`Value`], used in diagnostics and type probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Absent,
    Nil,
    Wildcard,
    Bool,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    Str,
    Bytes,
    Strings,
    List,
    Map,
    Record,
    Error,
    Slot,
}

impl ValueKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Nil => "nil",
            Self::Wildcard => "wildcard",
            Self::Bool => "bool",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::Isize => "isize",
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::Usize => "usize",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Str => "string",
            Self::Bytes => "bytes",
            Self::Strings => "strings",
            Self::List => "list",
            Self::Map => "map",
            Self::Record => "record",
            Self::Error => "error",
            Self::Slot => "slot",
        }
    }

    /// True for every integer and floating-point tag.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::I8
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Isize
                | Self::U8
                | Self::U16
                | Self::U32
                | Self::U64
                | Self::Usize
                | Self::F32
                | Self::F64
        )
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named composite with ordered fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub fields: Vec<(String, Value)>,
}

impl Record {
    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }
}

/// Error-shaped value: carries only its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorValue {
    message: String,
}

impl ErrorValue {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ErrorValue {}

/// Shared writable cell used as an inject target.
///
/// Clones alias the same cell, so the caller keeps one handle and passes
/// another through the mock; a write through either is visible to both.
#[derive(Debug, Clone, Default)]
pub struct OutSlot(Rc<RefCell<Value>>);

impl OutSlot {
    #[must_use]
    pub fn new(initial: impl Into<Value>) -> Self {
        Self(Rc::new(RefCell::new(initial.into())))
    }

    /// Snapshot of the current contents.
    #[must_use]
    pub fn get(&self) -> Value {
        self.0.borrow().clone()
    }

    /// Replace the contents, returning the previous value.
    pub fn set(&self, value: impl Into<Value>) -> Value {
        self.0.replace(value.into())
    }

    /// Whether two handles alias the same cell.
    #[must_use]
    pub fn same_cell(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for OutSlot {
    fn eq(&self, other: &Self) -> bool {
        self.same_cell(other) || *self.0.borrow() == *other.0.borrow()
    }
}

impl Value {
    /// Build a sequence value.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a mapping value.
    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }

    /// Build a record value; field order is preserved.
    pub fn record<I, K, V>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Self>,
    {
        Self::Record(Record {
            name: name.into(),
            fields: fields
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        })
    }

    /// Build an error-shaped value.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(ErrorValue::new(message))
    }

    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Nil => ValueKind::Nil,
            Self::Wildcard => ValueKind::Wildcard,
            Self::Bool(_) => ValueKind::Bool,
            Self::I8(_) => ValueKind::I8,
            Self::I16(_) => ValueKind::I16,
            Self::I32(_) => ValueKind::I32,
            Self::I64(_) => ValueKind::I64,
            Self::Isize(_) => ValueKind::Isize,
            Self::U8(_) => ValueKind::U8,
            Self::U16(_) => ValueKind::U16,
            Self::U32(_) => ValueKind::U32,
            Self::U64(_) => ValueKind::U64,
            Self::Usize(_) => ValueKind::Usize,
            Self::F32(_) => ValueKind::F32,
            Self::F64(_) => ValueKind::F64,
            Self::Str(_) => ValueKind::Str,
            Self::Bytes(_) => ValueKind::Bytes,
            Self::Strings(_) => ValueKind::Strings,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
            Self::Record(_) => ValueKind::Record,
            Self::Error(_) => ValueKind::Error,
            Self::Slot(_) => ValueKind::Slot,
        }
    }

    #[must_use]
    pub const fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    #[must_use]
    pub const fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    /// Sequences that variadic normalization flattens into separate slots.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Strings(_) | Self::Bytes(_))
    }

    /// Render with at most `limit` characters; `0` disables truncation.
    #[must_use]
    pub fn render(&self, limit: usize) -> String {
        truncate(self.to_string(), limit)
    }
}

pub(crate) fn truncate(mut text: String, limit: usize) -> String {
    if limit == 0 {
        return text;
    }
    if let Some((cut, _)) = text.char_indices().nth(limit) {
        text.truncate(cut);
        text.push('…');
    }
    text
}

/// Sentinel that matches any value when used inside a pattern.
#[must_use]
pub const fn any() -> Value {
    Value::Wildcard
}

fn write_joined<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
) -> fmt::Result {
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nil => f.write_str("<nil>"),
            Self::Wildcard => f.write_str("<any>"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Isize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Bytes(v) => {
                f.write_str("[")?;
                write_joined(f, v)?;
                f.write_str("]")
            }
            Self::Strings(v) => {
                f.write_str("[")?;
                write_joined(f, v)?;
                f.write_str("]")
            }
            Self::List(v) => {
                f.write_str("[")?;
                write_joined(f, v)?;
                f.write_str("]")
            }
            Self::Map(v) => {
                f.write_str("map[")?;
                write_joined(f, v.iter().map(|(key, value)| format!("{key}:{value}")))?;
                f.write_str("]")
            }
            Self::Record(record) => {
                f.write_str("{")?;
                write_joined(f, record.fields.iter().map(|(_, value)| value))?;
                f.write_str("}")
            }
            Self::Error(err) => write!(f, "{err}"),
            Self::Slot(slot) => write!(f, "&{}", slot.get()),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

value_from! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    String => Str,
    Vec<u8> => Bytes,
    Vec<String> => Strings,
    Vec<Value> => List,
    BTreeMap<String, Value> => Map,
    Record => Record,
    ErrorValue => Error,
    OutSlot => Slot,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Self::Str(value.clone())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Self::Strings(value.into_iter().map(str::to_string).collect())
    }
}

impl From<&OutSlot> for Value {
    fn from(value: &OutSlot) -> Self {
        Self::Slot(value.clone())
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Nil, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> Value {
        Value::record("obj", [
            ("a", Value::from("goodbye")),
            ("b", Value::from(17)),
            ("c", Value::from(false)),
        ])
    }

    #[test]
    fn renders_scalars_like_plain_formatting() {
        assert_eq!(Value::from(5).to_string(), "5");
        assert_eq!(Value::from("hello").to_string(), "hello");
        assert_eq!(Value::from(1.256).to_string(), "1.256");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(-71215.235_468_73).to_string(), "-71215.23546873");
        assert_eq!(Value::Nil.to_string(), "<nil>");
    }

    #[test]
    fn renders_composites_in_field_order() {
        assert_eq!(sample_record().to_string(), "{goodbye 17 false}");
        assert_eq!(Value::list([7, 8, 9]).to_string(), "[7 8 9]");
        let map = Value::map([("z", 12), ("x", 10), ("y", 11)]);
        assert_eq!(map.to_string(), "map[x:10 y:11 z:12]");
        assert_eq!(Value::from(b"hi".to_vec()).to_string(), "[104 105]");
        assert_eq!(Value::from(vec!["a", "b"]).to_string(), "[a b]");
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(sample_record(), sample_record());
        assert_eq!(Value::list([1, 2]), Value::list([1, 2]));
        assert_ne!(Value::list([1, 2]), Value::list([2, 1]));
        assert_eq!(
            Value::map([("k", Value::list([1]))]),
            Value::map([("k", Value::list([1]))])
        );
        assert_ne!(Value::from(1_i32), Value::from(1_i64));
    }

    #[test]
    fn wildcard_is_distinct_from_nil_and_domain_values() {
        assert_ne!(any(), Value::Nil);
        assert_ne!(any(), Value::from(""));
        assert_ne!(Value::from(0), any());
        assert!(any().is_wildcard());
    }

    #[test]
    fn default_value_is_nil() {
        assert_eq!(Value::default(), Value::Nil);
        assert!(Value::default().is_nil());
    }

    #[test]
    fn out_slot_clones_share_one_cell() {
        let slot = OutSlot::new("");
        let alias = slot.clone();
        alias.set("written");
        assert_eq!(slot.get(), Value::from("written"));
        assert!(slot.same_cell(&alias));
    }

    #[test]
    fn out_slot_equality_falls_back_to_contents() {
        let left = OutSlot::new(3);
        let right = OutSlot::new(3);
        assert_eq!(left, right);
        right.set(4);
        assert_ne!(left, right);
    }

    #[test]
    fn render_truncates_on_char_boundary() {
        let value = Value::from("héllo world");
        assert_eq!(value.render(0), "héllo world");
        assert_eq!(value.render(3), "hél…");
        assert_eq!(value.render(100), "héllo world");
    }

    #[test]
    fn option_maps_none_to_nil() {
        assert_eq!(Value::from(None::<i32>), Value::Nil);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}

//! JSON value types.
//!
//! This module defines the [`Value`] enum, the tree produced by
//! [`TextReader::read`](crate::TextReader::read).
//!
use alloc::{
    collections::{BTreeMap, btree_map},
    string::String,
    vec,
    vec::Vec,
};

/// Object entries, keyed by property name.
pub type Map = BTreeMap<String, Value>;
/// Array elements in document order.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259], extended with the non-finite
/// numbers `NaN`, `Infinity` and `-Infinity`.
///
/// The `Value` enum can represent any JSON data type:
///
/// - Null
/// - Boolean
/// - Number
/// - String
/// - Array
/// - Object
///
/// # Examples
///
/// ```
/// use jsonreader::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// let v = Value::Object(map);
/// assert_eq!(v.get("key").and_then(Value::as_str), Some("value"));
/// ```
///
/// Cloning, comparing and dropping walk nested containers with an explicit
/// stack, so trees of any depth never exhaust the call stack.
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(any(test, feature = "serde"), serde(untagged))]
#[derive(Debug, Default)]
pub enum Value {
    /// `null`
    #[default]
    Null,
    /// `true` or `false`
    Boolean(bool),
    /// Any number, including the non-finite extensions.
    Number(f64),
    /// An unescaped string.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// A mapping from property name to value. Later duplicates overwrite
    /// earlier ones.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonreader::Value;
    ///
    /// assert!(Value::Null.is_null());
    /// assert!(!Value::Boolean(false).is_null());
    /// ```
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Value::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Returns the boolean if the value is a [`Boolean`].
    ///
    /// [`Boolean`]: Value::Boolean
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number if the value is a [`Number`].
    ///
    /// [`Number`]: Value::Number
    ///
    /// ```
    /// use jsonreader::Value;
    ///
    /// assert_eq!(Value::Number(1.5).as_f64(), Some(1.5));
    /// assert_eq!(Value::Null.as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice if the value is a [`String`].
    ///
    /// [`String`]: Value::String
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements if the value is an [`Array`].
    ///
    /// [`Array`]: Value::Array
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if the value is an [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` if the value is an [`Object`].
    ///
    /// [`Object`]: Value::Object
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// A container being copied by [`Value::clone`], with the source children
/// still to visit.
enum CloneFrame<'a> {
    Array(core::slice::Iter<'a, Value>, Array),
    Object(btree_map::Iter<'a, String, Value>, Map, Option<String>),
}

impl<'a> CloneFrame<'a> {
    fn next_source(&mut self) -> Option<&'a Value> {
        match self {
            Self::Array(source, _) => source.next(),
            Self::Object(source, _, pending_key) => source.next().map(|(key, value)| {
                *pending_key = Some(key.clone());
                value
            }),
        }
    }

    fn attach(&mut self, value: Value) {
        match self {
            Self::Array(_, items) => items.push(value),
            Self::Object(_, entries, pending_key) => {
                if let Some(key) = pending_key.take() {
                    entries.insert(key, value);
                }
            }
        }
    }

    fn finish(self) -> Value {
        match self {
            Self::Array(_, items) => Value::Array(items),
            Self::Object(_, entries, _) => Value::Object(entries),
        }
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        let mut frames: Vec<CloneFrame<'_>> = Vec::new();
        let mut source = self;
        loop {
            let mut finished = match source {
                Self::Null => Some(Self::Null),
                Self::Boolean(b) => Some(Self::Boolean(*b)),
                Self::Number(n) => Some(Self::Number(*n)),
                Self::String(s) => Some(Self::String(s.clone())),
                Self::Array(items) => {
                    frames.push(CloneFrame::Array(
                        items.iter(),
                        Array::with_capacity(items.len()),
                    ));
                    None
                }
                Self::Object(map) => {
                    frames.push(CloneFrame::Object(map.iter(), Map::new(), None));
                    None
                }
            };

            // Hand finished copies to their parents until some container has
            // another child to visit.
            loop {
                let Some(frame) = frames.last_mut() else {
                    // The root is always finished once no frame is left.
                    return finished.unwrap_or_default();
                };
                if let Some(value) = finished.take() {
                    frame.attach(value);
                }
                if let Some(next) = frame.next_source() {
                    source = next;
                    break;
                }
                finished = frames.pop().map(CloneFrame::finish);
            }
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::float_cmp)]
    fn eq(&self, other: &Self) -> bool {
        let mut pending: Vec<(&Value, &Value)> = vec![(self, other)];
        while let Some(pair) = pending.pop() {
            match pair {
                (Self::Null, Self::Null) => {}
                (Self::Boolean(a), Self::Boolean(b)) if a == b => {}
                (Self::Number(a), Self::Number(b)) if a == b => {}
                (Self::String(a), Self::String(b)) if a == b => {}
                (Self::Array(a), Self::Array(b)) if a.len() == b.len() => {
                    pending.extend(a.iter().zip(b));
                }
                (Self::Object(a), Self::Object(b)) if a.len() == b.len() => {
                    for ((key_a, a), (key_b, b)) in a.iter().zip(b) {
                        if key_a != key_b {
                            return false;
                        }
                        pending.push((a, b));
                    }
                }
                _ => return false,
            }
        }
        true
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending: Vec<Value> = match self {
            Self::Array(items) if !items.is_empty() => core::mem::take(items),
            Self::Object(map) if !map.is_empty() => core::mem::take(map).into_values().collect(),
            _ => return,
        };

        // Each popped value is emptied before it drops, so the nested drop
        // returns immediately.
        while let Some(mut value) = pending.pop() {
            match &mut value {
                Self::Array(items) => pending.append(items),
                Self::Object(map) => pending.extend(core::mem::take(map).into_values()),
                _ => {}
            }
        }
    }
}

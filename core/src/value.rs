//! Runtime value types.
//!
//! A `RntmValue` tree is the only data the interpreter ever sees. It is
//! produced by validating untrusted render arguments and is immutable once
//! built: there is no mutation API, and composite nodes are reference-counted
//! so shared substructure is stored once and can be read from any thread.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

/// A sanitized runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum RntmValue {
    /// Null value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Double precision number.
    Number(f64),
    /// UTF-8 string.
    String(String),
    /// Ordered list of values.
    Array(RntmArray),
    /// Ordered name -> value mapping.
    Object(RntmObject),
}

/// Immutable ordered sequence of values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RntmArray(Arc<[RntmValue]>);

impl RntmArray {
    pub fn new(values: Vec<RntmValue>) -> Self {
        Self(values.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RntmValue> {
        self.0.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RntmValue> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[RntmValue] {
        &self.0
    }

    /// True if both handles point at the same stored sequence.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<RntmValue> for RntmArray {
    fn from_iter<I: IntoIterator<Item = RntmValue>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Immutable mapping with unique keys, in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RntmObject(Arc<IndexMap<String, RntmValue>>);

impl RntmObject {
    pub fn new(props: IndexMap<String, RntmValue>) -> Self {
        Self(Arc::new(props))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&RntmValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, RntmValue> {
        self.0.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, RntmValue> {
        self.0.keys()
    }

    /// True if both handles point at the same stored mapping.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<(String, RntmValue)> for RntmObject {
    fn from_iter<I: IntoIterator<Item = (String, RntmValue)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RntmValue {
    /// Returns true if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, RntmValue::Null)
    }

    /// Returns true if this is an array or an object.
    pub fn is_composite(&self) -> bool {
        matches!(self, RntmValue::Array(_) | RntmValue::Object(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RntmValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            RntmValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RntmValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&RntmArray> {
        match self {
            RntmValue::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&RntmObject> {
        match self {
            RntmValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            RntmValue::Null => "null",
            RntmValue::Bool(_) => "boolean",
            RntmValue::Number(_) => "number",
            RntmValue::String(_) => "string",
            RntmValue::Array(_) => "array",
            RntmValue::Object(_) => "object",
        }
    }
}

/// Textual form of a number, matching how template hosts print numbers:
/// integral values have no fraction, non-finite values are spelled out, and
/// very large or very small magnitudes switch to exponent notation.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        // Covers negative zero.
        return "0".to_string();
    }

    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return n.to_string();
    }

    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

impl fmt::Display for RntmValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RntmValue::Null => write!(f, "null"),
            RntmValue::Bool(b) => write!(f, "{}", b),
            RntmValue::Number(n) => f.write_str(&format_number(*n)),
            RntmValue::String(s) => f.write_str(s),
            RntmValue::Array(items) => write!(f, "{}", items),
            RntmValue::Object(props) => write!(f, "{}", props),
        }
    }
}

impl fmt::Display for RntmArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

impl fmt::Display for RntmObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", key, value)?;
        }
        write!(f, " }}")
    }
}

// Convenient From implementations
impl From<bool> for RntmValue {
    fn from(b: bool) -> Self {
        RntmValue::Bool(b)
    }
}

impl From<f64> for RntmValue {
    fn from(n: f64) -> Self {
        RntmValue::Number(n)
    }
}

impl From<i32> for RntmValue {
    fn from(n: i32) -> Self {
        RntmValue::Number(n as f64)
    }
}

impl From<String> for RntmValue {
    fn from(s: String) -> Self {
        RntmValue::String(s)
    }
}

impl From<&str> for RntmValue {
    fn from(s: &str) -> Self {
        RntmValue::String(s.to_string())
    }
}

impl From<RntmArray> for RntmValue {
    fn from(a: RntmArray) -> Self {
        RntmValue::Array(a)
    }
}

impl From<RntmObject> for RntmValue {
    fn from(o: RntmObject) -> Self {
        RntmValue::Object(o)
    }
}

impl From<Vec<RntmValue>> for RntmValue {
    fn from(values: Vec<RntmValue>) -> Self {
        RntmValue::Array(RntmArray::new(values))
    }
}

/// Top-level variables available to one render call.
pub type RntmVars = IndexMap<String, RntmValue>;

/// Helper macro to create variable maps.
#[macro_export]
macro_rules! rntm_vars {
    () => {
        $crate::RntmVars::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let mut vars = $crate::RntmVars::new();
            $(
                vars.insert($key.to_string(), $crate::RntmValue::from($value));
            )+
            vars
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_display() {
        assert_eq!(RntmValue::Null.to_string(), "null");
        assert_eq!(RntmValue::Bool(true).to_string(), "true");
        assert_eq!(RntmValue::from("a<b").to_string(), "a<b");
        assert_eq!(RntmValue::from(42).to_string(), "42");
    }

    #[test]
    fn test_array_display() {
        let v = RntmValue::from(vec![1.into(), "a".into(), RntmValue::Null]);
        assert_eq!(v.to_string(), "[1, a, null]");
        assert_eq!(RntmValue::from(Vec::new()).to_string(), "[]");
    }

    #[test]
    fn test_object_display_keeps_insertion_order() {
        let obj: RntmObject = [
            ("z".to_string(), RntmValue::from(1)),
            ("a".to_string(), RntmValue::from(vec![true.into(), false.into()])),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            RntmValue::Object(obj).to_string(),
            "{ z: 1, a: [true, false] }"
        );
        assert_eq!(RntmValue::Object(RntmObject::default()).to_string(), "{  }");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1.0), "1");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::INFINITY), "Infinity");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e-7), "1.5e-7");
        assert_eq!(format_number(123456789.0), "123456789");
    }

    #[test]
    fn test_accessors() {
        assert_eq!(RntmValue::Bool(true).as_bool(), Some(true));
        assert_eq!(RntmValue::from(3.5).as_number(), Some(3.5));
        assert_eq!(RntmValue::from("x").as_str(), Some("x"));
        assert!(RntmValue::from(vec![]).is_composite());
        assert!(RntmValue::Null.is_null());
        assert_eq!(RntmValue::Null.type_name(), "null");
    }

    #[test]
    fn test_rntm_vars_macro() {
        let empty: RntmVars = rntm_vars!();
        assert!(empty.is_empty());

        let vars = rntm_vars! {
            "name" => "Alice",
            "age" => 30,
            "admin" => true,
        };
        assert_eq!(vars.get("name"), Some(&RntmValue::from("Alice")));
        assert_eq!(vars.get("age"), Some(&RntmValue::Number(30.0)));
        assert_eq!(vars.keys().collect::<Vec<_>>(), vec!["name", "age", "admin"]);
    }
}

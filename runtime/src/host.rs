//! Host values: the untrusted render-argument graph.
//!
//! Callers hand the renderer arbitrary data. Arrays and objects are shared,
//! interior-mutable handles, so a host graph can alias substructure or even
//! contain itself, and objects can carry accessor properties or belong to a
//! class other than the plain object. None of that reaches the interpreter:
//! [`crate::convert`] validates the graph and produces a `RntmValue` tree.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use htl_core::format_number;
use indexmap::IndexMap;

use crate::MAX_NESTING_DEPTH;

/// A value supplied by the caller of `render`.
#[derive(Debug, Clone)]
pub enum HostValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    BigInt(i128),
    /// A symbol with its description.
    Symbol(String),
    /// A callable, identified by name.
    Function(String),
    Array(HostArray),
    Object(HostObject),
}

impl HostValue {
    /// Runtime type name used in diagnostics. Class instances report their
    /// class name.
    pub fn type_name(&self) -> String {
        match self {
            HostValue::Undefined => "undefined".to_string(),
            HostValue::Null => "null".to_string(),
            HostValue::Bool(_) => "boolean".to_string(),
            HostValue::Number(_) => "number".to_string(),
            HostValue::String(_) => "string".to_string(),
            HostValue::BigInt(_) => "bigint".to_string(),
            HostValue::Symbol(_) => "symbol".to_string(),
            HostValue::Function(_) => "function".to_string(),
            HostValue::Array(_) => "array".to_string(),
            HostValue::Object(obj) => match obj.class() {
                ObjectClass::Plain => "object".to_string(),
                ObjectClass::Instance(name) => name,
            },
        }
    }

    /// Human-readable rendering for error messages. Cycles print as
    /// `[Circular]`, containers nested deeper than [`MAX_NESTING_DEPTH`] as
    /// `[...]` or `{...}`, and containers that are currently mutably borrowed
    /// as `<uninspectable>`.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        describe_into(&mut out, self, &mut Vec::new());
        out
    }
}

fn describe_into(out: &mut String, value: &HostValue, stack: &mut Vec<usize>) {
    match value {
        HostValue::Undefined => out.push_str("undefined"),
        HostValue::Null => out.push_str("null"),
        HostValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        HostValue::Number(n) => out.push_str(&format_number(*n)),
        HostValue::String(s) => out.push_str(&format!("{:?}", s)),
        HostValue::BigInt(i) => out.push_str(&format!("{}n", i)),
        HostValue::Symbol(desc) => out.push_str(&format!("Symbol({})", desc)),
        HostValue::Function(name) => out.push_str(&format!("[Function: {}]", name)),
        HostValue::Array(array) => {
            let id = array.id();
            if stack.contains(&id) {
                out.push_str("[Circular]");
                return;
            }
            if stack.len() >= MAX_NESTING_DEPTH {
                out.push_str("[...]");
                return;
            }
            let Ok(items) = array.0.try_borrow() else {
                out.push_str("<uninspectable>");
                return;
            };
            stack.push(id);
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                describe_into(out, item, stack);
            }
            out.push(']');
            stack.pop();
        }
        HostValue::Object(object) => {
            let id = object.id();
            if stack.contains(&id) {
                out.push_str("[Circular]");
                return;
            }
            if stack.len() >= MAX_NESTING_DEPTH {
                out.push_str("{...}");
                return;
            }
            let Ok(data) = object.0.try_borrow() else {
                out.push_str("<uninspectable>");
                return;
            };
            stack.push(id);
            if let ObjectClass::Instance(name) = &data.class {
                out.push_str(name);
                out.push(' ');
            }
            out.push('{');
            for (i, (key, prop)) in data.props.iter().enumerate() {
                out.push_str(if i > 0 { ", " } else { " " });
                out.push_str(&key.to_string());
                out.push_str(": ");
                match prop {
                    Property::Data(v) => describe_into(out, v, stack),
                    Property::Accessor => out.push_str("[Getter/Setter]"),
                }
            }
            out.push_str(if data.props.is_empty() { "}" } else { " }" });
            stack.pop();
        }
    }
}

impl fmt::Display for HostValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Shared, mutable list handle. Clones alias the same list.
#[derive(Clone, Default)]
pub struct HostArray(Rc<RefCell<Vec<HostValue>>>);

impl HostArray {
    pub fn new(items: Vec<HostValue>) -> Self {
        Self(Rc::new(RefCell::new(items)))
    }

    pub fn push(&self, value: impl Into<HostValue>) {
        self.0.borrow_mut().push(value.into());
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    pub fn borrow(&self) -> Ref<'_, Vec<HostValue>> {
        self.0.borrow()
    }

    /// Mutable access. Holding the guard makes the array uninspectable.
    pub fn borrow_mut(&self) -> RefMut<'_, Vec<HostValue>> {
        self.0.borrow_mut()
    }

    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, Vec<HostValue>>> {
        self.0.try_borrow().ok()
    }

    /// Identity of the underlying list.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for HostArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostArray({})", HostValue::Array(self.clone()).describe())
    }
}

/// The class an object belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectClass {
    /// A bare key/value mapping with no behaviour of its own.
    Plain,
    /// An instance of a named class (`Date`, `Map`, a user class, ...). Such
    /// objects may inherit or compute properties.
    Instance(String),
}

/// Property key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    Name(String),
    Symbol(String),
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Name(name) => f.write_str(name),
            PropertyKey::Symbol(desc) => write!(f, "[Symbol({})]", desc),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Name(name)
    }
}

/// A property slot.
#[derive(Debug, Clone)]
pub enum Property {
    /// A stored value.
    Data(HostValue),
    /// A computed getter/setter pair.
    Accessor,
}

#[derive(Debug)]
pub(crate) struct ObjectData {
    pub(crate) class: ObjectClass,
    pub(crate) props: IndexMap<PropertyKey, Property>,
}

/// Shared, mutable object handle. Clones alias the same object.
#[derive(Clone)]
pub struct HostObject(Rc<RefCell<ObjectData>>);

impl HostObject {
    /// An empty plain object.
    pub fn plain() -> Self {
        Self::with_class(ObjectClass::Plain)
    }

    /// An empty instance of `class`.
    pub fn instance(class: impl Into<String>) -> Self {
        Self::with_class(ObjectClass::Instance(class.into()))
    }

    fn with_class(class: ObjectClass) -> Self {
        Self(Rc::new(RefCell::new(ObjectData {
            class,
            props: IndexMap::new(),
        })))
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(self, key: impl Into<PropertyKey>, value: impl Into<HostValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Set a data property, keeping the original position of existing keys.
    pub fn insert(&self, key: impl Into<PropertyKey>, value: impl Into<HostValue>) {
        self.0
            .borrow_mut()
            .props
            .insert(key.into(), Property::Data(value.into()));
    }

    /// Define a computed (getter/setter) property.
    pub fn define_accessor(&self, key: impl Into<PropertyKey>) {
        self.0
            .borrow_mut()
            .props
            .insert(key.into(), Property::Accessor);
    }

    pub fn class(&self) -> ObjectClass {
        self.0.borrow().class.clone()
    }

    pub fn is_plain(&self) -> bool {
        self.0.borrow().class == ObjectClass::Plain
    }

    pub fn len(&self) -> usize {
        self.0.borrow().props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.borrow().props.is_empty()
    }

    /// Data value stored under `name`, if any.
    pub fn get(&self, name: &str) -> Option<HostValue> {
        match self.0.borrow().props.get(&PropertyKey::from(name)) {
            Some(Property::Data(v)) => Some(v.clone()),
            _ => None,
        }
    }

    /// Hold this guard to simulate the object being mutated elsewhere; the
    /// object is uninspectable while it is alive.
    pub fn lock(&self) -> RefMut<'_, impl Sized> {
        self.0.borrow_mut()
    }

    pub(crate) fn try_borrow(&self) -> Option<Ref<'_, ObjectData>> {
        self.0.try_borrow().ok()
    }

    /// Identity of the underlying object.
    pub fn id(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for HostObject {
    fn default() -> Self {
        Self::plain()
    }
}

impl fmt::Debug for HostObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HostObject({})", HostValue::Object(self.clone()).describe())
    }
}

// Convenient From implementations
impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Bool(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<i32> for HostValue {
    fn from(n: i32) -> Self {
        HostValue::Number(n as f64)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Number(n as f64)
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_string())
    }
}

impl From<Vec<HostValue>> for HostValue {
    fn from(items: Vec<HostValue>) -> Self {
        HostValue::Array(HostArray::new(items))
    }
}

impl From<HostArray> for HostValue {
    fn from(array: HostArray) -> Self {
        HostValue::Array(array)
    }
}

impl From<HostObject> for HostValue {
    fn from(object: HostObject) -> Self {
        HostValue::Object(object)
    }
}

impl<T: Into<HostValue>> From<Option<T>> for HostValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(HostValue::Null, Into::into)
    }
}

impl From<serde_json::Value> for HostValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value as Json;
        match value {
            Json::Null => HostValue::Null,
            Json::Bool(b) => HostValue::Bool(b),
            Json::Number(n) => HostValue::Number(n.as_f64().unwrap_or(f64::NAN)),
            Json::String(s) => HostValue::String(s),
            Json::Array(items) => items.into_iter().map(HostValue::from).collect::<Vec<_>>().into(),
            Json::Object(map) => {
                let object = HostObject::plain();
                for (key, value) in map {
                    object.insert(key, HostValue::from(value));
                }
                HostValue::Object(object)
            }
        }
    }
}

/// Build a plain top-level argument object.
#[macro_export]
macro_rules! host_args {
    () => {
        $crate::HostValue::Object($crate::HostObject::plain())
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        {
            let object = $crate::HostObject::plain();
            $(
                object.insert($key, $crate::HostValue::from($value));
            )+
            $crate::HostValue::Object(object)
        }
    };
}

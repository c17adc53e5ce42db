//! Validation and conversion of render arguments.
//!
//! Cycle detection is identity based. A composite is "on the stack" while its
//! children are being converted; meeting it again in that window is a cycle.
//! Once finished, its converted value is remembered by identity, so a value
//! that is merely shared between several properties is converted once and
//! shared in the resulting tree instead of being rejected.
//!
//! Nesting is capped at [`MAX_NESTING_DEPTH`] composites, counting shared
//! values at every place they appear, so the resulting tree can always be
//! stringified without exhausting the stack.

use std::collections::{HashMap, HashSet};

use htl_core::{RntmArray, RntmObject, RntmValue, RntmVars};
use indexmap::IndexMap;

use crate::host::{HostValue, ObjectClass, Property, PropertyKey};
use crate::{RenderError, RenderResult};

const PLAIN_OBJECT_NOTE: &str = "Objects must be plain, stable data.";

/// Name used in diagnostics for the top-level argument object itself.
const ARGUMENTS_KEY: &str = "arguments";

/// Deepest nesting of arrays and objects accepted in render arguments.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Validate `args` and convert them into runtime variables for `file`.
pub fn convert(args: &HostValue, file: &str) -> RenderResult<RntmVars> {
    RntmValueConverter::new(file).convert_args(args)
}

/// A converted value and the nesting height of its composites (0 for
/// primitives).
type Converted = (RntmValue, usize);

/// One conversion of one argument bag. The visited state is discarded with it.
pub struct RntmValueConverter<'f> {
    file: &'f str,
    depth: usize,
    on_stack: HashSet<usize>,
    converted: HashMap<usize, Converted>,
}

impl<'f> RntmValueConverter<'f> {
    pub fn new(file: &'f str) -> Self {
        Self {
            file,
            depth: 0,
            on_stack: HashSet::new(),
            converted: HashMap::new(),
        }
    }

    /// Convert the top-level argument object into variables.
    pub fn convert_args(mut self, args: &HostValue) -> RenderResult<RntmVars> {
        let HostValue::Object(object) = args else {
            return Err(RenderError::invalid_arguments(self.file, args.describe()));
        };
        let Some(data) = object.try_borrow() else {
            return Err(RenderError::uninspectable_argument(
                self.file,
                ARGUMENTS_KEY,
            ));
        };
        if data.class != ObjectClass::Plain {
            return Err(RenderError::invalid_arguments(self.file, args.describe()));
        }

        self.on_stack.insert(object.id());

        let mut vars = RntmVars::with_capacity(data.props.len());
        for (key, prop) in &data.props {
            let name = self.property_name(key)?;
            let (value, _) = self.property_value(name, prop)?;
            vars.insert(name.to_string(), value);
        }
        Ok(vars)
    }

    fn property_name<'k>(&self, key: &'k PropertyKey) -> RenderResult<&'k str> {
        match key {
            PropertyKey::Name(name) => Ok(name),
            PropertyKey::Symbol(_) => Err(RenderError::invalid_argument_type(
                self.file,
                key.to_string(),
            )),
        }
    }

    fn property_value(&mut self, key: &str, prop: &Property) -> RenderResult<Converted> {
        match prop {
            Property::Data(value) => self.convert_value(key, value),
            Property::Accessor => Err(RenderError::accessor_property(self.file, key)),
        }
    }

    /// `key` is the nearest enclosing property name, used for diagnostics.
    fn convert_value(&mut self, key: &str, value: &HostValue) -> RenderResult<Converted> {
        match value {
            HostValue::Null => Ok((RntmValue::Null, 0)),
            HostValue::Bool(b) => Ok((RntmValue::Bool(*b), 0)),
            HostValue::Number(n) => Ok((RntmValue::Number(*n), 0)),
            HostValue::String(s) => Ok((RntmValue::String(s.clone()), 0)),
            HostValue::Array(array) => {
                let id = array.id();
                if let Some(done) = self.enter(key, id)? {
                    return Ok(done);
                }
                let items = array
                    .try_borrow()
                    .ok_or_else(|| RenderError::uninspectable_argument(self.file, key))?;
                let mut height = 0;
                let mut values = Vec::with_capacity(items.len());
                for item in items.iter() {
                    let (value, h) = self.convert_value(key, item)?;
                    height = height.max(h);
                    values.push(value);
                }
                let converted = RntmValue::Array(RntmArray::new(values));
                Ok(self.leave(id, converted, height + 1))
            }
            HostValue::Object(object) => {
                let id = object.id();
                if let Some(done) = self.enter(key, id)? {
                    return Ok(done);
                }
                let data = object
                    .try_borrow()
                    .ok_or_else(|| RenderError::uninspectable_argument(self.file, key))?;
                if let ObjectClass::Instance(class) = &data.class {
                    return Err(
                        RenderError::invalid_argument_value(self.file, key, class.as_str())
                            .with_note(PLAIN_OBJECT_NOTE),
                    );
                }
                let mut height = 0;
                let mut props = IndexMap::with_capacity(data.props.len());
                for (prop_key, prop) in &data.props {
                    let name = self.property_name(prop_key)?;
                    let (value, h) = self.property_value(name, prop)?;
                    height = height.max(h);
                    props.insert(name.to_string(), value);
                }
                let converted = RntmValue::Object(RntmObject::new(props));
                Ok(self.leave(id, converted, height + 1))
            }
            HostValue::Undefined
            | HostValue::BigInt(_)
            | HostValue::Symbol(_)
            | HostValue::Function(_) => Err(RenderError::invalid_argument_value(
                self.file,
                key,
                value.type_name(),
            )),
        }
    }

    /// Returns the finished conversion if `id` was already converted, fails if
    /// `id` is still being converted or would nest too deep, otherwise marks
    /// it on the stack one level down.
    fn enter(&mut self, key: &str, id: usize) -> RenderResult<Option<Converted>> {
        let depth = self.depth + 1;
        if let Some((done, height)) = self.converted.get(&id) {
            if depth + height - 1 > MAX_NESTING_DEPTH {
                return Err(RenderError::nesting_too_deep(
                    self.file,
                    key,
                    MAX_NESTING_DEPTH,
                ));
            }
            return Ok(Some((done.clone(), *height)));
        }
        if !self.on_stack.insert(id) {
            return Err(RenderError::cyclic_reference(self.file));
        }
        if depth > MAX_NESTING_DEPTH {
            return Err(RenderError::nesting_too_deep(
                self.file,
                key,
                MAX_NESTING_DEPTH,
            ));
        }
        self.depth = depth;
        Ok(None)
    }

    fn leave(&mut self, id: usize, value: RntmValue, height: usize) -> Converted {
        self.depth -= 1;
        self.on_stack.remove(&id);
        self.converted.insert(id, (value.clone(), height));
        (value, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostArray, HostObject};
    use crate::host_args;

    const FILE: &str = "t.html";

    #[test]
    fn test_primitives_pass_through() {
        let args = host_args! {
            "n" => HostValue::Null,
            "b" => true,
            "x" => 1.5,
            "s" => "<s>",
        };
        let vars = convert(&args, FILE).unwrap();
        assert_eq!(vars["n"], RntmValue::Null);
        assert_eq!(vars["b"], RntmValue::Bool(true));
        assert_eq!(vars["x"], RntmValue::Number(1.5));
        assert_eq!(vars["s"], RntmValue::from("<s>"));
    }

    #[test]
    fn test_nested_order_preserved() {
        let inner = HostObject::plain().with("z", 1).with("a", 2);
        let args = host_args! {
            "list" => vec![HostValue::from(3), inner.into(), HostValue::from("x")],
        };
        let vars = convert(&args, FILE).unwrap();
        assert_eq!(vars["list"].to_string(), "[3, { z: 1, a: 2 }, x]");
    }

    #[test]
    fn test_top_level_must_be_plain_object() {
        for args in [
            HostValue::Null,
            HostValue::from("x"),
            HostValue::from(vec![]),
            HostValue::from(HostObject::instance("Map")),
        ] {
            let err = convert(&args, FILE).unwrap_err();
            assert!(
                matches!(err, RenderError::InvalidArguments { .. }),
                "{:?} gave {:?}",
                args,
                err
            );
        }
    }

    #[test]
    fn test_payload_is_named() {
        let err = convert(&HostValue::from(vec![HostValue::from(1)]), FILE).unwrap_err();
        assert_eq!(err, RenderError::invalid_arguments(FILE, "[1]"));
    }

    #[test]
    fn test_accessor_rejected() {
        let obj = HostObject::plain().with("ok", 1);
        obj.define_accessor("total");
        let err = convert(&HostValue::from(obj), FILE).unwrap_err();
        assert!(matches!(err, RenderError::InvalidArgument { ref key, .. } if key == "total"));
    }

    #[test]
    fn test_nested_accessor_rejected() {
        let inner = HostObject::plain();
        inner.define_accessor("secret");
        let args = host_args! { "user" => inner };
        let err = convert(&args, FILE).unwrap_err();
        assert!(matches!(err, RenderError::InvalidArgument { ref key, .. } if key == "secret"));
    }

    #[test]
    fn test_symbol_key_rejected() {
        let obj = HostObject::plain().with(PropertyKey::Symbol("id".into()), 1);
        let err = convert(&HostValue::from(obj), FILE).unwrap_err();
        assert_eq!(
            err,
            RenderError::invalid_argument_type(FILE, "[Symbol(id)]")
        );
    }

    #[test]
    fn test_invalid_value_types() {
        let cases = [
            (HostValue::Undefined, "undefined"),
            (HostValue::Function("onClick".into()), "function"),
            (HostValue::Symbol("s".into()), "symbol"),
            (HostValue::BigInt(10), "bigint"),
        ];
        for (value, type_name) in cases {
            let args = host_args! { "bad" => value };
            let err = convert(&args, FILE).unwrap_err();
            assert_eq!(err, RenderError::invalid_argument_value(FILE, "bad", type_name));
        }
    }

    #[test]
    fn test_class_instance_rejected_with_note() {
        let args = host_args! { "when" => HostObject::instance("Date") };
        let err = convert(&args, FILE).unwrap_err();
        assert_eq!(
            err,
            RenderError::invalid_argument_value(FILE, "when", "Date").with_note(PLAIN_OBJECT_NOTE)
        );
    }

    #[test]
    fn test_array_element_error_names_property() {
        let args = host_args! {
            "items" => vec![HostValue::from(1), HostValue::Undefined],
        };
        let err = convert(&args, FILE).unwrap_err();
        assert_eq!(err, RenderError::invalid_argument_value(FILE, "items", "undefined"));
    }

    #[test]
    fn test_self_referencing_object_is_cyclic() {
        let node = HostObject::plain().with("name", "a");
        node.insert("next", node.clone());
        let args = host_args! { "node" => node };
        assert_eq!(
            convert(&args, FILE).unwrap_err(),
            RenderError::cyclic_reference(FILE)
        );
    }

    #[test]
    fn test_cycle_through_array_is_cyclic() {
        let obj = HostObject::plain();
        let list = HostArray::new(vec![HostValue::from(1)]);
        list.push(obj.clone());
        obj.insert("children", list.clone());
        let args = host_args! { "root" => obj };
        assert!(matches!(
            convert(&args, FILE),
            Err(RenderError::CyclicReference { .. })
        ));
    }

    #[test]
    fn test_argument_bag_containing_itself_is_cyclic() {
        let args = HostObject::plain();
        args.insert("me", args.clone());
        assert!(matches!(
            convert(&HostValue::from(args), FILE),
            Err(RenderError::CyclicReference { .. })
        ));
    }

    #[test]
    fn test_independent_values_are_not_cyclic() {
        let args = host_args! {
            "a" => vec![HostValue::from(1)],
            "b" => vec![HostValue::from(1)],
        };
        assert!(convert(&args, FILE).is_ok());
    }

    #[test]
    fn test_shared_value_is_not_cyclic_and_is_shared() {
        let shared = HostArray::new(vec!["x".into(), "y".into()]);
        let args = host_args! {
            "first" => shared.clone(),
            "wrapper" => HostObject::plain().with("again", shared),
        };
        let vars = convert(&args, FILE).unwrap();
        let first = vars["first"].as_array().unwrap();
        let again = vars["wrapper"].as_object().unwrap().get("again").unwrap();
        assert!(first.ptr_eq(again.as_array().unwrap()));
        assert_eq!(vars["wrapper"].to_string(), "{ again: [x, y] }");
    }

    #[test]
    fn test_locked_value_is_uninspectable() {
        let list = HostArray::new(vec![HostValue::from(1)]);
        let args = host_args! { "list" => list.clone() };
        let _guard = list.borrow_mut();
        assert_eq!(
            convert(&args, FILE).unwrap_err(),
            RenderError::uninspectable_argument(FILE, "list")
        );
    }

    #[test]
    fn test_locked_nested_object_is_uninspectable() {
        let inner = HostObject::plain().with("v", 1);
        let args = host_args! { "outer" => HostObject::plain().with("inner", inner.clone()) };
        let _guard = inner.lock();
        assert_eq!(
            convert(&args, FILE).unwrap_err(),
            RenderError::uninspectable_argument(FILE, "inner")
        );
    }

    fn nested_arrays(levels: usize, leaf: HostValue) -> HostValue {
        (0..levels).fold(leaf, |inner, _| HostValue::from(vec![inner]))
    }

    #[test]
    fn test_nesting_at_limit_is_accepted() {
        let args = host_args! { "deep" => nested_arrays(MAX_NESTING_DEPTH, HostValue::from("x")) };
        let vars = convert(&args, FILE).unwrap();
        let expected = format!(
            "{}x{}",
            "[".repeat(MAX_NESTING_DEPTH),
            "]".repeat(MAX_NESTING_DEPTH)
        );
        assert_eq!(vars["deep"].to_string(), expected);
    }

    #[test]
    fn test_nesting_past_limit_is_an_error() {
        for levels in [MAX_NESTING_DEPTH + 1, 1_000] {
            let args = host_args! { "deep" => nested_arrays(levels, HostValue::from(1)) };
            assert_eq!(
                convert(&args, FILE).unwrap_err(),
                RenderError::nesting_too_deep(FILE, "deep", MAX_NESTING_DEPTH)
            );
        }
    }

    #[test]
    fn test_deep_objects_past_limit_are_an_error() {
        let value = (0..MAX_NESTING_DEPTH + 1).fold(HostValue::Null, |inner, _| {
            HostObject::plain().with("child", inner).into()
        });
        let args = host_args! { "tree" => value };
        assert_eq!(
            convert(&args, FILE).unwrap_err(),
            RenderError::nesting_too_deep(FILE, "child", MAX_NESTING_DEPTH)
        );
    }

    #[test]
    fn test_shared_value_counts_depth_where_it_is_reused() {
        let shared = nested_arrays(100, HostValue::from(1));
        let args = host_args! {
            "shallow" => shared.clone(),
            "deep" => nested_arrays(50, shared),
        };
        assert_eq!(
            convert(&args, FILE).unwrap_err(),
            RenderError::nesting_too_deep(FILE, "deep", MAX_NESTING_DEPTH)
        );
    }

    #[test]
    fn test_locked_argument_object_is_uninspectable() {
        let object = HostObject::plain().with("a", 1);
        let args = HostValue::from(object.clone());
        let _guard = object.lock();
        assert_eq!(
            convert(&args, FILE).unwrap_err(),
            RenderError::uninspectable_argument(FILE, ARGUMENTS_KEY)
        );
    }

    #[test]
    fn test_result_is_detached_from_host() {
        let list = HostArray::new(vec![HostValue::from(1)]);
        let args = host_args! { "list" => list.clone() };
        let vars = convert(&args, FILE).unwrap();
        list.push(2);
        assert_eq!(vars["list"].to_string(), "[1]");
    }
}

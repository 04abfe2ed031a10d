//! Variable bindings shared between widgets
//!
//! A [`Binding`] is an observable cell. Widgets that carry a value (entries,
//! checkbuttons, scales, radio groups...) read and write it through the cell,
//! so the cell always reflects live widget state. Cloning a binding clones the
//! handle, not the value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::error::BindingError;
use crate::value::Value;

/// Scalar type stored by a binding
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    /// Toggle widgets (on/off values)
    Int,
    /// Continuous widgets (sliders)
    Float,
    /// Text and selection widgets, radio groups
    Str,
}

impl BindingKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingKind::Int => "int",
            BindingKind::Float => "float",
            BindingKind::Str => "string",
        }
    }

    fn default_value(&self) -> Value {
        match self {
            BindingKind::Int => Value::Int(0),
            BindingKind::Float => Value::Float(0.0),
            BindingKind::Str => Value::Str(String::new()),
        }
    }

    fn coerce(&self, value: &Value) -> Option<Value> {
        match self {
            BindingKind::Int => value.as_i64().map(Value::Int),
            BindingKind::Float => value.as_f64().map(Value::Float),
            BindingKind::Str => match value {
                Value::List(_) | Value::Map(_) => None,
                other => Some(Value::Str(other.to_text())),
            },
        }
    }
}

type Observer = Rc<dyn Fn(&Value)>;

struct Cell {
    kind: BindingKind,
    value: Value,
    observers: Vec<Observer>,
}

/// Shared, observable value cell
#[derive(Clone)]
pub struct Binding {
    key: Rc<str>,
    cell: Rc<RefCell<Cell>>,
}

impl Binding {
    /// Create a binding holding the kind's default value
    pub fn new(key: &str, kind: BindingKind) -> Self {
        Self {
            key: Rc::from(key),
            cell: Rc::new(RefCell::new(Cell {
                kind,
                value: kind.default_value(),
                observers: Vec::new(),
            })),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> BindingKind {
        self.cell.borrow().kind
    }

    /// Current value
    pub fn get(&self) -> Value {
        self.cell.borrow().value.clone()
    }

    /// Write a value, coercing it to the binding's kind
    ///
    /// Observers run after the value is stored and before this returns.
    pub fn set(&self, value: impl Into<Value>) -> Result<(), BindingError> {
        let value = value.into();
        let observers = {
            let mut cell = self.cell.borrow_mut();
            let coerced = cell
                .kind
                .coerce(&value)
                .ok_or_else(|| BindingError::Coercion {
                    key: self.key.to_string(),
                    kind: cell.kind.as_str(),
                    value: value.to_string(),
                })?;
            cell.value = coerced;
            cell.observers.clone()
        };

        let current = self.get();
        for observer in observers {
            observer(&current);
        }
        Ok(())
    }

    /// Register a callback that runs after every successful write
    pub fn observe(&self, observer: impl Fn(&Value) + 'static) {
        self.cell.borrow_mut().observers.push(Rc::new(observer));
    }

    /// Whether two handles refer to the same cell
    pub fn same_cell(&self, other: &Binding) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell = self.cell.borrow();
        f.debug_struct("Binding")
            .field("key", &self.key)
            .field("kind", &cell.kind)
            .field("value", &cell.value)
            .finish()
    }
}

/// Binding key → binding, at most one binding per key
#[derive(Debug, Default)]
pub struct BindingStore {
    bindings: HashMap<String, Binding>,
}

impl BindingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a binding, returning the one it replaced
    pub fn insert(&mut self, binding: Binding) -> Option<Binding> {
        self.bindings.insert(binding.key().to_string(), binding)
    }

    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Keys in sorted order
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell as StdCell;

    #[test]
    fn test_defaults_per_kind() {
        assert_eq!(Binding::new("a", BindingKind::Int).get(), Value::Int(0));
        assert_eq!(Binding::new("b", BindingKind::Float).get(), Value::Float(0.0));
        assert_eq!(Binding::new("c", BindingKind::Str).get(), Value::from(""));
    }

    #[test]
    fn test_coercion() {
        let s = Binding::new("spin", BindingKind::Str);
        s.set(55).unwrap();
        assert_eq!(s.get(), Value::from("55"));

        let i = Binding::new("check", BindingKind::Int);
        i.set("1").unwrap();
        assert_eq!(i.get(), Value::Int(1));
        assert!(i.set("nope").is_err());
        assert_eq!(i.get(), Value::Int(1));

        let f = Binding::new("scale", BindingKind::Float);
        f.set(7.5).unwrap();
        assert_eq!(f.get(), Value::Float(7.5));
    }

    #[test]
    fn test_clones_share_cell() {
        let a = Binding::new("group", BindingKind::Str);
        let b = a.clone();
        b.set("x").unwrap();
        assert_eq!(a.get(), Value::from("x"));
        assert!(a.same_cell(&b));
        assert!(!a.same_cell(&Binding::new("group", BindingKind::Str)));
    }

    #[test]
    fn test_observers_run_on_write() {
        let binding = Binding::new("name", BindingKind::Str);
        let calls = Rc::new(StdCell::new(0));
        let seen = calls.clone();
        binding.observe(move |v| {
            assert_eq!(v, &Value::from("hello"));
            seen.set(seen.get() + 1);
        });
        binding.set("hello").unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_store_replaces_by_key() {
        let mut store = BindingStore::new();
        assert!(store.insert(Binding::new("k", BindingKind::Int)).is_none());
        assert!(store.insert(Binding::new("k", BindingKind::Str)).is_some());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("k").unwrap().kind(), BindingKind::Str);
    }
}

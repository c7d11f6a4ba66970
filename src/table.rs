use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A table key: either a variable name or a positional index.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Name(String),
    Index(i64),
}

impl Key {
    pub fn name(name: &str) -> Self {
        Key::Name(name.to_string())
    }

    pub fn index(index: i64) -> Self {
        Key::Index(index)
    }
}

/// Override for the length query on a table.
pub type LenHook = Rc<dyn Fn(&Table) -> i64>;

/// Override for enumeration over a table.
pub type PairsHook = Rc<dyn Fn(&Table) -> Vec<(Key, Value)>>;

/// A base environment: a mapping from keys to values with optional
/// length/enumeration overrides. Storing `Nil` removes the entry, so a
/// lookup never yields a stored `Nil`.
#[derive(Clone, Default)]
pub struct Table {
    entries: HashMap<Key, Value>,
    len_hook: Option<LenHook>,
    pairs_hook: Option<PairsHook>,
}

/// Shared handle to a table. The table is owned by whoever created the
/// handle; guards only hold a clone of it.
pub type EnvHandle = Rc<RefCell<Table>>;

pub fn env_handle(table: Table) -> EnvHandle {
    Rc::new(RefCell::new(table))
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &Key) -> Value {
        self.entries.get(key).cloned().unwrap_or(Value::Nil)
    }

    pub fn get_name(&self, name: &str) -> Value {
        self.get(&Key::name(name))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.entries.contains_key(&Key::name(name))
    }

    pub fn set(&mut self, key: Key, value: Value) {
        if value.is_nil() {
            self.entries.remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn set_len_hook(&mut self, hook: LenHook) {
        self.len_hook = Some(hook);
    }

    pub fn set_pairs_hook(&mut self, hook: PairsHook) {
        self.pairs_hook = Some(hook);
    }

    /// Length of the table: the hook if one is installed, otherwise the
    /// border of the positional entries.
    pub fn len(&self) -> i64 {
        if let Some(hook) = &self.len_hook {
            return hook(self);
        }
        self.border()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries of the table: the hook if one is installed, otherwise a
    /// snapshot of the mapping in no particular order.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        if let Some(hook) = &self.pairs_hook {
            return hook(self);
        }
        self.entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    // Scans indices 1, 2, 3, ... and returns the index before the first gap.
    fn border(&self) -> i64 {
        let mut index = 1;
        while !self.get(&Key::Index(index)).is_nil() {
            index += 1;
        }
        index - 1
    }
}

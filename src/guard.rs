use crate::context::{CallerClassifier, CallerKind};
use crate::error::{ScopeError, ScopeResult};
use crate::table::{EnvHandle, Key};
use crate::value::Value;
use std::collections::HashSet;

/// Wrapper enforcing declare-before-use over a base environment.
///
/// The guard tracks which names have been declared through it; reads and
/// writes of names absent from the base environment are rejected unless the
/// calling context is allowed to establish new names. Guards wrapping the
/// same handle observe the same values but keep independent declarations.
pub struct ScopeGuard<C> {
    base: EnvHandle,
    declared: HashSet<String>,
    classifier: C,
}

impl<C: CallerClassifier> ScopeGuard<C> {
    pub fn new(base: EnvHandle, classifier: C) -> Self {
        Self {
            base,
            declared: HashSet::new(),
            classifier,
        }
    }

    /// Reads `name` from the base environment.
    ///
    /// A present value marks the name declared. A miss on an undeclared name
    /// is an error unless the caller is native code, which reads `Nil`
    /// silently.
    pub fn read(&mut self, name: &str) -> ScopeResult<Value> {
        let found = self.base.borrow().get_name(name);
        if !found.is_nil() {
            self.declared.insert(name.to_string());
            return Ok(found);
        }
        if self.declared.contains(name) {
            return Ok(Value::Nil);
        }
        match self.classifier.classify() {
            CallerKind::Native => Ok(Value::Nil),
            CallerKind::TopLevel | CallerKind::Nested => Err(ScopeError::UndeclaredVariable {
                name: name.to_string(),
            }),
        }
    }

    /// Writes `value` under `name`, declaring the name.
    ///
    /// A name that is neither present in the base environment nor declared
    /// can only be established from the top level or from native code; a
    /// nested function assigning such a name is an error.
    pub fn write(&mut self, name: &str, value: Value) -> ScopeResult<()> {
        let exists = !self.base.borrow().get_name(name).is_nil();
        if !exists
            && !self.declared.contains(name)
            && self.classifier.classify() == CallerKind::Nested
        {
            return Err(ScopeError::UndeclaredAssignment {
                name: name.to_string(),
            });
        }
        self.declared.insert(name.to_string());
        self.base.borrow_mut().set(Key::name(name), value);
        Ok(())
    }

    /// Length of the base environment (its hook, or the positional border).
    pub fn len(&self) -> i64 {
        self.base.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Enumerates the base environment's entries.
    pub fn entries(&self) -> Vec<(Key, Value)> {
        self.base.borrow().entries()
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.declared.contains(name)
    }

    pub fn base(&self) -> &EnvHandle {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{env_handle, Table};

    fn empty_env() -> EnvHandle {
        env_handle(Table::new())
    }

    #[test]
    fn nested_read_of_unknown_name_fails() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::Nested);
        let err = guard.read("y").unwrap_err();
        assert_eq!(
            err,
            ScopeError::UndeclaredVariable {
                name: "y".to_string()
            }
        );
    }

    #[test]
    fn top_level_read_of_unknown_name_fails() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::TopLevel);
        assert!(guard.read("y").is_err());
    }

    #[test]
    fn native_read_of_unknown_name_is_silent() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::Native);
        assert_eq!(guard.read("y").unwrap(), Value::Nil);
        // Silent reads do not declare.
        assert!(!guard.is_declared("y"));
    }

    #[test]
    fn top_level_write_declares() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::TopLevel);
        guard.write("x", Value::Int(10)).unwrap();
        assert!(guard.is_declared("x"));
        assert_eq!(guard.read("x").unwrap(), Value::Int(10));
    }

    #[test]
    fn native_write_declares() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::Native);
        guard.write("x", Value::Int(1)).unwrap();
        assert!(guard.is_declared("x"));
    }

    #[test]
    fn nested_write_of_unknown_name_fails() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::Nested);
        let err = guard.write("y", Value::Int(5)).unwrap_err();
        assert_eq!(
            err,
            ScopeError::UndeclaredAssignment {
                name: "y".to_string()
            }
        );
        assert!(!guard.is_declared("y"));
    }

    #[test]
    fn names_already_in_the_base_are_never_checked() {
        let env = empty_env();
        env.borrow_mut().set(Key::name("present"), Value::Int(7));
        let mut guard = ScopeGuard::new(env, CallerKind::Nested);
        assert_eq!(guard.read("present").unwrap(), Value::Int(7));
        guard.write("present", Value::Int(8)).unwrap();
        assert_eq!(guard.read("present").unwrap(), Value::Int(8));
    }

    #[test]
    fn reading_a_present_name_marks_it_declared() {
        let env = empty_env();
        env.borrow_mut().set(Key::name("v"), Value::Bool(true));
        let mut guard = ScopeGuard::new(env.clone(), CallerKind::Nested);
        guard.read("v").unwrap();
        assert!(guard.is_declared("v"));
        // Even after the value disappears from the base, the declaration
        // keeps nested reads from failing.
        env.borrow_mut().set(Key::name("v"), Value::Nil);
        assert_eq!(guard.read("v").unwrap(), Value::Nil);
    }

    #[test]
    fn second_write_to_the_same_name_is_fine() {
        let mut guard = ScopeGuard::new(empty_env(), CallerKind::TopLevel);
        guard.write("x", Value::Int(1)).unwrap();
        guard.write("x", Value::Int(2)).unwrap();
        assert_eq!(guard.read("x").unwrap(), Value::Int(2));
    }

    #[test]
    fn declaring_nil_from_the_top_level_still_declares() {
        let env = empty_env();
        let mut top = ScopeGuard::new(env.clone(), CallerKind::TopLevel);
        top.write("maybe", Value::Nil).unwrap();
        assert!(top.is_declared("maybe"));
        assert_eq!(top.read("maybe").unwrap(), Value::Nil);
        // A nested write through the same guard now succeeds.
        let mut nested = ScopeGuard::new(env, CallerKind::Nested);
        assert!(nested.write("maybe", Value::Int(1)).is_err());
        top.write("maybe", Value::Int(1)).unwrap();
    }

    #[test]
    fn length_and_entries_delegate_to_the_base() {
        let env = empty_env();
        {
            let mut table = env.borrow_mut();
            table.set(Key::index(1), Value::Int(10));
            table.set(Key::index(2), Value::Int(20));
            table.set(Key::name("a"), Value::Int(30));
        }
        let guard = ScopeGuard::new(env.clone(), CallerKind::TopLevel);
        assert_eq!(guard.len(), 2);
        assert!(!guard.is_empty());
        let mut from_guard = guard.entries();
        let mut from_base = env.borrow().entries();
        from_guard.sort_by(|a, b| format!("{:?}", a.0).cmp(&format!("{:?}", b.0)));
        from_base.sort_by(|a, b| format!("{:?}", a.0).cmp(&format!("{:?}", b.0)));
        assert_eq!(from_guard, from_base);
    }
}

use std::cell::Cell;
use std::rc::Rc;

/// Classification of the code location invoking a guarded read or write.
///
/// The guard cannot inspect the host's call stack itself; the host supplies
/// the classification through a [`CallerClassifier`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallerKind {
    /// A foreign/native frame. Exempt from the undeclared-read check and
    /// permitted to declare new names on write.
    Native,
    /// The top-level chunk. Permitted to declare new names on write.
    TopLevel,
    /// An ordinary function body. Strict checks apply.
    Nested,
}

/// Host capability answering "what kind of code is performing this access?".
pub trait CallerClassifier {
    fn classify(&self) -> CallerKind;
}

/// A fixed classification, for hosts where every access comes from one kind
/// of context.
impl CallerClassifier for CallerKind {
    fn classify(&self) -> CallerKind {
        *self
    }
}

/// A shared mutable classification, for hosts that update the current
/// context as execution moves between frames.
impl CallerClassifier for Rc<Cell<CallerKind>> {
    fn classify(&self) -> CallerKind {
        self.get()
    }
}

/// Adapter wiring an arbitrary introspection callback into the guard.
pub struct ClassifyFn<F>(pub F);

impl<F> CallerClassifier for ClassifyFn<F>
where
    F: Fn() -> CallerKind,
{
    fn classify(&self) -> CallerKind {
        (self.0)()
    }
}

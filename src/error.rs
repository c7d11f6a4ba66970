use miette::Diagnostic;
use thiserror::Error;

pub type ScopeResult<T> = Result<T, ScopeError>;

#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ScopeError {
    #[error("variable `{name}` is not declared")]
    #[diagnostic(help("assign to `{name}` from the top level before reading it"))]
    UndeclaredVariable { name: String },
    #[error("assign to undeclared variable `{name}`")]
    #[diagnostic(help(
        "new variables can only be declared at the top level; `{name}` was assigned from a nested function"
    ))]
    UndeclaredAssignment { name: String },
}

impl ScopeError {
    /// The offending variable name.
    pub fn name(&self) -> &str {
        match self {
            ScopeError::UndeclaredVariable { name } => name,
            ScopeError::UndeclaredAssignment { name } => name,
        }
    }
}

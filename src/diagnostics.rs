use crate::error::ScopeError;
use miette::Report;

/// Renders a scope violation with its help text attached.
pub fn render_scope_error(error: ScopeError) -> String {
    format!("{:?}", Report::new(error))
}

pub fn report_scope_error(error: ScopeError) {
    eprintln!("{}", render_scope_error(error));
}

pub mod context;
pub mod diagnostics;
pub mod error;
pub mod guard;
pub mod table;
pub mod value;

pub use context::{CallerClassifier, CallerKind, ClassifyFn};
pub use error::{ScopeError, ScopeResult};
pub use guard::ScopeGuard;
pub use table::{env_handle, EnvHandle, Key, Table};
pub use value::Value;

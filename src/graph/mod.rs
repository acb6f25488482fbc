mod closure;

pub use closure::{Closure, ClosureBuilder, DEFAULT_MAX_MODULES};

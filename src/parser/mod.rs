//! Document loading module.

mod loader;
mod options;

pub use loader::DocumentLoader;
pub use options::{ErrorMode, LoadOptions};

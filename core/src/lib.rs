pub mod api;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod mapping;
pub mod state;
pub mod types;

#[cfg(test)]
mod test_fixtures;

pub use api::CobbAngleMapper;
pub use catalog::{ImageCatalog, InMemoryCatalog};
pub use cli::report::TextReport;
pub use error::{CobbmapError, Result};
pub use state::{AnnotationStateRegistry, AnnotationStateTracker};
pub use types::*;

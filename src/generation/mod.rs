//! Generation domain - turns annotated declarations into Go source files

pub mod context;
pub mod errors;
pub mod orchestrator;
pub mod renderer;
pub mod templates;
pub mod traits;
pub mod types;

pub use context::*;
pub use errors::*;
pub use orchestrator::*;
pub use renderer::*;
pub use templates::{TemplateSet, TemplateSource, template_file_name};
pub use traits::*;
pub use types::*;

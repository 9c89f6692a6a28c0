//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, Connector, HttpProbe)
//! but are themselves concrete structs, not traits.

mod ensure;
mod path;
mod template;
mod wait;

pub use ensure::EnsureService;
pub use path::PathService;
pub use template::{resolve_template_path, TemplateService};
pub use wait::WaitService;

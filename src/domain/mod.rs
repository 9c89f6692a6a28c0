//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod entities;
pub mod error;
pub mod props;

pub use entities::*;
pub use error::DomainError;
pub use props::{env_to_props, escape_prop};

//! Common types shared across the cepnet crates.
//!
//! This crate holds the pieces every service agrees on: the error type, the
//! failure marker convention, capability descriptors and the JSON bodies on
//! the wire.

pub mod card;
pub mod config;
pub mod error;
pub mod marker;
pub mod message;

pub use card::CapabilityDescriptor;
pub use config::load_toml;
pub use error::{CepnetError, Result};
pub use marker::{ERROR_MARKER, is_marked, mark};
pub use message::{
    ChatTurn, CoordinatorInput, CoordinatorOutput, CoordinatorRequest, CoordinatorResponse,
    ErrorBody, SpecialistRequest, SpecialistResponse, ToolRequest, ToolResponse,
};

//! Shared data model, configuration and errors for GLaMpress.

pub mod config;
pub mod error;
pub mod fsio;
pub mod types;

pub use config::GlampressConfig;
pub use error::{GlampressError, Result};
pub use types::{DateGroup, Message, Motif, Symbol, Transcript, MOTIF_KEY_SEPARATOR};

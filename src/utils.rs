//! Utility functions and helpers.

pub mod settings;

pub use settings::{Defaults, Settings, TOKEN_ENV_VARS};

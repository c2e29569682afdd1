//! Helper functions used across the application.
//!
//! - [`code_generator`] - Base-62 code synthesis and custom code validation
//! - [`url_validator`] - Long URL validation

pub mod code_generator;
pub mod url_validator;

//! restgen - REST handler and test-helper generator for annotated Go services
//!
//! A parsed source model (declarations with their operations and doc
//! comments) is read from JSON or YAML. Declarations carrying a
//! `@RestService` directive get a Go file with an HTTP dispatcher and one
//! handler per `@RestOperation`, plus a companion file of test helpers.
#![deny(unsafe_code)]

pub mod annotations;
pub mod config;
pub mod error;
pub mod generation;
pub mod model;
pub mod output;
pub mod rest;

pub use error::{Error, Result};

//! REST semantics resolver
//!
//! Turns `@RestService` / `@RestOperation` directives plus the shape of an
//! operation's arguments into the facts the endpoint generator consumes:
//! route, method, which argument binds to the body and how outputs are
//! encoded.

pub mod resolver;
pub mod types;

pub use resolver::*;
pub use types::*;

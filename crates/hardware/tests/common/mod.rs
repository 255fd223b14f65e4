//! Shared test infrastructure.

/// Fluent builders for test inputs.
pub mod builder;



/// Sequential reference interpreter.
pub mod reference;

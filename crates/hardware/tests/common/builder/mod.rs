/// Program builder emitting encoded instruction words.
pub mod program;

pub use program::Program;

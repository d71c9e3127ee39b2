//! Entities owned by aggregates.

pub mod ice;
pub mod program;
pub mod source;

pub use ice::{Ice, IceType};
pub use program::{Program, ProgramType};
pub use source::Source;

//! faceform - Deterministic facial exercise program generator
//!
//! Seven facial metric scores in, a reproducible 70-day plan out.

pub mod exercises;
pub mod program;

pub use program::scoring::ScoreVector;
pub use program::{Program, ProgramError, generate_program};

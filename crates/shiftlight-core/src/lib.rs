//! shiftlight-core - Frame codec and animation model for LED shift lights
//!
//! This crate provides everything needed to author a shift-light program
//! before it is sent to the device:
//!
//! - [`variables`] - named integer variables parsed from `name=value` lines
//! - [`expr`] - the arithmetic expression evaluator used for numeric fields
//! - [`frame`] - the [`Frame`] type and its compact textual encoding
//! - [`animation`] - the bounded, observable frame sequence
//! - [`program`] - the persisted program text format
//!
//! # Example
//!
//! ```
//! use shiftlight_core::{Animation, VariableTable};
//!
//! let vars = VariableTable::parse("redline=6500\n")?;
//! let mut animation = Animation::new();
//! animation.append("[1-3],1000,redline-500,0,255,0,255,0,0,0", Some(&vars))?;
//! assert_eq!(
//!     animation.frames().next().unwrap().encode(),
//!     "[1-3],1000,6000,0,255,0,255,0,0,0,0"
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

pub mod animation;
pub mod error;
pub mod expr;
pub mod frame;
pub mod program;
pub mod variables;

pub use animation::{Animation, AnimationEvent, MAX_FRAMES};
pub use error::{AnimationError, DecodeError, EvalError, ProgramError, VariableError};
pub use expr::evaluate;
pub use frame::{Blink, Frame, LedSet, Rgb};
pub use program::{Program, ProgramFile};
pub use variables::VariableTable;

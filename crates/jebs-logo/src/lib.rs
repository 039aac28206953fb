//! # jebs-logo
//!
//! Offline tracer that turns the sign artwork into white outline SVGs for
//! the website header. Shells out to ImageMagick 7 and potrace.

pub mod cmd;
pub mod pipeline;
pub mod svg;

pub use cmd::{Cmd, Tools};
pub use pipeline::{trace_logo, trace_text, TextOutputs};

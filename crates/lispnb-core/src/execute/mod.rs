//! Execution pipeline for lispnb notebooks.
//!
//! Evaluates executable cells one at a time through a remote evaluator and
//! renders each result into several output representations.
//!
//! # Architecture
//!
//! ```text
//! &[Cell]
//!     │
//!     └── ExecutionPipeline::run (one cell at a time, in order)
//!             │
//!             ├── Evaluator::evaluate      ── raw result text
//!             ├── PrettyPrinter::pretty_print
//!             ├── render::result_outputs   ── plain / markdown / edn / html
//!             │
//!             └── ExecutionRecord (Ok(outputs) | Err(ErrorDescriptor))
//! ```
//!
//! # Module Structure
//!
//! - `context` - Evaluator and pretty-printer capabilities, progress callbacks
//! - `outcome` - Execution records, output items and error descriptors
//! - `pipeline` - The sequential pipeline
//! - `render` - Output rendering and MIME tags

mod context;
mod outcome;
mod pipeline;
pub mod render;

pub use context::{EvalFailure, Evaluator, ExecutionCallback, Passthrough, PrettyPrinter};
pub use outcome::{CellOutcome, ErrorDescriptor, ExecutionRecord, OutputItem};
pub use pipeline::ExecutionPipeline;

//! movegen code generator: declaration IR to Sui Move module source.
//!
//! # Architecture
//!
//! The generator takes a validated [`movegen_types::ModuleSpec`] and
//! produces one self-contained Move module as text:
//!
//! ```text
//! ModuleSpec ──► struct definitions
//!            ──► per-method family generators
//!                (constructor / mutator / view / list-op / balance / mint)
//!            ──► error-code registry + feature flags
//!            ──► import resolution
//!            ──► section assembly + indentation reflow ──► String
//! ```
//!
//! Generators are pure over the IR; the only mutable state is the
//! per-compile [`ErrorCodeRegistry`] and [`FeatureFlags`], threaded
//! explicitly through every generator call and merged by the assembler.
//! Identical input always produces byte-identical output.

pub mod assembler;
pub mod assert;
pub mod balance;
pub mod constructor;
pub mod error;
pub mod imports;
pub mod list_ops;
pub mod mint;
pub mod mutator;
pub mod registry;
pub mod structs;
pub mod types;
pub mod view;

pub use assembler::generate;
pub use error::{CodegenError, CodegenResult};
pub use imports::FeatureFlags;
pub use registry::ErrorCodeRegistry;

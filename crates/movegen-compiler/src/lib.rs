//! movegen compiler: orchestrates the full compilation pipeline.
//!
//! ```text
//! Declaration IR → Ability Validation → Move Codegen → source + digest
//! ```
//!
//! One call to [`compile`] processes one [`ModuleSpec`] start-to-finish,
//! synchronously, with no state carried across invocations. Compilation
//! either succeeds with the complete module source or fails with a
//! [`CompileError`] — there is no partially generated output.

pub mod checker;

use movegen_codegen::CodegenError;
use movegen_types::{AbilityConflict, ConstantBinding, ModuleSpec};
use serde::Serialize;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// A failed compile.
#[derive(Debug, Error)]
pub enum CompileError {
    /// One or more structs declare `key` together with `copy`/`drop`.
    /// Collected as a batch so every offender is reported at once.
    #[error("{}", render_conflicts(.0))]
    AbilityConflicts(Vec<AbilityConflict>),

    /// A generator failed; these are fail-fast.
    #[error(transparent)]
    Codegen(#[from] CodegenError),
}

fn render_conflicts(conflicts: &[AbilityConflict]) -> String {
    conflicts
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// A successful compile: the module source and its SHA-256 hex digest.
///
/// The digest identifies the exact output for determinism auditing —
/// identical IR must always reproduce an identical digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOutput {
    pub source: String,
    pub source_hash: String,
}

/// Compile one module: validate abilities, then generate Move source.
pub fn compile(
    module: &ModuleSpec,
    constants: &[ConstantBinding],
) -> Result<CompileOutput, CompileError> {
    let conflicts = checker::validate(&module.structs);
    if !conflicts.is_empty() {
        return Err(CompileError::AbilityConflicts(conflicts));
    }

    let source = movegen_codegen::generate(module, constants)?;
    let source_hash = hex_digest(&source);
    Ok(CompileOutput {
        source,
        source_hash,
    })
}

fn hex_digest(source: &str) -> String {
    let digest = Sha256::digest(source.as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

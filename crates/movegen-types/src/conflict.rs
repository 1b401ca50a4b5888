//! Ability-conflict diagnostic.
//!
//! Conflicts are collected across the whole module and reported as a batch,
//! so one compile attempt surfaces every offending struct. The structured
//! form is serde-serializable for tooling — callers must not parse
//! free-form strings.

use crate::ir::Ability;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A struct that declares `key` together with `copy` or `drop` — a
/// combination the target language rejects because identity-bearing
/// objects cannot be duplicated or silently discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityConflict {
    /// Name of the offending struct.
    pub struct_name: String,
    /// The abilities that conflict with `key`, in declaration order.
    pub conflicting: Vec<Ability>,
}

impl fmt::Display for AbilityConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let list = self
            .conflicting
            .iter()
            .map(|a| format!("'{a}'"))
            .collect::<Vec<_>>()
            .join(" | ");
        write!(
            f,
            "struct `{}` has `key` but also {list} — an object type cannot carry these abilities",
            self.struct_name
        )
    }
}

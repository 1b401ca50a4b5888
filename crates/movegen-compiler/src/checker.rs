//! Ability validation.
//!
//! Entry point: [`validate`].
//!
//! The target language forbids an identity-bearing struct (`key`) from
//! also being copyable or droppable. Conflicts are collected across every
//! struct and returned as a batch — never fail-fast — so one compile
//! attempt surfaces every offending declaration at once.

use movegen_types::{Ability, AbilityConflict, StructSpec};

/// Check every struct's declared ability set, returning all conflicts.
///
/// An empty result means generation may proceed.
pub fn validate(structs: &[StructSpec]) -> Vec<AbilityConflict> {
    let mut conflicts = Vec::new();
    for spec in structs {
        if !spec.abilities.contains(Ability::Key) {
            continue;
        }
        let conflicting: Vec<Ability> = spec
            .abilities
            .iter()
            .filter(|&a| matches!(a, Ability::Copy | Ability::Drop))
            .collect();
        if !conflicting.is_empty() {
            conflicts.push(AbilityConflict {
                struct_name: spec.name.clone(),
                conflicting,
            });
        }
    }
    conflicts
}

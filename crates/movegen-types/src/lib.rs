//! Shared types for the movegen compiler.
//!
//! This crate defines the declaration IR consumed by the code generator,
//! the ability model, and the diagnostic types shared across all compiler
//! stages. The front-end parser (external to this workspace) normalizes
//! decorated declarations into these types and hands them over as JSON —
//! everything here is serde-serializable.

mod conflict;
pub mod ir;

pub use conflict::AbilityConflict;
pub use ir::{
    Ability, AbilitySet, AssertionSpec, BalanceOpKind, ConstantBinding, EventSpec, FieldSpec,
    ListWrapper, MethodKind, MethodSpec, ModuleSpec, ParamSpec, Recipient, StructSpec,
    TransferPolicy, ViewBinding,
};

//! Declaration IR for the movegen compiler.
//!
//! Every decorator in the host source is normalized by the front-end into a
//! strongly-typed value here — the core never performs attribute or
//! reflection lookups. [`Vec`] is used throughout because declaration order
//! is part of the contract: field order flows unchanged into generated
//! struct literals and constructor parameter lists.
//!
//! The IR is built once per compile invocation, read-only during
//! compilation, and discarded after the module source is emitted.

use serde::{Deserialize, Serialize};
use std::fmt;

// ══════════════════════════════════════════════════════════════════════════════
// Module
// ══════════════════════════════════════════════════════════════════════════════

/// One compilation unit: everything declared in a single decorated class.
///
/// Compiles to `module <package>::<module> { ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Target package/namespace name (e.g. `hello_world`).
    pub package: String,
    /// Target module name (e.g. `writing`).
    pub module: String,
    pub structs: Vec<StructSpec>,
    pub methods: Vec<MethodSpec>,
}

impl ModuleSpec {
    /// Look up a declared struct by name.
    pub fn find_struct(&self, name: &str) -> Option<&StructSpec> {
        self.structs.iter().find(|s| s.name == name)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Structs & Abilities
// ══════════════════════════════════════════════════════════════════════════════

/// A declared record type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructSpec {
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSpec>,
    pub abilities: AbilitySet,
    /// Present when this struct is the item type of a growable list
    /// container. The wrapper struct is synthetic — it exists only in the
    /// generated output.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_wrapper: Option<ListWrapper>,
}

/// A single struct field: name + host-language type name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub host_type: String,
}

/// A target-language capability tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ability {
    Key,
    Store,
    Copy,
    Drop,
}

impl Ability {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Key => "key",
            Self::Store => "store",
            Self::Copy => "copy",
            Self::Drop => "drop",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered set of abilities, as declared on the struct.
///
/// Order is preserved for deterministic output; duplicates are removed on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbilitySet(Vec<Ability>);

impl AbilitySet {
    pub fn new(abilities: &[Ability]) -> Self {
        let mut set = Vec::new();
        for &a in abilities {
            if !set.contains(&a) {
                set.push(a);
            }
        }
        Self(set)
    }

    pub fn contains(&self, ability: Ability) -> bool {
        self.0.contains(&ability)
    }

    pub fn iter(&self) -> impl Iterator<Item = Ability> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Render as the `has` clause body: `key, store`.
    pub fn render(&self) -> String {
        self.0
            .iter()
            .map(|a| a.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Marker pairing an item struct with its synthetic list container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListWrapper {
    /// Name of the generated wrapper struct (e.g. `UserList`).
    pub wrapper: String,
    /// Name of the wrapper's single vector-valued field (e.g. `items`).
    pub field: String,
}

// ══════════════════════════════════════════════════════════════════════════════
// Methods
// ══════════════════════════════════════════════════════════════════════════════

/// A declared method: one generated target function (or function family).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodSpec {
    pub name: String,
    /// Parameters in declaration order. Constructors take their parameters
    /// from the target struct's fields instead.
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    pub kind: MethodKind,
    /// Preconditions compiled into `assert!` statements, in order.
    #[serde(default)]
    pub assertions: Vec<AssertionSpec>,
    /// Only meaningful for Constructor and Mint kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer: Option<TransferPolicy>,
    /// Mutator kind only: raw target-language statements over the
    /// mutable-reference parameters, emitted verbatim.
    #[serde(default)]
    pub statements: Vec<String>,
    /// View kind only: the return bindings, in return-tuple order.
    #[serde(default)]
    pub bindings: Vec<ViewBinding>,
    /// Constructor kind only: emit this event when the object is created.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<EventSpec>,
}

/// A method parameter: name + host-language type annotation.
///
/// Mutator parameters use the `Mut<Struct>` annotation form; everything
/// else is a primitive name or a bare struct reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub host_type: String,
}

/// Which generator family a method belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodKind {
    /// Creates an object of `target` and applies the transfer policy.
    Constructor { target: String },
    /// Mutates objects through `&mut` parameters; straight-line body.
    Mutator,
    /// Read-only getter returning a tuple of field values.
    View,
    /// Operations over the list wrapper paired with `target`.
    ListOp { target: String },
    /// A named fungible-balance resource and its operation subset.
    BalanceOp { target: String, ops: Vec<BalanceOpKind> },
    /// NFT-style mint for `target`; `display` enables display metadata.
    Mint { target: String, display: bool },
}

/// Operations a balance resource can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceOpKind {
    Deposit,
    Withdraw,
    GetBalance,
}

/// What happens to a freshly created object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum TransferPolicy {
    /// Exclusively owned by one address after creation.
    Owned { recipient: Recipient },
    /// Published for shared mutable access.
    Shared,
    /// Published immutably.
    Frozen,
}

/// Who receives an `Owned` object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recipient {
    /// The transaction sender.
    Sender,
    /// A dedicated `recipient: address` parameter appended to the signature.
    Address,
}

/// One precondition: raw predicate text + symbolic error-code name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssertionSpec {
    pub predicate: String,
    pub error_code: String,
}

/// A view return binding in `const x = param.field` form, with an optional
/// explicit target-type override for when the name heuristic would guess
/// wrong.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewBinding {
    pub decl: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_ann: Option<String>,
}

/// An on-chain event emitted by a constructor, carrying the new object's
/// id, its declared fields, and the creating sender.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSpec {
    pub name: String,
}

/// A top-level constant from the host source: symbolic name → literal.
///
/// Used to resolve address identifiers referenced inside assertions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantBinding {
    pub name: String,
    pub value: String,
}

//! Import resolution.
//!
//! A pure function of which features fired during generation — never a
//! scan of generated text. Each feature maps to a fixed import group, and
//! the output order is fixed (string, event, balance/coin, display/package)
//! regardless of the order in which flags were set.

use serde::Serialize;

/// Which import-relevant features fired during generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FeatureFlags {
    /// A field, parameter, or return type resolved to the string type,
    /// or a length assertion was compiled.
    pub string: bool,
    /// An event struct was generated and emitted.
    pub event: bool,
    /// A balance resource was declared.
    pub balance: bool,
    /// NFT display metadata was generated.
    pub display: bool,
}

impl FeatureFlags {
    /// Merge another flag set into this one.
    pub fn merge(&mut self, other: FeatureFlags) {
        self.string |= other.string;
        self.event |= other.event;
        self.balance |= other.balance;
        self.display |= other.display;
    }
}

/// Resolve the `use` lines required by the fired features.
pub fn resolve(flags: FeatureFlags) -> Vec<&'static str> {
    let mut lines = Vec::new();
    if flags.string {
        lines.push("use std::string::{Self, String};");
    }
    if flags.event {
        lines.push("use sui::event;");
    }
    if flags.balance {
        lines.push("use sui::balance::{Self, Balance};");
        lines.push("use sui::coin::{Self, Coin};");
        lines.push("use sui::sui::SUI;");
    }
    if flags.display {
        lines.push("use sui::display;");
        lines.push("use sui::package;");
    }
    lines
}

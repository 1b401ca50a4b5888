//! Module assembly.
//!
//! Orchestrates the generation pipeline:
//! 1. Generate struct definitions (including wrappers and event structs)
//! 2. Dispatch every method to its generator family, in declaration order
//! 3. Resolve imports from the fired feature flags
//! 4. Render the collected error-code constants
//! 5. Concatenate the sections in fixed order, banner-separated
//! 6. Reflow indentation in a single forward pass
//!
//! Either the whole module is produced or an error is returned — there is
//! no partial output.

use movegen_types::{ConstantBinding, MethodKind, ModuleSpec};

use crate::error::CodegenResult;
use crate::imports::{self, FeatureFlags};
use crate::registry::ErrorCodeRegistry;
use crate::{balance, constructor, list_ops, mint, mutator, structs, view};

/// Generate the complete Move module source for one [`ModuleSpec`].
pub fn generate(module: &ModuleSpec, constants: &[ConstantBinding]) -> CodegenResult<String> {
    Assembler::new(module, constants).assemble()
}

/// Per-compile assembly state: the registry and feature flags shared by
/// the generators, plus the collected fragments per section.
struct Assembler<'a> {
    module: &'a ModuleSpec,
    constants: &'a [ConstantBinding],
    registry: ErrorCodeRegistry,
    features: FeatureFlags,
    constructors: Vec<String>,
    views: Vec<String>,
    mutators: Vec<String>,
    list_ops: Vec<String>,
    balances: Vec<String>,
    mints: Vec<String>,
    display_inits: Vec<String>,
}

impl<'a> Assembler<'a> {
    fn new(module: &'a ModuleSpec, constants: &'a [ConstantBinding]) -> Self {
        Self {
            module,
            constants,
            registry: ErrorCodeRegistry::new(),
            features: FeatureFlags::default(),
            constructors: Vec::new(),
            views: Vec::new(),
            mutators: Vec::new(),
            list_ops: Vec::new(),
            balances: Vec::new(),
            mints: Vec::new(),
            display_inits: Vec::new(),
        }
    }

    fn assemble(mut self) -> CodegenResult<String> {
        let struct_defs = structs::generate(self.module, &mut self.features)?;
        self.dispatch_methods()?;

        let mut out: Vec<String> = Vec::new();
        out.push(format!(
            "module {}::{} {{",
            self.module.package, self.module.module
        ));

        let imports = imports::resolve(self.features);
        if !imports.is_empty() {
            out.push(banner("Imports"));
            out.extend(imports.iter().map(|s| s.to_string()));
        }

        // One-time witness for the module.
        let otw = self.module.module.to_uppercase();
        out.push(format!("public struct {otw} has drop {{}}"));

        if !self.registry.is_empty() {
            out.push(banner("Errors"));
            out.extend(self.registry.render());
        }

        if !struct_defs.is_empty() {
            out.push(banner("Structs"));
            out.extend(struct_defs);
        }

        if !self.display_inits.is_empty() {
            out.push(banner("Init"));
            out.push(self.render_init(&otw));
        }

        for (title, fragments) in [
            ("Constructors", &self.constructors),
            ("Views", &self.views),
            ("Mutators", &self.mutators),
            ("List Operations", &self.list_ops),
            ("Balances", &self.balances),
            ("Mints", &self.mints),
        ] {
            if !fragments.is_empty() {
                out.push(banner(title));
                out.extend(fragments.iter().cloned());
            }
        }

        out.push("}".to_string());
        Ok(reflow(&out.join("\n")))
    }

    fn dispatch_methods(&mut self) -> CodegenResult<()> {
        for method in &self.module.methods {
            match &method.kind {
                MethodKind::Constructor { target } => {
                    self.constructors.push(constructor::generate(
                        method,
                        target,
                        self.module,
                        self.constants,
                        &mut self.registry,
                        &mut self.features,
                    )?);
                }
                MethodKind::Mutator => {
                    self.mutators.push(mutator::generate(
                        method,
                        self.module,
                        self.constants,
                        &mut self.registry,
                        &mut self.features,
                    )?);
                }
                MethodKind::View => {
                    self.views.push(view::generate(
                        method,
                        self.module,
                        self.constants,
                        &mut self.registry,
                        &mut self.features,
                    )?);
                }
                MethodKind::ListOp { target } => {
                    self.list_ops.push(list_ops::generate(
                        method,
                        target,
                        self.module,
                        &mut self.features,
                    )?);
                }
                MethodKind::BalanceOp { target, ops } => {
                    self.balances.push(balance::generate(
                        method,
                        target,
                        ops,
                        self.constants,
                        &mut self.registry,
                        &mut self.features,
                    )?);
                }
                MethodKind::Mint { target, display } => {
                    let output = mint::generate(
                        method,
                        target,
                        *display,
                        self.module,
                        self.constants,
                        &mut self.registry,
                        &mut self.features,
                    )?;
                    self.mints.push(output.functions);
                    if let Some(fragment) = output.display_init {
                        self.display_inits.push(fragment);
                    }
                }
            }
        }
        Ok(())
    }

    /// The module `init`: claim the publisher once, register every display
    /// fragment, then hand the publisher to the sender.
    fn render_init(&self, otw: &str) -> String {
        let mut lines = vec![
            format!("fun init(otw: {otw}, ctx: &mut TxContext) {{"),
            "let publisher = package::claim(otw, ctx);".to_string(),
        ];
        lines.extend(self.display_inits.iter().cloned());
        lines.push("transfer::public_transfer(publisher, tx_context::sender(ctx));".to_string());
        lines.push("}".to_string());
        lines.join("\n")
    }
}

fn banner(title: &str) -> String {
    format!("// === {title} ===")
}

/// Reflow indentation: two spaces per brace depth, computed in a single
/// forward pass. Depth is incremented after a line ending in `{` and
/// decremented before a line starting with `}`. Blank lines are dropped,
/// so the output is fully canonical.
pub fn reflow(code: &str) -> String {
    let mut depth: usize = 0;
    let mut out = Vec::new();
    for line in code.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('}') {
            depth = depth.saturating_sub(1);
        }
        out.push(format!("{}{trimmed}", "  ".repeat(depth)));
        if trimmed.ends_with('{') {
            depth += 1;
        }
    }
    let mut result = out.join("\n");
    result.push('\n');
    result
}

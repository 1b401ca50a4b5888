//! View (getter) generation.
//!
//! Views take their objects by shared reference under a single-letter
//! alias and return a tuple of field reads — no intermediate bindings in
//! the generated body.
//!
//! Return types are inferred per field name by a fixed heuristic unless an
//! explicit annotation overrides it. The heuristic is BEST-EFFORT only —
//! it guesses from common field-name shapes and defaults to the string
//! type — so callers that know the real type should always attach
//! [`ViewBinding::type_ann`].

use movegen_types::{ConstantBinding, MethodSpec, ModuleSpec, ViewBinding};

use crate::assert;
use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::registry::ErrorCodeRegistry;
use crate::types::{self, INNER_ID_TYPE, STRING_TYPE};

/// Generate one view function.
pub fn generate(
    method: &MethodSpec,
    module: &ModuleSpec,
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    let mut params = Vec::with_capacity(method.params.len());
    // Declared param name → single-letter alias, for binding rewrites.
    let mut aliases: Vec<(String, String)> = Vec::new();

    for param in &method.params {
        let host = param.host_type.trim();
        if module.find_struct(host).is_some() {
            let alias = short_alias(&param.name);
            params.push(format!("{alias}: &{host}"));
            aliases.push((param.name.clone(), alias));
        } else {
            let context = format!("parameter `{}` of method `{}`", param.name, method.name);
            let mapped = types::map_view_param(host, &context)?;
            if mapped.starts_with('&') {
                // A struct reference the module never declared.
                return Err(CodegenError::UnknownStructReference {
                    method: method.name.clone(),
                    target: host.to_string(),
                });
            }
            if mapped == STRING_TYPE {
                features.string = true;
            }
            params.push(format!("{}: {mapped}", param.name));
        }
    }

    let asserts = assert::compile(&method.name, &method.assertions, constants, registry)?;
    features.string |= asserts.needs_string;
    if asserts.needs_sender {
        params.push("ctx: &mut TxContext".to_string());
    }

    let mut exprs = Vec::with_capacity(method.bindings.len());
    let mut ret_types = Vec::with_capacity(method.bindings.len());
    for binding in &method.bindings {
        let (name, expr) = rewrite_binding(binding, &aliases);
        let ty = return_type(binding, &name)?;
        if ty == STRING_TYPE {
            features.string = true;
        }
        exprs.push(expr);
        ret_types.push(ty);
    }

    let signature = match ret_types.len() {
        0 => format!("public fun {}({})", method.name, params.join(", ")),
        1 => format!(
            "public fun {}({}): {}",
            method.name,
            params.join(", "),
            ret_types[0]
        ),
        _ => format!(
            "public fun {}({}): ({})",
            method.name,
            params.join(", "),
            ret_types.join(", ")
        ),
    };

    let body = match exprs.len() {
        0 => None,
        1 => Some(exprs.remove(0)),
        _ => Some(format!("({})", exprs.join(", "))),
    };

    let mut lines = vec![format!("{signature} {{")];
    lines.extend(asserts.statements);
    if let Some(body) = body {
        lines.push(body);
    }
    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

/// First character of the declared parameter name.
fn short_alias(name: &str) -> String {
    name.chars()
        .next()
        .map(|c| c.to_ascii_lowercase().to_string())
        .unwrap_or_else(|| "v".to_string())
}

/// Rewrite a `const x = param.field` binding into `(x, alias.field)`.
///
/// A binding that does not match the expected shape is emitted verbatim
/// (quote-stripped) with its left-hand name used for type inference.
fn rewrite_binding(binding: &ViewBinding, aliases: &[(String, String)]) -> (String, String) {
    let decl = binding.decl.trim();
    let decl = decl.strip_prefix("const ").unwrap_or(decl);
    let Some((lhs, rhs)) = decl.split_once('=') else {
        return (decl.to_string(), decl.to_string());
    };
    let name = lhs.trim().to_string();
    let rhs = rhs.trim().trim_end_matches(';').trim();

    if let Some((obj, field)) = rhs.split_once('.') {
        if let Some((_, alias)) = aliases.iter().find(|(declared, _)| declared == obj.trim()) {
            return (name, format!("{alias}.{}", field.trim()));
        }
    }
    (name, rhs.to_string())
}

/// Return type for one binding: explicit annotation first, name heuristic
/// otherwise.
fn return_type(binding: &ViewBinding, name: &str) -> CodegenResult<String> {
    if let Some(ann) = &binding.type_ann {
        let context = format!("return annotation `{name}`");
        return types::map_type(ann.trim(), &context);
    }
    Ok(infer_by_name(name).to_string())
}

/// The documented field-name heuristic: identity-like names map to the
/// inner-id type, well-known label names to the string type, well-known
/// numeric names to `u64`, and anything unrecognized to the string type.
fn infer_by_name(name: &str) -> &'static str {
    if name == "id" || name.ends_with("_id") {
        return INNER_ID_TYPE;
    }
    match name {
        "name" | "lastname" | "username" => STRING_TYPE,
        "age" | "value" | "count" | "amount" => "u64",
        _ => STRING_TYPE,
    }
}

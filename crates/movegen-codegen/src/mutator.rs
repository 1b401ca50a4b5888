//! Mutator generation.
//!
//! Mutators receive objects by mutable reference and apply a straight-line
//! statement sequence. Statements arrive from the front-end as raw target
//! language text and are emitted verbatim; only assertions are compiled.
//! The transaction context is appended to the signature strictly when an
//! assertion needs the sender.

use movegen_types::{ConstantBinding, MethodSpec, ModuleSpec, ParamSpec};

use crate::assert;
use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::registry::ErrorCodeRegistry;
use crate::types;

/// Generate one mutator function.
pub fn generate(
    method: &MethodSpec,
    module: &ModuleSpec,
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    let mut params = Vec::with_capacity(method.params.len() + 1);
    for param in &method.params {
        params.push(map_param(method, param, module, features)?);
    }

    let asserts = assert::compile(&method.name, &method.assertions, constants, registry)?;
    features.string |= asserts.needs_string;
    if asserts.needs_sender {
        params.push("ctx: &mut TxContext".to_string());
    }

    let mut lines = vec![format!(
        "public fun {}({}) {{",
        method.name,
        params.join(", ")
    )];
    lines.extend(asserts.statements);
    for statement in &method.statements {
        lines.push(statement.trim().to_string());
    }
    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

/// Map one mutator parameter.
///
/// `Mut<Struct>` becomes `&mut Struct` (the struct must be declared in the
/// module); anything else maps by value through the type table.
fn map_param(
    method: &MethodSpec,
    param: &ParamSpec,
    module: &ModuleSpec,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    let host = param.host_type.trim();
    if let Some(rest) = host.strip_prefix("Mut<") {
        let inner = rest
            .strip_suffix('>')
            .map(|s| s.trim().trim_matches('\'').trim_matches('"'))
            .filter(|s| !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_'))
            .ok_or_else(|| CodegenError::MalformedParameterType {
                method: method.name.clone(),
                param: param.name.clone(),
                host_type: param.host_type.clone(),
            })?;
        if module.find_struct(inner).is_none() {
            return Err(CodegenError::UnknownStructReference {
                method: method.name.clone(),
                target: inner.to_string(),
            });
        }
        return Ok(format!("{}: &mut {inner}", param.name));
    }

    let context = format!("parameter `{}` of method `{}`", param.name, method.name);
    let mapped = types::map_type(host, &context)?;
    if mapped == types::STRING_TYPE {
        features.string = true;
    }
    Ok(format!("{}: {mapped}", param.name))
}

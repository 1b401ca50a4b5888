//! Constructor generation.
//!
//! A constructor takes the target struct's fields as value parameters plus
//! the transaction context, builds the object, and applies the transfer
//! policy. Body order is fixed: identity allocation, sender lookup (when
//! referenced), assertion checks, event emission, struct literal in
//! declared field order, transfer call.

use movegen_types::{ConstantBinding, MethodSpec, ModuleSpec, Recipient, TransferPolicy};

use crate::assert;
use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::registry::ErrorCodeRegistry;
use crate::structs::{has_identity, object_parts};

/// Generate one constructor function.
pub fn generate(
    method: &MethodSpec,
    target: &str,
    module: &ModuleSpec,
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    let spec = module
        .find_struct(target)
        .ok_or_else(|| CodegenError::UnknownStructReference {
            method: method.name.clone(),
            target: target.to_string(),
        })?;

    let parts = object_parts(spec, features)?;
    let asserts = assert::compile(&method.name, &method.assertions, constants, registry)?;
    features.string |= asserts.needs_string;

    // A constructor with no declared policy publishes the object shared.
    let policy = method
        .transfer
        .unwrap_or(TransferPolicy::Shared);

    let needs_sender = method.event.is_some()
        || matches!(
            policy,
            TransferPolicy::Owned {
                recipient: Recipient::Sender
            }
        );

    let mut params = parts.params.clone();
    if let TransferPolicy::Owned {
        recipient: Recipient::Address,
    } = policy
    {
        params.push("recipient: address".to_string());
    }
    params.push("ctx: &mut TxContext".to_string());

    let var = spec.name.to_lowercase();
    let mut lines = Vec::new();
    if matches!(policy, TransferPolicy::Owned { .. }) {
        lines.push("#[allow(lint(self_transfer))]".to_string());
    }
    lines.push(format!(
        "public fun {}({}) {{",
        method.name,
        params.join(", ")
    ));

    let with_identity = has_identity(spec);
    if with_identity {
        lines.push("let id = object::new(ctx);".to_string());
    }
    if needs_sender {
        lines.push("let sender = tx_context::sender(ctx);".to_string());
    }
    lines.extend(asserts.statements);

    if let Some(event) = &method.event {
        let id_expr = if with_identity {
            "object::uid_to_inner(&id)"
        } else {
            "object::id_from_address(@0x0)"
        };
        let mut event_fields = vec![format!("object_id: {id_expr}")];
        event_fields.extend(parts.field_names.iter().cloned());
        event_fields.push("created_by: sender".to_string());
        lines.push(format!(
            "event::emit({} {{ {} }});",
            event.name,
            event_fields.join(", ")
        ));
        features.event = true;
    }

    let mut literal_fields: Vec<String> = Vec::new();
    if with_identity {
        literal_fields.push("id".to_string());
    }
    literal_fields.extend(parts.field_names.iter().cloned());
    lines.push(format!(
        "let {var} = {} {{ {} }};",
        spec.name,
        literal_fields.join(", ")
    ));

    lines.push(match policy {
        TransferPolicy::Owned {
            recipient: Recipient::Sender,
        } => format!("transfer::transfer({var}, sender);"),
        TransferPolicy::Owned {
            recipient: Recipient::Address,
        } => format!("transfer::transfer({var}, recipient);"),
        TransferPolicy::Shared => format!("transfer::share_object({var});"),
        TransferPolicy::Frozen => format!("transfer::freeze_object({var});"),
    });
    lines.push("}".to_string());

    Ok(lines.join("\n"))
}

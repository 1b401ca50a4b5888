//! NFT-style mint generation.
//!
//! The mint function builds and returns the object; the attached transfer
//! policy adds a wrapper that mints and immediately dispatches. A mint
//! declared with display metadata also contributes a fragment to the
//! module's one-time `init` (publisher claim and display registration are
//! assembled there, once, no matter how many mints request display).

use movegen_types::{ConstantBinding, MethodSpec, ModuleSpec, Recipient, StructSpec, TransferPolicy};

use crate::assert;
use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::registry::ErrorCodeRegistry;
use crate::structs::object_parts;

/// The generated pieces for one mint declaration.
#[derive(Debug, Clone)]
pub struct MintOutput {
    /// The mint function plus any transfer wrappers.
    pub functions: String,
    /// Display-registration statements for the module `init`, when the
    /// declaration requested display metadata.
    pub display_init: Option<String>,
}

/// Generate one mint family.
pub fn generate(
    method: &MethodSpec,
    target: &str,
    display: bool,
    module: &ModuleSpec,
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
    features: &mut FeatureFlags,
) -> CodegenResult<MintOutput> {
    let spec = module
        .find_struct(target)
        .ok_or_else(|| CodegenError::UnknownStructReference {
            method: method.name.clone(),
            target: target.to_string(),
        })?;

    let parts = object_parts(spec, features)?;
    let asserts = assert::compile(&method.name, &method.assertions, constants, registry)?;
    features.string |= asserts.needs_string;

    let mut params = parts.params.clone();
    params.push("ctx: &mut TxContext".to_string());
    let mut literal = vec!["id: object::new(ctx)".to_string()];
    literal.extend(parts.field_names.iter().cloned());

    let var = format!("nft_{}", spec.name.to_lowercase());
    let mut lines = vec![format!(
        "public fun {}({}): {} {{",
        method.name,
        params.join(", "),
        spec.name
    )];
    lines.extend(asserts.statements);
    lines.push(format!(
        "let {var} = {} {{ {} }};",
        spec.name,
        literal.join(", ")
    ));
    lines.push(var.clone());
    lines.push("}".to_string());
    let mut functions = lines.join("\n");

    if let Some(policy) = method.transfer {
        functions.push('\n');
        functions.push_str(&render_wrapper(method, &parts.params, &parts.field_names, policy));
    }

    let display_init = if display {
        features.display = true;
        features.string = true;
        Some(render_display(spec))
    } else {
        None
    };

    Ok(MintOutput {
        functions,
        display_init,
    })
}

fn render_wrapper(
    method: &MethodSpec,
    field_params: &[String],
    field_names: &[String],
    policy: TransferPolicy,
) -> String {
    let mut args: Vec<String> = field_names.to_vec();
    args.push("ctx".to_string());
    let call = format!("let nft = {}({});", method.name, args.join(", "));

    let mut params: Vec<String> = field_params.to_vec();
    if matches!(
        policy,
        TransferPolicy::Owned {
            recipient: Recipient::Address
        }
    ) {
        params.insert(0, "recipient: address".to_string());
    }
    params.push("ctx: &mut TxContext".to_string());
    let params = params.join(", ");

    match policy {
        TransferPolicy::Owned {
            recipient: Recipient::Sender,
        } => [
            "#[allow(lint(self_transfer))]".to_string(),
            format!("public fun {}_transfer({params}) {{", method.name),
            call,
            "let sender = tx_context::sender(ctx);".to_string(),
            "transfer::transfer(nft, sender);".to_string(),
            "}".to_string(),
        ]
        .join("\n"),
        TransferPolicy::Owned {
            recipient: Recipient::Address,
        } => [
            format!("public fun {}_transfer_to({params}) {{", method.name),
            call,
            "transfer::transfer(nft, recipient);".to_string(),
            "}".to_string(),
        ]
        .join("\n"),
        TransferPolicy::Shared => [
            format!("public fun {}_share({params}) {{", method.name),
            call,
            "transfer::share_object(nft);".to_string(),
            "}".to_string(),
        ]
        .join("\n"),
        TransferPolicy::Frozen => [
            format!("public fun {}_freeze({params}) {{", method.name),
            call,
            "transfer::freeze_object(nft);".to_string(),
            "}".to_string(),
        ]
        .join("\n"),
    }
}

/// Display registration over the struct's declared field names: one label
/// vector and one `{placeholder}` vector, in field order.
fn render_display(spec: &StructSpec) -> String {
    let labels = spec
        .fields
        .iter()
        .map(|f| format!("string::utf8(b\"{}\")", f.name))
        .collect::<Vec<_>>()
        .join(", ");
    let values = spec
        .fields
        .iter()
        .map(|f| format!("string::utf8(b\"{{{}}}\")", f.name))
        .collect::<Vec<_>>()
        .join(", ");

    [
        format!(
            "let mut display = display::new_with_fields<{}>(",
            spec.name
        ),
        "&publisher,".to_string(),
        format!("vector[{labels}],"),
        format!("vector[{values}],"),
        "ctx".to_string(),
        ");".to_string(),
        "display::update_version(&mut display);".to_string(),
        "transfer::public_transfer(display, tx_context::sender(ctx));".to_string(),
    ]
    .join("\n")
}

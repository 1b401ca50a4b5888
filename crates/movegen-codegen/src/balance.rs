//! Balance-module generation.
//!
//! One shared resource per declared balance group: a struct holding the
//! accumulated total and the owning address, an initializer that records
//! the creating sender as owner, and the enabled subset of
//! deposit / withdraw / get_balance functions. Function names are suffixed
//! with the resource name so two balance groups in one module never
//! collide.

use movegen_types::{BalanceOpKind, ConstantBinding, MethodSpec};

use crate::assert::{self, Predicate};
use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::registry::ErrorCodeRegistry;

/// Error code guarding the withdraw owner check.
const OWNER_CODE: &str = "ERR_NOT_OWNER";

/// Generate the resource struct, initializer, and enabled operations for
/// one balance group.
pub fn generate(
    method: &MethodSpec,
    target: &str,
    ops: &[BalanceOpKind],
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    if !target.chars().next().is_some_and(|c| c.is_ascii_uppercase()) {
        return Err(CodegenError::InvalidResourceName {
            name: target.to_string(),
        });
    }
    features.balance = true;

    let resource = format!("{target}Balance");
    let mut blocks = vec![render_resource(&resource), render_init(&resource)];

    // Bounded-amount predicates are pre-parsed once and routed to the
    // function that binds the amount variable they compare against.
    let mut deposit_asserts = Vec::new();
    let mut withdraw_asserts = Vec::new();
    for spec in &method.assertions {
        let predicate = assert::parse_predicate(&spec.predicate);
        if let Predicate::BoundedAmount { op, .. } = &predicate {
            let rendered = assert::render_predicate(
                &method.name,
                &predicate,
                &spec.error_code,
                constants,
                registry,
            )?;
            if op.is_deposit() {
                deposit_asserts.push(rendered);
            } else {
                withdraw_asserts.push(rendered);
            }
        }
    }

    if ops.contains(&BalanceOpKind::Deposit) {
        blocks.push(render_deposit(&resource, &deposit_asserts));
    }
    if ops.contains(&BalanceOpKind::Withdraw) {
        blocks.push(render_withdraw(&method.name, &resource, &withdraw_asserts, registry)?);
    }
    if ops.contains(&BalanceOpKind::GetBalance) {
        blocks.push(render_get_balance(&resource));
    }

    Ok(blocks.join("\n"))
}

fn render_resource(resource: &str) -> String {
    [
        format!("public struct {resource} has key, store {{"),
        "id: UID,".to_string(),
        "total: Balance<SUI>,".to_string(),
        "owner: address,".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

fn render_init(resource: &str) -> String {
    [
        format!("public fun init_{resource}(ctx: &mut TxContext) {{"),
        "let sender = tx_context::sender(ctx);".to_string(),
        format!("let obj = {resource} {{"),
        "id: object::new(ctx),".to_string(),
        "total: balance::zero<SUI>(),".to_string(),
        "owner: sender,".to_string(),
        "};".to_string(),
        "transfer::public_share_object(obj);".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

fn render_deposit(resource: &str, asserts: &[String]) -> String {
    let mut lines = vec![
        format!("public fun deposit_{resource}(balance_obj: &mut {resource}, coins: Coin<SUI>) {{"),
        "let incoming = coin::into_balance(coins);".to_string(),
    ];
    if !asserts.is_empty() {
        lines.push("let amount = balance::value(&incoming);".to_string());
        lines.extend(asserts.iter().cloned());
    }
    lines.push("balance::join(&mut balance_obj.total, incoming);".to_string());
    lines.push("}".to_string());
    lines.join("\n")
}

fn render_withdraw(
    method: &str,
    resource: &str,
    asserts: &[String],
    registry: &mut ErrorCodeRegistry,
) -> CodegenResult<String> {
    let owner_value = assert::error_code_value(OWNER_CODE).ok_or_else(|| {
        CodegenError::UnknownErrorCode {
            method: method.to_string(),
            code: OWNER_CODE.to_string(),
        }
    })?;
    registry.register(OWNER_CODE, owner_value);

    let mut lines = vec![
        format!(
            "public fun withdraw_{resource}(balance_obj: &mut {resource}, amount: u64, ctx: &mut TxContext): Coin<SUI> {{"
        ),
        "let sender = tx_context::sender(ctx);".to_string(),
        format!("assert!(sender == balance_obj.owner, {OWNER_CODE});"),
    ];
    lines.extend(asserts.iter().cloned());
    lines.push("let split = balance::split(&mut balance_obj.total, amount);".to_string());
    lines.push("coin::from_balance(split, ctx)".to_string());
    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

fn render_get_balance(resource: &str) -> String {
    [
        format!("public fun get_balance_{resource}(balance_obj: &{resource}): u64 {{"),
        "balance::value(&balance_obj.total)".to_string(),
        "}".to_string(),
    ]
    .join("\n")
}

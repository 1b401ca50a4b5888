//! Determinism harness.
//!
//! Two proofs:
//! 1. **Output determinism**: compile the same IR N times — every source
//!    string and every SHA-256 digest must be identical.
//! 2. **Hand-off determinism**: round-trip the IR through JSON (the
//!    front-end contract) and compile both sides — outputs must match.

use movegen_compiler::compile;
use movegen_types::{
    Ability, AbilitySet, AssertionSpec, BalanceOpKind, ConstantBinding, FieldSpec, MethodKind,
    MethodSpec, ModuleSpec, StructSpec, TransferPolicy,
};

fn budget_module() -> ModuleSpec {
    let mut create = MethodSpec {
        name: "create_announcement".into(),
        params: vec![],
        kind: MethodKind::Constructor {
            target: "Announcement".into(),
        },
        assertions: vec![AssertionSpec {
            predicate: "helper.min('message', 5)".into(),
            error_code: "ERR_MESSAGE_TOO_SHORT".into(),
        }],
        transfer: Some(TransferPolicy::Shared),
        statements: vec![],
        bindings: vec![],
        event: None,
    };
    create.assertions.push(AssertionSpec {
        predicate: "helper.onlyFor(OWNER_ADDRESS)".into(),
        error_code: "ERR_ONLY_OWNER".into(),
    });

    let budget = MethodSpec {
        name: "Budget".into(),
        params: vec![],
        kind: MethodKind::BalanceOp {
            target: "Budget".into(),
            ops: vec![BalanceOpKind::Deposit, BalanceOpKind::GetBalance],
        },
        assertions: vec![AssertionSpec {
            predicate: "helper.minDeposit(5)".into(),
            error_code: "ERR_MIN_AMOUNT".into(),
        }],
        transfer: None,
        statements: vec![],
        bindings: vec![],
        event: None,
    };

    ModuleSpec {
        package: "hello_world".into(),
        module: "asserti".into(),
        structs: vec![StructSpec {
            name: "Announcement".into(),
            fields: vec![FieldSpec {
                name: "message".into(),
                host_type: "string".into(),
            }],
            abilities: AbilitySet::new(&[Ability::Key, Ability::Store]),
            list_wrapper: None,
        }],
        methods: vec![create, budget],
    }
}

fn constants() -> Vec<ConstantBinding> {
    vec![ConstantBinding {
        name: "OWNER_ADDRESS".into(),
        value: "'0x2'".into(),
    }]
}

#[test]
fn hundred_compiles_are_byte_identical() {
    let module = budget_module();
    let constants = constants();
    let first = compile(&module, &constants).unwrap();

    for i in 0..100 {
        let output = compile(&module, &constants).unwrap();
        assert_eq!(output.source, first.source, "source diverged at iteration {i}");
        assert_eq!(
            output.source_hash, first.source_hash,
            "digest diverged at iteration {i}"
        );
    }
}

#[test]
fn digest_matches_source_identity() {
    let module = budget_module();
    let constants = constants();
    let a = compile(&module, &constants).unwrap();
    let b = compile(&module, &constants).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.source_hash.len(), 64);
}

#[test]
fn json_round_tripped_ir_compiles_identically() {
    let module = budget_module();
    let constants = constants();

    let json = serde_json::to_string(&module).unwrap();
    let back: ModuleSpec = serde_json::from_str(&json).unwrap();
    assert_eq!(back, module);

    let direct = compile(&module, &constants).unwrap();
    let round_tripped = compile(&back, &constants).unwrap();
    assert_eq!(direct, round_tripped);
}

#[test]
fn error_constant_order_is_first_seen_order() {
    let output = compile(&budget_module(), &constants()).unwrap();
    let message = output
        .source
        .find("const ERR_MESSAGE_TOO_SHORT: u64 = 3;")
        .unwrap();
    let owner = output.source.find("const ERR_ONLY_OWNER: u64 = 4;").unwrap();
    let min = output.source.find("const ERR_MIN_AMOUNT: u64 = 6;").unwrap();
    assert!(message < owner && owner < min);
}

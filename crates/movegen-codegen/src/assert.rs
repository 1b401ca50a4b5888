//! Assertion compiler — the precondition DSL.
//!
//! Each raw predicate is parsed ONCE into a tagged [`Predicate`] variant,
//! then rendered into a Move `assert!` statement. Parsing precedence
//! (first match wins): minimum-length helper, address-restriction helper,
//! bounded-amount helpers, raw boolean expression. A helper call that does
//! not parse cleanly falls through to the next form.
//!
//! Every successfully compiled assertion registers its error code with the
//! [`ErrorCodeRegistry`]; the numeric value comes from the fixed symbolic
//! table in [`error_code_value`]. A symbol absent from that table aborts
//! compilation — `assert!` is never emitted against a missing constant.

use movegen_types::{AssertionSpec, ConstantBinding};

use crate::error::{CodegenError, CodegenResult};
use crate::registry::ErrorCodeRegistry;

// ══════════════════════════════════════════════════════════════════════════════
// Predicate grammar
// ══════════════════════════════════════════════════════════════════════════════

/// A parsed precondition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `helper.min(field, N)` — minimum string length.
    MinLength { field: String, min: u64 },
    /// `helper.onlyFor(addr)` — restrict to one sender address.
    OnlyFor { arg: String },
    /// `helper.minDeposit(N)` and friends — numeric bound on an amount
    /// variable bound by the surrounding balance generator.
    BoundedAmount { op: AmountOp, limit: u64 },
    /// Anything else: emitted verbatim (quote-stripped) as the condition.
    Raw(String),
}

/// The four bounded-amount helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountOp {
    MinDeposit,
    MaxDeposit,
    MinWithdraw,
    MaxWithdraw,
}

impl AmountOp {
    /// The comparison operator: `>=` for minimums, `<=` for maximums.
    pub fn cmp(self) -> &'static str {
        match self {
            Self::MinDeposit | Self::MinWithdraw => ">=",
            Self::MaxDeposit | Self::MaxWithdraw => "<=",
        }
    }

    pub fn is_deposit(self) -> bool {
        matches!(self, Self::MinDeposit | Self::MaxDeposit)
    }
}

/// Parse a raw predicate into its tagged form.
pub fn parse_predicate(raw: &str) -> Predicate {
    let raw = raw.trim();

    if let Some(inner) = helper_call(raw, "min") {
        if let Some((field, min)) = parse_min_args(inner) {
            return Predicate::MinLength { field, min };
        }
    }
    if let Some(inner) = helper_call(raw, "onlyFor") {
        if !inner.is_empty() {
            return Predicate::OnlyFor {
                arg: inner.to_string(),
            };
        }
    }
    for (name, op) in [
        ("minDeposit", AmountOp::MinDeposit),
        ("maxDeposit", AmountOp::MaxDeposit),
        ("minWithdraw", AmountOp::MinWithdraw),
        ("maxWithdraw", AmountOp::MaxWithdraw),
    ] {
        if let Some(inner) = helper_call(raw, name) {
            if let Ok(limit) = inner.parse::<u64>() {
                return Predicate::BoundedAmount { op, limit };
            }
        }
    }

    Predicate::Raw(strip_quotes(raw).to_string())
}

/// Extract the argument text of `helper.<name>(...)`, or `None` if `raw`
/// is not exactly that call.
fn helper_call<'a>(raw: &'a str, name: &str) -> Option<&'a str> {
    let rest = raw.strip_prefix("helper.")?.strip_prefix(name)?;
    let rest = rest.trim_start().strip_prefix('(')?;
    Some(rest.strip_suffix(')')?.trim())
}

/// Parse `'field', N` — a quoted field name and a decimal bound.
fn parse_min_args(inner: &str) -> Option<(String, u64)> {
    let (field_raw, min_raw) = inner.split_once(',')?;
    let field = strip_quotes(field_raw.trim());
    if field.is_empty() || field.contains(|c: char| c.is_whitespace()) {
        return None;
    }
    let min = min_raw.trim().parse::<u64>().ok()?;
    Some((field.to_string(), min))
}

fn strip_quotes(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| s.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(s)
}

// ══════════════════════════════════════════════════════════════════════════════
// Symbolic error-code table
// ══════════════════════════════════════════════════════════════════════════════

/// Numeric value for a symbolic error-code name.
pub fn error_code_value(name: &str) -> Option<u64> {
    Some(match name {
        "ERR_UNDERAGE" => 1,
        "ERR_TOO_SHORT" => 2,
        "ERR_MESSAGE_TOO_SHORT" => 3,
        "ERR_ONLY_OWNER" => 4,
        "ERR_NOT_OWNER" => 5,
        "ERR_MIN_AMOUNT" => 6,
        "ERR_MAX_AMOUNT_REACHED" => 7,
        "ERR_MIN_WITHDRAW" => 8,
        "ERR_MAX_WITHDRAW" => 9,
        "ERR_EMPTY_LIST" => 10,
        _ => return None,
    })
}

// ══════════════════════════════════════════════════════════════════════════════
// Compilation
// ══════════════════════════════════════════════════════════════════════════════

/// The compiled form of a method's assertion list.
#[derive(Debug, Clone, Default)]
pub struct CompiledAssertions {
    /// One `assert!` statement per assertion, in declaration order.
    pub statements: Vec<String>,
    /// At least one predicate reads the transaction sender, so the
    /// surrounding function needs the context parameter.
    pub needs_sender: bool,
    /// At least one predicate calls `string::length`.
    pub needs_string: bool,
}

/// Compile a method's assertions into `assert!` statements, registering
/// every referenced error code.
pub fn compile(
    method: &str,
    assertions: &[AssertionSpec],
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
) -> CodegenResult<CompiledAssertions> {
    let mut out = CompiledAssertions::default();
    for spec in assertions {
        let predicate = parse_predicate(&spec.predicate);
        match &predicate {
            Predicate::OnlyFor { .. } => out.needs_sender = true,
            Predicate::MinLength { .. } => out.needs_string = true,
            _ => {}
        }
        out.statements.push(render_predicate(
            method,
            &predicate,
            &spec.error_code,
            constants,
            registry,
        )?);
    }
    Ok(out)
}

/// Render one parsed predicate against its error code.
///
/// Looks up and registers the code's numeric value, resolves constants
/// referenced by `OnlyFor`, and produces the final `assert!` line.
pub fn render_predicate(
    method: &str,
    predicate: &Predicate,
    error_code: &str,
    constants: &[ConstantBinding],
    registry: &mut ErrorCodeRegistry,
) -> CodegenResult<String> {
    let value = error_code_value(error_code).ok_or_else(|| CodegenError::UnknownErrorCode {
        method: method.to_string(),
        code: error_code.to_string(),
    })?;
    registry.register(error_code, value);

    Ok(match predicate {
        Predicate::MinLength { field, min } => {
            format!("assert!(string::length(&{field}) >= {min}, {error_code});")
        }
        Predicate::OnlyFor { arg } => {
            let address = resolve_address(method, arg, constants)?;
            format!("assert!(tx_context::sender(ctx) == {address}, {error_code});")
        }
        Predicate::BoundedAmount { op, limit } => {
            format!("assert!(amount {} {limit}, {error_code});", op.cmp())
        }
        Predicate::Raw(expr) => format!("assert!({expr}, {error_code});"),
    })
}

/// Resolve an `onlyFor` argument to a Move address literal.
///
/// A quoted or `0x`-leading argument is already a literal; a bare
/// identifier is looked up in the constant-binding table. An unbound
/// identifier is a hard error, never a silent pass-through.
fn resolve_address(
    method: &str,
    arg: &str,
    constants: &[ConstantBinding],
) -> CodegenResult<String> {
    let trimmed = arg.trim();
    let stripped = strip_quotes(trimmed);

    let literal = if stripped != trimmed || stripped.starts_with("0x") || stripped.starts_with('@')
    {
        stripped.to_string()
    } else {
        let binding = constants
            .iter()
            .find(|c| c.name == stripped)
            .ok_or_else(|| CodegenError::UnresolvedConstant {
                method: method.to_string(),
                name: stripped.to_string(),
            })?;
        strip_quotes(&binding.value).to_string()
    };

    Ok(if literal.starts_with('@') {
        literal
    } else {
        format!("@{literal}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xbed1a0d1bb2b8e281d81b838f6c35d7864936f0de3233eb161181ab765e0ea40";

    fn constants() -> Vec<ConstantBinding> {
        vec![ConstantBinding {
            name: "MY_ADDRESS".into(),
            value: format!("'{ADDR}'"),
        }]
    }

    fn spec(predicate: &str, code: &str) -> AssertionSpec {
        AssertionSpec {
            predicate: predicate.into(),
            error_code: code.into(),
        }
    }

    #[test]
    fn parses_min_length() {
        assert_eq!(
            parse_predicate("helper.min('message', 10)"),
            Predicate::MinLength {
                field: "message".into(),
                min: 10
            }
        );
    }

    #[test]
    fn parses_only_for() {
        assert_eq!(
            parse_predicate("helper.onlyFor(MY_ADDRESS)"),
            Predicate::OnlyFor {
                arg: "MY_ADDRESS".into()
            }
        );
    }

    #[test]
    fn parses_bounded_amounts() {
        assert_eq!(
            parse_predicate("helper.minDeposit(5)"),
            Predicate::BoundedAmount {
                op: AmountOp::MinDeposit,
                limit: 5
            }
        );
        assert_eq!(
            parse_predicate("helper.maxWithdraw(2)"),
            Predicate::BoundedAmount {
                op: AmountOp::MaxWithdraw,
                limit: 2
            }
        );
    }

    #[test]
    fn min_does_not_shadow_min_deposit() {
        // Precedence: `helper.min(` must not capture `helper.minDeposit(`.
        assert!(matches!(
            parse_predicate("helper.minDeposit(5)"),
            Predicate::BoundedAmount { .. }
        ));
    }

    #[test]
    fn everything_else_is_raw_quote_stripped() {
        assert_eq!(parse_predicate("'age > 10'"), Predicate::Raw("age > 10".into()));
        assert_eq!(parse_predicate("age > 10"), Predicate::Raw("age > 10".into()));
    }

    #[test]
    fn max_bounds_compare_with_lte() {
        assert_eq!(AmountOp::MaxDeposit.cmp(), "<=");
        assert_eq!(AmountOp::MaxWithdraw.cmp(), "<=");
        assert_eq!(AmountOp::MinWithdraw.cmp(), ">=");
    }

    #[test]
    fn compiles_min_length_with_registered_code() {
        let mut reg = ErrorCodeRegistry::new();
        let out = compile(
            "create_announcement",
            &[spec("helper.min('message', 10)", "ERR_TOO_SHORT")],
            &[],
            &mut reg,
        )
        .unwrap();
        assert_eq!(
            out.statements,
            vec!["assert!(string::length(&message) >= 10, ERR_TOO_SHORT);"]
        );
        assert!(out.needs_string);
        assert!(!out.needs_sender);
        assert_eq!(reg.all_codes(), &[("ERR_TOO_SHORT".to_string(), 2)]);
    }

    #[test]
    fn only_for_resolves_symbolic_constant() {
        let mut reg = ErrorCodeRegistry::new();
        let out = compile(
            "change_name",
            &[spec("helper.onlyFor(MY_ADDRESS)", "ERR_ONLY_OWNER")],
            &constants(),
            &mut reg,
        )
        .unwrap();
        assert_eq!(
            out.statements,
            vec![format!("assert!(tx_context::sender(ctx) == @{ADDR}, ERR_ONLY_OWNER);")]
        );
        assert!(out.needs_sender);
    }

    #[test]
    fn only_for_accepts_inline_literal() {
        let mut reg = ErrorCodeRegistry::new();
        let out = compile(
            "m",
            &[spec(&format!("helper.onlyFor('{ADDR}')"), "ERR_ONLY_OWNER")],
            &[],
            &mut reg,
        )
        .unwrap();
        assert!(out.statements[0].contains(&format!("@{ADDR}")));
    }

    #[test]
    fn unbound_constant_is_an_error() {
        let mut reg = ErrorCodeRegistry::new();
        let err = compile(
            "change_name",
            &[spec("helper.onlyFor(OWNER)", "ERR_ONLY_OWNER")],
            &[],
            &mut reg,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnresolvedConstant {
                method: "change_name".into(),
                name: "OWNER".into(),
            }
        );
    }

    #[test]
    fn unknown_error_code_is_an_error() {
        let mut reg = ErrorCodeRegistry::new();
        let err = compile("m", &[spec("age > 10", "ERR_BOGUS")], &[], &mut reg).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnknownErrorCode {
                method: "m".into(),
                code: "ERR_BOGUS".into(),
            }
        );
        // Nothing was registered for the failing assertion.
        assert!(reg.is_empty());
    }

    #[test]
    fn code_registered_once_across_two_methods() {
        let mut reg = ErrorCodeRegistry::new();
        let asserts = [spec("helper.min('message', 10)", "ERR_TOO_SHORT")];
        compile("a", &asserts, &[], &mut reg).unwrap();
        compile("b", &asserts, &[], &mut reg).unwrap();
        assert_eq!(reg.all_codes().len(), 1);
    }
}

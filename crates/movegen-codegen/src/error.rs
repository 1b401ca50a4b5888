//! Codegen error types.

use thiserror::Error;

/// Errors that can occur during Move code generation.
///
/// All variants carry enough context (struct/method/parameter name) to
/// locate the offending declaration. Every one of these is fail-fast: a
/// later generation step could not proceed safely past it, and no partial
/// module output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodegenError {
    /// A type name looks like a reserved primitive keyword but has no
    /// entry in the mapping table.
    #[error("unknown primitive type `{name}` ({context})")]
    UnknownPrimitiveType { name: String, context: String },

    /// A method references a struct that is not declared in the module.
    #[error("method `{method}` references unknown struct `{target}`")]
    UnknownStructReference { method: String, target: String },

    /// A parameter type annotation could not be parsed into
    /// mutability + struct name.
    #[error("method `{method}`: parameter `{param}` has malformed type `{host_type}`")]
    MalformedParameterType {
        method: String,
        param: String,
        host_type: String,
    },

    /// An assertion references a symbolic constant with no binding.
    #[error("method `{method}`: assertion references unresolved constant `{name}`")]
    UnresolvedConstant { method: String, name: String },

    /// An assertion references an error-code symbol with no numeric
    /// mapping — `assert!` must never be emitted with a missing constant.
    #[error("method `{method}`: error code `{code}` has no numeric mapping")]
    UnknownErrorCode { method: String, code: String },

    /// A balance resource name violates the uppercase-leading naming
    /// convention.
    #[error("balance resource `{name}` must start with an uppercase letter")]
    InvalidResourceName { name: String },
}

/// Codegen result type alias.
pub type CodegenResult<T> = Result<T, CodegenError>;

//! Host-type → Move-type mapping.
//!
//! Table-driven. Custom struct names pass through unchanged as Move type
//! references; the only hard failure is a name that looks like a reserved
//! primitive keyword but has no table entry.

use crate::error::{CodegenError, CodegenResult};

/// The mapped Move string type. Fields or parameters resolving to this
/// type require the `std::string` import.
pub const STRING_TYPE: &str = "String";

/// The identity type injected into every `key` struct.
pub const ID_FIELD_TYPE: &str = "UID";

/// The inner-id type used by events and views.
pub const INNER_ID_TYPE: &str = "ID";

/// Map a host-language type name to its Move counterpart.
///
/// `context` describes where the name appeared (e.g. "field `age` of
/// struct `User`") and is carried into the error on failure.
pub fn map_type(host: &str, context: &str) -> CodegenResult<String> {
    if let Some(mapped) = table_lookup(host) {
        return Ok(mapped.to_string());
    }
    if is_reserved_primitive(host) {
        return Err(CodegenError::UnknownPrimitiveType {
            name: host.to_string(),
            context: context.to_string(),
        });
    }
    // A custom struct reference — passes through as a Move type name.
    Ok(host.to_string())
}

/// Map a host type appearing as a view-function parameter.
///
/// Primitives map as usual; a custom struct reference becomes a shared
/// reference, because getters must not take ownership of the object they
/// read.
pub fn map_view_param(host: &str, context: &str) -> CodegenResult<String> {
    if let Some(mapped) = table_lookup(host) {
        return Ok(mapped.to_string());
    }
    if is_reserved_primitive(host) {
        return Err(CodegenError::UnknownPrimitiveType {
            name: host.to_string(),
            context: context.to_string(),
        });
    }
    Ok(format!("&{host}"))
}

fn table_lookup(host: &str) -> Option<&'static str> {
    Some(match host {
        "string" | "String" => STRING_TYPE,
        "u8" => "u8",
        "u16" => "u16",
        "u32" => "u32",
        "u64" => "u64",
        "u128" => "u128",
        "u256" => "u256",
        "bool" => "bool",
        "address" => "address",
        "UID" => ID_FIELD_TYPE,
        "ID" => INNER_ID_TYPE,
        _ => return None,
    })
}

/// Whether a name reads as a primitive keyword: `u`/`i`/`f` followed by a
/// bit width, or one of the host language's scalar keywords.
fn is_reserved_primitive(name: &str) -> bool {
    const RESERVED: &[&str] = &["int", "uint", "float", "number", "byte", "char", "str"];
    if RESERVED.contains(&name) {
        return true;
    }
    let mut chars = name.chars();
    matches!(chars.next(), Some('u' | 'i' | 'f'))
        && !chars.as_str().is_empty()
        && chars.all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_map_through_table() {
        assert_eq!(map_type("string", "t").unwrap(), "String");
        assert_eq!(map_type("u64", "t").unwrap(), "u64");
        assert_eq!(map_type("bool", "t").unwrap(), "bool");
        assert_eq!(map_type("address", "t").unwrap(), "address");
        assert_eq!(map_type("UID", "t").unwrap(), "UID");
    }

    #[test]
    fn custom_struct_names_pass_through() {
        assert_eq!(map_type("Person", "t").unwrap(), "Person");
        assert_eq!(map_type("CounterItem", "t").unwrap(), "CounterItem");
    }

    #[test]
    fn view_params_take_references_to_structs() {
        assert_eq!(map_view_param("Person", "t").unwrap(), "&Person");
        // Primitives stay by-value even in a view context.
        assert_eq!(map_view_param("u64", "t").unwrap(), "u64");
    }

    #[test]
    fn reserved_looking_names_are_rejected() {
        let err = map_type("u512", "field `x` of struct `Y`").unwrap_err();
        match err {
            CodegenError::UnknownPrimitiveType { name, context } => {
                assert_eq!(name, "u512");
                assert!(context.contains("struct `Y`"));
            }
            other => panic!("expected UnknownPrimitiveType, got {other:?}"),
        }
        assert!(map_type("i32", "t").is_err());
        assert!(map_type("number", "t").is_err());
        assert!(map_type("float", "t").is_err());
    }

    #[test]
    fn bare_prefix_letters_are_not_reserved() {
        // `u`, `i`, `f` alone are ordinary identifiers.
        assert_eq!(map_type("u", "t").unwrap(), "u");
        assert_eq!(map_type("f", "t").unwrap(), "f");
    }
}

//! List-container operation generation.
//!
//! Every list wrapper gets a create function (allocates the wrapper with
//! an empty vector and hands it to the sender), a push function built from
//! the declared method (constructs an item from field parameters and
//! appends it), and a count view.

use movegen_types::{MethodSpec, ModuleSpec};

use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::structs::object_parts;

/// Generate the operation family for one list-wrapped struct.
///
/// The target must be declared in the module AND carry a list-wrapper
/// marker — a bare struct cannot back a growable container.
pub fn generate(
    method: &MethodSpec,
    target: &str,
    module: &ModuleSpec,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    let (spec, wrapper) = module
        .find_struct(target)
        .and_then(|s| s.list_wrapper.as_ref().map(|w| (s, w)))
        .ok_or_else(|| CodegenError::UnknownStructReference {
            method: method.name.clone(),
            target: target.to_string(),
        })?;

    let parts = object_parts(spec, features)?;
    let item_var = spec.name.to_lowercase();
    let wrapper_ty = &wrapper.wrapper;
    let field = &wrapper.field;

    let create = [
        format!("public fun create_{item_var}_list(ctx: &mut TxContext) {{"),
        "let sender = tx_context::sender(ctx);".to_string(),
        format!("let list = {wrapper_ty} {{"),
        "id: object::new(ctx),".to_string(),
        format!("{field}: vector::empty<{}>(),", spec.name),
        "};".to_string(),
        "transfer::transfer(list, sender);".to_string(),
        "}".to_string(),
    ]
    .join("\n");

    let mut push_params = vec![format!("list: &mut {wrapper_ty}")];
    push_params.extend(parts.params.iter().cloned());
    let push = [
        format!("public fun {}({}) {{", method.name, push_params.join(", ")),
        format!("let item = {} {{ {} }};", spec.name, parts.literal_body()),
        format!("vector::push_back(&mut list.{field}, item);"),
        "}".to_string(),
    ]
    .join("\n");

    let count = [
        format!("public fun count_{item_var}(list: &{wrapper_ty}): u64 {{"),
        format!("vector::length(&list.{field})"),
        "}".to_string(),
    ]
    .join("\n");

    Ok([create, push, count].join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use movegen_types::{
        Ability, AbilitySet, FieldSpec, ListWrapper, MethodKind, StructSpec,
    };

    fn people_module() -> ModuleSpec {
        ModuleSpec {
            package: "wordi".into(),
            module: "peoplei".into(),
            structs: vec![StructSpec {
                name: "People".into(),
                fields: vec![
                    FieldSpec {
                        name: "name".into(),
                        host_type: "string".into(),
                    },
                    FieldSpec {
                        name: "age".into(),
                        host_type: "u32".into(),
                    },
                ],
                abilities: AbilitySet::new(&[Ability::Key, Ability::Store]),
                list_wrapper: Some(ListWrapper {
                    wrapper: "PeopleList".into(),
                    field: "people".into(),
                }),
            }],
            methods: vec![],
        }
    }

    fn list_method() -> MethodSpec {
        MethodSpec {
            name: "add_people".into(),
            params: vec![],
            kind: MethodKind::ListOp {
                target: "People".into(),
            },
            assertions: vec![],
            transfer: None,
            statements: vec![],
            bindings: vec![],
            event: None,
        }
    }

    #[test]
    fn emits_create_push_and_count() {
        let module = people_module();
        let mut features = FeatureFlags::default();
        let out = generate(&list_method(), "People", &module, &mut features).unwrap();
        assert!(out.contains("public fun create_people_list(ctx: &mut TxContext) {"));
        assert!(out.contains("people: vector::empty<People>(),"));
        assert!(out.contains(
            "public fun add_people(list: &mut PeopleList, name: String, age: u32) {"
        ));
        assert!(out.contains("let item = People { name, age };"));
        assert!(out.contains("vector::push_back(&mut list.people, item);"));
        assert!(out.contains("public fun count_people(list: &PeopleList): u64 {"));
        assert!(features.string);
    }

    #[test]
    fn wrapperless_target_is_fatal() {
        let mut module = people_module();
        module.structs[0].list_wrapper = None;
        let mut features = FeatureFlags::default();
        let err = generate(&list_method(), "People", &module, &mut features).unwrap_err();
        assert_eq!(
            err,
            CodegenError::UnknownStructReference {
                method: "add_people".into(),
                target: "People".into(),
            }
        );
    }
}

//! Struct generation.
//!
//! Emits the Move record definitions for every declared struct: the
//! identity field is injected first whenever the struct has `key`, list
//! items have their abilities forced to `copy, drop, store` (list elements
//! must not independently own identity) and gain a companion wrapper
//! struct, and constructor events produce `copy, drop` event structs.

use movegen_types::{Ability, MethodKind, ModuleSpec, StructSpec};

use crate::error::{CodegenError, CodegenResult};
use crate::imports::FeatureFlags;
use crate::types::{self, ID_FIELD_TYPE, INNER_ID_TYPE, STRING_TYPE};

/// The forced ability line for list-item structs.
const LIST_ITEM_ABILITIES: &str = "copy, drop, store";

/// Parameter list and struct-literal material derived from a struct's
/// declared fields, shared by the constructor, list-op, and mint
/// generators. Field order is preserved end-to-end.
#[derive(Debug, Clone)]
pub(crate) struct ObjectParts {
    /// `name: String` pairs, one per declared field.
    pub params: Vec<String>,
    /// Field names for the literal body (shorthand form).
    pub field_names: Vec<String>,
}

impl ObjectParts {
    pub fn literal_body(&self) -> String {
        self.field_names.join(", ")
    }
}

/// Derive [`ObjectParts`] from a struct's declared fields, flagging the
/// string import when any field maps to the string type.
pub(crate) fn object_parts(
    spec: &StructSpec,
    features: &mut FeatureFlags,
) -> CodegenResult<ObjectParts> {
    let mut params = Vec::with_capacity(spec.fields.len());
    let mut field_names = Vec::with_capacity(spec.fields.len());
    for field in &spec.fields {
        let context = format!("field `{}` of struct `{}`", field.name, spec.name);
        let mapped = types::map_type(&field.host_type, &context)?;
        if mapped == STRING_TYPE {
            features.string = true;
        }
        params.push(format!("{}: {mapped}", field.name));
        field_names.push(field.name.clone());
    }
    Ok(ObjectParts {
        params,
        field_names,
    })
}

/// Whether the generated struct carries the injected identity field.
pub(crate) fn has_identity(spec: &StructSpec) -> bool {
    spec.abilities.contains(Ability::Key) && spec.list_wrapper.is_none()
}

/// Generate all struct definitions for the module, in declaration order,
/// followed by any constructor event structs.
pub fn generate(module: &ModuleSpec, features: &mut FeatureFlags) -> CodegenResult<Vec<String>> {
    let mut out = Vec::new();

    for spec in &module.structs {
        out.push(render_struct(spec, features)?);
        if let Some(wrapper) = &spec.list_wrapper {
            out.push(render_wrapper(&spec.name, &wrapper.wrapper, &wrapper.field));
        }
    }

    for method in &module.methods {
        let MethodKind::Constructor { target } = &method.kind else {
            continue;
        };
        let Some(event) = &method.event else {
            continue;
        };
        let spec = module.find_struct(target).ok_or_else(|| {
            CodegenError::UnknownStructReference {
                method: method.name.clone(),
                target: target.clone(),
            }
        })?;
        out.push(render_event(&event.name, spec, features)?);
        features.event = true;
    }

    Ok(out)
}

fn render_struct(spec: &StructSpec, features: &mut FeatureFlags) -> CodegenResult<String> {
    let mut lines = Vec::new();

    let abilities = if spec.list_wrapper.is_some() {
        LIST_ITEM_ABILITIES.to_string()
    } else {
        spec.abilities.render()
    };
    if abilities.is_empty() {
        lines.push(format!("public struct {} {{", spec.name));
    } else {
        lines.push(format!("public struct {} has {abilities} {{", spec.name));
    }

    if has_identity(spec) {
        lines.push(format!("id: {ID_FIELD_TYPE},"));
    }
    for field in &spec.fields {
        let context = format!("field `{}` of struct `{}`", field.name, spec.name);
        let mapped = types::map_type(&field.host_type, &context)?;
        if mapped == STRING_TYPE {
            features.string = true;
        }
        lines.push(format!("{}: {mapped},", field.name));
    }
    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

fn render_wrapper(item: &str, wrapper: &str, field: &str) -> String {
    [
        format!("public struct {wrapper} has key, store {{"),
        format!("id: {ID_FIELD_TYPE},"),
        format!("{field}: vector<{item}>,"),
        "}".to_string(),
    ]
    .join("\n")
}

fn render_event(
    name: &str,
    source: &StructSpec,
    features: &mut FeatureFlags,
) -> CodegenResult<String> {
    let mut lines = vec![
        format!("public struct {name} has copy, drop {{"),
        format!("object_id: {INNER_ID_TYPE},"),
    ];
    for field in &source.fields {
        let context = format!("field `{}` of event `{name}`", field.name);
        let mapped = types::map_type(&field.host_type, &context)?;
        if mapped == STRING_TYPE {
            features.string = true;
        }
        lines.push(format!("{}: {mapped},", field.name));
    }
    lines.push("created_by: address,".to_string());
    lines.push("}".to_string());
    Ok(lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use movegen_types::{AbilitySet, EventSpec, FieldSpec, ListWrapper, MethodSpec, StructSpec};

    fn user_struct() -> StructSpec {
        StructSpec {
            name: "User".into(),
            fields: vec![
                FieldSpec {
                    name: "name".into(),
                    host_type: "string".into(),
                },
                FieldSpec {
                    name: "age".into(),
                    host_type: "u8".into(),
                },
            ],
            abilities: AbilitySet::new(&[Ability::Key, Ability::Store]),
            list_wrapper: None,
        }
    }

    fn module_with(structs: Vec<StructSpec>, methods: Vec<MethodSpec>) -> ModuleSpec {
        ModuleSpec {
            package: "hello_world".into(),
            module: "writing".into(),
            structs,
            methods,
        }
    }

    #[test]
    fn key_struct_gets_identity_field_first() {
        let mut features = FeatureFlags::default();
        let out = generate(&module_with(vec![user_struct()], vec![]), &mut features).unwrap();
        let lines: Vec<&str> = out[0].lines().collect();
        assert_eq!(lines[0], "public struct User has key, store {");
        assert_eq!(lines[1], "id: UID,");
        assert_eq!(lines[2], "name: String,");
        assert_eq!(lines[3], "age: u8,");
        assert!(features.string);
    }

    #[test]
    fn keyless_struct_has_no_identity_field() {
        let mut spec = user_struct();
        spec.abilities = AbilitySet::new(&[Ability::Copy, Ability::Drop]);
        let mut features = FeatureFlags::default();
        let out = generate(&module_with(vec![spec], vec![]), &mut features).unwrap();
        assert!(!out[0].contains("id: UID"));
    }

    #[test]
    fn list_item_abilities_are_forced_and_wrapper_emitted() {
        let mut spec = user_struct();
        spec.list_wrapper = Some(ListWrapper {
            wrapper: "UserList".into(),
            field: "users".into(),
        });
        let mut features = FeatureFlags::default();
        let out = generate(&module_with(vec![spec], vec![]), &mut features).unwrap();
        assert_eq!(out.len(), 2);
        assert!(out[0].starts_with("public struct User has copy, drop, store {"));
        assert!(!out[0].contains("id: UID"), "list items must not own identity");
        assert!(out[1].contains("public struct UserList has key, store {"));
        assert!(out[1].contains("users: vector<User>,"));
    }

    #[test]
    fn constructor_event_struct_is_emitted() {
        let method = MethodSpec {
            name: "create_user".into(),
            params: vec![],
            kind: MethodKind::Constructor {
                target: "User".into(),
            },
            assertions: vec![],
            transfer: None,
            statements: vec![],
            bindings: vec![],
            event: Some(EventSpec {
                name: "UserCreated".into(),
            }),
        };
        let mut features = FeatureFlags::default();
        let out = generate(
            &module_with(vec![user_struct()], vec![method]),
            &mut features,
        )
        .unwrap();
        let event = out.last().unwrap();
        assert!(event.starts_with("public struct UserCreated has copy, drop {"));
        assert!(event.contains("object_id: ID,"));
        assert!(event.contains("created_by: address,"));
        assert!(features.event);
    }

    #[test]
    fn identical_input_renders_identically() {
        let module = module_with(vec![user_struct()], vec![]);
        let mut f1 = FeatureFlags::default();
        let mut f2 = FeatureFlags::default();
        assert_eq!(
            generate(&module, &mut f1).unwrap(),
            generate(&module, &mut f2).unwrap()
        );
    }
}

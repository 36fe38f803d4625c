//! Type declarations referenced by the generated methods.
//!
//! For an operation `getBook` this produces, as needed:
//! `Parameter$getBook`, `RequestBody$getBook`, `Response$getBook$Status$<code>`,
//! `RequestContentType$getBook`, `ResponseContentType$getBook` and `Params$getBook`.

use indexmap::IndexMap;

use crate::ast::{Emit, TsProp, TsType, TsTypeDef, TypeDefKind};
use crate::descriptor::{OperationDescriptor, Schema};
use crate::error::Result;
use crate::method::{REQUEST_CONTENT_TYPE, RESPONSE_CONTENT_TYPE, type_parameters};
use crate::type_node::synthesize;

/// Render a standalone interface with one member per schema.
///
/// `generate_interface("MyTestInterface", &IndexMap::new())` renders
/// `"interface MyTestInterface {\n}\n"`.
pub fn generate_interface(name: &str, schemas: &IndexMap<String, Schema>) -> Result<String> {
    let def = TsTypeDef {
        name: name.to_string(),
        type_params: Vec::new(),
        kind: TypeDefKind::Interface {
            properties: content_properties(schemas)?,
        },
        is_export: false,
    };
    Ok(def.emit())
}

fn content_properties(content: &IndexMap<String, Schema>) -> Result<Vec<TsProp>> {
    content
        .iter()
        .map(|(key, schema)| {
            Ok(TsProp {
                name: key.clone(),
                ty: synthesize(schema)?,
                optional: false,
            })
        })
        .collect()
}

fn interface(name: String, properties: Vec<TsProp>) -> TsTypeDef {
    TsTypeDef {
        name,
        type_params: Vec::new(),
        kind: TypeDefKind::Interface { properties },
        is_export: true,
    }
}

fn alias(name: String, ty: TsType) -> TsTypeDef {
    TsTypeDef {
        name,
        type_params: Vec::new(),
        kind: TypeDefKind::TypeAlias { ty },
        is_export: true,
    }
}

fn keyof(name: &str) -> TsType {
    TsType::KeyOf(Box::new(TsType::reference(name)))
}

/// `RequestBody$<fn>` indexed by the request content type.
fn request_body_member(op: &OperationDescriptor) -> TsType {
    let object = TsType::reference(op.request_body_type_name());
    match op.request_content_types() {
        [] => object,
        [only] => TsType::indexed(object, TsType::string_literal(only.as_str())),
        _ => TsType::indexed(object, TsType::reference(REQUEST_CONTENT_TYPE)),
    }
}

/// `Params$<fn>`: the structured argument of the generated method.
fn params_declaration(op: &OperationDescriptor) -> TsTypeDef {
    let flags = op.flags();
    let mut properties = Vec::new();

    if flags.has_parameter {
        properties.push(TsProp {
            name: "parameter".into(),
            ty: TsType::reference(op.parameter_type_name()),
            optional: false,
        });
    }

    let mut headers = Vec::new();
    if flags.has_multiple_request_content_types {
        headers.push(TsProp {
            name: "Content-Type".into(),
            ty: TsType::reference(REQUEST_CONTENT_TYPE),
            optional: false,
        });
    }
    if flags.has_multiple_response_content_types {
        headers.push(TsProp {
            name: "Accept".into(),
            ty: TsType::reference(RESPONSE_CONTENT_TYPE),
            optional: false,
        });
    }
    if !headers.is_empty() {
        properties.push(TsProp {
            name: "headers".into(),
            ty: TsType::Object(headers),
            optional: false,
        });
    }

    if flags.has_request_body {
        properties.push(TsProp {
            name: "requestBody".into(),
            ty: request_body_member(op),
            optional: false,
        });
    }

    TsTypeDef {
        name: op.params_type_name(),
        type_params: type_parameters(op),
        kind: TypeDefKind::Interface { properties },
        is_export: true,
    }
}

/// All declarations one operation's method refers to, in a stable order.
pub fn operation_declarations(op: &OperationDescriptor) -> Result<Vec<TsTypeDef>> {
    let mut defs = Vec::new();

    if op.flags().has_parameter {
        let properties = op
            .parameters()
            .iter()
            .map(|param| {
                Ok(TsProp {
                    name: param.name.clone(),
                    ty: synthesize(&param.schema)?,
                    optional: !param.required,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        defs.push(interface(op.parameter_type_name(), properties));
    }

    if let Some(body) = op.request_body() {
        defs.push(interface(
            op.request_body_type_name(),
            content_properties(&body.content)?,
        ));
    }

    for (name, response) in op
        .success_response_names()
        .iter()
        .zip(op.success_responses())
    {
        defs.push(interface(name.clone(), content_properties(&response.content)?));
    }

    if op.request_body().is_some() {
        defs.push(alias(
            op.request_content_type_name(),
            keyof(&op.request_body_type_name()),
        ));
    }

    match op.success_response_names() {
        [] => {}
        [only] => defs.push(alias(op.response_content_type_name(), keyof(only))),
        names => defs.push(alias(
            op.response_content_type_name(),
            TsType::Union(names.iter().map(|n| keyof(n)).collect()),
        )),
    }

    if op.flags().needs_params_argument() {
        defs.push(params_declaration(op));
    }

    Ok(defs)
}

//! Parameter routing: path, query and header groups plus the header/query objects.

use crate::ast::{ObjectProp, TsExpr, TsLiteral};
use crate::descriptor::{OperationDescriptor, ParameterDescriptor, ParameterLocation};
use crate::reference::{LiteralValue, ObjectLiteralSpec, parameter_reference};

/// Parameters grouped by location, each group in declaration order.
#[derive(Debug, Clone, Default)]
pub struct ClassifiedParameters<'a> {
    /// Substituted into the URL
    pub path: Vec<&'a ParameterDescriptor>,
    /// Routed into `queryParameters`
    pub query: Vec<&'a ParameterDescriptor>,
    /// Routed into `headers` after the content-type entries
    pub header: Vec<&'a ParameterDescriptor>,
}

/// Split parameters by location. Cookie parameters are not routed.
pub fn classify(parameters: &[ParameterDescriptor]) -> ClassifiedParameters<'_> {
    let mut classified = ClassifiedParameters::default();
    for param in parameters {
        match param.location {
            ParameterLocation::Path => classified.path.push(param),
            ParameterLocation::Query => classified.query.push(param),
            ParameterLocation::Header => classified.header.push(param),
            ParameterLocation::Cookie => {}
        }
    }
    classified
}

/// Entry for a content-type header given the declared content types.
///
/// Two or more types read the caller's choice from `variable`; a single type is
/// a constant; none omits the header.
pub fn content_type_entry(content_types: &[String], variable: &str) -> Option<LiteralValue> {
    match content_types {
        [] => None,
        [only] => Some(LiteralValue::Constant(only.clone())),
        _ => Some(LiteralValue::Variable(variable.to_string())),
    }
}

/// Header object: `Content-Type`, then `Accept`, then header parameters.
pub fn header_spec(op: &OperationDescriptor) -> ObjectLiteralSpec {
    let mut spec = ObjectLiteralSpec::new();
    if let Some(entry) =
        content_type_entry(op.request_content_types(), "params.headers.Content-Type")
    {
        spec.insert("Content-Type".to_string(), entry);
    }
    if let Some(entry) =
        content_type_entry(op.success_response_content_types(), "params.headers.Accept")
    {
        spec.insert("Accept".to_string(), entry);
    }
    for param in classify(op.parameters()).header {
        spec.insert(
            param.name.clone(),
            LiteralValue::Parameter(param.name.clone()),
        );
    }
    spec
}

/// Query object: `name: { value, style?, explode }` per query parameter.
///
/// Returns `None` when the operation has no query parameters.
pub fn query_object(op: &OperationDescriptor) -> Option<TsExpr> {
    if !op.flags().has_query_parameters {
        return None;
    }

    let mut props = Vec::new();
    for param in classify(op.parameters()).query {
        let mut entry = vec![ObjectProp::new("value", parameter_reference(&param.name))];
        if let Some(style) = param.style {
            entry.push(ObjectProp::new("style", TsExpr::string(style.as_str())));
        }
        entry.push(ObjectProp::new(
            "explode",
            TsExpr::Literal(TsLiteral::Bool(param.explode)),
        ));
        props.push(ObjectProp::new(
            param.name.as_str(),
            TsExpr::Object {
                props: entry,
                multiline: false,
            },
        ));
    }

    Some(TsExpr::Object {
        props,
        multiline: true,
    })
}

//! Client method synthesis: signature decisions plus the body builder.

pub mod body;

use tracing::debug;

use crate::ast::{TsMethod, TsParam, TsPrimitive, TsType, TsTypeParam};
use crate::descriptor::{OperationDescriptor, OperationFlags};
use crate::error::Result;

pub use body::build_body;

/// Generic bound to the caller's request content type.
pub const REQUEST_CONTENT_TYPE: &str = "RequestContentType";
/// Generic bound to the caller's accepted response content type.
pub const RESPONSE_CONTENT_TYPE: &str = "ResponseContentType";

/// Options that change the method shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MethodOptions {
    /// No `async`, no `Promise<...>` wrapper
    pub sync: bool,
    /// Append `operationId` and `Request URI` lines to the doc comment
    pub additional_method_comment: bool,
}

/// Type arguments for `Params$<fn>`, in declaration order.
pub fn generic_arguments(flags: OperationFlags) -> Vec<TsType> {
    let mut args = Vec::new();
    if flags.has_multiple_request_content_types {
        args.push(TsType::reference(REQUEST_CONTENT_TYPE));
    }
    if flags.has_multiple_response_content_types {
        args.push(TsType::reference(RESPONSE_CONTENT_TYPE));
    }
    args
}

/// Method generics: `RequestContentType extends RequestContentType$<fn>`, ...
pub fn type_parameters(op: &OperationDescriptor) -> Vec<TsTypeParam> {
    let flags = op.flags();
    let mut params = Vec::new();
    if flags.has_multiple_request_content_types {
        params.push(TsTypeParam {
            name: REQUEST_CONTENT_TYPE.to_string(),
            constraint: Some(TsType::reference(op.request_content_type_name())),
        });
    }
    if flags.has_multiple_response_content_types {
        params.push(TsTypeParam {
            name: RESPONSE_CONTENT_TYPE.to_string(),
            constraint: Some(TsType::reference(op.response_content_type_name())),
        });
    }
    params
}

/// Method arguments: `params` when the operation needs it, then `option?`.
pub fn arguments(params_type_name: &str, flags: OperationFlags) -> Vec<TsParam> {
    let mut args = Vec::with_capacity(2);
    if flags.needs_params_argument() {
        args.push(TsParam {
            name: "params".into(),
            ty: Some(TsType::generic(params_type_name, generic_arguments(flags))),
            optional: false,
        });
    }
    args.push(TsParam {
        name: "option".into(),
        ty: Some(TsType::reference("RequestOption")),
        optional: true,
    });
    args
}

/// Return type from the success responses.
///
/// - none: `void`
/// - one: `Response$<fn>$Status$<code>[<key>]`
/// - several: the union of all responses, indexed by the same key
///
/// The key is the content type literal when exactly one exists, otherwise the
/// `ResponseContentType` generic. Wrapped in `Promise` unless `sync`.
pub fn return_type(op: &OperationDescriptor, sync: bool) -> TsType {
    let names = op.success_response_names();
    let inner = if names.is_empty() {
        TsType::Primitive(TsPrimitive::Void)
    } else {
        let object = match names {
            [only] => TsType::reference(only.as_str()),
            _ => TsType::Union(names.iter().map(|n| TsType::reference(n.as_str())).collect()),
        };
        match op.success_response_content_types() {
            [] => object,
            [only] => TsType::indexed(object, TsType::string_literal(only.as_str())),
            _ => TsType::indexed(object, TsType::reference(RESPONSE_CONTENT_TYPE)),
        }
    };

    if sync {
        inner
    } else {
        TsType::generic("Promise", vec![inner])
    }
}

/// Doc comment text, if any.
pub fn method_comment(op: &OperationDescriptor, options: MethodOptions) -> Option<String> {
    if !options.additional_method_comment {
        return op.comment().map(str::to_string);
    }
    let lines: Vec<String> = [
        op.comment().unwrap_or_default().to_string(),
        format!("operationId: {}", op.operation_id()),
        format!("Request URI: {}", op.request_uri()),
    ]
    .into_iter()
    .filter(|line| !line.is_empty())
    .collect();
    Some(lines.join("\n"))
}

/// Synthesize the client method for one operation.
pub fn synthesize_method(op: &OperationDescriptor, options: MethodOptions) -> Result<TsMethod> {
    let body = build_body(op)?;
    debug!(
        operation_id = op.operation_id(),
        method = op.function_name(),
        statements = body.len(),
        "synthesized method"
    );

    Ok(TsMethod {
        name: op.function_name().to_string(),
        type_params: type_parameters(op),
        params: arguments(&op.params_type_name(), op.flags()),
        return_type: return_type(op, options.sync),
        body,
        is_async: !options.sync,
        comment: method_comment(op, options),
        deprecated: op.deprecated(),
    })
}

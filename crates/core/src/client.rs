//! Client module assembly over a batch of operations.
//!
//! Each operation is synthesized independently; a failing operation is reported
//! in `ClientOutput::failures` and left out of the module.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::ast::{
    Emit, TsClass, TsImport, TsMethod, TsModule, TsParam, TsPrimitive, TsProp, TsStmt, TsType,
    TsTypeDef, TsTypeParam, TypeDefKind,
};
use crate::config::GeneratorConfig;
use crate::declarations::operation_declarations;
use crate::descriptor::{OperationDescriptor, ParameterStyle};
use crate::error::{Result, SynthesisError};
use crate::method::{MethodOptions, synthesize_method};

const CLASS_PRELUDE: &str = r#"private baseUrl: string;
constructor(private apiClient: ApiClient<RequestOption>, baseUrl: string) {
  this.baseUrl = baseUrl.replace(/\/$/, "");
}"#;

const HTTP_METHODS: [&str; 8] = [
    "GET", "PUT", "POST", "DELETE", "OPTIONS", "HEAD", "PATCH", "TRACE",
];

/// An operation that could not be synthesized.
#[derive(Debug)]
pub struct OperationFailure {
    /// Id of the skipped operation
    pub operation_id: String,
    /// Why it was skipped
    pub error: SynthesisError,
}

/// Result of a batch run.
#[derive(Debug)]
pub struct ClientOutput {
    /// Generated module, without the failed operations
    pub module: TsModule,
    /// Failed operations in input order
    pub failures: Vec<OperationFailure>,
}

impl ClientOutput {
    /// Print the module.
    pub fn render(&self) -> String {
        self.module.emit()
    }

    /// True when every operation made it into the module.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

struct SynthesizedOperation {
    declarations: Vec<TsTypeDef>,
    method: TsMethod,
}

fn synthesize_operation(
    op: &OperationDescriptor,
    options: MethodOptions,
) -> Result<SynthesizedOperation> {
    Ok(SynthesizedOperation {
        declarations: operation_declarations(op)?,
        method: synthesize_method(op, options)?,
    })
}

fn prop(name: &str, ty: TsType, optional: bool) -> TsProp {
    TsProp {
        name: name.to_string(),
        ty,
        optional,
    }
}

fn exported(name: &str, type_params: Vec<TsTypeParam>, kind: TypeDefKind) -> TsTypeDef {
    TsTypeDef {
        name: name.to_string(),
        type_params,
        kind,
        is_export: true,
    }
}

/// Declarations of the runtime contract, for modules without a runtime import.
pub fn runtime_declarations(sync: bool) -> Vec<TsTypeDef> {
    let any = || TsType::Primitive(TsPrimitive::Any);
    let string = || TsType::Primitive(TsPrimitive::String);

    let styles = [
        ParameterStyle::Form,
        ParameterStyle::SpaceDelimited,
        ParameterStyle::PipeDelimited,
        ParameterStyle::DeepObject,
    ];

    let result = TsType::reference("T");
    let ret = if sync {
        result
    } else {
        TsType::generic("Promise", vec![result])
    };

    vec![
        exported(
            "HttpMethod",
            Vec::new(),
            TypeDefKind::TypeAlias {
                ty: TsType::Union(HTTP_METHODS.iter().map(|m| TsType::string_literal(*m)).collect()),
            },
        ),
        exported(
            "QueryParameter",
            Vec::new(),
            TypeDefKind::Interface {
                properties: vec![
                    prop("value", any(), false),
                    prop(
                        "style",
                        TsType::Union(
                            styles
                                .iter()
                                .map(|s| TsType::string_literal(s.as_str()))
                                .collect(),
                        ),
                        true,
                    ),
                    prop("explode", TsType::Primitive(TsPrimitive::Boolean), false),
                ],
            },
        ),
        exported(
            "QueryParameters",
            Vec::new(),
            TypeDefKind::TypeAlias {
                ty: TsType::generic("Record", vec![string(), TsType::reference("QueryParameter")]),
            },
        ),
        exported(
            "RequestArgs",
            Vec::new(),
            TypeDefKind::Interface {
                properties: vec![
                    prop("httpMethod", TsType::reference("HttpMethod"), false),
                    prop("url", string(), false),
                    prop("headers", TsType::generic("Record", vec![string(), any()]), false),
                    prop("requestBody", any(), true),
                    prop("queryParameters", TsType::reference("QueryParameters"), true),
                ],
            },
        ),
        exported(
            "ApiClient",
            vec![TsTypeParam {
                name: "RequestOption".into(),
                constraint: None,
            }],
            TypeDefKind::Interface {
                properties: vec![prop(
                    "request",
                    TsType::Function {
                        type_params: vec![TsTypeParam {
                            name: "T".into(),
                            constraint: None,
                        }],
                        params: vec![
                            TsParam {
                                name: "requestArgs".into(),
                                ty: Some(TsType::reference("RequestArgs")),
                                optional: false,
                            },
                            TsParam {
                                name: "options".into(),
                                ty: Some(TsType::reference("RequestOption")),
                                optional: true,
                            },
                        ],
                        ret: Box::new(ret),
                    },
                    false,
                )],
            },
        ),
    ]
}

/// Synthesize every operation and assemble the client module.
///
/// Operations are processed in parallel; the module keeps input order.
pub fn generate_client(operations: &[OperationDescriptor], config: &GeneratorConfig) -> ClientOutput {
    let options = config.method_options();
    let results: Vec<Result<SynthesizedOperation>> = operations
        .par_iter()
        .map(|op| synthesize_operation(op, options))
        .collect();

    let mut module = TsModule::default();
    match &config.runtime_module {
        Some(runtime) => module.imports.push(TsImport {
            items: vec!["ApiClient".into(), "QueryParameters".into()],
            from: runtime.clone(),
            type_only: true,
        }),
        None => module.types.extend(runtime_declarations(config.sync)),
    }

    let mut methods = Vec::with_capacity(operations.len());
    let mut failures = Vec::new();
    for (op, result) in operations.iter().zip(results) {
        match result {
            Ok(synthesized) => {
                debug!(
                    operation_id = op.operation_id(),
                    declarations = synthesized.declarations.len(),
                    "operation synthesized"
                );
                module.types.extend(synthesized.declarations);
                methods.push(synthesized.method);
            }
            Err(error) => {
                warn!(
                    operation_id = op.operation_id(),
                    internal = error.is_internal(),
                    "skipping operation: {error}"
                );
                failures.push(OperationFailure {
                    operation_id: op.operation_id().to_string(),
                    error,
                });
            }
        }
    }

    info!(
        operations = operations.len(),
        generated = methods.len(),
        failed = failures.len(),
        class = %config.class_name,
        "client generated"
    );

    module.classes.push(TsClass {
        name: config.class_name.clone(),
        type_params: vec![TsTypeParam {
            name: "RequestOption".into(),
            constraint: None,
        }],
        prelude: vec![TsStmt::Raw(CLASS_PRELUDE.to_string())],
        methods,
        is_export: true,
    });

    ClientOutput { module, failures }
}

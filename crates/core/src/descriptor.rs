//! Operation descriptors: the input contract of the synthesizer.
//!
//! The wire structs (`DescriptorDocument`, `RawOperation`, `Schema`, ...) mirror what an
//! upstream OpenAPI parsing stage hands over. `OperationDescriptor` is the immutable,
//! validated view the synthesis components consume; its flags are derived exactly once.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ast::utils::sanitize_ts_identifier;
use crate::error::LoadError;

/// Root descriptor document: `{ "operations": [ ... ] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct DescriptorDocument {
    /// Operations in declaration order
    #[serde(default)]
    pub operations: Vec<RawOperation>,
}

impl DescriptorDocument {
    /// Parse a descriptor document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a descriptor document from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, LoadError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a descriptor document, picking the format from the file extension.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        read_document(path)
    }

    /// Build the immutable descriptors for every operation, preserving order.
    pub fn into_operations(self) -> Vec<OperationDescriptor> {
        self.operations
            .into_iter()
            .map(OperationDescriptor::from_raw)
            .collect()
    }
}

/// Read a named schema map (`{ "member": { "type": ... } }`) from JSON or YAML.
pub fn load_schema_map(path: &Path) -> Result<IndexMap<String, Schema>, LoadError> {
    read_document(path)
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    let contents = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    match format.as_deref() {
        Some("json") => Ok(serde_json::from_str(&contents)?),
        Some("yaml" | "yml") => Ok(serde_yaml::from_str(&contents)?),
        _ => Err(LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// `GET`
    #[serde(alias = "get")]
    Get,
    /// `PUT`
    #[serde(alias = "put")]
    Put,
    /// `POST`
    #[serde(alias = "post")]
    Post,
    /// `DELETE`
    #[serde(alias = "delete")]
    Delete,
    /// `OPTIONS`
    #[serde(alias = "options")]
    Options,
    /// `HEAD`
    #[serde(alias = "head")]
    Head,
    /// `PATCH`
    #[serde(alias = "patch")]
    Patch,
    /// `TRACE`
    #[serde(alias = "trace")]
    Trace,
}

impl HttpMethod {
    /// Upper-case method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

/// One operation as produced by the upstream parser.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOperation {
    /// Unique operation id
    pub operation_id: String,
    /// Method name override; defaults to the sanitized operation id
    pub function_name: Option<String>,
    /// HTTP method, upper or lower case on the wire
    pub http_method: HttpMethod,
    /// Raw request URI template, e.g. `/books/{bookId}`
    pub request_uri: String,
    /// Summary or description for the doc comment
    pub comment: Option<String>,
    /// Marks the generated method `@deprecated`
    #[serde(default)]
    pub deprecated: bool,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Request body, if the operation accepts one
    pub request_body: Option<RequestBodyDescriptor>,
    /// Success (2xx) responses in declaration order
    #[serde(default)]
    pub success_responses: Vec<ResponseDescriptor>,
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    /// Substituted into the request URI
    Path,
    /// Sent as a query parameter
    Query,
    /// Sent as a request header
    Header,
    /// Declared only; the client does not route cookies
    Cookie,
}

/// Parameter serialization style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    /// `matrix`
    Matrix,
    /// `label`
    Label,
    /// `form`
    Form,
    /// `simple`
    Simple,
    /// `spaceDelimited`
    SpaceDelimited,
    /// `pipeDelimited`
    PipeDelimited,
    /// `deepObject`
    DeepObject,
}

impl ParameterStyle {
    /// Style name as it appears in OpenAPI and in the generated query object.
    pub fn as_str(self) -> &'static str {
        match self {
            ParameterStyle::Matrix => "matrix",
            ParameterStyle::Label => "label",
            ParameterStyle::Form => "form",
            ParameterStyle::Simple => "simple",
            ParameterStyle::SpaceDelimited => "spaceDelimited",
            ParameterStyle::PipeDelimited => "pipeDelimited",
            ParameterStyle::DeepObject => "deepObject",
        }
    }
}

/// A parameter (path, query, header or cookie).
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterDescriptor {
    /// Name as declared; may contain characters that are not valid in identifiers
    pub name: String,
    /// Where the value is sent (`in` on the wire)
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the member is required in `Parameter$<fn>`
    #[serde(default)]
    pub required: bool,
    /// Serialization style, copied into the query object when set
    pub style: Option<ParameterStyle>,
    /// Explode flag for query serialization
    #[serde(default)]
    pub explode: bool,
    /// Value schema; `any` when absent
    #[serde(default)]
    pub schema: Schema,
}

/// A request body: schemas keyed by content type, in declaration order.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestBodyDescriptor {
    /// Whether the body is required
    #[serde(default)]
    pub required: bool,
    /// Body schema per content type
    #[serde(default)]
    pub content: IndexMap<String, Schema>,
}

/// A success response: status code plus schemas keyed by content type.
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseDescriptor {
    /// Status code as written, e.g. `200`
    pub status: String,
    /// Response schema per content type
    #[serde(default)]
    pub content: IndexMap<String, Schema>,
}

/// JSON-Schema-like type descriptor.
///
/// `kind` is kept open on the wire; the type synthesizer decides which kinds it accepts.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Schema {
    /// Schema kind (`type` on the wire)
    #[serde(rename = "type")]
    pub kind: String,
    /// Allowed literal values (`enum` on the wire)
    #[serde(rename = "enum", default)]
    pub enum_values: Option<Vec<EnumValue>>,
    /// Object members in declaration order
    #[serde(default)]
    pub properties: Vec<SchemaProperty>,
    /// Array element schema
    pub items: Option<Box<Schema>>,
}

impl Default for Schema {
    fn default() -> Self {
        Schema::of("any")
    }
}

impl Schema {
    /// Schema of the given kind with no enum, members or items.
    pub fn of(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            enum_values: None,
            properties: Vec::new(),
            items: None,
        }
    }

    /// Enumerated schema of the given kind.
    pub fn enumerated(kind: impl Into<String>, values: Vec<EnumValue>) -> Self {
        Self {
            enum_values: Some(values),
            ..Schema::of(kind)
        }
    }

    /// Object schema with the given members.
    pub fn object(properties: Vec<SchemaProperty>) -> Self {
        Self {
            properties,
            ..Schema::of("object")
        }
    }

    /// Array schema with the given element schema.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Schema::of("array")
        }
    }
}

/// Object member schema
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SchemaProperty {
    /// Member name
    pub name: String,
    /// Optional marker is emitted when false
    #[serde(default)]
    pub required: bool,
    /// Member schema
    pub schema: Schema,
}

/// Enum value can be string, integer, float, boolean, or null.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    /// String literal
    String(String),
    /// Integer literal; tried before `Float`
    Integer(i64),
    /// Non-integral number
    Float(f64),
    /// Boolean literal
    Bool(bool),
    /// `null`
    Null,
}

/// Shape flags derived once from an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OperationFlags {
    /// At least one parameter of any location
    pub has_parameter: bool,
    /// A request body is declared
    pub has_request_body: bool,
    /// The request body declares two or more content types
    pub has_multiple_request_content_types: bool,
    /// The success responses declare two or more distinct content types
    pub has_multiple_response_content_types: bool,
    /// At least one query parameter
    pub has_query_parameters: bool,
}

impl OperationFlags {
    /// Whether the generated method takes the structured `params` argument.
    pub fn needs_params_argument(self) -> bool {
        self.has_parameter
            || self.has_request_body
            || self.has_multiple_request_content_types
            || self.has_multiple_response_content_types
    }
}

/// Immutable, validated view of one operation.
#[derive(Debug, Clone)]
pub struct OperationDescriptor {
    operation_id: String,
    function_name: String,
    http_method: HttpMethod,
    request_uri: String,
    comment: Option<String>,
    deprecated: bool,
    parameters: Vec<ParameterDescriptor>,
    request_body: Option<RequestBodyDescriptor>,
    success_responses: Vec<ResponseDescriptor>,
    request_content_types: Vec<String>,
    success_response_names: Vec<String>,
    success_response_content_types: Vec<String>,
    flags: OperationFlags,
}

impl OperationDescriptor {
    /// Build the descriptor and derive its flags and names.
    pub fn from_raw(raw: RawOperation) -> Self {
        let function_name =
            sanitize_ts_identifier(raw.function_name.as_deref().unwrap_or(&raw.operation_id));

        let request_content_types: Vec<String> = raw
            .request_body
            .as_ref()
            .map(|body| body.content.keys().cloned().collect())
            .unwrap_or_default();

        let success_response_names = raw
            .success_responses
            .iter()
            .map(|response| format!("Response${function_name}$Status${}", response.status))
            .collect();

        let mut success_response_content_types: Vec<String> = Vec::new();
        for content_type in raw.success_responses.iter().flat_map(|r| r.content.keys()) {
            if !success_response_content_types.contains(content_type) {
                success_response_content_types.push(content_type.clone());
            }
        }

        let flags = OperationFlags {
            has_parameter: !raw.parameters.is_empty(),
            has_request_body: raw.request_body.is_some(),
            has_multiple_request_content_types: request_content_types.len() >= 2,
            has_multiple_response_content_types: success_response_content_types.len() >= 2,
            has_query_parameters: raw
                .parameters
                .iter()
                .any(|p| p.location == ParameterLocation::Query),
        };

        Self {
            operation_id: raw.operation_id,
            function_name,
            http_method: raw.http_method,
            request_uri: raw.request_uri,
            comment: raw.comment,
            deprecated: raw.deprecated,
            parameters: raw.parameters,
            request_body: raw.request_body,
            success_responses: raw.success_responses,
            request_content_types,
            success_response_names,
            success_response_content_types,
            flags,
        }
    }

    /// Operation id as declared.
    pub fn operation_id(&self) -> &str {
        &self.operation_id
    }

    /// Generated method name.
    pub fn function_name(&self) -> &str {
        &self.function_name
    }

    /// HTTP method.
    pub fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    /// Request URI template as declared.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// Doc comment text, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Whether the operation is deprecated.
    pub fn deprecated(&self) -> bool {
        self.deprecated
    }

    /// Parameters in declaration order.
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Request body, if declared.
    pub fn request_body(&self) -> Option<&RequestBodyDescriptor> {
        self.request_body.as_ref()
    }

    /// Success responses in declaration order.
    pub fn success_responses(&self) -> &[ResponseDescriptor] {
        &self.success_responses
    }

    /// Request body content types in declaration order.
    pub fn request_content_types(&self) -> &[String] {
        &self.request_content_types
    }

    /// Type names of the success responses, parallel to `success_responses`.
    pub fn success_response_names(&self) -> &[String] {
        &self.success_response_names
    }

    /// Distinct success-response content types in first-seen order.
    pub fn success_response_content_types(&self) -> &[String] {
        &self.success_response_content_types
    }

    /// Shape flags derived at construction.
    pub fn flags(&self) -> OperationFlags {
        self.flags
    }

    /// `Params$<fn>`: the structured argument type.
    pub fn params_type_name(&self) -> String {
        format!("Params${}", self.function_name)
    }

    /// `Parameter$<fn>`: all parameters.
    pub fn parameter_type_name(&self) -> String {
        format!("Parameter${}", self.function_name)
    }

    /// `RequestBody$<fn>`: body schemas keyed by content type.
    pub fn request_body_type_name(&self) -> String {
        format!("RequestBody${}", self.function_name)
    }

    /// `RequestContentType$<fn>`: `keyof` the request body.
    pub fn request_content_type_name(&self) -> String {
        format!("RequestContentType${}", self.function_name)
    }

    /// `ResponseContentType$<fn>`: `keyof` the success responses.
    pub fn response_content_type_name(&self) -> String {
        format!("ResponseContentType${}", self.function_name)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::io::Write;

    use super::*;

    const BOOKS_JSON: &str = r#"{
  "operations": [
    {
      "operationId": "get-book",
      "httpMethod": "GET",
      "requestUri": "/books/{bookId}",
      "comment": "Fetch one book",
      "parameters": [
        { "name": "bookId", "in": "path", "required": true, "schema": { "type": "string" } },
        { "name": "fields", "in": "query", "style": "form", "explode": false, "schema": { "type": "array", "items": { "type": "string" } } }
      ],
      "successResponses": [
        { "status": "200", "content": { "application/json": { "type": "object" }, "application/xml": { "type": "object" } } },
        { "status": "203", "content": { "application/json": { "type": "object" } } }
      ]
    },
    {
      "operationId": "createBook",
      "functionName": "addBook",
      "httpMethod": "post",
      "requestUri": "/books",
      "requestBody": { "required": true, "content": { "application/json": { "type": "object" }, "multipart/form-data": { "type": "object" } } }
    }
  ]
}"#;

    #[test]
    fn test_from_json_derives_flags() {
        let ops = DescriptorDocument::from_json(BOOKS_JSON)
            .unwrap()
            .into_operations();
        assert_eq!(ops.len(), 2);

        let get_book = &ops[0];
        assert_eq!(get_book.function_name(), "getBook");
        assert_eq!(get_book.http_method(), HttpMethod::Get);
        assert_eq!(
            get_book.success_response_names(),
            ["Response$getBook$Status$200", "Response$getBook$Status$203"]
        );
        assert_eq!(
            get_book.success_response_content_types(),
            ["application/json", "application/xml"]
        );
        assert_eq!(
            get_book.flags(),
            OperationFlags {
                has_parameter: true,
                has_request_body: false,
                has_multiple_request_content_types: false,
                has_multiple_response_content_types: true,
                has_query_parameters: true,
            }
        );
        assert_eq!(get_book.parameters()[1].style, Some(ParameterStyle::Form));

        let add_book = &ops[1];
        assert_eq!(add_book.function_name(), "addBook");
        assert_eq!(add_book.http_method(), HttpMethod::Post);
        assert_eq!(
            add_book.request_content_types(),
            ["application/json", "multipart/form-data"]
        );
        let flags = add_book.flags();
        assert!(flags.has_request_body);
        assert!(flags.has_multiple_request_content_types);
        assert!(!flags.has_parameter);
        assert!(flags.needs_params_argument());
    }

    #[test]
    fn test_function_name_override_is_sanitized() {
        let doc = DescriptorDocument::from_json(
            r#"{ "operations": [
              { "operationId": "createBook", "functionName": "add-book", "httpMethod": "POST", "requestUri": "/books" },
              { "operationId": "x", "functionName": "delete", "httpMethod": "DELETE", "requestUri": "/x" }
            ] }"#,
        )
        .unwrap();
        let ops = doc.into_operations();
        assert_eq!(ops[0].function_name(), "addBook");
        assert_eq!(ops[0].params_type_name(), "Params$addBook");
        assert_eq!(ops[1].function_name(), "_delete");
    }

    #[test]
    fn test_from_yaml() {
        let yaml = r"
operations:
  - operationId: listBooks
    httpMethod: GET
    requestUri: /books
    parameters:
      - name: status
        in: query
        schema:
          type: string
          enum: [available, sold]
";
        let ops = DescriptorDocument::from_yaml(yaml).unwrap().into_operations();
        let schema = &ops[0].parameters()[0].schema;
        assert_eq!(schema.kind, "string");
        assert_eq!(
            schema.enum_values,
            Some(vec![
                EnumValue::String("available".into()),
                EnumValue::String("sold".into())
            ])
        );
        assert!(ops[0].flags().has_query_parameters);
        assert!(ops[0].flags().needs_params_argument());
    }

    #[test]
    fn test_missing_parameter_schema_defaults_to_any() {
        let json = r#"{ "operations": [ { "operationId": "ping", "httpMethod": "HEAD", "requestUri": "/ping",
            "parameters": [ { "name": "X-Trace", "in": "header" } ] } ] }"#;
        let ops = DescriptorDocument::from_json(json).unwrap().into_operations();
        assert_eq!(ops[0].parameters()[0].schema, Schema::of("any"));
        assert!(!ops[0].parameters()[0].required);
    }

    #[test]
    fn test_load_picks_format_from_extension() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(BOOKS_JSON.as_bytes()).unwrap();
        let doc = DescriptorDocument::load(file.path()).unwrap();
        assert_eq!(doc.operations.len(), 2);

        let other = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        let err = DescriptorDocument::load(other.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
    }

    #[test]
    fn test_load_schema_map_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schemas.yml");
        fs::write(&path, "zeta:\n  type: string\nalpha:\n  type: integer\n").unwrap();
        let schemas = load_schema_map(&path).unwrap();
        let keys: Vec<&String> = schemas.keys().collect();
        assert_eq!(keys, ["zeta", "alpha"]);
        assert_eq!(schemas["alpha"], Schema::of("integer"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = DescriptorDocument::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}

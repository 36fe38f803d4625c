//! Method body: url, headers, query parameters, request call.
//!
//! The statement order is fixed. Hand-written runtime code and downstream tooling
//! match on it.

use crate::ast::{BinOp, ObjectProp, TsExpr, TsStmt, TsType};
use crate::descriptor::OperationDescriptor;
use crate::error::{Result, SynthesisError};
use crate::parameters::{classify, header_spec, query_object};
use crate::reference::{LiteralValue, ObjectLiteralSpec, build_object_literal, parameter_reference};
use crate::template::{TemplateItem, build_template, multi_split};

/// `this.baseUrl + <request uri template>`
pub fn url_expression(op: &OperationDescriptor) -> Result<TsExpr> {
    let uri = op.request_uri();
    let path_params = classify(op.parameters()).path;

    let mut placeholders = Vec::with_capacity(path_params.len());
    for param in &path_params {
        let placeholder = format!("{{{}}}", param.name);
        if !uri.contains(&placeholder) {
            return Err(SynthesisError::UndefinedPathParameter {
                name: param.name.clone(),
                uri: uri.to_string(),
            });
        }
        placeholders.push(placeholder);
    }

    let mut items = Vec::new();
    for segment in multi_split(uri, &placeholders) {
        let item = match placeholders.iter().position(|p| *p == segment) {
            Some(i) => TemplateItem::expr(parameter_reference(&path_params[i].name)),
            None => TemplateItem::literal(segment),
        };
        items.push(item);
    }

    Ok(TsExpr::BinOp {
        left: Box::new(TsExpr::member(TsExpr::This, "baseUrl")),
        op: BinOp::Plus,
        right: Box::new(build_template(items)?),
    })
}

/// `this.apiClient.request({ httpMethod, url, headers, requestBody?, queryParameters? }, option)`
fn request_call(op: &OperationDescriptor, has_query: bool) -> Result<TsExpr> {
    let mut spec = ObjectLiteralSpec::new();
    if op.flags().has_request_body {
        spec.insert(
            "requestBody".to_string(),
            LiteralValue::Variable("params.requestBody".to_string()),
        );
    }
    if has_query {
        spec.insert(
            "queryParameters".to_string(),
            LiteralValue::Variable("queryParameters".to_string()),
        );
    }

    let request = build_object_literal(
        &spec,
        vec![
            ObjectProp::new("httpMethod", TsExpr::string(op.http_method().as_str())),
            ObjectProp::new("url", TsExpr::ident("url")),
            ObjectProp::new("headers", TsExpr::ident("headers")),
        ],
    )?;

    Ok(TsExpr::Call {
        callee: Box::new(TsExpr::member(
            TsExpr::member(TsExpr::This, "apiClient"),
            "request",
        )),
        args: vec![request, TsExpr::ident("option")],
    })
}

/// Build the method body statements for one operation.
pub fn build_body(op: &OperationDescriptor) -> Result<Vec<TsStmt>> {
    let mut stmts = vec![
        TsStmt::VarDecl {
            name: "url".into(),
            ty: None,
            init: url_expression(op)?,
        },
        TsStmt::VarDecl {
            name: "headers".into(),
            ty: None,
            init: build_object_literal(&header_spec(op), Vec::new())?,
        },
    ];

    let query = query_object(op);
    let has_query = query.is_some();
    if let Some(init) = query {
        stmts.push(TsStmt::VarDecl {
            name: "queryParameters".into(),
            ty: Some(TsType::reference("QueryParameters")),
            init,
        });
    }

    stmts.push(TsStmt::Return(Some(request_call(op, has_query)?)));
    Ok(stmts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::ast::Emit;
    use crate::descriptor::DescriptorDocument;

    fn operation(json: &str) -> OperationDescriptor {
        let doc = format!(r#"{{ "operations": [ {json} ] }}"#);
        DescriptorDocument::from_json(&doc)
            .unwrap()
            .into_operations()
            .remove(0)
    }

    fn render(stmts: &[TsStmt]) -> String {
        stmts.iter().map(|s| s.emit_indented(2)).collect()
    }

    #[test]
    fn test_url_with_path_parameters() {
        let op = operation(
            r#"{ "operationId": "getChapter", "httpMethod": "GET",
                "requestUri": "/books/{bookId}/chapters/{chapter-no}",
                "parameters": [
                  { "name": "bookId", "in": "path", "required": true },
                  { "name": "chapter-no", "in": "path", "required": true }
                ] }"#,
        );
        assert_eq!(
            url_expression(&op).unwrap().emit(),
            "this.baseUrl + `/books/${params.parameter.bookId}/chapters/${params.parameter[\"chapter-no\"]}`"
        );
    }

    #[test]
    fn test_url_with_dotted_path_parameter() {
        let op = operation(
            r#"{ "operationId": "getShelf", "httpMethod": "GET", "requestUri": "/shelves/{shelf.id}",
                "parameters": [ { "name": "shelf.id", "in": "path", "required": true } ] }"#,
        );
        assert_eq!(
            url_expression(&op).unwrap().emit(),
            "this.baseUrl + `/shelves/${params.parameter[\"shelf.id\"]}`"
        );
    }

    #[test]
    fn test_url_without_path_parameters() {
        let op = operation(r#"{ "operationId": "list", "httpMethod": "GET", "requestUri": "/books" }"#);
        assert_eq!(url_expression(&op).unwrap().emit(), "this.baseUrl + `/books`");
    }

    #[test]
    fn test_url_adjacent_placeholders() {
        let op = operation(
            r#"{ "operationId": "file", "httpMethod": "GET", "requestUri": "/{name}{ext}",
                "parameters": [ { "name": "name", "in": "path" }, { "name": "ext", "in": "path" } ] }"#,
        );
        assert_eq!(
            url_expression(&op).unwrap().emit(),
            "this.baseUrl + `/${params.parameter.name}${params.parameter.ext}`"
        );
    }

    #[test]
    fn test_undeclared_placeholder_stays_literal() {
        let op = operation(
            r#"{ "operationId": "op", "httpMethod": "GET", "requestUri": "/{a}/{other}",
                "parameters": [ { "name": "a", "in": "path" } ] }"#,
        );
        assert_eq!(
            url_expression(&op).unwrap().emit(),
            "this.baseUrl + `/${params.parameter.a}/{other}`"
        );
    }

    #[test]
    fn test_missing_placeholder_fails() {
        let op = operation(
            r#"{ "operationId": "op", "httpMethod": "GET", "requestUri": "/books",
                "parameters": [ { "name": "bookId", "in": "path" } ] }"#,
        );
        let err = url_expression(&op).unwrap_err();
        assert!(
            matches!(err, SynthesisError::UndefinedPathParameter { ref name, .. } if name == "bookId")
        );
    }

    #[test]
    fn test_minimal_body() {
        let op = operation(r#"{ "operationId": "ping", "httpMethod": "HEAD", "requestUri": "/ping" }"#);
        let body = build_body(&op).unwrap();
        assert_eq!(body.len(), 3);
        assert_eq!(
            render(&body),
            concat!(
                "    const url = this.baseUrl + `/ping`;\n",
                "    const headers = {};\n",
                "    return this.apiClient.request({\n",
                "      httpMethod: \"HEAD\",\n",
                "      url,\n",
                "      headers\n",
                "    }, option);\n",
            )
        );
    }

    #[test]
    fn test_full_body_order() {
        let op = operation(
            r#"{ "operationId": "updateBook", "httpMethod": "PUT", "requestUri": "/books/{id}",
                "parameters": [
                  { "name": "id", "in": "path", "required": true },
                  { "name": "dryRun", "in": "query", "style": "form", "explode": false },
                  { "name": "If-Match", "in": "header" }
                ],
                "requestBody": { "content": { "application/json": { "type": "object" } } },
                "successResponses": [ { "status": "200", "content": { "application/json": { "type": "object" } } } ] }"#,
        );
        let body = build_body(&op).unwrap();
        let names: Vec<&str> = body
            .iter()
            .filter_map(|s| match s {
                TsStmt::VarDecl { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, ["url", "headers", "queryParameters"]);
        assert!(matches!(body.last(), Some(TsStmt::Return(Some(_)))));

        assert_eq!(
            render(&body),
            concat!(
                "    const url = this.baseUrl + `/books/${params.parameter.id}`;\n",
                "    const headers = {\n",
                "      \"Content-Type\": \"application/json\",\n",
                "      Accept: \"application/json\",\n",
                "      \"If-Match\": params.parameter[\"If-Match\"]\n",
                "    };\n",
                "    const queryParameters: QueryParameters = {\n",
                "      dryRun: { value: params.parameter.dryRun, style: \"form\", explode: false }\n",
                "    };\n",
                "    return this.apiClient.request({\n",
                "      httpMethod: \"PUT\",\n",
                "      url,\n",
                "      headers,\n",
                "      requestBody: params.requestBody,\n",
                "      queryParameters\n",
                "    }, option);\n",
            )
        );
    }
}

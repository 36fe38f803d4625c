//! Identifier chains and object literals.

use indexmap::IndexMap;

use crate::ast::utils::is_valid_identifier;
use crate::ast::{ObjectProp, TsExpr};
use crate::error::{Result, SynthesisError};

/// Value of one object literal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LiteralValue {
    /// Emitted as a string literal
    Constant(String),
    /// Dotted path emitted through `build_reference`
    Variable(String),
    /// Parameter name emitted through `parameter_reference`
    Parameter(String),
}

/// Ordered key -> value mapping for an object literal.
pub type ObjectLiteralSpec = IndexMap<String, LiteralValue>;

/// Turn a dotted path such as `params.parameter.bookId` into an expression.
///
/// Segments after the first use property access when they are valid identifiers
/// and element access otherwise: `params.headers.Content-Type` becomes
/// `params.headers["Content-Type"]`.
pub fn build_reference(name: &str) -> Result<TsExpr> {
    let mut segments = name.split('.');
    let first = segments.next().unwrap_or_default();
    if first.starts_with('/') {
        return Err(SynthesisError::InvalidIdentifier {
            name: name.to_string(),
        });
    }

    let mut expr = TsExpr::ident(first);
    for segment in segments {
        if segment.starts_with('/') {
            return Err(SynthesisError::InvalidIdentifier {
                name: name.to_string(),
            });
        }
        expr = if is_valid_identifier(segment) {
            TsExpr::member(expr, segment)
        } else {
            TsExpr::index(expr, segment)
        };
    }
    Ok(expr)
}

/// `params.parameter.<name>` with `name` kept as a single segment.
///
/// Parameter names may contain dots or dashes (`filter.name`, `X-Request-Id`);
/// those are accessed with element access instead of being split.
pub fn parameter_reference(name: &str) -> TsExpr {
    let parameter = TsExpr::member(TsExpr::ident("params"), "parameter");
    if is_valid_identifier(name) {
        TsExpr::member(parameter, name)
    } else {
        TsExpr::index(parameter, name)
    }
}

/// Build a multi-line object literal from `spec`, with `extra` properties first.
pub fn build_object_literal(spec: &ObjectLiteralSpec, extra: Vec<ObjectProp>) -> Result<TsExpr> {
    let mut props = extra;
    props.reserve(spec.len());
    for (key, value) in spec {
        let value = match value {
            LiteralValue::Constant(text) => TsExpr::string(text.as_str()),
            LiteralValue::Variable(path) => build_reference(path)?,
            LiteralValue::Parameter(name) => parameter_reference(name),
        };
        props.push(ObjectProp::new(key.as_str(), value));
    }
    Ok(TsExpr::Object {
        props,
        multiline: true,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ast::Emit;

    #[test]
    fn test_single_segment_is_identifier() {
        assert_eq!(build_reference("url").unwrap(), TsExpr::ident("url"));
    }

    #[test]
    fn test_property_chain() {
        let expr = build_reference("params.parameter.bookId").unwrap();
        assert_eq!(
            expr,
            TsExpr::member(
                TsExpr::member(TsExpr::ident("params"), "parameter"),
                "bookId"
            )
        );
        assert_eq!(expr.emit(), "params.parameter.bookId");
    }

    #[test]
    fn test_invalid_segment_uses_element_access() {
        assert_eq!(
            build_reference("params.headers.Content-Type").unwrap().emit(),
            "params.headers[\"Content-Type\"]"
        );
        assert_eq!(
            build_reference("params.parameter.1st").unwrap().emit(),
            "params.parameter[\"1st\"]"
        );
    }

    #[test]
    fn test_leading_slash_fails() {
        for name in ["/", "/a", "/a.b", "a./b", "a.b./c"] {
            let err = build_reference(name).unwrap_err();
            assert!(
                matches!(&err, SynthesisError::InvalidIdentifier { name: n } if n == name),
                "{name}: {err:?}"
            );
        }
    }

    #[test]
    fn test_parameter_reference_keeps_name_whole() {
        assert_eq!(parameter_reference("bookId").emit(), "params.parameter.bookId");
        assert_eq!(
            parameter_reference("filter.name").emit(),
            "params.parameter[\"filter.name\"]"
        );
        assert_eq!(
            parameter_reference("X-Request-Id").emit(),
            "params.parameter[\"X-Request-Id\"]"
        );
    }

    #[test]
    fn test_object_literal_order_and_values() {
        let mut spec = ObjectLiteralSpec::new();
        spec.insert(
            "Content-Type".to_string(),
            LiteralValue::Constant("application/json".to_string()),
        );
        spec.insert(
            "X-Request-Id".to_string(),
            LiteralValue::Parameter("X-Request-Id".to_string()),
        );
        let expr = build_object_literal(
            &spec,
            vec![ObjectProp::new("httpMethod", TsExpr::string("GET"))],
        )
        .unwrap();
        assert_eq!(
            expr.emit(),
            "{\n  httpMethod: \"GET\",\n  \"Content-Type\": \"application/json\",\n  \"X-Request-Id\": params.parameter[\"X-Request-Id\"]\n}"
        );
    }

    #[test]
    fn test_object_literal_reinsert_keeps_position() {
        let mut spec = ObjectLiteralSpec::new();
        spec.insert("a".to_string(), LiteralValue::Constant("1".to_string()));
        spec.insert("b".to_string(), LiteralValue::Constant("2".to_string()));
        spec.insert("a".to_string(), LiteralValue::Constant("3".to_string()));
        let TsExpr::Object { props, .. } = build_object_literal(&spec, vec![]).unwrap() else {
            panic!("expected object literal");
        };
        assert_eq!(props[0], ObjectProp::new("a", TsExpr::string("3")));
        assert_eq!(props[1].key, "b");
    }

    #[test]
    fn test_object_literal_propagates_invalid_reference() {
        let mut spec = ObjectLiteralSpec::new();
        spec.insert("bad".to_string(), LiteralValue::Variable("/oops".to_string()));
        assert!(matches!(
            build_object_literal(&spec, vec![]),
            Err(SynthesisError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_empty_object_literal() {
        let expr = build_object_literal(&ObjectLiteralSpec::new(), vec![]).unwrap();
        assert_eq!(expr.emit(), "{}");
    }
}

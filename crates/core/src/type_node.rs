//! Schema to TypeScript type conversion.

use crate::ast::{TsLiteral, TsPrimitive, TsProp, TsType};
use crate::descriptor::{EnumValue, Schema};
use crate::error::{Result, SynthesisError};

/// Closed set of schema kinds the synthesizer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaKind {
    /// `string`, or a string literal union with `enum`
    String,
    /// `integer`, emitted as `number`
    Integer,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// Structural type over `properties`
    Object,
    /// `items[]`
    Array,
    /// `undefined`
    Undefined,
    /// `null` literal type
    Null,
    /// `never`
    Never,
    /// `void`
    Void,
    /// `any`
    Any,
}

impl SchemaKind {
    /// Classify a wire `type` string.
    pub fn parse(kind: &str) -> Result<Self> {
        Ok(match kind {
            "string" => SchemaKind::String,
            "integer" => SchemaKind::Integer,
            "number" => SchemaKind::Number,
            "boolean" => SchemaKind::Boolean,
            "object" => SchemaKind::Object,
            "array" => SchemaKind::Array,
            "undefined" => SchemaKind::Undefined,
            "null" => SchemaKind::Null,
            "never" => SchemaKind::Never,
            "void" => SchemaKind::Void,
            "any" => SchemaKind::Any,
            other => {
                return Err(SynthesisError::UnsupportedSchemaKind {
                    kind: other.to_string(),
                });
            }
        })
    }

    /// Kinds whose enum list expands to a literal union.
    fn is_enumerable(self) -> bool {
        matches!(
            self,
            SchemaKind::String | SchemaKind::Integer | SchemaKind::Number | SchemaKind::Boolean
        )
    }
}

/// Convert a schema to a TypeScript type.
pub fn synthesize(schema: &Schema) -> Result<TsType> {
    let kind = SchemaKind::parse(&schema.kind)?;

    if kind.is_enumerable()
        && let Some(values) = &schema.enum_values
    {
        return Ok(enum_to_union_type(values));
    }

    Ok(match kind {
        SchemaKind::String => TsType::Primitive(TsPrimitive::String),
        SchemaKind::Integer | SchemaKind::Number => TsType::Primitive(TsPrimitive::Number),
        SchemaKind::Boolean => TsType::Primitive(TsPrimitive::Boolean),
        SchemaKind::Object => TsType::Object(synthesize_properties(schema)?),
        SchemaKind::Array => {
            let item_type = match &schema.items {
                Some(items) => synthesize(items)?,
                None => TsType::Primitive(TsPrimitive::Any),
            };
            TsType::Array(Box::new(item_type))
        }
        SchemaKind::Undefined => TsType::Primitive(TsPrimitive::Undefined),
        SchemaKind::Null => TsType::Literal(TsLiteral::Null),
        SchemaKind::Never => TsType::Primitive(TsPrimitive::Never),
        SchemaKind::Void => TsType::Primitive(TsPrimitive::Void),
        SchemaKind::Any => TsType::Primitive(TsPrimitive::Any),
    })
}

fn synthesize_properties(schema: &Schema) -> Result<Vec<TsProp>> {
    schema
        .properties
        .iter()
        .map(|prop| {
            Ok(TsProp {
                name: prop.name.clone(),
                ty: synthesize(&prop.schema)?,
                optional: !prop.required,
            })
        })
        .collect()
}

/// Convert enum values to a union of literal types, one member per value.
fn enum_to_union_type(values: &[EnumValue]) -> TsType {
    TsType::Union(values.iter().map(|v| TsType::Literal(enum_value_to_literal(v))).collect())
}

fn enum_value_to_literal(value: &EnumValue) -> TsLiteral {
    match value {
        EnumValue::String(s) => TsLiteral::String(s.clone()),
        EnumValue::Integer(i) => TsLiteral::Int(*i),
        EnumValue::Float(f) => TsLiteral::Number(*f),
        EnumValue::Bool(b) => TsLiteral::Bool(*b),
        EnumValue::Null => TsLiteral::Null,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::ast::Emit;
    use crate::descriptor::SchemaProperty;

    #[test]
    fn test_primitive_keywords() {
        let cases = [
            ("string", "string"),
            ("integer", "number"),
            ("number", "number"),
            ("boolean", "boolean"),
            ("undefined", "undefined"),
            ("null", "null"),
            ("never", "never"),
            ("void", "void"),
            ("any", "any"),
        ];
        for (kind, expected) in cases {
            assert_eq!(synthesize(&Schema::of(kind)).unwrap().emit(), expected, "{kind}");
        }
    }

    #[test]
    fn test_enum_expands_to_exactly_n_members() {
        let pool = ["a", "b", "c", "d", "e"];
        for n in 1..=pool.len() {
            let values = pool[..n]
                .iter()
                .map(|s| EnumValue::String((*s).to_string()))
                .collect();
            let ty = synthesize(&Schema::enumerated("string", values)).unwrap();
            match ty {
                TsType::Union(members) => {
                    assert_eq!(members.len(), n);
                    assert!(members.iter().all(|m| matches!(m, TsType::Literal(_))));
                }
                other => panic!("expected a union, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_numeric_and_boolean_enums() {
        let ty = synthesize(&Schema::enumerated(
            "integer",
            vec![EnumValue::Integer(1), EnumValue::Integer(2)],
        ))
        .unwrap();
        assert_eq!(ty.emit(), "1 | 2");

        let ty = synthesize(&Schema::enumerated(
            "number",
            vec![EnumValue::Float(0.5), EnumValue::Integer(3)],
        ))
        .unwrap();
        assert_eq!(ty.emit(), "0.5 | 3");

        let ty = synthesize(&Schema::enumerated("boolean", vec![EnumValue::Bool(true)])).unwrap();
        assert_eq!(ty, TsType::Union(vec![TsType::Literal(TsLiteral::Bool(true))]));
    }

    #[test]
    fn test_empty_enum_is_never() {
        let ty = synthesize(&Schema::enumerated("string", vec![])).unwrap();
        assert_eq!(ty.emit(), "never");
    }

    #[test]
    fn test_enum_on_object_is_ignored() {
        let schema = Schema::enumerated("object", vec![EnumValue::String("x".into())]);
        assert_eq!(synthesize(&schema).unwrap(), TsType::Object(vec![]));
    }

    #[test]
    fn test_object_and_array() {
        let schema = Schema::object(vec![
            SchemaProperty {
                name: "id".into(),
                required: true,
                schema: Schema::of("integer"),
            },
            SchemaProperty {
                name: "tags".into(),
                required: false,
                schema: Schema::array(Schema::enumerated(
                    "string",
                    vec![EnumValue::String("new".into()), EnumValue::String("used".into())],
                )),
            },
            SchemaProperty {
                name: "x-rate".into(),
                required: false,
                schema: Schema::array(Schema::of("any")),
            },
        ]);
        assert_eq!(
            synthesize(&schema).unwrap().emit(),
            "{ id: number; tags?: (\"new\" | \"used\")[]; \"x-rate\"?: any[] }"
        );
    }

    #[test]
    fn test_array_without_items() {
        let schema = Schema::of("array");
        assert_eq!(synthesize(&schema).unwrap().emit(), "any[]");
    }

    #[test]
    fn test_unsupported_kind_fails() {
        let err = synthesize(&Schema::of("tuple")).unwrap_err();
        assert!(matches!(err, SynthesisError::UnsupportedSchemaKind { kind } if kind == "tuple"));
    }

    #[test]
    fn test_unsupported_kind_nested_fails() {
        let schema = Schema::array(Schema::object(vec![SchemaProperty {
            name: "when".into(),
            required: true,
            schema: Schema::of("date"),
        }]));
        assert!(matches!(
            synthesize(&schema),
            Err(SynthesisError::UnsupportedSchemaKind { .. })
        ));
    }
}

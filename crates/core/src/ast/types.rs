//! TypeScript AST types for code generation.
//!
//! This module defines the TypeScript syntax the synthesizer produces:
//! - TsType: type expressions (keywords, literals, unions, indexed access, ...)
//! - TsExpr: expressions (identifiers, member/element access, templates, ...)
//! - TsStmt / TsMethod / TsClass / TsTypeDef / TsModule: declarations

/// TypeScript keyword types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TsPrimitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `undefined`
    Undefined,
    /// `void`
    Void,
    /// `never`
    Never,
    /// `any`
    Any,
}

/// TypeScript literal values
#[derive(Debug, Clone, PartialEq)]
pub enum TsLiteral {
    /// Double-quoted, escaped on emit
    String(String),
    /// Floating point number
    Number(f64),
    /// Integer, printed without a fraction
    Int(i64),
    /// `true` / `false`
    Bool(bool),
    /// `null`
    Null,
}

/// TypeScript type representation
#[derive(Debug, Clone, PartialEq)]
pub enum TsType {
    /// Keyword types: string, number, boolean, undefined, void, never, any
    Primitive(TsPrimitive),
    /// Literal type: "foo", 42, true, null
    Literal(TsLiteral),
    /// Union type: A | B | C
    Union(Vec<TsType>),
    /// Array type: T[]
    Array(Box<TsType>),
    /// Object type: { foo: string; bar?: number }
    Object(Vec<TsProp>),
    /// Named type reference with optional type arguments: Params$getBook<T>
    Ref {
        /// Type name
        name: String,
        /// Type arguments, empty for a plain reference
        args: Vec<TsType>,
    },
    /// Indexed access: Response$getBook$Status$200["application/json"]
    IndexedAccess {
        /// Indexed type, parenthesized when compound
        object: Box<TsType>,
        /// Key type
        index: Box<TsType>,
    },
    /// keyof T
    KeyOf(Box<TsType>),
    /// Function type: <T>(a: A, b?: B) => R
    Function {
        /// Generic parameters
        type_params: Vec<TsTypeParam>,
        /// Parameters
        params: Vec<TsParam>,
        /// Return type
        ret: Box<TsType>,
    },
}

impl TsType {
    /// Reference a named type without type arguments.
    pub fn reference(name: impl Into<String>) -> Self {
        TsType::Ref {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Reference a generic type: `name<args...>`.
    pub fn generic(name: impl Into<String>, args: Vec<TsType>) -> Self {
        TsType::Ref {
            name: name.into(),
            args,
        }
    }

    /// String literal type: `"value"`.
    pub fn string_literal(value: impl Into<String>) -> Self {
        TsType::Literal(TsLiteral::String(value.into()))
    }

    /// Indexed access type: `object[index]`.
    pub fn indexed(object: TsType, index: TsType) -> Self {
        TsType::IndexedAccess {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// Check if this type needs parentheses as an array element or index base
    pub fn is_compound(&self) -> bool {
        match self {
            TsType::Union(types) => types.len() > 1,
            TsType::Function { .. } => true,
            _ => false,
        }
    }
}

/// Object property definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsProp {
    /// Property name, quoted on emit when not an identifier
    pub name: String,
    /// Property type
    pub ty: TsType,
    /// Emit `name?:`
    pub optional: bool,
}

/// TypeScript expression
#[derive(Debug, Clone, PartialEq)]
pub enum TsExpr {
    /// Identifier: foo
    Ident(String),
    /// `this`
    This,
    /// Literal value: "bar", 42
    Literal(TsLiteral),
    /// Member access: foo.bar
    Member {
        /// Receiver
        object: Box<TsExpr>,
        /// Property name, a valid identifier
        prop: String,
    },
    /// Element access with a string key: foo["bar-baz"]
    Index {
        /// Receiver
        object: Box<TsExpr>,
        /// Unescaped key
        key: String,
    },
    /// Object literal: { a: 1, b: 2 }
    Object {
        /// Properties in emit order
        props: Vec<ObjectProp>,
        /// One property per line
        multiline: bool,
    },
    /// Template literal: `head${expr}text`
    Template(TemplateExpr),
    /// Binary expression: a + b
    BinOp {
        /// Left operand
        left: Box<TsExpr>,
        /// Operator
        op: BinOp,
        /// Right operand
        right: Box<TsExpr>,
    },
    /// Function call: foo(a, b)
    Call {
        /// Called expression
        callee: Box<TsExpr>,
        /// Arguments in order
        args: Vec<TsExpr>,
    },
}

impl TsExpr {
    /// Identifier expression.
    pub fn ident(name: impl Into<String>) -> Self {
        TsExpr::Ident(name.into())
    }

    /// String literal expression.
    pub fn string(value: impl Into<String>) -> Self {
        TsExpr::Literal(TsLiteral::String(value.into()))
    }

    /// Member access `object.prop`.
    pub fn member(object: TsExpr, prop: impl Into<String>) -> Self {
        TsExpr::Member {
            object: Box::new(object),
            prop: prop.into(),
        }
    }

    /// Element access `object["key"]`.
    pub fn index(object: TsExpr, key: impl Into<String>) -> Self {
        TsExpr::Index {
            object: Box::new(object),
            key: key.into(),
        }
    }
}

/// Property of an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProp {
    /// Unescaped key; the printer quotes it when needed
    pub key: String,
    /// Property value
    pub value: TsExpr,
}

impl ObjectProp {
    /// Property `key: value`.
    pub fn new(key: impl Into<String>, value: TsExpr) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Template literal: head text followed by `${expr}literal` spans.
///
/// A template without spans is a no-substitution template literal.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateExpr {
    /// Literal text before the first substitution
    pub head: String,
    /// Substitutions in order
    pub spans: Vec<TemplateSpan>,
}

/// One interpolated expression and the literal text that follows it
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateSpan {
    /// Interpolated expression
    pub expr: TsExpr,
    /// Literal text up to the next substitution or the end
    pub literal: String,
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Plus,
}

/// Generic type parameter: `Name extends Constraint`
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeParam {
    /// Parameter name
    pub name: String,
    /// `extends` bound
    pub constraint: Option<TsType>,
}

/// Function or method parameter
#[derive(Debug, Clone, PartialEq)]
pub struct TsParam {
    /// Parameter name
    pub name: String,
    /// Annotation, omitted when `None`
    pub ty: Option<TsType>,
    /// Emit `name?`
    pub optional: bool,
}

/// Statement in a method body
#[derive(Debug, Clone, PartialEq)]
pub enum TsStmt {
    /// `const` declaration
    VarDecl {
        /// Binding name
        name: String,
        /// Annotation, omitted when `None`
        ty: Option<TsType>,
        /// Initializer
        init: TsExpr,
    },
    /// Expression statement
    Expr(TsExpr),
    /// Return statement
    Return(Option<TsExpr>),
    /// Raw code that doesn't fit the AST
    Raw(String),
}

/// Class method produced for one operation
#[derive(Debug, Clone, PartialEq)]
pub struct TsMethod {
    /// Method name
    pub name: String,
    /// Generic parameters
    pub type_params: Vec<TsTypeParam>,
    /// Parameters in order
    pub params: Vec<TsParam>,
    /// Declared return type
    pub return_type: TsType,
    /// Body statements in order
    pub body: Vec<TsStmt>,
    /// Emit `async`
    pub is_async: bool,
    /// Doc comment text; may span several lines
    pub comment: Option<String>,
    /// Add `@deprecated` to the doc comment
    pub deprecated: bool,
}

/// Class declaration
#[derive(Debug, Clone, PartialEq)]
pub struct TsClass {
    /// Class name
    pub name: String,
    /// Generic parameters
    pub type_params: Vec<TsTypeParam>,
    /// Field and constructor declarations emitted verbatim before the methods
    pub prelude: Vec<TsStmt>,
    /// Methods in order
    pub methods: Vec<TsMethod>,
    /// Emit `export`
    pub is_export: bool,
}

/// Import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TsImport {
    /// Items to import
    pub items: Vec<String>,
    /// Module path
    pub from: String,
    /// Whether this is a type-only import
    pub type_only: bool,
}

/// Type definition kind
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefKind {
    /// interface Foo { ... }
    Interface {
        /// Members in order
        properties: Vec<TsProp>,
    },
    /// type Foo = ...
    TypeAlias {
        /// Aliased type
        ty: TsType,
    },
}

/// Type definition
#[derive(Debug, Clone, PartialEq)]
pub struct TsTypeDef {
    /// Declared name
    pub name: String,
    /// Generic parameters
    pub type_params: Vec<TsTypeParam>,
    /// Interface or alias
    pub kind: TypeDefKind,
    /// Emit `export`
    pub is_export: bool,
}

/// Complete TypeScript module
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TsModule {
    /// Import statements, emitted first
    pub imports: Vec<TsImport>,
    /// Type declarations
    pub types: Vec<TsTypeDef>,
    /// Classes, emitted last
    pub classes: Vec<TsClass>,
}

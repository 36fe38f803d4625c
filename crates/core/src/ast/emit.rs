//! TypeScript code emission via the Emit trait.
//!
//! This module provides a trait-based approach to converting TypeScript AST nodes
//! to string representations. Each AST type implements `Emit` for clean, composable
//! code generation. Nodes that span several lines also expose `emit_indented`.

use super::types::{
    BinOp, ObjectProp, TemplateExpr, TsClass, TsExpr, TsImport, TsLiteral, TsMethod, TsModule,
    TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TsTypeParam, TypeDefKind,
};
use super::utils::{escape_js_string, escape_template_text, quote_if_needed};

/// Trait for emitting TypeScript code from AST nodes.
pub trait Emit {
    /// Convert the AST node to its TypeScript string representation.
    fn emit(&self) -> String;
}

const INDENT: &str = "  ";

fn indent_str(level: usize) -> String {
    INDENT.repeat(level)
}

// =============================================================================
// Primitive Types
// =============================================================================

impl Emit for TsPrimitive {
    fn emit(&self) -> String {
        match self {
            TsPrimitive::String => "string",
            TsPrimitive::Number => "number",
            TsPrimitive::Boolean => "boolean",
            TsPrimitive::Undefined => "undefined",
            TsPrimitive::Void => "void",
            TsPrimitive::Never => "never",
            TsPrimitive::Any => "any",
        }
        .to_string()
    }
}

impl Emit for TsLiteral {
    fn emit(&self) -> String {
        match self {
            TsLiteral::String(s) => format!("\"{}\"", escape_js_string(s)),
            TsLiteral::Number(n) => n.to_string(),
            TsLiteral::Int(i) => i.to_string(),
            TsLiteral::Bool(b) => b.to_string(),
            TsLiteral::Null => "null".to_string(),
        }
    }
}

// =============================================================================
// Types
// =============================================================================

/// Emit a type in a position that binds tighter than `|` (array element, index base).
fn emit_postfix_operand(ty: &TsType) -> String {
    if ty.is_compound() || matches!(ty, TsType::KeyOf(_)) {
        format!("({})", ty.emit())
    } else {
        ty.emit()
    }
}

impl Emit for TsType {
    fn emit(&self) -> String {
        match self {
            TsType::Primitive(p) => p.emit(),
            TsType::Literal(lit) => lit.emit(),
            TsType::Union(types) => {
                if types.is_empty() {
                    TsPrimitive::Never.emit()
                } else {
                    types.iter().map(Emit::emit).collect::<Vec<_>>().join(" | ")
                }
            }
            TsType::Array(inner) => format!("{}[]", emit_postfix_operand(inner)),
            TsType::Object(props) => {
                if props.is_empty() {
                    "{}".to_string()
                } else {
                    let parts: Vec<_> = props.iter().map(Emit::emit).collect();
                    format!("{{ {} }}", parts.join("; "))
                }
            }
            TsType::Ref { name, args } => {
                if args.is_empty() {
                    name.clone()
                } else {
                    let args = args.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                    format!("{name}<{args}>")
                }
            }
            TsType::IndexedAccess { object, index } => {
                format!("{}[{}]", emit_postfix_operand(object), index.emit())
            }
            TsType::KeyOf(inner) => {
                if inner.is_compound() {
                    format!("keyof ({})", inner.emit())
                } else {
                    format!("keyof {}", inner.emit())
                }
            }
            TsType::Function {
                type_params,
                params,
                ret,
            } => {
                let params = params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
                format!("{}({params}) => {}", emit_type_params(type_params), ret.emit())
            }
        }
    }
}

impl Emit for TsProp {
    fn emit(&self) -> String {
        let key = quote_if_needed(&self.name);
        let opt = if self.optional { "?" } else { "" };
        format!("{}{}: {}", key, opt, self.ty.emit())
    }
}

impl Emit for TsTypeParam {
    fn emit(&self) -> String {
        match &self.constraint {
            Some(constraint) => format!("{} extends {}", self.name, constraint.emit()),
            None => self.name.clone(),
        }
    }
}

fn emit_type_params(params: &[TsTypeParam]) -> String {
    if params.is_empty() {
        String::new()
    } else {
        let joined = params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
        format!("<{joined}>")
    }
}

// =============================================================================
// Type Definitions
// =============================================================================

impl Emit for TsTypeDef {
    fn emit(&self) -> String {
        let export = if self.is_export { "export " } else { "" };
        let type_params = emit_type_params(&self.type_params);
        match &self.kind {
            TypeDefKind::Interface { properties } => {
                let mut output = format!("{export}interface {}{type_params} {{\n", self.name);
                for prop in properties {
                    output.push_str(&format!("{INDENT}{};\n", prop.emit()));
                }
                output.push_str("}\n");
                output
            }
            TypeDefKind::TypeAlias { ty } => {
                format!("{export}type {}{type_params} = {};\n", self.name, ty.emit())
            }
        }
    }
}

// =============================================================================
// Expressions
// =============================================================================

impl Emit for BinOp {
    fn emit(&self) -> String {
        match self {
            BinOp::Plus => "+".to_string(),
        }
    }
}

impl Emit for TemplateExpr {
    fn emit(&self) -> String {
        let mut output = String::from("`");
        output.push_str(&escape_template_text(&self.head));
        for span in &self.spans {
            output.push_str(&format!("${{{}}}", span.expr.emit()));
            output.push_str(&escape_template_text(&span.literal));
        }
        output.push('`');
        output
    }
}

impl ObjectProp {
    fn emit_indented(&self, indent: usize) -> String {
        // `{ url }` instead of `{ url: url }`
        if let TsExpr::Ident(name) = &self.value
            && *name == self.key
        {
            return name.clone();
        }
        format!(
            "{}: {}",
            quote_if_needed(&self.key),
            self.value.emit_indented(indent)
        )
    }
}

impl TsExpr {
    /// Emit at the given nesting level; only multi-line objects use it.
    pub fn emit_indented(&self, indent: usize) -> String {
        match self {
            TsExpr::Ident(name) => name.clone(),
            TsExpr::This => "this".to_string(),
            TsExpr::Literal(lit) => lit.emit(),
            TsExpr::Member { object, prop } => {
                format!("{}.{}", object.emit_indented(indent), prop)
            }
            TsExpr::Index { object, key } => {
                format!(
                    "{}[\"{}\"]",
                    object.emit_indented(indent),
                    escape_js_string(key)
                )
            }
            TsExpr::Object { props, multiline } => {
                if props.is_empty() {
                    "{}".to_string()
                } else if *multiline {
                    let inner = indent_str(indent + 1);
                    let parts: Vec<_> = props
                        .iter()
                        .map(|p| format!("{inner}{}", p.emit_indented(indent + 1)))
                        .collect();
                    format!("{{\n{}\n{}}}", parts.join(",\n"), indent_str(indent))
                } else {
                    let parts: Vec<_> = props.iter().map(|p| p.emit_indented(indent)).collect();
                    format!("{{ {} }}", parts.join(", "))
                }
            }
            TsExpr::Template(template) => template.emit(),
            TsExpr::BinOp { left, op, right } => format!(
                "{} {} {}",
                left.emit_indented(indent),
                op.emit(),
                right.emit_indented(indent)
            ),
            TsExpr::Call { callee, args } => {
                let args_str = args
                    .iter()
                    .map(|a| a.emit_indented(indent))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{}({})", callee.emit_indented(indent), args_str)
            }
        }
    }
}

impl Emit for TsExpr {
    fn emit(&self) -> String {
        self.emit_indented(0)
    }
}

impl Emit for TsParam {
    fn emit(&self) -> String {
        let opt = if self.optional { "?" } else { "" };
        match &self.ty {
            Some(ty) => format!("{}{}: {}", self.name, opt, ty.emit()),
            None => format!("{}{}", self.name, opt),
        }
    }
}

// =============================================================================
// Statements
// =============================================================================

impl Emit for TsStmt {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl TsStmt {
    /// Emit with specified indentation level (2 spaces per level)
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = indent_str(indent);
        match self {
            TsStmt::VarDecl { name, ty, init } => {
                let ty_str = ty
                    .as_ref()
                    .map(|t| format!(": {}", t.emit()))
                    .unwrap_or_default();
                format!(
                    "{}const {}{} = {};\n",
                    prefix,
                    name,
                    ty_str,
                    init.emit_indented(indent)
                )
            }
            TsStmt::Expr(expr) => format!("{}{};\n", prefix, expr.emit_indented(indent)),
            TsStmt::Return(expr) => match expr {
                Some(e) => format!("{}return {};\n", prefix, e.emit_indented(indent)),
                None => format!("{prefix}return;\n"),
            },
            TsStmt::Raw(code) => code
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        "\n".to_string()
                    } else {
                        format!("{prefix}{line}\n")
                    }
                })
                .collect(),
        }
    }
}

// =============================================================================
// Methods and classes
// =============================================================================

fn emit_doc_comment(comment: Option<&str>, deprecated: bool, indent: usize) -> String {
    let mut lines: Vec<String> = comment
        .map(|c| c.lines().map(|l| l.replace("*/", "*\\/")).collect())
        .unwrap_or_default();
    if deprecated {
        lines.push("@deprecated".to_string());
    }
    if lines.is_empty() {
        return String::new();
    }

    let prefix = indent_str(indent);
    let mut output = format!("{prefix}/**\n");
    for line in lines {
        if line.is_empty() {
            output.push_str(&format!("{prefix} *\n"));
        } else {
            output.push_str(&format!("{prefix} * {line}\n"));
        }
    }
    output.push_str(&format!("{prefix} */\n"));
    output
}

impl TsMethod {
    /// Emit as a class member at the given indentation level.
    pub fn emit_indented(&self, indent: usize) -> String {
        let prefix = indent_str(indent);
        let mut output = emit_doc_comment(self.comment.as_deref(), self.deprecated, indent);

        let async_str = if self.is_async { "async " } else { "" };
        let params_str = self.params.iter().map(Emit::emit).collect::<Vec<_>>().join(", ");
        output.push_str(&format!(
            "{prefix}public {async_str}{}{}({}): {} {{\n",
            self.name,
            emit_type_params(&self.type_params),
            params_str,
            self.return_type.emit()
        ));
        for stmt in &self.body {
            output.push_str(&stmt.emit_indented(indent + 1));
        }
        output.push_str(&format!("{prefix}}}\n"));
        output
    }
}

impl Emit for TsMethod {
    fn emit(&self) -> String {
        self.emit_indented(1)
    }
}

impl Emit for TsClass {
    fn emit(&self) -> String {
        let export = if self.is_export { "export " } else { "" };
        let mut output = format!(
            "{export}class {}{} {{\n",
            self.name,
            emit_type_params(&self.type_params)
        );

        let mut sections: Vec<String> = Vec::new();
        if !self.prelude.is_empty() {
            sections.push(self.prelude.iter().map(|s| s.emit_indented(1)).collect());
        }
        sections.extend(self.methods.iter().map(|m| m.emit_indented(1)));
        output.push_str(&sections.join("\n"));

        output.push_str("}\n");
        output
    }
}

// =============================================================================
// Imports
// =============================================================================

impl Emit for TsImport {
    fn emit(&self) -> String {
        let items_str = self.items.join(", ");
        let type_keyword = if self.type_only { "type " } else { "" };
        format!(
            "import {}{{ {} }} from \"{}\";\n",
            type_keyword,
            items_str,
            escape_js_string(&self.from)
        )
    }
}

// =============================================================================
// Module
// =============================================================================

impl Emit for TsModule {
    fn emit(&self) -> String {
        let mut output = String::new();

        for import in &self.imports {
            output.push_str(&import.emit());
        }

        if !self.imports.is_empty() {
            output.push('\n');
        }

        for type_def in &self.types {
            output.push_str(&type_def.emit());
            output.push('\n');
        }

        for class in &self.classes {
            output.push_str(&class.emit());
        }

        output
    }
}

// =============================================================================
// Tests
// =============================================================================

//! TypeScript syntax tree and printer.
//!
//! - `types`: TypeScript AST (TsType, TsExpr, TsStmt, TsMethod, TsClass, TsModule)
//! - `emit`: AST -> code strings (via the `Emit` trait)
//! - `utils`: identifier validity, quoting and escaping

mod emit;
mod types;
pub mod utils;

pub use emit::Emit;
pub use types::{
    BinOp, ObjectProp, TemplateExpr, TemplateSpan, TsClass, TsExpr, TsImport, TsLiteral, TsMethod,
    TsModule, TsParam, TsPrimitive, TsProp, TsStmt, TsType, TsTypeDef, TsTypeParam, TypeDefKind,
};

//! Template literal construction and request URI splitting.

use crate::ast::{TemplateExpr, TemplateSpan, TsExpr};
use crate::error::{InvariantViolation, Result};

/// One piece of a template: literal text or an interpolated expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateItem {
    /// Raw text, escaped on emit
    Literal(String),
    /// Expression interpolated as `${expr}`
    Expr(TsExpr),
}

impl TemplateItem {
    /// Literal text item.
    pub fn literal(text: impl Into<String>) -> Self {
        TemplateItem::Literal(text.into())
    }

    /// Interpolated expression item.
    pub fn expr(expr: TsExpr) -> Self {
        TemplateItem::Expr(expr)
    }
}

fn span(expr: TsExpr, literal: impl Into<String>) -> TemplateSpan {
    TemplateSpan {
        expr,
        literal: literal.into(),
    }
}

/// Build a template literal from alternating literal and expression items.
///
/// A leading literal becomes the head. The remaining items are consumed in
/// `(expression, next)` pairs:
///
/// ```text
/// []                      -> ``
/// [a]                     -> `a`
/// [${b}]                  -> `${b}`
/// [a, ${b}]               -> `a${b}`
/// [${a}, ${b}]            -> `${a}${b}`
/// [${a}, b, ${c}]         -> `${a}b${c}`
/// ```
///
/// Literal text where an expression must start a pair is an `InvariantViolation`.
pub fn build_template(items: Vec<TemplateItem>) -> Result<TsExpr> {
    let mut items = items.into_iter().enumerate().peekable();

    let head = match items.next_if(|(_, item)| matches!(item, TemplateItem::Literal(_))) {
        Some((_, TemplateItem::Literal(text))) => text,
        _ => String::new(),
    };

    let mut spans = Vec::new();
    while let Some((index, current)) = items.next() {
        let TemplateItem::Expr(current) = current else {
            return Err(InvariantViolation {
                index,
                detail: "expected an expression item, found literal text".to_string(),
            }
            .into());
        };
        match items.next() {
            None => spans.push(span(current, "")),
            Some((_, TemplateItem::Literal(text))) => spans.push(span(current, text)),
            Some((_, TemplateItem::Expr(next))) => {
                spans.push(span(current, ""));
                spans.push(span(next, ""));
            }
        }
    }

    Ok(TsExpr::Template(TemplateExpr { head, spans }))
}

/// Split `text` on every occurrence of `delimiter`, keeping the delimiters.
///
/// `"/{a}/b/{a}/c{a}/"` split on `"{a}"` gives
/// `["/", "{a}", "/b/", "{a}", "/c", "{a}", "/"]`. Literal pieces may be empty,
/// so literal and delimiter pieces always alternate.
pub fn split_keeping_delimiters(text: &str, delimiter: &str) -> Vec<String> {
    if delimiter.is_empty() {
        return vec![text.to_string()];
    }
    let mut parts = Vec::new();
    for (i, piece) in text.split(delimiter).enumerate() {
        if i > 0 {
            parts.push(delimiter.to_string());
        }
        parts.push(piece.to_string());
    }
    parts
}

/// Apply `split_keeping_delimiters` for each delimiter in turn.
pub fn multi_split(text: &str, delimiters: &[String]) -> Vec<String> {
    delimiters
        .iter()
        .fold(vec![text.to_string()], |parts, delimiter| {
            parts
                .iter()
                .flat_map(|part| {
                    if delimiters.contains(part) {
                        vec![part.clone()]
                    } else {
                        split_keeping_delimiters(part, delimiter)
                    }
                })
                .collect()
        })
}

mod ast;
pub use ast::*;


use crate::diagnostics::{Diagnostic, Diagnostics};
use bson::{Bson, Document};

const LIKE_KEY: &str = "like";

/// All clause keys and modifier aliases are compared in this form.
pub(crate) fn normalize_key(key: &str) -> String {
    key.to_lowercase()
}

enum ClauseKey {
    Logical(LogicalOp),
    Like,
    Field,
}

impl ClauseKey {
    fn resolve(key: &str) -> Self {
        match normalize_key(key).as_str() {
            "or" | "$or" => ClauseKey::Logical(LogicalOp::Or),
            "$and" => ClauseKey::Logical(LogicalOp::And),
            "$nor" => ClauseKey::Logical(LogicalOp::Nor),
            LIKE_KEY => ClauseKey::Like,
            _ => ClauseKey::Field,
        }
    }
}

impl Modifier {
    /// Maps every accepted spelling of a modifier key to its variant.
    /// `contains` only applies to string operands; over anything else it
    /// is passed through like any unknown key.
    pub fn resolve(key: &str, operand: &Bson) -> Modifier {
        let is_string = matches!(operand, Bson::String(_));
        match normalize_key(key).as_str() {
            "!" | "not" => Modifier::Not,
            "contains" if is_string => Modifier::Contains,
            "like" => Modifier::Like,
            "startswith" => Modifier::StartsWith,
            "endswith" => Modifier::EndsWith,
            "<" | "lessthan" | "lt" => Modifier::LessThan,
            "<=" | "lessthanorequal" | "lte" => Modifier::LessThanOrEqual,
            ">" | "greaterthan" | "gt" => Modifier::GreaterThan,
            ">=" | "greaterthanorequal" | "gte" => Modifier::GreaterThanOrEqual,
            _ => Modifier::Passthrough(key.to_string()),
        }
    }
}

pub(crate) fn parse_clause(clause: &Document, diagnostics: &mut Diagnostics) -> Clause {
    let entries = clause
        .iter()
        .filter_map(|(key, value)| parse_clause_entry(key, value, diagnostics))
        .collect();
    Clause { entries }
}

fn parse_clause_entry(
    key: &str,
    value: &Bson,
    diagnostics: &mut Diagnostics,
) -> Option<ClauseEntry> {
    match ClauseKey::resolve(key) {
        ClauseKey::Logical(op) => match value {
            Bson::Array(items) => Some(ClauseEntry::Logical {
                op,
                clauses: items
                    .iter()
                    .map(|item| parse_nested_clause(item, diagnostics))
                    .collect(),
            }),
            other => {
                diagnostics.push(Diagnostic::DroppedLogicalKey {
                    key: key.to_string(),
                    found: other.element_type(),
                });
                None
            }
        },
        ClauseKey::Like => match value {
            Bson::Document(group) => Some(ClauseEntry::LikeGroup(
                group
                    .iter()
                    .map(|(field, pattern)| FieldMatch {
                        field: field.clone(),
                        expression: Expression::Modifiers(vec![parse_modifier(
                            LIKE_KEY, pattern,
                        )]),
                    })
                    .collect(),
            )),
            other => {
                diagnostics.push(Diagnostic::NonDocumentLikeGroup(other.element_type()));
                None
            }
        },
        ClauseKey::Field => Some(ClauseEntry::Field(FieldMatch {
            field: key.to_string(),
            expression: parse_expression(value),
        })),
    }
}

fn parse_nested_clause(item: &Bson, diagnostics: &mut Diagnostics) -> Clause {
    match item {
        Bson::Document(clause) => parse_clause(clause, diagnostics),
        Bson::Null => Clause::default(),
        other => {
            diagnostics.push(Diagnostic::NonDocumentClause(other.element_type()));
            Clause::default()
        }
    }
}

pub(crate) fn parse_expression(value: &Bson) -> Expression {
    match value {
        Bson::Document(modifiers) => Expression::Modifiers(
            modifiers
                .iter()
                .map(|(key, operand)| parse_modifier(key, operand))
                .collect(),
        ),
        Bson::Array(values) => Expression::In(values.clone()),
        scalar => Expression::Scalar(scalar.clone()),
    }
}

fn parse_modifier(key: &str, operand: &Bson) -> (Modifier, Operand) {
    let modifier = Modifier::resolve(key, operand);
    let operand = match (&modifier, operand) {
        (Modifier::Not, Bson::Document(_)) => Operand::Nested(Box::new(parse_expression(operand))),
        _ => Operand::Value(operand.clone()),
    };
    (modifier, operand)
}

use crate::schema::FieldType;
use bson::spec::ElementType;
use thiserror::Error;
use tracing::{event, Level};

/// A silent substitution made while translating. The translated output
/// is the same whether or not these are inspected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Diagnostic {
    #[error("`where` is a {0:?}, not a document; translated as an empty clause")]
    NonDocumentWhere(ElementType),
    #[error("`sort` is a {0:?}, not a document; translated as an empty sort")]
    NonDocumentSort(ElementType),
    #[error("logical operator `{key}` requires an array, found {found:?}; key dropped")]
    DroppedLogicalKey { key: String, found: ElementType },
    #[error("logical operator element is a {0:?}, not a document; translated as an empty clause")]
    NonDocumentClause(ElementType),
    #[error("`like` group is a {0:?}, not a document; key dropped")]
    NonDocumentLikeGroup(ElementType),
    #[error("{field_type} field `{field}` has unparsable value {value:?}")]
    UnparsableNumber {
        field: String,
        field_type: FieldType,
        value: String,
    },
    #[error("{field_type} field `{field}` has unparsable value {value:?}; kept as a string")]
    UnparsableDate {
        field: String,
        field_type: FieldType,
        value: String,
    },
}

/// Collects diagnostics for one translation and logs each one as it
/// arrives.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub(crate) fn push(&mut self, diagnostic: Diagnostic) {
        event!(Level::WARN, "{}", diagnostic);
        self.0.push(diagnostic);
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn into_vec(self) -> Vec<Diagnostic> {
        self.0
    }
}

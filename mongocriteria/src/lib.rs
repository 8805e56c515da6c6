mod codegen;
mod diagnostics;
pub use diagnostics::Diagnostic;
pub mod options;
mod parser;
pub mod result;
pub mod schema;
mod util;
pub use util::escape_regex;

use crate::{
    codegen::MqlCodeGenerator,
    diagnostics::Diagnostics,
    options::TranslateOptions,
    result::{Error, Result},
    schema::Schema,
};
use bson::{Bson, Document};
use tracing::{event, instrument, Level};

/// The generic identity key used by criteria producers.
pub const IDENTITY_ALIAS: &str = "id";
/// The identity field of the target document store.
pub const IDENTITY_FIELD: &str = "_id";

const WHERE_KEY: &str = "where";
const SORT_KEY: &str = "sort";

/// The result of translating one criteria document.
#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    /// The criteria with `where` and `sort` rewritten into the store's
    /// operator grammar. Every other top-level key is copied verbatim.
    pub criteria: Document,
    /// Every silent substitution made while translating, in the order
    /// it happened. Empty for well-formed input.
    pub diagnostics: Vec<Diagnostic>,
}

/// Translates criteria against one schema. Construct one per incoming
/// query; it holds nothing but immutable references.
#[derive(Debug, Clone, Copy)]
pub struct CriteriaTranslator<'a> {
    schema: &'a Schema,
    options: TranslateOptions,
}

impl<'a> CriteriaTranslator<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        Self::with_options(schema, TranslateOptions::default())
    }

    pub fn with_options(schema: &'a Schema, options: TranslateOptions) -> Self {
        Self { schema, options }
    }

    /// Rewrites `where` into an operator document and `sort` into a
    /// field -> 1/-1 document. The input is never mutated and no error is
    /// ever returned; fallbacks are reported through
    /// [`Translation::diagnostics`].
    #[instrument(skip_all)]
    pub fn translate(&self, criteria: &Document) -> Translation {
        let gen = MqlCodeGenerator::new(self.schema, self.options);
        let mut diagnostics = Diagnostics::default();

        let criteria = criteria
            .iter()
            .map(|(key, value)| {
                let value = match key.as_str() {
                    WHERE_KEY => Bson::Document(self.translate_where(&gen, value, &mut diagnostics)),
                    SORT_KEY => Bson::Document(gen.codegen_sort(value, &mut diagnostics)),
                    _ => value.clone(),
                };
                (key.clone(), value)
            })
            .collect::<Document>();

        event!(
            Level::DEBUG,
            keys = criteria.len(),
            diagnostics = diagnostics.len(),
            "translated criteria"
        );

        Translation {
            criteria,
            diagnostics: diagnostics.into_vec(),
        }
    }

    fn translate_where(
        &self,
        gen: &MqlCodeGenerator,
        value: &Bson,
        diagnostics: &mut Diagnostics,
    ) -> Document {
        match value {
            Bson::Null => Document::new(),
            Bson::Document(clause) => {
                let clause = parser::parse_clause(clause, diagnostics);
                gen.codegen_clause(clause, diagnostics)
            }
            other => {
                diagnostics.push(Diagnostic::NonDocumentWhere(other.element_type()));
                Document::new()
            }
        }
    }
}

/// Returns the store-native translation of `criteria` for the given schema.
pub fn translate_criteria(
    criteria: &Document,
    schema: &Schema,
    options: TranslateOptions,
) -> Translation {
    CriteriaTranslator::with_options(schema, options).translate(criteria)
}

/// Converts Extended JSON criteria (as produced by an ORM layer speaking
/// JSON) into a document ready for [`translate_criteria`].
pub fn criteria_from_json(value: serde_json::Value) -> Result<Document> {
    match Bson::try_from(value)? {
        Bson::Document(d) => Ok(d),
        other => Err(Error::NonDocumentCriteria(other.element_type())),
    }
}

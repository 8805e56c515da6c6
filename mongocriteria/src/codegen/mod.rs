mod clause;
mod coercion;
mod expression;
mod sort;


use crate::{options::TranslateOptions, schema::Schema};

/// Lowers parsed criteria into the store's operator grammar. Holds only
/// the read-only context every recursive step consults; diagnostics are
/// threaded through each call separately.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MqlCodeGenerator<'a> {
    pub(crate) schema: &'a Schema,
    pub(crate) options: TranslateOptions,
}

impl<'a> MqlCodeGenerator<'a> {
    pub(crate) fn new(schema: &'a Schema, options: TranslateOptions) -> Self {
        MqlCodeGenerator { schema, options }
    }
}

use crate::{
    codegen::MqlCodeGenerator,
    diagnostics::{Diagnostic, Diagnostics},
    IDENTITY_ALIAS, IDENTITY_FIELD,
};
use bson::{Bson, Document};

const ASCENDING: i32 = 1;
const DESCENDING: i32 = -1;

impl MqlCodeGenerator<'_> {
    /// Normalizes a sort specification to field -> 1/-1. Only `0` and `-1`
    /// mean descending; every other indicator is ascending.
    pub(crate) fn codegen_sort(&self, sort: &Bson, diagnostics: &mut Diagnostics) -> Document {
        let spec = match sort {
            Bson::Document(spec) => spec,
            Bson::Null => return Document::new(),
            other => {
                diagnostics.push(Diagnostic::NonDocumentSort(other.element_type()));
                return Document::new();
            }
        };
        spec.iter()
            .map(|(field, direction)| {
                let field = if field == IDENTITY_ALIAS {
                    IDENTITY_FIELD.to_string()
                } else {
                    field.clone()
                };
                (field, Bson::Int32(sort_direction(direction)))
            })
            .collect()
    }
}

fn sort_direction(direction: &Bson) -> i32 {
    let descending = match direction {
        Bson::Int32(d) => *d == 0 || *d == -1,
        Bson::Int64(d) => *d == 0 || *d == -1,
        Bson::Double(d) => *d == 0.0 || *d == -1.0,
        _ => false,
    };
    if descending {
        DESCENDING
    } else {
        ASCENDING
    }
}

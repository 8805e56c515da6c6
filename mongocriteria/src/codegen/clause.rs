use crate::{
    codegen::MqlCodeGenerator,
    diagnostics::Diagnostics,
    parser::{Clause, ClauseEntry, FieldMatch},
    IDENTITY_ALIAS, IDENTITY_FIELD,
};
use bson::{Bson, Document};

impl MqlCodeGenerator<'_> {
    pub(crate) fn codegen_clause(&self, clause: Clause, diagnostics: &mut Diagnostics) -> Document {
        let mut out = Document::new();
        for entry in clause.entries {
            match entry {
                ClauseEntry::Logical { op, clauses } => {
                    let clauses = clauses
                        .into_iter()
                        .map(|c| Bson::Document(self.codegen_clause(c, diagnostics)))
                        .collect::<Vec<_>>();
                    out.insert(op.as_str(), Bson::Array(clauses));
                }
                ClauseEntry::LikeGroup(matches) => {
                    for FieldMatch { field, expression } in matches {
                        let value = self.codegen_expression(&field, expression, diagnostics);
                        out.insert(field, value);
                    }
                }
                ClauseEntry::Field(FieldMatch { field, expression }) => {
                    // only the first identity key at a level is renamed
                    let field = if field == IDENTITY_ALIAS && !out.contains_key(IDENTITY_FIELD) {
                        IDENTITY_FIELD.to_string()
                    } else {
                        field
                    };
                    let value = self.codegen_expression(&field, expression, diagnostics);
                    out.insert(field, value);
                }
            }
        }
        out
    }
}

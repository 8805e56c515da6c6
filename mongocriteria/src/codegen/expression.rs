use crate::{
    codegen::MqlCodeGenerator,
    diagnostics::Diagnostics,
    parser::{Expression, Modifier, Operand},
    util::escape_regex,
};
use bson::{doc, Bson, Document, Regex};

const REGEX_KEY: &str = "$regex";

impl MqlCodeGenerator<'_> {
    /// Lowers one field's right-hand side. Modifier maps become operator
    /// documents, arrays become `$in`, and scalars are returned coerced.
    pub(crate) fn codegen_expression(
        &self,
        field: &str,
        expression: Expression,
        diagnostics: &mut Diagnostics,
    ) -> Bson {
        match expression {
            Expression::Scalar(value) => self.coerce_value(field, None, value, diagnostics),
            Expression::In(values) => {
                let values = self.coerce_value(field, None, Bson::Array(values), diagnostics);
                Bson::Document(doc! { "$in": values })
            }
            Expression::Modifiers(modifiers) => {
                self.codegen_modifiers(field, modifiers, diagnostics)
            }
        }
    }

    fn codegen_modifiers(
        &self,
        field: &str,
        modifiers: Vec<(Modifier, Operand)>,
        diagnostics: &mut Diagnostics,
    ) -> Bson {
        let mut out = Document::new();
        for (modifier, operand) in modifiers {
            match (&modifier, operand) {
                (_, Operand::Nested(nested)) => {
                    let nested = self.codegen_expression(field, *nested, diagnostics);
                    out.insert(modifier.output_key(), nested);
                }
                (Modifier::Not, Operand::Value(value)) => {
                    let value = self.coerce_value(field, Some(&modifier), value, diagnostics);
                    let key = match value {
                        Bson::Array(_) => "$nin",
                        _ => "$ne",
                    };
                    out.insert(key, value);
                }
                (m, Operand::Value(value)) if m.is_string_match() => match match_text(&value) {
                    Some(text) => {
                        out.insert(
                            REGEX_KEY,
                            Bson::RegularExpression(string_match_regex(m, &text)),
                        );
                    }
                    None => {
                        let value = self.coerce_value(field, Some(&modifier), value, diagnostics);
                        out.insert(modifier.output_key(), value);
                    }
                },
                (_, Operand::Value(value)) => {
                    let value = self.coerce_value(field, Some(&modifier), value, diagnostics);
                    out.insert(modifier.output_key(), value);
                }
            }
        }

        // a lone string match is written as the bare pattern
        if out.len() == 1 {
            if let Some(Bson::RegularExpression(regex)) = out.get(REGEX_KEY) {
                return Bson::RegularExpression(regex.clone());
            }
        }
        Bson::Document(out)
    }
}

/// The text a string-match operand is matched against. Numbers and
/// booleans are matched in their display form.
fn match_text(value: &Bson) -> Option<String> {
    match value {
        Bson::String(s) => Some(s.clone()),
        Bson::Int32(n) => Some(n.to_string()),
        Bson::Int64(n) => Some(n.to_string()),
        Bson::Double(n) => Some(n.to_string()),
        Bson::Boolean(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Builds the anchored, case-insensitive pattern for a string-match
/// modifier. `raw` is matched literally apart from `%` under `like`.
fn string_match_regex(modifier: &Modifier, raw: &str) -> Regex {
    let escaped = escape_regex(raw);
    let body = match modifier {
        Modifier::Contains => format!(".*{escaped}.*"),
        Modifier::Like => escaped.replace('%', ".*"),
        Modifier::StartsWith => format!("{escaped}.*"),
        Modifier::EndsWith => format!(".*{escaped}"),
        _ => escaped,
    };
    Regex {
        pattern: format!("^{body}$"),
        options: "i".to_string(),
    }
}

use crate::{
    codegen::MqlCodeGenerator,
    diagnostics::{Diagnostic, Diagnostics},
    options::NumericFallback,
    parser::Modifier,
    schema::FieldType,
    IDENTITY_FIELD,
};
use bson::{oid::ObjectId, Bson};
use chrono::{Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ISO_TIMESTAMP: Regex =
        Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}T[0-9]{2}:[0-9]{2}:[0-9]{2}\.[0-9]{3}Z$").unwrap();
    static ref CALENDAR_DATE: Regex =
        Regex::new(r"^([1-9][0-9]{3})-([0-9]{2})-([0-9]{2})$").unwrap();
    static ref INTEGER_PREFIX: Regex = Regex::new(r"^\s*([+-]?[0-9]+)").unwrap();
    static ref FLOAT_PREFIX: Regex = Regex::new(
        r"^\s*([+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?))"
    )
    .unwrap();
}

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl MqlCodeGenerator<'_> {
    /// Converts a string value to the type the schema declares for
    /// `field`. Every other value, and every string on an unknown or
    /// `string` field, is returned unchanged.
    pub(crate) fn coerce_value(
        &self,
        field: &str,
        modifier: Option<&Modifier>,
        value: Bson,
        diagnostics: &mut Diagnostics,
    ) -> Bson {
        if let Some(Modifier::Passthrough(key)) = modifier {
            if key == "$ne" {
                return value;
            }
        }
        let value = if self.options.object_id_identity && field == IDENTITY_FIELD {
            coerce_object_id(value)
        } else {
            value
        };
        let raw = match value {
            Bson::String(raw) => raw,
            other => return other,
        };
        let Some(field_type) = self.schema.field_type(field) else {
            return Bson::String(raw);
        };

        match field_type {
            FieldType::Integer => match parse_integer(&raw) {
                Some(n) => n,
                None => self.numeric_fallback(field, field_type, raw, diagnostics),
            },
            FieldType::Float => match parse_float(&raw) {
                Some(n) => Bson::Double(n),
                None => self.numeric_fallback(field, field_type, raw, diagnostics),
            },
            FieldType::Date if ISO_TIMESTAMP.is_match(&raw) => {
                date_or_string(field, field_type, raw, parse_datetime, diagnostics)
            }
            FieldType::Datetime => {
                date_or_string(field, field_type, raw, parse_datetime, diagnostics)
            }
            FieldType::Date if CALENDAR_DATE.is_match(&raw) => {
                date_or_string(field, field_type, raw, parse_calendar_date, diagnostics)
            }
            FieldType::Boolean if raw == "false" => Bson::Boolean(false),
            FieldType::Boolean if raw == "true" => Bson::Boolean(true),
            _ => Bson::String(raw),
        }
    }

    fn numeric_fallback(
        &self,
        field: &str,
        field_type: &FieldType,
        raw: String,
        diagnostics: &mut Diagnostics,
    ) -> Bson {
        diagnostics.push(Diagnostic::UnparsableNumber {
            field: field.to_string(),
            field_type: field_type.clone(),
            value: raw.clone(),
        });
        match self.options.numeric_fallback {
            NumericFallback::NaN => Bson::Double(f64::NAN),
            NumericFallback::KeepOriginal => Bson::String(raw),
        }
    }
}

fn date_or_string(
    field: &str,
    field_type: &FieldType,
    raw: String,
    parse: fn(&str) -> Option<bson::DateTime>,
    diagnostics: &mut Diagnostics,
) -> Bson {
    match parse(&raw) {
        Some(date) => Bson::DateTime(date),
        None => {
            diagnostics.push(Diagnostic::UnparsableDate {
                field: field.to_string(),
                field_type: field_type.clone(),
                value: raw.clone(),
            });
            Bson::String(raw)
        }
    }
}

fn coerce_object_id(value: Bson) -> Bson {
    match value {
        Bson::String(s) => match ObjectId::parse_str(&s) {
            Ok(oid) => Bson::ObjectId(oid),
            Err(_) => Bson::String(s),
        },
        Bson::Array(values) => Bson::Array(values.into_iter().map(coerce_object_id).collect()),
        other => other,
    }
}

/// Reads the leading base-10 integer, ignoring whatever follows it.
fn parse_integer(raw: &str) -> Option<Bson> {
    let digits = INTEGER_PREFIX.captures(raw)?.get(1)?.as_str();
    match digits.parse::<i64>() {
        Ok(n) => Some(match i32::try_from(n) {
            Ok(small) => Bson::Int32(small),
            Err(_) => Bson::Int64(n),
        }),
        // out of i64 range
        Err(_) => digits.parse::<f64>().ok().map(Bson::Double),
    }
}

/// Reads the leading floating-point literal, ignoring whatever follows it.
fn parse_float(raw: &str) -> Option<f64> {
    FLOAT_PREFIX
        .captures(raw)?
        .get(1)?
        .as_str()
        .parse::<f64>()
        .ok()
}

fn to_bson_datetime(naive: NaiveDateTime) -> bson::DateTime {
    bson::DateTime::from_chrono(Utc.from_utc_datetime(&naive))
}

/// Accepts RFC 3339, naive date-times (read as UTC), and bare dates (UTC
/// midnight).
fn parse_datetime(raw: &str) -> Option<bson::DateTime> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(bson::DateTime::from_chrono(dt));
    }
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
        })
        .map(to_bson_datetime)
}

/// UTC midnight of a `YYYY-MM-DD` date. Out-of-range months and days roll
/// over into the neighbouring month or year.
fn parse_calendar_date(raw: &str) -> Option<bson::DateTime> {
    let captures = CALENDAR_DATE.captures(raw)?;
    let year: i64 = captures.get(1)?.as_str().parse().ok()?;
    let month: i64 = captures.get(2)?.as_str().parse().ok()?;
    let day: i64 = captures.get(3)?.as_str().parse().ok()?;

    let months = year * 12 + month - 1;
    let first_of_month = NaiveDate::from_ymd_opt(
        i32::try_from(months.div_euclid(12)).ok()?,
        u32::try_from(months.rem_euclid(12) + 1).ok()?,
        1,
    )?;
    let date = first_of_month.checked_add_signed(Duration::days(day - 1))?;
    Some(to_bson_datetime(date.and_hms_opt(0, 0, 0)?))
}

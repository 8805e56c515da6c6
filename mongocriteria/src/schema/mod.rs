
use crate::result::Result;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

/// Declared type of a field. Only the named variants drive coercion;
/// anything else is kept verbatim in `Other`.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Date,
    Datetime,
    Boolean,
    Other(String),
}

impl From<&str> for FieldType {
    fn from(s: &str) -> Self {
        match s {
            "string" => FieldType::String,
            "integer" => FieldType::Integer,
            "float" => FieldType::Float,
            "date" => FieldType::Date,
            "datetime" => FieldType::Datetime,
            "boolean" => FieldType::Boolean,
            other => FieldType::Other(other.to_string()),
        }
    }
}

impl From<String> for FieldType {
    fn from(s: String) -> Self {
        FieldType::from(s.as_str())
    }
}

impl From<FieldType> for String {
    fn from(t: FieldType) -> Self {
        t.to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Date => "date",
            FieldType::Datetime => "datetime",
            FieldType::Boolean => "boolean",
            FieldType::Other(name) => name,
        };
        write!(f, "{name}")
    }
}

/// Per-field metadata. Descriptors may carry more attributes than the
/// type; those are ignored.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug)]
pub struct FieldDescriptor {
    #[serde(rename = "type")]
    pub field_type: FieldType,
}

impl From<FieldType> for FieldDescriptor {
    fn from(field_type: FieldType) -> Self {
        FieldDescriptor { field_type }
    }
}

/// Read-only field name -> descriptor lookup consulted during coercion.
#[derive(Serialize, Deserialize, PartialEq, Eq, Clone, Debug, Default)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl Schema {
    pub fn new(fields: BTreeMap<String, FieldDescriptor>) -> Schema {
        Schema { fields }
    }

    /// Parses a JSON object of the form `{"age": {"type": "integer"}}`.
    pub fn from_json_str(json: &str) -> Result<Schema> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(field)
    }

    pub fn field_type(&self, field: &str) -> Option<&FieldType> {
        self.get(field).map(|d| &d.field_type)
    }
}

impl<K, D> FromIterator<(K, D)> for Schema
where
    K: Into<String>,
    D: Into<FieldDescriptor>,
{
    fn from_iter<I: IntoIterator<Item = (K, D)>>(iter: I) -> Self {
        Schema {
            fields: iter
                .into_iter()
                .map(|(k, d)| (k.into(), d.into()))
                .collect(),
        }
    }
}

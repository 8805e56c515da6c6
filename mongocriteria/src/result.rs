use bson::spec::ElementType;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("schema deserialization error: {0}")]
    Schema(#[from] serde_json::Error),
    #[error("extended json conversion error: {0}")]
    ExtendedJson(#[from] bson::extjson::de::Error),
    #[error("criteria must be a document, found {0:?}")]
    NonDocumentCriteria(ElementType),
}

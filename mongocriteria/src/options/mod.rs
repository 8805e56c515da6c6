/// Options passed in for translation, used throughout the codegen phase
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    pub numeric_fallback: NumericFallback,
    /// Convert 24-hex string values of the identity field into ObjectIds.
    pub object_id_identity: bool,
}

impl TranslateOptions {
    pub fn new(numeric_fallback: NumericFallback, object_id_identity: bool) -> Self {
        TranslateOptions {
            numeric_fallback,
            object_id_identity,
        }
    }
}

/// Specifies what an integer or float field receives when its string
/// value has no numeric prefix.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum NumericFallback {
    /// A double NaN, which matches nothing in the store.
    #[default]
    NaN,
    /// The original, uncoerced string.
    KeepOriginal,
}

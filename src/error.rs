use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures raised by a rendering backend. The presenters themselves define no domain errors,
/// so everything that can go wrong bubbles up from here.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A node was expected to be mounted (eg as the target of a replace), but it is not.
    #[error("node is not mounted")]
    NotMounted,

    /// A node was attached while it is still mounted somewhere else.
    #[error("node is already mounted")]
    AlreadyMounted,

    /// The DOM rejected an operation.
    #[error("dom operation failed: {0}")]
    Dom(String),

    /// A required element could not be located in the document.
    #[error("missing element: {0}")]
    MissingElement(String),

    /// The point list handed to the entry point could not be parsed.
    #[error("invalid points: {0}")]
    InvalidPoints(#[from] serde_json::Error),
}

impl From<JsValue> for RenderError {
    fn from(value: JsValue) -> Self {
        Self::Dom(
            value
                .as_string()
                .unwrap_or_else(|| format!("{value:?}")),
        )
    }
}

impl From<RenderError> for JsValue {
    fn from(error: RenderError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

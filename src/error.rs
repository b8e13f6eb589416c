//! Error type shared by the browser glue.
//!
//! The core modules are infallible; only platform access (window, storage,
//! audio, config parsing) can fail, and most of those failures are logged and
//! swallowed by the caller rather than propagated.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("missing element `{0}`")]
    MissingElement(String),
    #[error("audio unavailable: {0}")]
    Audio(String),
    #[error("session storage unavailable: {0}")]
    Storage(String),
    #[error("invalid site config: {0}")]
    Config(String),
    #[error("javascript error: {0}")]
    Js(String),
}

/// Render a thrown JS value for diagnostics. Strings pass through, everything
/// else falls back to its debug form.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Js(describe_js(&value))
    }
}

impl From<SiteError> for JsValue {
    fn from(err: SiteError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(feature = "serde_json")]
impl From<serde_json::Error> for SiteError {
    fn from(err: serde_json::Error) -> Self {
        SiteError::Config(err.to_string())
    }
}

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while binding a stage to the page.
#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("no global `window`")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("no element with id `{0}`")]
    CanvasNotFound(String),
    #[error("element `{0}` is not a canvas")]
    NotACanvas(String),
    #[error("canvas has no 2d context")]
    NoContext,
    #[error("invalid stage config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for BridgeError {
    fn from(value: JsValue) -> Self {
        BridgeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<BridgeError> for JsValue {
    fn from(err: BridgeError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

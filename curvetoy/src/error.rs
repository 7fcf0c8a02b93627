#[derive(Debug, thiserror::Error)]
pub enum ToyError {
    #[error(transparent)]
    Curve(#[from] cubic_bezier::Error),
    #[error("invalid header")]
    InvalidHeader,
    #[error("unexpected version {0}")]
    UnexpectedVersion(u16),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("bincode: {0}")]
    Bincode(#[from] bincode::Error),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[cfg(target_arch = "wasm32")]
    #[error("missing element #{0}")]
    MissingElement(String),
    #[cfg(target_arch = "wasm32")]
    #[error("javascript error: '{0}'")]
    Web(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for ToyError {
    fn from(js_val: wasm_bindgen::JsValue) -> ToyError {
        ToyError::Web(format!("{:?}", js_val))
    }
}

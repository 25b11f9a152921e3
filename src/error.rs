use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnhanceError {
    NoWindow,
    NoDocument,
    /// A component's required element is absent from the page.
    MissingAnchor(&'static str),
    /// A DOM call threw.
    Js(String),
}

impl EnhanceError {
    pub fn is_missing_anchor(&self) -> bool {
        matches!(self, Self::MissingAnchor(_))
    }
}

impl fmt::Display for EnhanceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoWindow => write!(f, "Browser window not available"),
            Self::NoDocument => write!(f, "Document not available"),
            Self::MissingAnchor(anchor) => write!(f, "Missing page element: {anchor}"),
            Self::Js(message) => write!(f, "DOM error: {message}"),
        }
    }
}

impl std::error::Error for EnhanceError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for EnhanceError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

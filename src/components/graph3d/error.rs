use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while acquiring the browser surfaces the diagram draws on.
///
/// Bad graph data is not an error: unresolved links and duplicate ids are
/// skipped with a warning when the scene is built.
#[derive(Debug, Error)]
pub enum Graph3dError {
	#[error("browser window unavailable")]
	NoWindow,

	#[error("document unavailable")]
	NoDocument,

	#[error("2d canvas context unavailable: {0}")]
	Context(String),

	#[error("dom operation failed: {0}")]
	Dom(String),
}

impl Graph3dError {
	/// Wrap a raw JS exception into a [`Graph3dError::Dom`].
	pub fn from_js(value: JsValue) -> Self {
		Self::Dom(format!("{value:?}"))
	}
}

pub type Result<T> = std::result::Result<T, Graph3dError>;

use wasm_bindgen::JsValue;

/// Failures while setting up the WebGL pipeline
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Unable to retrieve window.
    #[error("Unable to retrieve window")]
    UnableToRetrieveWindow,

    /// Unable to retrieve document.
    #[error("Unable to retrieve document")]
    UnableToRetrieveDocument,

    /// Unable to retrieve body.
    #[error("Unable to retrieve body")]
    UnableToRetrieveBody,

    /// No canvas element with the requested id.
    #[error("Unable to retrieve canvas '{0}'")]
    UnableToRetrieveCanvas(String),

    /// Unable to retrieve WebGlRenderingContext.
    #[error("Unable to retrieve WebGlRenderingContext")]
    FailedToRetrieveWebGlRenderingContext,

    #[error("Failed to create element: {0}")]
    ElementCreationError(&'static str),

    #[error("Shader program creation error")]
    ShaderProgramCreationError,

    #[error("Shader creation error: {0}")]
    ShaderCreationError(&'static str),

    #[error("Failed compiling shader: {0}")]
    ShaderCompileError(String),

    #[error("Failed linking shader: {0}")]
    ShaderLinkError(String),

    #[error("Failed to create buffer")]
    BufferCreationError,

    #[error("Failed to get uniform location: {0}")]
    UniformLocationError(&'static str),

    #[error("Failed to get attribute location: {0}")]
    AttributeLocationError(&'static str),
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

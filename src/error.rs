use thiserror::Error;

/// Failures the widgets can run into before anything is drawn.
#[derive(Error, Debug)]
pub enum GraphError {
	/// The payload handed over by the host page was not valid JSON for the widget.
	#[error("invalid payload: {0}")]
	InvalidPayload(#[from] serde_json::Error),

	/// The host environment could not provide a 2D drawing context.
	#[error("2d canvas context unavailable")]
	CanvasUnavailable,
}

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("script execution failed: {0}")]
    ScriptExecution(String),

    #[error("malformed queue payload: {0}")]
    MalformedQueuePayload(String),

    #[error("webview error: {0}")]
    WebView(String),
}

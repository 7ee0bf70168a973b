pub mod errors;
pub mod events;

pub use errors::BridgeError;
pub use events::EditorEvent;

pub type Result<T> = std::result::Result<T, BridgeError>;

pub mod clock;
pub mod collector_client;
pub mod content_loader;

pub use collector_client::HttpCollectorClient;
pub use content_loader::{load_content, load_content_or_empty, ContentError};

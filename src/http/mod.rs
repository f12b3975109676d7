pub mod client;
pub mod request;
pub mod response;
pub mod types;

// Re-export commonly used types for convenient access
pub use client::{Client, Transport};
pub use request::{Attachment, Payload, PreparedRequest};
pub use response::Response;
pub use types::Method;

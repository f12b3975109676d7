pub mod body;
pub mod lexer;
pub mod request;
pub mod types;

// Re-export commonly used types
pub use body::BodyClassifier;
pub use request::{RequestHead, RequestParser};
pub use types::{Body, FieldValue, FormField, ParseError, ParseResult, Request};

pub mod config;
pub mod document;
pub mod error;
pub mod generator;
pub mod http;
pub mod logger;
pub mod parser;
pub mod runner;
pub mod utils;
pub mod variable;

// Re-export commonly used types
pub use config::Settings;
pub use error::{RestBlockError, Result};
pub use runner::{Executor, curl_to_descriptor, descriptor_to_curl};

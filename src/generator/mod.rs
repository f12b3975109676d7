pub mod curl;

pub use curl::CurlTranslator;

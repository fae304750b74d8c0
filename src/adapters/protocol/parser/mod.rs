pub mod base_parser;
pub mod request_parser;
pub mod response_encoder;
pub mod tcp_parser;
pub mod traits;
pub mod varint;
pub mod writer;

pub use base_parser::BaseParser;
pub use traits::*;

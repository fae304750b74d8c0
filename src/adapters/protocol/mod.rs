pub mod constants;
pub mod dto;
pub mod kraft_record_parser;
pub mod parser;

pub use kraft_record_parser::KraftRecordParser;
pub use parser::tcp_parser::KafkaProtocolParser;

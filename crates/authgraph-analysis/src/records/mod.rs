//! Record Parser: splits the dump into blank-line separated blocks.

pub mod parser;

pub use parser::RecordParser;

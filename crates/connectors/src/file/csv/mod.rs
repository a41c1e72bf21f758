pub mod error;
pub mod reader;
pub mod writer;

pub use error::FileError;
pub use reader::{CsvRowReader, open_file};
pub use writer::CsvRowWriter;

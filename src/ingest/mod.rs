pub mod reader;
pub mod scanner;

pub use reader::read_source;
pub use scanner::{ScannedFile, Scanner, SkipReason};

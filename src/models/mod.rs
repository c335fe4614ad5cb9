pub mod document;
pub mod reference;

pub use document::{Category, Document, Metadata, Sections, TitleStrategy, SECTION_COUNT};
pub use reference::{Example, FunctionRecord, ModuleRecord, Param, SubsystemRecord};

pub mod reader;
pub mod writer;

pub use reader::{Dataset, DatasetReader};
pub use writer::DatasetWriter;

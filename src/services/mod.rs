pub mod deriver;
pub mod parser;
pub mod splitter;
pub mod toolkit;

pub use deriver::RangeDeriver;
pub use parser::MetadataParser;
pub use splitter::DocumentSplitter;
pub use toolkit::{PdfToolkit, Pdftk};

//! LAS (Log ASCII Standard) reading and writing

mod reader;
mod writer;

pub use reader::{
    parse_header_line, ClassifiedLine, LasLineReader, LasReader, LasReaderConfiguration, Leniency,
    LineKind, ParsedHeaderLine, DEFAULT_NULL_VALUE,
};
pub use writer::{
    write_las, write_las_file, HeaderLayout, LasTextWriter, LasWriter, LasWriterConfiguration,
    SectionWriter,
};

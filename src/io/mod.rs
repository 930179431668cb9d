//! I/O module for reading and writing LAS well log files

pub mod las;

pub use las::{LasReader, LasReaderConfiguration, LasWriter, LasWriterConfiguration};

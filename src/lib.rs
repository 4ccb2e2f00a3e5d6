pub mod config;
pub mod output;
pub mod parser;
pub mod render;
pub mod report;

pub use report::{Grade, InvalidInput, ReportTable, StudentRecord, build, classify};

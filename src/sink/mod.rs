pub mod report;
pub mod result_sink;

pub use report::{EmailReport, OperationReport, RelocationReport, ReportBody, TitleReport};
pub use result_sink::{ResultSink, TitleRecord};

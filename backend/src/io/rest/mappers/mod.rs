pub mod error_mapper;
pub mod report_mapper;

pub use report_mapper::ReportMapper;

pub mod cached_output_resolver;
pub mod json_report_writer;
pub mod live_output_resolver;

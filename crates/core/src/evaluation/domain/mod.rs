pub mod aggregator;
pub mod evaluation_error;
pub mod evaluation_report;
pub mod output_resolver;
pub mod report_writer;
pub mod run_mode;

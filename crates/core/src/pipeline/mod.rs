pub mod convert_video_use_case;
pub mod evaluate_dataset_use_case;
pub mod evaluation_logger;
pub mod infrastructure;
pub mod sample_executor;

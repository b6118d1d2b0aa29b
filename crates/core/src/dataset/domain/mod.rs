pub mod dataset_error;
pub mod dataset_store;
pub mod path_issue;
pub mod sample;

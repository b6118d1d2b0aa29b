pub mod threaded_sample_executor;

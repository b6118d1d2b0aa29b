pub mod jsonl_dataset_store;

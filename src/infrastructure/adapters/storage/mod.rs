//! Storage Adapter

mod output_storage;

pub use output_storage::FileOutputStorage;

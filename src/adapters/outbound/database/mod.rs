/// Vulnerability metadata store adapters
mod in_memory_metadata_store;

pub use in_memory_metadata_store::InMemoryMetadataStore;

//! Storage implementations behind the data service boundary

pub mod in_memory;

pub use in_memory::InMemoryDataService;

// Adapters layer: concrete terrain sources handed to the provider.

pub mod directory;
pub mod memory;

pub use directory::DirectorySource;
pub use memory::MemorySource;

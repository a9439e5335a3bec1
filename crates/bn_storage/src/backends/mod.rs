pub mod memory;

pub use memory::InMemoryInteractionStore;

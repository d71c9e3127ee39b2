//! Persistence adapters.

pub mod memory;

pub use memory::{
    InMemoryCharacterRepo, InMemoryContractRepo, InMemoryNodeRepo, InMemoryPlayerRepo,
    InMemoryRunRepo, InMemorySystemRepo,
};

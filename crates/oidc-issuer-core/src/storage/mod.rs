//! Resource store collaborator.
//!
//! The validator reads resource definitions through [`ResourceStore`].
//! Persistent backends live outside this crate; [`InMemoryResourceStore`]
//! serves embedded use and tests.

pub mod memory;
pub mod resource;

pub use memory::InMemoryResourceStore;
pub use resource::ResourceStore;

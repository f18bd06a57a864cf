//! Domain logic - pure version rules independent of files and processes

pub mod version;

pub use version::{BumpKind, Version};

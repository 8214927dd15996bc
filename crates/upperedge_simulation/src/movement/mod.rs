//! Movement domain
//!
//! Содержит:
//! - JumpIntent (event для прыжка, разрешается ledge системами)
//! - RandomWalker (seeded блуждание для headless прогонов)

pub mod events;
pub mod walker;

pub use events::*;
pub use walker::*;

//! Records owned by the on-chain program, decoded from raw account data.
mod game;
mod registry;

pub use game::*;
pub use registry::*;

//! This crate contains the protocol level pieces of the arcade program
//! - Decoding of the game state and registry records
//! - Derivation of the record addresses
//! - Encoding of the program instructions
//! - Traits for the ledger, wallet and submission boundaries

pub mod constants;
pub mod cursor;
pub mod error;
pub mod instruction;
pub mod pda;
pub mod state;
pub mod transport;

pub use pda::AddressDeriver;

//! Program derived addresses of the two records.

use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::constants::{GAME_STATE_SEED, REGISTRY_SEED};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressDeriver {
    program_id: Pubkey,
}

impl AddressDeriver {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Address of the game record, seeded with `"game_state"` and the game id.
    pub fn game_state_address(&self, game_id: &Pubkey) -> Result<Pubkey> {
        self.find(&[GAME_STATE_SEED, game_id.as_ref()])
    }

    /// Address of the singleton registry, seeded with `"registry"`.
    pub fn registry_address(&self) -> Result<Pubkey> {
        self.find(&[REGISTRY_SEED])
    }

    /// Associated token account of `wallet` for `mint`.
    pub fn payer_token_account(wallet: &Pubkey, mint: &Pubkey) -> Pubkey {
        get_associated_token_address(wallet, mint)
    }

    fn find(&self, seeds: &[&[u8]]) -> Result<Pubkey> {
        Pubkey::try_find_program_address(seeds, &self.program_id)
            .map(|(pda, _bump)| pda)
            .ok_or(Error::DerivationExhausted)
    }
}

//! Boundaries to the chain and to the wallet.
//!
//! The client never talks to the network itself. It reads accounts through a
//! [`LedgerReader`], gets signatures from a [`TransactionSigner`] and hands
//! signed transactions to a [`TransactionSubmitter`].

use crate::error::Result;
use async_trait::async_trait;
use solana_sdk::{hash::Hash, pubkey::Pubkey, transaction::Transaction};

#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Complete data of the account at `addr`, `None` if it doesn't exist.
    async fn fetch_raw(&self, addr: &Pubkey) -> Result<Option<Vec<u8>>>;

    async fn latest_blockhash(&self) -> Result<Hash>;
}

#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// The fee payer and signer of every transaction.
    fn pubkey(&self) -> Pubkey;

    /// Should fail with `SigningDeclined` if the wallet refuses.
    async fn sign(&self, tx: Transaction) -> Result<Transaction>;
}

#[async_trait]
pub trait TransactionSubmitter: Send + Sync {
    /// Returns the confirmation token of the submitted transaction.
    async fn submit(&self, tx: &Transaction) -> Result<String>;
}

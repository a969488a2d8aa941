//! RPC backed implementations of the ledger and submission boundaries, plus a
//! signer for a local keypair file.

use std::path::Path;
use std::sync::Arc;

use arcade_core::error::{Error, Result};
use arcade_core::transport::{LedgerReader, TransactionSigner, TransactionSubmitter};
use async_trait::async_trait;
use solana_rpc_client::nonblocking::rpc_client::RpcClient;
use solana_rpc_client_api::config::RpcSendTransactionConfig;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    pubkey::Pubkey,
    signature::{read_keypair_file, Keypair},
    signer::Signer,
    transaction::Transaction,
};
use tracing::{debug, warn};

use crate::error::{TransportError, TransportResult};

pub fn read_keypair(path: &Path) -> TransportResult<Keypair> {
    read_keypair_file(path).map_err(|e| TransportError::InvalidKeyfile(e.to_string()))
}

pub fn rpc_client(rpc: String) -> Arc<RpcClient> {
    Arc::new(RpcClient::new_with_commitment(
        rpc,
        CommitmentConfig::confirmed(),
    ))
}

pub struct RpcLedger {
    client: Arc<RpcClient>,
}

impl RpcLedger {
    pub fn new(client: Arc<RpcClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LedgerReader for RpcLedger {
    async fn fetch_raw(&self, addr: &Pubkey) -> Result<Option<Vec<u8>>> {
        let account = self
            .client
            .get_account_with_commitment(addr, self.client.commitment())
            .await
            .map_err(|e| Error::LedgerUnavailable(e.to_string()))?
            .value;
        debug!(
            "Fetched account {}: {:?} bytes",
            addr,
            account.as_ref().map(|a| a.data.len())
        );
        Ok(account.map(|a| a.data))
    }

    async fn latest_blockhash(&self) -> Result<Hash> {
        self.client
            .get_latest_blockhash()
            .await
            .map_err(|e| Error::LedgerUnavailable(e.to_string()))
    }
}

pub struct RpcSubmitter {
    client: Arc<RpcClient>,
    skip_preflight: bool,
}

impl RpcSubmitter {
    pub fn new(client: Arc<RpcClient>, skip_preflight: bool) -> Self {
        Self {
            client,
            skip_preflight,
        }
    }
}

#[async_trait]
impl TransactionSubmitter for RpcSubmitter {
    async fn submit(&self, tx: &Transaction) -> Result<String> {
        let sig = self
            .client
            .send_transaction_with_config(
                tx,
                RpcSendTransactionConfig {
                    skip_preflight: self.skip_preflight,
                    ..RpcSendTransactionConfig::default()
                },
            )
            .await
            .map_err(|e| {
                warn!("Failed to send transaction: {}", e);
                Error::SubmissionRejected(e.to_string())
            })?;
        Ok(sig.to_string())
    }
}

/// Signs with a keypair loaded from disk, for CLI and server use.
pub struct KeypairSigner {
    keypair: Keypair,
}

impl KeypairSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn try_from_file(path: &Path) -> TransportResult<Self> {
        Ok(Self::new(read_keypair(path)?))
    }
}

#[async_trait]
impl TransactionSigner for KeypairSigner {
    fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }

    async fn sign(&self, mut tx: Transaction) -> Result<Transaction> {
        let blockhash = tx.message.recent_blockhash;
        tx.try_sign(&[&self.keypair], blockhash)
            .map_err(|e| Error::SigningDeclined(e.to_string()))?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{instruction::Instruction, message::Message};

    #[tokio::test]
    async fn test_keypair_signer() -> anyhow::Result<()> {
        let signer = KeypairSigner::new(Keypair::new());
        let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[1], vec![]);
        let message =
            Message::new_with_blockhash(&[ix], Some(&signer.pubkey()), &Hash::new_unique());
        let tx = signer.sign(Transaction::new_unsigned(message)).await?;
        assert!(tx.is_signed());
        tx.verify()?;
        Ok(())
    }

    #[tokio::test]
    async fn test_keypair_signer_rejects_foreign_payer() {
        let signer = KeypairSigner::new(Keypair::new());
        let ix = Instruction::new_with_bytes(Pubkey::new_unique(), &[1], vec![]);
        let message =
            Message::new_with_blockhash(&[ix], Some(&Pubkey::new_unique()), &Hash::new_unique());
        let r = signer.sign(Transaction::new_unsigned(message)).await;
        assert!(matches!(r, Err(Error::SigningDeclined(_))));
    }

    #[test]
    fn test_read_missing_keypair() {
        let r = read_keypair(Path::new("/nonexistent/id.json"));
        assert!(matches!(r, Err(TransportError::InvalidKeyfile(_))));
    }
}

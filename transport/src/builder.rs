use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use arcade_env::{default_keyfile, parse_with_default_rpc, Config};
use solana_sdk::pubkey::Pubkey;
use tracing::info;

use crate::client::{ClientConfig, RecordClient};
use crate::error::{TransportError, TransportResult};
use crate::solana::{rpc_client, KeypairSigner, RpcLedger, RpcSubmitter};

#[derive(Default)]
pub struct ClientBuilder {
    rpc: Option<String>,
    keyfile: Option<PathBuf>,
    program_id: Option<Pubkey>,
    skip_preflight: Option<bool>,
}

impl ClientBuilder {
    pub fn with_rpc<S: Into<String>>(mut self, rpc: S) -> Self {
        self.rpc = Some(rpc.into());
        self
    }

    pub fn with_keyfile<S: Into<PathBuf>>(mut self, keyfile: S) -> Self {
        self.keyfile = Some(keyfile.into());
        self
    }

    pub fn with_program_id(mut self, program_id: Pubkey) -> Self {
        self.program_id = Some(program_id);
        self
    }

    pub fn with_skip_preflight(mut self, skip_preflight: bool) -> Self {
        self.skip_preflight = Some(skip_preflight);
        self
    }

    pub fn try_with_config(mut self, config: &Config) -> TransportResult<Self> {
        let solana = config
            .solana
            .as_ref()
            .ok_or(TransportError::InvalidConfig("Solana section missing".into()))?;
        self.rpc = Some(solana.rpc.clone());
        self.keyfile = solana.keyfile.clone();
        self.program_id = Some(
            Pubkey::from_str(&solana.program_id)
                .map_err(|_| TransportError::ParseAddressError(solana.program_id.clone()))?,
        );
        self.skip_preflight = solana.skip_preflight;
        Ok(self)
    }

    /// Wire a client to the RPC endpoint, signing with the local keyfile.
    pub fn build(self) -> TransportResult<RecordClient> {
        let rpc = self.rpc.ok_or(TransportError::UnspecifiedRpc)?;
        let rpc = parse_with_default_rpc(&rpc).to_owned();
        let program_id = self.program_id.ok_or(TransportError::UnspecifiedProgramId)?;
        let keyfile = self
            .keyfile
            .unwrap_or_else(|| PathBuf::from(default_keyfile()));
        info!("Build record client, RPC: {}, program id: {}", rpc, program_id);

        let signer = KeypairSigner::try_from_file(&keyfile)?;
        let client = rpc_client(rpc);
        Ok(RecordClient::new(
            ClientConfig { program_id },
            Arc::new(RpcLedger::new(client.clone())),
            Arc::new(signer),
            Arc::new(RpcSubmitter::new(
                client,
                self.skip_preflight.unwrap_or(false),
            )),
        ))
    }
}

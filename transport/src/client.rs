//! Record level reads and operation level writes against the arcade program.

use std::sync::Arc;

use arcade_core::{
    error::{Error, Result},
    instruction::{start_game_instructions, ArcadeInstruction, InstructionAccounts},
    state::{GameRegistry, GameState},
    transport::{LedgerReader, TransactionSigner, TransactionSubmitter},
    AddressDeriver,
};
use solana_sdk::{
    instruction::Instruction, message::Message, pubkey::Pubkey, transaction::Transaction,
};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    pub program_id: Pubkey,
}

pub struct RecordClient {
    deriver: AddressDeriver,
    ledger: Arc<dyn LedgerReader>,
    signer: Arc<dyn TransactionSigner>,
    submitter: Arc<dyn TransactionSubmitter>,
}

impl RecordClient {
    pub fn new(
        config: ClientConfig,
        ledger: Arc<dyn LedgerReader>,
        signer: Arc<dyn TransactionSigner>,
        submitter: Arc<dyn TransactionSubmitter>,
    ) -> Self {
        info!("Create record client for program {}", config.program_id);
        Self {
            deriver: AddressDeriver::new(config.program_id),
            ledger,
            signer,
            submitter,
        }
    }

    pub fn deriver(&self) -> &AddressDeriver {
        &self.deriver
    }

    /// Fails with `RecordNotFound` if the game was never initialized.
    pub async fn fetch_game_state(&self, game_id: &Pubkey) -> Result<GameState> {
        let addr = self.deriver.game_state_address(game_id)?;
        let data = self
            .ledger
            .fetch_raw(&addr)
            .await?
            .ok_or_else(|| Error::RecordNotFound(addr.to_string()))?;
        GameState::decode(&data)
    }

    /// An uninitialized registry reads as empty.
    pub async fn fetch_registry(&self) -> Result<GameRegistry> {
        let addr = self.deriver.registry_address()?;
        let data = self.ledger.fetch_raw(&addr).await?;
        GameRegistry::decode(data.as_deref())
    }

    pub async fn initialize_game(
        &self,
        game_id: &Pubkey,
        admin: &Pubkey,
        token_account: &Pubkey,
        game_name: &str,
    ) -> Result<String> {
        let accounts = InstructionAccounts {
            payer: self.signer.pubkey(),
            game_state: self.deriver.game_state_address(game_id)?,
            token_account: *token_account,
            registry: self.deriver.registry_address()?,
            payer_token_account: None,
        };
        let ix = ArcadeInstruction::Initialize {
            admin: *admin,
            token_account: *token_account,
            game_name: game_name.to_owned(),
        }
        .to_instruction(self.deriver.program_id(), &accounts)?;
        self.send(vec![ix]).await
    }

    /// Pays `cost_to_play` from the payer's associated account for `token_mint`.
    pub async fn start_game(&self, game_id: &Pubkey, token_mint: &Pubkey) -> Result<String> {
        let (accounts, state) = self.load_accounts(game_id).await?;
        let payer_token_account = AddressDeriver::payer_token_account(&accounts.payer, token_mint);
        let ixs = start_game_instructions(
            self.deriver.program_id(),
            &accounts,
            &payer_token_account,
            state.cost_to_play,
        )?;
        self.send(ixs).await
    }

    /// `session_hash` is passed through as given.
    pub async fn submit_score(
        &self,
        game_id: &Pubkey,
        score: u64,
        session_hash: [u8; 32],
    ) -> Result<String> {
        let (accounts, _) = self.load_accounts(game_id).await?;
        let ix = ArcadeInstruction::SubmitScore {
            score,
            session_hash,
        }
        .to_instruction(self.deriver.program_id(), &accounts)?;
        self.send(vec![ix]).await
    }

    pub async fn update_cost(&self, game_id: &Pubkey, new_cost: u64) -> Result<String> {
        let (accounts, _) = self.load_accounts(game_id).await?;
        let ix = ArcadeInstruction::UpdateCost { new_cost }
            .to_instruction(self.deriver.program_id(), &accounts)?;
        self.send(vec![ix]).await
    }

    pub async fn add_game(&self, game_id: &Pubkey, game_name: &str) -> Result<String> {
        let (accounts, _) = self.load_accounts(game_id).await?;
        let ix = ArcadeInstruction::AddGame {
            game_id: *game_id,
            game_name: game_name.to_owned(),
        }
        .to_instruction(self.deriver.program_id(), &accounts)?;
        self.send(vec![ix]).await
    }

    // Read the game record first, its token account is part of every
    // instruction's account list.
    async fn load_accounts(&self, game_id: &Pubkey) -> Result<(InstructionAccounts, GameState)> {
        let state = self.fetch_game_state(game_id).await?;
        let accounts = InstructionAccounts {
            payer: self.signer.pubkey(),
            game_state: self.deriver.game_state_address(game_id)?,
            token_account: state.token_account,
            registry: self.deriver.registry_address()?,
            payer_token_account: None,
        };
        Ok((accounts, state))
    }

    async fn send(&self, ixs: Vec<Instruction>) -> Result<String> {
        let payer = self.signer.pubkey();
        let blockhash = self.ledger.latest_blockhash().await?;
        let message = Message::new_with_blockhash(&ixs, Some(&payer), &blockhash);
        debug!(
            "Assembled transaction with {} instructions for payer {}",
            ixs.len(),
            payer
        );
        let tx = self.signer.sign(Transaction::new_unsigned(message)).await?;
        let token = self.submitter.submit(&tx).await?;
        info!("Submitted transaction {}", token);
        Ok(token)
    }
}

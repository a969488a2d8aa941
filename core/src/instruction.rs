//! Instructions of the arcade program.
//!
//! The Borsh encoding of [`ArcadeInstruction`] is exactly the wire payload:
//! a one byte variant index (the opcode) followed by the fields in
//! declaration order, little-endian, with `u32` length prefixed strings.

use borsh::{BorshDeserialize, BorshSerialize};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program, sysvar,
};

use crate::constants::SESSION_HASH_LEN;
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum ArcadeInstruction {
    /// # [0] Create and initialize a game record
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The payer
    /// 1. `[writable]` The game state PDA
    /// 2. `[]` The token account of the game
    /// 3. `[]` Placeholder slot
    /// 4. `[]` The registry PDA
    /// 5. `[]` The system program
    /// 6. `[]` The clock sysvar
    /// 7. `[]` The SPL token program
    /// 8. `[]` Unused payer token slot
    Initialize {
        admin: Pubkey,
        token_account: Pubkey,
        game_name: String,
    },

    /// # [1] Open a session, charging the cost to play
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The player
    /// 1. `[writable]` The game state PDA
    /// 2. `[writable]` The token account of the game
    /// 3. `[]` Placeholder slot
    /// 4. `[]` The registry PDA
    /// 5. `[]` The system program
    /// 6. `[]` The clock sysvar
    /// 7. `[]` The SPL token program
    /// 8. `[writable]` The player's token account
    StartGame,

    /// # [2] Close a session with a score
    ///
    /// Accounts expected: same as `Initialize`.
    SubmitScore {
        score: u64,
        session_hash: [u8; SESSION_HASH_LEN],
    },

    /// # [3] Change the cost to play, admin only
    ///
    /// Accounts expected: same as `Initialize`.
    UpdateCost { new_cost: u64 },

    /// # [4] Append a game to the registry
    ///
    /// Accounts expected:
    /// 0. `[signer, writable]` The payer
    /// 1. `[]` The game state PDA
    /// 2. `[]` The token account of the game
    /// 3. `[]` Placeholder slot
    /// 4. `[writable]` The registry PDA
    /// 5. `[]` The system program
    /// 6. `[]` The clock sysvar
    /// 7. `[]` The SPL token program
    /// 8. `[]` Unused payer token slot
    AddGame { game_id: Pubkey, game_name: String },
}

/// Addresses an instruction is built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstructionAccounts {
    pub payer: Pubkey,
    pub game_state: Pubkey,
    pub token_account: Pubkey,
    pub registry: Pubkey,
    // only read by StartGame
    pub payer_token_account: Option<Pubkey>,
}

/// Strings are prefixed with a `u32` byte count, anything longer can't be sent.
pub fn check_payload_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::PayloadOverflow(len))
}

impl ArcadeInstruction {
    pub fn opcode(&self) -> u8 {
        match self {
            ArcadeInstruction::Initialize { .. } => 0,
            ArcadeInstruction::StartGame => 1,
            ArcadeInstruction::SubmitScore { .. } => 2,
            ArcadeInstruction::UpdateCost { .. } => 3,
            ArcadeInstruction::AddGame { .. } => 4,
        }
    }

    /// Serialize to the payload, opcode included.
    pub fn pack(&self) -> Result<Vec<u8>> {
        match self {
            ArcadeInstruction::Initialize { game_name, .. }
            | ArcadeInstruction::AddGame { game_name, .. } => {
                check_payload_len(game_name.len())?;
            }
            _ => {}
        }
        borsh::to_vec(self).map_err(|e| Error::InstructionEncodeFailed(e.to_string()))
    }

    /// Ordered account list. The program indexes accounts by position, so the
    /// order here is part of the wire format.
    pub fn account_metas(&self, accounts: &InstructionAccounts) -> Vec<AccountMeta> {
        let game_state_writable = !matches!(self, ArcadeInstruction::AddGame { .. });
        let is_start_game = matches!(self, ArcadeInstruction::StartGame);
        let registry_writable = matches!(self, ArcadeInstruction::AddGame { .. });

        let payer_token = match (is_start_game, accounts.payer_token_account) {
            (true, Some(addr)) => AccountMeta::new(addr, false),
            (_, addr) => AccountMeta::new_readonly(addr.unwrap_or_default(), false),
        };

        vec![
            AccountMeta::new(accounts.payer, true),
            meta(accounts.game_state, game_state_writable),
            meta(accounts.token_account, is_start_game),
            AccountMeta::new_readonly(Pubkey::default(), false),
            meta(accounts.registry, registry_writable),
            AccountMeta::new_readonly(system_program::id(), false),
            AccountMeta::new_readonly(sysvar::clock::id(), false),
            AccountMeta::new_readonly(spl_token::id(), false),
            payer_token,
        ]
    }

    pub fn to_instruction(
        &self,
        program_id: &Pubkey,
        accounts: &InstructionAccounts,
    ) -> Result<Instruction> {
        let data = self.pack()?;
        Ok(Instruction::new_with_bytes(
            *program_id,
            &data,
            self.account_metas(accounts),
        ))
    }
}

fn meta(pubkey: Pubkey, is_writable: bool) -> AccountMeta {
    if is_writable {
        AccountMeta::new(pubkey, false)
    } else {
        AccountMeta::new_readonly(pubkey, false)
    }
}

/// Instructions for a StartGame transaction.
///
/// With a non-zero cost, a token transfer of exactly `cost_to_play` from the
/// payer token account to the game token account goes first.
pub fn start_game_instructions(
    program_id: &Pubkey,
    accounts: &InstructionAccounts,
    payer_token_account: &Pubkey,
    cost_to_play: u64,
) -> Result<Vec<Instruction>> {
    let accounts = InstructionAccounts {
        payer_token_account: Some(*payer_token_account),
        ..*accounts
    };
    let mut ixs = Vec::with_capacity(2);
    if cost_to_play > 0 {
        let transfer_ix = spl_token::instruction::transfer(
            &spl_token::id(),
            payer_token_account,
            &accounts.token_account,
            &accounts.payer,
            &[],
            cost_to_play,
        )
        .map_err(|e| Error::InstructionEncodeFailed(e.to_string()))?;
        ixs.push(transfer_ix);
    }
    ixs.push(ArcadeInstruction::StartGame.to_instruction(program_id, &accounts)?);
    Ok(ixs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::Cursor;
    use spl_token::instruction::TokenInstruction;

    fn make_accounts() -> InstructionAccounts {
        InstructionAccounts {
            payer: Pubkey::new_unique(),
            game_state: Pubkey::new_unique(),
            token_account: Pubkey::new_unique(),
            registry: Pubkey::new_unique(),
            payer_token_account: None,
        }
    }

    fn flags(metas: &[AccountMeta]) -> Vec<(bool, bool)> {
        metas.iter().map(|m| (m.is_signer, m.is_writable)).collect()
    }

    #[test]
    fn test_opcodes_match_borsh_variant_index() -> anyhow::Result<()> {
        let ixs = vec![
            ArcadeInstruction::Initialize {
                admin: Pubkey::new_unique(),
                token_account: Pubkey::new_unique(),
                game_name: "Snake".into(),
            },
            ArcadeInstruction::StartGame,
            ArcadeInstruction::SubmitScore {
                score: 1,
                session_hash: [0; 32],
            },
            ArcadeInstruction::UpdateCost { new_cost: 1 },
            ArcadeInstruction::AddGame {
                game_id: Pubkey::new_unique(),
                game_name: "Snake".into(),
            },
        ];
        for (i, ix) in ixs.iter().enumerate() {
            assert_eq!(ix.opcode() as usize, i);
            assert_eq!(ix.pack()?[0], ix.opcode());
        }
        Ok(())
    }

    #[test]
    fn test_initialize_payload_reparse() -> anyhow::Result<()> {
        for name in ["", "Snake", "Space Invaders 2", "ヘビ"] {
            let admin = Pubkey::new_unique();
            let token_account = Pubkey::new_unique();
            let data = ArcadeInstruction::Initialize {
                admin,
                token_account,
                game_name: name.to_string(),
            }
            .pack()?;
            assert_eq!(data.len(), 1 + 32 + 32 + 4 + name.len());

            let mut cursor = Cursor::new(&data);
            assert_eq!(cursor.read_u8()?, 0);
            assert_eq!(cursor.read_pubkey()?, admin);
            assert_eq!(cursor.read_pubkey()?, token_account);
            assert_eq!(cursor.read_length_prefixed_utf8()?, name);
            assert_eq!(cursor.remaining(), 0);
        }
        Ok(())
    }

    #[test]
    fn test_fixed_payloads() -> anyhow::Result<()> {
        assert_eq!(ArcadeInstruction::StartGame.pack()?, vec![1]);

        let data = ArcadeInstruction::UpdateCost {
            new_cost: 0x0102_0304_0506_0708,
        }
        .pack()?;
        assert_eq!(data, vec![3, 8, 7, 6, 5, 4, 3, 2, 1]);

        let data = ArcadeInstruction::SubmitScore {
            score: 300,
            session_hash: [9; 32],
        }
        .pack()?;
        assert_eq!(data.len(), 1 + 8 + 32);
        assert_eq!(&data[..9], &[2, 0x2c, 0x01, 0, 0, 0, 0, 0, 0]);
        assert_eq!(&data[9..], &[9u8; 32]);
        Ok(())
    }

    #[test]
    fn test_add_game_payload() -> anyhow::Result<()> {
        let game_id = Pubkey::new_unique();
        let data = ArcadeInstruction::AddGame {
            game_id,
            game_name: "Pong".into(),
        }
        .pack()?;
        let mut cursor = Cursor::new(&data);
        assert_eq!(cursor.read_u8()?, 4);
        assert_eq!(cursor.read_pubkey()?, game_id);
        assert_eq!(cursor.read_length_prefixed_utf8()?, "Pong");
        assert_eq!(cursor.remaining(), 0);
        Ok(())
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_payload_overflow() {
        let len = u32::MAX as usize + 1;
        assert_eq!(check_payload_len(len), Err(Error::PayloadOverflow(len)));
        assert_eq!(check_payload_len(u32::MAX as usize), Ok(u32::MAX));
    }

    #[test]
    fn test_account_order() {
        let accounts = make_accounts();
        let metas = ArcadeInstruction::UpdateCost { new_cost: 1 }.account_metas(&accounts);
        let keys: Vec<Pubkey> = metas.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                accounts.payer,
                accounts.game_state,
                accounts.token_account,
                Pubkey::default(),
                accounts.registry,
                system_program::id(),
                sysvar::clock::id(),
                spl_token::id(),
                Pubkey::default(),
            ]
        );
    }

    #[test]
    fn test_account_flags_per_instruction() {
        let accounts = make_accounts();
        let ro = (false, false);
        let rw = (false, true);
        let payer = (true, true);

        let init = ArcadeInstruction::Initialize {
            admin: accounts.payer,
            token_account: accounts.token_account,
            game_name: "Snake".into(),
        };
        let common = vec![payer, rw, ro, ro, ro, ro, ro, ro, ro];
        assert_eq!(flags(&init.account_metas(&accounts)), common);
        assert_eq!(
            flags(
                &ArcadeInstruction::SubmitScore {
                    score: 1,
                    session_hash: [0; 32]
                }
                .account_metas(&accounts)
            ),
            common
        );
        assert_eq!(
            flags(&ArcadeInstruction::UpdateCost { new_cost: 5 }.account_metas(&accounts)),
            common
        );

        let add_game = ArcadeInstruction::AddGame {
            game_id: Pubkey::new_unique(),
            game_name: "Snake".into(),
        };
        assert_eq!(
            flags(&add_game.account_metas(&accounts)),
            vec![payer, ro, ro, ro, rw, ro, ro, ro, ro]
        );

        let payer_token = Pubkey::new_unique();
        let start = ArcadeInstruction::StartGame.account_metas(&InstructionAccounts {
            payer_token_account: Some(payer_token),
            ..accounts
        });
        assert_eq!(flags(&start), vec![payer, rw, rw, ro, ro, ro, ro, ro, rw]);
        assert_eq!(start[8].pubkey, payer_token);
    }

    #[test]
    fn test_start_game_with_cost() -> anyhow::Result<()> {
        let program_id = Pubkey::new_unique();
        let accounts = make_accounts();
        let payer_token = Pubkey::new_unique();
        let ixs = start_game_instructions(&program_id, &accounts, &payer_token, 500)?;
        assert_eq!(ixs.len(), 2);

        let transfer = &ixs[0];
        assert_eq!(transfer.program_id, spl_token::id());
        assert_eq!(
            TokenInstruction::unpack(&transfer.data)?,
            TokenInstruction::Transfer { amount: 500 }
        );
        assert_eq!(transfer.accounts[0].pubkey, payer_token);
        assert_eq!(transfer.accounts[1].pubkey, accounts.token_account);
        assert_eq!(transfer.accounts[2].pubkey, accounts.payer);

        assert_eq!(ixs[1].program_id, program_id);
        assert_eq!(ixs[1].data, vec![1]);
        assert_eq!(ixs[1].accounts[8].pubkey, payer_token);
        Ok(())
    }

    #[test]
    fn test_start_game_free() -> anyhow::Result<()> {
        let program_id = Pubkey::new_unique();
        let ixs = start_game_instructions(&program_id, &make_accounts(), &Pubkey::new_unique(), 0)?;
        assert_eq!(ixs.len(), 1);
        assert_eq!(ixs[0].program_id, program_id);
        assert!(ixs.iter().all(|ix| ix.program_id != spl_token::id()));
        Ok(())
    }
}

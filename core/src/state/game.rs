use solana_sdk::pubkey::Pubkey;

use crate::constants::{
    ACTIVE_SESSION_ENTRY_LEN, GAME_STATE_MIN_LEN, HIGH_SCORE_SLOTS, SESSION_HASH_LEN,
};
use crate::cursor::Cursor;
use crate::error::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighScore {
    pub player: Pubkey,
    pub score: u64,
}

impl HighScore {
    /// An unused slot holds the default address and a zero score.
    pub fn is_empty(&self) -> bool {
        self.score == 0 && self.player == Pubkey::default()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct ActiveSession {
    pub player: Pubkey,
    pub session_hash: [u8; SESSION_HASH_LEN],
    // unix timestamp in seconds
    pub start_time: u64,
}

// State of the on-chain game record
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // authority allowed to change the cost
    pub admin: Pubkey,
    // fixed slots, sorted by score on chain
    pub high_scores: [HighScore; HIGH_SCORE_SLOTS],
    pub game_count: u64,
    // in the smallest token denomination
    pub prize_pool: u64,
    // token account that receives the cost to play
    pub token_account: Pubkey,
    pub cost_to_play: u64,
    // minimum elapsed time before a score is accepted
    pub min_time_seconds: u32,
    pub active_sessions: Vec<ActiveSession>,
    pub is_initialized: bool,
    pub game_name: String,
}

impl GameState {
    /// Decode a game record from raw account data.
    ///
    /// Fields are read in wire order with a bounds-checked cursor. Trailing
    /// bytes past the name are account padding and are ignored.
    pub fn decode(buf: &[u8]) -> Result<Self> {
        let mut cursor = Cursor::new(buf);

        let admin = cursor.read_pubkey()?;

        let mut high_scores = [HighScore::default(); HIGH_SCORE_SLOTS];
        for slot in high_scores.iter_mut() {
            slot.player = cursor.read_pubkey()?;
            slot.score = cursor.read_u64_le()?;
        }

        let game_count = cursor.read_u64_le()?;
        let prize_pool = cursor.read_u64_le()?;
        let token_account = cursor.read_pubkey()?;
        let cost_to_play = cursor.read_u64_le()?;
        let min_time_seconds = cursor.read_u32_le()?;

        let session_count = cursor.read_u32_le()? as usize;
        let capacity = session_count.min(cursor.remaining() / ACTIVE_SESSION_ENTRY_LEN);
        let mut active_sessions = Vec::with_capacity(capacity);
        for _ in 0..session_count {
            active_sessions.push(ActiveSession {
                player: cursor.read_pubkey()?,
                session_hash: cursor.read_fixed_bytes()?,
                start_time: cursor.read_u64_le()?,
            });
        }

        let is_initialized = cursor.read_bool()?;
        let game_name = cursor.read_length_prefixed_utf8()?;

        Ok(Self {
            admin,
            high_scores,
            game_count,
            prize_pool,
            token_account,
            cost_to_play,
            min_time_seconds,
            active_sessions,
            is_initialized,
            game_name,
        })
    }

    /// Exact number of bytes this record occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        GAME_STATE_MIN_LEN
            + self.active_sessions.len() * ACTIVE_SESSION_ENTRY_LEN
            + self.game_name.len()
    }

    /// The first open session of `player`.
    ///
    /// A score is only accepted for a session hash the program issued, so this
    /// is where callers pick the hash to submit with.
    pub fn active_session(&self, player: &Pubkey) -> Option<&ActiveSession> {
        self.active_sessions.iter().find(|s| s.player.eq(player))
    }

    /// Occupied high score slots, in stored order.
    pub fn leaderboard(&self) -> impl Iterator<Item = &HighScore> {
        self.high_scores.iter().filter(|h| !h.is_empty())
    }
}

pub fn decode_game_state(buf: &[u8]) -> Result<GameState> {
    GameState::decode(buf)
}

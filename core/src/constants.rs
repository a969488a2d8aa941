pub const GAME_STATE_SEED: &[u8] = b"game_state";
pub const REGISTRY_SEED: &[u8] = b"registry";

/// Number of high score slots, always allocated regardless of fill
pub const HIGH_SCORE_SLOTS: usize = 20;

pub const PUBKEY_LEN: usize = 32;
pub const SESSION_HASH_LEN: usize = 32;

pub const HIGH_SCORE_ENTRY_LEN: usize = PUBKEY_LEN + 8;
pub const ACTIVE_SESSION_ENTRY_LEN: usize = PUBKEY_LEN + SESSION_HASH_LEN + 8;

/// Length of a game state with no active sessions and an empty name
pub const GAME_STATE_MIN_LEN: usize = PUBKEY_LEN // admin
    + HIGH_SCORE_SLOTS * HIGH_SCORE_ENTRY_LEN // high scores
    + 8 // game count
    + 8 // prize pool
    + PUBKEY_LEN // token account
    + 8 // cost to play
    + 4 // min time seconds
    + 4 // session count
    + 1 // is initialized
    + 4; // name length

/// Number of accounts the program reads for every instruction
pub const INSTRUCTION_ACCOUNT_LEN: usize = 9;

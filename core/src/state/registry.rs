use solana_sdk::pubkey::Pubkey;

use crate::constants::PUBKEY_LEN;
use crate::cursor::Cursor;
use crate::error::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GameReg {
    pub game_id: Pubkey,
    pub game_name: String,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct GameRegistry {
    pub games: Vec<GameReg>,
}

impl GameRegistry {
    /// Decode the registry record.
    ///
    /// A registry that was never initialized has no data, which is a valid
    /// state and decodes to an empty list.
    pub fn decode(buf: Option<&[u8]>) -> Result<Self> {
        let buf = match buf {
            Some(buf) if !buf.is_empty() => buf,
            _ => return Ok(Self::default()),
        };

        let mut cursor = Cursor::new(buf);
        let count = cursor.read_u32_le()? as usize;
        // Each entry takes at least an id and a name length
        let mut games = Vec::with_capacity(count.min(cursor.remaining() / (PUBKEY_LEN + 4)));
        for _ in 0..count {
            games.push(GameReg {
                game_id: cursor.read_pubkey()?,
                game_name: cursor.read_length_prefixed_utf8()?,
            });
        }
        Ok(Self { games })
    }

    pub fn find(&self, game_id: &Pubkey) -> Option<&GameReg> {
        self.games.iter().find(|g| g.game_id.eq(game_id))
    }
}

pub fn decode_game_registry(buf: Option<&[u8]>) -> Result<GameRegistry> {
    GameRegistry::decode(buf)
}

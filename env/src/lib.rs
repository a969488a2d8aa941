mod config;

pub use config::{Config, ConfigError, SolanaConfig};

pub fn parse_with_default_rpc(rpc: &str) -> &str {
    match rpc {
        "mainnet" | "m" => "https://api.mainnet-beta.solana.com",
        "testnet" | "t" => "https://api.testnet.solana.com",
        "devnet" | "d" => "https://api.devnet.solana.com",
        "local" | "l" => "http://127.0.0.1:8899",
        _ => rpc,
    }
}

pub fn default_keyfile() -> String {
    shellexpand::tilde("~/.config/solana/id.json").to_string()
}

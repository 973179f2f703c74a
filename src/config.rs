//! Runtime configuration for the chess web client.
//!
//! Every value has a compile-time default and can be overridden either on the
//! command line or through a dedicated environment variable.

use std::time::Duration;

use clap::Parser;

/// Default websocket endpoint of the game server.
pub const DEFAULT_WS_URL: &str = "ws://127.0.0.1:5000/ws";

/// Default base URL for HTTP calls such as the difficulty endpoint.
pub const DEFAULT_HTTP_URL: &str = "http://127.0.0.1:5000";

/// Default prefix for piece images; a piece URL is `theme + code + ".svg"`.
pub const DEFAULT_PIECE_THEME: &str = "/static/img/chesspieces/wikipedia/";

/// Default interval between `clock_tick` messages.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 1000;

#[derive(Parser, Debug, Clone)]
#[command(name = "chess_web_client", about = "Play against the chess server from the terminal")]
pub struct Config {
    /// Websocket URL of the game server.
    #[arg(long, env = "CHESS_WS_URL", default_value = DEFAULT_WS_URL)]
    pub ws_url: String,

    /// Base URL used for HTTP endpoints (`/set_difficulty`).
    #[arg(long, env = "CHESS_HTTP_URL", default_value = DEFAULT_HTTP_URL)]
    pub http_url: String,

    /// Prefix for piece image URLs.
    #[arg(long, env = "CHESS_PIECE_THEME", default_value = DEFAULT_PIECE_THEME)]
    pub piece_theme: String,

    /// Append the promotion piece to outbound moves (`e7e8q`).
    #[arg(long)]
    pub uci_promotion: bool,

    /// Fetch every piece image once at startup and log the outcome.
    #[arg(long)]
    pub preload_pieces: bool,

    /// Milliseconds between clock ticks sent to the server.
    #[arg(long, env = "CHESS_TICK_INTERVAL_MS", default_value_t = DEFAULT_TICK_INTERVAL_MS)]
    pub tick_interval_ms: u64,
}

impl Config {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ws_url: DEFAULT_WS_URL.to_string(),
            http_url: DEFAULT_HTTP_URL.to_string(),
            piece_theme: DEFAULT_PIECE_THEME.to_string(),
            uci_promotion: false,
            preload_pieces: false,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

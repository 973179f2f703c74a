use awc::Client;
use log::{error, info};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};
use crate::models::{Difficulty, DifficultyRequest};
use crate::view::piece_url;

/// Endpoint that configures the AI difficulty
pub const SET_DIFFICULTY_PATH: &str = "/set_difficulty";

/// Every piece image the board can draw
pub const PIECE_CODES: [&str; 12] = [
    "wP", "wR", "wN", "wB", "wQ", "wK", "bP", "bR", "bN", "bB", "bQ", "bK",
];

/// Join a base URL and a path, or pass through an already absolute URL
pub fn resolve(base_url: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// POST the chosen difficulty and return the server's JSON reply
pub async fn set_difficulty(
    client: &Client,
    base_url: &str,
    difficulty: Difficulty,
) -> ClientResult<Value> {
    let url = resolve(base_url, SET_DIFFICULTY_PATH);
    info!("Sending difficulty {} to {}", difficulty, url);

    let mut response = client
        .post(url.as_str())
        .send_json(&DifficultyRequest { difficulty })
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .body()
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .unwrap_or_default();
        return Err(ClientError::Rejected {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response.json::<Value>().await?)
}

/// Fetch each piece image once and log the outcome. Returns how many loaded.
pub async fn preload_pieces(client: &Client, base_url: &str, theme: &str) -> usize {
    let mut loaded = 0;
    for code in PIECE_CODES {
        let url = resolve(base_url, &piece_url(theme, code));
        match client.get(url.as_str()).send().await {
            Ok(response) if response.status().is_success() => {
                info!("Loaded: {}, URL: {}", code, url);
                loaded += 1;
            }
            Ok(response) => {
                error!("Failed to load: {}, URL: {}", code, url);
                error!("Error details: HTTP {}", response.status());
            }
            Err(e) => {
                error!("Failed to load: {}, URL: {}", code, url);
                error!("Error details: {}", e);
            }
        }
    }
    loaded
}

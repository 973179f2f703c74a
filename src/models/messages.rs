use actix::Message;
use serde::{Deserialize, Serialize};

/// Remaining time for both sides, in whole seconds. The server keeps
/// counting down after a flag falls, so values can go negative.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockUpdate {
    pub white: i64,
    pub black: i64,
}

/// Final result pushed by the server
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct GameOverInfo {
    pub winner: String,
    #[serde(default)]
    pub ai_surrender: bool,
}

/// Message pushed from the server to the client
#[derive(Message, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[rtype(result = "()")]
#[serde(tag = "message_type", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    UpdateBoard(String),
    UpdateClock(ClockUpdate),
    StrategySuggestion(String),
    GameOver(GameOverInfo),
}

/// Payload of an outbound move
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MovePayload {
    #[serde(rename = "move")]
    pub chess_move: String,
}

/// Message sent from the client to the server
#[derive(Message, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[rtype(result = "()")]
#[serde(tag = "message_type", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    Move(MovePayload),
    ResetGame,
    ClockTick,
}

impl ClientMessage {
    pub fn chess_move(text: impl Into<String>) -> Self {
        ClientMessage::Move(MovePayload { chess_move: text.into() })
    }
}

/// Body of the `/set_difficulty` request
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DifficultyRequest {
    pub difficulty: super::Difficulty,
}

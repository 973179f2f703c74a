//! Client-side view layer for playing chess against a server.
//!
//! The server owns the game. This crate mirrors its position, validates
//! dragged moves locally before relaying them, and renders status, clocks,
//! captured pieces and hints into a [`view::Page`].

pub mod config;
pub mod error;
pub mod game;
pub mod models;
pub mod routes;
pub mod view;
pub mod websocket;

pub use config::Config;
pub use error::{ClientError, ClientResult};

//! Gridlink Relay - WebSocket relay for two-player grid board games
//!
//! Two browser clients share a short numeric session code; the server keeps
//! the authoritative board, turn order, and scores for each session and
//! relays every accepted move to both participants. Sessions live only in
//! memory and die with either participant's connection.

pub mod config;
pub mod game;
pub mod protocol;
pub mod registry;
pub mod routes;
pub mod state;
pub mod utils;

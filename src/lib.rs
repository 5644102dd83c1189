//! Dungeon Heart - real-time idle simulation of an evolving dungeon.
//!
//! A procedurally grown hex grid of rooms, self-evolving monsters, adaptive
//! traps, scaling hero waves, a four-branch research tree and a prestige
//! loop. This library is the whole simulation engine; the binaries are thin
//! adapters (a ratatui front end and a headless simulator).

pub mod core;
pub mod difficulty;
pub mod dungeon;
pub mod events;
pub mod monsters;
pub mod persistence;
pub mod prestige;
pub mod render;
pub mod research;
pub mod traps;
pub mod ui;
pub mod waves;

pub use crate::core::engine::{Engine, EngineConfig};
pub use crate::core::game_state::GameState;

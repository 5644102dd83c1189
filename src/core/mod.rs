//! Core simulation plumbing: constants, state, engine, tick orchestration.

pub mod constants;
pub mod engine;
pub mod game_state;
pub mod log;
pub mod tick;

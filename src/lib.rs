//! Rock-paper-scissors game engine.
//!
//! - `engine`: moves, round resolution, session bookkeeping, move generators,
//!   whole-session simulation, the strategy arena and configuration
//! - `store`: key-value persistence for the player name and scores
//! - `ui`: view model, delayed-reveal scheduling, the game controller and the
//!   terminal front-end

pub mod engine;
pub mod store;
pub mod ui;

pub mod models;
pub mod round;
pub mod opponent;
pub mod simulator;
pub mod arena;
pub mod config;

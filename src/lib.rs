// Library exports for Battlesnake bot
// This allows the replay tool and other utilities to use the core bot logic

pub mod bot;
pub mod cavern;
pub mod config;
pub mod debug_logger;
pub mod geometry;
pub mod occupancy;
pub mod pipeline;
pub mod replay;
pub mod types;

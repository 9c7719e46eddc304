pub mod board;
pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod render;
pub mod scheduler;
pub mod viewport;

pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod input;
pub mod render;
pub mod session;
pub mod terminal;

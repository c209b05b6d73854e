pub mod config;
pub mod gfx;
pub mod init;
pub mod platform;
pub mod screen;

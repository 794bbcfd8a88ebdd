pub mod about;
pub mod config;
pub mod describe;
pub mod list;
pub mod plan;
pub mod value;

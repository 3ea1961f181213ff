pub mod add;
pub mod completion;
pub mod config;
pub mod list;
pub mod start;

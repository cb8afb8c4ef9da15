pub mod browse;
pub mod combine;
pub mod completion;
pub mod config;
pub mod shortcuts;
pub mod tree;

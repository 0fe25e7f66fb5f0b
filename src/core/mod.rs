pub mod config;

#[cfg(test)]
mod config_test;

pub use config::*;

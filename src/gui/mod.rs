pub mod app;

#[cfg(test)]
mod app_test;

pub use app::*;

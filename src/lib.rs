pub mod config;
pub mod driver;
pub mod error;
pub mod runner;
pub mod script;

pub use runner::Runner;
pub use script::{extract, extract_file, resolve};

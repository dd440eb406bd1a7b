//! Utility modules

pub mod env;

pub use env::{env_var_name, EnvSource, ProcessEnv};

pub mod cli;
pub mod config;
pub mod controller;
pub mod deploy;
pub mod errors;
pub mod log;
pub mod naming;
pub mod prompt;
pub mod provider;
pub mod state;
pub mod ux;
pub mod web;
pub mod wire;

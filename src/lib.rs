//! TUI 2048 (workspace facade crate).
//!
//! This package exposes a stable `tui_2048::{core,input,store,term,types}` public
//! API while the implementation lives in dedicated crates under `crates/`.
//! Runtime configuration for the binary lives in [`config`].

pub mod config;

pub use tui_2048_core as core;
pub use tui_2048_input as input;
pub use tui_2048_store as store;
pub use tui_2048_term as term;
pub use tui_2048_types as types;

pub use config::AppConfig;

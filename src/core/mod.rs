//! # Core Application Logic
//!
//! This module contains termnote's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Vault (note files)   │
//!                    │                         │
//!                    │  No terminal types.     │
//!                    └───────────┬─────────────┘
//!                                │ widget traits
//!                                ▼
//!                         ┌────────────┐
//!                         │    TUI     │
//!                         │  Adapter   │
//!                         │ (ratatui)  │
//!                         └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all session state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`widget`]: Capability traits the TUI implements for inputs, editors and lists
//! - [`vault`]: Note files on disk
//! - [`markdown`]: Pure text transforms behind the editor shortcuts
//! - [`relative_time`]: "5 minutes ago" strings
//! - [`config`]: TOML config loading and resolution

pub mod action;
pub mod config;
pub mod markdown;
pub mod relative_time;
pub mod state;
pub mod vault;
pub mod widget;

//! # Core Application Logic
//!
//! This module contains Poikatsu's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • Ledger (points)      │
//!                    │  • Navigator (screens)  │
//!                    │  • Action + update()    │
//!                    │                         │
//!                    │  No UI. No terminal.    │
//!                    └───────────┬─────────────┘
//!                                │
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
//! - [`ledger`]: balance, history and the seed they reset to
//! - [`history`]: a single history row
//! - [`navigation`]: the three screens
//! - [`connect`]: decorative external-service buttons and the demo dialog
//! - [`state`]: the `App` struct, all application state in one place
//! - [`action`]: the `Action` enum and `update()` reducer
//! - [`config`]: config file, env and CLI resolution

pub mod action;
pub mod config;
pub mod connect;
pub mod history;
pub mod ledger;
pub mod navigation;
pub mod state;

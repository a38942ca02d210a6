//! # Application State
//!
//! Core business state for Poikatsu. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── ledger: Ledger                          // balance + history
//! ├── navigator: Navigator                    // current screen
//! ├── modal: ConnectModal                     // demo connect dialog
//! ├── connector: Box<dyn ServiceConnector>    // answers the dialog
//! ├── flow_message: Option<String>            // exchange form status
//! ├── notice: Option<String>                  // popup text
//! ├── status_message: String                  // title bar text
//! └── today: fn() -> NaiveDate                // date stamped on exchanges
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use chrono::{Local, NaiveDate};

use crate::core::config::ResolvedConfig;
use crate::core::connect::{ConnectModal, DemoConnector, ServiceConnector};
use crate::core::ledger::{Ledger, Seed};
use crate::core::navigation::Navigator;

pub struct App {
    pub ledger: Ledger,
    pub navigator: Navigator,
    pub modal: ConnectModal,
    pub connector: Box<dyn ServiceConnector>,
    pub flow_message: Option<String>,
    pub notice: Option<String>,
    pub status_message: String,
    pub today: fn() -> NaiveDate,
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    pub fn new(seed: Seed, connector: Box<dyn ServiceConnector>) -> Self {
        Self {
            ledger: Ledger::new(seed),
            navigator: Navigator::new(),
            modal: ConnectModal::default(),
            connector,
            flow_message: None,
            notice: None,
            status_message: String::from("Welcome to Poikatsu!"),
            today: local_today,
        }
    }

    pub fn from_config(config: &ResolvedConfig) -> Self {
        Self::new(config.seed.clone(), Box::new(DemoConnector))
    }

    /// True while a dialog or notice sits on top of the current screen.
    pub fn has_overlay(&self) -> bool {
        self.modal.is_open() || self.notice.is_some()
    }
}

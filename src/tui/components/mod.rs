//! # TUI Components
//!
//! This module contains all UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Simple display components that receive all data as parameters:
//! - `TitleBar`: app name, screen tabs, status message
//! - `ServiceBar`: decorative external service buttons
//! - `ConnectDialog`, `NoticePopup`: overlays
//!
//! ### Stateful Components (Event-Driven)
//!
//! Components that keep presentation state across frames:
//! - `TopScreenState`: ledger subscription and balance highlight
//! - `HistoryTableState`: selected row
//! - `AmountInput`: the exchange amount buffer
//!
//! ### Props-Based Data Flow
//!
//! Components receive external data as "props" (struct fields), not by
//! reaching into `App`. They never mutate the ledger; stateful ones emit
//! events that the event loop turns into `Action`s.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs      (top status row)
//! ├── service_bar.rs    (service buttons + footnote)
//! ├── top_screen.rs     (balance, subscription)
//! ├── history_table.rs  (history rows, delete)
//! ├── exchange_form.rs  (amount input, exchange/reset)
//! └── overlay.rs        (connect dialog, notices)
//! ```

pub mod exchange_form;
pub mod history_table;
pub mod overlay;
pub mod service_bar;
mod title_bar;
pub mod top_screen;

pub use exchange_form::{AmountEvent, AmountInput, ExchangeForm};
pub use history_table::{HistoryEvent, HistoryTable, HistoryTableState};
pub use overlay::{ConnectDialog, NoticePopup};
pub use title_bar::TitleBar;
pub use top_screen::{TopScreen, TopScreenState};

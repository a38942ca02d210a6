//! # Points Ledger
//!
//! The balance and its history, plus the seed snapshot they were created
//! from. Every mutation goes through one of three operations:
//!
//! ```text
//! exchange(amount)   balance -= amount, prepend a Used entry
//! delete_entry(id)   remove entry, refund it if it was a deduction
//! reset_all()        restore the seed balance and a fresh copy of the seed history
//! ```
//!
//! Validation always happens before mutation, so a failed operation
//! leaves the ledger untouched.
//!
//! Views that want to react to balance changes call [`Ledger::subscribe`]
//! and drain the returned [`Subscription`]. Hand it back to
//! [`Ledger::unsubscribe`] when done; a handle that is simply dropped is
//! pruned on the next publish.

use chrono::NaiveDate;
use log::{debug, info};
use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryIter};

use crate::core::history::{Category, HistoryEntry};

/// Balance used when no seed is configured.
pub const DEFAULT_SEED_BALANCE: i64 = 1250;

const EXCHANGE_NOTE: &str = "Point exchange (demo)";

/// Starting state of the ledger. `reset_all()` returns here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub balance: i64,
    pub history: Vec<HistoryEntry>,
}

impl Default for Seed {
    fn default() -> Self {
        let day = |d| NaiveDate::from_ymd_opt(2025, 8, d).unwrap_or_default();
        Self {
            balance: DEFAULT_SEED_BALANCE,
            history: vec![
                HistoryEntry {
                    id: 1,
                    date: day(27),
                    category: Category::Earned,
                    points: 100,
                    note: Some("Campaign".to_string()),
                },
                HistoryEntry {
                    id: 2,
                    date: day(26),
                    category: Category::Used,
                    points: -50,
                    note: Some("Gift exchange".to_string()),
                },
                HistoryEntry {
                    id: 3,
                    date: day(25),
                    category: Category::Earned,
                    points: 200,
                    note: Some("Store visit bonus".to_string()),
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeError {
    /// Amount missing, zero or negative.
    InvalidAmount,
    /// Amount exceeds the current balance.
    InsufficientBalance { requested: i64, available: i64 },
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::InvalidAmount => write!(f, "Enter the number of points to exchange"),
            ExchangeError::InsufficientBalance { .. } => write!(f, "Insufficient balance"),
        }
    }
}

impl std::error::Error for ExchangeError {}

/// Result of a successful exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub entry_id: u64,
    pub amount: i64,
    pub balance: i64,
}

impl Receipt {
    pub fn message(&self) -> String {
        format!("Requested exchange of {} P (demo)", self.amount)
    }
}

/// Published to subscribers after every successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceChanged {
    pub balance: i64,
    pub history_len: usize,
}

/// Receiving end of a ledger subscription.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    rx: Receiver<BalanceChanged>,
}

impl Subscription {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pending events, oldest first, without blocking.
    pub fn pending(&self) -> TryIter<'_, BalanceChanged> {
        self.rx.try_iter()
    }
}

pub struct Ledger {
    balance: i64,
    history: Vec<HistoryEntry>,
    seed: Seed,
    next_id: u64,
    next_subscription_id: u64,
    subscribers: Vec<(u64, Sender<BalanceChanged>)>,
}

impl Ledger {
    pub fn new(seed: Seed) -> Self {
        let next_id = seed.history.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            balance: seed.balance,
            history: seed.history.clone(),
            seed,
            next_id,
            next_subscription_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// History, most recent first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    pub fn entry(&self, id: u64) -> Option<&HistoryEntry> {
        self.history.iter().find(|e| e.id == id)
    }

    /// Exchange `amount` points, recording the deduction dated `date`.
    pub fn exchange(&mut self, amount: Option<i64>, date: NaiveDate) -> Result<Receipt, ExchangeError> {
        let amount = match amount {
            Some(a) if a > 0 => a,
            _ => {
                debug!("Exchange rejected: invalid amount {:?}", amount);
                return Err(ExchangeError::InvalidAmount);
            }
        };
        if amount > self.balance {
            debug!("Exchange rejected: {} requested, {} available", amount, self.balance);
            return Err(ExchangeError::InsufficientBalance {
                requested: amount,
                available: self.balance,
            });
        }

        let id = self.allocate_id();
        self.balance -= amount;
        self.history.insert(
            0,
            HistoryEntry {
                id,
                date,
                category: Category::Used,
                points: -amount,
                note: Some(EXCHANGE_NOTE.to_string()),
            },
        );
        info!("Exchanged {} P (entry {}), balance now {}", amount, id, self.balance);
        self.publish();

        Ok(Receipt {
            entry_id: id,
            amount,
            balance: self.balance,
        })
    }

    /// Remove the entry with `id`. Deleting a deduction refunds it;
    /// deleting a credit leaves the balance alone. Unknown ids are a no-op.
    pub fn delete_entry(&mut self, id: u64) -> Option<HistoryEntry> {
        let index = self.history.iter().position(|e| e.id == id)?;
        let removed = self.history.remove(index);
        if removed.is_deduction() {
            self.balance = self.balance.saturating_sub(removed.points);
        }
        info!(
            "Deleted history entry {} ({} P), balance now {}",
            id, removed.points, self.balance
        );
        self.publish();
        Some(removed)
    }

    /// Restore the seed balance and a fresh copy of the seed history.
    /// The id counter keeps running so ids are never handed out twice.
    pub fn reset_all(&mut self) {
        self.balance = self.seed.balance;
        self.history = self.seed.history.clone();
        info!("Ledger reset to seed (balance {})", self.balance);
        self.publish();
    }

    /// Receive a [`BalanceChanged`] after each mutation until unsubscribed.
    pub fn subscribe(&mut self) -> Subscription {
        let (tx, rx) = mpsc::channel();
        let id = self.next_subscription_id;
        self.next_subscription_id += 1;
        self.subscribers.push((id, tx));
        debug!("Ledger subscriber {} added ({} registered)", id, self.subscribers.len());
        Subscription { id, rx }
    }

    /// Remove a subscription right away instead of waiting for the next publish.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscribers.retain(|(id, _)| *id != subscription.id);
        debug!(
            "Ledger subscriber {} removed ({} registered)",
            subscription.id,
            self.subscribers.len()
        );
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn publish(&mut self) {
        let event = BalanceChanged {
            balance: self.balance,
            history_len: self.history.len(),
        };
        self.subscribers.retain(|(_, tx)| tx.send(event).is_ok());
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(Seed::default())
    }
}

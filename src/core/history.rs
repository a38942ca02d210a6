//! # History Entries
//!
//! One row of the points history. Entries are stored most-recent-first
//! by the ledger; this module only knows what a single row looks like.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of event a history row records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Earned,
    Used,
    Bonus,
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Earned => "Earned",
            Category::Used => "Used",
            Category::Bonus => "Bonus",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HistoryEntry {
    pub id: u64,
    pub date: NaiveDate,
    pub category: Category,
    /// Signed amount. Negative values are deductions.
    pub points: i64,
    pub note: Option<String>,
}

impl HistoryEntry {
    pub fn is_deduction(&self) -> bool {
        self.points < 0
    }

    /// Points with an explicit sign for credits: `+100`, `-50`, `0`.
    pub fn signed_points(&self) -> String {
        if self.points > 0 {
            format!("+{}", self.points)
        } else {
            self.points.to_string()
        }
    }

    pub fn note_or_dash(&self) -> &str {
        self.note.as_deref().unwrap_or("-")
    }
}

//! # History Screen
//!
//! Table of history entries in ledger order (most recent first) with a
//! selectable row. `d` or Delete removes the selected row.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `HistoryTableState` lives in `TuiState`
//! - `HistoryTable` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Padding, Paragraph, Row, Table, TableState};

use crate::core::connect::HISTORY_SERVICES;
use crate::core::history::HistoryEntry;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::service_bar::ServiceBar;
use crate::tui::event::TuiEvent;
use crate::tui::format::truncate_to_width;

/// Persistent state for the history table.
pub struct HistoryTableState {
    /// Number of rows (prop, synced from the ledger before each event)
    pub len: usize,
    pub table_state: TableState,
}

/// Events emitted by the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryEvent {
    /// Delete the row at this index.
    Delete(usize),
}

impl HistoryTableState {
    pub fn new() -> Self {
        Self {
            len: 0,
            table_state: TableState::default(),
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Sync the row count and keep the selection inside it.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        let selected = match (len, self.table_state.selected()) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(i)) => Some(i.min(len - 1)),
        };
        self.table_state.select(selected);
    }
}

impl Default for HistoryTableState {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for HistoryTableState {
    type Event = HistoryEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<HistoryEvent> {
        if self.len == 0 {
            return None;
        }
        let selected = self.table_state.selected().unwrap_or(0);
        match event {
            TuiEvent::CursorUp => {
                self.table_state.select(Some(selected.saturating_sub(1)));
                None
            }
            TuiEvent::CursorDown => {
                self.table_state.select(Some((selected + 1).min(self.len - 1)));
                None
            }
            TuiEvent::InputChar('d') | TuiEvent::Delete => Some(HistoryEvent::Delete(selected)),
            _ => None,
        }
    }
}

/// Transient render wrapper for the history screen.
pub struct HistoryTable<'a> {
    state: &'a mut HistoryTableState,
    entries: &'a [HistoryEntry],
}

impl<'a> HistoryTable<'a> {
    pub fn new(state: &'a mut HistoryTableState, entries: &'a [HistoryEntry]) -> Self {
        Self { state, entries }
    }
}

fn entry_row(entry: &HistoryEntry, note_width: usize) -> Row<'static> {
    let points_color = if entry.points > 0 { Color::Green } else { Color::Red };
    Row::new(vec![
        Cell::from(entry.date.format("%Y-%m-%d").to_string()),
        Cell::from(entry.category.label()),
        Cell::from(Span::styled(entry.signed_points(), Style::default().fg(points_color))),
        Cell::from(Span::styled(
            truncate_to_width(entry.note_or_dash(), note_width),
            Style::default().fg(Color::Gray),
        )),
    ])
}

impl Component for HistoryTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Points history ")
            .title_bottom(Line::from(" Up/Down Select  d Delete ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [table_area, _gap, services_area] =
            Layout::vertical([Min(0), Length(1), Length(ServiceBar::HEIGHT)]).areas(inner);

        if self.entries.is_empty() {
            let empty = Paragraph::new("No history entries.").style(Style::default().fg(Color::DarkGray));
            frame.render_widget(empty, table_area);
        } else {
            let widths = [Length(10), Length(8), Length(8), Min(4)];
            // Date + type + points columns, their spacing and the highlight symbol
            let note_width = (table_area.width as usize).saturating_sub(10 + 8 + 8 + 3 + 2).max(4);

            let header = Row::new(vec!["Date", "Type", "Points", "Note"])
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD));
            let rows: Vec<Row> = self.entries.iter().map(|e| entry_row(e, note_width)).collect();

            let table = Table::new(rows, widths)
                .header(header)
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");

            frame.render_stateful_widget(table, table_area, &mut self.state.table_state);
        }

        ServiceBar {
            services: HISTORY_SERVICES,
            footnote: "External links are demos; no real integration is provided.",
        }
        .render(frame, services_area);
    }
}

//! # Exchange Screen
//!
//! Amount field, the status line for the last attempt, and the two
//! reset actions:
//!
//! - `r` clears the form only (input + message)
//! - `R` resets the whole ledger to its seed
//!
//! ## State Management
//!
//! The amount buffer is internal state of `AmountInput` (it never touches
//! the ledger until Enter). Balance and message are props from `App`.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::connect::FLOW_SERVICES;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::service_bar::ServiceBar;
use crate::tui::event::TuiEvent;
use crate::tui::format::format_points;

/// Longest amount the field accepts. Keeps every buffer parseable as `i64`.
pub const MAX_AMOUNT_DIGITS: usize = 9;

/// High-level events emitted by the AmountInput
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AmountEvent {
    /// Enter pressed. `None` when the field is empty.
    Submit(Option<i64>),
    ContentChanged,
}

/// Digit-only text field for the exchange amount.
#[derive(Debug, Default)]
pub struct AmountInput {
    buffer: String,
}

impl AmountInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Parsed amount, `None` if the field is empty.
    pub fn value(&self) -> Option<i64> {
        self.buffer.parse().ok()
    }
}

impl EventHandler for AmountInput {
    type Event = AmountEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<AmountEvent> {
        match event {
            TuiEvent::InputChar(c) if c.is_ascii_digit() => {
                if self.buffer.len() >= MAX_AMOUNT_DIGITS {
                    return None;
                }
                // No leading zeros: "0" then "5" becomes "5"
                if self.buffer == "0" {
                    self.buffer.clear();
                }
                self.buffer.push(*c);
                Some(AmountEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                self.buffer.pop();
                Some(AmountEvent::ContentChanged)
            }
            TuiEvent::Submit => Some(AmountEvent::Submit(self.value())),
            _ => None,
        }
    }
}

/// Transient render wrapper for the exchange screen.
pub struct ExchangeForm<'a> {
    pub input: &'a AmountInput,
    pub balance: i64,
    pub message: Option<&'a str>,
}

impl ExchangeForm<'_> {
    fn input_line(&self) -> Line<'static> {
        if self.input.buffer().is_empty() {
            Line::styled("e.g. 100", Style::default().fg(Color::DarkGray))
        } else {
            Line::raw(self.input.buffer().to_string())
        }
    }

    fn actions_line() -> Line<'static> {
        let key = Style::default().fg(Color::Yellow);
        Line::from(vec![
            Span::styled("[Enter]", key),
            Span::raw(" Request exchange   "),
            Span::styled("[r]", key),
            Span::raw(" Reset   "),
            Span::styled("[R]", Style::default().fg(Color::Red)),
            Span::raw(" Reset balance & history"),
        ])
    }
}

impl Component for ExchangeForm<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Point exchange ")
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [balance_area, input_area, actions_area, message_area, _gap, services_area, _rest] = Layout::vertical([
            Length(1),
            Length(3),
            Length(1),
            Length(2),
            Length(1),
            Length(ServiceBar::HEIGHT),
            Min(0),
        ])
        .areas(inner);

        frame.render_widget(
            Line::from(vec![
                Span::styled("Available: ", Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format_points(self.balance),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ),
            ]),
            balance_area,
        );

        let [field_area, _] = Layout::horizontal([Length(24), Min(0)]).areas(input_area);
        let field = Paragraph::new(self.input_line()).block(
            Block::bordered()
                .title(" Points to exchange ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(field, field_area);

        frame.render_widget(Self::actions_line(), actions_area);

        if let Some(message) = self.message {
            let status = Paragraph::new(message).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
            frame.render_widget(status, message_area);
        }

        ServiceBar {
            services: FLOW_SERVICES,
            footnote: "LINE/X connect is a demo effect.",
        }
        .render(frame, services_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(s: &str) -> AmountInput {
        let mut input = AmountInput::new();
        for c in s.chars() {
            input.handle_event(&TuiEvent::InputChar(c));
        }
        input
    }

    #[test]
    fn test_digits_only() {
        let input = typed("1a2-3");
        assert_eq!(input.buffer(), "123");
        assert_eq!(input.value(), Some(123));
    }

    #[test]
    fn test_non_digit_passes_through() {
        let mut input = AmountInput::new();
        assert_eq!(input.handle_event(&TuiEvent::InputChar('r')), None);
        assert_eq!(input.handle_event(&TuiEvent::Escape), None);
    }

    #[test]
    fn test_empty_submits_none() {
        let mut input = AmountInput::new();
        assert_eq!(input.handle_event(&TuiEvent::Submit), Some(AmountEvent::Submit(None)));
    }

    #[test]
    fn test_zero_submits_zero() {
        let mut input = typed("0");
        assert_eq!(input.handle_event(&TuiEvent::Submit), Some(AmountEvent::Submit(Some(0))));
    }

    #[test]
    fn test_leading_zero_replaced() {
        assert_eq!(typed("05").buffer(), "5");
        assert_eq!(typed("00").buffer(), "0");
    }

    #[test]
    fn test_length_capped() {
        let input = typed("12345678901234");
        assert_eq!(input.buffer().len(), MAX_AMOUNT_DIGITS);
        assert_eq!(input.value(), Some(123456789));
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut input = typed("250");
        input.handle_event(&TuiEvent::Backspace);
        assert_eq!(input.value(), Some(25));
        input.clear();
        assert_eq!(input.value(), None);
    }
}

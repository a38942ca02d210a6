//! # Top Screen
//!
//! Balance, the two main actions, and the decorative service row.
//!
//! The balance shown here comes from a ledger subscription rather than
//! reading the ledger every frame:
//!
//! ```text
//! mount()    → ledger.subscribe(), read the current balance
//! poll()     → drain BalanceChanged events, highlight on change
//! unmount()  → ledger.unsubscribe(), so nothing lingers between visits
//! ```
//!
//! `TopScreenState` lives in `TuiState`; `TopScreen` is created each frame.

use std::time::{Duration, Instant};

use log::debug;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::connect::{TOP_LINKS, TOP_SERVICES};
use crate::core::ledger::{Ledger, Subscription};
use crate::core::navigation::Screen;
use crate::tui::component::Component;
use crate::tui::components::service_bar::ServiceBar;
use crate::tui::format::format_points;

/// How long a changed balance stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(600);

pub struct TopScreenState {
    feed: Option<Subscription>,
    shown_balance: i64,
    highlight_until: Option<Instant>,
}

impl TopScreenState {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            feed: None,
            shown_balance: initial_balance,
            highlight_until: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.feed.is_some()
    }

    pub fn mount(&mut self, ledger: &mut Ledger, now: Instant) {
        self.unmount(ledger);
        self.feed = Some(ledger.subscribe());
        self.show(ledger.balance(), now);
    }

    pub fn unmount(&mut self, ledger: &mut Ledger) {
        if let Some(feed) = self.feed.take() {
            ledger.unsubscribe(feed);
            debug!("Top screen unsubscribed from ledger");
        }
    }

    /// Drain pending balance events. Returns true if anything arrived.
    pub fn poll(&mut self, now: Instant) -> bool {
        let latest = match &self.feed {
            Some(feed) => feed.pending().last(),
            None => None,
        };
        match latest {
            Some(event) => {
                self.show(event.balance, now);
                true
            }
            None => false,
        }
    }

    pub fn shown_balance(&self) -> i64 {
        self.shown_balance
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.highlight_until.is_some_and(|until| now < until)
    }

    fn show(&mut self, balance: i64, now: Instant) {
        if balance != self.shown_balance {
            self.highlight_until = Some(now + HIGHLIGHT_DURATION);
        }
        self.shown_balance = balance;
    }
}

pub struct TopScreen<'a> {
    state: &'a TopScreenState,
    now: Instant,
}

impl<'a> TopScreen<'a> {
    pub fn new(state: &'a TopScreenState, now: Instant) -> Self {
        Self { state, now }
    }

    fn balance_lines(&self) -> Vec<Line<'static>> {
        let mut balance_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        if self.state.is_animating(self.now) {
            balance_style = balance_style.add_modifier(Modifier::REVERSED);
        }
        vec![
            Line::styled("Points balance", Style::default().fg(Color::DarkGray)),
            Line::styled(format_points(self.state.shown_balance), balance_style),
            Line::default(),
            Line::from(vec![
                Span::styled(format!("[{}]", Screen::History.hotkey()), Style::default().fg(Color::Yellow)),
                Span::raw(" View history   "),
                Span::styled(format!("[{}]", Screen::Flow.hotkey()), Style::default().fg(Color::Yellow)),
                Span::raw(" Exchange points"),
            ]),
        ]
    }

    fn links_line() -> Line<'static> {
        let mut spans = Vec::new();
        for (i, link) in TOP_LINKS.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("   "));
            }
            spans.push(Span::styled(format!("[{}]", link.hotkey), Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                format!(" {}", link.label),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TopScreen<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};

        let block = Block::bordered()
            .border_style(Style::default().fg(Color::DarkGray))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [header_area, balance_area, services_area, _gap, links_area, _rest] = Layout::vertical([
            Length(3),
            Length(6),
            Length(ServiceBar::HEIGHT),
            Length(1),
            Length(1),
            Min(0),
        ])
        .areas(inner);

        let header = Paragraph::new(vec![
            Line::styled(
                "Poikatsu Points",
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            ),
            Line::styled(
                "Collect points, have fun, make it a project.",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
            ),
        ]);
        frame.render_widget(header, header_area);

        let balance = Paragraph::new(self.balance_lines())
            .alignment(Alignment::Left)
            .block(Block::bordered().border_style(Style::default().fg(Color::Yellow)));
        frame.render_widget(balance, balance_area);

        ServiceBar {
            services: TOP_SERVICES,
            footnote: "Demo links only; real point integration is not supported. * = demo dialog",
        }
        .render(frame, services_area);

        frame.render_widget(Self::links_line(), links_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mount_subscribes_and_unmount_drops() {
        let mut ledger = Ledger::default();
        let mut state = TopScreenState::new(ledger.balance());
        let now = Instant::now();

        state.mount(&mut ledger, now);
        assert!(state.is_mounted());
        assert_eq!(ledger.subscriber_count(), 1);
        assert!(!state.is_animating(now));

        state.unmount(&mut ledger);
        assert!(!state.is_mounted());
        assert_eq!(ledger.subscriber_count(), 0);
    }

    #[test]
    fn test_poll_picks_up_latest_balance() {
        let mut ledger = Ledger::default();
        let mut state = TopScreenState::new(ledger.balance());
        let now = Instant::now();
        state.mount(&mut ledger, now);

        let day = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        ledger.exchange(Some(50), day).unwrap();
        ledger.exchange(Some(50), day).unwrap();

        assert!(state.poll(now));
        assert_eq!(state.shown_balance(), 1150);
        assert!(state.is_animating(now));
        assert!(!state.is_animating(now + HIGHLIGHT_DURATION));
        assert!(!state.poll(now));
    }

    #[test]
    fn test_remount_after_change_highlights() {
        let mut ledger = Ledger::default();
        let mut state = TopScreenState::new(ledger.balance());
        let now = Instant::now();
        state.mount(&mut ledger, now);
        state.unmount(&mut ledger);

        ledger.delete_entry(2);
        state.mount(&mut ledger, now);
        assert_eq!(state.shown_balance(), 1300);
        assert!(state.is_animating(now));
    }

    #[test]
    fn test_repeated_visits_leave_no_subscription() {
        let mut ledger = Ledger::default();
        let mut state = TopScreenState::new(ledger.balance());
        let now = Instant::now();
        for _ in 0..100 {
            state.mount(&mut ledger, now);
            state.unmount(&mut ledger);
        }
        assert_eq!(ledger.subscriber_count(), 0);

        state.mount(&mut ledger, now);
        state.mount(&mut ledger, now);
        assert_eq!(ledger.subscriber_count(), 1);
    }

    #[test]
    fn test_poll_while_unmounted() {
        let mut state = TopScreenState::new(0);
        assert!(!state.poll(Instant::now()));
    }
}

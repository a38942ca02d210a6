//! # TitleBar Component
//!
//! Top row: app name, one tab per screen (with its hotkey) and the
//! current status message.
//!
//! Stateless: it receives everything as props and renders what it's
//! given.
//!
//! ```text
//! Poikatsu  [t] Top  [h] History  [f] Exchange  | Welcome to Poikatsu!
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::navigation::Screen;
use crate::tui::component::Component;

pub struct TitleBar {
    pub current: Screen,
    pub status_message: String,
}

impl TitleBar {
    fn line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled(
            "Poikatsu ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )];

        for screen in Screen::ALL {
            let style = if screen == self.current {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("[{}] {}", screen.hotkey(), screen.title()), style));
        }

        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("  | {}", self.status_message),
                Style::default().fg(Color::DarkGray),
            ));
        }
        Line::from(spans)
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(self.line(), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bar: &TitleBar) -> String {
        bar.line().spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_lists_all_screens() {
        let bar = TitleBar {
            current: Screen::History,
            status_message: String::new(),
        };
        let t = text(&bar);
        assert!(t.contains("[t] Top"));
        assert!(t.contains("[h] History"));
        assert!(t.contains("[f] Exchange"));
        assert!(!t.contains('|'));
    }

    #[test]
    fn test_current_screen_highlighted() {
        let bar = TitleBar {
            current: Screen::Flow,
            status_message: String::new(),
        };
        let line = bar.line();
        let flow = line.spans.iter().find(|s| s.content.contains("Exchange")).unwrap();
        assert_eq!(flow.style.bg, Some(Color::Yellow));
        let top = line.spans.iter().find(|s| s.content.contains("Top")).unwrap();
        assert_eq!(top.style.bg, None);
    }

    #[test]
    fn test_status_appended() {
        let bar = TitleBar {
            current: Screen::Top,
            status_message: "Deleted entry 2".to_string(),
        };
        assert!(text(&bar).ends_with("| Deleted entry 2"));
    }
}

//! # ServiceBar Component
//!
//! One row of external service buttons plus a grey footnote reminding
//! the user that none of them are real integrations.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::connect::ExternalService;
use crate::tui::component::Component;

pub struct ServiceBar {
    pub services: &'static [ExternalService],
    pub footnote: &'static str,
}

impl ServiceBar {
    /// Rows needed: buttons + footnote.
    pub const HEIGHT: u16 = 2;

    fn buttons(&self) -> Line<'static> {
        let mut spans = Vec::new();
        for (i, service) in self.services.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(
                format!("[{}]", service.hotkey),
                Style::default().fg(Color::Yellow),
            ));
            // Services without a URL open the demo dialog; mark them
            let label = if service.url.is_some() {
                format!(" {}", service.name)
            } else {
                format!(" {}*", service.name)
            };
            spans.push(Span::styled(label, Style::default().add_modifier(Modifier::BOLD)));
        }
        Line::from(spans)
    }
}

impl Component for ServiceBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [buttons_area, note_area] = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
        frame.render_widget(self.buttons(), buttons_area);
        frame.render_widget(
            Line::styled(self.footnote, Style::default().fg(Color::DarkGray)),
            note_area,
        );
    }
}

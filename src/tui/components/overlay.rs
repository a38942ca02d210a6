//! # Overlays
//!
//! Popups drawn over the current screen: the demo connect dialog and
//! one-shot notices ("LINE connected! (demo)"). Both clear what is
//! underneath before drawing.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use crate::tui::component::Component;

/// Confirm dialog for a demo service connection.
pub struct ConnectDialog {
    pub title: String,
    pub prompt: String,
}

impl Component for ConnectDialog {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(44, 7, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .title_bottom(Line::from(" Enter Connect  Esc Cancel ").centered())
            .padding(Padding::uniform(1));

        let body = Paragraph::new(self.prompt.as_str())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Informational popup dismissed by any key.
pub struct NoticePopup<'a> {
    pub text: &'a str,
}

impl Component for NoticePopup<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_fixed(50, 5, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(" Notice ")
            .title_bottom(Line::from(" any key ").centered())
            .padding(Padding::horizontal(1));

        let body = Paragraph::new(self.text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block);
        frame.render_widget(body, overlay);
    }
}

/// Center a `width` x `height` rect in `outer`, shrinking to fit.
pub fn centered_fixed(width: u16, height: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(outer.width)),
        Constraint::Fill(1),
    ])
    .areas(center_v);
    center
}

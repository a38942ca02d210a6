use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;

use crate::core::navigation::Screen;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{ConnectDialog, ExchangeForm, HistoryTable, NoticePopup, TitleBar, TopScreen};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, now: Instant) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let current = app.navigator.current();

    TitleBar {
        current,
        status_message: app.status_message.clone(),
    }
    .render(frame, title_area);

    match current {
        Screen::Top => TopScreen::new(&tui.top, now).render(frame, main_area),
        Screen::History => HistoryTable::new(&mut tui.history, app.ledger.history()).render(frame, main_area),
        Screen::Flow => ExchangeForm {
            input: &tui.amount,
            balance: app.ledger.balance(),
            message: app.flow_message.as_deref(),
        }
        .render(frame, main_area),
    }

    frame.render_widget(
        Line::styled(help_text(current), Style::default().fg(Color::DarkGray)),
        help_area,
    );

    // Overlays last so they sit on top
    if let (Some(title), Some(prompt)) = (app.modal.title(), app.modal.prompt()) {
        ConnectDialog { title, prompt }.render(frame, main_area);
    }
    if let Some(text) = &app.notice {
        NoticePopup { text }.render(frame, main_area);
    }
}

fn help_text(screen: Screen) -> &'static str {
    match screen {
        Screen::Top => " h History  f Exchange  letters Services  q/Esc Quit ",
        Screen::History => " Up/Down Select  d Delete  t Top  f Exchange  Esc Back  q Quit ",
        Screen::Flow => " 0-9 Amount  Enter Exchange  r Reset  R Reset all  t Top  Esc Back ",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &mut App, tui: &mut TuiState) -> String {
        tui.sync_mount(app, Instant::now());
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| draw_ui(f, app, tui, Instant::now()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_top_shows_balance_and_services() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        let screen = render(&mut app, &mut tui);
        assert!(screen.contains("1,250 P"));
        assert!(screen.contains("PayPay"));
        assert!(screen.contains("Kadobeya Inc."));
        assert!(screen.contains("Welcome to Poikatsu!"));
    }

    #[test]
    fn test_history_shows_rows() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        update(&mut app, Action::Navigate(Screen::History));
        let screen = render(&mut app, &mut tui);
        assert!(screen.contains("2025-08-27"));
        assert!(screen.contains("+100"));
        assert!(screen.contains("-50"));
        assert!(screen.contains("Gift exchange"));
    }

    #[test]
    fn test_empty_history_message() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        for id in [1, 2, 3] {
            update(&mut app, Action::DeleteEntry(id));
        }
        update(&mut app, Action::Navigate(Screen::History));
        let screen = render(&mut app, &mut tui);
        assert!(screen.contains("No history entries."));
    }

    #[test]
    fn test_flow_shows_message_and_balance() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        update(&mut app, Action::Navigate(Screen::Flow));
        update(&mut app, Action::Exchange(Some(5000)));
        let screen = render(&mut app, &mut tui);
        assert!(screen.contains("Available: 1,250 P"));
        assert!(screen.contains("Insufficient balance"));
        assert!(screen.contains("e.g. 100"));
    }

    #[test]
    fn test_connect_dialog_overlay() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        app.modal.open("LINE");
        let screen = render(&mut app, &mut tui);
        assert!(screen.contains("LINE connect"));
        assert!(screen.contains("Connect to LINE?"));
    }

    #[test]
    fn test_notice_overlay() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        app.notice = Some("X connected! (demo)".to_string());
        let screen = render(&mut app, &mut tui);
        assert!(screen.contains("X connected! (demo)"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = test_app();
        let mut tui = TuiState::new(&app);
        app.modal.open("X");
        let backend = TestBackend::new(10, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        for screen in Screen::ALL {
            update(&mut app, Action::Navigate(screen));
            tui.sync_mount(&mut app, Instant::now());
            terminal
                .draw(|f| draw_ui(f, &app, &mut tui, Instant::now()))
                .unwrap();
        }
    }
}

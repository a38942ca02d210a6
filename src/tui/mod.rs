//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Key Routing
//!
//! Events are routed to the first layer that wants them:
//!
//! 1. Ctrl+C quits from anywhere.
//! 2. A notice swallows the next key and closes.
//! 3. The connect dialog takes Enter/`y` (connect) and Esc/`n` (cancel).
//! 4. The current screen's component (history table, amount input).
//! 5. Screen-level keys: `r`/`R` on the exchange screen, then global
//!    hotkeys (`t`/`h`/`f`, service letters, `q`, Esc).
//!
//! ## Redraw Strategy
//!
//! The event loop uses conditional redraw to avoid unnecessary work:
//!
//! - **Animating** (balance highlight on the top screen): draws every ~80ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! ## Mounting
//!
//! The top screen holds a ledger subscription only while it is showing.
//! `TuiState::sync_mount` runs after every batch of events and subscribes
//! or unsubscribes when the current screen changes.

mod component;
pub mod components;
pub mod event;
mod format;
pub mod links;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::connect::{link_by_hotkey, service_by_hotkey};
use crate::core::navigation::Screen;
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::{AmountEvent, AmountInput, HistoryEvent, HistoryTableState, TopScreenState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::links::{LinkOpener, opener_for};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub top: TopScreenState,
    pub history: HistoryTableState,
    pub amount: AmountInput,
    /// Screen whose mount hooks last ran (None before the first frame)
    mounted: Option<Screen>,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            top: TopScreenState::new(app.ledger.balance()),
            history: HistoryTableState::new(),
            amount: AmountInput::new(),
            mounted: None,
        }
    }

    /// Run mount/unmount hooks if the current screen changed, and sync
    /// props that components read while handling events.
    pub fn sync_mount(&mut self, app: &mut App, now: Instant) {
        self.history.set_len(app.ledger.history().len());

        let current = app.navigator.current();
        if self.mounted == Some(current) {
            return;
        }
        if self.mounted == Some(Screen::Top) {
            self.top.unmount(&mut app.ledger);
        }
        if current == Screen::Top {
            self.top.mount(&mut app.ledger, now);
        }
        debug!("Mounted {:?} (was {:?})", current, self.mounted);
        self.mounted = Some(current);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), Hide)?;
        info!("Terminal modes enabled (hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Translate one event into at most one `Action`, updating component state on the way.
pub fn dispatch(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    if matches!(event, TuiEvent::Resize) {
        return None;
    }
    if app.notice.is_some() {
        return Some(Action::DismissNotice);
    }
    if app.modal.is_open() {
        return match event {
            TuiEvent::Submit | TuiEvent::InputChar('y') => Some(Action::ConfirmModal),
            TuiEvent::Escape | TuiEvent::InputChar('n') => Some(Action::CloseModal),
            _ => None,
        };
    }

    let screen = app.navigator.current();
    match screen {
        Screen::Top => {}
        Screen::History => {
            if let Some(HistoryEvent::Delete(index)) = tui.history.handle_event(event) {
                return app.ledger.history().get(index).map(|e| Action::DeleteEntry(e.id));
            }
        }
        Screen::Flow => {
            match tui.amount.handle_event(event) {
                Some(AmountEvent::Submit(amount)) => return Some(Action::Exchange(amount)),
                Some(AmountEvent::ContentChanged) => return None,
                None => {}
            }
            match event {
                TuiEvent::InputChar('r') => return Some(Action::ClearForm),
                TuiEvent::InputChar('R') => return Some(Action::ResetAll),
                _ => {}
            }
        }
    }

    match event {
        TuiEvent::Escape if screen == Screen::Top => Some(Action::Quit),
        TuiEvent::Escape => Some(Action::Navigate(Screen::Top)),
        TuiEvent::InputChar('q') => Some(Action::Quit),
        TuiEvent::InputChar(c) => Screen::from_hotkey(*c)
            .map(Action::Navigate)
            .or_else(|| service_by_hotkey(screen, *c).map(Action::ActivateService))
            .or_else(|| link_by_hotkey(screen, *c).map(Action::OpenLink)),
        _ => None,
    }
}

/// Carry out an effect. Returns true when the app should quit.
pub fn apply_effect(app: &mut App, tui: &mut TuiState, opener: &dyn LinkOpener, effect: Effect) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::ClearInput => {
            tui.amount.clear();
            false
        }
        Effect::OpenUrl(url) => {
            if let Err(e) = opener.open(&url) {
                let follow_up = update(
                    app,
                    Action::LinkOpenFailed {
                        url,
                        reason: e.to_string(),
                    },
                );
                return apply_effect(app, tui, opener, follow_up);
            }
            false
        }
    }
}

/// Feed one event through dispatch → update → effect.
pub fn handle(app: &mut App, tui: &mut TuiState, opener: &dyn LinkOpener, event: &TuiEvent) -> bool {
    match dispatch(app, tui, event) {
        Some(action) => {
            let effect = update(app, action);
            apply_effect(app, tui, opener, effect)
        }
        None => false,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let mut app = App::from_config(&config);
    let mut tui = TuiState::new(&app);
    let opener = opener_for(&config);

    let mut terminal = ratatui::init();
    let result = {
        let _terminal_mode_guard = TerminalModeGuard::new();
        event_loop(&mut terminal, &mut app, &mut tui, opener.as_ref())
    };
    ratatui::restore();

    info!("Poikatsu shutting down (balance {})", app.ledger.balance());
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
    opener: &dyn LinkOpener,
) -> std::io::Result<()> {
    let mut needs_redraw = true; // Force first frame
    let mut was_animating = false;

    loop {
        let now = Instant::now();
        tui.sync_mount(app, now);
        if tui.top.poll(now) {
            needs_redraw = true;
        }

        // One extra frame after the highlight ends clears it
        let animating = tui.top.is_animating(now);
        if animating || was_animating {
            needs_redraw = true;
        }
        was_animating = animating;

        // Only draw when something changed
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, app, tui, now))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event.into_iter().chain(std::iter::from_fn(poll_event_immediate)) {
            if handle(app, tui, opener, &event) {
                return Ok(());
            }
            // Keep component props current between events in the same batch
            tui.sync_mount(app, Instant::now());
        }
    }
}

//! # Actions
//!
//! Everything that can happen in Poikatsu becomes an `Action`.
//! User presses Enter on the exchange form? That's `Action::Exchange(Some(100))`.
//! User presses `d` on a history row? That's `Action::DeleteEntry(id)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` for the adapter to carry out.
//! No I/O here. Opening a browser happens elsewhere.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! This makes everything testable: apply an action, assert on `App`.

use log::{debug, info};

use crate::core::connect::{ExternalService, Link, LinkTarget};
use crate::core::navigation::Screen;
use crate::core::state::App;

pub const RESET_ALL_MESSAGE: &str = "Balance and history reset to initial state";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Navigate(Screen),
    /// `None` when the amount field is empty.
    Exchange(Option<i64>),
    DeleteEntry(u64),
    ResetAll,
    /// Clear the exchange form without touching the ledger.
    ClearForm,
    ActivateService(ExternalService),
    OpenLink(Link),
    ConfirmModal,
    CloseModal,
    DismissNotice,
    LinkOpenFailed { url: String, reason: String },
    Quit,
}

/// Work the adapter must do after an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    OpenUrl(String),
    /// Empty the amount input on the exchange form.
    ClearInput,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Navigate(target) => {
            let leaving_flow = app.navigator.current() == Screen::Flow;
            if !app.navigator.navigate(target) {
                return Effect::None;
            }
            app.modal.close();
            if leaving_flow {
                app.flow_message = None;
                return Effect::ClearInput;
            }
            Effect::None
        }
        Action::Exchange(amount) => {
            let today = (app.today)();
            match app.ledger.exchange(amount, today) {
                Ok(receipt) => {
                    app.flow_message = Some(receipt.message());
                    app.status_message = format!("Exchanged {} P, {} P left", receipt.amount, receipt.balance);
                    Effect::ClearInput
                }
                Err(e) => {
                    app.flow_message = Some(e.to_string());
                    Effect::None
                }
            }
        }
        Action::DeleteEntry(id) => {
            if let Some(removed) = app.ledger.delete_entry(id) {
                app.status_message = format!("Deleted entry {} ({} P)", id, removed.signed_points());
            }
            Effect::None
        }
        Action::ResetAll => {
            app.ledger.reset_all();
            app.flow_message = Some(RESET_ALL_MESSAGE.to_string());
            Effect::None
        }
        Action::ClearForm => {
            app.flow_message = None;
            Effect::ClearInput
        }
        Action::ActivateService(service) => match service.url {
            Some(url) => {
                info!("Opening {} at {}", service.name, url);
                Effect::OpenUrl(url.to_string())
            }
            None => {
                app.modal.open(service.name);
                Effect::None
            }
        },
        Action::OpenLink(link) => match link.target {
            LinkTarget::Url(url) => Effect::OpenUrl(url.to_string()),
            LinkTarget::Notice(text) => {
                app.notice = Some(text.to_string());
                Effect::None
            }
        },
        Action::ConfirmModal => {
            if let Some(notice) = app.modal.confirm(app.connector.as_ref()) {
                app.notice = Some(notice);
            }
            Effect::None
        }
        Action::CloseModal => {
            app.modal.close();
            Effect::None
        }
        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::LinkOpenFailed { url, reason } => {
            app.notice = Some(format!("Could not open {url}: {reason}"));
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connect::{FLOW_SERVICES, HISTORY_SERVICES, TOP_LINKS};
    use crate::core::history::Category;
    use crate::test_support::{test_app, test_today};

    #[test]
    fn test_exchange_success_sets_message_and_clears_input() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Exchange(Some(100)));
        assert_eq!(effect, Effect::ClearInput);
        assert_eq!(app.ledger.balance(), 1150);
        assert_eq!(app.flow_message.as_deref(), Some("Requested exchange of 100 P (demo)"));
        assert_eq!(app.status_message, "Exchanged 100 P, 1150 P left");
        assert_eq!(app.ledger.history()[0].date, test_today());
    }

    #[test]
    fn test_exchange_failure_keeps_input() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Exchange(None)), Effect::None);
        assert_eq!(app.flow_message.as_deref(), Some("Enter the number of points to exchange"));

        assert_eq!(update(&mut app, Action::Exchange(Some(5000))), Effect::None);
        assert_eq!(app.flow_message.as_deref(), Some("Insufficient balance"));
        assert_eq!(app.ledger.balance(), 1250);
        assert_eq!(app.status_message, "Welcome to Poikatsu!");
    }

    #[test]
    fn test_scenario_from_seed() {
        let mut app = test_app();

        update(&mut app, Action::Exchange(Some(100)));
        assert_eq!(app.ledger.balance(), 1150);
        assert_eq!(app.ledger.history()[0].points, -100);
        assert_eq!(app.ledger.history()[0].category, Category::Used);

        update(&mut app, Action::Exchange(Some(0)));
        assert_eq!(app.ledger.balance(), 1150);

        update(&mut app, Action::Exchange(Some(5000)));
        assert_eq!(app.ledger.balance(), 1150);

        let id = app.ledger.history()[0].id;
        update(&mut app, Action::DeleteEntry(id));
        assert_eq!(app.ledger.balance(), 1250);
        assert!(app.ledger.entry(id).is_none());

        update(&mut app, Action::ResetAll);
        assert_eq!(app.ledger.balance(), 1250);
        assert_eq!(app.ledger.history().len(), 3);
        assert_eq!(app.flow_message.as_deref(), Some(RESET_ALL_MESSAGE));
    }

    #[test]
    fn test_clear_form_leaves_ledger() {
        let mut app = test_app();
        update(&mut app, Action::Exchange(Some(10)));
        let effect = update(&mut app, Action::ClearForm);
        assert_eq!(effect, Effect::ClearInput);
        assert_eq!(app.flow_message, None);
        assert_eq!(app.ledger.balance(), 1240);
    }

    #[test]
    fn test_leaving_flow_clears_form() {
        let mut app = test_app();
        update(&mut app, Action::Navigate(Screen::Flow));
        update(&mut app, Action::Exchange(None));
        let effect = update(&mut app, Action::Navigate(Screen::History));
        assert_eq!(effect, Effect::ClearInput);
        assert_eq!(app.flow_message, None);
        assert_eq!(app.navigator.current(), Screen::History);
    }

    #[test]
    fn test_navigate_to_same_screen_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Navigate(Screen::Top)), Effect::None);
    }

    #[test]
    fn test_delete_unknown_entry_keeps_status() {
        let mut app = test_app();
        let before = app.status_message.clone();
        update(&mut app, Action::DeleteEntry(404));
        assert_eq!(app.status_message, before);
        assert_eq!(app.ledger.history().len(), 3);
    }

    #[test]
    fn test_service_with_url_opens_it() {
        let mut app = test_app();
        let effect = update(&mut app, Action::ActivateService(HISTORY_SERVICES[0]));
        assert_eq!(effect, Effect::OpenUrl("https://line.me".to_string()));
        assert!(!app.modal.is_open());
    }

    #[test]
    fn test_service_without_url_opens_dialog_then_confirms() {
        let mut app = test_app();
        update(&mut app, Action::ActivateService(FLOW_SERVICES[1]));
        assert_eq!(app.modal.service(), Some("X"));

        update(&mut app, Action::ConfirmModal);
        assert!(!app.modal.is_open());
        assert_eq!(app.notice.as_deref(), Some("X connected! (demo)"));

        update(&mut app, Action::DismissNotice);
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_cancel_dialog_shows_nothing() {
        let mut app = test_app();
        update(&mut app, Action::ActivateService(FLOW_SERVICES[0]));
        update(&mut app, Action::CloseModal);
        assert!(!app.modal.is_open());
        assert_eq!(app.notice, None);
    }

    #[test]
    fn test_links() {
        let mut app = test_app();
        assert_eq!(
            update(&mut app, Action::OpenLink(TOP_LINKS[0])),
            Effect::OpenUrl("https://www.kadobeya.net/".to_string())
        );
        update(&mut app, Action::OpenLink(TOP_LINKS[1]));
        assert!(app.notice.as_deref().unwrap().starts_with("Demo link"));
    }

    #[test]
    fn test_link_failure_notice() {
        let mut app = test_app();
        update(
            &mut app,
            Action::LinkOpenFailed {
                url: "https://dpoint.jp/".to_string(),
                reason: "no browser".to_string(),
            },
        );
        assert_eq!(app.notice.as_deref(), Some("Could not open https://dpoint.jp/: no browser"));
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}

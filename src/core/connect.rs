//! # External Service Affordances
//!
//! The "connect to PayPay / LINE / X" buttons. None of them talk to a real
//! service: a button either carries a URL (the TUI opens it in a browser)
//! or opens the demo confirm dialog, whose confirmation goes through a
//! [`ServiceConnector`]. The only connector shipped is [`DemoConnector`],
//! which always succeeds without doing anything.
//!
//! ```text
//! ExternalService { url: Some(..) }  →  Effect::OpenUrl
//! ExternalService { url: None }      →  ConnectModal::open  →  confirm()  →  notice
//! ```

use log::info;
use std::fmt;

use crate::core::navigation::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExternalService {
    pub name: &'static str,
    pub hotkey: char,
    /// `None` means "demo dialog only".
    pub url: Option<&'static str>,
}

const fn service(name: &'static str, hotkey: char, url: Option<&'static str>) -> ExternalService {
    ExternalService { name, hotkey, url }
}

pub const TOP_SERVICES: &[ExternalService] = &[
    service("PayPay", 'p', Some("https://www.paypay.ne.jp/")),
    service("T-Card", 'c', Some("https://www.tsite.jp/guide/card/")),
    service("d POINT", 'd', Some("https://dpoint.jp/")),
    service("LINE", 'l', None),
    service("X", 'x', None),
];

pub const HISTORY_SERVICES: &[ExternalService] = &[
    service("LINE", 'l', Some("https://line.me")),
    service("X", 'x', Some("https://twitter.com")),
];

pub const FLOW_SERVICES: &[ExternalService] = &[service("LINE", 'l', None), service("X", 'x', None)];

pub fn services_for(screen: Screen) -> &'static [ExternalService] {
    match screen {
        Screen::Top => TOP_SERVICES,
        Screen::History => HISTORY_SERVICES,
        Screen::Flow => FLOW_SERVICES,
    }
}

pub fn service_by_hotkey(screen: Screen, c: char) -> Option<ExternalService> {
    services_for(screen).iter().copied().find(|s| s.hotkey == c)
}

/// Plain links shown on the top screen beneath the service row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub label: &'static str,
    pub hotkey: char,
    pub target: LinkTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkTarget {
    Url(&'static str),
    /// Show this text as a notice instead of navigating anywhere.
    Notice(&'static str),
}

pub const TOP_LINKS: &[Link] = &[
    Link {
        label: "Kadobeya Inc.",
        hotkey: 'k',
        target: LinkTarget::Url("https://www.kadobeya.net/"),
    },
    Link {
        label: "About this demo",
        hotkey: '?',
        target: LinkTarget::Notice("Demo link (will point to an external page in production)"),
    },
];

pub fn link_by_hotkey(screen: Screen, c: char) -> Option<Link> {
    match screen {
        Screen::Top => TOP_LINKS.iter().copied().find(|l| l.hotkey == c),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    Unavailable(String),
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::Unavailable(service) => write!(f, "{service} is unavailable"),
        }
    }
}

impl std::error::Error for ConnectError {}

/// Something that can "connect" the user to an external points service.
pub trait ServiceConnector {
    fn name(&self) -> &str;

    /// Connect to `service`, returning the text to show the user.
    fn connect(&self, service: &str) -> Result<String, ConnectError>;
}

/// Connector that performs no call and always reports success.
pub struct DemoConnector;

impl ServiceConnector for DemoConnector {
    fn name(&self) -> &str {
        "demo"
    }

    fn connect(&self, service: &str) -> Result<String, ConnectError> {
        info!("Demo connect to {}", service);
        Ok(format!("{service} connected! (demo)"))
    }
}

/// The confirm dialog. Holds at most one service name; opening a second
/// one replaces the first.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConnectModal {
    service: Option<String>,
}

impl ConnectModal {
    pub fn open(&mut self, service: &str) {
        self.service = Some(service.to_string());
    }

    pub fn close(&mut self) {
        self.service = None;
    }

    pub fn is_open(&self) -> bool {
        self.service.is_some()
    }

    pub fn service(&self) -> Option<&str> {
        self.service.as_deref()
    }

    pub fn title(&self) -> Option<String> {
        self.service().map(|s| format!("{s} connect"))
    }

    pub fn prompt(&self) -> Option<String> {
        self.service().map(|s| format!("Connect to {s}? (demo only)"))
    }

    /// Confirm the open dialog and close it. Returns the notice to show,
    /// or `None` if nothing was open.
    pub fn confirm(&mut self, connector: &dyn ServiceConnector) -> Option<String> {
        let service = self.service.take()?;
        Some(match connector.connect(&service) {
            Ok(notice) => notice,
            Err(e) => format!("Connection failed: {e}"),
        })
    }
}

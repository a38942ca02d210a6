//! Opening external URLs.
//!
//! `Effect::OpenUrl` ends up here. The real opener hands the URL to the
//! desktop's default browser; the log-only opener is used when link
//! opening is turned off in config.

use log::{info, warn};
use std::io;

use crate::core::config::ResolvedConfig;

pub trait LinkOpener {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the platform's default handler.
pub struct BrowserOpener;

impl LinkOpener for BrowserOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        info!("Opening {} in browser", url);
        open::that(url).inspect_err(|e| warn!("Failed to open {}: {}", url, e))
    }
}

/// Records the URL in the log and does nothing else.
pub struct LogOnlyOpener;

impl LinkOpener for LogOnlyOpener {
    fn open(&self, url: &str) -> io::Result<()> {
        info!("Link opening disabled, not opening {}", url);
        Ok(())
    }
}

pub fn opener_for(config: &ResolvedConfig) -> Box<dyn LinkOpener> {
    if config.open_links {
        Box::new(BrowserOpener)
    } else {
        Box::new(LogOnlyOpener)
    }
}

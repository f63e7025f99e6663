//! Interactive duplicate resolution for vidtag.
//!
//! The heart of this crate is [`session::Session`], a pure state
//! machine over duplicate groups: cursor movement, per-file selection,
//! and a stage -> confirm -> execute deletion cycle that can span
//! several groups in one confirmation. Terminal rendering and the
//! filesystem work live at the edges and only exchange events with the
//! session.
//!
//! # Keyboard
//!
//! - `j`/`k` - Move between files in the current group
//! - `p`/`n` - Previous/next group
//! - `Space` - Toggle selection
//! - `a`/`c` - Select all / clear all in the current group
//! - `s` - Skip group
//! - `Enter` - Delete selected files (with confirmation)
//! - `?` - Help
//! - `q` - Quit

mod app;
mod deletion;
mod event;
mod render;
pub mod session;
mod theme;

pub use app::{App, AppResult};
pub use session::{DeletionOutcome, Session, SessionEvent};
pub use theme::Theme;

use vidtag_analyze::DuplicateGroup;

/// Run the duplicate resolution TUI over a prebuilt index.
pub fn run(groups: Vec<DuplicateGroup>) -> AppResult<()> {
    let rt = tokio::runtime::Runtime::new()?;

    let terminal = ratatui::init();
    let result = rt.block_on(App::new(groups).run(terminal));
    ratatui::restore();

    rt.shutdown_timeout(std::time::Duration::from_millis(100));

    result
}

//! Main application state and logic.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::debug;

use vidtag_analyze::DuplicateGroup;

use crate::deletion::start_deletion;
use crate::event::KeyAction;
use crate::render::{DeleteConfirmModal, GroupView, HelpOverlay, NoGroupsView};
use crate::session::{Command, DeletionOutcome, Mode, Session, SessionEvent};
use crate::theme::Theme;

/// Application result type.
pub type AppResult<T> = color_eyre::Result<T>;

/// The duplicate resolution application.
///
/// Wraps a [`Session`] with terminal I/O: key events become session
/// events, session commands become background tasks, and the session
/// state is rendered after every change.
pub struct App {
    session: Session,
    theme: Theme,
    show_help: bool,
    status: Option<String>,
    deletion_rx: Option<mpsc::Receiver<DeletionOutcome>>,
    needs_redraw: bool,
}

impl App {
    pub fn new(groups: Vec<DuplicateGroup>) -> Self {
        Self {
            session: Session::new(groups),
            theme: Theme::dark(),
            show_help: false,
            status: None,
            deletion_rx: None,
            needs_redraw: true,
        }
    }

    /// Main async event loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> AppResult<()> {
        let mut events = EventStream::new();
        let mut interval = tokio::time::interval(Duration::from_millis(250));

        while self.session.mode() != Mode::Quitting {
            if self.needs_redraw {
                terminal.draw(|frame| self.render(frame))?;
                self.needs_redraw = false;
            }

            tokio::select! {
                biased; // Prioritize in order listed

                Some(Ok(event)) = events.next() => {
                    if let Event::Key(key_event) = event {
                        if key_event.kind == KeyEventKind::Press {
                            self.handle_key_event(key_event);
                        }
                    }
                    self.needs_redraw = true;
                }

                // Deletion completion from the background task
                Some(outcome) = async {
                    match &mut self.deletion_rx {
                        Some(rx) => rx.recv().await,
                        None => std::future::pending().await,
                    }
                } => {
                    self.handle_outcome(outcome);
                    self.needs_redraw = true;
                }

                _ = interval.tick() => {}
            }
        }

        Ok(())
    }

    fn handle_key_event(&mut self, event: KeyEvent) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        self.status = None;

        match self.session.mode() {
            Mode::Confirming => {
                let session_event = match (event.code, event.modifiers) {
                    (KeyCode::Char('y') | KeyCode::Char('Y'), _) => SessionEvent::ConfirmDelete,
                    (KeyCode::Char('n') | KeyCode::Char('N'), _) | (KeyCode::Esc, _) => {
                        SessionEvent::CancelDelete
                    }
                    (KeyCode::Char('c'), KeyModifiers::CONTROL) => SessionEvent::CancelDelete,
                    _ => return,
                };
                self.dispatch(session_event);
            }
            Mode::Browsing => {
                let session_event = match KeyAction::from_key_event(event) {
                    KeyAction::MoveUp => SessionEvent::CursorUp,
                    KeyAction::MoveDown => SessionEvent::CursorDown,
                    KeyAction::PrevGroup => SessionEvent::PrevGroup,
                    KeyAction::NextGroup => SessionEvent::NextGroup,
                    KeyAction::ToggleSelect => SessionEvent::ToggleSelected,
                    KeyAction::SelectAll => SessionEvent::SelectAll,
                    KeyAction::ClearSelections | KeyAction::Cancel => {
                        SessionEvent::ClearSelections
                    }
                    KeyAction::SkipGroup => SessionEvent::SkipGroup,
                    KeyAction::Delete => SessionEvent::RequestDelete,
                    KeyAction::Quit | KeyAction::ForceQuit => SessionEvent::Quit,
                    KeyAction::ToggleHelp => {
                        self.show_help = true;
                        return;
                    }
                    KeyAction::None => return,
                };
                self.dispatch(session_event);
            }
            // Input is refused until the outstanding deletion completes.
            Mode::Deleting | Mode::Quitting => {}
        }
    }

    fn dispatch(&mut self, event: SessionEvent) {
        if let Some(Command::ExecuteDeletion(paths)) = self.session.update(event) {
            debug!(count = paths.len(), "starting deletion batch");
            self.deletion_rx = Some(start_deletion(paths));
        }
    }

    fn handle_outcome(&mut self, outcome: DeletionOutcome) {
        let batch = self.session.pending().len();
        self.status = Some(match &outcome {
            DeletionOutcome::AllRemoved => format!("Deleted {} files", batch),
            DeletionOutcome::Failed { path, error } => {
                format!("Failed to delete {}: {}", path.display(), error)
            }
        });
        self.session.update(SessionEvent::DeletionComplete(outcome));
        self.deletion_rx = None;
    }

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let get_size = |path: &PathBuf| fs::metadata(path).ok().map(|m| m.len());

        if self.session.groups().is_empty() {
            frame.render_widget(NoGroupsView::new(&self.theme), area);
        } else {
            let status = if self.session.mode() == Mode::Deleting {
                Some("Deleting...")
            } else {
                self.status.as_deref()
            };
            frame.render_widget(
                GroupView::new(&self.theme, &self.session, status, get_size),
                area,
            );
        }

        if self.session.mode() == Mode::Confirming {
            frame.render_widget(
                DeleteConfirmModal::new(&self.theme, self.session.pending(), get_size),
                area,
            );
        }

        if self.show_help {
            frame.render_widget(HelpOverlay::new(&self.theme), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn groups() -> Vec<DuplicateGroup> {
        vec![DuplicateGroup {
            hash: "DEADBEEF".into(),
            paths: vec!["a.mp4".into(), "b.mp4".into()],
        }]
    }

    #[test]
    fn test_q_quits() {
        let mut app = App::new(groups());
        app.handle_key_event(key(KeyCode::Char('q')));
        assert_eq!(app.session.mode(), Mode::Quitting);
    }

    #[test]
    fn test_help_swallows_next_key() {
        let mut app = App::new(groups());
        app.handle_key_event(key(KeyCode::Char('?')));
        assert!(app.show_help);

        // Closing help must not also act on the key.
        app.handle_key_event(key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert_eq!(app.session.mode(), Mode::Browsing);
    }

    #[test]
    fn test_enter_without_selection_stays_browsing() {
        let mut app = App::new(groups());
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.session.mode(), Mode::Browsing);
    }

    #[tokio::test]
    async fn test_confirm_flow_reaches_deleting() {
        let mut app = App::new(groups());
        app.handle_key_event(key(KeyCode::Char(' ')));
        app.handle_key_event(key(KeyCode::Enter));
        assert_eq!(app.session.mode(), Mode::Confirming);

        app.handle_key_event(key(KeyCode::Char('y')));
        assert_eq!(app.session.mode(), Mode::Deleting);
        assert!(app.deletion_rx.is_some());
    }

    #[test]
    fn test_n_cancels_confirmation() {
        let mut app = App::new(groups());
        app.handle_key_event(key(KeyCode::Char(' ')));
        app.handle_key_event(key(KeyCode::Enter));
        app.handle_key_event(key(KeyCode::Char('n')));
        assert_eq!(app.session.mode(), Mode::Browsing);
        assert!(app.deletion_rx.is_none());
    }

    #[test]
    fn test_failed_outcome_sets_status() {
        let mut app = App::new(groups());
        app.handle_outcome(DeletionOutcome::Failed {
            path: "a.mp4".into(),
            error: "permission denied".into(),
        });
        assert!(app.status.as_deref().unwrap().contains("a.mp4"));
        assert_eq!(app.session.mode(), Mode::Browsing);
    }
}

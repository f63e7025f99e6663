//! Duplicate resolution state machine.
//!
//! A [`Session`] is a reducer: one [`SessionEvent`] in, state mutated,
//! at most one outgoing [`Command`] back. It performs no I/O itself;
//! deletion runs as a background task whose single completion event is
//! fed back in. The session refuses mutating input while that execution
//! is outstanding.

use std::collections::HashSet;
use std::mem;
use std::path::PathBuf;

use vidtag_analyze::DuplicateGroup;

/// One file within a group, paired with its selection flag.
///
/// Selection lives next to the path so the files/selection collections
/// can never drift out of sync.
#[derive(Debug, Clone)]
pub struct GroupFile {
    pub path: PathBuf,
    pub selected: bool,
}

/// An active duplicate group plus the paths already removed from it.
#[derive(Debug, Clone)]
pub struct SessionGroup {
    pub hash: String,
    pub files: Vec<GroupFile>,
    pub deleted: Vec<PathBuf>,
}

impl From<DuplicateGroup> for SessionGroup {
    fn from(group: DuplicateGroup) -> Self {
        Self {
            hash: group.hash,
            files: group
                .paths
                .into_iter()
                .map(|path| GroupFile {
                    path,
                    selected: false,
                })
                .collect(),
            deleted: Vec::new(),
        }
    }
}

/// Session mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Accepting navigation and selection input. With no groups left,
    /// only quitting is meaningful.
    Browsing,
    /// A pending batch awaits operator confirmation.
    Confirming,
    /// Deletion is executing in the background; mutating input is
    /// refused until the completion event arrives.
    Deleting,
    /// Terminal state.
    Quitting,
}

/// Result of an executed deletion batch.
#[derive(Debug, Clone)]
pub enum DeletionOutcome {
    /// Every path in the batch was removed.
    AllRemoved,
    /// Deletion stopped at the first failing path; earlier paths stay
    /// removed, later paths were never attempted.
    Failed { path: PathBuf, error: String },
}

/// Operator intents and completion notifications.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    CursorUp,
    CursorDown,
    PrevGroup,
    NextGroup,
    ToggleSelected,
    SelectAll,
    ClearSelections,
    SkipGroup,
    RequestDelete,
    ConfirmDelete,
    CancelDelete,
    DeletionComplete(DeletionOutcome),
    Quit,
}

/// Side effects the session asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Remove these paths in order, stopping at the first failure, and
    /// feed the outcome back as [`SessionEvent::DeletionComplete`].
    ExecuteDeletion(Vec<PathBuf>),
}

/// The duplicate resolution state machine.
#[derive(Debug)]
pub struct Session {
    groups: Vec<SessionGroup>,
    cursor_group: usize,
    cursor_file: usize,
    mode: Mode,
    pending: Vec<PathBuf>,
}

impl Session {
    /// Create a session over a freshly built index.
    pub fn new(groups: Vec<DuplicateGroup>) -> Self {
        Self {
            groups: groups.into_iter().map(SessionGroup::from).collect(),
            cursor_group: 0,
            cursor_file: 0,
            mode: Mode::Browsing,
            pending: Vec::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn groups(&self) -> &[SessionGroup] {
        &self.groups
    }

    /// Cursor as (group index, file index); meaningless with no groups.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_group, self.cursor_file)
    }

    /// Snapshot of paths staged for deletion, captured at request time.
    pub fn pending(&self) -> &[PathBuf] {
        &self.pending
    }

    /// Process one event. Exactly one event is handled at a time; the
    /// caller owns the loop.
    pub fn update(&mut self, event: SessionEvent) -> Option<Command> {
        match self.mode {
            Mode::Quitting => None,
            Mode::Deleting => {
                if let SessionEvent::DeletionComplete(outcome) = event {
                    self.finish_deletion(outcome);
                }
                None
            }
            Mode::Confirming => match event {
                SessionEvent::ConfirmDelete => {
                    self.mode = Mode::Deleting;
                    Some(Command::ExecuteDeletion(self.pending.clone()))
                }
                SessionEvent::CancelDelete | SessionEvent::Quit => {
                    self.pending.clear();
                    self.mode = Mode::Browsing;
                    None
                }
                _ => None,
            },
            Mode::Browsing => self.update_browsing(event),
        }
    }

    fn update_browsing(&mut self, event: SessionEvent) -> Option<Command> {
        if self.groups.is_empty() {
            if matches!(event, SessionEvent::Quit) {
                self.mode = Mode::Quitting;
            }
            return None;
        }

        match event {
            SessionEvent::Quit => self.mode = Mode::Quitting,

            SessionEvent::CursorUp => {
                if self.cursor_file > 0 {
                    self.cursor_file -= 1;
                }
            }
            SessionEvent::CursorDown => {
                if self.cursor_file + 1 < self.current_group().files.len() {
                    self.cursor_file += 1;
                }
            }
            SessionEvent::PrevGroup => {
                if self.cursor_group > 0 {
                    self.cursor_group -= 1;
                    self.cursor_file = 0;
                }
            }
            SessionEvent::NextGroup => {
                if self.cursor_group + 1 < self.groups.len() {
                    self.cursor_group += 1;
                    self.cursor_file = 0;
                }
            }

            SessionEvent::ToggleSelected => {
                let file_idx = self.cursor_file;
                let file = &mut self.current_group_mut().files[file_idx];
                file.selected = !file.selected;
            }
            SessionEvent::SelectAll => {
                for file in &mut self.current_group_mut().files {
                    file.selected = true;
                }
            }
            SessionEvent::ClearSelections => {
                for file in &mut self.current_group_mut().files {
                    file.selected = false;
                }
            }

            SessionEvent::SkipGroup => {
                if self.cursor_group + 1 < self.groups.len() {
                    self.cursor_group += 1;
                    self.cursor_file = 0;
                } else {
                    self.mode = Mode::Quitting;
                }
            }

            SessionEvent::RequestDelete => {
                // Deletion is batch-wide: every selected file in every
                // group, not just the one under the cursor.
                let batch: Vec<PathBuf> = self
                    .groups
                    .iter()
                    .flat_map(|g| g.files.iter())
                    .filter(|f| f.selected)
                    .map(|f| f.path.clone())
                    .collect();

                if !batch.is_empty() {
                    self.pending = batch;
                    self.mode = Mode::Confirming;
                }
            }

            SessionEvent::ConfirmDelete
            | SessionEvent::CancelDelete
            | SessionEvent::DeletionComplete(_) => {}
        }

        None
    }

    fn finish_deletion(&mut self, outcome: DeletionOutcome) {
        let batch = mem::take(&mut self.pending);
        match outcome {
            DeletionOutcome::AllRemoved => self.apply_removals(&batch),
            DeletionOutcome::Failed { .. } => {
                // Some of the batch may be gone, but without the success
                // sentinel the groups are not re-indexed here; a rebuild
                // of the index is the recovery path.
                self.mode = Mode::Browsing;
            }
        }
    }

    /// Drop executed paths from every group, prune collapsed groups,
    /// and re-clamp the cursor.
    fn apply_removals(&mut self, executed: &[PathBuf]) {
        let removed: HashSet<&PathBuf> = executed.iter().collect();

        let old = mem::take(&mut self.groups);
        let mut survivors = Vec::with_capacity(old.len());
        let mut collapsed_at_or_before = 0;

        for (idx, mut group) in old.into_iter().enumerate() {
            let files = mem::take(&mut group.files);
            for file in files {
                if removed.contains(&file.path) {
                    group.deleted.push(file.path);
                } else {
                    group.files.push(file);
                }
            }

            if group.files.len() <= 1 {
                if idx <= self.cursor_group {
                    collapsed_at_or_before += 1;
                }
            } else {
                survivors.push(group);
            }
        }

        self.groups = survivors;
        if self.groups.is_empty() {
            self.mode = Mode::Quitting;
            return;
        }

        self.cursor_group = self
            .cursor_group
            .saturating_sub(collapsed_at_or_before)
            .min(self.groups.len() - 1);
        if self.cursor_file >= self.current_group().files.len() {
            self.cursor_file = 0;
        }
        self.mode = Mode::Browsing;
    }

    fn current_group(&self) -> &SessionGroup {
        &self.groups[self.cursor_group]
    }

    fn current_group_mut(&mut self) -> &mut SessionGroup {
        &mut self.groups[self.cursor_group]
    }
}

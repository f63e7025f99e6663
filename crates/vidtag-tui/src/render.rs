//! Widgets for the duplicate resolution screens.

use std::path::PathBuf;

use humansize::{format_size, DECIMAL};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Widget};

use crate::session::Session;
use crate::theme::Theme;

/// Human-readable size, or a dash when the file cannot be stat'd.
fn human_size(size: Option<u64>) -> String {
    match size {
        Some(bytes) => format_size(bytes, DECIMAL),
        None => "-".to_string(),
    }
}

/// The main browsing screen: header, current group, key hints.
pub struct GroupView<'a> {
    theme: &'a Theme,
    session: &'a Session,
    status: Option<&'a str>,
    get_size: Box<dyn Fn(&PathBuf) -> Option<u64> + 'a>,
}

impl<'a> GroupView<'a> {
    pub fn new<F>(theme: &'a Theme, session: &'a Session, status: Option<&'a str>, get_size: F) -> Self
    where
        F: Fn(&PathBuf) -> Option<u64> + 'a,
    {
        Self {
            theme,
            session,
            status,
            get_size: Box::new(get_size),
        }
    }
}

impl Widget for GroupView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, body_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let (group_idx, file_idx) = self.session.cursor();
        let groups = self.session.groups();

        let header = Line::from(vec![
            Span::styled(" vidtag duplicates ", self.theme.title),
            Span::raw(format!("Group {} of {}", group_idx + 1, groups.len())),
        ]);
        Paragraph::new(header)
            .style(self.theme.header)
            .render(header_area, buf);

        let group = &groups[group_idx];
        let selected = group.files.iter().filter(|f| f.selected).count();

        let title = Line::from(vec![
            Span::raw(" "),
            Span::styled(&group.hash, self.theme.hash),
            Span::raw(format!(
                " - {} files, {} selected ",
                group.files.len(),
                selected
            )),
        ]);
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(body_area);
        block.render(body_area, buf);

        let mut lines = Vec::with_capacity(group.files.len() + group.deleted.len());
        for (idx, file) in group.files.iter().enumerate() {
            let marker = if file.selected { "[x]" } else { "[ ]" };
            let style = if idx == file_idx {
                self.theme.cursor
            } else if file.selected {
                self.theme.selected
            } else {
                Style::default().fg(self.theme.foreground)
            };
            lines.push(Line::styled(
                format!(
                    " {} {} ({})",
                    marker,
                    file.path.display(),
                    human_size((self.get_size)(&file.path)),
                ),
                style,
            ));
        }
        for path in &group.deleted {
            lines.push(Line::styled(
                format!("     {} (deleted)", path.display()),
                self.theme.deleted,
            ));
        }
        Paragraph::new(lines).render(inner, buf);

        let footer = match self.status {
            Some(status) => Line::styled(format!(" {}", status), Style::default().fg(self.theme.success)),
            None => key_hints(
                self.theme,
                &[
                    ("Space", "select"),
                    ("Enter", "delete"),
                    ("s", "skip"),
                    ("?", "help"),
                    ("q", "quit"),
                ],
            ),
        };
        Paragraph::new(footer)
            .style(self.theme.footer)
            .render(footer_area, buf);
    }
}

/// Confirmation dialog for a staged deletion batch.
pub struct DeleteConfirmModal<'a> {
    theme: &'a Theme,
    pending: &'a [PathBuf],
    get_size: Box<dyn Fn(&PathBuf) -> Option<u64> + 'a>,
}

impl<'a> DeleteConfirmModal<'a> {
    pub fn new<F>(theme: &'a Theme, pending: &'a [PathBuf], get_size: F) -> Self
    where
        F: Fn(&PathBuf) -> Option<u64> + 'a,
    {
        Self {
            theme,
            pending,
            get_size: Box::new(get_size),
        }
    }
}

impl Widget for DeleteConfirmModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_width = 70.min(area.width.saturating_sub(4));
        let popup_height = (self.pending.len() as u16 + 6).min(area.height.saturating_sub(4));

        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Confirm Deletion ")
            .title_style(Style::default().fg(self.theme.error))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.error));
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let total: u64 = self
            .pending
            .iter()
            .filter_map(|p| (self.get_size)(p))
            .sum();

        let mut lines = vec![
            Line::raw(format!(
                "Permanently delete {} files ({})?",
                self.pending.len(),
                format_size(total, DECIMAL),
            )),
            Line::raw(""),
        ];
        for path in self.pending {
            lines.push(Line::styled(
                format!("  {}", path.display()),
                Style::default().fg(self.theme.muted),
            ));
        }
        lines.push(Line::raw(""));
        lines.push(key_hints(self.theme, &[("y", "delete"), ("n/Esc", "cancel")]));

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Full-screen help overlay.
pub struct HelpOverlay<'a> {
    theme: &'a Theme,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        const BINDINGS: &[(&str, &str)] = &[
            ("j/k, Up/Down", "Move between files"),
            ("p/n, Left/Right", "Previous/next group"),
            ("Space", "Toggle selection"),
            ("a", "Select all in group"),
            ("c", "Clear selections in group"),
            ("s", "Skip group"),
            ("Enter", "Delete selected files"),
            ("?", "Close help"),
            ("q", "Quit"),
        ];

        let popup_width = 50.min(area.width.saturating_sub(4));
        let popup_height = (BINDINGS.len() as u16 + 2).min(area.height.saturating_sub(2));
        let popup_x = (area.width.saturating_sub(popup_width)) / 2 + area.x;
        let popup_y = (area.height.saturating_sub(popup_height)) / 2 + area.y;
        let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Help ")
            .title_style(self.theme.title)
            .borders(Borders::ALL)
            .border_style(self.theme.border);
        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        let lines: Vec<Line> = BINDINGS
            .iter()
            .map(|(keys, desc)| {
                Line::from(vec![
                    Span::styled(format!(" {:<16}", keys), self.theme.help_key),
                    Span::styled(*desc, self.theme.help_desc),
                ])
            })
            .collect();
        Paragraph::new(lines).render(inner, buf);
    }
}

/// Shown when the index has no duplicate groups.
pub struct NoGroupsView<'a> {
    theme: &'a Theme,
}

impl<'a> NoGroupsView<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl Widget for NoGroupsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, middle, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(2),
            Constraint::Fill(1),
        ])
        .areas(area);

        Paragraph::new(vec![
            Line::styled("No duplicates found", self.theme.title),
            Line::styled("Press q to quit", Style::default().fg(self.theme.muted)),
        ])
        .alignment(Alignment::Center)
        .render(middle, buf);
    }
}

fn key_hints(theme: &Theme, hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (keys, desc) in hints {
        spans.push(Span::styled(format!(" {}", keys), theme.help_key));
        spans.push(Span::styled(format!(" {} ", desc), theme.help_desc));
    }
    Line::from(spans)
}

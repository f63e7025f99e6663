//! Color theme for the TUI.
//!
//! A single dark theme using a slate-based palette with semantic accent
//! colors, built once at startup and shared by reference.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub foreground: Color,
    pub muted: Color,

    // Status colors
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // UI elements
    pub border: Style,
    pub title: Style,
    pub help_key: Style,
    pub help_desc: Style,

    // Group list
    /// The file under the cursor.
    pub cursor: Style,
    /// Files selected for deletion.
    pub selected: Style,
    /// Files already deleted from a group.
    pub deleted: Style,
    /// Embedded hash in the header.
    pub hash: Style,

    // Header/Footer
    pub header: Style,
    pub footer: Style,
}

impl Theme {
    /// Dark theme using a slate-based palette.
    pub fn dark() -> Self {
        // Slate palette (Tailwind CSS)
        let slate_100 = Color::Rgb(241, 245, 249);
        let slate_400 = Color::Rgb(148, 163, 184);
        let slate_500 = Color::Rgb(100, 116, 139);
        let slate_700 = Color::Rgb(51, 65, 85);
        let slate_800 = Color::Rgb(30, 41, 59);

        // Accent colors (Tailwind CSS)
        let blue_400 = Color::Rgb(96, 165, 250);
        let green_400 = Color::Rgb(74, 222, 128);
        let amber_400 = Color::Rgb(251, 191, 36);
        let red_400 = Color::Rgb(248, 113, 113);
        let violet_400 = Color::Rgb(167, 139, 250);

        Self {
            foreground: slate_100,
            muted: slate_400,

            success: green_400,
            warning: amber_400,
            error: red_400,

            border: Style::default().fg(slate_700),
            title: Style::default().fg(blue_400).add_modifier(Modifier::BOLD),
            help_key: Style::default().fg(blue_400).add_modifier(Modifier::BOLD),
            help_desc: Style::default().fg(slate_400),

            cursor: Style::default()
                .fg(slate_100)
                .bg(slate_800)
                .add_modifier(Modifier::BOLD),
            selected: Style::default().fg(amber_400),
            deleted: Style::default()
                .fg(slate_500)
                .add_modifier(Modifier::CROSSED_OUT),
            hash: Style::default().fg(violet_400).add_modifier(Modifier::BOLD),

            header: Style::default().fg(slate_100).bg(slate_800),
            footer: Style::default().fg(slate_400),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

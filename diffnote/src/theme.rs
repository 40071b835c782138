//! Color theme system for diffnote.
//!
//! A `Theme` holds named `ratatui::style::Color` fields covering every UI surface
//! diffnote renders. Two built-in themes are provided:
//!
//! - `dark` uses ANSI 16 colors (`Color::Reset`, `Color::DarkGray`, etc.) so it
//!   works on any terminal including 256-color SSH sessions with no truecolor support.
//! - `catppuccin_mocha`: Catppuccin Mocha palette in RGB; requires truecolor.

use ratatui::style::Color;
use tracing::warn;

/// All color values used across diffnote's UI surfaces.
///
/// Every field is a `ratatui::style::Color`. Callers use `theme.field` directly
/// inside `Style::default().fg(theme.border_active)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Panel borders
    /// Border color for the panel holding the cursor.
    pub border_active: Color,
    /// Border color for the other panels.
    pub border_inactive: Color,

    // Diff view
    /// Foreground for added lines (`+`).
    pub diff_added: Color,
    /// Foreground for removed lines (`-`).
    pub diff_removed: Color,
    /// Color for unchanged context lines.
    pub diff_context: Color,
    /// Color for hunk header lines (`@@ ... @@`).
    pub diff_hunk_header: Color,
    /// Color for file metadata rows (`diff --git`, `index`, `---`, `+++`).
    pub diff_file_header: Color,
    /// Line-number gutter.
    pub gutter: Color,
    /// Background of the row under the cursor.
    pub cursor_bg: Color,

    // Comments
    /// Inline comment rows and the comment panel text.
    pub comment: Color,
    /// Gutter marker on commented lines.
    pub comment_marker: Color,

    // File tree
    /// File status: newly added.
    pub file_added: Color,
    /// File status: deleted.
    pub file_removed: Color,
    /// File status: modified.
    pub file_modified: Color,
    /// File status: renamed.
    pub file_renamed: Color,

    // Status bar
    /// Status bar background.
    pub status_bar_bg: Color,
    /// Status bar foreground (general text).
    pub status_bar_fg: Color,
    /// Mode indicator color while navigating.
    pub status_mode_normal: Color,
    /// Mode indicator color while editing a comment.
    pub status_mode_insert: Color,
    /// Flash message for completed actions.
    pub flash_info: Color,
    /// Flash message for refused actions.
    pub flash_warn: Color,
}

impl Theme {
    /// Returns the built-in dark theme using ANSI 16 colors.
    ///
    /// Works on all terminals: 16-color, 256-color, and truecolor. Suitable
    /// as the default when color capability is unknown.
    pub fn dark() -> Self {
        Self {
            border_active: Color::Cyan,
            border_inactive: Color::DarkGray,

            diff_added: Color::Green,
            diff_removed: Color::Red,
            diff_context: Color::Reset,
            diff_hunk_header: Color::Cyan,
            diff_file_header: Color::Blue,
            gutter: Color::DarkGray,
            cursor_bg: Color::Indexed(236),

            comment: Color::Yellow,
            comment_marker: Color::Magenta,

            file_added: Color::Green,
            file_removed: Color::Red,
            file_modified: Color::Yellow,
            file_renamed: Color::Cyan,

            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
            status_mode_normal: Color::Cyan,
            status_mode_insert: Color::Green,
            flash_info: Color::Green,
            flash_warn: Color::Yellow,
        }
    }

    /// Returns the Catppuccin Mocha theme using RGB truecolor values.
    ///
    /// Palette source: <https://github.com/catppuccin/catppuccin> Mocha variant.
    pub fn catppuccin_mocha() -> Self {
        // Catppuccin Mocha palette (selected subset)
        let green = Color::Rgb(166, 227, 161); // #a6e3a1
        let red = Color::Rgb(243, 139, 168); // #f38ba8
        let yellow = Color::Rgb(249, 226, 175); // #f9e2af
        let blue = Color::Rgb(137, 180, 250); // #89b4fa
        let teal = Color::Rgb(148, 226, 213); // #94e2d5
        let lavender = Color::Rgb(180, 190, 254); // #b4befe
        let mauve = Color::Rgb(203, 166, 247); // #cba6f7
        let overlay1 = Color::Rgb(127, 132, 156); // #7f849c
        let surface0 = Color::Rgb(49, 50, 68); // #313244
        let surface1 = Color::Rgb(69, 71, 90); // #45475a
        let text = Color::Rgb(205, 214, 244); // #cdd6f4
        let peach = Color::Rgb(250, 179, 135); // #fab387

        Self {
            border_active: lavender,
            border_inactive: overlay1,

            diff_added: green,
            diff_removed: red,
            diff_context: text,
            diff_hunk_header: teal,
            diff_file_header: blue,
            gutter: overlay1,
            cursor_bg: surface0,

            comment: peach,
            comment_marker: mauve,

            file_added: green,
            file_removed: red,
            file_modified: yellow,
            file_renamed: teal,

            status_bar_bg: surface1,
            status_bar_fg: text,
            status_mode_normal: lavender,
            status_mode_insert: green,
            flash_info: green,
            flash_warn: peach,
        }
    }

    /// Resolves a theme name string to the corresponding built-in theme.
    ///
    /// Unknown names fall back to `dark()` so a typo in config never prevents
    /// startup. The fallback is logged, not a hard error.
    ///
    /// # Arguments
    ///
    /// * `name` — theme name from config or CLI, e.g. `"dark"` or `"catppuccin-mocha"`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "catppuccin-mocha" | "catppuccin_mocha" => Self::catppuccin_mocha(),
            "dark" => Self::dark(),
            other => {
                warn!(theme = other, "unknown theme, falling back to 'dark'");
                Self::dark()
            }
        }
    }
}

//! Color constants for the terminal user interface.

use ratatui::style::Color;

use crate::fields::Status;

/// Header and status bar background.
pub const BAR: Color = Color::Rgb(30, 30, 46);
/// Progress gauge fill.
pub const PROGRESS: Color = Color::Rgb(59, 130, 246);
/// Used for destructive confirmations
pub const DARK_RED: Color = Color::Rgb(114, 0, 0);

/// Palette cycled through for category and assignee breakdowns.
pub const CATEGORY_PALETTE: [Color; 6] = [
    Color::Rgb(255, 107, 107),
    Color::Rgb(78, 205, 196),
    Color::Rgb(69, 183, 209),
    Color::Rgb(255, 160, 122),
    Color::Rgb(152, 216, 200),
    Color::Rgb(240, 98, 146),
];

pub const ASSIGNEE_PALETTE: [Color; 6] = [
    Color::Rgb(255, 195, 0),
    Color::Rgb(218, 247, 166),
    Color::Rgb(255, 87, 51),
    Color::Rgb(199, 0, 57),
    Color::Rgb(144, 12, 63),
    Color::Rgb(88, 24, 69),
];

/// Fixed color per workflow status.
pub fn status_color(status: Status) -> Color {
    match status {
        Status::DevPending => Color::Rgb(52, 152, 219),
        Status::DevInProgress => Color::Rgb(46, 204, 113),
        Status::Done => Color::Rgb(241, 196, 15),
        Status::InQa => Color::Rgb(231, 76, 60),
        Status::OnHold => Color::Rgb(155, 89, 182),
        Status::Blocked => Color::Rgb(26, 188, 156),
        Status::Deployed => Color::Rgb(52, 73, 94),
        Status::InIntegration => Color::Rgb(149, 165, 166),
    }
}

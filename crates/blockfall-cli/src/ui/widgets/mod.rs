use blockfall_engine::PieceKind;
use ratatui::{layout::Rect, style::Color, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, key_binding_display::*, piece_display::*,
    session_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod key_binding_display;
mod piece_display;
mod session_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const BACKGROUND: Color = Color::Rgb(11, 16, 32);
    pub const GRID: Color = Color::Rgb(60, 66, 90);
    pub const GHOST: Color = Color::Rgb(150, 150, 170);
    pub const TEXT: Color = Color::Rgb(230, 230, 240);
    pub const BORDER: Color = Color::Rgb(200, 200, 215);
    pub const PAUSED: Color = Color::Rgb(255, 209, 102);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
}

pub mod style {
    use ratatui::style::{Color, Style};

    use super::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    pub const DEFAULT: Style = fg_bg(color::TEXT, color::BACKGROUND);
    pub const EMPTY: Style = fg_bg(color::BACKGROUND, color::BACKGROUND);
    pub const EMPTY_DOT: Style = fg_bg(color::GRID, color::BACKGROUND);
    pub const GHOST: Style = fg_bg(color::GHOST, color::BACKGROUND);
    pub const POPUP: Style = fg_bg(color::BLACK, color::PAUSED);

    pub const fn piece(piece_color: Color) -> Style {
        Style::new().fg(piece_color).bg(piece_color)
    }
}

/// Terminal color of a piece kind.
pub fn piece_color(kind: PieceKind) -> Color {
    let color = kind.color();
    Color::Rgb(color.r, color.g, color.b)
}

fn border_color(paused: bool) -> Color {
    if paused { color::PAUSED } else { color::BORDER }
}

fn block_margin(block: Option<&BlockWidget>) -> (u16, u16) {
    let outer = Rect::new(0, 0, 100, 100);
    let inner = block.map_or(outer, |block| block.inner(outer));
    (outer.width - inner.width, outer.height - inner.height)
}

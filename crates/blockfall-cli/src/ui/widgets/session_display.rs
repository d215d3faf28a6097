use blockfall_engine::GameSession;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, StatsDisplay, style};
use crate::audio::MusicState;

/// Board, next-piece preview and stats side by side.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    show_ghost: bool,
    music: MusicState,
}

impl<'a> SessionDisplay<'a> {
    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            show_ghost: false,
            music: MusicState::Off,
        }
    }

    pub fn show_ghost(self, show_ghost: bool) -> Self {
        Self { show_ghost, ..self }
    }

    pub fn music(self, music: MusicState) -> Self {
        Self { music, ..self }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let paused = self.session.session_state().is_paused();
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(Padding::horizontal(1))
                .border_style(super::border_color(paused))
                .style(style::DEFAULT)
        };

        let game_board = {
            let widget = BoardDisplay::new(self.session.board())
                .falling_piece(self.session.falling_piece())
                .block(
                    Block::bordered()
                        .border_style(super::border_color(paused))
                        .style(style::DEFAULT),
                );
            if self.show_ghost {
                widget.ghost(self.session.simulate_drop_position())
            } else {
                widget
            }
        };
        let next_piece = self.session.next_piece();
        let next_panel = PieceDisplay::new()
            .piece(next_piece.kind(), *next_piece.matrix())
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.session, self.music).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if paused {
            let block = Block::new().style(style::POPUP);
            let text = Text::styled("PAUSED", style::POPUP).centered();
            let popup_area =
                board_area.centered(Constraint::Length(game_board_width), Constraint::Length(3));
            let inner = block.inner(popup_area);
            Clear.render(popup_area, buf);
            block.render(popup_area, buf);
            text.render(inner.centered_vertically(Constraint::Length(1)), buf);
        }
    }
}

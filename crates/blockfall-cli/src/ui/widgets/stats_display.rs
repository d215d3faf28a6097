use std::iter;

use blockfall_engine::GameSession;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::style;
use crate::audio::MusicState;

/// Level, speed, score and progress of the session.
pub struct StatsDisplay<'a> {
    session: &'a GameSession,
    music: MusicState,
    block: Option<BlockWidget<'a>>,
}

impl<'a> StatsDisplay<'a> {
    pub fn new(session: &'a GameSession, music: MusicState) -> Self {
        Self {
            session,
            music,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_margin(self.block.as_ref()).0
    }

    #[expect(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        ROWS.len() as u16 + super::block_margin(self.block.as_ref()).1
    }
}

type Value = fn(&StatsDisplay<'_>) -> String;

#[derive(Clone, Copy)]
enum Row {
    Empty,
    LabelValue(&'static str, Value),
}

const ROWS: [Row; 10] = [
    Row::LabelValue("LEVEL:", |d| d.session.stats().level().to_string()),
    Row::LabelValue("SPEED:", |d| format!("{:.1}x", d.session.speed_multiplier())),
    Row::LabelValue("SCORE:", |d| d.session.stats().score().to_string()),
    Row::LabelValue("LINES:", |d| d.session.stats().level_progress()),
    Row::Empty,
    Row::LabelValue("PIECES:", |d| d.session.stats().completed_pieces().to_string()),
    Row::LabelValue("CLEARED:", |d| {
        d.session.stats().total_cleared_lines().to_string()
    }),
    Row::LabelValue("RESETS:", |d| d.session.game_overs().to_string()),
    Row::Empty,
    Row::LabelValue("MUSIC:", |d| d.music.to_string()),
];

impl Widget for StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &StatsDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let row_areas = area.layout::<{ ROWS.len() }>(&Layout::vertical(
            [Constraint::Length(1); ROWS.len()],
        ));
        for (row, area) in iter::zip(ROWS, row_areas) {
            let Row::LabelValue(label, value) = row else {
                continue;
            };
            let [label_area, value_area] =
                area.layout(&Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]));
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value(self), style::DEFAULT)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::config::Theme;
use crate::game::GameState;

const SEPARATOR: &str = " │ ";

/// Renders the one-line HUD and returns the remaining play area above it.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, state: &GameState, theme: &Theme) -> Rect {
    let [play_area, score_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);

    frame.render_widget(
        Paragraph::new(info_line(
            state.score,
            state.snake.len(),
            usize::from(score_area.width),
            theme,
        ))
        .alignment(Alignment::Center),
        score_area,
    );

    play_area
}

fn info_line(score: u32, length: usize, available_width: usize, theme: &Theme) -> Line<'static> {
    let compact = info_width(score, length, false) > available_width;
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };

    let label_style = Style::default().fg(theme.hud_label);
    let value_style = Style::default()
        .fg(theme.hud_score)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled(format!("{score_label}: "), label_style),
        Span::styled(score.to_string(), value_style),
        Span::styled(SEPARATOR, label_style),
        Span::styled(format!("{length_label}: "), label_style),
        Span::styled(length.to_string(), value_style),
    ])
}

fn info_width(score: u32, length: usize, compact: bool) -> usize {
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };

    format!("{score_label}: {score}").width()
        + SEPARATOR.width()
        + format!("{length_label}: {length}").width()
}

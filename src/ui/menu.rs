use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::config::Theme;
use crate::game::DeathReason;

const POPUP_WIDTH: u16 = 30;
const POPUP_HEIGHT: u16 = 9;

/// Draws the game-over screen as a centered popup.
pub fn render_game_over_menu(
    frame: &mut Frame<'_>,
    area: Rect,
    score: u32,
    death_reason: Option<DeathReason>,
    theme: &Theme,
) {
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(theme.menu_title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Final score: {score}")),
        Line::from(cause_text(death_reason)),
        Line::from(""),
        Line::from("[Enter]/[Space] Play again"),
        Line::from("[Q]/[Esc] Quit").style(Style::default().fg(theme.menu_footer)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn cause_text(death_reason: Option<DeathReason>) -> &'static str {
    match death_reason {
        Some(DeathReason::Wall) => "Cause: hit wall",
        Some(DeathReason::SelfCollision) => "Cause: hit yourself",
        Some(DeathReason::BoardFull) => "Board cleared!",
        None => "",
    }
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [mid] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(mid);

    center
}

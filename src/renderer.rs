use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::config::{
    GridSize, Theme, BORDER_HALF_BLOCK, CELL_COLUMNS, GLYPH_FOOD, GLYPH_SNAKE_BODY,
    GLYPH_SNAKE_HEAD,
};
use crate::game::GameState;
use crate::snake::Position;
use crate::ui::hud::render_hud;
use crate::ui::menu::render_game_over_menu;

/// Renders the full game frame from immutable state.
pub fn render(frame: &mut Frame<'_>, state: &GameState, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(frame, area, state, theme);

    let board = board_rect(play_area, state.grid());
    let block = Block::bordered()
        .border_set(BORDER_HALF_BLOCK)
        .border_style(Style::new().fg(theme.border_fg));

    let inner = block.inner(board);
    frame.render_widget(block, board);
    frame.render_widget(
        Paragraph::new("").style(Style::new().bg(theme.grid_bg)),
        inner,
    );

    render_food(frame, inner, state, theme);
    render_snake(frame, inner, state, theme);

    if state.is_terminal() {
        render_game_over_menu(frame, board, state.score, state.death_reason, theme);
    }
}

/// Centers the bordered board inside `area`, clipped to what fits.
fn board_rect(area: Rect, grid: GridSize) -> Rect {
    let width = grid
        .width
        .saturating_mul(CELL_COLUMNS)
        .saturating_add(2)
        .min(area.width);
    let height = grid.height.saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let Some((x, y)) = logical_to_terminal(inner, state.grid(), state.food.position) else {
        return;
    };

    let buffer = frame.buffer_mut();
    buffer.set_string(x, y, GLYPH_FOOD, Style::new().fg(theme.food).bg(theme.grid_bg));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, state: &GameState, theme: &Theme) {
    let head = state.snake.head();
    let buffer = frame.buffer_mut();

    for segment in state.snake.segments() {
        let Some((x, y)) = logical_to_terminal(inner, state.grid(), *segment) else {
            continue;
        };

        if *segment == head {
            buffer.set_string(
                x,
                y,
                GLYPH_SNAKE_HEAD,
                Style::new()
                    .fg(theme.snake_head)
                    .add_modifier(Modifier::BOLD),
            );
            continue;
        }

        buffer.set_string(x, y, GLYPH_SNAKE_BODY, Style::new().fg(theme.snake_body));
    }
}

fn logical_to_terminal(inner: Rect, bounds: GridSize, position: Position) -> Option<(u16, u16)> {
    if !position.is_within_bounds(bounds) {
        return None;
    }

    let x_offset = u16::try_from(position.x).ok()?.checked_mul(CELL_COLUMNS)?;
    let y_offset = u16::try_from(position.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x.saturating_add(CELL_COLUMNS) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::config::{GridSize, THEME_CLASSIC};
    use crate::game::GameState;
    use crate::input::Direction;
    use crate::snake::{Position, Snake};

    use super::{logical_to_terminal, render};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn cells_map_to_double_width_columns() {
        let inner = Rect::new(1, 1, 20, 10);
        let grid = GridSize {
            width: 10,
            height: 10,
        };

        assert_eq!(
            logical_to_terminal(inner, grid, Position::new(3, 2)),
            Some((7, 3))
        );
        assert_eq!(logical_to_terminal(inner, grid, Position::new(-1, 2)), None);
        assert_eq!(logical_to_terminal(inner, grid, Position::new(9, 9)), Some((19, 10)));
    }

    #[test]
    fn running_frame_shows_score_and_snake() {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test terminal");
        let state = GameState::new_with_seed(
            GridSize {
                width: 20,
                height: 20,
            },
            1,
        );

        terminal
            .draw(|frame| render(frame, &state, &THEME_CLASSIC))
            .expect("draw should succeed");

        let text = screen_text(&terminal);
        assert!(text.contains("Score: 0"));
        assert!(text.contains('█'));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn terminal_frame_shows_game_over_with_final_score() {
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).expect("test terminal");
        let mut state = GameState::new_with_seed(
            GridSize {
                width: 20,
                height: 20,
            },
            2,
        );
        state.snake = Snake::new(Position::new(0, 5), Direction::Left, 1);
        state.score = 30;
        state.tick();

        terminal
            .draw(|frame| render(frame, &state, &THEME_CLASSIC))
            .expect("draw should succeed");

        let text = screen_text(&terminal);
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("Final score: 30"));
    }
}

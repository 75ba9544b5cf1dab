//! Board rendering for the Gomoku GUI

use egui::{Color32, CornerRadius, Painter, Pos2, Rect, Sense, Stroke, Vec2};

use crate::{Board, Pos, Role};

use super::theme::*;

/// Everything the board needs to know about the game besides the stones
pub struct BoardOverlay<'a> {
    pub current_turn: Role,
    /// Role that plays black
    pub black: Role,
    pub last_move: Option<Pos>,
    pub suggested_move: Option<Pos>,
    pub winning_line: Option<&'a [Pos]>,
    pub game_over: bool,
}

/// Board view handles rendering and input for the game board
pub struct BoardView {
    /// Cached cell size for coordinate calculations
    cell_size: f32,
    /// Board drawing area
    board_rect: Rect,
    /// Lines on the current board
    size: usize,
}

impl Default for BoardView {
    fn default() -> Self {
        Self {
            cell_size: 30.0,
            board_rect: Rect::NOTHING,
            size: 15,
        }
    }
}

impl BoardView {
    /// Render the board and return click position if any
    pub fn show(&mut self, ui: &mut egui::Ui, board: &Board, overlay: &BoardOverlay<'_>) -> Option<Pos> {
        let available_size = ui.available_size();
        self.size = board.size();

        // Calculate board size to fit available space
        let board_size = available_size.x.min(available_size.y) - 20.0;
        self.cell_size = (board_size - 2.0 * BOARD_MARGIN) / (self.size as f32 - 1.0);

        let (response, painter) = ui.allocate_painter(Vec2::new(board_size, board_size), Sense::click());

        self.board_rect = response.rect;

        painter.rect_filled(self.board_rect, CornerRadius::same(4), BOARD_BG);

        self.draw_grid(&painter);
        self.draw_star_points(&painter);
        self.draw_coordinates(&painter);
        self.draw_stones(&painter, board, overlay.black);

        if let Some(pos) = overlay.last_move {
            self.draw_last_move_marker(&painter, pos);
        }

        if let Some(line) = overlay.winning_line {
            self.draw_winning_line(&painter, line);
        }

        let turn_is_black = overlay.current_turn == overlay.black;
        if let Some(pos) = overlay.suggested_move {
            self.draw_suggestion(&painter, pos, turn_is_black);
        }

        // Handle hover preview and click
        let mut clicked_pos = None;

        if !overlay.game_over {
            if let Some(board_pos) = response.hover_pos().and_then(|p| self.screen_to_board(p)) {
                let is_valid = board.is_empty(board_pos);
                self.draw_hover_preview(&painter, board_pos, turn_is_black, is_valid);

                if response.clicked() && is_valid {
                    clicked_pos = Some(board_pos);
                }
            }
        }

        clicked_pos
    }

    fn draw_grid(&self, painter: &Painter) {
        let stroke = Stroke::new(GRID_LINE_WIDTH, GRID_LINE);
        let span = (self.size as f32 - 1.0) * self.cell_size;

        for i in 0..self.size {
            let offset = BOARD_MARGIN + i as f32 * self.cell_size;

            // Vertical line
            let start = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN);
            let end = self.board_rect.min + Vec2::new(offset, BOARD_MARGIN + span);
            painter.line_segment([start, end], stroke);

            // Horizontal line
            let start = self.board_rect.min + Vec2::new(BOARD_MARGIN, offset);
            let end = self.board_rect.min + Vec2::new(BOARD_MARGIN + span, offset);
            painter.line_segment([start, end], stroke);
        }
    }

    /// Draw star points (hoshi)
    fn draw_star_points(&self, painter: &Painter) {
        for pos in star_points(self.size) {
            painter.circle_filled(self.board_to_screen(pos), STAR_POINT_RADIUS, STAR_POINT);
        }
    }

    /// Draw coordinate labels, 0-based to match the engine's log output
    fn draw_coordinates(&self, painter: &Painter) {
        let font = egui::FontId::proportional(12.0);
        // Thin out labels when cells get too narrow for them
        let step = (18.0 / self.cell_size).ceil().max(1.0) as usize;

        for i in (0..self.size).step_by(step) {
            let label = i.to_string();
            let along = BOARD_MARGIN + i as f32 * self.cell_size;

            // Columns, top and bottom
            let x = self.board_rect.min.x + along;
            for y in [self.board_rect.min.y + 12.0, self.board_rect.max.y - 12.0] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
            }

            // Rows, left and right
            let y = self.board_rect.min.y + along;
            for x in [self.board_rect.min.x + 12.0, self.board_rect.max.x - 12.0] {
                painter.text(Pos2::new(x, y), egui::Align2::CENTER_CENTER, &label, font.clone(), GRID_LINE);
            }
        }
    }

    fn draw_stones(&self, painter: &Painter, board: &Board, black: Role) {
        for pos in board.positions() {
            match board.get(pos) {
                Role::Empty => {}
                role => self.draw_stone(painter, pos, role == black),
            }
        }
    }

    /// Draw a single stone with visual polish
    fn draw_stone(&self, painter: &Painter, pos: Pos, black: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;
        let shadow_offset = Vec2::new(2.0, 2.0);

        if black {
            painter.circle_filled(
                center + shadow_offset,
                radius,
                Color32::from_rgba_unmultiplied(0, 0, 0, 60),
            );
            painter.circle_filled(center, radius, BLACK_STONE);

            // Highlight
            let highlight_offset = Vec2::new(-radius * 0.3, -radius * 0.3);
            painter.circle_filled(center + highlight_offset, radius * 0.2, BLACK_STONE_HIGHLIGHT);
        } else {
            painter.circle_filled(
                center + shadow_offset,
                radius,
                Color32::from_rgba_unmultiplied(0, 0, 0, 40),
            );
            painter.circle_filled(center, radius, WHITE_STONE);
            painter.circle_stroke(
                center,
                radius * 0.85,
                Stroke::new(radius * 0.1, WHITE_STONE_SHADOW),
            );
        }
    }

    fn draw_last_move_marker(&self, painter: &Painter, pos: Pos) {
        let radius = LAST_MOVE_MARKER_RADIUS.min(self.cell_size * 0.2);
        painter.circle_filled(self.board_to_screen(pos), radius, LAST_MOVE_MARKER);
    }

    /// Draw winning line highlight. Lines longer than five are drawn whole.
    fn draw_winning_line(&self, painter: &Painter, line: &[Pos]) {
        let stroke = Stroke::new(4.0, WIN_HIGHLIGHT);

        for pair in line.windows(2) {
            let start = self.board_to_screen(pair[0]);
            let end = self.board_to_screen(pair[1]);
            painter.line_segment([start, end], stroke);
        }

        let radius = self.cell_size * STONE_RADIUS_RATIO + 3.0;
        for &pos in line {
            painter.circle_stroke(self.board_to_screen(pos), radius, stroke);
        }
    }

    fn draw_suggestion(&self, painter: &Painter, pos: Pos, black: bool) {
        let center = self.board_to_screen(pos);
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let (fill, text) = if black {
            (Color32::from_rgba_unmultiplied(20, 20, 20, 100), WHITE_STONE)
        } else {
            (Color32::from_rgba_unmultiplied(240, 240, 240, 100), BLACK_STONE)
        };

        painter.circle_filled(center, radius, fill);
        painter.text(
            center,
            egui::Align2::CENTER_CENTER,
            "?",
            egui::FontId::proportional(14.0),
            text,
        );
    }

    fn draw_hover_preview(&self, painter: &Painter, pos: Pos, black: bool, is_valid: bool) {
        let radius = self.cell_size * STONE_RADIUS_RATIO;

        let color = match (is_valid, black) {
            (false, _) => hover_invalid(),
            (true, true) => Color32::from_rgba_unmultiplied(20, 20, 20, 80),
            (true, false) => Color32::from_rgba_unmultiplied(240, 240, 240, 80),
        };

        painter.circle_filled(self.board_to_screen(pos), radius, color);
    }

    /// Convert screen coordinates to board position
    pub fn screen_to_board(&self, screen_pos: Pos2) -> Option<Pos> {
        let relative = screen_pos - self.board_rect.min;
        let x = (relative.x - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;
        let y = (relative.y - BOARD_MARGIN + self.cell_size * 0.5) / self.cell_size;

        Pos::checked(x.floor() as i32, y.floor() as i32, self.size)
    }

    /// Convert board position to screen coordinates
    pub fn board_to_screen(&self, pos: Pos) -> Pos2 {
        let x = self.board_rect.min.x + BOARD_MARGIN + pos.x as f32 * self.cell_size;
        let y = self.board_rect.min.y + BOARD_MARGIN + pos.y as f32 * self.cell_size;
        Pos2::new(x, y)
    }
}

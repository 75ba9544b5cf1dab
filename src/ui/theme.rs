//! Theme constants for the Gomoku GUI

use egui::Color32;

use crate::Pos;

// Board colors - warm wood tones
pub const BOARD_BG: Color32 = Color32::from_rgb(222, 184, 135); // Burlywood
pub const GRID_LINE: Color32 = Color32::from_rgb(60, 40, 20);
pub const STAR_POINT: Color32 = Color32::from_rgb(50, 35, 20);

// Stone colors with better contrast
pub const BLACK_STONE: Color32 = Color32::from_rgb(25, 25, 30);
pub const BLACK_STONE_HIGHLIGHT: Color32 = Color32::from_rgb(70, 70, 80);
pub const WHITE_STONE: Color32 = Color32::from_rgb(250, 250, 252);
pub const WHITE_STONE_SHADOW: Color32 = Color32::from_rgb(190, 190, 195);

// Markers
pub const LAST_MOVE_MARKER: Color32 = Color32::from_rgb(230, 60, 60);
pub const WIN_HIGHLIGHT: Color32 = Color32::from_rgb(50, 220, 50);

// Functions for colors that can't be const
pub fn hover_invalid() -> Color32 {
    Color32::from_rgba_unmultiplied(255, 50, 50, 100)
}

// Panel colors - dark modern theme
pub const PANEL_BG: Color32 = Color32::from_rgb(25, 27, 31);
pub const CARD_BG: Color32 = Color32::from_rgb(35, 38, 43);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(240, 240, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 165, 175);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 125, 135);

// Button colors
pub const BUTTON_BG: Color32 = Color32::from_rgb(50, 53, 58);

// Timer colors
pub const TIMER_NORMAL: Color32 = Color32::from_rgb(80, 200, 120);
pub const TIMER_WARNING: Color32 = Color32::from_rgb(255, 180, 50);
pub const TIMER_CRITICAL: Color32 = Color32::from_rgb(255, 70, 70);

// Sizes
pub const BOARD_MARGIN: f32 = 40.0;
pub const STONE_RADIUS_RATIO: f32 = 0.45;
pub const STAR_POINT_RADIUS: f32 = 4.0;
pub const GRID_LINE_WIDTH: f32 = 1.0;
pub const LAST_MOVE_MARKER_RADIUS: f32 = 5.0;

/// Board sizes offered in the menu
pub const BOARD_SIZES: [usize; 4] = [9, 15, 19, 20];

/// Star points (hoshi) for a board of `size` lines.
///
/// Corner points sit 3 lines in (2 on boards under 13); odd sizes add the
/// edge midpoints and the centre.
pub fn star_points(size: usize) -> Vec<Pos> {
    if size < 7 {
        return Vec::new();
    }
    let inset = if size < 13 { 2 } else { 3 };
    let near = inset as u8;
    let far = (size - 1 - inset) as u8;

    let mut lines = vec![near, far];
    if size % 2 == 1 {
        lines.insert(1, (size / 2) as u8);
    }

    let mut points = Vec::with_capacity(lines.len() * lines.len());
    for &y in &lines {
        for &x in &lines {
            points.push(Pos::new(x, y));
        }
    }
    points
}

//! Main application for the Gomoku GUI

use eframe::egui;
use egui::{CentralPanel, Context, CornerRadius, Frame, RichText, SidePanel, TopBottomPanel, Vec2};
use log::info;

use super::board_view::{BoardOverlay, BoardView};
use super::game_state::{GameMode, GameResult, GameState};
use super::theme::*;
use crate::{EngineError, Role};

const DEFAULT_SIZE: usize = 15;

/// Main Gomoku application
pub struct GomokuApp {
    state: GameState,
    board_view: BoardView,
    show_debug: bool,
    board_size: usize,
}

impl GomokuApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Result<Self, EngineError> {
        Ok(Self {
            state: GameState::new(GameMode::default(), DEFAULT_SIZE)?,
            board_view: BoardView::default(),
            show_debug: true,
            board_size: DEFAULT_SIZE,
        })
    }

    /// Replace the current game; the old one stays if the size is rejected
    fn new_game(&mut self, mode: GameMode, size: usize) {
        match GameState::new(mode, size) {
            Ok(state) => {
                info!("new game: {mode:?} on {size}x{size}");
                self.state = state;
                self.board_size = size;
            }
            Err(e) => self.state.message = Some(e.to_string()),
        }
    }

    /// Render the top menu bar
    fn render_menu_bar(&mut self, ctx: &Context) {
        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("Game", |ui| {
                    let size = self.board_size;
                    if ui.button("New Game (PvE - You first)").clicked() {
                        self.new_game(GameMode::PvE { engine_first: false }, size);
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvE - Engine first)").clicked() {
                        self.new_game(GameMode::PvE { engine_first: true }, size);
                        ui.close_menu();
                    }
                    if ui.button("New Game (PvP)").clicked() {
                        self.new_game(GameMode::PvP { show_suggestions: false }, size);
                        ui.close_menu();
                    }
                    ui.separator();
                    if ui.button("Undo").clicked() {
                        self.state.undo();
                        ui.close_menu();
                    }
                });

                ui.menu_button("Board", |ui| {
                    for size in BOARD_SIZES {
                        let label = format!("{size} x {size}");
                        if ui.radio(self.board_size == size, label).clicked() {
                            self.new_game(self.state.mode, size);
                            ui.close_menu();
                        }
                    }
                });

                ui.menu_button("View", |ui| {
                    ui.checkbox(&mut self.show_debug, "Debug Panel (D)");
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mode_text = match self.state.mode {
                        GameMode::PvE { engine_first } => {
                            format!("PvE - You: {}", if engine_first { "White" } else { "Black" })
                        }
                        GameMode::PvP { .. } => "PvP - Hotseat".to_string(),
                    };
                    ui.label(format!("{mode_text}  |  {0}x{0}", self.state.size()));
                });
            });
        });
    }

    /// Render the side panel with game info and debug
    fn render_side_panel(&mut self, ctx: &Context) {
        SidePanel::right("info_panel")
            .min_width(240.0)
            .max_width(280.0)
            .frame(Frame::new().fill(PANEL_BG))
            .show(ctx, |ui| {
                ui.add_space(12.0);

                self.render_title_card(ui);
                ui.add_space(12.0);

                self.render_turn_card(ui);
                ui.add_space(10.0);

                self.render_timer_card(ui);
                ui.add_space(10.0);

                self.render_actions_card(ui);

                if self.show_debug {
                    ui.add_space(10.0);
                    self.render_debug_card(ui);
                }

                if let Some(result) = self.state.game_over.clone() {
                    ui.add_space(10.0);
                    self.render_game_over_card(ui, &result);
                }

                if let Some(msg) = &self.state.message {
                    ui.add_space(10.0);
                    Self::render_message_card(ui, msg);
                }
            });
    }

    /// Helper to create a card frame
    fn card_frame() -> Frame {
        Frame::new()
            .fill(CARD_BG)
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
    }

    fn button_frame() -> Frame {
        Frame::new()
            .fill(BUTTON_BG)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(8.0)
    }

    fn clickable(ui: &mut egui::Ui, text: &str) -> bool {
        ui.add(egui::Label::new(RichText::new(text).size(12.0).color(TEXT_PRIMARY)).sense(egui::Sense::click()))
            .clicked()
    }

    fn render_title_card(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("GOMOKU").size(22.0).strong().color(TEXT_PRIMARY));
        });
        ui.horizontal(|ui| {
            ui.add_space(8.0);
            ui.label(RichText::new("Five in a row").size(11.0).color(TEXT_MUTED));
        });
    }

    /// Name shown for a role, depending on mode
    fn role_label(&self, role: Role) -> &'static str {
        match (self.state.mode, role) {
            (GameMode::PvE { .. }, Role::Engine) => "ENGINE",
            (GameMode::PvE { .. }, _) => "YOU",
            (GameMode::PvP { .. }, _) if self.state.is_black(role) => "BLACK",
            (GameMode::PvP { .. }, _) => "WHITE",
        }
    }

    fn render_turn_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            let turn = self.state.current_turn;
            let is_black = self.state.is_black(turn);
            let (fill, rim) = if is_black {
                (BLACK_STONE, BLACK_STONE_HIGHLIGHT)
            } else {
                (WHITE_STONE, WHITE_STONE_SHADOW)
            };

            ui.horizontal(|ui| {
                let (rect, _) = ui.allocate_exact_size(Vec2::new(48.0, 48.0), egui::Sense::hover());
                ui.painter().circle_filled(rect.center(), 20.0, fill);
                ui.painter().circle_stroke(rect.center(), 20.0, egui::Stroke::new(2.0, rim));

                ui.add_space(12.0);

                ui.vertical(|ui| {
                    ui.add_space(4.0);
                    ui.label(RichText::new(self.role_label(turn)).size(18.0).strong().color(TEXT_PRIMARY));

                    let status = if self.state.is_ai_thinking() {
                        ("Engine thinking...", TIMER_WARNING)
                    } else if self.state.game_over.is_some() {
                        ("Game Over", WIN_HIGHLIGHT)
                    } else {
                        ("Your turn", TIMER_NORMAL)
                    };
                    ui.label(RichText::new(status.0).size(12.0).color(status.1));
                });
            });
        });
    }

    fn render_timer_card(&self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("TIMER").size(10.0).color(TEXT_MUTED));
            ui.add_space(6.0);

            if let Some(elapsed) = self.state.ai_thinking_elapsed() {
                let secs = elapsed.as_secs_f32();
                let color = if secs < 0.3 {
                    TIMER_NORMAL
                } else if secs < 0.5 {
                    TIMER_WARNING
                } else {
                    TIMER_CRITICAL
                };
                ui.label(RichText::new(format!("{secs:.2}s")).size(28.0).strong().color(color));
            } else {
                let elapsed = self.state.move_timer.elapsed();
                ui.label(RichText::new(format!("{:.1}s", elapsed.as_secs_f32())).size(24.0).color(TEXT_PRIMARY));
            }

            if let Some(ai_time) = self.state.move_timer.ai_thinking_time {
                ui.add_space(4.0);
                ui.label(
                    RichText::new(format!("Last engine move: {:.3}s", ai_time.as_secs_f32()))
                        .size(10.0)
                        .color(TEXT_SECONDARY),
                );
            }
        });
    }

    fn render_actions_card(&mut self, ui: &mut egui::Ui) {
        Self::card_frame().show(ui, |ui| {
            ui.label(RichText::new("ACTIONS").size(10.0).color(TEXT_MUTED));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                Self::button_frame().show(ui, |ui| {
                    if Self::clickable(ui, "Undo (U)") {
                        self.state.undo();
                    }
                });

                ui.add_space(4.0);

                if let GameMode::PvP { .. } = self.state.mode {
                    Self::button_frame().show(ui, |ui| {
                        if Self::clickable(ui, "Hint (H)") {
                            self.state.request_suggestion();
                        }
                    });
                }
            });

            ui.add_space(8.0);
            ui.label(
                RichText::new(format!("Move #{}", self.state.move_history.len()))
                    .size(11.0)
                    .color(TEXT_SECONDARY),
            );
        });
    }

    fn render_debug_card(&self, ui: &mut egui::Ui) {
        Frame::new()
            .fill(egui::Color32::from_rgb(30, 33, 38))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.label(RichText::new("ENGINE DEBUG").size(10.0).color(TEXT_MUTED));
                ui.add_space(6.0);

                let Some(result) = &self.state.last_ai_result else {
                    ui.label(RichText::new("No search yet").size(10.0).color(TEXT_MUTED));
                    return;
                };

                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new(format!("{:?}", result.search_type))
                                .size(11.0)
                                .strong()
                                .color(TIMER_NORMAL),
                        );
                        ui.label(RichText::new(format!("Score: {:.1}", result.score)).size(10.0).color(TEXT_SECONDARY));
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::TOP), |ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(format!("{}ms", result.time_ms)).size(10.0).color(TEXT_SECONDARY));
                            ui.label(RichText::new(format!("{} nodes", result.nodes)).size(10.0).color(TEXT_MUTED));
                        });
                    });
                });

                if let Some(pos) = result.best_move {
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new(format!("-> [{}, {}]", pos.x, pos.y))
                            .size(12.0)
                            .strong()
                            .color(WIN_HIGHLIGHT),
                    );
                }
            });
    }

    fn render_game_over_card(&mut self, ui: &mut egui::Ui, result: &GameResult) {
        let (headline, detail) = match result {
            GameResult::Win { winner, .. } => (format!("{} WINS!", self.role_label(*winner)), "by 5-in-a-row"),
            GameResult::Draw => ("DRAW".to_string(), "board is full"),
        };

        Frame::new()
            .fill(egui::Color32::from_rgb(45, 80, 55))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(16.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("GAME OVER").size(12.0).color(egui::Color32::from_rgb(180, 255, 180)));
                    ui.add_space(8.0);
                    ui.label(RichText::new(headline).size(18.0).strong().color(TEXT_PRIMARY));
                    ui.add_space(4.0);
                    ui.label(RichText::new(detail).size(11.0).color(TEXT_SECONDARY));
                    ui.add_space(12.0);

                    Frame::new()
                        .fill(egui::Color32::from_rgb(60, 100, 70))
                        .corner_radius(CornerRadius::same(6))
                        .inner_margin(10.0)
                        .show(ui, |ui| {
                            if Self::clickable(ui, "New Game (N)") {
                                self.state.reset();
                            }
                        });
                });
            });
    }

    fn render_message_card(ui: &mut egui::Ui, msg: &str) {
        Frame::new()
            .fill(egui::Color32::from_rgb(80, 60, 30))
            .corner_radius(CornerRadius::same(8))
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(msg).size(11.0).color(TEXT_PRIMARY));
            });
    }

    fn render_board(&mut self, ctx: &Context) {
        CentralPanel::default().show(ctx, |ui| {
            ui.style_mut().visuals.panel_fill = egui::Color32::from_rgb(40, 42, 46);

            let overlay = BoardOverlay {
                current_turn: self.state.current_turn,
                black: self.state.first_player,
                last_move: self.state.last_move(),
                suggested_move: self.state.suggested_move,
                winning_line: self.state.winning_line(),
                game_over: self.state.game_over.is_some(),
            };
            let clicked = self.board_view.show(ui, self.state.engine.board(), &overlay);

            if let Some(pos) = clicked {
                if let Err(msg) = self.state.try_place_stone(pos) {
                    self.state.message = Some(msg);
                }
            }
        });
    }

    /// Handle keyboard shortcuts
    fn handle_input(&mut self, ctx: &Context) {
        ctx.input(|i| {
            // D - Toggle debug panel
            if i.key_pressed(egui::Key::D) {
                self.show_debug = !self.show_debug;
            }

            // H - Get hint (PvP mode)
            if i.key_pressed(egui::Key::H) {
                if let GameMode::PvP { .. } = self.state.mode {
                    self.state.request_suggestion();
                }
            }

            // U - Undo
            if i.key_pressed(egui::Key::U) {
                self.state.undo();
            }

            // N - New game
            if i.key_pressed(egui::Key::N) {
                self.state.reset();
            }
        });
    }
}

impl eframe::App for GomokuApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        self.state.check_ai_result();

        if self.state.is_ai_turn() && !self.state.is_ai_thinking() && self.state.game_over.is_none() {
            self.state.start_ai_thinking();
        }

        self.render_menu_bar(ctx);
        self.render_side_panel(ctx);
        self.render_board(ctx);

        if self.state.is_ai_thinking() {
            ctx.request_repaint();
        }
    }
}

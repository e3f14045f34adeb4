use crate::config;
use crate::export;
use crate::filter::Filter;
use crate::game::{GameSession, Phase};
use crate::player::Player;
use crate::response::Geometry;
use crate::ui;
use std::time::Duration;

pub const MIN_FREQ: f32 = 20.0;
pub const MAX_FREQ: f32 = 20480.0;
pub const GRAPH_MIN_DB: f32 = -12.0;
pub const GRAPH_MAX_DB: f32 = 12.0;
pub const GAIN_MIN_DB: i32 = 3;
pub const GAIN_MAX_DB: i32 = 8;
// a fine grid for dialing in narrow resonances
pub const RESONANCE_BANDS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Trainer,
    Resonance,
}

pub struct EarqApp {
    session: GameSession,
    player: Player,
    screen: Screen,
    resonance_filters: Vec<Filter>,
}

impl EarqApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let geometry = Geometry {
            width: 1280.0,
            height: 800.0,
            min_freq: MIN_FREQ,
            max_freq: MAX_FREQ,
            bands: config::load_bands(),
            min_db: GRAPH_MIN_DB,
            max_db: GRAPH_MAX_DB,
        };
        let session = GameSession::new(geometry, GAIN_MIN_DB, GAIN_MAX_DB, true)
            .expect("valid default geometry");

        Self {
            session,
            player: Player::new(),
            screen: Screen::Trainer,
            resonance_filters: vec![
                Filter::peaking(3000.0, -3.0, 5.0),
                Filter::peaking(9000.0, -2.0, 5.0),
                Filter::peaking(15000.0, -1.0, 5.0),
            ],
        }
    }

    /// The filter set the A/B toggle applies on the current screen.
    fn active_filters(&self) -> Vec<Filter> {
        match self.screen {
            Screen::Trainer => vec![*self.session.target()],
            Screen::Resonance => self.resonance_filters.clone(),
        }
    }

    fn player_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Track");
        if ui.button("Open track...").clicked() {
            let picked = rfd::FileDialog::new()
                .add_filter("Audio", &["mp3", "wav", "ogg", "flac", "m4a", "aac"])
                .pick_file();
            if let Some(path) = picked {
                if let Err(e) = self.player.load(&path) {
                    eprintln!("Failed to load {}: {}", path.display(), e);
                }
            }
        }

        if !self.player.is_loaded() {
            ui.label("No track loaded");
            return;
        }

        if let Some(name) = &self.player.track_name {
            ui.label(name);
        }

        ui.horizontal(|ui| {
            let label = if self.player.playing { "Pause" } else { "Play" };
            if ui.button(label).clicked() {
                self.player.toggle_play();
            }

            let eq_label = if self.player.filtering {
                "EQ: on"
            } else {
                "EQ: off"
            };
            if ui.button(eq_label).clicked() {
                let filters = self.active_filters();
                self.player.toggle_filter(&filters);
            }
        });

        let duration = self.player.duration_secs();
        let mut position = self.player.position_secs();
        ui.horizontal(|ui| {
            ui.label(ui::format_time(position));
            if ui
                .add(egui::Slider::new(&mut position, 0.0..=duration).show_value(false))
                .changed()
            {
                self.player.seek_to(position);
            }
            ui.label(ui::format_time(duration));
        });
    }

    fn trainer_sidebar(&mut self, ui: &mut egui::Ui) {
        ui.heading("Difficulty");
        ui.horizontal(|ui| {
            let bands = self.session.geometry().bands;
            if ui.button("-").clicked() && bands > 2 {
                self.change_bands(bands - 1);
            }
            ui.label(format!("{} ranges", bands - 1));
            if ui.button("+").clicked() {
                self.change_bands(bands + 1);
            }
        });

        ui.separator();

        let label = match self.session.phase() {
            Phase::Guessing => "Submit",
            Phase::Revealed => "Next round",
        };
        let has_answer = !self.session.board().answers().is_empty();
        if ui.add_enabled(has_answer, egui::Button::new(label)).clicked() {
            if let Err(e) = self.session.submit() {
                eprintln!("Failed to advance round: {}", e);
            }
            // the reveal or the new round may have changed the target
            self.player.set_filters(&[*self.session.target()]);
        }
    }

    fn change_bands(&mut self, bands: usize) {
        if let Err(e) = self.session.set_bands(bands) {
            eprintln!("Failed to change band count: {}", e);
            return;
        }
        config::save_bands(bands);
        self.player.set_filters(&[*self.session.target()]);
    }

    fn resonance_sidebar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Resonances");
        if ui::resonance_controls(ui, &mut self.resonance_filters) {
            self.player.set_filters(&self.resonance_filters);
        }

        ui.separator();
        if ui.button("Copy as EqualizerAPO").clicked() {
            ctx.copy_text(export::export_filters_apo(&self.resonance_filters, 0.0));
        }
    }

    fn graph_area(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());

        match self.screen {
            Screen::Trainer => {
                if let Err(e) = self.session.resize(size.x, size.y) {
                    eprintln!("Failed to relayout regions: {}", e);
                }
                let geo = *self.session.geometry();
                let filters = self.session.board().visible_filters();
                ui::draw_graph(ui.painter(), rect, &geo, &filters);
                ui::region_overlay(ui, rect, &geo, self.session.board_mut());
            }
            Screen::Resonance => {
                let geo = Geometry {
                    width: size.x,
                    height: size.y,
                    min_freq: MIN_FREQ,
                    max_freq: MAX_FREQ,
                    bands: RESONANCE_BANDS,
                    min_db: GRAPH_MIN_DB,
                    max_db: GRAPH_MAX_DB,
                };
                ui::draw_graph(ui.painter(), rect, &geo, &self.resonance_filters);
            }
        }
    }
}

impl eframe::App for EarqApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.player.playing {
            // keep the transport readout moving
            ctx.request_repaint_after(Duration::from_millis(100));
            if self.player.at_end() {
                self.player.pause();
            }
        }

        egui::SidePanel::right("sidebar")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.selectable_value(&mut self.screen, Screen::Trainer, "Trainer");
                    ui.selectable_value(&mut self.screen, Screen::Resonance, "Resonance");
                });
                ui.separator();

                match self.screen {
                    Screen::Trainer => self.trainer_sidebar(ui),
                    Screen::Resonance => self.resonance_sidebar(ui, ctx),
                }

                ui.separator();
                self.player_controls(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.graph_area(ui);
        });
    }
}

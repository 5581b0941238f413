//! Interactive viewer for a scenario
//!
//! Draws the potential and the particle riding on it. The scenario file is
//! watched and reloaded on change; the force toggles and the speed slider
//! rebuild the integrator without touching the particle's state. The
//! scenario's time step survives until the speed slider is moved.

use crate::controls;
use eframe::egui;
use langevin_core::{
    build_simulation_context_from_source, step_simulation, Potential, SimulationContext,
};
use notify::{Event, RecommendedWatcher, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;

/// Horizontal extent of the plot in world units
const X_RANGE: f64 = 1.6;
const CURVE_SAMPLES: usize = 240;

const CURVE_COLOR: egui::Color32 = egui::Color32::from_rgb(0x58, 0xC4, 0xDD);
const PARTICLE_COLOR: egui::Color32 = egui::Color32::from_rgb(0xFC, 0x62, 0x55);

pub struct ViewApp {
    source_path: PathBuf,
    sim: Option<SimulationContext>,
    last_error: Option<String>,
    warnings: Vec<String>,
    playing: bool,
    steps_per_frame: usize,
    friction: bool,
    noise: bool,
    speed_index: i32,
    #[allow(dead_code)] // Kept alive to maintain file watching
    file_watcher: Option<RecommendedWatcher>,
    file_receiver: mpsc::Receiver<notify::Result<Event>>,
}

impl ViewApp {
    pub fn new(source_path: PathBuf, _cc: &eframe::CreationContext<'_>) -> Self {
        // Watcher events carry absolute paths
        let source_path = source_path.canonicalize().unwrap_or(source_path);
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |res| {
            // The receiver is gone during shutdown
            let _ = tx.send(res);
        })
        .ok();

        if let Some(ref mut w) = watcher {
            if let Err(e) = w.watch(&source_path, notify::RecursiveMode::NonRecursive) {
                log::warn!("not watching {}: {}", source_path.display(), e);
            }
        }

        let mut app = Self {
            source_path,
            sim: None,
            last_error: None,
            warnings: Vec::new(),
            playing: false,
            steps_per_frame: 1,
            friction: true,
            noise: true,
            speed_index: 0,
            file_watcher: watcher,
            file_receiver: rx,
        };

        app.reload();
        app
    }

    fn reload(&mut self) {
        let built = std::fs::read_to_string(&self.source_path)
            .map_err(|e| e.to_string())
            .and_then(|source| {
                build_simulation_context_from_source(&source).map_err(|e| e.to_string())
            });

        match built {
            Ok((sim, diagnostics)) => {
                let forces = sim.config.forces;
                self.friction = forces.friction_enabled;
                self.noise = forces.noise_enabled;
                self.speed_index = controls::index_from_time_step(forces.dt);
                self.warnings = diagnostics.iter().map(|d| d.to_string()).collect();
                self.sim = Some(sim);
                self.last_error = None;
                log::info!("loaded {}", self.source_path.display());
            }
            Err(e) => {
                self.last_error = Some(e);
                self.sim = None;
                self.playing = false;
            }
        }
    }

    fn check_file_changes(&mut self) {
        let mut needs_reload = false;
        while let Ok(event) = self.file_receiver.try_recv() {
            match event {
                Ok(Event {
                    kind: notify::EventKind::Modify(_),
                    paths,
                    ..
                }) => {
                    if paths.contains(&self.source_path) {
                        needs_reload = true;
                    }
                }
                Ok(_) => {}
                Err(e) => log::warn!("file watcher error: {}", e),
            }
        }

        if needs_reload {
            self.reload();
        }
    }

    /// Rebuild the integrator from the current toggles
    ///
    /// `moved_speed` is set only when the speed slider itself changed.
    fn apply_controls(&mut self, moved_speed: Option<i32>) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        let forces = controls::forces_from_controls(
            sim.config.forces,
            self.friction,
            self.noise,
            moved_speed,
        );
        if let Err(e) = sim.reconfigure(forces) {
            self.last_error = Some(e.to_string());
        }
    }

    fn advance(&mut self) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        for _ in 0..self.steps_per_frame {
            match step_simulation(sim) {
                Ok(false) => {}
                Ok(true) => {
                    self.playing = false;
                    break;
                }
                Err(e) => {
                    self.last_error = Some(format!("{}; reset to continue", e));
                    self.playing = false;
                    break;
                }
            }
        }
    }

    fn draw_scene(&self, ui: &mut egui::Ui) {
        let Some(sim) = self.sim.as_ref() else {
            return;
        };
        let rect = ui.max_rect();
        let potential = sim.potential();

        let xs: Vec<f64> = (0..=CURVE_SAMPLES)
            .map(|i| -X_RANGE + 2.0 * X_RANGE * i as f64 / CURVE_SAMPLES as f64)
            .collect();
        let ys: Vec<f64> = xs.iter().map(|&x| potential.potential(x)).collect();
        let y_min = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let y_max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = 0.1 * (y_max - y_min).max(1e-6);
        let (y_low, y_high) = (y_min - pad, y_max + pad);

        let to_screen = |x: f64, y: f64| {
            let sx = rect.left() + ((x + X_RANGE) / (2.0 * X_RANGE)) as f32 * rect.width();
            let sy = rect.bottom() - ((y - y_low) / (y_high - y_low)) as f32 * rect.height();
            egui::pos2(sx, sy)
        };

        let painter = ui.painter();
        let curve: Vec<egui::Pos2> = xs
            .iter()
            .zip(&ys)
            .map(|(&x, &y)| to_screen(x, y))
            .collect();
        painter.add(egui::Shape::line(curve, egui::Stroke::new(2.0, CURVE_COLOR)));

        let x = sim.state.position;
        if x.abs() <= X_RANGE {
            let center = to_screen(x, potential.potential(x));
            painter.circle_filled(center, 8.0, PARTICLE_COLOR);
        }

        painter.text(
            rect.left_top() + egui::vec2(8.0, 8.0),
            egui::Align2::LEFT_TOP,
            format!(
                "x = {:+.4}   v = {:+.4}   E = {:+.5}",
                sim.state.position,
                sim.state.velocity,
                sim.energy()
            ),
            egui::FontId::monospace(14.0),
            egui::Color32::WHITE,
        );
    }
}

impl eframe::App for ViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_file_changes();

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button(if self.playing { "⏸ Pause" } else { "▶ Play" }).clicked() {
                    self.playing = !self.playing;
                }

                if ui.button("⏮ Reset").clicked() {
                    if let Some(sim) = self.sim.as_mut() {
                        sim.reset();
                    }
                    self.last_error = None;
                    self.playing = false;
                }

                if ui.button("⏭ Step").clicked() {
                    let saved = self.steps_per_frame;
                    self.steps_per_frame = 1;
                    self.advance();
                    self.steps_per_frame = saved;
                }

                ui.separator();

                if ui.button("Call").clicked() {
                    if let Some(sim) = self.sim.as_mut() {
                        let strength = sim.config.call_strength;
                        sim.call(strength);
                    }
                }

                ui.separator();

                let mut changed = ui.checkbox(&mut self.friction, "Friction").changed();
                changed |= ui.checkbox(&mut self.noise, "Noise").changed();
                let speed = egui::Slider::new(&mut self.speed_index, controls::SPEED_INDEX_RANGE)
                    .text("speed");
                let moved_speed = ui.add(speed).changed().then_some(self.speed_index);
                if changed || moved_speed.is_some() {
                    self.apply_controls(moved_speed);
                }

                ui.add(egui::Slider::new(&mut self.steps_per_frame, 1..=20).text("steps/frame"));

                ui.separator();

                if let Some(sim) = self.sim.as_ref() {
                    ui.label(format!(
                        "Step: {} / {}   dt = {:.4}",
                        sim.current_step,
                        sim.max_steps,
                        sim.integrator.config().dt
                    ));
                }
            });
        });

        if self.last_error.is_some() || !self.warnings.is_empty() {
            egui::TopBottomPanel::bottom("diagnostics").show(ctx, |ui| {
                ui.set_max_height(100.0);
                if let Some(ref error) = self.last_error {
                    ui.label(
                        egui::RichText::new(format!("Error: {}", error)).color(egui::Color32::RED),
                    );
                }
                for warning in &self.warnings {
                    ui.label(egui::RichText::new(warning).color(egui::Color32::YELLOW));
                }
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_scene(ui);
        });

        if self.playing {
            self.advance();
            ctx.request_repaint();
        }
    }
}

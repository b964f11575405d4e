//! Interactive host view for the morphing point cloud, built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns the animation state and
//! implements [`eframe::App`] to tick it once per repaint, draw the live
//! points and expose the point count and transition length as controls.

use eframe::App;
use glam::Vec2;
use morph_core::{
    colormap::Rgba,
    config::Config,
    morph::Morph,
    projection::Viewport,
    scheduler::Frame,
    types::{MAX_COUNT, MIN_COUNT},
};

/// Size used until the central panel has been measured once.
const INITIAL_VIEWPORT: (f32, f32) = (800.0, 600.0);

/// Main application state for the viewer.
///
/// [`Viewer`] glues together:
/// - The animation state ([`Morph`]), ticked from [`App::update`].
/// - UI-side copies of the controls (count, steps per transition).
/// - eframe/egui callbacks for drawing.
///
/// The typical per-frame update is:
/// 1. If `running` is `true` and a frame interval has passed, call [`Morph::tick`].
/// 2. Handle UI interactions (count, steps, resize).
/// 3. Draw the snapshot and request the next repaint while running.
///
/// ### Fields
/// - `state` - Animation state; only this viewer mutates it.
/// - `cfg` - Configuration the state was built from.
/// - `running` - Whether the animation advances on each repaint.
/// - `last_tick_time` - egui time stamp of the last tick (seconds).
/// - `count` - Point count shown on the slider.
/// - `steps` - Steps per transition shown on the slider.
/// - `viewport` - Last central panel size pushed into the state.
pub struct Viewer {
    state: Morph,
    cfg: Config,

    running: bool,
    last_tick_time: f64,

    count: usize,
    steps: u32,
    viewport: Viewport,
}

impl Viewer {
    /// Builds the animation state for the default viewport size.
    ///
    /// The animation starts running; the first repaint performs the first tick.
    pub fn new(cfg: Config) -> morph_core::Result<Self> {
        let viewport = Viewport::new(INITIAL_VIEWPORT.0, INITIAL_VIEWPORT.1)?;
        let state = Morph::new(&cfg, viewport)?;
        let count = state.count();

        Ok(Self {
            state,
            steps: cfg.steps_per_transition,
            cfg,
            running: true,
            last_tick_time: f64::NEG_INFINITY,
            count,
            viewport,
        })
    }

    /// Starts or stops advancing the animation.
    ///
    /// While stopped the last drawn positions stay on screen.
    pub fn set_running(&mut self, running: bool) {
        if running != self.running {
            tracing::info!(running, tick = self.state.scheduler().ticks(), "animation toggled");
        }
        self.running = running;
    }

    /// Ticks at most once if at least one frame interval passed since the last tick.
    ///
    /// Late repaints are not made up; each tick is one logical step.
    ///
    /// ### Parameters
    /// - `now` - Current egui time in seconds.
    ///
    /// ### Returns
    /// The frame produced, or `None` if paused or too early.
    fn step_frame(&mut self, now: f64) -> Option<Frame> {
        if !self.running {
            return None;
        }
        if now - self.last_tick_time < self.cfg.frame_interval.as_secs_f64() {
            return None;
        }
        self.last_tick_time = now;
        Some(self.state.tick())
    }

    /// Pushes the slider count into the animation state.
    fn apply_count(&mut self) {
        self.count = self.state.set_count(self.count);
    }

    fn apply_steps(&mut self) {
        if let Err(err) = self.state.set_steps_per_transition(self.steps) {
            tracing::error!(%err, steps = self.steps, "steps change dropped");
        }
    }

    fn reset_clock(&mut self) {
        self.state.reset_clock();
    }

    /// Re-projects the anchors if the drawing area changed size.
    ///
    /// Zero-sized areas (e.g. a minimized window) are ignored.
    fn sync_viewport(&mut self, size: egui::Vec2) {
        let Ok(viewport) = Viewport::new(size.x, size.y) else {
            return;
        };
        if viewport == self.viewport {
            return;
        }
        self.state.set_viewport(viewport);
        self.viewport = viewport;
    }

    /// Converts a core pixel position into egui screen-space inside `rect`.
    fn to_screen(p: Vec2, rect: egui::Rect) -> egui::Pos2 {
        rect.min + egui::vec2(p.x, p.y)
    }

    fn to_color32(c: Rgba) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
    }

    fn last_frame(&self) -> Option<Frame> {
        self.state.last_frame()
    }

    /// Builds the top panel UI (run controls).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.set_running(!self.running);
                }

                if ui.button("⟲ Restart tour").clicked() {
                    self.reset_clock();
                }
            });
        });
    }

    /// Builds the bottom status bar (tick, current transition, blend).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        let frame = self.last_frame();
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("points = {}", self.count));
                ui.separator();
                if let Some(f) = frame {
                    ui.label(format!("blend = {:.3}", f.blend));
                    ui.label(format!("{} → {}", f.current, f.next));
                    ui.label(format!("step = {}/{}", f.clock.step_index, self.steps));
                    ui.label(format!("tick = {}", f.tick));
                }
            });
        });
    }

    /// Builds the right-hand panel with the point count and timing controls.
    fn ui_config_panel(&mut self, ctx: &egui::Context) {
        egui::SidePanel::right("config_panel")
            .resizable(true)
            .default_width(220.0)
            .show(ctx, |ui| {
                ui.heading("Config");

                ui.separator();
                let count = ui.add(
                    egui::Slider::new(&mut self.count, MIN_COUNT..=MAX_COUNT)
                        .logarithmic(true)
                        .text("points"),
                );
                if count.changed() {
                    self.apply_count();
                }

                let steps = ui.add(egui::Slider::new(&mut self.steps, 1..=600).text("steps"));
                if steps.changed() {
                    self.apply_steps();
                }

                ui.separator();
                ui.label("Tour");
                let current = self.last_frame().map(|f| f.clock.cycle_position);
                for (i, kind) in self.cfg.cycle.iter().enumerate() {
                    let marker = if Some(i) == current { "▶" } else { " " };
                    ui.monospace(format!("{marker} {i}: {kind}"));
                }

                ui.separator();
                if ui.button("Reset to defaults").clicked() {
                    let defaults = Config::default();
                    self.count = defaults.count;
                    self.steps = defaults.steps_per_transition;
                    self.apply_count();
                    self.apply_steps();
                }
            });
    }

    /// Builds the central panel where the points are drawn.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let response = ui.allocate_response(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            self.sync_viewport(rect.size());

            let painter = ui.painter_at(rect);
            let radius = self.state.point_radius();
            for p in self.state.snapshot() {
                painter.circle_filled(Self::to_screen(p.pos, rect), radius, Self::to_color32(p.color));
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.step_frame(now);

        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_config_panel(ctx);
        self.ui_central_panel(ctx);

        if self.running {
            ctx.request_repaint();
        }
    }
}

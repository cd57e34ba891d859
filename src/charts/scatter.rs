//! Scatter plot renderer.
//!
//! Draws per-point glyphs (rectangle or bubble) from two parallel
//! numeric sequences. Before drawing, a spreading transform nudges
//! coincident points apart; the transform works on a per-frame copy, so
//! the source data is never mutated.

use crate::canvas::TextAlign;
use crate::charts::frame::{Frame, FrameOptions};
use crate::charts::hooks::ChartHooks;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::render::{draw_circle, draw_rect};

/// Glyph drawn for each point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointKind {
    /// A filled rectangle.
    Rect,
    /// A filled circle.
    #[default]
    Bubble,
}

/// Scatter plot construction options.
#[derive(Debug, Clone)]
pub struct ScatterConfig {
    /// Chart title.
    pub title: String,
    /// Chart description.
    pub description: String,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates, parallel to `x`.
    pub y: Vec<f64>,
    /// Glyph color.
    pub color: Rgba,
    /// Glyph shape.
    pub point_kind: PointKind,
    /// Sets rectangle dimensions and bubble radius at once when given.
    pub point_size: Option<f64>,
    /// Rectangle glyph width.
    pub rect_width: u32,
    /// Rectangle glyph height.
    pub rect_height: u32,
    /// Bubble glyph radius.
    pub bubble_radius: f64,
    /// Whether horizontal scale labels are drawn.
    pub scales_horizontal: bool,
    /// Whether vertical scale labels are drawn.
    pub scales_vertical: bool,
    /// Shared frame appearance and timing options.
    pub frame: FrameOptions,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self {
            title: "Scatter plot".to_string(),
            description: String::new(),
            width: 600,
            height: 400,
            x: Vec::new(),
            y: Vec::new(),
            color: Rgba::rgb(173, 216, 230),
            point_kind: PointKind::default(),
            point_size: None,
            rect_width: 50,
            rect_height: 50,
            bubble_radius: 10.0,
            scales_horizontal: true,
            scales_vertical: true,
            frame: FrameOptions::default(),
        }
    }
}

/// Scatter plot instance.
pub struct ScatterChart {
    frame: Frame,
    config: ScatterConfig,
    hooks: ChartHooks,
}

impl ScatterChart {
    /// Build a scatter plot.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when either sequence is empty and
    /// [`Error::DataLengthMismatch`] when their lengths differ.
    pub fn new(config: ScatterConfig) -> Result<Self> {
        Self::with_hooks(config, ChartHooks::default())
    }

    /// Build a scatter plot with lifecycle hooks attached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ScatterChart::new`].
    pub fn with_hooks(mut config: ScatterConfig, mut hooks: ChartHooks) -> Result<Self> {
        if let Some(f) = hooks.on_init.as_mut() {
            f();
        }

        if config.x.is_empty() || config.y.is_empty() {
            return Err(Error::EmptyData);
        }
        if config.x.len() != config.y.len() {
            return Err(Error::DataLengthMismatch {
                x_len: config.x.len(),
                y_len: config.y.len(),
            });
        }

        if let Some(size) = config.point_size {
            config.rect_width = size.max(1.0) as u32;
            config.rect_height = size.max(1.0) as u32;
            config.bubble_radius = size;
        }

        let frame = Frame::new(
            config.width,
            config.height,
            config.title.clone(),
            config.description.clone(),
            config.frame.clone(),
        )?;

        let mut chart = Self {
            frame,
            config,
            hooks,
        };
        chart.tick();

        if let Some(f) = chart.hooks.on_create.as_mut() {
            f();
        }
        Ok(chart)
    }

    /// Number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.config.x.len()
    }

    /// Nudge coincident points apart. Returns transformed copies of the
    /// coordinate sequences; the configured data is untouched.
    #[must_use]
    pub fn spread_points(&self) -> (Vec<f64>, Vec<f64>) {
        let spread = |values: &[f64]| -> Vec<f64> {
            let factor = self.config.bubble_radius * 2.0;
            values
                .iter()
                .map(|&v| v + ((v - factor).abs() * factor).floor())
                .collect()
        };
        (spread(&self.config.x), spread(&self.config.y))
    }

    /// Render one frame.
    pub fn tick(&mut self) {
        if !self.frame.begin_tick() {
            return;
        }
        self.render_marks();
    }

    /// Synchronously render a fresh frame.
    pub fn redraw(&mut self) {
        if !self.frame.is_active() {
            return;
        }
        if let Some(f) = self.hooks.on_before_render.as_mut() {
            f();
        }
        self.tick();
        if let Some(f) = self.hooks.on_after_render.as_mut() {
            f();
        }
        if let Some(f) = self.hooks.on_redraw.as_mut() {
            f();
        }
    }

    /// Make the chart visible.
    pub fn show(&mut self) {
        self.frame.show();
        if let Some(f) = self.hooks.on_show.as_mut() {
            f();
        }
    }

    /// Hide the chart.
    pub fn hide(&mut self) {
        self.frame.hide();
        if let Some(f) = self.hooks.on_hide.as_mut() {
            f();
        }
    }

    /// Stop the render loop and tear the chart down.
    pub fn destroy(&mut self) {
        self.frame.deactivate();
        if let Some(f) = self.hooks.on_destroy.as_mut() {
            f();
        }
    }

    /// The render chassis (canvas, camera, input).
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Mutable access to the render chassis.
    pub fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn render_marks(&mut self) {
        self.draw_scales();

        let (xs, ys) = self.spread_points();
        let color = self.config.color;
        let kind = self.config.point_kind;
        let rect_w = self.config.rect_width;
        let rect_h = self.config.rect_height;
        let radius = self.config.bubble_radius.max(0.0) as i32;

        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let (sx, sy) = self.frame.screen(x, y);
            match kind {
                PointKind::Rect => {
                    draw_rect(
                        self.frame.canvas_mut().framebuffer_mut(),
                        sx,
                        sy,
                        rect_w,
                        rect_h,
                        color,
                    );
                }
                PointKind::Bubble => {
                    draw_circle(
                        self.frame.canvas_mut().framebuffer_mut(),
                        sx,
                        sy,
                        radius,
                        color,
                    );
                }
            }
        }
    }

    /// Scale labels stepped by magnitude: dense near the origin, sparse
    /// further out.
    fn draw_scales(&mut self) {
        let width = f64::from(self.frame.width());
        let height = f64::from(self.frame.height());
        let radius = self.config.bubble_radius;
        let size = 12.0;
        let color = self.frame.options.text_color;

        if self.config.scales_horizontal {
            let label_y = self.frame.camera.y + height - 10.0;
            let end = self.frame.camera.x + width;
            let mut w = -width;
            while w < end {
                let value = w / (0.65 + radius);
                self.frame.write_label(
                    format!("{value:.0}"),
                    w,
                    label_y,
                    size,
                    color,
                    TextAlign::Center,
                );
                w += label_step(w);
            }
        }

        if self.config.scales_vertical {
            let label_x = self.frame.camera.x + 25.0;
            let end = self.frame.camera.y + height;
            let mut h = -height;
            while h < end {
                let value = h / (3.5 + radius);
                self.frame.write_label(
                    format!("{value:.0}"),
                    label_x,
                    h,
                    size,
                    color,
                    TextAlign::Center,
                );
                h += label_step(h);
            }
        }
    }
}

/// Distance to the next scale label from the given position.
fn label_step(position: f64) -> f64 {
    if position.abs() < 10.0 {
        10.0
    } else {
        40.0
    }
}

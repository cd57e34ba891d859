//! Gaussian curve renderer.
//!
//! Plots the normal density of its data: for each value, a column whose
//! height is the density at that value given the sample mean and
//! standard deviation. Axis ticks cover a fixed 0-10 x display domain
//! (0-1 for y) unless scale overrides are supplied, independent of the
//! actual data range.

use crate::canvas::TextAlign;
use crate::charts::frame::{Frame, FrameOptions};
use crate::charts::hooks::ChartHooks;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::render::{draw_line, draw_rect, draw_rect_outline};
use crate::stats::{gaussian_curve, gaussian_density, mean, std_dev};

/// Gaussian curve construction options.
#[derive(Debug, Clone)]
pub struct GaussConfig {
    /// Chart title.
    pub title: String,
    /// Chart description.
    pub description: String,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// The numeric sequence to fit; needs at least two values.
    pub data: Vec<f64>,
    /// Column fill color.
    pub back_color: Rgba,
    /// Column outline color.
    pub fore_color: Rgba,
    /// X axis caption.
    pub label_x: String,
    /// Y axis caption.
    pub label_y: String,
    /// Axis caption color.
    pub label_color: Rgba,
    /// Scale tick color.
    pub scale_color: Rgba,
    /// Lower end of the x display domain (default 0).
    pub min_x_scale: Option<f64>,
    /// Upper end of the x display domain (default 10).
    pub max_x_scale: Option<f64>,
    /// Lower end of the y display domain (default 0).
    pub min_y_scale: Option<f64>,
    /// Upper end of the y display domain (default 1).
    pub max_y_scale: Option<f64>,
    /// Screen position of the axis baseline.
    pub axis_baseline: f64,
    /// Shared frame appearance and timing options.
    pub frame: FrameOptions,
}

impl Default for GaussConfig {
    fn default() -> Self {
        Self {
            title: "Gaussian curve".to_string(),
            description: String::new(),
            width: 600,
            height: 400,
            data: Vec::new(),
            back_color: Rgba::rgb(0, 128, 0),
            fore_color: Rgba::BLUE,
            label_x: String::new(),
            label_y: String::new(),
            label_color: Rgba::BLACK,
            scale_color: Rgba::BLACK,
            min_x_scale: None,
            max_x_scale: None,
            min_y_scale: None,
            max_y_scale: None,
            axis_baseline: 557.0,
            frame: FrameOptions::default(),
        }
    }
}

/// Gaussian curve chart instance.
pub struct GaussChart {
    frame: Frame,
    config: GaussConfig,
    data_mean: f64,
    data_std: f64,
    hooks: ChartHooks,
}

impl GaussChart {
    /// Build a Gaussian curve chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] when fewer than two values
    /// are configured (the column width divides by n - 1).
    pub fn new(config: GaussConfig) -> Result<Self> {
        Self::with_hooks(config, ChartHooks::default())
    }

    /// Build a Gaussian curve chart with lifecycle hooks attached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`GaussChart::new`].
    pub fn with_hooks(config: GaussConfig, mut hooks: ChartHooks) -> Result<Self> {
        if let Some(f) = hooks.on_init.as_mut() {
            f();
        }

        if config.data.len() < 2 {
            return Err(Error::InsufficientData {
                needed: 2,
                got: config.data.len(),
            });
        }

        let frame = Frame::new(
            config.width,
            config.height,
            config.title.clone(),
            config.description.clone(),
            config.frame.clone(),
        )?;

        let (data_mean, data_std) = moments(&config.data);
        let mut chart = Self {
            frame,
            config,
            data_mean,
            data_std,
            hooks,
        };
        chart.tick();

        if let Some(f) = chart.hooks.on_create.as_mut() {
            f();
        }
        Ok(chart)
    }

    /// The sample mean the curve is centered on.
    #[must_use]
    pub fn data_mean(&self) -> f64 {
        self.data_mean
    }

    /// The sample standard deviation shaping the curve.
    #[must_use]
    pub fn data_std(&self) -> f64 {
        self.data_std
    }

    /// The raw values.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.config.data
    }

    /// The density of every configured value, via the array-level
    /// helper with its fixed placeholder parameters (sigma 3,
    /// mean 100). See [`gaussian_curve`].
    #[must_use]
    pub fn density_curve(&self) -> Vec<f64> {
        gaussian_curve(&self.config.data)
    }

    /// Replace the data and recompute the sample moments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InsufficientData`] for fewer than two values;
    /// the previous data is kept in that case.
    pub fn set_data(&mut self, data: Vec<f64>) -> Result<()> {
        if data.len() < 2 {
            return Err(Error::InsufficientData {
                needed: 2,
                got: data.len(),
            });
        }
        let (data_mean, data_std) = moments(&data);
        self.data_mean = data_mean;
        self.data_std = data_std;
        self.config.data = data;
        Ok(())
    }

    /// The x display domain: configured overrides, else 0-10.
    #[must_use]
    pub fn x_domain(&self) -> (f64, f64) {
        (
            self.config.min_x_scale.unwrap_or(0.0),
            self.config.max_x_scale.unwrap_or(10.0),
        )
    }

    /// The y display domain: configured overrides, else 0-1.
    #[must_use]
    pub fn y_domain(&self) -> (f64, f64) {
        (
            self.config.min_y_scale.unwrap_or(0.0),
            self.config.max_y_scale.unwrap_or(1.0),
        )
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
        let width = f64::from(self.frame.width());
        let height = f64::from(self.frame.height());

        if self.data_std > 0.0 {
            self.draw_columns(width, height);
        } else {
            tracing::debug!("zero standard deviation, skipping density columns");
        }
        self.draw_axis_captions(height);
        self.draw_scales(width, height);
    }

    fn draw_columns(&mut self, width: f64, height: f64) {
        let n = self.config.data.len();
        let col_width = width / (n - 1) as f64;
        let values = self.config.data.clone();

        for (i, &value) in values.iter().enumerate() {
            let density = gaussian_density(value, self.data_std, self.data_mean);
            let col_height = density * height;
            let x = i as f64 * col_width;
            let y = height - col_height;

            let (sx, sy) = self.frame.screen(x, y);
            let w = col_width.max(1.0) as u32;
            let h = col_height.max(0.0) as u32;
            draw_rect(
                self.frame.canvas_mut().framebuffer_mut(),
                sx,
                sy,
                w,
                h,
                self.config.back_color,
            );
            draw_rect_outline(
                self.frame.canvas_mut().framebuffer_mut(),
                sx,
                sy,
                w,
                h,
                self.config.fore_color,
                1,
            );
        }
    }

    fn draw_axis_captions(&mut self, height: f64) {
        let color = self.config.label_color;
        if !self.config.label_x.is_empty() {
            let caption = self.config.label_x.clone();
            self.frame
                .write_label(caption, 190.0, height + 90.0, 14.0, color, TextAlign::Left);
        }
        if !self.config.label_y.is_empty() {
            let caption = self.config.label_y.clone();
            self.frame
                .write_label(caption, -80.0, 80.0, 14.0, color, TextAlign::Left);
        }
    }

    fn draw_scales(&mut self, width: f64, height: f64) {
        let (min_x, max_x) = self.x_domain();
        let (min_y, max_y) = self.y_domain();
        let baseline = self.config.axis_baseline;
        let color = self.config.scale_color;
        let label_size = 14.0;

        // Horizontal axis with integer-stepped ticks.
        if max_x > min_x {
            let scale = (width - 100.0) / (max_x - min_x);
            let (x0, y0) = self.frame.screen(0.0, baseline);
            let (x1, _) = self.frame.screen((max_x - min_x) * scale, baseline);
            draw_line(self.frame.canvas_mut().framebuffer_mut(), x0, y0, x1, y0, color);

            let mut i = min_x;
            while i <= max_x {
                let x = (i - min_x) * scale;
                self.frame
                    .write_label(format!("{i}"), x, baseline, label_size, color, TextAlign::Left);
                i += 1.0;
            }
        }

        // Vertical axis stepped by 0.1.
        if max_y > min_y {
            let scale = (height - 100.0) / (max_y - min_y);
            let (x0, y0) = self.frame.screen(0.0, baseline);
            let (_, y1) = self.frame.screen(0.0, baseline - (max_y - min_y) * scale);
            draw_line(self.frame.canvas_mut().framebuffer_mut(), x0, y0, x0, y1, color);

            let mut j = min_y;
            while j <= max_y + 1e-9 {
                let y = baseline - j * scale;
                self.frame
                    .write_label(format!("{j:.1}"), -30.0, y, label_size, color, TextAlign::Left);
                j += 0.1;
            }
        }
    }
}

fn moments(values: &[f64]) -> (f64, f64) {
    (mean(values), std_dev(values))
}

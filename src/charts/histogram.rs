//! Histogram renderer.
//!
//! Bins its data once at construction and keeps the frequency table
//! until the data is replaced; every tick renders per-bin block towers
//! colored by frequency blended with a base RGB triple.

use crate::bins::{frequency_table, FrequencyTable};
use crate::canvas::TextAlign;
use crate::charts::frame::{Frame, FrameOptions};
use crate::charts::hooks::ChartHooks;
use crate::color::Rgba;
use crate::error::Result;
use crate::render::draw_rect;
use crate::stats::{max_value, min_value};

/// Histogram construction options.
#[derive(Debug, Clone)]
pub struct HistogramConfig {
    /// Chart title.
    pub title: String,
    /// Chart description.
    pub description: String,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Raw numeric samples to bin.
    pub data: Vec<f64>,
    /// Base RGB triple the per-bin color starts from.
    pub base_rgb: [u8; 3],
    /// Per-channel percentage multipliers applied to the frequency.
    pub color_percent_mul: [f64; 3],
    /// Width of one block.
    pub rect_width: u32,
    /// Height of one block.
    pub rect_height: u32,
    /// Shared frame appearance and timing options.
    pub frame: FrameOptions,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            title: "Histogram".to_string(),
            description: String::new(),
            width: 600,
            height: 400,
            data: Vec::new(),
            base_rgb: [0, 50, 50],
            color_percent_mul: [40.0, 65.0, 25.0],
            rect_width: 20,
            rect_height: 20,
            frame: FrameOptions::default(),
        }
    }
}

/// Histogram chart instance.
pub struct HistogramChart {
    frame: Frame,
    config: HistogramConfig,
    table: FrequencyTable,
    hooks: ChartHooks,
}

impl HistogramChart {
    /// Build a histogram chart, binning the configured data.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyData`] when the data is empty.
    pub fn new(config: HistogramConfig) -> Result<Self> {
        Self::with_hooks(config, ChartHooks::default())
    }

    /// Build a histogram chart with lifecycle hooks attached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`HistogramChart::new`].
    pub fn with_hooks(config: HistogramConfig, mut hooks: ChartHooks) -> Result<Self> {
        if let Some(f) = hooks.on_init.as_mut() {
            f();
        }

        let table = frequency_table(&config.data)?;
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
            table,
            hooks,
        };
        chart.tick();

        if let Some(f) = chart.hooks.on_create.as_mut() {
            f();
        }
        Ok(chart)
    }

    /// The frequency table computed from the current data.
    #[must_use]
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// The raw samples.
    #[must_use]
    pub fn data(&self) -> &[f64] {
        &self.config.data
    }

    /// Replace the data and recompute the frequency table. This is the
    /// only operation that re-bins.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::EmptyData`] when the new data is empty;
    /// the previous table is kept in that case.
    pub fn set_data(&mut self, data: Vec<f64>) -> Result<()> {
        self.table = frequency_table(&data)?;
        self.config.data = data;
        Ok(())
    }

    /// Per-bin colors: each channel is the base value plus the clamped
    /// frequency scaled by that channel's percentage multiplier.
    #[must_use]
    pub fn color_range(&self, frequencies: &[f64]) -> Vec<Rgba> {
        frequencies
            .iter()
            .map(|&freq| {
                let freq = freq.floor().clamp(0.0, 255.0);
                let channel = |base: u8, mul: f64| -> u8 {
                    (f64::from(base) + freq * (mul / 100.0)).min(255.0) as u8
                };
                Rgba::rgb(
                    channel(self.config.base_rgb[0], self.config.color_percent_mul[0]),
                    channel(self.config.base_rgb[1], self.config.color_percent_mul[1]),
                    channel(self.config.base_rgb[2], self.config.color_percent_mul[2]),
                )
            })
            .collect()
    }

    /// The spreading transform applied to an axis before drawing:
    /// values scale by their distance structure so neighboring bins do
    /// not overlap on screen. Non-finite results (possible for
    /// non-positive axis maxima) are dropped by the renderer.
    #[must_use]
    pub fn spread_axis(&self, values: &[f64]) -> Vec<f64> {
        let max = max_value(values);
        let root_rect = f64::from(self.config.rect_width).sqrt();
        values
            .iter()
            .map(|&v| {
                let scaled = ((v * max.sqrt()) * max).floor() / max * root_rect;
                (scaled / root_rect).floor()
            })
            .collect()
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
        let boundaries = self.table.number_line().to_vec();
        let counts: Vec<f64> = self.table.counts().iter().map(|&c| c as f64).collect();

        let xs = self.spread_axis(&boundaries);
        let ys = self.spread_axis(&counts);
        let colors = self.color_range(&ys);

        let width = f64::from(self.frame.width());
        let height = f64::from(self.frame.height());
        let rect_w = self.config.rect_width;
        let rect_h = self.config.rect_height;
        let label_size = 12.0;
        let text_color = self.frame.options.text_color;

        for ix in 0..counts.len() {
            let freq = ys[ix];
            let class_x = xs[ix];
            if !freq.is_finite() || !class_x.is_finite() {
                continue;
            }

            let base_x = class_x.ceil() + width / 4.0;

            // The block tower, tallest first.
            let mut iy = freq;
            while iy > 0.0 {
                let (sx, sy) = self.frame.screen(base_x, height - iy);
                draw_rect(
                    self.frame.canvas_mut().framebuffer_mut(),
                    sx,
                    sy,
                    rect_w,
                    rect_h,
                    colors[ix],
                );
                iy -= 1.0;
            }

            // Class boundary label under the tower.
            let class_label = boundaries[ix];
            if class_label.is_finite() {
                self.frame.write_label(
                    format!("{}", class_label.floor()),
                    f64::from(rect_w) / 2.0 + base_x,
                    height + f64::from(rect_h) * 2.0,
                    label_size,
                    text_color,
                    TextAlign::Center,
                );
            }

            // Edge dots along both sides of the tower.
            let mut iy = 0.0;
            while iy <= freq {
                let (lx, ly) = self.frame.screen(base_x, height - iy);
                draw_rect(self.frame.canvas_mut().framebuffer_mut(), lx, ly, 2, 2, Rgba::BLACK);
                let (rx, ry) = self.frame.screen(base_x + f64::from(rect_w), height - iy);
                draw_rect(self.frame.canvas_mut().framebuffer_mut(), rx, ry, 2, 2, Rgba::BLACK);
                iy += 1.0;
            }

            // Internal separator lines every 20 blocks.
            let mut iy = freq;
            while iy > 0.0 {
                let (sx, sy) = self.frame.screen(base_x, height - iy);
                draw_rect(
                    self.frame.canvas_mut().framebuffer_mut(),
                    sx,
                    sy,
                    rect_w,
                    2,
                    Rgba::BLACK,
                );
                iy -= 20.0;
            }
        }

        self.draw_frequency_scale(&counts, &ys, height);
    }

    /// Frequency scale along the left edge, stepped by block height.
    fn draw_frequency_scale(&mut self, counts: &[f64], spread: &[f64], height: f64) {
        let finite: Vec<f64> = spread.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() {
            return;
        }

        let min_draw = min_value(&finite);
        let max_draw = max_value(&finite);
        let max_count = max_value(counts);
        let bound = min_draw + max_draw + 10.0;
        if bound <= min_draw {
            return;
        }

        let label_x = self.frame.camera.x + 25.0;
        let label_size = 12.0;
        let text_color = self.frame.options.text_color;

        let mut h = min_draw;
        while h < bound {
            let value = (h * max_count) / bound;
            self.frame.write_label(
                format!("{}", value.ceil()),
                label_x,
                -h + height + 50.0,
                label_size,
                text_color,
                TextAlign::Center,
            );
            h += f64::from(self.config.rect_height.max(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart() -> HistogramChart {
        HistogramChart::new(HistogramConfig {
            data: vec![
                10.0, 20.0, 30.0, 10.0, 5.0, 5.0, 10.0, 20.0, 20.0, 5.0, 5.0, 5.0, 5.0, 8.0, 8.0,
                8.0, 8.0, 8.0,
            ],
            ..HistogramConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(HistogramChart::new(HistogramConfig::default()).is_err());
    }

    #[test]
    fn test_table_counts_cover_data() {
        let chart = chart();
        assert_eq!(chart.table().total(), chart.data().len());
    }

    #[test]
    fn test_table_fixed_until_data_replaced() {
        let mut chart = chart();
        let before = chart.table().clone();

        // Ticks and redraws never re-bin.
        chart.tick();
        chart.redraw();
        assert_eq!(chart.table(), &before);

        chart.set_data(vec![1.0, 2.0, 3.0]).unwrap();
        assert_ne!(chart.table(), &before);
        assert_eq!(chart.table().total(), 3);
    }

    #[test]
    fn test_set_data_rejects_empty_and_keeps_table() {
        let mut chart = chart();
        let before = chart.table().clone();
        assert!(chart.set_data(vec![]).is_err());
        assert_eq!(chart.table(), &before);
    }

    #[test]
    fn test_color_range_scales_with_frequency() {
        let chart = chart();
        let colors = chart.color_range(&[0.0, 10.0, 1000.0]);

        assert_eq!(colors[0], Rgba::rgb(0, 50, 50));
        // 10 * 40% = 4, 10 * 65% = 6.5, 10 * 25% = 2.5
        assert_eq!(colors[1], Rgba::rgb(4, 56, 52));
        // Frequency clamps at 255 per channel.
        assert_eq!(colors[2], Rgba::rgb(102, 215, 113));
    }

    #[test]
    fn test_spread_axis_is_monotone_for_positive_values() {
        let chart = chart();
        let spread = chart.spread_axis(&[1.0, 2.0, 5.0]);
        assert!(spread[0] < spread[1]);
        assert!(spread[1] < spread[2]);
    }

    #[test]
    fn test_first_frame_renders_labels() {
        let chart = chart();
        assert_eq!(chart.frame().frames(), 1);
        let texts = chart.frame().canvas().text_content();
        // Title plus class labels plus the frequency scale.
        assert!(texts.len() > 2);
        assert_eq!(texts[0], "Histogram");
    }

    #[test]
    fn test_redraw_idempotent_text() {
        let mut chart = chart();
        chart.redraw();
        let first: Vec<String> = chart
            .frame()
            .canvas()
            .text_content()
            .iter()
            .map(ToString::to_string)
            .collect();
        chart.redraw();
        assert_eq!(chart.frame().canvas().text_content(), first);
    }

    #[test]
    fn test_destroy_stops_ticks() {
        let mut chart = chart();
        chart.destroy();
        let frames = chart.frame().frames();
        chart.tick();
        assert_eq!(chart.frame().frames(), frames);
    }
}

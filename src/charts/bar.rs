//! Bar chart renderer.
//!
//! Each (label, value) pair renders as a horizontal run of fixed-width
//! stage segments, colored by the first configured color stop whose
//! threshold is at or above the bar's percent. A value above the
//! configured scale is flagged with a non-fatal advisory and still
//! rendered, visually clamped to the full stage run.

use crate::canvas::TextAlign;
use crate::charts::frame::{Frame, FrameOptions};
use crate::charts::hooks::ChartHooks;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::grid::{CellValue, SampleCollection};
use crate::render::draw_rect;

/// Scale label increment: fixed step or derived from the max scale and
/// viewport width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScaleIncrement {
    /// A percentage of the max scale: 4% at wide viewports, 11% at
    /// narrow ones.
    Auto,
    /// A fixed step.
    Step(f64),
}

/// Bar chart construction options.
#[derive(Debug, Clone)]
pub struct BarConfig {
    /// Chart title.
    pub title: String,
    /// Chart description, rendered under the title.
    pub description: String,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
    /// Ordered (label, value) pairs.
    pub data: Vec<(String, f64)>,
    /// Lower end of the value scale.
    pub min_scale: f64,
    /// Upper end of the value scale; values above it overflow.
    pub max_scale: f64,
    /// Scale label increment.
    pub scale_increment: ScaleIncrement,
    /// Unit text appended after each value.
    pub percent_prefix: String,
    /// Width of one stage segment.
    pub stage_width: u32,
    /// Height of one stage segment.
    pub stage_height: u32,
    /// Horizontal room reserved per scale label.
    pub scale_indicator_size: u32,
    /// Ordered color stops: the first stop with threshold >= the bar's
    /// percent colors the bar. Declaration order is lookup order.
    pub colors: Vec<(f64, Rgba)>,
    /// Viewport width at or below which the narrow stage margin is
    /// used.
    pub narrow_break: u32,
    /// Stage-run margin at narrow viewports.
    pub narrow_stage_margin: u32,
    /// Stage-run margin at wide viewports.
    pub wide_stage_margin: u32,
    /// Viewport width at or above which the wide auto increment is
    /// used.
    pub auto_increment_break: u32,
    /// Auto increment percentage at wide viewports.
    pub auto_increment_wide_pct: f64,
    /// Auto increment percentage at narrow viewports.
    pub auto_increment_narrow_pct: f64,
    /// Shared frame appearance and timing options.
    pub frame: FrameOptions,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            title: "Bar chart".to_string(),
            description: String::new(),
            width: 800,
            height: 600,
            data: Vec::new(),
            min_scale: 0.0,
            max_scale: 100.0,
            scale_increment: ScaleIncrement::Step(5.0),
            percent_prefix: String::new(),
            stage_width: 20,
            stage_height: 14,
            scale_indicator_size: 50,
            colors: vec![
                (1.0, Rgba::RED),
                (20.0, Rgba::rgb(255, 140, 0)),
                (30.0, Rgba::rgb(255, 165, 0)),
                (50.0, Rgba::rgb(255, 255, 0)),
                (60.0, Rgba::rgb(244, 252, 3)),
                (100.0, Rgba::rgb(0, 128, 0)),
            ],
            narrow_break: 700,
            narrow_stage_margin: 16,
            wide_stage_margin: 21,
            auto_increment_break: 600,
            auto_increment_wide_pct: 4.0,
            auto_increment_narrow_pct: 11.0,
            frame: FrameOptions::default(),
        }
    }
}

/// Bar chart instance.
pub struct BarChart {
    frame: Frame,
    config: BarConfig,
    overflowed: Vec<usize>,
    scale_labels: Vec<f64>,
    hooks: ChartHooks,
}

impl BarChart {
    /// Build a bar chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when no data pairs are configured,
    /// or a dimension error for a zero-sized canvas.
    pub fn new(config: BarConfig) -> Result<Self> {
        Self::with_hooks(config, ChartHooks::default())
    }

    /// Build a bar chart with lifecycle hooks attached.
    ///
    /// # Errors
    ///
    /// Same conditions as [`BarChart::new`].
    pub fn with_hooks(config: BarConfig, mut hooks: ChartHooks) -> Result<Self> {
        if let Some(f) = hooks.on_init.as_mut() {
            f();
        }

        if config.data.is_empty() {
            return Err(Error::EmptyData);
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
            overflowed: Vec::new(),
            scale_labels: Vec::new(),
            hooks,
        };
        chart.refresh_layout();
        chart.tick();

        if let Some(f) = chart.hooks.on_create.as_mut() {
            f();
        }
        Ok(chart)
    }

    /// The percent of the scale a value covers.
    #[must_use]
    pub fn percent(&self, value: f64) -> f64 {
        value * 100.0 / self.config.max_scale
    }

    /// The color of the first stop whose threshold is at or above the
    /// given percent. Stops are consulted in declaration order.
    #[must_use]
    pub fn color_for(&self, percent: f64) -> Option<Rgba> {
        self.config
            .colors
            .iter()
            .find(|(threshold, _)| *threshold >= percent)
            .map(|(_, color)| *color)
    }

    /// Indices of the data pairs whose value exceeded the max scale on
    /// the last layout pass.
    #[must_use]
    pub fn overflowed(&self) -> &[usize] {
        &self.overflowed
    }

    /// The scale label values of the last layout pass.
    #[must_use]
    pub fn scale_labels(&self) -> &[f64] {
        &self.scale_labels
    }

    /// How many stage segments fit in one bar run.
    #[must_use]
    pub fn stage_fit(&self) -> u32 {
        let margin = if self.config.width <= self.config.narrow_break {
            self.config.narrow_stage_margin
        } else {
            self.config.wide_stage_margin
        };
        (self.config.width / self.config.stage_width.max(1)).saturating_sub(margin)
    }

    /// Replace the data pairs. The caller decides when to redraw.
    pub fn set_data(&mut self, data: Vec<(String, f64)>) {
        self.config.data = data;
    }

    /// Append data pairs. The caller decides when to redraw.
    pub fn append_data(&mut self, pairs: impl IntoIterator<Item = (String, f64)>) {
        self.config.data.extend(pairs);
    }

    /// Replace the data with (label, value) pairs taken from a sample
    /// collection: `label_column` supplies the labels, `value_column`
    /// the numeric values. Records without a numeric value are skipped.
    pub fn set_data_from_samples(
        &mut self,
        samples: &SampleCollection,
        label_column: &str,
        value_column: &str,
    ) {
        self.config.data = pairs_from_samples(samples, label_column, value_column);
    }

    /// Append (label, value) pairs taken from a sample collection,
    /// keeping the existing data.
    pub fn append_data_from_samples(
        &mut self,
        samples: &SampleCollection,
        label_column: &str,
        value_column: &str,
    ) {
        self.config
            .data
            .extend(pairs_from_samples(samples, label_column, value_column));
    }

    /// The current data pairs.
    #[must_use]
    pub fn data(&self) -> &[(String, f64)] {
        &self.config.data
    }

    /// Render one frame.
    pub fn tick(&mut self) {
        if !self.frame.begin_tick() {
            return;
        }
        self.render_marks();
    }

    /// Synchronously rebuild the layout and render a fresh frame.
    pub fn redraw(&mut self) {
        if !self.frame.is_active() {
            return;
        }
        if let Some(f) = self.hooks.on_before_render.as_mut() {
            f();
        }
        self.refresh_layout();
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

    /// Dispatch a click on a data row.
    pub fn fire_row_click(&mut self, row: usize) {
        if row >= self.config.data.len() {
            return;
        }
        if let Some(f) = self.hooks.on_line_click.as_mut() {
            f(row);
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

    /// Flag overflowing values and recompute the scale labels, firing
    /// the per-row hooks.
    fn refresh_layout(&mut self) {
        self.overflowed.clear();
        for (i, (label, value)) in self.config.data.iter().enumerate() {
            if *value > self.config.max_scale {
                tracing::warn!(
                    value,
                    max_scale = self.config.max_scale,
                    label = label.as_str(),
                    "data value exceeds the configured scale"
                );
                self.overflowed.push(i);
            }
        }
        self.scale_labels = self.build_scale_labels();

        let max_scale = self.config.max_scale;
        if let Some(f) = self.hooks.on_each_render.as_mut() {
            for (label, value) in &self.config.data {
                f(label, *value, *value * 100.0 / max_scale);
            }
        }
        if let Some(f) = self.hooks.on_each_line.as_mut() {
            for i in 0..self.config.data.len() {
                f(i);
            }
        }
    }

    fn build_scale_labels(&self) -> Vec<f64> {
        let fits = (self.config.width / self.config.scale_indicator_size.max(1)) as i64 - 3;
        let half = fits.div_euclid(2).max(0) as usize;
        let mid = self.config.max_scale / 2.0;

        let inc = match self.config.scale_increment {
            ScaleIncrement::Step(step) => step,
            ScaleIncrement::Auto => {
                let pct = if self.config.width >= self.config.auto_increment_break {
                    self.config.auto_increment_wide_pct
                } else {
                    self.config.auto_increment_narrow_pct
                };
                pct / 100.0 * self.config.max_scale
            }
        };

        let first = range_until_count(self.config.min_scale + inc, mid - 1.0, half, inc);
        let second = range_until_count(mid + 1.0, self.config.max_scale, half, inc);

        let mut labels = vec![self.config.min_scale];
        labels.extend(first.iter().skip(1));
        labels.push(mid);
        labels.extend(second.iter().skip(1));
        labels.push(self.config.max_scale);
        labels
    }

    fn render_marks(&mut self) {
        let fit = self.stage_fit();
        let stage_w = self.config.stage_width;
        let stage_h = self.config.stage_height;
        let label_size = 12.0;
        let text_color = self.frame.options.text_color;

        let top = self.frame.options.title_position + 60.0;
        let row_height = f64::from(stage_h) + 14.0;
        let label_x = 10.0;
        let run_x = 90.0;

        let rows: Vec<(String, f64)> = self.config.data.clone();
        for (i, (label, value)) in rows.iter().enumerate() {
            let y = top + i as f64 * row_height;
            let percent = self.percent(*value);

            self.frame
                .write_label(label.clone(), label_x, y, label_size, text_color, TextAlign::Left);

            // Stage count is proportional to the percent, visually
            // clamped to the run that fits.
            let stages = ((f64::from(fit) * percent) / 100.0).ceil().max(0.0) as u32;
            let stages = stages.min(fit);

            let color = self
                .color_for(percent)
                .or_else(|| self.config.colors.last().map(|(_, c)| *c))
                .unwrap_or(text_color);

            for e in 0..stages {
                let (sx, sy) = self
                    .frame
                    .screen(run_x + f64::from(e * stage_w), y - f64::from(stage_h));
                draw_rect(
                    self.frame.canvas_mut().framebuffer_mut(),
                    sx,
                    sy,
                    stage_w.saturating_sub(1).max(1),
                    stage_h,
                    color,
                );
            }

            let value_text = if self.config.percent_prefix.is_empty() {
                format!("{value} ({percent}%)")
            } else {
                format!("{value} {} ({percent}%)", self.config.percent_prefix)
            };
            let value_x = run_x + f64::from(stages * stage_w) + 10.0;
            self.frame
                .write_label(value_text, value_x, y, label_size, text_color, TextAlign::Left);
        }

        // Footer scale, symmetric around the midpoint.
        let footer_y = f64::from(self.frame.height()) - 20.0;
        let spacing = f64::from(self.config.scale_indicator_size);
        let labels = self.scale_labels.clone();
        for (i, value) in labels.iter().enumerate() {
            self.frame.write_label(
                format!("{value}"),
                10.0 + i as f64 * spacing,
                footer_y,
                label_size,
                text_color,
                TextAlign::Center,
            );
        }
    }
}

fn pairs_from_samples(
    samples: &SampleCollection,
    label_column: &str,
    value_column: &str,
) -> Vec<(String, f64)> {
    samples
        .iter()
        .filter_map(|sample| {
            let label = sample
                .get(label_column)
                .map(ToString::to_string)
                .unwrap_or_default();
            match sample.get(value_column) {
                Some(CellValue::Number(value)) => Some((label, *value)),
                _ => {
                    tracing::debug!(
                        label = label.as_str(),
                        value_column,
                        "skipping record without a numeric value"
                    );
                    None
                }
            }
        })
        .collect()
}

/// Range generator that stops once `count` values are produced: steps
/// by `inc` until the nominal end is passed, then by 1, so the sequence
/// may overshoot `end` to satisfy the requested count.
fn range_until_count(start: f64, end: f64, count: usize, inc: f64) -> Vec<f64> {
    let inc = if inc > 0.0 { inc } else { 1.0 };
    let mut values = Vec::with_capacity(count);
    let mut passed_end = false;
    let mut i = start;

    while values.len() < count {
        if i > end - inc {
            passed_end = true;
        }
        values.push(i);
        if passed_end {
            i += 1.0;
        } else {
            i += inc;
        }
    }

    values
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart_with(data: Vec<(&str, f64)>) -> BarChart {
        let config = BarConfig {
            data: data.into_iter().map(|(l, v)| (l.to_string(), v)).collect(),
            ..BarConfig::default()
        };
        BarChart::new(config).unwrap()
    }

    #[test]
    fn test_empty_data_rejected() {
        assert!(matches!(
            BarChart::new(BarConfig::default()),
            Err(Error::EmptyData)
        ));
    }

    #[test]
    fn test_percent() {
        let chart = chart_with(vec![("a", 50.0)]);
        assert_eq!(chart.percent(50.0), 50.0);
        assert_eq!(chart.percent(150.0), 150.0);
    }

    #[test]
    fn test_color_stops_first_match_in_declaration_order() {
        let chart = chart_with(vec![("a", 10.0)]);
        // percent 10 -> the 20-stop, not the closer 1-stop below it.
        assert_eq!(chart.color_for(10.0), Some(Rgba::rgb(255, 140, 0)));
        assert_eq!(chart.color_for(1.0), Some(Rgba::RED));
        assert_eq!(chart.color_for(100.0), Some(Rgba::rgb(0, 128, 0)));
        // Beyond every stop there is no match.
        assert_eq!(chart.color_for(150.0), None);
    }

    #[test]
    fn test_overflow_flagged_and_still_rendered() {
        let chart = chart_with(vec![("ok", 50.0), ("over", 150.0)]);
        assert_eq!(chart.overflowed(), &[1]);

        // The overflowing bar renders the full stage run.
        let fit = chart.stage_fit();
        assert!(fit > 0);
        let stages = ((f64::from(fit) * chart.percent(150.0)) / 100.0).ceil() as u32;
        assert!(stages > fit);
        // Rendering happened: the frame advanced and text was drawn.
        assert!(chart.frame().frames() > 0);
        let texts = chart.frame().canvas().text_content();
        assert!(texts.iter().any(|t| t.contains("150")));
    }

    #[test]
    fn test_stage_fit_viewport_margins() {
        let narrow = BarChart::new(BarConfig {
            width: 600,
            data: vec![("a".to_string(), 1.0)],
            ..BarConfig::default()
        })
        .unwrap();
        // 600/20 - 16
        assert_eq!(narrow.stage_fit(), 14);

        let wide = chart_with(vec![("a", 1.0)]);
        // 800/20 - 21
        assert_eq!(wide.stage_fit(), 19);
    }

    #[test]
    fn test_scale_labels_symmetric_shape() {
        let chart = chart_with(vec![("a", 1.0)]);
        let labels = chart.scale_labels();
        assert_eq!(labels.first(), Some(&0.0));
        assert_eq!(labels.last(), Some(&100.0));
        assert!(labels.contains(&50.0));
    }

    #[test]
    fn test_auto_increment_depends_on_width() {
        let wide = BarChart::new(BarConfig {
            scale_increment: ScaleIncrement::Auto,
            data: vec![("a".to_string(), 1.0)],
            ..BarConfig::default()
        })
        .unwrap();
        // 4% of 100 at width 800: the first label after min is 2 * 4.
        assert_eq!(wide.scale_labels()[1], 8.0);

        let narrow = BarChart::new(BarConfig {
            width: 500,
            scale_increment: ScaleIncrement::Auto,
            data: vec![("a".to_string(), 1.0)],
            ..BarConfig::default()
        })
        .unwrap();
        // 11% of 100 at width 500.
        assert_eq!(narrow.scale_labels()[1], 22.0);
    }

    #[test]
    fn test_range_until_count_plain() {
        assert_eq!(
            range_until_count(5.0, 49.0, 4, 5.0),
            vec![5.0, 10.0, 15.0, 20.0]
        );
    }

    #[test]
    fn test_range_until_count_overshoots_to_fill() {
        // Once the nominal end is passed the step drops to 1 and the
        // sequence keeps going until the count is satisfied.
        assert_eq!(
            range_until_count(90.0, 100.0, 5, 5.0),
            vec![90.0, 95.0, 100.0, 101.0, 102.0]
        );
    }

    #[test]
    fn test_range_until_count_zero() {
        assert!(range_until_count(0.0, 10.0, 0, 5.0).is_empty());
    }

    #[test]
    fn test_redraw_idempotent_text() {
        let mut chart = chart_with(vec![("a", 25.0), ("b", 75.0)]);
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
    fn test_tick_after_destroy_is_noop() {
        let mut chart = chart_with(vec![("a", 25.0)]);
        chart.destroy();
        let frames = chart.frame().frames();
        chart.tick();
        chart.redraw();
        assert_eq!(chart.frame().frames(), frames);
    }

    #[test]
    fn test_data_from_samples_skips_non_numeric() {
        use crate::grid::Sample;

        let mut chart = chart_with(vec![("seed", 1.0)]);
        let samples = SampleCollection::from_rows(vec![
            Sample::from_pairs([
                ("name", CellValue::from("ok")),
                ("level", CellValue::from(40.0)),
            ]),
            Sample::from_pairs([
                ("name", CellValue::from("text-level")),
                ("level", CellValue::from("not a number")),
            ]),
        ]);

        chart.set_data_from_samples(&samples, "name", "level");
        assert_eq!(chart.data(), &[("ok".to_string(), 40.0)]);

        chart.append_data_from_samples(&samples, "name", "level");
        assert_eq!(chart.data().len(), 2);
    }

    #[test]
    fn test_hooks_each_render_receives_percent() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let hooks = ChartHooks {
            on_each_render: Some(Box::new({
                let seen = Rc::clone(&seen);
                move |label: &str, value, percent| {
                    seen.borrow_mut().push((label.to_string(), value, percent));
                }
            })),
            ..ChartHooks::default()
        };

        let config = BarConfig {
            data: vec![("a".to_string(), 50.0)],
            ..BarConfig::default()
        };
        let _chart = BarChart::with_hooks(config, hooks).unwrap();
        assert_eq!(seen.borrow().as_slice(), &[("a".to_string(), 50.0, 50.0)]);
    }
}

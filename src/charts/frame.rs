//! Shared per-tick chassis for the canvas charts.
//!
//! Every chart owns a [`Frame`]: the canvas, the camera, the pan input
//! state, and the background/heading configuration. One `begin_tick`
//! call runs the common part of a frame — sample the input, advance the
//! camera, clear, paint background grid lines, write the heading — and
//! the chart then draws its marks on top.
//!
//! Data marks and text are drawn in world space and pan with the
//! camera; the background fill and grid lines are screen-space and stay
//! put.

use std::time::Duration;

use crate::camera::Camera;
use crate::canvas::{Canvas, TextAlign, TextOp};
use crate::color::Rgba;
use crate::error::Result;
use crate::input::{PanInput, DEFAULT_PAN_SPEED};
use crate::output::{PngEncoder, SvgEncoder};
use std::path::Path;

/// Appearance and timing options shared by every canvas chart.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOptions {
    /// Background fill color.
    pub background: Rgba,
    /// Background grid-line color.
    pub line_color: Rgba,
    /// Grid-line thickness in pixels.
    pub line_size: u32,
    /// Horizontal spacing between vertical grid lines.
    pub line_space_x: u32,
    /// Vertical spacing between horizontal grid lines.
    pub line_space_y: u32,
    /// Whether horizontal grid lines are drawn.
    pub lines_horizontal: bool,
    /// Whether vertical grid lines are drawn.
    pub lines_vertical: bool,
    /// Heading and default label color.
    pub text_color: Rgba,
    /// Baseline of the title text.
    pub title_position: f64,
    /// Interval the host should drive [`Frame::begin_tick`] at.
    pub tick_interval_ms: u64,
    /// Camera movement per tick for each active pan direction.
    pub pan_speed: f64,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            background: Rgba::WHITE,
            line_color: Rgba::BLACK,
            line_size: 1,
            line_space_x: 15,
            line_space_y: 15,
            lines_horizontal: true,
            lines_vertical: true,
            text_color: Rgba::BLACK,
            title_position: 25.0,
            tick_interval_ms: 1,
            pan_speed: DEFAULT_PAN_SPEED,
        }
    }
}

/// Per-chart render chassis: canvas, camera, input, heading.
#[derive(Debug)]
pub struct Frame {
    canvas: Canvas,
    /// The pan offset applied to world-space draws.
    pub camera: Camera,
    /// Directional input sampled at each tick.
    pub input: PanInput,
    /// Appearance and timing options.
    pub options: FrameOptions,
    title: String,
    description: String,
    frames: u64,
    active: bool,
    visible: bool,
}

impl Frame {
    /// Create a frame with the given canvas size and heading.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    pub fn new(
        width: u32,
        height: u32,
        title: impl Into<String>,
        description: impl Into<String>,
        options: FrameOptions,
    ) -> Result<Self> {
        let mut input = PanInput::new();
        input.speed = options.pan_speed;

        Ok(Self {
            canvas: Canvas::new(width, height)?,
            camera: Camera::new(f64::from(width), f64::from(height)),
            input,
            options,
            title: title.into(),
            description: description.into(),
            frames: 0,
            active: true,
            visible: true,
        })
    }

    /// Canvas width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Canvas height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// The drawing surface.
    #[must_use]
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Mutable access to the drawing surface.
    pub fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    /// The chart title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the chart title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The chart description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the chart description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Number of ticks rendered so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether the render loop is still active (not destroyed).
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether the chart is visible.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Mark the chart visible.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Mark the chart hidden.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Stop the render loop for good. Subsequent ticks are no-ops, so a
    /// timer that outlives the chart can never draw into a dead
    /// surface.
    pub(crate) fn deactivate(&mut self) {
        self.active = false;
        self.visible = false;
    }

    /// The interval the host should call the chart's tick at.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.options.tick_interval_ms)
    }

    /// Run the shared part of one tick. Returns false when the chart
    /// has been destroyed and nothing was drawn.
    pub(crate) fn begin_tick(&mut self) -> bool {
        if !self.active {
            return false;
        }

        let (dx, dy) = self.input.camera_delta();
        self.camera.pan(dx, dy);

        self.canvas.clear(self.options.background);
        self.draw_grid_lines();
        self.write_heading();

        self.frames += 1;
        true
    }

    fn draw_grid_lines(&mut self) {
        let width = self.canvas.width();
        let height = self.canvas.height();
        let color = self.options.line_color;
        let size = self.options.line_size;

        if self.options.lines_horizontal {
            let mut y = 0;
            while y < height {
                self.canvas.framebuffer_mut().fill_rect(0, y, width, size, color);
                y += self.options.line_space_y.max(1);
            }
        }

        if self.options.lines_vertical {
            let mut x = 0;
            while x < width {
                self.canvas.framebuffer_mut().fill_rect(x, 0, size, height, color);
                x += self.options.line_space_x.max(1);
            }
        }
    }

    fn write_heading(&mut self) {
        let center = f64::from(self.width()) / 2.0;
        let title_y = self.options.title_position;
        let size = self.heading_font_size();
        let color = self.options.text_color;

        if !self.title.is_empty() {
            let title = self.title.clone();
            self.write_label(title, center, title_y, size, color, TextAlign::Center);
        }
        if !self.description.is_empty() {
            let description = self.description.clone();
            self.write_label(
                description,
                center,
                title_y + 30.0,
                size,
                color,
                TextAlign::Center,
            );
        }
    }

    /// Heading font size derived from the canvas width.
    #[must_use]
    pub fn heading_font_size(&self) -> f32 {
        (f64::from(self.width()) / 2.0).sqrt().ceil() as f32
    }

    /// Translate a world-space coordinate to integer screen space.
    #[must_use]
    pub fn screen(&self, x: f64, y: f64) -> (i32, i32) {
        let (sx, sy) = self.camera.to_screen(x, y);
        (sx.round() as i32, sy.round() as i32)
    }

    /// Record a world-space text draw in the default text color and
    /// heading size, centered.
    pub fn write_text(&mut self, text: impl Into<String>, x: f64, y: f64) {
        let size = self.heading_font_size();
        let color = self.options.text_color;
        self.write_label(text, x, y, size, color, TextAlign::Center);
    }

    /// Record a world-space text draw with explicit size, color, and
    /// alignment.
    pub fn write_label(
        &mut self,
        text: impl Into<String>,
        x: f64,
        y: f64,
        size: f32,
        color: Rgba,
        align: TextAlign,
    ) {
        let (sx, sy) = self.camera.to_screen(x, y);
        self.canvas.draw_text(TextOp {
            text: text.into(),
            x: sx,
            y: sy,
            size,
            color,
            align,
        });
    }

    /// Encode the current frame as PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn png_bytes(&self) -> Result<Vec<u8>> {
        PngEncoder::to_bytes(self.canvas.framebuffer())
    }

    /// Write the current frame to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        PngEncoder::write_to_file(self.canvas.framebuffer(), path)
    }

    /// Encode the current frame (raster + text) as an SVG document.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded PNG cannot be encoded.
    pub fn to_svg(&self) -> Result<String> {
        SvgEncoder::encode(&self.canvas)
    }

    /// Encode the current frame as a `data:image/png;base64,...` URL.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn png_data_url(&self) -> Result<String> {
        use base64::engine::general_purpose::STANDARD as BASE64;
        use base64::Engine;

        let png = self.png_bytes()?;
        Ok(format!("data:image/png;base64,{}", BASE64.encode(png)))
    }
}

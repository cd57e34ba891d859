//! Rasterization of geometric primitives.
//!
//! # Algorithms
//!
//! - **Bresenham's Line**: fast non-antialiased line drawing
//! - **Midpoint Circle**: filled and outlined circle rendering

mod primitives;

pub use primitives::{
    draw_circle, draw_circle_outline, draw_line, draw_rect, draw_rect_outline,
};

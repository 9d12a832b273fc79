//! Horizontal color legend strip.
//!
//! The strip shows the index label above a gradient bar spanning
//! `[-abs_max, +abs_max]`, with evenly spaced ticks and their values below.
//! It is drawn on a supersampled plotters bitmap and then resampled to the
//! exact target size.

use image::{imageops, RgbImage};
use plotters::prelude::*;

use agrivis_core::{Error, Result};

use crate::font;
use crate::render::ColormapParams;
use crate::scheme::evaluate;

const SUPERSAMPLE: u32 = 2;
const MIN_CANVAS: (u32, u32) = (320, 64);
/// Font size as a share of the canvas height.
const TEXT_SHARE: f64 = 0.2;
const MIN_TEXT_SIZE: f64 = 10.0;

/// A legend strip for one rendered index.
#[derive(Debug, Clone)]
pub struct Legend {
    label: String,
    params: ColormapParams,
    ticks: Vec<f64>,
}

impl Legend {
    /// Build a legend with `tick_count` evenly spaced ticks.
    ///
    /// The count is raised to the next odd number (minimum 3) so that zero is
    /// always one of the ticks.
    pub fn new(label: impl Into<String>, params: ColormapParams, tick_count: usize) -> Self {
        let n = normalize_tick_count(tick_count);
        let abs_max = params.abs_max;
        let ticks = (0..n)
            .map(|i| {
                let v = abs_max * (2.0 * i as f64 / (n - 1) as f64 - 1.0);
                // exact zero for the middle tick
                if i == n / 2 { 0.0 } else { v }
            })
            .collect();
        Self {
            label: label.into(),
            params,
            ticks,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Tick values formatted as they appear on the strip.
    pub fn tick_labels(&self) -> Vec<String> {
        self.ticks
            .iter()
            .map(|&v| format_tick(v, self.params.abs_max))
            .collect()
    }

    /// Render the strip at exactly `width × height` pixels.
    pub fn render(&self, width: u32, height: u32) -> Result<RgbImage> {
        let width = width.max(1);
        let height = height.max(1);
        let cw = (width * SUPERSAMPLE).max(MIN_CANVAS.0);
        let ch = (height * SUPERSAMPLE).max(MIN_CANVAS.1);

        let canvas = self.draw(cw, ch)?;
        if canvas.dimensions() == (width, height) {
            return Ok(canvas);
        }
        Ok(imageops::resize(
            &canvas,
            width,
            height,
            imageops::FilterType::Triangle,
        ))
    }

    fn draw(&self, cw: u32, ch: u32) -> Result<RgbImage> {
        font::ensure_registered()?;
        let tick_labels = self.tick_labels();
        let layout = StripLayout::compute(cw, ch, &tick_labels)?;

        let mut buf = vec![0u8; (cw as usize) * (ch as usize) * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (cw, ch)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            // Label, centered above the bar
            font::draw_centered(
                &root,
                &self.label,
                cw as i32 / 2,
                layout.label_top,
                layout.text_size,
                &BLACK,
            )
            .map_err(render_err)?;

            // Gradient, one column at a time; the far corner is exclusive
            let span = (layout.bar_right - layout.bar_left).max(1) as f64;
            for x in layout.bar_left..=layout.bar_right {
                let t = (x - layout.bar_left) as f64 / span;
                let c = evaluate(self.params.scheme, t);
                root.draw(&Rectangle::new(
                    [(x, layout.bar_top), (x + 1, layout.bar_bottom + 1)],
                    RGBColor(c.r, c.g, c.b).filled(),
                ))
                .map_err(render_err)?;
            }
            root.draw(&Rectangle::new(
                [
                    (layout.bar_left, layout.bar_top),
                    (layout.bar_right, layout.bar_bottom),
                ],
                BLACK.stroke_width(1),
            ))
            .map_err(render_err)?;

            // Ticks and values
            let n = self.ticks.len();
            for (i, text) in tick_labels.iter().enumerate() {
                let x = layout.bar_left + ((i as f64 / (n - 1) as f64) * span).round() as i32;
                root.draw(&Rectangle::new(
                    [
                        (x - layout.tick_half_width, layout.bar_bottom + 1),
                        (x + layout.tick_half_width + 1, layout.tick_bottom),
                    ],
                    BLACK.filled(),
                ))
                .map_err(render_err)?;

                let half = font::text_width(text, layout.text_size)? as i32 / 2;
                let center = x.clamp(half, (cw as i32 - half).max(half));
                font::draw_centered(&root, text, center, layout.values_top, layout.text_size, &BLACK)
                    .map_err(render_err)?;
            }

            root.present().map_err(render_err)?;
        }

        RgbImage::from_raw(cw, ch, buf)
            .ok_or_else(|| Error::Rendering("legend buffer has unexpected size".into()))
    }
}

/// Pixel positions of the strip elements on the drawing canvas.
struct StripLayout {
    text_size: f64,
    label_top: i32,
    bar_left: i32,
    bar_right: i32,
    bar_top: i32,
    bar_bottom: i32,
    tick_half_width: i32,
    tick_bottom: i32,
    values_top: i32,
}

impl StripLayout {
    fn compute(cw: u32, ch: u32, tick_labels: &[String]) -> Result<Self> {
        let (w, h) = (cw as i32, ch as i32);
        let text_size = (ch as f64 * TEXT_SHARE).floor().max(MIN_TEXT_SIZE);
        let text_h = text_size as i32;
        let pad = (h / 20).max(1);
        let tick_len = (h / 16).max(1);

        let label_top = pad;
        let bar_top = label_top + text_h + pad;
        let values_top = h - pad - text_h;
        let tick_bottom = values_top - pad;
        let bar_bottom = (tick_bottom - tick_len).max(bar_top + 1);

        // Keep the outer tick values inside the canvas
        let mut widest = 0;
        for t in tick_labels {
            widest = widest.max(font::text_width(t, text_size)? as i32);
        }
        let margin = (widest / 2 + pad).max(w / 20);
        let bar_left = margin.min(w / 2 - 1).max(0);
        let bar_right = (w - 1 - margin).max(bar_left + 1);

        Ok(Self {
            text_size,
            label_top,
            bar_left,
            bar_right,
            bar_top,
            bar_bottom,
            tick_half_width: (text_size / 14.0).round().max(1.0) as i32,
            tick_bottom,
            values_top,
        })
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Rendering(e.to_string())
}

/// Raise a tick count to the next odd number, minimum 3.
pub fn normalize_tick_count(n: usize) -> usize {
    let n = n.max(3);
    if n % 2 == 0 { n + 1 } else { n }
}

/// Format a tick value with a precision chosen from the legend range.
///
/// Ranges below `1e-4` or from `1e6` up switch to scientific notation so
/// the extremes never round to zero or grow unreadably long.
pub fn format_tick(value: f64, abs_max: f64) -> String {
    let m = abs_max.abs();
    if m.is_finite() && m > 0.0 && !(SCI_BELOW..SCI_FROM).contains(&m) {
        return format_scientific(value);
    }
    let decimals = if !m.is_finite() || m == 0.0 || m >= 100.0 {
        0
    } else if m >= 10.0 {
        1
    } else if m >= 1.0 {
        2
    } else {
        (-m.log10()).ceil() as usize + 2
    };

    let mut s = format!("{:.*}", decimals, value);
    if s.contains('.') {
        s = s.trim_end_matches('0').trim_end_matches('.').to_string();
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

const SCI_BELOW: f64 = 1e-4;
const SCI_FROM: f64 = 1e6;

/// Three significant digits, trailing zeros of the mantissa dropped.
fn format_scientific(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    let s = format!("{:.2e}", value);
    match s.split_once('e') {
        Some((mantissa, exp)) if mantissa.contains('.') => {
            let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
            format!("{}e{}", mantissa, exp)
        }
        _ => s,
    }
}

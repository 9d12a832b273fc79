//! Legend text through plotters' font API.
//!
//! A DejaVu Sans face is embedded in the binary and registered as the
//! `sans-serif` family, so labels render the same on every machine without
//! looking up system fonts.

use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use agrivis_core::{Error, Result};

const FAMILY: &str = "sans-serif";
static FACE: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static REGISTERED: OnceLock<bool> = OnceLock::new();

/// The glyph baseline sits half a font size below the anchor, so the ascent
/// starts about this fraction of the size above it.
const ASCENT_ABOVE_ANCHOR: f64 = 0.3;

/// Register the embedded face with plotters. Safe to call repeatedly.
pub fn ensure_registered() -> Result<()> {
    let ok = *REGISTERED.get_or_init(|| register_font(FAMILY, FontStyle::Normal, FACE).is_ok());
    if ok {
        Ok(())
    } else {
        Err(Error::Rendering("embedded legend font could not be parsed".into()))
    }
}

fn face(size: f64) -> FontDesc<'static> {
    (FAMILY, size).into_font()
}

/// Width of `text` in pixels at font size `size`.
pub fn text_width(text: &str, size: f64) -> Result<u32> {
    ensure_registered()?;
    face(size)
        .box_size(text)
        .map(|(w, _)| w)
        .map_err(|e| Error::Rendering(e.to_string()))
}

/// Draw `text` centered on `center_x`, inside a block `size` pixels tall
/// whose top edge is `top`.
///
/// The face must be registered first (see [`ensure_registered`]).
pub fn draw_centered<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    center_x: i32,
    top: i32,
    size: f64,
    color: &RGBColor,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let style = face(size)
        .color(color)
        .pos(Pos::new(HPos::Center, VPos::Top));
    let anchor_y = top + (size * ASCENT_ABOVE_ANCHOR).round() as i32;
    area.draw(&Text::new(text, (center_x, anchor_y), style))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_face_registers() {
        assert!(ensure_registered().is_ok());
        assert!(ensure_registered().is_ok());
    }

    #[test]
    fn width_grows_with_text_and_size() {
        assert_eq!(text_width("", 20.0).unwrap(), 0);
        let one = text_width("0", 20.0).unwrap();
        let three = text_width("0.6", 20.0).unwrap();
        let big = text_width("0.6", 40.0).unwrap();
        assert!(one > 0);
        assert!(three > one);
        assert!(big.abs_diff(2 * three) <= 2, "{} vs {}", big, three);
    }

    #[test]
    fn text_stays_inside_its_block() {
        ensure_registered().unwrap();
        let (w, h) = (120u32, 48u32);
        let (top, size) = (12, 24.0);
        let mut buf = vec![255u8; (w * h * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buf, (w, h)).into_drawing_area();
            draw_centered(&root, "NDVI", 60, top, size, &BLACK).unwrap();
            root.present().unwrap();
        }

        let inked: Vec<(u32, u32)> = buf
            .chunks(3)
            .enumerate()
            .filter(|(_, p)| p[0] < 128)
            .map(|(i, _)| (i as u32 % w, i as u32 / w))
            .collect();
        assert!(!inked.is_empty());
        for &(_, y) in &inked {
            assert!(y as i32 >= top && (y as f64) < top as f64 + size, "row {} outside block", y);
        }
        // roughly centered
        assert!(inked.iter().any(|&(x, _)| x < 50));
        assert!(inked.iter().any(|&(x, _)| x > 70));
    }
}

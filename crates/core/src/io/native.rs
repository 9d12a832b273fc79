//! Image decoding and PNG encoding through the `image` crate
//!
//! Decoded samples keep their native magnitude (0..=255 for 8-bit files,
//! 0..=65535 for 16-bit ones) and the file's own channel count, so a gray or
//! RGBA upload reaches band extraction unchanged and is rejected there.

use crate::error::{Error, Result};
use crate::raster::{MultiBandRaster, RasterElement};
use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;

/// Read an image file into a multi-band raster
///
/// The format is detected from the file contents, not its extension.
pub fn read_raster<T, P>(path: P) -> Result<MultiBandRaster<T>>
where
    T: RasterElement,
    P: AsRef<Path>,
{
    let bytes = std::fs::read(path.as_ref())?;
    read_raster_from_buffer(&bytes)
}

/// Read an image from an in-memory buffer into a multi-band raster
///
/// Same as `read_raster` but operates on the bytes of an uploaded file.
pub fn read_raster_from_buffer<T>(data: &[u8]) -> Result<MultiBandRaster<T>>
where
    T: RasterElement,
{
    let image = image::load_from_memory(data)?;
    decode_dynamic(image)
}

/// Internal: convert a decoded image into raster samples
fn decode_dynamic<T: RasterElement>(image: DynamicImage) -> Result<MultiBandRaster<T>> {
    let rows = image.height() as usize;
    let cols = image.width() as usize;
    let channels = image.color().channel_count() as usize;

    let data: Vec<T> = match image {
        DynamicImage::ImageLuma8(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageLumaA8(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageRgb8(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageRgba8(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageLuma16(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageLumaA16(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageRgb16(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageRgba16(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageRgb32F(buf) => cast_samples(buf.as_raw())?,
        DynamicImage::ImageRgba32F(buf) => cast_samples(buf.as_raw())?,
        other => {
            return Err(Error::UnsupportedDataType(format!(
                "Unsupported pixel format: {:?}",
                other.color()
            )))
        }
    };

    MultiBandRaster::from_interleaved(data, rows, cols, channels)
}

fn cast_samples<S, T>(samples: &[S]) -> Result<Vec<T>>
where
    S: RasterElement,
    T: RasterElement,
{
    samples
        .iter()
        .map(|&s| {
            num_traits::cast(s).ok_or_else(|| {
                Error::UnsupportedDataType(format!(
                    "Sample {:?} does not fit the requested raster type",
                    s
                ))
            })
        })
        .collect()
}

/// Write an RGB image as PNG
pub fn write_png<P: AsRef<Path>>(image: &RgbImage, path: P) -> Result<()> {
    let bytes = encode_png(image)?;
    std::fs::write(path.as_ref(), bytes)?;
    Ok(())
}

/// Encode an RGB image as PNG bytes
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbaImage};

    #[test]
    fn png_roundtrip_keeps_raw_samples() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([50, 120, 200]));
        let bytes = encode_png(&img).unwrap();

        let raster: MultiBandRaster<f64> = read_raster_from_buffer(&bytes).unwrap();
        assert_eq!(raster.shape(), (2, 3));
        assert_eq!(raster.channels(), 3);
        assert_eq!(raster.channel_f64(0).unwrap().get(1, 2).unwrap(), 50.0);
        assert_eq!(raster.channel_f64(2).unwrap().get(1, 2).unwrap(), 200.0);
    }

    #[test]
    fn rgba_keeps_four_channels() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(2, 2));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

        let raster: MultiBandRaster<u8> = read_raster_from_buffer(&bytes).unwrap();
        assert_eq!(raster.channels(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result: Result<MultiBandRaster<u8>> = read_raster("no/such/dir/field.png");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn write_into_missing_directory_is_io_error() {
        let img = RgbImage::new(1, 1);
        let result = write_png(&img, std::env::temp_dir().join("agrivis-no-such-dir/out.png"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn written_file_reads_back() {
        let path = std::env::temp_dir().join(format!("agrivis-io-{}.png", std::process::id()));
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(1, 0, Rgb([7, 8, 9]));
        write_png(&img, &path).unwrap();

        let raster: MultiBandRaster<u8> = read_raster(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(raster.channel_f64(1).unwrap().get(0, 1).unwrap(), 8.0);
    }

    #[test]
    fn garbage_buffer_is_codec_error() {
        let result: Result<MultiBandRaster<u8>> = read_raster_from_buffer(b"not an image");
        assert!(matches!(result, Err(Error::Image(_))));
    }
}

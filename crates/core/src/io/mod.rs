//! I/O operations for reading raw images and writing rendered results

mod native;

pub use native::{encode_png, read_raster, read_raster_from_buffer, write_png};

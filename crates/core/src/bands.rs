//! Band extraction
//!
//! A three-channel aerial image carries different physical bands depending
//! on the camera filter. [`SensorLayout`] fixes which channel holds which
//! band, and [`BandSet::extract`] splits a raw raster into named,
//! floating-point bands accordingly.

use crate::error::{Error, Result};
use crate::raster::{MultiBandRaster, Raster, RasterElement};
use std::fmt;
use std::str::FromStr;

/// Physical band role of an image channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandRole {
    Red,
    Green,
    Blue,
    /// Near-infrared
    Nir,
}

impl BandRole {
    /// Short name as used in band lists ("R", "G", "B", "NIR")
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::Nir => "NIR",
        }
    }
}

impl fmt::Display for BandRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Assignment of the three image channels to band roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorLayout {
    /// Red, Green, Blue
    Rgb,
    /// Red, Green, Near-infrared
    Rgn,
    /// Near-infrared, Green, Blue
    Ngb,
}

impl SensorLayout {
    /// All layouts, in display order
    pub const ALL: &[SensorLayout] = &[Self::Rgb, Self::Rgn, Self::Ngb];

    /// Band role carried by channel 0, 1 and 2
    pub const fn channel_roles(&self) -> [BandRole; 3] {
        match self {
            Self::Rgb => [BandRole::Red, BandRole::Green, BandRole::Blue],
            Self::Rgn => [BandRole::Red, BandRole::Green, BandRole::Nir],
            Self::Ngb => [BandRole::Nir, BandRole::Green, BandRole::Blue],
        }
    }

    /// Whether images in this layout carry the given band
    pub fn provides(&self, role: BandRole) -> bool {
        self.channel_roles().contains(&role)
    }

    /// Layout code ("RGB", "RGN", "NGB")
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rgb => "RGB",
            Self::Rgn => "RGN",
            Self::Ngb => "NGB",
        }
    }
}

impl fmt::Display for SensorLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SensorLayout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|layout| layout.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidParameter {
                name: "layout",
                value: s.to_string(),
                reason: "expected one of RGB, RGN, NGB".to_string(),
            })
    }
}

/// Named bands of one image.
///
/// A role the layout does not carry is `None`, never a zero-filled band, so
/// a formula that needs it can be rejected instead of silently computed.
/// All present bands share the source raster's (rows, cols).
#[derive(Debug, Clone)]
pub struct BandSet {
    layout: SensorLayout,
    red: Option<Raster<f64>>,
    green: Option<Raster<f64>>,
    blue: Option<Raster<f64>>,
    nir: Option<Raster<f64>>,
}

impl BandSet {
    /// Split a raw three-channel raster into bands according to `layout`.
    ///
    /// Samples are widened to `f64`. Fails with
    /// [`Error::InvalidImageShape`] unless the raster has exactly 3 channels.
    pub fn extract<T: RasterElement>(raw: &MultiBandRaster<T>, layout: SensorLayout) -> Result<Self> {
        if raw.channels() != 3 {
            return Err(Error::InvalidImageShape {
                channels: raw.channels(),
            });
        }

        let mut set = Self {
            layout,
            red: None,
            green: None,
            blue: None,
            nir: None,
        };
        for (channel, role) in layout.channel_roles().into_iter().enumerate() {
            let band = raw.channel_f64(channel)?;
            *set.slot_mut(role) = Some(band);
        }
        Ok(set)
    }

    /// Layout the bands were extracted with
    pub fn layout(&self) -> SensorLayout {
        self.layout
    }

    /// Band for `role`, `None` when the layout does not carry it
    pub fn get(&self, role: BandRole) -> Option<&Raster<f64>> {
        match role {
            BandRole::Red => self.red.as_ref(),
            BandRole::Green => self.green.as_ref(),
            BandRole::Blue => self.blue.as_ref(),
            BandRole::Nir => self.nir.as_ref(),
        }
    }

    /// Spatial shape shared by all present bands
    pub fn shape(&self) -> (usize, usize) {
        self.layout
            .channel_roles()
            .iter()
            .find_map(|&role| self.get(role))
            .map(Raster::shape)
            .unwrap_or((0, 0))
    }

    fn slot_mut(&mut self, role: BandRole) -> &mut Option<Raster<f64>> {
        match role {
            BandRole::Red => &mut self.red,
            BandRole::Green => &mut self.green,
            BandRole::Blue => &mut self.blue,
            BandRole::Nir => &mut self.nir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 2x2 raster whose channel c holds the value 10 * (c + 1)
    fn make_raw() -> MultiBandRaster<u8> {
        let mut data = Vec::new();
        for _ in 0..4 {
            data.extend_from_slice(&[10u8, 20, 30]);
        }
        MultiBandRaster::from_interleaved(data, 2, 2, 3).unwrap()
    }

    fn value(set: &BandSet, role: BandRole) -> Option<f64> {
        set.get(role).map(|band| band.get(1, 1).unwrap())
    }

    #[test]
    fn rgn_channel_order() {
        let set = BandSet::extract(&make_raw(), SensorLayout::Rgn).unwrap();
        assert_eq!(value(&set, BandRole::Red), Some(10.0));
        assert_eq!(value(&set, BandRole::Green), Some(20.0));
        assert_eq!(value(&set, BandRole::Nir), Some(30.0));
        assert!(set.get(BandRole::Blue).is_none());
    }

    #[test]
    fn ngb_channel_order() {
        let set = BandSet::extract(&make_raw(), SensorLayout::Ngb).unwrap();
        assert_eq!(value(&set, BandRole::Nir), Some(10.0));
        assert_eq!(value(&set, BandRole::Green), Some(20.0));
        assert_eq!(value(&set, BandRole::Blue), Some(30.0));
        assert!(set.get(BandRole::Red).is_none());
    }

    #[test]
    fn rgb_channel_order() {
        let set = BandSet::extract(&make_raw(), SensorLayout::Rgb).unwrap();
        assert_eq!(value(&set, BandRole::Red), Some(10.0));
        assert_eq!(value(&set, BandRole::Green), Some(20.0));
        assert_eq!(value(&set, BandRole::Blue), Some(30.0));
        assert!(set.get(BandRole::Nir).is_none());
    }

    #[test]
    fn shape_matches_source() {
        let raw = MultiBandRaster::<u16>::new(5, 7, 3);
        let set = BandSet::extract(&raw, SensorLayout::Rgb).unwrap();
        assert_eq!(set.shape(), (5, 7));
        assert_eq!(set.layout(), SensorLayout::Rgb);
    }

    #[test]
    fn rejects_non_three_channel_input() {
        let rgba = MultiBandRaster::<u8>::new(2, 2, 4);
        assert!(matches!(
            BandSet::extract(&rgba, SensorLayout::Rgb),
            Err(Error::InvalidImageShape { channels: 4 })
        ));

        let gray = MultiBandRaster::<u8>::new(2, 2, 1);
        assert!(matches!(
            BandSet::extract(&gray, SensorLayout::Rgn),
            Err(Error::InvalidImageShape { channels: 1 })
        ));
    }

    #[test]
    fn layout_roles_are_distinct() {
        for layout in SensorLayout::ALL {
            let roles = layout.channel_roles();
            assert_ne!(roles[0], roles[1]);
            assert_ne!(roles[0], roles[2]);
            assert_ne!(roles[1], roles[2]);
        }
    }

    #[test]
    fn parse_layout() {
        assert_eq!("rgn".parse::<SensorLayout>().unwrap(), SensorLayout::Rgn);
        assert_eq!(" NGB ".parse::<SensorLayout>().unwrap(), SensorLayout::Ngb);
        assert!("RGBA".parse::<SensorLayout>().is_err());
    }

    #[test]
    fn provides() {
        assert!(SensorLayout::Rgn.provides(BandRole::Nir));
        assert!(!SensorLayout::Rgb.provides(BandRole::Nir));
        assert!(!SensorLayout::Ngb.provides(BandRole::Red));
    }
}

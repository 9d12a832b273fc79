//! Color schemes and multi-stop interpolation engine.
//!
//! Every scheme is a table of color stops over `t ∈ [0, 1]`; `t = 0.5` is the
//! center color that a zero index value lands on under symmetric scaling.

use std::fmt;
use std::str::FromStr;

use agrivis_core::{Error, Result};

/// RGB color as (r, g, b) with values in 0..=255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const BLACK: Self = Self::new(0, 0, 0);
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(c: Rgb) -> Self {
        image::Rgb([c.r, c.g, c.b])
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(p: image::Rgb<u8>) -> Self {
        Rgb::new(p.0[0], p.0[1], p.0[2])
    }
}

/// A color stop: position in [0, 1] mapped to an RGB color.
#[derive(Debug, Clone, Copy)]
pub struct ColorStop {
    pub t: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(t: f64, r: u8, g: u8, b: u8) -> Self {
        Self {
            t,
            color: Rgb::new(r, g, b),
        }
    }
}

/// Available color schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorScheme {
    Viridis,
    Jet,
    Magma,
    Plasma,
    Inferno,
    Cividis,
    /// Red -> Yellow -> Green (diverging)
    RdYlGn,
    Blues,
    Greys,
    /// Navy -> Blue -> Cyan -> Green -> Yellow -> Orange -> Red -> Black
    Haxby,
    Cool,
    Spring,
    Summer,
    Autumn,
    Winter,
    Hot,
    Coolwarm,
    /// Even gradient: blue, green, yellow, red
    BlueGreenYellowRed,
    /// Even gradient: gray, gray, red, yellow, green
    GrayRedYellowGreen,
    /// Even gradient: gray, blue, green, yellow, red
    GrayBlueGreenYellowRed,
    /// Even gradient: black, gray, blue, green, yellow, red
    BlackGrayBlueGreenYellowRed,
}

impl ColorScheme {
    /// All available schemes, in the order they are offered to users.
    pub const ALL: &[ColorScheme] = &[
        Self::Viridis,
        Self::Jet,
        Self::Magma,
        Self::Plasma,
        Self::Inferno,
        Self::Cividis,
        Self::RdYlGn,
        Self::Blues,
        Self::Greys,
        Self::Haxby,
        Self::Cool,
        Self::Spring,
        Self::Summer,
        Self::Autumn,
        Self::Winter,
        Self::Hot,
        Self::Coolwarm,
        Self::BlueGreenYellowRed,
        Self::GrayRedYellowGreen,
        Self::GrayBlueGreenYellowRed,
        Self::BlackGrayBlueGreenYellowRed,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Jet => "Jet",
            Self::Magma => "Magma",
            Self::Plasma => "Plasma",
            Self::Inferno => "Inferno",
            Self::Cividis => "Cividis",
            Self::RdYlGn => "RdYlGn",
            Self::Blues => "Blues",
            Self::Greys => "Greys",
            Self::Haxby => "Haxby",
            Self::Cool => "Cool",
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Autumn => "Autumn",
            Self::Winter => "Winter",
            Self::Hot => "Hot",
            Self::Coolwarm => "Coolwarm",
            Self::BlueGreenYellowRed => "Color 1 (blue, green, yellow, red)",
            Self::GrayRedYellowGreen => "Color 2 (gray, gray, red, yellow, green)",
            Self::GrayBlueGreenYellowRed => "Color 3 (gray, blue, green, yellow, red)",
            Self::BlackGrayBlueGreenYellowRed => "Color 4 (black, gray, blue, green, yellow, red)",
        }
    }

    /// Short lowercase key, convenient on a command line.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Viridis => "viridis",
            Self::Jet => "jet",
            Self::Magma => "magma",
            Self::Plasma => "plasma",
            Self::Inferno => "inferno",
            Self::Cividis => "cividis",
            Self::RdYlGn => "rdylgn",
            Self::Blues => "blues",
            Self::Greys => "greys",
            Self::Haxby => "haxby",
            Self::Cool => "cool",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
            Self::Hot => "hot",
            Self::Coolwarm => "coolwarm",
            Self::BlueGreenYellowRed => "color1",
            Self::GrayRedYellowGreen => "color2",
            Self::GrayBlueGreenYellowRed => "color3",
            Self::BlackGrayBlueGreenYellowRed => "color4",
        }
    }

    /// Look a scheme up by display name or key, ignoring case.
    pub fn from_name(name: &str) -> Option<ColorScheme> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|s| s.name().eq_ignore_ascii_case(name) || s.key().eq_ignore_ascii_case(name))
    }

    /// Color stops defining this scheme.
    pub fn stops(&self) -> &'static [ColorStop] {
        match self {
            Self::Viridis => VIRIDIS_STOPS,
            Self::Jet => JET_STOPS,
            Self::Magma => MAGMA_STOPS,
            Self::Plasma => PLASMA_STOPS,
            Self::Inferno => INFERNO_STOPS,
            Self::Cividis => CIVIDIS_STOPS,
            Self::RdYlGn => RDYLGN_STOPS,
            Self::Blues => BLUES_STOPS,
            Self::Greys => GREYS_STOPS,
            Self::Haxby => HAXBY_STOPS,
            Self::Cool => COOL_STOPS,
            Self::Spring => SPRING_STOPS,
            Self::Summer => SUMMER_STOPS,
            Self::Autumn => AUTUMN_STOPS,
            Self::Winter => WINTER_STOPS,
            Self::Hot => HOT_STOPS,
            Self::Coolwarm => COOLWARM_STOPS,
            Self::BlueGreenYellowRed => GRADIENT_1_STOPS,
            Self::GrayRedYellowGreen => GRADIENT_2_STOPS,
            Self::GrayBlueGreenYellowRed => GRADIENT_3_STOPS,
            Self::BlackGrayBlueGreenYellowRed => GRADIENT_4_STOPS,
        }
    }

    /// Color that zero maps to under symmetric scaling.
    pub fn center_color(&self) -> Rgb {
        evaluate(*self, 0.5)
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorScheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::InvalidParameter {
            name: "colormap",
            value: s.to_string(),
            reason: "unknown colormap".to_string(),
        })
    }
}

// ─── Color stop definitions ────────────────────────────────────────────

const VIRIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 68, 1, 84),
    ColorStop::new(0.125, 71, 44, 122),
    ColorStop::new(0.250, 59, 81, 139),
    ColorStop::new(0.375, 44, 113, 142),
    ColorStop::new(0.500, 33, 144, 141),
    ColorStop::new(0.625, 39, 173, 129),
    ColorStop::new(0.750, 92, 200, 99),
    ColorStop::new(0.875, 170, 220, 50),
    ColorStop::new(1.000, 253, 231, 37),
];

const JET_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 0, 0, 128),
    ColorStop::new(0.125, 0, 0, 255),
    ColorStop::new(0.375, 0, 255, 255),
    ColorStop::new(0.625, 255, 255, 0),
    ColorStop::new(0.875, 255, 0, 0),
    ColorStop::new(1.000, 128, 0, 0),
];

const MAGMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 0, 0, 4),
    ColorStop::new(0.125, 28, 16, 68),
    ColorStop::new(0.250, 79, 18, 123),
    ColorStop::new(0.375, 129, 37, 129),
    ColorStop::new(0.500, 181, 54, 122),
    ColorStop::new(0.625, 229, 80, 100),
    ColorStop::new(0.750, 251, 135, 97),
    ColorStop::new(0.875, 254, 194, 135),
    ColorStop::new(1.000, 252, 253, 191),
];

const PLASMA_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 13, 8, 135),
    ColorStop::new(0.125, 75, 3, 161),
    ColorStop::new(0.250, 125, 3, 168),
    ColorStop::new(0.375, 168, 34, 150),
    ColorStop::new(0.500, 203, 70, 121),
    ColorStop::new(0.625, 229, 107, 93),
    ColorStop::new(0.750, 248, 148, 65),
    ColorStop::new(0.875, 253, 195, 40),
    ColorStop::new(1.000, 240, 249, 33),
];

const INFERNO_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 0, 0, 4),
    ColorStop::new(0.125, 31, 12, 72),
    ColorStop::new(0.250, 85, 15, 109),
    ColorStop::new(0.375, 136, 34, 106),
    ColorStop::new(0.500, 186, 54, 85),
    ColorStop::new(0.625, 227, 89, 51),
    ColorStop::new(0.750, 249, 140, 10),
    ColorStop::new(0.875, 249, 201, 50),
    ColorStop::new(1.000, 252, 255, 164),
];

const CIVIDIS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 0, 34, 78),
    ColorStop::new(0.125, 18, 53, 112),
    ColorStop::new(0.250, 59, 73, 108),
    ColorStop::new(0.375, 87, 93, 109),
    ColorStop::new(0.500, 112, 113, 115),
    ColorStop::new(0.625, 138, 134, 120),
    ColorStop::new(0.750, 165, 156, 116),
    ColorStop::new(0.875, 195, 179, 105),
    ColorStop::new(1.000, 254, 232, 56),
];

const RDYLGN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 165, 0, 38),
    ColorStop::new(0.1, 215, 48, 39),
    ColorStop::new(0.2, 244, 109, 67),
    ColorStop::new(0.3, 253, 174, 97),
    ColorStop::new(0.4, 254, 224, 139),
    ColorStop::new(0.5, 255, 255, 191),
    ColorStop::new(0.6, 217, 239, 139),
    ColorStop::new(0.7, 166, 217, 106),
    ColorStop::new(0.8, 102, 189, 99),
    ColorStop::new(0.9, 26, 152, 80),
    ColorStop::new(1.0, 0, 104, 55),
];

const BLUES_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 247, 251, 255),
    ColorStop::new(0.125, 222, 235, 247),
    ColorStop::new(0.250, 198, 219, 239),
    ColorStop::new(0.375, 158, 202, 225),
    ColorStop::new(0.500, 107, 174, 214),
    ColorStop::new(0.625, 66, 146, 198),
    ColorStop::new(0.750, 33, 113, 181),
    ColorStop::new(0.875, 8, 81, 156),
    ColorStop::new(1.000, 8, 48, 107),
];

const GREYS_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 255, 255, 255),
    ColorStop::new(0.125, 240, 240, 240),
    ColorStop::new(0.250, 217, 217, 217),
    ColorStop::new(0.375, 189, 189, 189),
    ColorStop::new(0.500, 150, 150, 150),
    ColorStop::new(0.625, 115, 115, 115),
    ColorStop::new(0.750, 82, 82, 82),
    ColorStop::new(0.875, 37, 37, 37),
    ColorStop::new(1.000, 0, 0, 0),
];

const HAXBY_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0x00, 0x00, 0x80),
    ColorStop::new(0.1, 0x00, 0x00, 0xff),
    ColorStop::new(0.2, 0x00, 0xff, 0xff),
    ColorStop::new(0.3, 0x00, 0xff, 0x00),
    ColorStop::new(0.4, 0xff, 0xff, 0x00),
    ColorStop::new(0.5, 0xff, 0xa5, 0x00),
    ColorStop::new(0.6, 0xff, 0x45, 0x00),
    ColorStop::new(0.7, 0xff, 0x00, 0x00),
    ColorStop::new(0.8, 0x8b, 0x00, 0x00),
    ColorStop::new(1.0, 0x00, 0x00, 0x00),
];

const COOL_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 255, 255),
    ColorStop::new(1.0, 255, 0, 255),
];

const SPRING_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 255, 0, 255),
    ColorStop::new(1.0, 255, 255, 0),
];

const SUMMER_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 128, 102),
    ColorStop::new(1.0, 255, 255, 102),
];

const AUTUMN_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 255, 0, 0),
    ColorStop::new(1.0, 255, 255, 0),
];

const WINTER_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 0, 255),
    ColorStop::new(1.0, 0, 255, 128),
];

const HOT_STOPS: &[ColorStop] = &[
    ColorStop::new(0.000, 10, 0, 0),
    ColorStop::new(0.365, 255, 0, 0),
    ColorStop::new(0.746, 255, 255, 0),
    ColorStop::new(1.000, 255, 255, 255),
];

const COOLWARM_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 59, 76, 192),
    ColorStop::new(0.25, 124, 159, 249),
    ColorStop::new(0.50, 221, 221, 221),
    ColorStop::new(0.75, 244, 154, 123),
    ColorStop::new(1.00, 180, 4, 38),
];

// Evenly spaced gradients built from named colors
// (blue #0000ff, green #008000, yellow #ffff00, red #ff0000, gray #808080).

const GRADIENT_1_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 0, 255),
    ColorStop::new(1.0 / 3.0, 0, 128, 0),
    ColorStop::new(2.0 / 3.0, 255, 255, 0),
    ColorStop::new(1.0, 255, 0, 0),
];

const GRADIENT_2_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 128, 128, 128),
    ColorStop::new(0.25, 128, 128, 128),
    ColorStop::new(0.50, 255, 0, 0),
    ColorStop::new(0.75, 255, 255, 0),
    ColorStop::new(1.00, 0, 128, 0),
];

const GRADIENT_3_STOPS: &[ColorStop] = &[
    ColorStop::new(0.00, 128, 128, 128),
    ColorStop::new(0.25, 0, 0, 255),
    ColorStop::new(0.50, 0, 128, 0),
    ColorStop::new(0.75, 255, 255, 0),
    ColorStop::new(1.00, 255, 0, 0),
];

const GRADIENT_4_STOPS: &[ColorStop] = &[
    ColorStop::new(0.0, 0, 0, 0),
    ColorStop::new(0.2, 128, 128, 128),
    ColorStop::new(0.4, 0, 0, 255),
    ColorStop::new(0.6, 0, 128, 0),
    ColorStop::new(0.8, 255, 255, 0),
    ColorStop::new(1.0, 255, 0, 0),
];

// ─── Interpolation engine ──────────────────────────────────────────────

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn lerp_color(c1: Rgb, c2: Rgb, t: f64) -> Rgb {
    Rgb::new(
        lerp(c1.r as f64, c2.r as f64, t).round() as u8,
        lerp(c1.g as f64, c2.g as f64, t).round() as u8,
        lerp(c1.b as f64, c2.b as f64, t).round() as u8,
    )
}

fn multi_stop(stops: &[ColorStop], t: f64) -> Rgb {
    if t <= 0.0 {
        return stops[0].color;
    }
    if t >= 1.0 {
        return stops[stops.len() - 1].color;
    }
    for i in 1..stops.len() {
        if t <= stops[i].t {
            let ratio = (t - stops[i - 1].t) / (stops[i].t - stops[i - 1].t);
            return lerp_color(stops[i - 1].color, stops[i].color, ratio);
        }
    }
    stops[stops.len() - 1].color
}

/// Evaluate a color scheme at normalized position `t` ∈ [0, 1].
///
/// Values outside the interval clamp to the end colors.
pub fn evaluate(scheme: ColorScheme, t: f64) -> Rgb {
    multi_stop(scheme.stops(), t)
}

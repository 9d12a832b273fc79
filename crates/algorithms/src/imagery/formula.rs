//! Closed-form index formulas.
//!
//! A [`Formula`] is plain data: it names an elementwise expression over an
//! ordered tuple of operands `a, b, c` (the bands listed by the index
//! definition, in that order). Division follows IEEE semantics, so a zero
//! denominator yields `±Inf` or `NaN` rather than an error.

/// Elementwise index expression over ordered operands `a, b, c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Formula {
    /// `(a - b) / (a + b)`
    NormalizedDifference,
    /// `((a + b) - 2c) / ((a + b) + 2c)`
    EnhancedNormalizedDifference,
    /// `(a - b) / (a + b + l) * (1 + l)`
    SoilAdjusted { l: f64 },
    /// `(a - b) / (a + b + l)`
    OffsetNormalizedDifference { l: f64 },
    /// `(a - (b + l)) / (a + b + l)`
    GreenSoilAdjusted { l: f64 },
    /// `0.5 * (120 (a - c) - 200 (b - c))`
    Triangular,
    /// `0.5 * (2a + 1 - sqrt((2a + 1)² - 8 (a - b)))`
    ModifiedSoilAdjusted,
    /// `a / b - 1`
    RatioMinusOne,
    /// `a / b`
    Ratio,
    /// `a b / c²`
    ChlorophyllVegetation,
    /// `(a - b) / ((a - b) + c)`
    VisibleAtmosphericallyResistant,
    /// `2.5 (a - b) / (a + 6b - 7.5c + 1)`
    Enhanced,
    /// `2.5 (a - b) / (a + 2.4b + 1)`
    TwoBandEnhanced,
    /// `a / (a + b + c)`
    ChromaticCoordinate,
    /// `2a - b - c`
    ExcessGreen,
    /// `1.4a - b`
    ExcessRed,
    /// `(2a - b - c) - (1.4b - a)`
    ExcessGreenMinusRed,
    /// `(2a - b - c) / (2a + b + c)`
    GreenLeaf,
    /// `(a² - bc) / (a² + bc)`
    RgbVegetation,
    /// `-0.5 (110 (a - b) - 180 (a - c))`
    TriangularGreenness,
    /// `1.262a - 0.884b - 0.311c`
    ModifiedExcessGreen,
    /// `a / (b^0.667 c^0.333)`
    Vegetative,
    /// `0.441a - 0.811b + 0.385c + 18.78745`
    ColorIndexVegetationExtraction,
    /// `sqrt((a² + b² + c²) / 3)`
    Brightness,
    /// `a / ((a + b) + (a + b))`
    Urban,
    /// `(a - (b + c)) / (a + (b + c))`
    GreenBlueNormalizedDifference,
    /// `(αa - b) / (αa + b)`
    WideDynamicRange { alpha: f64 },
    /// `(a - b) / sqrt(a + b)`
    RenormalizedDifference,
    /// `1.5 (1.2 (a - c) - 2.5 (b - c)) / sqrt((a + 1)² - (b + 1)²)`
    ModifiedTriangular2,
    /// `a - b`
    Difference,
}

impl Formula {
    /// Number of operands the expression consumes.
    pub const fn arity(&self) -> usize {
        use Formula::*;
        match self {
            NormalizedDifference
            | SoilAdjusted { .. }
            | OffsetNormalizedDifference { .. }
            | GreenSoilAdjusted { .. }
            | ModifiedSoilAdjusted
            | RatioMinusOne
            | Ratio
            | TwoBandEnhanced
            | ExcessRed
            | Urban
            | WideDynamicRange { .. }
            | RenormalizedDifference
            | Difference => 2,
            EnhancedNormalizedDifference
            | Triangular
            | ChlorophyllVegetation
            | VisibleAtmosphericallyResistant
            | Enhanced
            | ChromaticCoordinate
            | ExcessGreen
            | ExcessGreenMinusRed
            | GreenLeaf
            | RgbVegetation
            | TriangularGreenness
            | ModifiedExcessGreen
            | Vegetative
            | ColorIndexVegetationExtraction
            | Brightness
            | GreenBlueNormalizedDifference
            | ModifiedTriangular2 => 3,
        }
    }

    /// Evaluate for one pixel. `v` must hold at least [`arity`](Self::arity) values.
    #[inline]
    pub fn apply(&self, v: &[f64]) -> f64 {
        use Formula::*;
        let a = v[0];
        let b = v[1];
        let c = v.get(2).copied().unwrap_or(f64::NAN);

        match *self {
            NormalizedDifference => (a - b) / (a + b),
            EnhancedNormalizedDifference => {
                let s = a + b;
                (s - 2.0 * c) / (s + 2.0 * c)
            }
            SoilAdjusted { l } => (a - b) / (a + b + l) * (1.0 + l),
            OffsetNormalizedDifference { l } => (a - b) / (a + b + l),
            GreenSoilAdjusted { l } => (a - (b + l)) / (a + b + l),
            Triangular => 0.5 * (120.0 * (a - c) - 200.0 * (b - c)),
            ModifiedSoilAdjusted => {
                let t = 2.0 * a + 1.0;
                0.5 * (t - (t * t - 8.0 * (a - b)).sqrt())
            }
            RatioMinusOne => a / b - 1.0,
            Ratio => a / b,
            ChlorophyllVegetation => a * b / (c * c),
            VisibleAtmosphericallyResistant => (a - b) / ((a - b) + c),
            Enhanced => 2.5 * (a - b) / (a + 6.0 * b - 7.5 * c + 1.0),
            TwoBandEnhanced => 2.5 * (a - b) / (a + 2.4 * b + 1.0),
            ChromaticCoordinate => a / (a + b + c),
            ExcessGreen => 2.0 * a - b - c,
            ExcessRed => 1.4 * a - b,
            ExcessGreenMinusRed => (2.0 * a - b - c) - (1.4 * b - a),
            GreenLeaf => (2.0 * a - b - c) / (2.0 * a + b + c),
            RgbVegetation => (a * a - b * c) / (a * a + b * c),
            TriangularGreenness => -0.5 * (110.0 * (a - b) - 180.0 * (a - c)),
            ModifiedExcessGreen => 1.262 * a - 0.884 * b - 0.311 * c,
            Vegetative => a / (b.powf(0.667) * c.powf(0.333)),
            ColorIndexVegetationExtraction => 0.441 * a - 0.811 * b + 0.385 * c + 18.78745,
            Brightness => ((a * a + b * b + c * c) / 3.0).sqrt(),
            Urban => a / ((a + b) + (a + b)),
            GreenBlueNormalizedDifference => (a - (b + c)) / (a + (b + c)),
            WideDynamicRange { alpha } => (alpha * a - b) / (alpha * a + b),
            RenormalizedDifference => (a - b) / (a + b).sqrt(),
            ModifiedTriangular2 => {
                1.5 * (1.2 * (a - c) - 2.5 * (b - c))
                    / ((a + 1.0).powi(2) - (b + 1.0).powi(2)).sqrt()
            }
            Difference => a - b,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-10
    }

    #[test]
    fn normalized_difference() {
        assert!(close(Formula::NormalizedDifference.apply(&[200.0, 50.0]), 0.6));
        assert!(close(Formula::NormalizedDifference.apply(&[50.0, 200.0]), -0.6));
    }

    #[test]
    fn zero_denominator_is_not_an_error() {
        assert!(Formula::NormalizedDifference.apply(&[0.0, 0.0]).is_nan());
        assert_eq!(Formula::Ratio.apply(&[1.0, 0.0]), f64::INFINITY);
        assert!(Formula::ChlorophyllVegetation.apply(&[1.0, 1.0, 0.0]).is_infinite());
    }

    #[test]
    fn soil_adjusted() {
        // (0.8 - 0.2) / (0.8 + 0.2 + 0.5) * 1.5 = 0.6
        let v = Formula::SoilAdjusted { l: 0.5 }.apply(&[0.8, 0.2]);
        assert!(close(v, 0.6));
        // OSAVI: (0.5 - 0.1) / (0.76) * 1.16
        let v = Formula::SoilAdjusted { l: 0.16 }.apply(&[0.5, 0.1]);
        assert!(close(v, 0.4 / 0.76 * 1.16));
    }

    #[test]
    fn green_offsets() {
        let g = Formula::GreenSoilAdjusted { l: 0.16 }.apply(&[1.0, 0.5]);
        assert!(close(g, (1.0 - 0.66) / 1.66));
        let o = Formula::OffsetNormalizedDifference { l: 0.16 }.apply(&[1.0, 0.5]);
        assert!(close(o, 0.5 / 1.66));
    }

    #[test]
    fn modified_soil_adjusted_equal_bands() {
        // a == b collapses the root to 2a + 1, giving zero
        let v = Formula::ModifiedSoilAdjusted.apply(&[3.0, 3.0]);
        assert!(close(v, 0.0));
    }

    #[test]
    fn excess_indices() {
        assert!(close(Formula::ExcessGreen.apply(&[100.0, 50.0, 30.0]), 120.0));
        assert!(close(Formula::ExcessRed.apply(&[100.0, 50.0]), 90.0));
        // (200 - 50 - 30) - (70 - 100) = 150
        assert!(close(Formula::ExcessGreenMinusRed.apply(&[100.0, 50.0, 30.0]), 150.0));
    }

    #[test]
    fn triangular_greenness() {
        // -0.5 * (110 * (10 - 20) - 180 * (10 - 5)) = 1000
        assert!(close(Formula::TriangularGreenness.apply(&[10.0, 20.0, 5.0]), 1000.0));
    }

    #[test]
    fn cive_constant_offset() {
        assert!(close(
            Formula::ColorIndexVegetationExtraction.apply(&[0.0, 0.0, 0.0]),
            18.78745
        ));
    }

    #[test]
    fn brightness_of_gray_is_gray() {
        assert!(close(Formula::Brightness.apply(&[7.0, 7.0, 7.0]), 7.0));
    }

    #[test]
    fn urban_is_quarter_on_equal_bands() {
        assert!(close(Formula::Urban.apply(&[4.0, 4.0]), 0.25));
    }

    #[test]
    fn wide_dynamic_range() {
        let v = Formula::WideDynamicRange { alpha: 0.1 }.apply(&[100.0, 5.0]);
        assert!(close(v, 5.0 / 15.0));
    }

    #[test]
    fn evi_variants() {
        let v = Formula::Enhanced.apply(&[0.5, 0.1, 0.05]);
        assert!(close(v, 2.5 * 0.4 / (0.5 + 0.6 - 0.375 + 1.0)));
        let v = Formula::TwoBandEnhanced.apply(&[0.5, 0.1]);
        assert!(close(v, 2.5 * 0.4 / (0.5 + 0.24 + 1.0)));
    }

    #[test]
    fn arity_matches_operand_use() {
        assert_eq!(Formula::NormalizedDifference.arity(), 2);
        assert_eq!(Formula::Triangular.arity(), 3);
        assert_eq!(Formula::WideDynamicRange { alpha: 0.1 }.arity(), 2);
        assert_eq!(Formula::ModifiedTriangular2.arity(), 3);
    }
}

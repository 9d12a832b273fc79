//! Index registry: the static catalogs of index definitions.
//!
//! Entries are keyed by presentation slot, not by formula. The same label
//! and expression may appear under several ids with different operands or
//! layouts, and each id resolves on its own.

use std::fmt;
use std::str::FromStr;

use agrivis_colormap::ColorScheme;
use agrivis_core::{BandRole, Error, Result, SensorLayout};

use super::formula::Formula;

/// One registry entry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexDefinition {
    /// Stable key used in requests.
    pub id: &'static str,
    /// Display name; also used in the output file name and the legend.
    pub label: &'static str,
    pub formula: Formula,
    /// Operands of `formula`, in order.
    pub required_bands: &'static [BandRole],
    pub supported_layouts: &'static [SensorLayout],
    pub default_colormap: ColorScheme,
}

impl IndexDefinition {
    const fn new(
        id: &'static str,
        label: &'static str,
        formula: Formula,
        required_bands: &'static [BandRole],
        supported_layouts: &'static [SensorLayout],
        default_colormap: ColorScheme,
    ) -> Self {
        Self {
            id,
            label,
            formula,
            required_bands,
            supported_layouts,
            default_colormap,
        }
    }

    pub fn supports(&self, layout: SensorLayout) -> bool {
        self.supported_layouts.contains(&layout)
    }

    /// First required band the layout cannot provide.
    pub fn missing_band(&self, layout: SensorLayout) -> Option<BandRole> {
        self.required_bands
            .iter()
            .copied()
            .find(|&role| !layout.provides(role))
    }

    /// Whether some supported layout provides every required band.
    pub fn is_satisfiable(&self) -> bool {
        self.supported_layouts
            .iter()
            .any(|&l| self.missing_band(l).is_none())
    }
}

/// Which catalog a registry serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Catalog {
    /// Fifteen slots, all drawn with the gray-blue-green-yellow-red gradient.
    Classic,
    /// Seventy-one slots with per-index default colormaps.
    #[default]
    Extended,
}

impl Catalog {
    pub fn name(&self) -> &'static str {
        match self {
            Catalog::Classic => "classic",
            Catalog::Extended => "extended",
        }
    }

    fn entries(&self) -> &'static [IndexDefinition] {
        match self {
            Catalog::Classic => CLASSIC,
            Catalog::Extended => EXTENDED,
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Catalog {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Catalog::Classic),
            "extended" => Ok(Catalog::Extended),
            _ => Err(Error::InvalidParameter {
                name: "catalog",
                value: s.to_string(),
                reason: "expected 'classic' or 'extended'".into(),
            }),
        }
    }
}

/// Read-only view over one catalog.
#[derive(Debug, Clone, Copy)]
pub struct IndexRegistry {
    catalog: Catalog,
    entries: &'static [IndexDefinition],
}

impl IndexRegistry {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            entries: catalog.entries(),
        }
    }

    pub fn catalog(&self) -> Catalog {
        self.catalog
    }

    /// Resolve an id. Surrounding whitespace is ignored.
    pub fn lookup(&self, id: &str) -> Result<&'static IndexDefinition> {
        let key = id.trim();
        let entries: &'static [IndexDefinition] = self.entries;
        entries
            .iter()
            .find(|d| d.id == key)
            .ok_or_else(|| Error::UnknownIndex(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static IndexDefinition> {
        let entries: &'static [IndexDefinition] = self.entries;
        entries.iter()
    }

    /// Entries that list `layout` among their supported layouts.
    pub fn for_layout(&self, layout: SensorLayout) -> impl Iterator<Item = &'static IndexDefinition> {
        self.iter().filter(move |d| d.supports(layout))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}

// ─── Catalog tables ────────────────────────────────────────────────────

const R: BandRole = BandRole::Red;
const G: BandRole = BandRole::Green;
const B: BandRole = BandRole::Blue;
const N: BandRole = BandRole::Nir;

const RGB: &[SensorLayout] = &[SensorLayout::Rgb];
const RGN: &[SensorLayout] = &[SensorLayout::Rgn];
const NGB: &[SensorLayout] = &[SensorLayout::Ngb];
const RGN_NGB: &[SensorLayout] = &[SensorLayout::Rgn, SensorLayout::Ngb];
const ANY: &[SensorLayout] = &[SensorLayout::Rgn, SensorLayout::Ngb, SensorLayout::Rgb];

use ColorScheme::{Blues, Cividis, Greys, Inferno, Jet, Magma, Plasma, RdYlGn, Viridis};
use Formula::*;

const SAVI: Formula = SoilAdjusted { l: 0.5 };
const OSAVI: Formula = SoilAdjusted { l: 0.16 };
const WDRVI: Formula = WideDynamicRange { alpha: 0.1 };

type Def = IndexDefinition;

static EXTENDED: &[IndexDefinition] = &[
    Def::new("1", "NDVI", NormalizedDifference, &[N, R], RGN, RdYlGn),
    Def::new("2", "NDVI_NGB", NormalizedDifference, &[N, B], NGB, RdYlGn),
    Def::new("3", "ENDVI", EnhancedNormalizedDifference, &[N, G, B], NGB, Viridis),
    Def::new("4", "ENDVI_RGN", EnhancedNormalizedDifference, &[N, R, G], RGN, Viridis),
    Def::new("5", "SAVI", SAVI, &[N, R], RGN, Magma),
    Def::new("6", "TVI", Triangular, &[N, R, G], RGN, Viridis),
    Def::new("7", "GNDVI", NormalizedDifference, &[N, G], ANY, RdYlGn),
    Def::new("8", "MSAVI", ModifiedSoilAdjusted, &[N, R], RGN, RdYlGn),
    Def::new("9", "CVI", RatioMinusOne, &[N, R], RGN, RdYlGn),
    Def::new("10", "CVI2", ChlorophyllVegetation, &[N, R, G], RGN, RdYlGn),
    Def::new("11", "PRI", NormalizedDifference, &[N, R], RGN, Cividis),
    Def::new("12", "NDWI", NormalizedDifference, &[G, N], RGN_NGB, Blues),
    Def::new("13", "VARI", VisibleAtmosphericallyResistant, &[G, R, B], RGB, Jet),
    Def::new("14", "EVI", Enhanced, &[N, R, B], RGN, Plasma),
    Def::new("15", "NG", ChromaticCoordinate, &[G, N, R], RGN, Inferno),
    // Visible-light indices
    Def::new("16", "NGRDI", NormalizedDifference, &[G, R], RGB, RdYlGn),
    Def::new("17", "ExG", ExcessGreen, &[G, R, B], RGB, RdYlGn),
    Def::new("18", "ExR", ExcessRed, &[R, G], RGB, Magma),
    Def::new("19", "ExGR", ExcessGreenMinusRed, &[G, R, B], RGB, Viridis),
    Def::new("20", "GLI", GreenLeaf, &[G, R, B], RGB, RdYlGn),
    Def::new("21", "RGBVI", RgbVegetation, &[G, R, B], RGB, RdYlGn),
    Def::new("22", "TGI", TriangularGreenness, &[R, G, B], RGB, Plasma),
    Def::new("23", "NGBDI", NormalizedDifference, &[G, B], RGB, Blues),
    Def::new("24", "VDVI", GreenLeaf, &[G, R, B], RGB, RdYlGn),
    Def::new("25", "MExG", ModifiedExcessGreen, &[G, R, B], RGB, Viridis),
    Def::new("26", "VEG", Vegetative, &[G, R, B], RGB, Cividis),
    Def::new("27", "GCC", ChromaticCoordinate, &[G, R, B], RGB, Inferno),
    Def::new("28", "CIVE", ColorIndexVegetationExtraction, &[R, G, B], RGB, Greys),
    Def::new("29", "NDTI", NormalizedDifference, &[R, G], RGB, Blues),
    Def::new("30", "SCI", NormalizedDifference, &[R, G], RGB, Greys),
    Def::new("31", "NDBI", NormalizedDifference, &[R, G], RGB, Greys),
    Def::new("32", "BI", Brightness, &[R, G, B], RGB, Cividis),
    Def::new("33", "UI", Urban, &[R, B], RGB, Greys),
    // NIR/green/blue indices
    Def::new("34", "NDVI_Mod", NormalizedDifference, &[N, G], NGB, RdYlGn),
    Def::new("35", "GNDVI", NormalizedDifference, &[N, G], NGB, RdYlGn),
    Def::new("36", "NDBI-Blue", NormalizedDifference, &[N, B], NGB, Blues),
    Def::new("37", "NDGI", NormalizedDifference, &[G, B], NGB, RdYlGn),
    Def::new("38", "BGI", NormalizedDifference, &[G, B], NGB, RdYlGn),
    Def::new("39", "EVI_Mod", Enhanced, &[N, G, B], NGB, Plasma),
    Def::new("40", "MSAVI", ModifiedSoilAdjusted, &[N, G], NGB, RdYlGn),
    Def::new("41", "ENDVI", EnhancedNormalizedDifference, &[N, G, B], NGB, Viridis),
    Def::new("42", "GNDWI", NormalizedDifference, &[G, N], NGB, Blues),
    Def::new("43", "CIG", RatioMinusOne, &[N, G], NGB, Cividis),
    Def::new("44", "GBNDVI", GreenBlueNormalizedDifference, &[N, G, B], NGB, RdYlGn),
    Def::new("45", "GSAVI", GreenSoilAdjusted { l: 0.16 }, &[N, G], NGB, Magma),
    Def::new("46", "GRNDVI", NormalizedDifference, &[N, G], NGB, RdYlGn),
    Def::new("48", "GOSAVI", OffsetNormalizedDifference { l: 0.16 }, &[N, G], NGB, Magma),
    Def::new("49", "NDWI", NormalizedDifference, &[G, N], NGB, Blues),
    Def::new("50", "BNDVI", NormalizedDifference, &[N, B], NGB, RdYlGn),
    Def::new("51", "NGBVI", NormalizedDifference, &[G, B], NGB, RdYlGn),
    Def::new("52", "CIg", RatioMinusOne, &[N, G], NGB, Cividis),
    Def::new("53", "BWDRVI", WDRVI, &[N, B], NGB, RdYlGn),
    // Red/green/NIR indices
    Def::new("54", "NDVI", NormalizedDifference, &[N, R], RGN, RdYlGn),
    Def::new("55", "GNDVI", NormalizedDifference, &[N, G], RGN, RdYlGn),
    Def::new("56", "SAVI", SAVI, &[N, R], RGN, Magma),
    Def::new("57", "MSAVI", ModifiedSoilAdjusted, &[N, R], RGN, RdYlGn),
    Def::new("58", "OSAVI", OSAVI, &[N, R], RGN, Magma),
    Def::new("59", "EVI2", TwoBandEnhanced, &[N, R], RGN, Plasma),
    Def::new("60", "SR", Ratio, &[N, R], RGN, Cividis),
    Def::new("61", "RDVI", RenormalizedDifference, &[N, R], RGN, RdYlGn),
    Def::new("62", "WDRVI", WDRVI, &[N, R], RGN, Inferno),
    Def::new("63", "MTVI2", ModifiedTriangular2, &[N, R, G], RGN, Viridis),
    Def::new("64", "DVI", Difference, &[N, R], RGN, RdYlGn),
    Def::new("65", "NDWI", NormalizedDifference, &[G, N], RGN, Blues),
    Def::new("66", "CIg", RatioMinusOne, &[N, G], RGN, Cividis),
    Def::new("67", "CIred", RatioMinusOne, &[N, R], RGN, Cividis),
    Def::new("68", "CVI", ChlorophyllVegetation, &[N, R, G], RGN, RdYlGn),
    Def::new("69", "GRVI", NormalizedDifference, &[G, R], RGN, RdYlGn),
    Def::new("70", "RGRI", Ratio, &[R, G], RGN, RdYlGn),
    Def::new("71", "NGRDI", NormalizedDifference, &[G, R], RGN, RdYlGn),
    Def::new("72", "GLI2", GreenLeaf, &[G, R, B], RGB, RdYlGn),
];

const GRADIENT: ColorScheme = ColorScheme::GrayBlueGreenYellowRed;

static CLASSIC: &[IndexDefinition] = &[
    Def::new("1", "NDVI", NormalizedDifference, &[N, R], RGN, GRADIENT),
    Def::new("2", "NDVI_NGB", NormalizedDifference, &[N, B], NGB, GRADIENT),
    Def::new("3", "ENDVI", EnhancedNormalizedDifference, &[N, G, B], NGB, GRADIENT),
    Def::new("4", "ENDVI_RGN", EnhancedNormalizedDifference, &[N, R, G], RGN, GRADIENT),
    Def::new("5", "SAVI", SAVI, &[N, R], RGN, GRADIENT),
    Def::new("6", "TVI", Triangular, &[N, R, G], RGN, GRADIENT),
    Def::new("7", "GNDVI", NormalizedDifference, &[N, G], ANY, GRADIENT),
    Def::new("8", "MSAVI", ModifiedSoilAdjusted, &[N, R], RGN, GRADIENT),
    Def::new("9", "CVI", RatioMinusOne, &[N, R], RGN, GRADIENT),
    Def::new("10", "CVI2", ChlorophyllVegetation, &[N, R, G], RGN, GRADIENT),
    Def::new("11", "PRI", NormalizedDifference, &[N, R], RGN, GRADIENT),
    Def::new("12", "NDWI", NormalizedDifference, &[G, N], RGN_NGB, GRADIENT),
    Def::new("13", "VARI", VisibleAtmosphericallyResistant, &[G, R, B], ANY, GRADIENT),
    Def::new("14", "EVI", Enhanced, &[N, R, B], RGN, GRADIENT),
    Def::new("15", "NG", ChromaticCoordinate, &[G, N, R], RGN, GRADIENT),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_sizes() {
        assert_eq!(IndexRegistry::new(Catalog::Extended).len(), 71);
        assert_eq!(IndexRegistry::new(Catalog::Classic).len(), 15);
    }

    #[test]
    fn slot_47_does_not_exist() {
        let reg = IndexRegistry::new(Catalog::Extended);
        assert!(matches!(reg.lookup("47"), Err(Error::UnknownIndex(_))));
        assert!(reg.lookup("46").is_ok());
        assert!(reg.lookup("48").is_ok());
    }

    #[test]
    fn ids_are_unique() {
        for catalog in [Catalog::Classic, Catalog::Extended] {
            let reg = IndexRegistry::new(catalog);
            let defs: Vec<_> = reg.iter().collect();
            for (i, a) in defs.iter().enumerate() {
                for b in &defs[i + 1..] {
                    assert_ne!(a.id, b.id, "duplicate id in {}", catalog);
                }
            }
        }
    }

    #[test]
    fn arity_matches_required_bands() {
        for catalog in [Catalog::Classic, Catalog::Extended] {
            for def in IndexRegistry::new(catalog).iter() {
                assert_eq!(
                    def.formula.arity(),
                    def.required_bands.len(),
                    "{} {} ({})",
                    catalog,
                    def.id,
                    def.label
                );
                assert!(!def.supported_layouts.is_empty());
            }
        }
    }

    #[test]
    fn every_entry_satisfiable_except_evi() {
        // EVI needs NIR, red and blue together, which no layout carries.
        for catalog in [Catalog::Classic, Catalog::Extended] {
            for def in IndexRegistry::new(catalog).iter() {
                if def.id == "14" {
                    assert!(!def.is_satisfiable());
                } else {
                    assert!(def.is_satisfiable(), "{} {} unsatisfiable", catalog, def.id);
                }
            }
        }
    }

    #[test]
    fn duplicate_labels_resolve_independently() {
        let reg = IndexRegistry::new(Catalog::Extended);
        let gndvi: Vec<_> = reg.iter().filter(|d| d.label == "GNDVI").map(|d| d.id).collect();
        assert_eq!(gndvi, vec!["7", "35", "55"]);
        assert_eq!(reg.lookup("35").unwrap().supported_layouts, NGB);
        assert_eq!(reg.lookup("55").unwrap().supported_layouts, RGN);
        assert_eq!(reg.lookup("7").unwrap().supported_layouts.len(), 3);
    }

    #[test]
    fn catalogs_disagree_on_vari_layouts() {
        let ext = IndexRegistry::new(Catalog::Extended).lookup("13").unwrap();
        let classic = IndexRegistry::new(Catalog::Classic).lookup("13").unwrap();
        assert_eq!(ext.supported_layouts, RGB);
        assert_eq!(classic.supported_layouts.len(), 3);
        assert_eq!(classic.missing_band(SensorLayout::Rgn), Some(BandRole::Blue));
    }

    #[test]
    fn classic_defaults_to_gradient() {
        for def in IndexRegistry::new(Catalog::Classic).iter() {
            assert_eq!(def.default_colormap, ColorScheme::GrayBlueGreenYellowRed);
        }
    }

    #[test]
    fn lookup_trims_whitespace() {
        let reg = IndexRegistry::default();
        assert_eq!(reg.lookup(" 1 ").unwrap().label, "NDVI");
        assert!(matches!(reg.lookup("999"), Err(Error::UnknownIndex(id)) if id == "999"));
    }

    #[test]
    fn for_layout_filters() {
        let reg = IndexRegistry::new(Catalog::Extended);
        assert!(reg.for_layout(SensorLayout::Rgb).all(|d| d.supports(SensorLayout::Rgb)));
        assert_eq!(reg.for_layout(SensorLayout::Rgb).count(), 21);
    }

    #[test]
    fn catalog_parsing() {
        assert_eq!("Classic".parse::<Catalog>().unwrap(), Catalog::Classic);
        assert_eq!(" extended ".parse::<Catalog>().unwrap(), Catalog::Extended);
        assert!("basic".parse::<Catalog>().is_err());
    }
}

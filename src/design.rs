//! Climate-zone driven radiant design parameters.
//!
//! One canonical table maps an ASHRAE or California (CEC) climate zone to an
//! insulation multiplier and a heating design supply water temperature. Every
//! other design figure (insulation thicknesses, loop temperatures, panel
//! constructions) is derived from those two numbers and fixed constants.

use std::fmt;

use tracing::{info, warn};

use crate::units::{delta_r_to_k, f_to_c, inches_to_m};

/// Insulation multiplier used when the model has no climate zone.
pub const DEFAULT_INSULATION_MULT: u32 = 4;
/// Heating design supply water temperature (°F) used when the model has no climate zone.
pub const DEFAULT_HW_SUPPLY_F: f64 = 110.0;

/// Hot water loop design temperature difference (°R).
pub const HW_DELTA_R: f64 = 10.0;
/// Chilled water design supply temperature (°F).
pub const CHW_SUPPLY_F: f64 = 55.0;
/// Chilled water loop design temperature difference (°R).
pub const CHW_DELTA_R: f64 = 5.0;
/// Zone heating threshold temperature for the radiant coils (°F).
pub const ZONE_HTG_THRESHOLD_F: f64 = 68.0;
/// Zone cooling threshold temperature for the radiant coils (°F).
pub const ZONE_CLG_THRESHOLD_F: f64 = 74.0;
/// Coil throttling range, 2 °F either side of the control temperature (°R).
pub const THROTTLING_RANGE_R: f64 = 4.0;
/// Hydronic tubing inside diameter (m); 5/8 in. ID, 3/4 in. OD.
pub const TUBING_INSIDE_DIAMETER_M: f64 = 0.015875;
/// Circuit length used to derive the number of circuits (m).
pub const CIRCUIT_LENGTH_M: f64 = 106.7;
/// Spacing between embedded tubes (m).
pub const TUBE_SPACING_M: f64 = 0.116;

/// A climate zone designation, normalized from the usual spellings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClimateZone {
    /// ASHRAE 169 zone such as `5A` or `7`.
    Ashrae(String),
    /// California Title 24 zone `CEC1` to `CEC16`, stored as its number.
    Cec(u8),
}

impl ClimateZone {
    /// Parses `"5A"`, `"ASHRAE 169-2013-5A"`, `"ClimateZone 5A"`,
    /// `"CEC T24-CEC12"` or `"CEC12"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use radiant_setpoint::design::ClimateZone;
    ///
    /// assert_eq!(ClimateZone::parse("ASHRAE 169-2013-4A"), Some(ClimateZone::Ashrae("4A".into())));
    /// assert_eq!(ClimateZone::parse("CEC T24-CEC12"), Some(ClimateZone::Cec(12)));
    /// assert_eq!(ClimateZone::parse("  "), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let code = trimmed
            .strip_prefix("ClimateZone ")
            .or_else(|| trimmed.strip_prefix("CEC T24 "))
            .or_else(|| trimmed.rsplit_once('-').map(|(_, tail)| tail))
            .unwrap_or(trimmed)
            .trim()
            .to_ascii_uppercase();

        if code.is_empty() {
            return None;
        }
        if let Some(num) = code.strip_prefix("CEC") {
            return num.parse().ok().filter(|n| (1..=16).contains(n)).map(Self::Cec);
        }
        Some(Self::Ashrae(code))
    }

    /// Insulation multiplier and heating design supply water temperature (°F).
    pub fn design_row(&self) -> (u32, f64) {
        match self {
            Self::Cec(15) => (2, 100.0),
            Self::Cec(3..=14) => (3, 100.0),
            Self::Cec(1 | 2) => (4, 100.0),
            Self::Cec(16) => (4, 110.0),
            Self::Cec(_) => (4, 100.0),
            Self::Ashrae(code) => match code.as_str() {
                "1" => (2, 90.0),
                "2" | "2A" | "2B" => (2, 100.0),
                "3" | "3A" | "3B" | "3C" => (3, 100.0),
                "4" | "4A" | "4B" | "4C" => (4, 100.0),
                "5" | "5A" | "5B" | "5C" => (4, 110.0),
                "6" | "6A" | "6B" => (4, 120.0),
                "7" | "8" => (5, 120.0),
                _ => (4, 100.0),
            },
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ashrae(code) => f.write_str(code),
            Self::Cec(n) => write!(f, "CEC{n}"),
        }
    }
}

/// Surface roughness class of an opaque material.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Roughness {
    VeryRough,
    Rough,
    MediumRough,
    Smooth,
}

/// Homogeneous opaque layer of a construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub roughness: Roughness,
    pub thickness_m: f64,
    pub conductivity_w_mk: f64,
    pub density_kg_m3: f64,
    pub specific_heat_j_kgk: f64,
}

impl Material {
    fn new(
        name: impl Into<String>,
        roughness: Roughness,
        thickness_m: f64,
        conductivity_w_mk: f64,
        density_kg_m3: f64,
        specific_heat_j_kgk: f64,
    ) -> Self {
        Self {
            name: name.into(),
            roughness,
            thickness_m,
            conductivity_w_mk,
            density_kg_m3,
            specific_heat_j_kgk,
        }
    }

    /// Thermal resistance of the layer (m²·K/W).
    pub fn resistance(&self) -> f64 {
        self.thickness_m / self.conductivity_w_mk
    }
}

/// Layered construction with an embedded hydronic source.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalSourceConstruction {
    pub name: String,
    /// Layers from outside to inside.
    pub layers: Vec<Material>,
    /// The source sits after this many layers (1-based count).
    pub source_after_layer: usize,
    /// Temperature calculation is requested after this many layers.
    pub temperature_after_layer: usize,
    pub tube_spacing_m: f64,
    /// Dimensions for the CTF calculation.
    pub ctf_dimensions: u8,
}

impl InternalSourceConstruction {
    /// Total layer resistance, excluding surface films (m²·K/W).
    pub fn resistance(&self) -> f64 {
        self.layers.iter().map(Material::resistance).sum()
    }
}

/// Design parameters of a radiant ceiling panel system for one climate zone.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiantDesign {
    pub climate_zone: Option<ClimateZone>,
    pub insulation_mult: u32,
    pub hw_supply_f: f64,
    pub hw_supply_c: f64,
    pub hw_delta_k: f64,
    pub chw_supply_f: f64,
    pub chw_supply_c: f64,
    pub chw_delta_k: f64,
    pub zone_htg_threshold_c: f64,
    pub zone_clg_threshold_c: f64,
    pub throttling_range_k: f64,
    pub slab_insulation_m: f64,
    pub ext_insulation_m: f64,
    pub roof_insulation_m: f64,
    pub interior_panel: InternalSourceConstruction,
    pub exterior_panel: InternalSourceConstruction,
}

impl RadiantDesign {
    /// Derives the design for `climate_zone`, falling back to zone-5 values
    /// with a warning when none is known.
    pub fn for_climate_zone(climate_zone: Option<ClimateZone>) -> Self {
        let (mult, hw_supply_f) = match &climate_zone {
            Some(cz) => {
                let (mult, hw) = cz.design_row();
                info!(
                    climate_zone = %cz,
                    "using R-{} slab insulation, R-{} exterior floor insulation, \
                     R-{} exterior roof insulation, and {hw}F heating design supply water temperature",
                    mult * 5,
                    (mult + 1) * 5,
                    (mult + 1) * 10,
                );
                (mult, hw)
            }
            None => {
                warn!(
                    "no climate zone for radiant slab insulation; defaulting to climate zone 5, \
                     R-20 insulation, {DEFAULT_HW_SUPPLY_F}F heating design supply water temperature"
                );
                (DEFAULT_INSULATION_MULT, DEFAULT_HW_SUPPLY_F)
            }
        };

        let m = f64::from(mult);
        let (interior_panel, exterior_panel) = panel_constructions(mult);

        Self {
            climate_zone,
            insulation_mult: mult,
            hw_supply_f,
            hw_supply_c: f_to_c(hw_supply_f),
            hw_delta_k: delta_r_to_k(HW_DELTA_R),
            chw_supply_f: CHW_SUPPLY_F,
            chw_supply_c: f_to_c(CHW_SUPPLY_F),
            chw_delta_k: delta_r_to_k(CHW_DELTA_R),
            zone_htg_threshold_c: f_to_c(ZONE_HTG_THRESHOLD_F),
            zone_clg_threshold_c: f_to_c(ZONE_CLG_THRESHOLD_F),
            throttling_range_k: delta_r_to_k(THROTTLING_RANGE_R),
            slab_insulation_m: inches_to_m(m),
            ext_insulation_m: inches_to_m(m + 1.0),
            roof_insulation_m: inches_to_m((m + 1.0) * 2.0),
            interior_panel,
            exterior_panel,
        }
    }

    /// Nominal R-values (IP) of the slab, exterior floor and roof insulation.
    pub fn nominal_r_values(&self) -> (u32, u32, u32) {
        let m = self.insulation_mult;
        (m * 5, (m + 1) * 5, (m + 1) * 10)
    }
}

fn panel_constructions(mult: u32) -> (InternalSourceConstruction, InternalSourceConstruction) {
    let concrete = Material::new(
        "Radiant Slab Concrete - 1.5 in",
        Roughness::MediumRough,
        0.127,
        2.31,
        2322.0,
        832.0,
    );
    let gypsum = Material::new(
        "Radiant Panel Gypsum - 0.625 in",
        Roughness::Rough,
        0.0159,
        0.16,
        640.0,
        1150.0,
    );
    let insulation = Material::new(
        "Radiant Panel Insulation - 2 in",
        Roughness::Rough,
        0.05,
        0.02,
        56.0,
        1210.0,
    );
    let aluminum = Material::new(
        "Radiant Panel Aluminum - 1 mm",
        Roughness::Smooth,
        0.001,
        13.0,
        8230.0,
        470.0,
    );
    let roof_membrane = Material::new(
        "Roof Membrane - Highly Reflective",
        Roughness::VeryRough,
        0.0095,
        0.16,
        1121.29,
        1460.0,
    );
    let roof_inches = (mult + 1) * 2;
    let roof_insulation = Material::new(
        format!("Radiant Exterior Ceiling Insulation - {roof_inches} in."),
        Roughness::Rough,
        inches_to_m(f64::from(roof_inches)),
        0.02,
        56.06,
        1210.0,
    );

    let interior = InternalSourceConstruction {
        name: "radiant_pnl_construction".to_string(),
        layers: vec![
            concrete.clone(),
            gypsum.clone(),
            insulation.clone(),
            aluminum.clone(),
        ],
        source_after_layer: 2,
        temperature_after_layer: 2,
        tube_spacing_m: TUBE_SPACING_M,
        ctf_dimensions: 2,
    };
    let exterior = InternalSourceConstruction {
        name: "radiant_pnl_ext_construction".to_string(),
        layers: vec![
            roof_membrane,
            roof_insulation,
            concrete,
            gypsum,
            insulation,
            aluminum,
        ],
        source_after_layer: 5,
        temperature_after_layer: 5,
        tube_spacing_m: TUBE_SPACING_M,
        ctf_dimensions: 2,
    };
    (interior, exterior)
}

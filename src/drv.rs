//! Daily Reference Values for adults.
//!
//! Values follow published adult reference intakes. B1 and B3 are defined
//! per megajoule of energy intake and omega-3/6 as energy-share
//! percentages, hence the formulas over [`ENERGY_INTAKE_KCAL`].

use crate::profile::NutrientProfile;

/// Assumed adult energy intake in kcal.
pub const ENERGY_INTAKE_KCAL: f64 = 2500.0;

const KCAL_PER_MEGAJOULE: f64 = 238.83;

// Vitamin (and choline) DRVs.
pub const DRV_VITAMIN_A: f64 = 650.0; // mcg RE
pub const DRV_VITAMIN_B1: f64 = 0.1 * ENERGY_INTAKE_KCAL / KCAL_PER_MEGAJOULE; // mg
pub const DRV_VITAMIN_B2: f64 = 1.6; // mg
pub const DRV_VITAMIN_B3: f64 = 1.6 * ENERGY_INTAKE_KCAL / KCAL_PER_MEGAJOULE; // mg NE
pub const DRV_VITAMIN_B5: f64 = 5.0; // mg
pub const DRV_VITAMIN_B6: f64 = 1.6; // mg
pub const DRV_VITAMIN_B7: f64 = 40.0; // mcg
pub const DRV_VITAMIN_B9: f64 = 330.0; // mcg DFE
pub const DRV_VITAMIN_B12: f64 = 4.0; // mcg
pub const DRV_VITAMIN_C: f64 = 95.0; // mg
pub const DRV_VITAMIN_D: f64 = 15.0; // mcg
pub const DRV_VITAMIN_E: f64 = 11.0; // mg
pub const DRV_VITAMIN_K: f64 = 70.0; // mcg
pub const DRV_CHOLINE: f64 = 400.0; // mg

// Mineral DRVs.
pub const DRV_POTASSIUM: f64 = 3500.0; // mg
pub const DRV_SODIUM: f64 = 2000.0; // mg
pub const DRV_CALCIUM: f64 = 1000.0; // mg
pub const DRV_PHOSPHORUS: f64 = 550.0; // mg
pub const DRV_MAGNESIUM: f64 = 300.0; // mg
pub const DRV_IRON: f64 = 16.0; // mg
pub const DRV_ZINC: f64 = 10.125; // mg, average of four PRIs depending on LPI
pub const DRV_MANGANESE: f64 = 3.0; // mg
pub const DRV_COPPER: f64 = 1.3; // mg
pub const DRV_MOLYBDENUM: f64 = 65.0; // mcg
pub const DRV_SELENIUM: f64 = 70.0; // mcg
pub const DRV_CHLORIDE: f64 = 3100.0; // mg

// Fatty-acid DRVs, expressed as energy-intake shares.
pub const DRV_OMEGA_3: f64 = 0.005 * ENERGY_INTAKE_KCAL / 9.0 * 1000.0; // mg ALA
pub const DRV_OMEGA_6: f64 = 0.04 * ENERGY_INTAKE_KCAL / 9.0 * 1000.0; // mg LA

/// One labeled spoke of a DRV wheel: reference-intake fraction, or `None`
/// when the underlying nutrient is unmeasured.
#[derive(Clone, Debug, PartialEq)]
pub struct WheelEntry {
    pub label: &'static str,
    pub ratio: Option<f64>,
}

impl WheelEntry {
    fn new(label: &'static str, ratio: Option<f64>) -> Self {
        Self { label, ratio }
    }
}

/// Vitamin wheel entries. Biotin (B7) is excluded: its source coverage is
/// too unreliable to chart.
pub fn vitamin_entries(profile: &NutrientProfile) -> Vec<WheelEntry> {
    vec![
        WheelEntry::new("A", profile.vitamin_a.ratio_of(DRV_VITAMIN_A)),
        WheelEntry::new("B1", profile.vitamin_b1.ratio_of(DRV_VITAMIN_B1)),
        WheelEntry::new("B2", profile.vitamin_b2.ratio_of(DRV_VITAMIN_B2)),
        WheelEntry::new("B3", profile.vitamin_b3.ratio_of(DRV_VITAMIN_B3)),
        WheelEntry::new("B5", profile.vitamin_b5.ratio_of(DRV_VITAMIN_B5)),
        WheelEntry::new("B6", profile.vitamin_b6.ratio_of(DRV_VITAMIN_B6)),
        WheelEntry::new("B9", profile.vitamin_b9.ratio_of(DRV_VITAMIN_B9)),
        WheelEntry::new("B12", profile.vitamin_b12.ratio_of(DRV_VITAMIN_B12)),
        WheelEntry::new("C", profile.vitamin_c.ratio_of(DRV_VITAMIN_C)),
        WheelEntry::new("D", profile.vitamin_d.ratio_of(DRV_VITAMIN_D)),
        WheelEntry::new("E", profile.vitamin_e.ratio_of(DRV_VITAMIN_E)),
        WheelEntry::new("K", profile.vitamin_k.ratio_of(DRV_VITAMIN_K)),
        WheelEntry::new("Choline", profile.choline.ratio_of(DRV_CHOLINE)),
    ]
}

/// Mineral wheel entries. Molybdenum and chloride are excluded for the same
/// coverage reason as biotin.
pub fn mineral_entries(profile: &NutrientProfile) -> Vec<WheelEntry> {
    vec![
        WheelEntry::new("Potassium", profile.potassium.ratio_of(DRV_POTASSIUM)),
        WheelEntry::new("Sodium", profile.sodium.ratio_of(DRV_SODIUM)),
        WheelEntry::new("Calcium", profile.calcium.ratio_of(DRV_CALCIUM)),
        WheelEntry::new("Phosphorus", profile.phosphorus.ratio_of(DRV_PHOSPHORUS)),
        WheelEntry::new("Magnesium", profile.magnesium.ratio_of(DRV_MAGNESIUM)),
        WheelEntry::new("Iron", profile.iron.ratio_of(DRV_IRON)),
        WheelEntry::new("Zinc", profile.zinc.ratio_of(DRV_ZINC)),
        WheelEntry::new("Manganese", profile.manganese.ratio_of(DRV_MANGANESE)),
        WheelEntry::new("Copper", profile.copper.ratio_of(DRV_COPPER)),
        WheelEntry::new("Selenium", profile.selenium.ratio_of(DRV_SELENIUM)),
    ]
}

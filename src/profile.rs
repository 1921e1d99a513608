//! Nutrient derivation: raw dataset row + serving size -> scaled profile.
//!
//! Every tracked field is read positionally, parsed, and multiplied by
//! `serving_grams / 100` (the sheet is per-100g). Missing source data is
//! carried as an explicit [`Nutrient::UNKNOWN`] rather than a sentinel
//! number; rendering branches on presence, never on sign.

use crate::dataset::{RawNutrientRecord, UNMEASURED, columns};
use crate::foundation::error::{NutrigraphError, NutrigraphResult};

/// A single nutrient quantity that may be unmeasured in the source sheet.
///
/// Unknown is not zero: zero means "measured, none present" while unknown
/// means "the sheet has no value". The two only collapse where an explicit
/// policy in [`NutrientProfile::derive`] says so.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Nutrient(Option<f64>);

impl Nutrient {
    pub const UNKNOWN: Self = Self(None);

    pub fn known(value: f64) -> Self {
        Self(Some(value))
    }

    pub fn value(self) -> Option<f64> {
        self.0
    }

    pub fn is_unknown(self) -> bool {
        self.0.is_none()
    }

    /// Fraction of a reference intake, `None` when unmeasured.
    pub fn ratio_of(self, reference: f64) -> Option<f64> {
        self.0.map(|v| v / reference)
    }
}

/// The derived, serving-scaled nutrient entity for one request.
///
/// Immutable after construction; the sole input to the layout engine.
#[derive(Clone, Debug)]
pub struct NutrientProfile {
    pub identifier: i64,
    pub name: String,
    pub serving_grams: i64,
    pub description: String,

    // Energy and macros (g unless noted).
    pub kcalories: Nutrient,
    pub fat: Nutrient,
    pub carbohydrates: Nutrient,
    pub protein: Nutrient,
    pub fiber: Nutrient,
    pub sugars: Nutrient,
    pub water: Nutrient,
    pub net_carbs: Nutrient,
    pub saturated_fat: Nutrient,
    pub monounsaturated_fat: Nutrient, // mg
    pub polyunsaturated_fat: Nutrient, // mg
    pub cholesterol: Nutrient,         // mg
    pub omega_3: Nutrient,             // mg
    pub omega_6: Nutrient,             // mg
    pub trans_fat: Nutrient,

    // Vitamins (sheet units; mcg for A/B7/B9/B12/D/K, mg otherwise).
    pub vitamin_a: Nutrient,
    pub vitamin_b1: Nutrient,
    pub vitamin_b2: Nutrient,
    pub vitamin_b3: Nutrient,
    pub vitamin_b5: Nutrient,
    pub vitamin_b6: Nutrient,
    pub vitamin_b7: Nutrient,
    pub vitamin_b9: Nutrient,
    pub vitamin_b12: Nutrient,
    pub vitamin_c: Nutrient,
    pub vitamin_d: Nutrient,
    pub vitamin_e: Nutrient,
    pub vitamin_k: Nutrient,
    pub choline: Nutrient, // mg

    // Minerals (mg; mcg for molybdenum and selenium).
    pub potassium: Nutrient,
    pub sodium: Nutrient,
    pub calcium: Nutrient,
    pub phosphorus: Nutrient,
    pub magnesium: Nutrient,
    pub iron: Nutrient,
    pub zinc: Nutrient,
    pub manganese: Nutrient,
    pub copper: Nutrient,
    pub molybdenum: Nutrient,
    pub selenium: Nutrient,
    pub chloride: Nutrient,

    // Amino acids (mg). Derived for completeness; not rendered.
    pub histidine: Nutrient,
    pub isoleucine: Nutrient,
    pub leucine: Nutrient,
    pub lysine: Nutrient,
    pub methionine: Nutrient,
    pub phenylalanine: Nutrient,
    pub threonine: Nutrient,
    pub tryptophan: Nutrient,
    pub valine: Nutrient,
}

impl NutrientProfile {
    /// Derive a serving-scaled profile from a raw row.
    ///
    /// A non-numeric value that is not the `NULL` sentinel indicates a wrong
    /// column offset and is fatal: the batch must stop rather than produce
    /// silently wrong nutrient values.
    pub fn derive(
        record: &RawNutrientRecord<'_>,
        serving_grams: i64,
        description: &str,
    ) -> NutrigraphResult<Self> {
        let identifier: i64 = record.identifier().parse().map_err(|_| {
            NutrigraphError::data_integrity(format!(
                "non-integer identifier column: \"{}\"",
                record.identifier()
            ))
        })?;
        let factor = serving_grams as f64 / 100.0;

        let read = |column: usize| -> NutrigraphResult<Nutrient> {
            let Some(raw) = record.field(column) else {
                return Err(NutrigraphError::data_integrity(format!(
                    "row for FDC ID {identifier} is missing column {column}"
                )));
            };
            if raw == UNMEASURED {
                return Ok(Nutrient::UNKNOWN);
            }
            let value: f64 = raw.parse().map_err(|_| {
                NutrigraphError::data_integrity(format!(
                    "non-numeric value for FDC ID {identifier} at column {column}: \"{raw}\""
                ))
            })?;
            Ok(Nutrient::known(value * factor))
        };

        let mut profile = Self {
            identifier,
            name: record.name().to_owned(),
            serving_grams,
            description: description.to_owned(),

            kcalories: read(columns::KCALORIES)?,
            fat: read(columns::FAT)?,
            carbohydrates: read(columns::CARBOHYDRATES)?,
            protein: read(columns::PROTEIN)?,
            fiber: read(columns::FIBER)?,
            sugars: read(columns::SUGARS)?,
            water: read(columns::WATER)?,
            net_carbs: read(columns::NET_CARBS)?,
            saturated_fat: read(columns::SATURATED_FAT)?,
            monounsaturated_fat: read(columns::MONOUNSATURATED_FAT)?,
            polyunsaturated_fat: read(columns::POLYUNSATURATED_FAT)?,
            cholesterol: read(columns::CHOLESTEROL)?,
            omega_3: read(columns::OMEGA_3)?,
            omega_6: read(columns::OMEGA_6)?,
            trans_fat: read(columns::TRANS_FAT)?,

            vitamin_a: read(columns::VITAMIN_A)?,
            vitamin_b1: read(columns::VITAMIN_B1)?,
            vitamin_b2: read(columns::VITAMIN_B2)?,
            vitamin_b3: read(columns::VITAMIN_B3)?,
            vitamin_b5: read(columns::VITAMIN_B5)?,
            vitamin_b6: read(columns::VITAMIN_B6)?,
            vitamin_b7: read(columns::VITAMIN_B7)?,
            vitamin_b9: read(columns::VITAMIN_B9)?,
            vitamin_b12: read(columns::VITAMIN_B12)?,
            vitamin_c: read(columns::VITAMIN_C)?,
            vitamin_d: read(columns::VITAMIN_D)?,
            vitamin_e: read(columns::VITAMIN_E)?,
            vitamin_k: read(columns::VITAMIN_K)?,
            choline: read(columns::CHOLINE)?,

            potassium: read(columns::POTASSIUM)?,
            sodium: read(columns::SODIUM)?,
            calcium: read(columns::CALCIUM)?,
            phosphorus: read(columns::PHOSPHORUS)?,
            magnesium: read(columns::MAGNESIUM)?,
            iron: read(columns::IRON)?,
            zinc: read(columns::ZINC)?,
            manganese: read(columns::MANGANESE)?,
            copper: read(columns::COPPER)?,
            molybdenum: read(columns::MOLYBDENUM)?,
            selenium: read(columns::SELENIUM)?,
            chloride: read(columns::CHLORIDE)?,

            histidine: read(columns::HISTIDINE)?,
            isoleucine: read(columns::ISOLEUCINE)?,
            leucine: read(columns::LEUCINE)?,
            lysine: read(columns::LYSINE)?,
            methionine: read(columns::METHIONINE)?,
            phenylalanine: read(columns::PHENYLALANINE)?,
            threonine: read(columns::THREONINE)?,
            tryptophan: read(columns::TRYPTOPHAN)?,
            valine: read(columns::VALINE)?,
        };

        // The sheet marks fat subcomponents NULL instead of zero when total
        // fat is negligible. Treat unknown total fat the same way.
        if profile.fat.value().is_none_or(|fat| fat < 1.0) {
            profile.saturated_fat = Nutrient::known(0.0);
            profile.monounsaturated_fat = Nutrient::known(0.0);
            profile.polyunsaturated_fat = Nutrient::known(0.0);
            profile.omega_3 = Nutrient::known(0.0);
            profile.omega_6 = Nutrient::known(0.0);
            profile.trans_fat = Nutrient::known(0.0);
        }

        // Sugars are assumed present but unmeasured, never truly absent.
        if profile.sugars.is_unknown() {
            profile.sugars = Nutrient::known(0.0);
        }

        for (field, nutrient) in [
            ("chloride", profile.chloride),
            ("molybdenum", profile.molybdenum),
            ("vitamin B7", profile.vitamin_b7),
        ] {
            if nutrient.is_unknown() {
                return Err(NutrigraphError::data_integrity(format!(
                    "always-present field '{field}' is unmeasured for FDC ID {identifier}"
                )));
            }
        }

        Ok(profile)
    }

    /// The macro quantities the layout engine partitions.
    ///
    /// Geometry cannot be laid out around an unknown core macro, so absence
    /// here is a render fault. Fat subcomponents default to zero: a food may
    /// legitimately lack a measured fatty-acid split while total fat is known.
    pub fn macros(&self) -> NutrigraphResult<MacroView> {
        let require = |field: &str, nutrient: Nutrient| -> NutrigraphResult<f64> {
            nutrient.value().ok_or_else(|| {
                NutrigraphError::render(format!(
                    "macro value '{field}' is unknown for FDC ID {}; cannot lay out",
                    self.identifier
                ))
            })
        };

        Ok(MacroView {
            fat: require("fat", self.fat)?,
            carbohydrates: require("carbohydrates", self.carbohydrates)?,
            protein: require("protein", self.protein)?,
            fiber: require("fiber", self.fiber)?,
            sugars: require("sugars", self.sugars)?,
            net_carbs: require("net carbs", self.net_carbs)?,
            saturated_fat: self.saturated_fat.value().unwrap_or(0.0),
            monounsaturated_fat: self.monounsaturated_fat.value().unwrap_or(0.0) / 1000.0,
            polyunsaturated_fat: self.polyunsaturated_fat.value().unwrap_or(0.0) / 1000.0,
        })
    }
}

/// Known macro quantities in grams, mg fields already converted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacroView {
    pub fat: f64,
    pub carbohydrates: f64,
    pub protein: f64,
    pub fiber: f64,
    pub sugars: f64,
    pub net_carbs: f64,
    pub saturated_fat: f64,
    pub monounsaturated_fat: f64,
    pub polyunsaturated_fat: f64,
}

impl MacroView {
    /// Denominator of the proportional bar: fat + carbohydrates + protein.
    pub fn total(&self) -> f64 {
        self.fat + self.carbohydrates + self.protein
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    /// Build a one-row dataset with 88 columns, all "0" except overrides.
    fn dataset_with(overrides: &[(usize, &str)]) -> Dataset {
        let mut cells: Vec<String> = vec!["0".to_owned(); 88];
        cells[columns::IDENTIFIER] = "170567".to_owned();
        cells[columns::NAME] = "Cheddar cheese".to_owned();
        for &(column, value) in overrides {
            cells[column] = value.to_owned();
        }

        let header: Vec<String> = (0..88).map(|i| format!("c{i}")).collect();
        let source = format!("{}\n{}\n", header.join(","), cells.join(","));
        Dataset::from_reader(source.as_bytes()).unwrap()
    }

    fn derive_with(overrides: &[(usize, &str)], serving_grams: i64) -> NutrigraphResult<NutrientProfile> {
        let dataset = dataset_with(overrides);
        let record = dataset.lookup(170567).unwrap();
        NutrientProfile::derive(&record, serving_grams, "test serving")
    }

    #[test]
    fn scales_every_field_by_serving_over_100() {
        let profile = derive_with(
            &[
                (columns::PROTEIN, "20"),
                (columns::FAT, "4"),
                (columns::CALCIUM, "710"),
            ],
            150,
        )
        .unwrap();

        assert_eq!(profile.protein, Nutrient::known(30.0));
        assert_eq!(profile.fat, Nutrient::known(6.0));
        assert_eq!(profile.calcium, Nutrient::known(1065.0));
        assert_eq!(profile.serving_grams, 150);
        assert_eq!(profile.name, "Cheddar cheese");
    }

    #[test]
    fn unmeasured_values_become_unknown_not_zero() {
        let profile = derive_with(&[(columns::VITAMIN_D, "NULL"), (columns::FAT, "10")], 100).unwrap();
        assert!(profile.vitamin_d.is_unknown());
        assert_ne!(profile.vitamin_d, Nutrient::known(0.0));
    }

    #[test]
    fn negligible_fat_zeroes_all_subcomponents() {
        let profile = derive_with(
            &[
                (columns::FAT, "0.5"),
                (columns::SATURATED_FAT, "NULL"),
                (columns::MONOUNSATURATED_FAT, "NULL"),
                (columns::POLYUNSATURATED_FAT, "NULL"),
                (columns::OMEGA_3, "NULL"),
                (columns::OMEGA_6, "NULL"),
                (columns::TRANS_FAT, "NULL"),
            ],
            100,
        )
        .unwrap();

        for nutrient in [
            profile.saturated_fat,
            profile.monounsaturated_fat,
            profile.polyunsaturated_fat,
            profile.omega_3,
            profile.omega_6,
            profile.trans_fat,
        ] {
            assert_eq!(nutrient, Nutrient::known(0.0));
        }
    }

    #[test]
    fn fat_cascade_overrides_measured_subcomponents_too() {
        let profile = derive_with(
            &[(columns::FAT, "0.2"), (columns::SATURATED_FAT, "0.1")],
            100,
        )
        .unwrap();
        assert_eq!(profile.saturated_fat, Nutrient::known(0.0));
    }

    #[test]
    fn unknown_fat_triggers_the_cascade() {
        let profile = derive_with(&[(columns::FAT, "NULL"), (columns::OMEGA_3, "250")], 100).unwrap();
        assert!(profile.fat.is_unknown());
        assert_eq!(profile.omega_3, Nutrient::known(0.0));
    }

    #[test]
    fn unmeasured_sugars_become_zero() {
        let profile = derive_with(&[(columns::SUGARS, "NULL"), (columns::FAT, "10")], 100).unwrap();
        assert_eq!(profile.sugars, Nutrient::known(0.0));
    }

    #[test]
    fn non_numeric_non_sentinel_value_is_fatal() {
        let err = derive_with(&[(columns::KCALORIES, "lots")], 100).unwrap_err();
        match err {
            NutrigraphError::DataIntegrity(msg) => {
                assert!(msg.contains("170567"), "message was: {msg}");
                assert!(msg.contains("lots"), "message was: {msg}");
            }
            other => panic!("expected DataIntegrity, got {other:?}"),
        }
    }

    #[test]
    fn unmeasured_always_present_field_is_fatal() {
        let err = derive_with(&[(columns::CHLORIDE, "NULL")], 100).unwrap_err();
        assert!(matches!(err, NutrigraphError::DataIntegrity(_)));

        let err = derive_with(&[(columns::MOLYBDENUM, "NULL")], 100).unwrap_err();
        assert!(matches!(err, NutrigraphError::DataIntegrity(_)));

        let err = derive_with(&[(columns::VITAMIN_B7, "NULL")], 100).unwrap_err();
        assert!(matches!(err, NutrigraphError::DataIntegrity(_)));
    }

    #[test]
    fn macros_view_converts_mg_subcomponents_to_grams() {
        let profile = derive_with(
            &[
                (columns::FAT, "10"),
                (columns::CARBOHYDRATES, "20"),
                (columns::PROTEIN, "5"),
                (columns::MONOUNSATURATED_FAT, "3000"),
                (columns::POLYUNSATURATED_FAT, "1500"),
            ],
            100,
        )
        .unwrap();

        let macros = profile.macros().unwrap();
        assert_eq!(macros.monounsaturated_fat, 3.0);
        assert_eq!(macros.polyunsaturated_fat, 1.5);
        assert_eq!(macros.total(), 35.0);
    }

    #[test]
    fn macros_view_faults_on_unknown_core_macro() {
        let profile = derive_with(&[(columns::CARBOHYDRATES, "NULL")], 100).unwrap();
        let err = profile.macros().unwrap_err();
        assert!(matches!(err, NutrigraphError::Render(_)));
    }
}

//! In-memory nutrient dataset.
//!
//! The source is a comma-delimited sheet, one row per FDC identifier, with
//! fixed column positions (see [`columns`]). Only a subset of the ~90
//! columns is consumed. The literal token `NULL` marks a value that is
//! unmeasured or insignificant, which is distinct from zero.
//!
//! The dataset is loaded once per process and shared read-only afterwards.
//! Lookup semantics are those of a linear scan comparing string forms of
//! the identifier; an index is kept purely for speed.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::NutrigraphResult;

/// Positional column offsets of the consumed fields.
///
/// Offsets follow the published sheet layout and are the single source of
/// truth for the derivation step; a wrong offset here surfaces as a
/// data-integrity fault there, never as silently wrong values.
pub mod columns {
    pub const IDENTIFIER: usize = 0;
    pub const NAME: usize = 1;

    pub const KCALORIES: usize = 3;
    pub const FAT: usize = 4; // g
    pub const PROTEIN: usize = 5; // g
    pub const CARBOHYDRATES: usize = 6; // g
    pub const SUGARS: usize = 7; // g
    pub const FIBER: usize = 8; // g
    pub const CHOLESTEROL: usize = 9; // mg
    pub const SATURATED_FAT: usize = 10; // g
    pub const CALCIUM: usize = 11; // mg
    pub const IRON: usize = 12; // mg
    pub const POTASSIUM: usize = 13; // mg
    pub const MAGNESIUM: usize = 14; // mg
    pub const VITAMIN_A: usize = 16; // mcg RAE
    pub const VITAMIN_C: usize = 17; // mg
    pub const VITAMIN_B12: usize = 18; // mcg
    pub const VITAMIN_D: usize = 19; // mcg
    pub const VITAMIN_E: usize = 20; // mg
    pub const NET_CARBS: usize = 22; // g
    pub const WATER: usize = 23; // g
    pub const OMEGA_3: usize = 24; // mg
    pub const OMEGA_6: usize = 25; // mg
    pub const TRANS_FAT: usize = 27; // g
    pub const PHOSPHORUS: usize = 38; // mg
    pub const SODIUM: usize = 39; // mg
    pub const ZINC: usize = 40; // mg
    pub const COPPER: usize = 41; // mg
    pub const MANGANESE: usize = 42; // mg
    pub const SELENIUM: usize = 43; // mcg
    pub const MOLYBDENUM: usize = 45; // mcg
    pub const CHLORIDE: usize = 46; // mg
    pub const VITAMIN_B1: usize = 47; // mg, thiamin
    pub const VITAMIN_B2: usize = 48; // mg, riboflavin
    pub const VITAMIN_B3: usize = 49; // mg NE, niacin
    pub const VITAMIN_B5: usize = 50; // mg, pantothenic acid
    pub const VITAMIN_B6: usize = 51; // mg
    pub const VITAMIN_B7: usize = 52; // mcg, biotin
    pub const VITAMIN_B9: usize = 56; // mcg DFE, folate
    pub const CHOLINE: usize = 57; // mg
    pub const VITAMIN_K: usize = 67; // mcg
    pub const MONOUNSATURATED_FAT: usize = 70; // mg
    pub const POLYUNSATURATED_FAT: usize = 71; // mg
    pub const TRYPTOPHAN: usize = 76; // mg
    pub const THREONINE: usize = 77; // mg
    pub const ISOLEUCINE: usize = 78; // mg
    pub const LEUCINE: usize = 79; // mg
    pub const LYSINE: usize = 80; // mg
    pub const METHIONINE: usize = 81; // mg
    pub const PHENYLALANINE: usize = 83; // mg
    pub const VALINE: usize = 85; // mg
    pub const HISTIDINE: usize = 87; // mg
}

/// Sentinel token marking an unmeasured/insignificant value.
pub const UNMEASURED: &str = "NULL";

/// One raw dataset row: positional string fields.
#[derive(Clone, Copy, Debug)]
pub struct RawNutrientRecord<'a> {
    record: &'a csv::StringRecord,
}

impl<'a> RawNutrientRecord<'a> {
    pub fn identifier(&self) -> &'a str {
        self.record.get(columns::IDENTIFIER).unwrap_or_default()
    }

    pub fn name(&self) -> &'a str {
        self.record.get(columns::NAME).unwrap_or_default()
    }

    /// Raw string value at a positional column, `None` when the row is
    /// shorter than the requested offset.
    pub fn field(&self, column: usize) -> Option<&'a str> {
        self.record.get(column)
    }
}

/// The loaded nutrient sheet.
pub struct Dataset {
    records: Vec<csv::StringRecord>,
    by_identifier: HashMap<String, usize>,
}

impl Dataset {
    /// Read the whole sheet from a CSV source. The header row is skipped.
    pub fn from_reader(reader: impl io::Read) -> NutrigraphResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        let mut by_identifier = HashMap::new();
        for row in csv_reader.records() {
            let record = row.context("read dataset row")?;
            let Some(identifier) = record.get(columns::IDENTIFIER) else {
                continue;
            };
            // First occurrence wins, matching a front-to-back linear scan.
            by_identifier
                .entry(identifier.to_owned())
                .or_insert(records.len());
            records.push(record);
        }

        Ok(Self {
            records,
            by_identifier,
        })
    }

    pub fn from_path(path: &Path) -> NutrigraphResult<Self> {
        let file =
            File::open(path).with_context(|| format!("open dataset '{}'", path.display()))?;
        Self::from_reader(BufReader::new(file))
    }

    /// Find the record whose identifier column equals the string form of
    /// `identifier`. Not-found is recoverable; the caller skips the request.
    pub fn lookup(&self, identifier: i64) -> Option<RawNutrientRecord<'_>> {
        let index = *self.by_identifier.get(identifier.to_string().as_str())?;
        Some(RawNutrientRecord {
            record: &self.records[index],
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! End-to-end derivation: CSV row -> lookup -> scaled profile -> layout inputs.

use nutrigraph::dataset::columns;
use nutrigraph::drv::{self, DRV_VITAMIN_C};
use nutrigraph::render::donut::{CalorieSplit, WEDGE_MARGIN_DEG, wedge_spans};
use nutrigraph::render::stats;
use nutrigraph::{Dataset, Nutrient, NutrientProfile};

/// One-row sheet with 88 columns, all "0" except the overrides.
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

fn derive(overrides: &[(usize, &str)], serving_grams: i64) -> NutrientProfile {
    let dataset = dataset_with(overrides);
    let record = dataset.lookup(170567).unwrap();
    NutrientProfile::derive(&record, serving_grams, "one wedge").unwrap()
}

#[test]
fn round_trip_from_sheet_to_wedge_angles() {
    // fat=5, carbs=10, protein=5 per 100 g at a 200 g serving.
    let profile = derive(
        &[
            (columns::FAT, "5"),
            (columns::CARBOHYDRATES, "10"),
            (columns::PROTEIN, "5"),
            (columns::FIBER, "2"),
            (columns::NET_CARBS, "8"),
            (columns::SUGARS, "1"),
        ],
        200,
    );

    assert_eq!(profile.fat, Nutrient::known(10.0));
    assert_eq!(profile.carbohydrates, Nutrient::known(20.0));
    assert_eq!(profile.protein, Nutrient::known(10.0));

    let macros = profile.macros().unwrap();
    let split = CalorieSplit::from_macros(&macros);
    assert_eq!(split.fat_kcal, 90.0);
    assert_eq!(split.protein_kcal, 40.0);
    assert_eq!(split.carb_kcal, 16.0 * 4.0 + 4.0 * 2.0);

    let fractions = split.fractions().unwrap();
    let spans = wedge_spans(fractions, WEDGE_MARGIN_DEG);

    // Wedges start contiguous at the unmargined boundaries, ...
    assert_eq!(spans[0].0, 0.0);
    assert!((spans[1].0 - 360.0 * fractions[0]).abs() < 1e-9);
    // ... and the margin only trims trailing edges.
    let drawn: f64 = spans.iter().map(|(s, e)| e - s).sum();
    assert!((drawn - (360.0 - 3.0 * WEDGE_MARGIN_DEG)).abs() < 1e-9);
}

#[test]
fn wheel_entries_carry_unclamped_ratios_and_gaps() {
    let profile = derive(
        &[
            (columns::FAT, "10"),
            (columns::VITAMIN_C, "66.5"), // 133 mg at 200 g = 140% of the 95 mg DRV
            (columns::VITAMIN_D, "NULL"),
        ],
        200,
    );

    let vitamins = drv::vitamin_entries(&profile);
    assert_eq!(vitamins.len(), 13);
    // Biotin is not charted.
    assert!(vitamins.iter().all(|entry| entry.label != "B7"));

    let c = vitamins.iter().find(|e| e.label == "C").unwrap();
    let ratio = c.ratio.unwrap();
    assert!((ratio - 133.0 / DRV_VITAMIN_C).abs() < 1e-9);
    assert!(ratio > 1.0);

    let d = vitamins.iter().find(|e| e.label == "D").unwrap();
    assert_eq!(d.ratio, None);

    let minerals = drv::mineral_entries(&profile);
    assert_eq!(minerals.len(), 10);
    assert!(
        minerals
            .iter()
            .all(|entry| entry.label != "Molybdenum" && entry.label != "Chloride")
    );
}

#[test]
fn stats_rows_format_known_values_and_na() {
    let profile = derive(
        &[
            (columns::FAT, "10"),
            (columns::OMEGA_3, "347.225"), // x2 = 694.45 mg, half the 1388.9 mg DRV
            (columns::OMEGA_6, "NULL"),
            (columns::WATER, "40"),
            (columns::TRANS_FAT, "NULL"),
            (columns::NET_CARBS, "8.25"),
        ],
        200,
    );

    let rows = stats::rows(&profile);
    assert_eq!(rows[0], ("Omega-3", "50% (694mg)".to_owned()));
    assert_eq!(rows[1], ("Omega-6", "N/A".to_owned()));
    assert_eq!(rows[2], ("Water", "80ml".to_owned()));
    assert_eq!(rows[3], ("Trans fats", "N/A".to_owned()));
    assert_eq!(rows[4], ("Net carbs", "16.5g".to_owned()));
}

#[test]
fn negligible_fat_makes_stats_trans_fat_zero_not_na() {
    let profile = derive(&[(columns::FAT, "0.4"), (columns::TRANS_FAT, "NULL")], 100);
    let rows = stats::rows(&profile);
    assert_eq!(rows[3], ("Trans fats", "0.0g".to_owned()));
}

#[test]
fn lookup_miss_skips_without_touching_other_requests() {
    let dataset = dataset_with(&[]);
    assert!(dataset.lookup(999).is_none());
    assert!(dataset.lookup(170567).is_some());
}

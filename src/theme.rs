//! Injected rendering configuration: colors and font sizes.
//!
//! The renderer never computes colors; everything comes from a [`Theme`],
//! which deserializes from JSON and defaults to the fixed palette.

use serde::Deserialize;

/// Straight-alpha RGBA8 color, deserialized from `#RRGGBB` / `#RRGGBBAA`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const GREY: Self = Self::rgb(128, 128, 128);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_hex(&s).map_err(serde::de::Error::custom)
    }
}

fn parse_hex(s: &str) -> Result<Rgba8, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    match s.len() {
        6 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: 255,
        }),
        8 => Ok(Rgba8 {
            r: hex_byte(&s[0..2])?,
            g: hex_byte(&s[2..4])?,
            b: hex_byte(&s[4..6])?,
            a: hex_byte(&s[6..8])?,
        }),
        _ => Err("hex color must be #RRGGBB or #RRGGBBAA (case-insensitive)".to_owned()),
    }
}

/// The four font sizes used across the infographic, px at native scale.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontSizes {
    /// Bar segment labels and the identifier tag.
    pub small: f32,
    /// Donut caption lines, wheel labels, stats cells, title caption.
    pub body: f32,
    /// Word-wrapped serving description.
    pub heading: f32,
    /// Total-kcalorie figure in the donut center.
    pub display: f32,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            small: 48.0,
            body: 96.0,
            heading: 128.0,
            display: 192.0,
        }
    }
}

/// Color and typography configuration for one render run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Theme {
    /// Macro bar segment colors, keyed by position: saturated fat,
    /// polyunsaturated fat, monounsaturated fat, other fats, fiber, sugars,
    /// other carbs, protein.
    pub macro_colors: [Rgba8; 8],
    /// Fat share in the calorie donut.
    pub fat_color: Rgba8,
    /// Carbohydrate share in the calorie donut.
    pub carb_color: Rgba8,
    /// Protein share in the calorie donut.
    pub protein_color: Rgba8,
    /// Vitamin wheel disk.
    pub vitamin_accent: Rgba8,
    /// Mineral wheel disk.
    pub mineral_accent: Rgba8,
    /// Stats grid cells.
    pub stats_accent: Rgba8,
    pub font_sizes: FontSizes,
}

impl Default for Theme {
    fn default() -> Self {
        let teal = Rgba8::rgb(0x12, 0xa6, 0xa5);
        let purple = Rgba8::rgb(0x9b, 0x4f, 0x96);
        let forest = Rgba8::rgb(0x2b, 0x75, 0x4c);
        let red = Rgba8::rgb(0xd6, 0x3c, 0x3c);

        Self {
            macro_colors: [
                Rgba8::rgb(0xd6, 0x02, 0x70), // saturated fat
                purple,                       // polyunsaturated fat
                Rgba8::rgb(0x00, 0x38, 0xa8), // monounsaturated fat
                teal,                         // other fats
                Rgba8::rgb(0xa9, 0xae, 0x17), // fiber
                Rgba8::rgb(0x4d, 0xad, 0x1c), // sugars
                forest,                       // other carbs
                red,                          // protein
            ],
            fat_color: teal,
            carb_color: forest,
            protein_color: red,
            vitamin_accent: purple,
            mineral_accent: teal,
            stats_accent: teal,
            font_sizes: FontSizes::default(),
        }
    }
}

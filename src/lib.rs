//! Nutrigraph turns per-serving nutrient records into composite infographics.
//!
//! The pipeline is strictly downstream:
//!
//! - Parse a line-oriented list of serving requests ([`parse_requests`])
//! - Look each identifier up in the loaded nutrient [`Dataset`]
//! - Derive a serving-scaled, unit-normalized [`NutrientProfile`]
//! - Hand the profile to the layout engine ([`Renderer`]), which renders a
//!   proportional macro bar, a calorie donut, two DRV wheels and a stats
//!   grid onto one canvas and encodes it as a JPEG
#![forbid(unsafe_code)]

mod foundation;

pub mod dataset;
pub mod drv;
pub mod pipeline;
pub mod profile;
pub mod render;
pub mod request;
pub mod theme;

pub use crate::dataset::Dataset;
pub use crate::foundation::error::{NutrigraphError, NutrigraphResult};
pub use crate::pipeline::{BatchOptions, BatchSummary, run_batch};
pub use crate::profile::{Nutrient, NutrientProfile};
pub use crate::render::Renderer;
pub use crate::request::{ServingRequest, parse_requests};
pub use crate::theme::{Rgba8, Theme};

//! Crop Encoding Lookup Table
//!
//! Maps free-form crop names to the integer codes the risk model was trained
//! with. The table is a versioned constant: changing names or codes changes
//! the model's input space and requires retraining.
//!
//! Unknown names (including the empty string) are not an error. They encode
//! to the code of the first entry (maize) and are reported as
//! [`EncodedCrop::DefaultedFrom`] so callers can log the fallback.

use serde::Serialize;

/// Bumped whenever `CROP_TABLE` changes
pub const CROP_TABLE_VERSION: u32 = 1;

/// Crops known to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Crop {
    Maize,
    Rice,
    Coffee,
    Wheat,
    Beans,
    Cassava,
    Tea,
    Banana,
    Sorghum,
    Cotton,
    Potato,
}

/// A single crop table row
#[derive(Debug, Clone, Copy)]
pub struct CropEntry {
    pub crop: Crop,
    pub name: &'static str,
    pub code: u8,
}

// ============================================================================
// EMBEDDED CROP TABLE (v1)
// ============================================================================

static CROP_TABLE: &[CropEntry] = &[
    CropEntry { crop: Crop::Maize, name: "maize", code: 0 },
    CropEntry { crop: Crop::Rice, name: "rice", code: 1 },
    CropEntry { crop: Crop::Coffee, name: "coffee", code: 2 },
    CropEntry { crop: Crop::Wheat, name: "wheat", code: 3 },
    CropEntry { crop: Crop::Beans, name: "beans", code: 4 },
    CropEntry { crop: Crop::Cassava, name: "cassava", code: 5 },
    CropEntry { crop: Crop::Tea, name: "tea", code: 6 },
    CropEntry { crop: Crop::Banana, name: "banana", code: 7 },
    CropEntry { crop: Crop::Sorghum, name: "sorghum", code: 8 },
    CropEntry { crop: Crop::Cotton, name: "cotton", code: 9 },
    CropEntry { crop: Crop::Potato, name: "potato", code: 10 },
];

impl Crop {
    /// Crop used for unrecognized names
    pub const DEFAULT: Crop = Crop::Maize;

    fn entry(self) -> &'static CropEntry {
        // Table order matches enum declaration order
        &CROP_TABLE[self as usize]
    }

    pub fn code(self) -> u8 {
        self.entry().code
    }

    pub fn name(self) -> &'static str {
        self.entry().name
    }

    /// Case-insensitive exact lookup
    pub fn from_name(name: &str) -> Option<Crop> {
        let folded = name.to_lowercase();
        CROP_TABLE
            .iter()
            .find(|entry| entry.name == folded)
            .map(|entry| entry.crop)
    }
}

/// Outcome of encoding a crop name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodedCrop {
    Known(Crop),
    /// Name not in the table; encodes as [`Crop::DEFAULT`]
    DefaultedFrom(String),
}

impl EncodedCrop {
    pub fn code(&self) -> u8 {
        match self {
            EncodedCrop::Known(crop) => crop.code(),
            EncodedCrop::DefaultedFrom(_) => Crop::DEFAULT.code(),
        }
    }

    pub fn is_defaulted(&self) -> bool {
        matches!(self, EncodedCrop::DefaultedFrom(_))
    }
}

/// Encode a crop name for the model feature vector
pub fn encode_crop(name: &str) -> EncodedCrop {
    match Crop::from_name(name) {
        Some(crop) => EncodedCrop::Known(crop),
        None => EncodedCrop::DefaultedFrom(name.to_string()),
    }
}

/// All table rows, in code order
pub fn crop_table() -> &'static [CropEntry] {
    CROP_TABLE
}

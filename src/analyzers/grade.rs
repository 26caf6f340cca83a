use serde::Serialize;
use std::fmt;

/// Ordinal score band assigned to every DS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Band {
    Insufficient,
    Passing,
    FairlyGood,
    Good,
    VeryGood,
}

impl Band {
    /// All bands, lowest first.
    pub const ALL: [Band; 5] = [
        Band::Insufficient,
        Band::Passing,
        Band::FairlyGood,
        Band::Good,
        Band::VeryGood,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Band::Insufficient => "Insufficient (<10)",
            Band::Passing => "Passing (10-12)",
            Band::FairlyGood => "Fairly good (12-14)",
            Band::Good => "Good (14-16)",
            Band::VeryGood => "Very good (>=16)",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Converts a DS score into its band.
///
/// | Range       | Band         |
/// |-------------|--------------|
/// | >= 16       | VeryGood     |
/// | [14, 16)    | Good         |
/// | [12, 14)    | FairlyGood   |
/// | [10, 12)    | Passing      |
/// | < 10        | Insufficient |
///
/// NaN falls through every comparison and lands in `Insufficient`.
pub fn classify(score: f64) -> Band {
    match score {
        s if s >= 16.0 => Band::VeryGood,
        s if s >= 14.0 => Band::Good,
        s if s >= 12.0 => Band::FairlyGood,
        s if s >= 10.0 => Band::Passing,
        _ => Band::Insufficient,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(0.0), Band::Insufficient);
        assert_eq!(classify(9.999), Band::Insufficient);
        assert_eq!(classify(10.0), Band::Passing);
        assert_eq!(classify(11.999), Band::Passing);
        assert_eq!(classify(12.0), Band::FairlyGood);
        assert_eq!(classify(13.999), Band::FairlyGood);
        assert_eq!(classify(14.0), Band::Good);
        assert_eq!(classify(15.999), Band::Good);
        assert_eq!(classify(16.0), Band::VeryGood);
        assert_eq!(classify(20.0), Band::VeryGood);
    }

    #[test]
    fn test_classify_out_of_range_values() {
        assert_eq!(classify(-3.0), Band::Insufficient);
        assert_eq!(classify(f64::NAN), Band::Insufficient);
        assert_eq!(classify(f64::INFINITY), Band::VeryGood);
        assert_eq!(classify(f64::NEG_INFINITY), Band::Insufficient);
    }

    #[test]
    fn test_bands_are_ordered() {
        let mut sorted = Band::ALL;
        sorted.sort();
        assert_eq!(sorted, Band::ALL);
        assert!(Band::Insufficient < Band::VeryGood);
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Band::FairlyGood.to_string(), "Fairly good (12-14)");
    }
}

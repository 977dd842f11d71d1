//! Static factor configuration for the weighted risk model.
//!
//! The table is constructed once at compile time and never mutated. Weights
//! across all factors sum to 1.0. Graduated bands partition each numeric
//! domain as half-open `[lower, upper)` intervals checked in order;
//! categorical tables are keyed by the dataset's canonical labels and any
//! unknown label contributes zero.

/// One graduated scoring band: `[lower, upper)` with a bucket multiplier.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    pub lower: f64,
    pub upper: f64,
    pub multiplier: f64,
}

/// Per-factor scoring strategy with its strategy-specific data.
#[derive(Debug, Clone, Copy)]
pub enum Strategy {
    /// Range-bucketed score with linear interpolation inside the matched band.
    Graduated(&'static [Band]),
    /// Full weight when the flag is set, zero otherwise.
    Binary,
    /// Label → multiplier table; unknown labels score 0.0.
    Categorical(&'static [(&'static str, f64)]),
}

/// A scorable patient attribute with its weight and strategy.
#[derive(Debug, Clone, Copy)]
pub struct FactorSpec {
    pub name: &'static str,
    pub weight: f64,
    pub strategy: Strategy,
}

const fn band(lower: f64, upper: f64, multiplier: f64) -> Band {
    Band {
        lower,
        upper,
        multiplier,
    }
}

const AGE_BANDS: [Band; 6] = [
    band(0.0, 40.0, 0.0),
    band(40.0, 50.0, 0.1),
    band(50.0, 60.0, 0.3),
    band(60.0, 70.0, 0.6),
    band(70.0, 80.0, 0.8),
    band(80.0, 120.0, 1.0),
];

const GLUCOSE_BANDS: [Band; 5] = [
    band(0.0, 100.0, 0.0),
    band(100.0, 126.0, 0.3),
    band(126.0, 180.0, 0.6),
    band(180.0, 250.0, 0.8),
    band(250.0, 500.0, 1.0),
];

const BMI_BANDS: [Band; 6] = [
    band(0.0, 18.5, 0.1),
    band(18.5, 25.0, 0.0),
    band(25.0, 30.0, 0.3),
    band(30.0, 35.0, 0.6),
    band(35.0, 40.0, 0.8),
    band(40.0, 60.0, 1.0),
];

const SMOKING_VALUES: [(&str, f64); 4] = [
    ("never smoked", 0.0),
    ("formerly smoked", 0.4),
    ("smokes", 1.0),
    ("Unknown", 0.2),
];

const WORK_VALUES: [(&str, f64); 5] = [
    ("children", 0.0),
    ("Govt_job", 0.2),
    ("Never_worked", 0.1),
    ("Private", 0.6),
    ("Self-employed", 0.8),
];

const RESIDENCE_VALUES: [(&str, f64); 2] = [("Rural", 0.0), ("Urban", 0.5)];

const GENDER_VALUES: [(&str, f64); 3] = [("Female", 0.0), ("Male", 0.6), ("Other", 0.3)];

/// The configured factor table, in evaluation order.
pub const FACTORS: [FactorSpec; 9] = [
    FactorSpec {
        name: "age",
        weight: 0.20,
        strategy: Strategy::Graduated(&AGE_BANDS),
    },
    FactorSpec {
        name: "hypertension",
        weight: 0.18,
        strategy: Strategy::Binary,
    },
    FactorSpec {
        name: "heart_disease",
        weight: 0.16,
        strategy: Strategy::Binary,
    },
    FactorSpec {
        name: "avg_glucose_level",
        weight: 0.14,
        strategy: Strategy::Graduated(&GLUCOSE_BANDS),
    },
    FactorSpec {
        name: "bmi",
        weight: 0.12,
        strategy: Strategy::Graduated(&BMI_BANDS),
    },
    FactorSpec {
        name: "smoking_status",
        weight: 0.12,
        strategy: Strategy::Categorical(&SMOKING_VALUES),
    },
    FactorSpec {
        name: "work_type",
        weight: 0.04,
        strategy: Strategy::Categorical(&WORK_VALUES),
    },
    FactorSpec {
        name: "residence_type",
        weight: 0.02,
        strategy: Strategy::Categorical(&RESIDENCE_VALUES),
    },
    FactorSpec {
        name: "gender",
        weight: 0.02,
        strategy: Strategy::Categorical(&GENDER_VALUES),
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_sum_to_one() {
        let total: f64 = FACTORS.iter().map(|f| f.weight).sum();
        assert!((total - 1.0).abs() < 1e-9, "weights sum to {total}");
    }

    #[test]
    fn graduated_bands_are_contiguous_and_ordered() {
        for spec in &FACTORS {
            if let Strategy::Graduated(bands) = spec.strategy {
                for pair in bands.windows(2) {
                    assert!(
                        pair[0].upper == pair[1].lower,
                        "{}: gap between {} and {}",
                        spec.name,
                        pair[0].upper,
                        pair[1].lower
                    );
                }
                for b in bands {
                    assert!(b.lower < b.upper, "{}: zero-width band", spec.name);
                }
            }
        }
    }

    #[test]
    fn factor_names_are_unique() {
        for (i, a) in FACTORS.iter().enumerate() {
            for b in &FACTORS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}

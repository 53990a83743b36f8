/// Threshold for households recorded without an adult.
const DEFAULT_THRESHOLD: f64 = 20_000.0;

/// Indexed by dependent count, capped at five or more.
const SINGLE_ADULT_THRESHOLDS: [f64; 6] =
    [20_000.0, 20_000.0, 20_000.0, 23_600.0, 27_600.0, 31_600.0];
const MULTI_ADULT_THRESHOLDS: [f64; 6] =
    [20_000.0, 24_000.0, 28_000.0, 32_000.0, 36_000.0, 40_000.0];

/// Maximum qualifying after-housing-costs income for the household shape.
pub fn equivalised_threshold(adults: u32, dependents: u32) -> f64 {
    let band = dependents.min(5) as usize;
    match adults {
        0 => DEFAULT_THRESHOLD,
        1 => SINGLE_ADULT_THRESHOLDS[band],
        _ => MULTI_ADULT_THRESHOLDS[band],
    }
}

/// Net income less housing cost. The threshold carries the household-size adjustment.
pub fn equivalised_income(net_income: f64, housing_cost: f64) -> f64 {
    net_income - housing_cost
}

pub fn qualifies_after_housing_costs(
    net_income: f64,
    housing_cost: f64,
    adults: u32,
    dependents: u32,
) -> bool {
    let equivalised = equivalised_income(net_income, housing_cost);
    equivalised > 0.0 && equivalised <= equivalised_threshold(adults, dependents)
}

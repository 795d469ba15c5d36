use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PredictionResult {
    pub price: f64,
    /// `None` when the surface is zero.
    pub price_per_m2: Option<f64>,
}

impl PredictionResult {
    pub fn new(price: f64, surface_m2: f64) -> Self {
        let price_per_m2 = if surface_m2 > 0.0 {
            Some(price / surface_m2)
        } else {
            None
        };
        PredictionResult {
            price,
            price_per_m2,
        }
    }
}

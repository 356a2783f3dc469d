use crate::error::{Error, Result};

pub const DECIMAL_PLACES: usize = 2;

/// Render a similarity score with exactly two decimal places.
///
/// Rounds half away from zero (`0.125` becomes `0.13`), applied to the binary
/// value of the score. Scores outside `[0, 1]` or not finite are rejected.
pub fn encode(score: f64) -> Result<String> {
    if !score.is_finite() {
        return Err(Error::invalid_score(format!("score must be a finite number, got {}", score)));
    }
    if !(0.0..=1.0).contains(&score) {
        return Err(Error::invalid_score(format!("score must be between 0 and 1, got {}", score)));
    }

    let scale = 10f64.powi(DECIMAL_PLACES as i32);
    // adding 0.0 turns -0.0 into 0.0 so the sign never reaches the output
    let rounded = (score * scale).round() / scale + 0.0;
    Ok(format!("{:.*}", DECIMAL_PLACES, rounded))
}

//! Source of the volatile `scoutbase_rating` shown to signed-in users

use rand::Rng;

/// Lowest rating handed out, in tenths
const MIN_TENTHS: u32 = 50;
/// Exclusive upper bound, in tenths
const MAX_TENTHS: u32 = 90;

/// Produces a rating for one movie resolution
pub trait RatingSource: Send + Sync {
    fn rate(&self) -> f64;
}

/// Uniform random rating in `[5.0, 9.0)` with one decimal place
///
/// A fresh value is drawn on every call; nothing is cached.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomRating;

impl RatingSource for RandomRating {
    fn rate(&self) -> f64 {
        let tenths = rand::thread_rng().gen_range(MIN_TENTHS..MAX_TENTHS);
        f64::from(tenths) / 10.0
    }
}

/// Always returns the same rating
#[derive(Debug, Clone, Copy)]
pub struct FixedRating(pub f64);

impl RatingSource for FixedRating {
    fn rate(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_rating_stays_in_range_with_one_decimal() {
        let source = RandomRating;
        for _ in 0..1_000 {
            let rating = source.rate();
            assert!((5.0..9.0).contains(&rating), "out of range: {}", rating);
            let scaled = rating * 10.0;
            assert!((scaled - scaled.round()).abs() < 1e-9, "not one decimal: {}", rating);
        }
    }

    #[test]
    fn test_fixed_rating() {
        assert_eq!(FixedRating(7.5).rate(), 7.5);
    }
}

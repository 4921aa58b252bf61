use crate::models::{Game, NumericRanges};

/// Maps a raw attribute value into [0, 1] against population statistics.
///
/// Returns 0 when `max == min` (the attribute carries no discriminative
/// information) and coerces non-finite input to 0 before scaling.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    if max == min {
        return 0.0;
    }
    (value - min) / (max - min)
}

/// Computes population (min, max) statistics for every numeric attribute.
///
/// Only games with a non-null review score AND metacritic score contribute
/// to range calibration; within those rows, per-attribute aggregation skips
/// missing values. The SQL counterpart lives in
/// [`crate::db::CatalogReader::numeric_ranges`].
pub fn compute_statistics(games: &[Game]) -> NumericRanges {
    let complete: Vec<&Game> = games
        .iter()
        .filter(|game| game.review_score.is_some() && game.metacritic.is_some())
        .collect();

    let mut ranges = NumericRanges::default();
    if complete.is_empty() {
        return ranges;
    }

    (ranges.min_review, ranges.max_review) = min_max(&complete, |g| g.review_score);
    (ranges.min_metacritic, ranges.max_metacritic) = min_max(&complete, |g| g.metacritic);
    (ranges.min_price, ranges.max_price) = min_max(&complete, |g| g.price_initial_usd);
    (ranges.min_age, ranges.max_age) = min_max(&complete, |g| g.required_age);
    (ranges.min_achievements, ranges.max_achievements) = min_max(&complete, |g| g.n_achievements);
    (ranges.min_positive, ranges.max_positive) = min_max(&complete, |g| g.positive_ratio);
    ranges
}

fn min_max(games: &[&Game], select: impl Fn(&Game) -> Option<f64>) -> (f64, f64) {
    let mut bounds: Option<(f64, f64)> = None;
    for game in games {
        if let Some(value) = select(game).filter(|v| v.is_finite()) {
            bounds = Some(match bounds {
                Some((min, max)) => (min.min(value), max.max(value)),
                None => (value, value),
            });
        }
    }
    bounds.unwrap_or((0.0, 0.0))
}

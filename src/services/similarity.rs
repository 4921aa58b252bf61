use std::collections::HashSet;

use rand::Rng;

use crate::models::{Game, UserProfile};

// Signal weights, summing to 1.0
const GENRE_WEIGHT: f64 = 0.40;
const CATEGORY_WEIGHT: f64 = 0.25;
const PLATFORM_WEIGHT: f64 = 0.15;
const REVIEW_WEIGHT: f64 = 0.15;
const PRICE_WEIGHT: f64 = 0.05;

/// Review scores live in a 0-100 range
const REVIEW_SCALE: f64 = 100.0;

/// Fixed penalty when exactly one side of a price comparison is free
const FREE_VS_PAID_SIMILARITY: f64 = 0.3;
const NEUTRAL_PRICE_SIMILARITY: f64 = 0.5;

/// Upper bound on the fallback estimator before the random floor is applied
const FALLBACK_CAP: f64 = 0.8;
/// Random floor drawn from [FALLBACK_FLOOR_MIN, FALLBACK_FLOOR_MAX)
const FALLBACK_FLOOR_MIN: f64 = 0.1;
const FALLBACK_FLOOR_MAX: f64 = 0.3;

/// Jaccard index over case-normalized, trimmed, deduplicated tag strings.
///
/// Both sets empty compare as vacuously identical (1.0); exactly one empty
/// set yields 0.0, so the union can never be empty at the division.
pub fn jaccard(a: &[String], b: &[String]) -> f64 {
    let set_a = normalized_set(a);
    let set_b = normalized_set(b);

    if set_a.is_empty() && set_b.is_empty() {
        return 1.0;
    }
    if set_a.is_empty() || set_b.is_empty() {
        return 0.0;
    }

    let intersection = set_a.intersection(&set_b).count() as f64;
    let union = set_a.union(&set_b).count() as f64;

    let similarity = intersection / union;
    if similarity.is_nan() {
        0.0
    } else {
        similarity.clamp(0.0, 1.0)
    }
}

fn normalized_set(tags: &[String]) -> HashSet<String> {
    tags.iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Primary weighted multi-signal similarity between the user profile and one
/// candidate, bounded to [0, 1].
///
/// Any sub-signal that computes to NaN is coerced to its neutral value before
/// combination; the combined score never propagates NaN.
pub fn score(profile: &UserProfile, candidate: &Game) -> f64 {
    let genre = coerce(jaccard(&profile.genres, &candidate.genres), 0.0);
    let category = coerce(jaccard(&profile.categories, &candidate.categories), 0.0);
    let platform = coerce(jaccard(&profile.platforms, &candidate.platforms), 0.0);
    let review = coerce(review_similarity(profile, candidate), 0.0);
    let price = coerce(price_similarity(profile, candidate), NEUTRAL_PRICE_SIMILARITY);

    let total = genre * GENRE_WEIGHT
        + category * CATEGORY_WEIGHT
        + platform * PLATFORM_WEIGHT
        + review * REVIEW_WEIGHT
        + price * PRICE_WEIGHT;

    coerce(total, 0.0).clamp(0.0, 1.0)
}

fn review_similarity(profile: &UserProfile, candidate: &Game) -> f64 {
    let candidate_review = candidate.review_score.unwrap_or(0.0);
    let diff = (profile.mean_review_score - candidate_review).abs();
    if diff.is_nan() {
        0.0
    } else {
        (1.0 - diff / REVIEW_SCALE).max(0.0)
    }
}

fn price_similarity(profile: &UserProfile, candidate: &Game) -> f64 {
    let user_price = profile.mean_price;
    let candidate_price = candidate.price_initial_usd.unwrap_or(0.0);

    if candidate_price == 0.0 && user_price == 0.0 {
        return 1.0; // both free
    }
    if candidate_price == 0.0 || user_price == 0.0 {
        return FREE_VS_PAID_SIMILARITY;
    }
    if candidate_price.is_finite() && user_price.is_finite() {
        let max_price = user_price.max(candidate_price);
        if max_price > 0.0 {
            return (1.0 - (user_price - candidate_price).abs() / max_price).max(0.0);
        }
    }
    NEUTRAL_PRICE_SIMILARITY
}

/// Secondary estimator, used only when the primary score is exactly 0.
///
/// Estimates similarity from genre-tag substring overlap alone (a candidate
/// tag matches when it shares a substring with any user tag, in either
/// direction), capped at 0.8 and floored by a uniform draw from [0.1, 0.3).
/// Sparse metadata therefore never leaves a candidate pinned to zero. Pass a
/// seeded rng for reproducible results.
pub fn fallback_score(profile: &UserProfile, candidate: &Game, rng: &mut impl Rng) -> f64 {
    let floor = rng.gen_range(FALLBACK_FLOOR_MIN..FALLBACK_FLOOR_MAX);

    if profile.seed_count == 0 {
        return floor;
    }

    let user_genres: Vec<String> = profile
        .genres
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();
    let candidate_genres: Vec<String> = candidate
        .genres
        .iter()
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect();

    let matches = candidate_genres
        .iter()
        .filter(|candidate_tag| {
            user_genres
                .iter()
                .any(|user_tag| user_tag.contains(*candidate_tag) || candidate_tag.contains(user_tag))
        })
        .count();

    let mut similarity = 0.0;
    if matches > 0 {
        let denominator = (candidate_genres.len() as f64)
            .max(user_genres.len() as f64 / profile.seed_count as f64);
        if denominator > 0.0 {
            similarity = (matches as f64 / denominator).min(FALLBACK_CAP);
        }
    }

    let result = similarity.max(floor);
    if result.is_nan() {
        floor
    } else {
        result
    }
}

fn coerce(value: f64, neutral: f64) -> f64 {
    if value.is_nan() {
        neutral
    } else {
        value
    }
}

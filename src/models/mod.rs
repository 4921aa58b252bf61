mod features;
mod game;
mod profile;
mod recommendation;

pub use features::{FieldAccessor, GameFeatures, NumericRanges, VECTOR_LAYOUT};
pub use game::Game;
pub use profile::UserProfile;
pub use recommendation::{Recommendation, RecommendationSet, SeedGame};

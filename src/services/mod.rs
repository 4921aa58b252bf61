pub mod encoder;
pub mod feature_batch;
pub mod normalizer;
pub mod ranker;
pub mod recommender;
pub mod similarity;

pub mod details;
pub mod preferences;
pub mod providers;
pub mod recommendations;
pub mod search;

pub use details::DetailsCache;
pub use preferences::PreferenceStore;
pub use recommendations::RecommendationAggregator;
pub use search::SearchEngine;

pub mod listing;
pub mod normalize;
pub mod rules;

pub use listing::EstateAgent;
pub use normalize::normalize_source;

//! Score components composed by the `ScorePipeline`.

pub mod genre_bonus;
pub mod popularity;
pub mod rating;
pub mod recency;

pub use genre_bonus::GenreBonus;
pub use popularity::PopularityComponent;
pub use rating::RatingComponent;
pub use recency::RecencyComponent;

//! Feeds handed to a front end: search results and favorites.
pub(crate) mod favorites;
pub(crate) mod search;

pub use favorites::FavoritesFeed;
pub use search::{SearchFeed, SearchState};

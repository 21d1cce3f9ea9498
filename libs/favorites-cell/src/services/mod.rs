pub mod favorites;
pub mod repository;

pub use favorites::FavoritesService;
pub use repository::{FavoriteRepository, InMemoryFavoriteRepository, SupabaseFavoriteRepository};

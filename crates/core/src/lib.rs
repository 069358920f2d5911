pub mod catalog;
pub mod config;
pub mod metrics;
pub mod poster;
pub mod recommend;
pub mod testing;

pub use catalog::{
    CatalogError, Movie, MovieCatalog, MoviePage, MovieRating, MovieUser, Pagination,
    SqliteCatalog, UserFavorite, UserWatchlist,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, PosterSourceKind,
    SanitizedConfig,
};
pub use poster::{
    explain, resolve, resolve_paths, CandidateSet, DirectoryPosterSource, MatchTier, PosterCache,
    PosterError, PosterMatch, PosterSnapshot, PosterSource, Resolution, ResolutionTrace,
    StaticPosterSource,
};
pub use recommend::Recommender;

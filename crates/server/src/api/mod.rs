pub mod error;
pub mod handlers;
pub mod lists;
pub mod middleware;
pub mod movies;
pub mod posters;
pub mod recommendations;
pub mod routes;

pub use routes::create_router;

// JSON API over the recipe index

pub mod handlers;
pub mod models;
pub mod routes;

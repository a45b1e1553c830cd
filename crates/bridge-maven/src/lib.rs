pub mod coord;
pub mod fetch;
pub mod pom;
pub mod properties;
pub mod repository;

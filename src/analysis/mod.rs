pub mod geo;
pub mod spatial;
pub mod statistics;
pub mod window;

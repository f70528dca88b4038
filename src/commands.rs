pub mod geocode;
pub mod gini;
pub mod map;

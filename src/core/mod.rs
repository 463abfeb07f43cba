pub mod bucket;
pub mod freshness;
pub mod merge;
pub mod sort;
pub mod window;

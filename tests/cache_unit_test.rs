//! Unit tests for cache module.
//!
//! Run with: cargo test --test cache_unit_test

use marine_obs::routes::cache;

#[test]
fn cache_key_builds_correctly() {
    // Basic key building
    assert_eq!(cache::cache_key("collection", &[]), "collection");
    assert_eq!(
        cache::cache_key("table", &["24", "howe,46146"]),
        "table:24:howe,46146"
    );

    // Empty components preserved (ensures query uniqueness)
    assert_ne!(
        cache::cache_key("table", &["24", "", "x"]),
        cache::cache_key("table", &["24", "x"])
    );
}

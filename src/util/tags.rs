// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Tag list helpers.
//!
//! Small value-semantics helpers for manipulating a region's tag list.
//! Each returns a new list rather than mutating in place.

/// Toggle a tag: remove it when present, append it when absent.
pub fn toggle_tag(tags: &[String], tag: &str) -> Vec<String> {
    if tags.iter().any(|t| t == tag) {
        remove_if_contained(tags, tag)
    } else {
        add_if_missing(tags, tag)
    }
}

/// Append a tag unless the list already contains it.
pub fn add_if_missing(tags: &[String], tag: &str) -> Vec<String> {
    let mut result = tags.to_vec();
    if !tags.iter().any(|t| t == tag) {
        result.push(tag.to_string());
    }
    result
}

/// Remove a tag when the list contains it.
pub fn remove_if_contained(tags: &[String], tag: &str) -> Vec<String> {
    tags.iter().filter(|t| *t != tag).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_toggle_adds_and_removes() {
        let initial = tags(&["person"]);
        let with_car = toggle_tag(&initial, "car");
        assert_eq!(with_car, tags(&["person", "car"]));

        let without_car = toggle_tag(&with_car, "car");
        assert_eq!(without_car, tags(&["person"]));
    }

    #[test]
    fn test_add_if_missing_is_idempotent() {
        let initial = tags(&["person"]);
        let once = add_if_missing(&initial, "person");
        assert_eq!(once, initial);
    }

    #[test]
    fn test_remove_if_contained_ignores_absent() {
        let initial = tags(&["person"]);
        let result = remove_if_contained(&initial, "car");
        assert_eq!(result, initial);
    }
}

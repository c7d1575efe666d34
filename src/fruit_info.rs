//! FruitInfo - Advisory Text Lookup
//!
//! Static shelf-life guidance keyed by (fruit, quality), with a
//! generic fallback for pairs the table does not cover.

use std::collections::HashMap;

/// Fallback advisory for pairs without a table entry
pub const DEFAULT_INFO: &str = "Shelf life: varies depending on the product.";

pub struct FruitInfo {
    table: HashMap<&'static str, HashMap<&'static str, &'static str>>,
}

impl FruitInfo {
    pub fn new() -> Self {
        let table = HashMap::from([
            (
                "apple",
                HashMap::from([
                    ("fresh", "Shelf life: 7–14 days (refrigerated)."),
                    ("rotten", "Shelf life: 0 days (discard immediately)."),
                    (
                        "unriped",
                        "Shelf life: 3–5 days until ripe (room temperature).",
                    ),
                ]),
            ),
            (
                "banana",
                HashMap::from([
                    ("fresh", "Shelf life: 3–5 days (room temperature)."),
                    ("rotten", "Shelf life: 0 days (discard immediately)."),
                    (
                        "unriped",
                        "Shelf life: 2–3 days until ripe (room temperature).",
                    ),
                ]),
            ),
            (
                "carrot",
                HashMap::from([
                    ("fresh", "Shelf life: 15–30 days (refrigerated)."),
                    ("rotten", "Shelf life: 0 days (discard immediately)."),
                    ("unriped", "Shelf life: — (usually harvested ripe)."),
                ]),
            ),
            (
                "orange",
                HashMap::from([
                    ("fresh", "Shelf life: 10–14 days (cool and dry place)."),
                    ("rotten", "Shelf life: 0 days (discard immediately)."),
                    (
                        "unriped",
                        "Shelf life: 5–7 days until ripe (room temperature).",
                    ),
                ]),
            ),
            (
                "mango",
                HashMap::from([
                    ("fresh", "Shelf life: 3–5 days (room temperature)."),
                    ("rotten", "Shelf life: 0 days (discard immediately)."),
                    (
                        "unriped",
                        "Shelf life: 2–4 days until ripe (room temperature).",
                    ),
                ]),
            ),
        ]);

        Self { table }
    }

    /// Advisory text for a (fruit, quality) pair, or the generic
    /// default when the pair has no entry.
    pub fn get_info(&self, fruit: &str, quality: &str) -> &'static str {
        self.table
            .get(fruit)
            .and_then(|qualities| qualities.get(quality))
            .copied()
            .unwrap_or(DEFAULT_INFO)
    }
}

impl Default for FruitInfo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_pair_returns_entry() {
        let info = FruitInfo::new();
        assert_eq!(
            info.get_info("apple", "fresh"),
            "Shelf life: 7–14 days (refrigerated)."
        );
    }

    #[test]
    fn test_unknown_fruit_falls_back_to_default() {
        let info = FruitInfo::new();
        assert_eq!(info.get_info("durian", "fresh"), DEFAULT_INFO);
    }

    #[test]
    fn test_unknown_quality_falls_back_to_default() {
        let info = FruitInfo::new();
        assert_eq!(info.get_info("apple", "moldy"), DEFAULT_INFO);
    }

    #[test]
    fn test_unripe_quality_has_no_entry_and_falls_back() {
        // Table rows are keyed "unriped" while the model emits "unripe"
        let info = FruitInfo::new();
        assert_eq!(info.get_info("banana", "unripe"), DEFAULT_INFO);
        assert_ne!(info.get_info("banana", "unriped"), DEFAULT_INFO);
    }
}

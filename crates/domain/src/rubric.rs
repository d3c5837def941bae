//! The exam rubric: every scored item, its section and its point bound.
//!
//! [`RUBRIC`] is the single source of truth for item bounds. The rubric
//! engine walks it in declaration order to validate and total a
//! [`DetailedScores`], and the API serves it so forms can render limits.

use crate::scores::{DetailedScores, Score};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Points added to every total regardless of item scores.
///
/// A blank paper still totals 10 ("din oficiu" credit).
pub const BASE_CREDIT: i64 = 10;

/// Upper limit for an aggregate total, base credit included
pub const MAX_TOTAL: i64 = 100;

/// Lower bound shared by every item
pub const MIN_ITEM_SCORE: Score = 0;

/// Top-level grading group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    #[serde(rename = "section1A")]
    Section1A,
    #[serde(rename = "section1B")]
    Section1B,
    #[serde(rename = "section2")]
    Section2,
    #[serde(rename = "section3")]
    Section3,
}

impl Section {
    /// Sections in declaration order
    pub const ALL: [Section; 4] = [
        Section::Section1A,
        Section::Section1B,
        Section::Section2,
        Section::Section3,
    ];

    /// Human-readable label used in violation messages
    pub fn label(&self) -> &'static str {
        match self {
            Self::Section1A => "Section I.A",
            Self::Section1B => "Section I.B",
            Self::Section2 => "Section II",
            Self::Section3 => "Section III",
        }
    }

    /// Wire key of the section
    pub fn key(&self) -> &'static str {
        match self {
            Self::Section1A => "section1A",
            Self::Section1B => "section1B",
            Self::Section2 => "section2",
            Self::Section3 => "section3",
        }
    }

    /// Items belonging to this section, in declaration order
    pub fn items(self) -> impl Iterator<Item = &'static RubricItem> {
        RUBRIC.iter().filter(move |item| item.section == self)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One scored item of the rubric
#[derive(Clone, Copy)]
pub struct RubricItem {
    /// Section the item belongs to
    pub section: Section,
    /// Wire key of the item within its section
    pub key: &'static str,
    /// Human-readable label used in violation messages
    pub label: &'static str,
    /// Inclusive upper bound
    pub max: Score,
    read: fn(&DetailedScores) -> Score,
}

impl RubricItem {
    /// Read this item's value out of a score record
    #[inline]
    pub fn score(&self, scores: &DetailedScores) -> Score {
        (self.read)(scores)
    }

    /// Inclusive lower bound
    #[inline]
    pub fn min(&self) -> Score {
        MIN_ITEM_SCORE
    }

    /// Whether `value` lies within `[min, max]`
    #[inline]
    pub fn accepts(&self, value: Score) -> bool {
        (self.min()..=self.max).contains(&value)
    }

    /// Serializable description of the bound
    pub fn bound(&self) -> ItemBound {
        ItemBound {
            section: self.section,
            section_label: self.section.label(),
            key: self.key,
            label: self.label,
            min: self.min(),
            max: self.max,
        }
    }
}

impl fmt::Debug for RubricItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RubricItem")
            .field("section", &self.section)
            .field("key", &self.key)
            .field("max", &self.max)
            .finish()
    }
}

/// Serializable view of a rubric item's bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemBound {
    pub section: Section,
    pub section_label: &'static str,
    pub key: &'static str,
    pub label: &'static str,
    pub min: Score,
    pub max: Score,
}

macro_rules! item {
    ($section:ident, $field:ident . $item:ident, $key:expr, $label:expr, $max:expr) => {
        RubricItem {
            section: Section::$section,
            key: $key,
            label: $label,
            max: $max,
            read: |s: &DetailedScores| s.$field.$item,
        }
    };
}

/// Number of scored items in the rubric
pub const ITEM_COUNT: usize = 21;

/// Every rubric item in declaration order
pub static RUBRIC: [RubricItem; ITEM_COUNT] = [
    item!(Section1A, section_1a.item1, "item1", "Item 1", 6),
    item!(Section1A, section_1a.item2, "item2", "Item 2", 6),
    item!(Section1A, section_1a.item3, "item3", "Item 3", 6),
    item!(Section1A, section_1a.item4, "item4", "Item 4", 6),
    item!(Section1A, section_1a.item5, "item5", "Item 5", 6),
    item!(Section1B, section_1b.opinion, "opinion", "Opinion", 1),
    item!(Section1B, section_1b.arguments, "arguments", "Arguments", 1),
    item!(Section1B, section_1b.development, "development", "Development", 1),
    item!(Section1B, section_1b.application, "application", "Application", 1),
    item!(Section1B, section_1b.conclusion, "conclusion", "Conclusion", 1),
    item!(Section1B, section_1b.connectors, "connectors", "Connectors", 2),
    item!(Section1B, section_1b.language, "language", "Language", 1),
    item!(Section1B, section_1b.spelling, "spelling", "Spelling", 1),
    item!(Section1B, section_1b.formatting, "formatting", "Formatting", 1),
    item!(Section1B, section_1b.word_count, "wordCount", "Word count", 1),
    item!(Section2, section2.content, "content", "Content", 6),
    item!(Section2, section2.composition, "composition", "Composition", 4),
    item!(Section3, section3.characters, "characters", "Characters", 6),
    item!(Section3, section3.relationships, "relationships", "Relationships", 6),
    item!(Section3, section3.analysis, "analysis", "Analysis", 6),
    item!(Section3, section3.composition, "composition", "Composition", 12),
];

/// The rubric table
pub fn rubric() -> &'static [RubricItem] {
    &RUBRIC
}

/// Highest total a fully in-range record can reach, base credit included
pub fn max_achievable_total() -> i64 {
    RUBRIC.iter().map(|item| i64::from(item.max)).sum::<i64>() + BASE_CREDIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_counts_per_section() {
        assert_eq!(Section::Section1A.items().count(), 5);
        assert_eq!(Section::Section1B.items().count(), 10);
        assert_eq!(Section::Section2.items().count(), 2);
        assert_eq!(Section::Section3.items().count(), 4);
        assert_eq!(RUBRIC.len(), ITEM_COUNT);
    }

    #[test]
    fn test_section_order_matches_declaration() {
        let mut last = 0;
        for item in RUBRIC.iter() {
            let idx = Section::ALL.iter().position(|s| *s == item.section).unwrap();
            assert!(idx >= last, "{} declared out of section order", item.key);
            last = idx;
        }
    }

    #[test]
    fn test_connectors_bound_is_two() {
        let connectors = Section::Section1B
            .items()
            .find(|item| item.key == "connectors")
            .unwrap();
        assert_eq!(connectors.max, 2);
        assert!(Section::Section1B
            .items()
            .filter(|item| item.key != "connectors")
            .all(|item| item.max == 1));
    }

    #[test]
    fn test_accessors_read_their_own_field() {
        let mut scores = DetailedScores::zero();
        scores.section2.composition = 3;
        scores.section3.composition = 11;

        let section2 = Section::Section2.items().find(|i| i.key == "composition").unwrap();
        let section3 = Section::Section3.items().find(|i| i.key == "composition").unwrap();
        assert_eq!(section2.score(&scores), 3);
        assert_eq!(section3.score(&scores), 11);
    }

    #[test]
    fn test_accepts_closed_range() {
        let item = &RUBRIC[0];
        assert!(item.accepts(0));
        assert!(item.accepts(6));
        assert!(!item.accepts(-1));
        assert!(!item.accepts(7));
    }

    #[test]
    fn test_max_achievable_total() {
        // 5*6 + (9*1 + 2) + (6 + 4) + (6 + 6 + 6 + 12) + 10
        assert_eq!(max_achievable_total(), 30 + 11 + 10 + 30 + 10);
        assert!(max_achievable_total() <= MAX_TOTAL);
    }

    #[test]
    fn test_bound_serialization() {
        let json = serde_json::to_value(RUBRIC[10].bound()).unwrap();
        assert_eq!(json["section"], "section1B");
        assert_eq!(json["sectionLabel"], "Section I.B");
        assert_eq!(json["key"], "connectors");
        assert_eq!(json["max"], 2);
    }
}

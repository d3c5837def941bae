//! Detailed per-item scores for one graded exam paper.
//!
//! The shape is fixed: four sections, each with a known set of items. The
//! same type travels over the wire and is stored as the grade's JSON blob.

use serde::{Deserialize, Serialize};

/// A single item score.
///
/// Signed so that out-of-range input (including negatives) reaches the
/// rubric engine and gets reported instead of failing deserialization.
pub type Score = i32;

/// Section I.A: five short-answer items
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section1A {
    pub item1: Score,
    pub item2: Score,
    pub item3: Score,
    pub item4: Score,
    pub item5: Score,
}

/// Section I.B: argumentative essay criteria
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section1B {
    pub opinion: Score,
    pub arguments: Score,
    pub development: Score,
    pub application: Score,
    pub conclusion: Score,
    pub connectors: Score,
    pub language: Score,
    pub spelling: Score,
    pub formatting: Score,
    pub word_count: Score,
}

/// Section II: text comprehension
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section2 {
    pub content: Score,
    pub composition: Score,
}

/// Section III: literary essay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section3 {
    pub characters: Score,
    pub relationships: Score,
    pub analysis: Score,
    pub composition: Score,
}

/// Complete per-item scores for one exam paper.
///
/// Every section and every item is required when deserializing; a missing
/// key is a malformed request, not a rubric violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetailedScores {
    #[serde(rename = "section1A")]
    pub section_1a: Section1A,
    #[serde(rename = "section1B")]
    pub section_1b: Section1B,
    pub section2: Section2,
    pub section3: Section3,
}

impl DetailedScores {
    /// All items at zero
    pub fn zero() -> Self {
        Self::default()
    }

    /// Convert to the JSON blob stored alongside a grade
    pub fn to_json(&self) -> serde_json::Value {
        // Plain integer fields; serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

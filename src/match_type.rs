//! Kinds of character matches and their strengths.

use std::fmt::{Display, Formatter};

/// How a pattern character was matched to a variant character.
///
/// The strength is a fixed scoring weight: a direct match dominates every
/// typo kind, and typo kinds range from 1 to 3.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MatchType {
    /// The characters are equal and part of a run
    Direct,
    /// Recovered by the typo loop without any neighbouring evidence
    TypoLoop,
    /// One of two adjacent characters swapped inside a run (`ab` ↔ `ba`)
    Typo1,
    /// Matched after skipping one extra variant character inside a run
    Typo2,
    /// Recovered right after the variant position of the previous pattern char
    Typo3_1,
    /// Recovered right before the variant position of the next pattern char
    Typo3_2,
    /// Recovered strictly between the positions of its pattern neighbours
    Typo3_3,
}

impl MatchType {
    /// Strength of a direct match
    pub const MAX_STRENGTH: u32 = 10;

    /// Scoring weight of this kind of match
    pub const fn strength(self) -> u32 {
        match self {
            MatchType::Direct => Self::MAX_STRENGTH,
            MatchType::Typo1 | MatchType::Typo3_1 => 3,
            MatchType::Typo2 | MatchType::Typo3_2 => 2,
            MatchType::TypoLoop | MatchType::Typo3_3 => 1,
        }
    }

    /// Whether this is any kind of typo match
    pub const fn is_typo(self) -> bool {
        !matches!(self, MatchType::Direct)
    }
}

impl Display for MatchType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            MatchType::Direct => "direct",
            MatchType::TypoLoop => "typo_loop",
            MatchType::Typo1 => "typo_1",
            MatchType::Typo2 => "typo_2",
            MatchType::Typo3_1 => "typo_3_1",
            MatchType::Typo3_2 => "typo_3_2",
            MatchType::Typo3_3 => "typo_3_3",
        };
        write!(f, "{name}({})", self.strength())
    }
}

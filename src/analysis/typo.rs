//! Pooled records of recovered typo matches.
//!
//! Both records start fully unset. Every field must be written with `set()`
//! before it is read; reading an unset field is an
//! [`AnalysisError::ValueNotPresent`](crate::AnalysisError::ValueNotPresent).

use crate::error::{AnalysisError, Result};
use crate::match_type::MatchType;
use crate::pool::Reusable;

/// A pattern character matched to a variant position through a typo rule
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Typo {
    variant_index: Option<usize>,
    pattern_index: Option<usize>,
    character: Option<char>,
}

impl Typo {
    /// Overwrite every field
    pub fn set(&mut self, variant_index: usize, pattern_index: usize, character: char) {
        self.variant_index = Some(variant_index);
        self.pattern_index = Some(pattern_index);
        self.character = Some(character);
    }

    /// Position in the variant
    pub fn variant_index(&self) -> Result<usize> {
        self.variant_index
            .ok_or_else(|| AnalysisError::not_present("Typo", "variant_index"))
    }

    /// Position in the pattern
    pub fn pattern_index(&self) -> Result<usize> {
        self.pattern_index
            .ok_or_else(|| AnalysisError::not_present("Typo", "pattern_index"))
    }

    /// The matched character
    pub fn character(&self) -> Result<char> {
        self.character.ok_or_else(|| AnalysisError::not_present("Typo", "character"))
    }
}

impl Reusable for Typo {
    fn clear(&mut self) {
        self.variant_index = None;
        self.pattern_index = None;
        self.character = None;
    }
}

/// A variant position considered by the typo loop for one pattern character
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CandidatePosition {
    variant_index: Option<usize>,
    match_type: Option<MatchType>,
    distance: Option<usize>,
}

impl CandidatePosition {
    /// Overwrite every field
    pub fn set(&mut self, variant_index: usize, match_type: MatchType, distance: usize) {
        self.variant_index = Some(variant_index);
        self.match_type = Some(match_type);
        self.distance = Some(distance);
    }

    /// Candidate position in the variant
    pub fn variant_index(&self) -> Result<usize> {
        self.variant_index
            .ok_or_else(|| AnalysisError::not_present("CandidatePosition", "variant_index"))
    }

    /// How the candidate relates to its matched neighbours
    pub fn match_type(&self) -> Result<MatchType> {
        self.match_type
            .ok_or_else(|| AnalysisError::not_present("CandidatePosition", "match_type"))
    }

    /// Distance from the position the neighbours predict
    pub fn distance(&self) -> Result<usize> {
        self.distance
            .ok_or_else(|| AnalysisError::not_present("CandidatePosition", "distance"))
    }

    /// Whether `self` beats `other`: stronger kind, then closer, then leftmost
    pub fn is_better_than(&self, other: &CandidatePosition) -> Result<bool> {
        let (mine, theirs) = (self.match_type()?.strength(), other.match_type()?.strength());
        if mine != theirs {
            return Ok(mine > theirs);
        }
        let (mine, theirs) = (self.distance()?, other.distance()?);
        if mine != theirs {
            return Ok(mine < theirs);
        }
        Ok(self.variant_index()? < other.variant_index()?)
    }
}

impl Reusable for CandidatePosition {
    fn clear(&mut self) {
        self.variant_index = None;
        self.match_type = None;
        self.distance = None;
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::pool::Pool;

    #[test]
    fn unset_typo_fails_fast() {
        let typo = Typo::default();
        assert_eq!(
            typo.variant_index(),
            Err(AnalysisError::ValueNotPresent {
                record: "Typo",
                field: "variant_index"
            })
        );
        assert!(typo.pattern_index().is_err());
        assert!(typo.character().is_err());
    }

    #[test]
    fn typo_is_reset_by_pool() {
        let pool: Pool<Typo> = Pool::default();
        let mut typo = pool.take();
        typo.set(4, 1, 'x');
        assert_eq!(typo.variant_index(), Ok(4));
        assert_eq!(typo.pattern_index(), Ok(1));
        assert_eq!(typo.character(), Ok('x'));
        pool.give_back(typo);

        let typo = pool.take();
        assert!(typo.character().is_err());
    }

    #[test]
    fn candidate_ordering() {
        let mut strong = CandidatePosition::default();
        strong.set(9, MatchType::Typo3_1, 5);
        let mut close = CandidatePosition::default();
        close.set(2, MatchType::TypoLoop, 0);
        assert!(strong.is_better_than(&close).unwrap());
        assert!(!close.is_better_than(&strong).unwrap());

        let mut left = CandidatePosition::default();
        left.set(1, MatchType::TypoLoop, 1);
        let mut right = CandidatePosition::default();
        right.set(3, MatchType::TypoLoop, 1);
        assert!(left.is_better_than(&right).unwrap());
    }

    #[test]
    fn unset_candidate_comparison_errors() {
        let unset = CandidatePosition::default();
        let mut set = CandidatePosition::default();
        set.set(0, MatchType::Typo3_3, 0);
        assert!(set.is_better_than(&unset).is_err());
    }
}

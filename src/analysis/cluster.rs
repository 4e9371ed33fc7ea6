//! Clusters of consecutive matches and the rules that arbitrate between them.

use crate::analysis::policy::ScoringPolicy;
use crate::match_type::MatchType;
use crate::pool::Reusable;

/// One pattern character matched inside a cluster
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClusterMatch {
    /// Index in the pattern
    pub pattern: usize,
    /// Index in the variant
    pub variant: usize,
    /// How the characters matched
    pub kind: MatchType,
}

/// A contiguous run of pattern characters mapped onto a contiguous variant range.
///
/// Ranges are inclusive. Clusters are pooled: [`Reusable::clear`] keeps the
/// allocation of the match list.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Cluster {
    pattern_start: usize,
    pattern_end: usize,
    variant_start: usize,
    variant_end: usize,
    pattern_length: usize,
    variant_length: usize,
    starts_after_separator: bool,
    ends_before_separator: bool,
    possible_typo_matches: usize,
    matches: Vec<ClusterMatch>,
}

impl Cluster {
    /// Start a new cluster for strings of the given lengths
    pub fn begin(&mut self, pattern_length: usize, variant_length: usize) {
        self.clear();
        self.pattern_length = pattern_length;
        self.variant_length = variant_length;
    }

    /// Append a match; matches arrive in increasing pattern order
    pub fn push(&mut self, pattern: usize, variant: usize, kind: MatchType) {
        if self.matches.is_empty() {
            self.pattern_start = pattern;
            self.pattern_end = pattern;
            self.variant_start = variant;
            self.variant_end = variant;
        } else {
            self.pattern_end = self.pattern_end.max(pattern);
            self.variant_start = self.variant_start.min(variant);
            self.variant_end = self.variant_end.max(variant);
        }
        self.matches.push(ClusterMatch { pattern, variant, kind });
    }

    /// Record what surrounds the cluster in the variant
    pub fn set_surroundings(
        &mut self,
        starts_after_separator: bool,
        ends_before_separator: bool,
        possible_typo_matches: usize,
    ) {
        self.starts_after_separator = starts_after_separator;
        self.ends_before_separator = ends_before_separator;
        self.possible_typo_matches = possible_typo_matches;
    }

    /// First pattern index covered
    pub fn pattern_start(&self) -> usize {
        self.pattern_start
    }

    /// Last pattern index covered
    pub fn pattern_end(&self) -> usize {
        self.pattern_end
    }

    /// First variant index covered
    pub fn variant_start(&self) -> usize {
        self.variant_start
    }

    /// Last variant index covered
    pub fn variant_end(&self) -> usize {
        self.variant_end
    }

    /// Number of matched pattern characters
    pub fn len(&self) -> usize {
        self.matches.len()
    }

    /// Whether no match was pushed yet
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// The matches, in pattern order
    pub fn matches(&self) -> &[ClusterMatch] {
        &self.matches
    }

    /// Variant positions of the matches, in pattern order
    pub fn variant_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.matches.iter().map(|m| m.variant)
    }

    /// Whether the cluster covers the first pattern character
    pub fn is_at_pattern_start(&self) -> bool {
        self.pattern_start == 0
    }

    /// Whether the cluster covers the last pattern character
    pub fn is_at_pattern_end(&self) -> bool {
        self.pattern_end + 1 == self.pattern_length
    }

    /// Whether the cluster begins at the first variant character
    pub fn is_at_variant_start(&self) -> bool {
        self.variant_start == 0
    }

    /// Whether the cluster ends at the last variant character
    pub fn is_at_variant_end(&self) -> bool {
        self.variant_end + 1 == self.variant_length
    }

    /// Whether the variant character before the cluster is a separator
    pub fn starts_after_separator(&self) -> bool {
        self.starts_after_separator
    }

    /// Whether the variant character after the cluster is a separator
    pub fn ends_before_separator(&self) -> bool {
        self.ends_before_separator
    }

    /// Whether the cluster begins a token of the variant
    pub fn is_token_start(&self) -> bool {
        self.is_at_variant_start() || self.starts_after_separator
    }

    /// Neighbouring pattern characters explained by a one-character slip
    pub fn possible_typo_matches(&self) -> usize {
        self.possible_typo_matches
    }

    /// Number of matches inside the cluster that are not direct
    pub fn typo_count(&self) -> usize {
        self.matches.iter().filter(|m| m.kind.is_typo()).count()
    }

    /// Whether both clusters cover the same pattern characters
    pub fn has_same_pattern_range(&self, other: &Cluster) -> bool {
        self.pattern_start == other.pattern_start && self.pattern_end == other.pattern_end
    }

    /// Whether the clusters compete for pattern or variant characters
    pub fn conflicts_with(&self, other: &Cluster) -> bool {
        let pattern = self.pattern_start <= other.pattern_end && other.pattern_start <= self.pattern_end;
        let variant = self.variant_start <= other.variant_end && other.variant_start <= self.variant_end;
        pattern || variant
    }
}

impl Reusable for Cluster {
    fn clear(&mut self) {
        self.pattern_start = 0;
        self.pattern_end = 0;
        self.variant_start = 0;
        self.variant_end = 0;
        self.pattern_length = 0;
        self.variant_length = 0;
        self.starts_after_separator = false;
        self.ends_before_separator = false;
        self.possible_typo_matches = 0;
        self.matches.clear();
    }
}

//------------------------------------------------------------------------------
/// Outcome of comparing two conflicting clusters
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Preference {
    /// Keep the first cluster
    PreferLeft,
    /// Keep the second cluster
    PreferRight,
}

/// Picks one of two conflicting clusters.
///
/// Anchoring at the string edges is checked first, then typo evidence, then
/// separator alignment. Ties that survive every rule go to the right-hand
/// cluster.
pub struct ClusterResolver<'a> {
    policy: &'a dyn ScoringPolicy,
    pattern: &'a [char],
    variant: &'a [char],
}

impl<'a> ClusterResolver<'a> {
    /// Create a resolver for one pattern/variant pair
    pub fn new(policy: &'a dyn ScoringPolicy, pattern: &'a [char], variant: &'a [char]) -> Self {
        Self {
            policy,
            pattern,
            variant,
        }
    }

    /// Decide which of `one` and `two` to keep
    pub fn compare(&self, one: &Cluster, two: &Cluster) -> Preference {
        if one.has_same_pattern_range(two) {
            if one.is_at_pattern_start() {
                match (one.is_at_variant_start(), two.is_at_variant_start()) {
                    (true, false) => return Preference::PreferLeft,
                    (false, true) => return Preference::PreferRight,
                    _ => {}
                }
            } else if one.is_at_pattern_end() {
                match (one.is_at_variant_end(), two.is_at_variant_end()) {
                    (true, false) => return Preference::PreferLeft,
                    (false, true) => return Preference::PreferRight,
                    _ => {}
                }
            }
        }
        self.compare_typos(one, two)
    }

    fn compare_typos(&self, one: &Cluster, two: &Cluster) -> Preference {
        let (left, right) = (one.possible_typo_matches(), two.possible_typo_matches());
        if left != right {
            return if left > right {
                Preference::PreferLeft
            } else {
                Preference::PreferRight
            };
        }

        let left = self
            .policy
            .additional_possible_typo_matches(one, self.pattern, self.variant);
        let right = self
            .policy
            .additional_possible_typo_matches(two, self.pattern, self.variant);
        if left != right {
            return if left > right {
                Preference::PreferLeft
            } else {
                Preference::PreferRight
            };
        }

        match (one.starts_after_separator(), two.starts_after_separator()) {
            (true, false) => Preference::PreferLeft,
            (true, true) if one.ends_before_separator() && !two.ends_before_separator() => Preference::PreferLeft,
            _ => Preference::PreferRight,
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests {
    use super::*;
    use crate::analysis::policy::DefaultPolicy;

    fn cluster(pattern: &str, variant: &str, pattern_start: usize, variant_start: usize, len: usize) -> Cluster {
        let mut cluster = Cluster::default();
        cluster.begin(pattern.chars().count(), variant.chars().count());
        for k in 0..len {
            cluster.push(pattern_start + k, variant_start + k, MatchType::Direct);
        }
        cluster
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn anchoring_flags() {
        let c = cluster("abc", "abcx", 0, 0, 3);
        assert!(c.is_at_pattern_start());
        assert!(c.is_at_pattern_end());
        assert!(c.is_at_variant_start());
        assert!(!c.is_at_variant_end());
        assert_eq!(c.len(), 3);
        assert_eq!(c.typo_count(), 0);
    }

    #[test]
    fn conflicts() {
        let one = cluster("abcd", "abcdxxab", 0, 0, 2);
        let two = cluster("abcd", "abcdxxab", 0, 6, 2);
        let three = cluster("abcd", "abcdxxab", 2, 2, 2);
        assert!(one.conflicts_with(&two));
        assert!(!one.conflicts_with(&three));
        assert!(one.has_same_pattern_range(&two));
    }

    #[test]
    fn prefers_cluster_at_variant_start_for_pattern_start() {
        let (p, v) = (chars("ab"), chars("ab-ab"));
        let policy = DefaultPolicy;
        let resolver = ClusterResolver::new(&policy, &p, &v);
        let start = cluster("ab", "ab-ab", 0, 0, 2);
        let mut later = cluster("ab", "ab-ab", 0, 3, 2);
        later.set_surroundings(true, false, 0);
        assert_eq!(resolver.compare(&start, &later), Preference::PreferLeft);
        assert_eq!(resolver.compare(&later, &start), Preference::PreferRight);
    }

    #[test]
    fn prefers_cluster_at_variant_end_for_pattern_end() {
        let (p, v) = (chars("xab"), chars("ab_ab"));
        let policy = DefaultPolicy;
        let resolver = ClusterResolver::new(&policy, &p, &v);
        let first = cluster("xab", "ab_ab", 1, 0, 2);
        let last = cluster("xab", "ab_ab", 1, 3, 2);
        assert_eq!(resolver.compare(&first, &last), Preference::PreferRight);
        assert_eq!(resolver.compare(&last, &first), Preference::PreferLeft);
    }

    #[test]
    fn pattern_start_without_variant_start_falls_through() {
        let (p, v) = (chars("abz"), chars("xab ab"));
        let policy = DefaultPolicy;
        let resolver = ClusterResolver::new(&policy, &p, &v);
        let inner = cluster("abz", "xab ab", 0, 1, 2);
        let mut token = cluster("abz", "xab ab", 0, 4, 2);
        token.set_surroundings(true, true, 0);
        assert!(!inner.is_at_variant_start() && !token.is_at_variant_start());
        assert_eq!(resolver.compare(&inner, &token), Preference::PreferRight);
        assert_eq!(resolver.compare(&token, &inner), Preference::PreferLeft);

        let mut typo = cluster("abz", "xab ab", 0, 1, 2);
        typo.set_surroundings(false, false, 1);
        assert_eq!(resolver.compare(&typo, &token), Preference::PreferLeft);
        assert_eq!(resolver.compare(&token, &typo), Preference::PreferRight);
    }

    #[test]
    fn pattern_end_without_variant_end_falls_through() {
        let (p, v) = (chars("zab"), chars("ab-abx"));
        let policy = DefaultPolicy;
        let resolver = ClusterResolver::new(&policy, &p, &v);
        let first = cluster("zab", "ab-abx", 1, 0, 2);
        let mut second = cluster("zab", "ab-abx", 1, 3, 2);
        second.set_surroundings(true, false, 0);
        assert!(first.is_at_pattern_end() && !first.is_at_pattern_start());
        assert!(!first.is_at_variant_end() && !second.is_at_variant_end());
        assert_eq!(resolver.compare(&first, &second), Preference::PreferRight);
        assert_eq!(resolver.compare(&second, &first), Preference::PreferLeft);

        let mut typo = cluster("zab", "ab-abx", 1, 0, 2);
        typo.set_surroundings(false, false, 1);
        assert_eq!(resolver.compare(&typo, &second), Preference::PreferLeft);
        assert_eq!(resolver.compare(&second, &typo), Preference::PreferRight);
    }

    #[test]
    fn more_possible_typos_wins() {
        let (p, v) = (chars("abcd"), chars("zbcqqbc"));
        let policy = DefaultPolicy;
        let resolver = ClusterResolver::new(&policy, &p, &v);
        let mut one = cluster("abcd", "zbcqqbc", 1, 1, 2);
        let two = cluster("abcd", "zbcqqbc", 1, 5, 2);
        one.set_surroundings(false, false, 1);
        assert_eq!(resolver.compare(&one, &two), Preference::PreferLeft);
        assert_eq!(resolver.compare(&two, &one), Preference::PreferRight);
    }

    #[test]
    fn separator_rules_and_right_bias() {
        let (p, v) = (chars("mbcm"), chars("qbcq qbcq"));
        let policy = DefaultPolicy;
        let resolver = ClusterResolver::new(&policy, &p, &v);
        let plain = cluster("mbcm", "qbcq qbcq", 1, 1, 2);
        let plain_too = cluster("mbcm", "qbcq qbcq", 1, 6, 2);
        assert_eq!(resolver.compare(&plain, &plain_too), Preference::PreferRight);
        assert_eq!(resolver.compare(&plain_too, &plain), Preference::PreferRight);

        let mut after_sep = cluster("mbcm", "qbcq qbcq", 1, 6, 2);
        after_sep.set_surroundings(true, false, 0);
        assert_eq!(resolver.compare(&after_sep, &plain), Preference::PreferLeft);

        let mut token = cluster("mbcm", "qbcq qbcq", 1, 6, 2);
        token.set_surroundings(true, true, 0);
        assert_eq!(resolver.compare(&token, &after_sep), Preference::PreferLeft);
        assert_eq!(resolver.compare(&after_sep, &token), Preference::PreferRight);
    }
}

#[allow(dead_code)]
mod common;

use common::ranked;
use typo_weight::prelude::*;

#[test]
fn exact_match_ranks_first() {
    let analyzer = Analyzer::default();
    insta::assert_snapshot!(ranked(&analyzer, "abc", &["xabcxx", "abc", "abcdef"]), @r"
    abc
    abcdef
    xabcxx
    ");
}

#[test]
fn token_start_beats_mid_word() {
    let analyzer = Analyzer::default();
    insta::assert_snapshot!(ranked(&analyzer, "bar", &["foobar", "foo bar"]), @r"
    foo bar
    foobar
    ");
}

#[test]
fn direct_beats_swapped() {
    let analyzer = Analyzer::default();
    let outputs = analyzer.analyze_all("ab", &["ba", "ab"]).unwrap();
    let ranked: Vec<(&str, usize, usize)> = outputs
        .iter()
        .map(|o| (o.text(), o.original_index(), o.index()))
        .collect();
    assert_eq!(ranked, vec![("ab", 1, 0), ("ba", 0, 1)]);
    assert!(outputs[0].weight() < outputs[1].weight());
}

#[test]
fn transposed_query_still_finds_its_word() {
    let analyzer = Analyzer::default();
    let outputs = analyzer
        .analyze_all("frobincate", &["focaccia", "frobnicate", "xyz"])
        .unwrap();
    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].text(), "frobnicate");
    assert_eq!(outputs[0].original_index(), 1);
    assert_eq!(outputs[0].index(), 0);
}

#[test]
fn ranking_is_independent_of_input_order() {
    let analyzer = Analyzer::default();
    let forward = ranked(&analyzer, "bar", &["foobar", "foo bar", "bar", "baz"]);
    let backward = ranked(&analyzer, "bar", &["baz", "bar", "foo bar", "foobar"]);
    assert_eq!(forward, backward);
}

#[test]
fn indices_are_consecutive_after_ranking() {
    let analyzer = Analyzer::default();
    let items = common::random_words(200);
    let outputs = analyzer.analyze_all("word", &items).unwrap();
    for (rank, output) in outputs.iter().enumerate() {
        assert_eq!(output.index(), rank);
        assert_eq!(items[output.original_index()], output.text());
    }
    assert!(outputs.windows(2).all(|w| w[0] <= w[1]));
}

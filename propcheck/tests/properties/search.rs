//! Search results narrow as query terms are added.

use crate::config;
use propcheck::search::{pages, search, KEYWORDS};
use propcheck::*;

fn keyword() -> Gen<String> {
    Gen::element(&KEYWORDS.map(str::to_string)).unwrap()
}

#[test]
fn fixed_corpus() {
    let corpus = ["a b", "a", "b"];
    assert_eq!(search(&corpus, &["a"]), vec!["a b", "a"]);
    assert_eq!(search(&corpus, &["b"]), vec!["a b", "b"]);
    assert_eq!(search(&corpus, &["a", "b"]), vec!["a b"]);
}

#[test]
fn another_term_never_widens_the_results() {
    let input = pages().unwrap().zip(keyword()).zip(keyword());
    property(input, |((corpus, first), second)| {
        let wide = search(corpus, &[first]);
        let narrow = search(corpus, &[first, second]);
        Outcome::from(narrow.iter().all(|page| wide.contains(page)))
            .classify(narrow.len() < wide.len(), "narrowed")
            .classify(wide.is_empty(), "no results")
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn every_result_contains_every_term() {
    let input = pages().unwrap().zip(Gen::list_of(keyword()));
    for_all(input, |(corpus, terms)| {
        search(corpus, terms)
            .iter()
            .all(|page| terms.iter().all(|term| page.contains(term.as_str())))
    })
    .run(&config())
    .unwrap()
    .assert_pass();
}

#[test]
fn keywords_are_planted_often_enough_to_match() {
    property(pages().unwrap(), |corpus: &Vec<String>| {
        Outcome::pass().classify(!search(corpus, &[KEYWORDS[0]]).is_empty(), "has hits")
    })
    .cover(20.0, "large corpus", |corpus| corpus.len() >= 5)
    .require_coverage(20.0, "has hits")
    .run(&config())
    .unwrap()
    .assert_pass();
}

//! A toy search engine: pages matching every query term.

use propcheck_core::{Gen, Result, WeightedChoice};

/// Terms the page generator plants so that queries have something to find.
pub const KEYWORDS: [&str; 2] = ["keyword1", "keyword2"];

/// Pages containing every term as a substring, in corpus order.
///
/// An empty query matches every page.
pub fn search<'a, P, T>(pages: &'a [P], terms: &[T]) -> Vec<&'a str>
where
    P: AsRef<str>,
    T: AsRef<str>,
{
    pages
        .iter()
        .map(|page| page.as_ref())
        .filter(|page| terms.iter().all(|term| page.contains(term.as_ref())))
        .collect()
}

/// A corpus of pages, each a space-separated list of terms. A quarter of
/// the terms are one of the [`KEYWORDS`].
pub fn pages() -> Result<Gen<Vec<String>>> {
    let keyword = Gen::element(&KEYWORDS.map(str::to_string))?;
    let word = Gen::string_of(Gen::<char>::ascii_alpha(), 1, 10)?;
    let term = Gen::frequency(vec![
        WeightedChoice::new(25, keyword),
        WeightedChoice::new(75, word),
    ])?;
    let page = Gen::non_empty_list_of(term).map(|terms| terms.join(" "));
    Ok(Gen::list_of(page))
}

//! Extracting email addresses from free text.

use once_cell::sync::Lazy;
use propcheck_core::{Gen, Result, WeightedChoice};
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

const LOCAL_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._%+-";
const DOMAIN_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789-";

/// Every email address in `text`, in order of appearance.
pub fn extract(text: &str) -> Vec<&str> {
    EMAIL.find_iter(text).map(|m| m.as_str()).collect()
}

/// Addresses of the form `local@domain.tld` with a two or three letter
/// top-level domain.
pub fn addresses() -> Result<Gen<String>> {
    let local = Gen::string_of(Gen::from_chars(LOCAL_CHARS)?, 1, 16)?;
    let domain = Gen::string_of(Gen::from_chars(DOMAIN_CHARS)?, 1, 12)?;
    let tld = Gen::frequency(vec![
        WeightedChoice::new(1, Gen::string_of(Gen::<char>::ascii_lowercase(), 2, 2)?),
        WeightedChoice::new(1, Gen::string_of(Gen::<char>::ascii_lowercase(), 3, 3)?),
    ])?;

    Ok(local
        .zip(domain)
        .zip(tld)
        .map(|((local, domain), tld)| format!("{local}@{domain}.{tld}")))
}

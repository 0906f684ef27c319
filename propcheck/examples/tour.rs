//! A guided run of every tour property.
//!
//! Set `RUST_LOG=propcheck_core=debug` to watch the runner at work, and
//! `PROPCHECK_SEED` to replay a run.

use propcheck::coin::{self, NormalPair};
use propcheck::purchase_order::{gen, xml};
use propcheck::search::{self, KEYWORDS};
use propcheck::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let mut config = Config::default();
    if let Some(seed) = std::env::var("PROPCHECK_SEED")
        .ok()
        .and_then(|seed| seed.parse().ok())
    {
        config = config.with_seed(seed);
    }

    let report = Suite::new(config.clone())
        .add("addition commutes", || {
            for_all(arbitrary::<(i64, i64)>(), |&(a, b)| {
                arith::add(a, b) == arith::add(b, a)
            })
        })
        .add("coins within the cap add", || {
            property(arbitrary::<NormalPair>(), |&NormalPair(a, b)| {
                coin::sum_labels(a, b)
                    .into_iter()
                    .fold(Outcome::from(a.add(b).is_ok()), Outcome::label)
            })
        })
        .run();
    println!("{report}");

    let overflow = for_all(coin::overflowing_pairs()?, |pair| pair.0.add(pair.1).is_err());
    println!("{}", overflow.run_with_context(&config, Some("coins above the cap overflow"))?);

    let narrowing = property(search::pages()?, |pages: &Vec<String>| {
        let wide = search::search(pages, &KEYWORDS[..1]);
        let narrow = search::search(pages, &KEYWORDS);
        Outcome::from(narrow.len() <= wide.len()).classify(!wide.is_empty(), "hits")
    });
    println!("{}", narrowing.run_with_context(&config, Some("search narrows"))?);

    let round_trip = property(gen::purchase_order()?, |order| {
        Outcome::equal(&xml::parse(&xml::serialize(order)), &Ok(order.clone()))
    });
    println!("{}", round_trip.run_with_context(&config, Some("orders round trip"))?);

    let corrupt = for_all(gen::corrupt_document()?, |document| {
        xml::parse(document).map_or_else(|errors| errors[0].is_syntax(), |_| false)
    });
    println!("{}", corrupt.run_with_context(&config, Some("corrupt orders are rejected"))?);

    let die = || Gen::<u8>::from_range(Range::new(1, 6));
    let dice = property(die().zip(die()).map(|(a, b)| a + b), |&total| {
        Outcome::pass().collect_value(total)
    });
    println!(
        "{}",
        dice.run_with_context(&config.with_tests(10_000), Some("two dice"))?
    );

    Ok(())
}

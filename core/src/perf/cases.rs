use anyhow::{Result, bail};
use tracing::debug;

use crate::concat;
use crate::fixture::Fixture;

/// Registered name of the no-work baseline.
pub const BASELINE: &str = "nullop";

type BuildFn = fn(&Fixture) -> String;

/// One output-producing strategy under its registered benchmark name.
pub struct ConcatCase {
    key: &'static str,
    title: &'static str,
    build: BuildFn,
}

impl ConcatCase {
    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    /// Run the strategy once for `fixture`.
    pub fn build(&self, fixture: &Fixture) -> String {
        (self.build)(fixture)
    }

    /// Build and check the output byte-for-byte against the fixture's
    /// template rendering.
    pub fn run_verified(&self, fixture: &Fixture) -> Result<String> {
        let out = self.build(fixture);
        let expected = fixture.expected();
        if out != expected {
            bail!(
                "strategy '{}' produced {:?}, expected {:?}",
                self.key,
                out,
                expected
            );
        }
        Ok(out)
    }
}

fn build_format_to(fixture: &Fixture) -> String {
    let mut out = String::new();
    concat::format_to(fixture, &mut out);
    out
}

static CONCAT_CASES: &[ConcatCase] = &[
    ConcatCase {
        key: "naive",
        title: "Operator chain, sizing left to the concatenation mechanism",
        build: concat::naive,
    },
    ConcatCase {
        key: "append",
        title: "Incremental append, no upfront sizing",
        build: concat::append,
    },
    ConcatCase {
        key: "appendWithReserve",
        title: "Incremental append after reserving the input lengths",
        build: concat::append_with_reserve,
    },
    ConcatCase {
        key: "format",
        title: "One-shot format into a fresh buffer",
        build: concat::format,
    },
    ConcatCase {
        key: "format_to",
        title: "Format appended into a caller-supplied buffer",
        build: build_format_to,
    },
];

/// The output-producing strategies in registration order.
pub fn concat_cases() -> &'static [ConcatCase] {
    CONCAT_CASES
}

/// Look up a producing strategy by its registered name; the baseline has no
/// case entry and resolves to `None`.
pub fn case_by_key(key: &str) -> Option<&'static ConcatCase> {
    CONCAT_CASES.iter().find(|case| case.key == key)
}

/// Every registered benchmark name in registration order, baseline last.
pub fn bench_case_keys() -> Vec<&'static str> {
    let mut keys: Vec<&'static str> = CONCAT_CASES.iter().map(|case| case.key).collect();
    keys.push(BASELINE);
    keys
}

/// Run every producing strategy for `fixture` and check that all outputs
/// match the template rendering (and therefore one another).
pub fn verify_equivalence(fixture: &Fixture) -> Result<()> {
    for case in CONCAT_CASES {
        let out = case.run_verified(fixture)?;
        debug!(case = case.key, len = out.len(), "strategy output verified");
    }
    Ok(())
}

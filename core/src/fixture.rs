//! Input material shared by every measured concatenation strategy.
//!
//! The five values are plain owned strings so the strategies exercise real
//! heap data instead of `&'static str` literals the optimizer could see
//! through. The canonical instance lives behind a `Lazy`: initialized on
//! first access, read-only afterwards, alive for the process duration.

use once_cell::sync::Lazy;

/// Extra capacity requested on top of the summed value lengths; covers the
/// fixed punctuation around the values (15 bytes of literals).
pub const RESERVE_SLACK: usize = 16;

static CANONICAL: Lazy<Fixture> = Lazy::new(Fixture::default);

/// The five input values fed to each concatenation strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    pub label: String,
    pub data1: String,
    pub data2: String,
    pub data3: String,
    pub delim: String,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new("label", "data1", "data2", "data3", "delim")
    }
}

impl Fixture {
    pub fn new(
        label: impl Into<String>,
        data1: impl Into<String>,
        data2: impl Into<String>,
        data3: impl Into<String>,
        delim: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            data1: data1.into(),
            data2: data2.into(),
            data3: data3.into(),
            delim: delim.into(),
        }
    }

    /// Process-wide canonical fixture, initialized once on first access.
    pub fn canonical() -> &'static Fixture {
        &CANONICAL
    }

    /// Fixture whose five values are distinct repeated letters of `len`
    /// bytes each, for payload-scaling runs.
    pub fn with_value_len(len: usize) -> Self {
        Self::new(
            "l".repeat(len),
            "a".repeat(len),
            "b".repeat(len),
            "c".repeat(len),
            "d".repeat(len),
        )
    }

    /// Sum of the five value lengths in bytes.
    pub fn input_len(&self) -> usize {
        self.label.len() + self.data1.len() + self.data2.len() + self.data3.len() + self.delim.len()
    }

    /// Capacity the reserving strategy requests before appending.
    pub fn reserve_capacity(&self) -> usize {
        self.input_len() + RESERVE_SLACK
    }

    /// The rendering every producing strategy must agree on for this fixture.
    pub fn expected(&self) -> String {
        format!(
            "Result: {}: ({},{},{},{})",
            self.label, self.data1, self.data2, self.data3, self.delim
        )
    }
}

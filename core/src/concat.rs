//! The measured concatenation strategies.
//!
//! Every routine builds the same byte sequence,
//! `Result: <label>: (<data1>,<data2>,<data3>,<delim>)`, and differs only in
//! how the buffer behind it is allocated and grown. The bodies share no
//! helpers; each is a self-contained rendition of its technique.

use std::fmt::Write as _;

use crate::fixture::Fixture;

/// Chained `+` concatenation; intermediate buffer sizing is left entirely to
/// the concatenation operator.
pub fn naive(fixture: &Fixture) -> String {
    "Result: ".to_string()
        + &fixture.label
        + ": ("
        + &fixture.data1
        + ","
        + &fixture.data2
        + ","
        + &fixture.data3
        + ","
        + &fixture.delim
        + ")"
}

/// Incremental appends onto one growable buffer, no upfront sizing.
pub fn append(fixture: &Fixture) -> String {
    let mut out = String::from("Result: ");
    out.push_str(&fixture.label);
    out.push_str(": (");
    out.push_str(&fixture.data1);
    out.push(',');
    out.push_str(&fixture.data2);
    out.push(',');
    out.push_str(&fixture.data3);
    out.push(',');
    out.push_str(&fixture.delim);
    out.push(')');
    out
}

/// Incremental appends after reserving the summed input lengths plus
/// [`crate::fixture::RESERVE_SLACK`]; the appends never reallocate.
pub fn append_with_reserve(fixture: &Fixture) -> String {
    let mut out = String::from("Result: ");
    out.reserve(fixture.reserve_capacity());
    out.push_str(&fixture.label);
    out.push_str(": (");
    out.push_str(&fixture.data1);
    out.push(',');
    out.push_str(&fixture.data2);
    out.push(',');
    out.push_str(&fixture.data3);
    out.push(',');
    out.push_str(&fixture.delim);
    out.push(')');
    out
}

/// One-shot `format!`; the formatting engine sizes a single allocation.
pub fn format(fixture: &Fixture) -> String {
    format!(
        "Result: {}: ({},{},{},{})",
        fixture.label, fixture.data1, fixture.data2, fixture.data3, fixture.delim
    )
}

/// Same template as [`format`], appended into the caller's buffer; existing
/// content is preserved and growth policy stays with the formatting engine.
pub fn format_to(fixture: &Fixture, out: &mut String) {
    // fmt::Write for String cannot error.
    let _ = write!(
        out,
        "Result: {}: ({},{},{},{})",
        fixture.label, fixture.data1, fixture.data2, fixture.data3, fixture.delim
    );
}

/// Does no work; registered so the harness can report the timer/loop floor.
pub fn nullop(_fixture: &Fixture) {}

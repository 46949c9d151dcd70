pub mod concat;
pub mod fixture;
pub mod perf;

#[cfg(test)]
mod fixture_test;

//! Test execution engine
//!
//! Checks run strictly one after another; creation must precede listing.

mod runner;

pub use runner::TestRunner;

//! Testing utilities and benchmarks for the keywheel library

pub mod harness;

//! Subcommand implementations.

pub(crate) mod ab_test;
pub(crate) mod binomial;

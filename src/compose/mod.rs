//! Resource composition
//!
//! Fan-out of one paginated child fetch per parent record, e.g. the
//! comments of every post.
//!
//! # Failure policy
//!
//! Every child fetch is handled on its own. With `fail_fast` (the default)
//! the first failure aborts the whole composition and nothing partial is
//! returned. Without it, failures are collected in [`Composed::failures`]
//! and the affected parents are kept without the child field.

mod composer;

pub use composer::{ChildFailure, ChildResource, ComposeConfig, Composed, Composer};

#[cfg(test)]
mod tests;

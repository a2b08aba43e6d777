//! Diff collection between a pull-request branch and its base.
//!
//! Shells out to the host `git` to fetch the base branch from `origin` and
//! produce the unified diff `origin/<base>...HEAD`, excluding lock files and
//! other noise paths.

pub mod collect;

pub use collect::branch_diff;

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cross-filter and derived-statistic pipeline over the disaster record
//! store.
//!
//! [`filter`] narrows a store by country, disaster type, and year range.
//! [`ratio`] and [`aggregate`] turn a (filtered) store into the numbers the
//! charts draw. Every function is pure: inputs are borrowed, results are
//! freshly allocated, and the pristine store is never modified.

pub mod aggregate;
pub mod color;
pub mod filter;
pub mod format;
pub mod ratio;

#[cfg(test)]
pub(crate) mod fixtures;

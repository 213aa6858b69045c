#![recursion_limit = "256"]

//! Convolutional sentiment classification over one-word reviews, built on
//! Burn, plus a standalone extractor for operator names in program dumps.
//!
//! The sentiment side is layered:
//! [`cli`] → [`application`] → [`domain`] / [`data`] → [`ml`] → [`infra`].
//! [`extract`] is independent of all of them.

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod ml;
pub mod infra;
pub mod extract;

// Copyright 2026 the Flowtext Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `flowtext`.
//!
//! - The `util` module contains fixtures and helpers shared by different test modules.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, which makes the shared helpers easy to reach.
//! - For test naming, put the topic of the test at the start of the name, e.g.
//!   `navigation_tree_previous_closed` rather than `previous_closed_tree_navigation`.

#![allow(missing_docs, reason = "we don't need docs for testing")]

mod cache;

mod util;

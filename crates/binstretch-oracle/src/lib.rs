// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Binstretch Oracle
//!
//! Decides whether a multiset of items can be packed into `k` bins of
//! capacity `C`.
//!
//! ## Motivation
//!
//! The adversary search asks "is the current configuration plus one more
//! item still packable?" at almost every node. Most of these questions are
//! easy, a few are hard. The oracle layers cheap sound tests in front of an
//! exact decision procedure and memoizes the expensive answers.
//!
//! ## Highlights
//!
//! * **`trivial`**: pigeonhole and single pass bin counting on the raw item order.
//! * **`heuristic`**: decreasing order counting, big item pigeonhole tests and
//!   a constructive first-fit packing.
//! * **`model`**: `PackingModel`, the backend-agnostic 0/1 assignment
//!   formulation with symmetry-breaking fixings.
//! * **`backend`**: the `FeasibilityBackend` trait, an exact depth-first
//!   `SearchBackend`, and a `MilpBackend` behind the `milp` feature.
//! * **`oracle`**: `FeasibilityOracle`, which chains the tiers and caches
//!   non-trivial answers.
//! * **`stats`**: `OracleStatistics`.

pub mod backend;
pub mod error;
pub mod heuristic;
pub mod key;
pub mod model;
pub mod oracle;
pub mod stats;
pub mod trivial;

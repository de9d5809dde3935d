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

//! # Binstretch Search
//!
//! The adversary side of online bin stretching as a memoized
//! branch-and-bound game-tree search.
//!
//! ## Motivation
//!
//! An adversary offers items one at a time; a deterministic algorithm must
//! place each item immediately into one of `k` bins. The adversary may only
//! offer items such that everything offered so far still fits into `k` bins
//! of capacity `C` offline. The largest load the adversary can force on the
//! algorithm, divided by `C`, is a lower bound on the stretching factor of
//! every online algorithm. This crate computes that load exactly for a given
//! weight universe.
//!
//! ## Highlights
//!
//! * **`adversary`**: `AdversarySolver` and the per-run search session. The
//!   adversary maximizes over weights, the algorithm minimizes over bins.
//! * **`memo`**: `MemoTable` with an overwrite and a merging interval policy.
//! * **`placement`**: a scoped guard that places an item and undoes the
//!   placement on drop, so the search mutates one configuration in place.
//! * **`monitor`**: observers for logging and for recording the explored
//!   decision tree as Graphviz DOT.
//! * **`stats`**, **`result`**, **`error`**: run statistics, outcome and errors.

pub mod adversary;
pub mod error;
pub mod memo;
pub mod monitor;
pub mod placement;
pub mod result;
pub mod stats;

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

//! # Binstretch Model
//!
//! **The domain model of the online bin stretching game.**
//!
//! An adversary offers items one by one, a decision maker places each of them
//! irrevocably into one of a fixed number of bins. This crate holds the data
//! both sides manipulate; the feasibility oracle and the adversary search live
//! in their own crates.
//!
//! ## Architecture
//!
//! * **`index`**: strongly typed `BinIndex`.
//! * **`item`**: `Item<T>`, a positive size.
//! * **`bin`**: `Bin<T>`, a capacity with a stack of placed items and O(1)
//!   place/undo for backtracking searches.
//! * **`configuration`**: `BinConfiguration<T>`, the ordered set of bins at a
//!   search node, and its order-independent `ConfigurationKey<T>`.
//! * **`weights`**: `WeightUniverse<T>`, the sizes the adversary may offer.
//! * **`generator`**: random packable instances for stress tests and benchmarks.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: sizes are a generic signed integer, bins are addressed by `BinIndex`.
//! 2.  **No reallocation on the hot path**: bins are mutated in place and restored by `remove_last`.
//! 3.  **Fail-Fast**: constructors reject non-positive sizes and capacities eagerly.

pub mod bin;
pub mod configuration;
pub mod generator;
pub mod index;
pub mod item;
pub mod weights;

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

//! Monitoring utilities for the adversary search
//!
//! Defines the `AdversaryMonitor` trait plus lightweight implementations to
//! observe the search without touching its logic.
//!
//! Components
//! - `adversary_monitor`: the monitoring interface and cut reasons.
//! - `composite`: fan‑out monitor.
//! - `log`: periodic progress reporting through the `log` facade.
//! - `no_op`: zero‑overhead placeholder.
//! - `tree`: records the explored decision tree and exports it as DOT.
//!
//! Notes
//! - Callbacks take `&mut self`; keep handlers fast and non‑blocking.

pub mod adversary_monitor;
pub mod composite;
pub mod log;
pub mod no_op;
pub mod tree;

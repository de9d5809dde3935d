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

//! Exact feasibility backends.
//!
//! A backend receives a `PackingModel` and answers feasible or infeasible.
//! The oracle only reaches a backend when every cheap test was inconclusive.
//! Backends are chosen once at configuration time and injected into the
//! oracle, either by value, by `&mut` or boxed as a trait object.

#[cfg(feature = "milp")]
pub mod milp;
pub mod search;

use crate::model::PackingModel;

/// The answer of an exact backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Feasible,
    Infeasible,
}

impl Verdict {
    #[inline]
    pub fn is_feasible(self) -> bool {
        matches!(self, Verdict::Feasible)
    }
}

impl From<bool> for Verdict {
    #[inline]
    fn from(feasible: bool) -> Self {
        if feasible {
            Verdict::Feasible
        } else {
            Verdict::Infeasible
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Feasible => write!(f, "Feasible"),
            Verdict::Infeasible => write!(f, "Infeasible"),
        }
    }
}

/// A backend failed to decide an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendError {
    backend: String,
    message: String,
}

impl BackendError {
    pub fn new(backend: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            message: message.into(),
        }
    }

    #[inline]
    pub fn backend(&self) -> &str {
        &self.backend
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for BackendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Backend '{}' failed: {}", self.backend, self.message)
    }
}

impl std::error::Error for BackendError {}

/// An exact decision procedure for `PackingModel`s.
pub trait FeasibilityBackend<T> {
    /// Returns the name of the backend.
    fn name(&self) -> &str;

    /// Decides whether the model admits an assignment. The fixings of the
    /// model must be honoured.
    fn solve(&mut self, model: &PackingModel<T>) -> Result<Verdict, BackendError>;
}

impl<T, B> FeasibilityBackend<T> for &mut B
where
    B: FeasibilityBackend<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn solve(&mut self, model: &PackingModel<T>) -> Result<Verdict, BackendError> {
        (**self).solve(model)
    }
}

impl<T, B> FeasibilityBackend<T> for Box<B>
where
    B: FeasibilityBackend<T> + ?Sized,
{
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn solve(&mut self, model: &PackingModel<T>) -> Result<Verdict, BackendError> {
        (**self).solve(model)
    }
}

impl<T> std::fmt::Debug for dyn FeasibilityBackend<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeasibilityBackend({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn FeasibilityBackend<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FeasibilityBackend({})", self.name())
    }
}

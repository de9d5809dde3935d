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

//! Backend selection.
//!
//! The oracle's exact tier is chosen once from `BackendKind` and injected as
//! a boxed trait object; the search itself never branches on the kind.

use crate::{config::BackendKind, error::SolverError};
use binstretch_oracle::backend::{FeasibilityBackend, search::SearchBackend};

/// A type-erased exact feasibility backend.
pub type DynBackend = Box<dyn FeasibilityBackend<i64>>;

/// Instantiates the backend of the given kind.
///
/// # Errors
///
/// Returns `SolverError::BackendUnavailable` if the backend was not
/// compiled in.
pub fn make_backend(kind: BackendKind) -> Result<DynBackend, SolverError> {
    match kind {
        BackendKind::Search => Ok(Box::new(SearchBackend::new())),
        BackendKind::Milp => milp_backend(),
    }
}

#[cfg(feature = "milp")]
#[inline]
fn milp_backend() -> Result<DynBackend, SolverError> {
    Ok(Box::new(binstretch_oracle::backend::milp::MilpBackend::new()))
}

#[cfg(not(feature = "milp"))]
#[inline]
fn milp_backend() -> Result<DynBackend, SolverError> {
    Err(SolverError::BackendUnavailable(BackendKind::Milp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_backend_is_always_available() {
        let backend = make_backend(BackendKind::Search).unwrap();
        assert_eq!(backend.name(), "search");
    }

    #[cfg(not(feature = "milp"))]
    #[test]
    fn test_milp_unavailable_without_feature() {
        assert!(matches!(
            make_backend(BackendKind::Milp),
            Err(SolverError::BackendUnavailable(BackendKind::Milp))
        ));
    }

    #[cfg(feature = "milp")]
    #[test]
    fn test_milp_available_with_feature() {
        let backend = make_backend(BackendKind::Milp).unwrap();
        assert_eq!(backend.name(), "milp");
    }
}

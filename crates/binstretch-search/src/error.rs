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

use binstretch_oracle::error::OracleError;

/// Errors returned by the adversary search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The instance cannot be searched, e.g. a non-positive capacity or a
    /// total capacity that overflows the size type.
    InvalidInstance(String),
    /// The feasibility oracle failed.
    Oracle(OracleError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInstance(msg) => write!(f, "Invalid instance: {msg}"),
            Self::Oracle(e) => write!(f, "Oracle error: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInstance(_) => None,
            Self::Oracle(e) => Some(e),
        }
    }
}

impl From<OracleError> for SearchError {
    fn from(e: OracleError) -> Self {
        Self::Oracle(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binstretch_oracle::backend::BackendError;

    #[test]
    fn test_display() {
        let e = SearchError::InvalidInstance("non-positive capacity 0".into());
        assert_eq!(e.to_string(), "Invalid instance: non-positive capacity 0");

        let e: SearchError = OracleError::from(BackendError::new("milp", "down")).into();
        assert!(e.to_string().starts_with("Oracle error: "));
    }
}

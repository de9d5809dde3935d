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

//! 0/1 ILP backend built on `good_lp`.
//!
//! The model is solved with whatever solver `good_lp::default_solver`
//! resolves to; this workspace enables the pure-Rust `microlp`. The
//! objective is constant, so any feasible point ends the solve.

use super::{BackendError, FeasibilityBackend, Verdict};
use crate::model::PackingModel;
use binstretch_core::num::numeric::StretchNumeric;
use good_lp::{
    Expression, ProblemVariables, ResolutionError, SolverModel, Variable, constraint,
    default_solver, variable,
};
use num_traits::ToPrimitive;

/// Exact backend delegating to a mixed integer programming solver.
#[derive(Debug, Clone, Default)]
pub struct MilpBackend {
    solves: u64,
}

impl MilpBackend {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of models handed to the solver.
    #[inline]
    pub fn solves(&self) -> u64 {
        self.solves
    }
}

impl<T> FeasibilityBackend<T> for MilpBackend
where
    T: StretchNumeric,
{
    fn name(&self) -> &str {
        "milp"
    }

    fn solve(&mut self, model: &PackingModel<T>) -> Result<Verdict, BackendError> {
        self.solves = self.solves.saturating_add(1);

        let sizes: Vec<f64> = model
            .sizes()
            .iter()
            .map(|s| {
                s.to_f64().ok_or_else(|| {
                    BackendError::new("milp", format!("size {} is not representable", s))
                })
            })
            .collect::<Result<_, _>>()?;
        let capacity = model.capacity().to_f64().ok_or_else(|| {
            BackendError::new("milp", format!("capacity {} is not representable", model.capacity()))
        })?;
        let num_bins = model.num_bins();

        let mut vars = ProblemVariables::new();
        let x: Vec<Vec<Variable>> = (0..sizes.len())
            .map(|i| {
                (0..num_bins)
                    .map(|j| vars.add(variable().binary().name(format!("x_{}_{}", i, j))))
                    .collect()
            })
            .collect();

        let mut problem = vars.minimise(Expression::from(0.0)).using(default_solver);

        for row in &x {
            let assigned: Expression = row.iter().map(|&v| Expression::from(v)).sum();
            problem = problem.with(constraint!(assigned == 1.0));
        }

        for j in 0..num_bins {
            let load: Expression = sizes
                .iter()
                .zip(&x)
                .map(|(&size, row)| size * row[j])
                .sum();
            problem = problem.with(constraint!(load <= capacity));
        }

        for fixing in model.fixings() {
            problem = problem.with(constraint!(x[fixing.item][fixing.bin] == 1.0));
        }

        match problem.solve() {
            Ok(_) => Ok(Verdict::Feasible),
            Err(ResolutionError::Infeasible) => Ok(Verdict::Infeasible),
            Err(e) => Err(BackendError::new("milp", e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::search::SearchBackend;

    fn model(sizes: &[i64], num_bins: usize, capacity: i64) -> PackingModel<i64> {
        let mut sorted = sizes.to_vec();
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        PackingModel::build(&sorted, num_bins, capacity).unwrap()
    }

    #[test]
    fn test_small_reference_instances() {
        let mut backend = MilpBackend::new();
        assert_eq!(backend.solve(&model(&[1, 2, 3, 4], 2, 5)), Ok(Verdict::Feasible));
        assert_eq!(backend.solve(&model(&[1, 2, 3, 4], 3, 4)), Ok(Verdict::Feasible));
        assert_eq!(backend.solve(&model(&[8, 4, 4, 4], 2, 10)), Ok(Verdict::Infeasible));
        assert_eq!(backend.solves(), 3);
    }

    #[test]
    fn test_agrees_with_search_backend() {
        let cases: [(&[i64], usize, i64); 4] = [
            (&[4, 4, 3, 3, 3, 3], 2, 10),
            (&[5, 4, 4, 3, 2, 2], 2, 10),
            (&[6, 5, 4, 3, 3, 2, 2], 3, 9),
            (&[7, 6, 5, 4, 3], 3, 9),
        ];
        for (sizes, num_bins, capacity) in cases {
            let m = model(sizes, num_bins, capacity);
            assert_eq!(
                MilpBackend::new().solve(&m),
                SearchBackend::new().solve(&m),
                "disagreement on {:?} in {} bins of {}",
                sizes,
                num_bins,
                capacity
            );
        }
    }
}

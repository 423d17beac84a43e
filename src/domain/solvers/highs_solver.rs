use crate::domain::error::SolverError;
use crate::domain::milp::{Direction, MilpModel, Sense, VariableKind};
use crate::domain::solver::{SolveOptions, SolveStatus, Solver, SolverOutcome};

use ::highs::{ColProblem, HighsModelStatus, Sense as HighsSense};

/// HiGHS solver implementation
pub struct HighsSolver;

impl HighsSolver {
    pub fn new() -> Self {
        HighsSolver
    }

    /// Convert HiGHS status to our status, `None` for statuses that carry no answer
    fn convert_status(model_status: HighsModelStatus) -> Option<SolveStatus> {
        match model_status {
            HighsModelStatus::Optimal => Some(SolveStatus::Optimal),
            HighsModelStatus::Infeasible => Some(SolveStatus::Infeasible),
            // Scheduling columns are all bounded, so this can only be infeasibility
            HighsModelStatus::UnboundedOrInfeasible => Some(SolveStatus::Infeasible),
            HighsModelStatus::Unbounded => Some(SolveStatus::Unbounded),
            HighsModelStatus::ReachedTimeLimit => Some(SolveStatus::TimeLimit),
            HighsModelStatus::ReachedIterationLimit => Some(SolveStatus::TimeLimit),
            _ => None,
        }
    }
}

impl Default for HighsSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for HighsSolver {
    fn solve(&self, model: &MilpModel, options: &SolveOptions) -> Result<SolverOutcome, SolverError> {
        let mut problem = ColProblem::new();

        // First, add all constraint rows
        let mut rows = Vec::with_capacity(model.num_constraints());
        for constraint in &model.constraints {
            let rhs = constraint.rhs;
            let row = match constraint.sense {
                Sense::LessEq => problem.add_row(..=rhs),
                Sense::GreaterEq => problem.add_row(rhs..),
                Sense::Equal => problem.add_row(rhs..=rhs),
            };
            rows.push(row);
        }

        // Build sparse matrix data: for each column, collect its row entries
        let mut col_data: Vec<Vec<(usize, f64)>> = vec![Vec::new(); model.num_variables()];
        for (row_idx, constraint) in model.constraints.iter().enumerate() {
            for &(var, coeff) in &constraint.terms {
                col_data[var.index()].push((row_idx, coeff));
            }
        }

        let costs = model.objective_coefficients();
        for (col_idx, var) in model.variables.iter().enumerate() {
            let row_factors: Vec<_> = col_data[col_idx]
                .iter()
                .map(|&(row_idx, val)| (rows[row_idx], val))
                .collect();

            match var.kind {
                VariableKind::Binary => {
                    problem.add_integer_column(costs[col_idx], 0.0..=1.0, &row_factors)
                }
                VariableKind::Continuous => {
                    problem.add_column(costs[col_idx], var.lower..=var.upper, &row_factors)
                }
            }
        }

        let sense = match model.direction {
            Direction::Maximize => HighsSense::Maximise,
            Direction::Minimize => HighsSense::Minimise,
        };

        let mut highs_model = problem.optimise(sense);
        highs_model.set_option("output_flag", false);
        highs_model.set_option("presolve", if options.presolve { "on" } else { "off" });
        if let Some(limit) = options.time_limit {
            highs_model.set_option("time_limit", limit.as_secs_f64());
        }

        let solved = highs_model.solve();
        let model_status = solved.status();
        let status = Self::convert_status(model_status).ok_or_else(|| SolverError::Backend {
            solver: self.name().to_string(),
            details: format!("solver stopped with status {:?}", model_status),
        })?;

        match status {
            SolveStatus::Optimal | SolveStatus::TimeLimit => {
                let values = solved.get_solution().columns().to_vec();
                Ok(SolverOutcome::with_values(status, model, values))
            }
            SolveStatus::Infeasible | SolveStatus::Unbounded => Ok(SolverOutcome::without_values(status)),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}

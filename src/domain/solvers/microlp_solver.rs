use crate::domain::error::SolverError;
use crate::domain::milp::{Direction, MilpModel, Sense, VarId, VariableDef, VariableKind};
use crate::domain::solver::{SolveOptions, SolveStatus, Solver, SolverOutcome};

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, ResolutionError,
    Solution as _, SolverModel, Variable, VariableDefinition,
};

/// Pure-Rust branch and bound through good_lp's microlp backend
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        MicroLpSolver
    }

    fn to_definition(def: &VariableDef) -> VariableDefinition {
        let var = variable().name(def.name.clone());
        match def.kind {
            VariableKind::Binary => var.binary(),
            VariableKind::Continuous => var.min(def.lower).max(def.upper),
        }
    }

    fn linear_expression(terms: &[(VarId, f64)], columns: &[Variable]) -> Expression {
        terms
            .iter()
            .map(|&(var, coeff)| coeff * columns[var.index()])
            .sum()
    }
}

impl Default for MicroLpSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Solver for MicroLpSolver {
    fn solve(&self, model: &MilpModel, options: &SolveOptions) -> Result<SolverOutcome, SolverError> {
        if options.time_limit.is_some() {
            log::warn!("{} has no time limit support, solving to optimality", self.name());
        }

        let mut vars = ProblemVariables::new();
        let columns: Vec<Variable> = model
            .variables
            .iter()
            .map(|def| vars.add(Self::to_definition(def)))
            .collect();

        let objective = Self::linear_expression(&model.objective, &columns);
        let unsolved = match model.direction {
            Direction::Minimize => vars.minimise(objective),
            Direction::Maximize => vars.maximise(objective),
        };
        let mut problem = unsolved.using(microlp);

        for row in &model.constraints {
            let built = match row.sense {
                Sense::LessEq => constraint::leq(Self::linear_expression(&row.terms, &columns), row.rhs),
                Sense::Equal => constraint::eq(Self::linear_expression(&row.terms, &columns), row.rhs),
                // a >= b  <=>  -a <= -b
                Sense::GreaterEq => {
                    let negated: Vec<(VarId, f64)> = row.terms.iter().map(|&(var, coeff)| (var, -coeff)).collect();
                    constraint::leq(Self::linear_expression(&negated, &columns), -row.rhs)
                }
            };
            problem.add_constraint(built);
        }

        match problem.solve() {
            Ok(solution) => {
                let values: Vec<f64> = columns.iter().map(|&c| solution.value(c)).collect();
                Ok(SolverOutcome::with_values(SolveStatus::Optimal, model, values))
            }
            Err(ResolutionError::Infeasible) => Ok(SolverOutcome::without_values(SolveStatus::Infeasible)),
            Err(ResolutionError::Unbounded) => Ok(SolverOutcome::without_values(SolveStatus::Unbounded)),
            Err(err) => Err(SolverError::Backend {
                solver: self.name().to_string(),
                details: err.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "MicroLP"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solves_small_mixed_model() {
        // min y  s.t.  y - x >= 0.5,  x = 1
        let mut model = MilpModel::new(Direction::Minimize);
        let x = model.add_binary("x");
        let y = model.add_continuous("y", 0.0, 10.0);
        model.add_constraint("lift", vec![(y, 1.0), (x, -1.0)], Sense::GreaterEq, 0.5);
        model.add_constraint("fix", vec![(x, 1.0)], Sense::Equal, 1.0);
        model.set_objective(vec![(y, 1.0)]);

        let outcome = MicroLpSolver::new().solve(&model, &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert!((outcome.values[x.index()] - 1.0).abs() < 1e-6);
        assert!((outcome.values[y.index()] - 1.5).abs() < 1e-6);
        assert!((outcome.objective.unwrap() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_maximize_respects_binary_domain() {
        // max 2a + 3b  s.t.  a + b <= 1
        let mut model = MilpModel::new(Direction::Maximize);
        let a = model.add_binary("a");
        let b = model.add_binary("b");
        model.add_constraint("pick_one", vec![(a, 1.0), (b, 1.0)], Sense::LessEq, 1.0);
        model.set_objective(vec![(a, 2.0), (b, 3.0)]);

        let outcome = MicroLpSolver::new().solve(&model, &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, SolveStatus::Optimal);
        assert!(outcome.values[a.index()].abs() < 1e-6);
        assert!((outcome.values[b.index()] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_infeasible_is_a_status_not_an_error() {
        let mut model = MilpModel::new(Direction::Minimize);
        let x = model.add_binary("x");
        model.add_constraint("impossible", vec![(x, 1.0)], Sense::GreaterEq, 2.0);
        model.set_objective(vec![(x, 1.0)]);

        let outcome = MicroLpSolver::new().solve(&model, &SolveOptions::default()).unwrap();
        assert_eq!(outcome.status, SolveStatus::Infeasible);
        assert!(outcome.values.is_empty());
    }

    #[test]
    fn test_name() {
        assert_eq!(MicroLpSolver::new().name(), "MicroLP");
    }
}

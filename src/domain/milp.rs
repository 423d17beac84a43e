//! Solver-agnostic mixed-integer linear program.
//!
//! Backends lower a `MilpModel` into their own representation. The model is
//! an owned value built per scheduling call; nothing here is shared between
//! sessions.

use std::fmt;

/// Dense column index of a variable within its model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariableKind {
    Binary,
    Continuous,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDef {
    pub name: String,
    pub kind: VariableKind,
    pub lower: f64,
    pub upper: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    LessEq,
    GreaterEq,
    Equal,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::LessEq => "<=",
            Sense::GreaterEq => ">=",
            Sense::Equal => "=",
        })
    }
}

/// `sum(coeff * var) <sense> rhs`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn lhs(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(var, coeff)| coeff * values[var.index()]).sum()
    }

    pub fn is_satisfied(&self, values: &[f64], tolerance: f64) -> bool {
        let lhs = self.lhs(values);
        match self.sense {
            Sense::LessEq => lhs <= self.rhs + tolerance,
            Sense::GreaterEq => lhs >= self.rhs - tolerance,
            Sense::Equal => (lhs - self.rhs).abs() <= tolerance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Minimize,
    Maximize,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MilpModel {
    pub variables: Vec<VariableDef>,
    pub constraints: Vec<LinearConstraint>,
    pub objective: Vec<(VarId, f64)>,
    pub direction: Direction,
}

impl MilpModel {
    pub fn new(direction: Direction) -> Self {
        MilpModel {
            direction,
            ..Default::default()
        }
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_variable(name.into(), VariableKind::Binary, 0.0, 1.0)
    }

    pub fn add_continuous(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        self.push_variable(name.into(), VariableKind::Continuous, lower, upper)
    }

    fn push_variable(&mut self, name: String, kind: VariableKind, lower: f64, upper: f64) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VariableDef {
            name,
            kind,
            lower,
            upper,
        });
        id
    }

    pub fn add_constraint(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            name: name.into(),
            terms,
            sense,
            rhs,
        });
    }

    pub fn set_objective(&mut self, terms: Vec<(VarId, f64)>) {
        self.objective = terms;
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_binaries(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.kind == VariableKind::Binary)
            .count()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective coefficient per column, zero where the objective is silent.
    pub fn objective_coefficients(&self) -> Vec<f64> {
        let mut coeffs = vec![0.0; self.variables.len()];
        for &(var, coeff) in &self.objective {
            coeffs[var.index()] += coeff;
        }
        coeffs
    }

    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|&(var, coeff)| coeff * values[var.index()])
            .sum()
    }
}

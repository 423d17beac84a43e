pub mod builder;
pub mod catalog;
pub mod eligibility;
pub mod error;
pub mod extract;
pub mod milp;
pub mod oracle;
pub mod schedule;
pub mod solve;
pub mod solver;
pub mod solver_factory;
pub mod solvers;
pub mod validate;

//! Encodes a set of jobs and printers as a makespan-minimizing MILP.
//!
//! Variables:
//! - `x[j,p]` binary, only for eligible (job, printer) pairs
//! - `s[j]` start time, `0 <= s[j] <= H - d[j]`
//! - `y[j,k]` binary, `1` when `j` precedes `k`; only for pairs sharing a printer
//! - `Cmax`, `0 <= Cmax <= H`
//!
//! `H`, the sum of all durations, doubles as the big-M constant. Running every
//! job back to back on any eligible printer finishes by `H`, so restricting
//! starts to the horizon never cuts off an optimal schedule, and with those
//! bounds `M = H` is large enough to switch off every disjunctive row that is
//! not active. Shrinking M below that would let the solver overlap jobs.
//!
//! Disjunctive rows grow with printers times job pairs. Only pairs that share
//! at least one eligible printer get an ordering variable, and only their
//! shared printers get rows, so disjoint printer fleets stay cheap.

use std::cmp::Ordering;
use std::fmt;

use crate::domain::catalog::{Job, Printer};
use crate::domain::eligibility::Eligibility;
use crate::domain::milp::{Direction, MilpModel, Sense, VarId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelStats {
    pub variables: usize,
    pub binaries: usize,
    pub constraints: usize,
    pub assignment_pairs: usize,
    pub disjunctive_pairs: usize,
    pub big_m: f64,
}

impl fmt::Display for ModelStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} variables ({} binary), {} constraints, {} eligible pairs, {} disjunctive pairs, M={:.3}",
            self.variables,
            self.binaries,
            self.constraints,
            self.assignment_pairs,
            self.disjunctive_pairs,
            self.big_m,
        )
    }
}

/// A built model together with the handles needed to read a solution back.
#[derive(Debug, Clone)]
pub struct SchedulingModel {
    pub milp: MilpModel,
    /// Per job: `(printer index, x var)` for each eligible printer.
    pub assign: Vec<Vec<(usize, VarId)>>,
    pub start: Vec<VarId>,
    pub makespan: VarId,
    pub big_m: f64,
    pub stats: ModelStats,
}

/// Sum of all durations: an upper bound on the optimal makespan.
pub fn horizon(jobs: &[Job]) -> f64 {
    jobs.iter().map(|job| job.duration).sum()
}

pub fn build_model(jobs: &[Job], printers: &[Printer], eligibility: &Eligibility) -> SchedulingModel {
    let big_m = horizon(jobs);
    let mut milp = MilpModel::new(Direction::Minimize);

    let assign: Vec<Vec<(usize, VarId)>> = jobs
        .iter()
        .enumerate()
        .map(|(j, _)| {
            eligibility
                .printers_for(j)
                .iter()
                .map(|&p| (p, milp.add_binary(format!("x_{}_{}", j, p))))
                .collect()
        })
        .collect();

    let start: Vec<VarId> = jobs
        .iter()
        .enumerate()
        .map(|(j, job)| milp.add_continuous(format!("s_{}", j), 0.0, (big_m - job.duration).max(0.0)))
        .collect();

    let makespan = milp.add_continuous("cmax", 0.0, big_m);

    for (j, vars) in assign.iter().enumerate() {
        let terms = vars.iter().map(|&(_, x)| (x, 1.0)).collect();
        milp.add_constraint(format!("assign_{}", j), terms, Sense::Equal, 1.0);
    }

    let mut disjunctive_pairs = 0;
    for a in 0..jobs.len() {
        for b in (a + 1)..jobs.len() {
            let shared = shared_printers(&assign[a], &assign[b]);
            if shared.is_empty() {
                continue;
            }
            disjunctive_pairs += 1;

            let before = milp.add_binary(format!("y_{}_{}", a, b));
            for (p, xa, xb) in shared {
                add_disjunction(&mut milp, (a, b, p), jobs, &start, (xa, xb), before, big_m);
            }
        }
    }

    for (j, job) in jobs.iter().enumerate() {
        milp.add_constraint(
            format!("makespan_{}", j),
            vec![(makespan, 1.0), (start[j], -1.0)],
            Sense::GreaterEq,
            job.duration,
        );
    }

    milp.set_objective(vec![(makespan, 1.0)]);

    let stats = ModelStats {
        variables: milp.num_variables(),
        binaries: milp.num_binaries(),
        constraints: milp.num_constraints(),
        assignment_pairs: eligibility.pair_count(),
        disjunctive_pairs,
        big_m,
    };
    log::debug!(
        "Built scheduling model for {} jobs on {} printers: {}",
        jobs.len(),
        printers.len(),
        stats
    );

    SchedulingModel {
        milp,
        assign,
        start,
        makespan,
        big_m,
        stats,
    }
}

/// Printers eligible for both jobs with their two `x` vars. Both lists are
/// sorted by printer index.
fn shared_printers(a: &[(usize, VarId)], b: &[(usize, VarId)]) -> Vec<(usize, VarId, VarId)> {
    let (mut i, mut k) = (0, 0);
    let mut shared = Vec::new();
    while i < a.len() && k < b.len() {
        match a[i].0.cmp(&b[k].0) {
            Ordering::Less => i += 1,
            Ordering::Greater => k += 1,
            Ordering::Equal => {
                shared.push((a[i].0, a[i].1, b[k].1));
                i += 1;
                k += 1;
            }
        }
    }
    shared
}

/// On printer `p`, with `y = 1` meaning `a` goes first:
///
/// ```text
/// s_a + d_a <= s_b + M(1 - y) + M(2 - x_a - x_b)
/// s_b + d_b <= s_a + M y      + M(2 - x_a - x_b)
/// ```
fn add_disjunction(
    milp: &mut MilpModel,
    (a, b, p): (usize, usize, usize),
    jobs: &[Job],
    start: &[VarId],
    (xa, xb): (VarId, VarId),
    before: VarId,
    m: f64,
) {
    let (sa, sb) = (start[a], start[b]);

    milp.add_constraint(
        format!("order_{}_{}_{}", a, b, p),
        vec![(sa, 1.0), (sb, -1.0), (before, m), (xa, m), (xb, m)],
        Sense::LessEq,
        3.0 * m - jobs[a].duration,
    );
    milp.add_constraint(
        format!("order_{}_{}_{}", b, a, p),
        vec![(sb, 1.0), (sa, -1.0), (before, -m), (xa, m), (xb, m)],
        Sense::LessEq,
        2.0 * m - jobs[b].duration,
    );
}

//! Which printers may take which job.
//!
//! A printer is eligible for a job when its declared model is on the job's
//! compatibility list and it loads at least one material the job accepts.
//! Ineligible pairs never become decision variables, so coverage has to be
//! checked here: a job without any eligible printer is reported before the
//! solver is ever called.

use crate::domain::catalog::{Job, MaterialRequirement, Printer};

pub fn is_eligible(job: &Job, printer: &Printer) -> bool {
    let spec = &job.spec;
    let compatible = match printer.model_name.as_deref() {
        Some(model) => spec.compatible_printers.iter().any(|c| c == model),
        None => false,
    };

    compatible && printer.materials.iter().any(|m| spec.material.accepts(m))
}

/// A job that no printer can take.
#[derive(Debug, Clone, PartialEq)]
pub struct UnschedulableJob {
    pub job_id: usize,
    pub model_id: String,
    pub material: MaterialRequirement,
    pub compatible_printers: Vec<String>,
}

impl UnschedulableJob {
    fn new(job: &Job) -> Self {
        UnschedulableJob {
            job_id: job.id,
            model_id: job.model_id.clone(),
            material: job.spec.material.clone(),
            compatible_printers: job.spec.compatible_printers.clone(),
        }
    }
}

/// Sparse eligibility relation, indexed by job position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Eligibility {
    by_job: Vec<Vec<usize>>,
}

impl Eligibility {
    pub fn compute(jobs: &[Job], printers: &[Printer]) -> Self {
        let by_job = jobs
            .iter()
            .map(|job| {
                printers
                    .iter()
                    .enumerate()
                    .filter(|(_, printer)| is_eligible(job, printer))
                    .map(|(p, _)| p)
                    .collect()
            })
            .collect();

        Eligibility { by_job }
    }

    /// Eligible printer indices for a job, ascending.
    pub fn printers_for(&self, job: usize) -> &[usize] {
        &self.by_job[job]
    }

    pub fn is_eligible(&self, job: usize, printer: usize) -> bool {
        self.by_job[job].binary_search(&printer).is_ok()
    }

    pub fn pair_count(&self) -> usize {
        self.by_job.iter().map(Vec::len).sum()
    }

    /// Pre-solve coverage check: every job needs at least one eligible printer.
    pub fn check_coverage(&self, jobs: &[Job]) -> Result<(), Vec<UnschedulableJob>> {
        let missing: Vec<UnschedulableJob> = jobs
            .iter()
            .zip(&self.by_job)
            .filter(|(_, printers)| printers.is_empty())
            .map(|(job, _)| {
                log::warn!(
                    "No compatible printer found for job {} (model_id={}) with compatible_printers={:?} and required_material={}",
                    job.id,
                    job.model_id,
                    job.spec.compatible_printers,
                    job.spec.material,
                );
                UnschedulableJob::new(job)
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ModelSpec;
    use std::sync::Arc;

    fn job(id: usize, material: MaterialRequirement, compatible: &[&str]) -> Job {
        Job {
            id,
            model_id: format!("m{}", id),
            spec: Arc::new(ModelSpec {
                file_id: format!("m{}", id),
                model_name: "part".to_string(),
                material,
                compatible_printers: compatible.iter().map(|c| c.to_string()).collect(),
                print_time: None,
            }),
            duration: 1.0,
        }
    }

    fn printer(name: &str, model: Option<&str>, materials: &[&str]) -> Printer {
        Printer {
            name: name.to_string(),
            model_name: model.map(str::to_string),
            materials: materials.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn pla() -> MaterialRequirement {
        MaterialRequirement::One("PLA".to_string())
    }

    #[test]
    fn test_eligible_needs_model_and_material() {
        let j = job(0, pla(), &["MK4"]);
        assert!(is_eligible(&j, &printer("a", Some("MK4"), &["PETG", "PLA"])));
        assert!(!is_eligible(&j, &printer("b", Some("MK4"), &["PETG"])));
        assert!(!is_eligible(&j, &printer("c", Some("X1C"), &["PLA"])));
        assert!(!is_eligible(&j, &printer("d", None, &["PLA"])));
    }

    #[test]
    fn test_eligible_with_material_list() {
        let j = job(
            0,
            MaterialRequirement::AnyOf(vec!["ABS".to_string(), "ASA".to_string()]),
            &["X1C"],
        );
        assert!(is_eligible(&j, &printer("a", Some("X1C"), &["ASA"])));
        assert!(!is_eligible(&j, &printer("b", Some("X1C"), &["PLA"])));
    }

    #[test]
    fn test_compute_is_sparse_and_sorted() {
        let jobs = vec![job(0, pla(), &["MK4"]), job(1, pla(), &["MK4", "X1C"])];
        let printers = vec![
            printer("p0", Some("X1C"), &["PLA"]),
            printer("p1", Some("MK4"), &["PLA"]),
            printer("p2", Some("MK4"), &["ABS"]),
        ];
        let elig = Eligibility::compute(&jobs, &printers);
        assert_eq!(elig.printers_for(0), &[1]);
        assert_eq!(elig.printers_for(1), &[0, 1]);
        assert_eq!(elig.pair_count(), 3);
        assert!(elig.is_eligible(1, 0));
        assert!(!elig.is_eligible(0, 0));
    }

    #[test]
    fn test_check_coverage_reports_every_stranded_job() {
        let jobs = vec![
            job(0, pla(), &["MK4"]),
            job(1, pla(), &["Ender3"]),
            job(2, MaterialRequirement::One("TPU".to_string()), &["MK4"]),
        ];
        let printers = vec![printer("p0", Some("MK4"), &["PLA"])];
        let elig = Eligibility::compute(&jobs, &printers);

        let missing = elig.check_coverage(&jobs).unwrap_err();
        let ids: Vec<usize> = missing.iter().map(|m| m.job_id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(missing[0].compatible_printers, vec!["Ender3"]);
    }

    #[test]
    fn test_check_coverage_without_printers() {
        let jobs = vec![job(0, pla(), &["MK4"])];
        let elig = Eligibility::compute(&jobs, &[]);
        assert!(elig.check_coverage(&jobs).is_err());
        assert!(Eligibility::compute(&[], &[]).check_coverage(&[]).is_ok());
    }
}

use chrono::Weekday;
use serde::Deserialize;

use crate::core::time::DateTime;
use crate::outlet::OutletEndpoint;

/// One lamp trio bound to one CI view. Edited by the operator, read once per
/// scheduler tick, never mutated here.
#[derive(Debug, Clone, Deserialize)]
pub struct LampGroup {
    pub view: String,
    #[serde(default)]
    pub outlet: Option<OutletEndpoint>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub restricted_hours: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum JobHealth {
    Ok,
    Warning,
    Failing,
}

/// Snapshot of one job as reported by the CI server. Building is an overlay
/// on the health value, a job can be failing and rebuilding at once.
#[derive(Debug, Clone)]
pub struct JobStatus {
    pub name: String,
    pub health: JobHealth,
    pub building: bool,
}

/// The three lamp commands computed for one group on one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateDecision {
    pub red_on: bool,
    pub yellow_on: bool,
    pub green_on: bool,
}

impl AggregateDecision {
    pub fn from_jobs(jobs: &[JobStatus]) -> Self {
        let is_building = jobs.iter().any(|job| job.building);
        let all_jobs_ok = !jobs
            .iter()
            .any(|job| matches!(job.health, JobHealth::Warning | JobHealth::Failing));

        Self {
            red_on: !all_jobs_ok,
            yellow_on: is_building,
            green_on: all_jobs_ok,
        }
    }
}

/// Lamps run Monday to Friday, 08:00-18:59 local time. Only the hour counts,
/// minutes and seconds never move the boundary.
pub fn is_in_restricted_hours(at: &DateTime) -> bool {
    matches!(at.weekday(), Weekday::Sat | Weekday::Sun) || at.hour() < 8 || at.hour() > 18
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn local(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime {
        chrono::Local
            .with_ymd_and_hms(y, m, d, h, min, s)
            .single()
            .unwrap()
            .into()
    }

    fn job(health: JobHealth, building: bool) -> JobStatus {
        JobStatus {
            name: "job".to_string(),
            health,
            building,
        }
    }

    #[test]
    fn test_restricted_hours_on_a_workday() {
        // 2011-04-01 was a Friday.
        assert!(is_in_restricted_hours(&local(2011, 4, 1, 6, 0, 0)));
        assert!(is_in_restricted_hours(&local(2011, 4, 1, 7, 59, 59)));
        assert!(!is_in_restricted_hours(&local(2011, 4, 1, 8, 0, 0)));
        assert!(!is_in_restricted_hours(&local(2011, 4, 1, 18, 0, 0)));
        assert!(!is_in_restricted_hours(&local(2011, 4, 1, 18, 59, 59)));
        assert!(is_in_restricted_hours(&local(2011, 4, 1, 19, 0, 0)));
    }

    #[test]
    fn test_weekends_are_restricted_regardless_of_hour() {
        // 2011-04-02 was a Saturday, 2011-04-03 a Sunday.
        assert!(is_in_restricted_hours(&local(2011, 4, 2, 15, 0, 0)));
        assert!(is_in_restricted_hours(&local(2011, 4, 3, 15, 0, 0)));
    }

    #[test]
    fn test_empty_group_is_all_ok() {
        let decision = AggregateDecision::from_jobs(&[]);

        assert_eq!(
            decision,
            AggregateDecision {
                red_on: false,
                yellow_on: false,
                green_on: true,
            }
        );
    }

    #[test]
    fn test_one_failing_job_turns_red() {
        let jobs = vec![job(JobHealth::Ok, false), job(JobHealth::Failing, false)];

        let decision = AggregateDecision::from_jobs(&jobs);

        assert_eq!(
            decision,
            AggregateDecision {
                red_on: true,
                yellow_on: false,
                green_on: false,
            }
        );
    }

    #[test]
    fn test_warning_counts_as_troubled() {
        let jobs = vec![job(JobHealth::Warning, false)];

        let decision = AggregateDecision::from_jobs(&jobs);

        assert!(decision.red_on);
        assert!(!decision.green_on);
    }

    #[test]
    fn test_building_while_ok_turns_yellow_and_green() {
        let jobs = vec![job(JobHealth::Ok, true), job(JobHealth::Ok, false)];

        let decision = AggregateDecision::from_jobs(&jobs);

        assert_eq!(
            decision,
            AggregateDecision {
                red_on: false,
                yellow_on: true,
                green_on: true,
            }
        );
    }

    #[test]
    fn test_failing_and_rebuilding_turns_red_and_yellow() {
        let jobs = vec![job(JobHealth::Failing, true)];

        let decision = AggregateDecision::from_jobs(&jobs);

        assert_eq!(
            decision,
            AggregateDecision {
                red_on: true,
                yellow_on: true,
                green_on: false,
            }
        );
    }
}

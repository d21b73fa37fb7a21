use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::world::agent::Agent;

/// Health counts of one simulated day. Every agent lands in exactly one of
/// healthy/infected/recovered; `dead` is parallel bookkeeping, not a fourth
/// bucket (a dead agent also counts as healthy because liveness gates the
/// infected and immune predicates).
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCount {
    pub healthy: u32,
    pub infected: u32,
    pub recovered: u32,
    pub dead: u32,
}

impl HealthCount {
    pub fn snapshot(agents: &[Agent], day: u32) -> Self {
        let mut cnt = HealthCount::default();
        for a in agents {
            if a.is_infected(day) {
                cnt.infected += 1;
            } else if a.is_immune(day) {
                cnt.recovered += 1;
            } else {
                cnt.healthy += 1;
            }
            if !a.is_alive() {
                cnt.dead += 1;
            }
        }
        cnt
    }

    #[inline]
    pub fn n_infected(&self) -> u32 {
        self.infected
    }
}

/// Per-day history of a run, day 1 first.
#[derive(Default, Debug)]
pub struct Stat {
    health_counts: Vec<HealthCount>,
}

impl Stat {
    pub fn reset(&mut self, initial: HealthCount) {
        self.health_counts.clear();
        self.health_counts.push(initial);
    }

    pub fn push(&mut self, cnt: HealthCount) {
        self.health_counts.push(cnt);
    }

    pub fn records(&self) -> &[HealthCount] {
        &self.health_counts
    }

    pub fn write_csv(&self, path: &Path) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(path)?;
        wtr.write_record(["day", "healthy", "infected", "recovered", "dead"])?;
        for (i, cnt) in self.health_counts.iter().enumerate() {
            wtr.write_record([
                (i as u32 + 1).to_string(),
                cnt.healthy.to_string(),
                cnt.infected.to_string(),
                cnt.recovered.to_string(),
                cnt.dead.to_string(),
            ])?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// End-of-run tallies for the final report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub infected: u32, // agents ever infected, recovered or not
    pub dead: u32,
}

impl Totals {
    pub fn tally(agents: &[Agent]) -> Self {
        let mut t = Totals::default();
        for a in agents {
            if a.ever_infected() {
                t.infected += 1;
            }
            if !a.is_alive() {
                t.dead += 1;
            }
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::Point;

    fn seated(x: i32, infected_at: u32) -> Agent {
        Agent::new(Point::new(x, 1), infected_at, false, 3)
    }

    #[test]
    fn snapshot_partitions_with_parallel_dead_count() {
        let mut dead = seated(4, 1);
        dead.kill();
        let agents = vec![
            seated(1, 4), // infected on day 5
            seated(2, 0), // never infected
            seated(3, 1), // past recovery on day 5
            dead,         // lands in healthy, counted dead in parallel
        ];
        let cnt = HealthCount::snapshot(&agents, 5);
        assert_eq!(
            cnt,
            HealthCount {
                healthy: 2,
                infected: 1,
                recovered: 1,
                dead: 1
            }
        );
        assert_eq!(cnt.infected + cnt.recovered + cnt.healthy, 4);
        assert_eq!(cnt.n_infected(), 1);
    }

    #[test]
    fn totals_count_ever_infected_and_dead() {
        let mut dead = seated(3, 2);
        dead.kill();
        let agents = vec![seated(1, 4), seated(2, 0), dead];
        assert_eq!(Totals::tally(&agents), Totals { infected: 2, dead: 1 });
    }

    #[test]
    fn csv_export_one_row_per_day() {
        let mut stat = Stat::default();
        stat.reset(HealthCount {
            healthy: 9,
            infected: 1,
            recovered: 0,
            dead: 0,
        });
        stat.push(HealthCount {
            healthy: 7,
            infected: 2,
            recovered: 1,
            dead: 1,
        });
        assert_eq!(stat.records().len(), 2);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.csv");
        stat.write_csv(&path).unwrap();
        let body = std::fs::read_to_string(&path).unwrap();
        let mut lines = body.lines();
        assert_eq!(lines.next(), Some("day,healthy,infected,recovered,dead"));
        assert_eq!(lines.next(), Some("1,9,1,0,0"));
        assert_eq!(lines.next(), Some("2,7,2,1,1"));
        assert_eq!(lines.next(), None);
    }
}

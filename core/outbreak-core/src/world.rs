pub mod agent;
pub mod commons;

use std::path::Path;

use rand::Rng;

use self::{
    agent::Agent,
    commons::{ParamsForStep, RuntimeParams, WorldParams},
};
use crate::{
    stat::{HealthCount, Stat, Totals},
    util::{math::Point, random},
};

pub struct World {
    pub runtime_params: RuntimeParams,
    pub world_params: WorldParams,
    agents: Vec<Agent>,
    pub health_count: HealthCount,
    stat: Stat,
}

impl World {
    pub fn new(runtime_params: RuntimeParams, world_params: WorldParams) -> Self {
        let mut w = Self {
            runtime_params,
            world_params,
            agents: Vec::with_capacity(world_params.init_n_pop),
            health_count: HealthCount::default(),
            stat: Stat::default(),
        };
        w.reset();
        w
    }

    /// Seats the population from scratch: every agent gets a uniformly random
    /// free cell (linear rejection scan over the agents placed so far), the
    /// first `init_n_infected` slots are infected as of day 1, and each agent
    /// draws its isolation flag independently. Does not terminate on a field
    /// with fewer cells than agents; see `WorldParams::validate`.
    pub fn reset(&mut self) {
        self.runtime_params.day = 1;
        let wp = self.world_params;
        let rp = self.runtime_params;
        let mut rng = rand::thread_rng();
        self.agents.clear();
        for i in 0..wp.init_n_pop {
            let pt = loop {
                let cand = Point::new(
                    rng.gen_range(1..=wp.field_width),
                    rng.gen_range(1..=wp.field_height),
                );
                if position_taken(&self.agents, cand).is_none() {
                    break cand;
                }
            };
            let infected_at = if i < wp.init_n_infected { 1 } else { 0 };
            let is_isolated = random::occurs(&mut rng, rp.isolation_level);
            self.agents
                .push(Agent::new(pt, infected_at, is_isolated, rp.days_to_recover));
        }
        self.health_count = HealthCount::snapshot(&self.agents, rp.day);
        self.stat.reset(self.health_count);
    }

    /// Advances one simulated day and appends its record to the history.
    pub fn step(&mut self) {
        self.runtime_params.day += 1;
        let pfs = ParamsForStep::new(&self.world_params, &self.runtime_params);
        let mut rng = rand::thread_rng();
        advance(&mut self.agents, &pfs, &mut rng);
        self.health_count = HealthCount::snapshot(&self.agents, pfs.rp.day);
        self.stat.push(self.health_count);
    }

    #[inline]
    pub fn is_ended(&self) -> bool {
        self.health_count.n_infected() == 0
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn stat(&self) -> &Stat {
        &self.stat
    }

    pub fn totals(&self) -> Totals {
        Totals::tally(&self.agents)
    }

    pub fn export(&self, path: &Path) -> anyhow::Result<()> {
        self.stat.write_csv(path)
    }
}

/// Index of the agent seated on `pt`, if any.
fn position_taken(agents: &[Agent], pt: Point) -> Option<usize> {
    agents.iter().position(|a| a.pt == pt)
}

/// One day of movement, transmission and mortality, in stable agent order.
/// Earlier agents' mutations are visible to later agents within the same day;
/// that asymmetry is part of the model and must not be parallelized away.
fn advance<R: Rng>(agents: &mut [Agent], pfs: &ParamsForStep, rng: &mut R) {
    let day = pfs.rp.day;
    for i in 0..agents.len() {
        if agents[i].is_isolated() || !agents[i].is_alive() {
            continue;
        }
        if agents[i].is_infected(day)
            && agents[i].days_infected(day) == pfs.rp.days_until_death
            && random::occurs(rng, pfs.rp.death_chance)
        {
            agents[i].kill();
            continue;
        }

        let cand = agents[i].candidate_pt(rng);
        if !pfs.wp.within_field(cand) {
            continue;
        }
        match position_taken(agents, cand) {
            Some(j) => {
                // dead agents keep blocking their cell
                if !agents[j].is_alive() {
                    continue;
                }
                if agents[i].is_infected(day)
                    && !agents[j].is_infected(day)
                    && !agents[j].is_immune(day)
                {
                    if random::occurs(rng, pfs.rp.transmission_chance) {
                        agents[j].infect(day);
                    }
                } else if agents[j].is_infected(day)
                    && !agents[i].is_infected(day)
                    && !agents[i].is_immune(day)
                {
                    if random::occurs(rng, pfs.rp.transmission_chance) {
                        agents[i].infect(day);
                    }
                }
                // contact never yields the cell
            }
            None => agents[i].pt = cand,
        }
    }
}

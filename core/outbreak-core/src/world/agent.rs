use rand::Rng;

use super::commons::HealthType;
use crate::util::{math::Point, random};

/// One individual on the field. Everything but the position is fixed at
/// creation or changes monotonically (`kill` is permanent, `infect` restamps
/// the onset day only outside the infected/immune window).
#[derive(Clone, Debug)]
pub struct Agent {
    pub pt: Point,
    infected_at: u32, // day of infection onset, 0 means never infected
    is_isolated: bool,
    is_alive: bool,
    days_to_recover: u32,
}

impl Agent {
    pub fn new(pt: Point, infected_at: u32, is_isolated: bool, days_to_recover: u32) -> Self {
        Self {
            pt,
            infected_at,
            is_isolated,
            is_alive: true,
            days_to_recover,
        }
    }

    /// Infected strictly less than `days_to_recover` days after onset; the
    /// onset day itself counts as day zero. Liveness gates this predicate.
    pub fn is_infected(&self, day: u32) -> bool {
        self.is_alive && self.infected_at != 0 && day - self.infected_at < self.days_to_recover
    }

    /// Immune strictly more than `days_to_recover` days after onset. The day
    /// exactly `days_to_recover` days after onset is neither infected nor
    /// immune; that one-day gap is part of the model.
    pub fn is_immune(&self, day: u32) -> bool {
        self.is_alive && self.infected_at != 0 && day - self.infected_at > self.days_to_recover
    }

    pub fn days_infected(&self, day: u32) -> u32 {
        day - self.infected_at
    }

    pub fn health(&self, day: u32) -> HealthType {
        if self.is_infected(day) {
            HealthType::Infected
        } else if self.is_immune(day) {
            HealthType::Recovered
        } else if !self.is_alive {
            HealthType::Dead
        } else {
            HealthType::Healthy
        }
    }

    pub fn infect(&mut self, day: u32) {
        self.infected_at = day;
    }

    pub fn kill(&mut self) {
        self.is_alive = false;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.is_alive
    }

    #[inline]
    pub fn is_isolated(&self) -> bool {
        self.is_isolated
    }

    #[inline]
    pub fn ever_infected(&self) -> bool {
        self.infected_at != 0
    }

    /// One-cell move candidate: a fair coin picks the axis, another the
    /// direction. Bounds and collisions are the caller's concern.
    pub fn candidate_pt<R: Rng>(&self, rng: &mut R) -> Point {
        let move_x = random::coin(rng);
        let delta = if random::coin(rng) { -1 } else { 1 };
        let mut pt = self.pt;
        if move_x {
            pt.x += delta;
        } else {
            pt.y += delta;
        }
        pt
    }
}

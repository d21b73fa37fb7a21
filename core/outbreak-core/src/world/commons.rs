use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::math::Point;

/// Exclusive display category of an agent on a given day.
/// Priority when several predicates could apply: infected, immune, dead, healthy.
#[derive(Eq, Hash, Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum HealthType {
    Healthy,
    Infected,
    Recovered,
    Dead,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RuntimeParams {
    pub transmission_chance: f64, // chance of transmission on contact. 0 to 1.
    pub death_chance: f64, // chance an infected agent dies on the threshold day. 0 to 1.
    pub days_until_death: u32,
    pub isolation_level: f64, // portion of agents who never move. 0 to 1.
    pub days_to_recover: u32,
    pub day: u32, // current simulated day, starts at 1
}

impl RuntimeParams {
    pub fn validate(&self) -> Result<(), ParamError> {
        for (name, value) in [
            ("transmission chance", self.transmission_chance),
            ("death chance", self.death_chance),
            ("isolation level", self.isolation_level),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamError::ProbabilityOutOfRange { name, value });
            }
        }
        if self.days_to_recover == 0 {
            return Err(ParamError::NoRecoveryPeriod);
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct WorldParams {
    pub init_n_pop: usize,
    pub init_n_infected: usize, // marked infected as of day 1
    pub field_width: i32,
    pub field_height: i32,
}

impl WorldParams {
    #[inline]
    pub fn within_field(&self, pt: Point) -> bool {
        (1..=self.field_width).contains(&pt.x) && (1..=self.field_height).contains(&pt.y)
    }

    pub fn n_cells(&self) -> usize {
        self.field_width as usize * self.field_height as usize
    }

    /// Placement loops forever on a field smaller than the population, so
    /// callers are expected to validate before constructing a world.
    pub fn validate(&self) -> Result<(), ParamError> {
        if self.init_n_pop == 0 {
            return Err(ParamError::EmptyPopulation);
        }
        if self.init_n_infected > self.init_n_pop {
            return Err(ParamError::TooManyInfected {
                infected: self.init_n_infected,
                pop: self.init_n_pop,
            });
        }
        if self.field_width < 1 || self.field_height < 1 || self.n_cells() < self.init_n_pop {
            return Err(ParamError::FieldTooSmall {
                width: self.field_width,
                height: self.field_height,
                pop: self.init_n_pop,
            });
        }
        Ok(())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ParamError {
    #[error("population must be positive")]
    EmptyPopulation,
    #[error("initial infected count ({infected}) exceeds the population ({pop})")]
    TooManyInfected { infected: usize, pop: usize },
    #[error("a {width}x{height} field cannot seat {pop} agents")]
    FieldTooSmall { width: i32, height: i32, pop: usize },
    #[error("{name} must be within [0, 1], got {value}")]
    ProbabilityOutOfRange { name: &'static str, value: f64 },
    #[error("days to recover must be positive")]
    NoRecoveryPeriod,
}

pub struct ParamsForStep<'a> {
    pub wp: &'a WorldParams,
    pub rp: &'a RuntimeParams,
}

impl<'a> ParamsForStep<'a> {
    pub fn new(wp: &'a WorldParams, rp: &'a RuntimeParams) -> Self {
        ParamsForStep { wp, rp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world_params() -> WorldParams {
        WorldParams {
            init_n_pop: 4,
            init_n_infected: 1,
            field_width: 3,
            field_height: 2,
        }
    }

    #[test]
    fn field_bounds_are_one_indexed_inclusive() {
        let wp = world_params();
        assert!(wp.within_field(Point::new(1, 1)));
        assert!(wp.within_field(Point::new(3, 2)));
        assert!(!wp.within_field(Point::new(0, 1)));
        assert!(!wp.within_field(Point::new(4, 1)));
        assert!(!wp.within_field(Point::new(1, 0)));
        assert!(!wp.within_field(Point::new(1, 3)));
    }

    #[test]
    fn world_params_validation() {
        assert!(world_params().validate().is_ok());

        let mut wp = world_params();
        wp.init_n_pop = 0;
        assert_eq!(wp.validate(), Err(ParamError::EmptyPopulation));

        let mut wp = world_params();
        wp.init_n_infected = 5;
        assert_eq!(
            wp.validate(),
            Err(ParamError::TooManyInfected { infected: 5, pop: 4 })
        );

        let mut wp = world_params();
        wp.init_n_pop = 7;
        wp.init_n_infected = 0;
        assert_eq!(
            wp.validate(),
            Err(ParamError::FieldTooSmall {
                width: 3,
                height: 2,
                pop: 7
            })
        );

        let mut wp = world_params();
        wp.field_width = -1;
        assert!(matches!(wp.validate(), Err(ParamError::FieldTooSmall { .. })));
    }

    #[test]
    fn runtime_params_validation() {
        let mut rp = RuntimeParams {
            transmission_chance: 0.8,
            death_chance: 0.0,
            days_until_death: 14,
            isolation_level: 0.1,
            days_to_recover: 100,
            day: 1,
        };
        assert!(rp.validate().is_ok());

        rp.transmission_chance = 1.5;
        assert_eq!(
            rp.validate(),
            Err(ParamError::ProbabilityOutOfRange {
                name: "transmission chance",
                value: 1.5
            })
        );

        rp.transmission_chance = 0.8;
        rp.days_to_recover = 0;
        assert_eq!(rp.validate(), Err(ParamError::NoRecoveryPeriod));
    }
}

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::SimulationConfig;
use crate::rng::SimRng;
use crate::shared::{Call, CallDirection};

/**
 * Produces random hall calls.
 *
 * Each invocation rolls once against `call_probability`. On success a floor is
 * picked uniformly over the building. The bottom floor can only call up and
 * the top floor can only call down; any other floor flips a coin.
 */
pub struct CallGenerator {
    n_floors: u8,
    call_probability: f64,
    next_id: u64,
}

impl CallGenerator {
    pub fn new(config: &SimulationConfig) -> CallGenerator {
        CallGenerator {
            n_floors: config.n_floors,
            call_probability: config.call_probability,
            next_id: 0,
        }
    }

    pub fn maybe_generate(&mut self, rng: &mut SimRng, now: u64) -> Option<Call> {
        if !rng.gen_bool(self.call_probability) {
            return None;
        }

        let floor = rng.gen_range(1..=self.n_floors);
        let direction = if floor == self.n_floors {
            CallDirection::Down
        } else if floor == 1 {
            CallDirection::Up
        } else if rng.gen_bool(0.5) {
            CallDirection::Up
        } else {
            CallDirection::Down
        };

        self.next_id += 1;
        Some(Call {
            id: self.next_id,
            floor,
            direction,
            created_at: now,
        })
    }

    pub fn reset(&mut self) {
        self.next_id = 0;
    }
}

//! Inputs the engine reads but never owns.
//!
//! [`CombatEnv`] bundles the random source, the balance tables and the
//! caller's notion of "now". The engine carries no timers and no global
//! generator; everything non-deterministic enters through this struct.

mod rng;

pub use rng::{FixedRng, PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::CombatTables;
use crate::state::Timestamp;

/// Read-only environment for one engine call.
#[derive(Clone, Copy)]
pub struct CombatEnv<'a> {
    pub rng: &'a dyn RngOracle,
    pub tables: &'a CombatTables,
    pub now: Timestamp,
}

impl<'a> CombatEnv<'a> {
    pub fn new(rng: &'a dyn RngOracle, tables: &'a CombatTables, now: Timestamp) -> Self {
        Self { rng, tables, now }
    }
}

impl core::fmt::Debug for CombatEnv<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatEnv")
            .field("tables", self.tables)
            .field("now", &self.now)
            .finish_non_exhaustive()
    }
}

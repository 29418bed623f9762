//! Fight state: the anger meter, the fight controller and their host seam.

pub mod anger;
pub mod fight;
pub mod traits;

pub use anger::{AngerHit, AngerMeter, AngerTuning};
pub use fight::{FightEngine, FightPhase, FightSession};
pub use traits::{FightContext, FightHost, Snapshot};

pub mod events;
pub mod snapshot;

pub use events::{EventSink, FightEvent, FightOutcome, FightResult, OpponentRef, ResolveReason};
pub use snapshot::{FightSnapshot, NoteView, PhaseKind};

// Purpose: melodic voice management and polyphony.
// The pool owns every voice; the steal policy is pluggable.

pub mod allocator;
pub mod pool;
pub mod voice;

pub use allocator::{RoundRobin, StealPolicy};
pub use pool::{PitchMod, VoicePool};
pub use voice::Voice;

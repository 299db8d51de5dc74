//! Element lifecycle observation.
//!
//! [`ElementObserver`] turns raw DOM mutations into a small set of phase
//! callbacks: `created` (synchronous, on observe), `rendered` (first
//! attachment, and every return from hidden), `hidden`, and `removed`
//! (terminal). On top of the phase machine it runs throttled position and
//! size watchers that report `dragged` and `resized` movements.
//!
//! The observer is tick-driven: call [`ElementObserver::tick`] with the
//! current instant and it polls for attachment, replays the mutation journal
//! batch since its cursor, and fires whatever callbacks the batch warrants.

mod lifecycle;
mod watcher;

pub use lifecycle::{ElementObserver, LifecycleCallbacks, ObserveConfig, Phase};
pub use watcher::{PositionWatcher, SizeWatcher};

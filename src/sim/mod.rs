//! Simulation module
//!
//! All rules live here. Nothing in this module touches the DOM:
//! - One tick = motion, collisions, aggregation
//! - Stable iteration order (by player index)
//! - Rendering and frame timing come in through traits

pub mod collision;
pub mod driver;
pub mod engine;
pub mod motion;
pub mod publish;
pub mod spawn;
pub mod state;
pub mod tally;
pub mod tick;

pub use collision::{CollisionPolicy, CollisionReport, overlaps, resolve_collisions};
pub use driver::{Driver, FrameScheduler, ManualScheduler, run_headless};
pub use engine::{Engine, StateSnapshot};
pub use motion::{BoundaryPolicy, step_motion, within_bounds};
pub use publish::{StatePublisher, SubscriptionId};
pub use spawn::create_population;
pub use state::{GamePhase, Player, PlayerKind, PopulationCounts, World};
pub use tally::{Verdict, evaluate};
pub use tick::{Rules, TickReport, step_world};

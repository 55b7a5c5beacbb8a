// Background recompute jobs and their scheduler. The per-cadence entry
// points live on `HotnessRecomputeJob` so they can be invoked directly
// (tests, operational tooling) without a live timer.

pub mod recompute;
pub mod scheduler;

pub use recompute::HotnessRecomputeJob;
pub use scheduler::RecomputeScheduler;

//! Sequential manual-control sessions, one fresh environment per slot.

use gridworld::{Env, EnvError};
use tracing::info;

use crate::events::EventSource;
use crate::manual::{ManualControl, SessionReport};
use crate::ControlError;

pub const DEFAULT_SLOTS: [u32; 5] = [1, 2, 3, 4, 5];

/// Runs a [`ManualControl`] session for every slot in order.
///
/// `factory` builds the environment for each slot. All sessions share the one
/// event source; once it is exhausted the remaining slots are skipped.
///
/// # Errors
///
/// Stops at the first environment construction, environment or input failure.
pub fn run_slots<E, F, S>(
    slots: &[u32],
    seed: Option<u64>,
    mut factory: F,
    events: &mut S,
) -> Result<Vec<SessionReport>, ControlError>
where
    E: Env,
    F: FnMut(u32) -> Result<E, EnvError>,
    S: EventSource + ?Sized,
{
    let mut reports = Vec::with_capacity(slots.len());
    for &slot in slots {
        info!(slot, "starting slot");
        let env = factory(slot)?;
        let mut session = ManualControl::new(env, seed);
        let report = session.start(slot, events)?;
        info!(
            slot,
            runs = report.run_count,
            steps = report.steps,
            reward = report.total_reward,
            "slot finished"
        );
        let exhausted = report.input_exhausted();
        reports.push(report);
        if exhausted {
            break;
        }
    }
    Ok(reports)
}

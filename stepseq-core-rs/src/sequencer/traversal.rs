//! Traversal engine.

use tinyrand::{Rand, RandRange};

use super::mode::TraversalMode;
use super::state::SequencerState;
use super::MAX_STEPS;

/// Move `state.current_step` one gated tick forward under the active
/// traversal mode and return the new step.
///
/// `step_count` is the live reading from the step-count input. It is clamped
/// to `1..=MAX_STEPS`, stored as `active_step_count`, and `current_step` is
/// clamped into the new range before the next index is computed, so the
/// result always satisfies `new_step < step_count`.
///
/// # Examples
///
/// ```
/// use stepseq::sequencer::{advance, SequencerState, TraversalMode};
/// use tinyrand::{Seeded, Wyrand};
///
/// let mut state = SequencerState::new(TraversalMode::Reverse);
/// let mut rng = Wyrand::seed(1);
/// assert_eq!(advance(&mut state, 4, &mut rng), 3);
/// assert_eq!(advance(&mut state, 4, &mut rng), 2);
/// ```
pub fn advance<R: Rand>(state: &mut SequencerState, step_count: usize, rng: &mut R) -> usize {
    let step_count = step_count.clamp(1, MAX_STEPS);
    state.active_step_count = step_count;
    state.clamp_step();

    let current = state.current_step;
    let next = match state.traversal_mode {
        TraversalMode::Forward => (current + 1) % step_count,
        TraversalMode::Reverse => (current + step_count - 1) % step_count,
        TraversalMode::PingPong => ping_pong(current, step_count, &mut state.pingpong_direction),
        TraversalMode::Random => rng.next_range(0..step_count),
    };

    state.current_step = next;
    next
}

/// One PingPong move. The direction flips when the move lands on (or past)
/// either end, and the result is clamped to `0..step_count`.
fn ping_pong(current: usize, step_count: usize, ascending: &mut bool) -> usize {
    let last = step_count as isize - 1;
    let next = if *ascending {
        current as isize + 1
    } else {
        current as isize - 1
    };

    if next >= last || next <= 0 {
        *ascending = !*ascending;
    }

    next.clamp(0, last) as usize
}

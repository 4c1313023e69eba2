//! The sequence executor
//!
//! Replays a recognized sequence of actions a given number of times, then
//! releases any held modifier keys. This is the callback that fires once
//! per recognition event.

use log::debug;

use crate::action::{Action, InputError, Keyboard};

/// Upper bound on the spoken repeat count.
pub const MAX_REPEAT: u32 = 100;

/// Upper bound on the number of actions in one utterance.
pub const MAX_SEQUENCE: usize = 16;

/// Execute `sequence` in order, `count` times, then release modifiers.
///
/// Bounds on `count` (1..=[`MAX_REPEAT`]) and sequence length
/// (1..=[`MAX_SEQUENCE`]) are enforced by the grammar parser, not here.
///
/// Ordering guarantee: actions within one repetition run strictly in the
/// given order, repetitions run strictly in order, nothing interleaves.
/// The release step runs exactly once per call and runs even when an
/// action fails partway through; the first error is returned.
pub fn execute_sequence(
    kb: &mut dyn Keyboard,
    sequence: &[Action],
    count: u32,
) -> Result<(), InputError> {
    debug!("executing {} action(s), {} time(s)", sequence.len(), count);

    let mut outcome = Ok(());
    'repeat: for _ in 0..count {
        for action in sequence {
            if let Err(e) = action.execute(kb) {
                outcome = Err(e);
                break 'repeat;
            }
        }
    }

    let released = kb.release_modifiers();
    outcome.and(released)
}

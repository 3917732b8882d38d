//! Multiple-choice distractor generation shared by the math and pattern
//! generators.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::EngineError;

/// Number of choices offered for every multiple-choice question.
pub const OPTION_COUNT: usize = 4;

/// Largest distance between a distractor and the correct answer.
pub const MAX_OFFSET: i64 = 5;

/// Build `OPTION_COUNT` distinct options around `answer`, shuffled.
///
/// Offsets are drawn uniformly from `-MAX_OFFSET..=MAX_OFFSET`. A zero offset
/// or a value already in the set is a rejected draw; more than `max_retries`
/// rejections fails the call.
pub fn distractor_options<R: Rng + ?Sized>(
    answer: i64,
    rng: &mut R,
    max_retries: u32,
) -> Result<Vec<i64>, EngineError> {
    // Insertion-ordered so a seeded rng reproduces the same option order.
    let mut options = Vec::with_capacity(OPTION_COUNT);
    options.push(answer);

    let mut rejected = 0u32;
    while options.len() < OPTION_COUNT {
        let offset = rng.gen_range(-MAX_OFFSET..=MAX_OFFSET);
        let candidate = answer.checked_add(offset);
        match candidate {
            Some(value) if offset != 0 && !options.contains(&value) => options.push(value),
            _ => {
                rejected += 1;
                if rejected > max_retries {
                    return Err(EngineError::RetryLimitExceeded {
                        what: "distractor options",
                        attempts: rejected,
                    });
                }
            }
        }
    }

    options.shuffle(rng);
    Ok(options)
}

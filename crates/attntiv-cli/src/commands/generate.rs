//! The `attntiv generate` command.

use anyhow::Result;

use attntiv_core::feed::generate_feed_item;
use attntiv_core::{DifficultyTier, ExerciseEngine};
use attntiv_session::session_rng;

pub fn execute(
    content: String,
    tier: DifficultyTier,
    seed: Option<u64>,
    size: usize,
    n: usize,
    length: usize,
) -> Result<()> {
    let engine = ExerciseEngine::default();
    let mut rng = session_rng(seed);

    let json = match content.to_lowercase().as_str() {
        "memory" => serde_json::to_string_pretty(&engine.generate_memory_sequence(tier, &mut rng))?,
        "matrix" => {
            serde_json::to_string_pretty(&engine.generate_pattern_matrix(size, &mut rng)?)?
        }
        "n-back" | "nback" => {
            serde_json::to_string_pretty(&engine.generate_n_back_sequence(n, length, &mut rng)?)?
        }
        "math" => serde_json::to_string_pretty(&engine.generate_math_problem(tier, &mut rng)?)?,
        "pattern" => serde_json::to_string_pretty(&engine.generate_pattern(tier, &mut rng)?)?,
        "speed" => {
            serde_json::to_string_pretty(&engine.generate_speed_challenge(tier, &mut rng)?)?
        }
        "feed" => serde_json::to_string_pretty(&generate_feed_item(&mut rng))?,
        other => anyhow::bail!(
            "unknown content type '{other}' (expected memory, matrix, n-back, math, pattern, speed, feed)"
        ),
    };

    println!("{json}");
    Ok(())
}

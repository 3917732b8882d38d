//! The `attntiv score` command.

use anyhow::Result;

use attntiv_core::{score_breakdown, DifficultyTier, ExerciseKind};

pub fn execute(
    kind: ExerciseKind,
    tier: DifficultyTier,
    accuracy: f64,
    time_bonus: f64,
    breakdown: bool,
) -> Result<()> {
    anyhow::ensure!(
        (0.0..=1.0).contains(&accuracy),
        "accuracy must be between 0.0 and 1.0"
    );
    anyhow::ensure!(time_bonus >= 0.0, "time bonus must not be negative");

    let score = score_breakdown(kind, tier, accuracy, time_bonus);
    if breakdown {
        println!("base:       {}", score.base);
        println!("time bonus: {}", score.time_bonus);
        println!("total:      {}", score.total);
    } else {
        println!("{}", score.total);
    }
    Ok(())
}

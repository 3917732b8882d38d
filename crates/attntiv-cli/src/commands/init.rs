//! The `attntiv init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("attntiv.toml").exists() {
        println!("attntiv.toml already exists, skipping.");
    } else {
        std::fs::write("attntiv.toml", SAMPLE_CONFIG)?;
        println!("Created attntiv.toml");
    }

    println!("\nNext steps:");
    println!("  1. Adjust attntiv.toml (thresholds, round sizes, seed)");
    println!("  2. Run: attntiv generate --content math --tier intermediate");
    println!("  3. Run: attntiv simulate --mode focus --rounds 5");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# attntiv configuration

# Fixed rng seed for reproducible sessions. ATTNTIV_SEED overrides it.
# seed = 42

# Rejected draws a generator may make before giving up.
max_retries = 10000

# Tier every session starts at: beginner, intermediate, advanced.
initial_tier = "beginner"

[policy]
# Move up after this accuracy with at least this many correct answers in a row.
escalate_accuracy = 0.8
escalate_streak = 3
# Move down at or below this accuracy.
deescalate_accuracy = 0.4

[focus]
initial_n = 2
min_n = 1
max_n = 4
sequence_length = 20

[problem_solving]
problems_per_round = 5
seconds_per_problem = 30.0

[speed]
challenges_per_round = 5
"#;

//! The `attntiv simulate` command.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use attntiv_core::report::SessionReport;
use attntiv_core::{DifficultyTier, ExerciseEngine, ExerciseKind};
use attntiv_session::config::{load_config_from, AttntivConfig};
use attntiv_session::{
    session_rng, AnswerFeedback, FocusSession, MemorySession, MemorySink, PatternSession,
    ProblemSolvingSession, RoundSummary, SessionDeps, SessionObserver, SessionState,
    SpeedSession,
};

/// Console progress observer.
struct ConsoleObserver;

impl SessionObserver for ConsoleObserver {
    fn on_answer(&self, _kind: ExerciseKind, feedback: &AnswerFeedback) {
        let verdict = if feedback.correct { "correct" } else { "wrong" };
        eprintln!(
            "  {verdict} (+{}) streak {}",
            feedback.points, feedback.streak
        );
    }

    fn on_round_complete(&self, summary: &RoundSummary) {
        eprintln!(
            "  Round done: {} at {} :: {}/{} correct, {} points",
            summary.kind, summary.tier, summary.correct, summary.total, summary.score
        );
    }

    fn on_tier_change(&self, _kind: ExerciseKind, from: DifficultyTier, to: DifficultyTier) {
        eprintln!("  Difficulty {from} -> {to}");
    }
}

/// Scripted player that answers correctly with probability `skill`.
struct Player {
    rng: ChaCha8Rng,
    skill: f64,
}

impl Player {
    fn gets_it(&mut self) -> bool {
        self.rng.gen_bool(self.skill)
    }

    fn think_time(&mut self, limit_secs: f64) -> Duration {
        Duration::from_secs_f64(self.rng.gen_range(0.0..limit_secs))
    }
}

pub fn execute(
    mode: ExerciseKind,
    rounds: u32,
    skill: f64,
    seed: Option<u64>,
    output: PathBuf,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(rounds >= 1, "rounds must be at least 1");
    anyhow::ensure!(
        (0.0..=1.0).contains(&skill),
        "skill must be between 0.0 and 1.0"
    );

    let config = load_config_from(config_path.as_deref())?;
    let seed = seed.or(config.seed);

    let sink = Arc::new(MemorySink::new());
    let deps = SessionDeps::new(Arc::new(ExerciseEngine::new(config.engine_config())))
        .with_policy(config.policy)
        .with_initial_tier(config.initial_tier)
        .with_sink(sink.clone())
        .with_observer(Arc::new(ConsoleObserver));
    let mut player = Player {
        rng: session_rng(seed.map(|s| s.wrapping_add(1))),
        skill,
    };

    eprintln!(
        "attntiv v{} :: {} x {rounds} rounds, skill {skill:.2}",
        env!("CARGO_PKG_VERSION"),
        mode.title()
    );

    let started = Instant::now();
    let rng = session_rng(seed);
    let final_state = match mode {
        ExerciseKind::Memory => play_memory(deps, rng, &mut player, rounds)?,
        ExerciseKind::Focus => play_focus(deps, &config, rng, &mut player, rounds)?,
        ExerciseKind::ProblemSolving => {
            play_problem_solving(deps, &config, rng, &mut player, rounds)?
        }
        ExerciseKind::PatternRecognition => play_pattern(deps, rng, &mut player, rounds)?,
        ExerciseKind::SpeedProcessing => play_speed(deps, &config, rng, &mut player, rounds)?,
    };
    let duration_ms = started.elapsed().as_millis() as u64;

    let report = SessionReport::new(mode, seed, sink.records(), duration_ms);
    print_summary(&report, &final_state);

    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create {}", output.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");
    let path = output.join(format!("report-{timestamp}.json"));
    report.save_json(&path)?;
    eprintln!("Report saved to: {}", path.display());

    Ok(())
}

fn play_memory(
    deps: SessionDeps,
    rng: ChaCha8Rng,
    player: &mut Player,
    rounds: u32,
) -> Result<SessionState> {
    let mut session = MemorySession::new(deps, rng);
    for _ in 0..rounds {
        let mut recalled = session.start_round().to_vec();
        if !player.gets_it() {
            recalled[0] = recalled[0] % 9 + 1;
        }
        session.submit(&recalled)?;
    }
    Ok(*session.state())
}

fn play_pattern(
    deps: SessionDeps,
    rng: ChaCha8Rng,
    player: &mut Player,
    rounds: u32,
) -> Result<SessionState> {
    let mut session = PatternSession::new(deps, rng);
    for _ in 0..rounds {
        let pattern = session.start_round()?;
        let next = pattern.next_number;
        let choice = if player.gets_it() {
            next
        } else {
            pattern
                .options
                .iter()
                .copied()
                .find(|&o| o != next)
                .unwrap_or(next.wrapping_add(1))
        };
        session.submit(choice)?;
    }
    Ok(*session.state())
}

fn play_focus(
    deps: SessionDeps,
    config: &AttntivConfig,
    rng: ChaCha8Rng,
    player: &mut Player,
    rounds: u32,
) -> Result<SessionState> {
    let mut session = FocusSession::new(deps, config.focus, rng)?;
    for _ in 0..rounds {
        let n = session.n_level();
        let sequence = session.start_round()?.to_vec();
        for position in n..sequence.len() {
            let is_match = sequence[position] == sequence[position - n];
            let says_match = if player.gets_it() { is_match } else { !is_match };
            session.answer(position, says_match)?;
        }
        session.finish_round()?;
    }
    Ok(*session.state())
}

fn play_problem_solving(
    deps: SessionDeps,
    config: &AttntivConfig,
    rng: ChaCha8Rng,
    player: &mut Player,
    rounds: u32,
) -> Result<SessionState> {
    let limit = config.problem_solving.seconds_per_problem;
    let mut session = ProblemSolvingSession::new(deps, config.problem_solving, rng);
    for _ in 0..rounds {
        session.start_round()?;
        loop {
            let problem = session
                .current_problem()
                .context("round ended without a problem")?;
            let answer = if player.gets_it() {
                Some(problem.answer)
            } else {
                problem.options.iter().copied().find(|&o| o != problem.answer)
            };
            let feedback = session.submit(answer, player.think_time(limit))?;
            if feedback.round.is_some() {
                break;
            }
        }
    }
    Ok(*session.state())
}

fn play_speed(
    deps: SessionDeps,
    config: &AttntivConfig,
    rng: ChaCha8Rng,
    player: &mut Player,
    rounds: u32,
) -> Result<SessionState> {
    let mut session = SpeedSession::new(deps, config.speed, rng);
    for _ in 0..rounds {
        session.start_round()?;
        loop {
            let challenge = session
                .current_challenge()
                .context("round ended without a challenge")?;
            let limit = challenge.time_limit_secs;
            let mut selected = challenge.target_positions();
            if !player.gets_it() {
                selected.pop();
            }
            let feedback = session.submit(&selected, player.think_time(limit))?;
            if feedback.round.is_some() {
                break;
            }
        }
    }
    Ok(*session.state())
}

fn print_summary(report: &SessionReport, state: &SessionState) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Round", "Tier", "Correct", "Accuracy", "Score"]);
    for (i, record) in report.records.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(record.tier),
            Cell::new(format!("{}/{}", record.correct, record.total)),
            Cell::new(format!("{:.1}%", record.accuracy * 100.0)),
            Cell::new(record.score),
        ]);
    }

    println!("{table}");
    println!(
        "Total: {} points over {} rounds, finishing at {}",
        state.total_score, state.rounds_played, state.tier
    );
    for achievement in &report.progress.achievements {
        println!("Unlocked: {}", achievement.title());
    }
}

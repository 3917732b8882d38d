//! The `attntiv stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use attntiv_core::achievements::Achievement;
use attntiv_core::challenges::daily_board;
use attntiv_core::report::SessionReport;

pub fn execute(report_path: PathBuf) -> Result<()> {
    let report = SessionReport::load_json(&report_path)?;
    let progress = &report.progress;

    println!(
        "Session {} ({}): {} rounds, {} points, {}-day streak",
        report.id, report.mode, progress.rounds, progress.total_points, progress.day_streak
    );

    let mut table = Table::new();
    table.set_header(vec!["Exercise", "Rounds", "Points", "Avg accuracy", "Best tier"]);
    for (kind, stats) in &progress.per_kind {
        table.add_row(vec![
            Cell::new(kind.title()),
            Cell::new(stats.rounds),
            Cell::new(stats.points),
            Cell::new(format!("{:.1}%", stats.avg_accuracy * 100.0)),
            Cell::new(stats.best_tier),
        ]);
    }
    println!("{table}");

    match progress.points_to_next_rank() {
        Some(needed) => println!("\nRank: {} ({needed} points to next rank)", progress.rank()),
        None => println!("\nRank: {}", progress.rank()),
    }

    // Challenges are judged for the last day the report has rounds on.
    let day = report
        .records
        .iter()
        .map(|r| r.completed_at.date_naive())
        .max()
        .unwrap_or_else(|| report.created_at.date_naive());
    let board = daily_board(&report.records, day);
    println!(
        "\nDaily challenges for {day}: {:.0}% complete",
        board.progress() * 100.0
    );
    for status in &board.challenges {
        let mark = if status.completed { "x" } else { " " };
        println!(
            "  [{mark}] {}: {} ({}/{}, {} points)",
            status.challenge.title(),
            status.challenge.description(),
            status.progress.min(status.target),
            status.target,
            status.challenge.points()
        );
    }

    println!("\nAchievements:");
    for achievement in Achievement::ALL {
        let mark = if progress.achievements.contains(&achievement) {
            "x"
        } else {
            " "
        };
        println!(
            "  [{mark}] {}: {}",
            achievement.title(),
            achievement.description()
        );
    }
    Ok(())
}

//! Terminal output formatting.

use chrono::{DateTime, Utc};
use colored::Colorize;
use warden_core::notification::format_date;
use warden_core::{LedgerEntry, Party, SyncReport, War, WipeReport};

/// Print the outcome of one sync cycle.
pub fn print_sync_report(report: &SyncReport) {
    println!("{}", "Sync complete".green().bold());
    println!("  {:<16} {}", "Candidates", report.candidates);
    println!("  {:<16} {}", "Pruned", report.pruned);
    println!("  {:<16} {}", "New wars", report.new_wars);
    println!("  {:<16} {}", "Rechecked", report.rechecked);
    println!("  {:<16} {}", "Notifications", report.notifications.to_string().cyan());
    if report.failures > 0 {
        println!("  {:<16} {}", "Failures", report.failures.to_string().red());
    } else {
        println!("  {:<16} {}", "Failures", "0".dimmed());
    }
}

fn party_label(party: &Party) -> String {
    match party {
        Party::Alliance(id) => format!("alliance:{}", id),
        Party::Corporation(id) => format!("corp:{}", id),
    }
}

fn war_state(war: &War, now: DateTime<Utc>) -> &'static str {
    if war.is_finished_at(now) {
        "finished"
    } else if war.retracted.is_some() {
        "retracted"
    } else if war.started.is_some() {
        "active"
    } else {
        "pending"
    }
}

fn war_status(war: &War) -> colored::ColoredString {
    let state = war_state(war, Utc::now());
    match state {
        "finished" => state.green(),
        "active" => state.red(),
        _ => state.yellow(),
    }
}

/// Print a corporation's ledger as a table.
pub fn print_ledger(entries: &[LedgerEntry]) {
    if entries.is_empty() {
        println!("{}", "No wars recorded for this corporation.".dimmed());
        return;
    }

    println!(
        "{:<10} {:<20} {:<20} {:<10} {:<30}",
        "War", "Aggressor", "Defender", "Status", "Declared"
    );
    println!("{}", "-".repeat(92));

    for entry in entries {
        let war = &entry.war;
        println!(
            "{:<10} {:<20} {:<20} {:<10} {:<30}",
            war.id,
            party_label(&war.aggressor),
            party_label(&war.defender),
            war_status(war),
            format_date(war.declared),
        );
    }

    println!();
    println!("{} {}", entries.len().to_string().bold(), "wars".dimmed());
}

pub fn print_wipe_report(report: &WipeReport) {
    println!("{}", "War state wiped".green().bold());
    println!("  {} {} war records", "✓".green(), report.wars);
    println!("  {} {} ledger entries", "✓".green(), report.ledger_entries);
}

//! Plain-text rendering used by the terminal front-end.

use std::fmt::Write;

use crate::models::question::option_label;
use crate::models::timer::Urgency;
use crate::models::{
    GameSession, GameStatistics, GameSummary, HistoryEntry, LifelineKind, LifelineResult,
    PrizeTable, Question, TimerTick,
};

/// `Rp 10.0 Juta` style amount.
pub fn format_rupiah(amount: u64) -> String {
    let value = amount as f64;
    if amount >= 1_000_000_000 {
        format!("Rp {:.1} Milyar", value / 1_000_000_000.0)
    } else if amount >= 1_000_000 {
        format!("Rp {:.1} Juta", value / 1_000_000.0)
    } else if amount >= 1_000 {
        format!("Rp {:.1} Ribu", value / 1_000.0)
    } else {
        format!("Rp {}", amount)
    }
}

/// Question with its options; `hidden` options (from 50:50) are blanked.
pub fn render_question(session: &GameSession, question: &Question, hidden: &[usize], prizes: &PrizeTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Pertanyaan {}/{} untuk {}",
        session.current_level,
        prizes.len(),
        format_rupiah(prizes.prize_for_level(session.current_level))
    );
    let _ = writeln!(out, "{}", question.text);
    for (index, option) in question.options.iter().enumerate() {
        if hidden.contains(&index) {
            let _ = writeln!(out, "  {}: ---", option_label(index));
        } else {
            let _ = writeln!(out, "  {}: {}", option_label(index), option);
        }
    }

    let lifelines: Vec<&str> = LifelineKind::ALL
        .iter()
        .filter(|kind| session.lifelines.is_available(**kind))
        .map(|kind| kind.as_str())
        .collect();
    if lifelines.is_empty() {
        let _ = writeln!(out, "Bantuan: habis");
    } else {
        let _ = writeln!(out, "Bantuan: {}", lifelines.join(", "));
    }
    let _ = write!(
        out,
        "Hadiah saat ini {} | Terjamin {}",
        format_rupiah(session.score),
        format_rupiah(session.guaranteed_prize)
    );
    out
}

pub fn render_prize_ladder(prizes: &PrizeTable, current_level: u32) -> String {
    let mut out = String::new();
    for level in (1..=prizes.len()).rev() {
        let marker = if level == current_level { ">" } else { " " };
        let safe = if prizes.is_safe_zone(level) { " *" } else { "" };
        let _ = writeln!(
            out,
            "{} {:>2}. {}{}",
            marker,
            level,
            format_rupiah(prizes.prize_for_level(level)),
            safe
        );
    }
    out
}

pub fn render_tick(tick: &TimerTick) -> Option<String> {
    match tick.urgency() {
        Urgency::Critical => Some(format!("!! {} detik lagi", tick.remaining_seconds)),
        Urgency::Hurry if tick.remaining_seconds % 5 == 0 => {
            Some(format!("{} detik lagi", tick.remaining_seconds))
        }
        _ => None,
    }
}

pub fn render_lifeline(result: &LifelineResult) -> String {
    match result {
        LifelineResult::FiftyFifty { remaining_options, .. } => {
            let labels: Vec<String> = remaining_options
                .iter()
                .map(|i| option_label(*i).to_string())
                .collect();
            format!("50:50 - tersisa pilihan {}", labels.join(" dan "))
        }
        LifelineResult::PhoneFriend {
            suggestion,
            confidence,
            duration_secs,
        } => format!(
            "Telepon Teman ({}s): \"Saya {} jawabannya {}.\"",
            duration_secs,
            confidence.label(),
            option_label(*suggestion)
        ),
        LifelineResult::AskAudience { poll_results, top_choice } => {
            let mut out = String::from("Tanya Penonton:\n");
            for (index, percent) in poll_results.iter().enumerate() {
                let bar = "#".repeat((*percent / 5) as usize);
                let top = if index == *top_choice { " <" } else { "" };
                let _ = writeln!(out, "  {}: {:>3}% {}{}", option_label(index), percent, bar, top);
            }
            out.trim_end().to_string()
        }
    }
}

pub fn render_summary(summary: &GameSummary) -> String {
    let headline = if summary.jackpot {
        "SELAMAT! Anda memenangkan jackpot!"
    } else {
        "Permainan selesai"
    };
    format!(
        "{}\nHadiah: {}\nLevel: {} | Benar: {}/{} ({}%) | Waktu: {}s | Bantuan: {}",
        headline,
        format_rupiah(summary.final_prize),
        summary.levels_completed,
        summary.correct_answers,
        summary.questions_answered,
        summary.accuracy,
        summary.seconds_played,
        summary.lifelines_used
    )
}

pub fn render_statistics(stats: &GameStatistics) -> String {
    let last = stats
        .last_played_date
        .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string());
    format!(
        "Total permainan: {}\nTotal hadiah: {}\nHadiah tertinggi: {}\nRata-rata: {}\nJackpot: {}\nLevel terbaik: {}\nTerakhir main: {}",
        stats.total_games,
        format_rupiah(stats.total_winnings),
        format_rupiah(stats.highest_score),
        format_rupiah(stats.average_score),
        stats.jackpot_count,
        stats.best_streak,
        last
    )
}

pub fn render_history(entries: &[HistoryEntry], limit: usize) -> String {
    if entries.is_empty() {
        return "Belum ada riwayat permainan".to_string();
    }
    entries
        .iter()
        .take(limit)
        .map(|game| {
            format!(
                "{}  {}  Level: {} | Benar: {}/{}{}",
                game.date.format("%Y-%m-%d %H:%M"),
                format_rupiah(game.final_score),
                game.levels_completed,
                game.correct_count,
                game.questions_answered,
                if game.was_jackpot { " | JACKPOT" } else { "" }
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

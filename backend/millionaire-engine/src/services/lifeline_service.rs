//! Randomised lifeline helpers.
//!
//! Each helper only reads the question; marking the lifeline as spent is the
//! engine's job.

use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{Confidence, Difficulty, LifelineKind, LifelineResult, Question};

pub fn resolve<R: Rng + ?Sized>(
    kind: LifelineKind,
    question: &Question,
    difficulty: Difficulty,
    call_secs: u32,
    rng: &mut R,
) -> LifelineResult {
    match kind {
        LifelineKind::FiftyFifty => fifty_fifty(question, rng),
        LifelineKind::PhoneFriend => phone_friend(question, difficulty, call_secs, rng),
        LifelineKind::AskAudience => ask_audience(question, difficulty, rng),
    }
}

/// Removes two of the three wrong options, picked uniformly.
pub fn fifty_fifty<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> LifelineResult {
    let wrong = question.incorrect_indices();
    let mut removed: Vec<usize> = wrong.choose_multiple(rng, 2).copied().collect();
    removed.sort_unstable();

    let mut remaining: Vec<usize> = std::iter::once(question.correct_index)
        .chain(wrong.into_iter().filter(|i| !removed.contains(i)))
        .collect();
    remaining.sort_unstable();

    LifelineResult::FiftyFifty {
        removed_options: removed,
        remaining_options: remaining,
    }
}

pub fn phone_friend<R: Rng + ?Sized>(
    question: &Question,
    difficulty: Difficulty,
    call_secs: u32,
    rng: &mut R,
) -> LifelineResult {
    let knows_it = rng.random_bool(f64::from(difficulty.phone_accuracy()) / 100.0);
    let suggestion = if knows_it {
        question.correct_index
    } else {
        question
            .incorrect_indices()
            .choose(rng)
            .copied()
            .unwrap_or(question.correct_index)
    };

    LifelineResult::PhoneFriend {
        suggestion,
        confidence: if suggestion == question.correct_index {
            Confidence::VerySure
        } else {
            Confidence::NotSure
        },
        duration_secs: call_secs,
    }
}

/// Audience poll summing to exactly 100.
///
/// The correct option gets `base + 0..=19`. Wrong options are filled in index
/// order, each but the last taking a random amount up to half of what is
/// left; the last takes the remainder.
pub fn ask_audience<R: Rng + ?Sized>(
    question: &Question,
    difficulty: Difficulty,
    rng: &mut R,
) -> LifelineResult {
    let mut poll = [0u32; 4];

    let correct_share = difficulty.audience_base_accuracy() + rng.random_range(0..20);
    poll[question.correct_index] = correct_share;

    let mut remaining = 100 - correct_share;
    let wrong = question.incorrect_indices();
    for (position, index) in wrong.iter().enumerate() {
        if position == wrong.len() - 1 {
            poll[*index] = remaining;
        } else {
            let share = (rng.random::<f64>() * f64::from(remaining) / 2.0).floor() as u32;
            poll[*index] = share;
            remaining -= share;
        }
    }

    LifelineResult::AskAudience {
        poll_results: poll,
        top_choice: top_choice(&poll),
    }
}

/// First index holding the maximum share.
fn top_choice(poll: &[u32; 4]) -> usize {
    let max = poll.iter().copied().max().unwrap_or(0);
    poll.iter().position(|p| *p == max).unwrap_or(0)
}

//! Daily Session
//!
//! This example plays one level of a daily run through the session shell.
//!
//! Key concepts:
//! - The answer comes from a deterministic daily picker
//! - Rejected guesses leave the puzzle untouched
//! - Every accepted input is snapshotted into the ledger store
//! - A terminal submit returns a token for the delayed level advance
//! - Reopening on the same day resumes the typed letters
//!
//! Run with: cargo run --example daily_session

use wordscend::config::GameConfig;
use wordscend::core::Mark;
use wordscend::ledger::{DayKey, MemoryStore};
use wordscend::oracle::{DailyPicker, WordList};
use wordscend::session::{Resolution, Session};

const WORDS: &str = "
    bolt
    word
    ward
    crane
    slate
    trace
    planet
    stream
    journey
    kitchen
    nato
";

fn render(marks: &[Mark]) -> String {
    marks.iter().map(|m| m.to_emoji()).collect()
}

fn main() {
    println!("=== Daily Session Example ===\n");

    let words = WordList::parse(WORDS);
    let config = GameConfig::default();
    let today = DayKey::from_ymd(2025, 9, 1).unwrap();
    println!("Loaded {} playable words (abbreviations dropped)", words.len());

    let mut session = Session::open(
        config.clone(),
        words.clone(),
        DailyPicker,
        &words,
        MemoryStore::new(),
        today,
    )
    .unwrap();
    let answer = session.attempt().answer().to_string();
    println!("Level 1: {}-letter puzzle\n", answer.len());

    // A guess outside the word list is rejected without using a row
    for ch in "QQQQ".chars() {
        session.add_letter(ch).unwrap();
    }
    let report = session.submit(today);
    println!("QQQQ  -> rejected: {:?}", report.result.reason);
    for _ in 0..4 {
        session.backspace().unwrap();
    }

    // A wrong but valid guess uses up the first row
    let miss = words
        .words_of_length(answer.len())
        .into_iter()
        .find(|w| *w != answer)
        .unwrap();
    for ch in miss.chars() {
        session.add_letter(ch).unwrap();
    }
    let report = session.submit(today);
    println!(
        "{miss}  -> {}",
        render(report.result.marks.as_deref().unwrap_or_default())
    );
    println!("Streak after first play: {}", session.ledger().streak.current);

    // Simulate a reload halfway through typing
    session.add_letter(answer.chars().next().unwrap()).unwrap();
    let store = session.store().clone();
    drop(session);

    let mut session =
        Session::open(config, words.clone(), DailyPicker, &words, store, today).unwrap();
    println!(
        "\n[Reload] Resumed on row {} with '{}' typed",
        session.attempt().cursor().row + 1,
        session.attempt().guess()
    );

    for ch in answer.chars().skip(1) {
        session.add_letter(ch).unwrap();
    }
    let report = session.submit(today);
    println!(
        "{answer}  -> {}",
        render(report.result.marks.as_deref().unwrap_or_default())
    );

    if let Some(Resolution::Won(win)) = &report.resolution {
        println!("Won on attempt {}: +{} (score {})", report.result.attempt, win.bonus, win.score);
    }

    // The caller waits out the delay, then redeems the token exactly once
    if let Some(pending) = report.pending {
        println!("\nWaiting {:?} before {:?}", pending.delay, pending.kind);
        let started = session.complete_advance(pending.id).unwrap();
        let repeated = session.complete_advance(pending.id).unwrap();
        println!("Advance started: {started}, repeated advance ignored: {}", !repeated);
        println!("Level 2: {}-letter puzzle", session.attempt().cols());
    }

    println!("\nKey Takeaways:");
    println!("- The oracle gates every submit before evaluation runs");
    println!("- Snapshots make a reload resume the same row");
    println!("- Ledger effects apply at the terminal submit, not at the advance");

    println!("\n=== Example Complete ===");
}

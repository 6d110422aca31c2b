use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing_subscriber::fmt::init;

use millionaire_engine::models::question::option_label;
use millionaire_engine::services::question_seed::load_seed_file;
use millionaire_engine::{AppState, Config};

const USAGE: &str = "usage: question-bank <list [level] | stats | export [file] | import <file> | reset | delete <id>>";

fn main() -> Result<()> {
    init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(command) = args.first() else {
        bail!(USAGE);
    };

    let config = Config::load().context("Failed to load configuration")?;
    let state = AppState::new(config).context("Failed to initialize app state")?;
    let repo = &state.questions;

    match command.as_str() {
        "list" => {
            let questions = match args.get(1) {
                Some(level) => {
                    let level: u32 = level.parse().with_context(|| format!("Invalid level '{}'", level))?;
                    repo.questions_for_level(level)
                }
                None => repo.all_questions(),
            };
            for q in &questions {
                println!("[{}] level {} - {}", q.id, q.level, q.text);
                for (index, option) in q.options.iter().enumerate() {
                    let mark = if index == q.correct_index { "*" } else { " " };
                    println!("   {}{}: {}", mark, option_label(index), option);
                }
            }
            println!("{} questions", questions.len());
        }
        "stats" => {
            let stats = repo.statistics();
            println!("Total questions: {}", stats.total_questions);
            println!("Levels covered: {}", stats.levels_with_questions);
            for (level, count) in &stats.by_level {
                println!("  level {:>2}: {}", level, count);
            }
        }
        "export" => {
            let payload = serde_json::to_string_pretty(&repo.export_all())
                .context("Failed to serialize question bank")?;
            match args.get(1) {
                Some(path) => {
                    std::fs::write(path, payload)
                        .with_context(|| format!("Failed to write export file {}", path))?;
                    tracing::info!("Exported question bank to {}", path);
                }
                None => println!("{}", payload),
            }
        }
        "import" => {
            let Some(path) = args.get(1) else {
                bail!("import needs a file path");
            };
            let questions = load_seed_file(&PathBuf::from(path))?;
            let count = questions.len();
            repo.import_all(questions).context("Import rejected")?;
            println!("Imported {} questions", count);
        }
        "reset" => {
            repo.reset_to_default()
                .context("Failed to reset question bank")?;
            println!("Question bank reset to defaults");
        }
        "delete" => {
            let Some(id) = args.get(1) else {
                bail!("delete needs a question id");
            };
            let id: u64 = id.parse().with_context(|| format!("Invalid id '{}'", id))?;
            if repo.delete(id).context("Failed to delete question")? {
                println!("Deleted question {}", id);
            } else {
                println!("No question with id {}", id);
            }
        }
        other => bail!("unknown command '{}'\n{}", other, USAGE),
    }

    Ok(())
}

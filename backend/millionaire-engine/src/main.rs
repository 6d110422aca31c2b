use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use millionaire_engine::metrics::render_metrics;
use millionaire_engine::models::question::option_label;
use millionaire_engine::models::{AnswerOutcome, LifelineKind, LifelineResult, TimerEvent};
use millionaire_engine::presentation::{
    format_rupiah, render_history, render_lifeline, render_prize_ladder, render_question,
    render_statistics, render_summary, render_tick,
};
use millionaire_engine::services::timer_driver::TimerDriver;
use millionaire_engine::{AppState, Config};

const HELP: &str = "Perintah: new | a b c d | 5050 phone audience | quit | stats | history | metrics | exit";

enum Flow {
    Continue,
    Exit,
}

/// Terminal session state that lives outside the engine.
struct Console {
    state: AppState,
    driver: TimerDriver,
    events: mpsc::UnboundedSender<TimerEvent>,
    hidden: Vec<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the game on stdout
    let json_logs = std::env::var("LOG_FORMAT").is_ok_and(|v| v == "json");
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "millionaire_engine=info".into()),
        )
        .with(json_logs.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!(
        "Configuration loaded for environment: {}",
        std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string())
    );

    let state = AppState::new(config).context("Failed to initialize application state")?;
    let (events, mut event_rx) = mpsc::unbounded_channel();
    let mut console = Console {
        driver: TimerDriver::new(state.config.tick_interval()),
        state,
        events,
        hidden: Vec::new(),
    };

    println!("Siapa Ingin Jadi Milyuner?");
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                if let Flow::Exit = console.handle_command(line.trim()).await {
                    break;
                }
            }
            Some(event) = event_rx.recv() => {
                console.handle_timer_event(event).await;
            }
        }
    }

    console.driver.stop();
    tracing::info!("Bye");
    Ok(())
}

impl Console {
    async fn handle_command(&mut self, command: &str) -> Flow {
        let lower = command.to_lowercase();
        match lower.as_str() {
            "" => {}
            "new" => self.new_game().await,
            "a" | "b" | "c" | "d" => {
                let index = usize::from(lower.as_bytes()[0] - b'a');
                self.answer(index).await;
            }
            "5050" | "phone" | "audience" => match lower.parse::<LifelineKind>() {
                Ok(kind) => self.lifeline(kind).await,
                Err(e) => println!("{}", e),
            },
            "quit" => self.quit().await,
            "stats" => println!("{}", render_statistics(&self.state.history.statistics())),
            "history" => println!("{}", render_history(&self.state.history.history(), 10)),
            "metrics" => match render_metrics() {
                Ok(text) => println!("{}", text),
                Err(e) => tracing::error!(error = %e, "Failed to render metrics"),
            },
            "help" => println!("{}", HELP),
            "exit" => return Flow::Exit,
            other => println!("Perintah tidak dikenal: {}\n{}", other, HELP),
        }
        Flow::Continue
    }

    async fn new_game(&mut self) {
        self.state.refresh_rules().await;
        self.hidden.clear();

        let started = {
            let mut engine = self.state.engine.lock().await;
            let result = engine.start_game().map(|_| ());
            result.map(|()| render_prize_ladder(engine.prize_table(), 1))
        };
        match started {
            Ok(ladder) => {
                println!("{}", ladder);
                self.show_question().await;
                self.driver
                    .start(self.state.engine.clone(), self.events.clone());
            }
            Err(e) => println!("Tidak bisa memulai permainan: {}", e),
        }
    }

    async fn show_question(&self) {
        let engine = self.state.engine.lock().await;
        let session = engine.session();
        if let Some(question) = &session.current_question {
            println!(
                "\n{}",
                render_question(session, question, &self.hidden, engine.prize_table())
            );
        }
    }

    async fn answer(&mut self, index: usize) {
        let result = self.state.engine.lock().await.submit_answer(Some(index));
        match result {
            Ok(Some(AnswerOutcome::Correct {
                prize,
                safe_zone_reached,
                ..
            })) => {
                println!("Benar! Hadiah Anda {}", format_rupiah(prize));
                if safe_zone_reached {
                    println!("Zona aman tercapai, {} terjamin", format_rupiah(prize));
                }
                self.hidden.clear();
                self.show_question().await;
                // New question gets a full first second
                self.driver
                    .start(self.state.engine.clone(), self.events.clone());
            }
            Ok(Some(AnswerOutcome::Won(summary))) => {
                self.driver.stop();
                self.reveal().await;
                println!("{}", render_summary(&summary));
            }
            Ok(Some(AnswerOutcome::Wrong {
                correct_index,
                explanation,
                summary,
            })) => {
                self.driver.stop();
                self.reveal().await;
                println!("Salah! Jawaban yang benar: {}", option_label(correct_index));
                if !explanation.is_empty() {
                    println!("{}", explanation);
                }
                println!("{}", render_summary(&summary));
            }
            Ok(None) => println!("Tidak ada pertanyaan aktif. Ketik 'new' untuk bermain."),
            Err(e) => {
                self.driver.stop();
                println!("Permainan dihentikan: {}", e);
            }
        }
    }

    async fn lifeline(&mut self, kind: LifelineKind) {
        let result = self.state.engine.lock().await.use_lifeline(kind);
        match result {
            Some(result) => {
                if let LifelineResult::FiftyFifty { removed_options, .. } = &result {
                    self.hidden = removed_options.clone();
                    self.show_question().await;
                }
                println!("{}", render_lifeline(&result));
            }
            None => println!("{} tidak tersedia", kind.display_name()),
        }
    }

    async fn quit(&mut self) {
        let summary = self.state.engine.lock().await.quit_game();
        match summary {
            Some(summary) => {
                self.driver.stop();
                println!("{}", render_summary(&summary));
            }
            None => println!("Tidak ada permainan aktif."),
        }
    }

    async fn handle_timer_event(&mut self, event: TimerEvent) {
        match event {
            TimerEvent::TimerTick(tick) => {
                if let Some(line) = render_tick(&tick) {
                    println!("{}", line);
                }
            }
            TimerEvent::TimeExpired(expired) => {
                println!("{}", expired.message);
                self.reveal().await;
                println!(
                    "Jawaban yang benar: {}",
                    option_label(expired.correct_index)
                );
                println!("{}", render_summary(&expired.summary));
            }
        }
    }

    async fn reveal(&self) {
        tokio::time::sleep(self.state.config.reveal_delay()).await;
    }
}

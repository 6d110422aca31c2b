use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data_dir: PathBuf,
    pub tick_interval_ms: u64,
    pub reveal_delay_ms: u64,
    /// JSON array of questions used instead of the built-in set on first run.
    pub question_seed_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            tick_interval_ms: 1000,
            reveal_delay_ms: 2000,
            question_seed_file: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        // Determine environment (defaults to dev)
        let env = env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());

        // config/{env}.toml, then APP__SECTION__KEY overrides
        let settings = config::Config::builder()
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()?;

        let defaults = Config::default();

        let data_dir = settings
            .get_string("storage.data_dir")
            .or_else(|_| env::var("MILLIONAIRE_DATA_DIR"))
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let tick_interval_ms = settings
            .get_int("timer.tick_interval_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .or_else(|| parse_env("TICK_INTERVAL_MS"))
            .filter(|v| *v > 0)
            .unwrap_or(defaults.tick_interval_ms);

        let reveal_delay_ms = settings
            .get_int("ui.reveal_delay_ms")
            .ok()
            .and_then(|v| u64::try_from(v).ok())
            .or_else(|| parse_env("REVEAL_DELAY_MS"))
            .unwrap_or(defaults.reveal_delay_ms);

        let question_seed_file = settings
            .get_string("storage.question_seed_file")
            .or_else(|_| env::var("QUESTION_SEED_FILE"))
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Ok(Config {
            data_dir,
            tick_interval_ms,
            reveal_delay_ms,
            question_seed_file,
        })
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}

fn parse_env(key: &str) -> Option<u64> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 6] = [
        "MILLIONAIRE_DATA_DIR",
        "TICK_INTERVAL_MS",
        "REVEAL_DELAY_MS",
        "QUESTION_SEED_FILE",
        "APP__TIMER__TICK_INTERVAL_MS",
        "APP__STORAGE__DATA_DIR",
    ];

    fn clear_env() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    fn set(key: &str, value: &str) {
        env::set_var(key, value);
    }

    #[test]
    #[serial]
    fn defaults_apply_without_environment() {
        clear_env();
        let config = Config::load().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert_eq!(config.reveal_delay_ms, 2000);
        assert!(config.question_seed_file.is_none());
    }

    #[test]
    #[serial]
    fn plain_env_fallbacks_are_read() {
        clear_env();
        set("MILLIONAIRE_DATA_DIR", "/tmp/millionaire");
        set("TICK_INTERVAL_MS", "250");
        set("REVEAL_DELAY_MS", "0");
        let config = Config::load().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/millionaire"));
        assert_eq!(config.tick_interval_ms, 250);
        assert_eq!(config.reveal_delay_ms, 0);
        clear_env();
    }

    #[test]
    #[serial]
    fn prefixed_env_wins_over_plain_env() {
        clear_env();
        set("TICK_INTERVAL_MS", "250");
        set("APP__TIMER__TICK_INTERVAL_MS", "100");
        let config = Config::load().unwrap();
        assert_eq!(config.tick_interval_ms, 100);
        clear_env();
    }

    #[test]
    #[serial]
    fn zero_tick_interval_falls_back_to_default() {
        clear_env();
        set("TICK_INTERVAL_MS", "0");
        assert_eq!(Config::load().unwrap().tick_interval_ms, 1000);
        clear_env();
    }
}

use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    /// Pause before a reading is shown; zero disables it.
    pub reading_delay: Duration,
    /// Year printed above the monthly outlook.
    pub outlook_year: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            reading_delay: Duration::from_millis(1500),
            outlook_year: 2026,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Config::default();
        Config {
            bind_addr: env::var("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: parse_var("PORT", defaults.port),
            reading_delay: Duration::from_millis(parse_var(
                "READING_DELAY_MS",
                defaults.reading_delay.as_millis() as u64,
            )),
            outlook_year: parse_var("OUTLOOK_YEAR", defaults.outlook_year),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn parse_var<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display + Copy,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Ignoring unparseable setting");
            default
        }),
        Err(_) => default,
    }
}

pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        dotenv().ok();
        Config::from_env()
    })
}

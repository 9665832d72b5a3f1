use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context};
use chrono::{DateTime, FixedOffset, Utc};

use crate::services::stats::LabelLocale;

#[derive(Debug, Clone)]
pub struct Config {
    /// When set, entries live in PostgreSQL; otherwise in `entry_store_path`.
    pub database_url: Option<String>,
    pub entry_store_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    /// Offset of the users' calendar. Decides what "today" is.
    pub utc_offset: FixedOffset,
    pub label_locale: LabelLocale,

    pub mock_entries: bool,
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key/value source. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match var("PORT") {
            Some(p) => p.parse().context("PORT must be a number")?,
            None => 8080,
        };

        let offset_minutes: i32 = match var("UTC_OFFSET_MINUTES") {
            Some(m) => m.parse().context("UTC_OFFSET_MINUTES must be a number")?,
            None => 0,
        };
        if offset_minutes.abs() >= 24 * 60 {
            bail!("UTC_OFFSET_MINUTES must be within ±1439, got {offset_minutes}");
        }
        let utc_offset = FixedOffset::east_opt(offset_minutes * 60)
            .context("UTC_OFFSET_MINUTES is out of range")?;

        let label_locale = match var("LABEL_LOCALE") {
            Some(l) => l.parse().map_err(anyhow::Error::msg)?,
            None => LabelLocale::default(),
        };

        Ok(Self {
            database_url: var("DATABASE_URL"),
            entry_store_path: var("ENTRY_STORE_PATH")
                .unwrap_or_else(|| "moodEntries.json".into())
                .into(),
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            frontend_url: var("FRONTEND_URL").unwrap_or_else(|| "http://localhost:3000".into()),
            cors_extra_origins: var("CORS_EXTRA_ORIGINS")
                .map(|extra| {
                    extra
                        .split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            utc_offset,
            label_locale,

            mock_entries: parse_flag(var("MOCK_ENTRIES"), true, "MOCK_ENTRIES")?,
            seed_on_start: parse_flag(var("SEED_ON_START"), false, "SEED_ON_START")?,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The current instant on the users' calendar.
    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.utc_offset)
    }
}

fn parse_flag(value: Option<String>, default: bool, key: &str) -> anyhow::Result<bool> {
    match value {
        Some(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{key} must be true or false")),
        None => Ok(default),
    }
}

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File};
use serde::Deserialize;

use crate::calendar::EventDetails;

pub const DEFAULT_EVENT_TITLE: &str = "Jamuan Kenduri KKTJMPPP";
pub const DEFAULT_EVENT_DESCRIPTION: &str =
    "Majlis Jamuan Kenduri Kesyukuran Kakitangan Jabatan Mufti Pulau Pinang";
pub const DEFAULT_EVENT_LOCATION: &str =
    "Berjaya Penang Hotel, George Town, Penang, Malaysia";
pub const DEFAULT_EVENT_START: &str = "2025-09-27T06:00:00Z";
pub const DEFAULT_EVENT_END: &str = "2025-09-27T14:00:00Z";
/// Wall-clock time in the viewer's own timezone, like the printed card.
pub const DEFAULT_COUNTDOWN_TARGET: &str = "2025-09-27 14:00:00";
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/1mnLBSDFO8LUtXtMnjOHO-lf6KyVWz76flqortwXyoRw/gviz/tq?tqx=out:csv";

const COUNTDOWN_TARGET_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub event_title: String,
    pub event_description: String,
    pub event_location: String,
    pub event_starts_at: String,
    pub event_ends_at: String,
    pub countdown_target: String,
    pub sheet_url: String,
    pub music_file: Option<String>,
    pub auto_scroll: bool,
    pub intro: bool,
}

impl Settings {
    /// Layered load: baked-in defaults, then the user's global config,
    /// then a `kenduri.toml` in the working directory, then an explicit
    /// `--config` file. Later sources win.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = defaults()?
            .add_source(File::from(user_config_path()).required(false))
            .add_source(File::with_name("kenduri.toml").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder.build()?.try_deserialize()
    }

    pub fn event_details(&self) -> anyhow::Result<EventDetails> {
        Ok(EventDetails {
            title: self.event_title.clone(),
            description: self.event_description.clone(),
            location: self.event_location.clone(),
            start: parse_instant(&self.event_starts_at)?,
            end: parse_instant(&self.event_ends_at)?,
        })
    }

    /// The countdown target is written as local wall-clock time and
    /// resolved against the viewer's timezone.
    pub fn countdown_target_utc(&self) -> anyhow::Result<DateTime<Utc>> {
        let naive = NaiveDateTime::parse_from_str(&self.countdown_target, COUNTDOWN_TARGET_FORMAT)
            .with_context(|| format!("invalid countdown_target {:?}", self.countdown_target))?;
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .with_context(|| format!("countdown_target {naive} does not exist in this timezone"))?;
        Ok(local.with_timezone(&Utc))
    }

    pub fn music_path(&self) -> Option<PathBuf> {
        self.music_file
            .as_ref()
            .map(|raw| PathBuf::from(shellexpand::tilde(raw).into_owned()))
    }

    /// Fixture with a dead sheet endpoint, for state-machine tests.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            event_title: DEFAULT_EVENT_TITLE.into(),
            event_description: "Majlis Jamuan Kenduri".into(),
            event_location: "Berjaya Penang Hotel".into(),
            event_starts_at: DEFAULT_EVENT_START.into(),
            event_ends_at: DEFAULT_EVENT_END.into(),
            countdown_target: DEFAULT_COUNTDOWN_TARGET.into(),
            sheet_url: "http://127.0.0.1:9/sheet".into(),
            music_file: None,
            auto_scroll: true,
            intro: true,
        }
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("event_title", DEFAULT_EVENT_TITLE)?
        .set_default("event_description", DEFAULT_EVENT_DESCRIPTION)?
        .set_default("event_location", DEFAULT_EVENT_LOCATION)?
        .set_default("event_starts_at", DEFAULT_EVENT_START)?
        .set_default("event_ends_at", DEFAULT_EVENT_END)?
        .set_default("countdown_target", DEFAULT_COUNTDOWN_TARGET)?
        .set_default("sheet_url", DEFAULT_SHEET_URL)?
        .set_default("auto_scroll", true)?
        .set_default("intro", true)
}

fn parse_instant(text: &str) -> anyhow::Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(text)
        .with_context(|| format!("invalid event instant {text:?}"))?;
    Ok(parsed.with_timezone(&Utc))
}

pub fn user_config_path() -> PathBuf {
    let mut path = config_dir();
    path.push("kenduri.toml");
    path
}

/// Directory holding the user config and the log file.
pub fn config_dir() -> PathBuf {
    let mut path = dirs::home_dir().expect("Failed to get home directory");
    path.push(".config");
    path.push("kenduri");
    path
}

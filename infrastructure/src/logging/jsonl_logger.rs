//! JSONL transcript writer.
//!
//! Each [`ConversationEvent`] becomes one line carrying `type`, `timestamp`
//! and `session` next to the event payload. Files are opened in append mode
//! so a transcript can span several runs.

use chrono::{DateTime, Local, SecondsFormat, Utc};
use nico_application::ports::conversation_logger::{ConversationEvent, ConversationLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Transcript logger writing one JSON object per line.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session: String,
}

impl JsonlConversationLogger {
    /// Open `path` for appending, creating parent directories.
    ///
    /// Returns `None` when the file cannot be opened; the caller falls back
    /// to no transcript.
    pub fn open(path: impl AsRef<Path>) -> Option<Self> {
        Self::open_with_session(path, session_id(Local::now()))
    }

    /// Start a fresh transcript named after the current time inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Option<Self> {
        let now = Local::now();
        let path = dir.as_ref().join(transcript_file_name(now));
        Self::open_with_session(path, session_id(now))
    }

    fn open_with_session(path: impl AsRef<Path>, session: String) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create transcript directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open transcript {}: {}", path.display(), e);
                return None;
            }
        };

        debug!("Transcript: {} (session {})", path.display(), session);
        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    fn record(&self, event: ConversationEvent) -> Value {
        let mut map = match event.payload {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        map.insert("type".to_string(), Value::from(event.event_type));
        map.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        );
        map.insert("session".to_string(), Value::from(self.session.as_str()));
        Value::Object(map)
    }
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        let Ok(line) = serde_json::to_string(&self.record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

fn session_id(now: DateTime<Local>) -> String {
    now.format("%Y%m%d-%H%M%S").to_string()
}

fn transcript_file_name(now: DateTime<Local>) -> String {
    format!("nico-{}.transcript.jsonl", session_id(now))
}

//! eSpeak speech engine.
//!
//! Drives the `espeak-ng` (or legacy `espeak`) command line. Voices come from
//! `--voices` plus `--voices=mb` so installed MBROLA voices such as
//! `spanish-mbrola-2` are listed too.

use nico_application::ports::speech::{SpeechEngine, SpeechError};
use nico_domain::{Voice, VoiceSettings};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tracing::{debug, info};

const CANDIDATES: &[&str] = &["espeak-ng", "espeak"];

/// Speaks through an eSpeak subprocess.
#[derive(Debug, Clone)]
pub struct EspeakEngine {
    program: PathBuf,
}

impl EspeakEngine {
    /// Find `espeak-ng` or `espeak` on `PATH`.
    pub fn detect() -> Result<Self, SpeechError> {
        for candidate in CANDIDATES {
            if let Ok(program) = which::which(candidate) {
                info!("Speech engine: {}", program.display());
                return Ok(Self { program });
            }
        }
        Err(SpeechError::Unavailable(
            "neither espeak-ng nor espeak is installed".to_string(),
        ))
    }

    /// Use an explicit binary.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }

    fn list(&self, arg: &str) -> Result<Vec<Voice>, SpeechError> {
        let output = Command::new(&self.program)
            .arg(arg)
            .stderr(Stdio::null())
            .output()
            .map_err(|e| SpeechError::Unavailable(e.to_string()))?;
        if !output.status.success() {
            return Err(SpeechError::Failed(format!(
                "{} {} exited with {}",
                self.program.display(),
                arg,
                output.status
            )));
        }
        Ok(parse_voice_list(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl SpeechEngine for EspeakEngine {
    fn voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let mut voices = self.list("--voices")?;
        // MBROLA voices are only listed on request; missing ones are fine
        if let Ok(mbrola) = self.list("--voices=mb") {
            for voice in mbrola {
                if !voices.iter().any(|v| v.id == voice.id) {
                    voices.push(voice);
                }
            }
        }
        debug!("{} speech voices available", voices.len());
        Ok(voices)
    }

    fn speak(&self, text: &str, settings: &VoiceSettings) -> Result<(), SpeechError> {
        let status = Command::new(&self.program)
            .arg("-v")
            .arg(&settings.voice)
            .arg("-s")
            .arg(settings.rate.to_string())
            .arg("--")
            .arg(text)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|e| SpeechError::Unavailable(e.to_string()))?;

        if status.success() {
            Ok(())
        } else {
            Err(SpeechError::Failed(format!(
                "voice '{}' exited with {}",
                settings.voice, status
            )))
        }
    }
}

/// Parse the table printed by `espeak --voices`.
///
/// Columns are `Pty Language Age/Gender VoiceName File [Other Languages]`.
/// The voice file is used as the id since that is what `-v` accepts for
/// MBROLA voices.
pub fn parse_voice_list(output: &str) -> Vec<Voice> {
    output
        .lines()
        .skip_while(|line| !line.trim_start().starts_with("Pty"))
        .skip(1)
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 5 {
                return None;
            }
            Some(Voice::new(columns[4], columns[3], columns[1]))
        })
        .collect()
}

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Programs tried in order when no speech command is configured.
const KNOWN_COMMANDS: [&str; 4] = ["say", "espeak-ng", "espeak", "spd-say"];

/// Programs that accept `--` as the end of their options.
const OPTION_TERMINATED: [&str; 3] = ["espeak-ng", "espeak", "spd-say"];

#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("no text-to-speech command available")]
    Unavailable,
    #[error("failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{command} exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

#[derive(Debug)]
pub enum SpeechEvent {
    Finished,
    Failed(SpeechError),
}

/// Reads text aloud through an external TTS program. One utterance at a time:
/// a new request cancels the one in flight.
pub struct Speaker {
    command: Option<String>,
    args: Vec<String>,
    current: Option<JoinHandle<()>>,
    event_tx: mpsc::Sender<SpeechEvent>,
}

impl Speaker {
    pub fn new(
        command: Option<String>,
        args: Vec<String>,
        event_tx: mpsc::Sender<SpeechEvent>,
    ) -> Self {
        Self {
            command,
            args,
            current: None,
            event_tx,
        }
    }

    /// Use the configured command, or detect a known one on `PATH`.
    pub fn from_config(
        configured: Option<&str>,
        args: &[String],
        event_tx: mpsc::Sender<SpeechEvent>,
    ) -> Self {
        let command = configured
            .map(str::to_string)
            .or_else(|| detect_command().map(str::to_string));

        match command {
            Some(ref c) => info!(command = %c, "speech command selected"),
            None => warn!("no text-to-speech command found, read aloud disabled"),
        }

        Self::new(command, args.to_vec(), event_tx)
    }

    pub fn is_available(&self) -> bool {
        self.command.is_some()
    }

    pub fn is_speaking(&self) -> bool {
        self.current.as_ref().is_some_and(|h| !h.is_finished())
    }

    pub fn speak(&mut self, text: &str) -> Result<(), SpeechError> {
        let Some(command) = self.command.clone() else {
            return Err(SpeechError::Unavailable);
        };

        self.cancel();

        let mut cmd = Command::new(&command);
        cmd.args(&self.args)
            .args(text_args(&command, text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        let tx = self.event_tx.clone();
        debug!(command = %command, chars = text.chars().count(), "speaking");

        self.current = Some(tokio::spawn(async move {
            let event = match cmd.spawn() {
                Ok(mut child) => match child.wait().await {
                    Ok(status) if status.success() => SpeechEvent::Finished,
                    Ok(status) => SpeechEvent::Failed(SpeechError::Failed { command, status }),
                    Err(source) => SpeechEvent::Failed(SpeechError::Spawn { command, source }),
                },
                Err(source) => SpeechEvent::Failed(SpeechError::Spawn { command, source }),
            };
            let _ = tx.send(event).await;
        }));

        Ok(())
    }

    /// Stop the utterance in flight. Returns whether anything was cancelled.
    pub fn cancel(&mut self) -> bool {
        match self.current.take() {
            Some(handle) if !handle.is_finished() => {
                // Dropping the aborted task drops the child, which kills it.
                handle.abort();
                debug!("speech cancelled");
                true
            }
            _ => false,
        }
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Trailing arguments carrying the text, so a verse starting with `-` is never
/// read as an option.
fn text_args(command: &str, text: &str) -> Vec<String> {
    let program = Path::new(command)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(command);

    if OPTION_TERMINATED.contains(&program) {
        vec!["--".to_string(), text.to_string()]
    } else if text.starts_with('-') {
        vec![format!(" {}", text)]
    } else {
        vec![text.to_string()]
    }
}

fn detect_command() -> Option<&'static str> {
    KNOWN_COMMANDS
        .into_iter()
        .find(|name| find_on_path(name).is_some())
}

fn find_on_path(program: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

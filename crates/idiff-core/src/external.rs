//! Highlighted difference produced by an external ImageMagick-style `compare`.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Instant;

use image::RgbaImage;
use tracing::debug;

use crate::consts::{DEFAULT_DIFF_COMMAND, DEFAULT_FUZZ, DEFAULT_HIGHLIGHT_COLOR};
use crate::error::{IdiffError, Result};
use crate::settings::MergedSettings;

/// Output target: PNG written to stdout.
const STDOUT_TARGET: &str = "png:-";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalDiff {
    pub command: String,
    pub highlight_color: String,
    pub fuzz: String,
}

impl Default for ExternalDiff {
    fn default() -> Self {
        Self {
            command: DEFAULT_DIFF_COMMAND.to_string(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.to_string(),
            fuzz: DEFAULT_FUZZ.to_string(),
        }
    }
}

impl From<&MergedSettings> for ExternalDiff {
    fn from(settings: &MergedSettings) -> Self {
        Self {
            command: settings.command.clone(),
            highlight_color: settings.highlight_color.clone(),
            fuzz: settings.fuzz.clone(),
        }
    }
}

impl ExternalDiff {
    /// Arguments passed to the command for comparing `a` against `b`.
    pub fn args(&self, a: &Path, b: &Path) -> Vec<OsString> {
        vec![
            "-highlight-color".into(),
            self.highlight_color.clone().into(),
            "-fuzz".into(),
            self.fuzz.clone().into(),
            a.as_os_str().to_owned(),
            b.as_os_str().to_owned(),
            STDOUT_TARGET.into(),
        ]
    }

    /// Run the command to completion and decode its stdout.
    ///
    /// Exit status 1 means "images differ" for `compare` and is not a failure.
    pub fn run(&self, a: &Path, b: &Path) -> Result<RgbaImage> {
        let started = Instant::now();
        let output = Command::new(&self.command)
            .args(self.args(a, b))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| self.failure(format!("could not start: {e}")))?;

        match output.status.code() {
            Some(0 | 1) => {}
            Some(code) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(self.failure(format!("exit status {code}: {}", stderr.trim())));
            }
            None => return Err(self.failure("terminated by signal".to_string())),
        }

        let image = image::load_from_memory(&output.stdout)
            .map_err(|e| self.failure(format!("unreadable output: {e}")))?
            .to_rgba8();

        debug!(
            command = %self.command,
            width = image.width(),
            height = image.height(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "External diff finished"
        );
        Ok(image)
    }

    fn failure(&self, reason: String) -> IdiffError {
        IdiffError::ExternalTool {
            command: self.command.clone(),
            reason,
        }
    }
}

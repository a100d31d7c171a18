//! Optional script conversion applied to rendered text before it is written.
//!
//! The usual transform is Simplified-to-Traditional Chinese through an
//! external `opencc` binary. A transform that fails is logged and skipped;
//! it never fails a save.

use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::warn;

use crate::error::TransformError;

/// A whole-text rewrite.
pub trait TextTransform {
    fn transform(&self, text: &str) -> Result<String, TransformError>;
}

impl<F> TextTransform for F
where
    F: Fn(&str) -> Result<String, TransformError>,
{
    fn transform(&self, text: &str) -> Result<String, TransformError> {
        self(text)
    }
}

/// Runs `opencc -c <config>` with the text on stdin.
#[derive(Clone, Debug)]
pub struct OpenCcCommand {
    pub program: PathBuf,
    /// Conversion profile, e.g. `s2twp.json`.
    pub config: String,
}

impl OpenCcCommand {
    pub fn new(program: impl Into<PathBuf>, config: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            config: config.into(),
        }
    }
}

impl TextTransform for OpenCcCommand {
    fn transform(&self, text: &str) -> Result<String, TransformError> {
        let spawn_err = |source| TransformError::Spawn {
            program: self.program.clone(),
            source,
        };

        let mut child = Command::new(&self.program)
            .arg("-c")
            .arg(&self.config)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_err)?;

        // Feed stdin from a separate thread so a full stdout pipe cannot
        // block the write.
        let stdin = child.stdin.take();
        let output = std::thread::scope(|scope| {
            let writer = scope.spawn(move || match stdin {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            });
            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));
            written.and(output)
        })
        .map_err(spawn_err)?;

        if !output.status.success() {
            return Err(TransformError::Failed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Applies `transform` if present, falling back to `text` on any failure.
pub fn apply_transform(text: String, transform: Option<&dyn TextTransform>) -> String {
    let Some(transform) = transform else {
        return text;
    };

    match transform.transform(&text) {
        Ok(converted) => converted,
        Err(err) => {
            warn!(error = %err, "text transform failed, writing unconverted text");
            text
        }
    }
}

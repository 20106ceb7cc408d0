use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::{api::error, modules::upload::aspect_ratio::VideoDimensions};

/// Boundary to the external media binaries.
#[async_trait::async_trait]
pub trait MediaTool {
    /// Width and height of the first stream in the file.
    async fn probe(&self, path: &Path) -> Result<VideoDimensions, error::SystemError>;

    /// Copies the streams into `<path>.process` with the moov atom moved to the
    /// front and returns that path. The caller owns the new file.
    async fn remux_fast_start(&self, path: &Path) -> Result<PathBuf, error::SystemError>;
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
}

pub fn parse_probe_output(stdout: &[u8]) -> Result<VideoDimensions, error::SystemError> {
    let output: ProbeOutput = serde_json::from_slice(stdout)?;

    let stream = output
        .streams
        .first()
        .ok_or_else(|| error::SystemError::media_tool("no streams found in probe output"))?;

    Ok(VideoDimensions { width: stream.width, height: stream.height })
}

pub fn fast_start_path(path: &Path) -> PathBuf {
    let mut processed = path.as_os_str().to_owned();
    processed.push(".process");
    PathBuf::from(processed)
}

#[derive(Debug, Clone)]
pub struct Ffmpeg {
    ffmpeg_path: String,
    ffprobe_path: String,
}

impl Ffmpeg {
    pub fn new(ffmpeg_path: String, ffprobe_path: String) -> Self {
        Self { ffmpeg_path, ffprobe_path }
    }
}

#[async_trait::async_trait]
impl MediaTool for Ffmpeg {
    #[tracing::instrument(skip(self), fields(tool = %self.ffprobe_path))]
    async fn probe(&self, path: &Path) -> Result<VideoDimensions, error::SystemError> {
        let start = std::time::Instant::now();

        let output = Command::new(&self.ffprobe_path)
            .args(["-v", "error", "-print_format", "json", "-show_streams"])
            .arg(path)
            .output()
            .await
            .map_err(|e| error::SystemError::media_tool(format!("failed to run ffprobe: {e}")))?;

        if !output.status.success() {
            tracing::error!(
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr),
                "ffprobe failed"
            );
            return Err(error::SystemError::media_tool(format!(
                "ffprobe exited with {}",
                output.status
            )));
        }

        let dimensions = parse_probe_output(&output.stdout)?;

        tracing::debug!(
            width = dimensions.width,
            height = dimensions.height,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ffprobe finished"
        );
        Ok(dimensions)
    }

    #[tracing::instrument(skip(self), fields(tool = %self.ffmpeg_path))]
    async fn remux_fast_start(&self, path: &Path) -> Result<PathBuf, error::SystemError> {
        let start = std::time::Instant::now();
        let processed = fast_start_path(path);

        let output = Command::new(&self.ffmpeg_path)
            .arg("-i")
            .arg(path)
            .args(["-c", "copy", "-movflags", "faststart", "-f", "mp4", "-y"])
            .arg(&processed)
            .output()
            .await;

        let failure = match output {
            Ok(output) if output.status.success() => None,
            Ok(output) => {
                tracing::error!(
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr),
                    "ffmpeg failed"
                );
                Some(format!("ffmpeg exited with {}", output.status))
            }
            Err(e) => Some(format!("failed to run ffmpeg: {e}")),
        };

        if let Some(message) = failure {
            // ffmpeg may have left a partial file behind
            tokio::fs::remove_file(&processed).await.ok();
            return Err(error::SystemError::media_tool(message));
        }

        tracing::debug!(
            output = %processed.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "ffmpeg fast-start remux finished"
        );
        Ok(processed)
    }
}

//! Video download and metadata fetch using yt-dlp.

use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::command::ToolPaths;
use crate::error::{MediaError, MediaResult};

/// Existing files below this size are treated as partial downloads and
/// fetched again.
const MIN_VIDEO_FILE_SIZE: u64 = 1024 * 1024;

/// Metadata reported by yt-dlp for a video URL.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoMetadata {
    pub id: String,
    pub title: String,
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}

/// Check if a URL is a supported video platform.
pub fn is_supported_url(url: &str) -> bool {
    let supported_domains = ["youtube.com", "youtu.be", "vimeo.com", "twitch.tv"];
    supported_domains.iter().any(|domain| url.contains(domain))
}

/// Fetch video metadata without downloading.
pub async fn get_video_info(tools: &ToolPaths, url: &str) -> MediaResult<VideoMetadata> {
    let ytdlp = tools.require_ytdlp()?;

    debug!(url = %url, "Fetching video metadata");

    let output = Command::new(ytdlp)
        .args(["--dump-json", "--no-download", "--no-playlist", url])
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let error_msg = stderr.lines().last().unwrap_or("Unknown error");
        return Err(MediaError::download_failed(format!(
            "yt-dlp metadata fetch failed: {}",
            error_msg
        )));
    }

    let metadata: VideoMetadata = serde_json::from_slice(&output.stdout)?;
    Ok(metadata)
}

/// Download a video to `output_path`.
///
/// An existing file above the partial-download threshold is reused; smaller
/// files are removed and fetched again.
pub async fn download_video(
    tools: &ToolPaths,
    url: &str,
    output_path: impl AsRef<Path>,
) -> MediaResult<()> {
    let output_path = output_path.as_ref();
    let ytdlp = tools.require_ytdlp()?;

    if output_path.exists() {
        if let Ok(metadata) = output_path.metadata() {
            if metadata.len() > MIN_VIDEO_FILE_SIZE {
                info!("Using existing video file: {}", output_path.display());
                return Ok(());
            }
            warn!(
                "Existing file {} is too small ({} bytes), re-downloading",
                output_path.display(),
                metadata.len()
            );
            tokio::fs::remove_file(output_path).await?;
        }
    }

    info!(
        "Downloading video from {} to {}",
        url,
        output_path.display()
    );

    let output_path_str = output_path.to_string_lossy();
    let args = [
        "--no-playlist",
        "--concurrent-fragments",
        "1",
        "-f",
        "bestvideo[ext=mp4]+bestaudio[ext=m4a]/best[ext=mp4]/best",
        "-o",
        &output_path_str,
        url,
    ];

    let output = Command::new(ytdlp)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        debug!("yt-dlp stderr: {}", stderr);
        let error_msg = stderr.lines().last().unwrap_or("Unknown error");
        return Err(MediaError::download_failed(format!(
            "yt-dlp failed: {}",
            error_msg
        )));
    }

    if !output_path.exists() {
        return Err(MediaError::download_failed("Output file not created"));
    }

    let file_size = output_path.metadata()?.len();
    info!(
        output = %output_path.display(),
        size_mb = file_size as f64 / (1024.0 * 1024.0),
        "Downloaded video successfully"
    );

    Ok(())
}

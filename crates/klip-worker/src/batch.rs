//! Sequential clip batch processing.
//!
//! Clips are processed one at a time. Sequential processing bounds peak
//! encode load and lets each output land on disk as soon as it finishes. A
//! failed clip is recorded and its siblings continue; only a missing encoder
//! fails the batch up front.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use klip_media::{build_ass, CaptionStyle, ClipRenderer, MediaError, ToolPaths};
use klip_models::{ClipSpec, RenderResult, Transcript};

use crate::config::WorkerConfig;
use crate::error::WorkerResult;
use crate::logging::ClipLogger;

/// Runs clip batches against one source video.
pub struct BatchCoordinator {
    tools: ToolPaths,
    renderer: ClipRenderer,
    work_dir: PathBuf,
    output_dir: PathBuf,
    clip_pause: Duration,
    caption_style: CaptionStyle,
}

impl BatchCoordinator {
    pub fn new(tools: &ToolPaths, config: &WorkerConfig) -> Self {
        let renderer = ClipRenderer::new(tools, &config.work_dir)
            .with_timeout(config.encode_timeout.as_secs())
            .with_focus(config.focus_x);
        Self {
            tools: tools.clone(),
            renderer,
            work_dir: config.work_dir.clone(),
            output_dir: config.output_dir.clone(),
            clip_pause: config.clip_pause,
            caption_style: CaptionStyle::default(),
        }
    }

    /// Process every spec sequentially, in input order.
    ///
    /// Returns one [`RenderResult`] per spec, in the same order. Individual
    /// failures never stop the batch; a missing encoder does, before any
    /// clip is attempted.
    pub async fn process_all(
        &self,
        source: impl AsRef<Path>,
        specs: &[ClipSpec],
        transcript: &Transcript,
    ) -> WorkerResult<Vec<RenderResult>> {
        let source = source.as_ref();

        // Precondition, not a per-clip error
        if !self.tools.ffmpeg.exists() {
            return Err(MediaError::FfmpegNotFound.into());
        }

        tokio::fs::create_dir_all(&self.output_dir).await?;
        tokio::fs::create_dir_all(&self.work_dir).await?;

        info!(
            clips = specs.len(),
            source = %source.display(),
            "Starting clip batch"
        );

        let mut results = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let logger = ClipLogger::new(spec.id, "render");
            logger.log_start(&spec.title);

            let caption_path = self.caption_file(spec);
            let result = match self
                .process_clip(source, spec, transcript, &caption_path)
                .await
            {
                Ok(output) => {
                    logger.log_progress("Render complete");
                    RenderResult::ok(spec.id, output.to_string_lossy())
                }
                Err(e) => {
                    logger.log_error(&e.to_string());
                    RenderResult::failed(spec.id, e.to_string())
                }
            };
            results.push(result);

            // Caption track is per-clip scratch, removed win or lose
            tokio::fs::remove_file(&caption_path).await.ok();

            if i + 1 < specs.len() {
                tokio::time::sleep(self.clip_pause).await;
            }
        }

        let failed = results.iter().filter(|r| !r.is_ok()).count();
        info!(
            processed = results.len() - failed,
            failed = failed,
            "Clip batch finished"
        );
        Ok(results)
    }

    async fn process_clip(
        &self,
        source: &Path,
        spec: &ClipSpec,
        transcript: &Transcript,
        caption_path: &Path,
    ) -> WorkerResult<PathBuf> {
        // An empty transcript suppresses captions, it is not an error
        let captions = if transcript.is_empty() {
            None
        } else {
            let track = build_ass(
                &transcript.segments,
                spec.start_time,
                spec.end_time,
                &self.caption_style,
            );
            tokio::fs::write(caption_path, track).await?;
            Some(caption_path)
        };

        let output = self.output_dir.join(spec.output_filename());
        self.renderer
            .render(source, spec, captions, &output)
            .await?;
        Ok(output)
    }

    fn caption_file(&self, spec: &ClipSpec) -> PathBuf {
        self.work_dir
            .join(format!("{}_captions.ass", spec.id.simple()))
    }
}

//! Clip rendering.
//!
//! Two render shapes share one geometry computation:
//!
//! - simple: one encode that seeks, trims, crops and optionally burns
//!   captions;
//! - hook + main: the hook window and the main window are encoded to
//!   temporary files with identical framing, then joined with a 0.5s
//!   fade-to-black video transition and an audio cross-fade. Captions cover
//!   only the main window, never the hook.
//!
//! Any probe or encode failure aborts the clip being rendered; callers
//! decide whether sibling clips continue. A missing or zero-byte output is
//! a failure even when ffmpeg reported success.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use klip_models::{ClipSpec, EncodingConfig};

use crate::command::{FfmpegCommand, FfmpegRunner, ToolPaths};
use crate::error::{MediaError, MediaResult};
use crate::filters::{crop_scale_filter, crop_scale_subtitles_filter};
use crate::geometry::{compute_portrait_crop, CropGeometry};
use crate::probe::probe_video;

/// Cross-fade length between hook and main segments.
pub const CROSSFADE_DURATION_SECS: f64 = 0.5;

/// Shortest hook that can carry the cross-fade.
pub const MIN_HOOK_DURATION_SECS: f64 = 1.0;

/// Renders clip specifications against a local source file.
#[derive(Debug, Clone)]
pub struct ClipRenderer {
    tools: ToolPaths,
    runner: FfmpegRunner,
    encoding: EncodingConfig,
    /// Horizontal focus for the crop window, 0.0 = left, 1.0 = right
    focus_x: f64,
    /// Directory for intermediate hook/main segment files
    work_dir: PathBuf,
}

impl ClipRenderer {
    pub fn new(tools: &ToolPaths, work_dir: impl AsRef<Path>) -> Self {
        Self {
            tools: tools.clone(),
            runner: FfmpegRunner::new(tools),
            encoding: EncodingConfig::default(),
            focus_x: 0.5,
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    /// Set an encode timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.runner = self.runner.with_timeout(secs);
        self
    }

    /// Override the horizontal crop focus.
    pub fn with_focus(mut self, focus_x: f64) -> Self {
        self.focus_x = focus_x.clamp(0.0, 1.0);
        self
    }

    /// Render one clip to `output`. `caption_path` is an already-written
    /// subtitle file covering the main window, or None for no captions.
    pub async fn render(
        &self,
        source: impl AsRef<Path>,
        spec: &ClipSpec,
        caption_path: Option<&Path>,
        output: impl AsRef<Path>,
    ) -> MediaResult<()> {
        let source = source.as_ref();
        let output = output.as_ref();

        validate_spec(spec)?;

        let info = probe_video(&self.tools, source).await?;
        let crop = compute_portrait_crop(info.width, info.height, self.focus_x);
        debug!(
            width = info.width,
            height = info.height,
            ?crop,
            "Computed crop geometry"
        );

        if spec.has_hook() {
            self.render_with_hook(source, spec, &crop, caption_path, output)
                .await?;
        } else {
            self.render_simple(source, spec, &crop, caption_path, output)
                .await?;
        }

        verify_output(output)?;
        info!(clip_id = %spec.id, output = %output.display(), "Clip rendered");
        Ok(())
    }

    /// Single-encode shape: seek, trim, crop, optional caption burn.
    async fn render_simple(
        &self,
        source: &Path,
        spec: &ClipSpec,
        crop: &CropGeometry,
        caption_path: Option<&Path>,
        output: &Path,
    ) -> MediaResult<()> {
        let filter = match caption_path {
            Some(captions) => crop_scale_subtitles_filter(crop, captions),
            None => crop_scale_filter(crop),
        };

        let cmd = FfmpegCommand::new(source, output)
            .seek(spec.start_time)
            .duration(spec.duration())
            .video_filter(filter)
            .output_args(self.encoding.to_ffmpeg_args());

        self.runner.run(&cmd).await
    }

    /// Hook + main shape: two segment encodes, then a cross-fade join.
    ///
    /// Both segments use the crop computed once by the caller so framing is
    /// identical across the transition. Temporary segment files are removed
    /// after the join whether or not it succeeded.
    async fn render_with_hook(
        &self,
        source: &Path,
        spec: &ClipSpec,
        crop: &CropGeometry,
        caption_path: Option<&Path>,
        output: &Path,
    ) -> MediaResult<()> {
        // has_hook() guarantees both bounds are present
        let hook_start = spec.hook_start_time.unwrap_or(0.0);
        let hook_duration = spec.hook_duration().unwrap_or(0.0);

        let id = spec.id.simple();
        let hook_path = self.work_dir.join(format!("{}_hook.mp4", id));
        let main_path = self.work_dir.join(format!("{}_main.mp4", id));

        // Hook segment: crop only, never captioned
        let hook_cmd = FfmpegCommand::new(source, &hook_path)
            .seek(hook_start)
            .duration(hook_duration)
            .video_filter(crop_scale_filter(crop))
            .output_args(self.encoding.to_ffmpeg_args());

        // Main segment: crop plus captions when available
        let main_filter = match caption_path {
            Some(captions) => crop_scale_subtitles_filter(crop, captions),
            None => crop_scale_filter(crop),
        };
        let main_cmd = FfmpegCommand::new(source, &main_path)
            .seek(spec.start_time)
            .duration(spec.duration())
            .video_filter(main_filter)
            .output_args(self.encoding.to_ffmpeg_args());

        let result = async {
            self.runner.run(&hook_cmd).await?;
            verify_output(&hook_path)?;

            self.runner.run(&main_cmd).await?;
            verify_output(&main_path)?;

            let args =
                build_crossfade_args(&hook_path, &main_path, output, hook_duration, &self.encoding);
            self.runner.run_args(&args).await
        }
        .await;

        cleanup_temp(&hook_path).await;
        cleanup_temp(&main_path).await;

        result
    }
}

/// Reject specifications the renderer cannot express.
fn validate_spec(spec: &ClipSpec) -> MediaResult<()> {
    if spec.duration() <= 0.0 {
        return Err(MediaError::invalid_spec(format!(
            "Clip duration must be positive (start={}, end={})",
            spec.start_time, spec.end_time
        )));
    }
    if spec.has_hook() {
        let hook_duration = spec.hook_duration().unwrap_or(0.0);
        if hook_duration < MIN_HOOK_DURATION_SECS {
            return Err(MediaError::invalid_spec(format!(
                "Hook duration {:.2}s is too short for a {:.1}s cross-fade",
                hook_duration, CROSSFADE_DURATION_SECS
            )));
        }
    }
    Ok(())
}

/// Arguments for the hook/main join: fade-to-black on video, cross-fade on
/// audio, both over the same window ending at the hook's end.
fn build_crossfade_args(
    hook: &Path,
    main: &Path,
    output: &Path,
    hook_duration: f64,
    encoding: &EncodingConfig,
) -> Vec<String> {
    let offset = hook_duration - CROSSFADE_DURATION_SECS;
    let filter = format!(
        "[0:v][1:v]xfade=transition=fadeblack:duration={dur}:offset={offset:.3}[v];\
         [0:a][1:a]acrossfade=d={dur}[a]",
        dur = CROSSFADE_DURATION_SECS,
        offset = offset,
    );

    let mut args: Vec<String> = vec![
        "-y".into(),
        "-v".into(),
        "error".into(),
        "-i".into(),
        hook.to_string_lossy().into_owned(),
        "-i".into(),
        main.to_string_lossy().into_owned(),
        "-filter_complex".into(),
        filter,
        "-map".into(),
        "[v]".into(),
        "-map".into(),
        "[a]".into(),
    ];
    args.extend(encoding.to_ffmpeg_args());
    args.push(output.to_string_lossy().into_owned());
    args
}

/// The output must exist and be non-empty, regardless of what the encoder
/// claimed.
fn verify_output(path: &Path) -> MediaResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() > 0 => Ok(()),
        _ => Err(MediaError::EmptyOutput(path.to_path_buf())),
    }
}

/// Best-effort temp removal; failures are logged and swallowed.
async fn cleanup_temp(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if path.exists() {
            warn!(path = %path.display(), error = %e, "Failed to remove temp segment");
        }
    }
}

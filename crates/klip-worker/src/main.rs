//! Clip rendering worker binary.
//!
//! Usage: `klip-worker <video file or URL> <analysis text file> [subtitles.vtt]`
//!
//! Extracts clip specifications from the analysis text, renders each one
//! from the source video and records successes in the project store.

use anyhow::{bail, Context};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use klip_analysis::extract_clips;
use klip_media::{
    download_video, generate_thumbnail, get_video_info, is_supported_url, probe_video, ToolPaths,
};
use klip_models::{extract_video_url, Transcript};
use klip_store::{ClipInfo, ProjectStore};
use klip_worker::{
    load_vtt_transcript, BatchCoordinator, RecommendationClient, WorkerConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(env_filter)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        bail!("Usage: klip-worker <video file or URL> <analysis text file> [subtitles.vtt]");
    }
    let source_arg = &args[1];
    let analysis_path = &args[2];
    let vtt_path = args.get(3);

    let config = WorkerConfig::from_env();
    info!("Worker config: {:?}", config);
    tokio::fs::create_dir_all(&config.work_dir).await?;

    let tools = ToolPaths::resolve().context("External tools missing")?;

    let analysis_text = tokio::fs::read_to_string(analysis_path)
        .await
        .with_context(|| format!("Failed to read analysis file {}", analysis_path))?;

    // Resolve the source: local file, or download by URL
    let (source_path, source_video_id) = if is_supported_url(source_arg) {
        let metadata = get_video_info(&tools, source_arg)
            .await
            .context("Failed to fetch video info")?;
        let dest = config.work_dir.join(format!("{}.mp4", metadata.id));
        download_video(&tools, source_arg, &dest)
            .await
            .context("Download failed")?;
        (dest, metadata.id)
    } else {
        let path = PathBuf::from(source_arg);
        if !path.exists() {
            bail!("Source video not found: {}", path.display());
        }
        // Analysis documents usually name the source video; fall back to the
        // filename when they don't
        let id = extract_video_url(&analysis_text).unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "local".to_string())
        });
        (path, id)
    };

    let transcript = match vtt_path {
        Some(path) => load_vtt_transcript(path)
            .await
            .with_context(|| format!("Failed to load transcript {}", path))?,
        None => Transcript::default(),
    };
    if transcript.is_empty() {
        info!("No transcript available, clips will have no captions");
    }

    let mut specs = extract_clips(&analysis_text);
    if specs.is_empty() && !transcript.is_empty() {
        // No usable manual sections; ask the recommendation provider instead
        // when one is configured
        if let Ok(client) = RecommendationClient::from_env() {
            info!("No manual clip sections found, requesting recommendations");
            let source_info = probe_video(&tools, &source_path).await?;
            specs = client
                .recommend_clips(&transcript.full_text, source_info.duration)
                .await?;
        }
    }
    if specs.is_empty() {
        bail!("No valid clip sections found in analysis text");
    }
    info!(clips = specs.len(), "Extracted clip specifications");

    let store = ProjectStore::new(&config.store_path);
    let project = store.create_project(&source_video_id).await?;

    let coordinator = BatchCoordinator::new(&tools, &config);
    let results = coordinator
        .process_all(&source_path, &specs, &transcript)
        .await?;

    // Persist successes; failures stay in the batch report only
    let mut processed = 0usize;
    for (spec, result) in specs.iter().zip(&results) {
        let Some(output_path) = &result.output_path else {
            continue;
        };
        processed += 1;

        store
            .add_clip_to_project(
                &project.id,
                &spec.output_filename(),
                ClipInfo {
                    title: spec.title.clone(),
                    start_time: spec.start_time,
                    end_time: spec.end_time,
                    hook_text: spec.hook_text.clone(),
                    description: spec.description.clone(),
                    reason: spec.reason.clone(),
                    created_at: chrono::Utc::now(),
                },
            )
            .await?;

        let thumb_path = PathBuf::from(output_path).with_extension("jpg");
        if let Err(e) = generate_thumbnail(&tools, output_path, &thumb_path).await {
            warn!(clip_id = %spec.id, error = %e, "Thumbnail generation failed");
        }
    }

    let failed = results.len() - processed;
    info!(processed, failed, "Batch complete");
    for result in results.iter().filter(|r| !r.is_ok()) {
        warn!(
            clip_id = %result.clip_id,
            error = %result.error.as_deref().unwrap_or("unknown"),
            "Clip failed"
        );
    }

    if processed == 0 {
        bail!("All {} clips failed", failed);
    }
    Ok(())
}

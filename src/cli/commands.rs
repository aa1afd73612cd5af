//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::app::container::AppContainer;
use crate::app::export_interactor::{ExportMethod, ExportReport};
use crate::app::session::{EditorSession, SessionEvent};
use crate::cli::args::{CutArgs, InspectArgs, PlanArgs, ReplayArgs, SplitArgs};
use crate::domain::display::{ChunkRow, DisplayFrame};
use crate::domain::errors::DomainError;
use crate::domain::model::{Chunk, VideoSource};
use crate::utils::time::parse_time;

/// Forward queued session notifications to the container's notifier
fn flush(container: &dyn AppContainer, session: &mut EditorSession) {
    let notifier = container.notifier();
    for notification in session.drain_notifications() {
        notifier.notify(&notification);
    }
}

/// Probe `input` and load it into a fresh session
async fn open_session(container: &dyn AppContainer, input: &Path) -> Result<EditorSession> {
    let source = container
        .load_interactor()
        .load(input)
        .await
        .with_context(|| format!("Failed to open {}", input.display()))?;

    let mut session = EditorSession::default();
    let loaded = session.load_video(source);
    flush(container, &mut session);
    loaded?;
    Ok(session)
}

/// Execute the inspect command
pub async fn inspect(container: &dyn AppContainer, args: InspectArgs) -> Result<()> {
    info!("Starting inspect operation");
    let mut session = open_session(container, &args.input).await?;
    let frame = session.render();
    flush(container, &mut session);

    if args.json {
        let video = session.video().context("No video loaded")?;
        let json = serde_json::to_string_pretty(video)
            .context("Failed to serialize video information to JSON")?;
        println!("{}", json);
    } else if let Some(summary) = frame.summary {
        println!("Video Information");
        println!("=================");
        println!("File: {}", summary.file_name);
        println!("Duration: {}", summary.total_duration);
        println!("File Size: {}", summary.file_size);
        println!("Resolution: {}", summary.resolution);
    }
    Ok(())
}

/// Execute the plan command
pub async fn plan(container: &dyn AppContainer, args: PlanArgs) -> Result<()> {
    info!("Starting plan operation");
    let mut session = open_session(container, &args.input).await?;
    session.auto_split();
    flush(container, &mut session);

    let frame = session.render();
    if args.json {
        let json = serde_json::to_string_pretty(&frame.chunks)
            .context("Failed to serialize chunk plan to JSON")?;
        println!("{}", json);
    } else {
        display_chunks(&frame.chunks);
    }
    Ok(())
}

/// Execute the cut command
pub async fn cut(container: &dyn AppContainer, args: CutArgs) -> Result<()> {
    info!("Starting cut operation: {} - {}", args.start, args.end);
    let mut session = open_session(container, &args.input).await?;

    // Move the end first when the new start would pass the current end.
    let selected = if parse_time(&args.start) < session.selection().end() {
        session
            .set_start_text(&args.start)
            .and_then(|_| session.set_end_text(&args.end))
    } else {
        session
            .set_end_text(&args.end)
            .and_then(|_| session.set_start_text(&args.start))
    };
    let committed = selected.and_then(|_| session.add_chunk());
    flush(container, &mut session);
    let id = committed.with_context(|| format!("Cannot cut {} - {}", args.start, args.end))?;

    let chunk = session
        .chunks()
        .get(id)
        .cloned()
        .ok_or_else(|| DomainError::NotFound(format!("Chunk {} does not exist", id)))?;
    let video = session.video().context("No video loaded")?;

    let report = container
        .export_interactor()
        .export_chunk(video, &chunk)
        .await
        .context("Export failed")?;
    print_report(&report);
    Ok(())
}

/// Execute the split command
pub async fn split(container: &dyn AppContainer, args: SplitArgs, default_jobs: usize) -> Result<()> {
    let jobs = args.jobs.unwrap_or(default_jobs);
    info!("Starting split operation with {} jobs", jobs);

    let mut session = open_session(container, &args.input).await?;
    session.auto_split();
    flush(container, &mut session);

    let chunks = session.chunks().chunks().to_vec();
    let video = session.video().context("No video loaded")?;
    export_chunks(container, video, &chunks, jobs).await
}

/// Execute the replay command
pub async fn replay(container: &dyn AppContainer, args: ReplayArgs, jobs: usize) -> Result<()> {
    let script = std::fs::read_to_string(&args.events)
        .with_context(|| format!("Failed to read {}", args.events.display()))?;
    let events: Vec<SessionEvent> = serde_json::from_str(&script)
        .with_context(|| format!("Invalid event script {}", args.events.display()))?;
    info!("Replaying {} events", events.len());

    let mut session = open_session(container, &args.input).await?;
    let mut rejected = 0;
    for (index, event) in events.iter().enumerate() {
        if let Err(e) = session.apply(event) {
            warn!("Event {} ({:?}) rejected: {}", index + 1, event, e);
            rejected += 1;
        }
    }
    flush(container, &mut session);
    if rejected > 0 {
        info!("{} of {} events were rejected", rejected, events.len());
    }

    let frame = session.render();
    if args.json {
        let json = serde_json::to_string_pretty(&frame)
            .context("Failed to serialize display frame to JSON")?;
        println!("{}", json);
    } else {
        display_frame(&frame);
    }

    if args.export {
        let chunks = session.chunks().chunks().to_vec();
        let video = session.video().context("No video loaded")?;
        export_chunks(container, video, &chunks, jobs).await?;
    }
    Ok(())
}

async fn export_chunks(
    container: &dyn AppContainer,
    video: &VideoSource,
    chunks: &[Chunk],
    jobs: usize,
) -> Result<()> {
    if chunks.is_empty() {
        warn!("No chunks to export");
        return Ok(());
    }

    let results = container
        .export_interactor()
        .export_all(video, chunks, jobs)
        .await;

    let mut failed = 0;
    for (chunk, result) in chunks.iter().zip(results) {
        match result {
            Ok(report) => print_report(&report),
            Err(e) => {
                eprintln!("Chunk {} failed: {}", chunk.id(), e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} chunks could not be exported", failed, chunks.len());
    }
    Ok(())
}

fn print_report(report: &ExportReport) {
    let how = match report.method {
        ExportMethod::Transcoded => "mp4",
        ExportMethod::OriginalFallback => "original file",
    };
    println!("{} -> {} ({})", report.chunk_id, report.location.display(), how);
}

fn display_chunks(rows: &[ChunkRow]) {
    if rows.is_empty() {
        println!("No chunks");
        return;
    }
    for row in rows {
        let marker = if row.selected { "*" } else { " " };
        println!(
            "{} {:<9} {} - {}  ({})",
            marker, row.title, row.start, row.end, row.duration
        );
    }
}

/// Display a frame in human-readable format
fn display_frame(frame: &DisplayFrame) {
    if let Some(summary) = &frame.summary {
        println!(
            "{}  {}  {}  {}",
            summary.file_name, summary.total_duration, summary.file_size, summary.resolution
        );
    }
    println!(
        "Selection: {} - {} ({}) {}",
        frame.labels.start, frame.labels.end, frame.labels.duration, frame.labels.glyph
    );
    println!();
    display_chunks(&frame.chunks);
}

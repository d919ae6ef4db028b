//! ScrollForge demo host
//!
//! Builds a small portfolio feed, wires it to a simulated viewport, and
//! plays a scripted tour through it: carousel interaction on the
//! landing section, likes, a comment, a share, keyboard and swipe
//! navigation, free scrolling that snaps, and audio toggling. Every
//! effect the engine emits is written through the logger, so run with
//! `RUST_LOG=info` (or `debug` for the arbitration internals).

mod sim;
mod store;

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use sf_core::{AudioTrack, CardDef, CardKind, PlaybackError, SectionDef, SectionKind};
use sf_engine::{FeedConfig, FeedEffect, FeedHandle, FeedProcessor, NavKey, create_feed_controller};
use sf_social::{KvStore, MemoryStore, ShareError, SharePayload, SharePlatform, format_count};

use crate::sim::{SimViewport, ViewportEvent};
use crate::store::JsonFileStore;

#[derive(Parser)]
#[command(name = "scrollforge", about = "Scroll-driven portfolio feed demo")]
struct Cli {
    /// Viewport height in pixels for the simulated feed
    #[arg(long, default_value_t = 900.0)]
    viewport: f32,

    /// JSON file overriding the default feed configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Persist engagement state to this JSON file instead of the
    /// platform data directory
    #[arg(long)]
    state: Option<PathBuf>,

    /// Keep engagement state in memory only
    #[arg(long)]
    ephemeral: bool,

    /// Pretend the platform has no native share sheet
    #[arg(long)]
    no_native_share: bool,

    /// Simulated milliseconds per loop step
    #[arg(long, default_value_t = 50)]
    step_ms: u64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = load_config(cli.config.as_deref())?;
    config.viewport_height_px = cli.viewport;

    let store: Box<dyn KvStore> = if cli.ephemeral {
        Box::new(MemoryStore::new())
    } else {
        let path = state_path(cli.state.clone());
        log::info!("engagement state at {}", path.display());
        Box::new(JsonFileStore::open(path))
    };
    let share = Box::new(ConsoleShare {
        native: !cli.no_native_share,
    });

    let (handle, mut processor) =
        create_feed_controller(config, portfolio(), cards(), store, share);
    let mut viewport = SimViewport::new(cli.viewport, handle.section_count());

    run_tour(&handle, &mut processor, &mut viewport, cli.step_ms);

    log::info!(
        "demo complete: section {}, card {}",
        handle.current_section(),
        handle.carousel_index()
    );
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<FeedConfig> {
    let Some(path) = path else {
        return Ok(FeedConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
}

fn state_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit.unwrap_or_else(|| {
        dirs_next::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("scrollforge")
            .join("state.json")
    })
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEED CONTENT
// ═══════════════════════════════════════════════════════════════════════════════

/// The demo portfolio: six full-viewport sections, each with its own
/// background theme.
fn portfolio() -> Vec<SectionDef> {
    let entries = [
        ("intro", "Home", SectionKind::Intro),
        ("about", "About Me", SectionKind::About),
        ("ar-lab", "AR Lab", SectionKind::ArLab),
        ("branding", "Brand Systems", SectionKind::Branding),
        ("story", "Story Worlds", SectionKind::Storytelling),
        ("culture", "Culture Bridge", SectionKind::Culture),
    ];
    entries
        .into_iter()
        .map(|(slug, title, kind)| {
            SectionDef::new(slug, title, kind)
                .with_link(format!("https://driftline.studio/{slug}"))
                .with_track(Box::new(ConsoleTrack::new(format!("{slug}-theme"))))
        })
        .collect()
}

fn cards() -> Vec<CardDef> {
    vec![
        CardDef::new("journey", CardKind::Journey),
        CardDef::new("skills", CardKind::Skills),
        CardDef::new("global", CardKind::GlobalReach),
        CardDef::new("about", CardKind::About),
    ]
}

// ═══════════════════════════════════════════════════════════════════════════════
// HOST COLLABORATORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Audio handle that narrates playback through the logger.
struct ConsoleTrack {
    label: String,
    paused: bool,
    volume: f32,
}

impl ConsoleTrack {
    fn new(label: String) -> Self {
        Self {
            label,
            paused: true,
            volume: 1.0,
        }
    }
}

impl AudioTrack for ConsoleTrack {
    fn play(&mut self) -> Result<(), PlaybackError> {
        self.paused = false;
        log::info!("[audio] play {} at volume {:.1}", self.label, self.volume);
        Ok(())
    }

    fn pause(&mut self) {
        self.paused = true;
        log::info!("[audio] pause {}", self.label);
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }
}

/// Share sheet and clipboard that land in the log.
struct ConsoleShare {
    native: bool,
}

impl SharePlatform for ConsoleShare {
    fn share(&mut self, payload: &SharePayload) -> Result<(), ShareError> {
        if self.native {
            log::info!("[share] native sheet: {} -> {}", payload.title, payload.url);
            Ok(())
        } else {
            Err(ShareError::Unsupported)
        }
    }

    fn copy_to_clipboard(&mut self, text: &str) -> Result<(), ShareError> {
        log::info!("[share] clipboard: {text}");
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SCRIPTED TOUR
// ═══════════════════════════════════════════════════════════════════════════════

enum Action {
    Key(NavKey),
    CarouselSelect(usize),
    CarouselHoverStart,
    CarouselHoverEnd,
    CarouselDrag { from: f32, to: f32 },
    FeedSwipe { from: f32, to: f32 },
    Wheel { sections: f32 },
    OpenComments,
    PostComment(&'static str),
    Share,
    SectionTap,
}

/// The tour, timed relative to the moment loading finishes.
fn tour() -> Vec<(u64, Action)> {
    vec![
        (400, Action::CarouselSelect(1)),
        (900, Action::CarouselHoverStart),
        (1600, Action::CarouselHoverEnd),
        (2100, Action::CarouselDrag { from: 420.0, to: 180.0 }),
        (2700, Action::Key(NavKey::Like)),
        (3100, Action::OpenComments),
        (3400, Action::PostComment("The carousel feel is spot on.")),
        (3900, Action::Share),
        (4400, Action::Key(NavKey::ArrowDown)),
        (5600, Action::FeedSwipe { from: 760.0, to: 620.0 }),
        (6900, Action::Wheel { sections: 2.4 }),
        (8200, Action::Key(NavKey::Music)),
        (8700, Action::Key(NavKey::Music)),
        (9200, Action::Key(NavKey::ArrowUp)),
        (10_000, Action::SectionTap),
    ]
}

fn apply(action: Action, handle: &FeedHandle, viewport: &mut SimViewport) {
    match action {
        Action::Key(key) => handle.key(key),
        Action::CarouselSelect(index) => handle.carousel_select(index),
        Action::CarouselHoverStart => handle.carousel_hover_start(),
        Action::CarouselHoverEnd => handle.carousel_hover_end(),
        Action::CarouselDrag { from, to } => {
            handle.carousel_pointer_down(from);
            handle.carousel_pointer_up(to);
        }
        Action::FeedSwipe { from, to } => {
            handle.touch_start(from);
            handle.touch_end(to);
        }
        Action::Wheel { sections } => viewport.wheel_by_sections(sections),
        Action::OpenComments => handle.open_comments(handle.current_section()),
        Action::PostComment(text) => handle.post_comment(handle.current_section(), text),
        Action::Share => handle.share(handle.current_section()),
        Action::SectionTap => handle.section_tap(handle.current_section()),
    }
}

fn run_tour(
    handle: &FeedHandle,
    processor: &mut FeedProcessor,
    viewport: &mut SimViewport,
    step_ms: u64,
) {
    let mut script: VecDeque<(u64, Action)> = tour().into();
    let mut ready_at: Option<u64> = None;
    let mut now = 0;

    loop {
        now += step_ms.max(1);

        for effect in processor.process(now) {
            if let FeedEffect::ScrollToSection { index } = effect {
                viewport.glide_to(index, now);
            }
            report(&effect);
        }

        for event in viewport.tick(now) {
            match event {
                ViewportEvent::Scrolled(offset_px) => handle.scrolled(offset_px),
                ViewportEvent::SectionVisible(index) => handle.section_visible(index, true),
            }
        }

        if ready_at.is_none() && handle.is_ready() {
            ready_at = Some(now);
            log::info!("tour starting");
        }

        if let Some(start) = ready_at {
            while script.front().is_some_and(|(at, _)| start + at <= now) {
                if let Some((_, action)) = script.pop_front() {
                    apply(action, handle, viewport);
                }
            }
            // Let the last interactions and timers play out, then stop.
            if script.is_empty() && now >= start + 13_000 {
                break;
            }
        }

        if now > 120_000 {
            log::warn!("tour never finished, giving up");
            break;
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// EFFECT REPORTING
// ═══════════════════════════════════════════════════════════════════════════════

fn report(effect: &FeedEffect) {
    match effect {
        FeedEffect::LoadingProgress { percent } => log::debug!("[loading] {percent}%"),
        FeedEffect::LoadingMessage { text } => log::info!("[loading] {text}"),
        FeedEffect::LoadingStatus { icon, text } => log::debug!("[loading] ({icon}) {text}"),
        FeedEffect::LoadingFinished => log::info!("[loading] overlay removed"),
        FeedEffect::SectionActivated { index, kind } => {
            log::info!("[feed] section {index} active ({kind:?})");
        }
        FeedEffect::SectionAnimation { index, kind } => {
            log::debug!("[feed] entrance animation for section {index} ({kind:?})");
        }
        FeedEffect::ScrollToSection { index } => {
            log::info!("[feed] smooth scroll to section {index}");
        }
        FeedEffect::ScrollProgress { percent } => {
            log::trace!("[feed] scroll progress {percent:.1}%");
        }
        FeedEffect::CarouselChanged { active, prev, next } => {
            log::info!("[carousel] active {active} (prev {prev}, next {next})");
        }
        FeedEffect::CardAnimation { index, kind } => {
            log::debug!("[carousel] animation for card {index} ({kind:?})");
        }
        FeedEffect::HeartBurst { index } => log::info!("[social] hearts over section {index}"),
        FeedEffect::Haptic { duration_ms } => log::debug!("[social] haptic {duration_ms}ms"),
        FeedEffect::LikeUpdated { index, count, liked } => {
            let state = if *liked { "liked" } else { "not liked" };
            log::info!("[social] section {index}: {} likes ({state})", format_count(*count));
        }
        FeedEffect::CommentsOpened { index, comments } => {
            log::info!("[social] comments open on section {index}:");
            for comment in comments {
                log::info!("[social]   {}: {}", comment.author, comment.text);
            }
        }
        FeedEffect::CommentCount { index, count } => {
            log::info!("[social] section {index}: {} comments", format_count(*count));
        }
        FeedEffect::ShareCount { index, count } => {
            log::info!("[social] section {index}: {} shares", format_count(*count));
        }
        FeedEffect::Toast { message } => log::info!("[toast] {message}"),
    }
}

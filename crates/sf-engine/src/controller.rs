//! Feed controller
//!
//! Handle/processor pair around a lock-free command queue. The handle
//! is what host callbacks talk to; the processor owns every state
//! machine and runs them inside `process(now_ms)`.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rtrb::{Consumer, Producer, RingBuffer};

use sf_carousel::{Carousel, CarouselChange};
use sf_core::{CardDef, CardKind, SectionDef, SectionId};
use sf_feed::{AudioArbiter, SectionTracker};
use sf_social::{
    KvStore, SharePayload, SharePlatform, ShareOutcome, comments, likes, share_with_fallback,
};

use crate::command::{FeedCommand, NavKey};
use crate::config::FeedConfig;
use crate::effect::FeedEffect;
use crate::loading::{LoadingPhase, LoadingUpdate};

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED STATE (thread-safe)
// ═══════════════════════════════════════════════════════════════════════════════

/// Command queue capacity. Host callbacks beyond this in one frame are
/// dropped, matching the fire-and-forget contract.
const COMMAND_QUEUE_CAPACITY: usize = 1024;

/// State shared between handle and processor.
struct FeedShared {
    /// Command producer, protected for multi-threaded handle use.
    commands: Mutex<Producer<FeedCommand>>,
    /// Current section index, updated by the processor after each pass.
    current_section: AtomicUsize,
    /// Current carousel card index, likewise.
    carousel_index: AtomicUsize,
    /// Loading finished, machines live.
    ready: AtomicBool,
    section_count: usize,
    card_count: usize,
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEED HANDLE (thread-safe, for host callbacks)
// ═══════════════════════════════════════════════════════════════════════════════

/// Thread-safe handle for pushing UI events and reading cheap state.
///
/// Clonable; every clone feeds the same processor.
#[derive(Clone)]
pub struct FeedHandle {
    shared: Arc<FeedShared>,
}

impl FeedHandle {
    fn push(&self, command: FeedCommand) {
        let _ = self.shared.commands.lock().push(command);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // EVENT PUSHING (called from any thread)
    // ═══════════════════════════════════════════════════════════════════════

    /// A section crossed the 50% visibility threshold.
    pub fn section_visible(&self, index: usize, visible: bool) {
        self.push(FeedCommand::SectionVisible { index, visible });
    }

    /// Raw scroll offset of the feed viewport.
    pub fn scrolled(&self, offset_px: f32) {
        self.push(FeedCommand::Scroll { offset_px });
    }

    /// Vertical touch pressed.
    pub fn touch_start(&self, y_px: f32) {
        self.push(FeedCommand::TouchStart { y_px });
    }

    /// Vertical touch released.
    pub fn touch_end(&self, y_px: f32) {
        self.push(FeedCommand::TouchEnd { y_px });
    }

    /// Keyboard shortcut.
    pub fn key(&self, key: NavKey) {
        self.push(FeedCommand::Key(key));
    }

    /// Tap on a section's body (audio toggle).
    pub fn section_tap(&self, index: usize) {
        self.push(FeedCommand::SectionTap { index });
    }

    /// Like button on a section.
    pub fn like(&self, index: usize) {
        self.push(FeedCommand::Like { index });
    }

    /// Open a section's comment panel.
    pub fn open_comments(&self, index: usize) {
        self.push(FeedCommand::OpenComments { index });
    }

    /// Submit a comment on a section.
    pub fn post_comment(&self, index: usize, text: impl Into<String>) {
        self.push(FeedCommand::PostComment {
            index,
            text: text.into(),
        });
    }

    /// Share button on a section.
    pub fn share(&self, index: usize) {
        self.push(FeedCommand::Share { index });
    }

    /// Carousel nav dot.
    pub fn carousel_select(&self, index: usize) {
        self.push(FeedCommand::CarouselSelect { index });
    }

    /// Pointer entered the carousel's host section.
    pub fn carousel_hover_start(&self) {
        self.push(FeedCommand::CarouselHoverStart);
    }

    /// Pointer left the carousel's host section.
    pub fn carousel_hover_end(&self) {
        self.push(FeedCommand::CarouselHoverEnd);
    }

    /// Horizontal touch pressed on the carousel.
    pub fn carousel_touch_start(&self, x_px: f32) {
        self.push(FeedCommand::CarouselTouchStart { x_px });
    }

    /// Horizontal touch released on the carousel.
    pub fn carousel_touch_end(&self, x_px: f32) {
        self.push(FeedCommand::CarouselTouchEnd { x_px });
    }

    /// Mouse drag started on the carousel.
    pub fn carousel_pointer_down(&self, x_px: f32) {
        self.push(FeedCommand::CarouselPointerDown { x_px });
    }

    /// Mouse drag released on the carousel.
    pub fn carousel_pointer_up(&self, x_px: f32) {
        self.push(FeedCommand::CarouselPointerUp { x_px });
    }

    /// Mouse left the carousel mid-drag.
    pub fn carousel_pointer_leave(&self) {
        self.push(FeedCommand::CarouselPointerLeave);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // QUERIES (thread-safe reads)
    // ═══════════════════════════════════════════════════════════════════════

    /// Current section index (approximate; updated per processor pass).
    pub fn current_section(&self) -> usize {
        self.shared.current_section.load(Ordering::Relaxed)
    }

    /// Current carousel card index.
    pub fn carousel_index(&self) -> usize {
        self.shared.carousel_index.load(Ordering::Relaxed)
    }

    /// Whether the loading phase has completed.
    pub fn is_ready(&self) -> bool {
        self.shared.ready.load(Ordering::Relaxed)
    }

    pub fn section_count(&self) -> usize {
        self.shared.section_count
    }

    pub fn card_count(&self) -> usize {
        self.shared.card_count
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FEED PROCESSOR (single-owner)
// ═══════════════════════════════════════════════════════════════════════════════

enum Phase {
    /// Nothing has run yet; the first `process` call starts loading.
    Boot,
    Loading(LoadingPhase),
    Ready,
}

/// Single-owner processor for the whole feed.
///
/// Drives the section tracker, audio arbiter, carousel, loading phase,
/// and engagement widgets. Call [`FeedProcessor::process`] from one
/// place with a monotonic millisecond clock and apply the returned
/// effects in order.
pub struct FeedProcessor {
    shared: Arc<FeedShared>,
    commands: Consumer<FeedCommand>,
    config: FeedConfig,
    phase: Phase,
    rng: ChaCha8Rng,
    sections: Vec<SectionDef>,
    tracker: SectionTracker,
    arbiter: AudioArbiter,
    carousel: Carousel,
    store: Box<dyn KvStore>,
    share: Box<dyn SharePlatform>,
    /// Per-session share tallies, one per section.
    share_counts: Vec<u32>,
}

impl FeedProcessor {
    /// Run one pass: drain commands, advance every timer, return the
    /// effects the host must apply.
    pub fn process(&mut self, now_ms: u64) -> Vec<FeedEffect> {
        let mut effects = Vec::new();

        if matches!(self.phase, Phase::Ready) {
            while let Ok(command) = self.commands.pop() {
                self.handle_command(now_ms, command, &mut effects);
            }
            self.poll_timers(now_ms, &mut effects);
        } else {
            self.process_loading(now_ms, &mut effects);
        }

        self.shared
            .current_section
            .store(self.tracker.current(), Ordering::Relaxed);
        self.shared
            .carousel_index
            .store(self.carousel.index(), Ordering::Relaxed);

        effects
    }

    /// Number of tracks currently playing. Diagnostic; the arbiter
    /// keeps this at most 1.
    pub fn playing_track_count(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.track.as_deref().is_some_and(|t| !t.is_paused()))
            .count()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LOADING
    // ═══════════════════════════════════════════════════════════════════════

    fn process_loading(&mut self, now_ms: u64, effects: &mut Vec<FeedEffect>) {
        if matches!(self.phase, Phase::Boot) {
            self.phase = Phase::Loading(LoadingPhase::new(now_ms));
            log::info!("loading phase started");
        }

        let mut finished = false;
        if let Phase::Loading(loading) = &mut self.phase {
            for update in loading.poll(now_ms, &mut self.rng) {
                effects.push(match update {
                    LoadingUpdate::Progress(percent) => FeedEffect::LoadingProgress { percent },
                    LoadingUpdate::Message(text) => FeedEffect::LoadingMessage { text },
                    LoadingUpdate::Status { icon, text } => {
                        FeedEffect::LoadingStatus { icon, text }
                    }
                    LoadingUpdate::Finished => FeedEffect::LoadingFinished,
                });
            }
            finished = loading.is_done();
        }

        // The machines do not exist yet; input arriving now is dropped,
        // not queued.
        while let Ok(command) = self.commands.pop() {
            log::trace!("dropping command during loading: {command:?}");
        }

        if finished {
            self.enter_ready(now_ms, effects);
        }
    }

    fn enter_ready(&mut self, now_ms: u64, effects: &mut Vec<FeedEffect>) {
        self.phase = Phase::Ready;
        self.shared.ready.store(true, Ordering::Relaxed);
        log::info!(
            "feed ready: {} sections, {} cards",
            self.sections.len(),
            self.carousel.len()
        );

        if !self.sections.is_empty() {
            self.activate_section(0, effects);
        }

        self.carousel.start(now_ms);
        if !self.carousel.is_empty() {
            let view = self.carousel.view();
            effects.push(FeedEffect::CarouselChanged {
                active: view.active,
                prev: view.prev,
                next: view.next,
            });
        }

        // Replay persisted engagement state so counters render correctly.
        for index in 0..self.sections.len() {
            let slug = self.sections[index].slug.clone();
            if let Some(record) = likes::load(self.store.as_ref(), &slug) {
                effects.push(FeedEffect::LikeUpdated {
                    index,
                    count: record.count,
                    liked: record.liked,
                });
            }
            effects.push(FeedEffect::CommentCount {
                index,
                count: comments::count(self.store.as_ref(), &slug),
            });
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // COMMAND HANDLING
    // ═══════════════════════════════════════════════════════════════════════

    fn handle_command(&mut self, now_ms: u64, command: FeedCommand, effects: &mut Vec<FeedEffect>) {
        match command {
            FeedCommand::SectionVisible { index, visible } => {
                if !visible {
                    return;
                }
                if index >= self.sections.len() {
                    log::warn!("visibility event for unknown section {index}");
                    return;
                }
                self.activate_section(index, effects);
            }
            FeedCommand::Scroll { offset_px } => {
                self.tracker.note_scroll(offset_px, now_ms);
                effects.push(FeedEffect::ScrollProgress {
                    percent: self.tracker.scroll_progress(),
                });
            }
            FeedCommand::TouchStart { y_px } => self.tracker.touch_start(y_px),
            FeedCommand::TouchEnd { y_px } => {
                if let Some(target) = self.tracker.touch_end(y_px, now_ms) {
                    effects.push(FeedEffect::ScrollToSection { index: target });
                }
            }
            FeedCommand::Key(key) => self.handle_key(now_ms, key, effects),
            FeedCommand::SectionTap { index } => {
                if index < self.sections.len() {
                    self.arbiter.toggle(SectionId(index), &mut self.sections);
                }
            }
            FeedCommand::Like { index } => {
                if index < self.sections.len() {
                    self.toggle_like(index, effects);
                }
            }
            FeedCommand::OpenComments { index } => {
                if index < self.sections.len() {
                    self.open_comments(index, effects);
                }
            }
            FeedCommand::PostComment { index, text } => {
                if index < self.sections.len() {
                    self.post_comment(index, &text, now_ms, effects);
                }
            }
            FeedCommand::Share { index } => {
                if index < self.sections.len() {
                    self.share_section(index, effects);
                }
            }
            FeedCommand::CarouselSelect { index } => {
                let change = self.carousel.select(index, now_ms);
                self.push_carousel(change, effects);
            }
            FeedCommand::CarouselHoverStart => self.carousel.hover_start(),
            FeedCommand::CarouselHoverEnd => self.carousel.hover_end(now_ms),
            FeedCommand::CarouselTouchStart { x_px } => self.carousel.touch_start(x_px),
            FeedCommand::CarouselTouchEnd { x_px } => {
                let change = self.carousel.touch_end(x_px, now_ms);
                self.push_carousel(change, effects);
            }
            FeedCommand::CarouselPointerDown { x_px } => self.carousel.pointer_down(x_px),
            FeedCommand::CarouselPointerUp { x_px } => {
                let change = self.carousel.pointer_up(x_px, now_ms);
                self.push_carousel(change, effects);
            }
            FeedCommand::CarouselPointerLeave => self.carousel.pointer_cancel(),
        }
    }

    fn handle_key(&mut self, now_ms: u64, key: NavKey, effects: &mut Vec<FeedEffect>) {
        match key {
            NavKey::ArrowDown | NavKey::Space => {
                if let Some(target) = self.tracker.advance(now_ms) {
                    effects.push(FeedEffect::ScrollToSection { index: target });
                }
            }
            NavKey::ArrowUp => {
                if let Some(target) = self.tracker.retreat(now_ms) {
                    effects.push(FeedEffect::ScrollToSection { index: target });
                }
            }
            NavKey::Like => {
                let current = self.tracker.current();
                if current < self.sections.len() {
                    self.toggle_like(current, effects);
                }
            }
            NavKey::Comment => {
                let current = self.tracker.current();
                if current < self.sections.len() {
                    self.open_comments(current, effects);
                }
            }
            NavKey::Music => {
                let current = self.tracker.current();
                if current < self.sections.len() {
                    self.arbiter.toggle(SectionId(current), &mut self.sections);
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // SECTION ACTIVATION
    // ═══════════════════════════════════════════════════════════════════════

    fn activate_section(&mut self, index: usize, effects: &mut Vec<FeedEffect>) {
        self.tracker.observe_visible(index);
        let kind = self.sections[index].kind;
        effects.push(FeedEffect::SectionActivated { index, kind });
        effects.push(FeedEffect::SectionAnimation { index, kind });
        self.arbiter.activate(SectionId(index), &mut self.sections);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // ENGAGEMENT
    // ═══════════════════════════════════════════════════════════════════════

    fn toggle_like(&mut self, index: usize, effects: &mut Vec<FeedEffect>) {
        let slug = self.sections[index].slug.clone();
        let record = likes::toggle(self.store.as_mut(), &slug);
        if record.liked {
            effects.push(FeedEffect::HeartBurst { index });
            effects.push(FeedEffect::Haptic {
                duration_ms: self.config.haptic_pulse_ms,
            });
        }
        effects.push(FeedEffect::LikeUpdated {
            index,
            count: record.count,
            liked: record.liked,
        });
    }

    fn open_comments(&mut self, index: usize, effects: &mut Vec<FeedEffect>) {
        let slug = &self.sections[index].slug;
        effects.push(FeedEffect::CommentsOpened {
            index,
            comments: comments::load(self.store.as_ref(), slug),
        });
    }

    fn post_comment(&mut self, index: usize, text: &str, now_ms: u64, effects: &mut Vec<FeedEffect>) {
        let slug = self.sections[index].slug.clone();
        let Some(thread) = comments::post(
            self.store.as_mut(),
            &slug,
            &self.config.profile_handle,
            text,
            now_ms,
        ) else {
            return;
        };
        effects.push(FeedEffect::CommentCount {
            index,
            count: thread.len() as u32,
        });
        effects.push(FeedEffect::Toast {
            message: "Comment posted".to_string(),
        });
    }

    fn share_section(&mut self, index: usize, effects: &mut Vec<FeedEffect>) {
        self.share_counts[index] = self.share_counts[index].saturating_add(1);
        effects.push(FeedEffect::ShareCount {
            index,
            count: self.share_counts[index],
        });

        let section = &self.sections[index];
        let payload = SharePayload {
            title: format!("Check out {}", section.title),
            text: format!("A project by {}", self.config.profile_handle),
            url: section
                .link
                .clone()
                .unwrap_or_else(|| self.config.canonical_url.clone()),
        };
        let message = match share_with_fallback(self.share.as_mut(), &payload) {
            ShareOutcome::Shared => "Shared successfully".to_string(),
            ShareOutcome::LinkCopied => "Link copied to clipboard".to_string(),
            ShareOutcome::LinkShown(url) => format!("Share this link: {url}"),
        };
        effects.push(FeedEffect::Toast { message });
    }

    // ═══════════════════════════════════════════════════════════════════════
    // TIMERS
    // ═══════════════════════════════════════════════════════════════════════

    fn poll_timers(&mut self, now_ms: u64, effects: &mut Vec<FeedEffect>) {
        if let Some(target) = self.tracker.poll(now_ms) {
            effects.push(FeedEffect::ScrollToSection { index: target });
        }
        let change = self.carousel.poll(now_ms);
        self.push_carousel(change, effects);
    }

    fn push_carousel(&mut self, change: Option<CarouselChange>, effects: &mut Vec<FeedEffect>) {
        let Some(change) = change else { return };
        effects.push(FeedEffect::CarouselChanged {
            active: change.view.active,
            prev: change.view.prev,
            next: change.view.next,
        });
        // Exactly one animation routine per kind; Plain cards run none.
        match change.card {
            CardKind::Plain => {}
            kind => effects.push(FeedEffect::CardAnimation {
                index: change.view.active,
                kind,
            }),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FACTORY FUNCTION
// ═══════════════════════════════════════════════════════════════════════════════

/// Create a feed controller.
///
/// Returns the thread-safe [`FeedHandle`] for host callbacks and the
/// single-owner [`FeedProcessor`] for the host's frame loop. The first
/// `process` call starts the loading phase; the machines go live when
/// it completes.
pub fn create_feed_controller(
    config: FeedConfig,
    sections: Vec<SectionDef>,
    cards: Vec<CardDef>,
    store: Box<dyn KvStore>,
    share: Box<dyn SharePlatform>,
) -> (FeedHandle, FeedProcessor) {
    let (command_tx, command_rx) = RingBuffer::new(COMMAND_QUEUE_CAPACITY);

    let shared = Arc::new(FeedShared {
        commands: Mutex::new(command_tx),
        current_section: AtomicUsize::new(0),
        carousel_index: AtomicUsize::new(0),
        ready: AtomicBool::new(false),
        section_count: sections.len(),
        card_count: cards.len(),
    });

    let tracker = SectionTracker::new(sections.len(), config.viewport_height_px)
        .with_timing(config.scroll_settle_ms, config.section_transition_ms);
    let carousel =
        Carousel::new(cards).with_timing(config.autoplay_interval_ms, config.autoplay_resume_ms);
    let arbiter = AudioArbiter::new(config.audio_volume);
    let share_counts = vec![0; sections.len()];
    let seed = rand::rng().random::<u64>();

    let handle = FeedHandle {
        shared: Arc::clone(&shared),
    };

    let processor = FeedProcessor {
        shared,
        commands: command_rx,
        config,
        phase: Phase::Boot,
        rng: ChaCha8Rng::seed_from_u64(seed),
        sections,
        tracker,
        arbiter,
        carousel,
        store,
        share,
        share_counts,
    };

    (handle, processor)
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

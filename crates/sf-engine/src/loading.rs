//! Loading phase choreography.
//!
//! The feed does not exist until the loading overlay has run its
//! course: progress creeps forward in random increments, a headline
//! message and a status line rotate on their own cadences, and once
//! progress hits 100% the final message holds briefly before the
//! overlay fades out.

use rand::Rng;

use sf_core::{
    LOADING_FADE_MS, LOADING_HOLD_MS, LOADING_MESSAGE_TICK_MS, LOADING_PROGRESS_TICK_MS,
    LOADING_STATUS_TICK_MS,
};

/// Rotating headline messages, in order.
const MESSAGES: [&str; 8] = [
    "Waking up the studio...",
    "Wiring interactive sections...",
    "Laying out the vertical feed...",
    "Hanging project galleries...",
    "Tuning background audio...",
    "Polishing visual effects...",
    "Smoothing the scroll...",
    "Almost there...",
];

/// Headline shown once progress completes.
const FINAL_MESSAGE: &str = "Welcome in. Enjoy the tour.";

/// Rotating status lines, in order. The icon is a short tag the host
/// maps to whatever glyph set it renders with.
const STATUSES: [(&str, &str); 7] = [
    ("boot", "Starting up..."),
    ("assets", "Loading assets..."),
    ("feed", "Preparing sections..."),
    ("audio", "Setting up audio..."),
    ("fx", "Adding motion..."),
    ("launch", "Launching experience..."),
    ("ready", "Ready to explore"),
];

/// Smallest random progress increment per tick, in percent.
const MIN_INCREMENT: f32 = 2.0;

/// Largest random progress increment per tick, in percent.
const MAX_INCREMENT: f32 = 10.0;

/// One observable change in the loading overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadingUpdate {
    Progress(u8),
    Message(&'static str),
    Status {
        icon: &'static str,
        text: &'static str,
    },
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    /// Progress still climbing.
    Filling,
    /// 100% reached, final message showing.
    Holding { until: u64 },
    /// Overlay fading out.
    Fading { until: u64 },
    Done,
}

/// Clock-driven loading overlay state.
#[derive(Debug, Clone)]
pub(crate) struct LoadingPhase {
    progress: f32,
    message_idx: usize,
    status_idx: usize,
    next_progress_at: u64,
    next_message_at: u64,
    next_status_at: u64,
    stage: Stage,
}

impl LoadingPhase {
    pub(crate) fn new(now_ms: u64) -> Self {
        Self {
            progress: 0.0,
            message_idx: 0,
            status_idx: 0,
            next_progress_at: now_ms + LOADING_PROGRESS_TICK_MS,
            next_message_at: now_ms + LOADING_MESSAGE_TICK_MS,
            next_status_at: now_ms + LOADING_STATUS_TICK_MS,
            stage: Stage::Filling,
        }
    }

    pub(crate) fn is_done(&self) -> bool {
        self.stage == Stage::Done
    }

    /// Advance all overlay timers to `now_ms`.
    pub(crate) fn poll(&mut self, now_ms: u64, rng: &mut impl Rng) -> Vec<LoadingUpdate> {
        let mut updates = Vec::new();

        match self.stage {
            Stage::Filling => {
                while now_ms >= self.next_message_at {
                    self.next_message_at += LOADING_MESSAGE_TICK_MS;
                    if self.message_idx + 1 < MESSAGES.len() {
                        self.message_idx += 1;
                        updates.push(LoadingUpdate::Message(MESSAGES[self.message_idx]));
                    }
                }

                while now_ms >= self.next_status_at {
                    self.next_status_at += LOADING_STATUS_TICK_MS;
                    if self.status_idx + 1 < STATUSES.len() {
                        self.status_idx += 1;
                        let (icon, text) = STATUSES[self.status_idx];
                        updates.push(LoadingUpdate::Status { icon, text });
                    }
                }

                while now_ms >= self.next_progress_at {
                    self.next_progress_at += LOADING_PROGRESS_TICK_MS;
                    self.progress += rng.random_range(MIN_INCREMENT..MAX_INCREMENT);
                    if self.progress >= 100.0 {
                        self.progress = 100.0;
                        updates.push(LoadingUpdate::Progress(100));
                        updates.push(LoadingUpdate::Message(FINAL_MESSAGE));
                        let (icon, text) = STATUSES[STATUSES.len() - 1];
                        updates.push(LoadingUpdate::Status { icon, text });
                        self.stage = Stage::Holding {
                            until: now_ms + LOADING_HOLD_MS,
                        };
                        break;
                    }
                    updates.push(LoadingUpdate::Progress(self.progress as u8));
                }
            }
            Stage::Holding { until } => {
                if now_ms >= until {
                    self.stage = Stage::Fading {
                        until: now_ms + LOADING_FADE_MS,
                    };
                }
            }
            Stage::Fading { until } => {
                if now_ms >= until {
                    self.stage = Stage::Done;
                    updates.push(LoadingUpdate::Finished);
                    log::info!("loading overlay finished");
                }
            }
            Stage::Done => {}
        }

        updates
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn run_to_done(phase: &mut LoadingPhase, rng: &mut ChaCha8Rng) -> (u64, Vec<LoadingUpdate>) {
        let mut all = Vec::new();
        let mut now = 0;
        while !phase.is_done() {
            now += LOADING_PROGRESS_TICK_MS;
            assert!(now < 60_000, "loading never finished");
            all.extend(phase.poll(now, rng));
        }
        (now, all)
    }

    #[test]
    fn test_runs_to_completion() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut phase = LoadingPhase::new(0);
        let (_, updates) = run_to_done(&mut phase, &mut rng);

        assert_eq!(updates.last(), Some(&LoadingUpdate::Finished));
        assert!(updates.contains(&LoadingUpdate::Progress(100)));
        assert!(updates.contains(&LoadingUpdate::Message(FINAL_MESSAGE)));
    }

    #[test]
    fn test_progress_is_monotonic_and_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut phase = LoadingPhase::new(0);
        let (_, updates) = run_to_done(&mut phase, &mut rng);

        let mut last = 0;
        for update in updates {
            if let LoadingUpdate::Progress(p) = update {
                assert!(p >= last);
                assert!(p <= 100);
                last = p;
            }
        }
        assert_eq!(last, 100);
    }

    #[test]
    fn test_hold_and_fade_delays_finish() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut phase = LoadingPhase::new(0);

        // Drive until 100% lands.
        let mut now = 0;
        loop {
            now += LOADING_PROGRESS_TICK_MS;
            let updates = phase.poll(now, &mut rng);
            if updates.contains(&LoadingUpdate::Progress(100)) {
                break;
            }
        }

        // Well inside hold + fade: not finished yet.
        assert!(phase.poll(now + 100, &mut rng).is_empty());
        assert!(!phase.is_done());

        // Hold elapses, then the fade.
        let updates = phase.poll(now + LOADING_HOLD_MS, &mut rng);
        assert!(updates.is_empty());
        let updates = phase.poll(now + LOADING_HOLD_MS + LOADING_FADE_MS, &mut rng);
        assert_eq!(updates, vec![LoadingUpdate::Finished]);
        assert!(phase.is_done());
    }

    #[test]
    fn test_messages_rotate_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut phase = LoadingPhase::new(0);

        let updates = phase.poll(LOADING_MESSAGE_TICK_MS, &mut rng);
        assert!(updates.contains(&LoadingUpdate::Message(MESSAGES[1])));
    }
}

//! Audio arbitration
//!
//! Enforces the single-playing-track rule across all sections. Two
//! entry points exist: scroll-driven activation and the manual toggle.
//! Both pause every other playing track before touching the target, so
//! the rule holds no matter how the two paths interleave.

use sf_core::{AudioTrack, BACKGROUND_AUDIO_VOLUME, SectionDef, SectionId};

/// One-track-at-a-time playback arbiter.
///
/// Re-entering the section that was last activated (e.g. after carousel
/// interaction bounced the visibility signal) leaves its audio running
/// uninterrupted; entering a different section pauses everything and
/// starts the newcomer's track at the fixed background volume.
#[derive(Debug, Clone)]
pub struct AudioArbiter {
    /// Section whose activation last went through the arbiter.
    previous: Option<SectionId>,
    /// Volume applied whenever a track is started by activation.
    volume: f32,
}

impl Default for AudioArbiter {
    fn default() -> Self {
        Self::new(BACKGROUND_AUDIO_VOLUME)
    }
}

impl AudioArbiter {
    pub fn new(volume: f32) -> Self {
        Self {
            previous: None,
            volume: volume.clamp(0.0, 1.0),
        }
    }

    /// Section that last went through [`AudioArbiter::activate`].
    #[inline]
    pub fn previous(&self) -> Option<SectionId> {
        self.previous
    }

    /// Scroll-driven activation of `section`.
    ///
    /// Host playback denials are swallowed: the track stays paused and
    /// no retry is scheduled.
    pub fn activate(&mut self, section: SectionId, sections: &mut [SectionDef]) {
        let re_entry = self.previous == Some(section);
        self.previous = Some(section);

        if re_entry {
            // Same section re-entered: leave audio running, only nudge a
            // paused track back to life.
            if let Some(track) = track_of(sections, section) {
                if track.is_paused() {
                    track.set_volume(self.volume);
                    if let Err(err) = track.play() {
                        log::debug!("resume blocked for section {section}: {err}");
                    }
                }
            }
            return;
        }

        pause_playing(sections, None);

        if let Some(track) = track_of(sections, section) {
            track.set_volume(self.volume);
            if let Err(err) = track.play() {
                log::debug!("autoplay blocked for section {section}: {err}");
            }
        }
    }

    /// Manual play/pause toggle on `section`'s own track.
    ///
    /// Every other playing track is paused first, then the target flips
    /// state. Does not disturb the re-entry bookkeeping.
    pub fn toggle(&mut self, section: SectionId, sections: &mut [SectionDef]) {
        pause_playing(sections, Some(section));

        if let Some(track) = track_of(sections, section) {
            if track.is_paused() {
                if let Err(err) = track.play() {
                    log::debug!("manual play blocked for section {section}: {err}");
                }
            } else {
                track.pause();
            }
        }
    }
}

fn track_of<'a>(sections: &'a mut [SectionDef], section: SectionId) -> Option<&'a mut (dyn AudioTrack + 'static)> {
    sections.get_mut(section.index())?.track.as_deref_mut()
}

/// Pause every playing track, optionally sparing one section.
fn pause_playing(sections: &mut [SectionDef], except: Option<SectionId>) {
    for (index, section) in sections.iter_mut().enumerate() {
        if except.is_some_and(|id| id.index() == index) {
            continue;
        }
        if let Some(track) = section.track.as_deref_mut() {
            if !track.is_paused() {
                track.pause();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use sf_core::{PlaybackError, SectionKind};

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Play,
        Pause,
        Volume(f32),
    }

    #[derive(Default)]
    struct Probe {
        calls: Vec<(usize, Call)>,
    }

    struct FakeTrack {
        id: usize,
        paused: bool,
        blocked: bool,
        probe: Arc<Mutex<Probe>>,
    }

    impl AudioTrack for FakeTrack {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.probe.lock().unwrap().calls.push((self.id, Call::Play));
            if self.blocked {
                return Err(PlaybackError::Blocked);
            }
            self.paused = false;
            Ok(())
        }

        fn pause(&mut self) {
            self.probe
                .lock()
                .unwrap()
                .calls
                .push((self.id, Call::Pause));
            self.paused = true;
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn set_volume(&mut self, volume: f32) {
            self.probe
                .lock()
                .unwrap()
                .calls
                .push((self.id, Call::Volume(volume)));
        }
    }

    fn rig(count: usize) -> (Vec<SectionDef>, Arc<Mutex<Probe>>) {
        let probe = Arc::new(Mutex::new(Probe::default()));
        let sections = (0..count)
            .map(|id| {
                SectionDef::new(format!("s{id}"), format!("Section {id}"), SectionKind::Intro)
                    .with_track(Box::new(FakeTrack {
                        id,
                        paused: true,
                        blocked: false,
                        probe: Arc::clone(&probe),
                    }))
            })
            .collect();
        (sections, probe)
    }

    fn playing_count(sections: &[SectionDef]) -> usize {
        sections
            .iter()
            .filter(|s| s.track.as_deref().is_some_and(|t| !t.is_paused()))
            .count()
    }

    #[test]
    fn test_switching_pauses_before_playing() {
        let (mut sections, probe) = rig(3);
        let mut arbiter = AudioArbiter::default();

        arbiter.activate(SectionId(0), &mut sections);
        arbiter.activate(SectionId(1), &mut sections);
        arbiter.activate(SectionId(0), &mut sections);

        let calls = probe.lock().unwrap().calls.clone();
        let relevant: Vec<_> = calls
            .into_iter()
            .filter(|(_, c)| matches!(c, Call::Play | Call::Pause))
            .collect();
        // Exactly one play per activation, and exactly one pause (of the
        // previous section) before each switch after the first.
        assert_eq!(
            relevant,
            vec![
                (0, Call::Play),
                (0, Call::Pause),
                (1, Call::Play),
                (1, Call::Pause),
                (0, Call::Play),
            ]
        );
        assert_eq!(playing_count(&sections), 1);
    }

    #[test]
    fn test_re_entry_keeps_audio_running() {
        let (mut sections, probe) = rig(2);
        let mut arbiter = AudioArbiter::default();

        arbiter.activate(SectionId(0), &mut sections);
        probe.lock().unwrap().calls.clear();

        // Visibility bounced without leaving the section.
        arbiter.activate(SectionId(0), &mut sections);
        assert!(probe.lock().unwrap().calls.is_empty());
        assert_eq!(playing_count(&sections), 1);
    }

    #[test]
    fn test_re_entry_resumes_paused_track() {
        let (mut sections, probe) = rig(2);
        let mut arbiter = AudioArbiter::default();

        arbiter.activate(SectionId(0), &mut sections);
        arbiter.toggle(SectionId(0), &mut sections);
        assert_eq!(playing_count(&sections), 0);
        probe.lock().unwrap().calls.clear();

        arbiter.activate(SectionId(0), &mut sections);
        let calls = probe.lock().unwrap().calls.clone();
        assert_eq!(calls, vec![(0, Call::Volume(0.3)), (0, Call::Play)]);
        assert_eq!(playing_count(&sections), 1);
    }

    #[test]
    fn test_toggle_flips_own_track() {
        let (mut sections, _probe) = rig(2);
        let mut arbiter = AudioArbiter::default();

        arbiter.toggle(SectionId(1), &mut sections);
        assert_eq!(playing_count(&sections), 1);
        arbiter.toggle(SectionId(1), &mut sections);
        assert_eq!(playing_count(&sections), 0);
    }

    #[test]
    fn test_toggle_pauses_other_tracks_first() {
        let (mut sections, _probe) = rig(3);
        let mut arbiter = AudioArbiter::default();

        arbiter.activate(SectionId(2), &mut sections);
        arbiter.toggle(SectionId(0), &mut sections);

        assert_eq!(playing_count(&sections), 1);
        assert!(sections[0].track.as_deref().is_some_and(|t| !t.is_paused()));
    }

    #[test]
    fn test_blocked_playback_is_swallowed() {
        let probe = Arc::new(Mutex::new(Probe::default()));
        let mut sections = vec![
            SectionDef::new("s0", "Section 0", SectionKind::Intro).with_track(Box::new(
                FakeTrack {
                    id: 0,
                    paused: true,
                    blocked: true,
                    probe: Arc::clone(&probe),
                },
            )),
        ];
        let mut arbiter = AudioArbiter::default();

        arbiter.activate(SectionId(0), &mut sections);
        assert_eq!(playing_count(&sections), 0);

        // Denial is not sticky state: the arbiter still records the
        // section as previous and does not retry on re-entry resume.
        assert_eq!(arbiter.previous(), Some(SectionId(0)));
    }

    #[test]
    fn test_invariant_holds_under_interleaving() {
        let (mut sections, _probe) = rig(4);
        let mut arbiter = AudioArbiter::default();

        for step in 0..100usize {
            let id = SectionId(step % 4);
            if step % 3 == 0 {
                arbiter.toggle(id, &mut sections);
            } else {
                arbiter.activate(id, &mut sections);
            }
            assert!(playing_count(&sections) <= 1);
        }
    }

    #[test]
    fn test_section_without_track() {
        let mut sections = vec![SectionDef::new("s0", "Section 0", SectionKind::Intro)];
        let mut arbiter = AudioArbiter::default();

        arbiter.activate(SectionId(0), &mut sections);
        arbiter.toggle(SectionId(0), &mut sections);
        assert_eq!(arbiter.previous(), Some(SectionId(0)));
    }
}

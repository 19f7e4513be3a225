//! Audio cues driven by game events
//!
//! The game never plays sound itself. [`AudioDirector`] turns drained
//! [`GameEvent`]s into effect and music requests for whatever [`AudioSink`]
//! the host provides, applying volume and mute from [`Settings`].

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Lane crossed
    Score,
    /// Player hit by traffic
    Explosion,
    /// Level cleared, interstitial starting
    LevelUp,
    /// Final level cleared
    Victory,
    /// Save written, loaded or deleted
    Confirm,
}

/// Background music tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicTrack {
    Menu,
    /// Plays from the moment a run starts
    Transition,
}

/// Output device seam
pub trait AudioSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32);
    fn play_music(&mut self, track: MusicTrack, volume: f32);
}

/// Sink that only logs; used by the headless runner
#[derive(Debug, Default)]
pub struct LogSink;

impl AudioSink for LogSink {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("sfx {:?} at {:.2}", effect, volume);
    }

    fn play_music(&mut self, track: MusicTrack, volume: f32) {
        log::debug!("music {:?} at {:.2}", track, volume);
    }
}

/// Audio manager for the game
pub struct AudioDirector<S: AudioSink> {
    sink: S,
    sfx_volume: f32,
    music_volume: f32,
    current_music: Option<MusicTrack>,
}

impl<S: AudioSink> AudioDirector<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        let mut director = Self {
            sink,
            sfx_volume: 0.0,
            music_volume: 0.0,
            current_music: None,
        };
        director.apply_settings(settings);
        director
    }

    /// Pick up volume or mute changes. Unmuting restarts the current track.
    pub fn apply_settings(&mut self, settings: &Settings) {
        let was_silent = self.music_volume <= 0.0;
        self.sfx_volume = settings.effective_sfx_volume();
        self.music_volume = settings.effective_music_volume();

        if was_silent && self.music_volume > 0.0 {
            if let Some(track) = self.current_music {
                self.sink.play_music(track, self.music_volume);
            }
        }
    }

    pub fn current_music(&self) -> Option<MusicTrack> {
        self.current_music
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn handle_all(&mut self, events: &[GameEvent]) {
        for event in events {
            self.handle(event);
        }
    }

    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::Scored { .. } => self.play(SoundEffect::Score),
            GameEvent::Exploded { .. } => self.play(SoundEffect::Explosion),
            GameEvent::LevelLoading(_) => self.play(SoundEffect::LevelUp),
            GameEvent::LevelStarted(_) => {}
            GameEvent::Won => self.play(SoundEffect::Victory),
            GameEvent::MenuMusic => self.switch_music(MusicTrack::Menu),
            GameEvent::TransitionMusic => self.switch_music(MusicTrack::Transition),
            GameEvent::Saved | GameEvent::Loaded | GameEvent::Deleted => {
                self.play(SoundEffect::Confirm)
            }
        }
    }

    /// Play a sound effect
    fn play(&mut self, effect: SoundEffect) {
        if self.sfx_volume <= 0.0 {
            return;
        }
        self.sink.play_effect(effect, self.sfx_volume);
    }

    /// Start `track` unless it is already playing
    fn switch_music(&mut self, track: MusicTrack) {
        if self.current_music == Some(track) {
            return;
        }
        self.current_music = Some(track);
        if self.music_volume > 0.0 {
            self.sink.play_music(track, self.music_volume);
        }
    }
}

//! Audio cues using the Web Audio API
//!
//! Procedurally generated blips - no external files needed! The mapping from
//! simulation events to tones is platform independent; only playback needs a
//! browser.

use crate::sim::{GameEvent, PowerUpKind};

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Sine,
    Triangle,
    Square,
}

/// A single tone request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cue {
    /// Hz
    pub frequency: f32,
    /// Seconds until the tone has faded out
    pub duration: f64,
    pub waveform: Waveform,
    /// Start gain before the exponential fade
    pub gain: f32,
    /// Seconds after the request the tone starts
    pub delay: f64,
}

impl Cue {
    const fn tone(frequency: f32, duration: f64) -> Self {
        Self {
            frequency,
            duration,
            waveform: Waveform::Sine,
            gain: 0.1,
            delay: 0.0,
        }
    }
}

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Enemy hits a wall
    Bounce,
    /// Slow power-up picked up
    SlowCollected,
    /// Destroy power-up picked up
    DestroyCollected,
    /// Slow effect kicks in
    SlowActivated,
    /// Enemies got faster
    SpeedUp,
    /// Player was hit
    GameOver,
    /// Best time beaten
    NewRecord,
}

impl SoundEffect {
    /// Which sound (if any) a simulation event makes
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::EnemyBounced => Some(SoundEffect::Bounce),
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Slow,
            } => Some(SoundEffect::SlowCollected),
            GameEvent::PowerUpCollected {
                kind: PowerUpKind::Destroy,
            } => Some(SoundEffect::DestroyCollected),
            GameEvent::SlowApplied { .. } => Some(SoundEffect::SlowActivated),
            GameEvent::SpeedIncreased { .. } => Some(SoundEffect::SpeedUp),
            GameEvent::GameOver { .. } => Some(SoundEffect::GameOver),
            GameEvent::NewRecord { .. } => Some(SoundEffect::NewRecord),
            _ => None,
        }
    }

    /// Tones making up this effect
    pub fn cues(&self) -> Vec<Cue> {
        match self {
            SoundEffect::Bounce => vec![Cue::tone(200.0, 0.1)],
            SoundEffect::SlowCollected => vec![Cue::tone(400.0, 0.2)],
            SoundEffect::DestroyCollected => vec![Cue::tone(500.0, 0.3)],
            SoundEffect::SlowActivated => vec![Cue::tone(600.0, 0.4)],
            SoundEffect::SpeedUp => vec![Cue {
                waveform: Waveform::Square,
                gain: 0.05,
                ..Cue::tone(300.0, 0.15)
            }],
            SoundEffect::GameOver => vec![Cue::tone(150.0, 1.0)],
            SoundEffect::NewRecord => [500.0, 600.0, 800.0, 1000.0]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Cue {
                    waveform: Waveform::Triangle,
                    delay: 1.0 + i as f64 * 0.08,
                    ..Cue::tone(freq, 0.25)
                })
                .collect(),
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{Cue, SoundEffect, Waveform};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        master_volume: f32,
        muted: bool,
    }

    impl Default for AudioManager {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AudioManager {
        pub fn new() -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                master_volume: 1.0,
                muted: false,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Set master volume (0.0 - 1.0)
        pub fn set_master_volume(&mut self, vol: f32) {
            self.master_volume = vol.clamp(0.0, 1.0);
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
        }

        pub fn is_muted(&self) -> bool {
            self.muted
        }

        fn effective_volume(&self) -> f32 {
            if self.muted { 0.0 } else { self.master_volume }
        }

        /// Play a sound effect (best effort, failures are ignored)
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.effective_volume();
            if vol <= 0.0 {
                return;
            }

            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for cue in effect.cues() {
                play_cue(ctx, &cue, vol);
            }
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    fn play_cue(ctx: &AudioContext, cue: &Cue, vol: f32) {
        let osc_type = match cue.waveform {
            Waveform::Sine => OscillatorType::Sine,
            Waveform::Triangle => OscillatorType::Triangle,
            Waveform::Square => OscillatorType::Square,
        };
        let Some((osc, gain)) = create_osc(ctx, cue.frequency, osc_type) else {
            return;
        };
        let t = ctx.current_time() + cue.delay;

        gain.gain().set_value_at_time(cue.gain * vol, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01 * vol, t + cue.duration)
            .ok();

        osc.start_with_when(t).ok();
        osc.stop_with_when(t + cue.duration).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_mapping() {
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemyBounced),
            Some(SoundEffect::Bounce)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::PowerUpCollected {
                kind: PowerUpKind::Destroy
            }),
            Some(SoundEffect::DestroyCollected)
        );
        assert_eq!(
            SoundEffect::for_event(&GameEvent::SlowApplied { affected: 0 }),
            Some(SoundEffect::SlowActivated)
        );
        assert_eq!(SoundEffect::for_event(&GameEvent::RoundStarted), None);
        assert_eq!(
            SoundEffect::for_event(&GameEvent::EnemySpawned { id: 3 }),
            None
        );
    }

    #[test]
    fn test_classic_tones() {
        let bounce = SoundEffect::Bounce.cues();
        assert_eq!(bounce.len(), 1);
        assert_eq!(bounce[0].frequency, 200.0);
        assert_eq!(bounce[0].duration, 0.1);
        assert_eq!(SoundEffect::GameOver.cues()[0].duration, 1.0);
    }

    #[test]
    fn test_record_fanfare_follows_game_over() {
        let cues = SoundEffect::NewRecord.cues();
        assert_eq!(cues.len(), 4);
        assert!(cues.iter().all(|c| c.delay >= 1.0));
        assert!(cues.windows(2).all(|w| w[0].delay < w[1].delay));
    }
}

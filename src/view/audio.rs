use crate::utils::{AudioClipId, AudioSourceId};

/// Host mixer capability. Playback is fire-and-forget.
pub trait AudioSurface {
    fn play_one_shot(&mut self, source: AudioSourceId, clip: AudioClipId);
}

/// What triggered a sound, for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Footstep,
    Jump,
    Land,
}

/// A one-shot request resolved against the controller's audio bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioEvent {
    pub cue: AudioCue,
    pub source: AudioSourceId,
    pub clip: AudioClipId,
}

impl AudioEvent {
    /// `None` when either handle is unbound, which means "play nothing".
    pub fn resolve(cue: AudioCue, source: Option<AudioSourceId>, clip: Option<AudioClipId>) -> Option<Self> {
        Some(Self { cue, source: source?, clip: clip? })
    }
}

/// Forward a frame's events to the mixer in emission order.
pub fn play_all<A: AudioSurface + ?Sized>(audio: &mut A, events: &[AudioEvent]) {
    for event in events {
        tracing::trace!(cue = ?event.cue, source = event.source.0, clip = event.clip.0, "play one shot");
        audio.play_one_shot(event.source, event.clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_handles_resolve_to_nothing() {
        assert!(AudioEvent::resolve(AudioCue::Jump, None, Some(AudioClipId(1))).is_none());
        assert!(AudioEvent::resolve(AudioCue::Jump, Some(AudioSourceId(1)), None).is_none());
        let event = AudioEvent::resolve(AudioCue::Land, Some(AudioSourceId(2)), Some(AudioClipId(3))).unwrap();
        assert_eq!(event.source, AudioSourceId(2));
        assert_eq!(event.clip, AudioClipId(3));
    }
}

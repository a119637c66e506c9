//! Output collaborators
//!
//! The engine only ever asks to speak text, play a cue or write a braille
//! buffer. Backends live outside this crate.

use crate::braille::NavBraille;
use crate::earcon::Earcon;

/// How a new utterance interacts with speech in progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueMode {
    /// Cut off current speech
    Flush,
    /// Speak after current speech
    Queue,
}

/// Voice adjustments relative to the user's defaults (1.0 = unchanged)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpeechProperties {
    pub rate: Option<f32>,
    pub pitch: Option<f32>,
    pub volume: Option<f32>,
}

impl SpeechProperties {
    /// Raised pitch used for capital letters
    pub fn capital() -> Self {
        Self {
            pitch: Some(1.3),
            ..Default::default()
        }
    }

    /// Slightly quieter, faster voice for role and state annotations
    pub fn annotation() -> Self {
        Self {
            rate: Some(1.1),
            volume: Some(0.9),
            ..Default::default()
        }
    }
}

/// Text-to-speech backend
pub trait Speech {
    fn speak(&mut self, text: &str, mode: QueueMode, properties: Option<&SpeechProperties>);
    fn stop(&mut self);
    fn is_speaking(&self) -> bool;
}

/// Audio cue player
pub trait Earcons {
    fn play_earcon(&mut self, earcon: Earcon);
}

/// Braille display
pub trait BrailleDisplay {
    fn write(&mut self, braille: &NavBraille);
}

/// Output sink that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOutput;

impl Speech for NullOutput {
    fn speak(&mut self, _text: &str, _mode: QueueMode, _properties: Option<&SpeechProperties>) {}
    fn stop(&mut self) {}
    fn is_speaking(&self) -> bool {
        false
    }
}

impl Earcons for NullOutput {
    fn play_earcon(&mut self, _earcon: Earcon) {}
}

impl BrailleDisplay for NullOutput {
    fn write(&mut self, _braille: &NavBraille) {}
}

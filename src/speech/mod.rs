pub mod speaker;

pub use speaker::{Speaker, SpeechEvent};

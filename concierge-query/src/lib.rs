//! # concierge-query
//!
//! Query understanding (§4.2): intent recognition, constraint detection,
//! sub-query expansion, and HyDE hypothesis generation. Every stage but
//! recognition is best-effort — see [`retry::with_bounded_retry`].

pub mod detector;
pub mod expander;
pub mod hyde;
pub mod recognizer;
pub mod retry;

pub use detector::IntentDetector;
pub use expander::IntentExpander;
pub use hyde::HyDEGenerator;
pub use recognizer::IntentRecognizer;

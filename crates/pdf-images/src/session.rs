//! Conversion session state
//!
//! A session is a plain value. [`transition`] maps a session and an event to
//! the next session plus the side effects the caller has to perform; it never
//! performs them itself.

use crate::asset::{ImageAsset, filter_supported};
use crate::options::LayoutOptions;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ARTIFACT_ID: AtomicU64 = AtomicU64::new(1);

/// Transient handle to a produced artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactHandle(pub u64);

impl ArtifactHandle {
    pub(crate) fn next() -> Self {
        Self(NEXT_ARTIFACT_ID.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    FilesSelected,
    Converting,
    Success,
}

#[derive(Debug, Clone, Default)]
pub struct ConversionSession {
    pub images: Vec<ImageAsset>,
    pub options: LayoutOptions,
    pub status: SessionStatus,
    pub artifact: Option<ArtifactHandle>,
}

/// Inputs to the session state machine
#[derive(Debug)]
pub enum SessionEvent {
    FilesAdded(Vec<ImageAsset>),
    FileRemoved(usize),
    OptionsChanged(LayoutOptions),
    ConvertRequested { service_available: bool },
    ConversionSucceeded(ArtifactHandle),
    ConversionFailed,
    Reset,
}

/// User-visible messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Files that were dropped because their kind is not supported
    UnsupportedIgnored(Vec<String>),
    /// Convert was requested with nothing to convert
    NoImages,
    /// The document backend is not loaded
    ServiceUnavailable,
    /// The pipeline failed; details go to the log
    ConversionFailed,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::UnsupportedIgnored(names) => format!(
                "Ignored unsupported file(s): {}. Only PNG, JPEG and WebP images can be converted.",
                names.join(", ")
            ),
            Notice::NoImages => "Please select at least one image to convert.".to_string(),
            Notice::ServiceUnavailable => {
                "The PDF generator is not available. Please try again.".to_string()
            }
            Notice::ConversionFailed => {
                "Failed to convert images to PDF. Please try again.".to_string()
            }
        }
    }
}

/// Side effects requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    StartConversion,
    ReleaseArtifact(ArtifactHandle),
    Notify(Notice),
}

/// Apply one event to a session.
pub fn transition(
    mut session: ConversionSession,
    event: SessionEvent,
) -> (ConversionSession, Vec<Effect>) {
    let mut effects = Vec::new();
    let converting = session.status == SessionStatus::Converting;

    match event {
        SessionEvent::FilesAdded(assets) => {
            if converting {
                return (session, effects);
            }
            let (supported, rejected) = filter_supported(assets);
            if !rejected.is_empty() {
                effects.push(Effect::Notify(Notice::UnsupportedIgnored(rejected)));
            }
            if supported.is_empty() {
                return (session, effects);
            }
            // A new selection makes the previous output stale
            if let Some(handle) = session.artifact.take() {
                effects.push(Effect::ReleaseArtifact(handle));
            }
            session.images.extend(supported);
            session.status = SessionStatus::FilesSelected;
        }
        SessionEvent::FileRemoved(index) => {
            if converting || index >= session.images.len() {
                return (session, effects);
            }
            session.images.remove(index);
            if let Some(handle) = session.artifact.take() {
                effects.push(Effect::ReleaseArtifact(handle));
            }
            session.status = if session.images.is_empty() {
                SessionStatus::Idle
            } else {
                SessionStatus::FilesSelected
            };
        }
        SessionEvent::OptionsChanged(options) => {
            if !converting {
                session.options = options;
            }
        }
        SessionEvent::ConvertRequested { service_available } => {
            if converting {
                return (session, effects);
            }
            if session.images.is_empty() {
                effects.push(Effect::Notify(Notice::NoImages));
            } else if !service_available {
                effects.push(Effect::Notify(Notice::ServiceUnavailable));
            } else {
                // A new run replaces whatever the previous one produced
                if let Some(handle) = session.artifact.take() {
                    effects.push(Effect::ReleaseArtifact(handle));
                }
                session.status = SessionStatus::Converting;
                effects.push(Effect::StartConversion);
            }
        }
        SessionEvent::ConversionSucceeded(handle) => {
            if !converting {
                // Nobody is waiting for it
                effects.push(Effect::ReleaseArtifact(handle));
                return (session, effects);
            }
            if let Some(previous) = session.artifact.replace(handle) {
                effects.push(Effect::ReleaseArtifact(previous));
            }
            session.status = SessionStatus::Success;
        }
        SessionEvent::ConversionFailed => {
            if converting {
                session.status = SessionStatus::FilesSelected;
                effects.push(Effect::Notify(Notice::ConversionFailed));
            }
        }
        SessionEvent::Reset => {
            if let Some(handle) = session.artifact.take() {
                effects.push(Effect::ReleaseArtifact(handle));
            }
            session.images.clear();
            session.status = SessionStatus::Idle;
        }
    }

    (session, effects)
}

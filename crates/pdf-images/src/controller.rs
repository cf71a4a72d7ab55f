use crate::asset::ImageAsset;
use crate::options::LayoutOptions;
use crate::pipeline::{Conversion, Converter};
use crate::services::*;
use crate::session::*;
use std::collections::HashMap;

/// Produced artifacts, addressed by handle
#[derive(Debug, Default)]
pub struct ArtifactStore {
    artifacts: HashMap<ArtifactHandle, Vec<u8>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, bytes: Vec<u8>) -> ArtifactHandle {
        let handle = ArtifactHandle::next();
        self.artifacts.insert(handle, bytes);
        handle
    }

    pub fn get(&self, handle: ArtifactHandle) -> Option<&[u8]> {
        self.artifacts.get(&handle).map(Vec::as_slice)
    }

    pub fn release(&mut self, handle: ArtifactHandle) -> Option<Vec<u8>> {
        self.artifacts.remove(&handle)
    }

    /// Number of artifacts currently held
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}

/// Drives a [`ConversionSession`]: applies events, performs their effects,
/// and runs the pipeline when a conversion starts.
pub struct SessionController<R, D, S, F> {
    session: ConversionSession,
    converter: Converter<R, D, S, F>,
    artifacts: ArtifactStore,
    notices: Vec<Notice>,
    last_conversion: Option<Conversion>,
}

impl<R, D, S, F> SessionController<R, D, S, F>
where
    R: FileReader,
    D: PixelDecoder,
    S: SurfaceProvider<D::Image>,
    F: DocumentFactory,
{
    pub fn new(converter: Converter<R, D, S, F>) -> Self {
        Self {
            session: ConversionSession::default(),
            converter,
            artifacts: ArtifactStore::new(),
            notices: Vec::new(),
            last_conversion: None,
        }
    }

    pub fn session(&self) -> &ConversionSession {
        &self.session
    }

    pub fn status(&self) -> SessionStatus {
        self.session.status
    }

    pub fn artifacts(&self) -> &ArtifactStore {
        &self.artifacts
    }

    /// Bytes of the current artifact, once a conversion has succeeded
    pub fn artifact(&self) -> Option<&[u8]> {
        self.session
            .artifact
            .and_then(|handle| self.artifacts.get(handle))
    }

    /// Pages and skipped images of the most recent successful conversion.
    /// Its bytes have moved into the artifact store.
    pub fn last_conversion(&self) -> Option<&Conversion> {
        self.last_conversion.as_ref()
    }

    /// Take the user-visible messages produced since the last call.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn add_files(&mut self, assets: Vec<ImageAsset>) {
        self.dispatch(SessionEvent::FilesAdded(assets));
    }

    pub fn remove_file(&mut self, index: usize) {
        self.dispatch(SessionEvent::FileRemoved(index));
    }

    pub fn set_options(&mut self, options: LayoutOptions) {
        self.dispatch(SessionEvent::OptionsChanged(options));
    }

    pub fn reset(&mut self) {
        self.dispatch(SessionEvent::Reset);
    }

    /// Convert the current selection. Returns the new status.
    pub async fn convert(&mut self) -> SessionStatus {
        let service_available = self.converter.is_available();
        let start = self.dispatch(SessionEvent::ConvertRequested { service_available });
        if !start {
            return self.session.status;
        }

        let outcome = self
            .converter
            .convert(&self.session.images, &self.session.options)
            .await;

        match outcome {
            Ok(mut conversion) => {
                let handle = self.artifacts.store(std::mem::take(&mut conversion.bytes));
                self.last_conversion = Some(conversion);
                self.dispatch(SessionEvent::ConversionSucceeded(handle));
            }
            Err(e) => {
                log::error!("Conversion failed: {e}");
                self.dispatch(SessionEvent::ConversionFailed);
            }
        }

        self.session.status
    }

    /// Feed one event through the state machine and perform its effects.
    /// Returns whether a conversion should start.
    fn dispatch(&mut self, event: SessionEvent) -> bool {
        let session = std::mem::take(&mut self.session);
        let (session, effects) = transition(session, event);
        self.session = session;

        let mut start = false;
        for effect in effects {
            match effect {
                Effect::StartConversion => start = true,
                Effect::ReleaseArtifact(handle) => {
                    if self.artifacts.release(handle).is_some() {
                        log::debug!("Released artifact {}", handle.0);
                    }
                }
                Effect::Notify(notice) => {
                    log::info!("{}", notice.message());
                    self.notices.push(notice);
                }
            }
        }
        if self.session.artifact.is_none() {
            self.last_conversion = None;
        }
        start
    }
}

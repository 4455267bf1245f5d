//! EditSession - admin working copy and its synchronization with the backend.
//!
//! The session fetches the document once, lets the caller mutate a local
//! working copy through [`DocumentMutation`]s, and pushes the whole copy back
//! on [`EditSession::save`]. State lives behind a `tokio::sync::RwLock` that
//! is never held across a network call.
//!
//! Concurrency rules:
//! - connect: latest request wins. Each call takes a generation number and a
//!   response whose generation is no longer current is dropped.
//! - save: one at a time. A save issued while another is pending fails
//!   immediately.
//! - upload: the target project is pinned by id before the upload starts and
//!   the filename is spliced in by that id afterwards, unless the working
//!   copy was replaced by a connect or logout in between.

use super::phase::{ConnectOutcome, EditPhase, EditStatus, UploadTarget};
use folio_core::content::{AssetUpload, ContentRepository, UpdateReceipt};
use folio_core::document::{
    self, DocumentMutation, PortfolioDocument, ProjectId, ProjectIdGenerator,
};
use folio_core::session::SessionStore;
use folio_core::{FolioError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::{Mutex, RwLock};

const NOT_AUTHENTICATED: &str = "Not authenticated";
const NOT_CONNECTED: &str = "Not connected to a backend";

#[derive(Debug)]
struct EditState {
    phase: EditPhase,
    backend_url: Option<String>,
    baseline: Option<PortfolioDocument>,
    working: Option<PortfolioDocument>,
    ids: ProjectIdGenerator,
    /// Bumped on every change of the working copy.
    revision: u64,
    /// Bumped whenever the working copy is replaced wholesale (connect, logout).
    epoch: u64,
    message: Option<String>,
    error: Option<String>,
}

impl EditState {
    fn new(phase: EditPhase, backend_url: Option<String>) -> Self {
        Self {
            phase,
            backend_url,
            baseline: None,
            working: None,
            ids: ProjectIdGenerator::new(),
            revision: 0,
            epoch: 0,
            message: None,
            error: None,
        }
    }

    fn progress(&mut self, phase: EditPhase, message: &str) {
        self.phase = phase;
        self.message = Some(message.to_string());
        self.error = None;
    }

    fn fail(&mut self, err: &FolioError) {
        self.message = None;
        self.error = Some(err.message().to_string());
    }
}

enum SpliceTarget {
    Profile,
    Project(ProjectId),
}

/// Admin edit session over one backend.
pub struct EditSession {
    repository: Arc<dyn ContentRepository>,
    store: Arc<dyn SessionStore>,
    state: RwLock<EditState>,
    connect_generation: AtomicU64,
    save_gate: Mutex<()>,
}

impl EditSession {
    /// Opens a session, starting in `Disconnected` if a token is stored and
    /// `LoggedOut` otherwise.
    pub async fn open(
        repository: Arc<dyn ContentRepository>,
        store: Arc<dyn SessionStore>,
    ) -> Result<Self> {
        let credential = store.get().await?;
        let phase = if credential.is_authenticated() {
            EditPhase::Disconnected
        } else {
            EditPhase::LoggedOut
        };
        tracing::debug!("[EditSession] Opened in phase {}", phase);

        Ok(Self {
            repository,
            store,
            state: RwLock::new(EditState::new(
                phase,
                credential.backend_url().map(str::to_string),
            )),
            connect_generation: AtomicU64::new(0),
            save_gate: Mutex::new(()),
        })
    }

    // ============================================================================
    // Inspection
    // ============================================================================

    pub async fn status(&self) -> EditStatus {
        let state = self.state.read().await;
        EditStatus {
            phase: state.phase.clone(),
            message: state.message.clone(),
            error: state.error.clone(),
        }
    }

    pub async fn phase(&self) -> EditPhase {
        self.state.read().await.phase.clone()
    }

    pub async fn working_copy(&self) -> Option<PortfolioDocument> {
        self.state.read().await.working.clone()
    }

    pub async fn baseline(&self) -> Option<PortfolioDocument> {
        self.state.read().await.baseline.clone()
    }

    /// Backend URL of the current connection, or the remembered one.
    pub async fn backend_url(&self) -> Option<String> {
        self.state.read().await.backend_url.clone()
    }

    /// Returns `true` if the working copy differs from the baseline.
    pub async fn is_dirty(&self) -> bool {
        let state = self.state.read().await;
        state.working != state.baseline
    }

    // ============================================================================
    // Authentication
    // ============================================================================

    /// Exchanges the admin password for a token and remembers both the token
    /// and the backend URL.
    pub async fn login(&self, backend_url: &str, password: &str) -> Result<()> {
        let backend_url = backend_url.trim();
        if backend_url.is_empty() || password.is_empty() {
            let err = FolioError::auth("Please fill in all fields");
            self.state.write().await.fail(&err);
            return Err(err);
        }

        let grant = match self.repository.authenticate(backend_url, password).await {
            Ok(grant) => grant,
            Err(err) => {
                tracing::warn!("[EditSession] Login failed: {}", err);
                self.state.write().await.fail(&err);
                return Err(err);
            }
        };

        self.store.set_token(grant.token).await?;
        self.store.set_backend_url(backend_url.to_string()).await?;

        let mut state = self.state.write().await;
        state.backend_url = Some(backend_url.to_string());
        let message = grant
            .message
            .unwrap_or_else(|| "Authentication successful".to_string());
        state.progress(EditPhase::Disconnected, &message);
        tracing::info!("[EditSession] Logged in to {}", backend_url);
        Ok(())
    }

    /// Forgets the token and drops any working copy.
    pub async fn logout(&self) -> Result<()> {
        self.connect_generation.fetch_add(1, Ordering::SeqCst);
        self.store.clear().await?;

        let mut state = self.state.write().await;
        state.working = None;
        state.baseline = None;
        state.epoch += 1;
        state.revision += 1;
        state.phase = EditPhase::LoggedOut;
        state.message = None;
        state.error = None;
        tracing::debug!("[EditSession] Logged out");
        Ok(())
    }

    async fn token(&self) -> Result<Option<String>> {
        let credential = self.store.get().await?;
        Ok(credential.token.filter(|token| !token.is_empty()))
    }

    // ============================================================================
    // Connect
    // ============================================================================

    /// Fetches the document and makes it both baseline and working copy.
    pub async fn connect(&self, backend_url: &str) -> Result<ConnectOutcome> {
        let backend_url = backend_url.trim().to_string();
        let Some(token) = self.token().await? else {
            let err = FolioError::auth(NOT_AUTHENTICATED);
            let mut state = self.state.write().await;
            state.phase = EditPhase::LoggedOut;
            state.fail(&err);
            return Err(err);
        };

        let generation = self.connect_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state
            .write()
            .await
            .progress(EditPhase::Connecting, "Connecting...");
        tracing::debug!(
            "[EditSession] Connecting to {} (generation {})",
            backend_url,
            generation
        );

        let result = self
            .repository
            .fetch_document(&backend_url, Some(&token))
            .await;

        let mut state = self.state.write().await;
        if self.connect_generation.load(Ordering::SeqCst) != generation {
            tracing::warn!(
                "[EditSession] Dropping response from {} (generation {} superseded)",
                backend_url,
                generation
            );
            return Ok(ConnectOutcome::Superseded);
        }

        match result {
            Ok(fetched) => {
                state.baseline = Some(fetched.clone());
                state.working = Some(fetched);
                state.backend_url = Some(backend_url.clone());
                state.epoch += 1;
                state.revision += 1;
                state.progress(EditPhase::Connected, "Connected successfully!");
                if let Err(err) = self.store.set_backend_url(backend_url.clone()).await {
                    tracing::warn!("[EditSession] Could not remember backend URL: {}", err);
                }
                tracing::info!("[EditSession] Connected to {}", backend_url);
                Ok(ConnectOutcome::Connected)
            }
            Err(err) => {
                tracing::warn!("[EditSession] Connect to {} failed: {}", backend_url, err);
                state.phase = EditPhase::ConnectFailed(err.message().to_string());
                state.fail(&err);
                Err(err)
            }
        }
    }

    // ============================================================================
    // Mutations
    // ============================================================================

    /// Applies a mutation to the working copy. Returns whether anything changed.
    pub async fn apply(&self, mutation: DocumentMutation) -> bool {
        let mut state = self.state.write().await;
        let EditState { working, ids, .. } = &mut *state;
        let Some(working) = working.as_mut() else {
            tracing::debug!("[EditSession] Ignoring {:?}: no working copy", mutation);
            return false;
        };

        let changed = document::apply(working, mutation, ids);
        if changed {
            state.revision += 1;
            state.phase = EditPhase::Editing;
            state.message = None;
            state.error = None;
        }
        changed
    }

    /// Sets a field addressed by a textual path such as `name`,
    /// `sections.about` or `projects[2].title`.
    pub async fn set_field(&self, path: &str, value: impl Into<String>) -> Result<bool> {
        let mutation = DocumentMutation::from_path(path, value).map_err(FolioError::InvalidInput)?;
        Ok(self.apply(mutation).await)
    }

    /// Replaces a project's tags from comma-separated input.
    pub async fn set_project_tags(&self, index: usize, raw: impl Into<String>) -> bool {
        self.apply(DocumentMutation::SetProjectTags {
            index,
            raw: raw.into(),
        })
        .await
    }

    /// Appends a placeholder project and returns its id.
    pub async fn add_project(&self) -> Option<ProjectId> {
        let mut state = self.state.write().await;
        let EditState { working, ids, .. } = &mut *state;
        let working = working.as_mut()?;
        document::apply(working, DocumentMutation::AddProject, ids);
        let id = working.projects.last().map(|project| project.id.clone());
        state.revision += 1;
        state.phase = EditPhase::Editing;
        state.message = None;
        state.error = None;
        id
    }

    pub async fn remove_project(&self, index: usize) -> bool {
        self.apply(DocumentMutation::RemoveProject { index }).await
    }

    /// Resets the working copy to the baseline.
    pub async fn discard_changes(&self) -> bool {
        let mut state = self.state.write().await;
        if state.baseline.is_none() || state.working == state.baseline {
            return false;
        }
        state.working = state.baseline.clone();
        state.revision += 1;
        state.phase = EditPhase::Connected;
        state.message = None;
        state.error = None;
        tracing::debug!("[EditSession] Discarded local changes");
        true
    }

    // ============================================================================
    // Upload
    // ============================================================================

    /// Uploads an image and splices the stored filename into the working copy.
    ///
    /// Returns the filename assigned by the backend.
    pub async fn upload_image(&self, upload: AssetUpload, target: UploadTarget) -> Result<String> {
        let Some(token) = self.token().await? else {
            let err = FolioError::upload(NOT_AUTHENTICATED);
            self.state.write().await.fail(&err);
            return Err(err);
        };

        let (backend_url, splice, epoch) = {
            let mut state = self.state.write().await;
            let resolved = Self::resolve_upload(&state, target);
            match resolved {
                Ok(resolved) => {
                    state.message = Some("Uploading image...".to_string());
                    state.error = None;
                    resolved
                }
                Err(err) => {
                    state.fail(&err);
                    return Err(err);
                }
            }
        };

        let result = self
            .repository
            .upload_asset(&backend_url, &token, upload)
            .await;

        let mut state = self.state.write().await;
        let uploaded = match result {
            Ok(uploaded) => uploaded,
            Err(err) => {
                tracing::warn!("[EditSession] Upload failed: {}", err);
                state.fail(&err);
                return Err(err);
            }
        };

        let filename = uploaded.filename;
        if state.epoch != epoch {
            tracing::warn!(
                "[EditSession] Working copy replaced during upload, not splicing {}",
                filename
            );
            state.message = Some("Image uploaded!".to_string());
            state.error = None;
            return Ok(filename);
        }
        let spliced = match (state.working.as_mut(), &splice) {
            (Some(working), SpliceTarget::Profile) => {
                working.profile_image = Some(filename.clone());
                true
            }
            (Some(working), SpliceTarget::Project(id)) => match working.project_index(id) {
                Some(index) => {
                    working.projects[index].image = filename.clone();
                    true
                }
                None => {
                    tracing::warn!(
                        "[EditSession] Project {} was removed during upload, not splicing {}",
                        id,
                        filename
                    );
                    false
                }
            },
            (None, _) => false,
        };

        if spliced {
            state.revision += 1;
            state.phase = EditPhase::Editing;
        }
        state.message = Some("Image uploaded!".to_string());
        state.error = None;
        tracing::info!("[EditSession] Uploaded image as {}", filename);
        Ok(filename)
    }

    fn resolve_upload(
        state: &EditState,
        target: UploadTarget,
    ) -> Result<(String, SpliceTarget, u64)> {
        let (Some(working), Some(backend_url)) = (&state.working, &state.backend_url) else {
            return Err(FolioError::upload(NOT_CONNECTED));
        };
        let splice = match target {
            UploadTarget::Profile => SpliceTarget::Profile,
            UploadTarget::Project(index) => working
                .projects
                .get(index)
                .map(|project| SpliceTarget::Project(project.id.clone()))
                .ok_or_else(|| FolioError::upload(format!("No project at index {}", index)))?,
        };
        Ok((backend_url.clone(), splice, state.epoch))
    }

    // ============================================================================
    // Save
    // ============================================================================

    /// Pushes the whole working copy to the backend.
    pub async fn save(&self) -> Result<UpdateReceipt> {
        let Ok(_gate) = self.save_gate.try_lock() else {
            tracing::warn!("[EditSession] Rejecting save: another save is pending");
            return Err(FolioError::update("A save is already in progress"));
        };

        let Some(token) = self.token().await? else {
            let err = FolioError::update(NOT_AUTHENTICATED);
            self.state.write().await.fail(&err);
            return Err(err);
        };

        let (backend_url, snapshot, revision, epoch) = {
            let mut state = self.state.write().await;
            let captured = match (&state.working, &state.backend_url) {
                (Some(working), Some(backend_url)) => Some((
                    backend_url.clone(),
                    working.clone(),
                    state.revision,
                    state.epoch,
                )),
                _ => None,
            };
            let Some(captured) = captured else {
                let err = FolioError::update(NOT_CONNECTED);
                state.fail(&err);
                return Err(err);
            };
            state.progress(EditPhase::Saving, "Saving...");
            captured
        };

        tracing::debug!(
            "[EditSession] Saving {} projects to {}",
            snapshot.projects.len(),
            backend_url
        );
        let result = self
            .repository
            .update_document(&backend_url, &token, &snapshot)
            .await;

        let mut state = self.state.write().await;
        if state.epoch != epoch {
            tracing::warn!("[EditSession] Working copy replaced during save, keeping new state");
            return result;
        }
        let edited_meanwhile = state.revision != revision;

        match result {
            Ok(receipt) => {
                state.baseline = Some(snapshot);
                let phase = if edited_meanwhile {
                    EditPhase::Editing
                } else {
                    EditPhase::Saved
                };
                state.progress(phase, "Saved successfully!");
                tracing::info!("[EditSession] Saved to {}", backend_url);
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!("[EditSession] Save failed: {}", err);
                state.phase = if edited_meanwhile {
                    EditPhase::Editing
                } else {
                    EditPhase::SaveFailed(err.message().to_string())
                };
                state.fail(&err);
                Err(err)
            }
        }
    }
}

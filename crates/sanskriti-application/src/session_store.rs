//! Session store: the authenticated identity and its local cache.
//!
//! The store mediates between the remote [`IdentityProvider`] and the local
//! [`KeyValueStore`]. Its lifecycle is
//!
//! ```text
//! Uninitialized ──initialize()──► Initializing ──► Authenticated(identity)
//!                                              └─► Unauthenticated
//! ```
//!
//! after which login/signup/social sign-in, logout and provider notifications
//! move it between `Authenticated` and `Unauthenticated`.
//!
//! Every user-initiated operation and every provider notification runs under
//! one FIFO operation lock, so overlapping calls are applied one after another
//! in arrival order. Observers are notified only after the identity cache
//! write has completed.

use sanskriti_core::error::{AuthError, SessionError};
use sanskriti_core::identity::{
    Identity, IdentityProvider, Principal, PrincipalStream, SocialCredential, SocialOutcome,
    SocialSignIn,
};
use sanskriti_core::storage::{IDENTITY_KEY, KeyValueStore};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock, Weak};
use tokio::sync::{Mutex, MutexGuard, watch};
use tokio::task::AbortHandle;

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Initializing,
    Authenticated(Identity),
    Unauthenticated,
}

impl SessionState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            SessionState::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// True once initialization has reached a terminal answer.
    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            SessionState::Authenticated(_) | SessionState::Unauthenticated
        )
    }
}

/// Counts an operation as in flight from the moment it is requested.
struct LoadingGuard<'a>(&'a AtomicUsize);

impl<'a> LoadingGuard<'a> {
    fn new(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Exclusive access to the session for one operation.
struct Operation<'a> {
    _lock: MutexGuard<'a, ()>,
    _loading: LoadingGuard<'a>,
}

pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    social: Arc<dyn SocialSignIn>,
    storage: Arc<dyn KeyValueStore>,
    state: watch::Sender<SessionState>,
    op_lock: Mutex<()>,
    in_flight: AtomicUsize,
    initialized: AtomicBool,
    listener: OnceLock<AbortHandle>,
}

impl SessionStore {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        social: Arc<dyn SocialSignIn>,
        storage: Arc<dyn KeyValueStore>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            provider,
            social,
            storage,
            state,
            op_lock: Mutex::new(()),
            in_flight: AtomicUsize::new(0),
            initialized: AtomicBool::new(false),
            listener: OnceLock::new(),
        }
    }

    // ============================================================================
    // Queries
    // ============================================================================

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn is_initialized(&self) -> bool {
        self.state.borrow().is_settled()
    }

    /// True while any operation is running or queued. UIs use this to
    /// disable submit buttons.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Registers an observer. Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits until `initialize` has settled on authenticated or not.
    pub async fn wait_until_initialized(&self) -> SessionState {
        let mut rx = self.state.subscribe();
        match rx.wait_for(SessionState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        }
    }

    // ============================================================================
    // Lifecycle
    // ============================================================================

    /// Subscribes to the provider, applies its current answer and keeps
    /// following its notifications in the background.
    ///
    /// Returns the settled state. Calling it a second time fails with
    /// [`SessionError::AlreadyInitialized`].
    pub async fn initialize(self: &Arc<Self>) -> Result<SessionState, SessionError> {
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(SessionError::AlreadyInitialized);
        }

        self.state.send_replace(SessionState::Initializing);

        let mut principals = self.provider.subscribe();
        {
            let _op = self.begin().await;
            let current = principals.borrow_and_update().clone();
            self.apply_principal(current).await;
        }

        let handle = tokio::spawn(Self::follow_provider(Arc::downgrade(self), principals));
        if let Err(handle) = self.listener.set(handle.abort_handle()) {
            handle.abort();
        }

        let state = self.state();
        tracing::info!(
            "[SessionStore] Initialized: {}",
            match state.identity() {
                Some(identity) => format!("authenticated as {}", identity.subject_id()),
                None => "unauthenticated".to_string(),
            }
        );
        Ok(state)
    }

    async fn follow_provider(store: Weak<Self>, mut principals: PrincipalStream) {
        while principals.changed().await.is_ok() {
            let Some(store) = store.upgrade() else {
                break;
            };
            let _op = store.begin().await;
            // Read after queueing so a notification superseded while waiting
            // is never applied.
            let principal = principals.borrow_and_update().clone();
            store.apply_principal(principal).await;
        }
        tracing::debug!("[SessionStore] Stopped following provider notifications");
    }

    /// Applies a provider notification.
    ///
    /// The provider is authoritative: the transition happens even when the
    /// cache cannot be written.
    async fn apply_principal(&self, principal: Option<Principal>) {
        let Some(principal) = principal else {
            if let Err(e) = self.storage.remove(IDENTITY_KEY).await {
                tracing::error!("[SessionStore] Failed to clear cached identity: {}", e);
            }
            self.publish(SessionState::Unauthenticated);
            return;
        };

        if let Some(cached) = self.cached_identity_for(&principal).await {
            self.publish(SessionState::Authenticated(cached));
            return;
        }

        match Identity::from_principal(&principal) {
            Ok(identity) => {
                if let Err(e) = self.write_identity(&identity).await {
                    tracing::error!("[SessionStore] Failed to cache identity: {}", e);
                }
                self.publish(SessionState::Authenticated(identity));
            }
            Err(e) => {
                tracing::error!("[SessionStore] Ignoring unusable principal: {}", e);
                self.publish(SessionState::Unauthenticated);
            }
        }
    }

    /// The cached identity, if one exists for this principal's subject.
    async fn cached_identity_for(&self, principal: &Principal) -> Option<Identity> {
        let raw = match self.storage.get(IDENTITY_KEY).await {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("[SessionStore] Failed to read cached identity: {}", e);
                return None;
            }
        };

        match Identity::from_json(&raw) {
            Ok(identity) if identity.matches(principal) => Some(identity),
            Ok(identity) => {
                tracing::debug!(
                    "[SessionStore] Cached identity {} does not match principal {}",
                    identity.subject_id(),
                    principal.subject_id
                );
                None
            }
            Err(e) => {
                tracing::warn!("[SessionStore] Discarding unreadable cached identity: {}", e);
                None
            }
        }
    }

    // ============================================================================
    // User-initiated operations
    // ============================================================================

    /// Signs in with email and password.
    ///
    /// On failure local state is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        let _op = self.begin().await;

        let principal = self
            .provider
            .verify_credentials(email, password)
            .await
            .inspect_err(|e| tracing::error!("[SessionStore] Login error: {}", e))?;

        let identity = Identity::from_principal(&principal)?;
        self.commit(identity).await
    }

    /// Creates an account. The caller-supplied `name` replaces whatever display
    /// name the provider assigned.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Identity, SessionError> {
        let _op = self.begin().await;

        let principal = self
            .provider
            .create_account(email, password)
            .await
            .inspect_err(|e| tracing::error!("[SessionStore] Signup error: {}", e))?;

        let identity = Identity::from_principal_named(&principal, name.trim())?;
        self.commit(identity).await
    }

    /// Signs in through the social provider.
    ///
    /// Returns `Ok(None)` when the user dismissed the flow; that case must not
    /// produce an error dialog.
    pub async fn login_with_google(&self) -> Result<Option<Identity>, SessionError> {
        let _op = self.begin().await;

        match self.social_flow().await {
            Ok(identity) => Ok(Some(identity)),
            Err(e) if e.is_cancellation() => {
                tracing::info!("[SessionStore] Google sign-in cancelled by user");
                Ok(None)
            }
            Err(SessionError::Auth(e)) => {
                tracing::error!("[SessionStore] Google login error: {}", e);
                Err(SessionError::SocialSignIn(e))
            }
            Err(e) => {
                tracing::error!("[SessionStore] Google login error: {}", e);
                Err(e)
            }
        }
    }

    async fn social_flow(&self) -> Result<Identity, SessionError> {
        let credential = match self.social.obtain_credential().await? {
            SocialOutcome::Credential(credential) => credential,
            SocialOutcome::Cancelled => return Err(AuthError::Cancelled.into()),
        };

        if matches!(&credential, SocialCredential::IdToken(token) if token.trim().is_empty()) {
            return Err(AuthError::MissingIdToken.into());
        }

        let principal = self.provider.exchange_social_credential(credential).await?;
        let identity = Identity::from_principal(&principal)?;
        self.commit(identity).await
    }

    /// Signs out of the social provider (best effort), then the identity
    /// provider, then clears the cache.
    ///
    /// If the identity provider refuses, the error is returned and the
    /// session stays as it was.
    pub async fn logout(&self) -> Result<(), SessionError> {
        let _op = self.begin().await;

        if let Err(e) = self.social.sign_out().await {
            tracing::debug!("[SessionStore] Social sign out skipped: {}", e);
        }

        self.provider
            .end_session()
            .await
            .inspect_err(|e| tracing::error!("[SessionStore] Logout error: {}", e))?;

        self.storage
            .remove(IDENTITY_KEY)
            .await
            .inspect_err(|e| tracing::error!("[SessionStore] Failed to clear cached identity: {}", e))?;

        self.publish(SessionState::Unauthenticated);
        Ok(())
    }

    // ============================================================================
    // Helpers
    // ============================================================================

    async fn begin(&self) -> Operation<'_> {
        let loading = LoadingGuard::new(&self.in_flight);
        let lock = self.op_lock.lock().await;
        Operation {
            _lock: lock,
            _loading: loading,
        }
    }

    /// Persists then publishes an authenticated identity.
    async fn commit(&self, identity: Identity) -> Result<Identity, SessionError> {
        self.write_identity(&identity).await?;
        self.publish(SessionState::Authenticated(identity.clone()));
        Ok(identity)
    }

    async fn write_identity(&self, identity: &Identity) -> Result<(), SessionError> {
        let raw = serde_json::to_string(identity).map_err(sanskriti_core::PersistenceError::from)?;
        self.storage.set(IDENTITY_KEY, &raw).await?;
        Ok(())
    }

    /// Notifies observers if the state actually changed.
    fn publish(&self, next: SessionState) {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

impl Drop for SessionStore {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.get() {
            listener.abort();
        }
    }
}

//! Scripted doubles for the identity provider, social sign-in and storage.

use async_trait::async_trait;
use sanskriti_core::error::{AuthError, PersistenceError, StorageResult};
use sanskriti_core::identity::{
    IdentityProvider, Principal, PrincipalStream, SocialCredential, SocialOutcome, SocialSignIn,
};
use sanskriti_core::storage::KeyValueStore;
use sanskriti_infrastructure::InMemoryKeyValueStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, watch};

fn unscripted() -> AuthError {
    AuthError::Provider {
        code: "unscripted".to_string(),
        message: "no result scripted".to_string(),
    }
}

/// Identity provider returning scripted results and recording calls.
pub struct ScriptedProvider {
    principal: watch::Sender<Option<Principal>>,
    next: Mutex<Option<Result<Principal, AuthError>>>,
    end_session_error: Mutex<Option<AuthError>>,
    verify_gate: Mutex<Option<Arc<Notify>>>,
    calls: Mutex<Vec<&'static str>>,
    exchanged: Mutex<Vec<SocialCredential>>,
}

impl ScriptedProvider {
    pub fn new(current: Option<Principal>) -> Self {
        let (principal, _) = watch::channel(current);
        Self {
            principal,
            next: Mutex::new(None),
            end_session_error: Mutex::new(None),
            verify_gate: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
            exchanged: Mutex::new(Vec::new()),
        }
    }

    /// Result of every subsequent verb call.
    pub fn set_next_principal(&self, principal: Principal) {
        *self.next.lock().unwrap() = Some(Ok(principal));
    }

    pub fn set_next_error(&self, error: AuthError) {
        *self.next.lock().unwrap() = Some(Err(error));
    }

    pub fn set_end_session_error(&self, error: AuthError) {
        *self.end_session_error.lock().unwrap() = Some(error);
    }

    /// Makes `verify_credentials` wait until the returned gate is notified.
    pub fn gate_verify(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.verify_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Emits a session-change notification.
    pub fn push(&self, principal: Option<Principal>) {
        self.principal.send_replace(principal);
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn end_session_calls(&self) -> usize {
        self.calls().iter().filter(|c| **c == "end_session").count()
    }

    pub fn exchanged(&self) -> Vec<SocialCredential> {
        self.exchanged.lock().unwrap().clone()
    }

    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn scripted(&self) -> Result<Principal, AuthError> {
        self.next.lock().unwrap().clone().unwrap_or_else(|| Err(unscripted()))
    }
}

#[async_trait]
impl IdentityProvider for ScriptedProvider {
    fn subscribe(&self) -> PrincipalStream {
        self.principal.subscribe()
    }

    async fn verify_credentials(
        &self,
        _email: &str,
        _password: &str,
    ) -> Result<Principal, AuthError> {
        self.record("verify_credentials");
        let gate = self.verify_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        self.scripted()
    }

    async fn create_account(&self, _email: &str, _password: &str) -> Result<Principal, AuthError> {
        self.record("create_account");
        self.scripted()
    }

    async fn exchange_social_credential(
        &self,
        credential: SocialCredential,
    ) -> Result<Principal, AuthError> {
        self.record("exchange_social_credential");
        self.exchanged.lock().unwrap().push(credential);
        self.scripted()
    }

    async fn end_session(&self) -> Result<(), AuthError> {
        self.record("end_session");
        match self.end_session_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// Social sign-in SDK with a scripted outcome.
pub struct ScriptedSocial {
    outcome: Mutex<Result<SocialOutcome, AuthError>>,
    sign_out_error: Mutex<Option<AuthError>>,
}

impl Default for ScriptedSocial {
    fn default() -> Self {
        Self {
            outcome: Mutex::new(Ok(SocialOutcome::Cancelled)),
            sign_out_error: Mutex::new(None),
        }
    }
}

impl ScriptedSocial {
    pub fn set_outcome(&self, outcome: Result<SocialOutcome, AuthError>) {
        *self.outcome.lock().unwrap() = outcome;
    }

    pub fn set_sign_out_error(&self, error: AuthError) {
        *self.sign_out_error.lock().unwrap() = Some(error);
    }
}

#[async_trait]
impl SocialSignIn for ScriptedSocial {
    async fn obtain_credential(&self) -> Result<SocialOutcome, AuthError> {
        self.outcome.lock().unwrap().clone()
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        match self.sign_out_error.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

/// In-memory store whose reads or writes can be made to fail.
pub struct FlakyStore {
    inner: InMemoryKeyValueStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn new(inner: InMemoryKeyValueStore) -> Self {
        Self {
            inner,
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> StorageResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(PersistenceError::io("disk unavailable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Self::check(&self.fail_reads)?;
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        Self::check(&self.fail_writes)?;
        self.inner.set(key, value).await
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        Self::check(&self.fail_writes)?;
        self.inner.remove(key).await
    }
}

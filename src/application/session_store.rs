//! Session store: the single source of truth for the current identity.
//!
//! Views and the navigation guard receive the store explicitly; nothing
//! reads a global "current user". The store starts in `Loading` and only
//! leaves it once the identity provider has reported.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::domain::foundation::{
    validate_email, AuthError, Identity, ListenerId, OAuthProvider, PasswordCredentials,
    Registration,
};
use crate::domain::session::{IdentityEvent, SessionSnapshot};
use crate::ports::IdentityProvider;

type Listener = Arc<dyn Fn(&SessionSnapshot) + Send + Sync>;
type ListenerMap = Mutex<HashMap<ListenerId, Listener>>;

/// Tracks the current identity and notifies listeners when it changes.
pub struct SessionStore {
    provider: Arc<dyn IdentityProvider>,
    state: watch::Sender<SessionSnapshot>,
    listeners: Arc<ListenerMap>,
}

/// Handle returned by [`SessionStore::on_change`].
///
/// The listener stays registered until this handle is dropped or
/// [`Subscription::unsubscribe`] is called.
pub struct Subscription {
    id: ListenerId,
    listeners: Weak<ListenerMap>,
}

impl Subscription {
    /// Removes the listener.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            lock(&listeners).remove(&self.id);
        }
    }
}

fn lock(listeners: &ListenerMap) -> MutexGuard<'_, HashMap<ListenerId, Listener>> {
    listeners.lock().unwrap_or_else(PoisonError::into_inner)
}

impl SessionStore {
    /// Creates a store in the `Loading` state.
    pub fn new(provider: Arc<dyn IdentityProvider>) -> Self {
        let (state, _) = watch::channel(SessionSnapshot::Loading);
        Self {
            provider,
            state,
            listeners: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Forwards provider events into the store on a background task.
    ///
    /// The task ends when the provider closes its stream or the store is
    /// dropped. If the task falls behind, it resynchronizes with
    /// `IdentityProvider::reload`.
    pub fn attach(self: &Arc<Self>) -> JoinHandle<()> {
        let mut events = self.provider.subscribe();
        let weak_store = Arc::downgrade(self);

        tokio::spawn(async move {
            loop {
                let event = events.recv().await;
                let Some(store) = weak_store.upgrade() else { break };
                match event {
                    Ok(event) => store.apply(&event),
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!("Missed {} identity events, reloading", skipped);
                        match store.provider.reload().await {
                            Ok(Some(identity)) => store.apply(&IdentityEvent::Refreshed(identity)),
                            Ok(None) => store.apply(&IdentityEvent::SignedOut),
                            Err(e) => tracing::error!("Identity reload failed: {}", e),
                        }
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            tracing::debug!("Identity event stream closed");
        })
    }

    /// Synchronous snapshot of the current identity.
    pub fn current_identity(&self) -> Option<Identity> {
        self.state.borrow().identity().cloned()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// Registers a listener invoked on every sign-in, sign-out or refresh
    /// that changes the snapshot.
    pub fn on_change<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&SessionSnapshot) + Send + Sync + 'static,
    {
        let id = ListenerId::new();
        lock(&self.listeners).insert(id, Arc::new(handler));
        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Waits until the identity provider has reported at least once.
    pub async fn wait_until_resolved(&self) -> SessionSnapshot {
        let mut receiver = self.state.subscribe();
        let resolved = match receiver.wait_for(|snapshot| !snapshot.is_loading()).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        resolved
    }

    /// Folds a provider event into the store.
    ///
    /// Events that leave the snapshot unchanged (a repeated refresh) do not
    /// notify listeners.
    pub fn apply(&self, event: &IdentityEvent) {
        let next = SessionSnapshot::from_event(event);
        let changed = self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next.clone();
                true
            }
        });
        if !changed {
            return;
        }

        match &next {
            SessionSnapshot::SignedIn(identity) => {
                tracing::info!(user_id = %identity.id, provider = %identity.auth_provider, "Session signed in");
            }
            _ => tracing::info!("Session signed out"),
        }

        let listeners: Vec<Listener> = lock(&self.listeners).values().cloned().collect();
        for listener in listeners {
            listener(&next);
        }
    }

    pub async fn sign_in_with_password(
        &self,
        credentials: &PasswordCredentials,
    ) -> Result<Identity, AuthError> {
        let identity = self.provider.sign_in_with_password(credentials).await?;
        self.apply(&IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    pub async fn sign_in_with_oauth(&self, provider: OAuthProvider) -> Result<Identity, AuthError> {
        let identity = self.provider.sign_in_with_oauth(provider).await?;
        self.apply(&IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    /// Creates an account; the identity is signed in but unverified.
    pub async fn register(&self, registration: &Registration) -> Result<Identity, AuthError> {
        let identity = self.provider.register(registration).await?;
        self.apply(&IdentityEvent::SignedIn(identity.clone()));
        Ok(identity)
    }

    pub async fn send_password_reset(&self, email: &str) -> Result<(), AuthError> {
        let email = validate_email(email.to_string())?;
        self.provider.send_password_reset(&email).await
    }

    /// Re-reads the identity, e.g. after the visitor verified their email.
    pub async fn reload(&self) -> Result<Option<Identity>, AuthError> {
        let identity = self.provider.reload().await?;
        match &identity {
            Some(identity) => self.apply(&IdentityEvent::Refreshed(identity.clone())),
            None => self.apply(&IdentityEvent::SignedOut),
        }
        Ok(identity)
    }

    /// Signs out. Provider failures are returned and the session is kept.
    pub async fn sign_out(&self) -> Result<(), AuthError> {
        self.provider.sign_out().await?;
        self.apply(&IdentityEvent::SignedOut);
        Ok(())
    }
}

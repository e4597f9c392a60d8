//! Navigation guard: render, redirect, or force the emergency view.

use std::sync::Arc;

use crate::domain::navigation::{
    decide_gated, decide_ungated, sos_override, NavigationDecision, Route,
};

use super::{ProfileGate, SessionStore, SosChannel};

/// Decides every navigation attempt from the current session, the profile
/// gate and the emergency flag.
///
/// Nothing is cached between attempts. Profile completion and SOS
/// activation can change at any time, so each call starts from scratch.
pub struct NavigationGuard {
    session: Arc<SessionStore>,
    gate: ProfileGate,
    sos: Arc<SosChannel>,
}

impl NavigationGuard {
    pub fn new(session: Arc<SessionStore>, gate: ProfileGate, sos: Arc<SosChannel>) -> Self {
        Self { session, gate, sos }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Parses a location and evaluates it.
    pub async fn evaluate_path(&self, location: &str) -> NavigationDecision {
        self.evaluate(Route::parse(location)).await
    }

    /// Evaluates one navigation attempt.
    ///
    /// The emergency flag is read first and dominates everything. While the
    /// identity provider has not reported yet, gated views get `Loading`
    /// rather than a premature redirect to the login view.
    pub async fn evaluate(&self, route: Route) -> NavigationDecision {
        if let Some(decision) = sos_override(route, self.sos.status()) {
            tracing::debug!(route = route.path(), "SOS active, locking navigation");
            return decision;
        }
        if let Some(decision) = decide_ungated(route) {
            return decision;
        }

        let snapshot = self.session.snapshot();
        if snapshot.is_loading() {
            tracing::debug!(route = route.path(), "Identity unresolved, showing loading state");
            return NavigationDecision::Loading;
        }

        let evaluation = self.gate.evaluate(snapshot.identity()).await;

        // SOS may have been raised while the profile fetch was in flight.
        if let Some(decision) = sos_override(route, self.sos.status()) {
            return decision;
        }

        let decision = decide_gated(route, &evaluation);
        tracing::debug!(
            route = route.path(),
            state = %evaluation.state,
            target = ?decision.target(),
            "Navigation decided"
        );
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::identity::MockIdentityProvider;
    use crate::adapters::profile::InMemoryProfileStore;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::foundation::{AuthProvider, Identity, UserId};
    use crate::domain::navigation::Notice;
    use crate::domain::profile::ProfileRecord;
    use crate::domain::session::IdentityEvent;
    use crate::domain::sos::{SosPayload, SOS_STORAGE_KEY};
    use crate::ports::{KeyValueStore, ProfileError, ProfileStore, StorageError};
    use proptest::prelude::*;

    fn uid() -> UserId {
        UserId::new("user-1").unwrap()
    }

    fn completed() -> ProfileRecord {
        let mut record = ProfileRecord::default();
        record.mark_completed();
        record
    }

    fn payload() -> SosPayload {
        SosPayload {
            status: "SOS Activated".into(),
            voice_text: "Stay calm.".into(),
        }
    }

    struct Fixture {
        session: Arc<SessionStore>,
        profiles: Arc<InMemoryProfileStore>,
        sos: Arc<SosChannel>,
        guard: NavigationGuard,
    }

    fn fixture() -> Fixture {
        let session = Arc::new(SessionStore::new(Arc::new(MockIdentityProvider::new())));
        let profiles = Arc::new(InMemoryProfileStore::new());
        let sos = Arc::new(SosChannel::new(Arc::new(InMemoryKeyValueStore::new())));
        let guard = NavigationGuard::new(
            session.clone(),
            ProfileGate::new(profiles.clone()),
            sos.clone(),
        );
        Fixture {
            session,
            profiles,
            sos,
            guard,
        }
    }

    fn sign_in(f: &Fixture, verified: bool, provider: AuthProvider) {
        f.session
            .apply(&IdentityEvent::SignedIn(Identity::new(uid(), verified, provider)));
    }

    #[tokio::test]
    async fn unresolved_identity_shows_loading_not_login() {
        let f = fixture();
        assert_eq!(f.guard.evaluate(Route::Dashboard).await, NavigationDecision::Loading);
        assert_eq!(
            f.guard.evaluate(Route::Login).await,
            NavigationDecision::render(Route::Login)
        );
    }

    #[tokio::test]
    async fn anonymous_is_sent_to_login() {
        let f = fixture();
        f.session.apply(&IdentityEvent::Restored(None));

        let decision = f.guard.evaluate(Route::Chat).await;

        assert_eq!(decision.target(), Some(Route::Login));
        assert_eq!(decision.notice(), Some(&Notice::PleaseLogin));
    }

    #[tokio::test]
    async fn unverified_password_is_sent_to_login_with_notice() {
        let f = fixture();
        sign_in(&f, false, AuthProvider::Password);

        let decision = f.guard.evaluate(Route::Dashboard).await;

        assert_eq!(decision.target(), Some(Route::Login));
        assert_eq!(decision.notice(), Some(&Notice::VerifyEmail));
    }

    #[tokio::test]
    async fn incomplete_profile_goes_to_onboarding() {
        let f = fixture();
        sign_in(&f, true, AuthProvider::Password);

        assert_eq!(
            f.guard.evaluate(Route::Profile).await,
            NavigationDecision::redirect(Route::Onboarding)
        );
        assert_eq!(
            f.guard.evaluate(Route::Onboarding).await,
            NavigationDecision::render(Route::Onboarding)
        );
    }

    #[tokio::test]
    async fn authorized_renders_protected_views() {
        let f = fixture();
        sign_in(&f, false, AuthProvider::Google);
        f.profiles.save_profile(&uid(), &completed()).await.unwrap();

        for route in [Route::Dashboard, Route::Chat, Route::Profile] {
            assert_eq!(f.guard.evaluate(route).await, NavigationDecision::render(route));
        }
        assert_eq!(
            f.guard.evaluate(Route::Onboarding).await,
            NavigationDecision::redirect(Route::Dashboard)
        );
    }

    #[tokio::test]
    async fn profile_outage_fails_closed_with_retry_notice() {
        let f = fixture();
        sign_in(&f, true, AuthProvider::Password);
        f.profiles.save_profile(&uid(), &completed()).await.unwrap();
        f.profiles
            .set_error(Some(ProfileError::Unavailable("timeout".into())));

        let decision = f.guard.evaluate(Route::Dashboard).await;

        assert_eq!(decision.target(), Some(Route::Onboarding));
        assert!(decision.notice().map_or(false, Notice::is_retryable));
    }

    #[tokio::test]
    async fn sos_view_without_session_goes_home() {
        let f = fixture();
        assert_eq!(
            f.guard.evaluate(Route::Sos).await,
            NavigationDecision::redirect(Route::Home)
        );
    }

    #[tokio::test]
    async fn sos_locks_public_views_and_loading_state() {
        let f = fixture();
        f.sos.activate(payload()).unwrap();

        assert_eq!(
            f.guard.evaluate(Route::Home).await,
            NavigationDecision::redirect(Route::Sos)
        );
        assert_eq!(
            f.guard.evaluate(Route::Dashboard).await,
            NavigationDecision::redirect(Route::Sos)
        );
        assert_eq!(
            f.guard.evaluate_path("/sos").await,
            NavigationDecision::render(Route::Sos)
        );
    }

    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io("disk unavailable".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("disk unavailable".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io("disk unavailable".into()))
        }
    }

    #[tokio::test]
    async fn unreadable_sos_storage_keeps_navigation_locked() {
        let session = Arc::new(SessionStore::new(Arc::new(MockIdentityProvider::new())));
        session.apply(&IdentityEvent::Restored(None));
        let profiles = Arc::new(InMemoryProfileStore::new());
        let guard = NavigationGuard::new(
            session,
            ProfileGate::new(profiles.clone()),
            Arc::new(SosChannel::new(Arc::new(FailingStore))),
        );

        for route in [Route::Home, Route::Login, Route::Dashboard, Route::Onboarding] {
            let decision = guard.evaluate(route).await;
            assert_eq!(
                decision,
                NavigationDecision::Redirect {
                    to: Route::Sos,
                    notice: Some(Notice::SosStatusUnknown),
                }
            );
        }
        assert_eq!(
            guard.evaluate(Route::Sos).await,
            NavigationDecision::Render {
                route: Route::Sos,
                notice: Some(Notice::SosStatusUnknown),
            }
        );
        assert_eq!(profiles.fetch_count(), 0);
    }

    #[tokio::test]
    async fn malformed_sos_record_locks_until_cleared() {
        let store = InMemoryKeyValueStore::new();
        store.set(SOS_STORAGE_KEY, "{not json").unwrap();
        let session = Arc::new(SessionStore::new(Arc::new(MockIdentityProvider::new())));
        session.apply(&IdentityEvent::Restored(None));
        let sos = Arc::new(SosChannel::new(Arc::new(store)));
        let guard = NavigationGuard::new(
            session,
            ProfileGate::new(Arc::new(InMemoryProfileStore::new())),
            sos.clone(),
        );

        assert_eq!(guard.evaluate(Route::Home).await.target(), Some(Route::Sos));

        sos.clear().unwrap();

        assert_eq!(
            guard.evaluate(Route::Home).await,
            NavigationDecision::render(Route::Home)
        );
    }

    #[tokio::test]
    async fn clearing_sos_restores_normal_rules() {
        let f = fixture();
        f.session.apply(&IdentityEvent::Restored(None));
        f.sos.activate(payload()).unwrap();
        f.sos.clear().unwrap();

        assert_eq!(
            f.guard.evaluate(Route::Home).await,
            NavigationDecision::render(Route::Home)
        );
    }

    #[tokio::test]
    async fn reevaluates_after_profile_completion() {
        let f = fixture();
        sign_in(&f, true, AuthProvider::Password);
        assert_eq!(
            f.guard.evaluate(Route::Dashboard).await.target(),
            Some(Route::Onboarding)
        );

        f.profiles.save_profile(&uid(), &completed()).await.unwrap();

        assert_eq!(
            f.guard.evaluate(Route::Dashboard).await,
            NavigationDecision::render(Route::Dashboard)
        );
    }

    #[derive(Debug, Clone, Copy)]
    enum SessionCase {
        Loading,
        SignedOut,
        SignedIn(bool, AuthProvider),
    }

    fn session_case() -> impl Strategy<Value = SessionCase> {
        let provider = prop_oneof![Just(AuthProvider::Password), Just(AuthProvider::Google)];
        prop_oneof![
            Just(SessionCase::Loading),
            Just(SessionCase::SignedOut),
            (any::<bool>(), provider).prop_map(|(v, p)| SessionCase::SignedIn(v, p)),
        ]
    }

    proptest! {
        #[test]
        fn active_sos_redirects_every_other_view(
            route_index in 0..Route::ALL.len(),
            case in session_case(),
            profile_completed in any::<bool>(),
            profile_outage in any::<bool>(),
        ) {
            let route = Route::ALL[route_index];
            let runtime = tokio::runtime::Builder::new_current_thread()
                .build()
                .unwrap();

            let decision = runtime.block_on(async {
                let f = fixture();
                match case {
                    SessionCase::Loading => {}
                    SessionCase::SignedOut => f.session.apply(&IdentityEvent::SignedOut),
                    SessionCase::SignedIn(verified, provider) => sign_in(&f, verified, provider),
                }
                if profile_completed {
                    f.profiles.save_profile(&uid(), &completed()).await.unwrap();
                }
                if profile_outage {
                    f.profiles.set_error(Some(ProfileError::Unavailable("down".into())));
                }
                f.sos.activate(payload()).unwrap();
                f.guard.evaluate(route).await
            });

            if route == Route::Sos {
                prop_assert_eq!(decision, NavigationDecision::render(Route::Sos));
            } else {
                prop_assert_eq!(decision, NavigationDecision::redirect(Route::Sos));
            }
        }
    }
}

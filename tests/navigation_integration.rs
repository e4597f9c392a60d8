//! Integration tests for the navigation core.
//!
//! These tests drive the session store, profile gate, SOS channel and
//! navigator together through the public API:
//! 1. The full sign-up journey from unverified account to SOS lock-out
//! 2. Late profile results never overwrite a newer navigation

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use respi_guard::adapters::backend::MockBackend;
use respi_guard::adapters::device::{FixedLocationService, LoggingSpeechService};
use respi_guard::adapters::identity::MockIdentityProvider;
use respi_guard::adapters::profile::InMemoryProfileStore;
use respi_guard::adapters::storage::InMemoryKeyValueStore;
use respi_guard::application::handlers::{
    ActivateSosHandler, CompleteOnboardingCommand, CompleteOnboardingHandler, EndSosHandler,
};
use respi_guard::application::{
    NavigationGuard, Navigator, ProfileGate, SessionStore, SosChannel, ViewState,
};
use respi_guard::domain::foundation::{
    AuthProvider, GeoPoint, Identity, PasswordCredentials, UserId,
};
use respi_guard::domain::navigation::{NavigationDecision, Notice, Route};
use respi_guard::domain::profile::{ProfileForm, ProfileRecord, Severity};
use respi_guard::domain::session::IdentityEvent;
use respi_guard::ports::{ProfileError, ProfileStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

const EMAIL: &str = "ana@example.com";
const PASSWORD: &str = "secret1";

fn uid() -> UserId {
    UserId::new("user-1").unwrap()
}

fn onboarding_form() -> ProfileForm {
    ProfileForm {
        conditions: vec!["Asthma".to_string()],
        severity: Some(Severity::Moderate),
        home_city: "Delhi".to_string(),
        ..ProfileForm::default()
    }
}

/// Profile store whose next fetch parks until released.
struct GatedProfileStore {
    inner: InMemoryProfileStore,
    block_next: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl GatedProfileStore {
    fn new(inner: InMemoryProfileStore) -> Self {
        Self {
            inner,
            block_next: AtomicBool::new(false),
            entered: Notify::new(),
            release: Notify::new(),
        }
    }
}

#[async_trait]
impl ProfileStore for GatedProfileStore {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileRecord, ProfileError> {
        if self.block_next.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
        self.inner.fetch_profile(user_id).await
    }

    async fn save_profile(
        &self,
        user_id: &UserId,
        record: &ProfileRecord,
    ) -> Result<(), ProfileError> {
        self.inner.save_profile(user_id, record).await
    }
}

// =============================================================================
// End-to-end journey
// =============================================================================

#[tokio::test]
async fn sign_up_journey_ends_in_sos_lock_out() {
    let provider = Arc::new(MockIdentityProvider::new().with_account(
        EMAIL,
        PASSWORD,
        Identity::new(uid(), false, AuthProvider::Password).with_email(EMAIL),
    ));
    let session = Arc::new(SessionStore::new(provider.clone()));
    let profiles = Arc::new(InMemoryProfileStore::new());
    let sos = Arc::new(SosChannel::new(Arc::new(InMemoryKeyValueStore::new())));
    let backend = MockBackend::new();
    let speech = Arc::new(LoggingSpeechService::new());
    let navigator = Navigator::new(Arc::new(NavigationGuard::new(
        session.clone(),
        ProfileGate::new(profiles.clone()),
        sos.clone(),
    )));

    // Provider's first callback: nobody signed in
    session.apply(&IdentityEvent::Restored(None));

    // Unverified password account is bounced to login
    session
        .sign_in_with_password(&PasswordCredentials::new(EMAIL, PASSWORD).unwrap())
        .await
        .unwrap();
    let decision = navigator.navigate("/dashboard").await;
    assert_eq!(decision.target(), Some(Route::Login));
    assert_eq!(decision.notice(), Some(&Notice::VerifyEmail));

    // Verified, but no profile document yet
    provider.verify_email(EMAIL);
    session.reload().await.unwrap();
    assert_eq!(
        navigator.navigate("/dashboard").await,
        NavigationDecision::redirect(Route::Onboarding)
    );
    assert_eq!(navigator.current().route(), Some(Route::Onboarding));

    // Onboarding completes and the dashboard opens
    CompleteOnboardingHandler::new(session.clone(), profiles.clone(), Arc::new(backend.clone()))
        .handle(CompleteOnboardingCommand {
            form: onboarding_form(),
        })
        .await
        .unwrap();
    assert_eq!(
        navigator.navigate("/dashboard").await,
        NavigationDecision::render(Route::Dashboard)
    );

    // SOS locks every view, typed addresses included
    ActivateSosHandler::new(
        session.clone(),
        Arc::new(FixedLocationService::new(GeoPoint::new(28.61, 77.21).unwrap())),
        Arc::new(backend.clone()),
        sos.clone(),
        speech.clone(),
    )
    .handle()
    .await
    .unwrap();

    for path in ["/dashboard", "/", "/chat", "/profile", "/login", "/onboarding", "/nope"] {
        assert_eq!(
            navigator.navigate(path).await,
            NavigationDecision::redirect(Route::Sos),
            "{} should be locked",
            path
        );
    }
    assert_eq!(
        navigator.navigate("/sos").await,
        NavigationDecision::render(Route::Sos)
    );

    // Lock-out survives sign-out
    session.sign_out().await.unwrap();
    assert_eq!(
        navigator.navigate("/dashboard").await,
        NavigationDecision::redirect(Route::Sos)
    );

    // Ending SOS restores normal rules
    EndSosHandler::new(sos.clone(), speech).handle().unwrap();
    let decision = navigator.navigate("/dashboard").await;
    assert_eq!(decision.target(), Some(Route::Login));
    assert_eq!(decision.notice(), Some(&Notice::PleaseLogin));
}

// =============================================================================
// Stale responses
// =============================================================================

struct StaleFixture {
    profiles: Arc<GatedProfileStore>,
    navigator: Arc<Navigator>,
}

fn stale_fixture() -> StaleFixture {
    let mut completed = ProfileRecord::default();
    completed.mark_completed();
    let profiles = Arc::new(GatedProfileStore::new(
        InMemoryProfileStore::new().with_profile(uid(), completed),
    ));

    let session = Arc::new(SessionStore::new(Arc::new(MockIdentityProvider::new())));
    session.apply(&IdentityEvent::SignedIn(Identity::new(
        uid(),
        true,
        AuthProvider::Password,
    )));
    let sos = Arc::new(SosChannel::new(Arc::new(InMemoryKeyValueStore::new())));
    let guard = NavigationGuard::new(session, ProfileGate::new(profiles.clone()), sos);

    StaleFixture {
        profiles,
        navigator: Arc::new(Navigator::new(Arc::new(guard))),
    }
}

#[tokio::test]
async fn late_profile_result_does_not_replace_newer_view() {
    let f = stale_fixture();
    f.profiles.block_next.store(true, Ordering::SeqCst);

    let first = tokio::spawn({
        let navigator = f.navigator.clone();
        async move { navigator.navigate("/dashboard").await }
    });
    f.profiles.entered.notified().await;

    let second = f.navigator.navigate("/").await;
    assert_eq!(second, NavigationDecision::render(Route::Home));

    f.profiles.release.notify_one();
    let first = first.await.unwrap();

    assert_eq!(first, NavigationDecision::Superseded);
    assert_eq!(
        f.navigator.current(),
        ViewState::Showing {
            route: Route::Home,
            notice: None,
        }
    );
}

#[tokio::test]
async fn newest_of_two_protected_navigations_wins() {
    let f = stale_fixture();
    f.profiles.block_next.store(true, Ordering::SeqCst);

    let first = tokio::spawn({
        let navigator = f.navigator.clone();
        async move { navigator.navigate("/chat").await }
    });
    f.profiles.entered.notified().await;

    let second = f.navigator.navigate("/profile").await;
    f.profiles.release.notify_one();
    let first = first.await.unwrap();

    assert_eq!(second, NavigationDecision::render(Route::Profile));
    assert_eq!(first, NavigationDecision::Superseded);
    assert_eq!(f.navigator.current().route(), Some(Route::Profile));
}

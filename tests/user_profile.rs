//! Tests for the user profile loader, under a paused Tokio clock.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use tablekit::components::{User, UserApi, UserProfile};
use tablekit::error::LoadError;

struct MockApi {
    delay: Duration,
    fail: bool,
}

impl MockApi {
    fn slow(delay_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::from_millis(delay_ms),
            fail: false,
        })
    }

    fn failing() -> Arc<Self> {
        Arc::new(Self {
            delay: Duration::from_millis(10),
            fail: true,
        })
    }
}

#[async_trait]
impl UserApi for MockApi {
    async fn fetch_user(&self, user_id: &str) -> Result<User, LoadError> {
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(LoadError::new("backend unavailable"));
        }
        Ok(User {
            id: user_id.to_string(),
            name: format!("user {user_id}"),
            email: format!("{user_id}@example.com"),
            avatar: format!("https://example.com/{user_id}.png"),
            role: "developer".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap(),
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_load_success() {
    let profile = UserProfile::new(MockApi::slow(100));
    let loaded: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&loaded);
    profile.on_user_load(move |user| {
        sink.lock().unwrap().push(user.id.clone());
    });

    profile.load("u-1");
    assert!(profile.is_loading());
    assert!(profile.user().is_none());

    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(profile.is_ready());
    let user = profile.user().unwrap();
    assert_eq!(user.id, "u-1");
    assert_eq!(user.email, "u-1@example.com");
    assert_eq!(*loaded.lock().unwrap(), vec!["u-1"]);
}

#[tokio::test(start_paused = true)]
async fn test_load_failure() {
    let profile = UserProfile::new(MockApi::failing());

    profile.load("u-1");
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(profile.is_error());
    assert!(profile.user().is_none());
    assert_eq!(
        profile.state().as_error().unwrap().message,
        "backend unavailable"
    );
}

#[tokio::test(start_paused = true)]
async fn test_new_load_supersedes_in_flight_load() {
    let profile = UserProfile::new(MockApi::slow(500));
    let notifications = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&notifications);
    profile.on_user_load(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    profile.load("u-1");
    tokio::time::sleep(Duration::from_millis(100)).await;
    profile.load("u-2");

    tokio::time::sleep(Duration::from_millis(600)).await;
    let user = profile.user().unwrap();
    assert_eq!(user.id, "u-2");
    // The superseded load was cancelled before completion
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_dispose_prevents_stale_update() {
    let profile = UserProfile::new(MockApi::slow(500));
    let notifications = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&notifications);
    profile.on_user_load(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    profile.load("u-1");
    tokio::time::sleep(Duration::from_millis(100)).await;
    profile.dispose();

    tokio::time::sleep(Duration::from_millis(600)).await;
    assert!(!profile.is_ready());
    assert!(!profile.is_error());
    assert_eq!(notifications.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_reloads_current_user() {
    let profile = UserProfile::new(MockApi::slow(50));
    let notifications = Arc::new(AtomicUsize::new(0));
    let sink = Arc::clone(&notifications);
    profile.on_user_load(move |_| {
        sink.fetch_add(1, Ordering::SeqCst);
    });

    profile.load("u-7");
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(profile.is_ready());

    profile.refresh();
    assert!(profile.is_loading());

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(profile.is_ready());
    assert_eq!(profile.user().unwrap().id, "u-7");
    assert_eq!(notifications.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_refresh_without_prior_load_does_nothing() {
    let profile = UserProfile::new(MockApi::slow(50));
    profile.refresh();
    assert!(profile.state().is_idle());
}

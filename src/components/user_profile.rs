//! User profile component - a single cancellable async load.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::error::LoadError;
use crate::resource::{Resource, ResourceState};
use crate::state::State;

/// A user record as returned by the backing API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub avatar: String,
    /// Role label.
    pub role: String,
    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

/// Backend seam for fetching users.
///
/// Callers supply the implementation; tests use a mock.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Fetch a single user by ID.
    async fn fetch_user(&self, user_id: &str) -> Result<User, LoadError>;
}

/// Observer for completed loads; receives the loaded user.
pub type UserObserver = Arc<dyn Fn(&User) + Send + Sync>;

/// User profile state: one cancellable async load at a time.
///
/// Each [`load`](UserProfile::load) cancels the in-flight attempt and
/// races the new fetch against a fresh [`CancellationToken`], so a
/// superseded or disposed load can never write a stale result.
///
/// # Example
///
/// ```ignore
/// let profile = UserProfile::new(Arc::new(HttpUserApi::default()));
/// profile.on_user_load(|user| {
///     log::info!("loaded {}", user.name);
/// });
/// profile.load("u-42");
/// ```
pub struct UserProfile {
    /// Backend used for fetches.
    api: Arc<dyn UserApi>,
    /// ID of the user being shown.
    user_id: State<String>,
    /// Load state of the profile.
    resource: Resource<User>,
    /// Token for the in-flight load, if any.
    cancel: State<Option<CancellationToken>>,
    /// Completed-load sink, at most one.
    on_user_load: Arc<RwLock<Option<UserObserver>>>,
}

impl UserProfile {
    /// Create a new profile component over the given backend.
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            user_id: State::default(),
            resource: Resource::new(),
            cancel: State::default(),
            on_user_load: Arc::new(RwLock::new(None)),
        }
    }

    /// Register the completed-load sink. At most one is active; a new
    /// registration replaces the previous one.
    pub fn on_user_load(&self, observer: impl Fn(&User) + Send + Sync + 'static) {
        if let Ok(mut guard) = self.on_user_load.write() {
            *guard = Some(Arc::new(observer));
        }
    }

    /// Start loading the given user.
    ///
    /// Cancels any in-flight load first. Must be called from within a
    /// Tokio runtime.
    pub fn load(&self, user_id: impl Into<String>) {
        let user_id = user_id.into();
        if let Some(token) = self.cancel.get() {
            token.cancel();
        }
        let token = CancellationToken::new();
        self.cancel.set(Some(token.clone()));
        self.user_id.set(user_id.clone());
        self.resource.set_loading();

        let api = Arc::clone(&self.api);
        let resource = self.resource.clone();
        let observer = Arc::clone(&self.on_user_load);
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    log::debug!("user load cancelled: {user_id}");
                }
                result = api.fetch_user(&user_id) => match result {
                    Ok(user) => {
                        resource.set_ready(user.clone());
                        let sink = observer.read().ok().and_then(|guard| guard.clone());
                        if let Some(sink) = sink {
                            sink(&user);
                        }
                    }
                    Err(err) => {
                        log::debug!("user load failed: {user_id}: {err}");
                        resource.set_error(err);
                    }
                },
            }
        });
    }

    /// Re-run the load for the current user ID.
    pub fn refresh(&self) {
        let user_id = self.user_id.get();
        if !user_id.is_empty() {
            self.load(user_id);
        }
    }

    /// Cancel the in-flight load, if any, and drop the sink.
    pub fn dispose(&self) {
        if let Some(token) = self.cancel.get() {
            token.cancel();
        }
        self.cancel.set(None);
        if let Ok(mut guard) = self.on_user_load.write() {
            *guard = None;
        }
    }

    // -------------------------------------------------------------------------
    // Read-only outputs
    // -------------------------------------------------------------------------

    /// The ID of the user being shown.
    pub fn user_id(&self) -> String {
        self.user_id.get()
    }

    /// The current load state.
    pub fn state(&self) -> ResourceState<User> {
        self.resource.get()
    }

    /// The loaded user, if ready.
    pub fn user(&self) -> Option<User> {
        match self.resource.get() {
            ResourceState::Ready(user) => Some(user),
            _ => None,
        }
    }

    /// Check if a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.resource.is_loading()
    }

    /// Check if the profile is loaded.
    pub fn is_ready(&self) -> bool {
        self.resource.is_ready()
    }

    /// Check if the last load failed.
    pub fn is_error(&self) -> bool {
        self.resource.is_error()
    }
}

impl Clone for UserProfile {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            user_id: self.user_id.clone(),
            resource: self.resource.clone(),
            cancel: self.cancel.clone(),
            on_user_load: Arc::clone(&self.on_user_load),
        }
    }
}

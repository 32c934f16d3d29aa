use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::error::LoadError;

/// The state of an async-loadable resource.
#[derive(Debug, Clone, Default)]
pub enum ResourceState<T> {
    /// Resource has not started loading
    #[default]
    Idle,
    /// Resource is loading
    Loading,
    /// Resource loaded successfully
    Ready(T),
    /// Resource failed to load
    Error(LoadError),
}

impl<T> ResourceState<T> {
    /// Check if resource is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Check if resource errored
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Get reference to ready value
    pub fn as_ready(&self) -> Option<&T> {
        match self {
            Self::Ready(v) => Some(v),
            _ => None,
        }
    }

    /// Get the error if present
    pub fn as_error(&self) -> Option<&LoadError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Map the ready value
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ResourceState<U> {
        match self {
            Self::Idle => ResourceState::Idle,
            Self::Loading => ResourceState::Loading,
            Self::Ready(v) => ResourceState::Ready(f(v)),
            Self::Error(e) => ResourceState::Error(e),
        }
    }
}

/// Async-loadable resource with interior mutability.
///
/// `Resource<T>` wraps a [`ResourceState<T>`] with thread-safe,
/// async-compatible state management, so a spawned load task and the
/// owning component can share it across the task boundary.
///
/// # Example
///
/// ```
/// use tablekit::resource::Resource;
///
/// let data: Resource<Vec<String>> = Resource::new();
/// data.set_loading();
/// data.set_ready(vec!["one".to_string()]);
/// assert!(data.is_ready());
/// ```
#[derive(Debug)]
pub struct Resource<T> {
    inner: Arc<RwLock<ResourceState<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T> Resource<T> {
    /// Create a new resource in idle state
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(ResourceState::Idle)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Get a clone of the current state
    pub fn get(&self) -> ResourceState<T>
    where
        T: Clone,
    {
        self.inner
            .read()
            .map(|guard| guard.clone())
            .unwrap_or(ResourceState::Idle)
    }

    /// Set to idle state
    pub fn set_idle(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = ResourceState::Idle;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set to loading state
    pub fn set_loading(&self) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = ResourceState::Loading;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set to ready state with value
    pub fn set_ready(&self, value: T) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = ResourceState::Ready(value);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Set to error state
    pub fn set_error(&self, err: impl Into<LoadError>) {
        if let Ok(mut guard) = self.inner.write() {
            *guard = ResourceState::Error(err.into());
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Check if the resource has been modified since last check
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag
    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }

    /// Check if resource is idle
    pub fn is_idle(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_idle())
            .unwrap_or(true)
    }

    /// Check if resource is loading
    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_loading())
            .unwrap_or(false)
    }

    /// Check if resource is ready
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_ready())
            .unwrap_or(false)
    }

    /// Check if resource has an error
    pub fn is_error(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.is_error())
            .unwrap_or(false)
    }
}

impl<T> Default for Resource<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

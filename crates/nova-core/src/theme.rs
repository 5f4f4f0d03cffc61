//! Appearance: light and dark palettes following the system colour scheme
//!
//! Listeners are held by the provider and removed when their
//! [`Subscription`] guard is dropped, so a view subscribes on mount and
//! unsubscribes by dropping the guard on unmount.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub primary: &'static str,
}

pub const LIGHT_PALETTE: Palette = Palette {
    background: "#ffffff",
    surface: "#ffffff",
    text: "#000000",
    text_secondary: "#999999",
    border: "#cccccc",
    primary: "#000000",
};

pub const DARK_PALETTE: Palette = Palette {
    background: "#000000",
    surface: "#111111",
    text: "#ffffff",
    text_secondary: "#666666",
    border: "#333333",
    primary: "#ffffff",
};

impl ColorScheme {
    pub fn palette(&self) -> &'static Palette {
        match self {
            ColorScheme::Light => &LIGHT_PALETTE,
            ColorScheme::Dark => &DARK_PALETTE,
        }
    }

    pub fn is_dark(&self) -> bool {
        matches!(self, ColorScheme::Dark)
    }
}

type Listener = Arc<dyn Fn(ColorScheme) + Send + Sync>;

struct Inner {
    preference: ThemePreference,
    system: ColorScheme,
    listeners: HashMap<u64, Listener>,
    next_id: u64,
}

impl Inner {
    fn scheme(&self) -> ColorScheme {
        match self.preference {
            ThemePreference::Light => ColorScheme::Light,
            ThemePreference::Dark => ColorScheme::Dark,
            ThemePreference::System => self.system,
        }
    }
}

#[derive(Clone)]
pub struct ThemeProvider {
    inner: Arc<Mutex<Inner>>,
}

impl ThemeProvider {
    pub fn new(preference: ThemePreference, system: ColorScheme) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                preference,
                system,
                listeners: HashMap::new(),
                next_id: 0,
            })),
        }
    }

    /// The scheme currently in effect
    pub fn scheme(&self) -> ColorScheme {
        self.inner.lock().scheme()
    }

    pub fn palette(&self) -> &'static Palette {
        self.scheme().palette()
    }

    pub fn preference(&self) -> ThemePreference {
        self.inner.lock().preference
    }

    pub fn set_preference(&self, preference: ThemePreference) {
        self.update(|inner| inner.preference = preference);
    }

    /// The operating system switched between light and dark
    pub fn system_scheme_changed(&self, system: ColorScheme) {
        self.update(|inner| inner.system = system);
    }

    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(ColorScheme) + Send + Sync + 'static,
    {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.listeners.insert(id, Arc::new(listener));

        Subscription {
            provider: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    fn update(&self, change: impl FnOnce(&mut Inner)) {
        let (scheme, listeners) = {
            let mut inner = self.inner.lock();
            let before = inner.scheme();
            change(&mut *inner);
            let after = inner.scheme();
            if before == after {
                return;
            }
            let listeners: Vec<Listener> = inner.listeners.values().cloned().collect();
            (after, listeners)
        };

        tracing::debug!(?scheme, "Colour scheme changed");
        // Called without the lock so listeners may query the provider
        for listener in listeners {
            listener(scheme);
        }
    }
}

impl std::fmt::Debug for ThemeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("ThemeProvider")
            .field("preference", &inner.preference)
            .field("system", &inner.system)
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

/// Keeps a theme listener registered until dropped
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    provider: Weak<Mutex<Inner>>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.provider.upgrade() {
            inner.lock().listeners.remove(&self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_system_preference_follows_os() {
        let provider = ThemeProvider::new(ThemePreference::System, ColorScheme::Light);
        assert_eq!(provider.palette().background, "#ffffff");

        provider.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(provider.scheme(), ColorScheme::Dark);
        assert_eq!(provider.palette().surface, "#111111");
    }

    #[test]
    fn test_explicit_preference_ignores_os() {
        let provider = ThemeProvider::new(ThemePreference::Light, ColorScheme::Dark);
        assert_eq!(provider.scheme(), ColorScheme::Light);
        provider.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(provider.scheme(), ColorScheme::Light);
    }

    #[test]
    fn test_listeners_notified_only_on_effective_change() {
        let provider = ThemeProvider::new(ThemePreference::System, ColorScheme::Light);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let _sub = provider.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        provider.system_scheme_changed(ColorScheme::Light);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        provider.system_scheme_changed(ColorScheme::Dark);
        provider.set_preference(ThemePreference::Dark);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let provider = ThemeProvider::new(ThemePreference::System, ColorScheme::Light);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let sub = provider.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(provider.listener_count(), 1);

        drop(sub);
        assert_eq!(provider.listener_count(), 0);
        provider.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_listener_may_read_provider() {
        let provider = ThemeProvider::new(ThemePreference::System, ColorScheme::Light);
        let seen = Arc::new(Mutex::new(None));
        let (reader, sink) = (Arc::downgrade(&provider.inner), Arc::clone(&seen));
        let _sub = provider.subscribe(move |_| {
            if let Some(inner) = reader.upgrade() {
                *sink.lock() = Some(inner.lock().scheme().palette().text);
            }
        });

        provider.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(*seen.lock(), Some("#ffffff"));
    }

    #[test]
    fn test_listener_does_not_keep_provider_alive() {
        let provider = ThemeProvider::new(ThemePreference::System, ColorScheme::Light);
        let weak = Arc::downgrade(&provider.inner);
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let sub = provider.subscribe(move |scheme| {
            *sink.lock() = Some(scheme);
        });

        provider.system_scheme_changed(ColorScheme::Dark);
        assert_eq!(*seen.lock(), Some(ColorScheme::Dark));

        drop(provider);
        assert!(weak.upgrade().is_none());
        drop(sub);
    }
}

//! Browser session orchestration
//!
//! One `BrowserSession` drives one modal presentation of a web page. It owns
//! the navigation state and load progress for that presentation, feeds
//! renderer events into them, arbitrates touches between the gesture
//! recognizers and turns the resulting intents into renderer commands.
//!
//! Everything runs on the UI thread. Waits are deadlines pumped by
//! [`BrowserSession::poll_timers`] or animation completions reported through
//! [`BrowserSession::animation_finished`].

use std::collections::HashMap;
use std::time::Duration;

use uuid::Uuid;

use crate::error::BrowserError;
use crate::gesture::{
    Capabilities, FollowUp, GestureArbiter, GestureEffect, NavigationIntent, TerminationDecision,
    TouchEvent, Viewport,
};
use crate::navigation::{NavigationState, NavigationStateReconciler, RendererEvent};
use crate::platform::{AnimatedProperty, Animation, AnimationId, ImpactStyle, Platform, Renderer};
use crate::presentation::{spinner_opacity, spinner_rotation_degrees, ChromeSnapshot, HeaderAction};
use crate::progress::LoadProgressTracker;
use crate::state::SessionState;
use crate::Result;

/// Duration of the modal slide-in and slide-out transitions
pub const SLIDE_TRANSITION_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Continuation {
    SlideIn,
    SlideOut,
    Gesture(FollowUp),
}

type Callback = Box<dyn FnMut()>;

pub struct BrowserSession<R: Renderer, P: Platform> {
    /// Identifies the current presentation in logs
    id: Option<String>,
    state: SessionState,
    renderer: R,
    platform: P,
    viewport: Viewport,
    /// Present from open until fully closed
    navigation: Option<NavigationStateReconciler>,
    progress: LoadProgressTracker,
    gestures: GestureArbiter,
    animations: HashMap<AnimationId, Continuation>,
    next_animation_id: u64,
    /// Close asked for during the slide-in; honoured once it finishes
    close_pending: bool,
    on_dismissed: Option<Callback>,
    on_refresh_requested: Option<Callback>,
}

impl<R: Renderer, P: Platform> BrowserSession<R, P> {
    pub fn new(renderer: R, platform: P, viewport: Viewport) -> Self {
        Self {
            id: None,
            state: SessionState::Closed,
            renderer,
            platform,
            viewport,
            navigation: None,
            progress: LoadProgressTracker::new(),
            gestures: GestureArbiter::new(),
            animations: HashMap::new(),
            next_animation_id: 0,
            close_pending: false,
            on_dismissed: None,
            on_refresh_requested: None,
        }
    }

    // === Shell contract ===

    /// Present the browser for `url`. Navigation flags and load progress
    /// start fresh for every presentation.
    pub fn open(&mut self, url: &str) -> Result<()> {
        let url = url.trim();
        if url.is_empty() {
            return Err(BrowserError::EmptyUrl);
        }

        self.transition_to(SessionState::Opening)?;

        let id = Uuid::new_v4().to_string();
        tracing::info!(session_id = %id, url = %url, "Opening browser session");

        self.id = Some(id);
        self.navigation = Some(NavigationStateReconciler::new(url));
        self.progress = LoadProgressTracker::new();
        self.gestures = GestureArbiter::new();
        self.animations.clear();
        self.close_pending = false;

        self.platform.set_value(AnimatedProperty::SurfaceSlide, 1.0);
        self.start_animation(
            Animation::timing(AnimatedProperty::SurfaceSlide, 0.0, SLIDE_TRANSITION_DURATION),
            Some(Continuation::SlideIn),
        );

        Ok(())
    }

    /// Dismiss from the header's Done button or the system back action.
    /// Closing an already closing or closed session does nothing; a close
    /// during the slide-in takes effect when it finishes.
    pub fn close(&mut self) -> Result<()> {
        match self.state {
            SessionState::Closing | SessionState::Closed => Ok(()),
            SessionState::Opening => {
                tracing::debug!("Deferring close until the slide-in finishes");
                self.close_pending = true;
                Ok(())
            }
            SessionState::Active => self.begin_closing(),
        }
    }

    pub fn current_url(&self) -> &str {
        self.navigation.as_ref().map(|n| n.url()).unwrap_or("")
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn on_dismissed<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_dismissed = Some(Box::new(callback));
    }

    pub fn on_refresh_requested<F: FnMut() + 'static>(&mut self, callback: F) {
        self.on_refresh_requested = Some(Box::new(callback));
    }

    // === Page commands ===

    pub fn reload(&mut self) {
        if self.is_active() {
            self.renderer.reload();
        }
    }

    /// Stop loading. The indicator completes as if the page had finished.
    pub fn stop(&mut self) {
        if self.is_active() {
            self.renderer.stop_loading();
            let now = self.platform.now();
            self.progress.report_progress(1.0, now);
        }
    }

    /// Navigate back if the page has history; returns whether it did
    pub fn go_back(&mut self) -> bool {
        if !self.is_active() || !self.capabilities().can_go_back {
            tracing::debug!("Ignoring back navigation: no history");
            return false;
        }
        self.platform.impact(ImpactStyle::Medium);
        self.renderer.go_back();
        true
    }

    /// Navigate forward if possible; returns whether it did
    pub fn go_forward(&mut self) -> bool {
        if !self.is_active() || !self.capabilities().can_go_forward {
            tracing::debug!("Ignoring forward navigation: nothing ahead");
            return false;
        }
        self.platform.impact(ImpactStyle::Medium);
        self.renderer.go_forward();
        true
    }

    /// Hand the current URL to the platform share sheet. Failures and
    /// cancellations are logged; the session stays open.
    pub fn share(&mut self) {
        if !self.is_active() {
            return;
        }
        let url = self.current_url().to_string();
        if let Err(e) = self.platform.share(&url) {
            tracing::warn!(url = %url, "Share failed: {}", e);
        }
    }

    // === Inbound events ===

    pub fn handle_renderer_event(&mut self, event: RendererEvent) {
        if !self.state.is_interactive() {
            tracing::trace!(state = %self.state, ?event, "Ignoring renderer event");
            return;
        }
        let now = self.platform.now();
        let Some(navigation) = self.navigation.as_mut() else {
            return;
        };

        match event {
            RendererEvent::LoadStart {
                url,
                navigation_type,
            } => {
                self.progress.reset_for_new_navigation();
                navigation.on_load_start(&url, navigation_type);
            }
            RendererEvent::LoadProgress { progress } => {
                self.progress.report_progress(progress, now);
            }
            RendererEvent::LoadEnd => {
                self.progress.report_progress(1.0, now);
            }
            RendererEvent::NavigationStateChange(state) => {
                navigation.on_navigation_state_change(&state);
            }
        }
    }

    pub fn handle_touch(&mut self, event: TouchEvent) {
        if !self.state.is_interactive() {
            return;
        }
        let caps = self.capabilities();
        let effects = self.gestures.handle(event, &self.viewport, caps);
        self.apply(effects);
    }

    /// The renderer wants the active touch for its own scrolling. Returns
    /// whether it may have it.
    pub fn termination_requested(&mut self) -> bool {
        match self.gestures.request_termination() {
            TerminationDecision::Refused => false,
            TerminationDecision::Granted(effects) => {
                self.apply(effects);
                true
            }
        }
    }

    pub fn animation_finished(&mut self, id: AnimationId, finished: bool) {
        let Some(continuation) = self.animations.remove(&id) else {
            tracing::trace!(?id, "Ignoring completion of untracked animation");
            return;
        };

        match continuation {
            Continuation::SlideIn => self.finish_opening(),
            Continuation::SlideOut => self.finish_closing(),
            Continuation::Gesture(follow_up) => {
                let now = self.platform.now();
                let effects = self.gestures.follow_up(follow_up, finished, now);
                self.apply(effects);
            }
        }
    }

    /// Fire due deadlines: the load-complete grace and the refresh hold
    pub fn poll_timers(&mut self) {
        if !self.state.is_interactive() {
            return;
        }
        let now = self.platform.now();
        self.progress.poll(now);
        let effects = self.gestures.poll(now);
        self.apply(effects);
    }

    // === Queries ===

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn navigation_state(&self) -> Option<&NavigationState> {
        self.navigation.as_ref().map(|n| n.state())
    }

    pub fn capabilities(&self) -> Capabilities {
        self.navigation
            .as_ref()
            .map(|n| Capabilities {
                can_go_back: n.can_go_back(),
                can_go_forward: n.can_go_forward(),
            })
            .unwrap_or_default()
    }

    pub fn progress(&self) -> &LoadProgressTracker {
        &self.progress
    }

    pub fn gestures(&self) -> &GestureArbiter {
        &self.gestures
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Rotation or resize. Takes effect from the next touch-down.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    pub fn chrome(&self) -> ChromeSnapshot {
        let caps = self.capabilities();
        let refresh = self.gestures.pull_refresh();
        let is_loading = self.progress.is_loading();

        ChromeSnapshot {
            state: self.state,
            url: self.current_url().to_string(),
            can_go_back: caps.can_go_back,
            can_go_forward: caps.can_go_forward,
            is_loading,
            progress: self.progress.progress(),
            header_action: if is_loading {
                HeaderAction::Stop
            } else {
                HeaderAction::Reload
            },
            page_offset_x: self.gestures.edge_swipe().page_offset(),
            surface_offset_y: self.gestures.pull_dismiss().translate_y(),
            refresh_pull: refresh.pull_distance(),
            spinner_rotation: spinner_rotation_degrees(refresh.pull_distance(), refresh.threshold()),
            spinner_opacity: spinner_opacity(refresh.pull_distance(), refresh.threshold()),
            refreshing: refresh.is_refreshing(),
        }
    }

    // === Internals ===

    fn transition_to(&mut self, target: SessionState) -> Result<()> {
        if !self.state.can_transition_to(target) {
            return Err(BrowserError::InvalidTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }

        tracing::debug!(
            session_id = self.id.as_deref().unwrap_or("-"),
            from = %self.state,
            to = %target,
            "Browser session transition"
        );

        self.state = target;
        Ok(())
    }

    fn finish_opening(&mut self) {
        if self.transition_to(SessionState::Active).is_err() {
            return;
        }
        if std::mem::take(&mut self.close_pending) {
            if let Err(e) = self.begin_closing() {
                tracing::warn!("Deferred close failed: {}", e);
            }
            return;
        }
        let Some(url) = self.navigation.as_ref().map(|n| n.initial_url().to_string()) else {
            return;
        };
        self.progress.reset_for_new_navigation();
        self.renderer.load(&url);
    }

    fn begin_closing(&mut self) -> Result<()> {
        self.transition_to(SessionState::Closing)?;

        let effects = self.gestures.terminate();
        self.apply(effects);
        self.cancel_timers();
        // Completions of gesture animations no longer matter
        self.animations.clear();

        self.start_animation(
            Animation::timing(AnimatedProperty::SurfaceSlide, 1.0, SLIDE_TRANSITION_DURATION),
            Some(Continuation::SlideOut),
        );
        Ok(())
    }

    fn finish_closing(&mut self) {
        if self.transition_to(SessionState::Closed).is_err() {
            return;
        }

        tracing::info!(
            session_id = self.id.as_deref().unwrap_or("-"),
            "Browser session closed"
        );

        self.cancel_timers();
        self.navigation = None;
        self.id = None;
        self.progress = LoadProgressTracker::new();
        self.gestures = GestureArbiter::new();
        self.animations.clear();
        self.close_pending = false;

        self.platform.unmount();
        if let Some(callback) = self.on_dismissed.as_mut() {
            callback();
        }
    }

    fn cancel_timers(&mut self) {
        self.progress.cancel_timers();
        self.gestures.cancel_timers();
    }

    fn start_animation(&mut self, animation: Animation, continuation: Option<Continuation>) {
        self.next_animation_id += 1;
        let id = AnimationId(self.next_animation_id);
        if let Some(continuation) = continuation {
            self.animations.insert(id, continuation);
        }
        self.platform.animate(id, animation);
    }

    fn apply(&mut self, effects: Vec<GestureEffect>) {
        for effect in effects {
            match effect {
                GestureEffect::Haptic(style) => self.platform.impact(style),
                GestureEffect::Animate { animation, then } => {
                    self.start_animation(animation, then.map(Continuation::Gesture));
                }
                GestureEffect::Snap { property, value } => self.platform.set_value(property, value),
                GestureEffect::Intent(intent) => self.dispatch(intent),
            }
        }
    }

    fn dispatch(&mut self, intent: NavigationIntent) {
        tracing::debug!(?intent, "Navigation intent");
        match intent {
            NavigationIntent::Back => {
                self.go_back();
            }
            NavigationIntent::Forward => {
                self.go_forward();
            }
            NavigationIntent::Refresh => {
                self.reload();
                if let Some(callback) = self.on_refresh_requested.as_mut() {
                    callback();
                }
            }
            NavigationIntent::Dismiss => {
                if let Err(e) = self.close() {
                    tracing::warn!("Dismiss ignored: {}", e);
                }
            }
        }
    }
}

// src/navigation.rs

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

/// Screens of the survey application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    NewSurvey,
    EditSurvey(i64),
    SurveyList,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::NewSurvey => "/survey".to_string(),
            Route::EditSurvey(id) => format!("/survey/{id}"),
            Route::SurveyList => "/surveys".to_string(),
        }
    }

    /// Resolve a path; anything unknown lands on `Home`.
    pub fn from_path(path: &str) -> Route {
        let trimmed = path.trim_matches('/');
        let mut parts = trimmed.splitn(2, '/');

        match (parts.next(), parts.next()) {
            (Some("survey"), None) => Route::NewSurvey,
            (Some("survey"), Some(id)) => id
                .parse()
                .map(Route::EditSurvey)
                .unwrap_or(Route::Home),
            (Some("surveys"), None) => Route::SurveyList,
            _ => Route::Home,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

struct NavState {
    current: Mutex<Route>,
    generation: AtomicU64,
}

/// Shared router handle. Every navigation ends the sessions issued before it.
#[derive(Clone)]
pub struct Navigator {
    state: Arc<NavState>,
}

impl Navigator {
    pub fn new(start: Route) -> Self {
        Self {
            state: Arc::new(NavState {
                current: Mutex::new(start),
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn current(&self) -> Route {
        *self.state.current.lock()
    }

    pub fn navigate(&self, route: Route) {
        let mut current = self.state.current.lock();
        let from = *current;
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(%from, to = %route, generation, "navigate");
        *current = route;
    }

    /// Session bound to the screen that is current right now.
    pub fn session(&self) -> Session {
        Session {
            state: Arc::clone(&self.state),
            generation: self.state.generation.load(Ordering::SeqCst),
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Navigator::new(Route::Home)
    }
}

impl fmt::Debug for Navigator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current())
            .field("generation", &self.state.generation.load(Ordering::SeqCst))
            .finish()
    }
}

/// Lifetime of one screen. Results of requests that finish after the user
/// navigated away must not be applied.
#[derive(Clone)]
pub struct Session {
    state: Arc<NavState>,
    generation: u64,
}

impl Session {
    pub fn is_active(&self) -> bool {
        self.state.generation.load(Ordering::SeqCst) == self.generation
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("generation", &self.generation)
            .field("active", &self.is_active())
            .finish()
    }
}

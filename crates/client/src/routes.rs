//! Route tree selection.
//!
//! The mobile shell owns the actual navigation graphs; the SDK only
//! answers which one to mount for a given session state.

use crate::session::SessionState;

/// Top-level route trees of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteTree {
    /// Startup screen while token validation is in flight.
    Splash,
    /// Sign-in and registration flow.
    Onboarding,
    /// Regular signed-in experience.
    Main,
    /// Signed-in experience with the ambassador dashboard.
    Ambassador,
}

impl RouteTree {
    /// Choose the route tree for a session state.
    ///
    /// Loading wins over everything: an in-flight startup validation
    /// shows the splash screen even though the state still reads as
    /// signed out.
    #[must_use]
    pub fn for_session(state: &SessionState) -> Self {
        if state.is_loading {
            Self::Splash
        } else if !state.is_authenticated {
            Self::Onboarding
        } else if state.is_ambassador {
            Self::Ambassador
        } else {
            Self::Main
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn state() -> SessionState {
        SessionState {
            is_loading: false,
            ..SessionState::default()
        }
    }

    #[test]
    fn test_loading_shows_splash() {
        let state = SessionState::default();
        assert!(state.is_loading);
        assert_eq!(RouteTree::for_session(&state), RouteTree::Splash);
    }

    #[test]
    fn test_signed_out_shows_onboarding() {
        assert_eq!(RouteTree::for_session(&state()), RouteTree::Onboarding);
    }

    #[test]
    fn test_signed_in_shows_main() {
        let mut state = state();
        state.is_authenticated = true;
        assert_eq!(RouteTree::for_session(&state), RouteTree::Main);
    }

    #[test]
    fn test_ambassador_shows_ambassador_tree() {
        let mut state = state();
        state.is_authenticated = true;
        state.is_ambassador = true;
        assert_eq!(RouteTree::for_session(&state), RouteTree::Ambassador);
    }

    #[test]
    fn test_loading_wins_over_authenticated() {
        let mut state = state();
        state.is_loading = true;
        state.is_authenticated = true;
        assert_eq!(RouteTree::for_session(&state), RouteTree::Splash);
    }
}

//! Page modules: one per screen.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each page exposes the same three pieces:
//!
//! - `load(ctx)`: async loader producing a [`PageOutcome`] of the page props;
//!   routes wrap it in a guard from [`crate::guard`].
//! - form actions taking the context and the decoded form, producing an
//!   [`ActionOutcome`].
//! - `render(props)`: the full HTML document for the props.
//!
//! ERROR HANDLING
//! ==============
//! Pages never surface raw API errors. A rejected session always ends on the
//! login page; anything else becomes a [`Notice`] on the page or on the
//! redirect target.

pub mod dashboard;
pub mod haircut_edit;
pub mod haircut_new;
pub mod haircuts;
pub mod login;
pub mod new_schedule;
pub mod plans;
pub mod register;

use crate::guard::PageOutcome;
use crate::nav::{Notice, Route};
use crate::net::api::ApiError;

/// Result of a form submission.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome<P> {
    /// Show the page again, typically with the submitted values and a notice.
    Render(P),
    /// Send the browser elsewhere. May be an absolute URL (hosted checkout).
    Redirect(String),
}

impl<P> ActionOutcome<P> {
    #[must_use]
    pub fn to(route: &Route) -> Self {
        Self::Redirect(route.path())
    }

    #[must_use]
    pub fn with_notice(route: &Route, notice: Notice) -> Self {
        Self::Redirect(route.with_notice(notice))
    }

    /// Redirect after a failed API call: login for a rejected session,
    /// otherwise `back` with `notice`.
    #[must_use]
    pub fn failed(err: &ApiError, back: &Route, notice: Notice) -> Self {
        if err.is_unauthorized() {
            return Self::to(&Route::Login);
        }
        tracing::warn!(error = %err, notice = notice.code(), "action failed");
        Self::with_notice(back, notice)
    }

    /// Location when this is a redirect.
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        match self {
            Self::Redirect(location) => Some(location),
            Self::Render(_) => None,
        }
    }
}

impl<P> From<PageOutcome<P>> for ActionOutcome<P> {
    fn from(outcome: PageOutcome<P>) -> Self {
        match outcome {
            PageOutcome::Render(props) => Self::Render(props),
            PageOutcome::Redirect(route) => Self::to(&route),
        }
    }
}

/// Run a loader from inside an action and continue with its props, or
/// leave with its redirect.
macro_rules! reload {
    ($outcome:expr) => {
        match $outcome {
            $crate::guard::PageOutcome::Render(props) => props,
            $crate::guard::PageOutcome::Redirect(route) => {
                return $crate::pages::ActionOutcome::to(&route);
            }
        }
    };
}
pub(crate) use reload;

#[cfg(test)]
#[path = "pages_test.rs"]
mod tests;

//! The application's pages. One is active at a time; the event loop
//! routes input to it and background results to whichever page owns
//! them.

pub mod categories;
pub mod forgot_password;
pub mod login;
pub mod sign_up;
pub mod tasks;

use gridview::{Event, Key};
use taskdeck_api::Error;

use crate::app::{Ctx, Route};

pub use categories::CategoriesPage;
pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
pub use sign_up::SignUpPage;
pub use tasks::TasksPage;

pub(crate) fn is_enter(event: &Event) -> bool {
    matches!(
        event,
        Event::Key {
            key: Key::Enter,
            ..
        }
    )
}

/// Surface a request failure to the user. An expired session drops
/// back to the login page.
pub(crate) fn report(ctx: &mut Ctx<'_>, error: &Error) -> Option<Route> {
    ctx.notices.error(error.user_message());
    error.is_session_expired().then_some(Route::Login)
}

//! Login page.

use gridview::{Event, InputMask, Key, Rect, Surface, TextInput, Theme, Validator};
use taskdeck_api::auth::LoginRequest;

use crate::app::{Ctx, Route};
use crate::msg::AppMsg;
use crate::pages::is_enter;
use crate::widgets::form::{self, FIELD_HEIGHT};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Password,
    SignIn,
    ForgotPassword,
    CreateAccount,
}

const FOCUS_ORDER: [Focus; 5] = [
    Focus::Email,
    Focus::Password,
    Focus::SignIn,
    Focus::ForgotPassword,
    Focus::CreateAccount,
];

pub struct LoginPage {
    email: TextInput,
    password: TextInput,
    focus: usize,
    loading: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        Self {
            email: TextInput::new().with_placeholder("Enter your email"),
            password: TextInput::new()
                .with_mask(InputMask::Password)
                .with_placeholder("Enter your password"),
            focus: 0,
            loading: false,
        }
    }

    /// Dropping back to this page ends any session, as the original
    /// does on mount.
    pub fn enter(&mut self, ctx: &mut Ctx<'_>) {
        ctx.client.logout();
        self.password.clear();
        self.loading = false;
        self.focus = 0;
    }

    pub fn on_login_failed(&mut self) {
        self.loading = false;
    }

    pub fn handle_event(&mut self, ctx: &mut Ctx<'_>, event: &Event) -> Option<Route> {
        if self.loading {
            return None;
        }
        if let Event::Key { key, .. } = event {
            match key {
                Key::Tab => {
                    self.focus = (self.focus + 1) % FOCUS_ORDER.len();
                    return None;
                }
                Key::BackTab => {
                    self.focus = (self.focus + FOCUS_ORDER.len() - 1) % FOCUS_ORDER.len();
                    return None;
                }
                _ => {}
            }
        }

        match FOCUS_ORDER[self.focus] {
            Focus::Email => self.route_inputs(ctx, event, true),
            Focus::Password => self.route_inputs(ctx, event, false),
            Focus::SignIn => {
                if is_enter(event) {
                    self.submit(ctx);
                }
                None
            }
            Focus::ForgotPassword => is_enter(event).then_some(Route::ForgotPassword),
            Focus::CreateAccount => is_enter(event).then_some(Route::SignUp),
        }
    }

    fn route_inputs(&mut self, ctx: &mut Ctx<'_>, event: &Event, email: bool) -> Option<Route> {
        use gridview::InputEvent;
        let input = if email { &mut self.email } else { &mut self.password };
        input.clear_error();
        if input.handle_event(event) == InputEvent::Submitted {
            self.submit(ctx);
        }
        None
    }

    fn submit(&mut self, ctx: &mut Ctx<'_>) {
        let mut v = Validator::new();
        v.field("email", self.email.value())
            .required("Email is required")
            .email("Invalid email address")
            .max_length(128, "Email must be at most 128 characters");
        v.field("password", self.password.value())
            .required("Password is required")
            .min_length(10, "Password must be at least 10 characters")
            .max_length(32, "Password must be at most 32 characters");
        let result = v.finish();

        if let Some(message) = result.error_for("email") {
            self.email.set_error(message);
        }
        if let Some(message) = result.error_for("password") {
            self.password.set_error(message);
        }
        if !result.is_valid() {
            return;
        }

        self.loading = true;
        let request = LoginRequest {
            email: self.email.value().to_string(),
            password: self.password.value().to_string(),
        };
        let client = ctx.client.clone();
        let tx = ctx.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppMsg::LoggedIn(client.login(&request).await));
        });
    }

    pub fn draw(&self, surface: &mut Surface, theme: &Theme) {
        let area = surface.area().centered(46, 16);
        let content = form::draw_panel(surface, area, "Login", theme);
        let focus = FOCUS_ORDER[self.focus];

        form::draw_input(
            surface,
            Rect::new(content.x, content.y, content.width, FIELD_HEIGHT),
            "Email",
            &self.email,
            theme,
            focus == Focus::Email,
        );
        form::draw_input(
            surface,
            Rect::new(content.x, content.y + FIELD_HEIGHT, content.width, FIELD_HEIGHT),
            "Password",
            &self.password,
            theme,
            focus == Focus::Password,
        );

        let y = content.y + FIELD_HEIGHT * 2 + 1;
        let label = if self.loading { "Signing in..." } else { "Sign In" };
        form::draw_button(surface, content.x, y, label, theme, focus == Focus::SignIn);

        let links_y = y + 2;
        let w = form::draw_button(
            surface,
            content.x,
            links_y,
            "Forgot Password?",
            theme,
            focus == Focus::ForgotPassword,
        );
        form::draw_button(
            surface,
            content.x + w + 2,
            links_y,
            "Create an account",
            theme,
            focus == Focus::CreateAccount,
        );
    }
}

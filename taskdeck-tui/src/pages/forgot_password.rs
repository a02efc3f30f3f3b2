//! Password reset, in two steps: e-mail a reset code, then set the
//! new password with the code.

use gridview::{Event, InputEvent, InputMask, Key, Rect, Surface, TextInput, Theme, Validator};
use taskdeck_api::auth::ResetPasswordRequest;

use crate::app::{Ctx, Route};
use crate::msg::AppMsg;
use crate::pages::is_enter;
use crate::widgets::form::{self, FIELD_HEIGHT};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Code,
    Password,
    Submit,
    HaveCode,
}

pub struct ForgotPasswordPage {
    email: TextInput,
    code: TextInput,
    password: TextInput,
    code_sent: bool,
    focus: usize,
    loading: bool,
}

impl ForgotPasswordPage {
    pub fn new() -> Self {
        Self {
            email: TextInput::new().with_placeholder("Enter your email"),
            code: TextInput::new().with_placeholder("Enter the code sent to your email"),
            password: TextInput::new()
                .with_mask(InputMask::Password)
                .with_placeholder("Enter your new password"),
            code_sent: false,
            focus: 0,
            loading: false,
        }
    }

    pub fn enter(&mut self) {
        *self = Self::new();
    }

    pub fn on_code_sent(&mut self, ok: bool) {
        self.loading = false;
        if ok {
            self.code_sent = true;
            self.focus = 0;
        }
    }

    pub fn on_password_reset(&mut self) {
        self.loading = false;
    }

    fn focus_order(&self) -> &'static [Focus] {
        if self.code_sent {
            &[Focus::Email, Focus::Code, Focus::Password, Focus::Submit]
        } else {
            &[Focus::Email, Focus::Submit, Focus::HaveCode]
        }
    }

    pub fn handle_event(&mut self, ctx: &mut Ctx<'_>, event: &Event) -> Option<Route> {
        if self.loading {
            return None;
        }
        let order = self.focus_order();
        if let Event::Key { key, .. } = event {
            match key {
                Key::Escape => return Some(Route::Login),
                Key::Tab => {
                    self.focus = (self.focus + 1) % order.len();
                    return None;
                }
                Key::BackTab => {
                    self.focus = (self.focus + order.len() - 1) % order.len();
                    return None;
                }
                _ => {}
            }
        }

        match order[self.focus] {
            Focus::Email if !self.code_sent => {
                self.email.clear_error();
                if self.email.handle_event(event) == InputEvent::Submitted {
                    self.submit(ctx);
                }
                None
            }
            Focus::Email => None,
            Focus::Code => {
                self.code.clear_error();
                if self.code.handle_event(event) == InputEvent::Submitted {
                    self.submit(ctx);
                }
                None
            }
            Focus::Password => {
                self.password.clear_error();
                if self.password.handle_event(event) == InputEvent::Submitted {
                    self.submit(ctx);
                }
                None
            }
            Focus::Submit => {
                if is_enter(event) {
                    self.submit(ctx);
                }
                None
            }
            Focus::HaveCode => {
                if is_enter(event) && self.validate_email() {
                    self.code_sent = true;
                    self.focus = 0;
                }
                None
            }
        }
    }

    fn validate_email(&mut self) -> bool {
        let mut v = Validator::new();
        v.field("email", self.email.value())
            .required("Email is required")
            .email("Invalid email address")
            .max_length(128, "Email must be at most 128 characters");
        let result = v.finish();
        if let Some(message) = result.error_for("email") {
            self.email.set_error(message);
        }
        result.is_valid()
    }

    fn submit(&mut self, ctx: &mut Ctx<'_>) {
        if self.code_sent {
            self.submit_reset(ctx);
        } else {
            self.submit_email(ctx);
        }
    }

    fn submit_email(&mut self, ctx: &mut Ctx<'_>) {
        if !self.validate_email() {
            return;
        }
        self.loading = true;
        let email = self.email.value().to_string();
        let client = ctx.client.clone();
        let tx = ctx.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppMsg::ResetCodeSent(
                client.send_password_reset_code(&email).await,
            ));
        });
    }

    fn submit_reset(&mut self, ctx: &mut Ctx<'_>) {
        let mut v = Validator::new();
        v.field("code", self.code.value())
            .required("Verification code is required")
            .max_length(6, "Verification code must be at most 6 characters");
        v.field("password", self.password.value())
            .required("Password is required")
            .min_length(10, "Password must be at least 10 characters")
            .max_length(32, "Password must be at most 32 characters");
        let result = v.finish();

        if let Some(m) = result.error_for("code") {
            self.code.set_error(m);
        }
        if let Some(m) = result.error_for("password") {
            self.password.set_error(m);
        }
        if !result.is_valid() {
            return;
        }
        let Ok(code) = self.code.value().parse::<u32>() else {
            self.code.set_error("Verification code must be a number");
            return;
        };

        self.loading = true;
        let request = ResetPasswordRequest {
            email: self.email.value().to_string(),
            new_password: self.password.value().to_string(),
            verification_code: code,
        };
        let client = ctx.client.clone();
        let tx = ctx.tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(AppMsg::PasswordReset(client.reset_password(&request).await));
        });
    }

    pub fn draw(&self, surface: &mut Surface, theme: &Theme) {
        let height = if self.code_sent { 19 } else { 13 };
        let area = surface.area().centered(50, height);
        let title = if self.code_sent {
            "Reset Password"
        } else {
            "Forgot Password"
        };
        let content = form::draw_panel(surface, area, title, theme);
        let order = self.focus_order();
        let focus = order[self.focus];

        let mut y = content.y;
        let field = |y: u16| Rect::new(content.x, y, content.width, FIELD_HEIGHT);

        form::draw_input(surface, field(y), "Email", &self.email, theme, focus == Focus::Email);
        y += FIELD_HEIGHT;

        if self.code_sent {
            form::draw_input(
                surface,
                field(y),
                "Verification Code",
                &self.code,
                theme,
                focus == Focus::Code,
            );
            y += FIELD_HEIGHT;
            form::draw_input(
                surface,
                field(y),
                "New Password",
                &self.password,
                theme,
                focus == Focus::Password,
            );
            y += FIELD_HEIGHT;
        }

        let label = if self.loading {
            "Working..."
        } else if self.code_sent {
            "Reset Password"
        } else {
            "Send Reset Code"
        };
        form::draw_button(surface, content.x, y + 1, label, theme, focus == Focus::Submit);

        if !self.code_sent {
            form::draw_button(
                surface,
                content.x,
                y + 3,
                "Already have a verification code?",
                theme,
                focus == Focus::HaveCode,
            );
        }
    }
}

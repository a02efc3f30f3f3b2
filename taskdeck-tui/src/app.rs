//! Top-level application: the event loop, routing between pages and
//! dispatch of background results.

use std::io;
use std::time::Duration;

use crossterm::event::EventStream;
use futures::StreamExt;
use gridview::{
    Event, Key, NoticeQueue, Rect, Spinner, Style, Surface, Terminal, Theme,
};
use log::{info, warn};
use taskdeck_api::{ApiClient, TokenClaims};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::interval;

use crate::modals::ConfirmModal;
use crate::msg::AppMsg;
use crate::pages::{
    self, CategoriesPage, ForgotPasswordPage, LoginPage, SignUpPage, TasksPage,
};

/// Shared handles passed down to pages for spawning requests and
/// surfacing notices.
pub struct Ctx<'a> {
    pub client: &'a ApiClient,
    pub tx: &'a UnboundedSender<AppMsg>,
    pub notices: &'a mut NoticeQueue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    SignUp,
    ForgotPassword,
    Tasks,
    Categories,
}

macro_rules! ctx {
    ($self:ident) => {
        Ctx {
            client: &$self.client,
            tx: &$self.tx,
            notices: &mut $self.notices,
        }
    };
}

pub struct App {
    client: ApiClient,
    theme: Theme,
    notices: NoticeQueue,
    spinner: Spinner,
    route: Route,
    claims: Option<TokenClaims>,
    login: LoginPage,
    sign_up: SignUpPage,
    forgot_password: ForgotPasswordPage,
    tasks: TasksPage,
    categories: CategoriesPage,
    tx: UnboundedSender<AppMsg>,
    rx: Option<UnboundedReceiver<AppMsg>>,
    quit_confirm: Option<ConfirmModal>,
    quit: bool,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            theme: Theme::default(),
            notices: NoticeQueue::new(),
            spinner: Spinner::new(8, 6),
            route: Route::Login,
            claims: None,
            login: LoginPage::new(),
            sign_up: SignUpPage::new(),
            forgot_password: ForgotPasswordPage::new(),
            tasks: TasksPage::new(tx.clone()),
            categories: CategoriesPage::new(),
            tx,
            rx: Some(rx),
            quit_confirm: None,
            quit: false,
        }
    }

    pub async fn run(mut self) -> io::Result<()> {
        let Some(mut rx) = self.rx.take() else {
            return Ok(());
        };
        let mut terminal = Terminal::new()?;
        let mut events = EventStream::new();
        let mut tick = interval(Duration::from_millis(50));

        self.draw(&mut terminal)?;
        while !self.quit {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(raw)) => {
                            if let Some(event) = Event::from_crossterm(raw) {
                                self.handle_event(&event);
                            }
                        }
                        Some(Err(e)) => {
                            warn!("terminal event error: {e}");
                            break;
                        }
                        None => break,
                    }
                }
                Some(msg) = rx.recv() => {
                    self.handle_msg(msg);
                }
                _ = tick.tick() => {
                    self.spinner.tick();
                    self.notices.tick();
                }
            }
            self.draw(&mut terminal)?;
        }
        info!("shutting down");
        Ok(())
    }

    fn authed(&self) -> bool {
        self.client.has_token()
    }

    fn modal_open(&self) -> bool {
        match self.route {
            Route::Tasks => self.tasks.modal_open(),
            Route::Categories => self.categories.modal_open(),
            _ => false,
        }
    }

    fn navigate(&mut self, route: Route) {
        info!("navigating to {route:?}");
        self.route = route;
        match route {
            Route::Login => {
                self.claims = None;
                let mut ctx = ctx!(self);
                self.login.enter(&mut ctx);
            }
            Route::SignUp => self.sign_up.enter(),
            Route::ForgotPassword => self.forgot_password.enter(),
            Route::Tasks => {
                let mut ctx = ctx!(self);
                self.tasks.enter(&mut ctx);
            }
            Route::Categories => {
                let mut ctx = ctx!(self);
                self.categories.enter(&mut ctx);
            }
        }
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(confirm) = &mut self.quit_confirm {
            match confirm.handle_event(event) {
                Some(true) => self.quit = true,
                Some(false) => self.quit_confirm = None,
                None => {}
            }
            return;
        }

        if let Event::Key { key, modifiers } = event {
            if modifiers.ctrl {
                match key {
                    Key::Char('q') => {
                        self.quit_confirm =
                            Some(ConfirmModal::new("Quit TaskDeck?").title("Quit"));
                        return;
                    }
                    Key::Char('l') if self.authed() => {
                        self.notices.success("Logged out");
                        self.navigate(Route::Login);
                        return;
                    }
                    _ => {}
                }
            }
            if self.authed() && !self.modal_open() {
                match key {
                    Key::F(1) => {
                        self.navigate(Route::Tasks);
                        return;
                    }
                    Key::F(2) => {
                        self.navigate(Route::Categories);
                        return;
                    }
                    _ => {}
                }
            }
        }

        let mut ctx = ctx!(self);
        let next = match self.route {
            Route::Login => self.login.handle_event(&mut ctx, event),
            Route::SignUp => self.sign_up.handle_event(&mut ctx, event),
            Route::ForgotPassword => self.forgot_password.handle_event(&mut ctx, event),
            Route::Tasks => self.tasks.handle_event(&mut ctx, event),
            Route::Categories => self.categories.handle_event(&mut ctx, event),
        };
        if let Some(route) = next {
            self.navigate(route);
        }
    }

    fn handle_msg(&mut self, msg: AppMsg) {
        match msg {
            AppMsg::LoggedIn(result) => match result {
                Ok(token) => {
                    match TokenClaims::decode(&token) {
                        Ok(claims) => self.claims = Some(claims),
                        Err(e) => warn!("could not decode session token: {e}"),
                    }
                    self.notices.success("Login successful");
                    self.navigate(Route::Tasks);
                }
                Err(e) => {
                    self.login.on_login_failed();
                    self.notices.error(e.user_message());
                }
            },
            AppMsg::SignUpCodeSent(result) => {
                self.sign_up.on_code_sent(result.is_ok());
                match result {
                    Ok(()) => self.notices.success("Verification code sent to your email"),
                    Err(e) => self.notices.error(e.user_message()),
                }
            }
            AppMsg::AccountCreated(result) => {
                self.sign_up.on_account_created();
                match result {
                    Ok(()) => {
                        self.notices.success("Registration successful");
                        self.navigate(Route::Login);
                    }
                    Err(e) => self.notices.error(e.user_message()),
                }
            }
            AppMsg::ResetCodeSent(result) => {
                self.forgot_password.on_code_sent(result.is_ok());
                match result {
                    Ok(()) => self.notices.success("Reset code sent to your email"),
                    Err(e) => self.notices.error(e.user_message()),
                }
            }
            AppMsg::PasswordReset(result) => {
                self.forgot_password.on_password_reset();
                match result {
                    Ok(()) => {
                        self.notices.success("Password reset successful");
                        self.navigate(Route::Login);
                    }
                    Err(e) => self.notices.error(e.user_message()),
                }
            }
            AppMsg::TaskPageRequest(request) => {
                let mut ctx = ctx!(self);
                self.tasks.start_fetch(&mut ctx, request);
            }
            AppMsg::TasksLoaded(result) => {
                let mut ctx = ctx!(self);
                let next = self.tasks.on_tasks_loaded(&mut ctx, result);
                if let Some(route) = next {
                    self.navigate(route);
                }
            }
            AppMsg::TaskSaved(result) => {
                let mut ctx = ctx!(self);
                let next = self.tasks.on_task_saved(&mut ctx, result);
                if let Some(route) = next {
                    self.navigate(route);
                }
            }
            AppMsg::TaskDeleted(result) => {
                let mut ctx = ctx!(self);
                let next = self.tasks.on_task_deleted(&mut ctx, result);
                if let Some(route) = next {
                    self.navigate(route);
                }
            }
            AppMsg::CategoriesLoaded(result) => {
                // The tasks page keeps a copy for its form selects.
                if let Ok(categories) = &result {
                    self.tasks.set_categories(categories.clone());
                }
                let next = if self.route == Route::Categories {
                    let mut ctx = ctx!(self);
                    self.categories.on_categories_loaded(&mut ctx, result)
                } else if let Err(e) = result {
                    let mut ctx = ctx!(self);
                    pages::report(&mut ctx, &e)
                } else {
                    None
                };
                if let Some(route) = next {
                    self.navigate(route);
                }
            }
            AppMsg::CategorySaved(result) => {
                let mut ctx = ctx!(self);
                let next = self.categories.on_category_saved(&mut ctx, result);
                if let Some(route) = next {
                    self.navigate(route);
                }
            }
            AppMsg::CategoryDeleted(result) => {
                let mut ctx = ctx!(self);
                let next = self.categories.on_category_deleted(&mut ctx, result);
                if let Some(route) = next {
                    self.navigate(route);
                }
            }
        }
    }

    fn draw(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        let theme = self.theme.clone();
        let spinner_frame = self.spinner.frame().to_string();
        let surface = terminal.frame()?;
        let area = surface.area();
        surface.fill(area, Style::new().fg(theme.text).bg(theme.background));

        let content = if self.authed() {
            self.draw_header(surface, area, &theme);
            Rect::new(
                area.x,
                area.y + 2,
                area.width,
                area.height.saturating_sub(2),
            )
        } else {
            area
        };

        match self.route {
            Route::Login => self.login.draw(surface, &theme),
            Route::SignUp => self.sign_up.draw(surface, &theme),
            Route::ForgotPassword => self.forgot_password.draw(surface, &theme),
            Route::Tasks => self
                .tasks
                .draw(surface, content, &theme, Some(&spinner_frame)),
            Route::Categories => {
                self.categories
                    .draw(surface, content, &theme, Some(&spinner_frame))
            }
        }

        self.notices.draw(surface, area, &theme);

        if let Some(confirm) = &self.quit_confirm {
            confirm.draw(surface, &theme);
        }

        terminal.flush()
    }

    fn draw_header(&self, surface: &mut Surface, area: Rect, theme: &Theme) {
        let bar = Style::new().fg(theme.text).bg(theme.surface);
        surface.fill(Rect::new(area.x, area.y, area.width, 1), bar);

        let mut x = area.x + 1;
        x += surface.put_str(x, area.y, "TaskDeck", bar.fg(theme.primary).bold());
        x += surface.put_str(x + 2, area.y, "[F1] Tasks", bar) + 2;
        surface.put_str(x + 2, area.y, "[F2] Categories", bar);

        let right = match &self.claims {
            Some(claims) => format!("{}  ^L logout  ^Q quit ", claims.username),
            None => "^L logout  ^Q quit ".to_string(),
        };
        let right_x = area
            .right()
            .saturating_sub(gridview::text::display_width(&right) as u16);
        surface.put_str(right_x, area.y, &right, bar.fg(theme.muted));
    }
}

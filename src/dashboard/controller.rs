//! # Application Controller
//!
//! Orchestrates the dashboard and runs the event loop. Input lines become
//! [`Command`]s; completed requests arrive on the response channel as
//! [`ApiMessage`]s. Both are applied to the view models, then the current
//! route is rendered again.

use crate::cmd_args::CommandLineArgs;
use crate::config::{self, Profile};
use crate::dashboard::commands::{Command, HELP_TEXT};
use crate::dashboard::events::{ApiMessage, LoginMessage};
use crate::dashboard::models::{Exercise, Expert};
use crate::dashboard::services::{ApiClient, ConnectionOptions};
use crate::dashboard::view_models::{
    DashboardShell, LoginController, LoginOutcome, LoginTicket, ResourceScreen, Tab,
};
use crate::dashboard::views::TerminalRenderer;
use anyhow::Result;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Capacity of the response channel
const RESPONSE_CHANNEL_SIZE: usize = 32;

/// Top-level page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
}

/// Settings the controller passes down to screens
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub clamp_page_window: bool,
    pub login_redirect_delay: Duration,
}

impl From<&Profile> for DashboardSettings {
    fn from(profile: &Profile) -> Self {
        Self {
            clamp_page_window: profile.clamp_page_window,
            login_redirect_delay: profile.login_redirect_delay,
        }
    }
}

/// Screen mounted for the active tab
pub enum ActiveScreen {
    Home,
    Expert(ResourceScreen<Expert>),
    Exercise(ResourceScreen<Exercise>),
}

// Evaluate `$body` against whichever resource screen is mounted
macro_rules! on_resource_screen {
    ($self:ident, $screen:ident => $body:expr) => {
        match &mut $self.screen {
            ActiveScreen::Expert($screen) => Some($body),
            ActiveScreen::Exercise($screen) => Some($body),
            ActiveScreen::Home => None,
        }
    };
}

pub struct AppController<W: Write> {
    api: Arc<ApiClient>,
    settings: DashboardSettings,
    route: Route,
    login: LoginController,
    login_tasks: Vec<JoinHandle<()>>,
    shell: DashboardShell,
    screen: ActiveScreen,
    sender: mpsc::Sender<ApiMessage>,
    receiver: mpsc::Receiver<ApiMessage>,
    renderer: TerminalRenderer<W>,
    status: Option<String>,
    should_quit: bool,
}

impl AppController<io::Stdout> {
    /// Build the controller from command line arguments and the profile file
    pub fn new(cmd_args: &CommandLineArgs) -> Result<Self> {
        let profile_path = config::get_profile_path();
        let profile = config::load_profile(cmd_args.profile(), &profile_path)?;
        let server = profile.resolve_server(cmd_args.server())?;

        let options = ConnectionOptions {
            insecure: profile.insecure,
            timeout: profile.timeout,
        };
        let api = ApiClient::new(&server, &options)?;
        tracing::info!("Using backend {} (profile '{}')", api.base_url(), cmd_args.profile());

        Ok(Self::with_writer(
            api,
            DashboardSettings::from(&profile),
            TerminalRenderer::new(io::stdout(), true),
        ))
    }
}

impl<W: Write> AppController<W> {
    /// Create a controller rendering into any writer
    pub fn with_writer(
        api: ApiClient,
        settings: DashboardSettings,
        renderer: TerminalRenderer<W>,
    ) -> Self {
        let (sender, receiver) = mpsc::channel(RESPONSE_CHANNEL_SIZE);
        Self {
            api: Arc::new(api),
            settings,
            route: Route::Login,
            login: LoginController::new(),
            login_tasks: Vec::new(),
            shell: DashboardShell::new(),
            screen: ActiveScreen::Home,
            sender,
            receiver,
            renderer,
            status: None,
            should_quit: false,
        }
    }

    /// Run the main loop until `quit` or end of input
    pub async fn run(&mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        self.render()?;

        while !self.should_quit {
            tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => self.handle_line(&line),
                    None => self.should_quit = true,
                },
                Some(message) = self.receiver.recv() => self.apply_message(message),
            }

            if !self.should_quit {
                self.render()?;
            }
        }
        Ok(())
    }

    /// Parse and execute one input line
    pub fn handle_line(&mut self, line: &str) {
        match Command::parse(line) {
            Ok(Some(command)) => self.execute(command),
            Ok(None) => {}
            Err(e) => self.status = Some(e.to_string()),
        }
    }

    /// Apply a command to the view models
    pub fn execute(&mut self, command: Command) {
        tracing::debug!("Executing {:?}", command);
        self.status = None;

        match command {
            Command::Help => self.status = Some(HELP_TEXT.to_string()),
            Command::Quit => self.should_quit = true,
            Command::Login { email, password } => self.submit_login(&email, &password),
            _ if self.route == Route::Login => {
                self.status = Some("Sign in first (login <email> <password>)".to_string());
            }
            Command::SelectTab(tab) => self.select_tab(tab),
            Command::Logout => self.logout(),
            command => self.execute_on_screen(command),
        }
    }

    fn execute_on_screen(&mut self, command: Command) {
        let status = on_resource_screen!(self, screen => match command {
            Command::Navigate(button) => {
                (!screen.press(button)).then(|| "Page out of range".to_string())
            }
            Command::Create => {
                screen.open_create();
                None
            }
            Command::Edit(id) => {
                screen.open_edit(id);
                None
            }
            Command::SetField { name, value } => {
                screen.set_field(&name, &value).err().map(|e| e.to_string())
            }
            Command::Attach(path) => screen.attach(&path).err().map(|e| format!("{e:#}")),
            Command::Submit => screen.submit().err().map(|e| e.to_string()),
            Command::Cancel => {
                screen.cancel();
                None
            }
            Command::Dismiss => {
                screen.dismiss();
                None
            }
            other => Some(format!("{other:?} is not available here")),
        });

        self.status = match status {
            Some(status) => status,
            None => Some("Select the Expert or Exercise tab first".to_string()),
        };
    }

    fn submit_login(&mut self, email: &str, password: &str) {
        if self.route != Route::Login {
            self.status = Some("Already signed in".to_string());
            return;
        }

        let (ticket, credentials) = self.login.submit(email, password);
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        self.login_tasks.retain(|task| !task.is_finished());
        self.login_tasks.push(tokio::spawn(async move {
            let result = api.login(&credentials).await;
            let message = ApiMessage::Login(LoginMessage::Completed { ticket, result });
            if sender.send(message).await.is_err() {
                tracing::debug!("Response channel closed, dropping login result");
            }
        }));
    }

    fn select_tab(&mut self, tab: Tab) {
        if !self.shell.select(tab) {
            return;
        }
        // Replacing the screen drops the old one, aborting its requests
        self.screen = self.mount(tab);
    }

    fn mount(&self, tab: Tab) -> ActiveScreen {
        let api = Arc::clone(&self.api);
        let sender = self.sender.clone();
        let clamp = self.settings.clamp_page_window;
        match tab {
            Tab::Home => ActiveScreen::Home,
            Tab::Expert => {
                let mut screen = ResourceScreen::new(api, sender, clamp);
                screen.mount();
                ActiveScreen::Expert(screen)
            }
            Tab::Exercise => {
                let mut screen = ResourceScreen::new(api, sender, clamp);
                screen.mount();
                ActiveScreen::Exercise(screen)
            }
        }
    }

    fn logout(&mut self) {
        tracing::info!("Logging out");
        self.screen = ActiveScreen::Home;
        self.shell = DashboardShell::new();
        self.login.reset();
        self.route = Route::Login;
        self.status = Some("Logged out".to_string());
    }

    /// Apply a completed request
    pub fn apply_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::Expert(message) => match &mut self.screen {
                ActiveScreen::Expert(screen) => screen.handle(message),
                _ => tracing::debug!("Dropping expert result, screen not mounted"),
            },
            ApiMessage::Exercise(message) => match &mut self.screen {
                ActiveScreen::Exercise(screen) => screen.handle(message),
                _ => tracing::debug!("Dropping exercise result, screen not mounted"),
            },
            ApiMessage::Login(LoginMessage::Completed { ticket, result }) => {
                if self.login.complete(ticket, result) == LoginOutcome::Succeeded {
                    self.schedule_redirect(ticket);
                }
            }
            ApiMessage::Login(LoginMessage::RedirectDue { ticket }) => {
                if self.route == Route::Login && self.login.is_current(ticket) {
                    tracing::debug!("Navigating to dashboard");
                    self.login.reset();
                    self.route = Route::Dashboard;
                    let tab = self.shell.active();
                    self.screen = self.mount(tab);
                }
            }
        }
    }

    fn schedule_redirect(&mut self, ticket: LoginTicket) {
        let delay = self.settings.login_redirect_delay;
        let sender = self.sender.clone();
        self.login_tasks.push(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let message = ApiMessage::Login(LoginMessage::RedirectDue { ticket });
            if sender.send(message).await.is_err() {
                tracing::debug!("Response channel closed, dropping login redirect");
            }
        }));
    }

    /// Wait for the next completed request
    pub async fn next_message(&mut self) -> Option<ApiMessage> {
        self.receiver.recv().await
    }

    /// Draw the current route
    pub fn render(&mut self) -> Result<()> {
        self.renderer.begin_frame()?;
        match self.route {
            Route::Login => self.renderer.render_login(&self.login)?,
            Route::Dashboard => {
                self.renderer.render_tabs(self.shell.active())?;
                match &self.screen {
                    ActiveScreen::Home => self.renderer.render_home()?,
                    ActiveScreen::Expert(screen) => self.renderer.render_screen(screen)?,
                    ActiveScreen::Exercise(screen) => self.renderer.render_screen(screen)?,
                }
            }
        }
        self.renderer.render_status(self.status.as_deref())?;
        self.renderer.end_frame()
    }

    pub fn route(&self) -> Route {
        self.route
    }

    pub fn shell(&self) -> &DashboardShell {
        &self.shell
    }

    pub fn login(&self) -> &LoginController {
        &self.login
    }

    pub fn screen(&self) -> &ActiveScreen {
        &self.screen
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn renderer(&self) -> &TerminalRenderer<W> {
        &self.renderer
    }
}

impl<W: Write> Drop for AppController<W> {
    fn drop(&mut self) {
        for task in self.login_tasks.drain(..) {
            task.abort();
        }
    }
}

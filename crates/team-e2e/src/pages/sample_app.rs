// Sample App - Login form of the UI Testing Playground
//
// Any non-empty user name with the password "pwd" logs in; everything else
// is rejected. The status line reports the outcome.

use crate::error::{Error, Result};
use crate::locator::{Locate, Surface};
use crate::wait::{self, WaitState};
use std::fmt;
use std::time::Duration;

const STATUS: &str = "#loginstatus";
const USER_INPUT: &str = "input[name='UserName']";
const PASSWORD_INPUT: &str = "input[name='Password']";
const LOGIN_BUTTON: &str = "button#login";

const LOGGED_OUT_MESSAGE: &str = "User logged out.";
const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username/password";

/// What the status line says after the latest submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoginState {
    LoggedOut,
    InvalidCredentials,
    /// Carries the submitted user name verbatim
    LoggedIn(String),
}

impl LoginState {
    /// The exact status text the page shows for this state.
    pub fn message(&self) -> String {
        match self {
            LoginState::LoggedOut => LOGGED_OUT_MESSAGE.to_string(),
            LoginState::InvalidCredentials => INVALID_CREDENTIALS_MESSAGE.to_string(),
            LoginState::LoggedIn(user) => format!("Welcome, {}!", user),
        }
    }

    /// Parses a status text; `None` for anything the page is not known to show.
    pub fn from_status(text: &str) -> Option<Self> {
        match text.trim() {
            LOGGED_OUT_MESSAGE => Some(LoginState::LoggedOut),
            INVALID_CREDENTIALS_MESSAGE => Some(LoginState::InvalidCredentials),
            other => other
                .strip_prefix("Welcome, ")
                .and_then(|rest| rest.strip_suffix('!'))
                .map(|user| LoginState::LoggedIn(user.to_string())),
        }
    }
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Page object for the Sample App login form.
#[derive(Debug, Clone)]
pub struct SampleApp<L> {
    status: L,
    user_input: L,
    password_input: L,
    login_button: L,
}

impl<L: Locate> SampleApp<L> {
    pub(crate) async fn new<P>(page: &P) -> Self
    where
        P: Surface<Locator = L>,
    {
        Self {
            status: page.locator(STATUS).await,
            user_input: page.locator(USER_INPUT).await,
            password_input: page.locator(PASSWORD_INPUT).await,
            login_button: page.locator(LOGIN_BUTTON).await,
        }
    }

    /// Waits for the login button to become visible.
    pub async fn await_loaded(&self, timeout: Duration) -> Result<()> {
        wait::wait_for(&self.login_button, WaitState::Visible, timeout).await
    }

    /// Types both credentials. Empty strings leave a field blank.
    pub async fn fill_credentials(&self, user: &str, password: &str) -> Result<()> {
        self.user_input.fill(user).await?;
        self.password_input.fill(password).await
    }

    /// Submits the form. Read the status afterwards to see the outcome.
    pub async fn login(&self) -> Result<()> {
        self.login_button.click(None).await
    }

    /// The literal status text.
    pub async fn login_status(&self) -> Result<String> {
        self.status.inner_text().await
    }

    /// The status text parsed into a [`LoginState`].
    pub async fn login_state(&self) -> Result<LoginState> {
        let status = self.login_status().await?;
        LoginState::from_status(&status)
            .ok_or_else(|| Error::Parse(format!("unrecognised login status '{}'", status)))
    }
}

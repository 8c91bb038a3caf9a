use super::text_field::TextField;
use crate::api::{SignInRequest, SignUpRequest};
use crate::models::ApiRequest;
use crate::validation::{validate_sign_in, validate_sign_up};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    SignIn,
    SignUp,
}

impl AuthMode {
    pub fn title(&self) -> &'static str {
        match self {
            AuthMode::SignIn => "Sign in",
            AuthMode::SignUp => "Create account",
        }
    }
}

#[derive(Debug)]
pub enum SignInAction {
    None,
    Back,
    Submit(ApiRequest),
}

/// Sign-in form with a sign-up variant behind Ctrl+T.
#[derive(Debug)]
pub struct SignInScreen {
    pub mode: AuthMode,
    full_name: TextField,
    email: TextField,
    password: TextField,
    confirmation: TextField,
    pub focus: usize,
    pub errors: Vec<String>,
    pub pending: bool,
}

impl Default for SignInScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInScreen {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::SignIn,
            full_name: TextField::new("Full name"),
            email: TextField::new("Email"),
            password: TextField::new("Password").masked(),
            confirmation: TextField::new("Confirm password").masked(),
            focus: 0,
            errors: Vec::new(),
            pending: false,
        }
    }

    pub fn fields(&self) -> Vec<&TextField> {
        match self.mode {
            AuthMode::SignIn => vec![&self.email, &self.password],
            AuthMode::SignUp => vec![
                &self.full_name,
                &self.email,
                &self.password,
                &self.confirmation,
            ],
        }
    }

    fn focused_field_mut(&mut self) -> &mut TextField {
        match (self.mode, self.focus) {
            (AuthMode::SignIn, 0) => &mut self.email,
            (AuthMode::SignIn, _) => &mut self.password,
            (AuthMode::SignUp, 0) => &mut self.full_name,
            (AuthMode::SignUp, 1) => &mut self.email,
            (AuthMode::SignUp, 2) => &mut self.password,
            (AuthMode::SignUp, _) => &mut self.confirmation,
        }
    }

    pub fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.focus = 0;
        self.errors.clear();
    }

    /// Clears the secrets after a request settles or the user leaves.
    pub fn reset_passwords(&mut self) {
        self.password.clear();
        self.confirmation.clear();
    }

    pub fn fail(&mut self, message: String) {
        self.pending = false;
        self.errors = vec![message];
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> SignInAction {
        if key.code == KeyCode::Esc {
            self.pending = false;
            self.errors.clear();
            self.reset_passwords();
            return SignInAction::Back;
        }
        if self.pending {
            return SignInAction::None;
        }

        let field_count = self.fields().len();
        match key.code {
            KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.toggle_mode();
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % field_count;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + field_count - 1) % field_count;
            }
            KeyCode::Enter => return self.submit(),
            _ => {
                self.focused_field_mut().handle_key(key);
            }
        }
        SignInAction::None
    }

    fn submit(&mut self) -> SignInAction {
        let email = self.email.value().trim().to_string();
        let errors = match self.mode {
            AuthMode::SignIn => validate_sign_in(&email, self.password.value()),
            AuthMode::SignUp => validate_sign_up(
                self.full_name.value(),
                &email,
                self.password.value(),
                self.confirmation.value(),
            ),
        };
        if !errors.is_empty() {
            self.errors = errors.iter().map(ToString::to_string).collect();
            return SignInAction::None;
        }

        self.errors.clear();
        self.pending = true;
        let request = match self.mode {
            AuthMode::SignIn => ApiRequest::SignIn(SignInRequest {
                email,
                password: self.password.value().to_string(),
            }),
            AuthMode::SignUp => ApiRequest::SignUp(SignUpRequest {
                full_name: self.full_name.value().trim().to_string(),
                email,
                password: self.password.value().to_string(),
            }),
        };
        SignInAction::Submit(request)
    }
}

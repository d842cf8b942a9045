//! Login and registration screens.
//!
//! Both holders validate their fields synchronously on submit. Any failing
//! validator sets the matching field error and the pipeline is not invoked.

use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

use super::StateHolder;
use crate::framework::Resource;
use crate::model::{LoginRequest, RegisterRequest, User};
use crate::use_cases::{LoginUseCase, RegisterUseCase};
use crate::validation::{validate_email, validate_password, validate_username, PasswordPolicy};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginFormState {
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    /// Latest envelope of the login call; `None` before the first valid submit.
    pub result: Option<Resource<User>>,
}

impl LoginFormState {
    pub fn is_logged_in(&self) -> bool {
        matches!(self.result, Some(Resource::Success { .. }))
    }
}

pub struct LoginHolder {
    core: StateHolder<LoginFormState>,
    login: LoginUseCase,
    policy: PasswordPolicy,
}

impl LoginHolder {
    pub fn new(login: LoginUseCase, policy: PasswordPolicy) -> Self {
        Self {
            core: StateHolder::new(LoginFormState::default()),
            login,
            policy,
        }
    }

    pub fn state(&self) -> LoginFormState {
        self.core.state()
    }

    pub fn subscribe(&self) -> WatchStream<LoginFormState> {
        self.core.subscribe()
    }

    /// Validates the form and, if it passes, starts the login call.
    /// Returns `None` when validation rejected the input.
    pub fn submit(&self, email: &str, password: &str) -> Option<JoinHandle<()>> {
        let email_check = validate_email(email);
        let password_check = validate_password(password, self.policy);
        let valid = email_check.successful && password_check.successful;

        self.core.update(|state| {
            state.email_error = email_check.error_message;
            state.password_error = password_check.error_message;
            if !valid {
                state.result = None;
            }
        });
        if !valid {
            debug!("Login form rejected");
            return None;
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        Some(
            self.core
                .launch(self.login.execute(request), |state, resource| {
                    state.result = Some(resource)
                }),
        )
    }

    pub fn close(&self) {
        self.core.close();
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterFormState {
    pub full_name_error: Option<String>,
    pub username_error: Option<String>,
    pub email_error: Option<String>,
    pub password_error: Option<String>,
    pub result: Option<Resource<User>>,
}

/// Raw field values of the registration form.
#[derive(Clone, Default)]
pub struct RegisterForm {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

pub struct RegisterHolder {
    core: StateHolder<RegisterFormState>,
    register: RegisterUseCase,
    policy: PasswordPolicy,
}

impl RegisterHolder {
    pub fn new(register: RegisterUseCase, policy: PasswordPolicy) -> Self {
        Self {
            core: StateHolder::new(RegisterFormState::default()),
            register,
            policy,
        }
    }

    pub fn state(&self) -> RegisterFormState {
        self.core.state()
    }

    pub fn subscribe(&self) -> WatchStream<RegisterFormState> {
        self.core.subscribe()
    }

    pub fn submit(&self, form: RegisterForm) -> Option<JoinHandle<()>> {
        let full_name_error = form
            .full_name
            .trim()
            .is_empty()
            .then(|| "Full name cannot be empty".to_string());
        let username_check = validate_username(&form.username);
        let email_check = validate_email(&form.email);
        let password_check = validate_password(&form.password, self.policy);
        let valid = full_name_error.is_none()
            && username_check.successful
            && email_check.successful
            && password_check.successful;

        self.core.update(|state| {
            state.full_name_error = full_name_error;
            state.username_error = username_check.error_message;
            state.email_error = email_check.error_message;
            state.password_error = password_check.error_message;
            if !valid {
                state.result = None;
            }
        });
        if !valid {
            debug!("Registration form rejected");
            return None;
        }

        let request = RegisterRequest {
            full_name: form.full_name.trim().to_string(),
            username: form.username,
            email: form.email.trim().to_string(),
            password: form.password,
        };
        Some(
            self.core
                .launch(self.register.execute(request), |state, resource| {
                    state.result = Some(resource)
                }),
        )
    }

    pub fn close(&self) {
        self.core.close();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::mock::{Endpoint, MockApiClient};
    use crate::model::{AuthToken, Session};
    use crate::repository::ApiAuthRepository;
    use crate::token::{MemoryTokenStore, TokenStore};

    fn user() -> User {
        User {
            id: 3,
            username: "pooja".to_string(),
            email: "pooja@example.com".to_string(),
            full_name: "Pooja Bishnoi".to_string(),
            created_at: None,
        }
    }

    fn auth(mock: Arc<MockApiClient>, tokens: Arc<dyn TokenStore>) -> Arc<ApiAuthRepository> {
        Arc::new(ApiAuthRepository::new(mock, tokens))
    }

    #[tokio::test]
    async fn invalid_login_never_calls_the_api() {
        let mock = Arc::new(MockApiClient::new());
        let repository = auth(mock.clone(), Arc::new(MemoryTokenStore::new()));
        let holder = LoginHolder::new(LoginUseCase::new(repository), PasswordPolicy::default());

        let job = holder.submit("not-an-email", "short");

        assert!(job.is_none());
        let state = holder.state();
        assert_eq!(state.email_error.as_deref(), Some("That's not a valid email"));
        assert_eq!(
            state.password_error.as_deref(),
            Some("Password needs to consist of at least 8 characters")
        );
        assert_eq!(state.result, None);
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn valid_login_runs_the_pipeline() {
        let mock = Arc::new(MockApiClient::new());
        mock.expect(Endpoint::Login).return_ok(Session {
            token: AuthToken::new("t"),
            user: user(),
        });
        let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let repository = auth(mock.clone(), tokens.clone());
        let holder = LoginHolder::new(LoginUseCase::new(repository), PasswordPolicy::default());

        let job = holder.submit(" pooja@example.com ", "correct horse");
        job.expect("form is valid").await.unwrap();

        let state = holder.state();
        assert_eq!(state.email_error, None);
        assert_eq!(state.password_error, None);
        assert!(state.is_logged_in());
        assert!(tokens.is_logged_in().await);
        mock.verify();
    }

    #[tokio::test]
    async fn server_rejection_is_surfaced_as_result_error() {
        let mock = Arc::new(MockApiClient::new());
        mock.expect(Endpoint::Login).return_status(401, "Invalid credentials");
        let repository = auth(mock, Arc::new(MemoryTokenStore::new()));
        let holder = LoginHolder::new(LoginUseCase::new(repository), PasswordPolicy::default());

        holder
            .submit("pooja@example.com", "wrong password")
            .expect("form is valid")
            .await
            .unwrap();

        let state = holder.state();
        assert_eq!(
            state.result.as_ref().and_then(Resource::message),
            Some("Invalid credentials")
        );
        assert!(!state.is_logged_in());
    }

    #[tokio::test]
    async fn register_reports_every_failing_field() {
        let mock = Arc::new(MockApiClient::new());
        let repository = auth(mock.clone(), Arc::new(MemoryTokenStore::new()));
        let holder =
            RegisterHolder::new(RegisterUseCase::new(repository), PasswordPolicy { min_length: 10 });

        let job = holder.submit(RegisterForm {
            full_name: " ".to_string(),
            username: "9lives".to_string(),
            email: String::new(),
            password: "password1".to_string(),
        });

        assert!(job.is_none());
        let state = holder.state();
        assert_eq!(state.full_name_error.as_deref(), Some("Full name cannot be empty"));
        assert_eq!(
            state.username_error.as_deref(),
            Some("Username cannot start with a number")
        );
        assert_eq!(state.email_error.as_deref(), Some("Email cannot be empty"));
        assert_eq!(
            state.password_error.as_deref(),
            Some("Password needs to consist of at least 10 characters")
        );
        assert_eq!(mock.total_calls(), 0);
    }

    #[tokio::test]
    async fn valid_registration_clears_previous_errors() {
        let mock = Arc::new(MockApiClient::new());
        mock.expect(Endpoint::Register).return_ok(Session {
            token: AuthToken::new("t"),
            user: user(),
        });
        let repository = auth(mock, Arc::new(MemoryTokenStore::new()));
        let holder = RegisterHolder::new(RegisterUseCase::new(repository), PasswordPolicy::default());

        assert!(holder.submit(RegisterForm::default()).is_none());
        assert!(holder.state().username_error.is_some());

        let form = RegisterForm {
            full_name: "Pooja Bishnoi".to_string(),
            username: "pooja".to_string(),
            email: "pooja@example.com".to_string(),
            password: "khejri-tree".to_string(),
        };
        holder.submit(form).expect("form is valid").await.unwrap();

        let state = holder.state();
        assert_eq!(state.username_error, None);
        assert_eq!(state.result, Some(Resource::success(user())));
    }
}

// ============================================================================
// AUTH VIEWMODEL - Login, registro y logout
// ============================================================================
// Login/registro OK → set_session(token, user) → /home
// Una respuesta que llega con la pantalla ya desmontada se descarta entera.
// Logout limpia la sesión local antes de avisar al backend.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::ClientError;
use crate::models::{LoginRequest, RegisterRequest};
use crate::router::Route;
use crate::services::{classify, Flow};
use crate::state::RequestTracker;
use crate::utils::constants::{MAX_EMAIL, MAX_NAME};
use crate::utils::validation::{
    normalize_email, sanitize, strip_whitespace, truncate_chars, validate_email, validate_name,
    validate_password, validate_password_confirmation, FieldState,
};
use crate::viewmodels::ViewContext;

// ============================================================================
// LOGIN
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub email_touched: bool,
    pub password_touched: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

#[derive(Clone)]
pub struct LoginViewModel {
    ctx: ViewContext,
    form: Rc<RefCell<LoginForm>>,
    tracker: RequestTracker,
}

impl LoginViewModel {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            form: Rc::new(RefCell::new(LoginForm::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub fn form(&self) -> LoginForm {
        self.form.borrow().clone()
    }

    pub fn set_email(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.email = truncate_chars(&strip_whitespace(value), MAX_EMAIL);
        form.email_touched = true;
    }

    pub fn set_password(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.password = value.to_string();
        form.password_touched = true;
    }

    pub fn email_state(&self) -> FieldState {
        let form = self.form.borrow();
        FieldState::evaluate(form.email_touched, validate_email(&form.email))
    }

    pub fn can_submit(&self) -> bool {
        let form = self.form.borrow();
        !form.submitting && !form.email.trim().is_empty() && !form.password.is_empty()
    }

    pub async fn submit(&self) -> Result<(), ClientError> {
        if !self.can_submit() {
            return Err(ClientError::Validation("Completa email y contrasena.".to_string()));
        }

        let request = {
            let mut form = self.form.borrow_mut();
            if let Err(msg) = validate_email(&form.email) {
                form.email_touched = true;
                form.error = Some(msg.clone());
                return Err(ClientError::Validation(msg));
            }
            form.submitting = true;
            form.error = None;
            LoginRequest {
                email: normalize_email(&form.email),
                password: form.password.clone(),
            }
        };

        let ticket = self.tracker.begin();
        let result = self.ctx.api.login(&request).await;
        if !self.tracker.is_current(ticket) {
            log::debug!("🔕 [AUTH] Respuesta de login descartada (pantalla desmontada)");
            return result.map(|_| ()).map_err(|failure| classify(Flow::Login, &failure));
        }
        self.form.borrow_mut().submitting = false;

        match result {
            Ok(response) => {
                log::info!("✅ [AUTH] Login correcto");
                self.ctx.session.set_session(Some(response.token), response.user);
                self.ctx.navigator.navigate(&Route::Home, false);
                Ok(())
            }
            Err(failure) => {
                let error = self.ctx.fail(Flow::Login, &failure);
                log::warn!("❌ [AUTH] Login fallido: {}", error);
                self.form.borrow_mut().error = Some(error.message());
                Err(error)
            }
        }
    }

    pub fn unmount(&self) {
        self.tracker.unmount();
    }
}

// ============================================================================
// REGISTRO
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub name_touched: bool,
    pub email_touched: bool,
    pub password_touched: bool,
    pub confirmation_touched: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl RegisterForm {
    fn checks(&self) -> [Result<(), String>; 4] {
        [
            validate_name(&self.name),
            validate_email(&self.email),
            validate_password(&self.password),
            validate_password_confirmation(&self.password, &self.password_confirmation),
        ]
    }
}

#[derive(Clone)]
pub struct RegisterViewModel {
    ctx: ViewContext,
    form: Rc<RefCell<RegisterForm>>,
    tracker: RequestTracker,
}

impl RegisterViewModel {
    pub fn new(ctx: ViewContext) -> Self {
        Self {
            ctx,
            form: Rc::new(RefCell::new(RegisterForm::default())),
            tracker: RequestTracker::new(),
        }
    }

    pub fn form(&self) -> RegisterForm {
        self.form.borrow().clone()
    }

    pub fn set_name(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.name = truncate_chars(&sanitize(value), MAX_NAME);
        form.name_touched = true;
    }

    pub fn set_email(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.email = truncate_chars(&strip_whitespace(value), MAX_EMAIL);
        form.email_touched = true;
    }

    pub fn set_password(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.password = value.to_string();
        form.password_touched = true;
    }

    pub fn set_password_confirmation(&self, value: &str) {
        let mut form = self.form.borrow_mut();
        form.password_confirmation = value.to_string();
        form.confirmation_touched = true;
    }

    /// Estados visibles de (nombre, email, contraseña, confirmación)
    pub fn field_states(&self) -> [FieldState; 4] {
        let form = self.form.borrow();
        let [name, email, password, confirmation] = form.checks();
        [
            FieldState::evaluate(form.name_touched, name),
            FieldState::evaluate(form.email_touched, email),
            FieldState::evaluate(form.password_touched, password),
            FieldState::evaluate(form.confirmation_touched, confirmation),
        ]
    }

    pub fn can_submit(&self) -> bool {
        let form = self.form.borrow();
        !form.submitting && form.checks().iter().all(Result::is_ok)
    }

    pub async fn submit(&self) -> Result<(), ClientError> {
        let request = {
            let mut form = self.form.borrow_mut();
            if form.submitting {
                return Err(ClientError::Validation("Registro en curso.".to_string()));
            }
            // Al enviar se chequea todo, tocado o no
            if let Some(Err(msg)) = form.checks().into_iter().find(Result::is_err) {
                form.name_touched = true;
                form.email_touched = true;
                form.password_touched = true;
                form.confirmation_touched = true;
                form.error = Some(msg.clone());
                return Err(ClientError::Validation(msg));
            }
            form.submitting = true;
            form.error = None;
            RegisterRequest {
                name: form.name.trim().to_string(),
                email: normalize_email(&form.email),
                password: form.password.clone(),
                password_confirmation: form.password_confirmation.clone(),
            }
        };

        let ticket = self.tracker.begin();
        let result = self.ctx.api.register(&request).await;
        if !self.tracker.is_current(ticket) {
            log::debug!("🔕 [AUTH] Respuesta de registro descartada (pantalla desmontada)");
            return result.map(|_| ()).map_err(|failure| classify(Flow::Register, &failure));
        }
        self.form.borrow_mut().submitting = false;

        match result {
            Ok(response) => {
                log::info!("✅ [AUTH] Cuenta creada");
                self.ctx.session.set_session(Some(response.token), response.user);
                self.ctx.navigator.navigate(&Route::Home, false);
                Ok(())
            }
            Err(failure) => {
                let error = self.ctx.fail(Flow::Register, &failure);
                log::warn!("❌ [AUTH] Registro fallido: {}", error);
                self.form.borrow_mut().error = Some(error.message());
                Err(error)
            }
        }
    }

    pub fn unmount(&self) {
        self.tracker.unmount();
    }
}

// ============================================================================
// LOGOUT
// ============================================================================

/// Cerrar sesión. La sesión local se limpia primero; el POST /logout va
/// después con el token capturado y su fallo solo se loguea.
pub async fn logout(ctx: &ViewContext) {
    let token = ctx.session.token();
    ctx.session.clear();
    ctx.navigator.navigate(&Route::public_entry(), true);
    log::info!("👋 [AUTH] Sesión cerrada");

    if let Some(token) = token {
        if let Err(failure) = ctx.api.logout(token).await {
            log::warn!("⚠️ [AUTH] Error en logout backend: {:?}", failure.status());
        }
    }
}

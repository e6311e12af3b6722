// ============================================================================
// SESSION STATE - Token + usuario, persistido en sessionStorage
// ============================================================================
// Un solo escritor a la vez por convención (login/registro activo o logout).
// Los lectores (Route Guard, ApiClient) leen siempre el valor vivo.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::models::User;
use crate::platform::TokenStorage;
use crate::utils::constants::TOKEN_STORAGE_KEY;

/// Snapshot de la sesión. `user` solo tiene sentido con `token` presente.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
}

/// Estado de sesión compartido (clones apuntan al mismo estado)
#[derive(Clone)]
pub struct SessionState {
    session: Rc<RefCell<Session>>,
    storage: Rc<dyn TokenStorage>,
    restored: Rc<Cell<bool>>,
}

impl SessionState {
    /// Crear estado vacío sobre un storage
    pub fn new(storage: Rc<dyn TokenStorage>) -> Self {
        Self {
            session: Rc::new(RefCell::new(Session::default())),
            storage,
            restored: Rc::new(Cell::new(false)),
        }
    }

    /// Instalar sesión. Token ausente o vacío limpia token y usuario juntos.
    pub fn set_session(&self, token: Option<String>, user: Option<User>) {
        let token = token.filter(|t| !t.is_empty());
        let user = if token.is_some() { user } else { None };

        self.persist(token.as_deref());

        let mut session = self.session.borrow_mut();
        session.token = token;
        session.user = user;
    }

    /// Obtener sesión
    pub fn get_session(&self) -> Session {
        self.session.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.borrow().token.clone()
    }

    pub fn user(&self) -> Option<User> {
        self.session.borrow().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.borrow().token.is_some()
    }

    /// Logout local
    pub fn clear(&self) {
        log::info!("🗑️ [SESSION] Sesión limpiada");
        self.set_session(None, None);
    }

    /// Restaurar el token guardado. Solo la primera llamada lee el storage.
    /// Devuelve `true` si hay sesión tras restaurar.
    pub fn restore(&self) -> bool {
        if self.restored.replace(true) {
            return self.is_authenticated();
        }

        match self.storage.load(TOKEN_STORAGE_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                log::info!("💾 [SESSION] Token encontrado en storage, sesión restaurada");
                // El usuario no se persiste: solo el token
                let mut session = self.session.borrow_mut();
                session.token = Some(token);
                session.user = None;
                true
            }
            Ok(_) => {
                log::info!("📋 [SESSION] Sin token guardado");
                false
            }
            Err(e) => {
                log::warn!("⚠️ [SESSION] No se pudo leer el token: {}", e);
                false
            }
        }
    }

    fn persist(&self, token: Option<&str>) {
        let result = match token {
            Some(t) => self.storage.save(TOKEN_STORAGE_KEY, t),
            None => self.storage.remove(TOKEN_STORAGE_KEY),
        };
        if let Err(e) = result {
            log::warn!("⚠️ [SESSION] Storage no disponible: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::memory::MemoryTokenStorage;

    fn user() -> User {
        serde_json::from_str(r#"{"id": 1, "name": "Ana", "email": "ana@x.com"}"#).unwrap()
    }

    #[test]
    fn set_session_persists_and_reload_restores_token() {
        let storage = MemoryTokenStorage::new();
        let state = SessionState::new(Rc::new(storage.clone()));
        state.set_session(Some("tok-1".into()), Some(user()));
        assert_eq!(storage.get(TOKEN_STORAGE_KEY).as_deref(), Some("tok-1"));

        let reloaded = SessionState::new(Rc::new(storage.clone()));
        assert!(reloaded.restore());
        assert_eq!(reloaded.token().as_deref(), Some("tok-1"));
        assert_eq!(reloaded.user(), None);
    }

    #[test]
    fn clearing_token_clears_user_and_storage() {
        let storage = MemoryTokenStorage::new();
        let state = SessionState::new(Rc::new(storage.clone()));
        state.set_session(Some("tok".into()), Some(user()));

        state.set_session(None, Some(user()));
        assert_eq!(state.get_session(), Session::default());
        assert_eq!(storage.get(TOKEN_STORAGE_KEY), None);

        let reloaded = SessionState::new(Rc::new(storage));
        assert!(!reloaded.restore());
        assert!(!reloaded.is_authenticated());
    }

    #[test]
    fn empty_token_counts_as_absent() {
        let storage = MemoryTokenStorage::new();
        let state = SessionState::new(Rc::new(storage.clone()));
        state.set_session(Some(String::new()), Some(user()));
        assert!(!state.is_authenticated());
        assert_eq!(state.user(), None);
        assert_eq!(storage.get(TOKEN_STORAGE_KEY), None);
    }

    #[test]
    fn restore_reads_storage_only_once() {
        let storage = MemoryTokenStorage::new();
        let state = SessionState::new(Rc::new(storage.clone()));
        assert!(!state.restore());

        storage.save(TOKEN_STORAGE_KEY, "late").unwrap();
        assert!(!state.restore());
        assert_eq!(state.token(), None);
    }
}

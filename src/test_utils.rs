// Dobles de prueba compartidos por los tests de services y viewmodels

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::oneshot;

use crate::config::AppConfig;
use crate::platform::memory::{MemoryTokenStorage, RecordingNavigator};
use crate::platform::{HttpRequest, HttpResponse, HttpTransport};
use crate::services::ApiClient;
use crate::state::SessionState;
use crate::viewmodels::ViewContext;

type Reply = Result<HttpResponse, String>;

enum Scripted {
    Ready(Reply),
    Deferred(oneshot::Receiver<Reply>),
}

/// Transporte con respuestas en cola, en orden de envío
#[derive(Clone, Default)]
pub struct MockTransport {
    replies: Rc<RefCell<VecDeque<Scripted>>>,
    requests: Rc<RefCell<Vec<HttpRequest>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, response: HttpResponse) {
        self.replies.borrow_mut().push_back(Scripted::Ready(Ok(response)));
    }

    /// Sin respuesta (red caída)
    pub fn push_network_error(&self) {
        self.replies
            .borrow_mut()
            .push_back(Scripted::Ready(Err("Failed to fetch".to_string())));
    }

    /// La respuesta llega cuando el test la envía por el canal
    pub fn defer(&self) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.replies.borrow_mut().push_back(Scripted::Deferred(rx));
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, String> {
        self.requests.borrow_mut().push(request);
        let next = self.replies.borrow_mut().pop_front();
        match next {
            Some(Scripted::Ready(reply)) => reply,
            Some(Scripted::Deferred(rx)) => rx.await.unwrap_or_else(|_| Err("reply dropped".to_string())),
            None => Err("no scripted reply".to_string()),
        }
    }
}

pub fn reply(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: Some(body),
    }
}

pub fn empty_reply(status: u16) -> HttpResponse {
    HttpResponse { status, body: None }
}

/// Contexto completo sobre dobles en memoria
pub struct Harness {
    pub ctx: ViewContext,
    pub transport: MockTransport,
    pub navigator: RecordingNavigator,
    pub storage: MemoryTokenStorage,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AppConfig::with_backend("https://api.test"))
    }

    pub fn with_config(config: AppConfig) -> Self {
        let transport = MockTransport::new();
        let navigator = RecordingNavigator::new();
        let storage = MemoryTokenStorage::new();
        let session = SessionState::new(Rc::new(storage.clone()));
        let config = Rc::new(config);
        let api = ApiClient::new(Rc::new(transport.clone()), session.clone(), config.clone());
        let ctx = ViewContext {
            api,
            session,
            navigator: Rc::new(navigator.clone()),
            config,
        };
        Self {
            ctx,
            transport,
            navigator,
            storage,
        }
    }

    pub fn logged_in(token: &str) -> Self {
        let harness = Self::new();
        harness.ctx.session.set_session(Some(token.to_string()), None);
        harness
    }
}

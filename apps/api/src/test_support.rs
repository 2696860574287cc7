//! Builders shared by handler and dispatcher tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde_json::Value;

use crate::auth::unsigned_token;
use crate::config::TableConfig;
use crate::dispatch::event::{EventContext, HttpContext, InboundEvent};
use crate::dispatch::routes::Module;
use crate::llm_client::ScriptedGenerator;
use crate::state::AppState;
use crate::store::memory::MemoryTable;

pub const TEST_TABLE: &str = "coach-test";

pub struct TestApp {
    pub state: AppState,
    pub table: Arc<MemoryTable>,
    pub llm: Arc<ScriptedGenerator>,
}

impl TestApp {
    pub fn new(llm: ScriptedGenerator) -> Self {
        Self::with_modules(llm, &Module::ALL)
    }

    pub fn with_modules(llm: ScriptedGenerator, modules: &[Module]) -> Self {
        let table = Arc::new(MemoryTable::new());
        let llm = Arc::new(llm);
        let state = AppState::new(
            &TableConfig {
                table_name: TEST_TABLE.to_string(),
            },
            table.clone(),
            llm.clone(),
            modules.iter().copied().collect::<BTreeSet<_>>(),
        )
        .unwrap();
        Self { state, table, llm }
    }
}

/// An HTTP-API-shaped event with no headers.
pub fn event(method: &str, path: &str, body: Option<&str>) -> InboundEvent {
    InboundEvent {
        raw_path: Some(path.to_string()),
        request_context: Some(EventContext {
            http: Some(HttpContext {
                method: Some(method.to_string()),
            }),
        }),
        body: body.map(|b| Value::String(b.to_string())),
        is_base64_encoded: Some(false),
        ..InboundEvent::default()
    }
}

/// Same as `event`, carrying a bearer token whose `sub` is `user_id`.
pub fn authed_event(user_id: &str, method: &str, path: &str, body: Option<&str>) -> InboundEvent {
    let token = unsigned_token(&serde_json::json!({ "sub": user_id }));
    let mut event = event(method, path, body);
    event.headers = Some(
        [(
            "authorization".to_string(),
            Value::String(format!("Bearer {token}")),
        )]
        .into_iter()
        .collect(),
    );
    event
}

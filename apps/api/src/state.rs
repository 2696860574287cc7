use std::collections::BTreeSet;
use std::sync::Arc;

use crate::assessment::models::Assessment;
use crate::config::TableConfig;
use crate::cover_letter::models::CoverLetter;
use crate::dispatch::routes::Module;
use crate::industry::models::IndustryInsight;
use crate::llm_client::TextGenerator;
use crate::resume::models::Resume;
use crate::store::{Store, StoreError, Table};
use crate::user::models::User;

/// Process-wide wiring, built once at startup and shared read-only by every invocation.
#[derive(Clone)]
pub struct AppState {
    pub users: Store<User>,
    pub resumes: Store<Resume>,
    pub cover_letters: Store<CoverLetter>,
    pub assessments: Store<Assessment>,
    pub insights: Store<IndustryInsight>,
    /// Text-generation collaborator. Anthropic in production, scripted in tests.
    pub llm: Arc<dyn TextGenerator>,
    /// Modules whose routes this deployment serves.
    pub modules: BTreeSet<Module>,
}

impl AppState {
    /// Binds one store per entity to the same table. Fails if the table name is empty.
    pub fn new(
        table_config: &TableConfig,
        table: Arc<dyn Table>,
        llm: Arc<dyn TextGenerator>,
        modules: BTreeSet<Module>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            users: Store::new(table_config, Arc::clone(&table))?,
            resumes: Store::new(table_config, Arc::clone(&table))?,
            cover_letters: Store::new(table_config, Arc::clone(&table))?,
            assessments: Store::new(table_config, Arc::clone(&table))?,
            insights: Store::new(table_config, table)?,
            llm,
            modules,
        })
    }
}

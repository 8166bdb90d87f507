//! Deterministic in-memory host for tests, embedding, and the CLI.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::host::{
    BrowserLocales, PageContext, StoreError, UserSession, VariantPrompt, VariantStore, STORAGE_KEY,
};
use crate::variant::Variant;

#[derive(Debug, Default)]
struct HostState {
    languages: Vec<String>,
    page_variant: Option<Variant>,
    logged_in: bool,
    account_preference: Option<Variant>,
    referrer: Option<String>,
    url: Option<String>,
    storage: HashMap<String, String>,
    storage_failing: bool,
}

/// In-memory implementation of every host capability.
///
/// All signals start absent/empty and can be mutated through a shared
/// reference, so one `Arc<HeadlessHost>` can drive a scenario while the
/// model observes it. Counters record storage writes and prompt triggers
/// for assertions.
#[derive(Debug, Default)]
pub struct HeadlessHost {
    state: Mutex<HostState>,
    storage_writes: AtomicU64,
    prompts: AtomicU64,
}

impl HeadlessHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the ordered browser language list.
    pub fn set_languages<I, S>(&self, languages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.lock().unwrap().languages = languages.into_iter().map(Into::into).collect();
    }

    /// Set or clear the page-rendered variant.
    pub fn set_page_variant(&self, variant: Option<Variant>) {
        self.state.lock().unwrap().page_variant = variant;
    }

    /// Flip the signed-in signal.
    pub fn set_logged_in(&self, logged_in: bool) {
        self.state.lock().unwrap().logged_in = logged_in;
    }

    /// Set or clear the account-level preference.
    ///
    /// The stored preference survives signing out; gating it on the
    /// signed-in state is the model's job.
    pub fn set_account_preference(&self, variant: Option<Variant>) {
        self.state.lock().unwrap().account_preference = variant;
    }

    /// Set or clear the document referrer.
    pub fn set_referrer(&self, referrer: Option<String>) {
        self.state.lock().unwrap().referrer = referrer;
    }

    /// Set or clear the page URL.
    pub fn set_url(&self, url: Option<String>) {
        self.state.lock().unwrap().url = url;
    }

    /// Plant a raw value in the string-keyed storage map.
    ///
    /// Tests use this to seed the [`STORAGE_KEY`] slot, including with
    /// garbage values no catalog member would produce.
    pub fn insert_storage(&self, key: impl Into<String>, value: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .storage
            .insert(key.into(), value.into());
    }

    /// Remove a storage entry.
    pub fn remove_storage(&self, key: &str) {
        self.state.lock().unwrap().storage.remove(key);
    }

    /// Raw stored value under `key`.
    pub fn storage_value(&self, key: &str) -> Option<String> {
        self.state.lock().unwrap().storage.get(key).cloned()
    }

    /// Make subsequent storage loads and saves fail.
    pub fn set_storage_failing(&self, failing: bool) {
        self.state.lock().unwrap().storage_failing = failing;
    }

    /// Number of successful storage writes so far.
    pub fn storage_write_count(&self) -> u64 {
        self.storage_writes.load(Ordering::SeqCst)
    }

    /// Number of prompt triggers so far.
    pub fn prompt_count(&self) -> u64 {
        self.prompts.load(Ordering::SeqCst)
    }
}

impl PageContext for HeadlessHost {
    fn variant(&self) -> Option<Variant> {
        self.state.lock().unwrap().page_variant
    }

    fn referrer(&self) -> Option<String> {
        self.state.lock().unwrap().referrer.clone()
    }

    fn url(&self) -> Option<String> {
        self.state.lock().unwrap().url.clone()
    }
}

impl UserSession for HeadlessHost {
    fn is_logged_in(&self) -> bool {
        self.state.lock().unwrap().logged_in
    }

    fn variant_preference(&self) -> Option<Variant> {
        self.state.lock().unwrap().account_preference
    }
}

impl BrowserLocales for HeadlessHost {
    fn languages(&self) -> Vec<String> {
        self.state.lock().unwrap().languages.clone()
    }
}

impl VariantStore for HeadlessHost {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let state = self.state.lock().unwrap();
        if state.storage_failing {
            return Err(StoreError::Unavailable("injected failure".to_string()));
        }
        Ok(state.storage.get(STORAGE_KEY).cloned())
    }

    fn save(&self, variant: Variant) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        if state.storage_failing {
            return Err(StoreError::WriteRejected("injected failure".to_string()));
        }
        state
            .storage
            .insert(STORAGE_KEY.to_string(), variant.code().to_string());
        self.storage_writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl VariantPrompt for HeadlessHost {
    fn show(&self) {
        self.prompts.fetch_add(1, Ordering::SeqCst);
    }
}

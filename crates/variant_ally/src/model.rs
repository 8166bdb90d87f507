//! Preference resolution over the four variant signals.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::host::{BrowserLocales, PageContext, UserSession, VariantStore};
use crate::variant::Variant;

/// Derives and reconciles the user's variant preference.
///
/// All operations are synchronous and infallible at the API surface;
/// absence of a signal is `None`, never an error. The only side effects
/// are the storage writes in [`local_variant`](Self::local_variant) and
/// [`set_local_variant`](Self::set_local_variant).
#[derive(Clone)]
pub struct VariantModel {
    page: Arc<dyn PageContext>,
    session: Arc<dyn UserSession>,
    locales: Arc<dyn BrowserLocales>,
    store: Arc<dyn VariantStore>,
}

impl VariantModel {
    /// Build a model from individual capabilities.
    pub fn new(
        page: Arc<dyn PageContext>,
        session: Arc<dyn UserSession>,
        locales: Arc<dyn BrowserLocales>,
        store: Arc<dyn VariantStore>,
    ) -> Self {
        Self {
            page,
            session,
            locales,
            store,
        }
    }

    /// Build a model from one host value implementing every capability.
    pub fn with_host<H>(host: Arc<H>) -> Self
    where
        H: PageContext + UserSession + BrowserLocales + VariantStore + 'static,
    {
        Self {
            page: host.clone(),
            session: host.clone(),
            locales: host.clone(),
            store: host,
        }
    }

    /// Variant the current page rendered in.
    ///
    /// Trusted pass-through of the page configuration; `None` for
    /// non-text pages.
    pub fn page_variant(&self) -> Option<Variant> {
        self.page.variant()
    }

    /// Account-level preference of a signed-in user.
    ///
    /// Always `None` for signed-out sessions, whatever preference the
    /// session has stored.
    pub fn account_variant(&self) -> Option<Variant> {
        if self.session.is_logged_in() {
            self.session.variant_preference()
        } else {
            None
        }
    }

    /// First entry of the browser language list found in the catalog.
    ///
    /// This is the single point where free text is validated; everything
    /// downstream works with typed variants.
    pub fn browser_variant(&self) -> Option<Variant> {
        self.locales
            .languages()
            .iter()
            .find_map(|tag| Variant::parse(tag))
    }

    /// Cached local variant, reconciled against the live browser signal.
    ///
    /// This is a reconciling read: when the browser variant is present
    /// and its code differs from the raw cached string (including an
    /// absent cache), the slot is rewritten with the browser variant
    /// before it is returned. Converges after one call; an immediately
    /// repeated call reads the now-matching slot and writes nothing.
    ///
    /// A cached string outside the catalog is exposed as `None` but still
    /// compared (and healed) against the live browser code.
    pub fn local_variant(&self) -> Option<Variant> {
        let browser = self.browser_variant();
        let cached = self.load_raw();

        if let Some(browser) = browser {
            if cached.as_deref() != Some(browser.code()) {
                debug!(
                    "VariantModel::local_variant: syncing {:?} -> {}",
                    cached,
                    browser.code()
                );
                self.set_local_variant(browser);
                return Some(browser);
            }
        }

        cached.as_deref().and_then(Variant::parse)
    }

    /// Best externally-inferred variant: the account preference, else the
    /// browser signal.
    pub fn mediawiki_variant(&self) -> Option<Variant> {
        self.account_variant().or_else(|| self.browser_variant())
    }

    /// The user's preferred variant under strict precedence:
    /// account > local (reconciled) > browser > `None`.
    ///
    /// This is the single source of truth for the preference. Every
    /// signal is evaluated, so the slot sync in
    /// [`local_variant`](Self::local_variant) fires even when the account
    /// preference wins.
    pub fn preferred_variant(&self) -> Option<Variant> {
        let browser = self.browser_variant();
        let local = self.local_variant();
        let account = self.account_variant();

        account.or(local).or(browser)
    }

    /// Unconditionally overwrite the persisted slot.
    ///
    /// Write failures are logged and swallowed.
    pub fn set_local_variant(&self, variant: Variant) {
        if let Err(e) = self.store.save(variant) {
            warn!("Failed to persist local variant {}: {}", variant, e);
        }
    }

    /// Whether the session is signed in.
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }

    fn load_raw(&self) -> Option<String> {
        match self.store.load() {
            Ok(value) => value,
            Err(e) => {
                warn!("Failed to read local variant: {}", e);
                None
            }
        }
    }
}

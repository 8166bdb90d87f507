//! Capability seams between the gadget and its host environment.
//!
//! Everything the model reads or writes goes through these traits, so the
//! same logic runs against a real host page or the in-memory
//! [`HeadlessHost`](crate::HeadlessHost).

use thiserror::Error;

use crate::variant::Variant;

/// Storage key owned by this gadget.
///
/// [`VariantStore`] implementations keep the cached variant under this
/// slot; nothing else writes to it.
pub const STORAGE_KEY: &str = "va-var";

/// Read-only view of the currently rendered page.
pub trait PageContext: Send + Sync {
    /// Variant the page rendered in, `None` for non-text pages.
    fn variant(&self) -> Option<Variant>;

    /// Document referrer, `None` when the host exposes none.
    fn referrer(&self) -> Option<String>;

    /// Full page URL including the query string.
    fn url(&self) -> Option<String>;
}

/// Signed-in state and the account-level preference.
pub trait UserSession: Send + Sync {
    fn is_logged_in(&self) -> bool;

    /// Raw stored preference. The model ignores it for signed-out
    /// sessions; implementations just report what is stored.
    fn variant_preference(&self) -> Option<Variant>;
}

/// Ordered browser language list.
pub trait BrowserLocales: Send + Sync {
    /// Raw language tags, most preferred first.
    fn languages(&self) -> Vec<String>;
}

/// Client-local persistence for the cached variant.
pub trait VariantStore: Send + Sync {
    /// Raw cached value under [`STORAGE_KEY`], `None` when never set.
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the slot with `variant`'s code.
    fn save(&self, variant: Variant) -> Result<(), StoreError>;
}

/// Write-only trigger for the external variant-selection prompt.
pub trait VariantPrompt: Send + Sync {
    fn show(&self);
}

/// Storage failures.
///
/// The model never propagates these: failed reads degrade to an absent
/// value, failed writes are logged and swallowed.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage backend cannot be reached at all.
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    /// Backend refused the write (quota, read-only mode, ...).
    #[error("storage write rejected: {0}")]
    WriteRejected(String),
}

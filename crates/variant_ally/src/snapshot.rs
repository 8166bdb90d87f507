//! Plain-data capture of a host environment.

use tracing::warn;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::headless::HeadlessHost;
use crate::host::{BrowserLocales, PageContext, UserSession, VariantStore, STORAGE_KEY};
use crate::variant::Variant;

/// Every signal of a host environment as plain data.
///
/// Fields carry raw strings so a snapshot can express invalid or garbage
/// inputs; parsing back into the catalog happens in
/// [`apply`](Self::apply). With the `serde` feature (default) a snapshot
/// round-trips through JSON, which is what `vally --scenario` consumes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct HostSnapshot {
    /// Ordered browser language list.
    pub languages: Vec<String>,
    /// Code of the page-rendered variant.
    pub page_variant: Option<String>,
    /// Signed-in state.
    pub logged_in: bool,
    /// Code of the account-level preference.
    pub account_preference: Option<String>,
    /// Document referrer.
    pub referrer: Option<String>,
    /// Current page URL.
    pub url: Option<String>,
    /// Raw value of the persisted variant slot.
    pub stored_variant: Option<String>,
}

impl HostSnapshot {
    /// Capture every signal of a live host.
    ///
    /// Storage read failures are captured as an absent slot.
    pub fn capture<H>(host: &H) -> Self
    where
        H: PageContext + UserSession + BrowserLocales + VariantStore + ?Sized,
    {
        Self {
            languages: host.languages(),
            page_variant: host.variant().map(|v| v.code().to_string()),
            logged_in: host.is_logged_in(),
            account_preference: host.variant_preference().map(|v| v.code().to_string()),
            referrer: host.referrer(),
            url: host.url(),
            stored_variant: host.load().unwrap_or_default(),
        }
    }

    /// Apply this snapshot to a headless host, overwriting every signal.
    ///
    /// Typed fields go through [`Variant::parse`]; unrecognized codes are
    /// logged and applied as absent. The raw stored slot is planted
    /// as-is, preserving garbage values for reconciliation tests.
    pub fn apply(&self, host: &HeadlessHost) {
        host.set_languages(self.languages.clone());
        host.set_page_variant(parse_or_warn("page_variant", self.page_variant.as_deref()));
        host.set_logged_in(self.logged_in);
        host.set_account_preference(parse_or_warn(
            "account_preference",
            self.account_preference.as_deref(),
        ));
        host.set_referrer(self.referrer.clone());
        host.set_url(self.url.clone());

        match &self.stored_variant {
            Some(value) => host.insert_storage(STORAGE_KEY, value.clone()),
            None => host.remove_storage(STORAGE_KEY),
        }
    }
}

fn parse_or_warn(field: &str, code: Option<&str>) -> Option<Variant> {
    let code = code?;
    let parsed = Variant::parse(code);
    if parsed.is_none() {
        warn!("HostSnapshot::apply: ignoring unrecognized {} code {:?}", field, code);
    }
    parsed
}

//! VariantAlly: detection and reconciliation of a user's preferred
//! script variant.
//!
//! The gadget reads four independent signals (the variant the current
//! page rendered in, the signed-in account preference, the browser
//! language list, and a locally persisted choice) and reconciles them
//! into one preferred variant under a fixed precedence:
//!
//! account > local (kept in sync with the browser signal) > browser
//!
//! Everything the logic touches in its host environment sits behind
//! capability traits ([`PageContext`], [`UserSession`], [`BrowserLocales`],
//! [`VariantStore`], [`VariantPrompt`]), so the same model runs against a
//! real host page or the bundled in-memory [`HeadlessHost`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use variant_ally::{HeadlessHost, Variant, VariantModel};
//!
//! let host = Arc::new(HeadlessHost::new());
//! host.set_languages(["en-US", "zh_TW"]);
//!
//! let model = VariantModel::with_host(host);
//! assert_eq!(model.preferred_variant(), Some(Variant::ZhTw));
//! ```

mod debug;
mod headless;
mod host;
mod model;
mod snapshot;
mod variant;

pub use debug::{BufferSink, DebugReporter, DebugSink, LogSink, FORCE_DIALOG_PARAM};
pub use headless::HeadlessHost;
pub use host::{
    BrowserLocales, PageContext, StoreError, UserSession, VariantPrompt, VariantStore, STORAGE_KEY,
};
pub use model::VariantModel;
pub use snapshot::HostSnapshot;
pub use variant::{normalize_code, Script, UnknownVariant, Variant};

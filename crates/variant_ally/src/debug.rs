//! Diagnostic snapshot of every variant signal, plus the forced-prompt
//! URL hook.

use std::fmt::Display;
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::host::{PageContext, VariantPrompt};
use crate::model::VariantModel;
use crate::variant::Variant;

/// Query parameter that force-triggers the variant prompt when present on
/// the page URL. Presence alone counts; the value (even empty) is ignored.
pub const FORCE_DIALOG_PARAM: &str = "va-force-dialog";

/// Line-oriented output seam for diagnostics.
pub trait DebugSink: Send + Sync {
    /// Write one diagnostic entry. Block output arrives as a single call
    /// containing embedded newlines.
    fn write_line(&self, line: &str);
}

/// Routes diagnostic lines through `tracing` at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DebugSink for LogSink {
    fn write_line(&self, line: &str) {
        info!("{line}");
    }
}

/// Captures diagnostic lines for assertions.
#[derive(Debug, Default)]
pub struct BufferSink {
    lines: Mutex<Vec<String>>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries written so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

impl DebugSink for BufferSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }
}

/// Formats variant signals for diagnostics and honors the forced-prompt
/// URL parameter.
///
/// Stateless single-shot operations; a host page typically invokes each
/// once during its load sequence.
pub struct DebugReporter {
    model: VariantModel,
    page: Arc<dyn PageContext>,
    prompt: Arc<dyn VariantPrompt>,
    sink: Arc<dyn DebugSink>,
    build_label: String,
}

impl DebugReporter {
    /// Create a reporter. The build label defaults to the crate version.
    pub fn new(
        model: VariantModel,
        page: Arc<dyn PageContext>,
        prompt: Arc<dyn VariantPrompt>,
        sink: Arc<dyn DebugSink>,
    ) -> Self {
        Self {
            model,
            page,
            prompt,
            sink,
            build_label: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Replace the default build label.
    pub fn with_build_label(mut self, label: impl Into<String>) -> Self {
        self.build_label = label.into();
        self
    }

    /// Emit the full multi-line signal snapshot as one sink write.
    ///
    /// Signals are read through the model in the listed order, so the
    /// block shows post-reconciliation values and may heal the local slot
    /// as a side effect.
    pub fn show_debug_info(&self) {
        let referrer = self.page.referrer().filter(|r| !r.is_empty());

        let block = format!(
            "[VariantAlly]\n\
             Build: {}\n\
             Referrer: {}\n\
             Browser variant: {}\n\
             Local variant: {}\n\
             Account variant: {}\n\
             Page variant: {}\n\
             MediaWiki variant: {}\n\
             User logged in: {}\n\
             Calculated preferred variant: {}",
            self.build_label,
            referrer.as_deref().unwrap_or("(empty)"),
            fmt_variant(self.model.browser_variant()),
            fmt_variant(self.model.local_variant()),
            fmt_variant(self.model.account_variant()),
            fmt_variant(self.model.page_variant()),
            fmt_variant(self.model.mediawiki_variant()),
            self.model.is_logged_in(),
            fmt_variant(self.model.preferred_variant()),
        );

        self.sink.write_line(&block);
    }

    /// One formatted diagnostic line: `[VariantAlly] a/b: value`.
    ///
    /// `labels` may be empty, which yields `[VariantAlly] : value`.
    pub fn output(&self, labels: &[&str], value: impl Display) {
        self.sink
            .write_line(&format!("[VariantAlly] {}: {}", labels.join("/"), value));
    }

    /// Trigger the external prompt when the page URL carries
    /// [`FORCE_DIALOG_PARAM`] in its query string.
    ///
    /// Presence is decided by key equality alone: `?va-force-dialog` and
    /// `?va-force-dialog=` both trigger, `?va-force-dialog-x` does not.
    /// Without a URL this is a no-op.
    pub fn check_debug_url_param(&self) {
        let Some(url) = self.page.url() else {
            return;
        };

        if has_query_param(&url, FORCE_DIALOG_PARAM) {
            debug!("DebugReporter::check_debug_url_param: forcing variant prompt");
            self.prompt.show();
        }
    }
}

fn fmt_variant(variant: Option<Variant>) -> &'static str {
    match variant {
        Some(v) => v.code(),
        None => "(none)",
    }
}

/// Check whether the query string of `url` carries `name` as a key.
fn has_query_param(url: &str, name: &str) -> bool {
    // The fragment cannot contribute query parameters.
    let without_fragment = url.split('#').next().unwrap_or(url);
    let Some((_, query)) = without_fragment.split_once('?') else {
        return false;
    };

    query.split('&').any(|pair| {
        let key = pair.split('=').next().unwrap_or(pair);
        key == name
    })
}

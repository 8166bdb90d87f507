use std::sync::Arc;

use variant_ally::{HeadlessHost, Variant, VariantModel, STORAGE_KEY};

fn host_and_model() -> (Arc<HeadlessHost>, VariantModel) {
    let host = Arc::new(HeadlessHost::new());
    let model = VariantModel::with_host(host.clone());
    (host, model)
}

#[test]
fn browser_variant_only_ever_yields_catalog_members() {
    let (host, model) = host_and_model();

    host.set_languages(["en-US", "fr", "de-DE", "zh", "zh-hans"]);
    assert_eq!(model.browser_variant(), None);

    host.set_languages(["en-US", "zh-TW", "zh-cn"]);
    let found = model.browser_variant().expect("zh-TW is in the catalog");
    assert!(Variant::all().contains(&found));
}

#[test]
fn browser_scan_takes_the_first_catalog_hit() {
    let (host, model) = host_and_model();
    host.set_languages(["en-US", "zh-mo", "zh-cn"]);

    assert_eq!(model.browser_variant(), Some(Variant::ZhMo));
}

#[test]
fn browser_scan_normalizes_raw_tags() {
    let (host, model) = host_and_model();
    host.set_languages(["ZH_HK"]);

    assert_eq!(model.browser_variant(), Some(Variant::ZhHk));
}

#[test]
fn account_wins_over_local_and_browser() {
    let (host, model) = host_and_model();
    host.set_logged_in(true);
    host.set_account_preference(Some(Variant::ZhHk));
    host.insert_storage(STORAGE_KEY, "zh-cn");
    host.set_languages(["zh-tw"]);

    assert_eq!(model.preferred_variant(), Some(Variant::ZhHk));

    // The local slot still syncs to the browser signal even though the
    // account preference won.
    assert_eq!(host.storage_value(STORAGE_KEY).as_deref(), Some("zh-tw"));
    assert_eq!(host.storage_write_count(), 1);
}

#[test]
fn local_beats_browser_when_account_is_absent() {
    let (host, model) = host_and_model();
    // Pre-set the cache to match the browser so reconciliation stays out
    // of the way and only precedence is in play.
    host.insert_storage(STORAGE_KEY, "zh-tw");
    host.set_languages(["zh-tw"]);

    assert_eq!(model.preferred_variant(), Some(Variant::ZhTw));
    assert_eq!(host.storage_write_count(), 0);
}

#[test]
fn cached_variant_alone_decides_the_preference() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "zh-mo");

    assert_eq!(model.preferred_variant(), Some(Variant::ZhMo));
    assert_eq!(host.storage_write_count(), 0);
}

#[test]
fn browser_signal_fills_in_when_account_and_cache_are_absent() {
    let (host, model) = host_and_model();
    host.set_languages(["zh-cn"]);

    assert_eq!(model.preferred_variant(), Some(Variant::ZhCn));

    // Resolving through the empty cache seeds it from the browser.
    assert_eq!(host.storage_value(STORAGE_KEY).as_deref(), Some("zh-cn"));
    assert_eq!(host.storage_write_count(), 1);
}

#[test]
fn all_signals_absent_resolves_to_none() {
    let (host, model) = host_and_model();

    assert_eq!(model.preferred_variant(), None);
    assert_eq!(host.storage_write_count(), 0);
}

#[test]
fn stale_cache_is_rewritten_from_the_browser_signal() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "zh-cn");
    host.set_languages(["zh-tw"]);

    assert_eq!(model.local_variant(), Some(Variant::ZhTw));
    assert_eq!(host.storage_value(STORAGE_KEY).as_deref(), Some("zh-tw"));
    assert_eq!(host.storage_write_count(), 1);

    // Converged: an immediate second read changes nothing.
    assert_eq!(model.local_variant(), Some(Variant::ZhTw));
    assert_eq!(host.storage_write_count(), 1);
}

#[test]
fn matching_cache_is_left_alone() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "zh-tw");
    host.set_languages(["zh-tw"]);

    assert_eq!(model.local_variant(), Some(Variant::ZhTw));
    assert_eq!(host.storage_write_count(), 0);
}

#[test]
fn cache_without_browser_signal_is_returned_unchanged() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "zh-mo");

    assert_eq!(model.local_variant(), Some(Variant::ZhMo));
    assert_eq!(host.storage_write_count(), 0);
}

#[test]
fn garbage_cache_is_exposed_as_absent_but_still_healed() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "klingon");

    // No browser signal: the garbage is not a variant, so the read is
    // absent, and nothing rewrites the slot.
    assert_eq!(model.local_variant(), None);
    assert_eq!(host.storage_value(STORAGE_KEY).as_deref(), Some("klingon"));
    assert_eq!(host.storage_write_count(), 0);

    // With a browser signal the byte-wise comparison sees the mismatch
    // and heals the slot.
    host.set_languages(["zh-tw"]);
    assert_eq!(model.local_variant(), Some(Variant::ZhTw));
    assert_eq!(host.storage_value(STORAGE_KEY).as_deref(), Some("zh-tw"));
    assert_eq!(host.storage_write_count(), 1);
}

#[test]
fn empty_string_cache_is_not_a_variant() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "");

    assert_eq!(model.local_variant(), None);
    assert_eq!(host.storage_write_count(), 0);
}

#[test]
fn signed_out_sessions_expose_no_account_variant() {
    let (host, model) = host_and_model();
    host.set_logged_in(false);
    host.set_account_preference(Some(Variant::ZhHk));
    host.set_languages(["zh-cn"]);

    assert_eq!(model.account_variant(), None);
    assert_eq!(model.preferred_variant(), Some(Variant::ZhCn));
}

#[test]
fn signing_in_surfaces_the_stored_preference() {
    let (host, model) = host_and_model();
    host.set_account_preference(Some(Variant::ZhHk));

    assert_eq!(model.account_variant(), None);

    host.set_logged_in(true);
    assert_eq!(model.account_variant(), Some(Variant::ZhHk));
}

#[test]
fn storage_failures_degrade_to_absence() {
    let (host, model) = host_and_model();
    host.insert_storage(STORAGE_KEY, "zh-tw");
    host.set_storage_failing(true);

    assert_eq!(model.local_variant(), None);
    assert_eq!(model.preferred_variant(), None);
}

#[test]
fn storage_failures_do_not_block_the_browser_signal() {
    let (host, model) = host_and_model();
    host.set_storage_failing(true);
    host.set_languages(["zh-cn"]);

    // The heal attempt fails and is swallowed; the live signal still
    // comes through.
    assert_eq!(model.local_variant(), Some(Variant::ZhCn));
    assert_eq!(model.preferred_variant(), Some(Variant::ZhCn));
    assert_eq!(host.storage_write_count(), 0);
    assert_eq!(host.storage_value(STORAGE_KEY), None);
}

#[test]
fn set_local_variant_overwrites_unconditionally() {
    let (host, model) = host_and_model();

    model.set_local_variant(Variant::ZhCn);
    model.set_local_variant(Variant::ZhHk);

    assert_eq!(host.storage_value(STORAGE_KEY).as_deref(), Some("zh-hk"));
    assert_eq!(host.storage_write_count(), 2);
}

#[test]
fn mediawiki_variant_prefers_account_over_browser() {
    let (host, model) = host_and_model();
    host.set_languages(["zh-cn"]);

    assert_eq!(model.mediawiki_variant(), Some(Variant::ZhCn));

    host.set_logged_in(true);
    host.set_account_preference(Some(Variant::ZhHk));
    assert_eq!(model.mediawiki_variant(), Some(Variant::ZhHk));
}

#[test]
fn page_variant_is_a_trusted_passthrough() {
    let (host, model) = host_and_model();

    assert_eq!(model.page_variant(), None);

    host.set_page_variant(Some(Variant::ZhSg));
    assert_eq!(model.page_variant(), Some(Variant::ZhSg));
}

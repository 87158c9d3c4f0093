// src/devlog.rs
//! Dev-only per-hit decision logging. Never logs raw text; hits are identified
//! by a short hash of their link.

use tracing::info;

pub const ENV_EVENTS_DEV_LOG: &str = "EVENTS_DEV_LOG";

// Dev logging gate: EVENTS_DEV_LOG=1 AND dev env (debug or SHUTTLE_ENV in {local,development,dev})
pub(crate) fn dev_logging_enabled() -> bool {
    let on = std::env::var(ENV_EVENTS_DEV_LOG).ok().as_deref() == Some("1");
    if !on {
        return false;
    }
    if cfg!(debug_assertions) {
        return true;
    }
    is_dev_env_name(&std::env::var("SHUTTLE_ENV").unwrap_or_default())
}

pub(crate) fn is_dev_env_name(name: &str) -> bool {
    matches!(
        name.to_ascii_lowercase().as_str(),
        "local" | "development" | "dev"
    )
}

pub(crate) fn anon_hash(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(12);
    for b in digest.iter().take(6) {
        use std::fmt::Write as _;
        let _ = write!(&mut out, "{:02x}", b);
    }
    out
}

/// Log one filter decision for a hit (`kept` or the rejecting stage).
pub(crate) fn log_hit_decision(link: &str, decision: &str, relaxed_by_user_tokens: bool) {
    if !dev_logging_enabled() {
        return;
    }
    let id = anon_hash(link);
    info!(target: "events", %id, decision, relaxed_by_user_tokens, "hit decision");
}

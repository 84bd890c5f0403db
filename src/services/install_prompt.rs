//! Deferred PWA install prompt. The client posts the captured
//! `beforeinstallprompt` payload here; a later consume call hands it back
//! exactly once, matching the browser rule that a deferred prompt can only
//! be shown a single time.

use std::sync::Mutex;

static DEFERRED: Mutex<Option<serde_json::Value>> = Mutex::new(None);

/// Stash a captured prompt payload, replacing any earlier one.
pub fn record_prompt(payload: serde_json::Value) {
    if let Ok(mut slot) = DEFERRED.lock() {
        *slot = Some(payload);
    }
}

/// Take the stashed prompt, leaving the slot empty. A second take
/// returns `None` until the client captures a fresh prompt.
pub fn take_prompt() -> Option<serde_json::Value> {
    DEFERRED.lock().ok().and_then(|mut slot| slot.take())
}

pub fn has_prompt() -> bool {
    DEFERRED.lock().map(|slot| slot.is_some()).unwrap_or(false)
}

pub fn clear_prompt() {
    if let Ok(mut slot) = DEFERRED.lock() {
        *slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Single test because the slot is process-global.
    #[test]
    fn test_prompt_lifecycle() {
        clear_prompt();
        assert!(!has_prompt());
        assert!(take_prompt().is_none());

        record_prompt(json!({"platforms": ["web"]}));
        assert!(has_prompt());

        let taken = take_prompt().unwrap();
        assert_eq!(taken["platforms"][0], "web");
        assert!(!has_prompt());
        assert!(take_prompt().is_none());

        record_prompt(json!({"platforms": ["android"]}));
        clear_prompt();
        assert!(!has_prompt());
    }
}

use chromiumoxide::cdp::browser_protocol::page::AddScriptToEvaluateOnNewDocumentParams;
use chromiumoxide::page::Page as CrPage;

use crate::error::{Error, Result};

/// Desktop Chrome on Windows, matching what the search site serves to regular visitors.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Key-only Chrome flags for stealth mode.
/// chromiumoxide adds the `--` prefix itself, so keys must NOT include it.
pub fn stealth_key_args() -> Vec<&'static str> {
    vec!["disable-infobars", "no-first-run", "no-default-browser-check"]
}

/// Key-value stealth flags. The user agent is passed separately since it is configurable.
pub fn stealth_kv_args(user_agent: &str) -> Vec<(&'static str, &str)> {
    vec![
        ("disable-blink-features", "AutomationControlled"),
        ("user-agent", user_agent),
    ]
}

/// Register the evasion script so it runs before any site JS on every new document.
pub async fn apply_stealth(page: &CrPage) -> Result<()> {
    let params = AddScriptToEvaluateOnNewDocumentParams::new(STEALTH_JS);
    page.execute(params)
        .await
        .map_err(|e| Error::JsError(format!("Failed to inject stealth scripts: {e}")))?;

    Ok(())
}

static STEALTH_JS: &str = r#"
// Automated Chrome reports webdriver = true; a regular browser reports false.
Object.defineProperty(Navigator.prototype, 'webdriver', {
    get: () => false,
    configurable: true,
    enumerable: true,
});

Object.defineProperty(navigator, 'languages', {
    get: () => ['en-US', 'en'],
    configurable: true,
});

if (!window.chrome) {
    window.chrome = { runtime: {} };
}
"#;


//! Browser integration for article links.
//!
//! Opens link URLs with the desktop's default handler.

use anyhow::{Context, Result};

/// Open a URL in the system browser.
///
/// # Arguments
/// * `url` - Link target
///
/// # Returns
/// * `Result<()>` - Success or error
///
/// # Details
/// Only http(s) links are opened; anything else is refused before a
/// browser is launched.
pub fn open_in_browser(url: &str) -> Result<()> {
    if !is_openable(url) {
        anyhow::bail!("Refusing to open non-web link: {}", url);
    }

    webbrowser::open(url).with_context(|| format!("Failed to open link: {}", url))?;
    tracing::info!(%url, "opened link");
    Ok(())
}

/// Only web links are handed to the browser.
fn is_openable(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_openable() {
        assert!(is_openable("https://pubmed.ncbi.nlm.nih.gov/123"));
        assert!(is_openable("HTTP://example.org"));
        assert!(!is_openable("file:///etc/passwd"));
        assert!(!is_openable("rm -rf /"));
    }

    #[test]
    fn test_open_rejects_non_web_link() {
        assert!(open_in_browser("javascript:alert(1)").is_err());
        assert!(open_in_browser("file:///etc/passwd").is_err());
    }
}

//! Credential selection plumbing.

use tracing::warn;

/// Capability interface over the host's API key selection.
///
/// The orchestrator only ever asks whether a key is selected and, when
/// it is not, prompts for one. A session without a provider behaves as
/// if no key is selected.
pub trait KeyProvider: Send + Sync {
    /// Whether the user currently has a key selected.
    fn has_selected_key(&self) -> bool;

    /// Prompt the user to select a key.
    fn open_select_key(&self);

    /// The key material itself, if available.
    fn api_key(&self) -> Option<String>;
}

/// Key provider backed by the `GEMINI_API_KEY` environment variable.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvKeyProvider;

impl KeyProvider for EnvKeyProvider {
    fn has_selected_key(&self) -> bool {
        self.api_key().is_some()
    }

    fn open_select_key(&self) {
        warn!("no API key configured; set GEMINI_API_KEY in the environment");
    }

    fn api_key(&self) -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
    }
}

use anyhow::{Context, Result};
use gbfsnap_core::CopyHost;
use tracing::warn;

/// The OS clipboard. A registered listener's payload is what the copy
/// command writes.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    pending: Option<String>,
}

impl SystemClipboard {
    pub fn open() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("cannot open system clipboard")?;
        Ok(Self {
            inner,
            pending: None,
        })
    }

    pub fn paste(&mut self) -> Result<String> {
        self.inner
            .get_text()
            .context("clipboard holds no text")
    }
}

impl CopyHost for SystemClipboard {
    type Listener = ();

    fn add_copy_listener(&mut self, payload: String) {
        self.pending = Some(payload);
    }

    fn remove_copy_listener(&mut self, _listener: ()) {
        self.pending = None;
    }

    fn exec_copy(&mut self) -> bool {
        let Some(text) = self.pending.clone() else {
            return false;
        };
        match self.inner.set_text(text) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                false
            }
        }
    }
}

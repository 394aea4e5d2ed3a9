//! Copy-to-clipboard through a one-shot copy listener.
//!
//! The host registers a listener that supplies the payload when the copy
//! command fires; [`copy_text`] triggers the copy and the listener is removed
//! when the guard drops, including on unwind.

use serde::Serialize;

/// A document that can run the copy command.
pub trait CopyHost {
    type Listener;

    /// Registers a listener that answers the next copy with `payload` and
    /// suppresses the default copy.
    fn add_copy_listener(&mut self, payload: String) -> Self::Listener;

    fn remove_copy_listener(&mut self, listener: Self::Listener);

    /// Runs the copy command; `false` when the host refused it.
    fn exec_copy(&mut self) -> bool;
}

struct ListenerGuard<'h, H: CopyHost> {
    host: &'h mut H,
    listener: Option<H::Listener>,
}

impl<'h, H: CopyHost> ListenerGuard<'h, H> {
    fn register(host: &'h mut H, payload: String) -> Self {
        let listener = host.add_copy_listener(payload);
        Self {
            host,
            listener: Some(listener),
        }
    }
}

impl<H: CopyHost> Drop for ListenerGuard<'_, H> {
    fn drop(&mut self) {
        if let Some(l) = self.listener.take() {
            self.host.remove_copy_listener(l);
        }
    }
}

pub fn copy_text<H: CopyHost>(host: &mut H, text: String) -> bool {
    let mut guard = ListenerGuard::register(host, text);
    let copied = guard.host.exec_copy();
    drop(guard);
    copied
}

/// Serializes `data` compactly and copies it.
pub fn copy_json_to_clipboard<H: CopyHost, T: Serialize + ?Sized>(
    host: &mut H,
    data: &T,
) -> Result<bool, serde_json::Error> {
    let text = serde_json::to_string(data)?;
    Ok(copy_text(host, text))
}

/// In-process clipboard with document-style copy listeners.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    listeners: Vec<(u64, String)>,
    next_id: u64,
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl CopyHost for MemoryClipboard {
    type Listener = u64;

    fn add_copy_listener(&mut self, payload: String) -> u64 {
        self.next_id += 1;
        self.listeners.push((self.next_id, payload));
        self.next_id
    }

    fn remove_copy_listener(&mut self, listener: u64) {
        self.listeners.retain(|(id, _)| *id != listener);
    }

    fn exec_copy(&mut self) -> bool {
        // the newest listener sets the data last
        match self.listeners.last() {
            Some((_, payload)) => {
                self.contents = Some(payload.clone());
                true
            }
            None => false,
        }
    }
}

//! gbfsnap-core: capture Granblue Fantasy party, EMP and artifact screens as JSON
//!
//! This crate keeps a small, well-factored surface:
//! - Hash dispatch to one of three screen extractors
//! - Extractors reading injected page state (`HostState`) and DOM (`PageDom`)
//! - Versioned export records (`ver` 1 and 2)
//! - Scoped copy-to-clipboard, and a store for pasted EMP/artifact exports
//!
pub mod artifact;
pub mod capture;
pub mod clipboard;
pub mod dispatch;
pub mod dom;
pub mod error;
pub mod host;
pub mod html;
pub mod js;
pub mod party;
pub mod record;
pub mod store;
pub mod weapons;
pub mod zenith;

pub use capture::{
    CaptureOptions, Notifier, Outcome, RecordingNotifier, UNRECOGNIZED_SCREEN_MESSAGE, capture,
    run,
};
pub use clipboard::{CopyHost, MemoryClipboard, copy_json_to_clipboard, copy_text};
pub use dispatch::{Screen, classify};
pub use dom::PageDom;
pub use error::{CaptureError, ExtractError, StoreError};
pub use host::{GameState, HostState};
pub use html::HtmlPage;
pub use record::{
    Artifact, ArtifactSkill, ArtifactSnapshot, Awakening, BonusEntry, PartySnapshot,
    SchemaVersion, Snapshot, ZenithSnapshot,
};

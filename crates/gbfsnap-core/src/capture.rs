use tracing::info;

use crate::artifact::extract_artifact;
use crate::clipboard::{CopyHost, copy_text};
use crate::dispatch::{Screen, classify};
use crate::dom::PageDom;
use crate::error::{CaptureError, ExtractError};
use crate::host::HostState;
use crate::party::extract_party;
use crate::record::{SchemaVersion, Snapshot};
use crate::zenith::extract_zenith;

pub const UNRECOGNIZED_SCREEN_MESSAGE: &str = "Please go to a GBF Party, Character or EMP screen";

#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOptions {
    pub schema: SchemaVersion,
}

/// Blocking user-facing notice, shown when the screen is not one we capture.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Collects alerts instead of showing them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn alert(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

/// Builds the snapshot for the screen `hash` points at, or `None` when the
/// hash matches no capturable screen.
pub fn capture<S, D>(
    hash: &str,
    state: &S,
    dom: &D,
    opts: CaptureOptions,
) -> Result<Option<Snapshot>, ExtractError>
where
    S: HostState + ?Sized,
    D: PageDom + ?Sized,
{
    let snapshot = match classify(hash) {
        Screen::Party => Snapshot::Party(Box::new(extract_party(hash, state, dom, opts.schema)?)),
        Screen::Zenith => Snapshot::Zenith(extract_zenith(state, dom, opts.schema)?),
        Screen::Artifact => Snapshot::Artifact(extract_artifact(state, dom, opts.schema)?),
        Screen::Unrecognized => return Ok(None),
    };
    Ok(Some(snapshot))
}

#[derive(Debug)]
pub enum Outcome {
    Copied(Snapshot),
    /// The host refused the copy command.
    NotCopied(Snapshot),
    Unrecognized,
}

/// One click of the bookmarklet: capture, then copy or alert.
pub fn run<S, D, H, N>(
    hash: &str,
    state: &S,
    dom: &D,
    clipboard: &mut H,
    notifier: &mut N,
    opts: CaptureOptions,
) -> Result<Outcome, CaptureError>
where
    S: HostState + ?Sized,
    D: PageDom + ?Sized,
    H: CopyHost,
    N: Notifier + ?Sized,
{
    let Some(snapshot) = capture(hash, state, dom, opts)? else {
        notifier.alert(UNRECOGNIZED_SCREEN_MESSAGE);
        return Ok(Outcome::Unrecognized);
    };
    let text = snapshot.to_json()?;
    if copy_text(clipboard, text) {
        info!(screen = %classify(hash), "snapshot copied");
        Ok(Outcome::Copied(snapshot))
    } else {
        Ok(Outcome::NotCopied(snapshot))
    }
}

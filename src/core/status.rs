// ─── Status ───
// Stage transitions published to the presentation layer over a channel.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// One observable step of an update-and-launch operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "stage", content = "detail", rename_all = "snake_case")]
pub enum Status {
    CheckingForUpdates,
    Downloading { asset: String },
    Unpacking,
    UpToDate { tag: String },
    Installed { tag: String },
    Launching,
    Done,
    Failed(String),
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::CheckingForUpdates => write!(f, "Checking for updates..."),
            Status::Downloading { .. } => write!(f, "Downloading NeosPlus..."),
            Status::Unpacking => write!(f, "Unpacking NeosPlus..."),
            Status::UpToDate { .. } => write!(f, "NeosPlus is up-to-date."),
            Status::Installed { .. } => {
                write!(f, "NeosPlus downloaded and installed successfully.")
            }
            Status::Launching => write!(f, "Starting Neos with NeosPlus..."),
            Status::Done => write!(f, "Done"),
            Status::Failed(message) => write!(f, "Failed: {}", message),
        }
    }
}

/// Sending half handed to each stage. A reporter without a channel drops
/// every status.
#[derive(Debug, Clone, Default)]
pub struct StatusReporter {
    tx: Option<UnboundedSender<Status>>,
}

impl StatusReporter {
    pub fn channel() -> (Self, UnboundedReceiver<Status>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn silent() -> Self {
        Self::default()
    }

    pub fn report(&self, status: Status) {
        if let Some(tx) = &self.tx {
            // A closed receiver means nobody is watching any more.
            let _ = tx.send(status);
        }
    }
}

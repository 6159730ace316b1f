use std::cell::RefCell;

use crossbeam_channel::{Receiver, Sender, TryRecvError};

use crate::{
    catalog::source::{AudioProbe, Probe},
    encoding::descriptor::EncodingDescriptor,
    foundation::{
        core::Rotation,
        error::{ClipError, ClipResult},
    },
    project::model::Clip,
};

/// One clip of a render request, in the cook server's field names.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderClip {
    /// Trim start in source seconds.
    pub start: f64,
    /// Trim end in source seconds.
    pub end: f64,
    /// Source video id.
    pub thumbnail_name: String,
    /// Serialized as `null` when the clip inherits the source rotation.
    pub override_rotation: Option<Rotation>,
}

impl From<&Clip> for RenderClip {
    fn from(clip: &Clip) -> Self {
        Self {
            start: clip.start,
            end: clip.end,
            thumbnail_name: clip.source_id.clone(),
            override_rotation: clip.rotation_override,
        }
    }
}

/// Request body for a render ("cook") job.
///
/// The encoding travels in the server's probe layout; fields the server ignores
/// (`rotation`, `duration`, bit rates) are zeroed.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RenderRequest {
    /// Clips in timeline order.
    pub clips: Vec<RenderClip>,
    /// Output encoding in the server's probe shape.
    pub encoding: Probe,
    /// Output name without extension.
    pub name: String,
}

impl RenderRequest {
    /// Request for `clips` encoded as `encoding` and saved as `name`.
    pub fn new(clips: &[Clip], encoding: &EncodingDescriptor, name: impl Into<String>) -> Self {
        Self {
            clips: clips.iter().map(RenderClip::from).collect(),
            encoding: wire_encoding(encoding),
            name: name.into(),
        }
    }

    /// Name of the artifact a successful job produces.
    pub fn artifact_name(&self) -> String {
        format!("{}.mp4", self.name)
    }

    /// Serialized request body.
    pub fn to_json(&self) -> ClipResult<String> {
        serde_json::to_string(self)
            .map_err(|e| ClipError::serde(format!("render request serialize failed: {e}")))
    }
}

fn wire_encoding(d: &EncodingDescriptor) -> Probe {
    Probe {
        width: d.width,
        height: d.height,
        rotation: Rotation::Unrotated,
        duration: 0.0,
        pix_fmt: d.pix_fmt.clone(),
        color_space: d.color_space.clone(),
        color_transfer: d.color_transfer.clone(),
        color_primaries: d.color_primaries.clone(),
        bit_rate: 0,
        audio: d.audio.as_ref().map(|a| AudioProbe {
            sample_rate: a.sample_rate,
            bit_rate: 0,
            channels: a.channels,
            channel_layout: a.channel_layout.clone(),
        }),
    }
}

/// One step of a running render job.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderEvent {
    /// A chunk of human-readable progress text.
    Progress(String),
    /// The job finished and produced `artifact`.
    Done {
        /// Output file name.
        artifact: String,
    },
    /// The job ended in an error.
    Failed(String),
}

/// Receiving end of a submitted job's event stream.
///
/// Dropping the job disconnects the stream; producers stop at their next send.
pub struct RenderJob {
    name: String,
    rx: Receiver<RenderEvent>,
}

impl RenderJob {
    /// Job reading its events from `rx`.
    pub fn new(name: impl Into<String>, rx: Receiver<RenderEvent>) -> Self {
        Self {
            name: name.into(),
            rx,
        }
    }

    /// A job together with the sender its producer writes to.
    pub fn channel(name: impl Into<String>) -> (Sender<RenderEvent>, Self) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (tx, Self::new(name, rx))
    }

    /// Output name of the job.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Next event if one is ready. A stream that disconnected without a terminal
    /// event yields a [`RenderEvent::Failed`].
    pub fn try_next(&self) -> Option<RenderEvent> {
        match self.rx.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(disconnected()),
        }
    }

    /// Block until the next event.
    pub fn next_blocking(&self) -> RenderEvent {
        self.rx.recv().unwrap_or_else(|_| disconnected())
    }
}

fn disconnected() -> RenderEvent {
    RenderEvent::Failed("render stream ended unexpectedly".to_string())
}

/// Collaborator that stitches clips into one output file.
pub trait RenderJobClient {
    /// Start a job. An `Err` means the request itself was refused.
    fn submit(&self, request: &RenderRequest) -> ClipResult<RenderJob>;
}

/// [`RenderJobClient`] that replays a fixed script, for tests and demos.
#[derive(Debug, Default)]
pub struct ScriptedRenderClient {
    progress: Vec<String>,
    failure: Option<String>,
    rejection: Option<String>,
    submissions: RefCell<Vec<RenderRequest>>,
}

impl ScriptedRenderClient {
    /// Emit `progress` chunks, then succeed.
    pub fn succeeding<I, S>(progress: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            progress: progress.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Emit `progress` chunks, then fail with `message`.
    pub fn failing_after<I, S>(progress: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            failure: Some(message.into()),
            ..Self::succeeding(progress)
        }
    }

    /// Refuse every submission with `message`.
    pub fn rejecting(message: impl Into<String>) -> Self {
        Self {
            rejection: Some(message.into()),
            ..Self::default()
        }
    }

    /// Requests received so far, oldest first.
    pub fn submissions(&self) -> Vec<RenderRequest> {
        self.submissions.borrow().clone()
    }
}

impl RenderJobClient for ScriptedRenderClient {
    fn submit(&self, request: &RenderRequest) -> ClipResult<RenderJob> {
        self.submissions.borrow_mut().push(request.clone());
        if let Some(msg) = &self.rejection {
            return Err(ClipError::render(msg.clone()));
        }
        let (tx, job) = RenderJob::channel(&request.name);
        for chunk in &self.progress {
            let _ = tx.send(RenderEvent::Progress(chunk.clone()));
        }
        let last = match &self.failure {
            Some(msg) => RenderEvent::Failed(msg.clone()),
            None => RenderEvent::Done {
                artifact: request.artifact_name(),
            },
        };
        let _ = tx.send(last);
        Ok(job)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/client.rs"]
mod tests;

use std::io::{ErrorKind, Read};

use crossbeam_channel::Sender;

use crate::{
    foundation::{
        error::{ClipError, ClipResult},
        http::{HttpOpts, describe_ureq_error},
    },
    render::client::{RenderEvent, RenderJob, RenderJobClient, RenderRequest},
};

const READ_CHUNK: usize = 4096;

/// [`RenderJobClient`] backed by the library server's `POST /cook` endpoint.
///
/// The response body is read on a dedicated thread and forwarded chunk by chunk as
/// [`RenderEvent::Progress`]. A multi-byte character split across reads is held
/// back until it is complete.
///
/// Dropping the [`RenderJob`] does not interrupt a read in progress. The reader
/// thread notices at its next send, so it outlives the job until the server's
/// next chunk, the end of the stream, or [`HttpOpts::read_timeout_s`] when set.
pub struct HttpRenderClient {
    opts: HttpOpts,
    agent: ureq::Agent,
}

impl HttpRenderClient {
    /// Client for the server at `opts.root`.
    pub fn new(opts: HttpOpts) -> Self {
        let agent = opts.agent();
        Self { opts, agent }
    }
}

impl RenderJobClient for HttpRenderClient {
    #[tracing::instrument(skip(self, request), fields(name = %request.name, clips = request.clips.len()))]
    fn submit(&self, request: &RenderRequest) -> ClipResult<RenderJob> {
        let body = request.to_json()?;
        let resp = self
            .agent
            .post(&self.opts.url("cook"))
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| ClipError::render(describe_ureq_error(e)))?;

        let (tx, job) = RenderJob::channel(&request.name);
        let artifact = request.artifact_name();
        let reader = resp.into_reader();
        std::thread::Builder::new()
            .name("clipline-cook".to_string())
            .spawn(move || pump(reader, &tx, artifact))
            .map_err(|e| ClipError::render(format!("failed to start cook reader: {e}")))?;
        Ok(job)
    }
}

fn pump(mut reader: impl Read, tx: &Sender<RenderEvent>, artifact: String) {
    let mut buf = [0u8; READ_CHUNK];
    let mut pending: Vec<u8> = Vec::new();
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => {
                if !pending.is_empty() {
                    let rest = String::from_utf8_lossy(&pending).into_owned();
                    let _ = tx.send(RenderEvent::Progress(rest));
                }
                tracing::debug!(%artifact, "cook stream finished");
                let _ = tx.send(RenderEvent::Done { artifact });
                return;
            }
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => {
                tracing::warn!(error = %e, "cook stream read failed");
                let _ = tx.send(RenderEvent::Failed(format!("cook stream read failed: {e}")));
                return;
            }
        };
        pending.extend_from_slice(&buf[..n]);
        let split = pending.len() - incomplete_tail(&pending);
        if split == 0 {
            continue;
        }
        let text = String::from_utf8_lossy(&pending[..split]).into_owned();
        pending.drain(..split);
        if tx.send(RenderEvent::Progress(text)).is_err() {
            tracing::debug!("cook job dropped; stopping reader");
            return;
        }
    }
}

/// Length of a UTF-8 sequence cut off at the end of `bytes`, or `0`.
fn incomplete_tail(bytes: &[u8]) -> usize {
    for back in 1..=bytes.len().min(3) {
        let b = bytes[bytes.len() - back];
        if b & 0xC0 == 0x80 {
            continue;
        }
        let width = match b {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        return if width > back { back } else { 0 };
    }
    0
}

#[cfg(test)]
#[path = "../../tests/unit/render/http.rs"]
mod tests;

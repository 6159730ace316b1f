use crate::{
    foundation::format::format_hms,
    render::client::{RenderEvent, RenderJob, RenderJobClient, RenderRequest},
};

/// Status shown between submission and the first progress chunk.
pub const INITIAL_STATUS: &str = "Getting ready to cook...";

/// How a cook ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CookOutcome {
    /// The artifact was written.
    Succeeded {
        /// Output file name.
        artifact: String,
        /// User-facing confirmation.
        message: String,
    },
    /// The request was refused or the stream ended in an error. Not retried.
    Failed(String),
}

/// Drives one render job and keeps the state a progress display needs.
///
/// Loading is cleared on both success and failure. A failed cook stays failed;
/// retrying means starting a new `CookProgress`.
pub struct CookProgress {
    total_duration: f64,
    loading: bool,
    status: String,
    outcome: Option<CookOutcome>,
    job: Option<RenderJob>,
}

impl CookProgress {
    /// Submit `request` to `client` and start tracking it.
    #[tracing::instrument(skip(client, request), fields(name = %request.name))]
    pub fn start<C>(client: &C, request: &RenderRequest, total_duration: f64) -> Self
    where
        C: RenderJobClient + ?Sized,
    {
        let mut progress = Self {
            total_duration,
            loading: true,
            status: INITIAL_STATUS.to_string(),
            outcome: None,
            job: None,
        };
        match client.submit(request) {
            Ok(job) => progress.job = Some(job),
            Err(e) => {
                tracing::warn!(error = %e, "render request refused");
                progress.finish(CookOutcome::Failed(e.to_string()));
            }
        }
        progress
    }

    /// Apply every event already available. Returns `true` if anything changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(ev) = self.job.as_ref().and_then(RenderJob::try_next) {
            self.apply(ev);
            changed = true;
        }
        changed
    }

    /// Block until the job reaches a terminal event.
    pub fn wait(&mut self) -> Option<&CookOutcome> {
        while let Some(job) = self.job.as_ref() {
            let ev = job.next_blocking();
            self.apply(ev);
        }
        self.outcome.as_ref()
    }

    /// `true` until the job reaches a terminal event.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Latest formatted status text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Terminal outcome, once reached.
    pub fn outcome(&self) -> Option<&CookOutcome> {
        self.outcome.as_ref()
    }

    fn apply(&mut self, ev: RenderEvent) {
        match ev {
            RenderEvent::Progress(text) => {
                self.status = format_status(self.total_duration, &text);
            }
            RenderEvent::Done { artifact } => {
                let message = format!("Successfully saved to {artifact}");
                tracing::info!(%artifact, "cook finished");
                self.finish(CookOutcome::Succeeded { artifact, message });
            }
            RenderEvent::Failed(msg) => {
                tracing::warn!(error = %msg, "cook failed");
                self.finish(CookOutcome::Failed(msg));
            }
        }
    }

    fn finish(&mut self, outcome: CookOutcome) {
        self.loading = false;
        self.job = None;
        self.outcome = Some(outcome);
    }
}

/// `total=<H:MM:SS>` followed by the trimmed progress text, with a line break in
/// front of every `key=` token.
///
/// ```
/// assert_eq!(
///     clipline::format_status(83.0, " frame=10 fps=30\n"),
///     "total=0:01:23\nframe=10 \nfps=30"
/// );
/// ```
pub fn format_status(total_duration: f64, text: &str) -> String {
    let text = text.trim();
    let mut out = format!("total={}", format_hms(total_duration));
    let bytes = text.as_bytes();
    for (i, ch) in text.char_indices() {
        let at_boundary = i == 0 || !is_word(bytes[i - 1]);
        if at_boundary && starts_key(&bytes[i..]) {
            out.push('\n');
        }
        out.push(ch);
    }
    out
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// `\w+=` at the start of `rest`.
fn starts_key(rest: &[u8]) -> bool {
    let word = rest.iter().take_while(|&&b| is_word(b)).count();
    word > 0 && rest.get(word) == Some(&b'=')
}

#[cfg(test)]
#[path = "../../tests/unit/render/progress.rs"]
mod tests;

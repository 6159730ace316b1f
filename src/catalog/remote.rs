use crate::{
    catalog::listing::LibraryListing,
    foundation::{
        error::{ClipError, ClipResult},
        http::{HttpOpts, describe_ureq_error},
    },
};

/// Blocking client for the library server's listing and probe endpoints.
pub struct HttpLibraryClient {
    opts: HttpOpts,
    agent: ureq::Agent,
}

impl HttpLibraryClient {
    /// Client for the server at `opts.root`.
    pub fn new(opts: HttpOpts) -> Self {
        let agent = opts.agent();
        Self { opts, agent }
    }

    /// `GET /list`: every video known to the library.
    #[tracing::instrument(skip(self), fields(root = %self.opts.root))]
    pub fn list(&self) -> ClipResult<LibraryListing> {
        let resp = self
            .agent
            .get(&self.opts.url("list"))
            .call()
            .map_err(|e| ClipError::metadata(describe_ureq_error(e)))?;
        Self::read_listing(resp)
    }

    /// `POST /preview {tag}`: probe every unprobed video of `tag` and return the
    /// refreshed listing.
    #[tracing::instrument(skip(self), fields(root = %self.opts.root))]
    pub fn probe_tag(&self, tag: &str) -> ClipResult<LibraryListing> {
        let body = serde_json::json!({ "tag": tag }).to_string();
        let resp = self
            .agent
            .post(&self.opts.url("preview"))
            .set("Content-Type", "application/json")
            .send_string(&body)
            .map_err(|e| ClipError::metadata(describe_ureq_error(e)))?;
        Self::read_listing(resp)
    }

    /// Options this client was built with.
    pub fn opts(&self) -> &HttpOpts {
        &self.opts
    }

    fn read_listing(resp: ureq::Response) -> ClipResult<LibraryListing> {
        let text = resp
            .into_string()
            .map_err(|e| ClipError::metadata(format!("library response unreadable: {e}")))?;
        let listing = LibraryListing::from_json_str(&text)?;
        tracing::debug!(videos = listing.videos.len(), "library listing received");
        Ok(listing)
    }
}

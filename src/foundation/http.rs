/// Options for the HTTP collaborators (library listing, probing, cooking).
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(default)]
pub struct HttpOpts {
    /// Base URL of the library server, without a trailing slash.
    pub root: String,
    /// Connect timeout in seconds.
    pub connect_timeout_s: u64,
    /// Per-read timeout in seconds. `None` waits indefinitely, which suits the
    /// long pauses of a cook stream.
    pub read_timeout_s: Option<u64>,
}

impl Default for HttpOpts {
    fn default() -> Self {
        Self {
            root: "http://localhost:8000".to_string(),
            connect_timeout_s: 5,
            read_timeout_s: None,
        }
    }
}

impl HttpOpts {
    /// `root` joined with `path`.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.root.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    #[cfg(feature = "http")]
    pub(crate) fn agent(&self) -> ureq::Agent {
        let mut builder = ureq::AgentBuilder::new()
            .timeout_connect(std::time::Duration::from_secs(self.connect_timeout_s));
        if let Some(secs) = self.read_timeout_s {
            builder = builder.timeout_read(std::time::Duration::from_secs(secs));
        }
        builder.build()
    }
}

/// Human-readable message for a failed request: `HTTP <status> error: <body>` for
/// non-2xx responses, the transport error otherwise.
#[cfg(feature = "http")]
pub(crate) fn describe_ureq_error(err: ureq::Error) -> String {
    match err {
        ureq::Error::Status(code, resp) => {
            let text = resp.into_string().unwrap_or_default();
            format!("HTTP {code} error: {text}")
        }
        ureq::Error::Transport(t) => format!("request failed: {t}"),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/http.rs"]
mod tests;

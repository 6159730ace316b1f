use crate::{
    catalog::{listing::LibraryListing, source::SourceVideo, store::SourceCatalog},
    encoding::{
        descriptor::EncodingDescriptor,
        negotiator::{EncodingOptions, negotiate},
    },
    foundation::{
        core::Rotation,
        error::{ClipError, ClipResult},
    },
    project::{
        model::Clip,
        storage::ProjectStorage,
        store::{ClipProjectStore, Direction},
    },
    render::{
        client::{RenderJobClient, RenderRequest},
        progress::CookProgress,
    },
    session::opts::EditorOpts,
    timeline::{engine::TimelineEngine, handles::MediaHandle},
    trim::trimmer::Trimmer,
};

/// A source as offered in the editor's palette.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PaletteItem {
    /// Source id.
    pub source_id: String,
    /// File name for display.
    pub label: String,
    /// `None` until the source is probed.
    pub duration: Option<f64>,
    /// Native rotation.
    pub rotation: Rotation,
    /// Some clip already cuts from this source.
    pub used: bool,
}

impl PaletteItem {
    /// Only probed sources can become clips.
    pub fn can_add(&self) -> bool {
        self.duration.is_some()
    }
}

/// The clip editor for one tag: catalog, project store and timeline engine kept
/// in step.
///
/// Every accepted project mutation re-feeds the timeline, so its total duration is
/// never stale.
pub struct EditorSession<S: ProjectStorage, H: MediaHandle> {
    opts: EditorOpts,
    catalog: SourceCatalog,
    store: ClipProjectStore<S>,
    engine: TimelineEngine<H>,
}

impl<S: ProjectStorage, H: MediaHandle> EditorSession<S, H> {
    /// Open the editor for `tag`, restoring its project from `storage`.
    #[tracing::instrument(skip(catalog, storage, opts), fields(sources = catalog.len()))]
    pub fn open(tag: &str, catalog: SourceCatalog, storage: S, opts: EditorOpts) -> Self {
        let store = ClipProjectStore::open(tag, storage, &opts.store);
        let mut engine = TimelineEngine::new(opts.timeline.clone());
        engine.set_clips(store.clips());
        Self {
            opts,
            catalog,
            store,
            engine,
        }
    }

    /// Tag being edited.
    pub fn tag(&self) -> &str {
        self.store.tag()
    }

    /// Session options.
    pub fn opts(&self) -> &EditorOpts {
        &self.opts
    }

    /// Current source catalog.
    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    /// The project store.
    pub fn store(&self) -> &ClipProjectStore<S> {
        &self.store
    }

    /// The timeline engine.
    pub fn engine(&self) -> &TimelineEngine<H> {
        &self.engine
    }

    /// Playback controls and handle registration.
    pub fn engine_mut(&mut self) -> &mut TimelineEngine<H> {
        &mut self.engine
    }

    /// Clips in timeline order.
    pub fn clips(&self) -> &[Clip] {
        self.store.clips()
    }

    /// Timeline length in seconds.
    pub fn total_duration(&self) -> f64 {
        self.engine.total_duration()
    }

    /// Sources of this tag, oldest first.
    pub fn palette(&self) -> Vec<PaletteItem> {
        let clips = self.store.clips();
        self.catalog
            .for_tag(self.store.tag())
            .into_iter()
            .map(|s| PaletteItem {
                source_id: s.id.clone(),
                label: s.file_name().to_string(),
                duration: s.duration(),
                rotation: s.rotation(),
                used: SourceCatalog::is_used(&s.id, clips),
            })
            .collect()
    }

    /// `true` while a source of this tag, or one referenced by a clip, lacks probe
    /// data.
    pub fn needs_probe(&self) -> bool {
        self.catalog.needs_probe(self.store.tag())
            || !self.catalog.unprobed_in(self.store.clips()).is_empty()
    }

    /// Replace the catalog with a fresh library listing.
    pub fn refresh_catalog(&mut self, listing: LibraryListing) {
        listing.apply_to(&mut self.catalog);
        self.refeed();
    }

    /// Replace the catalog's view of every source.
    pub fn replace_sources(&mut self, sources: Vec<SourceVideo>) {
        self.catalog.replace_all(sources);
        self.refeed();
    }

    /// Append a clip covering all of `source_id`.
    pub fn add_clip(&mut self, source_id: &str) -> Option<String> {
        let id = self.store.add_clip(source_id, &self.catalog)?;
        self.refeed();
        Some(id)
    }

    /// Move a clip one step in `direction`.
    pub fn move_clip(&mut self, clip_id: &str, direction: Direction) -> bool {
        if !self.store.move_clip(clip_id, direction) {
            return false;
        }
        self.refeed();
        true
    }

    /// Remove a clip.
    pub fn delete_clip(&mut self, clip_id: &str) -> bool {
        if !self.store.delete_clip(clip_id) {
            return false;
        }
        self.refeed();
        true
    }

    /// Replace a clip after checking it against its probed source.
    pub fn update_clip(&mut self, clip: Clip) -> bool {
        if !self.store.update_clip(clip, &self.catalog) {
            return false;
        }
        self.refeed();
        true
    }

    /// Clear the project and its persisted record.
    pub fn reset(&mut self) -> ClipResult<()> {
        self.store.reset()?;
        self.refeed();
        Ok(())
    }

    /// A trimmer for `clip_id`; fails when the clip is unknown or its source
    /// unprobed.
    pub fn open_trimmer(&self, clip_id: &str) -> ClipResult<Trimmer> {
        let clip = self
            .store
            .project()
            .clip(clip_id)
            .ok_or_else(|| ClipError::validation(format!("unknown clip {clip_id}")))?;
        let source = self
            .catalog
            .get(&clip.source_id)
            .ok_or_else(|| ClipError::metadata(format!("unknown source {}", clip.source_id)))?;
        Trimmer::for_source(clip.clone(), source, self.opts.trim.clone())
    }

    /// Commit a trimmer's clip back to the project.
    pub fn apply_trim(&mut self, trimmer: Trimmer) -> bool {
        self.update_clip(trimmer.into_clip())
    }

    /// Encoding candidates for the current clips.
    pub fn encoding_options(&self) -> EncodingOptions {
        negotiate(self.store.clips(), &self.catalog)
    }

    /// `<output_prefix><tag>`, e.g. `video-sort-trip`.
    pub fn default_output_name(&self) -> String {
        format!("{}{}", self.opts.output_prefix, self.store.tag())
    }

    /// Render request for the current clips. `name` defaults to
    /// [`EditorSession::default_output_name`].
    pub fn render_request(
        &self,
        encoding: &EncodingDescriptor,
        name: Option<&str>,
    ) -> RenderRequest {
        let name = name.map_or_else(|| self.default_output_name(), str::to_string);
        RenderRequest::new(self.store.clips(), encoding, name)
    }

    /// Submit the current clips with `encoding` under the default output name.
    pub fn cook<C>(&self, client: &C, encoding: &EncodingDescriptor) -> CookProgress
    where
        C: RenderJobClient + ?Sized,
    {
        let request = self.render_request(encoding, None);
        CookProgress::start(client, &request, self.total_duration())
    }

    fn refeed(&mut self) {
        self.engine.set_clips(self.store.clips());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;

use crate::project::model::Clip;

/// One selectable value of an encoding field and the clips that share it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Candidate<T> {
    /// The shared field value.
    pub value: T,
    /// Contributing clips, in timeline order.
    pub clip_ids: Vec<String>,
    /// Distinct sources of the contributing clips, in first-appearance order.
    pub source_ids: Vec<String>,
}

impl<T> Candidate<T> {
    /// Number of contributing clips.
    pub fn clip_count(&self) -> usize {
        self.clip_ids.len()
    }

    /// Number of distinct contributing sources.
    pub fn source_count(&self) -> usize {
        self.source_ids.len()
    }
}

/// Group `(value, clip)` pairs by value.
///
/// Ranked by clip count, then distinct source count (both descending); ties keep
/// first-appearance order.
pub(crate) fn group<'a, T, I>(entries: I) -> Vec<Candidate<T>>
where
    T: PartialEq,
    I: IntoIterator<Item = (T, &'a Clip)>,
{
    let mut out: Vec<Candidate<T>> = Vec::new();
    for (value, clip) in entries {
        let slot = match out.iter().position(|c| c.value == value) {
            Some(i) => &mut out[i],
            None => {
                out.push(Candidate {
                    value,
                    clip_ids: Vec::new(),
                    source_ids: Vec::new(),
                });
                let last = out.len() - 1;
                &mut out[last]
            }
        };
        slot.clip_ids.push(clip.id.clone());
        if !slot.source_ids.contains(&clip.source_id) {
            slot.source_ids.push(clip.source_id.clone());
        }
    }
    out.sort_by(|a, b| {
        b.clip_count()
            .cmp(&a.clip_count())
            .then(b.source_count().cmp(&a.source_count()))
    });
    out
}

/// Whether `value` is among `candidates`.
pub(crate) fn offers<T: PartialEq>(candidates: &[Candidate<T>], value: &T) -> bool {
    candidates.iter().any(|c| &c.value == value)
}

#[cfg(test)]
#[path = "../../tests/unit/encoding/candidate.rs"]
mod tests;

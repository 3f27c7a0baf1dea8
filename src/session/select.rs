//! Top-label selection: epsilon tie-break and low-confidence fallback.

use smallvec::SmallVec;

use crate::common::error::{Error, Result};
use crate::labels::{self, LabelEntry, TXT, UNKNOWN};
use crate::model::Score;

/// Outcome of choosing a label from model scores.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Selection<'a> {
    pub model_label: &'a str,
    pub score: f32,
    pub entry: &'static LabelEntry,
    pub overwritten: bool,
}

/// Pick the reported label from scores sorted by descending probability.
///
/// Every score within `epsilon` of the best one is a candidate; the
/// candidate with the lowest registry priority wins. If the winner's
/// probability is below `threshold` the generic `txt` or `unknown` entry is
/// reported instead, depending on whether the winner is a text type.
pub(crate) fn select<'a>(scores: &[Score<'a>], threshold: f32, epsilon: f32) -> Result<Selection<'a>> {
    let best = scores
        .first()
        .ok_or_else(|| Error::Inference("model produced no scores".to_string()))?;

    let mut candidates: SmallVec<[(&Score<'a>, &'static LabelEntry); 4]> = SmallVec::new();
    for score in scores
        .iter()
        .take_while(|s| best.probability - s.probability <= epsilon)
    {
        candidates.push((score, labels::lookup(score.label)?));
    }

    let (winner, entry) = candidates
        .into_iter()
        .min_by_key(|(_, entry)| entry.priority)
        .ok_or_else(|| Error::Inference("no tie-break candidates".to_string()))?;

    if winner.probability >= threshold {
        return Ok(Selection {
            model_label: winner.label,
            score: winner.probability,
            entry,
            overwritten: false,
        });
    }

    let fallback = labels::lookup(if entry.is_text { TXT } else { UNKNOWN })?;
    tracing::trace!(
        label = winner.label,
        score = winner.probability,
        fallback = fallback.label,
        "low-confidence prediction replaced"
    );
    Ok(Selection {
        model_label: winner.label,
        score: winner.probability,
        entry: fallback,
        overwritten: fallback.label != winner.label,
    })
}

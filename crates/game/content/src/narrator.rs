//! Template-driven narrative collaborator.
//!
//! Templates are grouped by outcome label (`hit`, `critical`, ...) and may use
//! the placeholders `{actor}`, `{target}`, `{move}` and `{damage}`. The
//! template for a request is picked by a stable hash of the request, so the
//! same battle always reads the same way.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use battle_core::{NarrativeOracle, NarrativeRequest};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Narrative template file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeTemplates {
    pub templates: BTreeMap<String, Vec<String>>,
}

/// [`NarrativeOracle`] backed by text templates.
///
/// Answers `None` when no template fits, letting the engine fall back to its
/// built-in wording.
#[derive(Debug, Clone, Default)]
pub struct TemplateNarrator {
    templates: NarrativeTemplates,
}

impl TemplateNarrator {
    pub fn new(templates: NarrativeTemplates) -> Self {
        Self { templates }
    }

    /// Load templates from a RON file.
    pub fn load(path: &Path) -> LoadResult<Self> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid narrative file {}", path.display()))
    }

    /// Parse templates from RON text.
    pub fn parse(content: &str) -> LoadResult<Self> {
        let templates: NarrativeTemplates =
            ron::from_str(content).context("Failed to parse narrative RON")?;
        Ok(Self::new(templates))
    }

    /// Number of templates across all outcomes.
    pub fn len(&self) -> usize {
        self.templates.templates.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn candidates<'a>(&'a self, request: &NarrativeRequest<'_>) -> Vec<&'a str> {
        let Some(group) = self.templates.templates.get(request.outcome.label()) else {
            return Vec::new();
        };

        group
            .iter()
            .map(String::as_str)
            .filter(|template| request.damage.is_some() || !template.contains("{damage}"))
            .filter(|template| request.target_name.is_some() || !template.contains("{target}"))
            .collect()
    }
}

/// FNV-1a over the request fields that identify a narration.
fn request_hash(request: &NarrativeRequest<'_>) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let damage = request.damage.unwrap_or(0).to_le_bytes();
    let parts: [&[u8]; 5] = [
        request.actor_name.as_bytes(),
        request.target_name.unwrap_or_default().as_bytes(),
        request.move_name.unwrap_or(request.context).as_bytes(),
        request.outcome.label().as_bytes(),
        &damage,
    ];

    parts.iter().flat_map(|part| part.iter()).fold(OFFSET, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(PRIME)
    })
}

impl NarrativeOracle for TemplateNarrator {
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Option<String> {
        let candidates = self.candidates(request);
        if candidates.is_empty() {
            return None;
        }

        let index = (request_hash(request) % candidates.len() as u64) as usize;
        let text = candidates[index]
            .replace("{actor}", request.actor_name)
            .replace("{target}", request.target_name.unwrap_or_default())
            .replace("{move}", request.move_name.unwrap_or(request.context))
            .replace(
                "{damage}",
                &request.damage.map(|damage| damage.to_string()).unwrap_or_default(),
            );
        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{Outcome, TemplateNarrative};

    fn narrator() -> TemplateNarrator {
        TemplateNarrator::parse(
            r#"(
                templates: {
                    "hit": [
                        "{actor}'s {move} slams into {target} ({damage})",
                        "{target} reels from {actor}'s {move}",
                    ],
                },
            )"#,
        )
        .unwrap()
    }

    fn hit(damage: Option<u32>) -> NarrativeRequest<'static> {
        NarrativeRequest {
            actor_name: "Toph",
            target_name: Some("Zuko"),
            context: "move",
            outcome: Outcome::Hit,
            move_name: Some("Earth Spike"),
            damage,
        }
    }

    #[test]
    fn selection_is_stable() {
        let narrator = narrator();
        let first = narrator.narrate(&hit(Some(7))).unwrap();
        assert_eq!(narrator.narrate(&hit(Some(7))), Some(first.clone()));
        assert!(first.contains("Toph"));
        assert!(!first.contains('{'));
    }

    #[test]
    fn templates_needing_damage_are_skipped_without_it() {
        let text = narrator().narrate(&hit(None)).unwrap();
        assert_eq!(text, "Zuko reels from Toph's Earth Spike");
    }

    #[test]
    fn unknown_outcomes_fall_back() {
        let narrator = narrator();
        let request = NarrativeRequest {
            outcome: Outcome::Stunned,
            ..hit(None)
        };
        assert_eq!(narrator.narrate(&request), None);
        assert_eq!(
            TemplateNarrative::narrate_or_fallback(Some(&narrator), &request),
            "Toph is stunned and loses the turn"
        );
    }
}

//! Narrative oracle.
//!
//! The pipeline asks an optional collaborator for flavour text. Whenever the
//! collaborator is absent or answers with nothing, a deterministic template
//! is used instead, so a missing narrator never alters mechanics.

use crate::state::Outcome;

/// Request passed to a narrative collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NarrativeRequest<'a> {
    pub actor_name: &'a str,
    pub target_name: Option<&'a str>,
    /// Free-form context tag (e.g. `"finisher"`, `"charge"`).
    pub context: &'a str,
    pub outcome: Outcome,
    pub move_name: Option<&'a str>,
    pub damage: Option<u32>,
}

/// Optional narrative collaborator.
pub trait NarrativeOracle: Send + Sync {
    /// Returns flavour text, or `None` to fall back to the template.
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Option<String>;
}

/// Deterministic template narrator.
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateNarrative;

impl TemplateNarrative {
    /// Renders the fallback text for a request.
    pub fn render(request: &NarrativeRequest<'_>) -> String {
        let actor = request.actor_name;
        let action = request.move_name.unwrap_or(request.context);
        let target = request.target_name.unwrap_or("the opponent");

        match (request.outcome, request.damage) {
            (Outcome::Critical, Some(damage)) => {
                format!("{actor} lands a critical {action} on {target} for {damage}")
            }
            (Outcome::Hit, Some(damage)) => {
                format!("{actor} hits {target} with {action} for {damage}")
            }
            (Outcome::FinisherLanded, _) => format!("{actor} finishes {target} with {action}"),
            (Outcome::FinisherFailed, _) => {
                format!("{actor} unleashes {action} but {target} is still standing")
            }
            (Outcome::ChargeProgress, _) => format!("{actor} gathers power for {action}"),
            (Outcome::ChargeReleased, Some(damage)) => {
                format!("{actor} releases {action} on {target} for {damage}")
            }
            (Outcome::Interrupted, _) => format!("{target} interrupts {actor}'s {action}"),
            (Outcome::RepositionSucceeded, _) => format!("{actor} repositions with {action}"),
            (Outcome::RepositionFailed, _) => format!("{actor} stumbles attempting {action}"),
            (Outcome::Stunned, _) => format!("{actor} is stunned and loses the turn"),
            (Outcome::Skipped, _) => format!("{actor} hesitates"),
            (Outcome::StateChange, _) => format!("{actor} {action}"),
            (outcome, _) => format!("{actor} uses {action} ({})", outcome.label()),
        }
    }

    /// Asks `oracle` first and falls back to the template on `None` or empty text.
    pub fn narrate_or_fallback(
        oracle: Option<&dyn NarrativeOracle>,
        request: &NarrativeRequest<'_>,
    ) -> String {
        oracle
            .and_then(|oracle| oracle.narrate(request))
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| Self::render(request))
    }
}

impl NarrativeOracle for TemplateNarrative {
    fn narrate(&self, request: &NarrativeRequest<'_>) -> Option<String> {
        Some(Self::render(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Silent;

    impl NarrativeOracle for Silent {
        fn narrate(&self, _request: &NarrativeRequest<'_>) -> Option<String> {
            Some("   ".into())
        }
    }

    fn request() -> NarrativeRequest<'static> {
        NarrativeRequest {
            actor_name: "Zuko",
            target_name: Some("Azula"),
            context: "move",
            outcome: Outcome::Hit,
            move_name: Some("Fire Blast"),
            damage: Some(9),
        }
    }

    #[test]
    fn empty_text_falls_back_to_template() {
        let text = TemplateNarrative::narrate_or_fallback(Some(&Silent), &request());
        assert_eq!(text, "Zuko hits Azula with Fire Blast for 9");
    }

    #[test]
    fn missing_oracle_uses_template() {
        let text = TemplateNarrative::narrate_or_fallback(None, &request());
        assert_eq!(text, TemplateNarrative::render(&request()));
    }
}

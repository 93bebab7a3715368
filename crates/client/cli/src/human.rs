//! Terminal move provider.

use std::io::{BufRead, Write};

use battle_core::{
    BattleEnv, BattleState, CooldownTracker, MoveSelector, Position, Side, TurnInput,
};
use runtime::{MoveProvider, Result, RuntimeError};

/// Asks a person for each move of one side.
///
/// Prompts go to stderr so stdout only carries the battle output. An empty
/// answer (or `ai`) lets the tactical AI pick. Once input is closed the AI
/// plays the side for the rest of the battle.
pub struct PromptProvider<R> {
    input: R,
    closed: bool,
}

impl<R: BufRead + Send> PromptProvider<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            closed: false,
        }
    }

    /// `None` once input is exhausted.
    fn read_answer(&mut self, side: Side) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|error| RuntimeError::Provider {
                side,
                message: error.to_string(),
            })?;
        if read == 0 {
            tracing::info!(?side, "input closed, AI takes over");
            self.closed = true;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead + Send> MoveProvider for PromptProvider<R> {
    fn provide_move(
        &mut self,
        side: Side,
        state: &BattleState,
        env: &BattleEnv<'_>,
    ) -> Result<TurnInput> {
        let me = state.character(side);
        if self.closed || me.position == Position::Stunned || me.charge.is_charging() {
            return Ok(TurnInput::ai());
        }

        let legal = MoveSelector::legal_moves(state, side, env);
        let enemy = state.character(side.opponent());

        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "\nTurn {}: {} {}hp {}chi [{}]  vs  {} {}hp [{}]",
            state.turn,
            me.name,
            me.health,
            me.chi,
            me.position.label(),
            enemy.name,
            enemy.health,
            enemy.position.label()
        );
        for (index, definition) in legal.iter().enumerate() {
            let _ = writeln!(
                stderr,
                "  {:>2}) {:<14} dmg {:>3} chi {:>2}",
                index + 1,
                definition.id.as_str(),
                definition.base_damage,
                definition.chi_cost
            );
        }
        for definition in env.moves.moves_by_ids(&me.moves) {
            let remaining = CooldownTracker::cooldown_remaining(me, definition, state.turn);
            if remaining > 0 {
                let _ = writeln!(stderr, "      {} ready in {remaining}", definition.id);
            }
        }
        let _ = write!(stderr, "move [number, id or empty for AI]: ");
        let _ = stderr.flush();
        drop(stderr);

        let Some(answer) = self.read_answer(side)? else {
            return Ok(TurnInput::ai());
        };
        if answer.is_empty() || answer.eq_ignore_ascii_case("ai") {
            return Ok(TurnInput::ai());
        }
        if let Ok(number) = answer.parse::<usize>() {
            return match number.checked_sub(1).and_then(|index| legal.get(index)) {
                Some(definition) => Ok(TurnInput::with_move(definition.id.clone())),
                None => Err(RuntimeError::Provider {
                    side,
                    message: format!("no move numbered {number}"),
                }),
            };
        }
        Ok(TurnInput::with_move(answer.as_str()))
    }

    fn name(&self) -> &'static str {
        "human"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::{
        BaseStats, BattleConfig, CharacterTemplate, CharacterId, MoveDefinition, MoveId,
        MovesSnapshot, PcgRng, Terrain,
    };

    fn setup() -> (MovesSnapshot, BattleConfig, BattleState) {
        let catalog = MovesSnapshot::new(vec![
            MoveDefinition::fallback_strike(MoveId::new("basic_strike")),
            MoveDefinition::new("fire_blast", "Fire Blast", 8).with_chi_cost(2),
        ])
        .unwrap();
        let config = BattleConfig::default();
        let moves = vec![MoveId::new("basic_strike"), MoveId::new("fire_blast")];
        let zuko = CharacterTemplate::new(
            CharacterId(1),
            "zuko",
            "Zuko",
            BaseStats::new(14, 10, 10),
            moves.clone(),
        );
        let aang = CharacterTemplate::new(
            CharacterId(2),
            "aang",
            "Aang",
            BaseStats::new(10, 8, 25),
            moves,
        );
        let state = BattleState::new(
            zuko.instantiate(&catalog, &config),
            aang.instantiate(&catalog, &config),
            Terrain::Open,
            7,
        );
        (catalog, config, state)
    }

    fn answer(text: &str) -> Result<TurnInput> {
        let (catalog, config, state) = setup();
        let rng = PcgRng;
        let env = BattleEnv::new(&catalog, &rng, &config);
        PromptProvider::new(text.as_bytes()).provide_move(Side::First, &state, &env)
    }

    #[test]
    fn empty_answer_defers_to_ai() {
        assert_eq!(answer("\n").unwrap(), TurnInput::ai());
    }

    #[test]
    fn move_ids_pass_through() {
        assert_eq!(
            answer("fire_blast\n").unwrap(),
            TurnInput::with_move("fire_blast")
        );
    }

    #[test]
    fn closed_input_hands_over_to_ai() {
        assert_eq!(answer("").unwrap(), TurnInput::ai());
    }

    #[test]
    fn out_of_range_number_is_rejected() {
        assert!(matches!(
            answer("99\n"),
            Err(RuntimeError::Provider { .. })
        ));
    }
}

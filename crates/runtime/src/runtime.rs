//! High-level battle orchestrator.
//!
//! The runtime owns the content, the current snapshot and one move provider
//! per side, and exposes a builder-based API for clients to drive the battle.

use battle_core::{
    BattleConfig, BattleEnv, BattleState, CharacterTemplate, MovesSnapshot, NarrativeOracle,
    PcgRng, Side, Terrain, process_turn,
};

use crate::api::{MoveProvider, Result, RuntimeError, TurnEvent, TurnObserver};
use crate::report::BattleReport;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub battle: BattleConfig,
    /// Extra steps tolerated past the turn ceiling before the runtime gives up.
    pub guard_margin: u32,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            battle: BattleConfig::default(),
            guard_margin: 1,
        }
    }
}

/// Main runtime that drives a battle turn by turn.
pub struct BattleRuntime {
    config: RuntimeConfig,
    catalog: MovesSnapshot,
    rng: PcgRng,
    narrator: Option<Box<dyn NarrativeOracle>>,
    state: BattleState,
    providers: [Box<dyn MoveProvider>; 2],
    observers: Vec<Box<dyn TurnObserver>>,
    steps: u32,
}

impl BattleRuntime {
    /// Create a new runtime builder
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    /// Current snapshot.
    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Processes one turn.
    ///
    /// The active side's provider supplies the input. On error the snapshot
    /// is unchanged, so a human provider may simply be asked again.
    pub fn step(&mut self) -> Result<TurnEvent> {
        let guard = self.config.battle.max_turns + self.config.guard_margin;
        if self.steps >= guard {
            return Err(RuntimeError::TurnGuard { steps: self.steps });
        }

        let side = self.state.active;
        let env = battle_env(
            &self.catalog,
            &self.rng,
            &self.config.battle,
            self.narrator.as_deref(),
        );
        let provider = &mut self.providers[side.index()];
        let input = provider.provide_move(side, &self.state, &env)?;

        tracing::debug!(
            turn = self.state.turn,
            ?side,
            provider = provider.name(),
            chosen = ?input.chosen_move,
            "processing turn"
        );

        let next = process_turn(&self.state, &env, &input)?;
        let event = TurnEvent::between(&self.state, &next, input);
        self.state = next;
        self.steps += 1;

        for observer in &mut self.observers {
            observer.on_turn(&event);
        }
        if event.finished {
            tracing::info!(
                turns = event.turn,
                status = ?self.state.status,
                "battle finished"
            );
        }

        Ok(event)
    }

    /// Runs until the battle concludes.
    pub fn run(&mut self) -> Result<BattleReport> {
        while !self.state.is_finished() {
            self.step()?;
        }
        Ok(self.report())
    }

    pub fn report(&self) -> BattleReport {
        BattleReport::from_state(&self.state)
    }

    /// Read-only environment borrowed from the runtime's content.
    pub fn env(&self) -> BattleEnv<'_> {
        battle_env(
            &self.catalog,
            &self.rng,
            &self.config.battle,
            self.narrator.as_deref(),
        )
    }

    /// Replaces the provider for `side`.
    pub fn set_provider(&mut self, side: Side, provider: impl MoveProvider + 'static) {
        self.providers[side.index()] = Box::new(provider);
    }

    /// Consumes the runtime and returns the final snapshot.
    pub fn into_state(self) -> BattleState {
        self.state
    }
}

fn battle_env<'a>(
    catalog: &'a MovesSnapshot,
    rng: &'a PcgRng,
    config: &'a BattleConfig,
    narrator: Option<&'a dyn NarrativeOracle>,
) -> BattleEnv<'a> {
    let env = BattleEnv::new(catalog, rng, config);
    match narrator {
        Some(narrator) => env.with_narrative(narrator),
        None => env,
    }
}

/// Builder for [`BattleRuntime`] with flexible configuration.
pub struct BattleRuntimeBuilder {
    config: RuntimeConfig,
    catalog: MovesSnapshot,
    narrator: Option<Box<dyn NarrativeOracle>>,
    state: Option<BattleState>,
    combatants: Option<(CharacterTemplate, CharacterTemplate)>,
    terrain: Terrain,
    seed: u64,
    providers: [Option<Box<dyn MoveProvider>>; 2],
    observers: Vec<Box<dyn TurnObserver>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            catalog: MovesSnapshot::empty(),
            narrator: None,
            state: None,
            combatants: None,
            terrain: Terrain::Open,
            seed: 0,
            providers: [None, None],
            observers: Vec::new(),
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Override only the battle tuning.
    pub fn battle_config(mut self, battle: BattleConfig) -> Self {
        self.config.battle = battle;
        self
    }

    /// Set the move catalog
    pub fn moves(mut self, catalog: MovesSnapshot) -> Self {
        self.catalog = catalog;
        self
    }

    /// Set the narrative collaborator (optional)
    pub fn narrator(mut self, narrator: impl NarrativeOracle + 'static) -> Self {
        self.narrator = Some(Box::new(narrator));
        self
    }

    /// Provide an initial snapshot directly
    pub fn initial_state(mut self, state: BattleState) -> Self {
        self.state = Some(state);
        self
    }

    /// Instantiate both combatants from roster templates at build time
    pub fn combatants(mut self, first: CharacterTemplate, second: CharacterTemplate) -> Self {
        self.combatants = Some((first, second));
        self
    }

    pub fn terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the move provider for `side`
    pub fn provider(mut self, side: Side, provider: impl MoveProvider + 'static) -> Self {
        self.providers[side.index()] = Some(Box::new(provider));
        self
    }

    /// Set an already boxed provider for `side`
    pub fn provider_boxed(mut self, side: Side, provider: Box<dyn MoveProvider>) -> Self {
        self.providers[side.index()] = Some(provider);
        self
    }

    /// Add a turn observer
    pub fn observer(mut self, observer: impl TurnObserver + 'static) -> Self {
        self.observers.push(Box::new(observer));
        self
    }

    /// Build the runtime
    pub fn build(self) -> Result<BattleRuntime> {
        let state = match (self.state, self.combatants) {
            (Some(state), _) => state,
            (None, Some((first, second))) => {
                for id in first.moves.iter().chain(&second.moves) {
                    battle_core::MoveOracle::require(&self.catalog, id)?;
                }
                BattleState::new(
                    first.instantiate(&self.catalog, &self.config.battle),
                    second.instantiate(&self.catalog, &self.config.battle),
                    self.terrain,
                    self.seed,
                )
            }
            (None, None) => return Err(RuntimeError::MissingState),
        };

        let [first, second] = self.providers;
        let first = first.ok_or(RuntimeError::ProviderNotSet { side: Side::First })?;
        let second = second.ok_or(RuntimeError::ProviderNotSet { side: Side::Second })?;

        tracing::info!(
            seed = state.seed,
            first = %state.character(Side::First).name,
            second = %state.character(Side::Second).name,
            first_provider = first.name(),
            second_provider = second.name(),
            "battle runtime ready"
        );

        Ok(BattleRuntime {
            config: self.config,
            catalog: self.catalog,
            rng: PcgRng,
            narrator: self.narrator,
            state,
            providers: [first, second],
            observers: self.observers,
            steps: 0,
        })
    }
}

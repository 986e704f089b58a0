//! Server state management
//!
//! Shared catalog, the battle session and the random source behind it.

use std::path::PathBuf;
use std::sync::{Mutex, RwLock, RwLockReadGuard};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use swbattle_core::{BattleSession, CardView, Catalog, Category, ScoreState};

use crate::error::ApiError;
use crate::ServerConfig;

/// One card on the table with its value ready for display
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardEntry {
    #[serde(flatten)]
    pub card: CardView,
    pub value_text: String,
}

/// Battle table as the client renders it
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleView {
    pub category: Category,
    pub cards: Vec<CardEntry>,
    pub winner: Option<&'static str>,
    pub left_value: Option<u64>,
    pub right_value: Option<u64>,
    pub scores: ScoreState,
}

impl BattleView {
    fn of(session: &BattleSession) -> Self {
        let outcome = session.current().map(|battle| battle.outcome);
        Self {
            category: session.category(),
            cards: session
                .cards()
                .into_iter()
                .map(|card| CardEntry {
                    value_text: card.value_text(),
                    card,
                })
                .collect(),
            winner: session.winner_text(),
            left_value: outcome.map(|o| o.left_value),
            right_value: outcome.map(|o| o.right_value),
            scores: session.scores(),
        }
    }
}

/// Server-wide shared state
pub struct ServerState {
    pub catalog: RwLock<Catalog>,
    pub session: RwLock<BattleSession>,
    rng: Mutex<ChaCha8Rng>,
    data_path: Option<PathBuf>,
}

impl ServerState {
    /// Empty catalog, no snapshot file, entropy-seeded battles
    pub fn new() -> Self {
        Self {
            catalog: RwLock::new(Catalog::default()),
            session: RwLock::new(BattleSession::default()),
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
            data_path: None,
        }
    }

    /// State over an existing catalog. The first battle is played right away.
    pub fn with_catalog(catalog: Catalog, seed: Option<u64>) -> Self {
        let mut rng = create_rng(seed);
        let mut session = BattleSession::default();
        session.play(&catalog.pool(session.category()), &mut rng);

        Self {
            catalog: RwLock::new(catalog),
            session: RwLock::new(session),
            rng: Mutex::new(rng),
            data_path: None,
        }
    }

    /// Build state from config, loading the snapshot file if it exists
    pub fn from_config(config: &ServerConfig) -> Result<Self, ApiError> {
        let catalog = match &config.data_path {
            Some(path) if path.exists() => {
                let catalog = Catalog::load(path)?;
                for (resource, count) in catalog.counts() {
                    tracing::info!("Loaded {} {} from {}", count, resource, path.display());
                }
                catalog
            }
            Some(path) => {
                tracing::warn!(
                    "Catalog file {} does not exist, starting empty",
                    path.display()
                );
                Catalog::default()
            }
            None => Catalog::default(),
        };

        let mut state = Self::with_catalog(catalog, config.seed);
        state.data_path = config.data_path.clone();
        Ok(state)
    }

    pub fn read_catalog(&self) -> Result<RwLockReadGuard<'_, Catalog>, ApiError> {
        self.catalog.read().map_err(|_| ApiError::LockPoisoned)
    }

    /// Apply a change to the catalog and write the snapshot if configured.
    ///
    /// The change runs against a copy that replaces the live catalog only
    /// once the snapshot is written.
    pub fn mutate<T>(
        &self,
        change: impl FnOnce(&mut Catalog) -> swbattle_core::Result<T>,
    ) -> Result<T, ApiError> {
        let mut catalog = self.catalog.write().map_err(|_| ApiError::LockPoisoned)?;
        let mut next = catalog.clone();
        let value = change(&mut next)?;
        if let Some(path) = &self.data_path {
            next.save(path)?;
            tracing::debug!("Catalog saved to {}", path.display());
        }
        *catalog = next;
        Ok(value)
    }

    /// Like [`mutate`](Self::mutate) for people and starships, then replays
    /// the battle so the table never shows removed or outdated cards.
    pub fn mutate_roster<T>(
        &self,
        change: impl FnOnce(&mut Catalog) -> swbattle_core::Result<T>,
    ) -> Result<T, ApiError> {
        let value = self.mutate(change)?;
        self.play()?;
        Ok(value)
    }

    /// Current battle table
    pub fn battle_view(&self) -> Result<BattleView, ApiError> {
        let session = self.session.read().map_err(|_| ApiError::LockPoisoned)?;
        Ok(BattleView::of(&session))
    }

    /// Play another round in the active category
    pub fn play(&self) -> Result<BattleView, ApiError> {
        let mut session = self.session.write().map_err(|_| ApiError::LockPoisoned)?;
        let pool = self.read_catalog()?.pool(session.category());
        let mut rng = self.rng.lock().map_err(|_| ApiError::LockPoisoned)?;

        if session.play(&pool, &mut *rng).is_none() {
            tracing::debug!("No battle possible for {}", session.category());
        }
        Ok(BattleView::of(&session))
    }

    /// Switch category; a no-op when it is already active
    pub fn switch_category(&self, category: Category) -> Result<BattleView, ApiError> {
        let mut session = self.session.write().map_err(|_| ApiError::LockPoisoned)?;
        let pool = self.read_catalog()?.pool(category);
        let mut rng = self.rng.lock().map_err(|_| ApiError::LockPoisoned)?;

        if session.switch_category(category, &pool, &mut *rng) {
            tracing::info!("Battle category switched to {}", category);
        }
        Ok(BattleView::of(&session))
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new()
    }
}

/// Seeded RNG when a seed is given, otherwise from entropy
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

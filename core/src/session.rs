use alloc::format;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::*;

/// Display-side collaborator, notified as caches enter and leave the visible
/// set. `render` receives the cell rectangle so the display can draw it.
pub trait CacheView {
    fn render(&mut self, cell: Cell, cache: &Cache, bounds: Bounds);
    fn teardown(&mut self, cell: Cell, cache: &Cache);
}

/// View that ignores every notification.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullView;

impl CacheView for NullView {
    fn render(&mut self, _cell: Cell, _cache: &Cache, _bounds: Bounds) {}
    fn teardown(&mut self, _cell: Cell, _cache: &Cache) {}
}

/// Player state: continuous position plus the coin wallet. The wallet is
/// mutated only through [`Session::pick_up`] and [`Session::drop_off`].
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    position: Point,
    collection: Vec<Coin>,
}

impl Player {
    fn new(position: Point) -> Self {
        Self {
            position,
            collection: Vec::new(),
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// Coins in pick-up order; the last entry is the drop-off candidate.
    pub fn collection(&self) -> &[Coin] {
        &self.collection
    }
}

/// Decision made for one visible cell during a reconcile pass.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CellOutcome {
    Spawned,
    Reloaded,
    Vacant,
}

impl CellOutcome {
    pub const fn has_cache(self) -> bool {
        matches!(self, Self::Spawned | Self::Reloaded)
    }
}

/// Tally of one reconcile pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub evicted: u32,
    pub spawned: u32,
    pub reloaded: u32,
    pub vacant: u32,
    pub malformed_skipped: u32,
    pub duplicates_dropped: u32,
}

impl ReconcileSummary {
    /// Caches live after the pass.
    pub const fn loaded(self) -> u32 {
        self.spawned + self.reloaded
    }
}

/// Owns the board, the player, the loaded cache set and the dormant snapshot
/// list, and runs the teardown/rebuild reconciliation on every position
/// update. All mutation is driven by one logical actor; operations run to
/// completion before the next one starts.
#[derive(Clone, Debug)]
pub struct Session {
    config: SessionConfig,
    board: Board,
    player: Player,
    loaded: HashMap<CellId, Cache>,
    unloaded: Vec<Memento>,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            board: Board::new(
                config.tile_width,
                config.visibility_radius,
                config.grid_offset,
            ),
            player: Player::new(config.origin),
            loaded: HashMap::new(),
            unloaded: Vec::new(),
            config,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn cache_at(&self, cell: CellId) -> Option<&Cache> {
        self.loaded.get(&cell)
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    pub fn loaded_caches(&self) -> impl Iterator<Item = &Cache> {
        self.loaded.values()
    }

    pub fn unloaded_count(&self) -> usize {
        self.unloaded.len()
    }

    /// Moves the player one tile width in `direction`, then reconciles.
    pub fn step<L: Luck, V: CacheView>(
        &mut self,
        direction: Direction,
        luck: &L,
        view: &mut V,
    ) -> ReconcileSummary {
        let (dx, dy) = direction.offset(self.config.tile_width);
        self.player.position.x += dx;
        self.player.position.y += dy;
        self.reconcile(luck, view)
    }

    /// The per-update algorithm: evict everything loaded, then restore or
    /// spawn a cache for every eligible visible cell. The pass never aborts;
    /// malformed snapshots are skipped and tallied.
    pub fn reconcile<L: Luck, V: CacheView>(
        &mut self,
        luck: &L,
        view: &mut V,
    ) -> ReconcileSummary {
        let mut summary = ReconcileSummary::default();

        // full teardown: the previous visible set is evicted wholesale,
        // there is no keep-if-still-visible shortcut
        for (id, cache) in self.loaded.drain() {
            view.teardown(self.board.cell(id), &cache);
            self.unloaded.push(cache.to_memento(&self.board));
            summary.evicted += 1;
        }

        for id in self.board.cells_near(self.player.position) {
            match self.settle_cell(id, luck, view, &mut summary) {
                CellOutcome::Spawned => summary.spawned += 1,
                CellOutcome::Reloaded => summary.reloaded += 1,
                CellOutcome::Vacant => summary.vacant += 1,
            }
        }

        log::debug!(
            "Reconciled: {} loaded ({} fresh), {} vacant, {} dormant snapshots",
            summary.loaded(),
            summary.spawned,
            summary.vacant,
            self.unloaded.len()
        );
        summary
    }

    /// Transfers the most recently added coin from the loaded cache at
    /// `cell` into the player's wallet. `None` (and no mutation) if no cache
    /// is loaded there or its inventory is empty; a handle left over from
    /// before an eviction simply misses the lookup.
    pub fn pick_up(&mut self, cell: CellId) -> Option<&Coin> {
        let cache = self.loaded.get_mut(&cell)?;
        let coin = cache.pop_coin()?;
        self.player.collection.push(coin);
        self.player.collection.last()
    }

    /// Symmetric to [`Session::pick_up`]: moves the wallet's last coin into
    /// the loaded cache at `cell`.
    pub fn drop_off(&mut self, cell: CellId) -> Option<&Coin> {
        let cache = self.loaded.get_mut(&cell)?;
        let coin = self.player.collection.pop()?;
        cache.push_coin(coin);
        cache.inventory().last()
    }

    fn settle_cell<L: Luck, V: CacheView>(
        &mut self,
        id: CellId,
        luck: &L,
        view: &mut V,
        summary: &mut ReconcileSummary,
    ) -> CellOutcome {
        let cell = self.board.cell(id);
        if !self.spawn_eligible(cell, luck) {
            return CellOutcome::Vacant;
        }

        let (cache, outcome) = match self.take_dormant(id, summary) {
            Some(cache) => (cache, CellOutcome::Reloaded),
            None => (spawn_cache(id, cell, luck), CellOutcome::Spawned),
        };

        view.render(cell, &cache, self.board.cell_bounds(id));
        self.loaded.insert(id, cache);
        outcome
    }

    /// Bernoulli trial keyed on the cell's absolute coordinates, so
    /// revisiting a location always repeats the same decision.
    fn spawn_eligible<L: Luck>(&self, cell: Cell, luck: &L) -> bool {
        let w = self.config.tile_width;
        let seed = format!("{},{}", cell.x as f64 * w, cell.y as f64 * w);
        luck.luck(&seed) < self.config.spawn_probability
    }

    /// Consumes the first dormant snapshot whose decoded location equals
    /// `id`. Further matches violate the one-snapshot-per-cell invariant:
    /// they are reported and dropped, keeping the first deterministically.
    /// Malformed snapshots are left in place and tallied.
    fn take_dormant(&mut self, id: CellId, summary: &mut ReconcileSummary) -> Option<Cache> {
        let mut found: Option<Cache> = None;
        let mut index = 0;
        while index < self.unloaded.len() {
            match Cache::from_memento(&self.unloaded[index], &mut self.board) {
                Err(_) => {
                    summary.malformed_skipped += 1;
                    index += 1;
                }
                Ok(cache) if cache.location() == id => {
                    self.unloaded.remove(index);
                    if found.is_none() {
                        found = Some(cache);
                    } else {
                        log::error!("{}", GameError::DuplicateUnloadedCache);
                        summary.duplicates_dropped += 1;
                    }
                }
                Ok(_) => index += 1,
            }
        }
        found
    }
}

fn spawn_cache<L: Luck>(id: CellId, cell: Cell, luck: &L) -> Cache {
    let mut cache = Cache::new(id);
    let count = round_half_away(luck.luck(&format!("{},{}", cell.x, cell.y)) * 100.0);
    for _ in 0..count {
        cache.mint_coin(cell);
    }
    cache
}

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Serialized snapshot of a cache: the two-element JSON structure
/// `[{"x":..,"y":..}, [{"origin":{..},"serial":".."}, ..]]`.
pub type Memento = String;

/// A minted unit of value. `origin` records the cell where the coin was
/// minted and is never reassigned; `serial` is unique within that origin.
/// Coins move between collections, they are never copied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub origin: Cell,
    pub serial: String,
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.serial)
    }
}

/// Mutable coin container bound to exactly one canonical cell. Once spawned
/// a cache is never destroyed; it cycles between the loaded set and its
/// dormant snapshot form for the rest of the session.
#[derive(Clone, Debug, PartialEq)]
pub struct Cache {
    location: CellId,
    inventory: Vec<Coin>,
}

impl Cache {
    pub(crate) fn new(location: CellId) -> Self {
        Self {
            location,
            inventory: Vec::new(),
        }
    }

    pub fn location(&self) -> CellId {
        self.location
    }

    /// Coins in arrival order; the last entry is the pick-up candidate.
    pub fn inventory(&self) -> &[Coin] {
        &self.inventory
    }

    pub fn coin_count(&self) -> usize {
        self.inventory.len()
    }

    /// Mints one coin whose serial encodes the origin coordinates plus the
    /// ordinal position at mint time, `"x:y#n"`.
    pub(crate) fn mint_coin(&mut self, origin: Cell) {
        let serial = format!("{}:{}#{}", origin.x, origin.y, self.inventory.len());
        self.inventory.push(Coin { origin, serial });
    }

    pub(crate) fn push_coin(&mut self, coin: Coin) {
        self.inventory.push(coin);
    }

    pub(crate) fn pop_coin(&mut self) -> Option<Coin> {
        self.inventory.pop()
    }

    /// Encodes location (by coordinate pair) and the full ordered inventory.
    pub fn to_memento(&self, board: &Board) -> Memento {
        serde_json::to_string(&(board.cell(self.location), &self.inventory))
            .expect("plain snapshot structure encodes as JSON")
    }

    /// Decodes a snapshot, re-resolving the location through the board so the
    /// reconstructed cache is identity-comparable with any canonical cell.
    pub fn from_memento(blob: &str, board: &mut Board) -> Result<Self> {
        let (cell, inventory): (Cell, Vec<Coin>) = serde_json::from_str(blob).map_err(|err| {
            log::warn!("Discarding malformed cache snapshot: {err}");
            GameError::MalformedBlob
        })?;
        let location = board.canonicalize(cell.x, cell.y);
        Ok(Self {
            location,
            inventory,
        })
    }
}

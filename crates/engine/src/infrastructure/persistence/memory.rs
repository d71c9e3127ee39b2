//! In-memory persistence adapters.
//!
//! One keyed table per aggregate type, backed by `DashMap`. Save is
//! last-write-wins; get on an unknown id returns `Ok(None)`. These double as
//! test fakes - they are the real storage for a single-process game session.

use std::hash::Hash;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::infrastructure::ports::{
    CharacterRepo, ContractRepo, NodeRepo, PlayerRepo, RepoError, RunRepo, SystemRepo,
};
use decker_domain::{
    Character, CharacterId, Contract, ContractId, IntrusionRun, Node, NodeId, Player, PlayerId,
    RunId, System, SystemId,
};

/// Keyed collection shared by all in-memory repositories.
struct MemoryTable<K: Eq + Hash, V: Clone> {
    items: DashMap<K, V>,
}

impl<K: Eq + Hash, V: Clone> MemoryTable<K, V> {
    fn new() -> Self {
        Self {
            items: DashMap::new(),
        }
    }

    fn get(&self, id: &K) -> Option<V> {
        self.items.get(id).map(|entry| entry.value().clone())
    }

    fn put(&self, id: K, value: V) {
        self.items.insert(id, value);
    }

    fn remove(&self, id: &K) {
        self.items.remove(id);
    }

    fn values(&self) -> Vec<V> {
        self.items.iter().map(|entry| entry.value().clone()).collect()
    }
}

/// In-memory player storage.
pub struct InMemoryPlayerRepo {
    table: MemoryTable<PlayerId, Player>,
}

impl InMemoryPlayerRepo {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryPlayerRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PlayerRepo for InMemoryPlayerRepo {
    async fn get(&self, id: PlayerId) -> Result<Option<Player>, RepoError> {
        Ok(self.table.get(&id))
    }

    async fn save(&self, player: &Player) -> Result<(), RepoError> {
        self.table.put(player.id(), player.clone());
        Ok(())
    }

    async fn delete(&self, id: PlayerId) -> Result<(), RepoError> {
        self.table.remove(&id);
        Ok(())
    }
}

/// In-memory character storage.
pub struct InMemoryCharacterRepo {
    table: MemoryTable<CharacterId, Character>,
}

impl InMemoryCharacterRepo {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryCharacterRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.table.get(&id))
    }

    async fn save(&self, character: &Character) -> Result<(), RepoError> {
        self.table.put(character.id(), character.clone());
        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        self.table.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Character>, RepoError> {
        Ok(self.table.values())
    }
}

/// In-memory contract storage.
pub struct InMemoryContractRepo {
    table: MemoryTable<ContractId, Contract>,
}

impl InMemoryContractRepo {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryContractRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContractRepo for InMemoryContractRepo {
    async fn get(&self, id: ContractId) -> Result<Option<Contract>, RepoError> {
        Ok(self.table.get(&id))
    }

    async fn save(&self, contract: &Contract) -> Result<(), RepoError> {
        self.table.put(contract.id(), contract.clone());
        Ok(())
    }

    async fn delete(&self, id: ContractId) -> Result<(), RepoError> {
        self.table.remove(&id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Contract>, RepoError> {
        Ok(self.table.values())
    }
}

/// In-memory system storage.
pub struct InMemorySystemRepo {
    table: MemoryTable<SystemId, System>,
}

impl InMemorySystemRepo {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemorySystemRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SystemRepo for InMemorySystemRepo {
    async fn get(&self, id: SystemId) -> Result<Option<System>, RepoError> {
        Ok(self.table.get(&id))
    }

    async fn save(&self, system: &System) -> Result<(), RepoError> {
        self.table.put(system.id(), system.clone());
        Ok(())
    }

    async fn delete(&self, id: SystemId) -> Result<(), RepoError> {
        self.table.remove(&id);
        Ok(())
    }
}

/// In-memory node storage.
pub struct InMemoryNodeRepo {
    table: MemoryTable<NodeId, Node>,
}

impl InMemoryNodeRepo {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryNodeRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodeRepo for InMemoryNodeRepo {
    async fn get(&self, id: NodeId) -> Result<Option<Node>, RepoError> {
        Ok(self.table.get(&id))
    }

    async fn save(&self, node: &Node) -> Result<(), RepoError> {
        self.table.put(node.id(), node.clone());
        Ok(())
    }

    async fn delete(&self, id: NodeId) -> Result<(), RepoError> {
        self.table.remove(&id);
        Ok(())
    }
}

/// In-memory intrusion run storage.
pub struct InMemoryRunRepo {
    table: MemoryTable<RunId, IntrusionRun>,
}

impl InMemoryRunRepo {
    pub fn new() -> Self {
        Self {
            table: MemoryTable::new(),
        }
    }
}

impl Default for InMemoryRunRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RunRepo for InMemoryRunRepo {
    async fn get(&self, id: RunId) -> Result<Option<IntrusionRun>, RepoError> {
        Ok(self.table.get(&id))
    }

    async fn save(&self, run: &IntrusionRun) -> Result<(), RepoError> {
        self.table.put(run.id(), run.clone());
        Ok(())
    }

    async fn delete(&self, id: RunId) -> Result<(), RepoError> {
        self.table.remove(&id);
        Ok(())
    }
}

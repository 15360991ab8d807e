use crate::event::Event;
use serde::{Deserialize, Serialize};

/// 迁移阶段
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MigrationStage {
    Start,
    Complete,
}

/// 迁移事件：一次迁移开始或完成时发布
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationEvent {
    migration_name: String,
    stage: MigrationStage,
}

impl MigrationEvent {
    pub fn new(migration_name: impl Into<String>, stage: MigrationStage) -> Self {
        Self {
            migration_name: migration_name.into(),
            stage,
        }
    }

    pub fn start(migration_name: impl Into<String>) -> Self {
        Self::new(migration_name, MigrationStage::Start)
    }

    pub fn complete(migration_name: impl Into<String>) -> Self {
        Self::new(migration_name, MigrationStage::Complete)
    }

    pub fn migration_name(&self) -> &str {
        &self.migration_name
    }

    pub fn stage(&self) -> MigrationStage {
        self.stage
    }
}

impl Event for MigrationEvent {
    fn event_name() -> &'static str {
        "migration"
    }
}

//! Groups: named subsets of teams. Insertion order is the seeding order.

use crate::models::game::Stage;
use crate::models::team::TeamId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a stored group.
pub type GroupId = Uuid;

/// A generated group, before it is stored.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupDraft {
    pub name: String,
    pub team_ids: Vec<TeamId>,
}

impl GroupDraft {
    pub fn new(name: impl Into<String>, team_ids: Vec<TeamId>) -> Self {
        Self {
            name: name.into(),
            team_ids,
        }
    }
}

/// A stored group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub team_ids: Vec<TeamId>,
    /// `Group` for the stage-1 partition, `Reclass` for the second one.
    pub stage: Stage,
}

impl Group {
    pub fn from_draft(draft: GroupDraft, stage: Stage) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            team_ids: draft.team_ids,
            stage,
        }
    }

    pub fn contains(&self, team_id: TeamId) -> bool {
        self.team_ids.contains(&team_id)
    }
}

/// Display name for the n-th group of a partition: "Group A", "Group B", ...
pub fn group_name(index: usize) -> String {
    let letters = b'Z' - b'A' + 1;
    let letter = (b'A' + (index % letters as usize) as u8) as char;
    let lap = index / letters as usize;
    if lap == 0 {
        format!("Group {letter}")
    } else {
        format!("Group {letter}{}", lap + 1)
    }
}

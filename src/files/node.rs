use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type NodeId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileState {
    Open,
    Closed,
    Deleted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory { children: Vec<NodeId> },
    File { state: FileState },
    /// A link resolves its base name and renames through its target.
    Link { target: Option<NodeId> },
}

impl NodeKind {
    pub fn is_directory(&self) -> bool {
        matches!(self, NodeKind::Directory { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, NodeKind::File { .. })
    }

    pub fn is_link(&self) -> bool {
        matches!(self, NodeKind::Link { .. })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub base_name: String,
    pub parent: NodeId,
    pub kind: NodeKind,
}

impl Node {
    pub fn directory(base_name: impl Into<String>, parent: NodeId) -> Self {
        Self {
            base_name: base_name.into(),
            parent,
            kind: NodeKind::Directory {
                children: Vec::new(),
            },
        }
    }

    pub fn file(base_name: impl Into<String>, parent: NodeId) -> Self {
        Self {
            base_name: base_name.into(),
            parent,
            kind: NodeKind::File {
                state: FileState::Closed,
            },
        }
    }

    pub fn link(base_name: impl Into<String>, parent: NodeId, target: Option<NodeId>) -> Self {
        Self {
            base_name: base_name.into(),
            parent,
            kind: NodeKind::Link { target },
        }
    }
}

use std::collections::HashMap;

use log::debug;
use uuid::Uuid;

use crate::contract::{invariant, postcondition, precondition, ContractResult};
use crate::error::ContractError;
use crate::escape::remask;
use crate::name::Name;
use crate::store::check_delimiter;

use super::node::{FileState, Node, NodeId, NodeKind};

pub const PATH_DELIMITER: char = '/';

/// In-memory tree of directories, files and links.
///
/// Full names are derived on demand: the parent's full name with the node's
/// masked base name appended. The root is its own parent, has an empty base
/// name and a full name of one empty component, so its children render as
/// `/name`.
#[derive(Debug, Clone)]
pub struct FileSystem {
    nodes: HashMap<NodeId, Node>,
    root: NodeId,
    delimiter: char,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    pub fn new() -> Self {
        let root = Uuid::new_v4();
        let mut nodes = HashMap::new();
        nodes.insert(root, Node::directory("", root));

        Self {
            nodes,
            root,
            delimiter: PATH_DELIMITER,
        }
    }

    pub fn with_delimiter(delimiter: char) -> ContractResult<Self> {
        check_delimiter(delimiter)?;
        Ok(Self {
            delimiter,
            ..Self::new()
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn node(&self, id: NodeId) -> ContractResult<&Node> {
        self.nodes.get(&id).ok_or_else(|| unknown_node(id))
    }

    fn node_mut(&mut self, id: NodeId) -> ContractResult<&mut Node> {
        self.nodes.get_mut(&id).ok_or_else(|| unknown_node(id))
    }

    pub fn kind(&self, id: NodeId) -> ContractResult<&NodeKind> {
        Ok(&self.node(id)?.kind)
    }

    pub fn parent(&self, id: NodeId) -> ContractResult<NodeId> {
        Ok(self.node(id)?.parent)
    }

    pub fn child_nodes(&self, dir: NodeId) -> ContractResult<Vec<NodeId>> {
        match &self.node(dir)?.kind {
            NodeKind::Directory { children } => Ok(children.clone()),
            _ => Err(not_a(dir, "directory")),
        }
    }

    pub fn create_directory(&mut self, base_name: &str, parent: NodeId) -> ContractResult<NodeId> {
        self.attach(Node::directory(base_name, parent))
    }

    pub fn create_file(&mut self, base_name: &str, parent: NodeId) -> ContractResult<NodeId> {
        self.attach(Node::file(base_name, parent))
    }

    pub fn create_link(
        &mut self,
        base_name: &str,
        parent: NodeId,
        target: Option<NodeId>,
    ) -> ContractResult<NodeId> {
        if let Some(target) = target {
            self.check_live(target)?;
        }
        // a fresh id cannot appear in any existing target chain
        self.attach(Node::link(base_name, parent, target))
    }

    fn attach(&mut self, node: Node) -> ContractResult<NodeId> {
        precondition(
            !node.base_name.is_empty(),
            "base name must not be empty",
            &node.base_name,
        )?;
        self.check_directory(node.parent)?;

        let id = Uuid::new_v4();
        let parent = node.parent;
        debug!("creating {:?} under {}", node.base_name, parent);

        self.nodes.insert(id, node);
        self.children_mut(parent)?.push(id);
        self.check_invariant(id)?;
        Ok(id)
    }

    fn check_directory(&self, id: NodeId) -> ContractResult<()> {
        let is_directory = self.node(id)?.kind.is_directory();
        precondition(is_directory, "node must be a directory", id)
    }

    fn children_mut(&mut self, dir: NodeId) -> ContractResult<&mut Vec<NodeId>> {
        match &mut self.node_mut(dir)?.kind {
            NodeKind::Directory { children } => Ok(children),
            _ => Err(not_a(dir, "directory")),
        }
    }

    fn check_invariant(&self, id: NodeId) -> ContractResult<()> {
        let node = self.node(id)?;
        invariant(
            !node.base_name.is_empty() || id == self.root,
            "only the root may have an empty base name",
            id,
        )?;
        invariant(
            self.nodes.contains_key(&node.parent),
            "parent must belong to this tree",
            node.parent,
        )
    }

    pub fn set_link_target(&mut self, link: NodeId, target: NodeId) -> ContractResult<()> {
        self.check_live(target)?;
        precondition(
            !self.reaches(target, link)?,
            "link target chain must not lead back to the link",
            (link, target),
        )?;
        match &mut self.node_mut(link)?.kind {
            NodeKind::Link { target: slot } => {
                *slot = Some(target);
                Ok(())
            }
            _ => Err(not_a(link, "link")),
        }
    }

    pub fn link_target(&self, link: NodeId) -> ContractResult<Option<NodeId>> {
        match &self.node(link)?.kind {
            NodeKind::Link { target } => Ok(*target),
            _ => Err(not_a(link, "link")),
        }
    }

    /// Follows link targets from `start`; true if the chain passes through `link`.
    fn reaches(&self, start: NodeId, link: NodeId) -> ContractResult<bool> {
        let mut current = start;
        loop {
            if current == link {
                return Ok(true);
            }
            match self.node(current)?.kind {
                NodeKind::Link {
                    target: Some(next),
                } => current = next,
                _ => return Ok(false),
            }
        }
    }

    fn check_live(&self, id: NodeId) -> ContractResult<()> {
        let deleted = matches!(
            self.node(id)?.kind,
            NodeKind::File {
                state: FileState::Deleted
            }
        );
        precondition(!deleted, "node must not be a deleted file", id)
    }

    fn resolve_link(&self, link: NodeId, target: Option<NodeId>) -> ContractResult<NodeId> {
        postcondition(target.is_some(), "link target node must be set", link)?;
        Ok(target.unwrap_or(link))
    }

    pub fn base_name(&self, id: NodeId) -> ContractResult<String> {
        self.check_live(id)?;
        let node = self.node(id)?;
        if let NodeKind::Link { target } = node.kind {
            let target = self.resolve_link(id, target)?;
            return self.base_name(target);
        }
        self.check_invariant(id)?;
        Ok(node.base_name.clone())
    }

    pub fn full_name(&self, id: NodeId) -> ContractResult<Name> {
        if id == self.root {
            return Name::parse("", self.delimiter);
        }
        let parent = self.parent(id)?;
        let base_name = self.base_name(id)?;
        self.full_name(parent)?
            .append(&remask(&base_name, self.delimiter))
    }

    /// Renames a node; a link renames its target instead.
    pub fn rename(&mut self, id: NodeId, base_name: &str) -> ContractResult<()> {
        precondition(id != self.root, "the root cannot be renamed", id)?;
        precondition(!base_name.is_empty(), "base name must not be empty", base_name)?;
        self.check_live(id)?;

        let node = self.node(id)?;
        if let NodeKind::Link { target } = node.kind {
            let target = self.resolve_link(id, target)?;
            return self.rename(target, base_name);
        }

        debug!("renaming {} from {:?} to {:?}", id, node.base_name, base_name);
        self.node_mut(id)?.base_name = base_name.to_string();
        self.check_invariant(id)
    }

    pub fn move_node(&mut self, id: NodeId, to: NodeId) -> ContractResult<()> {
        precondition(id != self.root, "the root cannot be moved", id)?;
        self.check_live(id)?;
        self.check_directory(to)?;
        precondition(
            !self.is_within(to, id)?,
            "a node cannot be moved into its own subtree",
            (id, to),
        )?;

        let from = self.parent(id)?;
        debug!("moving {} from {} to {}", id, from, to);

        self.children_mut(from)?.retain(|child| *child != id);
        self.children_mut(to)?.push(id);
        self.node_mut(id)?.parent = to;
        self.check_invariant(id)
    }

    fn is_within(&self, mut id: NodeId, ancestor: NodeId) -> ContractResult<bool> {
        loop {
            if id == ancestor {
                return Ok(true);
            }
            if id == self.root {
                return Ok(false);
            }
            id = self.parent(id)?;
        }
    }

    /// Every node reachable from the root whose own base name equals `base_name`.
    pub fn find_nodes(&self, base_name: &str) -> ContractResult<Vec<NodeId>> {
        self.find_nodes_under(self.root, base_name)
    }

    pub fn find_nodes_under(&self, start: NodeId, base_name: &str) -> ContractResult<Vec<NodeId>> {
        let mut found = Vec::new();
        let mut pending = vec![start];

        while let Some(id) = pending.pop() {
            let node = self.node(id)?;
            if node.base_name == base_name {
                found.push(id);
            }
            if let NodeKind::Directory { children } = &node.kind {
                pending.extend(children.iter().rev());
            }
        }

        Ok(found)
    }

    pub fn file_state(&self, file: NodeId) -> ContractResult<FileState> {
        match self.node(file)?.kind {
            NodeKind::File { state } => Ok(state),
            _ => Err(not_a(file, "file")),
        }
    }

    fn set_file_state(&mut self, file: NodeId, state: FileState) -> ContractResult<()> {
        match &mut self.node_mut(file)?.kind {
            NodeKind::File { state: slot } => {
                *slot = state;
                Ok(())
            }
            _ => Err(not_a(file, "file")),
        }
    }

    pub fn open(&mut self, file: NodeId) -> ContractResult<()> {
        let state = self.file_state(file)?;
        precondition(state != FileState::Deleted, "cannot open a deleted file", file)?;

        self.set_file_state(file, FileState::Open)?;
        let state = self.file_state(file)?;
        postcondition(state == FileState::Open, "file must be open after open", state)
    }

    pub fn close(&mut self, file: NodeId) -> ContractResult<()> {
        let state = self.file_state(file)?;
        precondition(state == FileState::Open, "file must be open to be closed", state)?;

        self.set_file_state(file, FileState::Closed)?;
        let state = self.file_state(file)?;
        postcondition(state == FileState::Closed, "file must be closed after close", state)
    }

    /// Marks a file deleted and detaches it from its directory.
    ///
    /// The node stays behind as a tombstone: `file_state`, `parent` and `kind`
    /// still answer, while naming, renaming, moving and linking to it are
    /// precondition faults.
    pub fn delete(&mut self, file: NodeId) -> ContractResult<()> {
        let state = self.file_state(file)?;
        precondition(state != FileState::Deleted, "file is already deleted", file)?;

        let parent = self.parent(file)?;
        debug!("deleting {} from {}", file, parent);
        self.children_mut(parent)?.retain(|child| *child != file);
        self.set_file_state(file, FileState::Deleted)
    }
}

fn unknown_node(id: NodeId) -> ContractError {
    ContractError::Precondition {
        message: "node must belong to this tree".to_string(),
        value: id.to_string(),
    }
}

fn not_a(id: NodeId, what: &str) -> ContractError {
    ContractError::Precondition {
        message: format!("node must be a {}", what),
        value: id.to_string(),
    }
}

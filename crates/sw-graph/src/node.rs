//! Nodes: visual/logical groupings of handles.

use sw_core::HandleId;

/// The three structural singleton anchors.
///
/// Anchor handles are populated from external inventories rather than
/// user-created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Emulated robot-code I/O devices.
    RobotIo,
    /// Physics-side drivers (command consumers).
    SimInput,
    /// Physics-side stimuli (measurement producers).
    SimOutput,
}

/// Structural function a non-anchor node performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// 1 source, 1 target, pure pass-through.
    Junction,
    /// 1 composite source, N part targets; builds the composite from parts.
    Constructor,
    /// 1 composite target, N part sources; splits the composite into parts.
    Deconstructor,
}

/// What a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Anchor(AnchorKind),
    Function(FunctionKind),
}

/// 2-D layout hint; not semantically load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A group of handles.
///
/// Handle lists are ordered; for constructor/deconstructor nodes the order
/// of the part handles is the composite kind's decomposition order, which
/// the compiler relies on when indexing into composite values.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub role: NodeRole,
    pub position: Position,
    pub(crate) sources: Vec<HandleId>,
    pub(crate) targets: Vec<HandleId>,
}

impl Node {
    pub(crate) fn new(role: NodeRole, position: Position) -> Self {
        Self {
            role,
            position,
            sources: Vec::new(),
            targets: Vec::new(),
        }
    }

    /// Source-handle ids, in creation order.
    pub fn sources(&self) -> &[HandleId] {
        &self.sources
    }

    /// Target-handle ids, in creation order.
    pub fn targets(&self) -> &[HandleId] {
        &self.targets
    }

    /// All handle ids, sources first.
    pub fn handles(&self) -> impl Iterator<Item = HandleId> + '_ {
        self.sources.iter().chain(self.targets.iter()).copied()
    }

    pub fn is_anchor(&self) -> bool {
        matches!(self.role, NodeRole::Anchor(_))
    }

    pub fn function_kind(&self) -> Option<FunctionKind> {
        match self.role {
            NodeRole::Function(kind) => Some(kind),
            NodeRole::Anchor(_) => None,
        }
    }
}

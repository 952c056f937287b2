use crate::step::{Example, Step, StepStatus, Visualization};
use ahash::AHashMap;

/// One step stored flat, with links to its relatives by arena index.
#[derive(Debug, Clone)]
pub(crate) struct StepNode {
    /// The step's own fields. `sub_steps` is always `None` here; the
    /// structure lives in `children`.
    pub(crate) step: Step,
    pub(crate) parent: Option<usize>,
    pub(crate) children: Vec<usize>,
    pub(crate) depth: usize,
    /// Whether the source step had a `subSteps` list, even an empty one.
    had_sub_steps: bool,
}

/// A step forest laid out as a flat vector in pre-order.
///
/// Because nodes are pushed parent-first, vector order is exactly the
/// flattened next/previous sequence.
#[derive(Debug, Clone, Default)]
pub(crate) struct StepArena {
    nodes: Vec<StepNode>,
    roots: Vec<usize>,
    index: AHashMap<String, usize>,
}

impl StepArena {
    pub(crate) fn from_steps(steps: Vec<Step>) -> Self {
        let mut arena = Self::default();
        for step in steps {
            let root = arena.push_subtree(step, None, 0);
            arena.roots.push(root);
        }
        arena
    }

    fn push_subtree(&mut self, mut step: Step, parent: Option<usize>, depth: usize) -> usize {
        let sub_steps = step.sub_steps.take();
        let position = self.nodes.len();
        // The first occurrence of an id wins, matching a recursive first-match search.
        self.index.entry(step.id.clone()).or_insert(position);
        self.nodes.push(StepNode {
            step,
            parent,
            children: Vec::new(),
            depth,
            had_sub_steps: sub_steps.is_some(),
        });

        for child in sub_steps.unwrap_or_default() {
            let child_position = self.push_subtree(child, Some(position), depth + 1);
            self.nodes[position].children.push(child_position);
        }
        position
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub(crate) fn node(&self, position: usize) -> &StepNode {
        &self.nodes[position]
    }

    pub(crate) fn step_mut(&mut self, position: usize) -> &mut Step {
        &mut self.nodes[position].step
    }

    pub(crate) fn nodes(&self) -> &[StepNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut StepNode> {
        self.nodes.iter_mut()
    }

    pub(crate) fn roots(&self) -> &[usize] {
        &self.roots
    }

    /// Rebuilds the nested form of the whole forest.
    pub(crate) fn to_steps(&self) -> Vec<Step> {
        self.roots.iter().map(|&r| self.rebuild(r)).collect()
    }

    pub(crate) fn rebuild(&self, position: usize) -> Step {
        let node = &self.nodes[position];
        let mut step = node.step.clone();
        if node.had_sub_steps {
            step.sub_steps = Some(node.children.iter().map(|&c| self.rebuild(c)).collect());
        }
        step
    }
}

/// A borrowed handle to one step held by a `LifecycleManager`.
#[derive(Clone, Copy)]
pub struct StepView<'a> {
    arena: &'a StepArena,
    position: usize,
}

impl<'a> StepView<'a> {
    pub(crate) fn new(arena: &'a StepArena, position: usize) -> Self {
        Self { arena, position }
    }

    fn node(&self) -> &'a StepNode {
        self.arena.node(self.position)
    }

    pub fn id(&self) -> &'a str {
        &self.node().step.id
    }

    pub fn title(&self) -> &'a str {
        &self.node().step.title
    }

    pub fn description(&self) -> &'a str {
        &self.node().step.description
    }

    pub fn order(&self) -> u32 {
        self.node().step.order
    }

    pub fn expandable(&self) -> bool {
        self.node().step.expandable
    }

    /// The stored status, `None` if it was never set.
    pub fn status(&self) -> Option<StepStatus> {
        self.node().step.status
    }

    pub fn effective_status(&self) -> StepStatus {
        self.node().step.effective_status()
    }

    pub fn duration(&self) -> Option<f64> {
        self.node().step.duration
    }

    pub fn visualization(&self) -> Option<&'a Visualization> {
        self.node().step.visualization.as_ref()
    }

    pub fn real_data_example(&self) -> Option<&'a Example> {
        self.node().step.real_data_example.as_ref()
    }

    /// Nesting level, 0 for top-level steps.
    pub fn depth(&self) -> usize {
        self.node().depth
    }

    pub fn parent(&self) -> Option<StepView<'a>> {
        self.node().parent.map(|p| StepView::new(self.arena, p))
    }

    pub fn sub_steps(&self) -> impl Iterator<Item = StepView<'a>> + 'a {
        let arena = self.arena;
        self.node()
            .children
            .iter()
            .map(move |&c| StepView::new(arena, c))
    }

    pub fn sub_step_count(&self) -> usize {
        self.node().children.len()
    }

    /// An owned copy of this step with its full subtree.
    pub fn to_step(&self) -> Step {
        self.arena.rebuild(self.position)
    }
}

impl std::fmt::Debug for StepView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepView")
            .field("id", &self.id())
            .field("depth", &self.depth())
            .field("status", &self.status())
            .finish()
    }
}

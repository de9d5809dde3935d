// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Decision tree recording
//!
//! `TreeRecorder` keeps one node per search call: the root, every child
//! searched after a placement, and every child answered by the memo table.
//! Each node carries the used capacity of every bin after the placement,
//! the weight and bin of that placement, the cut that resolved it, the
//! weight the adversary settled on and the value it returned.
//!
//! The tree can be exported as Graphviz DOT for offline inspection. Trees
//! grow quickly; `with_node_limit` caps the number of recorded nodes, deeper
//! events past the cap are counted but not stored.

use crate::{
    monitor::adversary_monitor::{AdversaryMonitor, CutReason},
    stats::SearchStatistics,
};
use binstretch_core::num::numeric::StretchNumeric;
use binstretch_model::{
    configuration::BinConfiguration, index::BinIndex, weights::WeightUniverse,
};
use std::io::Write;

/// A recorded search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode<T> {
    pub parent: Option<usize>,
    pub bins_used: Vec<T>,
    pub placement: Option<(T, BinIndex)>,
    pub window: Option<(T, T)>,
    pub cut: Option<String>,
    pub next_weight: Option<T>,
    pub value: Option<T>,
}

impl<T> TreeNode<T> {
    fn new(parent: Option<usize>, bins_used: Vec<T>, placement: Option<(T, BinIndex)>) -> Self {
        Self {
            parent,
            bins_used,
            placement,
            window: None,
            cut: None,
            next_weight: None,
            value: None,
        }
    }
}

/// Records the explored decision tree.
#[derive(Debug, Clone)]
pub struct TreeRecorder<T> {
    nodes: Vec<TreeNode<T>>,
    stack: Vec<Option<usize>>,
    node_limit: Option<usize>,
    dropped: u64,
}

impl<T> Default for TreeRecorder<T>
where
    T: StretchNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeRecorder<T>
where
    T: StretchNumeric,
{
    /// Creates a recorder without a node limit.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            stack: Vec::new(),
            node_limit: None,
            dropped: 0,
        }
    }

    /// Creates a recorder that stores at most `limit` nodes.
    pub fn with_node_limit(limit: usize) -> Self {
        Self {
            node_limit: Some(limit),
            ..Self::new()
        }
    }

    /// Returns the recorded nodes; index 0 is the root.
    #[inline]
    pub fn nodes(&self) -> &[TreeNode<T>] {
        &self.nodes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the number of nodes not stored because of the node limit.
    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    #[inline]
    fn current(&mut self) -> Option<&mut TreeNode<T>> {
        let index = (*self.stack.last()?)?;
        self.nodes.get_mut(index)
    }

    #[inline]
    fn has_room(&self) -> bool {
        self.node_limit.is_none_or(|limit| self.nodes.len() < limit)
    }

    fn label(node: &TreeNode<T>, index: usize) -> String {
        let mut lines = Vec::new();
        if index == 0 {
            lines.push("Name: Root".to_string());
        }
        let bins: Vec<String> = node.bins_used.iter().map(|u| u.to_string()).collect();
        lines.push(format!("bins: [{}]", bins.join(", ")));
        if let Some((lower, upper)) = node.window {
            lines.push(format!("window: [{}, {})", lower, upper));
        }
        if let Some(cut) = &node.cut {
            lines.push(format!("cut: {}", cut));
        }
        if let Some(weight) = node.next_weight {
            lines.push(format!("Next weight: {}", weight));
        }
        if let Some(value) = node.value {
            lines.push(format!("val: {}", value));
        }
        lines.join("\\n")
    }

    /// Writes the tree as a Graphviz digraph.
    pub fn write_dot<W>(&self, out: &mut W) -> std::io::Result<()>
    where
        W: Write,
    {
        writeln!(out, "digraph search {{")?;
        writeln!(out, "  node [shape=box];")?;
        for (index, node) in self.nodes.iter().enumerate() {
            writeln!(out, "  n{} [label=\"{}\"];", index, Self::label(node, index))?;
            if let (Some(parent), Some((weight, bin))) = (node.parent, node.placement) {
                writeln!(
                    out,
                    "  n{} -> n{} [label=\"{} -> {}\"];",
                    parent,
                    index,
                    weight,
                    bin.get()
                )?;
            }
        }
        writeln!(out, "}}")
    }

    /// Returns the tree as Graphviz DOT text.
    pub fn to_dot(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a `Vec` cannot fail.
        let _ = self.write_dot(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

impl<T> AdversaryMonitor<T> for TreeRecorder<T>
where
    T: StretchNumeric,
{
    fn name(&self) -> &str {
        "TreeRecorder"
    }

    fn on_enter_search(
        &mut self,
        root: &BinConfiguration<T>,
        _weights: &WeightUniverse<T>,
        _statistics: &SearchStatistics,
    ) {
        self.nodes.clear();
        self.stack.clear();
        self.dropped = 0;
        self.nodes.push(TreeNode::new(None, root.used_snapshot(), None));
        self.stack.push(Some(0));
    }

    fn on_exit_search(&mut self, _root: &BinConfiguration<T>, value: T, _statistics: &SearchStatistics) {
        if let Some(root) = self.nodes.first_mut() {
            root.value = Some(value);
        }
        self.stack.clear();
    }

    fn on_node(
        &mut self,
        _config: &BinConfiguration<T>,
        lower: T,
        upper: T,
        _depth: u64,
        _statistics: &SearchStatistics,
    ) {
        if let Some(node) = self.current() {
            node.window = Some((lower, upper));
        }
    }

    fn on_cut(&mut self, reason: CutReason<T>, _value: T, _statistics: &SearchStatistics) {
        if let Some(node) = self.current() {
            node.cut = Some(reason.to_string());
        }
    }

    fn on_memo_hit(&mut self, _value: T, _statistics: &SearchStatistics) {
        if let Some(node) = self.current() {
            node.cut = Some("Memoized value".to_string());
        }
    }

    fn on_descend(
        &mut self,
        config: &BinConfiguration<T>,
        weight: T,
        bin: BinIndex,
        _statistics: &SearchStatistics,
    ) {
        let parent = self.stack.last().copied().flatten();
        if parent.is_some() && self.has_room() {
            let index = self.nodes.len();
            self.nodes
                .push(TreeNode::new(parent, config.used_snapshot(), Some((weight, bin))));
            self.stack.push(Some(index));
        } else {
            self.dropped = self.dropped.saturating_add(1);
            self.stack.push(None);
        }
    }

    fn on_backtrack(&mut self, value: T, _statistics: &SearchStatistics) {
        if let Some(node) = self.current() {
            node.value = Some(value);
        }
        self.stack.pop();
    }

    fn on_weight_evaluated(
        &mut self,
        weight: T,
        _value: T,
        improved: bool,
        _statistics: &SearchStatistics,
    ) {
        if improved {
            if let Some(node) = self.current() {
                node.next_weight = Some(weight);
            }
        }
    }
}

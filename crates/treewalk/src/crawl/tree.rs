//! Flat-map to tree assembly.

use indexmap::IndexMap;
use listing::{DirectoryPath, FileEntry};
use serde::{Deserialize, Serialize};

use crate::crawl::FlatMap;

/// Fully nested directory node, produced once and sent to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode {
    pub title: String,
    pub files: Vec<FileEntry>,
    pub dirs: IndexMap<DirectoryPath, TreeNode>,
}

impl TreeNode {
    fn leaf(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            files: Vec::new(),
            dirs: IndexMap::new(),
        }
    }

    /// Replace the display title, e.g. with a source label friendlier than
    /// the raw path. Does not re-run the assembly.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }
}

/// Assemble the accumulated flat map into a single tree rooted at `root`.
///
/// Pure and total: works on incomplete maps (pending children become leaf
/// stubs) and on maps containing cycles (a path revisited through its own
/// descendants becomes a leaf). Directories unreachable from the root are
/// omitted. Single pass per node, O(N) over the map.
pub fn build(flat_map: &FlatMap, root: &DirectoryPath) -> TreeNode {
    let mut stack = Vec::new();
    build_node(flat_map, root, &mut stack)
}

fn build_node(flat_map: &FlatMap, path: &DirectoryPath, stack: &mut Vec<DirectoryPath>) -> TreeNode {
    let Some(entry) = flat_map.get(path) else {
        // Not fetched (yet): a stub with no contents.
        return TreeNode::leaf(path.basename());
    };

    if stack.contains(path) {
        // Reachable from itself, e.g. via a symlink loop; cut the branch.
        tracing::debug!(path = %path, "cycle detected, truncating branch");
        return TreeNode::leaf(entry.title.clone());
    }

    stack.push(path.clone());
    let mut dirs = IndexMap::with_capacity(entry.dirs.len());
    for child in entry.dirs.values() {
        dirs.insert(child.path.clone(), build_node(flat_map, &child.path, stack));
    }
    stack.pop();

    TreeNode {
        title: entry.title.clone(),
        files: entry.files.clone(),
        dirs,
    }
}

use std::fmt;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::config::RenderSettings;
use crate::domain::NodeRef;
use crate::tree::Tree;

/// Label pushed in place of children hidden by `max_depth`.
const ELIDED: &str = "…";

/// Conversion into a printable `termtree` representation.
pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> TermTree<String>;
}

impl<V: fmt::Display> TreeNodeConvert for Tree<V> {
    fn to_tree_string(&self) -> TermTree<String> {
        self.render(&RenderSettings::default())
    }
}

impl<V: fmt::Display> TreeNodeConvert for NodeRef<'_, V> {
    fn to_tree_string(&self) -> TermTree<String> {
        build_tree(*self, &RenderSettings::default())
    }
}

impl<V: fmt::Display> Tree<V> {
    /// Renders the whole tree, honouring `settings`.
    #[instrument(level = "debug", skip(self))]
    pub fn render(&self, settings: &RenderSettings) -> TermTree<String> {
        build_tree(self.root(), settings)
    }
}

impl<V: fmt::Display> fmt::Display for Tree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_tree_string())
    }
}

fn label<V: fmt::Display>(node: NodeRef<'_, V>, settings: &RenderSettings) -> String {
    let mut text = node.value().to_string();
    if text.is_empty() {
        text = settings.empty_label.clone();
    }
    if settings.show_paths {
        format!("{} {}", node.path(), text)
    } else {
        text
    }
}

fn build_tree<V: fmt::Display>(
    node: NodeRef<'_, V>,
    settings: &RenderSettings,
) -> TermTree<String> {
    let mut tree = TermTree::new(label(node, settings));
    let cut = settings
        .max_depth
        .is_some_and(|max| node.depth() >= max);

    if cut {
        if !node.is_leaf() {
            tree.push(TermTree::new(ELIDED.to_string()));
        }
        return tree;
    }

    for child in node.children() {
        tree.push(build_tree(child, settings));
    }
    tree
}

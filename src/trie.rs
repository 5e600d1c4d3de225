use std::collections::BTreeMap;
use std::path::{Component, Path};
use tracing::trace;

/// One path component in a [`TokenTree`]. Leaves carry a file's token count;
/// directories carry only children.
#[derive(Debug, Default)]
pub struct TokenNode {
    pub children: BTreeMap<String, TokenNode>,
    pub token_count: Option<usize>,
}

impl TokenNode {
    pub fn is_file(&self) -> bool {
        self.token_count.is_some()
    }

    /// Sum of this node's own count and every descendant's.
    pub fn total_tokens(&self) -> usize {
        self.token_count.unwrap_or(0)
            + self
                .children
                .values()
                .map(TokenNode::total_tokens)
                .sum::<usize>()
    }
}

/// Token counts arranged by directory, used to print the post-run report.
#[derive(Debug, Default)]
pub struct TokenTree {
    root: TokenNode,
}

impl TokenTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// `./` prefixes are dropped so `./src/a.ts` and `src/a.ts` share a node.
    pub fn insert(&mut self, path: &Path, token_count: usize) {
        trace!("Inserting {:?} with {} tokens", path, token_count);
        let mut node = &mut self.root;
        for component in path.components() {
            if matches!(component, Component::CurDir) {
                continue;
            }
            let key = component.as_os_str().to_string_lossy().into_owned();
            node = node.children.entry(key).or_default();
        }
        if node.token_count.is_some() {
            trace!("Overwriting existing token count for {:?}", path);
        }
        node.token_count = Some(token_count);
    }

    pub fn root(&self) -> &TokenNode {
        &self.root
    }
}

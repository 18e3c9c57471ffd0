//! Index-addressed red-black tree threaded with a doubly linked list.
//!
//! The tree carries no keys: callers decide where a value goes by naming the
//! node it should follow (`insert_successor`). This is what the beach line
//! needs, since the order of its arcs is only defined relative to the moving
//! sweep line.

pub type NodeId = usize;

#[derive(Clone, Debug)]
struct Node<T> {
    value: T,
    parent: Option<NodeId>,
    left: Option<NodeId>,
    right: Option<NodeId>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
    red: bool,
}

impl<T> Node<T> {
    fn new(value: T) -> Self {
        Node {
            value,
            parent: None,
            left: None,
            right: None,
            prev: None,
            next: None,
            red: true,
        }
    }
}

/// Arena of tree nodes. Removed slots are recycled by later insertions, so a
/// `NodeId` is only meaningful while its node is in the tree.
#[derive(Clone, Debug)]
pub struct RbArena<T> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

impl<T> Default for RbArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> RbArena<T> {
    pub fn new() -> Self {
        RbArena {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn get(&self, id: NodeId) -> &T {
        &self.nodes[id].value
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.nodes[id].value
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].left
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].right
    }

    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].prev
    }

    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].next
    }

    /// Leftmost node of the whole tree.
    #[cfg(test)]
    pub fn first(&self) -> Option<NodeId> {
        self.root.map(|r| self.leftmost(r))
    }

    /// Node ids in list order.
    #[cfg(test)]
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.first(), move |&id| self.nodes[id].next)
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(l) = self.nodes[id].left {
            id = l;
        }
        id
    }

    fn is_red(&self, id: Option<NodeId>) -> bool {
        id.is_some_and(|i| self.nodes[i].red)
    }

    fn alloc(&mut self, value: T) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Node::new(value);
                id
            }
            None => {
                self.nodes.push(Node::new(value));
                self.nodes.len() - 1
            }
        }
    }

    /// Inserts `value` right after `node` in list order, or at the very front
    /// when `node` is `None`.
    pub fn insert_successor(&mut self, node: Option<NodeId>, value: T) -> NodeId {
        let successor = self.alloc(value);
        let parent = if let Some(node) = node {
            let next = self.nodes[node].next;
            self.nodes[successor].prev = Some(node);
            self.nodes[successor].next = next;
            if let Some(n) = next {
                self.nodes[n].prev = Some(successor);
            }
            self.nodes[node].next = Some(successor);

            if let Some(right) = self.nodes[node].right {
                let attach = self.leftmost(right);
                self.nodes[attach].left = Some(successor);
                Some(attach)
            } else {
                self.nodes[node].right = Some(successor);
                Some(node)
            }
        } else if let Some(root) = self.root {
            let first = self.leftmost(root);
            self.nodes[successor].next = Some(first);
            self.nodes[first].prev = Some(successor);
            self.nodes[first].left = Some(successor);
            Some(first)
        } else {
            self.root = Some(successor);
            None
        };
        self.nodes[successor].parent = parent;
        self.len += 1;
        self.insert_fixup(successor);
        successor
    }

    fn insert_fixup(&mut self, mut node: NodeId) {
        while let Some(mut parent) = self.nodes[node].parent {
            if !self.nodes[parent].red {
                break;
            }
            // A red parent is never the root.
            let Some(grandpa) = self.nodes[parent].parent else {
                break;
            };
            if self.nodes[grandpa].left == Some(parent) {
                let uncle = self.nodes[grandpa].right;
                if let Some(u) = uncle.filter(|&u| self.nodes[u].red) {
                    self.nodes[parent].red = false;
                    self.nodes[u].red = false;
                    self.nodes[grandpa].red = true;
                    node = grandpa;
                } else {
                    if self.nodes[parent].right == Some(node) {
                        self.rotate_left(parent);
                        node = parent;
                        parent = match self.nodes[node].parent {
                            Some(p) => p,
                            None => break,
                        };
                    }
                    self.nodes[parent].red = false;
                    self.nodes[grandpa].red = true;
                    self.rotate_right(grandpa);
                }
            } else {
                let uncle = self.nodes[grandpa].left;
                if let Some(u) = uncle.filter(|&u| self.nodes[u].red) {
                    self.nodes[parent].red = false;
                    self.nodes[u].red = false;
                    self.nodes[grandpa].red = true;
                    node = grandpa;
                } else {
                    if self.nodes[parent].left == Some(node) {
                        self.rotate_right(parent);
                        node = parent;
                        parent = match self.nodes[node].parent {
                            Some(p) => p,
                            None => break,
                        };
                    }
                    self.nodes[parent].red = false;
                    self.nodes[grandpa].red = true;
                    self.rotate_left(grandpa);
                }
            }
        }
        if let Some(root) = self.root {
            self.nodes[root].red = false;
        }
    }

    /// Unlinks `node` from both the list and the tree and recycles its slot.
    pub fn remove(&mut self, node: NodeId) {
        let prev = self.nodes[node].prev;
        let next_in_list = self.nodes[node].next;
        if let Some(n) = next_in_list {
            self.nodes[n].prev = prev;
        }
        if let Some(p) = prev {
            self.nodes[p].next = next_in_list;
        }
        self.nodes[node].prev = None;
        self.nodes[node].next = None;

        let mut parent = self.nodes[node].parent;
        let left = self.nodes[node].left;
        let right = self.nodes[node].right;
        let next = match (left, right) {
            (None, _) => right,
            (Some(_), None) => left,
            (Some(_), Some(r)) => Some(self.leftmost(r)),
        };
        match parent {
            Some(p) if self.nodes[p].left == Some(node) => self.nodes[p].left = next,
            Some(p) => self.nodes[p].right = next,
            None => self.root = next,
        }

        let is_red;
        let mut x;
        if let (Some(l), Some(r), Some(n)) = (left, right, next) {
            is_red = self.nodes[n].red;
            self.nodes[n].red = self.nodes[node].red;
            self.nodes[n].left = Some(l);
            self.nodes[l].parent = Some(n);
            if n != r {
                parent = self.nodes[n].parent;
                self.nodes[n].parent = self.nodes[node].parent;
                x = self.nodes[n].right;
                if let Some(p) = parent {
                    self.nodes[p].left = x;
                }
                self.nodes[n].right = Some(r);
                self.nodes[r].parent = Some(n);
            } else {
                self.nodes[n].parent = parent;
                parent = Some(n);
                x = self.nodes[n].right;
            }
        } else {
            is_red = self.nodes[node].red;
            x = next;
        }
        if let Some(xi) = x {
            self.nodes[xi].parent = parent;
        }

        self.nodes[node].parent = None;
        self.nodes[node].left = None;
        self.nodes[node].right = None;
        self.free.push(node);
        self.len -= 1;

        if is_red {
            return;
        }
        if let Some(xi) = x.filter(|&xi| self.nodes[xi].red) {
            self.nodes[xi].red = false;
            return;
        }

        loop {
            if x == self.root {
                break;
            }
            let Some(p) = parent else {
                break;
            };
            if self.nodes[p].left == x {
                let Some(mut sibling) = self.nodes[p].right else {
                    break;
                };
                if self.nodes[sibling].red {
                    self.nodes[sibling].red = false;
                    self.nodes[p].red = true;
                    self.rotate_left(p);
                    sibling = match self.nodes[p].right {
                        Some(s) => s,
                        None => break,
                    };
                }
                if self.is_red(self.nodes[sibling].left) || self.is_red(self.nodes[sibling].right) {
                    if !self.is_red(self.nodes[sibling].right) {
                        if let Some(sl) = self.nodes[sibling].left {
                            self.nodes[sl].red = false;
                        }
                        self.nodes[sibling].red = true;
                        self.rotate_right(sibling);
                        sibling = match self.nodes[p].right {
                            Some(s) => s,
                            None => break,
                        };
                    }
                    self.nodes[sibling].red = self.nodes[p].red;
                    self.nodes[p].red = false;
                    if let Some(sr) = self.nodes[sibling].right {
                        self.nodes[sr].red = false;
                    }
                    self.rotate_left(p);
                    x = self.root;
                    break;
                }
                self.nodes[sibling].red = true;
            } else {
                let Some(mut sibling) = self.nodes[p].left else {
                    break;
                };
                if self.nodes[sibling].red {
                    self.nodes[sibling].red = false;
                    self.nodes[p].red = true;
                    self.rotate_right(p);
                    sibling = match self.nodes[p].left {
                        Some(s) => s,
                        None => break,
                    };
                }
                if self.is_red(self.nodes[sibling].left) || self.is_red(self.nodes[sibling].right) {
                    if !self.is_red(self.nodes[sibling].left) {
                        if let Some(sr) = self.nodes[sibling].right {
                            self.nodes[sr].red = false;
                        }
                        self.nodes[sibling].red = true;
                        self.rotate_left(sibling);
                        sibling = match self.nodes[p].left {
                            Some(s) => s,
                            None => break,
                        };
                    }
                    self.nodes[sibling].red = self.nodes[p].red;
                    self.nodes[p].red = false;
                    if let Some(sl) = self.nodes[sibling].left {
                        self.nodes[sl].red = false;
                    }
                    self.rotate_right(p);
                    x = self.root;
                    break;
                }
                self.nodes[sibling].red = true;
            }
            x = Some(p);
            parent = self.nodes[p].parent;
            if self.nodes[p].red {
                break;
            }
        }
        if let Some(xi) = x {
            self.nodes[xi].red = false;
        }
    }

    fn rotate_left(&mut self, p: NodeId) {
        let Some(q) = self.nodes[p].right else {
            return;
        };
        let parent = self.nodes[p].parent;
        match parent {
            Some(g) if self.nodes[g].left == Some(p) => self.nodes[g].left = Some(q),
            Some(g) => self.nodes[g].right = Some(q),
            None => self.root = Some(q),
        }
        self.nodes[q].parent = parent;
        self.nodes[p].parent = Some(q);
        self.nodes[p].right = self.nodes[q].left;
        if let Some(r) = self.nodes[p].right {
            self.nodes[r].parent = Some(p);
        }
        self.nodes[q].left = Some(p);
    }

    fn rotate_right(&mut self, p: NodeId) {
        let Some(q) = self.nodes[p].left else {
            return;
        };
        let parent = self.nodes[p].parent;
        match parent {
            Some(g) if self.nodes[g].left == Some(p) => self.nodes[g].left = Some(q),
            Some(g) => self.nodes[g].right = Some(q),
            None => self.root = Some(q),
        }
        self.nodes[q].parent = parent;
        self.nodes[p].parent = Some(q);
        self.nodes[p].left = self.nodes[q].right;
        if let Some(l) = self.nodes[p].left {
            self.nodes[l].parent = Some(p);
        }
        self.nodes[q].right = Some(p);
    }
}

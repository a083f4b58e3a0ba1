//! Key Index
//!
//! A red-black tree over the arena slots, ordered by key. The sentinel acts as a
//! header node: its `left` link holds the root and the root's `parent` is the
//! sentinel. Because the root hangs off the sentinel's left side, in-order
//! navigation needs no special cases at the ends:
//!
//! - the successor of the maximum climbs to the root, then to the sentinel,
//!   which is the "end" position;
//! - the predecessor of the sentinel descends to the root and then to the
//!   maximum;
//! - the leftmost slot reachable from the sentinel is the minimum, or the
//!   sentinel itself when the tree is empty.
//!
//! Removal never copies keys or values between slots. When the removed slot has
//! two children, its in-order successor slot is relinked into its position, so
//! cursors pointing at the successor stay valid.
//!
//! # Complexity
//!
//! | Operation | Cost |
//! |-----------|------|
//! | `search`, `insert_unique`, `remove` | O(log n) |
//! | `min`, `max` | O(log n) |
//! | `successor`, `predecessor` | O(log n) worst case, O(1) amortized over a full traversal |

use crate::entry::{Color, Nodes, NIL, SENTINEL};
use core::borrow::Borrow;
use core::cmp::Ordering;

impl<K, V> Nodes<K, V> {
    #[inline]
    pub(crate) fn root(&self) -> usize {
        self.slot(SENTINEL).left
    }

    #[inline]
    fn left(&self, idx: usize) -> usize {
        self.slot(idx).left
    }

    #[inline]
    fn right(&self, idx: usize) -> usize {
        self.slot(idx).right
    }

    #[inline]
    fn parent(&self, idx: usize) -> usize {
        self.slot(idx).parent
    }

    #[inline]
    fn color(&self, idx: usize) -> Color {
        if idx == NIL {
            Color::Black
        } else {
            self.slot(idx).color
        }
    }

    #[inline]
    fn set_color(&mut self, idx: usize, color: Color) {
        if idx != NIL {
            self.slot_mut(idx).color = color;
        }
    }

    #[inline]
    fn set_parent(&mut self, idx: usize, parent: usize) {
        if idx != NIL {
            self.slot_mut(idx).parent = parent;
        }
    }

    /// Points whichever child link of `parent` referenced `old` at `new`.
    ///
    /// For the sentinel this rewrites the root, since the root is its left child.
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if self.left(parent) == old {
            self.slot_mut(parent).left = new;
        } else {
            self.slot_mut(parent).right = new;
        }
    }

    /// Leftmost slot of the subtree rooted at `idx`.
    fn leftmost(&self, mut idx: usize) -> usize {
        while self.left(idx) != NIL {
            idx = self.left(idx);
        }
        idx
    }

    /// Rightmost slot of the subtree rooted at `idx`.
    fn rightmost(&self, mut idx: usize) -> usize {
        while self.right(idx) != NIL {
            idx = self.right(idx);
        }
        idx
    }

    /// Slot with the smallest key, or the sentinel when empty.
    #[inline]
    pub(crate) fn min(&self) -> usize {
        self.leftmost(SENTINEL)
    }

    /// Slot with the largest key, or the sentinel when empty.
    #[inline]
    pub(crate) fn max(&self) -> usize {
        match self.root() {
            NIL => SENTINEL,
            root => self.rightmost(root),
        }
    }

    /// In-order successor of `idx`.
    ///
    /// The successor of the maximum is the sentinel. The sentinel itself has no
    /// successor and yields [`NIL`].
    pub(crate) fn successor(&self, mut idx: usize) -> usize {
        if self.right(idx) != NIL {
            return self.leftmost(self.right(idx));
        }
        let mut up = self.parent(idx);
        while up != NIL && idx == self.right(up) {
            idx = up;
            up = self.parent(up);
        }
        up
    }

    /// In-order predecessor of `idx`.
    ///
    /// The predecessor of the sentinel is the maximum. The minimum has no
    /// predecessor and yields [`NIL`], as does the sentinel of an empty tree.
    pub(crate) fn predecessor(&self, mut idx: usize) -> usize {
        if self.left(idx) != NIL {
            return self.rightmost(self.left(idx));
        }
        let mut up = self.parent(idx);
        while up != NIL && idx == self.left(up) {
            idx = up;
            up = self.parent(up);
        }
        up
    }

    fn rotate_left(&mut self, x: usize) {
        let y = self.right(x);
        let y_left = self.left(y);
        self.slot_mut(x).right = y_left;
        self.set_parent(y_left, x);
        let x_parent = self.parent(x);
        self.slot_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, y);
        self.slot_mut(y).left = x;
        self.slot_mut(x).parent = y;
    }

    fn rotate_right(&mut self, x: usize) {
        let y = self.left(x);
        let y_right = self.right(y);
        self.slot_mut(x).left = y_right;
        self.set_parent(y_right, x);
        let x_parent = self.parent(x);
        self.slot_mut(y).parent = x_parent;
        self.replace_child(x_parent, x, y);
        self.slot_mut(y).right = x;
        self.slot_mut(x).parent = y;
    }

    /// Restores the red-black properties after `z` was linked as a red leaf.
    fn insert_fixup(&mut self, mut z: usize) {
        // The sentinel is black, so the loop stops once `z` reaches the root.
        while self.color(self.parent(z)) == Color::Red {
            let p = self.parent(z);
            let g = self.parent(p);
            if p == self.left(g) {
                let uncle = self.right(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.right(p) {
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_right(g);
                }
            } else {
                let uncle = self.left(g);
                if self.color(uncle) == Color::Red {
                    self.set_color(p, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(g, Color::Red);
                    z = g;
                } else {
                    if z == self.left(p) {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.parent(z);
                    let g = self.parent(p);
                    self.set_color(p, Color::Black);
                    self.set_color(g, Color::Red);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root();
        self.set_color(root, Color::Black);
    }

    /// Detaches `z` from the tree, leaving the remaining slots ordered and balanced.
    ///
    /// A slot with two children is replaced by its in-order successor slot, which
    /// takes over `z`'s parent, both subtrees and color.
    pub(crate) fn remove(&mut self, z: usize) {
        debug_assert_ne!(z, SENTINEL, "the sentinel is not part of the index");
        let z_left = self.left(z);
        let z_right = self.right(z);
        let z_parent = self.parent(z);

        // `x` takes the place of the slot physically leaving its position,
        // `x_parent` tracks its parent since `x` may be NIL.
        let x;
        let x_parent;
        let removed_color;
        if z_left == NIL || z_right == NIL {
            x = if z_left == NIL { z_right } else { z_left };
            x_parent = z_parent;
            self.set_parent(x, z_parent);
            self.replace_child(z_parent, z, x);
            removed_color = self.color(z);
        } else {
            let y = self.leftmost(z_right);
            x = self.right(y);
            if y == z_right {
                x_parent = y;
            } else {
                // Promote the successor's right child into the successor's spot.
                x_parent = self.parent(y);
                self.set_parent(x, x_parent);
                self.slot_mut(x_parent).left = x;
                self.slot_mut(y).right = z_right;
                self.slot_mut(z_right).parent = y;
            }
            self.slot_mut(y).left = z_left;
            self.slot_mut(z_left).parent = y;
            self.slot_mut(y).parent = z_parent;
            self.replace_child(z_parent, z, y);

            removed_color = self.color(y);
            let z_color = self.color(z);
            self.set_color(y, z_color);
        }

        {
            let node = self.slot_mut(z);
            node.parent = NIL;
            node.left = NIL;
            node.right = NIL;
        }

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }
    }

    fn remove_fixup(&mut self, mut x: usize, mut x_parent: usize) {
        while x != self.root() && self.color(x) == Color::Black {
            if x == self.left(x_parent) {
                let mut w = self.right(x_parent);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(x_parent, Color::Red);
                    self.rotate_left(x_parent);
                    w = self.right(x_parent);
                }
                if self.color(self.left(w)) == Color::Black
                    && self.color(self.right(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = x_parent;
                    x_parent = self.parent(x);
                } else {
                    if self.color(self.right(w)) == Color::Black {
                        let w_left = self.left(w);
                        self.set_color(w_left, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_right(w);
                        w = self.right(x_parent);
                    }
                    let parent_color = self.color(x_parent);
                    self.set_color(w, parent_color);
                    self.set_color(x_parent, Color::Black);
                    let w_right = self.right(w);
                    self.set_color(w_right, Color::Black);
                    self.rotate_left(x_parent);
                    x = self.root();
                    break;
                }
            } else {
                let mut w = self.left(x_parent);
                if self.color(w) == Color::Red {
                    self.set_color(w, Color::Black);
                    self.set_color(x_parent, Color::Red);
                    self.rotate_right(x_parent);
                    w = self.left(x_parent);
                }
                if self.color(self.right(w)) == Color::Black
                    && self.color(self.left(w)) == Color::Black
                {
                    self.set_color(w, Color::Red);
                    x = x_parent;
                    x_parent = self.parent(x);
                } else {
                    if self.color(self.left(w)) == Color::Black {
                        let w_right = self.right(w);
                        self.set_color(w_right, Color::Black);
                        self.set_color(w, Color::Red);
                        self.rotate_left(w);
                        w = self.left(x_parent);
                    }
                    let parent_color = self.color(x_parent);
                    self.set_color(w, parent_color);
                    self.set_color(x_parent, Color::Black);
                    let w_left = self.left(w);
                    self.set_color(w_left, Color::Black);
                    self.rotate_right(x_parent);
                    x = self.root();
                    break;
                }
            }
        }
        self.set_color(x, Color::Black);
    }
}

impl<K: Ord, V> Nodes<K, V> {
    /// Finds the slot holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cur = self.root();
        while cur != NIL {
            match key.cmp(self.key(cur).borrow()) {
                Ordering::Less => cur = self.left(cur),
                Ordering::Greater => cur = self.right(cur),
                Ordering::Equal => return Some(cur),
            }
        }
        None
    }

    /// Links a freshly allocated slot into the tree.
    ///
    /// The caller guarantees that no slot with an equal key is present.
    pub(crate) fn insert_unique(&mut self, z: usize) {
        let mut parent = SENTINEL;
        let mut cur = self.root();
        let mut go_left = true;
        while cur != NIL {
            parent = cur;
            go_left = match self.key(z).cmp(self.key(cur)) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => unreachable!("insert_unique called with a resident key"),
            };
            cur = if go_left {
                self.left(cur)
            } else {
                self.right(cur)
            };
        }

        {
            let node = self.slot_mut(z);
            node.parent = parent;
            node.left = NIL;
            node.right = NIL;
            node.color = Color::Red;
        }
        // An empty tree hangs the new root off the sentinel's left link.
        if go_left {
            self.slot_mut(parent).left = z;
        } else {
            self.slot_mut(parent).right = z;
        }
        self.insert_fixup(z);
    }
}

#[cfg(test)]
impl<K: Ord, V> Nodes<K, V> {
    /// Walks the whole tree and panics if any structural invariant is broken.
    ///
    /// Returns the number of slots reachable from the root.
    pub(crate) fn check_invariants(&self) -> usize {
        assert_eq!(self.right(SENTINEL), NIL, "sentinel must only use its left link");
        let root = self.root();
        if root == NIL {
            return 0;
        }
        assert_eq!(self.parent(root), SENTINEL, "root must hang off the sentinel");
        assert_eq!(self.color(root), Color::Black, "root must be black");
        let (count, _) = self.check_subtree(root);
        count
    }

    fn check_subtree(&self, idx: usize) -> (usize, usize) {
        if idx == NIL {
            return (0, 1);
        }
        let left = self.left(idx);
        let right = self.right(idx);
        if left != NIL {
            assert_eq!(self.parent(left), idx, "broken parent link");
            assert!(self.key(left) < self.key(idx), "left child out of order");
        }
        if right != NIL {
            assert_eq!(self.parent(right), idx, "broken parent link");
            assert!(self.key(right) > self.key(idx), "right child out of order");
        }
        if self.color(idx) == Color::Red {
            assert_eq!(self.color(left), Color::Black, "red node with red child");
            assert_eq!(self.color(right), Color::Black, "red node with red child");
        }
        let (left_count, left_height) = self.check_subtree(left);
        let (right_count, right_height) = self.check_subtree(right);
        assert_eq!(left_height, right_height, "unequal black heights");
        let own = usize::from(self.color(idx) == Color::Black);
        (left_count + right_count + 1, left_height + own)
    }
}

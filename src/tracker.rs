/// In-memory mirror of the remote collection's physical order.
///
/// `slots[p]` is the original index of the item currently at physical slot
/// `p`; `position_of` is its inverse and answers "where is original index `i`
/// right now" in constant time. Both always describe a permutation of `0..n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionTracker {
    slots: Vec<usize>,
    position_of: Vec<usize>,
}

impl PositionTracker {
    /// Starts from the identity: every item sits at its original position.
    pub fn new(len: usize) -> Self {
        Self {
            slots: (0..len).collect(),
            position_of: (0..len).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Physical slot currently holding `original_index`.
    pub fn position_of(&self, original_index: usize) -> usize {
        self.position_of[original_index]
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    /// Removes the item at `from` and reinserts it at `to` of the shortened
    /// sequence. Items between the two slots shift by one towards `from`.
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from == to {
            return;
        }

        let item = self.slots.remove(from);
        self.slots.insert(to, item);

        let (lo, hi) = if from < to { (from, to) } else { (to, from) };
        for pos in lo..=hi {
            self.position_of[self.slots[pos]] = pos;
        }
    }
}

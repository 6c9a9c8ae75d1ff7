//! Forwarding Information Base entries.

use rust_wlb_common::name::Name;
use rust_wlb_common::types::FaceId;

/// A single candidate upstream for a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextHop {
    face: FaceId,
    cost: u8,
}

impl NextHop {
    pub fn new(face: FaceId, cost: u8) -> Self {
        Self { face, cost }
    }

    pub fn face(&self) -> FaceId {
        self.face
    }

    pub fn cost(&self) -> u8 {
        self.cost
    }
}

/// A FIB entry: a name prefix and its candidate upstream faces, kept in
/// ascending cost order.
#[derive(Debug, Clone)]
pub struct FibEntry {
    prefix: Name,
    next_hops: Vec<NextHop>,
}

impl FibEntry {
    pub fn new(prefix: Name) -> Self {
        Self {
            prefix,
            next_hops: Vec::new(),
        }
    }

    pub fn prefix(&self) -> &Name {
        &self.prefix
    }

    pub fn next_hops(&self) -> &[NextHop] {
        &self.next_hops
    }

    /// Adds or updates the next-hop for `face`.
    pub fn add_next_hop(&mut self, face: FaceId, cost: u8) {
        match self.next_hops.iter_mut().find(|hop| hop.face == face) {
            Some(hop) => hop.cost = cost,
            None => self.next_hops.push(NextHop::new(face, cost)),
        }
        self.next_hops.sort_by_key(|hop| (hop.cost, hop.face));
    }

    /// Removes the next-hop for `face`. Returns whether one was present.
    pub fn remove_next_hop(&mut self, face: FaceId) -> bool {
        let before = self.next_hops.len();
        self.next_hops.retain(|hop| hop.face != face);
        self.next_hops.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_hops_are_cost_ordered() {
        let mut entry = FibEntry::new(Name::from_string("/a").unwrap());
        entry.add_next_hop(FaceId(10), 5);
        entry.add_next_hop(FaceId(20), 1);
        entry.add_next_hop(FaceId(30), 3);

        let faces: Vec<u64> = entry.next_hops().iter().map(|h| h.face().0).collect();
        assert_eq!(faces, vec![20, 30, 10]);
    }

    #[test]
    fn adding_an_existing_face_updates_its_cost() {
        let mut entry = FibEntry::new(Name::from_string("/a").unwrap());
        entry.add_next_hop(FaceId(10), 5);
        entry.add_next_hop(FaceId(10), 1);
        assert_eq!(entry.next_hops().len(), 1);
        assert_eq!(entry.next_hops()[0].cost(), 1);
    }

    #[test]
    fn removal() {
        let mut entry = FibEntry::new(Name::from_string("/a").unwrap());
        entry.add_next_hop(FaceId(10), 0);
        assert!(entry.remove_next_hop(FaceId(10)));
        assert!(!entry.remove_next_hop(FaceId(10)));
        assert!(entry.next_hops().is_empty());
    }
}

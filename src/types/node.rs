use std::collections::HashMap;

/// Compact handle for an interned node name.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Arena of node names. Names are sorted before ids are assigned, so
/// `NodeId` order coincides with lexicographic name order and any
/// id-ordered traversal visits nodes in canonical order.
#[derive(Debug, Default, Clone)]
pub struct NodeTable {
    names: Vec<String>,
    index: HashMap<String, NodeId>,
}

impl NodeTable {
    pub fn new(names: impl IntoIterator<Item = String>) -> NodeTable {
        let mut names = names.into_iter().collect::<Vec<_>>();
        names.sort();
        names.dedup();
        let index = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), NodeId(i as u32)))
            .collect();
        NodeTable { names, index }
    }

    pub fn id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.names[id.index()]
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::NodeTable;

    #[test]
    fn ids_follow_name_order() {
        let table = NodeTable::new(["smelter", "assembler", "belt", "assembler"].map(String::from));
        assert_eq!(table.len(), 3);
        let a = table.id("assembler").unwrap();
        let b = table.id("belt").unwrap();
        let s = table.id("smelter").unwrap();
        assert!(a < b && b < s);
        assert_eq!(table.name(a), "assembler");
        assert_eq!(table.id("mall"), None);
    }
}

pub mod tree;

pub use tree::{NodeId, PackingTree, PlacementNode};

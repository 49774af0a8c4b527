use boxtree::{Envelope, RTree};

#[test]
fn round_trips_through_json() {
    let mut tree = RTree::new(4);
    for i in 0..12i64 {
        tree.insert(i, Envelope::new(i, 0, i + 1, 1));
    }

    let json = serde_json::to_string(&tree).expect("serializable");
    let restored: RTree<i64> = serde_json::from_str(&json).expect("deserializable");

    assert_eq!(restored.len(), tree.len());
    let mut original: Vec<_> = tree.all().into_iter().cloned().collect();
    let mut restored_all: Vec<_> = restored.all().into_iter().cloned().collect();
    original.sort();
    restored_all.sort();
    assert_eq!(original, restored_all);
}

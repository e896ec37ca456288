use tether::links;
use tether::*;

const EPS: f32 = 1e-4;

fn chain_of(kinds: &[ShapeKind]) -> Chain {
    let mut chain = Chain::new();
    for k in kinds {
        chain.append(*k);
    }
    chain
}

/// proposals sweeping far outside and inside the constraint radius
fn proposals() -> Vec<WSPoint> {
    let mut v = vec![];
    for i in -3..=3 {
        for j in -3..=3 {
            let (x, y) = (i as f32 * 1.7, j as f32 * 0.9);
            v.push(WSPoint::new(x, y, x * y * 0.25));
        }
    }
    v
}

#[test]
fn drag_sequences_keep_nodes_tethered() {
    let chain = chain_of(&[ShapeKind::Pyramid, ShapeKind::Digit, ShapeKind::Pyramid]);
    let solver = Solver::default();
    for p in proposals() {
        for i in 0..chain.len() {
            solver.apply(&chain, i, p).unwrap();
            if i > 0 {
                let d = (chain.position(i).unwrap() - chain.position(i - 1).unwrap()).length();
                assert!(d <= D_MAX + EPS, "node {} at distance {}", i, d);
            }
        }
    }
}

#[test]
fn predecessor_moves_are_not_retroactive() {
    let chain = chain_of(&[ShapeKind::Pyramid, ShapeKind::Digit]);
    let solver = Solver::default();
    solver.apply(&chain, 1, WSPoint::new(2.0, 0.0, 0.0));
    solver.apply(&chain, 0, WSPoint::new(-5.0, 0.0, 0.0));
    assert_eq!(chain.position(1), Some(WSPoint::new(2.0, 0.0, 0.0)));
}

#[test]
fn projection_is_exact() {
    let chain = chain_of(&[ShapeKind::Pyramid, ShapeKind::Digit]);
    let c = Solver::default()
        .apply(&chain, 1, WSPoint::new(4.0, 0.0, 0.0))
        .unwrap();
    assert_eq!(c.position, WSPoint::new(2.0, 0.0, 0.0));
}

#[test]
fn degenerate_drag_stays_put() {
    let mut chain = Chain::new();
    chain.append_at(ShapeKind::Digit, WSPoint::new(1.0, 1.0, 1.0));
    chain.append_at(ShapeKind::Digit, WSPoint::new(1.0, 1.0, 1.0));
    let c = Solver::default()
        .apply(&chain, 1, WSPoint::new(1.0, 1.0, 1.0))
        .unwrap();
    assert!(!c.clamped);
    assert_eq!(chain.position(1), Some(WSPoint::new(1.0, 1.0, 1.0)));
}

#[test]
fn truncation_keeps_prefix() {
    let mut chain = chain_of(&[ShapeKind::Pyramid; 5]);
    let handles: Vec<RcRPosition> = chain.iter().map(|n| n.position().clone()).collect();
    let removed = chain.truncate_from(2);
    assert_eq!(chain.len(), 2);
    assert_eq!(removed.len(), 3);
    assert_eq!(
        removed.iter().map(|n| n.index()).collect::<Vec<_>>(),
        vec![2, 3, 4]
    );
    for (i, n) in chain.iter().enumerate() {
        assert_eq!(n.index(), i);
        assert!(n.position().ptr_eq(&handles[i]));
    }
}

#[test]
fn link_count_tracks_chain_length() {
    let mut chain = Chain::new();
    for n in 0..6 {
        assert_eq!(links::derive(&chain).len(), n.max(1) - 1);
        chain.append(ShapeKind::Digit);
    }
}

#[test]
fn add_add_add_then_delete_middle() {
    let mut chain = Chain::new();
    chain.append(ShapeKind::Pyramid);
    chain.append(ShapeKind::Digit);
    chain.append(ShapeKind::Pyramid);
    assert_eq!(
        chain.kinds(),
        vec![ShapeKind::Pyramid, ShapeKind::Digit, ShapeKind::Pyramid]
    );
    assert_eq!(links::derive(&chain).len(), 2);

    chain.truncate_from(1);
    assert_eq!(chain.kinds(), vec![ShapeKind::Pyramid]);
    assert!(links::derive(&chain).is_empty());
}

#[test]
fn bindings_follow_truncation() {
    let mut chain = chain_of(&[ShapeKind::Digit; 4]);
    let registry = DragBindings::new();
    let mut mounted: Vec<DragBinding> = chain.iter().map(|n| registry.acquire(n.index())).collect();
    assert_eq!(registry.len(), 4);

    let removed = chain.truncate_from(1);
    mounted.truncate(chain.len());
    assert_eq!(removed.len(), 3);
    assert_eq!(registry.len(), 1);
    assert!(registry.is_bound(0));
}

#[cfg(feature = "serde")]
#[test]
fn shape_kinds_use_lowercase_names() {
    let kinds: Vec<ShapeKind> = serde_json::from_str(r#"["pyramid", "digit"]"#).unwrap();
    assert_eq!(kinds, ShapeKind::ALL.to_vec());
    assert_eq!(
        serde_json::to_string(&ShapeKind::Digit).unwrap(),
        "\"digit\""
    );
}

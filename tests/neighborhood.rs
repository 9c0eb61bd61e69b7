use kyori::{Hand, HandError, NeighborSearch, SearchConfig, Tile};

fn t(s: &str) -> Tile {
    s.parse().unwrap()
}

#[test]
fn walk_to_a_neighbor_and_back() {
    let start: Hand = "1c 2c 3c 4c 5c 6c 7d 8d 9d 2b 3b 4b east east".parse().unwrap();
    let target = start
        .draw_discard(t("5b"), t("east"))
        .unwrap()
        .draw_discard(t("6b"), t("east"))
        .unwrap();
    assert_eq!(start.distance(&target), 2);
    assert_eq!(start.diff(&target).to_string(), "Draw: 5b 6b / Discard: east east");

    let search = NeighborSearch::new(SearchConfig::from_json(r#"{"parallel": false}"#).unwrap());
    let near = search.neighbors(&start, 2).unwrap();
    assert_eq!(near.depth_of(&target), Some(2));
    assert!(near.at_depth(2).contains(&target));
    assert!(!near.contains(&start));

    let back = target
        .draw_discard(t("east"), t("5b"))
        .unwrap()
        .draw_discard(t("east"), t("6b"))
        .unwrap();
    assert_eq!(back, start);
}

#[test]
fn rebuilt_neighbors_are_valid_hands() {
    let start: Hand = "1c 1c 1c 1c 9c 9c 9c 9c white white white white red".parse().unwrap();
    let near = start.neighbors(1).unwrap();
    assert!(!near.is_empty());
    for hand in &near {
        assert_eq!(hand.len(), 13);
        let again = Hand::from_grid(hand.grid()).unwrap();
        assert_eq!(&again, hand);
        assert_eq!(again.to_string().parse::<Hand>().unwrap(), again);
    }
    let bad = Hand::from_strs(["1c"; 5]).unwrap_err();
    assert_eq!(bad, HandError::InvalidHandSize(5));
}

use sprite_atlas_core::SortOrder;
use sprite_atlas_core::ordering::sort_batch;

fn keys(items: &[(&'static str, u32, u32)]) -> Vec<&'static str> {
    items.iter().map(|(k, _, _)| *k).collect()
}

#[test]
fn height_desc_keeps_input_order_for_ties() {
    let mut items = vec![("a", 5, 3), ("b", 9, 7), ("c", 1, 3), ("d", 2, 7), ("e", 4, 1)];
    sort_batch(&mut items, SortOrder::HeightDesc, |(_, w, h)| (*w, *h));
    assert_eq!(keys(&items), vec!["b", "d", "a", "c", "e"]);
}

#[test]
fn area_desc_and_max_side_desc() {
    let base = vec![("a", 2, 8), ("b", 4, 4), ("c", 10, 1), ("d", 3, 3)];

    let mut by_area = base.clone();
    sort_batch(&mut by_area, SortOrder::AreaDesc, |(_, w, h)| (*w, *h));
    assert_eq!(keys(&by_area), vec!["a", "b", "c", "d"]);

    let mut by_side = base.clone();
    sort_batch(&mut by_side, SortOrder::MaxSideDesc, |(_, w, h)| (*w, *h));
    assert_eq!(keys(&by_side), vec!["c", "a", "b", "d"]);

    let mut untouched = base.clone();
    sort_batch(&mut untouched, SortOrder::None, |(_, w, h)| (*w, *h));
    assert_eq!(untouched, base);
}

#[test]
fn sort_order_parses_from_cli_names() {
    assert_eq!("height_desc".parse::<SortOrder>(), Ok(SortOrder::HeightDesc));
    assert_eq!("area_desc".parse::<SortOrder>(), Ok(SortOrder::AreaDesc));
    assert_eq!("none".parse::<SortOrder>(), Ok(SortOrder::None));
    assert!("sideways".parse::<SortOrder>().is_err());
}

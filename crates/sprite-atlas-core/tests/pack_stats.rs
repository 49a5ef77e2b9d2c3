use sprite_atlas_core::prelude::*;

#[test]
fn test_pack_stats_basic() {
    let cfg = AtlasConfig::builder().side(256).padding(0).build();

    let inputs = (0..4)
        .map(|i| InputImage::new(format!("tex_{i}"), PixelBuffer::new(64, 64)))
        .collect();

    let atlas = pack_images(inputs, cfg).expect("packing should succeed");
    let stats = atlas.stats();

    assert_eq!(stats.num_placements, 4);
    assert_eq!(stats.used_area, 4 * 64 * 64);
    assert_eq!(stats.total_area, 256 * 256);
    assert!((stats.occupancy - 0.25).abs() < 1e-9, "Occupancy: {}", stats.occupancy);
    assert_eq!(stats.num_rotated, 0);
    assert_eq!(stats.wasted_area(), 256 * 256 - 4 * 64 * 64);
    assert!((stats.waste_percentage() - 75.0).abs() < 1e-9);
}

#[test]
fn test_pack_stats_counts_rotations() {
    let cfg = AtlasConfig::builder()
        .side(16)
        .padding(2)
        .sort_order(SortOrder::None)
        .build();
    let inputs = vec![
        InputImage::new("a", PixelBuffer::new(16, 8)),
        InputImage::new("b", PixelBuffer::new(4, 10)),
    ];
    let atlas = pack_images(inputs, cfg).expect("pack");
    let stats = atlas.stats();
    assert_eq!(stats.num_placements, 2);
    assert_eq!(stats.num_rotated, 1);
    assert_eq!(stats.used_area, 16 * 8 + 4 * 10);
}

#[test]
fn test_stats_summary_format() {
    let cfg = AtlasConfig::builder().side(10).padding(0).build();
    let atlas = pack_images(vec![InputImage::new("one", PixelBuffer::new(5, 10))], cfg).unwrap();
    let summary = atlas.stats().summary();
    assert!(summary.contains("Images: 1"));
    assert!(summary.contains("Occupancy: 50.00%"));
    assert!(summary.contains("Total Area: 100"));
}

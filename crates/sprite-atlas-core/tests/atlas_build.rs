use sprite_atlas_core::buffer::PixelBuffer;
use sprite_atlas_core::builder::{AtlasBuilder, InputImage};
use sprite_atlas_core::config::AtlasConfig;
use sprite_atlas_core::error::AtlasError;
use sprite_atlas_core::model::Rect;
use sprite_atlas_core::pack_images;

fn solid(key: &str, w: u32, h: u32, rgba: [u8; 4]) -> InputImage {
    InputImage::new(key, PixelBuffer::filled(w, h, rgba))
}

#[test]
fn image_equal_to_side_packs_at_origin() {
    let cfg = AtlasConfig::builder().side(16).padding(2).build();
    let atlas = pack_images(vec![solid("full", 16, 16, [1, 2, 3, 255])], cfg).expect("pack");
    let p = atlas.lookup("full").unwrap();
    assert_eq!(p.frame, Rect::new(0, 0, 16, 16));
    assert!(!p.rotated);
    assert!(atlas.pixels().rows().all(|row| row.chunks(4).all(|px| px == [1, 2, 3, 255])));
}

#[test]
fn too_large_image_leaves_atlas_untouched() {
    let cfg = AtlasConfig::builder().side(16).padding(2).build();
    let mut builder = AtlasBuilder::new(cfg).unwrap();
    builder.place(solid("small", 4, 4, [255, 0, 0, 255])).expect("fits");
    let pixels_before = builder.canvas().clone();
    let nodes_before = builder.tree().node_count();

    let err = builder
        .place(solid("huge", 20, 17, [0, 255, 0, 255]))
        .unwrap_err();
    assert!(matches!(err, AtlasError::ImageTooLarge { ref key, .. } if key == "huge"));
    assert_eq!(builder.canvas(), &pixels_before);
    assert_eq!(builder.tree().node_count(), nodes_before);
    assert_eq!(builder.placements().len(), 1);
}

#[test]
fn batch_failure_names_the_key_and_publishes_nothing() {
    let cfg = AtlasConfig::builder().side(32).build();
    let inputs = vec![
        solid("ok", 8, 8, [255, 255, 255, 255]),
        solid("wide", 40, 4, [0, 0, 0, 255]),
    ];
    match pack_images(inputs, cfg) {
        Err(AtlasError::ImageTooLarge { key, width, height, side }) => {
            assert_eq!(key, "wide");
            assert_eq!((width, height, side), (40, 4, 32));
        }
        Err(other) => panic!("unexpected error {other:?}"),
        Ok(_) => panic!("batch should fail"),
    }
}

#[test]
fn unknown_key_is_absent_not_an_error() {
    let cfg = AtlasConfig::builder().side(32).build();
    let atlas = pack_images(vec![solid("a", 8, 8, [1, 1, 1, 255])], cfg).unwrap();
    assert!(atlas.lookup("missing").is_none());
    assert!(atlas.extract("missing").is_none());
    // Exact match only.
    assert!(atlas.extract("A").is_none());
    assert!(matches!(
        atlas.try_extract("missing"),
        Err(AtlasError::UnknownIdentifier(k)) if k == "missing"
    ));
}

#[test]
fn extract_is_repeatable_and_does_not_disturb_lookup() {
    let cfg = AtlasConfig::builder().side(64).build();
    let inputs = vec![
        solid("red", 10, 20, [255, 0, 0, 255]),
        solid("blue", 30, 5, [0, 0, 255, 128]),
    ];
    let atlas = pack_images(inputs, cfg).unwrap();
    let before = atlas.lookup("blue").cloned();
    let first = atlas.extract("blue").unwrap();
    let second = atlas.extract("blue").unwrap();
    assert_eq!(first, second);
    assert_eq!(atlas.lookup("blue").cloned(), before);
    assert_eq!(first, PixelBuffer::filled(30, 5, [0, 0, 255, 128]));
}

#[test]
fn composed_pixels_overwrite_background_only_inside_frames() {
    let bg = [9, 8, 7, 6];
    let cfg = AtlasConfig::builder().side(32).padding(2).background(bg).build();
    let inputs = vec![
        solid("a", 10, 12, [255, 0, 0, 0]),
        solid("b", 6, 6, [0, 255, 0, 255]),
    ];
    let atlas = pack_images(inputs, cfg).unwrap();
    let frames: Vec<(Rect, [u8; 4])> = ["a", "b"]
        .iter()
        .map(|k| {
            let p = atlas.lookup(k).unwrap();
            let colour = if *k == "a" { [255, 0, 0, 0] } else { [0, 255, 0, 255] };
            (p.frame, colour)
        })
        .collect();
    for y in 0..32 {
        for x in 0..32 {
            let expected = frames
                .iter()
                .find(|(r, _)| r.contains(&Rect::new(x, y, 1, 1)))
                .map(|(_, c)| *c)
                .unwrap_or(bg);
            assert_eq!(atlas.pixels().get(x, y), Some(expected), "pixel ({x},{y})");
        }
    }
}

#[test]
fn tallest_image_is_placed_first() {
    let cfg = AtlasConfig::builder().side(64).padding(2).build();
    let inputs = vec![
        solid("short", 20, 5, [1, 1, 1, 255]),
        solid("tall", 5, 30, [2, 2, 2, 255]),
        solid("mid", 8, 10, [3, 3, 3, 255]),
    ];
    let atlas = pack_images(inputs, cfg).unwrap();
    let order: Vec<&str> = atlas.placements().iter().map(|p| p.key.as_str()).collect();
    assert_eq!(order, vec!["tall", "mid", "short"]);
    assert_eq!(atlas.lookup("tall").unwrap().frame, Rect::new(0, 0, 5, 30));
}

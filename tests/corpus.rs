//! Test corpus: roundtrip and transform tests over patterns and sizes.

use bmpfx::*;
use enough::Unstoppable;

fn checkerboard(w: u32, h: u32) -> PixelGrid {
    PixelGrid::from_fn(w, h, |y, x| {
        if (x + y) % 2 == 0 {
            [200, 220, 240]
        } else {
            [10, 40, 70]
        }
    })
    .unwrap()
}

fn noise_pattern(w: u32, h: u32) -> PixelGrid {
    let mut state: u32 = 0xDEAD_BEEF;
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    };
    PixelGrid::from_fn(w, h, |_, _| [next(), next(), next()]).unwrap()
}

fn gradient(w: u32, h: u32) -> PixelGrid {
    PixelGrid::from_fn(w, h, |y, x| {
        [
            (x * 255 / w.max(1)) as u8,
            (y * 255 / h.max(1)) as u8,
            ((x + y) * 127 / (w + h).max(1)) as u8,
        ]
    })
    .unwrap()
}

// ── BMP roundtrips ───────────────────────────────────────────────────

#[test]
fn roundtrip_every_padding_remainder() {
    // widths 1..=5 cover padding of 1, 2, 3, 0 and 1 bytes
    for w in 1..=5 {
        for h in [1, 2, 7] {
            for grid in [checkerboard(w, h), noise_pattern(w, h), gradient(w, h)] {
                let encoded = encode_bmp(&grid, Unstoppable).unwrap();
                let stride = (w as usize * 3).div_ceil(4) * 4;
                assert_eq!(encoded.len(), 54 + stride * h as usize, "{w}x{h}");
                let decoded = decode_bmp(&encoded, Unstoppable).unwrap();
                assert_eq!(decoded, grid, "{w}x{h}");
            }
        }
    }
}

#[test]
fn roundtrip_is_byte_stable() {
    let grid = noise_pattern(13, 9);
    let first = encode_bmp(&grid, Unstoppable).unwrap();
    let second = encode_bmp(&decode_bmp(&first, Unstoppable).unwrap(), Unstoppable).unwrap();
    assert_eq!(first, second);
}

#[test]
fn strict_accepts_own_output() {
    let encoded = encode_bmp(&gradient(6, 4), Unstoppable).unwrap();
    let grid = DecodeRequest::new(&encoded)
        .with_permissiveness(BmpPermissiveness::Strict)
        .decode(Unstoppable)
        .unwrap();
    assert_eq!(grid, gradient(6, 4));
}

#[test]
fn strict_rejects_trailing_bytes_standard_ignores_them() {
    let mut encoded = encode_bmp(&checkerboard(3, 3), Unstoppable).unwrap();
    encoded.extend_from_slice(&[0; 8]);
    assert!(DecodeRequest::new(&encoded).decode(Unstoppable).is_ok());
    assert!(matches!(
        DecodeRequest::new(&encoded)
            .with_permissiveness(BmpPermissiveness::Strict)
            .decode(Unstoppable),
        Err(BitmapError::InvalidHeader(_))
    ));
}

// ── Transform properties ─────────────────────────────────────────────

#[test]
fn four_rotations_are_identity() {
    for (w, h) in [(1, 1), (3, 2), (5, 7)] {
        let grid = noise_pattern(w, h);
        let mut out = grid.clone();
        for _ in 0..4 {
            out = Transform::Rotate90.apply(&out, Unstoppable).unwrap();
        }
        assert_eq!(out, grid);
        assert_eq!(
            Transform::Rotate { turns: 4 }.apply(&grid, Unstoppable).unwrap(),
            grid
        );
    }
}

#[test]
fn rotation_swaps_dimensions() {
    let grid = gradient(5, 3);
    let out = Transform::Rotate90.apply(&grid, Unstoppable).unwrap();
    assert_eq!((out.width(), out.height()), (3, 5));
    let back = Transform::Rotate { turns: -1 }.apply(&out, Unstoppable).unwrap();
    assert_eq!(back, grid);
}

#[test]
fn enlarge_subsamples_back_to_source() {
    let grid = noise_pattern(4, 3);
    let big = Transform::Enlarge {
        x_scale: 3,
        y_scale: 2,
    }
    .apply(&grid, Unstoppable)
    .unwrap();
    assert_eq!((big.width(), big.height()), (12, 6));
    for r in 0..big.height() {
        for c in 0..big.width() {
            assert_eq!(big.pixel(r, c), grid.pixel(r / 2, c / 3));
        }
    }
}

#[test]
fn tone_transforms_keep_dimensions() {
    let grid = noise_pattern(7, 5);
    for t in [
        Transform::Vignette,
        Transform::Clarendon,
        Transform::Grayscale,
        Transform::HighContrast,
        Transform::Lighten { factor: 0.25 },
        Transform::Darken { factor: 0.25 },
        Transform::Posterize,
    ] {
        let out = t.apply(&grid, Unstoppable).unwrap();
        assert_eq!((out.width(), out.height()), (7, 5), "{t}");
    }
}

#[test]
fn high_contrast_and_posterize_use_small_palettes() {
    let grid = noise_pattern(9, 9);
    let hc = Transform::HighContrast.apply(&grid, Unstoppable).unwrap();
    assert!(hc.pixels().all(|p| p == BLACK || p == WHITE));

    let palette = [BLACK, WHITE, [0, 0, 255], [0, 255, 0], [255, 0, 0]];
    let post = Transform::Posterize.apply(&grid, Unstoppable).unwrap();
    assert!(post.pixels().all(|p| palette.contains(&p)));
}

#[test]
fn lighten_and_darken_move_monotonically() {
    let grid = gradient(8, 8);
    let light = Transform::Lighten { factor: 0.5 }.apply(&grid, Unstoppable).unwrap();
    let dark = Transform::Darken { factor: 0.5 }.apply(&grid, Unstoppable).unwrap();
    for ((src, l), d) in grid.pixels().zip(light.pixels()).zip(dark.pixels()) {
        for c in 0..3 {
            assert!(l[c] >= src[c]);
            assert!(d[c] <= src[c]);
        }
    }
}

#[test]
fn transforms_accept_empty_grids() {
    let empty = PixelGrid::new(0, 0).unwrap();
    for t in Transform::CATALOG {
        let out = t.apply(&empty, Unstoppable).unwrap();
        assert!(out.is_empty(), "{t}");
    }
}

#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: u32, height: u32, offset: u32, pixels: &[u8]) -> Vec<u8> {
    let file_size = offset as usize + pixels.len();
    let mut bmp = vec![0u8; offset as usize];
    bmp[0] = b'B'; bmp[1] = b'M';
    bmp[2..6].copy_from_slice(&(file_size as u32).to_le_bytes()); // file size
    bmp[10..14].copy_from_slice(&offset.to_le_bytes()); // data offset
    bmp[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    bmp[18..22].copy_from_slice(&width.to_le_bytes());
    bmp[22..26].copy_from_slice(&height.to_le_bytes());
    bmp[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    bmp[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    bmp[38..42].copy_from_slice(&2835u32.to_le_bytes());
    bmp[42..46].copy_from_slice(&2835u32.to_le_bytes());
    bmp.extend_from_slice(pixels);
    bmp
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_roundtrip"] {
        fs::create_dir_all(dir).unwrap();

        // 1x1: 3 pixel bytes + 1 padding
        fs::write(format!("{dir}/bmp_1x1.bmp"), bmp(1, 1, 54, &[0xff, 0x00, 0x00, 0])).unwrap();

        // 2x2: 6 pixel bytes + 2 padding per row
        let px = [1, 2, 3, 4, 5, 6, 0, 0, 7, 8, 9, 10, 11, 12, 0, 0];
        fs::write(format!("{dir}/bmp_2x2.bmp"), bmp(2, 2, 54, &px)).unwrap();

        // 4x1: no padding
        fs::write(format!("{dir}/bmp_4x1.bmp"), bmp(4, 1, 54, &[0x80; 12])).unwrap();

        // Gap between headers and pixels
        fs::write(format!("{dir}/bmp_offset.bmp"), bmp(1, 2, 60, &[9; 8])).unwrap();

        // 0x0
        fs::write(format!("{dir}/bmp_empty.bmp"), bmp(0, 0, 54, &[])).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
        let mut bad_size = bmp(2, 2, 54, &px);
        bad_size[2] ^= 1;
        fs::write(format!("{dir}/bmp_bad_size.bin"), bad_size).unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}

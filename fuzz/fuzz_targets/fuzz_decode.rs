#![no_main]
use bmpfx::{BmpInfo, BmpPermissiveness, DecodeRequest, Limits};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Header parse and both decode modes must never panic
    let _ = BmpInfo::from_bytes(data);
    let _ = bmpfx::decode_bmp(data, enough::Unstoppable);

    let limits = Limits {
        max_pixels: Some(1 << 20),
        ..Default::default()
    };
    let _ = DecodeRequest::new(data)
        .with_limits(&limits)
        .with_permissiveness(BmpPermissiveness::Strict)
        .decode(enough::Unstoppable);
});

#![no_main]
use bmpfx::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_pixels: Some(1 << 16),
        ..Default::default()
    };
    let Ok(decoded) = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable)
    else {
        return;
    };

    // Re-encoding and decoding again must produce identical pixels
    let reencoded = encode_bmp(&decoded, enough::Unstoppable).expect("encode of decoded grid");
    let decoded2 = decode_bmp(&reencoded, enough::Unstoppable).expect("re-encoded data failed to decode");
    assert_eq!(decoded, decoded2, "roundtrip pixel mismatch");

    // Every catalog transform must succeed on a decoded grid
    for t in Transform::CATALOG {
        let out = t
            .apply_with_limits(&decoded, Some(&limits), enough::Unstoppable)
            .or_else(|e| match e {
                BitmapError::LimitExceeded(_) => Ok(decoded.clone()),
                e => Err(e),
            })
            .expect("transform failed");
        let _ = encode_bmp(&out, enough::Unstoppable).expect("encode transformed grid");
    }
});

#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Lenient decode, strict image decode and the header probe must never panic
    let _ = zenilbm::decode(data, enough::Unstoppable);
    let _ = zenilbm::decode_image(data, enough::Unstoppable);
    let _ = zenilbm::ImageInfo::from_bytes(data);

    let limits = zenilbm::Limits::with_max_pixels(1 << 20);
    let _ = zenilbm::DecodeRequest::new(data)
        .with_limits(&limits)
        .with_transparency(true)
        .decode(enough::Unstoppable);
});

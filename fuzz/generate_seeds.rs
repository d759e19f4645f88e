#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn chunk(id: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut out = id.to_vec();
    out.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    out.extend_from_slice(payload);
    if payload.len() % 2 == 1 {
        out.push(0);
    }
    out
}

fn form(kind: &[u8; 4], chunks: &[Vec<u8>]) -> Vec<u8> {
    let body = chunks.concat();
    let mut out = b"FORM".to_vec();
    out.extend_from_slice(&((body.len() + 4) as u32).to_be_bytes());
    out.extend_from_slice(kind);
    out.extend_from_slice(&body);
    out
}

fn bmhd(width: u16, height: u16, planes: u8, masking: u8, compression: u8) -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(&width.to_be_bytes());
    p.extend_from_slice(&height.to_be_bytes());
    p.extend_from_slice(&[0, 0, 0, 0, planes, masking, compression, 0, 0, 0, 1, 1]);
    p.extend_from_slice(&(width as i16).to_be_bytes());
    p.extend_from_slice(&(height as i16).to_be_bytes());
    chunk(b"BMHD", &p)
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let grey: Vec<u8> = (0..64u8).flat_map(|i| [i * 4, i * 4, i * 4]).collect();

    // 8x1 two-colour, uncompressed
    let bw = form(b"ILBM", &[
        bmhd(8, 1, 1, 0, 0),
        chunk(b"CMAP", &[0, 0, 0, 255, 255, 255]),
        chunk(b"BODY", &[0xC0, 0x00]),
    ]);
    fs::write(format!("{dir}/bw_8x1.ilbm"), bw).unwrap();

    // 16x2 ByteRun1 with a colour range
    let rle = form(b"ILBM", &[
        bmhd(16, 2, 1, 0, 1),
        chunk(b"CMAP", &grey[..6]),
        chunk(b"CRNG", &[0, 0, 0x40, 0, 0, 1, 0, 1]),
        chunk(b"BODY", &[0xFF, 0xAA, 0x01, 0x0F, 0xF0]),
    ]);
    fs::write(format!("{dir}/rle_16x2.ilbm"), rle).unwrap();

    // HAM6 with an oversized palette
    let ham = form(b"ILBM", &[
        bmhd(16, 1, 6, 0, 1),
        chunk(b"CMAP", &grey),
        chunk(b"CAMG", &0x800u32.to_be_bytes()),
        chunk(b"BODY", &[0xF5, 0x5A]),
    ]);
    fs::write(format!("{dir}/ham6_16x1.ilbm"), ham).unwrap();

    // EHB, mask plane
    let ehb = form(b"ILBM", &[
        bmhd(16, 1, 6, 1, 0),
        chunk(b"CMAP", &grey[..96]),
        chunk(b"CAMG", &0x80u32.to_be_bytes()),
        chunk(b"BODY", &[0x81; 14]),
    ]);
    fs::write(format!("{dir}/ehb_mask_16x1.ilbm"), ehb).unwrap();

    // Deep 24-plane 1x1
    let deep = form(b"ILBM", &[bmhd(1, 1, 24, 0, 0), chunk(b"BODY", &[0x80; 48])]);
    fs::write(format!("{dir}/deep24_1x1.ilbm"), deep).unwrap();

    // PBM 3x1
    let pbm = form(b"PBM ", &[
        bmhd(3, 1, 8, 0, 0),
        chunk(b"CMAP", &grey[..12]),
        chunk(b"BODY", &[1, 2, 3, 0]),
    ]);
    fs::write(format!("{dir}/pbm_3x1.lbm"), pbm).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_form.bin"), b"FORM\0\0\0\x04ILBM").unwrap();
    let overlong = b"FORM\0\0\0\x10ILBMBMHD\xff\xff\xff\xff";
    fs::write(format!("{dir}/overlong_chunk.bin"), overlong).unwrap();
    fs::write(format!("{dir}/reserved_opcode.bin"), form(b"ILBM", &[
        bmhd(8, 1, 1, 0, 1),
        chunk(b"CMAP", &grey[..6]),
        chunk(b"BODY", &[0x80, 0x00]),
    ])).unwrap();

    println!("Generated seed corpus in {dir}/");
}

//! ByteRun1 (packbits) decompression.

use alloc::vec;
use alloc::vec::Vec;

use enough::Stop;

use crate::error::IlbmError;

/// Control bytes processed between cancellation checks.
const STOP_INTERVAL: usize = 4096;

/// Unpack ByteRun1 data into `out`, returning how many bytes were written.
///
/// Decoding ends when `out` is full or `input` is exhausted, whichever comes
/// first; bytes of `out` not reached keep their previous value. Runs that
/// would overflow `out` are clipped. The reserved control byte `-128` is an
/// error.
pub fn unpack_byterun1_into(
    input: &[u8],
    out: &mut [u8],
    stop: &dyn Stop,
) -> Result<usize, IlbmError> {
    let mut src = 0usize;
    let mut dst = 0usize;
    let mut ops = 0usize;

    while dst < out.len() && src < input.len() {
        ops += 1;
        if ops % STOP_INTERVAL == 0 {
            stop.check()?;
        }

        let control = input[src] as i8;
        src += 1;
        match control {
            0..=127 => {
                let want = control as usize + 1;
                let n = want.min(out.len() - dst).min(input.len() - src);
                out[dst..dst + n].copy_from_slice(&input[src..src + n]);
                src += want.min(input.len() - src);
                dst += n;
            }
            -127..=-1 => {
                let Some(&value) = input.get(src) else {
                    break;
                };
                src += 1;
                let n = (1 - control as isize) as usize;
                let n = n.min(out.len() - dst);
                out[dst..dst + n].fill(value);
                dst += n;
            }
            -128 => return Err(IlbmError::ReservedOpcode { offset: src - 1 }),
        }
    }

    Ok(dst)
}

/// Unpack ByteRun1 data into a fresh zero-filled buffer of `out_len` bytes.
pub fn unpack_byterun1(
    input: &[u8],
    out_len: usize,
    stop: &dyn Stop,
) -> Result<Vec<u8>, IlbmError> {
    let mut out = vec![0u8; out_len];
    let written = unpack_byterun1_into(input, &mut out, stop)?;
    if written < out_len {
        tracing::debug!(written, out_len, "ByteRun1 input exhausted before output was full");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use enough::Unstoppable;

    #[test]
    fn literal_run() {
        let out = unpack_byterun1(&[0x02, 0xAA, 0xBB, 0xCC], 3, &Unstoppable).unwrap();
        assert_eq!(out, [0xAA, 0xBB, 0xCC]);
    }

    #[test]
    fn replicate_run() {
        let out = unpack_byterun1(&[0xFE, 0x11], 3, &Unstoppable).unwrap();
        assert_eq!(out, [0x11, 0x11, 0x11]);
    }

    #[test]
    fn mixed_runs_fill_in_order() {
        let input = [0x01, 1, 2, 0xFD, 9, 0x00, 7];
        let out = unpack_byterun1(&input, 7, &Unstoppable).unwrap();
        assert_eq!(out, [1, 2, 9, 9, 9, 9, 7]);
    }

    #[test]
    fn stops_when_output_is_full() {
        // The trailing -128 is never reached.
        let input = [0x81, 5, 0x80];
        let out = unpack_byterun1(&input, 4, &Unstoppable).unwrap();
        assert_eq!(out, [5, 5, 5, 5]);
    }

    #[test]
    fn short_input_leaves_zeroes() {
        let out = unpack_byterun1(&[0x01, 3], 4, &Unstoppable).unwrap();
        assert_eq!(out, [3, 0, 0, 0]);
        let out = unpack_byterun1(&[0xFF], 2, &Unstoppable).unwrap();
        assert_eq!(out, [0, 0]);
    }

    #[test]
    fn reserved_control_byte_is_an_error() {
        let err = unpack_byterun1(&[0x00, 1, 0x80, 0x00, 2], 4, &Unstoppable).unwrap_err();
        assert!(matches!(err, IlbmError::ReservedOpcode { offset: 2 }));
    }
}

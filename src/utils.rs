use std::io::Read;

use crate::error::{ArithmeticError, ArithmeticResult};

/// The greatest common divisor of two signed integers, which is always non-negative.
/// It does not fit in an `i64` only if both arguments are `i64::MIN`.
pub fn gcd_signed(mut a: i64, mut b: i64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        // only wraps when i64::MIN % -1 and that still yields 0
        a = b.wrapping_rem(a);
        b = c;
    }
    b.unsigned_abs()
}

/// Read exactly `len` bytes of `what` from `source`. The length is not trusted:
/// the buffer only grows with the data that is actually there.
pub(crate) fn read_bytes<R: Read>(source: &mut R, len: u64, what: &str) -> ArithmeticResult<Vec<u8>> {
    let mut data = Vec::with_capacity(len.min(1 << 16) as usize);
    let read = source.take(len).read_to_end(&mut data)?;
    if read as u64 != len {
        return Err(ArithmeticError::Malformed(format!(
            "expected {} bytes of {}, found {}",
            len, what, read
        )));
    }
    Ok(data)
}

#[cfg(test)]
mod test {
    use crate::error::ArithmeticError;

    use super::{gcd_signed, read_bytes};

    #[test]
    fn gcd() {
        assert_eq!(gcd_signed(-12, 18), 6);
        assert_eq!(gcd_signed(0, -7), 7);
        assert_eq!(gcd_signed(i64::MIN, -1), 1);
        assert_eq!(gcd_signed(i64::MIN, i64::MIN), 1 << 63);
    }

    #[test]
    fn length_prefixed() {
        let data = [1u8, 2, 3];
        assert_eq!(read_bytes(&mut &data[..], 2, "data").unwrap(), vec![1, 2]);
        assert!(matches!(
            read_bytes(&mut &data[..], u64::MAX, "data"),
            Err(ArithmeticError::Malformed(_))
        ));
    }
}

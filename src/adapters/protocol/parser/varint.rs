use bytes::{Buf, BufMut};

use crate::application::error::ApplicationError;

/// A 32-bit value never needs more than five 7-bit groups.
pub const MAX_VARINT_BYTES: usize = 5;

pub trait PutVarint {
    fn put_uvarint(&mut self, num: u32);
    fn put_varint(&mut self, num: i32);
}

impl<B: BufMut + ?Sized> PutVarint for B {
    fn put_uvarint(&mut self, mut num: u32) {
        while (num & !0x7F) != 0 {
            self.put_u8(((num & 0x7F) | 0x80) as u8);
            num >>= 7;
        }
        self.put_u8(num as u8);
    }

    fn put_varint(&mut self, num: i32) {
        self.put_uvarint(zigzag_encode(num));
    }
}

pub fn zigzag_encode(num: i32) -> u32 {
    ((num << 1) ^ (num >> 31)) as u32
}

pub fn zigzag_decode(raw: u32) -> i32 {
    ((raw >> 1) as i32) ^ -((raw & 1) as i32)
}

/// Number of bytes `put_uvarint` emits for `num`.
pub fn size_of_unsigned_varint(mut num: u32) -> usize {
    let mut bytes = 1;
    while (num & !0x7F) != 0 {
        bytes += 1;
        num >>= 7;
    }
    bytes
}

pub fn size_of_signed_varint(num: i32) -> usize {
    size_of_unsigned_varint(zigzag_encode(num))
}

pub fn decode_unsigned_varint<B: Buf>(buf: &mut B) -> Result<u32, ApplicationError> {
    let mut result: u32 = 0;

    for n in 0..MAX_VARINT_BYTES {
        if !buf.has_remaining() {
            return Err(ApplicationError::TruncatedFrame {
                needed: 1,
                available: 0,
            });
        }
        let byte = buf.get_u8();

        // the fifth group may only carry the top four bits of a u32
        if n == MAX_VARINT_BYTES - 1 && byte > 0x0F {
            return Err(ApplicationError::MalformedVarint { bytes_read: n + 1 });
        }

        result |= ((byte & 0x7F) as u32) << (7 * n);
        if byte & 0x80 == 0 {
            return Ok(result);
        }
    }

    Err(ApplicationError::MalformedVarint {
        bytes_read: MAX_VARINT_BYTES,
    })
}

pub fn decode_signed_varint<B: Buf>(buf: &mut B) -> Result<i32, ApplicationError> {
    decode_unsigned_varint(buf).map(zigzag_decode)
}

/// Compact arrays and strings store `len + 1`, with 0 reserved for null.
pub fn compact_length(len: Option<usize>) -> u32 {
    match len {
        Some(len) => len as u32 + 1,
        None => 0,
    }
}

pub fn decode_compact_length(raw: u32) -> Option<usize> {
    raw.checked_sub(1).map(|len| len as usize)
}

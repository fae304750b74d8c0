use bytes::BufMut;
use uuid::Uuid;

use super::varint::{compact_length, size_of_unsigned_varint, PutVarint};
use crate::adapters::protocol::constants::EMPTY_TAG_BUFFER;

pub const UUID_SIZE: usize = 16;

/// Size of an empty tagged-field section.
pub const TAG_BUFFER_SIZE: usize = 1;

/// Write side of the primitive codec. Each `put_*` has a matching `size_of_*`
/// below and the two must agree byte for byte.
pub trait PutPrimitive: BufMut {
    fn put_compact_array_len(&mut self, len: Option<usize>) {
        self.put_uvarint(compact_length(len));
    }

    fn put_compact_string(&mut self, s: &str) {
        self.put_compact_array_len(Some(s.len()));
        self.put_slice(s.as_bytes());
    }

    fn put_nullable_string(&mut self, s: Option<&str>) {
        match s {
            Some(s) => {
                self.put_i16(s.len() as i16);
                self.put_slice(s.as_bytes());
            }
            None => self.put_i16(-1),
        }
    }

    /// Compact in flexible versions, i16-prefixed otherwise.
    fn put_string(&mut self, s: &str, flexible: bool) {
        if flexible {
            self.put_compact_string(s);
        } else {
            self.put_nullable_string(Some(s));
        }
    }

    fn put_uuid(&mut self, id: &Uuid) {
        self.put_slice(id.as_bytes());
    }

    fn put_tag_buffer(&mut self) {
        self.put_u8(EMPTY_TAG_BUFFER);
    }

    fn put_compact_i32_array(&mut self, items: &[i32]) {
        self.put_compact_array_len(Some(items.len()));
        for item in items {
            self.put_i32(*item);
        }
    }
}

impl<B: BufMut> PutPrimitive for B {}

pub fn size_of_compact_array_len(len: Option<usize>) -> usize {
    size_of_unsigned_varint(compact_length(len))
}

pub fn size_of_string(s: &str, flexible: bool) -> usize {
    if flexible {
        size_of_compact_array_len(Some(s.len())) + s.len()
    } else {
        2 + s.len()
    }
}

pub fn size_of_compact_i32_array(items: &[i32]) -> usize {
    size_of_compact_array_len(Some(items.len())) + items.len() * 4
}

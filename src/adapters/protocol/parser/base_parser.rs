use bytes::{Buf, Bytes};
use uuid::Uuid;
use crate::application::error::ApplicationError;
use super::traits::*;
use super::varint::{decode_compact_length, decode_signed_varint, decode_unsigned_varint};

/// 기본 파서 구현을 제공하는 구조체
#[derive(Debug, Default, Clone)]
pub struct BaseParser;

impl BaseParser {
    fn utf8(bytes: Bytes) -> Result<String, ApplicationError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ApplicationError::Protocol(format!("invalid UTF-8 sequence: {}", e)))
    }
}

impl ByteParser for BaseParser {}

impl PrimitiveParser for BaseParser {
    fn parse_i8(&self, buf: &mut Bytes) -> Result<i8, ApplicationError> {
        self.ensure_remaining(buf, 1)?;
        Ok(buf.get_i8())
    }

    fn parse_i16(&self, buf: &mut Bytes) -> Result<i16, ApplicationError> {
        self.ensure_remaining(buf, 2)?;
        Ok(buf.get_i16())
    }

    fn parse_i32(&self, buf: &mut Bytes) -> Result<i32, ApplicationError> {
        self.ensure_remaining(buf, 4)?;
        Ok(buf.get_i32())
    }

    fn parse_i64(&self, buf: &mut Bytes) -> Result<i64, ApplicationError> {
        self.ensure_remaining(buf, 8)?;
        Ok(buf.get_i64())
    }

    fn parse_u8(&self, buf: &mut Bytes) -> Result<u8, ApplicationError> {
        self.ensure_remaining(buf, 1)?;
        Ok(buf.get_u8())
    }
}

impl StringParser for BaseParser {
    fn parse_compact_string(&self, buf: &mut Bytes) -> Result<String, ApplicationError> {
        let bytes = self.parse_compact_bytes(buf)?;
        String::from_utf8(bytes)
            .map_err(|e| ApplicationError::Protocol(format!("invalid UTF-8 sequence: {}", e)))
    }

    fn parse_compact_bytes(&self, buf: &mut Bytes) -> Result<Vec<u8>, ApplicationError> {
        let len = self.parse_unsigned_varint(buf)?;
        let bytes_len = decode_compact_length(len).unwrap_or(0);
        Ok(self.take_bytes(buf, bytes_len)?.to_vec())
    }

    fn parse_nullable_string(&self, buf: &mut Bytes) -> Result<Option<String>, ApplicationError> {
        let len = self.parse_i16(buf)?;
        if len < 0 {
            return Ok(None);
        }
        let bytes = self.take_bytes(buf, len as usize)?;
        Self::utf8(bytes).map(Some)
    }
}

impl CompactArrayParser for BaseParser {
    fn parse_compact_array<T, F>(
        &self,
        buf: &mut Bytes,
        mut parser: F,
    ) -> Result<Vec<T>, ApplicationError>
    where
        F: FnMut(&mut Bytes) -> Result<T, ApplicationError>,
    {
        let len = self.parse_unsigned_varint(buf)?;
        let items_len = decode_compact_length(len).unwrap_or(0);

        // every element takes at least one byte, cap the allocation by what is left
        let mut items = Vec::with_capacity(items_len.min(buf.remaining()));
        for _ in 0..items_len {
            items.push(parser(buf)?);
        }

        Ok(items)
    }
}

impl VarIntParser for BaseParser {
    fn parse_unsigned_varint(&self, buf: &mut Bytes) -> Result<u32, ApplicationError> {
        decode_unsigned_varint(buf)
    }

    fn parse_signed_varint(&self, buf: &mut Bytes) -> Result<i32, ApplicationError> {
        decode_signed_varint(buf)
    }
}

impl UuidParser for BaseParser {
    fn parse_uuid(&self, buf: &mut Bytes) -> Result<Uuid, ApplicationError> {
        self.ensure_remaining(buf, 16)?;
        let most_significant = buf.get_u64();
        let least_significant = buf.get_u64();
        Ok(Uuid::from_u64_pair(most_significant, least_significant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_are_big_endian() {
        let parser = BaseParser;
        let mut bytes = Bytes::from(vec![
            0xff, // i8
            0x01, 0x02, // i16
            0x00, 0x00, 0x01, 0x00, // i32
            0, 0, 0, 0, 0, 0, 0, 7, // i64
        ]);
        assert_eq!(parser.parse_i8(&mut bytes).unwrap(), -1);
        assert_eq!(parser.parse_i16(&mut bytes).unwrap(), 0x0102);
        assert_eq!(parser.parse_i32(&mut bytes).unwrap(), 256);
        assert_eq!(parser.parse_i64(&mut bytes).unwrap(), 7);
        assert!(matches!(
            parser.parse_u8(&mut bytes),
            Err(ApplicationError::TruncatedFrame { needed: 1, available: 0 })
        ));
    }

    #[test]
    fn test_compact_string() {
        let parser = BaseParser;
        let mut bytes = Bytes::from(vec![6, b'h', b'e', b'l', b'l', b'o']);
        assert_eq!(parser.parse_compact_string(&mut bytes).unwrap(), "hello");

        // 빈 문자열
        let mut bytes = Bytes::from(vec![1]);
        assert_eq!(parser.parse_compact_string(&mut bytes).unwrap(), "");

        // 잘못된 UTF-8
        let mut bytes = Bytes::from(vec![2, 0xff]);
        assert!(parser.parse_compact_string(&mut bytes).is_err());

        // 길이가 버퍼보다 긴 경우
        let mut bytes = Bytes::from(vec![10, b'a']);
        assert!(matches!(
            parser.parse_compact_string(&mut bytes),
            Err(ApplicationError::TruncatedFrame { needed: 9, available: 1 })
        ));
    }

    #[test]
    fn test_nullable_string() {
        let parser = BaseParser;
        let mut bytes = Bytes::from(vec![0, 3, b'a', b'b', b'c', 0xff, 0xff, 0, 0]);
        assert_eq!(parser.parse_nullable_string(&mut bytes).unwrap(), Some("abc".to_string()));
        assert_eq!(parser.parse_nullable_string(&mut bytes).unwrap(), None);
        assert_eq!(parser.parse_nullable_string(&mut bytes).unwrap(), Some(String::new()));
    }

    #[test]
    fn test_compact_array() {
        let parser = BaseParser;
        let mut bytes = Bytes::from(vec![
            3, // array length (2 + 1)
            0, 0, 0, 1, // first element
            0, 0, 0, 2, // second element
            1, // empty array
            0, // null array
        ]);
        let result = parser.parse_compact_array(&mut bytes, |src| parser.parse_i32(src)).unwrap();
        assert_eq!(result, vec![1, 2]);

        let result = parser.parse_compact_array(&mut bytes, |src| parser.parse_i32(src)).unwrap();
        assert!(result.is_empty());

        let result = parser.parse_compact_array(&mut bytes, |src| parser.parse_i32(src)).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_parse_uuid() {
        let mut bytes = Bytes::from(vec![
            0x01, 0x23, 0x45, 0x67,
            0x89, 0xab, 0xcd, 0xef,
            0xfe, 0xdc, 0xba, 0x98,
            0x76, 0x54, 0x32, 0x10,
        ]);

        let uuid = BaseParser.parse_uuid(&mut bytes).unwrap();
        assert_eq!(uuid.to_string(), "01234567-89ab-cdef-fedc-ba9876543210");
    }

    #[test]
    fn test_take_bytes_isolates_window() {
        let parser = BaseParser;
        let mut bytes = Bytes::from(vec![1, 2, 3, 4, 5]);
        let window = parser.take_bytes(&mut bytes, 3).unwrap();
        assert_eq!(&window[..], &[1, 2, 3]);
        assert_eq!(&bytes[..], &[4, 5]);
    }
}

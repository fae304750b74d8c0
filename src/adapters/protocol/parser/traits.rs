use bytes::{Buf, Bytes, BytesMut};
use uuid::Uuid;
use crate::application::error::ApplicationError;

/// 바이트 스트림으로부터 데이터를 파싱하는 trait
pub trait ByteParser {
    /// 남은 바이트가 충분한지 확인
    fn ensure_remaining(&self, buf: &Bytes, required: usize) -> Result<(), ApplicationError> {
        if buf.remaining() < required {
            return Err(ApplicationError::TruncatedFrame {
                needed: required,
                available: buf.remaining(),
            });
        }
        Ok(())
    }

    /// Splits the next `len` bytes off into their own window.
    fn take_bytes(&self, buf: &mut Bytes, len: usize) -> Result<Bytes, ApplicationError> {
        self.ensure_remaining(buf, len)?;
        Ok(buf.split_to(len))
    }
}

/// Types that know their exact wire size before being written.
///
/// `encode` must write exactly `encoded_size` bytes; the response encoder
/// allocates a fixed buffer from the size and checks the result against it.
pub trait Encode {
    fn encoded_size(&self) -> usize;
    fn encode(&self, dst: &mut BytesMut);
}

/// 기본 타입들의 파싱을 위한 trait
pub trait PrimitiveParser: ByteParser {
    fn parse_i8(&self, buf: &mut Bytes) -> Result<i8, ApplicationError>;
    fn parse_i16(&self, buf: &mut Bytes) -> Result<i16, ApplicationError>;
    fn parse_i32(&self, buf: &mut Bytes) -> Result<i32, ApplicationError>;
    fn parse_i64(&self, buf: &mut Bytes) -> Result<i64, ApplicationError>;
    fn parse_u8(&self, buf: &mut Bytes) -> Result<u8, ApplicationError>;
}

/// 문자열 타입 파싱을 위한 trait
pub trait StringParser: ByteParser {
    /// COMPACT_STRING: unsigned varint `len + 1`. Null decodes as an empty string.
    fn parse_compact_string(&self, buf: &mut Bytes) -> Result<String, ApplicationError>;
    fn parse_compact_bytes(&self, buf: &mut Bytes) -> Result<Vec<u8>, ApplicationError>;
    /// NULLABLE_STRING: i16 length, -1 for null.
    fn parse_nullable_string(&self, buf: &mut Bytes) -> Result<Option<String>, ApplicationError>;
}

/// 컴팩트 배열 타입 파싱을 위한 trait
pub trait CompactArrayParser: ByteParser {
    fn parse_compact_array<T, F>(
        &self,
        buf: &mut Bytes,
        parser: F,
    ) -> Result<Vec<T>, ApplicationError>
    where
        F: FnMut(&mut Bytes) -> Result<T, ApplicationError>;
}

/// 가변 정수 타입 파싱을 위한 trait
pub trait VarIntParser: ByteParser {
    fn parse_unsigned_varint(&self, buf: &mut Bytes) -> Result<u32, ApplicationError>;
    fn parse_signed_varint(&self, buf: &mut Bytes) -> Result<i32, ApplicationError>;
}

pub trait UuidParser: ByteParser {
    fn parse_uuid(&self, buf: &mut Bytes) -> Result<Uuid, ApplicationError>;
}

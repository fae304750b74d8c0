/// Error codes this broker puts on the wire.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(i16)]
pub enum ErrorCode {
    None = 0,
    UnknownTopicOrPartition = 3,
    UnsupportedVersion = 35,
}

impl From<ErrorCode> for i16 {
    fn from(error_code: ErrorCode) -> Self {
        error_code as i16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_wire_values() {
        assert_eq!(i16::from(ErrorCode::None), 0);
        assert_eq!(i16::from(ErrorCode::UnknownTopicOrPartition), 3);
        assert_eq!(i16::from(ErrorCode::UnsupportedVersion), 0x0023);
    }
}

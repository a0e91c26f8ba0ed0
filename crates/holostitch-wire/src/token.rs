use crate::error::WireError;

/// A one-byte pull request selecting the payload kind.
///
/// The consumer sends one token and blocks for exactly one frame in reply.
/// Any other byte on the wire is a fatal protocol violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PullToken {
    /// Points without color. Reserved; no producer serves it yet.
    PointsXyz = b'Y',
    /// Points with packed RGB color.
    PointsXyzRgb = b'Z',
}

impl PullToken {
    /// The wire byte of the token.
    #[inline]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PullToken {
    type Error = WireError;

    fn try_from(byte: u8) -> Result<Self, WireError> {
        match byte {
            b'Y' => Ok(PullToken::PointsXyz),
            b'Z' => Ok(PullToken::PointsXyzRgb),
            other => Err(WireError::BadToken(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_bytes() {
        assert_eq!(PullToken::PointsXyzRgb.as_byte(), b'Z');
        assert!(matches!(
            PullToken::try_from(b'Y'),
            Ok(PullToken::PointsXyz)
        ));
    }

    #[test]
    fn test_unknown_token() {
        assert!(matches!(
            PullToken::try_from(b'Q'),
            Err(WireError::BadToken(b'Q'))
        ));
    }
}

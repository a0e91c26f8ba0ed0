use std::io::{ErrorKind, Read, Write};

use crate::error::WireError;
use crate::token::PullToken;

/// Wire size of one packed point in bytes.
pub const POINT_WIRE_BYTES: usize = 10;

/// Upper bound on a single frame payload, sized for a full stitched cloud.
pub const MAX_FRAME_BYTES: usize = 64_000_000;

/// Write one frame: a little-endian u32 byte count followed by the payload,
/// flushed as one logical send.
pub fn write_frame<W: Write>(writer: &mut W, payload: &[i16]) -> Result<(), WireError> {
    let byte_count = payload.len() * 2;
    let mut buf = Vec::with_capacity(4 + byte_count);
    buf.extend_from_slice(&(byte_count as u32).to_le_bytes());
    for value in payload {
        buf.extend_from_slice(&value.to_le_bytes());
    }
    writer.write_all(&buf)?;
    writer.flush()?;
    Ok(())
}

/// Read one frame: exactly 4 header bytes, then exactly the declared payload,
/// looping over partial reads until satisfied.
///
/// # Errors
///
/// [`WireError::TruncatedFrame`] if the stream closes before the declared
/// byte count arrives; [`WireError::CorruptFrame`] if the count is not a
/// whole number of packed points; [`WireError::FrameTooLarge`] past the
/// protocol limit.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<Vec<i16>, WireError> {
    let mut header = [0u8; 4];
    read_fully(reader, &mut header)?;
    let byte_count = u32::from_le_bytes(header);

    if byte_count as usize > MAX_FRAME_BYTES {
        return Err(WireError::FrameTooLarge(byte_count, MAX_FRAME_BYTES));
    }
    if byte_count as usize % POINT_WIRE_BYTES != 0 {
        return Err(WireError::CorruptFrame(byte_count, POINT_WIRE_BYTES));
    }

    let mut payload = vec![0u8; byte_count as usize];
    read_fully(reader, &mut payload)?;
    log::debug!("received frame of {byte_count} payload bytes");

    Ok(payload
        .chunks_exact(2)
        .map(|b| i16::from_le_bytes([b[0], b[1]]))
        .collect())
}

/// Send a single pull token.
pub fn send_pull<W: Write>(writer: &mut W, token: PullToken) -> Result<(), WireError> {
    writer.write_all(&[token.as_byte()])?;
    writer.flush()?;
    Ok(())
}

/// Block for the next pull token from the consumer.
///
/// A clean close while waiting yields [`WireError::ConnectionClosed`]; an
/// unknown byte is a fatal [`WireError::BadToken`].
pub fn read_pull<R: Read>(reader: &mut R) -> Result<PullToken, WireError> {
    let mut byte = [0u8; 1];
    match reader.read_exact(&mut byte) {
        Ok(()) => PullToken::try_from(byte[0]),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(WireError::ConnectionClosed),
        Err(e) => Err(WireError::Io(e)),
    }
}

/// One full pull exchange from the consumer side: send the token, then block
/// for exactly one frame. No pipelining.
pub fn pull_frame<S: Read + Write>(stream: &mut S, token: PullToken) -> Result<Vec<i16>, WireError> {
    send_pull(stream, token)?;
    read_frame(stream)
}

/// `read_exact` with end-of-stream mapped to the protocol truncation error.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), WireError> {
    match reader.read_exact(buf) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(WireError::TruncatedFrame),
        Err(e) => Err(WireError::Io(e)),
    }
}

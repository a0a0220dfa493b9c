use log::debug;
use crate::drivers::error::MalformedBlockError;
pub const BLOCK_MARKER: u8 = b'#';
const MAX_LENGTH_DIGITS: usize = 9;
/// Strips the IEEE 488.2 block header (`#<n><len>`) and the reply terminator.
///
/// `#0` opens an indefinite-length block whose payload runs to the end of the
/// reply. For definite blocks the declared length must match the bytes actually
/// present: only a `\n` or `\r\n` terminator may follow the payload.
pub fn parse_block(raw: &[u8]) -> Result<&[u8], MalformedBlockError> {
    let (&marker, rest) = raw
        .split_first()
        .ok_or(MalformedBlockError::MissingMarker { found: None })?;
    if marker != BLOCK_MARKER {
        return Err(MalformedBlockError::MissingMarker {
            found: Some(marker),
        });
    }
    let (&count, rest) = rest
        .split_first()
        .ok_or(MalformedBlockError::TruncatedHeader {
            expected: 1,
            available: 0,
        })?;
    if !count.is_ascii_digit() {
        return Err(MalformedBlockError::InvalidDigitCount(count));
    }
    let digit_count = (count - b'0') as usize;
    if digit_count == 0 {
        debug!("indefinite-length block, {} bytes", rest.len());
        return Ok(strip_terminator(rest));
    }
    if rest.len() < digit_count {
        return Err(MalformedBlockError::TruncatedHeader {
            expected: digit_count,
            available: rest.len(),
        });
    }
    let (digits, body) = rest.split_at(digit_count);
    let declared = parse_length(digits)?;
    debug!("block header declares {declared} payload bytes");
    if body.len() < declared {
        return Err(MalformedBlockError::Truncated {
            declared,
            available: body.len(),
        });
    }
    let (payload, tail) = body.split_at(declared);
    if !is_terminator(tail) {
        return Err(MalformedBlockError::TrailingBytes {
            declared,
            extra: tail.len(),
        });
    }
    Ok(payload)
}
/// Frames `payload` as a definite-length block, zero-padding the length to
/// `digits` places (at least as many as the length needs, at most 9).
/// Payloads of 10^9 bytes or more do not fit a nine-digit header.
pub fn write_block(payload: &[u8], digits: usize) -> Result<Vec<u8>, MalformedBlockError> {
    let mut out = block_header(payload.len(), digits)?.into_bytes();
    out.extend_from_slice(payload);
    Ok(out)
}
fn block_header(len: usize, digits: usize) -> Result<String, MalformedBlockError> {
    let text = len.to_string();
    if text.len() > MAX_LENGTH_DIGITS {
        return Err(MalformedBlockError::PayloadTooLarge(len));
    }
    let digits = digits.clamp(text.len(), MAX_LENGTH_DIGITS);
    Ok(format!("#{digits}{text:0>digits$}"))
}
fn parse_length(digits: &[u8]) -> Result<usize, MalformedBlockError> {
    let invalid = || MalformedBlockError::InvalidLengthDigits(String::from_utf8_lossy(digits).into_owned());
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }
    std::str::from_utf8(digits)
        .map_err(|_| invalid())?
        .parse::<usize>()
        .map_err(|_| invalid())
}
fn is_terminator(tail: &[u8]) -> bool {
    matches!(tail, b"" | b"\n" | b"\r\n")
}
fn strip_terminator(body: &[u8]) -> &[u8] {
    body.strip_suffix(b"\r\n")
        .or_else(|| body.strip_suffix(b"\n"))
        .unwrap_or(body)
}

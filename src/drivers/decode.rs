use log::{debug, warn};
use crate::drivers::block::parse_block;
use crate::drivers::error::MalformedBlockError;
use crate::drivers::preamble::{Preamble, WaveformFormat};
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SampleWidth {
    #[default]
    Byte,
    Word,
}
impl SampleWidth {
    pub fn bytes(self) -> usize {
        match self {
            Self::Byte => 1,
            Self::Word => 2,
        }
    }
}
/// `:WAVeform:BYTeorder`; ignored for byte-wide samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteOrder {
    #[default]
    MsbFirst,
    LsbFirst,
}
/// Raw sample layout of a binary waveform transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SampleFormat {
    pub width: SampleWidth,
    pub signed: bool,
    pub byte_order: ByteOrder,
}
impl SampleFormat {
    pub fn byte(signed: bool) -> Self {
        Self {
            width: SampleWidth::Byte,
            signed,
            byte_order: ByteOrder::default(),
        }
    }
    pub fn word(signed: bool, byte_order: ByteOrder) -> Self {
        Self {
            width: SampleWidth::Word,
            signed,
            byte_order,
        }
    }
}
/// Calibration constants mapping sample index/value to seconds/volts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveformMeta {
    pub points: usize,
    pub x_increment: f64,
    pub x_origin: f64,
    pub x_reference: f64,
    pub y_increment: f64,
    pub y_origin: f64,
    pub y_reference: f64,
}
impl WaveformMeta {
    pub fn time_at(&self, index: usize) -> f64 {
        (index as f64 - self.x_reference) * self.x_increment + self.x_origin
    }
    pub fn voltage_for_raw(&self, raw: f64) -> f64 {
        (raw - self.y_reference) * self.y_increment + self.y_origin
    }
    /// Inverse of [`Self::voltage_for_raw`].
    pub fn raw_for_voltage(&self, voltage: f64) -> f64 {
        (voltage - self.y_origin) / self.y_increment + self.y_reference
    }
    pub fn time_axis(&self, len: usize) -> Vec<f64> {
        (0..len).map(|i| self.time_at(i)).collect()
    }
}
/// A time/voltage pair of equal-length sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    pub time: Vec<f64>,
    pub voltage: Vec<f64>,
}
impl Trace {
    pub fn len(&self) -> usize {
        self.time.len()
    }
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.time.iter().copied().zip(self.voltage.iter().copied())
    }
}
/// Decodes a binary `:WAVeform:DATA?` reply into physical units.
pub fn decode(
    raw: &[u8],
    meta: &WaveformMeta,
    format: SampleFormat,
) -> Result<Trace, MalformedBlockError> {
    let payload = parse_block(raw)?;
    let width = format.width.bytes();
    if payload.len() % width != 0 {
        return Err(MalformedBlockError::PayloadNotAligned {
            len: payload.len(),
            width,
        });
    }
    let actual = payload.len() / width;
    if actual != meta.points {
        if actual == 0 {
            warn!("empty waveform block, {} points were declared", meta.points);
        }
        return Err(MalformedBlockError::PointCountMismatch {
            expected: meta.points,
            actual,
        });
    }
    debug!("decoding {actual} samples as {format:?}");
    let voltage = unpack_samples(payload, format)
        .map(|raw| meta.voltage_for_raw(raw))
        .collect();
    Ok(Trace {
        time: meta.time_axis(actual),
        voltage,
    })
}
/// Decodes an ASCii-format reply: comma-separated values already in volts.
pub fn decode_ascii(raw: &[u8], meta: &WaveformMeta) -> Result<Trace, MalformedBlockError> {
    let payload = parse_block(raw)?;
    let text = std::str::from_utf8(payload).map_err(|_| MalformedBlockError::AsciiNotUtf8)?;
    let text = text.trim();
    if text.is_empty() {
        if meta.points != 0 {
            warn!("empty waveform block, {} points were declared", meta.points);
            return Err(MalformedBlockError::PointCountMismatch {
                expected: meta.points,
                actual: 0,
            });
        }
        return Ok(Trace::default());
    }
    let voltage = text
        .split(',')
        .enumerate()
        .map(|(index, value)| {
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| MalformedBlockError::InvalidAsciiSample {
                    index,
                    value: value.to_owned(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if voltage.len() != meta.points {
        return Err(MalformedBlockError::PointCountMismatch {
            expected: meta.points,
            actual: voltage.len(),
        });
    }
    Ok(Trace {
        time: meta.time_axis(voltage.len()),
        voltage,
    })
}
/// Decodes with the layout named by the preamble's format field. `signed` and
/// `byte_order` mirror `:WAVeform:UNSigned` and `:WAVeform:BYTeorder`, which the
/// preamble does not report.
pub fn decode_with_preamble(
    raw: &[u8],
    preamble: &Preamble,
    signed: bool,
    byte_order: ByteOrder,
) -> Result<Trace, MalformedBlockError> {
    let meta = preamble.meta();
    match preamble.format {
        WaveformFormat::Byte => decode(raw, &meta, SampleFormat::byte(signed)),
        WaveformFormat::Word => decode(raw, &meta, SampleFormat::word(signed, byte_order)),
        WaveformFormat::Ascii => decode_ascii(raw, &meta),
    }
}
fn unpack_samples(payload: &[u8], format: SampleFormat) -> Box<dyn Iterator<Item = f64> + '_> {
    match (format.width, format.signed) {
        (SampleWidth::Byte, false) => Box::new(payload.iter().map(|&b| b as f64)),
        (SampleWidth::Byte, true) => Box::new(payload.iter().map(|&b| b as i8 as f64)),
        (SampleWidth::Word, signed) => Box::new(payload.chunks_exact(2).map(move |pair| {
            let bytes = [pair[0], pair[1]];
            let word = match format.byte_order {
                ByteOrder::MsbFirst => u16::from_be_bytes(bytes),
                ByteOrder::LsbFirst => u16::from_le_bytes(bytes),
            };
            if signed {
                word as i16 as f64
            } else {
                word as f64
            }
        })),
    }
}

use std::str::FromStr;
use crate::drivers::decode::WaveformMeta;
use crate::drivers::error::PreambleError;
/// `:WAVeform:FORMat` as reported in the preamble's first field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformFormat {
    Byte,
    Word,
    Ascii,
}
impl WaveformFormat {
    fn from_code(code: &str) -> Result<Self, PreambleError> {
        match code.parse::<i32>() {
            Ok(0) => Ok(Self::Byte),
            Ok(1) => Ok(Self::Word),
            Ok(4) => Ok(Self::Ascii),
            _ => Err(PreambleError::UnknownFormat(code.to_owned())),
        }
    }
}
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionType {
    Normal,
    Peak,
    Average,
    HighResolution,
}
impl AcquisitionType {
    fn from_code(code: &str) -> Result<Self, PreambleError> {
        match code.parse::<i32>() {
            Ok(0) => Ok(Self::Normal),
            Ok(1) => Ok(Self::Peak),
            Ok(2) => Ok(Self::Average),
            Ok(3) => Ok(Self::HighResolution),
            _ => Err(PreambleError::UnknownAcquisition(code.to_owned())),
        }
    }
}
/// Parsed `:WAVeform:PREamble?` reply.
#[derive(Debug, Clone, PartialEq)]
pub struct Preamble {
    pub format: WaveformFormat,
    pub acquisition: AcquisitionType,
    pub points: usize,
    /// Number of averages; 1 unless `acquisition` is `Average`.
    pub average_count: u32,
    pub x_increment: f64,
    pub x_origin: f64,
    pub x_reference: f64,
    pub y_increment: f64,
    pub y_origin: f64,
    pub y_reference: f64,
}
impl Preamble {
    pub fn meta(&self) -> WaveformMeta {
        WaveformMeta {
            points: self.points,
            x_increment: self.x_increment,
            x_origin: self.x_origin,
            x_reference: self.x_reference,
            y_increment: self.y_increment,
            y_origin: self.y_origin,
            y_reference: self.y_reference,
        }
    }
}
impl FromStr for Preamble {
    type Err = PreambleError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim_end_matches(['\r', '\n']).split(',').map(str::trim).collect();
        if fields.len() != 10 {
            return Err(PreambleError::FieldCount(fields.len()));
        }
        Ok(Self {
            format: WaveformFormat::from_code(fields[0])?,
            acquisition: AcquisitionType::from_code(fields[1])?,
            points: number("points", fields[2])?,
            average_count: number("count", fields[3])?,
            x_increment: number("xincrement", fields[4])?,
            x_origin: number("xorigin", fields[5])?,
            x_reference: number("xreference", fields[6])?,
            y_increment: number("yincrement", fields[7])?,
            y_origin: number("yorigin", fields[8])?,
            y_reference: number("yreference", fields[9])?,
        })
    }
}
fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, PreambleError> {
    value.parse().map_err(|_| PreambleError::InvalidNumber {
        field,
        value: value.to_owned(),
    })
}
#[cfg(test)]
mod tests {
    use super::*;
    const PREAMBLE: &str = "+0,+0,+1000,+1,+1.00000000E-06,-5.00000000E-04,+0,+7.81250000E-03,+0.00000000E+00,+128\n";
    #[test]
    fn parses_keysight_reply() {
        let pre: Preamble = PREAMBLE.parse().unwrap();
        assert_eq!(pre.format, WaveformFormat::Byte);
        assert_eq!(pre.acquisition, AcquisitionType::Normal);
        assert_eq!(pre.points, 1000);
        assert_eq!(pre.average_count, 1);
        assert_eq!(pre.x_increment, 1e-6);
        assert_eq!(pre.x_origin, -5e-4);
        assert_eq!(pre.y_increment, 7.8125e-3);
        assert_eq!(pre.y_reference, 128.0);
        let meta = pre.meta();
        assert_eq!(meta.points, 1000);
        assert_eq!(meta.x_origin, -5e-4);
    }
    #[test]
    fn maps_format_and_acquisition_codes() {
        let word = "+1,+2,+10,+16,1e-3,0,0,1e-4,0,32768";
        let pre: Preamble = word.parse().unwrap();
        assert_eq!(pre.format, WaveformFormat::Word);
        assert_eq!(pre.acquisition, AcquisitionType::Average);
        assert_eq!(pre.average_count, 16);
        let ascii: Preamble = "+4,+3,+4,+1,1,0,0,1,0,0".parse().unwrap();
        assert_eq!(ascii.format, WaveformFormat::Ascii);
        assert_eq!(ascii.acquisition, AcquisitionType::HighResolution);
    }
    #[test]
    fn rejects_bad_replies() {
        assert!(matches!(
            "+0,+0,+10".parse::<Preamble>(),
            Err(PreambleError::FieldCount(3))
        ));
        assert!(matches!(
            "+2,+0,+10,+1,1,0,0,1,0,0".parse::<Preamble>(),
            Err(PreambleError::UnknownFormat(_))
        ));
        assert!(matches!(
            "+0,+9,+10,+1,1,0,0,1,0,0".parse::<Preamble>(),
            Err(PreambleError::UnknownAcquisition(_))
        ));
        assert!(matches!(
            "+0,+0,ten,+1,1,0,0,1,0,0".parse::<Preamble>(),
            Err(PreambleError::InvalidNumber { field: "points", .. })
        ));
    }
}

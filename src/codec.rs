//! Compact polyline codec for route geometries.
//!
//! Implements the 5-bit chunked polyline format used by routing backends:
//! coordinates are rounded to a fixed decimal precision, delta-encoded per
//! dimension, zig-zag mapped to unsigned integers and written out as
//! printable ASCII with a continuation bit per chunk. Encoded output is
//! byte-exact with the reference format, so geometries interoperate with
//! external routing and mapping services.
//!
//! The codec is standalone: it treats inputs as opaque numeric tuples and
//! has no dependency on any map or rendering library.

use std::fmt;

/// Codec configuration.
///
/// `factor` is derived from `precision` unless overridden; `dimension` is
/// the tuple width (2 for lat/lng geometry).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CodecOptions {
    /// Decimal digits of coordinate fidelity preserved by the codec.
    pub precision: u32,
    /// Multiplier converting a coordinate to the integer scale.
    pub factor: f64,
    /// Number of coordinates per point.
    pub dimension: usize,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            precision: 5,
            factor: 1e5,
            dimension: 2,
        }
    }
}

impl CodecOptions {
    /// Options for the given precision, with the factor derived as
    /// 10^precision.
    pub fn precision(precision: u32) -> Self {
        Self {
            precision,
            factor: 10f64.powi(precision as i32),
            dimension: 2,
        }
    }

    /// Overrides the derived factor.
    pub fn with_factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Sets the tuple width. Zero falls back to the default of 2.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = if dimension == 0 { 2 } else { dimension };
        self
    }
}

/// A bare number is treated as a precision.
impl From<u32> for CodecOptions {
    fn from(precision: u32) -> Self {
        Self::precision(precision)
    }
}

/// Input point at the flatten boundary.
///
/// Named lat/lng pairs and positional tuples are both accepted; the
/// distinction is resolved once during flattening and never threaded
/// through the rest of the pipeline. Decoded output is always positional.
#[derive(Debug, Clone, PartialEq)]
pub enum Point {
    LatLng { lat: f64, lng: f64 },
    Tuple(Vec<f64>),
}

impl Point {
    fn coord(&self, dim: usize) -> Option<f64> {
        match self {
            Point::LatLng { lat, lng } => match dim {
                0 => Some(*lat),
                1 => Some(*lng),
                _ => None,
            },
            Point::Tuple(coords) => coords.get(dim).copied(),
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((lat, lng): (f64, f64)) -> Self {
        Point::LatLng { lat, lng }
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Point::Tuple(coords)
    }
}

impl<const N: usize> From<[f64; N]> for Point {
    fn from(coords: [f64; N]) -> Self {
        Point::Tuple(coords.to_vec())
    }
}

/// Codec failure.
///
/// The wire format is defined over 32-bit integers; values that would wrap
/// in a 32-bit implementation are rejected instead of silently diverging.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A value scaled by the factor falls outside the 32-bit wire range.
    OutOfRange(f64),
    /// A decoded number exceeds the 32-bit wire range.
    DecodedOutOfRange(u64),
    /// An input point has fewer coordinates than the configured dimension.
    ShapeMismatch { index: usize, dimension: usize },
    /// An encoded character is outside the polyline alphabet.
    InvalidCharacter { index: usize },
    /// The encoded string ends in the middle of a chunked number.
    UnterminatedNumber,
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecError::OutOfRange(value) => {
                write!(f, "scaled value {} outside the 32-bit polyline range", value)
            }
            CodecError::DecodedOutOfRange(value) => {
                write!(f, "decoded value {} outside the 32-bit polyline range", value)
            }
            CodecError::ShapeMismatch { index, dimension } => {
                write!(f, "point {} has fewer than {} coordinates", index, dimension)
            }
            CodecError::InvalidCharacter { index } => {
                write!(f, "invalid polyline character at index {}", index)
            }
            CodecError::UnterminatedNumber => {
                write!(f, "encoded string ends inside a chunked number")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Encodes a sequence of points.
///
/// Empty input encodes to the empty string. Options may be given as a bare
/// precision (`5u32`) or a full [`CodecOptions`].
pub fn encode(points: &[Point], options: impl Into<CodecOptions>) -> Result<String, CodecError> {
    let options = options.into();
    if points.is_empty() {
        return Ok(String::new());
    }
    let flat = flatten(points, options.dimension)?;
    encode_deltas(flat, options)
}

/// Decodes an encoded string into positional point tuples.
///
/// Empty input decodes to an empty sequence.
pub fn decode(encoded: &str, options: impl Into<CodecOptions>) -> Result<Vec<Vec<f64>>, CodecError> {
    let options = options.into();
    if encoded.is_empty() {
        return Ok(Vec::new());
    }
    let flat = decode_deltas(encoded, options)?;
    Ok(unflatten(flat, options.dimension))
}

/// Encodes lat/lng pairs (dimension fixed at 2).
pub fn encode_coords(
    points: &[(f64, f64)],
    options: impl Into<CodecOptions>,
) -> Result<String, CodecError> {
    let options = CodecOptions {
        dimension: 2,
        ..options.into()
    };
    if points.is_empty() {
        return Ok(String::new());
    }
    let mut flat = Vec::with_capacity(points.len() * 2);
    for &(lat, lng) in points {
        flat.push(lat);
        flat.push(lng);
    }
    encode_deltas(flat, options)
}

/// Decodes an encoded string into lat/lng pairs (dimension fixed at 2).
pub fn decode_coords(
    encoded: &str,
    options: impl Into<CodecOptions>,
) -> Result<Vec<(f64, f64)>, CodecError> {
    let options = CodecOptions {
        dimension: 2,
        ..options.into()
    };
    let points = decode(encoded, options)?;
    Ok(points.into_iter().map(|point| (point[0], point[1])).collect())
}

/// Flattens points into a single ordered sequence of numbers.
///
/// For dimension 2, named lat/lng fields are honored; everything else reads
/// positionally. A point shorter than the dimension is an error.
pub fn flatten(points: &[Point], dimension: usize) -> Result<Vec<f64>, CodecError> {
    let mut flat = Vec::with_capacity(points.len() * dimension);
    for (index, point) in points.iter().enumerate() {
        for dim in 0..dimension {
            let value = point
                .coord(dim)
                .ok_or(CodecError::ShapeMismatch { index, dimension })?;
            flat.push(value);
        }
    }
    Ok(flat)
}

/// Groups a flat sequence into consecutive tuples of `dimension`.
///
/// Trailing values that do not fill a whole tuple are dropped, matching the
/// reference decoder.
pub fn unflatten(flat: Vec<f64>, dimension: usize) -> Vec<Vec<f64>> {
    if dimension == 0 {
        return Vec::new();
    }
    flat.chunks_exact(dimension)
        .map(|chunk| chunk.to_vec())
        .collect()
}

/// Delta-encodes a flat sequence and writes it out through the remaining
/// layers.
///
/// Each value is rounded to the configured precision before differencing;
/// the per-dimension accumulator tracks the rounded absolute values, so the
/// decoder reproduces the rounded input exactly. The accumulator is local
/// to the call.
pub fn encode_deltas(
    mut numbers: Vec<f64>,
    options: impl Into<CodecOptions>,
) -> Result<String, CodecError> {
    let options = options.into();
    let dimension = options.dimension.max(1);
    let mut last = vec![0.0f64; dimension];
    for (i, value) in numbers.iter_mut().enumerate() {
        let d = i % dimension;
        let rounded = round_to_precision(*value, options.precision);
        *value = rounded - last[d];
        last[d] = rounded;
    }
    encode_floats(numbers, options)
}

/// Decodes the lower layers and reconstructs absolute values by running
/// sum.
///
/// The accumulator carries the raw sum; each emitted value is requantized
/// to the factor so floating-point drift cannot build up across a long
/// sequence.
pub fn decode_deltas(
    encoded: &str,
    options: impl Into<CodecOptions>,
) -> Result<Vec<f64>, CodecError> {
    let options = options.into();
    let dimension = options.dimension.max(1);
    let mut numbers = decode_floats(encoded, options)?;
    let mut last = vec![0.0f64; dimension];
    for (i, value) in numbers.iter_mut().enumerate() {
        let d = i % dimension;
        last[d] += *value;
        *value = (last[d] * options.factor).round() / options.factor;
    }
    Ok(numbers)
}

/// Scales each value to the integer grid and encodes it.
pub fn encode_floats(
    numbers: Vec<f64>,
    options: impl Into<CodecOptions>,
) -> Result<String, CodecError> {
    let options = options.into();
    let mut integers = Vec::with_capacity(numbers.len());
    for value in numbers {
        integers.push(scale_to_integer(value, options.factor)?);
    }
    Ok(encode_signed_integers(&integers))
}

/// Decodes signed integers and divides them back to the fractional scale.
pub fn decode_floats(
    encoded: &str,
    options: impl Into<CodecOptions>,
) -> Result<Vec<f64>, CodecError> {
    let options = options.into();
    let integers = decode_signed_integers(encoded)?;
    Ok(integers
        .into_iter()
        .map(|value| value as f64 / options.factor)
        .collect())
}

fn round_to_precision(value: f64, precision: u32) -> f64 {
    let scale = 10f64.powi(precision as i32);
    (value * scale).round() / scale
}

fn scale_to_integer(value: f64, factor: f64) -> Result<i64, CodecError> {
    let scaled = (value * factor).round();
    // NaN fails both comparisons and lands here too.
    if !(scaled >= i32::MIN as f64 && scaled <= i32::MAX as f64) {
        return Err(CodecError::OutOfRange(value));
    }
    Ok(scaled as i64)
}

/// Maps a signed integer to an unsigned one, keeping small magnitudes
/// small in either sign.
pub fn zigzag(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

/// Inverse of [`zigzag`].
pub fn unzigzag(u: u64) -> i64 {
    ((u >> 1) as i64) ^ -((u & 1) as i64)
}

/// Zig-zag maps and encodes a sequence of signed integers.
pub fn encode_signed_integers(numbers: &[i64]) -> String {
    let mut encoded = String::new();
    for &n in numbers {
        encode_unsigned_integer(zigzag(n), &mut encoded);
    }
    encoded
}

/// Decodes and un-maps a sequence of signed integers.
///
/// Values outside the 32-bit wire range are rejected rather than wrapped.
pub fn decode_signed_integers(encoded: &str) -> Result<Vec<i64>, CodecError> {
    let numbers = decode_unsigned_integers(encoded)?;
    let mut signed = Vec::with_capacity(numbers.len());
    for u in numbers {
        if u > u32::MAX as u64 {
            return Err(CodecError::DecodedOutOfRange(u));
        }
        signed.push(unzigzag(u));
    }
    Ok(signed)
}

/// Encodes a sequence of unsigned integers with no separators; the
/// continuation bit makes the stream self-delimiting.
pub fn encode_unsigned_integers(numbers: &[u64]) -> String {
    let mut encoded = String::new();
    for &num in numbers {
        encode_unsigned_integer(num, &mut encoded);
    }
    encoded
}

/// Appends one unsigned integer as 5-bit chunks, low bits first, offset
/// into the printable range.
pub fn encode_unsigned_integer(mut num: u64, encoded: &mut String) {
    while num >= 0x20 {
        encoded.push(((0x20 | (num & 0x1f)) as u8 + 63) as char);
        num >>= 5;
    }
    encoded.push((num as u8 + 63) as char);
}

/// Decodes a concatenation of chunked unsigned integers.
pub fn decode_unsigned_integers(encoded: &str) -> Result<Vec<u64>, CodecError> {
    let mut numbers = Vec::new();
    let mut current: u64 = 0;
    let mut shift: u32 = 0;
    for (index, ch) in encoded.chars().enumerate() {
        let code = ch as u32;
        if !(63..=126).contains(&code) {
            return Err(CodecError::InvalidCharacter { index });
        }
        let chunk = code - 63;
        let piece = (chunk & 0x1f) as u64;
        // Reject chunk sequences whose bits would fall off the accumulator.
        if shift >= 64 || (piece != 0 && shift > piece.leading_zeros()) {
            return Err(CodecError::DecodedOutOfRange(current));
        }
        current |= piece << shift;
        if chunk & 0x20 == 0 {
            numbers.push(current);
            current = 0;
            shift = 0;
        } else {
            shift += 5;
        }
    }
    if shift != 0 {
        return Err(CodecError::UnterminatedNumber);
    }
    Ok(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Canonical reference vector for the 5-digit polyline format.
    const REFERENCE_ENCODED: &str = "_p~iF~ps|U_ulLnnqC_mqNvxq`@";
    const REFERENCE_POINTS: [(f64, f64); 3] =
        [(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)];

    #[test]
    fn encodes_reference_vector() {
        let encoded = encode_coords(&REFERENCE_POINTS, CodecOptions::default()).unwrap();
        assert_eq!(encoded, REFERENCE_ENCODED);
    }

    #[test]
    fn decodes_reference_vector() {
        let points = decode_coords(REFERENCE_ENCODED, CodecOptions::default()).unwrap();
        assert_eq!(points.len(), 3);
        for (decoded, expected) in points.iter().zip(REFERENCE_POINTS.iter()) {
            assert!((decoded.0 - expected.0).abs() < 1e-5);
            assert!((decoded.1 - expected.1).abs() < 1e-5);
        }
    }

    #[test]
    fn named_and_positional_points_encode_alike() {
        let named: Vec<Point> = vec![(38.5, -120.2).into(), (40.7, -120.95).into()];
        let positional: Vec<Point> = vec![[38.5, -120.2].into(), [40.7, -120.95].into()];
        let a = encode(&named, CodecOptions::default()).unwrap();
        let b = encode(&positional, CodecOptions::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_input_is_identity() {
        assert_eq!(encode(&[], CodecOptions::default()).unwrap(), "");
        assert!(decode("", CodecOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn bare_precision_normalizes() {
        let options: CodecOptions = 6u32.into();
        assert_eq!(options.precision, 6);
        assert_eq!(options.factor, 1e6);
        assert_eq!(options.dimension, 2);
    }

    #[test]
    fn explicit_factor_overrides_derived() {
        let options = CodecOptions::precision(5).with_factor(1e3);
        assert_eq!(options.precision, 5);
        assert_eq!(options.factor, 1e3);
    }

    #[test]
    fn zero_dimension_falls_back() {
        let options = CodecOptions::default().with_dimension(0);
        assert_eq!(options.dimension, 2);
    }

    #[test]
    fn zigzag_round_trips() {
        for n in [
            0i64,
            1,
            -1,
            2,
            -2,
            127,
            -128,
            3850000,
            -12020000,
            i32::MAX as i64,
            i32::MIN as i64,
        ] {
            assert_eq!(unzigzag(zigzag(n)), n, "n = {}", n);
        }
    }

    #[test]
    fn zigzag_keeps_small_magnitudes_small() {
        assert_eq!(zigzag(0), 0);
        assert_eq!(zigzag(-1), 1);
        assert_eq!(zigzag(1), 2);
        assert_eq!(zigzag(-2), 3);
        assert_eq!(zigzag(2), 4);
    }

    #[test]
    fn varint_concatenation_is_self_delimiting() {
        let cases: [&[u64]; 4] = [
            &[],
            &[0],
            &[31, 32, 33],
            &[0, 1, 174, 1_000_000, 5, 4_294_967_295],
        ];
        for numbers in cases {
            let encoded = encode_unsigned_integers(numbers);
            let decoded = decode_unsigned_integers(&encoded).unwrap();
            assert_eq!(decoded, numbers, "encoded = {:?}", encoded);
        }
    }

    #[test]
    fn varint_single_chunk_boundary() {
        let mut encoded = String::new();
        encode_unsigned_integer(31, &mut encoded);
        assert_eq!(encoded.len(), 1);
        encoded.clear();
        encode_unsigned_integer(32, &mut encoded);
        assert_eq!(encoded.len(), 2);
    }

    #[test]
    fn decode_rejects_invalid_character() {
        assert_eq!(
            decode_unsigned_integers("_p\u{1}iF"),
            Err(CodecError::InvalidCharacter { index: 2 })
        );
    }

    #[test]
    fn decode_rejects_unterminated_number() {
        // '~' keeps the continuation bit set, so the stream ends mid-number.
        assert_eq!(
            decode_unsigned_integers("~"),
            Err(CodecError::UnterminatedNumber)
        );
    }

    #[test]
    fn decode_rejects_out_of_wire_range() {
        // 2^33 needs seven chunks and exceeds the 32-bit wire range.
        let encoded = encode_unsigned_integers(&[1u64 << 33]);
        assert!(matches!(
            decode_signed_integers(&encoded),
            Err(CodecError::DecodedOutOfRange(_))
        ));
    }

    #[test]
    fn encode_rejects_out_of_range_magnitudes() {
        let points: Vec<Point> = vec![(1e9, 0.0).into()];
        assert!(matches!(
            encode(&points, CodecOptions::default()),
            Err(CodecError::OutOfRange(_))
        ));
    }

    #[test]
    fn encode_rejects_non_finite_values() {
        let points: Vec<Point> = vec![(f64::NAN, 0.0).into()];
        assert!(matches!(
            encode(&points, CodecOptions::default()),
            Err(CodecError::OutOfRange(_))
        ));
    }

    #[test]
    fn encode_rejects_short_tuples() {
        let points: Vec<Point> = vec![vec![1.0].into()];
        assert_eq!(
            encode(&points, CodecOptions::default()),
            Err(CodecError::ShapeMismatch {
                index: 0,
                dimension: 2
            })
        );
    }

    #[test]
    fn unflatten_drops_incomplete_trailing_tuple() {
        let points = unflatten(vec![1.0, 2.0, 3.0], 2);
        assert_eq!(points, vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn sequential_calls_share_no_state() {
        let a: Vec<Point> = vec![(51.0486, -114.0708).into(), (51.0622, -114.0201).into()];
        let b: Vec<Point> = vec![(53.5461, -113.4938).into()];
        let b_alone = encode(&b, CodecOptions::default()).unwrap();
        let _ = encode(&a, CodecOptions::default()).unwrap();
        let b_after_a = encode(&b, CodecOptions::default()).unwrap();
        assert_eq!(b_alone, b_after_a);
    }

    #[test]
    fn negative_deltas_round_trip() {
        let points: Vec<Point> = vec![
            (10.0, 10.0).into(),
            (9.99999, 9.99999).into(),
            (-10.0, -10.0).into(),
        ];
        let encoded = encode(&points, CodecOptions::default()).unwrap();
        let decoded = decode(&encoded, CodecOptions::default()).unwrap();
        assert_eq!(
            decoded,
            vec![
                vec![10.0, 10.0],
                vec![9.99999, 9.99999],
                vec![-10.0, -10.0]
            ]
        );
    }
}

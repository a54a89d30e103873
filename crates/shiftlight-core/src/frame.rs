//! Frame type and its line encoding
//!
//! A frame is one animation step: a set of LEDs that light up between two
//! RPM values, fading from a start color to an end color, optionally
//! blinking. Frames travel as single text lines:
//!
//! ```text
//! [1,2,4-6,8],1000,5000,0,0,0,255,255,255,0
//! ^ LEDs      ^ RPM     ^ start  ^ end   ^ blink mode [,blink value]
//! ```
//!
//! When decoding, the eight RPM and color fields may be expressions over a
//! [`VariableTable`]. Encoding always emits resolved integers, compresses
//! runs of three or more consecutive LEDs into `a-b` ranges and always ends
//! with the blink value (`0` when the frame does not blink).

use core::fmt;
use core::str::FromStr;

use crate::error::{DecodeError, EvalError};
use crate::variables::VariableTable;

/// Number of LEDs on the device, numbered from 1
pub const LED_COUNT: u8 = 13;

/// Highest RPM a frame may reference
pub const MAX_RPM: u16 = 9999;

/// Numeric fields of a frame line, in line order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// RPM at which the frame starts
    StartRpm,
    /// RPM at which the frame ends
    EndRpm,
    /// Red channel of the start color
    StartRed,
    /// Green channel of the start color
    StartGreen,
    /// Blue channel of the start color
    StartBlue,
    /// Red channel of the end color
    EndRed,
    /// Green channel of the end color
    EndGreen,
    /// Blue channel of the end color
    EndBlue,
    /// Blink mode selector
    BlinkMode,
    /// Parameter for non-zero blink modes
    BlinkValue,
}

const NUMERIC_FIELDS: [Field; 8] = [
    Field::StartRpm,
    Field::EndRpm,
    Field::StartRed,
    Field::StartGreen,
    Field::StartBlue,
    Field::EndRed,
    Field::EndGreen,
    Field::EndBlue,
];

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::StartRpm => "start RPM",
            Self::EndRpm => "end RPM",
            Self::StartRed => "start red",
            Self::StartGreen => "start green",
            Self::StartBlue => "start blue",
            Self::EndRed => "end red",
            Self::EndGreen => "end green",
            Self::EndBlue => "end blue",
            Self::BlinkMode => "blink mode",
            Self::BlinkValue => "blink value",
        };
        f.write_str(name)
    }
}

/// Set of LED indices in `1..=LED_COUNT`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LedSet(u16);

impl LedSet {
    /// Create an empty set
    pub const fn new() -> Self {
        Self(0)
    }

    /// Build a set from indices, rejecting any outside `1..=LED_COUNT`
    pub fn from_indices<I: IntoIterator<Item = u8>>(indices: I) -> Result<Self, DecodeError> {
        let mut set = Self::new();
        for index in indices {
            set.insert(index)?;
        }
        Ok(set)
    }

    /// Add an LED; returns whether it was newly inserted
    pub fn insert(&mut self, index: u8) -> Result<bool, DecodeError> {
        if !(1..=LED_COUNT).contains(&index) {
            return Err(DecodeError::LedIndexOutOfRange(index.into()));
        }
        let bit = 1u16 << index;
        let added = self.0 & bit == 0;
        self.0 |= bit;
        Ok(added)
    }

    /// Whether the LED is in the set
    pub fn contains(&self, index: u8) -> bool {
        index <= LED_COUNT && self.0 & (1u16 << index) != 0
    }

    /// Number of LEDs in the set
    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Iterate over indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=LED_COUNT).filter(move |&i| self.contains(i))
    }
}

/// Formats the set as it appears between the brackets of a frame line
impl fmt::Display for LedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let indices: Vec<u8> = self.iter().collect();
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if !first {
                f.write_str(",")?;
            }
            first = false;
            Ok(())
        };

        let mut i = 0;
        while i < indices.len() {
            let start = indices[i];
            let mut run = 1;
            while i + run < indices.len() && indices[i + run] == start + run as u8 {
                run += 1;
            }

            if run >= 3 {
                sep(f)?;
                write!(f, "{}-{}", start, indices[i + run - 1])?;
            } else {
                for &index in &indices[i..i + run] {
                    sep(f)?;
                    write!(f, "{}", index)?;
                }
            }
            i += run;
        }
        Ok(())
    }
}

/// RGB color
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Blink behavior of a frame
///
/// The two blink styles are interpreted by the device firmware; both carry
/// a parameter in `0..=255`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Blink {
    /// Steady light (mode 0)
    #[default]
    Off,
    /// Blink style 1 with its parameter
    Style1(u8),
    /// Blink style 2 with its parameter
    Style2(u8),
}

impl Blink {
    /// Mode number as sent on the wire
    pub fn mode(&self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Style1(_) => 1,
            Self::Style2(_) => 2,
        }
    }

    /// Blink parameter, present for every mode except [`Blink::Off`]
    pub fn value(&self) -> Option<u8> {
        match self {
            Self::Off => None,
            Self::Style1(v) | Self::Style2(v) => Some(*v),
        }
    }
}

/// One animation step
///
/// Frames are immutable and always valid: at least one LED, RPM values in
/// `0..=MAX_RPM` with `start_rpm <= end_rpm`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
    leds: LedSet,
    start_rpm: u16,
    end_rpm: u16,
    start_color: Rgb,
    end_color: Rgb,
    blink: Blink,
}

impl Frame {
    /// Create a frame, validating LED and RPM invariants
    pub fn new(
        leds: LedSet,
        start_rpm: u16,
        end_rpm: u16,
        start_color: Rgb,
        end_color: Rgb,
        blink: Blink,
    ) -> Result<Self, DecodeError> {
        if leds.is_empty() {
            return Err(DecodeError::EmptyLedSet);
        }
        check_rpm(Field::StartRpm, start_rpm.into())?;
        check_rpm(Field::EndRpm, end_rpm.into())?;
        if start_rpm > end_rpm {
            return Err(DecodeError::RpmOrderViolation {
                start: start_rpm.into(),
                end: end_rpm.into(),
            });
        }
        Ok(Self {
            leds,
            start_rpm,
            end_rpm,
            start_color,
            end_color,
            blink,
        })
    }

    /// Decode a frame line, resolving expressions against `vars` if given
    ///
    /// Without a variable table every numeric field must be a plain integer.
    /// Surrounding whitespace is trimmed before the `[` check, so
    /// `" [1],..."` is accepted.
    pub fn decode(line: &str, vars: Option<&VariableTable>) -> Result<Self, DecodeError> {
        let line = line.trim();
        if !line.starts_with('[') {
            return Err(DecodeError::MalformedBracket);
        }
        let close = line.find(']').ok_or(DecodeError::MalformedBracket)?;
        let leds = parse_led_list(&line[1..close])?;

        let rest = &line[close + 1..];
        if rest.trim().is_empty() {
            return Err(DecodeError::TooFewFields(0));
        }
        let rest = rest
            .strip_prefix(',')
            .ok_or(DecodeError::MissingFieldSeparator)?;

        let fields: Vec<&str> = rest.split(',').map(str::trim).collect();
        if fields.len() < 9 {
            return Err(DecodeError::TooFewFields(fields.len()));
        }

        let mut values = [0i32; 8];
        for (slot, (&field, text)) in values.iter_mut().zip(NUMERIC_FIELDS.iter().zip(&fields)) {
            *slot = resolve(text, vars)
                .map_err(|source| DecodeError::InvalidNumericField { field, source })?;
        }
        let [start_rpm, end_rpm, sr, sg, sb, er, eg, eb] = values;

        check_rpm(Field::StartRpm, start_rpm)?;
        check_rpm(Field::EndRpm, end_rpm)?;
        if start_rpm > end_rpm {
            return Err(DecodeError::RpmOrderViolation {
                start: start_rpm,
                end: end_rpm,
            });
        }
        let start_color = Rgb::new(
            channel(Field::StartRed, sr)?,
            channel(Field::StartGreen, sg)?,
            channel(Field::StartBlue, sb)?,
        );
        let end_color = Rgb::new(
            channel(Field::EndRed, er)?,
            channel(Field::EndGreen, eg)?,
            channel(Field::EndBlue, eb)?,
        );

        let blink = decode_blink(&fields, vars)?;

        Self::new(
            leds,
            start_rpm as u16,
            end_rpm as u16,
            start_color,
            end_color,
            blink,
        )
    }

    /// Encode this frame as a line (without trailing newline)
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// LEDs lit by this frame
    pub fn leds(&self) -> LedSet {
        self.leds
    }

    /// RPM at which the frame starts
    pub fn start_rpm(&self) -> u16 {
        self.start_rpm
    }

    /// RPM at which the frame ends
    pub fn end_rpm(&self) -> u16 {
        self.end_rpm
    }

    /// Color at the start RPM
    pub fn start_color(&self) -> Rgb {
        self.start_color
    }

    /// Color at the end RPM
    pub fn end_color(&self) -> Rgb {
        self.end_color
    }

    /// Blink behavior
    pub fn blink(&self) -> Blink {
        self.blink
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.start_color;
        let e = self.end_color;
        write!(
            f,
            "[{}],{},{},{},{},{},{},{},{},{},{}",
            self.leds,
            self.start_rpm,
            self.end_rpm,
            s.red,
            s.green,
            s.blue,
            e.red,
            e.green,
            e.blue,
            self.blink.mode(),
            self.blink.value().unwrap_or(0)
        )
    }
}

impl FromStr for Frame {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::decode(s, None)
    }
}

fn parse_led_list(list: &str) -> Result<LedSet, DecodeError> {
    let mut set = LedSet::new();

    for element in list.split(',') {
        let element = element.trim();
        if let Some((a, b)) = element.split_once('-') {
            let invalid = || DecodeError::InvalidRange(element.to_string());
            let start: i64 = a.trim().parse().map_err(|_| invalid())?;
            let end: i64 = b.trim().parse().map_err(|_| invalid())?;
            if start > end {
                return Err(invalid());
            }
            for index in start..=end {
                insert_index(&mut set, index)?;
            }
        } else {
            let index: i64 = element
                .parse()
                .map_err(|_| DecodeError::InvalidLedIndex(element.to_string()))?;
            insert_index(&mut set, index)?;
        }
    }

    Ok(set)
}

fn insert_index(set: &mut LedSet, index: i64) -> Result<(), DecodeError> {
    let index = u8::try_from(index).map_err(|_| DecodeError::LedIndexOutOfRange(index))?;
    set.insert(index)?;
    Ok(())
}

fn resolve(text: &str, vars: Option<&VariableTable>) -> Result<i32, EvalError> {
    match vars {
        Some(vars) => vars.evaluate(text),
        None if text.is_empty() => Err(EvalError::Empty),
        None => text
            .parse()
            .map_err(|_| EvalError::InvalidToken(text.to_string())),
    }
}

fn check_rpm(field: Field, value: i32) -> Result<(), DecodeError> {
    if !(0..=MAX_RPM as i32).contains(&value) {
        return Err(DecodeError::RpmRangeViolation { field, value });
    }
    Ok(())
}

fn channel(field: Field, value: i32) -> Result<u8, DecodeError> {
    u8::try_from(value).map_err(|_| DecodeError::ColorRangeViolation { field, value })
}

fn decode_blink(fields: &[&str], vars: Option<&VariableTable>) -> Result<Blink, DecodeError> {
    let mode_text = fields[8];
    let mode: u8 = mode_text
        .parse()
        .ok()
        .filter(|m| *m <= 2)
        .ok_or_else(|| DecodeError::InvalidBlinkMode(mode_text.to_string()))?;

    if mode == 0 {
        // A trailing 0 is how encoding spells "no blink value"
        let canonical_zero = fields.len() == 10 && resolve(fields[9], vars) == Ok(0);
        if fields.len() > 9 && !canonical_zero {
            return Err(DecodeError::TooManyFields {
                blink_mode: 0,
                allowed: 9,
                found: fields.len(),
            });
        }
        return Ok(Blink::Off);
    }

    let invalid = |reason: String| DecodeError::InvalidOptionalValue {
        blink_mode: mode,
        reason,
    };
    let text = fields
        .get(9)
        .ok_or_else(|| invalid("value is missing".to_string()))?;
    let value = resolve(text, vars).map_err(|e| invalid(e.to_string()))?;
    let value = u8::try_from(value).map_err(|_| invalid(format!("got {}", value)))?;

    if fields.len() > 10 {
        return Err(DecodeError::TooManyFields {
            blink_mode: mode,
            allowed: 10,
            found: fields.len(),
        });
    }

    let blink = match mode {
        1 => Blink::Style1(value),
        _ => Blink::Style2(value),
    };
    Ok(blink)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leds(indices: &[u8]) -> LedSet {
        LedSet::from_indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn test_decode_reference_line() {
        let frame = Frame::decode("[1,2,4-6,8],1000,5000,0,0,0,255,255,255,0", None).unwrap();
        assert_eq!(frame.leds(), leds(&[1, 2, 4, 5, 6, 8]));
        assert_eq!(frame.start_rpm(), 1000);
        assert_eq!(frame.end_rpm(), 5000);
        assert_eq!(frame.start_color(), Rgb::new(0, 0, 0));
        assert_eq!(frame.end_color(), Rgb::new(255, 255, 255));
        assert_eq!(frame.blink(), Blink::Off);
        assert_eq!(frame.blink().value(), None);
        assert_eq!(frame.encode(), "[1,2,4-6,8],1000,5000,0,0,0,255,255,255,0,0");
    }

    #[test]
    fn test_led_range_compression() {
        assert_eq!(leds(&[3, 4, 5, 8]).to_string(), "3-5,8");
        assert_eq!(leds(&[1, 2, 4, 6, 7, 9]).to_string(), "1,2,4,6,7,9");
        assert_eq!(leds(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]).to_string(), "1-13");
        assert_eq!(leds(&[13, 1, 12, 11]).to_string(), "1,11-13");
        assert_eq!(leds(&[5]).to_string(), "5");
    }

    #[test]
    fn test_led_list_is_a_set() {
        let a = Frame::decode("[5,1,1,2-3],0,0,0,0,0,0,0,0,0", None).unwrap();
        let b = Frame::decode("[1-3,5],0,0,0,0,0,0,0,0,0", None).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.leds().len(), 4);
    }

    #[test]
    fn test_round_trip() {
        let frames = [
            Frame::new(leds(&[1]), 0, 0, Rgb::default(), Rgb::default(), Blink::Off).unwrap(),
            Frame::new(
                leds(&[2, 3, 4, 7, 9, 10]),
                1500,
                9999,
                Rgb::new(0, 128, 255),
                Rgb::new(255, 0, 1),
                Blink::Style1(40),
            )
            .unwrap(),
            Frame::new(
                leds(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13]),
                6000,
                6000,
                Rgb::new(255, 0, 0),
                Rgb::new(255, 0, 0),
                Blink::Style2(0),
            )
            .unwrap(),
        ];
        for frame in frames {
            let line = frame.encode();
            assert_eq!(Frame::decode(&line, None).unwrap(), frame, "line: {}", line);
            assert_eq!(line.parse::<Frame>().unwrap(), frame);
        }
    }

    #[test]
    fn test_blink_modes() {
        let frame = Frame::decode("[1],0,0,0,0,0,0,0,0,1,200", None).unwrap();
        assert_eq!(frame.blink(), Blink::Style1(200));
        assert_eq!(frame.encode(), "[1],0,0,0,0,0,0,0,0,1,200");

        let frame = Frame::decode("[1],0,0,0,0,0,0,0,0,2,0", None).unwrap();
        assert_eq!(frame.blink(), Blink::Style2(0));
        assert_eq!(frame.encode(), "[1],0,0,0,0,0,0,0,0,2,0");

        let frame = Frame::decode("[1],0,0,0,0,0,0,0,0,2,255", None).unwrap();
        assert_eq!(frame.blink(), Blink::Style2(255));

        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,1", None),
            Err(DecodeError::InvalidOptionalValue { blink_mode: 1, .. })
        ));
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,2,256", None),
            Err(DecodeError::InvalidOptionalValue { blink_mode: 2, .. })
        ));
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,1,5,6", None),
            Err(DecodeError::TooManyFields { allowed: 10, found: 11, .. })
        ));
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,3", None),
            Err(DecodeError::InvalidBlinkMode(_))
        ));
    }

    #[test]
    fn test_blink_mode_rejects_expressions() {
        let vars = VariableTable::parse("one=1").unwrap();
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,one,5", Some(&vars)),
            Err(DecodeError::InvalidBlinkMode(_))
        ));
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,0+1,5", Some(&vars)),
            Err(DecodeError::InvalidBlinkMode(_))
        ));
    }

    #[test]
    fn test_blink_off_field_count() {
        assert!(Frame::decode("[1],0,0,0,0,0,0,0,0,0", None).is_ok());
        assert!(Frame::decode("[1],0,0,0,0,0,0,0,0,0,0", None).is_ok());
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,0,7", None),
            Err(DecodeError::TooManyFields { blink_mode: 0, .. })
        ));
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::TooManyFields { blink_mode: 0, .. })
        ));
    }

    #[test]
    fn test_rpm_validation() {
        assert!(matches!(
            Frame::decode("[1,2,4-6,8],6000,5000,0,0,0,255,255,255,0", None),
            Err(DecodeError::RpmOrderViolation { start: 6000, end: 5000 })
        ));
        assert!(matches!(
            Frame::decode("[1],0,10000,0,0,0,0,0,0,0", None),
            Err(DecodeError::RpmRangeViolation { field: Field::EndRpm, value: 10000 })
        ));
        assert!(matches!(
            Frame::decode("[1],-1,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::RpmRangeViolation { field: Field::StartRpm, .. })
        ));
    }

    #[test]
    fn test_color_validation() {
        assert!(matches!(
            Frame::decode("[1],0,0,0,256,0,0,0,0,0", None),
            Err(DecodeError::ColorRangeViolation { field: Field::StartGreen, value: 256 })
        ));
        assert!(matches!(
            Frame::decode("[1],0,0,0,0,0,0,0,-3,0", None),
            Err(DecodeError::ColorRangeViolation { field: Field::EndBlue, value: -3 })
        ));
    }

    #[test]
    fn test_bracket_errors() {
        assert_eq!(
            Frame::decode("1,0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::MalformedBracket)
        );
        assert_eq!(
            Frame::decode("[1,0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::MalformedBracket)
        );
        assert_eq!(
            Frame::decode(" x[1],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::MalformedBracket)
        );
        assert_eq!(
            Frame::decode("[1] 0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::MissingFieldSeparator)
        );
        assert_eq!(Frame::decode("[1]", None), Err(DecodeError::TooFewFields(0)));
    }

    #[test]
    fn test_decode_trims_surrounding_whitespace() {
        let frame = Frame::decode(" \t[1],0,0,0,0,0,0,0,0,0 \r\n", None).unwrap();
        assert_eq!(frame.leds(), leds(&[1]));
        assert_eq!(frame.encode(), "[1],0,0,0,0,0,0,0,0,0,0");
    }

    #[test]
    fn test_led_list_errors() {
        assert_eq!(
            Frame::decode("[6-4],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::InvalidRange("6-4".into()))
        );
        assert_eq!(
            Frame::decode("[1-2-3],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::InvalidRange("1-2-3".into()))
        );
        assert_eq!(
            Frame::decode("[0],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::LedIndexOutOfRange(0))
        );
        assert_eq!(
            Frame::decode("[12-14],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::LedIndexOutOfRange(14))
        );
        assert_eq!(
            Frame::decode("[a],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::InvalidLedIndex("a".into()))
        );
        assert_eq!(
            Frame::decode("[],0,0,0,0,0,0,0,0,0", None),
            Err(DecodeError::InvalidLedIndex("".into()))
        );
    }

    #[test]
    fn test_too_few_fields() {
        assert_eq!(
            Frame::decode("[1],0,0,0,0,0,0,0,0", None),
            Err(DecodeError::TooFewFields(8))
        );
    }

    #[test]
    fn test_expressions_need_variable_table() {
        let line = "[1-3],idle,redline-500,0,255/2,0,255,0,0,1,rate*2";
        assert!(matches!(
            Frame::decode(line, None),
            Err(DecodeError::InvalidNumericField { field: Field::StartRpm, .. })
        ));

        let vars = VariableTable::parse("idle=900\nredline=6500\nrate=20").unwrap();
        let frame = Frame::decode(line, Some(&vars)).unwrap();
        assert_eq!(frame.start_rpm(), 900);
        assert_eq!(frame.end_rpm(), 6000);
        assert_eq!(frame.start_color(), Rgb::new(0, 127, 0));
        assert_eq!(frame.blink(), Blink::Style1(40));
        assert_eq!(frame.encode(), "[1-3],900,6000,0,127,0,255,0,0,1,40");
    }

    #[test]
    fn test_undefined_variable_in_field() {
        let vars = VariableTable::new();
        let err = Frame::decode("[1],0,x,0,0,0,0,0,0,0", Some(&vars)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::InvalidNumericField {
                field: Field::EndRpm,
                source: EvalError::UndefinedVariable("x".into()),
            }
        );
    }

    #[test]
    fn test_frame_new_invariants() {
        assert_eq!(
            Frame::new(LedSet::new(), 0, 0, Rgb::default(), Rgb::default(), Blink::Off),
            Err(DecodeError::EmptyLedSet)
        );
        assert!(matches!(
            Frame::new(leds(&[1]), 10, 5, Rgb::default(), Rgb::default(), Blink::Off),
            Err(DecodeError::RpmOrderViolation { .. })
        ));
        assert!(LedSet::new().insert(14).is_err());
    }
}

//! Measurement units for explicit spaces and rule thicknesses

use crate::env::Environment;
use crate::error::{MathError, MathResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A TeX measurement unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    /// Quad of the current style
    Em,
    /// x-height of the current style
    Ex,
    /// 1/96 inch
    Pixel,
    Point,
    /// 12 points
    Pica,
    /// 1/18 em
    Mu,
    Centimeter,
    Millimeter,
    Inch,
    /// 1/65536 point
    ScaledPoint,
    /// PostScript point, 1/72 inch
    BigPoint,
    Didot,
    Cicero,
}

impl Unit {
    pub fn code(self) -> &'static str {
        match self {
            Unit::Em => "em",
            Unit::Ex => "ex",
            Unit::Pixel => "px",
            Unit::Point => "pt",
            Unit::Pica => "pc",
            Unit::Mu => "mu",
            Unit::Centimeter => "cm",
            Unit::Millimeter => "mm",
            Unit::Inch => "in",
            Unit::ScaledPoint => "sp",
            Unit::BigPoint => "bp",
            Unit::Didot => "dd",
            Unit::Cicero => "cc",
        }
    }

    /// Length of one unit under `env`
    pub fn factor(self, env: &Environment<'_>) -> f32 {
        let pt = env.point();
        match self {
            Unit::Em => env.constants().quad,
            Unit::Ex => env.constants().x_height,
            Unit::Mu => env.mu(),
            Unit::Point => pt,
            Unit::Pixel => 0.75 * pt,
            Unit::Pica => 12.0 * pt,
            Unit::Inch => 72.27 * pt,
            Unit::Centimeter => 72.27 / 2.54 * pt,
            Unit::Millimeter => 72.27 / 25.4 * pt,
            Unit::ScaledPoint => pt / 65536.0,
            Unit::BigPoint => 72.27 / 72.0 * pt,
            Unit::Didot => 1238.0 / 1157.0 * pt,
            Unit::Cicero => 12.0 * 1238.0 / 1157.0 * pt,
        }
    }
}

impl FromStr for Unit {
    type Err = MathError;

    fn from_str(s: &str) -> MathResult<Self> {
        let unit = match s {
            "em" => Unit::Em,
            "ex" => Unit::Ex,
            "px" | "pix" => Unit::Pixel,
            "pt" => Unit::Point,
            "pc" => Unit::Pica,
            "mu" => Unit::Mu,
            "cm" => Unit::Centimeter,
            "mm" => Unit::Millimeter,
            "in" => Unit::Inch,
            "sp" => Unit::ScaledPoint,
            "bp" => Unit::BigPoint,
            "dd" => Unit::Didot,
            "cc" => Unit::Cicero,
            other => return Err(MathError::InvalidUnit(other.to_string())),
        };
        Ok(unit)
    }
}

/// A value with a unit, resolved to a length at layout time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    pub value: f32,
    pub unit: Unit,
}

impl Dimension {
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, Unit::Point)
    }

    /// Build from a value and a unit code such as `"mu"`
    pub fn with_code(value: f32, code: &str) -> MathResult<Self> {
        Ok(Self::new(value, code.parse()?))
    }

    /// Parse `"<number><unit>"`, e.g. `"-1.5em"` or `"3 mu"`
    pub fn parse(text: &str) -> MathResult<Self> {
        let text = text.trim();
        let split = text
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| MathError::InvalidUnit(text.to_string()))?;
        let (number, code) = text.split_at(split);
        let value = number
            .trim()
            .parse::<f32>()
            .map_err(|_| MathError::InvalidUnit(text.to_string()))?;
        Self::with_code(value, code.trim())
    }

    pub fn to_length(&self, env: &Environment<'_>) -> f32 {
        self.value * self.unit.factor(env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Style;
    use crate::table_font::TableFont;

    #[test]
    fn test_parse_units() {
        assert_eq!("mu".parse::<Unit>().unwrap(), Unit::Mu);
        assert_eq!("pt".parse::<Unit>().unwrap(), Unit::Point);
        assert!(matches!(
            "furlong".parse::<Unit>(),
            Err(MathError::InvalidUnit(code)) if code == "furlong"
        ));
    }

    #[test]
    fn test_parse_dimension() {
        let d = Dimension::parse("-1.5em").unwrap();
        assert_eq!(d, Dimension::new(-1.5, Unit::Em));

        let d = Dimension::parse("3 mu").unwrap();
        assert_eq!(d, Dimension::new(3.0, Unit::Mu));

        assert!(Dimension::parse("12").is_err());
        assert!(Dimension::parse("abc").is_err());
        assert!(Dimension::parse("2qq").is_err());
    }

    #[test]
    fn test_unit_factors() {
        let font = TableFont::computer_modern();
        let env = Environment::new(&font, Style::Text);

        assert!((Dimension::new(18.0, Unit::Mu).to_length(&env) - 1.0).abs() < 1e-5);
        assert!((Dimension::new(1.0, Unit::Em).to_length(&env) - 1.0).abs() < 1e-6);
        assert!((Dimension::new(10.0, Unit::Point).to_length(&env) - 1.0).abs() < 1e-6);
        assert!((Dimension::new(1.0, Unit::Pica).to_length(&env) - 1.2).abs() < 1e-6);

        let script = env.sup_style();
        assert!(Unit::Em.factor(&script) < Unit::Em.factor(&env));
        assert_eq!(Unit::Point.factor(&script), Unit::Point.factor(&env));
    }
}

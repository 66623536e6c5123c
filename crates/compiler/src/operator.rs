use std::str::FromStr;

use crate::error::CompileError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    GreaterThan,
    LessThan,
    GreaterThanOrEqual,
    LessThanOrEqual,
    Equal,
    NotEqual,
    InsideRange,
    OutsideRange,
}

/// Comparisons for `"value" lower bound combinator "value" upper bound`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOperators {
    pub lower: &'static str,
    pub combinator: &'static str,
    pub upper: &'static str,
}

impl Operator {
    pub fn symbol(self) -> Result<&'static str, CompileError> {
        Ok(match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThanOrEqual => "<=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::InsideRange | Self::OutsideRange => {
                return Err(CompileError::UnknownOperator(self.to_string()))
            }
        })
    }

    pub fn range_symbols(self) -> Result<RangeOperators, CompileError> {
        match self {
            Self::InsideRange => Ok(RangeOperators {
                lower: ">=",
                combinator: "AND",
                upper: "<=",
            }),
            Self::OutsideRange => Ok(RangeOperators {
                lower: "<",
                combinator: "OR",
                upper: ">",
            }),
            _ => Err(CompileError::UnknownOperator(self.to_string())),
        }
    }
}

impl FromStr for Operator {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "greater than" => Self::GreaterThan,
            "less than" => Self::LessThan,
            "greater than or equal to" | "equal to or greater" => Self::GreaterThanOrEqual,
            "less than or equal to" | "equal to or less than" => Self::LessThanOrEqual,
            "equal to" => Self::Equal,
            "not equal to" => Self::NotEqual,
            "inside range" => Self::InsideRange,
            "outside range" => Self::OutsideRange,
            other => return Err(CompileError::UnknownOperator(other.to_string())),
        })
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::GreaterThan => "greater than",
            Self::LessThan => "less than",
            Self::GreaterThanOrEqual => "greater than or equal to",
            Self::LessThanOrEqual => "less than or equal to",
            Self::Equal => "equal to",
            Self::NotEqual => "not equal to",
            Self::InsideRange => "inside range",
            Self::OutsideRange => "outside range",
        })
    }
}

/// Symbol for a plain comparison operator name.
pub fn kapa_operator(name: &str) -> Result<&'static str, CompileError> {
    name.parse::<Operator>()?.symbol()
}

/// Symbols for a range operator name.
pub fn range_operators(name: &str) -> Result<RangeOperators, CompileError> {
    name.parse::<Operator>()?.range_symbols()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_symbols() {
        assert_eq!(kapa_operator("greater than").unwrap(), ">");
        assert_eq!(kapa_operator("less than").unwrap(), "<");
        assert_eq!(kapa_operator("equal to or greater").unwrap(), ">=");
        assert_eq!(kapa_operator("greater than or equal to").unwrap(), ">=");
        assert_eq!(kapa_operator("equal to or less than").unwrap(), "<=");
        assert_eq!(kapa_operator("less than or equal to").unwrap(), "<=");
        assert_eq!(kapa_operator("equal to").unwrap(), "==");
        assert_eq!(kapa_operator("not equal to").unwrap(), "!=");
    }

    #[test]
    fn range_symbols() {
        let inside = range_operators("inside range").unwrap();
        assert_eq!((inside.lower, inside.combinator, inside.upper), (">=", "AND", "<="));
        let outside = range_operators("outside range").unwrap();
        assert_eq!((outside.lower, outside.combinator, outside.upper), ("<", "OR", ">"));
    }

    #[test]
    fn unknown_operator() {
        let err = kapa_operator("about").unwrap_err();
        assert_eq!(err.to_string(), "invalid operator: about is unknown");
    }

    #[test]
    fn range_and_plain_do_not_mix() {
        assert!(kapa_operator("inside range").is_err());
        assert!(range_operators("greater than").is_err());
    }

    #[test]
    fn display_parses_back() {
        for op in [Operator::GreaterThanOrEqual, Operator::OutsideRange, Operator::NotEqual] {
            assert_eq!(op.to_string().parse::<Operator>().unwrap(), op);
        }
    }
}

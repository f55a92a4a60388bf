use crate::Value;
use crate::types::GraphQLType;
use raclette_parser::ast;

/// The built-in scalar types. Custom scalars go through
/// [`ScalarImpl`](crate::coercion::ScalarImpl) instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuiltinScalar {
    Boolean,
    Float,
    ID,
    Int,
    String,
}
impl BuiltinScalar {
    pub(crate) fn from_type(type_: &GraphQLType) -> Option<Self> {
        match type_ {
            GraphQLType::Bool => Some(Self::Boolean),
            GraphQLType::Float => Some(Self::Float),
            GraphQLType::ID => Some(Self::ID),
            GraphQLType::Int => Some(Self::Int),
            GraphQLType::String => Some(Self::String),
            _ => None,
        }
    }

    /// Input coercion of an externally supplied (variable) value.
    pub(crate) fn parse_value(&self, value: &Value) -> Option<Value> {
        match (self, value) {
            (Self::Boolean, Value::Boolean(b)) => Some(Value::Boolean(*b)),

            (Self::Float, Value::Int(i)) => Some(Value::Float(*i as f64)),
            (Self::Float, Value::Float(f)) if f.is_finite() => Some(Value::Float(*f)),

            (Self::ID, Value::String(s)) => Some(Value::String(s.clone())),
            (Self::ID, Value::Int(i)) => Some(Value::String(i.to_string())),

            (Self::Int, Value::Int(i)) => int32(*i).map(Value::Int),
            (Self::Int, Value::Float(f)) if f.fract() == 0.0 => float_to_int32(*f).map(Value::Int),

            (Self::String, Value::String(s)) => Some(Value::String(s.clone())),

            _ => None,
        }
    }

    /// Input coercion of a document literal. Variables are substituted by
    /// the caller.
    pub(crate) fn parse_literal(&self, literal: &ast::Value) -> Option<Value> {
        match (self, literal) {
            (Self::Boolean, ast::Value::Boolean(b)) => Some(Value::Boolean(*b)),

            (Self::Float, ast::Value::Int(i)) => Some(Value::Float(*i as f64)),
            (Self::Float, ast::Value::Float(f)) if f.is_finite() => Some(Value::Float(*f)),

            (Self::ID, ast::Value::String(s)) => Some(Value::String(s.clone())),
            (Self::ID, ast::Value::Int(i)) => Some(Value::String(i.to_string())),

            (Self::Int, ast::Value::Int(i)) => int32(*i).map(Value::Int),

            (Self::String, ast::Value::String(s)) => Some(Value::String(s.clone())),

            _ => None,
        }
    }

    /// Output coercion of a resolved value.
    pub(crate) fn serialize(&self, value: &Value) -> Result<Value, String> {
        match self {
            Self::Boolean => match value {
                Value::Boolean(b) => Ok(Value::Boolean(*b)),
                Value::Int(i) => Ok(Value::Boolean(*i != 0)),
                Value::Float(f) if f.is_finite() => Ok(Value::Boolean(*f != 0.0)),
                other => Err(format!("Boolean cannot represent a non boolean value: < {other} >")),
            },

            Self::Float => match value {
                Value::Int(i) => Ok(Value::Float(*i as f64)),
                Value::Float(f) if f.is_finite() => Ok(Value::Float(*f)),
                Value::Boolean(b) => Ok(Value::Float(if *b { 1.0 } else { 0.0 })),
                Value::String(s) => s
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(Value::Float)
                    .ok_or_else(|| format!("Float cannot represent non numeric value: < {value} >")),
                other => Err(format!("Float cannot represent non numeric value: < {other} >")),
            },

            Self::ID => match value {
                Value::String(s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                Value::Float(f) if f.fract() == 0.0 && f.is_finite() => {
                    Ok(Value::String(format!("{}", *f as i64)))
                }
                other => Err(format!("ID cannot represent value: < {other} >")),
            },

            Self::Int => {
                let as_int = match value {
                    Value::Int(i) => Some(*i),
                    Value::Float(f) if f.fract() == 0.0 => f64_to_i64(*f),
                    Value::Boolean(b) => Some(i64::from(*b)),
                    Value::String(s) => s.trim().parse::<i64>().ok().or_else(|| {
                        s.trim()
                            .parse::<f64>()
                            .ok()
                            .filter(|f| f.fract() == 0.0)
                            .and_then(f64_to_i64)
                    }),
                    _ => None,
                };
                match as_int {
                    Some(i) => int32(i).map(Value::Int).ok_or_else(|| {
                        format!("Int cannot represent non 32-bit signed integer value: < {value} >")
                    }),
                    None => Err(format!("Int cannot represent non-integer value: < {value} >")),
                }
            }

            Self::String => match value {
                Value::String(s) | Value::Enum(s) => Ok(Value::String(s.clone())),
                Value::Int(i) => Ok(Value::String(i.to_string())),
                Value::Float(f) if f.is_finite() => Ok(Value::String(f.to_string())),
                Value::Boolean(b) => Ok(Value::String(b.to_string())),
                other => Err(format!("String cannot represent value: < {other} >")),
            },
        }
    }
}

fn int32(i: i64) -> Option<i64> {
    i32::try_from(i).ok().map(i64::from)
}

fn f64_to_i64(f: f64) -> Option<i64> {
    if f.is_finite() && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn float_to_int32(f: f64) -> Option<i64> {
    f64_to_i64(f).and_then(int32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_is_32_bit() {
        assert_eq!(BuiltinScalar::Int.parse_value(&Value::Int(i32::MAX.into())), Some(Value::Int(2147483647)));
        assert_eq!(BuiltinScalar::Int.parse_value(&Value::Int(1 << 31)), None);
        assert_eq!(BuiltinScalar::Int.parse_literal(&ast::Value::Int(-(1 << 31) - 1)), None);
        assert_eq!(BuiltinScalar::Int.parse_value(&Value::Float(4.0)), Some(Value::Int(4)));
        assert_eq!(BuiltinScalar::Int.parse_value(&Value::Float(4.5)), None);
        assert_eq!(BuiltinScalar::Int.parse_value(&Value::from("4")), None);
    }

    #[test]
    fn int_output() {
        let int = BuiltinScalar::Int;
        assert_eq!(int.serialize(&Value::Float(3.0)), Ok(Value::Int(3)));
        assert_eq!(int.serialize(&Value::Boolean(true)), Ok(Value::Int(1)));
        assert_eq!(int.serialize(&Value::from(" 12 ")), Ok(Value::Int(12)));
        assert_eq!(
            int.serialize(&Value::Float(3.5)),
            Err("Int cannot represent non-integer value: < 3.5 >".to_string()),
        );
        assert_eq!(
            int.serialize(&Value::Int(1 << 40)),
            Err("Int cannot represent non 32-bit signed integer value: < 1099511627776 >".to_string()),
        );
    }

    #[test]
    fn id_accepts_strings_and_integers() {
        assert_eq!(BuiltinScalar::ID.parse_literal(&ast::Value::Int(7)), Some(Value::from("7")));
        assert_eq!(BuiltinScalar::ID.parse_value(&Value::from("a7")), Some(Value::from("a7")));
        assert_eq!(BuiltinScalar::ID.parse_literal(&ast::Value::Float(7.5)), None);
        assert_eq!(BuiltinScalar::ID.serialize(&Value::Int(7)), Ok(Value::from("7")));
    }

    #[test]
    fn other_output_rules() {
        assert_eq!(BuiltinScalar::Boolean.serialize(&Value::Int(0)), Ok(Value::Boolean(false)));
        assert!(BuiltinScalar::Boolean.serialize(&Value::from("yes")).is_err());
        assert_eq!(BuiltinScalar::Float.serialize(&Value::from("1.5")), Ok(Value::Float(1.5)));
        assert_eq!(BuiltinScalar::String.serialize(&Value::Int(5)), Ok(Value::from("5")));
        assert!(BuiltinScalar::String.serialize(&Value::object()).is_err());
        assert_eq!(BuiltinScalar::Float.parse_literal(&ast::Value::Int(2)), Some(Value::Float(2.0)));
        assert_eq!(BuiltinScalar::String.parse_literal(&ast::Value::Int(2)), None);
    }
}

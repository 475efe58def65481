//! Built-in scalar coercions.
//!
//! Applied when a scalar arrives for a field declaring a different scalar
//! kind, the mapping-layer equivalent of single-argument construction.
//! Failure is fatal for the whole decode.

use base64::Engine;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use crate::encode::{DEFAULT_DATE_FORMAT, DEFAULT_DATE_TIME_FORMAT, DEFAULT_TIME_FORMAT};
use crate::error::DecodeError;
use crate::type_def::ScalarKind;
use crate::value::Primitive;

pub fn coerce_scalar(value: &Primitive, kind: ScalarKind) -> Result<Primitive, DecodeError> {
    use Primitive as P;
    use ScalarKind as K;
    let fail = || DecodeError::ScalarCoercionFailure {
        target: kind.as_str(),
        value_kind: value.kind(),
    };
    Ok(match (value, kind) {
        (P::Int(i), K::Str) => P::Str(i.to_string()),
        (P::Float(f), K::Str) => P::Str(f.to_string()),
        (P::Bool(b), K::Str) => P::Str(b.to_string()),
        (P::Decimal(d), K::Str) => P::Str(d.to_string()),
        (P::Date(d), K::Str) => P::Str(d.format(DEFAULT_DATE_FORMAT).to_string()),
        (P::Time(t), K::Str) => P::Str(t.format(DEFAULT_TIME_FORMAT).to_string()),
        (P::DateTime(dt), K::Str) => P::Str(dt.format(DEFAULT_DATE_TIME_FORMAT).to_string()),
        (P::Duration(d), K::Str) => P::Str(d.to_string()),
        (P::Bytes(b), K::Str) => {
            P::Str(base64::engine::general_purpose::STANDARD.encode(b))
        }

        (P::Str(s), K::Int) => P::Int(s.trim().parse().map_err(|_| fail())?),
        (P::Float(f), K::Int) => P::Int(f.trunc() as i64),
        (P::Bool(b), K::Int) => P::Int(*b as i64),
        (P::Decimal(d), K::Int) => P::Int(d.to_i64().ok_or_else(fail)?),

        (P::Str(s), K::Float) => P::Float(s.trim().parse().map_err(|_| fail())?),
        (P::Int(i), K::Float) => P::Float(*i as f64),
        (P::Bool(b), K::Float) => P::Float(if *b { 1.0 } else { 0.0 }),
        (P::Decimal(d), K::Float) => P::Float(d.to_f64().ok_or_else(fail)?),

        (P::Str(s), K::Bool) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => P::Bool(true),
            "false" => P::Bool(false),
            _ => return Err(fail()),
        },
        (P::Int(i), K::Bool) => P::Bool(*i != 0),

        (P::Str(s), K::Decimal) => P::Decimal(s.trim().parse().map_err(|_| fail())?),
        (P::Int(i), K::Decimal) => P::Decimal(Decimal::from(*i)),
        (P::Float(f), K::Decimal) => P::Decimal(Decimal::from_f64(*f).ok_or_else(fail)?),

        (P::Str(s), K::Date) => P::Date(
            NaiveDate::parse_from_str(s.trim(), DEFAULT_DATE_FORMAT).map_err(|_| fail())?,
        ),
        (P::DateTime(dt), K::Date) => P::Date(dt.date()),

        (P::Str(s), K::Time) => P::Time(
            NaiveTime::parse_from_str(s.trim(), DEFAULT_TIME_FORMAT).map_err(|_| fail())?,
        ),

        (P::Str(s), K::DateTime) => P::DateTime(
            NaiveDateTime::parse_from_str(s.trim(), DEFAULT_DATE_TIME_FORMAT)
                .map_err(|_| fail())?,
        ),
        (P::Date(d), K::DateTime) => P::DateTime(d.and_hms_opt(0, 0, 0).ok_or_else(fail)?),

        (P::Int(i), K::Duration) => P::Duration(TimeDelta::try_seconds(*i).ok_or_else(fail)?),

        (P::Str(s), K::Bytes) => P::Bytes(
            base64::engine::general_purpose::STANDARD
                .decode(s.trim())
                .map_err(|_| fail())?,
        ),

        _ => return Err(fail()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_string_round_trips() {
        assert_eq!(
            coerce_scalar(&Primitive::Int(9), ScalarKind::Str).unwrap(),
            Primitive::Str("9".to_string())
        );
        assert_eq!(
            coerce_scalar(&Primitive::Str(" 42 ".to_string()), ScalarKind::Int).unwrap(),
            Primitive::Int(42)
        );
    }

    #[test]
    fn date_parsing_uses_fixed_formats() {
        let date = coerce_scalar(&Primitive::Str("2021-03-14".to_string()), ScalarKind::Date);
        assert_eq!(
            date.unwrap(),
            Primitive::Date(NaiveDate::from_ymd_opt(2021, 3, 14).unwrap())
        );
        let bad = coerce_scalar(&Primitive::Str("14/03/2021".to_string()), ScalarKind::Date);
        assert!(bad.is_err());
    }

    #[test]
    fn bool_strings_are_strict() {
        assert_eq!(
            coerce_scalar(&Primitive::Str("TRUE".to_string()), ScalarKind::Bool).unwrap(),
            Primitive::Bool(true)
        );
        assert!(coerce_scalar(&Primitive::Str("yes".to_string()), ScalarKind::Bool).is_err());
    }

    #[test]
    fn unsupported_pairs_fail_with_kind_names() {
        let err = coerce_scalar(&Primitive::Bool(true), ScalarKind::Date).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ScalarCoercionFailure {
                target: "date",
                value_kind: "bool"
            }
        );
    }
}

//! Per-call glue between SQLite and the interpreter bridge.

use crate::registry::{Delegate, ResultKind};
use crate::ShimError;
use interpreter_bridge::{BridgeResult, InterpreterBridge};
use rusqlite::functions::Context;
use rusqlite::types::{Value, ValueRef};
use tracing::warn;

/// What a delegate produced, before it is collapsed into a SQL value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Outcome {
    Text(String),
    Bool(bool),
}

/// Run `delegate` for one SQL invocation.
pub(crate) fn invoke(
    bridge: &InterpreterBridge,
    delegate: Delegate,
    ctx: &Context<'_>,
) -> rusqlite::Result<Value> {
    if ctx.len() != delegate.arity() {
        return Err(ShimError::WrongArgumentCount {
            function: delegate.sql_name(),
            expected: delegate.arity(),
        }
        .into());
    }

    let raw: Vec<ValueRef<'_>> = (0..ctx.len()).map(|i| ctx.get_raw(i)).collect();
    let Some(args) = text_args(&raw) else {
        return Ok(Value::Null);
    };

    bridge.ensure_initialized().map_err(ShimError::Init)?;

    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    let outcome = match delegate.result_kind() {
        ResultKind::Text => bridge
            .call_string(delegate.delegate_name(), &args)
            .map(Outcome::Text),
        ResultKind::Boolean => bridge
            .call_bool(delegate.delegate_name(), &args)
            .map(Outcome::Bool),
    };
    collapse(delegate, outcome)
}

/// Render SQL arguments as the strings handed to Python.
///
/// Returns `None` if any argument is NULL. Numbers are rendered the way
/// SQLite itself converts them to text, so `big_gt(10, 9)` behaves like
/// `big_gt('10', '9')` and `1000.0` arrives as `"1000.0"`.
pub(crate) fn text_args(values: &[ValueRef<'_>]) -> Option<Vec<String>> {
    values
        .iter()
        .map(|value| match *value {
            ValueRef::Null => None,
            ValueRef::Integer(i) => Some(i.to_string()),
            ValueRef::Real(f) => Some(real_text(f)),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Some(String::from_utf8_lossy(bytes).into_owned())
            }
        })
        .collect()
}

/// Render a REAL as SQLite's `CAST(x AS TEXT)` does: `%!.15g`, keeping a
/// `.0` on whole numbers and a two-digit signed exponent.
pub(crate) fn real_text(f: f64) -> String {
    if f.is_nan() {
        return "NaN".to_string();
    }
    if f.is_infinite() {
        return if f > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if f == 0.0 {
        return "0.0".to_string();
    }

    // 15 significant digits, rounded once.
    let sci = format!("{:.14e}", f.abs());
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return f.to_string();
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return f.to_string();
    };
    let digits = mantissa.replace('.', "");
    let sign = if f < 0.0 { "-" } else { "" };

    if !(-4..15).contains(&exp) {
        let (lead, rest) = digits.split_at(1);
        let frac = non_empty_fraction(rest);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        return format!("{sign}{lead}.{frac}e{exp_sign}{:02}", exp.abs());
    }

    if exp >= 0 {
        let (int, rest) = digits.split_at(exp as usize + 1);
        format!("{sign}{int}.{}", non_empty_fraction(rest))
    } else {
        let zeros = "0".repeat((-exp - 1) as usize);
        format!("{sign}0.{}", non_empty_fraction(&format!("{zeros}{digits}")))
    }
}

fn non_empty_fraction(digits: &str) -> &str {
    match digits.trim_end_matches('0') {
        "" => "0",
        trimmed => trimmed,
    }
}

/// Turn a bridge result into the SQL value returned to the caller.
///
/// An unavailable interpreter is a SQL error. Any other failure becomes
/// NULL for text functions and 0 for boolean ones, and is logged.
pub(crate) fn collapse(delegate: Delegate, outcome: BridgeResult<Outcome>) -> rusqlite::Result<Value> {
    match outcome {
        Ok(Outcome::Text(text)) => Ok(Value::Text(text)),
        Ok(Outcome::Bool(flag)) => Ok(Value::Integer(i64::from(flag))),
        Err(err) if err.is_init_failure() => Err(ShimError::Init(err).into()),
        Err(err) => {
            warn!(
                function = delegate.sql_name(),
                delegate = delegate.delegate_name(),
                error = %err,
                "delegate call failed, returning default"
            );
            Ok(match delegate.result_kind() {
                ResultKind::Text => Value::Null,
                ResultKind::Boolean => Value::Integer(0),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interpreter_bridge::BridgeError;

    #[test]
    fn text_args_passes_text_through() {
        let args = text_args(&[ValueRef::Text(b"0.25"), ValueRef::Text(b"1000")]).unwrap();
        assert_eq!(args, vec!["0.25".to_string(), "1000".to_string()]);
    }

    #[test]
    fn text_args_renders_numbers_like_sqlite_cast() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let cast = |value: &dyn rusqlite::ToSql| -> String {
            conn.query_row("SELECT CAST(?1 AS TEXT)", [value], |row| row.get(0))
                .unwrap()
        };

        for int in [0_i64, -42, 1000, i64::MAX, i64::MIN] {
            let args = text_args(&[ValueRef::Integer(int)]).unwrap();
            assert_eq!(args[0], cast(&int), "integer {int}");
        }

        let reals = [
            1000.0,
            1e20,
            123456789.123456789,
            1.5,
            -2.25,
            0.1,
            0.0001,
            1.5e-7,
            -3.0e-5,
            1e15,
            123456789012345.0,
            0.999999999999999,
            6.02214076e23,
            1.0e100,
        ];
        for real in reals {
            let args = text_args(&[ValueRef::Real(real)]).unwrap();
            assert_eq!(args[0], cast(&real), "real {real:e}");
        }
    }

    #[test]
    fn real_text_keeps_the_decimal_point() {
        assert_eq!(real_text(1000.0), "1000.0");
        assert_eq!(real_text(1e20), "1.0e+20");
        assert_eq!(real_text(123456789.123456789), "123456789.123457");
        assert_eq!(real_text(-1.5e-7), "-1.5e-07");
        assert_eq!(real_text(0.0), "0.0");
    }

    #[test]
    fn text_args_null_anywhere_yields_none() {
        assert!(text_args(&[ValueRef::Null]).is_none());
        assert!(text_args(&[ValueRef::Text(b"1"), ValueRef::Null]).is_none());
        assert!(text_args(&[ValueRef::Null, ValueRef::Text(b"1")]).is_none());
    }

    #[test]
    fn collapse_success_values() {
        assert_eq!(
            collapse(Delegate::StakerTokenRewards, Ok(Outcome::Text("7".into()))).unwrap(),
            Value::Text("7".into())
        );
        assert_eq!(
            collapse(Delegate::BigGt, Ok(Outcome::Bool(true))).unwrap(),
            Value::Integer(1)
        );
        assert_eq!(
            collapse(Delegate::BigGt, Ok(Outcome::Bool(false))).unwrap(),
            Value::Integer(0)
        );
    }

    #[test]
    fn collapse_delegate_failures_to_defaults() {
        let failure = || BridgeError::CallFailed {
            delegate: "x".into(),
            reason: "ValueError".into(),
        };
        assert_eq!(
            collapse(Delegate::NileOperatorTokenRewards, Err(failure())).unwrap(),
            Value::Null
        );
        assert_eq!(
            collapse(Delegate::BigGt, Err(failure())).unwrap(),
            Value::Integer(0)
        );
    }

    #[test]
    fn collapse_init_failures_to_sql_error() {
        let err = collapse(Delegate::BigGt, Err(BridgeError::ShutDown)).unwrap_err();
        assert!(err.to_string().contains("Failed to initialize Python"));
    }
}

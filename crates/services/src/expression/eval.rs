use crate::error::EvalError;
use crate::expression::parser::Parser;
use crate::expression::token::tokenize;

/// Evaluate a canonical expression to its answer string.
///
/// Formatting policy (pinned by tests): integer-valued results print as a
/// plain integer, non-integer results round to two decimals, and infinite
/// results become the `∞`/`-∞` sentinels. NaN and malformed input are
/// errors, which the session layer degrades to an empty answer.
///
/// A plain `a/b` fraction is computed as one exact division with the
/// denominator checked up front, rather than going through general
/// operator-precedence evaluation.
///
/// # Errors
///
/// `EvalError::ParseError` for input outside the grammar,
/// `EvalError::NotANumber` when the result is NaN, and
/// `EvalError::DivisionByZero` for a plain fraction with denominator 0.
pub fn evaluate(expression: &str) -> Result<String, EvalError> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(EvalError::ParseError("empty expression".to_string()));
    }

    if let Some((numerator, denominator)) = split_plain_fraction(trimmed) {
        if denominator == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        return format_value(numerator / denominator);
    }

    let tokens = tokenize(trimmed)?;
    let expr = Parser::new(tokens).parse()?;
    format_value(expr.value())
}

/// Recognize `<number>/<number>` with nothing else around it.
fn split_plain_fraction(expression: &str) -> Option<(f64, f64)> {
    let (left, right) = expression.split_once('/')?;
    if right.contains('/') {
        return None;
    }
    let numerator = left.trim().parse::<f64>().ok()?;
    let denominator = right.trim().parse::<f64>().ok()?;
    Some((numerator, denominator))
}

/// Apply the answer formatting policy to a raw numeric result.
fn format_value(value: f64) -> Result<String, EvalError> {
    if value.is_nan() {
        return Err(EvalError::NotANumber);
    }
    if value.is_infinite() {
        return Ok(if value > 0.0 { "∞" } else { "-∞" }.to_string());
    }
    if value == 0.0 {
        return Ok("0".to_string());
    }
    if value.fract() == 0.0 {
        return Ok(format!("{value}"));
    }
    Ok(format!("{value:.2}"))
}

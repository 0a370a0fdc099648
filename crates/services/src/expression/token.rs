use crate::error::EvalError;

/// Named unary functions of the canonical expression grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sqrt,
    Cbrt,
    Log10,
    Ln,
    Exp,
}

/// One lexical token of a canonical expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Num(f64),
    Pi,
    Func(Func),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    LPar,
    RPar,
    LBrace,
    RBrace,
    Bar,
}

/// Tokenize a canonical expression string.
///
/// Supports:
/// - decimal numbers (`12`, `3.5`, `.5`)
/// - operators `+ - * / % ^` and `mod` (alias for `%`)
/// - parentheses, exponent braces and absolute-value bars
/// - `π` or `pi`
/// - `√` / `∛` and the named functions `log`, `ln`
/// - `e^` as the exponential function
///
/// Anything outside the grammar is a `ParseError`; there is deliberately
/// no identifier escape hatch.
pub fn tokenize(s: &str) -> Result<Vec<Token>, EvalError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Token::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Token::RPar);
                i += 1;
                continue;
            }
            '{' => {
                out.push(Token::LBrace);
                i += 1;
                continue;
            }
            '}' => {
                out.push(Token::RBrace);
                i += 1;
                continue;
            }
            '|' => {
                out.push(Token::Bar);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Token::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Token::Minus);
                i += 1;
                continue;
            }
            '*' => {
                out.push(Token::Star);
                i += 1;
                continue;
            }
            '/' => {
                out.push(Token::Slash);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Token::Percent);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Token::Caret);
                i += 1;
                continue;
            }
            'π' => {
                out.push(Token::Pi);
                i += 1;
                continue;
            }
            '√' => {
                out.push(Token::Func(Func::Sqrt));
                i += 1;
                continue;
            }
            '∛' => {
                out.push(Token::Func(Func::Cbrt));
                i += 1;
                continue;
            }
            _ => {}
        }

        // Numbers: digits with an optional decimal point.
        if c.is_ascii_digit() || c == '.' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let value = text
                .parse::<f64>()
                .map_err(|_| EvalError::ParseError(format!("bad number: {text}")))?;
            out.push(Token::Num(value));
            continue;
        }

        // Words: function names, `pi`, `mod`, and `e` (only as `e^`).
        if c.is_ascii_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            match word.to_lowercase().as_str() {
                "log" => out.push(Token::Func(Func::Log10)),
                "ln" => out.push(Token::Func(Func::Ln)),
                "pi" => out.push(Token::Pi),
                "mod" => out.push(Token::Percent),
                "e" if i < chars.len() && chars[i] == '^' => {
                    i += 1;
                    out.push(Token::Func(Func::Exp));
                }
                _ => {
                    return Err(EvalError::ParseError(format!("unknown symbol: {word}")));
                }
            }
            continue;
        }

        return Err(EvalError::ParseError(format!("unexpected character: {c}")));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_sqrt_call() {
        let tokens = tokenize("√(16)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Func(Func::Sqrt),
                Token::LPar,
                Token::Num(16.0),
                Token::RPar
            ]
        );
    }

    #[test]
    fn tokenizes_exponent_braces() {
        let tokens = tokenize("(2)^{3}").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::LPar,
                Token::Num(2.0),
                Token::RPar,
                Token::Caret,
                Token::LBrace,
                Token::Num(3.0),
                Token::RBrace
            ]
        );
    }

    #[test]
    fn euler_requires_caret() {
        assert_eq!(
            tokenize("e^2").unwrap(),
            vec![Token::Func(Func::Exp), Token::Num(2.0)]
        );
        assert!(matches!(tokenize("e"), Err(EvalError::ParseError(_))));
    }

    #[test]
    fn mod_word_is_percent() {
        assert_eq!(
            tokenize("5 mod 3").unwrap(),
            vec![Token::Num(5.0), Token::Percent, Token::Num(3.0)]
        );
    }

    #[test]
    fn pi_spellings() {
        assert_eq!(tokenize("π").unwrap(), vec![Token::Pi]);
        assert_eq!(tokenize("pi").unwrap(), vec![Token::Pi]);
    }

    #[test]
    fn decimal_without_leading_zero() {
        assert_eq!(tokenize(".5").unwrap(), vec![Token::Num(0.5)]);
    }

    #[test]
    fn malformed_number_is_rejected() {
        assert!(matches!(tokenize("1.2.3"), Err(EvalError::ParseError(_))));
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        assert!(matches!(tokenize("sin(1)"), Err(EvalError::ParseError(_))));
        assert!(matches!(tokenize("@"), Err(EvalError::ParseError(_))));
    }
}

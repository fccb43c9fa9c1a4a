use crate::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpectedLiteralValue {
    Null,
    True,
    False,
    NaN,
    Infinity,
}

impl ExpectedLiteralValue {
    /// `true` for the keywords that stand for non-finite numbers.
    pub fn is_non_finite(self) -> bool {
        matches!(self, Self::NaN | Self::Infinity)
    }

    pub fn into_value(self, negative: bool) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::True => Value::Boolean(true),
            Self::False => Value::Boolean(false),
            Self::NaN => Value::Number(f64::NAN),
            Self::Infinity if negative => Value::Number(f64::NEG_INFINITY),
            Self::Infinity => Value::Number(f64::INFINITY),
        }
    }
}

/// What happened after feeding one more character into the literal matcher?
pub enum Step {
    /// Character matched, but the literal is not finished yet.
    NeedMore,
    /// Character matched *and* it was the last one of the literal.
    Done(ExpectedLiteralValue),
    /// Character did **not** match the expected one.
    Reject,
}

/// `None`  ➜  we are **not** in the middle of a literal
/// `Some`  ➜  `(remaining_bytes, literal_kind)` while matching
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ExpectedLiteralBuffer(Option<(&'static [u8], ExpectedLiteralValue)>);

impl ExpectedLiteralBuffer {
    /// Start matching after the *first* character. Returns `None` when no
    /// keyword starts with `first`.
    pub fn new(first: char) -> Option<Self> {
        let expected: (&'static [u8], _) = match first {
            'n' => (b"ull", ExpectedLiteralValue::Null),
            't' => (b"rue", ExpectedLiteralValue::True),
            'f' => (b"alse", ExpectedLiteralValue::False),
            'N' => (b"aN", ExpectedLiteralValue::NaN),
            'I' => return Some(Self::infinity()),
            _ => return None,
        };
        Some(ExpectedLiteralBuffer(Some(expected)))
    }

    /// Matcher for the rest of `Infinity`, for use after `-I`.
    pub fn infinity() -> Self {
        ExpectedLiteralBuffer(Some((b"nfinity", ExpectedLiteralValue::Infinity)))
    }

    /// The keyword being matched.
    pub fn kind(&self) -> Option<ExpectedLiteralValue> {
        self.0.map(|(_, kind)| kind)
    }

    /// Give the matcher the next input character and learn what to do next.
    pub fn step(&mut self, c: char) -> Step {
        let Some((bytes, kind)) = self.0.take() else {
            return Step::Reject;
        };

        match bytes.split_first() {
            Some((&expected, rest)) if char::from(expected) == c => {
                if rest.is_empty() {
                    Step::Done(kind)
                } else {
                    self.0 = Some((rest, kind));
                    Step::NeedMore
                }
            }
            _ => {
                // Mismatch – restore the state we took at the top
                self.0 = Some((bytes, kind));
                Step::Reject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_rest(first: char, rest: &str) -> Option<ExpectedLiteralValue> {
        let mut buf = ExpectedLiteralBuffer::new(first)?;
        for c in rest.chars() {
            match buf.step(c) {
                Step::NeedMore => {}
                Step::Done(kind) => return Some(kind),
                Step::Reject => return None,
            }
        }
        None
    }

    #[test]
    fn matches_every_keyword() {
        assert_eq!(match_rest('n', "ull"), Some(ExpectedLiteralValue::Null));
        assert_eq!(match_rest('t', "rue"), Some(ExpectedLiteralValue::True));
        assert_eq!(match_rest('f', "alse"), Some(ExpectedLiteralValue::False));
        assert_eq!(match_rest('N', "aN"), Some(ExpectedLiteralValue::NaN));
        assert_eq!(
            match_rest('I', "nfinity"),
            Some(ExpectedLiteralValue::Infinity)
        );
    }

    #[test]
    fn case_sensitive() {
        assert_eq!(match_rest('N', "an"), None);
        assert_eq!(match_rest('t', "RUE"), None);
        assert!(ExpectedLiteralBuffer::new('T').is_none());
    }

    #[test]
    fn reject_keeps_state() {
        let mut buf = ExpectedLiteralBuffer::new('n').unwrap();
        assert!(matches!(buf.step('x'), Step::Reject));
        assert!(matches!(buf.step('u'), Step::NeedMore));
        assert_eq!(buf.kind(), Some(ExpectedLiteralValue::Null));
    }

    #[test]
    fn infinity_matches_keyword_started_with_i() {
        assert_eq!(ExpectedLiteralBuffer::infinity(), ExpectedLiteralBuffer::new('I').unwrap());

        let mut buf = ExpectedLiteralBuffer::infinity();
        for c in "nfinit".chars() {
            assert!(matches!(buf.step(c), Step::NeedMore));
        }
        assert!(matches!(
            buf.step('y'),
            Step::Done(ExpectedLiteralValue::Infinity)
        ));
    }

    #[test]
    fn signed_infinity() {
        assert_eq!(
            ExpectedLiteralValue::Infinity.into_value(true),
            Value::Number(f64::NEG_INFINITY)
        );
        assert!(ExpectedLiteralValue::NaN.is_non_finite());
        assert!(!ExpectedLiteralValue::Null.is_non_finite());
    }
}

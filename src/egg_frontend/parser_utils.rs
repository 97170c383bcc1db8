use super::grammar::InfixOperator;
use super::token::{Token, TokenType};

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ParserOperator {
    Infix(InfixOperator),
    Assignment,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Precedence {
    // Lowest precedence
    Lowest,
    Assignment,
    LogicalAnd,
    LogicalOr,
    Equality,
    Comparison,
    Addition,
    Multiplication,
    Unary, // Highest precedence
}

#[derive(Debug, Clone, Copy)]
pub enum Associativity {
    Left,
    Right,
}

impl ParserOperator {
    pub fn from_token(token: &Token) -> Option<ParserOperator> {
        if token.token_type != TokenType::Operator {
            return None;
        }

        if token.value == "=" {
            return Some(ParserOperator::Assignment);
        }

        InfixOperator::from_symbol(&token.value).map(ParserOperator::Infix)
    }

    pub fn is_higher_precedence(&self, min_precedence: Precedence) -> bool {
        use std::cmp::Ordering;
        match self.precedence().cmp(&min_precedence) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => match self.associativity() {
                Associativity::Left => false,
                Associativity::Right => true,
            },
        }
    }

    pub fn precedence(&self) -> Precedence {
        match self {
            ParserOperator::Infix(op) => match op {
                InfixOperator::And => Precedence::LogicalAnd,
                InfixOperator::Or => Precedence::LogicalOr,
                InfixOperator::EqualTo | InfixOperator::NotEqualTo => Precedence::Equality,
                InfixOperator::GreaterEq
                | InfixOperator::LessEq
                | InfixOperator::GreaterThan
                | InfixOperator::LessThan => Precedence::Comparison,
                InfixOperator::Add | InfixOperator::Subtract => Precedence::Addition,
                InfixOperator::Multiply | InfixOperator::Divide => Precedence::Multiplication,
            },
            ParserOperator::Assignment => Precedence::Assignment,
        }
    }

    pub fn associativity(&self) -> Associativity {
        self.precedence().associativity()
    }
}

impl Precedence {
    fn associativity(&self) -> Associativity {
        match self {
            Precedence::Assignment => Associativity::Right,
            _ => Associativity::Left,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::more_asserts::*;

    #[test]
    fn test_precedence() {
        assert_lt!(Precedence::Lowest, Precedence::Unary);
        assert_lt!(Precedence::Assignment, Precedence::LogicalAnd);
        assert_lt!(Precedence::LogicalAnd, Precedence::LogicalOr);
        assert_gt!(Precedence::Multiplication, Precedence::Addition);
        assert_gt!(Precedence::Comparison, Precedence::Equality);
    }

    #[test]
    fn test_operators() {
        let op = |value: &str| Token::new(TokenType::Operator, value);

        assert_eq!(
            ParserOperator::from_token(&op("+")),
            Some(ParserOperator::Infix(InfixOperator::Add))
        );
        assert_eq!(
            ParserOperator::from_token(&op("|")),
            Some(ParserOperator::Infix(InfixOperator::Or))
        );
        assert_eq!(
            ParserOperator::from_token(&op("=")),
            Some(ParserOperator::Assignment)
        );

        assert_eq!(ParserOperator::from_token(&op("!")), None);
        assert_eq!(ParserOperator::from_token(&op("++")), None);
        assert_eq!(
            ParserOperator::from_token(&Token::new(TokenType::Identifier, "x")),
            None
        );
    }

    #[test]
    fn test_assignment_is_right_associative() {
        let assignment = ParserOperator::Assignment;
        assert!(assignment.is_higher_precedence(Precedence::Assignment));

        let add = ParserOperator::Infix(InfixOperator::Add);
        assert!(!add.is_higher_precedence(Precedence::Addition));
        assert!(add.is_higher_precedence(Precedence::Equality));
    }
}

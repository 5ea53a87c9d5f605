//! Note: Only number operations are implemented at the moment.
//! The type of the left operand wins: `Int` fields stay integers when combined with a float.
//! Overflows, divisions by zero and non-numeric operands all yield `Null`.
use super::*;
use bigdecimal::Zero;
use std::ops::*;

/// Used right now to reduce code duplication, probably needs to be scrapped once we need anything beyond that.
macro_rules! number_operation {
  ($trait_:ident, $fname:ident, $checked:ident, $op:tt) => {
    impl $trait_ for PrismaValue {
      type Output = PrismaValue;

      fn $fname(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
          (PrismaValue::Null, _) | (_, PrismaValue::Null) => PrismaValue::Null,

          (PrismaValue::Int(l), PrismaValue::Int(r)) => l.$checked(r).map(PrismaValue::Int).unwrap_or(PrismaValue::Null),
          (PrismaValue::BigInt(l), PrismaValue::BigInt(r) | PrismaValue::Int(r)) => {
              l.$checked(r).map(PrismaValue::BigInt).unwrap_or(PrismaValue::Null)
          }
          (PrismaValue::Int(l), PrismaValue::Float(r)) => r
              .to_i64()
              .and_then(|r| l.$checked(r))
              .map(PrismaValue::Int)
              .unwrap_or(PrismaValue::Null),

          (PrismaValue::Float(l), PrismaValue::Int(r) | PrismaValue::BigInt(r)) => BigDecimal::from_i64(r)
              .map(|r| PrismaValue::Float(l $op r))
              .unwrap_or(PrismaValue::Null),

          (PrismaValue::Float(l), PrismaValue::Float(r)) => PrismaValue::Float(l $op r),

          _ => PrismaValue::Null,
        }
      }
    }
  }
}

number_operation!(Add, add, checked_add, +);
number_operation!(Sub, sub, checked_sub, -);
number_operation!(Mul, mul, checked_mul, *);

impl Div for PrismaValue {
    type Output = PrismaValue;

    fn div(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (PrismaValue::Float(_), PrismaValue::Float(r)) if r.is_zero() => PrismaValue::Null,
            (PrismaValue::Float(l), PrismaValue::Float(r)) => PrismaValue::Float(l / r),
            (PrismaValue::Float(l), PrismaValue::Int(r) | PrismaValue::BigInt(r)) if r != 0 => {
                BigDecimal::from_i64(r)
                    .map(|r| PrismaValue::Float(l / r))
                    .unwrap_or(PrismaValue::Null)
            }
            (PrismaValue::Int(l), PrismaValue::Int(r)) => l.checked_div(r).map(PrismaValue::Int).unwrap_or(PrismaValue::Null),
            (PrismaValue::BigInt(l), PrismaValue::BigInt(r) | PrismaValue::Int(r)) => {
                l.checked_div(r).map(PrismaValue::BigInt).unwrap_or(PrismaValue::Null)
            }
            (PrismaValue::Int(l), PrismaValue::Float(r)) => r
                .to_i64()
                .and_then(|r| l.checked_div(r))
                .map(PrismaValue::Int)
                .unwrap_or(PrismaValue::Null),
            _ => PrismaValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_operations_are_checked() {
        assert_eq!(PrismaValue::Int(2) + PrismaValue::Int(3), PrismaValue::Int(5));
        assert_eq!(PrismaValue::Int(i64::MAX) + PrismaValue::Int(1), PrismaValue::Null);
        assert_eq!(PrismaValue::Int(4) / PrismaValue::Int(0), PrismaValue::Null);
    }

    #[test]
    fn the_left_operand_decides_the_result_type() {
        let one_and_a_half = PrismaValue::try_from(1.5).unwrap();

        assert_eq!(PrismaValue::Int(2) * one_and_a_half.clone(), PrismaValue::Int(2));
        assert_eq!(
            one_and_a_half * PrismaValue::Int(2),
            PrismaValue::Float(BigDecimal::from_i64(3).unwrap())
        );
    }

    #[test]
    fn non_numeric_operands_yield_null() {
        assert_eq!(PrismaValue::from("a") - PrismaValue::Int(1), PrismaValue::Null);
        assert_eq!(PrismaValue::Null * PrismaValue::Int(1), PrismaValue::Null);
    }
}

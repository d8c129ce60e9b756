use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::ServiceError;

/// Decimal places kept on every computed quantity.
pub const QUANTITY_SCALE: u32 = 3;

/// `round(average_demand * per_capita, 3)`, half away from zero.
///
/// Negative inputs are a data fault and abort the run instead of being
/// clamped.
pub fn compute_quantity(average_demand: Decimal, per_capita: Decimal) -> Result<Decimal, ServiceError> {
    if average_demand.is_sign_negative() && !average_demand.is_zero() {
        return Err(ServiceError::ComputationError(format!(
            "negative average demand {}",
            average_demand
        )));
    }
    if per_capita.is_sign_negative() && !per_capita.is_zero() {
        return Err(ServiceError::ComputationError(format!(
            "negative per capita {}",
            per_capita
        )));
    }

    let product = average_demand.checked_mul(per_capita).ok_or_else(|| {
        ServiceError::ComputationError(format!(
            "quantity overflow for {} x {}",
            average_demand, per_capita
        ))
    })?;

    let mut quantity =
        product.round_dp_with_strategy(QUANTITY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    quantity.rescale(QUANTITY_SCALE);
    Ok(quantity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    #[test]
    fn multiplies_and_keeps_three_places() {
        assert_eq!(compute_quantity(dec!(250), dec!(0.100)).unwrap(), dec!(25.000));
        assert_eq!(compute_quantity(dec!(250), dec!(0.080)).unwrap(), dec!(20.000));
        assert_eq!(
            compute_quantity(dec!(250), dec!(0.100)).unwrap().to_string(),
            "25.000"
        );
    }

    #[test]
    fn midpoint_rounds_away_from_zero() {
        // 0.0005 * 1 sits exactly on the midpoint
        assert_eq!(compute_quantity(dec!(1), dec!(0.0005)).unwrap(), dec!(0.001));
        assert_eq!(compute_quantity(dec!(3), dec!(0.0125)).unwrap(), dec!(0.038));
        assert_eq!(compute_quantity(dec!(7), dec!(0.00007)).unwrap(), dec!(0.000));
    }

    #[test]
    fn zero_demand_yields_zero() {
        assert_eq!(compute_quantity(Decimal::ZERO, dec!(0.125)).unwrap(), dec!(0.000));
    }

    #[test]
    fn negative_inputs_are_rejected() {
        assert_matches!(
            compute_quantity(dec!(-1), dec!(0.1)),
            Err(ServiceError::ComputationError(_))
        );
        assert_matches!(
            compute_quantity(dec!(10), dec!(-0.1)),
            Err(ServiceError::ComputationError(_))
        );
    }
}

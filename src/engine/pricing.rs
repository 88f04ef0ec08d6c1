use rust_decimal::prelude::*;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    #[error("invalid pricing input: {0}")]
    InvalidPricingInput(String),

    #[error("driver {0} has no valid price per kg")]
    DriverNotPriced(Uuid),
}

/// `unit_price * weight_kg * quantity + surcharge`, computed in decimal so the
/// stored total is the exact product of the stored inputs. No cent rounding is
/// applied.
pub fn price(
    unit_price: f64,
    weight_kg: f64,
    quantity: u32,
    surcharge: f64,
) -> Result<f64, PricingError> {
    let unit_price = positive("unit_price", unit_price)?;
    let weight = positive("weight_kg", weight_kg)?;
    if quantity == 0 {
        return Err(PricingError::InvalidPricingInput(
            "quantity must be > 0".to_string(),
        ));
    }
    let surcharge = non_negative("surcharge", surcharge)?;

    let total = unit_price
        .checked_mul(weight)
        .and_then(|subtotal| subtotal.checked_mul(Decimal::from(quantity)))
        .and_then(|subtotal| subtotal.checked_add(surcharge))
        .ok_or_else(|| {
            PricingError::InvalidPricingInput(format!(
                "total overflows for {unit_price} x {weight} kg x {quantity} + {surcharge}"
            ))
        })?;
    to_f64(total)
}

fn positive(field: &str, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(PricingError::InvalidPricingInput(format!(
            "{field} must be a finite number > 0, got {value}"
        )));
    }
    to_decimal(field, value)
}

fn non_negative(field: &str, value: f64) -> Result<Decimal, PricingError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PricingError::InvalidPricingInput(format!(
            "{field} must be a finite number >= 0, got {value}"
        )));
    }
    to_decimal(field, value)
}

fn to_decimal(field: &str, value: f64) -> Result<Decimal, PricingError> {
    Decimal::from_f64(value).ok_or_else(|| {
        PricingError::InvalidPricingInput(format!("{field} is out of range: {value}"))
    })
}

fn to_f64(value: Decimal) -> Result<f64, PricingError> {
    value
        .normalize()
        .to_f64()
        .ok_or_else(|| PricingError::InvalidPricingInput(format!("total {value} is not representable")))
}

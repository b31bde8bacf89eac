use crate::SafeMathError;

/**
 * WAD is the 1e18 fixed-point scale used for the sale price and the platform fee rate.
 */
pub const WAD: u128 = 1_000_000_000_000_000_000;

/**
 * x + y
 */
pub fn safe_add(x: u64, y: u64) -> Result<u64, SafeMathError> {
    let z = x.checked_add(y).ok_or(SafeMathError::AdditionOverflow)?;
    Ok(z)
}

/**
 * x - y
 */
pub fn safe_sub(x: u64, y: u64) -> Result<u64, SafeMathError> {
    let z = x
        .checked_sub(y)
        .ok_or(SafeMathError::SubtractionUnderflow)?;
    Ok(z)
}

/**
 * (x * y) / d, rounded down
 */
pub fn mul_div_down(x: u128, y: u128, d: u128) -> Result<u128, SafeMathError> {
    let xy = x
        .checked_mul(y)
        .ok_or(SafeMathError::MultiplicationOverflow)?;
    let z = xy.checked_div(d).ok_or(SafeMathError::DivisionUnderflow)?;
    Ok(z)
}

/**
 * (x * y) / WAD, rounded down
 */
pub fn mul_wad_down(x: u64, y: u64) -> Result<u64, SafeMathError> {
    to_u64(mul_div_down(u128::from(x), u128::from(y), WAD)?)
}

/**
 * (x * WAD) / y, rounded down
 */
pub fn div_wad_down(x: u64, y: u128) -> Result<u64, SafeMathError> {
    to_u64(mul_div_down(u128::from(x), WAD, y)?)
}

pub fn to_u64(x: u128) -> Result<u64, SafeMathError> {
    u64::try_from(x).map_err(|_| SafeMathError::ConversionOverflow)
}

//! Decimal arithmetic for derived figures that pins at the representable
//! range instead of panicking.

use rust_decimal::Decimal;

pub(crate) fn saturating_sum(amounts: impl IntoIterator<Item = Decimal>) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, Decimal::saturating_add)
}

/// Zero when `denominator` is zero.
pub(crate) fn saturating_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(
        if numerator.is_sign_negative() == denominator.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        },
    )
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
pub(crate) fn percent(part: Decimal, whole: Decimal) -> Decimal {
    saturating_div(part, whole).saturating_mul(Decimal::ONE_HUNDRED)
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Formatter;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Shl, Shr, Sub, SubAssign,
};

/// Failure modes of fixed-point arithmetic.
///
/// The operator impls (`+`, `-`, `*`, `/`, `%`) panic with one of these; the
/// `checked_*` methods return them instead, for callers that want to propagate
/// with `?`. There are no other failure modes: every operation is otherwise
/// total and allocation-free.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ArithmeticError {
    /// The result does not fit in the 32-bit raw range.
    Overflow,
    /// The divisor was exactly zero.
    DivideByZero,
}

impl fmt::Display for ArithmeticError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ArithmeticError::Overflow => write!(f, "fixed-point overflow"),
            ArithmeticError::DivideByZero => write!(f, "fixed-point division by zero"),
        }
    }
}

impl std::error::Error for ArithmeticError {}

/// A deterministic Q16.16 fixed-point number.
///
/// The value is `raw / 65536` exactly, stored in a single `i32`: 16 integer
/// bits, 16 fractional bits. Unlike `f32`/`f64`, every operation on [`Fix`] is
/// implemented with integer arithmetic only, so results are bit-identical
/// across platforms, architectures and compilers. That determinism is the
/// whole point of the type -- lockstep simulations can hash, replay and
/// cross-check state built out of it.
///
/// Arithmetic refuses to silently wrap: `+`, `-`, `*` and `/` panic on
/// overflow (and `/`, `%` on a zero divisor), mirroring checked semantics.
/// Use [`Fix::checked_add`] and friends to get a [`Result`] instead, or
/// [`Fix::saturating_div`] for the clamping division used by `tan`.
///
/// # Examples
///
/// ```
/// use glsh::fix::Fix;
///
/// let a = Fix::from_int(3);
/// let b = Fix::from_int(2);
/// assert_eq!((a / b).to_f32(), 1.5);
/// assert_eq!((a / b).to_string(), "1.5");
/// ```
#[derive(Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fix {
    raw: i32,
}

impl Fix {
    pub const ZERO: Fix = Fix::from_raw(0);
    pub const ONE: Fix = Fix::from_raw(0x0001_0000);
    pub const MIN: Fix = Fix::from_raw(i32::MIN);
    pub const MAX: Fix = Fix::from_raw(i32::MAX);

    // Raw literals rather than computed values, so the bit patterns can never
    // drift between builds.
    pub const PI: Fix = Fix::from_raw(205_887);
    pub const E: Fix = Fix::from_raw(178_145);

    /// Creates a fixed-point number from its raw Q16.16 representation.
    /// Bit-exact; this is how all constants are defined.
    #[must_use]
    pub const fn from_raw(raw: i32) -> Fix {
        Fix { raw }
    }

    /// The raw Q16.16 representation. `value == raw / 65536` exactly.
    #[must_use]
    pub const fn raw(self) -> i32 {
        self.raw
    }

    /// Converts a whole number, panicking if it falls outside the
    /// representable integer range [-32768, 32767].
    #[must_use]
    pub fn from_int(v: i32) -> Fix {
        match Fix::checked_from_int(v) {
            Ok(x) => x,
            Err(e) => panic!("fix::from_int({v}): {e}"),
        }
    }

    /// Range-checked form of [`Fix::from_int`].
    pub fn checked_from_int(v: i32) -> Result<Fix, ArithmeticError> {
        if !(-0x8000..=0x7FFF).contains(&v) {
            Err(ArithmeticError::Overflow)
        } else {
            Ok(Fix::from_raw(v << 16))
        }
    }

    /// Truncates toward negative infinity, like an arithmetic shift:
    /// `Fix::from_f32(-0.5).to_int() == -1`, not 0.
    #[must_use]
    pub const fn to_int(self) -> i32 {
        self.raw >> 16
    }

    /// Converts from `f32`, rounding half away from zero. Values outside the
    /// representable range saturate at [`Fix::MIN`]/[`Fix::MAX`]; NaN maps to
    /// zero. Use only at the boundary of deterministic code -- the result
    /// depends on the float input.
    #[must_use]
    pub fn from_f32(v: f32) -> Fix {
        let scaled = v * Fix::ONE.raw as f32;
        let rounded = scaled + if scaled >= 0.0 { 0.5 } else { -0.5 };
        Fix::from_raw(rounded as i32)
    }

    /// Converts from `f64`, rounding half away from zero; see [`Fix::from_f32`].
    #[must_use]
    pub fn from_f64(v: f64) -> Fix {
        let scaled = v * f64::from(Fix::ONE.raw);
        let rounded = scaled + if scaled >= 0.0 { 0.5 } else { -0.5 };
        Fix::from_raw(rounded as i32)
    }

    #[must_use]
    pub fn to_f32(self) -> f32 {
        self.raw as f32 / Fix::ONE.raw as f32
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        f64::from(self.raw) / f64::from(Fix::ONE.raw)
    }

    /// Raw integer addition with explicit sign-bit overflow detection: the sum
    /// overflowed iff both operands share a sign and the wrapped result does
    /// not.
    pub fn checked_add(self, rhs: Fix) -> Result<Fix, ArithmeticError> {
        let (a, b) = (self.raw, rhs.raw);
        let sum = a.wrapping_add(b);
        if (a ^ b) >= 0 && (a ^ sum) < 0 {
            Err(ArithmeticError::Overflow)
        } else {
            Ok(Fix::from_raw(sum))
        }
    }

    /// Raw integer subtraction; overflow iff the operands differ in sign and
    /// the wrapped result's sign differs from the minuend's.
    pub fn checked_sub(self, rhs: Fix) -> Result<Fix, ArithmeticError> {
        let (a, b) = (self.raw, rhs.raw);
        let diff = a.wrapping_sub(b);
        if (a ^ b) < 0 && (a ^ diff) < 0 {
            Err(ArithmeticError::Overflow)
        } else {
            Ok(Fix::from_raw(diff))
        }
    }

    /// Widens to 64 bits (the product of two Q16.16 values is Q32.32), rejects
    /// products whose top 17 bits are not a plain sign extension, then rescales
    /// with a sign-scaled half-LSB bias and a truncating divide: round half
    /// away from zero. The divide, not a shift -- an arithmetic shift would
    /// floor negative products and break `-(a * b) == (-a) * b`. Biased
    /// products just under `1 << 47` pass the sign-extension check and wrap
    /// through the final narrowing to `MIN`, matching the reference
    /// truncation.
    pub fn checked_mul(self, rhs: Fix) -> Result<Fix, ArithmeticError> {
        let mut product = i64::from(self.raw) * i64::from(rhs.raw);
        let upper = product >> 47;
        if upper != 0 && upper != -1 {
            return Err(ArithmeticError::Overflow);
        }
        product += 0x8000 * product.signum();
        Ok(Fix::from_raw((product / (1 << 16)) as i32))
    }

    /// Widen-and-shift division: the dividend is promoted to Q32.32 so the
    /// quotient lands back on the Q16.16 scale, truncated toward zero.
    pub fn checked_div(self, rhs: Fix) -> Result<Fix, ArithmeticError> {
        if rhs.raw == 0 {
            return Err(ArithmeticError::DivideByZero);
        }
        let scaled = i64::from(self.raw) << 16;
        let quotient = scaled / i64::from(rhs.raw);
        if quotient > i64::from(i32::MAX) || quotient < i64::from(i32::MIN) {
            return Err(ArithmeticError::Overflow);
        }
        Ok(Fix::from_raw(quotient as i32))
    }

    /// Remainder on the raw representation directly; modulo is scale-invariant
    /// so no rescaling is needed.
    pub fn checked_rem(self, rhs: Fix) -> Result<Fix, ArithmeticError> {
        if rhs.raw == 0 {
            return Err(ArithmeticError::DivideByZero);
        }
        Ok(Fix::from_raw(self.raw.wrapping_rem(rhs.raw)))
    }

    /// Division that clamps to [`Fix::MAX`]/[`Fix::MIN`] (by the XOR of the
    /// operands' signs) instead of panicking when the quotient overflows or
    /// the divisor is zero. `tan` uses this near the poles of `cos`.
    #[must_use]
    pub fn saturating_div(self, rhs: Fix) -> Fix {
        match self.checked_div(rhs) {
            Ok(q) if q != Fix::MIN => q,
            _ => {
                if (self.raw >= 0) == (rhs.raw >= 0) {
                    Fix::MAX
                } else {
                    Fix::MIN
                }
            }
        }
    }
}

impl From<i16> for Fix {
    /// `i16` covers exactly the representable integer range, so this
    /// conversion can never fail.
    fn from(v: i16) -> Fix {
        Fix::from_raw(i32::from(v) << 16)
    }
}

impl TryFrom<i32> for Fix {
    type Error = ArithmeticError;

    fn try_from(v: i32) -> Result<Fix, ArithmeticError> {
        Fix::checked_from_int(v)
    }
}

impl Add for Fix {
    type Output = Fix;
    fn add(self, rhs: Fix) -> Fix {
        match self.checked_add(rhs) {
            Ok(sum) => sum,
            Err(e) => panic!("fix addition: {e}"),
        }
    }
}

impl Sub for Fix {
    type Output = Fix;
    fn sub(self, rhs: Fix) -> Fix {
        match self.checked_sub(rhs) {
            Ok(diff) => diff,
            Err(e) => panic!("fix subtraction: {e}"),
        }
    }
}

impl Mul for Fix {
    type Output = Fix;
    fn mul(self, rhs: Fix) -> Fix {
        match self.checked_mul(rhs) {
            Ok(product) => product,
            Err(e) => panic!("fix multiplication: {e}"),
        }
    }
}

impl Div for Fix {
    type Output = Fix;
    fn div(self, rhs: Fix) -> Fix {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(e) => panic!("fix division: {e}"),
        }
    }
}

impl Rem for Fix {
    type Output = Fix;
    fn rem(self, rhs: Fix) -> Fix {
        match self.checked_rem(rhs) {
            Ok(rem) => rem,
            Err(e) => panic!("fix remainder: {e}"),
        }
    }
}

impl Neg for Fix {
    type Output = Fix;
    /// Wrapping negation on the raw bits; `-Fix::MIN` stays `Fix::MIN`.
    fn neg(self) -> Fix {
        Fix::from_raw(self.raw.wrapping_neg())
    }
}

impl Shl<u32> for Fix {
    type Output = Fix;
    fn shl(self, shift: u32) -> Fix {
        Fix::from_raw(self.raw << shift)
    }
}

impl Shr<u32> for Fix {
    type Output = Fix;
    fn shr(self, shift: u32) -> Fix {
        Fix::from_raw(self.raw >> shift)
    }
}

impl AddAssign for Fix {
    fn add_assign(&mut self, rhs: Fix) {
        *self = *self + rhs;
    }
}
impl SubAssign for Fix {
    fn sub_assign(&mut self, rhs: Fix) {
        *self = *self - rhs;
    }
}
impl MulAssign for Fix {
    fn mul_assign(&mut self, rhs: Fix) {
        *self = *self * rhs;
    }
}
impl DivAssign for Fix {
    fn div_assign(&mut self, rhs: Fix) {
        *self = *self / rhs;
    }
}
impl RemAssign for Fix {
    fn rem_assign(&mut self, rhs: Fix) {
        *self = *self % rhs;
    }
}

impl num_traits::Zero for Fix {
    fn zero() -> Fix {
        Fix::ZERO
    }
    fn is_zero(&self) -> bool {
        self.raw == 0
    }
}

impl num_traits::One for Fix {
    fn one() -> Fix {
        Fix::ONE
    }
}

// 5^16; 65536 = 2^16 divides 10^16, so raw/65536 always terminates within
// 16 decimal digits and the fraction can be rendered exactly as
// frac * 5^16, zero-padded to 16 places.
const FRAC_SCALE: u64 = 152_587_890_625;

impl fmt::Display for Fix {
    /// Exact decimal rendering of `raw / 65536`, computed in integer
    /// arithmetic: never a binary-float approximation, never locale-dependent.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let magnitude = self.raw.unsigned_abs();
        let sign = if self.raw < 0 { "-" } else { "" };
        let int = magnitude >> 16;
        let frac = u64::from(magnitude & 0xFFFF);
        if frac == 0 {
            return write!(f, "{sign}{int}");
        }
        let mut digits = format!("{:016}", frac * FRAC_SCALE);
        while digits.ends_with('0') {
            digits.pop();
        }
        write!(f, "{sign}{int}.{digits}")
    }
}

impl fmt::Debug for Fix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "fix({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::{One, Zero};

    fn fix(v: i32) -> Fix {
        Fix::from_int(v)
    }

    // ==================== Constants & Construction ====================

    #[test]
    fn constants_are_raw_literals() {
        assert_eq!(Fix::ZERO.raw(), 0);
        assert_eq!(Fix::ONE.raw(), 0x0001_0000);
        assert_eq!(Fix::MIN.raw(), i32::MIN);
        assert_eq!(Fix::MAX.raw(), i32::MAX);
        assert_eq!(Fix::PI.raw(), 205_887);
        assert_eq!(Fix::E.raw(), 178_145);
    }

    #[test]
    fn from_raw_round_trips() {
        assert_eq!(Fix::from_raw(0x0001_0000).to_f32(), 1.0);
        assert_eq!(Fix::from_raw(12345).raw(), 12345);
    }

    #[test]
    fn from_int_round_trips_in_range() {
        for v in [-32768, -1, 0, 1, 7, 32767] {
            assert_eq!(fix(v).to_int(), v);
        }
    }

    #[test]
    fn from_int_rejects_out_of_range() {
        assert_eq!(Fix::checked_from_int(32768), Err(ArithmeticError::Overflow));
        assert_eq!(Fix::checked_from_int(-32769), Err(ArithmeticError::Overflow));
        assert_eq!(Fix::try_from(32768), Err(ArithmeticError::Overflow));
        assert_eq!(Fix::try_from(100), Ok(fix(100)));
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn from_int_panics_past_max() {
        let _ = Fix::from_int(32768);
    }

    #[test]
    fn from_i16_is_exact() {
        assert_eq!(Fix::from(i16::MIN), fix(-32768));
        assert_eq!(Fix::from(i16::MAX), fix(32767));
    }

    #[test]
    fn to_int_truncates_toward_negative_infinity() {
        assert_eq!(Fix::from_f32(-0.5).to_int(), -1);
        assert_eq!(Fix::from_f32(0.5).to_int(), 0);
        assert_eq!(Fix::from_f32(-1.5).to_int(), -2);
        assert_eq!(Fix::from_f32(1.9).to_int(), 1);
    }

    #[test]
    fn float_conversions_round_half_away_from_zero() {
        assert_eq!(Fix::from_f64(0.5).raw(), 0x8000);
        assert_eq!(Fix::from_f64(-0.5).raw(), -0x8000);
        // Half a raw unit rounds away from zero.
        assert_eq!(Fix::from_f64(1.0 / 131072.0).raw(), 1);
        assert_eq!(Fix::from_f64(-1.0 / 131072.0).raw(), -1);
        assert_eq!(Fix::from_f32(1.0), Fix::ONE);
    }

    // ==================== Addition & Subtraction ====================

    #[test]
    fn addition_is_exact() {
        assert_eq!(fix(5) + fix(3), fix(8));
        assert_eq!(Fix::from_f32(0.25) + Fix::from_f32(0.25), Fix::from_f32(0.5));
    }

    #[test]
    fn additive_identity_and_inverse() {
        for raw in [0, 1, -1, 0x8000, i32::MAX, i32::MIN + 1] {
            let a = Fix::from_raw(raw);
            assert_eq!(a + Fix::ZERO, a);
            assert_eq!(a - a, Fix::ZERO);
        }
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn addition_overflow_panics() {
        let _ = Fix::MAX + Fix::ONE;
    }

    #[test]
    fn checked_add_reports_overflow() {
        assert_eq!(Fix::MAX.checked_add(Fix::ONE), Err(ArithmeticError::Overflow));
        assert_eq!(
            Fix::MIN.checked_sub(Fix::ONE),
            Err(ArithmeticError::Overflow)
        );
        // Mixed signs can never overflow.
        assert_eq!(Fix::MAX.checked_add(-Fix::ONE), Ok(Fix::MAX - Fix::ONE));
    }

    // ==================== Multiplication ====================

    #[test]
    fn multiplicative_identity() {
        for raw in [0, 1, -1, 0x8000, 0x7FFF_0000, i32::MIN + 1] {
            let a = Fix::from_raw(raw);
            assert_eq!(a * Fix::ONE, a);
        }
    }

    #[test]
    fn multiplication_rounds_to_nearest() {
        // 0.5 * 0.5 = 0.25 exactly.
        let half = Fix::from_raw(0x8000);
        assert_eq!(half * half, Fix::from_raw(0x4000));
        // Smallest positive raw squared: (2^-16)^2 rounds to zero.
        assert_eq!(Fix::from_raw(1) * Fix::from_raw(1), Fix::ZERO);
        // (1 + 2^-16) * 0.5 = 0.5 + 2^-17, which rounds away from zero.
        assert_eq!(Fix::from_raw(0x0001_0001) * half, Fix::from_raw(0x8001));
        // Negative mirror of the same rounding.
        assert_eq!(Fix::from_raw(-0x0001_0001) * half, Fix::from_raw(-0x8001));
    }

    #[test]
    fn multiplication_is_sign_symmetric() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};
        let mut rng = StdRng::seed_from_u64(0x5159);
        for _ in 0..1000 {
            let a = Fix::from_raw(rng.gen_range(-0x0100_0000..0x0100_0000));
            let b = Fix::from_raw(rng.gen_range(-0x0000_7FFF..0x0000_7FFF));
            assert_eq!(-(a * b), (-a) * b, "a={a:?} b={b:?}");
            assert_eq!(a * b, (-a) * (-b), "a={a:?} b={b:?}");
        }
    }

    #[test]
    #[should_panic(expected = "overflow")]
    fn multiplication_overflow_panics() {
        let _ = Fix::MAX * Fix::from_raw(Fix::ONE.raw() + 1);
    }

    #[test]
    fn checked_mul_boundaries() {
        assert_eq!(
            Fix::MAX.checked_mul(Fix::from_raw(Fix::ONE.raw() + 1)),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(fix(181).checked_mul(fix(181)), Ok(fix(32761)));
        assert_eq!(fix(182).checked_mul(fix(182)), Err(ArithmeticError::Overflow));
    }

    // ==================== Division & Remainder ====================

    #[test]
    fn division_identities() {
        for raw in [1, -1, 0x8000, 0x1234_5678, -0x1234_5678] {
            let a = Fix::from_raw(raw);
            assert_eq!(a / Fix::ONE, a);
            assert_eq!(a / a, Fix::ONE);
        }
    }

    #[test]
    fn three_halves_is_exact() {
        assert_eq!(fix(3) / fix(2), Fix::from_f32(1.5));
        assert_eq!((fix(3) / fix(2)).raw(), 0x0001_8000);
    }

    #[test]
    #[should_panic(expected = "division by zero")]
    fn division_by_zero_panics() {
        // Throwing policy: a zero divisor is an error, not a sentinel.
        let _ = fix(1) / Fix::ZERO;
    }

    #[test]
    fn checked_div_reports_both_errors() {
        assert_eq!(fix(1).checked_div(Fix::ZERO), Err(ArithmeticError::DivideByZero));
        assert_eq!(
            Fix::MAX.checked_div(Fix::from_raw(1)),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(fix(10).checked_div(fix(4)), Ok(Fix::from_f32(2.5)));
    }

    #[test]
    fn saturating_div_clamps_by_sign() {
        assert_eq!(fix(1).saturating_div(Fix::ZERO), Fix::MAX);
        assert_eq!(fix(-1).saturating_div(Fix::ZERO), Fix::MIN);
        assert_eq!(Fix::MAX.saturating_div(Fix::from_raw(1)), Fix::MAX);
        assert_eq!(Fix::MAX.saturating_div(Fix::from_raw(-1)), Fix::MIN);
        assert_eq!(fix(6).saturating_div(fix(3)), fix(2));
    }

    #[test]
    fn remainder_works_on_raw() {
        assert_eq!(fix(7) % fix(2), fix(1));
        assert_eq!(fix(-7) % fix(2), fix(-1));
        assert_eq!(Fix::PI % (Fix::PI >> 1), Fix::from_raw(Fix::PI.raw() & 1));
        assert_eq!(fix(1).checked_rem(Fix::ZERO), Err(ArithmeticError::DivideByZero));
    }

    // ==================== Shifts, Negation, Ordering ====================

    #[test]
    fn shifts_act_on_raw_bits() {
        assert_eq!(Fix::ONE << 1, fix(2));
        assert_eq!(fix(2) >> 1, Fix::ONE);
        assert_eq!((Fix::PI << 1).raw(), 411_774);
    }

    #[test]
    fn negation_wraps_at_min() {
        assert_eq!(-fix(5), fix(-5));
        assert_eq!(-Fix::MIN, Fix::MIN);
    }

    #[test]
    fn ordering_is_total_and_numeric() {
        assert!(Fix::MIN < fix(-1));
        assert!(fix(-1) < Fix::ZERO);
        assert!(Fix::ZERO < Fix::from_raw(1));
        assert!(Fix::PI < Fix::PI + Fix::from_raw(1));
        assert!(Fix::MAX > fix(32767));
    }

    #[test]
    fn assign_operators() {
        let mut a = fix(5);
        a += fix(3);
        assert_eq!(a, fix(8));
        a -= Fix::ONE;
        assert_eq!(a, fix(7));
        a *= fix(2);
        assert_eq!(a, fix(14));
        a /= fix(7);
        assert_eq!(a, fix(2));
        a %= fix(2);
        assert_eq!(a, Fix::ZERO);
    }

    #[test]
    fn zero_one_traits() {
        assert_eq!(Fix::zero(), Fix::ZERO);
        assert!(Fix::ZERO.is_zero());
        assert_eq!(Fix::one(), Fix::ONE);
    }

    // ==================== Display ====================

    #[test]
    fn display_is_exact_decimal() {
        assert_eq!(Fix::from_f32(1.5).to_string(), "1.5");
        assert_eq!(Fix::from_f32(-0.5).to_string(), "-0.5");
        assert_eq!(Fix::from_f32(0.25).to_string(), "0.25");
        assert_eq!(fix(42).to_string(), "42");
        assert_eq!(Fix::MIN.to_string(), "-32768");
        // One raw unit is 2^-16, which has a full 16-digit expansion.
        assert_eq!(Fix::from_raw(1).to_string(), "0.0000152587890625");
        assert_eq!(format!("{:?}", Fix::from_f32(1.5)), "fix(1.5)");
    }
}

//! ed25519 point-validity check.
//!
//! A 32-byte string encodes an Edwards point as the little-endian
//! y-coordinate with the sign of x in bit 255. Decoding recovers x from
//!
//! `-x^2 + y^2 = 1 + d x^2 y^2`  =>  `x^2 = (y^2 - 1) / (d y^2 + 1)`
//!
//! and the encoding is a valid point iff that ratio is a square in
//! GF(2^255 - 19). The sign bit never affects validity, and y values in
//! [p, 2^255) are reduced rather than rejected, matching the decompression
//! rule the chain applies when it checks program addresses.

mod field;

use field::FieldElement;

/// Whether `bytes` decodes to a point on the ed25519 curve.
pub fn is_on_curve(bytes: &[u8; 32]) -> bool {
    let y = FieldElement::from_bytes(bytes);
    let yy = y.square();
    let u = &yy - &FieldElement::ONE;
    let v = &(&yy * &FieldElement::EDWARDS_D) + &FieldElement::ONE;
    ratio_is_square(&u, &v)
}

/// Whether u/v has a square root, using a single exponentiation:
///
/// `r = u v^3 (u v^7)^((p-5)/8)`, then `v r^2` is one of `u`, `-u`,
/// `u * sqrt(-1)`, `-u * sqrt(-1)`. Only the first two mean a root exists.
/// `v` is never zero here because d is not a square.
fn ratio_is_square(u: &FieldElement, v: &FieldElement) -> bool {
    let v3 = &v.square() * v;
    let v7 = &v3.square() * v;
    let r = &(u * &v3) * (u * &v7).pow_p58();
    let check = v * &r.square();

    let correct_sign = check.ct_eq(u);
    let flipped_sign = check.ct_eq(&-u);
    correct_sign | flipped_sign
}

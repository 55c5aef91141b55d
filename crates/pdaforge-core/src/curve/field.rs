//! Arithmetic in GF(2^255 - 19).
//!
//! Elements are five unsigned 51-bit limbs, least significant first.
//! Products are accumulated in `u128` and folded back with the identity
//! `2^255 = 19 (mod p)`. Every operation runs the same instruction sequence
//! regardless of the values involved; there are no data-dependent branches.
//!
//! Limb bound invariant: every element handed out by this module has limbs
//! below 2^52, which keeps all intermediate sums inside `u64`/`u128`.

use std::ops::{Add, Mul, Neg, Sub};

const LOW_51_BIT_MASK: u64 = (1u64 << 51) - 1;

/// 16 * p, limb-wise. Added before subtracting so limbs never underflow.
const SIXTEEN_P: [u64; 5] = [
    36_028_797_018_963_664,
    36_028_797_018_963_952,
    36_028_797_018_963_952,
    36_028_797_018_963_952,
    36_028_797_018_963_952,
];

#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement([u64; 5]);

impl FieldElement {
    pub(crate) const ZERO: Self = Self([0, 0, 0, 0, 0]);
    pub(crate) const ONE: Self = Self([1, 0, 0, 0, 0]);

    /// Edwards curve constant d = -121665/121666.
    pub(crate) const EDWARDS_D: Self = Self([
        929_955_233_495_203,
        466_365_720_129_213,
        1_662_059_464_998_953,
        2_033_849_074_728_123,
        1_442_794_654_840_575,
    ]);

    /// Load 32 little-endian bytes. The top bit (bit 255) is ignored and
    /// values in [p, 2^255) are accepted and reduced lazily.
    pub(crate) fn from_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 5];
        let mut acc: u128 = 0;
        let mut bits = 0u32;
        let mut i = 0usize;
        for &b in bytes.iter() {
            acc |= (b as u128) << bits;
            bits += 8;
            if bits >= 51 && i < 5 {
                limbs[i] = (acc as u64) & LOW_51_BIT_MASK;
                acc >>= 51;
                bits -= 51;
                i += 1;
            }
        }
        Self(limbs)
    }

    /// Canonical little-endian encoding, fully reduced mod p.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut limbs = Self::weak_reduce(self.0);

        // q = 1 iff limbs >= p, computed by propagating the carry of limbs + 19.
        let mut q = (limbs[0] + 19) >> 51;
        q = (limbs[1] + q) >> 51;
        q = (limbs[2] + q) >> 51;
        q = (limbs[3] + q) >> 51;
        q = (limbs[4] + q) >> 51;

        limbs[0] += 19 * q;
        limbs[1] += limbs[0] >> 51;
        limbs[0] &= LOW_51_BIT_MASK;
        limbs[2] += limbs[1] >> 51;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[3] += limbs[2] >> 51;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[4] += limbs[3] >> 51;
        limbs[3] &= LOW_51_BIT_MASK;
        // dropping bit 255 subtracts 2^255, finishing the subtraction of p
        limbs[4] &= LOW_51_BIT_MASK;

        let mut out = [0u8; 32];
        let mut acc: u128 = 0;
        let mut bits = 0u32;
        let mut idx = 0usize;
        for limb in limbs {
            acc |= (limb as u128) << bits;
            bits += 51;
            while bits >= 8 && idx < 32 {
                out[idx] = acc as u8;
                acc >>= 8;
                bits -= 8;
                idx += 1;
            }
        }
        if idx < 32 {
            out[idx] = acc as u8;
        }
        out
    }

    /// Carry each limb into the next, folding the top carry back times 19.
    /// Output limbs are below 2^51 + 2^13 * 19.
    fn weak_reduce(mut limbs: [u64; 5]) -> [u64; 5] {
        let c0 = limbs[0] >> 51;
        let c1 = limbs[1] >> 51;
        let c2 = limbs[2] >> 51;
        let c3 = limbs[3] >> 51;
        let c4 = limbs[4] >> 51;

        limbs[0] &= LOW_51_BIT_MASK;
        limbs[1] &= LOW_51_BIT_MASK;
        limbs[2] &= LOW_51_BIT_MASK;
        limbs[3] &= LOW_51_BIT_MASK;
        limbs[4] &= LOW_51_BIT_MASK;

        limbs[0] += c4 * 19;
        limbs[1] += c0;
        limbs[2] += c1;
        limbs[3] += c2;
        limbs[4] += c3;
        limbs
    }

    pub(crate) fn square(&self) -> Self {
        self * self
    }

    /// Square `k` times in a row.
    fn pow2k(&self, k: u32) -> Self {
        let mut out = *self;
        for _ in 0..k {
            out = out.square();
        }
        out
    }

    /// Returns (self^(2^250 - 1), self^11).
    fn pow22501(&self) -> (Self, Self) {
        let t0 = self.square(); // 2
        let t1 = t0.square().square(); // 8
        let t2 = self * &t1; // 9
        let t3 = &t0 * &t2; // 11
        let t4 = t3.square(); // 22
        let t5 = &t2 * &t4; // 2^5 - 1
        let t6 = t5.pow2k(5);
        let t7 = &t6 * &t5; // 2^10 - 1
        let t8 = t7.pow2k(10);
        let t9 = &t8 * &t7; // 2^20 - 1
        let t10 = t9.pow2k(20);
        let t11 = &t10 * &t9; // 2^40 - 1
        let t12 = t11.pow2k(10);
        let t13 = &t12 * &t7; // 2^50 - 1
        let t14 = t13.pow2k(50);
        let t15 = &t14 * &t13; // 2^100 - 1
        let t16 = t15.pow2k(100);
        let t17 = &t16 * &t15; // 2^200 - 1
        let t18 = t17.pow2k(50);
        let t19 = &t18 * &t13; // 2^250 - 1
        (t19, t3)
    }

    /// self^((p - 5) / 8) = self^(2^252 - 3)
    pub(crate) fn pow_p58(&self) -> Self {
        let (t19, _) = self.pow22501();
        let t20 = t19.pow2k(2);
        self * &t20
    }

    /// Constant-shape equality on canonical encodings.
    pub(crate) fn ct_eq(&self, other: &Self) -> bool {
        let a = self.to_bytes();
        let b = other.to_bytes();
        let diff = a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y));
        diff == 0
    }
}

impl<'a, 'b> Add<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn add(self, rhs: &'b FieldElement) -> FieldElement {
        let mut limbs = [0u64; 5];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = self.0[i] + rhs.0[i];
        }
        FieldElement(FieldElement::weak_reduce(limbs))
    }
}

impl<'a, 'b> Sub<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn sub(self, rhs: &'b FieldElement) -> FieldElement {
        let mut limbs = [0u64; 5];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = (self.0[i] + SIXTEEN_P[i]) - rhs.0[i];
        }
        FieldElement(FieldElement::weak_reduce(limbs))
    }
}

impl<'a> Neg for &'a FieldElement {
    type Output = FieldElement;

    fn neg(self) -> FieldElement {
        &FieldElement::ZERO - self
    }
}

impl<'a, 'b> Mul<&'b FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: &'b FieldElement) -> FieldElement {
        #[inline(always)]
        fn m(x: u64, y: u64) -> u128 {
            (x as u128) * (y as u128)
        }

        let a = &self.0;
        let b = &rhs.0;

        // limbs of b above index 0 wrap past 2^255 when multiplied; pre-scale by 19
        let b1_19 = b[1] * 19;
        let b2_19 = b[2] * 19;
        let b3_19 = b[3] * 19;
        let b4_19 = b[4] * 19;

        let c0 = m(a[0], b[0]) + m(a[4], b1_19) + m(a[3], b2_19) + m(a[2], b3_19) + m(a[1], b4_19);
        let mut c1 = m(a[1], b[0]) + m(a[0], b[1]) + m(a[4], b2_19) + m(a[3], b3_19) + m(a[2], b4_19);
        let mut c2 = m(a[2], b[0]) + m(a[1], b[1]) + m(a[0], b[2]) + m(a[4], b3_19) + m(a[3], b4_19);
        let mut c3 = m(a[3], b[0]) + m(a[2], b[1]) + m(a[1], b[2]) + m(a[0], b[3]) + m(a[4], b4_19);
        let mut c4 = m(a[4], b[0]) + m(a[3], b[1]) + m(a[2], b[2]) + m(a[1], b[3]) + m(a[0], b[4]);

        let mut out = [0u64; 5];

        c1 += (c0 >> 51) as u128;
        out[0] = (c0 as u64) & LOW_51_BIT_MASK;

        c2 += (c1 >> 51) as u128;
        out[1] = (c1 as u64) & LOW_51_BIT_MASK;

        c3 += (c2 >> 51) as u128;
        out[2] = (c2 as u64) & LOW_51_BIT_MASK;

        c4 += (c3 >> 51) as u128;
        out[3] = (c3 as u64) & LOW_51_BIT_MASK;

        let carry = (c4 >> 51) as u64;
        out[4] = (c4 as u64) & LOW_51_BIT_MASK;

        out[0] += carry * 19;
        out[1] += out[0] >> 51;
        out[0] &= LOW_51_BIT_MASK;

        FieldElement(out)
    }
}

impl<'a> Mul<FieldElement> for &'a FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: FieldElement) -> FieldElement {
        self * &rhs
    }
}

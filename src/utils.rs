pub fn gcd_unsigned(mut a: u64, mut b: u64) -> u64 {
    let mut c;
    while a != 0 {
        c = a;
        a = b % a;
        b = c;
    }
    b
}

/// Compute `a * b mod m` without overflow.
#[inline(always)]
pub fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

#[inline(always)]
pub fn add_mod(a: u64, b: u64, m: u64) -> u64 {
    let (s, overflow) = a.overflowing_add(b);
    if overflow || s >= m {
        s.wrapping_sub(m)
    } else {
        s
    }
}

#[inline(always)]
pub fn sub_mod(a: u64, b: u64, m: u64) -> u64 {
    if a >= b {
        a - b
    } else {
        m - (b - a)
    }
}

pub fn pow_mod(mut b: u64, mut e: u64, m: u64) -> u64 {
    if m == 1 {
        return 0;
    }

    let mut r = 1;
    b %= m;
    while e != 0 {
        if e & 1 == 1 {
            r = mul_mod(r, b, m);
        }
        b = mul_mod(b, b, m);
        e >>= 1;
    }
    r
}

/// Compute the inverse of `a` modulo `m` using the extended Euclidean algorithm.
/// Returns `None` when `gcd(a, m) != 1`.
pub fn inv_mod(a: u64, m: u64) -> Option<u64> {
    let (mut r0, mut r1) = (m as i128, (a % m) as i128);
    let (mut t0, mut t1) = (0i128, 1i128);

    while r1 != 0 {
        let q = r0 / r1;
        (r0, r1) = (r1, r0 - q * r1);
        (t0, t1) = (t1, t0 - q * t1);
    }

    if r0 != 1 {
        return None;
    }

    if t0 < 0 {
        t0 += m as i128;
    }
    Some(t0 as u64)
}

/// The inverse of an odd `a` modulo `2^64`, obtained by Newton iteration.
/// Every step doubles the number of correct low bits, starting from 3.
pub fn inv_mod_word(a: u64) -> Option<u64> {
    if a & 1 == 0 {
        return None;
    }

    let mut x = a;
    for _ in 0..5 {
        x = x.wrapping_mul(2u64.wrapping_sub(a.wrapping_mul(x)));
    }
    Some(x)
}

/// `2^64 mod m`.
#[inline]
pub fn two_pow_64_mod(m: u64) -> u64 {
    ((u64::MAX % m) + 1) % m
}

/// Number of bits required to represent `n`.
#[inline]
pub fn bits(n: u64) -> u32 {
    u64::BITS - n.leading_zeros()
}

//! Building blocks of the low-discrepancy sequences the built-in
//! provider can generate: radical inverses (Halton), generator matrix
//! products (Sobol'), and the hashes used to scramble them.

// viewpoints
use crate::core::rng::FLOAT_ONE_MINUS_EPSILON;
use crate::core::viewpoints::Float;

/// Primes used as bases for the first Halton dimensions.
pub const PRIMES: [u16; 7] = [2, 3, 5, 7, 11, 13, 17];

/// Generator matrices of the first two Sobol' dimensions, one column per
/// entry, most significant bit first.
pub const C_SOBOL: [[u32; 32]; 2] = [
    [
        0x80000000, 0x40000000, 0x20000000, 0x10000000, 0x8000000, 0x4000000, 0x2000000,
        0x1000000, 0x800000, 0x400000, 0x200000, 0x100000, 0x80000, 0x40000, 0x20000, 0x10000,
        0x8000, 0x4000, 0x2000, 0x1000, 0x800, 0x400, 0x200, 0x100, 0x80, 0x40, 0x20, 0x10, 0x8,
        0x4, 0x2, 0x1,
    ],
    [
        0x80000000, 0xc0000000, 0xa0000000, 0xf0000000, 0x88000000, 0xcc000000, 0xaa000000,
        0xff000000, 0x80800000, 0xc0c00000, 0xa0a00000, 0xf0f00000, 0x88880000, 0xcccc0000,
        0xaaaa0000, 0xffff0000, 0x80008000, 0xc000c000, 0xa000a000, 0xf000f000, 0x88008800,
        0xcc00cc00, 0xaa00aa00, 0xff00ff00, 0x80808080, 0xc0c0c0c0, 0xa0a0a0a0, 0xf0f0f0f0,
        0x88888888, 0xcccccccc, 0xaaaaaaaa, 0xffffffff,
    ],
];

/// The bits of an integer quantity can be efficiently reversed with a
/// series of logical bit operations.
pub fn reverse_bits_32(n: u32) -> u32 {
    let mut n = (n << 16) | (n >> 16);
    n = ((n & 0x00ff00ff) << 8) | ((n & 0xff00ff00) >> 8);
    n = ((n & 0x0f0f0f0f) << 4) | ((n & 0xf0f0f0f0) >> 4);
    n = ((n & 0x33333333) << 2) | ((n & 0xcccccccc) >> 2);
    n = ((n & 0x55555555) << 1) | ((n & 0xaaaaaaaa) >> 1);
    n
}

/// Multiply the generator matrix *c* with the bits of index *a*: XOR
/// together the columns that belong to set bits.
pub fn multiply_generator(c: &[u32; 32], a: u32) -> u32 {
    let mut v: u32 = 0_u32;
    let mut a: u32 = a; // shadowing input parameter
    let mut i: usize = 0;
    while a != 0 {
        if a & 1 != 0 {
            v ^= c[i];
        }
        a >>= 1;
        i += 1;
    }
    v
}

/// Map 32 fraction bits to [0, 1).
pub fn bits_to_unit_float(v: u32) -> Float {
    // 1/2^32
    (v as Float * 2.3283064365386963e-10 as Float).min(FLOAT_ONE_MINUS_EPSILON)
}

/// Radical inverse of *a* in the given prime *base*.
pub fn radical_inverse_specialized(base: u16, a: u64) -> Float {
    let inv_base: f64 = 1.0_f64 / base as f64;
    let mut reversed_digits: u64 = 0_u64;
    let mut inv_base_n: f64 = 1.0_f64;
    let mut a: u64 = a; // shadowing input parameter
    while a != 0_u64 {
        let next: u64 = a / base as u64;
        let digit: u64 = a - next * base as u64;
        reversed_digits = reversed_digits * base as u64 + digit;
        inv_base_n *= inv_base;
        a = next;
    }
    ((reversed_digits as f64 * inv_base_n) as Float).min(FLOAT_ONE_MINUS_EPSILON)
}

/// Map *base_index* to its prime and compute the radical inverse. Only
/// the first `PRIMES.len()` bases are available.
pub fn radical_inverse(base_index: u32, a: u64) -> Option<Float> {
    match base_index {
        0 => Some(bits_to_unit_float(reverse_bits_32(a as u32))),
        _ => PRIMES
            .get(base_index as usize)
            .map(|base| radical_inverse_specialized(*base, a)),
    }
}

/// Integer hash with good avalanche behaviour, from
/// https://github.com/skeeto/hash-prospector
pub fn hash_u32(n: u32, seed: u32) -> u32 {
    let mut n = n.wrapping_add(seed.wrapping_mul(0x736caf6f));
    n ^= n >> 17;
    n = n.wrapping_mul(0xed5ad4bb);
    n ^= n >> 11;
    n = n.wrapping_mul(0xac4c1b51);
    n ^= n >> 15;
    n = n.wrapping_mul(0x31848bab);
    n ^= n >> 14;
    n
}

/// Laine-Karras style permutation: every bit only depends on itself and
/// the bits below it, which is the Owen scrambling tree read with the
/// bits reversed.
pub fn laine_karras_permutation(x: u32, seed: u32) -> u32 {
    let mut x = x.wrapping_add(seed);
    x ^= x.wrapping_mul(0x6c50b47c);
    x ^= x.wrapping_mul(0xb82f1e52);
    x ^= x.wrapping_mul(0xc7afe638);
    x ^= x.wrapping_mul(0x8d22f6e6);
    x
}

/// Hash-based nested uniform (Owen) scramble of 32 fraction bits.
pub fn nested_uniform_scramble(x: u32, seed: u32) -> u32 {
    reverse_bits_32(laine_karras_permutation(reverse_bits_32(x), seed))
}

//! SM3 message expansion and compression function (GB/T 32905-2016 §5.3).

use super::load::BlockLoader;
use super::SM3_BLOCK_SIZE;

const T0_15: u32 = 0x79cc4519;
const T16_63: u32 = 0x7a879d8a;

/// `T(j) <<< (j mod 32)` for every round.
const TJ: [u32; 64] = round_constants();

const fn round_constants() -> [u32; 64] {
    let mut t = [0u32; 64];
    let mut j = 0;
    while j < 64 {
        let base = if j < 16 { T0_15 } else { T16_63 };
        t[j] = base.rotate_left((j % 32) as u32);
        j += 1;
    }
    t
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

#[inline(always)]
fn ff(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (x & z) | (y & z)
    }
}

#[inline(always)]
fn gg(x: u32, y: u32, z: u32, j: usize) -> u32 {
    if j < 16 {
        x ^ y ^ z
    } else {
        (x & y) | (!x & z)
    }
}

/// Expanded message schedule for one block.
///
/// `w` feeds TT2 and `w1` feeds TT1; the two are distinct arrays.
pub(crate) struct Schedule {
    pub(crate) w: [u32; 68],
    pub(crate) w1: [u32; 64],
}

impl Schedule {
    /// Expand sixteen big-endian block words into `W[0..68]` and `W'[0..64]`.
    pub(crate) fn expand(words: &[u32; 16]) -> Self {
        let mut w = [0u32; 68];
        w[..16].copy_from_slice(words);
        for i in 16..68 {
            w[i] = p1(w[i - 16] ^ w[i - 9] ^ w[i - 3].rotate_left(15))
                ^ w[i - 13].rotate_left(7)
                ^ w[i - 6];
        }

        let mut w1 = [0u32; 64];
        for (j, out) in w1.iter_mut().enumerate() {
            *out = w[j] ^ w[j + 4];
        }

        Schedule { w, w1 }
    }
}

/// Run the 64 rounds over `state` and fold the result back with XOR.
pub(crate) fn compress_schedule(state: &mut [u32; 8], schedule: &Schedule) {
    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let a12 = a.rotate_left(12);
        let ss1 = a12.wrapping_add(e).wrapping_add(TJ[j]).rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff(a, b, c, j)
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(schedule.w1[j]);
        let tt2 = gg(e, f, g, j)
            .wrapping_add(h)
            .wrapping_add(ss1)
            .wrapping_add(schedule.w[j]);
        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s ^= v;
    }
}

/// Compress every 64-byte block in `blocks` into `state`.
///
/// `blocks.len()` must be a multiple of the block size.
pub(crate) fn compress_blocks(state: &mut [u32; 8], blocks: &[u8], loader: BlockLoader) {
    debug_assert_eq!(blocks.len() % SM3_BLOCK_SIZE, 0);
    let mut rest = blocks;
    while let Some((block, tail)) = rest.split_first_chunk::<SM3_BLOCK_SIZE>() {
        let schedule = Schedule::expand(&loader.load(block));
        compress_schedule(state, &schedule);
        rest = tail;
    }
}

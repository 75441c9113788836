//! Scaling lists and the multiplier tables derived from them.

use rand::Rng;

/// Scaling list slots, in the order the picture parameter set stores them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CqmList {
    Intra4Y = 0,
    Inter4Y = 1,
    Intra4C = 2,
    Inter4C = 3,
    Intra8Y = 4,
    Inter8Y = 5,
}

/// Quantizer multipliers for `qp % 6`, by 4x4 position class.
pub const QUANT4_SCALE: [[i32; 3]; 6] = [
    [13107, 8066, 5243],
    [11916, 7490, 4660],
    [10082, 6554, 4194],
    [9362, 5825, 3647],
    [8192, 5243, 3355],
    [7282, 4559, 2893],
];

/// Quantizer multipliers for `qp % 6`, by 8x8 position class.
pub const QUANT8_SCALE: [[i32; 6]; 6] = [
    [13107, 11428, 20972, 12222, 16777, 15481],
    [11916, 10826, 19174, 11058, 14980, 14290],
    [10082, 8943, 15978, 9675, 12710, 11985],
    [9362, 8228, 14913, 8931, 11984, 11259],
    [8192, 7346, 13159, 7740, 10486, 9777],
    [7282, 6428, 11570, 6830, 9118, 8640],
];

/// 8x8 position class of `((y & 3) << 2) | (x & 3)`.
const QUANT8_SCAN: [usize; 16] = [0, 3, 4, 3, 3, 1, 5, 1, 4, 5, 2, 5, 3, 1, 5, 1];

const FLAT16: [u8; 64] = [16; 64];

#[rustfmt::skip]
const JVT4I: [u8; 16] = [
     6, 13, 20, 28,
    13, 20, 28, 32,
    20, 28, 32, 37,
    28, 32, 37, 42,
];

#[rustfmt::skip]
const JVT4P: [u8; 16] = [
    10, 14, 20, 24,
    14, 20, 24, 27,
    20, 24, 27, 30,
    24, 27, 30, 34,
];

#[rustfmt::skip]
const JVT8I: [u8; 64] = [
     6, 10, 13, 16, 18, 23, 25, 27,
    10, 11, 16, 18, 23, 25, 27, 29,
    13, 16, 18, 23, 25, 27, 29, 31,
    16, 18, 23, 25, 27, 29, 31, 33,
    18, 23, 25, 27, 29, 31, 33, 36,
    23, 25, 27, 29, 31, 33, 36, 38,
    25, 27, 29, 31, 33, 36, 38, 40,
    27, 29, 31, 33, 36, 38, 40, 42,
];

#[rustfmt::skip]
const JVT8P: [u8; 64] = [
     9, 13, 15, 17, 19, 21, 22, 24,
    13, 13, 17, 19, 21, 22, 24, 25,
    15, 17, 19, 21, 22, 24, 25, 27,
    17, 19, 21, 22, 24, 25, 27, 28,
    19, 21, 22, 24, 25, 27, 28, 30,
    21, 22, 24, 25, 27, 28, 30, 32,
    22, 24, 25, 27, 28, 30, 32, 33,
    24, 25, 27, 28, 30, 32, 33, 35,
];

/// The six scaling lists, raster order. 4x4 slots use the first 16 entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScalingLists {
    lists: [[u8; 64]; 6],
}

impl ScalingLists {
    /// Number of presets [`preset`](Self::preset) knows about.
    pub const PRESETS: usize = 4;

    /// Every list 16: plain uniform quantization.
    pub fn flat() -> Self {
        Self {
            lists: [FLAT16; 6],
        }
    }

    /// The default matrices of the standard.
    pub fn jvt() -> Self {
        let widen = |l4: &[u8; 16]| {
            let mut list = [0u8; 64];
            list[..16].copy_from_slice(l4);
            list
        };
        Self {
            lists: [
                widen(&JVT4I),
                widen(&JVT4P),
                widen(&JVT4I),
                widen(&JVT4P),
                JVT8I,
                JVT8P,
            ],
        }
    }

    /// One random list in `[10, 255]`, shared by all six slots.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut list = [0u8; 64];
        for v in list.iter_mut() {
            *v = rng.random_range(10..=255);
        }
        Self { lists: [list; 6] }
    }

    /// Every list 1, which gives the largest multipliers.
    pub fn ones() -> Self {
        Self {
            lists: [[1; 64]; 6],
        }
    }

    /// Preset `index` in the order flat, jvt, random, ones.
    pub fn preset(index: usize, rng: &mut impl Rng) -> Self {
        match index {
            0 => Self::flat(),
            1 => Self::jvt(),
            2 => Self::random(rng),
            _ => Self::ones(),
        }
    }

    pub fn list(&self, slot: CqmList) -> &[u8; 64] {
        &self.lists[slot as usize]
    }
}

/// Multiplier tables derived from a [`ScalingLists`], per `qp % 6`.
///
/// Every multiplier row starts on a 64-byte boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct QuantTables {
    /// Indexed by 4x4 slot (`Intra4Y..=Inter4C`), then `qp % 6`.
    pub quant4_mf: [[[i32; 16]; 6]; 4],
    /// Indexed by 8x8 slot (`Intra8Y`, `Inter8Y`), then `qp % 6`.
    pub quant8_mf: [[[i32; 64]; 6]; 2],
}

impl QuantTables {
    /// `mf = scale * 16 / list[i]`, so a flat list leaves the scale as is.
    pub fn new(lists: &ScalingLists) -> Self {
        let mut tables = Self {
            quant4_mf: [[[0; 16]; 6]; 4],
            quant8_mf: [[[0; 64]; 6]; 2],
        };

        for (slot, mf) in tables.quant4_mf.iter_mut().enumerate() {
            let list = &lists.lists[slot];
            for (q, row) in mf.iter_mut().enumerate() {
                for (i, v) in row.iter_mut().enumerate() {
                    let class = (i & 1) + ((i >> 2) & 1);
                    *v = QUANT4_SCALE[q][class] * 16 / list[i] as i32;
                }
            }
        }

        for (slot, mf) in tables.quant8_mf.iter_mut().enumerate() {
            let list = &lists.lists[CqmList::Intra8Y as usize + slot];
            for (q, row) in mf.iter_mut().enumerate() {
                for (i, v) in row.iter_mut().enumerate() {
                    let class = QUANT8_SCAN[((i >> 1) & 12) | (i & 3)];
                    *v = QUANT8_SCALE[q][class] * 16 / list[i] as i32;
                }
            }
        }

        tables
    }

    /// 4x4 multipliers of `slot` at `qp % 6 == 0`.
    pub fn mf4(&self, slot: CqmList) -> &[i32; 16] {
        &self.quant4_mf[slot as usize][0]
    }

    /// 8x8 multipliers of `slot` at `qp % 6 == 0`.
    ///
    /// # Panics
    ///
    /// If `slot` is not an 8x8 slot.
    pub fn mf8(&self, slot: CqmList) -> &[i32; 64] {
        &self.quant8_mf[slot as usize - CqmList::Intra8Y as usize][0]
    }

    /// Largest multiplier in any table.
    pub fn max_mf(&self) -> i32 {
        let m4 = self.quant4_mf.iter().flatten().flatten();
        let m8 = self.quant8_mf.iter().flatten().flatten();
        m4.chain(m8).copied().max().unwrap_or(0)
    }
}

//! # Integer Transforms
//!
//! The H.264 integer DCT family:
//!
//! - forward residual transforms `sub*_dct` (4x4 based) and `sub*_dct8`
//!   (8x8 based), computing the transform of `pix1 - pix2`;
//! - inverse transforms `add*_idct` / `add*_idct8`, adding the
//!   reconstructed residual to a prediction with clipping;
//! - the Hadamard transforms applied to luma (4x4) and chroma (2x2) DC
//!   coefficients.

pub mod code;
pub mod test;

pub use code::*;

use crate::check::{Context, GroupCheck};
use crate::dispatch::{KernelProvider, TierTables};
use crate::registry::FamilyChecker;
use crate::utils::arena::{Scratch, CHECK_SIZE, SENTINEL, SRC2_STRIDE, STRIDE};
use crate::utils::{AlignedBlock, Inputs, Kernel, Outputs, Reporter, SubTestId, TierPair};

/// Coefficient outputs are pre-filled with this so under-writes show up.
pub const COEF_SENTINEL: i16 = i16::from_ne_bytes([SENTINEL; 2]);

/// Fixed input for the luma DC transforms.
pub const DC4X4_INPUT: [i16; 16] = [
    -12, 42, 23, 67, //
    2, 90, 89, 56, //
    67, 43, -76, 91, //
    56, -78, -54, 1,
];

/// Fixed input for the chroma DC transforms.
pub const DC2X2_INPUT: [i16; 4] = [-12, 42, 2, 90];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DcTransform {
    Forward,
    Inverse,
}

impl DcTransform {
    pub const ALL: [DcTransform; 2] = [DcTransform::Forward, DcTransform::Inverse];

    pub fn name_4x4(self) -> &'static str {
        match self {
            DcTransform::Forward => "dct4x4dc",
            DcTransform::Inverse => "idct4x4dc",
        }
    }

    pub fn name_2x2(self) -> &'static str {
        match self {
            DcTransform::Forward => "dct2x2dc",
            DcTransform::Inverse => "idct2x2dc",
        }
    }
}

/// Pixels plus the scratch coefficients an inverse transform consumes.
///
/// Only the pixels are compared: inverse kernels may leave anything in
/// their coefficient block.
struct Reconstruction<'a, const N: usize> {
    pixels: &'a mut [u8],
    coefs: AlignedBlock<[i16; N]>,
}

impl<const N: usize> PartialEq for Reconstruction<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.pixels == other.pixels
    }
}

type Tables = TierTables<DctFunctions>;

fn sub_dct<const N: usize>(
    group: &mut GroupCheck<'_>,
    tables: &Tables,
    op: &'static str,
    select: fn(&DctFunctions) -> &Kernel<SubDctFn<N>>,
    inputs: Inputs<'_>,
) {
    let mut out_ref = AlignedBlock([0i16; N]);
    let mut out_new = AlignedBlock([0i16; N]);
    group.compare(
        tables.pick(select),
        SubTestId::new(op),
        (&mut out_ref, &mut out_new),
        |coefs| coefs.fill(COEF_SENTINEL),
        |f, coefs| f(&mut coefs.0, inputs.src1, STRIDE, inputs.src2, SRC2_STRIDE),
    );
}

fn add_idct<const N: usize>(
    group: &mut GroupCheck<'_>,
    tables: &Tables,
    op: &'static str,
    select: fn(&DctFunctions) -> &Kernel<AddIdctFn<N>>,
    inputs: Inputs<'_>,
    outputs: &mut Outputs<'_>,
    saved: &[i16; 256],
) {
    let (pixels_ref, pixels_new) = outputs.prefix(CHECK_SIZE);
    let mut rec_ref = Reconstruction::<N> {
        pixels: pixels_ref,
        coefs: AlignedBlock([0; N]),
    };
    let mut rec_new = Reconstruction::<N> {
        pixels: pixels_new,
        coefs: AlignedBlock([0; N]),
    };
    group.compare(
        tables.pick(select),
        SubTestId::new(op),
        (&mut rec_ref, &mut rec_new),
        |rec| {
            // Fresh prediction and a fresh copy of the coefficients per call.
            rec.pixels.copy_from(&inputs.src1[..CHECK_SIZE]);
            rec.coefs.copy_from_slice(&saved[..N]);
        },
        |f, rec| f(rec.pixels, STRIDE, &mut rec.coefs.0),
    );
}

/// Checker for the transform family
pub struct DctChecker;

impl FamilyChecker for DctChecker {
    fn name(&self) -> &'static str {
        "dct"
    }

    fn description(&self) -> &'static str {
        "Forward and inverse 4x4/8x8 DCT, luma and chroma DC Hadamard"
    }

    fn check(
        &self,
        provider: &dyn KernelProvider,
        pair: &TierPair,
        ctx: &mut Context,
        reporter: &mut Reporter,
    ) -> bool {
        let tables = TierTables::build(pair, |cpu| provider.dct(cpu));
        let (inputs, mut outputs) = ctx.bufs.split();
        let mut ok = true;

        let mut group = GroupCheck::new(reporter, "sub_dct4");
        sub_dct::<16>(&mut group, &tables, "sub4x4_dct", |t| &t.sub4x4_dct, inputs);
        sub_dct::<64>(&mut group, &tables, "sub8x8_dct", |t| &t.sub8x8_dct, inputs);
        sub_dct::<256>(&mut group, &tables, "sub16x16_dct", |t| &t.sub16x16_dct, inputs);
        ok &= group.finish();

        let mut group = GroupCheck::new(reporter, "sub_dct8");
        sub_dct::<64>(&mut group, &tables, "sub8x8_dct8", |t| &t.sub8x8_dct8, inputs);
        sub_dct::<256>(&mut group, &tables, "sub16x16_dct8", |t| &t.sub16x16_dct8, inputs);
        ok &= group.finish();

        // Inverse inputs are the original forward transforms of the same
        // residual, so every inverse sees realistic coefficients.
        let mut coefs4 = AlignedBlock([0i16; 256]);
        let mut coefs8 = AlignedBlock([0i16; 256]);
        (tables.reference.sub16x16_dct.function)(
            &mut coefs4.0,
            inputs.src1,
            STRIDE,
            inputs.src2,
            SRC2_STRIDE,
        );
        (tables.reference.sub16x16_dct8.function)(
            &mut coefs8.0,
            inputs.src1,
            STRIDE,
            inputs.src2,
            SRC2_STRIDE,
        );

        let mut group = GroupCheck::new(reporter, "add_idct4");
        let out = &mut outputs;
        add_idct::<16>(
            &mut group,
            &tables,
            "add4x4_idct",
            |t| &t.add4x4_idct,
            inputs,
            out,
            &coefs4.0,
        );
        add_idct::<64>(
            &mut group,
            &tables,
            "add8x8_idct",
            |t| &t.add8x8_idct,
            inputs,
            out,
            &coefs4.0,
        );
        add_idct::<256>(
            &mut group,
            &tables,
            "add16x16_idct",
            |t| &t.add16x16_idct,
            inputs,
            out,
            &coefs4.0,
        );
        ok &= group.finish();

        let mut group = GroupCheck::new(reporter, "add_idct8");
        add_idct::<64>(
            &mut group,
            &tables,
            "add8x8_idct8",
            |t| &t.add8x8_idct8,
            inputs,
            out,
            &coefs8.0,
        );
        add_idct::<256>(
            &mut group,
            &tables,
            "add16x16_idct8",
            |t| &t.add16x16_idct8,
            inputs,
            out,
            &coefs8.0,
        );
        ok &= group.finish();

        let mut group = GroupCheck::new(reporter, "(i)dct4x4dc");
        for op in DcTransform::ALL {
            group.compare(
                tables.pick(|t| t.dc4x4(op)),
                SubTestId::new(op.name_4x4()),
                (&mut AlignedBlock([0i16; 16]), &mut AlignedBlock([0i16; 16])),
                |d| d.0 = DC4X4_INPUT,
                |f, d| f(&mut d.0),
            );
        }
        ok &= group.finish();

        let mut group = GroupCheck::new(reporter, "(i)dct2x2dc");
        for op in DcTransform::ALL {
            group.compare(
                tables.pick(|t| t.dc2x2(op)),
                SubTestId::new(op.name_2x2()),
                (&mut AlignedBlock([0i16; 4]), &mut AlignedBlock([0i16; 4])),
                |d| d.0 = DC2X2_INPUT,
                |f, d| f(&mut d.0),
            );
        }
        ok &= group.finish();

        ok
    }
}

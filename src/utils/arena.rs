//! Aligned scratch memory shared by every family checker.
//!
//! Two source buffers are filled with random bytes once and only ever lent
//! out immutably. Two destination buffers receive the output of the
//! original and of the candidate implementation respectively.

use std::alloc::{self, Layout};
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::{Error, Result};

/// Row stride of the 32x32 sample block every test addresses.
pub const STRIDE: usize = 32;
/// Second sources are read with a narrower stride so rows don't line up.
pub const SRC2_STRIDE: usize = 24;
/// Bytes compared between the two destination buffers.
pub const CHECK_SIZE: usize = STRIDE * 32;
/// Luma planes start as low as row 17 and read `h + 1` rows past it.
pub const BUF_SIZE: usize = STRIDE * 40;
pub const BUF_ALIGN: usize = 64;
/// Written to destinations before a call so under-writes show up.
pub const SENTINEL: u8 = 0xCD;

/// A heap block with a guaranteed alignment.
pub struct AlignedBuf {
    ptr: NonNull<u8>,
    layout: Layout,
}

impl AlignedBuf {
    /// Allocates `size` zeroed bytes aligned to `align`.
    ///
    /// A layout the allocator can never satisfy is an error; running out of
    /// memory aborts the process.
    pub fn allocate(size: usize, align: usize) -> Result<Self> {
        let layout = Layout::from_size_align(size, align)
            .ok()
            .filter(|l| l.size() > 0)
            .ok_or(Error::Layout { size, align })?;
        // SAFETY: the layout has a non-zero size.
        let raw = unsafe { alloc::alloc_zeroed(layout) };
        let Some(ptr) = NonNull::new(raw) else {
            alloc::handle_alloc_error(layout);
        };
        Ok(Self { ptr, layout })
    }

    /// Fills the whole buffer with uniform random bytes.
    pub fn seed(&mut self, rng: &mut impl RngCore) {
        rng.fill_bytes(self);
    }
}

impl Deref for AlignedBuf {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        // SAFETY: `ptr` owns `layout.size()` initialised bytes.
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl DerefMut for AlignedBuf {
    fn deref_mut(&mut self) -> &mut [u8] {
        // SAFETY: as above, and `&mut self` guarantees exclusive access.
        unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.layout.size()) }
    }
}

impl Drop for AlignedBuf {
    fn drop(&mut self) {
        // SAFETY: allocated in `allocate` with this exact layout.
        unsafe { alloc::dealloc(self.ptr.as_ptr(), self.layout) }
    }
}

/// Preparation of an output region before a kernel writes to it.
pub trait Scratch {
    fn clear(&mut self, byte: u8);

    /// Copies `src` over the start of the region.
    fn copy_from(&mut self, src: &[u8]);
}

impl Scratch for [u8] {
    fn clear(&mut self, byte: u8) {
        self.fill(byte);
    }

    fn copy_from(&mut self, src: &[u8]) {
        self[..src.len()].copy_from_slice(src);
    }
}

/// Stack storage for coefficient blocks and multiplier tables, aligned
/// like the arena buffers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(C, align(64))]
pub struct AlignedBlock<T>(pub T);

impl<T> Deref for AlignedBlock<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for AlignedBlock<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

/// Read-only view of the two source buffers.
#[derive(Clone, Copy)]
pub struct Inputs<'a> {
    pub src1: &'a [u8],
    pub src2: &'a [u8],
}

/// Exclusive views of the two destination buffers, one per implementation.
pub struct Outputs<'a> {
    pub reference: &'a mut [u8],
    pub candidate: &'a mut [u8],
}

impl Outputs<'_> {
    /// Reborrows the first `len` bytes of both destinations.
    pub fn prefix(&mut self, len: usize) -> (&mut [u8], &mut [u8]) {
        (&mut self.reference[..len], &mut self.candidate[..len])
    }
}

/// The four buffers allocated at process start.
pub struct TestBuffers {
    src1: AlignedBuf,
    src2: AlignedBuf,
    dst_ref: AlignedBuf,
    dst_new: AlignedBuf,
}

impl TestBuffers {
    /// Allocates the buffers and seeds both sources from `seed`.
    pub fn new(seed: u64) -> Result<Self> {
        let mut bufs = Self {
            src1: AlignedBuf::allocate(BUF_SIZE, BUF_ALIGN)?,
            src2: AlignedBuf::allocate(BUF_SIZE, BUF_ALIGN)?,
            dst_ref: AlignedBuf::allocate(BUF_SIZE, BUF_ALIGN)?,
            dst_new: AlignedBuf::allocate(BUF_SIZE, BUF_ALIGN)?,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        bufs.src1.seed(&mut rng);
        bufs.src2.seed(&mut rng);
        Ok(bufs)
    }

    pub fn inputs(&self) -> Inputs<'_> {
        Inputs {
            src1: &self.src1,
            src2: &self.src2,
        }
    }

    /// Splits into shared sources and exclusive destinations.
    pub fn split(&mut self) -> (Inputs<'_>, Outputs<'_>) {
        (
            Inputs {
                src1: &self.src1,
                src2: &self.src2,
            },
            Outputs {
                reference: &mut self.dst_ref,
                candidate: &mut self.dst_new,
            },
        )
    }
}

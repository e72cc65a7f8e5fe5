//! Helper traits for allocating large count tables.

use std::alloc;

/// Types whose all zeros bit pattern is their zero value,
/// allowing large count tables to be allocated directly on the heap.
///
/// # Safety
/// The zero value of the type must be representable by the all zeros bit pattern
#[allow(unsafe_code)]
pub unsafe trait ZeroedIsZero: Sized + Copy {
    /// Allocates a zeroed `Self` on the heap without going through the stack.
    #[must_use]
    fn box_zeroed() -> Box<Self> {
        unsafe {
            let layout = alloc::Layout::new::<Self>();
            let ptr = alloc::alloc_zeroed(layout).cast::<Self>();
            if ptr.is_null() {
                alloc::handle_alloc_error(layout)
            }
            Box::from_raw(ptr)
        }
    }

    /// Resets `self` to zero.
    fn fill_zero(&mut self) {
        *self = unsafe { std::mem::zeroed() };
    }
}

#[allow(unsafe_code)]
unsafe impl ZeroedIsZero for u32 {}

#[allow(unsafe_code)]
unsafe impl<T: ZeroedIsZero, const N: usize> ZeroedIsZero for [T; N] {}

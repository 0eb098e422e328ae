// typed.rs - Typed reinterpretation of allocated byte ranges
//
// Values are written and read as their raw in-memory bytes: no endianness,
// padding or alignment normalisation. The bytemuck bounds rule out types
// with padding or invalid bit patterns, so a load never yields an unsound value.

use crate::{AllocError, Allocation, LinearAllocator};
use bytemuck::{AnyBitPattern, NoUninit, Pod};
use std::mem;

impl LinearAllocator {
    /// Write the bytes of `value` at the start of `handle`.
    ///
    /// The caller must pass a live handle at least `size_of::<T>()` bytes long.
    /// Debug builds assert this; release builds only guarantee that nothing
    /// outside the buffer is touched.
    pub fn store<T: NoUninit>(&mut self, handle: Allocation, value: T) {
        let size = mem::size_of::<T>();
        self.debug_check_fits::<T>(handle);
        let start = handle.offset();
        self.buffer_mut()[start..start + size].copy_from_slice(bytemuck::bytes_of(&value));
    }

    /// Read a `T` from the start of `handle`.
    ///
    /// Same precondition as [`store`](Self::store). The read is unaligned, so
    /// it works at any offset.
    pub fn load<T: AnyBitPattern>(&self, handle: Allocation) -> T {
        let size = mem::size_of::<T>();
        self.debug_check_fits::<T>(handle);
        let start = handle.offset();
        bytemuck::pod_read_unaligned(&self.buffer()[start..start + size])
    }

    /// Allocate `size_of::<T>()` bytes and store `value` there.
    pub fn allocate_value<T: Pod>(&mut self, value: T) -> Result<Allocation, AllocError> {
        let handle = self.allocate_for::<T>()?;
        self.store(handle, value);
        Ok(handle)
    }

    /// Borrow the start of `handle` in place as a `T`.
    ///
    /// Returns `None` if the range is shorter than `T` or its address is not
    /// aligned for `T`. The buffer has byte alignment only.
    pub fn view<T: Pod>(&self, handle: Allocation) -> Option<&T> {
        let bytes = self.bytes(handle).get(..mem::size_of::<T>())?;
        bytemuck::try_from_bytes(bytes).ok()
    }

    /// Mutable counterpart of [`view`](Self::view).
    pub fn view_mut<T: Pod>(&mut self, handle: Allocation) -> Option<&mut T> {
        let bytes = self.bytes_mut(handle).get_mut(..mem::size_of::<T>())?;
        bytemuck::try_from_bytes_mut(bytes).ok()
    }

    #[inline]
    fn debug_check_fits<T>(&self, handle: Allocation) {
        self.debug_check_live(handle);
        debug_assert!(
            mem::size_of::<T>() <= handle.len(),
            "{} needs {} bytes but the handle holds {}",
            std::any::type_name::<T>(),
            mem::size_of::<T>(),
            handle.len()
        );
    }
}

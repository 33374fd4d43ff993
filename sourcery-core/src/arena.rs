//! Bump-allocated working memory with stack-discipline checkpoints.
//!
//!     The arena owns one pre-reserved byte region and a single offset that only
//!     moves forward as allocations are pushed. There is no per-allocation
//!     metadata and no free list: memory is reclaimed by restoring a checkpoint
//!     (which discards everything pushed since it was taken) or by clearing the
//!     whole arena. One file is processed under one top-level checkpoint, and
//!     each directive opens a nested checkpoint for its scratch allocations, so
//!     the region never grows beyond one file's working set.
//!
//!     Allocations are identified by [`Block`] handles (offset + length into the
//!     region) rather than borrowed pointers. Handles are plain `Copy` values, so
//!     line records and payload lists can hold them without tying up a borrow of
//!     the arena. Restoring a checkpoint does not invalidate handles taken after
//!     it in any memory-safety sense; reading through one afterwards yields stale
//!     bytes and is a logic error on the caller's part.
//!
//!     Blocks carry no alignment guarantee. Every payload stored here is a byte
//!     run, so nothing stronger is needed.

use std::ops::Range;

/// Handle to one allocation inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    offset: usize,
    len: usize,
}

impl Block {
    /// Size of the allocation in bytes (including any trailing NUL the caller
    /// asked for).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// A saved arena offset. Restoring it discards everything pushed since the
/// matching [`Arena::stash`]. Checkpoints must be restored in LIFO order;
/// misuse is not detected.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

/// Monotonic bump allocator over a single pre-reserved region.
pub struct Arena {
    buf: Vec<u8>,
    offset: usize,
}

impl Arena {
    /// Reserve `capacity` bytes up front. The region is never grown afterwards.
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            buf: vec![0u8; capacity],
            offset: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Current stack top. Every live block lies in `[0, offset)`.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Push `size` bytes onto the arena stack.
    ///
    /// Exceeding the reserved capacity is fatal: the arena is sized for the
    /// whole run and there is no recovery path once it overflows.
    pub fn push(&mut self, size: usize) -> Block {
        assert!(
            self.offset + size <= self.buf.len(),
            "arena exhausted: {} bytes requested with {} of {} in use",
            size,
            self.offset,
            self.buf.len()
        );
        let block = Block {
            offset: self.offset,
            len: size,
        };
        self.offset += size;
        block
    }

    /// Push `size` bytes and zero-fill them.
    pub fn push_zeroed(&mut self, size: usize) -> Block {
        let block = self.push(size);
        self.bytes_mut(block).fill(0);
        block
    }

    /// Push a NUL-terminated copy of `data`: the block is `data.len() + 1`
    /// bytes and the final byte is zero.
    pub fn push_bytes(&mut self, data: &[u8]) -> Block {
        let block = self.push_zeroed(data.len() + 1);
        self.buf[block.offset..block.offset + data.len()].copy_from_slice(data);
        block
    }

    /// Push a NUL-terminated copy of `src[range]`.
    ///
    /// Fused allocate-and-copy so callers holding only handles never need two
    /// overlapping borrows of the region.
    pub fn push_copy(&mut self, src: Block, range: Range<usize>) -> Block {
        assert!(
            range.end <= src.len && range.start <= range.end,
            "substring {}..{} out of bounds for a {}-byte block",
            range.start,
            range.end,
            src.len
        );
        let len = range.end - range.start;
        let dest = self.push_zeroed(len + 1);
        let src_start = src.offset + range.start;
        self.buf.copy_within(src_start..src_start + len, dest.offset);
        dest
    }

    /// Remove `size` bytes from the top of the stack. Popping more than is
    /// currently in use clamps the offset at zero.
    pub fn pop(&mut self, size: usize) {
        self.offset = self.offset.saturating_sub(size);
    }

    /// Save the current offset as a checkpoint.
    pub fn stash(&self) -> Checkpoint {
        Checkpoint(self.offset)
    }

    /// Roll the offset back to `checkpoint`, discarding everything pushed
    /// since the matching [`stash`](Self::stash).
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.0;
    }

    /// Run `f` under a checkpoint that is restored when it returns, so scoped
    /// scratch allocations cannot leak past their scope on any return path.
    pub fn scoped<R>(&mut self, f: impl FnOnce(&mut Arena) -> R) -> R {
        let checkpoint = self.stash();
        let result = f(self);
        self.restore(checkpoint);
        result
    }

    /// Discard all allocations.
    pub fn clear(&mut self) {
        self.offset = 0;
    }

    /// Borrow a block's bytes.
    pub fn bytes(&self, block: Block) -> &[u8] {
        &self.buf[block.offset..block.offset + block.len]
    }

    /// Borrow a block's bytes mutably.
    pub fn bytes_mut(&mut self, block: Block) -> &mut [u8] {
        &mut self.buf[block.offset..block.offset + block.len]
    }

    /// Borrow `dest` mutably and `src` immutably at once. `dest` must have
    /// been pushed after `src`; the split at its offset keeps the two slices
    /// provably disjoint.
    pub fn copy_view(&mut self, dest: Block, src: Block) -> (&mut [u8], &[u8]) {
        assert!(
            src.offset + src.len <= dest.offset,
            "copy_view requires dest to be allocated after src"
        );
        let (head, tail) = self.buf.split_at_mut(dest.offset);
        (&mut tail[..dest.len], &head[src.offset..src.offset + src.len])
    }
}

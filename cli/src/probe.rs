//! Allocation probe backing the report's per-strategy profile.
//!
//! The whole binary runs under a wrapper around the system allocator that
//! keeps a live-byte counter, a high-water mark and a count of allocator
//! round trips. [`profile_build`] samples a build closure against those
//! counters. The counters are process-wide, so profiling runs on the main
//! thread with nothing else allocating.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingAllocator;

struct ProbeCounters {
    live: AtomicUsize,
    peak: AtomicUsize,
    baseline_live: AtomicUsize,
    calls: AtomicUsize,
    baseline_calls: AtomicUsize,
}

static COUNTERS: ProbeCounters = ProbeCounters {
    live: AtomicUsize::new(0),
    peak: AtomicUsize::new(0),
    baseline_live: AtomicUsize::new(0),
    calls: AtomicUsize::new(0),
    baseline_calls: AtomicUsize::new(0),
};

#[global_allocator]
static GLOBAL_ALLOCATOR: CountingAllocator = CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        record_dealloc(layout.size());
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn realloc(&self, ptr: *mut u8, old_layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, old_layout, new_size) };
        if !new_ptr.is_null() {
            // A grow that moves the block still counts as one round trip.
            COUNTERS.calls.fetch_add(1, Ordering::SeqCst);
            if new_size > old_layout.size() {
                record_live_growth(new_size - old_layout.size());
            } else if old_layout.size() > new_size {
                record_dealloc(old_layout.size() - new_size);
            }
        }
        new_ptr
    }
}

fn record_alloc(size: usize) {
    COUNTERS.calls.fetch_add(1, Ordering::SeqCst);
    record_live_growth(size);
}

fn record_live_growth(size: usize) {
    let live = COUNTERS
        .live
        .fetch_add(size, Ordering::SeqCst)
        .saturating_add(size);
    COUNTERS.peak.fetch_max(live, Ordering::SeqCst);
}

fn record_dealloc(size: usize) {
    COUNTERS.live.fetch_sub(size, Ordering::SeqCst);
}

fn reset() {
    let live = COUNTERS.live.load(Ordering::SeqCst);
    COUNTERS.baseline_live.store(live, Ordering::SeqCst);
    COUNTERS.peak.store(live, Ordering::SeqCst);
    let calls = COUNTERS.calls.load(Ordering::SeqCst);
    COUNTERS.baseline_calls.store(calls, Ordering::SeqCst);
}

fn since_reset() -> ProbeDelta {
    let peak = COUNTERS.peak.load(Ordering::SeqCst);
    let baseline_live = COUNTERS.baseline_live.load(Ordering::SeqCst);
    let calls = COUNTERS.calls.load(Ordering::SeqCst);
    let baseline_calls = COUNTERS.baseline_calls.load(Ordering::SeqCst);
    ProbeDelta {
        allocations: calls.saturating_sub(baseline_calls),
        peak_bytes: peak.saturating_sub(baseline_live),
    }
}

/// Allocator activity observed across one probe window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeDelta {
    pub allocations: usize,
    pub peak_bytes: usize,
}

/// Runs `build` once to warm up, then `iterations` more times and reports
/// the fewest allocator calls and the highest peak seen in any single run.
/// The minimum filters out one-off noise from lazy initialization; the
/// maximum keeps the worst transient footprint.
pub fn profile_build<T>(mut build: impl FnMut() -> T, iterations: usize) -> ProbeDelta {
    drop(build());

    let mut fewest_calls = usize::MAX;
    let mut max_peak = 0usize;
    for _ in 0..iterations.max(1) {
        reset();
        drop(build());
        let delta = since_reset();
        fewest_calls = fewest_calls.min(delta.allocations);
        max_peak = max_peak.max(delta.peak_bytes);
    }

    ProbeDelta {
        allocations: fewest_calls,
        peak_bytes: max_peak,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_sees_a_large_allocation() {
        let delta = profile_build(|| Vec::<u8>::with_capacity(1 << 20), 3);
        assert!(delta.allocations >= 1, "expected at least one call, got {delta:?}");
        assert!(delta.peak_bytes >= 1 << 20, "expected 1 MiB peak, got {delta:?}");
    }

    #[test]
    fn growth_reallocations_are_counted() {
        let delta = profile_build(
            || {
                let mut out = String::new();
                for _ in 0..16 {
                    out.push_str("0123456789abcdef");
                }
                out
            },
            3,
        );
        // 256 bytes built through doubling takes an initial allocation plus
        // at least one grow.
        assert!(delta.allocations >= 2, "expected growth traffic, got {delta:?}");
        assert!(delta.peak_bytes >= 256, "expected final buffer in peak, got {delta:?}");
    }
}

//! Lockstep updates of caller-held indexes
//!
//! Composite edits keep indexes across several shifts and moves. Each
//! function mirrors one buffer primitive so those indexes stay valid.

/// `count` slots were inserted at `at`
pub(super) fn inserted(tracked: &mut [usize], at: usize, count: usize) {
    for index in tracked.iter_mut().filter(|index| **index >= at) {
        *index += count;
    }
}

/// The range `[start, end)` was removed; indexes inside it collapse to `start`
pub(super) fn removed(tracked: &mut [usize], start: usize, end: usize) {
    let count = end - start;
    for index in tracked.iter_mut() {
        if *index >= end {
            *index -= count;
        } else if *index >= start {
            *index = start;
        }
    }
}

/// Adjacent ranges `[a, b)` and `[b, c)` traded places
pub(super) fn swapped(tracked: &mut [usize], a: usize, b: usize, c: usize) {
    for index in tracked.iter_mut() {
        if (a..b).contains(index) {
            *index += c - b;
        } else if (b..c).contains(index) {
            *index -= b - a;
        }
    }
}

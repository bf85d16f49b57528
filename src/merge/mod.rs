//! Distinct-sibling repair by subtree merging
//!
//! When two siblings carry equal values they are merged: the donor's children
//! join the recipient's, the donor's own slot disappears, and one contiguous
//! range is relocated so every subtree stays a contiguous slice.
//!
//! Merging can expose new duplicates among the merged children, one level
//! down, and so on. Those are repaired from an explicit FIFO of parents still
//! to check, so repair depth is bounded by memory, not by the call stack.
//!
//! Every function takes a `tracked` list of indexes the caller still needs;
//! they follow each shift and move. Indexes of a removed donor are redirected
//! to its recipient.

use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::buffer::TreeBuffer;
use crate::Preference;

/// Merge `donor` into `recipient` one level deep
///
/// Returns the recipient's new index. Equal or out-of-range indexes are a
/// no-op returning `recipient` unchanged.
pub fn shallow_merge<T>(
    buffer: &mut TreeBuffer<T>,
    recipient: usize,
    donor: usize,
    tracked: &mut Vec<usize>,
) -> usize {
    let len = buffer.len();
    if recipient == donor || recipient >= len || donor >= len {
        return recipient;
    }
    debug!(recipient, donor, "shallow merge");

    let recipient_slot = tracked.len();
    tracked.push(recipient);
    tracked.push(donor);
    let donor_slot = recipient_slot + 1;

    // A recipient nested under the donor is lifted out first and becomes the
    // donor's next sibling, otherwise it would end up as its own descendant.
    if (buffer.bottom_index(donor)..donor).contains(&recipient) {
        lift_out(buffer, recipient, donor, tracked);
    }

    let recipient = tracked[recipient_slot];
    let donor = tracked[donor_slot];
    let bottom = buffer.bottom_index(donor);
    let moved = buffer.children_count(donor);
    // Resolved before any count changes: the scan may cross the recipient
    let donor_parent = buffer.parent_index(donor);

    buffer.set_children_count(recipient, buffer.children_count(recipient) + moved);
    if let Some(parent) = donor_parent {
        buffer.set_children_count(parent, buffer.children_count(parent) - 1);
    }

    for index in tracked.iter_mut().filter(|index| **index == donor) {
        *index = recipient;
    }
    buffer.remove_value_tracked(donor, None, tracked);

    // The donor's children now occupy [bottom, donor) and become the last
    // children of the recipient.
    let recipient = tracked[recipient_slot];
    if recipient < bottom {
        trace!(recipient, bottom, end = donor, "moving donor children left");
        buffer.swap_ranges_tracked(recipient, bottom, donor, tracked);
    } else {
        trace!(recipient, bottom, end = donor, "moving donor children right");
        buffer.swap_ranges_tracked(bottom, donor, recipient, tracked);
    }

    let recipient = tracked[recipient_slot];
    tracked.truncate(recipient_slot);
    recipient
}

/// Move the subtree at `recipient` out of the donor's range to sit right
/// after the donor, re-parented to the donor's parent
fn lift_out<T>(buffer: &mut TreeBuffer<T>, recipient: usize, donor: usize, tracked: &mut [usize]) {
    let bottom = buffer.bottom_index(recipient);
    let recipient_parent = buffer.parent_index(recipient);
    let donor_parent = buffer.parent_index(donor);
    if let Some(parent) = recipient_parent {
        buffer.set_children_count(parent, buffer.children_count(parent) - 1);
    }
    if let Some(parent) = donor_parent {
        buffer.set_children_count(parent, buffer.children_count(parent) + 1);
    }
    trace!(recipient, donor, "lifting recipient out of donor");
    buffer.swap_ranges_tracked(bottom, recipient + 1, donor + 1, tracked);
}

/// Merge `donor` into `recipient`, then repair duplicates among the merged
/// children at every depth
///
/// Returns the recipient's new index.
pub fn deep_merge<T: PartialEq>(
    buffer: &mut TreeBuffer<T>,
    recipient: usize,
    donor: usize,
    preference: Preference,
    tracked: &mut Vec<usize>,
) -> usize {
    let recipient = shallow_merge(buffer, recipient, donor, tracked);
    if recipient >= buffer.len() {
        return recipient;
    }

    let slot = tracked.len();
    tracked.push(recipient);
    make_children_distinct(buffer, recipient, preference, tracked);
    let recipient = tracked[slot];
    tracked.truncate(slot);
    recipient
}

/// Merge duplicate children of `parent`, recursively
///
/// Returns the number of merges performed.
pub fn make_children_distinct<T: PartialEq>(
    buffer: &mut TreeBuffer<T>,
    parent: usize,
    preference: Preference,
    tracked: &mut Vec<usize>,
) -> usize {
    if parent >= buffer.len() {
        return 0;
    }
    repair(buffer, VecDeque::from([parent]), preference, tracked)
}

/// Merge duplicate siblings everywhere in the buffer
///
/// Returns the number of merges performed.
pub fn make_all_distinct<T: PartialEq>(
    buffer: &mut TreeBuffer<T>,
    preference: Preference,
    tracked: &mut Vec<usize>,
) -> usize {
    let queue: VecDeque<usize> = (0..buffer.len())
        .filter(|&index| buffer.children_count(index) > 1)
        .collect();
    repair(buffer, queue, preference, tracked)
}

fn repair<T: PartialEq>(
    buffer: &mut TreeBuffer<T>,
    mut queue: VecDeque<usize>,
    preference: Preference,
    tracked: &mut Vec<usize>,
) -> usize {
    let mut merges = 0;

    while let Some(mut current) = queue.pop_front() {
        while let Some((recipient, donor)) = duplicate_pair(buffer, current, preference) {
            // The queue and the current parent ride along with the caller's
            // indexes through the merge.
            let caller = tracked.len();
            tracked.extend(queue.drain(..));
            let current_slot = tracked.len();
            tracked.push(current);

            let merged = shallow_merge(buffer, recipient, donor, tracked);

            current = tracked[current_slot];
            tracked.truncate(current_slot);
            queue.extend(tracked.drain(caller..));
            queue.push_back(merged);
            merges += 1;
        }
    }

    if merges > 0 {
        debug!(merges, "repaired duplicate siblings");
    }
    merges
}

/// First colliding pair of children as `(recipient, donor)`
///
/// `Leftmost` picks the pair with the lowest first member and keeps the
/// lower index; `Rightmost` picks the pair with the highest last member and
/// keeps the higher index.
fn duplicate_pair<T: PartialEq>(
    buffer: &TreeBuffer<T>,
    parent: usize,
    preference: Preference,
) -> Option<(usize, usize)> {
    if parent >= buffer.len() || buffer.children_count(parent) < 2 {
        return None;
    }
    let children = buffer.children_indexes(parent);
    let values = buffer.values();

    match preference {
        Preference::Leftmost => children.iter().enumerate().find_map(|(position, &first)| {
            children[position + 1..]
                .iter()
                .find(|&&other| values[other] == values[first])
                .map(|&other| (first, other))
        }),
        Preference::Rightmost => children
            .iter()
            .enumerate()
            .rev()
            .find_map(|(position, &last)| {
                children[..position]
                    .iter()
                    .rev()
                    .find(|&&other| values[other] == values[last])
                    .map(|&other| (last, other))
            }),
    }
}

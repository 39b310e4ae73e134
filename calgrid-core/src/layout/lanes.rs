//! Overlap-lane assignment for the events of one hour row.
//!
//! Lanes are horizontal columns inside a row. Events that overlap in time are
//! pushed into different lanes; the row is split evenly between the lanes of
//! each cluster of transitively overlapping events.

/// Half-open minute interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(start: u32, end: u32) -> Self {
        Interval { start, end }
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end <= other.start || self.start >= other.end)
    }
}

/// Horizontal placement of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaneAssignment {
    pub lane_index: usize,
    /// Lanes in this event's cluster; shared by every event in the cluster
    pub lane_count: usize,
    /// Other events in the row this one overlaps directly
    pub overlap_count: usize,
}

/// Assign lanes to intervals given in render order.
///
/// Each interval takes the lane after the highest lane used by an overlapping
/// interval earlier in the list (lane 0 if there is none). `lane_count` is the
/// number of lanes used by the interval's overlap cluster, so
/// `lane_index < lane_count` always holds and overlapping events share a width.
pub fn assign_lanes(intervals: &[Interval]) -> Vec<LaneAssignment> {
    let n = intervals.len();

    let mut lanes = vec![0usize; n];
    let mut overlap_counts = vec![0usize; n];
    for i in 0..n {
        for j in 0..n {
            if i != j && intervals[i].overlaps(&intervals[j]) {
                overlap_counts[i] += 1;
            }
        }
        let lane = (0..i)
            .filter(|&j| intervals[i].overlaps(&intervals[j]))
            .map(|j| lanes[j] + 1)
            .max()
            .unwrap_or(0);
        lanes[i] = lane;
    }

    let clusters = overlap_clusters(intervals);
    let mut cluster_widths = vec![0usize; n];
    for i in 0..n {
        let width = &mut cluster_widths[clusters[i]];
        *width = (*width).max(lanes[i] + 1);
    }

    (0..n)
        .map(|i| LaneAssignment {
            lane_index: lanes[i],
            lane_count: cluster_widths[clusters[i]],
            overlap_count: overlap_counts[i],
        })
        .collect()
}

/// Label every interval with the index of the first member of its
/// connected component in the overlap graph.
fn overlap_clusters(intervals: &[Interval]) -> Vec<usize> {
    const UNVISITED: usize = usize::MAX;

    let n = intervals.len();
    let mut cluster = vec![UNVISITED; n];

    for root in 0..n {
        if cluster[root] != UNVISITED {
            continue;
        }
        cluster[root] = root;
        let mut stack = vec![root];
        while let Some(i) = stack.pop() {
            for j in 0..n {
                if cluster[j] == UNVISITED && intervals[i].overlaps(&intervals[j]) {
                    cluster[j] = root;
                    stack.push(j);
                }
            }
        }
    }

    cluster
}

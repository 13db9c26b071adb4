//! Bounded per-body position history
//!
//! Each tracked body keeps an oldest-to-newest ring of sampled positions
//! and a parallel ring of render-sink handles for the segments drawn
//! between consecutive points. Capacity is bounded; exceeding it evicts
//! the oldest point and releases its segment through the sink.
//!
//! The tracker is owned by the engine and holds no reference back to it:
//! every sink interaction goes through the `&mut dyn RenderSink` argument.
//! Sampling cadence is the engine's concern, the tracker records whenever
//! it is called.

use std::collections::{HashMap, VecDeque};

use crate::render::{RenderSink, ShapeHandle};
use crate::simulation::states::{BodyId, Vec2};

struct Track {
    points: VecDeque<Vec2>,
    // segments[i] joins points[i] and points[i + 1]
    segments: VecDeque<ShapeHandle>,
    color: String,
}

pub struct TrajectoryTracker {
    max_points: usize,
    tracks: HashMap<BodyId, Track>,
}

impl TrajectoryTracker {
    /// `max_points` is assumed already validated (>= 1).
    pub fn new(max_points: usize) -> Self {
        Self {
            max_points,
            tracks: HashMap::new(),
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    /// Start tracking a body. Segments inherit the body's color.
    pub fn register(&mut self, id: BodyId, color: String) {
        self.tracks.entry(id).or_insert(Track {
            points: VecDeque::new(),
            segments: VecDeque::new(),
            color,
        });
    }

    /// Record the body's current position and keep the ring within its
    /// cap. Invariant afterwards: segments == max(0, points - 1).
    pub fn sample(&mut self, id: BodyId, position: Vec2, sink: &mut dyn RenderSink) {
        let Some(track) = self.tracks.get_mut(&id) else {
            return;
        };
        track.points.push_back(position);

        while track.points.len() > self.max_points {
            track.points.pop_front();
            if let Some(oldest) = track.segments.pop_front() {
                sink.remove_shape(oldest);
            }
        }

        if track.points.len() >= 2 {
            let n = track.points.len();
            let handle = sink.add_line_segment(track.points[n - 2], track.points[n - 1], &track.color);
            track.segments.push_back(handle);
        }
    }

    /// Release every drawn segment and forget the history. The body stays
    /// registered and will accumulate a fresh trajectory.
    pub fn clear(&mut self, id: BodyId, sink: &mut dyn RenderSink) {
        if let Some(track) = self.tracks.get_mut(&id) {
            for handle in track.segments.drain(..) {
                sink.remove_shape(handle);
            }
            track.points.clear();
        }
    }

    /// Full teardown when the body leaves the simulation.
    pub fn remove(&mut self, id: BodyId, sink: &mut dyn RenderSink) {
        if let Some(track) = self.tracks.remove(&id) {
            for handle in track.segments {
                sink.remove_shape(handle);
            }
        }
    }

    /// Change the capacity. Lowering it below a body's current length
    /// evicts immediately down to the new cap, it never merely limits
    /// future growth.
    pub fn set_max_points(&mut self, cap: usize, sink: &mut dyn RenderSink) {
        self.max_points = cap;
        for track in self.tracks.values_mut() {
            while track.points.len() > cap {
                track.points.pop_front();
                if let Some(oldest) = track.segments.pop_front() {
                    sink.remove_shape(oldest);
                }
            }
        }
    }

    pub fn point_count(&self, id: BodyId) -> usize {
        self.tracks.get(&id).map_or(0, |t| t.points.len())
    }

    pub fn segment_count(&self, id: BodyId) -> usize {
        self.tracks.get(&id).map_or(0, |t| t.segments.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{BoundingBox, RenderSink};
    use std::collections::HashSet;

    /// Minimal sink tracking which handles are still alive.
    #[derive(Default)]
    struct CountingSink {
        next: u64,
        live: HashSet<ShapeHandle>,
    }

    impl RenderSink for CountingSink {
        fn add_circle(&mut self, _c: Vec2, _r: f64, _color: &str) -> ShapeHandle {
            self.next += 1;
            let h = ShapeHandle(self.next);
            self.live.insert(h);
            h
        }

        fn add_line_segment(&mut self, _p1: Vec2, _p2: Vec2, _color: &str) -> ShapeHandle {
            self.next += 1;
            let h = ShapeHandle(self.next);
            self.live.insert(h);
            h
        }

        fn update_shape_position(&mut self, _h: ShapeHandle, _bbox: BoundingBox) {}

        fn remove_shape(&mut self, handle: ShapeHandle) {
            assert!(self.live.remove(&handle), "double remove");
        }

        fn set_status_text(&mut self, _text: &str) {}
    }

    fn tracked(cap: usize) -> (TrajectoryTracker, CountingSink, BodyId) {
        let mut tracker = TrajectoryTracker::new(cap);
        tracker.register(BodyId(1), "Green".into());
        (tracker, CountingSink::default(), BodyId(1))
    }

    #[test]
    fn length_never_exceeds_cap_and_segments_track_points() {
        let (mut tracker, mut sink, id) = tracked(5);
        for i in 0..20 {
            tracker.sample(id, Vec2::new(i as f64, 0.0), &mut sink);
            assert!(tracker.point_count(id) <= 5);
            assert_eq!(
                tracker.segment_count(id),
                tracker.point_count(id).saturating_sub(1),
                "segment invariant broken after sample {i}"
            );
        }
        assert_eq!(tracker.point_count(id), 5);
        assert_eq!(tracker.segment_count(id), 4);
        assert_eq!(sink.live.len(), 4);
    }

    #[test]
    fn lowering_cap_evicts_immediately() {
        let (mut tracker, mut sink, id) = tracked(10);
        for i in 0..10 {
            tracker.sample(id, Vec2::new(i as f64, i as f64), &mut sink);
        }
        assert_eq!(tracker.point_count(id), 10);

        tracker.set_max_points(3, &mut sink);
        assert_eq!(tracker.point_count(id), 3);
        assert_eq!(tracker.segment_count(id), 2);
        assert_eq!(sink.live.len(), 2);
    }

    #[test]
    fn cap_of_one_keeps_a_single_point_and_no_segments() {
        let (mut tracker, mut sink, id) = tracked(1);
        for i in 0..5 {
            tracker.sample(id, Vec2::new(i as f64, 0.0), &mut sink);
        }
        assert_eq!(tracker.point_count(id), 1);
        assert_eq!(tracker.segment_count(id), 0);
        assert_eq!(sink.live.len(), 0);
    }

    #[test]
    fn clear_releases_every_segment_handle() {
        let (mut tracker, mut sink, id) = tracked(50);
        for i in 0..8 {
            tracker.sample(id, Vec2::new(0.0, i as f64), &mut sink);
        }
        assert_eq!(sink.live.len(), 7);

        tracker.clear(id, &mut sink);
        assert_eq!(tracker.point_count(id), 0);
        assert_eq!(tracker.segment_count(id), 0);
        assert_eq!(sink.live.len(), 0);

        // sampling resumes cleanly after a clear
        tracker.sample(id, Vec2::zeros(), &mut sink);
        tracker.sample(id, Vec2::new(1.0, 0.0), &mut sink);
        assert_eq!(tracker.segment_count(id), 1);
    }

    #[test]
    fn remove_forgets_the_body_entirely() {
        let (mut tracker, mut sink, id) = tracked(50);
        for i in 0..4 {
            tracker.sample(id, Vec2::new(i as f64, 0.0), &mut sink);
        }
        tracker.remove(id, &mut sink);
        assert_eq!(sink.live.len(), 0);

        // unregistered ids are ignored
        tracker.sample(id, Vec2::zeros(), &mut sink);
        assert_eq!(tracker.point_count(id), 0);
    }
}

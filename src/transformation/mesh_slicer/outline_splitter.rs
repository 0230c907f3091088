use super::{ClipVertex, PlaneSide};
use crate::math::{Point, Real, Uv, Vector};
use crate::shape::Tessellation;
use alloc::vec::Vec;

/// A vertex of an outline produced by an [`OutlineSplitter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OutlineVertex {
    /// A vertex of the source face, given by its index in the face.
    Original(u32),
    /// The `i`-th intersection point computed by the splitter.
    Intersection(u32),
}

/// Splits face outlines along the cutting plane.
///
/// A closed outline (last index equal to the first) is split into closed
/// outlines on each side, reconnected along the plane. An open outline is
/// split into one open outline per run of consecutive vertices on the same
/// side, each bounded by the intersections where the run starts and ends.
///
/// The buffers are reused from one outline to the next.
#[derive(Clone, Debug, Default)]
pub struct OutlineSplitter {
    // Linked lists of the top and bottom outlines. Entries below the outline
    // length are outline vertices, the others are intersections.
    top_next: Vec<Option<usize>>,
    bottom_next: Vec<Option<usize>>,
    intersections: Vec<ClipVertex>,
    positions: Vec<Real>,
    top: Vec<Vec<OutlineVertex>>,
    bottom: Vec<Vec<OutlineVertex>>,
    clip_edges: Vec<[u32; 2]>,
}

impl OutlineSplitter {
    /// Creates a new splitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `outline`.
    ///
    /// The outline contains indices into `points` and `distances`, which give
    /// the position and signed distance to the plane of each face vertex.
    /// Intersections of a closed outline are paired along `direction`, the
    /// direction of the line where the face plane meets the cutting plane.
    ///
    /// # Panics
    /// Panics if the outline does not have vertices on both sides of the plane.
    pub fn split(
        &mut self,
        outline: &[u32],
        points: &[Point<Real>],
        distances: &[Real],
        direction: &Vector<Real>,
    ) {
        self.intersections.clear();
        self.positions.clear();
        self.top.clear();
        self.bottom.clear();
        self.clip_edges.clear();

        let side = |slot: usize| PlaneSide::of(distances[outline[slot] as usize]);
        assert!(
            (0..outline.len()).any(|i| side(i) == PlaneSide::Top)
                && (0..outline.len()).any(|i| side(i) == PlaneSide::Bottom),
            "outline should be on both sides of the plane"
        );

        if Tessellation::is_closed_outline(outline) {
            self.split_closed(outline, points, distances, direction);
        } else {
            self.split_open(outline, points, distances);
        }
    }

    /// The outlines on the top side.
    pub fn top_outlines(&self) -> &[Vec<OutlineVertex>] {
        &self.top
    }

    /// The outlines on the bottom side.
    pub fn bottom_outlines(&self) -> &[Vec<OutlineVertex>] {
        &self.bottom
    }

    /// The outlines on the given side.
    pub fn outlines(&self, side: PlaneSide) -> &[Vec<OutlineVertex>] {
        match side {
            PlaneSide::Top => &self.top,
            PlaneSide::Bottom => &self.bottom,
        }
    }

    /// The `i`-th intersection point.
    pub fn intersection(&self, i: u32) -> &ClipVertex {
        &self.intersections[i as usize]
    }

    /// Pairs of intersections bounding the parts of a closed outline's
    /// interior lying on the plane.
    pub fn clip_edges(&self) -> &[[u32; 2]] {
        &self.clip_edges
    }

    fn push_intersection(
        &mut self,
        a: usize,
        b: usize,
        outline: &[u32],
        points: &[Point<Real>],
        distances: &[Real],
    ) -> u32 {
        let (ia, ib) = (outline[a] as usize, outline[b] as usize);
        // Outline intersections carry no texture coordinates.
        let va = ClipVertex {
            point: points[ia],
            uv: Uv::origin(),
            face_vertex: None,
        };
        let vb = ClipVertex {
            point: points[ib],
            ..va
        };
        let id = self.intersections.len() as u32;
        self.intersections
            .push(ClipVertex::intersection(&va, distances[ia], &vb, distances[ib]));
        id
    }

    fn split_open(&mut self, outline: &[u32], points: &[Point<Real>], distances: &[Real]) {
        let mut side = PlaneSide::of(distances[outline[0] as usize]);
        let mut run = alloc::vec![OutlineVertex::Original(outline[0])];

        for next in 1..outline.len() {
            let next_side = PlaneSide::of(distances[outline[next] as usize]);

            if next_side != side {
                let id = self.push_intersection(next - 1, next, outline, points, distances);
                run.push(OutlineVertex::Intersection(id));
                let done = core::mem::replace(&mut run, alloc::vec![OutlineVertex::Intersection(id)]);
                self.outlines_mut(side).push(done);
                side = next_side;
            }

            run.push(OutlineVertex::Original(outline[next]));
        }

        self.outlines_mut(side).push(run);
    }

    fn split_closed(
        &mut self,
        outline: &[u32],
        points: &[Point<Real>],
        distances: &[Real],
        direction: &Vector<Real>,
    ) {
        let len = outline.len();
        self.top_next.clear();
        self.top_next.resize(len, None);
        self.bottom_next.clear();
        self.bottom_next.resize(len, None);

        // Step 1: link consecutive vertices on the same side. Crossings append
        // an intersection slot whose successor on the other side is unknown yet.
        let mut entering = 0;
        let mut exiting = 0;

        for next in 1..len {
            let cur = next - 1;
            let cur_side = PlaneSide::of(distances[outline[cur] as usize]);
            let next_side = PlaneSide::of(distances[outline[next] as usize]);
            let slot = self.top_next.len();

            match (cur_side, next_side) {
                (PlaneSide::Top, PlaneSide::Bottom) => {
                    let id = self.push_intersection(cur, next, outline, points, distances);
                    self.positions
                        .push(direction.dot(&self.intersections[id as usize].point.coords));
                    self.top_next[cur] = Some(slot);
                    self.top_next.push(None);
                    self.bottom_next.push(Some(next));
                    exiting += 1;
                }
                (PlaneSide::Bottom, PlaneSide::Top) => {
                    let id = self.push_intersection(cur, next, outline, points, distances);
                    self.positions
                        .push(direction.dot(&self.intersections[id as usize].point.coords));
                    self.bottom_next[cur] = Some(slot);
                    self.top_next.push(Some(next));
                    self.bottom_next.push(None);
                    entering += 1;
                }
                (PlaneSide::Bottom, PlaneSide::Bottom) => self.bottom_next[cur] = Some(next),
                (PlaneSide::Top, PlaneSide::Top) => self.top_next[cur] = Some(next),
            }
        }

        assert_eq!(
            entering, exiting,
            "closed outline should cross the plane as many times in both directions"
        );

        // Step 2: sort the intersections along the plane and link them by
        // pairs, each pair bounding a part of the outline interior.
        let mut first: Option<usize> = None;
        let mut first_position = Real::NEG_INFINITY;
        let mut inside = false;

        loop {
            let mut second: Option<usize> = None;
            let mut second_position = Real::INFINITY;

            for slot in len..self.top_next.len() {
                let unlinked = self.top_next[slot].is_none() || self.bottom_next[slot].is_none();

                if Some(slot) != first && unlinked {
                    let position = self.positions[slot - len];
                    if position >= first_position && position < second_position {
                        second = Some(slot);
                        second_position = position;
                    }
                }
            }

            let Some(slot2) = second else {
                break;
            };

            if inside {
                if let Some(slot1) = first {
                    if self.top_next[slot1].is_none() {
                        self.top_next[slot1] = Some(slot2);
                        self.bottom_next[slot2] = Some(slot1);
                    } else {
                        self.top_next[slot2] = Some(slot1);
                        self.bottom_next[slot1] = Some(slot2);
                    }

                    self.clip_edges
                        .push([(slot1 - len) as u32, (slot2 - len) as u32]);
                }
            }

            first = Some(slot2);
            first_position = second_position;
            inside = !inside;
        }

        // Step 3: walk the linked lists from every outline vertex not visited yet.
        for side in [PlaneSide::Top, PlaneSide::Bottom] {
            for start in 0..len {
                if self.next_mut(side)[start].is_none() {
                    continue;
                }

                let mut result = Vec::new();
                let mut slot = Some(start);

                while let Some(curr) = slot {
                    result.push(if curr < len {
                        OutlineVertex::Original(outline[curr])
                    } else {
                        OutlineVertex::Intersection((curr - len) as u32)
                    });
                    slot = self.next_mut(side)[curr].take();
                }

                self.outlines_mut(side).push(result);
            }
        }
    }

    fn next_mut(&mut self, side: PlaneSide) -> &mut Vec<Option<usize>> {
        match side {
            PlaneSide::Top => &mut self.top_next,
            PlaneSide::Bottom => &mut self.bottom_next,
        }
    }

    fn outlines_mut(&mut self, side: PlaneSide) -> &mut Vec<Vec<OutlineVertex>> {
        match side {
            PlaneSide::Top => &mut self.top,
            PlaneSide::Bottom => &mut self.bottom,
        }
    }
}

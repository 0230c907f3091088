use super::CuttingPlane;
use crate::math::{Point, Point2, Real, Vector2};
use crate::utils::hashmap::{Entry, HashMap};
use crate::utils::HashablePartialEq;
use alloc::vec::Vec;
use na::RealField;
use smallvec::SmallVec;

/// A closed contour of the cross-section of a sliced mesh, in the local frame
/// of the cutting plane.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
pub struct CapContour {
    /// The contour vertices. The last vertex connects back to the first one.
    pub points: Vec<Point2<Real>>,
    /// Is this contour counter-clockwise?
    pub ccw: bool,
}

impl CapContour {
    /// Creates a contour, computing its orientation from its turning angle.
    pub fn new(points: Vec<Point2<Real>>) -> Self {
        let ccw = total_turning_angle(&points) >= 0.0;
        Self { points, ccw }
    }

    /// Is this contour counter-clockwise?
    #[inline]
    pub fn is_ccw(&self) -> bool {
        self.ccw
    }

    /// Reverses the orientation of this contour.
    pub fn reverse(&mut self) {
        self.points.reverse();
        self.ccw = !self.ccw;
    }
}

/// The signed angle from `dir1` to `dir2`, both unit vectors.
fn turning_angle(dir1: &Vector2<Real>, dir2: &Vector2<Real>) -> Real {
    let cos = dir1.dot(dir2);

    // Out of range values are rounding errors.
    if cos >= 1.0 {
        return 0.0;
    }

    let sin = dir1.perp(dir2);
    let angle = if cos <= -1.0 {
        Real::pi()
    } else {
        cos.acos()
    };

    if sin < 0.0 {
        -angle
    } else {
        angle
    }
}

/// The sum of the signed angles between consecutive edges of a closed polygon.
///
/// This is about `2π` for a simple counter-clockwise polygon and `-2π` for a
/// clockwise one. Repeated points and consecutive edges with the same direction
/// are skipped.
pub fn total_turning_angle(points: &[Point2<Real>]) -> Real {
    let Some(mut prev_point) = points.last().copied() else {
        return 0.0;
    };
    let mut first_dir = None;
    let mut prev_dir: Option<Vector2<Real>> = None;
    let mut total = 0.0;

    for pt in points {
        if *pt == prev_point {
            continue;
        }

        let dir = (pt - prev_point).normalize();
        if let Some(prev) = prev_dir {
            if prev != dir {
                total += turning_angle(&prev, &dir);
            }
        }

        prev_point = *pt;
        prev_dir = Some(dir);
        if first_dir.is_none() {
            first_dir = Some(dir);
        }
    }

    if let (Some(first), Some(last)) = (first_dir, prev_dir) {
        if first != last {
            total += turning_angle(&last, &first);
        }
    }

    total
}

/// The undirected graph of the segments along which a mesh crosses the cutting plane.
///
/// Nodes are the distinct segment endpoints, merged when their coordinates in
/// the plane frame are exactly equal. Each node also remembers the first
/// model-space point that was projected onto it.
#[derive(Clone, Debug, Default)]
pub struct IntersectionGraph {
    points: Vec<Point2<Real>>,
    origins: Vec<Point<Real>>,
    lookup: HashMap<HashablePartialEq<Point2<Real>>, u32>,
    adjacency: Vec<SmallVec<[u32; 4]>>,
    edge_count: usize,
    pruned: Vec<u32>,
    path: Vec<u32>,
    path_position: Vec<Option<usize>>,
}

impl IntersectionGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every node and edge from this graph, keeping its allocations.
    pub fn clear(&mut self) {
        self.points.clear();
        self.origins.clear();
        self.lookup.clear();
        self.adjacency.clear();
        self.edge_count = 0;
    }

    /// Does this graph have no edge?
    pub fn is_empty(&self) -> bool {
        self.edge_count == 0
    }

    /// The number of nodes of this graph, including the ones left without edge.
    pub fn node_count(&self) -> usize {
        self.points.len()
    }

    /// The number of edges of this graph.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// The position of a node, in the plane frame.
    #[inline]
    pub fn point(&self, node: u32) -> &Point2<Real> {
        &self.points[node as usize]
    }

    /// The first model-space point merged into a node.
    #[inline]
    pub fn origin(&self, node: u32) -> &Point<Real> {
        &self.origins[node as usize]
    }

    /// The nodes connected to `node`.
    pub fn neighbors(&self, node: u32) -> &[u32] {
        &self.adjacency[node as usize]
    }

    fn node(&mut self, plane: &CuttingPlane, pt: &Point<Real>) -> u32 {
        let projected = plane.project(pt);

        match self.lookup.entry(HashablePartialEq::new(projected)) {
            Entry::Occupied(e) => *e.get(),
            Entry::Vacant(e) => {
                let id = self.points.len() as u32;
                self.points.push(projected);
                self.origins.push(*pt);
                self.adjacency.push(SmallVec::new());
                let _ = e.insert(id);
                id
            }
        }
    }

    /// Adds the segment `[a, b]`, given in model space.
    ///
    /// Returns `false` if nothing was added because the segment has zero length,
    /// its endpoints project onto the same node, or it is already in the graph.
    pub fn add_edge(&mut self, plane: &CuttingPlane, a: &Point<Real>, b: &Point<Real>) -> bool {
        if a == b {
            return false;
        }

        let na = self.node(plane, a);
        let nb = self.node(plane, b);

        if na == nb || self.adjacency[na as usize].contains(&nb) {
            return false;
        }

        self.adjacency[na as usize].push(nb);
        self.adjacency[nb as usize].push(na);
        self.edge_count += 1;
        true
    }

    fn remove_edge(&mut self, a: u32, b: u32) {
        let adj = &mut self.adjacency[a as usize];
        if let Some(i) = adj.iter().position(|n| *n == b) {
            let _ = adj.swap_remove(i);
        }
    }

    /// Repeatedly removes the edges of every node with a single neighbor.
    ///
    /// Returns the number of edges removed.
    pub fn prune(&mut self) -> usize {
        self.pruned.clear();
        self.pruned.extend(
            (0..self.adjacency.len() as u32).filter(|n| self.adjacency[*n as usize].len() == 1),
        );

        let mut removed = 0;

        while let Some(node) = self.pruned.pop() {
            // The node may have lost its last edge since it was queued.
            let Some(neighbor) = self.adjacency[node as usize].pop() else {
                continue;
            };

            log::trace!(
                "pruning dangling cap node {} at {:?}",
                node,
                self.points[node as usize]
            );
            self.remove_edge(neighbor, node);
            self.edge_count -= 1;
            removed += 1;

            if self.adjacency[neighbor as usize].len() == 1 {
                self.pruned.push(neighbor);
            }
        }

        removed
    }

    /// Consumes the edges of this graph to find closed contours.
    ///
    /// The graph is walked depth-first, removing each edge as it is followed.
    /// Whenever the walk comes back to a node of the current path, the part of
    /// the path after that node is a contour. Each contour is appended to
    /// `out` as a list of nodes without repetition of the first one.
    pub fn extract_contours(&mut self, out: &mut Vec<Vec<u32>>) {
        self.path.clear();
        self.path_position.clear();
        self.path_position.resize(self.adjacency.len(), None);

        for start in 0..self.adjacency.len() as u32 {
            if self.adjacency[start as usize].is_empty() {
                continue;
            }

            self.path.push(start);
            self.path_position[start as usize] = Some(0);

            while let Some(&curr) = self.path.last() {
                let Some(next) = self.adjacency[curr as usize].pop() else {
                    // Dead end: track back.
                    self.path_position[curr as usize] = None;
                    let _ = self.path.pop();
                    continue;
                };

                self.remove_edge(next, curr);
                self.edge_count -= 1;

                match self.path_position[next as usize] {
                    Some(pos) => {
                        out.push(self.path[pos..].to_vec());
                        for node in &self.path[pos + 1..] {
                            self.path_position[*node as usize] = None;
                        }
                        self.path.truncate(pos + 1);
                    }
                    None => {
                        self.path_position[next as usize] = Some(self.path.len());
                        self.path.push(next);
                    }
                }
            }
        }
    }
}

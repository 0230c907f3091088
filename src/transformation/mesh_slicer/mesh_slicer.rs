use super::cap_builder::CapBuilder;
use super::{
    clip_triangle, CapContour, ClipVertex, CuttingPlane, IntersectionGraph, OutlineSplitter,
    OutlineVertex, PlaneSide, TriangleClip, VertexDistances,
};
use crate::math::{Point, Real, Uv};
use crate::shape::{
    Appearance, Face, FaceBuilder, FaceGroup, FaceVertex, Mesh, MeshError, TessellationPrimitive,
};
use crate::transformation::{DelaunayTessellator, Tessellator, UvGenerator, UvMap};
use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Controls which outputs a [`MeshSlicer`] produces and how.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(transparent)]
pub struct SlicerFlags(u16);

bitflags::bitflags! {
    impl SlicerFlags: u16 {
        /// If set, the part of the mesh above the cutting plane is produced.
        const TOP = 1;
        /// If set, the part of the mesh below the cutting plane is produced.
        const BOTTOM = 1 << 1;
        /// If set, the cross-section of the mesh is produced as a separate two-sided mesh.
        const SLICE = 1 << 2;
        /// If set, the top part is closed by a cap facing down.
        const TOP_CAPPED = 1 << 3;
        /// If set, the bottom part is closed by a cap facing up.
        const BOTTOM_CAPPED = 1 << 4;
        /// If set, faces crossing the plane are split between both parts.
        ///
        /// Otherwise they are omitted from both parts.
        const INTERSECT_FACES = 1 << 5;
        /// If set, triangles crossing the plane are split between both parts.
        ///
        /// Otherwise they are omitted from both parts, and do not contribute to the caps.
        const INTERSECT_TRIANGLES = 1 << 6;
        /// If set, vertices with the exact same coordinates share the same
        /// entry of the vertex table of each output mesh.
        const MERGE_DUPLICATE_VERTICES = 1 << 7;
    }
}

impl Default for SlicerFlags {
    fn default() -> Self {
        SlicerFlags::TOP_CAPPED
            | SlicerFlags::BOTTOM_CAPPED
            | SlicerFlags::INTERSECT_FACES
            | SlicerFlags::INTERSECT_TRIANGLES
            | SlicerFlags::MERGE_DUPLICATE_VERTICES
    }
}

/// The configuration of a [`MeshSlicer`], read at the start of every slice.
#[derive(Clone, Debug)]
pub struct MeshSlicerConfig {
    /// The outputs to produce and how to produce them.
    pub flags: SlicerFlags,
    /// The plane along which meshes are sliced.
    pub cutting_plane: CuttingPlane,
    /// If set, replaces the appearance of every face of the top part.
    pub top_appearance: Option<Arc<Appearance>>,
    /// If set, replaces the appearance of every face of the bottom part.
    pub bottom_appearance: Option<Arc<Appearance>>,
    /// The appearance of the cross-section, also used for the caps without override.
    pub slice_appearance: Option<Arc<Appearance>>,
    /// Generates the texture coordinates of the cross-section and caps.
    pub slice_uv_map: Option<Arc<dyn UvMap>>,
}

impl Default for MeshSlicerConfig {
    fn default() -> Self {
        Self {
            flags: SlicerFlags::default(),
            cutting_plane: CuttingPlane::with_unit_normal(crate::math::Vector::z_axis(), 0.0),
            top_appearance: None,
            bottom_appearance: None,
            slice_appearance: None,
            slice_uv_map: None,
        }
    }
}

/// The meshes produced by slicing a mesh.
///
/// Every output is `None` if it was disabled or has no face.
#[derive(Clone, Debug, Default)]
pub struct SliceOutputs {
    /// The part of the mesh above the cutting plane.
    ///
    /// This is the input mesh itself if it lies entirely above the plane.
    pub top: Option<Arc<Mesh>>,
    /// The part of the mesh below the cutting plane.
    ///
    /// This is the input mesh itself if it lies entirely below the plane.
    pub bottom: Option<Arc<Mesh>>,
    /// The cross-section of the mesh.
    pub slice: Option<Arc<Mesh>>,
}

const SIDES: [PlaneSide; 2] = [PlaneSide::Top, PlaneSide::Bottom];

// The output mesh of one side being built, with the maps from the input mesh.
#[derive(Clone, Debug, Default)]
struct SideWorkspace {
    enabled: bool,
    mesh: Mesh,
    builder: FaceBuilder,
    // Input coordinate index -> output coordinate index.
    coord_map: Vec<Option<u32>>,
    // Input face vertex -> vertex of `builder`.
    face_vertex_map: Vec<Option<u32>>,
}

impl SideWorkspace {
    fn reset(&mut self, enabled: bool, vertex_count: usize) {
        self.enabled = enabled;
        self.mesh = Mesh::new();
        self.coord_map.clear();
        self.coord_map.resize(vertex_count, None);
    }

    fn begin_face(&mut self, face: &Face) {
        self.builder.initialize(Some(face.normal()));
        self.face_vertex_map.clear();
        self.face_vertex_map.resize(face.vertices().len(), None);
    }

    fn new_vertex(&mut self, point: Point<Real>, merge: bool) -> u32 {
        if merge {
            self.mesh.vertex_index(point)
        } else {
            self.mesh.add_vertex(point)
        }
    }

    fn copy_coordinate(&mut self, source: &Mesh, index: u32, merge: bool) -> u32 {
        if let Some(id) = self.coord_map[index as usize] {
            return id;
        }

        let id = self.new_vertex(source.vertices()[index as usize], merge);
        self.coord_map[index as usize] = Some(id);
        id
    }

    fn copy_face_vertex(&mut self, source: &Mesh, face: &Face, i: u32, merge: bool) -> u32 {
        if let Some(id) = self.face_vertex_map[i as usize] {
            return id;
        }

        let v = &face.vertices()[i as usize];
        let coord = self.copy_coordinate(source, v.vertex_index, merge);
        let id = self.builder.vertex_index(v.point, coord, v.uv);
        self.face_vertex_map[i as usize] = Some(id);
        id
    }

    fn add_clip_vertex(&mut self, source: &Mesh, face: &Face, v: &ClipVertex, merge: bool) -> u32 {
        match v.face_vertex {
            Some(i) => self.copy_face_vertex(source, face, i, merge),
            None => {
                let coord = self.new_vertex(v.point, merge);
                self.builder.vertex_index(v.point, coord, v.uv)
            }
        }
    }

    fn add_polygon(&mut self, source: &Mesh, face: &Face, polygon: &[ClipVertex], merge: bool) {
        let mut ids = [0; 4];
        for (id, v) in ids.iter_mut().zip(polygon) {
            *id = self.add_clip_vertex(source, face, v, merge);
        }

        match polygon.len() {
            3 => self.builder.add_triangle(ids[0], ids[1], ids[2]),
            4 => self.builder.add_quad(ids[0], ids[1], ids[2], ids[3]),
            n => unreachable!("a clipped triangle cannot have {} vertices", n),
        }
    }

    fn copy_face(
        &mut self,
        source: &Mesh,
        group: &FaceGroup,
        appearance: Option<&Arc<Appearance>>,
        face: &Face,
        merge: bool,
    ) {
        let vertices = face
            .vertices()
            .iter()
            .map(|v| FaceVertex {
                vertex_index: self.copy_coordinate(source, v.vertex_index, merge),
                ..*v
            })
            .collect();

        let id = self
            .mesh
            .face_group_index(appearance, group.smooth, group.two_sided);
        self.mesh.push_face(id, face.with_vertices(vertices));
    }

    fn finish_face(
        &mut self,
        group: &FaceGroup,
        appearance: Option<&Arc<Appearance>>,
    ) -> Result<(), MeshError> {
        if self.builder.is_empty() {
            return Ok(());
        }

        let face = self.builder.build()?;
        let id = self
            .mesh
            .face_group_index(appearance, group.smooth, group.two_sided);
        self.mesh.push_face(id, face);
        Ok(())
    }
}

// Buffers reused from one slice to the next.
#[derive(Clone, Debug, Default)]
struct SliceWorkspace {
    distances: VertexDistances,
    sides: [SideWorkspace; 2],
    face_points: Vec<Point<Real>>,
    face_distances: Vec<Real>,
    splitter: OutlineSplitter,
    graph: IntersectionGraph,
    caps: CapBuilder,
}

/// Splits meshes along a cutting plane.
///
/// Slicing a mesh produces up to three meshes: the part above the plane
/// (top), the part below it (bottom), and the cross-section (slice). The top
/// and bottom parts can be closed by caps filling the cross-section, so they
/// remain watertight if the input mesh is.
///
/// A slicer keeps reusable buffers between calls to [`MeshSlicer::slice`]. It
/// is not meant to be shared between threads: use one slicer per thread
/// instead (see `slice_meshes_parallel` with the `parallel` feature).
///
/// # Example
///
/// ```
/// # #[cfg(feature = "f32")] {
/// use planecut3d::math::{Point, Vector};
/// use planecut3d::shape::{Face, FaceVertex, Mesh};
/// use planecut3d::transformation::{CuttingPlane, MeshSlicer};
/// use std::sync::Arc;
///
/// let mut mesh = Mesh::new();
/// let vertices = [Point::new(0.0, 0.0, -1.0), Point::new(1.0, 0.0, 1.0), Point::new(0.0, 1.0, 1.0)]
///     .into_iter()
///     .map(|pt| FaceVertex::new(pt, mesh.vertex_index(pt)))
///     .collect();
/// mesh.add_face(None, false, false, Face::convex_polygon(vertices).unwrap()).unwrap();
///
/// let mut slicer = MeshSlicer::new(CuttingPlane::new(Vector::z(), 0.0).unwrap());
/// slicer.set_top_enabled(true);
/// slicer.set_bottom_enabled(true);
/// slicer.slice(&Arc::new(mesh)).unwrap();
///
/// assert_eq!(slicer.top_mesh().unwrap().triangle_count(), 2);
/// assert_eq!(slicer.bottom_mesh().unwrap().triangle_count(), 1);
/// assert!(slicer.slice_mesh().is_none());
/// # }
/// ```
pub struct MeshSlicer {
    config: MeshSlicerConfig,
    tessellator: Box<dyn Tessellator>,
    outputs: SliceOutputs,
    workspace: SliceWorkspace,
}

impl Default for MeshSlicer {
    fn default() -> Self {
        Self::with_config(MeshSlicerConfig::default())
    }
}

impl MeshSlicer {
    /// Creates a slicer with the default configuration and the given cutting plane.
    pub fn new(cutting_plane: CuttingPlane) -> Self {
        Self::with_config(MeshSlicerConfig {
            cutting_plane,
            ..MeshSlicerConfig::default()
        })
    }

    /// Creates a slicer with the given configuration.
    pub fn with_config(config: MeshSlicerConfig) -> Self {
        Self {
            config,
            tessellator: Box::new(DelaunayTessellator::new()),
            outputs: SliceOutputs::default(),
            workspace: SliceWorkspace::default(),
        }
    }

    /// The configuration of this slicer.
    pub fn config(&self) -> &MeshSlicerConfig {
        &self.config
    }

    /// The configuration of this slicer, to be modified before the next slice.
    pub fn config_mut(&mut self) -> &mut MeshSlicerConfig {
        &mut self.config
    }

    /// The flags of this slicer.
    pub fn flags(&self) -> SlicerFlags {
        self.config.flags
    }

    /// Replaces all the flags of this slicer.
    ///
    /// This also replaces the capping, intersection and merge flags: combine
    /// with [`SlicerFlags::default()`] to only enable outputs.
    pub fn set_flags(&mut self, flags: SlicerFlags) {
        self.config.flags = flags;
    }

    /// Enables or disables some flags of this slicer.
    pub fn set_flag(&mut self, flags: SlicerFlags, enabled: bool) {
        self.config.flags.set(flags, enabled);
    }

    /// Is the part above the plane produced?
    pub fn is_top_enabled(&self) -> bool {
        self.config.flags.contains(SlicerFlags::TOP)
    }

    /// Sets whether the part above the plane is produced.
    pub fn set_top_enabled(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::TOP, enabled);
    }

    /// Is the part below the plane produced?
    pub fn is_bottom_enabled(&self) -> bool {
        self.config.flags.contains(SlicerFlags::BOTTOM)
    }

    /// Sets whether the part below the plane is produced.
    pub fn set_bottom_enabled(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::BOTTOM, enabled);
    }

    /// Is the cross-section produced?
    pub fn is_slice_enabled(&self) -> bool {
        self.config.flags.contains(SlicerFlags::SLICE)
    }

    /// Sets whether the cross-section is produced.
    pub fn set_slice_enabled(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::SLICE, enabled);
    }

    /// Is the part above the plane capped?
    pub fn is_top_capped(&self) -> bool {
        self.config.flags.contains(SlicerFlags::TOP_CAPPED)
    }

    /// Sets whether the part above the plane is capped.
    pub fn set_top_capped(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::TOP_CAPPED, enabled);
    }

    /// Is the part below the plane capped?
    pub fn is_bottom_capped(&self) -> bool {
        self.config.flags.contains(SlicerFlags::BOTTOM_CAPPED)
    }

    /// Sets whether the part below the plane is capped.
    pub fn set_bottom_capped(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::BOTTOM_CAPPED, enabled);
    }

    /// Are faces crossing the plane split?
    pub fn is_intersect_faces(&self) -> bool {
        self.config.flags.contains(SlicerFlags::INTERSECT_FACES)
    }

    /// Sets whether faces crossing the plane are split, or omitted.
    pub fn set_intersect_faces(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::INTERSECT_FACES, enabled);
    }

    /// Are triangles crossing the plane split?
    pub fn is_intersect_triangles(&self) -> bool {
        self.config.flags.contains(SlicerFlags::INTERSECT_TRIANGLES)
    }

    /// Sets whether triangles crossing the plane are split, or omitted.
    pub fn set_intersect_triangles(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::INTERSECT_TRIANGLES, enabled);
    }

    /// Are duplicate vertices merged in the output meshes?
    pub fn is_merge_duplicate_vertices(&self) -> bool {
        self.config
            .flags
            .contains(SlicerFlags::MERGE_DUPLICATE_VERTICES)
    }

    /// Sets whether duplicate vertices are merged in the output meshes.
    pub fn set_merge_duplicate_vertices(&mut self, enabled: bool) {
        self.set_flag(SlicerFlags::MERGE_DUPLICATE_VERTICES, enabled);
    }

    /// The plane along which meshes are sliced.
    pub fn cutting_plane(&self) -> &CuttingPlane {
        &self.config.cutting_plane
    }

    /// Sets the plane along which meshes are sliced.
    pub fn set_cutting_plane(&mut self, cutting_plane: CuttingPlane) {
        self.config.cutting_plane = cutting_plane;
    }

    /// The appearance override of the part above the plane.
    pub fn top_appearance(&self) -> Option<&Arc<Appearance>> {
        self.config.top_appearance.as_ref()
    }

    /// Sets the appearance override of the part above the plane.
    ///
    /// With `None`, faces keep their original appearance.
    pub fn set_top_appearance(&mut self, appearance: Option<Arc<Appearance>>) {
        self.config.top_appearance = appearance;
    }

    /// The appearance override of the part below the plane.
    pub fn bottom_appearance(&self) -> Option<&Arc<Appearance>> {
        self.config.bottom_appearance.as_ref()
    }

    /// Sets the appearance override of the part below the plane.
    ///
    /// With `None`, faces keep their original appearance.
    pub fn set_bottom_appearance(&mut self, appearance: Option<Arc<Appearance>>) {
        self.config.bottom_appearance = appearance;
    }

    /// The appearance of the cross-section.
    pub fn slice_appearance(&self) -> Option<&Arc<Appearance>> {
        self.config.slice_appearance.as_ref()
    }

    /// Sets the appearance of the cross-section.
    pub fn set_slice_appearance(&mut self, appearance: Option<Arc<Appearance>>) {
        self.config.slice_appearance = appearance;
    }

    /// The texture mapping of the cross-section and caps.
    pub fn slice_uv_map(&self) -> Option<&Arc<dyn UvMap>> {
        self.config.slice_uv_map.as_ref()
    }

    /// Sets the texture mapping of the cross-section and caps.
    ///
    /// Without map, their texture coordinates are zero.
    pub fn set_slice_uv_map(&mut self, uv_map: Option<Arc<dyn UvMap>>) {
        self.config.slice_uv_map = uv_map;
    }

    /// Replaces the tessellator used to triangulate the caps.
    pub fn set_tessellator(&mut self, tessellator: Box<dyn Tessellator>) {
        self.tessellator = tessellator;
    }

    /// The part above the plane of the last sliced mesh.
    pub fn top_mesh(&self) -> Option<&Arc<Mesh>> {
        self.outputs.top.as_ref()
    }

    /// The part below the plane of the last sliced mesh.
    pub fn bottom_mesh(&self) -> Option<&Arc<Mesh>> {
        self.outputs.bottom.as_ref()
    }

    /// The cross-section of the last sliced mesh.
    pub fn slice_mesh(&self) -> Option<&Arc<Mesh>> {
        self.outputs.slice.as_ref()
    }

    /// All the outputs of the last sliced mesh.
    pub fn outputs(&self) -> &SliceOutputs {
        &self.outputs
    }

    /// Moves the outputs of the last sliced mesh out of this slicer.
    pub fn take_outputs(&mut self) -> SliceOutputs {
        core::mem::take(&mut self.outputs)
    }

    /// The contours of the cross-section of the last sliced mesh, in the plane frame.
    ///
    /// This is empty if no cap was built.
    pub fn contours(&self) -> &[CapContour] {
        self.workspace.caps.contours()
    }

    /// Sets the cutting plane, then slices `mesh`.
    pub fn slice_with_plane(
        &mut self,
        mesh: &Arc<Mesh>,
        cutting_plane: CuttingPlane,
    ) -> Result<(), MeshError> {
        self.set_cutting_plane(cutting_plane);
        self.slice(mesh)
    }

    /// Slices `mesh`.
    ///
    /// The results are available through [`MeshSlicer::top_mesh`],
    /// [`MeshSlicer::bottom_mesh`] and [`MeshSlicer::slice_mesh`] until the
    /// next call. Fails only if a face built from the split parts is invalid.
    pub fn slice(&mut self, mesh: &Arc<Mesh>) -> Result<(), MeshError> {
        let flags = self.config.flags;
        let plane = self.config.cutting_plane;
        let ws = &mut self.workspace;

        self.outputs = SliceOutputs::default();
        ws.caps.clear();
        ws.graph.clear();
        ws.distances.compute(mesh, &plane);

        let sides = ws.distances.sides();
        let has_top = sides.top && flags.contains(SlicerFlags::TOP);
        let has_bottom = sides.bottom && flags.contains(SlicerFlags::BOTTOM);

        log::debug!(
            "slicing mesh with {} vertices and {} faces: above={}, below={}",
            mesh.vertices().len(),
            mesh.face_count(),
            sides.top,
            sides.bottom
        );

        if !sides.is_straddling() {
            let alias = |enabled: bool| {
                (enabled && !mesh.face_groups().is_empty()).then(|| mesh.clone())
            };
            self.outputs.top = alias(has_top);
            self.outputs.bottom = alias(has_bottom);
            return Ok(());
        }

        ws.sides[PlaneSide::Top as usize].reset(has_top, mesh.vertices().len());
        ws.sides[PlaneSide::Bottom as usize].reset(has_bottom, mesh.vertices().len());

        let mut job = SliceJob {
            config: &self.config,
            flags,
            plane: &plane,
            source: mesh,
            ws,
            record_edges: flags.contains(SlicerFlags::SLICE)
                || flags.contains(SlicerFlags::TOP | SlicerFlags::TOP_CAPPED)
                || flags.contains(SlicerFlags::BOTTOM | SlicerFlags::BOTTOM_CAPPED),
        };

        for group in mesh.face_groups() {
            for face in group.faces() {
                job.process_face(group, face)?;
            }
        }

        let mut slice = flags.contains(SlicerFlags::SLICE).then(Mesh::new);

        if !job.ws.graph.is_empty()
            && flags.intersects(
                SlicerFlags::SLICE | SlicerFlags::TOP_CAPPED | SlicerFlags::BOTTOM_CAPPED,
            )
        {
            job.build_caps(self.tessellator.as_mut(), slice.as_mut())?;
        }

        let finish = |mesh: Mesh| (!mesh.face_groups().is_empty()).then(|| Arc::new(mesh));
        let [top, bottom] = &mut job.ws.sides;
        self.outputs = SliceOutputs {
            top: top
                .enabled
                .then(|| core::mem::take(&mut top.mesh))
                .and_then(finish),
            bottom: bottom
                .enabled
                .then(|| core::mem::take(&mut bottom.mesh))
                .and_then(finish),
            slice: slice.and_then(finish),
        };

        Ok(())
    }
}

// The state of one call to `MeshSlicer::slice`.
struct SliceJob<'a> {
    config: &'a MeshSlicerConfig,
    flags: SlicerFlags,
    plane: &'a CuttingPlane,
    source: &'a Mesh,
    ws: &'a mut SliceWorkspace,
    record_edges: bool,
}

impl<'a> SliceJob<'a> {
    fn merge(&self) -> bool {
        self.flags.contains(SlicerFlags::MERGE_DUPLICATE_VERTICES)
    }

    fn appearance(&self, side: PlaneSide, group: &'a FaceGroup) -> Option<&'a Arc<Appearance>> {
        let overridden = match side {
            PlaneSide::Top => self.config.top_appearance.as_ref(),
            PlaneSide::Bottom => self.config.bottom_appearance.as_ref(),
        };
        overridden.or(group.appearance.as_ref())
    }

    fn add_edge(&mut self, a: &Point<Real>, b: &Point<Real>) {
        if self.record_edges {
            let _ = self.ws.graph.add_edge(self.plane, a, b);
        }
    }

    fn process_face(&mut self, group: &'a FaceGroup, face: &'a Face) -> Result<(), MeshError> {
        let merge = self.merge();
        let sides = self
            .ws
            .distances
            .classify(face.vertices().iter().map(|v| v.vertex_index));

        if let Some(side) = sides.single() {
            let appearance = self.appearance(side, group);
            let target = &mut self.ws.sides[side as usize];
            if target.enabled {
                target.copy_face(self.source, group, appearance, face, merge);
            }
            return Ok(());
        }

        if !self.flags.contains(SlicerFlags::INTERSECT_FACES) {
            return Ok(());
        }

        for side in &mut self.ws.sides {
            if side.enabled {
                side.begin_face(face);
            }
        }

        self.ws.face_points.clear();
        self.ws.face_distances.clear();
        for v in face.vertices() {
            self.ws.face_points.push(v.point);
            self.ws
                .face_distances
                .push(self.ws.distances.distance(v.vertex_index));
        }

        for primitive in face.primitives() {
            self.process_primitive(face, primitive);
        }

        let any_side = self.ws.sides.iter().any(|s| s.enabled);
        let outline_edges = face.primitives().is_empty() && self.record_edges;
        if any_side || outline_edges {
            for outline in face.outlines() {
                self.process_outline(face, outline, outline_edges);
            }
        }

        for side in SIDES {
            let appearance = self.appearance(side, group);
            let target = &mut self.ws.sides[side as usize];
            if target.enabled {
                target.finish_face(group, appearance)?;
            }
        }

        Ok(())
    }

    fn process_primitive(&mut self, face: &Face, primitive: &TessellationPrimitive) {
        let merge = self.merge();
        let sides = self.ws.distances.classify(
            primitive
                .vertices()
                .iter()
                .map(|i| face.vertices()[*i as usize].vertex_index),
        );

        if let Some(side) = sides.single() {
            let target = &mut self.ws.sides[side as usize];
            if target.enabled {
                let copy =
                    primitive.map_vertices(|i| target.copy_face_vertex(self.source, face, i, merge));
                target.builder.add_primitive(copy);
            }
            return;
        }

        for tri in primitive.triangles() {
            self.process_triangle(face, tri);
        }
    }

    fn process_triangle(&mut self, face: &Face, tri: [u32; 3]) {
        let merge = self.merge();
        let vertices = tri.map(|i| ClipVertex::from_face_vertex(face, i));
        let distances = tri.map(|i| self.ws.face_distances[i as usize]);

        match clip_triangle(vertices, distances) {
            TriangleClip::Top => self.add_polygon(PlaneSide::Top, face, &vertices, merge),
            TriangleClip::Bottom => self.add_polygon(PlaneSide::Bottom, face, &vertices, merge),
            TriangleClip::Split { top, bottom, edge } => {
                if self.flags.contains(SlicerFlags::INTERSECT_TRIANGLES) {
                    self.add_polygon(PlaneSide::Top, face, &top, merge);
                    self.add_edge(&edge[0], &edge[1]);
                    self.add_polygon(PlaneSide::Bottom, face, &bottom, merge);
                }
            }
        }
    }

    fn add_polygon(&mut self, side: PlaneSide, face: &Face, polygon: &[ClipVertex], merge: bool) {
        let target = &mut self.ws.sides[side as usize];
        if target.enabled {
            target.add_polygon(self.source, face, polygon, merge);
        }
    }

    fn process_outline(&mut self, face: &Face, outline: &[u32], record_edges: bool) {
        let merge = self.merge();
        let sides = self
            .ws
            .distances
            .classify(outline.iter().map(|i| face.vertices()[*i as usize].vertex_index));

        if let Some(side) = sides.single() {
            let target = &mut self.ws.sides[side as usize];
            if target.enabled {
                let copy = outline
                    .iter()
                    .map(|i| target.copy_face_vertex(self.source, face, *i, merge))
                    .collect();
                target.builder.add_outline(copy);
            }
            return;
        }

        let direction = face.normal().cross(&self.plane.normal().into_inner());
        let ws = &mut *self.ws;
        ws.splitter
            .split(outline, &ws.face_points, &ws.face_distances, &direction);

        for side in SIDES {
            let target = &mut ws.sides[side as usize];
            if !target.enabled {
                continue;
            }

            for split in ws.splitter.outlines(side) {
                let copy = split
                    .iter()
                    .map(|v| match *v {
                        OutlineVertex::Original(i) => {
                            target.copy_face_vertex(self.source, face, i, merge)
                        }
                        OutlineVertex::Intersection(i) => {
                            let pt = ws.splitter.intersection(i).point;
                            let coord = target.new_vertex(pt, merge);
                            target.builder.vertex_index(pt, coord, Uv::origin())
                        }
                    })
                    .collect();
                target.builder.add_outline(copy);
            }
        }

        if record_edges {
            for [a, b] in ws.splitter.clip_edges() {
                let pa = ws.splitter.intersection(*a).point;
                let pb = ws.splitter.intersection(*b).point;
                let _ = ws.graph.add_edge(self.plane, &pa, &pb);
            }
        }
    }

    fn build_caps(
        &mut self,
        tessellator: &mut dyn Tessellator,
        slice: Option<&mut Mesh>,
    ) -> Result<(), MeshError> {
        let merge = self.merge();
        let ws = &mut *self.ws;
        let pruned = ws.graph.prune();

        log::debug!(
            "cap graph: {} nodes, {} edges, {} dangling edges pruned",
            ws.graph.node_count(),
            ws.graph.edge_count(),
            pruned
        );

        if ws.graph.is_empty() {
            return Ok(());
        }

        ws.caps.build_contours(&mut ws.graph);
        let tessellation = ws.caps.tessellate(tessellator);

        log::debug!(
            "cap tessellation: {} contours, {} triangles",
            ws.caps.contours().len(),
            tessellation.counter_clockwise.triangle_count()
        );

        if tessellation.is_empty() {
            return Ok(());
        }

        let normal = self.plane.normal();
        let uv_map = self.config.slice_uv_map.as_deref();
        let slice_appearance = self.config.slice_appearance.as_ref();

        if let Some(slice) = slice {
            let uvs = UvGenerator::new(slice_appearance.map(|a| &**a), uv_map, normal.into_inner());
            let face = ws
                .caps
                .build_face(&tessellation, true, normal, self.plane, &uvs, slice, merge)?;
            slice.add_face(slice_appearance.cloned(), false, true, face)?;
        }

        let caps = [
            (PlaneSide::Top, SlicerFlags::TOP_CAPPED, -normal, false),
            (PlaneSide::Bottom, SlicerFlags::BOTTOM_CAPPED, normal, true),
        ];

        for (side, flag, cap_normal, ccw) in caps {
            let target = &mut ws.sides[side as usize];
            if !target.enabled || !self.flags.contains(flag) {
                continue;
            }

            let overridden = match side {
                PlaneSide::Top => self.config.top_appearance.as_ref(),
                PlaneSide::Bottom => self.config.bottom_appearance.as_ref(),
            };
            let appearance = overridden.or(slice_appearance);
            let uvs = UvGenerator::new(appearance.map(|a| &**a), uv_map, cap_normal.into_inner());
            let face = ws.caps.build_face(
                &tessellation,
                ccw,
                cap_normal,
                self.plane,
                &uvs,
                &mut target.mesh,
                merge,
            )?;
            target.mesh.add_face(appearance.cloned(), false, false, face)?;
        }

        Ok(())
    }
}

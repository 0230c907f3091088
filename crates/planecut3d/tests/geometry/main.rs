mod fixtures;

mod appearances;
mod cube_slice;
mod nested_contours;
mod outline_faces;
mod slicer_flags;
mod watertight_random_planes;

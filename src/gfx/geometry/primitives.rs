//! # Primitive Shape Generation
//!
//! This module contains functions to generate the 3D primitive shapes used by
//! the scene. All shapes are generated with proper normals and texture
//! coordinates, in a Y-up coordinate system.

use super::{BoxFace, GeometryData, MeshKind, MeshPart};
use std::f32::consts::PI;

/// Radial resolution shared by every round primitive
pub const ROUND_SEGMENTS: u32 = 36;
/// Ring count for spheres and domes
pub const SPHERE_RINGS: u32 = 18;

/// Main radius of every torus variant
pub const TORUS_MAIN_RADIUS: f32 = 1.0;
/// Tube radius of the standard and half torus
pub const TORUS_TUBE_RADIUS: f32 = 0.2;
/// Tube radius of the thin torus
pub const THIN_TORUS_TUBE_RADIUS: f32 = 0.1;
/// Top radius of the tapered cylinder, the bottom radius being 1
pub const TAPERED_TOP_RADIUS: f32 = 0.5;

/// Generates the mesh loaded for `kind`
pub fn generate_mesh(kind: MeshKind) -> GeometryData {
    match kind {
        MeshKind::Plane => generate_plane(1, 1),
        MeshKind::Box => generate_box(),
        MeshKind::Sphere => generate_sphere(ROUND_SEGMENTS, SPHERE_RINGS),
        MeshKind::HalfSphere => generate_half_sphere(ROUND_SEGMENTS, SPHERE_RINGS / 2),
        MeshKind::Cylinder => generate_cylinder(1.0, ROUND_SEGMENTS),
        MeshKind::TaperedCylinder => generate_cylinder(TAPERED_TOP_RADIUS, ROUND_SEGMENTS),
        MeshKind::Torus => {
            generate_torus(TORUS_MAIN_RADIUS, TORUS_TUBE_RADIUS, 2.0 * PI, ROUND_SEGMENTS, 16)
        }
        MeshKind::HalfTorus => {
            generate_torus(TORUS_MAIN_RADIUS, TORUS_TUBE_RADIUS, PI, ROUND_SEGMENTS / 2, 16)
        }
        MeshKind::ThinTorus => generate_torus(
            TORUS_MAIN_RADIUS,
            THIN_TORUS_TUBE_RADIUS,
            2.0 * PI,
            ROUND_SEGMENTS,
            12,
        ),
    }
}

/// Generate a unit cube centered at the origin
///
/// Returns a cube with vertices from -0.5 to 0.5 on all axes. Each face is
/// recorded as its own part so it can be drawn with a different texture.
pub fn generate_box() -> GeometryData {
    let mut data = GeometryData::new();

    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let tex_coords = [
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let face_normals = [
        [0.0, 0.0, 1.0],
        [0.0, 0.0, -1.0],
        [-1.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = face_normals
        .iter()
        .flat_map(|normal| std::iter::repeat(*normal).take(4))
        .collect();

    for (i, face) in BoxFace::ALL.into_iter().enumerate() {
        let start = data.indices.len();
        let base = i as u32 * 4;
        data.indices
            .extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        data.close_part(MeshPart::Face(face), start);
    }

    data
}

/// Generate a UV sphere of radius 1.0 centered at the origin
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    push_dome(&mut data, longitude_segments, latitude_segments, PI);
    data
}

/// Generate the upper half of a unit sphere, closed by a disk at y = 0
pub fn generate_half_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();
    let long_segs = longitude_segments.max(3);
    push_dome(&mut data, long_segs, latitude_segments, PI * 0.5);
    push_disk(&mut data, 0.0, 1.0, -1.0, long_segs);
    data
}

/// Pushes sphere rings from the north pole down to polar angle `max_theta`
fn push_dome(data: &mut GeometryData, longitude_segments: u32, latitude_segments: u32, max_theta: f32) {
    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);
    let base = data.vertices.len() as u32;

    for lat in 0..=lat_segs {
        let theta = lat as f32 * max_theta / lat_segs as f32;
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32;
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            // Normal is same as position for unit sphere
            data.vertices.push([x, y, z]);
            data.normals.push([x, y, z]);
            data.tex_coords
                .push([long as f32 / long_segs as f32, theta / PI]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = base + lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }
}

/// Pushes a flat disk at height `y` facing `normal_y` (+1 up, -1 down)
fn push_disk(data: &mut GeometryData, y: f32, radius: f32, normal_y: f32, segments: u32) {
    let center = data.vertices.len() as u32;
    data.vertices.push([0.0, y, 0.0]);
    data.normals.push([0.0, normal_y, 0.0]);
    data.tex_coords.push([0.5, 0.5]);

    for i in 0..=segments {
        let angle = i as f32 * 2.0 * PI / segments as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.vertices.push([radius * cos_a, y, radius * sin_a]);
        data.normals.push([0.0, normal_y, 0.0]);
        data.tex_coords.push([0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a]);
    }

    for i in 0..segments {
        let current = center + 1 + i;
        let next = current + 1;
        if normal_y > 0.0 {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// Generate a plane spanning -1..1 in X and Z with its normal along +Y
///
/// # Arguments
/// * `width_segments` - Number of subdivisions along X
/// * `depth_segments` - Number of subdivisions along Z
pub fn generate_plane(width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = v * 2.0 - 1.0;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = u * 2.0 - 1.0;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, v]);
        }
    }

    // Counter-clockwise when viewed from above
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Generate a cylinder standing on the XZ plane
///
/// The bottom ring has radius 1 at y = 0 and the top ring has `top_radius` at
/// y = 1, so a `top_radius` below 1 yields a tapered cylinder. Sides, top cap
/// and bottom cap are recorded as separate parts.
pub fn generate_cylinder(top_radius: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let bottom_radius = 1.0;
    // Side normals lean outward-up when the top is narrower
    let slope = bottom_radius - top_radius;
    let normal_scale = 1.0 / (1.0 + slope * slope).sqrt();

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        let normal = [cos_a * normal_scale, slope * normal_scale, sin_a * normal_scale];
        let u = i as f32 / segs as f32;

        data.vertices
            .push([bottom_radius * cos_a, 0.0, bottom_radius * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 1.0]);

        data.vertices.push([top_radius * cos_a, 1.0, top_radius * sin_a]);
        data.normals.push(normal);
        data.tex_coords.push([u, 0.0]);
    }

    let start = data.indices.len();
    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_next + 1;

        data.indices
            .extend_from_slice(&[bottom_current, top_current, bottom_next]);
        data.indices
            .extend_from_slice(&[top_current, top_next, bottom_next]);
    }
    data.close_part(MeshPart::CylinderSides, start);

    let start = data.indices.len();
    push_disk(&mut data, 1.0, top_radius, 1.0, segs);
    data.close_part(MeshPart::CylinderTop, start);

    let start = data.indices.len();
    push_disk(&mut data, 0.0, bottom_radius, -1.0, segs);
    data.close_part(MeshPart::CylinderBottom, start);

    data
}

/// Generate a torus lying in the XY plane, centered at the origin
///
/// # Arguments
/// * `main_radius` - Distance from the center to the middle of the tube
/// * `tube_radius` - Radius of the tube
/// * `sweep` - Angle swept around the Z axis starting at +X; `PI` gives the
///   upper (y >= 0) half
/// * `major_segments` - Segments along the sweep
/// * `minor_segments` - Segments around the tube
pub fn generate_torus(
    main_radius: f32,
    tube_radius: f32,
    sweep: f32,
    major_segments: u32,
    minor_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let major = major_segments.max(3);
    let minor = minor_segments.max(3);

    for i in 0..=major {
        let u = i as f32 * sweep / major as f32;
        let (sin_u, cos_u) = u.sin_cos();

        for j in 0..=minor {
            let v = j as f32 * 2.0 * PI / minor as f32;
            let (sin_v, cos_v) = v.sin_cos();
            let ring = main_radius + tube_radius * cos_v;

            data.vertices
                .push([ring * cos_u, ring * sin_u, tube_radius * sin_v]);
            data.normals.push([cos_v * cos_u, cos_v * sin_u, sin_v]);
            data.tex_coords
                .push([i as f32 / major as f32, j as f32 / minor as f32]);
        }
    }

    for i in 0..major {
        for j in 0..minor {
            let first = i * (minor + 1) + j;
            let second = first + minor + 1;

            data.indices.extend_from_slice(&[first, second, first + 1]);
            data.indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds(data: &GeometryData) -> ([f32; 3], [f32; 3]) {
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for v in &data.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(v[axis]);
                max[axis] = max[axis].max(v[axis]);
            }
        }
        (min, max)
    }

    fn assert_consistent(data: &GeometryData) {
        assert_eq!(data.vertices.len(), data.normals.len());
        assert_eq!(data.vertices.len(), data.tex_coords.len());
        assert_eq!(data.indices.len() % 3, 0);
        let count = data.vertices.len() as u32;
        assert!(data.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn test_box_generation() {
        let cube = generate_box();
        assert_eq!(cube.vertex_count(), 24); // 6 faces * 4 vertices
        assert_eq!(cube.triangle_count(), 12);
        assert_consistent(&cube);

        let faces = cube.index_ranges(&BoxFace::ALL.map(MeshPart::Face));
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|range| range.len() == 6));
        assert_eq!(cube.index_ranges(&[MeshPart::Whole]), vec![0..36]);
    }

    #[test]
    fn test_box_face_normals() {
        let cube = generate_box();
        let right = cube.index_ranges(&[MeshPart::Face(BoxFace::Right)])[0].clone();
        for index in &cube.indices[right.start as usize..right.end as usize] {
            assert_eq!(cube.normals[*index as usize], [1.0, 0.0, 0.0]);
            assert_eq!(cube.vertices[*index as usize][0], 0.5);
        }
    }

    #[test]
    fn test_plane_generation() {
        let plane = generate_plane(2, 2);
        assert_eq!(plane.vertices.len(), 9); // 3x3 grid
        assert_eq!(plane.indices.len(), 24); // 4 quads * 2 triangles * 3 indices
        assert_consistent(&plane);

        let (min, max) = bounds(&plane);
        assert_eq!(min, [-1.0, 0.0, -1.0]);
        assert_eq!(max, [1.0, 0.0, 1.0]);
        assert!(plane.normals.iter().all(|n| *n == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn test_sphere_generation() {
        let sphere = generate_sphere(8, 6);
        assert_consistent(&sphere);
        for v in &sphere.vertices {
            let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
            assert!((length - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_half_sphere_is_upper_dome() {
        let dome = generate_half_sphere(12, 6);
        assert_consistent(&dome);
        let (min, max) = bounds(&dome);
        assert!(min[1] > -1e-5);
        assert!((max[1] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_cylinder_parts_cover_all_indices() {
        let cylinder = generate_cylinder(1.0, 12);
        assert_consistent(&cylinder);

        let ranges = cylinder.index_ranges(&[
            MeshPart::CylinderSides,
            MeshPart::CylinderTop,
            MeshPart::CylinderBottom,
        ]);
        assert_eq!(ranges.len(), 3);
        let covered: usize = ranges.iter().map(|r| r.len()).sum();
        assert_eq!(covered, cylinder.indices.len());

        let (min, max) = bounds(&cylinder);
        assert!((min[1]).abs() < 1e-6 && (max[1] - 1.0).abs() < 1e-6);
        assert!((max[0] - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_tapered_cylinder_top_radius() {
        let tapered = generate_cylinder(TAPERED_TOP_RADIUS, 16);
        for v in tapered.vertices.iter().filter(|v| v[1] == 1.0) {
            let radius = (v[0] * v[0] + v[2] * v[2]).sqrt();
            assert!(radius <= TAPERED_TOP_RADIUS + 1e-5);
        }
        // Side normals tilt upward
        let top = tapered.index_ranges(&[MeshPart::CylinderSides])[0].clone();
        let first = tapered.indices[top.start as usize] as usize;
        assert!(tapered.normals[first][1] > 0.0);
    }

    #[test]
    fn test_torus_dimensions() {
        let torus = generate_torus(1.0, 0.2, 2.0 * PI, 24, 8);
        assert_consistent(&torus);
        let (min, max) = bounds(&torus);
        assert!((max[0] - 1.2).abs() < 1e-5);
        assert!((min[0] + 1.2).abs() < 1e-5);
        assert!((max[2] - 0.2).abs() < 1e-2);

        let thin = generate_mesh(MeshKind::ThinTorus);
        let (_, max) = bounds(&thin);
        assert!((max[0] - 1.1).abs() < 1e-5);
    }

    #[test]
    fn test_half_torus_stays_above_x_axis() {
        let half = generate_mesh(MeshKind::HalfTorus);
        assert_consistent(&half);
        let (min, _) = bounds(&half);
        assert!(min[1] > -1e-5);
    }

    #[test]
    fn test_every_mesh_kind_generates() {
        for kind in MeshKind::ALL {
            let mesh = generate_mesh(kind);
            assert!(mesh.triangle_count() > 0, "{kind:?} is empty");
            assert_consistent(&mesh);
        }
    }
}

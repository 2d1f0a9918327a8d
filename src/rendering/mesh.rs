use crate::rendering::scene::Object;
use bytemuck::{Pod, Zeroable};
use std::mem;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    const ATTRIBS: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// Per-object data: model matrix columns and a linear RGBA colour.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct InstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl InstanceRaw {
    const ATTRIBS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        5 => Float32x4, 6 => Float32x4, 7 => Float32x4, 8 => Float32x4,
        9 => Float32x4
    ];

    pub fn from_object(object: &Object) -> Self {
        Self {
            model: object.model_matrix().into(),
            color: object.color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<InstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBS,
        }
    }
}

/// (normal, tangent, bitangent) per face, with `tangent × bitangent = normal`
/// so each quad winds counter-clockwise seen from outside.
const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
    ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
    ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
    ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
    ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
    ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
];

/// Unit cube centred on the origin, four vertices per face.
pub fn cube_vertices() -> Vec<Vertex> {
    const CORNERS: [(f32, f32); 4] = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];

    FACES
        .iter()
        .flat_map(|&(normal, tangent, bitangent)| {
            CORNERS.iter().map(move |&(u, v)| Vertex {
                position: [
                    normal[0] * 0.5 + tangent[0] * u + bitangent[0] * v,
                    normal[1] * 0.5 + tangent[1] * u + bitangent[1] * v,
                    normal[2] * 0.5 + tangent[2] * u + bitangent[2] * v,
                ],
                normal,
            })
        })
        .collect()
}

pub fn cube_indices() -> Vec<u16> {
    (0..FACES.len() as u16)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{InnerSpace, Vector3};

    #[test]
    fn cube_triangles_face_outwards() {
        let vertices = cube_vertices();
        let indices = cube_indices();
        assert_eq!(vertices.len(), 24);
        assert_eq!(indices.len(), 36);

        for tri in indices.chunks(3) {
            let [a, b, c] =
                [tri[0], tri[1], tri[2]].map(|i| Vector3::from(vertices[i as usize].position));
            let normal = Vector3::from(vertices[tri[0] as usize].normal);
            assert!((b - a).cross(c - a).dot(normal) > 0.0);
        }
    }

    #[test]
    fn cube_spans_unit_extent() {
        for vertex in cube_vertices() {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
        }
    }

    #[test]
    fn instance_layout_matches_struct() {
        assert_eq!(mem::size_of::<InstanceRaw>(), 80);
        assert_eq!(InstanceRaw::desc().array_stride, 80);
    }
}

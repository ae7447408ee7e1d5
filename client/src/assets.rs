//! Asset sources the render context loads spawnable objects from.
//!
//! Names with the `builtin:` prefix resolve to procedurally built primitives. Anything else is
//! an OBJ file relative to the library's asset directory, loaded with `tobj`; every model in
//! the file becomes one mesh child of the returned root.

use crate::{
    error::LoadError,
    scene::{MeshChild, MeshNode},
};
use shared::{BUILTIN_ASSET_PREFIX, Vec3};
use std::path::PathBuf;

/// Half extent of the built-in primitives, in authored units. With the default object scale
/// of `0.01` they come out at about 50 render units across.
pub const BUILTIN_HALF_EXTENT: f32 = 2500.0;

/// Something that can produce a fresh, unplaced root node for an asset name.
///
/// Loads run on their own threads, so sources must be shareable.
pub trait MeshSource: Send + Sync + 'static {
    fn load(&self, name: &str) -> Result<MeshNode, LoadError>;
}

pub struct AssetLibrary {
    root: PathBuf,
}

impl AssetLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn load_obj(&self, name: &str) -> Result<MeshNode, LoadError> {
        let path = self.root.join(name);
        let (models, _materials) = tobj::load_obj(&path, &tobj::LoadOptions::default())
            .map_err(|source| LoadError::Obj {
                path: path.clone(),
                source,
            })?;

        let children = models
            .into_iter()
            .map(|model| MeshChild::mesh(model.name, Vec3::zeros(), model.mesh.positions))
            .collect();

        Ok(MeshNode::new(name, children))
    }
}

impl MeshSource for AssetLibrary {
    fn load(&self, name: &str) -> Result<MeshNode, LoadError> {
        match name.strip_prefix(BUILTIN_ASSET_PREFIX) {
            Some(builtin) => builtin_node(builtin),
            None => self.load_obj(name),
        }
    }
}

fn builtin_node(name: &str) -> Result<MeshNode, LoadError> {
    let h = BUILTIN_HALF_EXTENT;
    let children = match name {
        "tetrahedron" => vec![MeshChild::mesh("tetrahedron", Vec3::zeros(), tetrahedron(h))],
        "cube" => vec![MeshChild::mesh("cube", Vec3::zeros(), cuboid(Vec3::repeat(h)))],
        "dumbbell" => {
            let weight = Vec3::repeat(h * 0.5);
            vec![
                MeshChild::mesh("weight.left", Vec3::new(-2.0 * h, 0.0, 0.0), cuboid(weight)),
                MeshChild::mesh("weight.right", Vec3::new(2.0 * h, 0.0, 0.0), cuboid(weight)),
                MeshChild::group("grip", Vec3::zeros()),
            ]
        }
        // A root with nothing to collide with. Loads fine, fails descriptor derivation.
        "empty" => vec![MeshChild::group("marker", Vec3::zeros())],
        _ => return Err(LoadError::UnknownBuiltin(name.to_string())),
    };

    Ok(MeshNode::new(format!("{BUILTIN_ASSET_PREFIX}{name}"), children))
}

fn tetrahedron(h: f32) -> Vec<f32> {
    vec![
        h, h, h, //
        h, -h, -h, //
        -h, h, -h, //
        -h, -h, h,
    ]
}

fn cuboid(half_extents: Vec3) -> Vec<f32> {
    let mut positions = Vec::with_capacity(8 * 3);
    for x in [-1.0, 1.0] {
        for y in [-1.0, 1.0] {
            for z in [-1.0, 1.0] {
                positions.extend_from_slice(&[
                    x * half_extents.x,
                    y * half_extents.y,
                    z * half_extents.z,
                ]);
            }
        }
    }
    positions
}

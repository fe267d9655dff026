use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use slabgen_geom::{Orientation, OrientedShapes, VoxelShape};

use crate::component::Component;
use crate::family::Family;
use crate::types::{BlockDescriptor, Direction, Fluid, Identifier, IdentifierError, PlacementContext};

/// Orientation the authored shape faces.
pub const CANONICAL_ORIENTATION: Orientation = Orientation::East;
/// Orientation of a freshly created or fallback-placed variant.
pub const DEFAULT_ORIENTATION: Orientation = Orientation::North;

static SHAPES: LazyLock<OrientedShapes> = LazyLock::new(|| {
    OrientedShapes::from_canonical(
        CANONICAL_ORIENTATION,
        VoxelShape::from_pixels(0.0, 0.0, 0.0, 8.0, 16.0, 16.0),
    )
});

/// Outline shapes for all four orientations, built once per process.
pub fn shapes() -> &'static OrientedShapes {
    &SHAPES
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantState {
    pub orientation: Orientation,
    pub waterlogged: bool,
}

impl Default for VariantState {
    fn default() -> Self {
        Self {
            orientation: DEFAULT_ORIENTATION,
            waterlogged: false,
        }
    }
}

impl VariantState {
    pub const TYPE_PROPERTY: &'static str = "type";
    pub const WATERLOGGED_PROPERTY: &'static str = "waterlogged";

    /// Every state, orientation-major.
    pub fn all() -> impl Iterator<Item = VariantState> {
        Orientation::ALL.into_iter().flat_map(|orientation| {
            [false, true].into_iter().map(move |waterlogged| VariantState {
                orientation,
                waterlogged,
            })
        })
    }

    /// Blockstate variant key, e.g. `type=north,waterlogged=false`.
    pub fn property_string(&self) -> String {
        format!(
            "{}={},{}={}",
            Self::TYPE_PROPERTY,
            self.orientation,
            Self::WATERLOGGED_PROPERTY,
            self.waterlogged
        )
    }
}

/// Registry name of the variant for `family`: `namespace:prefix/<path_name>`.
pub fn variant_id(namespace: &str, prefix: &str, family: &Family) -> Result<Identifier, IdentifierError> {
    Identifier::new(namespace, &format!("{prefix}/{}", family.path_name()))
}

/// The vertical slab generated for one family.
#[derive(Debug)]
pub struct VariantBlock {
    id: Identifier,
    family: Arc<Family>,
    descriptor: BlockDescriptor,
}

impl VariantBlock {
    /// Builds the variant with settings copied from the family's slab.
    pub fn new(id: Identifier, family: Arc<Family>, slab: &Component, item_group: Option<Identifier>) -> Self {
        let descriptor = BlockDescriptor {
            material: slab.material().to_string(),
            map_color: slab.map_color(),
            sound_group: slab.sound_group().to_string(),
            item_group,
            with_item: true,
        };
        Self {
            id,
            family,
            descriptor,
        }
    }

    #[inline]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    #[inline]
    pub fn family(&self) -> &Arc<Family> {
        &self.family
    }

    #[inline]
    pub fn descriptor(&self) -> &BlockDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn default_state(&self) -> VariantState {
        VariantState::default()
    }

    /// State to place for a click on `ctx.side`: east, south and west map to
    /// themselves, anything else falls back to the default orientation. Water
    /// at the target waterlogs the block.
    pub fn placement_state(&self, ctx: &PlacementContext) -> VariantState {
        let orientation = match ctx.side {
            Direction::East => Orientation::East,
            Direction::South => Orientation::South,
            Direction::West => Orientation::West,
            _ => DEFAULT_ORIENTATION,
        };
        VariantState {
            orientation,
            waterlogged: ctx.fluid == Fluid::Water,
        }
    }

    #[inline]
    pub fn outline_shape(&self, state: VariantState) -> &'static VoxelShape {
        shapes().get(state.orientation)
    }
}

/// Append-only, ordered list of every variant created so far. Clones share storage.
#[derive(Clone, Default, Debug)]
pub struct VariantSet {
    blocks: Arc<RwLock<Vec<Arc<VariantBlock>>>>,
}

impl VariantSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, block: Arc<VariantBlock>) {
        self.blocks.write().push(block);
    }

    pub fn len(&self) -> usize {
        self.blocks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.read().is_empty()
    }

    /// Copy of the current list, in creation order.
    pub fn snapshot(&self) -> Vec<Arc<VariantBlock>> {
        self.blocks.read().clone()
    }

    pub fn find(&self, id: &Identifier) -> Option<Arc<VariantBlock>> {
        self.blocks.read().iter().find(|b| b.id() == id).cloned()
    }

    pub fn find_by_family(&self, family: &Identifier) -> Option<Arc<VariantBlock>> {
        self.blocks
            .read()
            .iter()
            .find(|b| b.family().id() == family)
            .cloned()
    }
}

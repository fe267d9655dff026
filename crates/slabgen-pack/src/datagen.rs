//! JSON generators for vertical slab variants.

use serde_json::{Map, Value, json};
use slabgen_blocks::variant::{CANONICAL_ORIENTATION, VariantState, shapes};
use slabgen_blocks::{Identifier, VariantBlock};
use slabgen_geom::{PIXELS_PER_BLOCK, VoxelShape};

use crate::archive::VirtualPack;
use crate::lang::LangBuilder;

fn simple_pool(id: &Identifier, copy_name: bool) -> Value {
    let mut entry = json!({
        "type": "minecraft:item",
        "name": id.to_string(),
    });
    if copy_name {
        entry["functions"] = json!([{
            "function": "minecraft:copy_name",
            "source": "block_entity",
        }]);
    }
    json!({
        "rolls": 1.0,
        "bonus_rolls": 0.0,
        "entries": [entry],
        "conditions": [{ "condition": "minecraft:survives_explosion" }],
    })
}

/// Loot table: the item form of `id`, plus one pool deferring to the
/// `dynamic_drop` provider.
pub fn block_loot_table(id: &Identifier, dynamic_drop: &Identifier) -> Value {
    json!({
        "type": "minecraft:block",
        "pools": [
            simple_pool(id, true),
            {
                "rolls": 1.0,
                "entries": [{
                    "type": "minecraft:dynamic",
                    "name": dynamic_drop.to_string(),
                }],
            },
        ],
    })
}

pub fn tag(entries: impl IntoIterator<Item = Identifier>) -> Value {
    let values: Vec<Value> = entries
        .into_iter()
        .map(|id| Value::String(id.to_string()))
        .collect();
    json!({ "replace": false, "values": values })
}

/// `(face, is-on-cube-boundary)` for each face of a box in pixels.
fn faces(min: [f32; 3], max: [f32; 3]) -> [(&'static str, bool); 6] {
    [
        ("down", min[1] == 0.0),
        ("up", max[1] == PIXELS_PER_BLOCK),
        ("north", min[2] == 0.0),
        ("south", max[2] == PIXELS_PER_BLOCK),
        ("west", min[0] == 0.0),
        ("east", max[0] == PIXELS_PER_BLOCK),
    ]
}

/// Block model with one element per box of `shape`, all faces bound to `texture`.
pub fn block_model(texture: &Identifier, shape: &VoxelShape) -> Value {
    let mut elements = Vec::with_capacity(shape.boxes().len());
    shape.for_each_box(|b| {
        let (min, max) = b.to_pixels();
        let (min, max) = ([min.x, min.y, min.z], [max.x, max.y, max.z]);
        let mut face_map = Map::new();
        for (face, boundary) in faces(min, max) {
            let texture_ref = match face {
                "down" => "#bottom",
                "up" => "#top",
                _ => "#side",
            };
            let mut f = json!({ "texture": texture_ref });
            if boundary {
                f["cullface"] = json!(face);
            }
            face_map.insert(face.to_string(), f);
        }
        elements.push(json!({ "from": min, "to": max, "faces": face_map }));
    });
    let tex = texture.to_string();
    json!({
        "parent": "minecraft:block/block",
        "textures": {
            "particle": tex,
            "bottom": tex,
            "top": tex,
            "side": tex,
        },
        "elements": elements,
    })
}

/// Blockstate mapping every variant state onto one model rotated about `y`.
pub fn blockstate(model: &Identifier) -> Value {
    let mut variants = Map::new();
    for state in VariantState::all() {
        let y = CANONICAL_ORIENTATION.steps_to(state.orientation) * 90;
        let mut v = json!({ "model": model.to_string() });
        if y != 0 {
            v["y"] = json!(y);
        }
        variants.insert(state.property_string(), v);
    }
    json!({ "variants": variants })
}

pub fn item_model(model: &Identifier) -> Value {
    json!({ "parent": model.to_string() })
}

/// `data/<ns>/loot_tables/blocks/<path>.json` for one variant.
pub fn register_loot_table(pack: &mut VirtualPack, block: &VariantBlock, dynamic_drop: &Identifier) {
    let id = block.id();
    pack.put_json(
        &id.with_path_prefix("loot_tables/blocks/"),
        &block_loot_table(id, dynamic_drop),
    );
}

/// Writes the same tag under each of `types` (e.g. `blocks`, `items`).
pub fn register_tag(pack: &mut VirtualPack, types: &[&str], tag_id: &Identifier, entries: &[Identifier]) {
    let root = tag(entries.iter().cloned());
    for ty in types {
        pack.put_json(&tag_id.with_path_prefix(&format!("tags/{ty}/")), &root);
    }
}

/// Blockstate, block model and item model for one variant.
pub fn register_block_models(pack: &mut VirtualPack, block: &VariantBlock) {
    let id = block.id();
    let model_id = id.with_path_prefix("block/");
    let texture = block
        .family()
        .texture()
        .unwrap_or_else(|| id.with_path_prefix("block/"));
    pack.put_json(&id.with_path_prefix("blockstates/"), &blockstate(&model_id));
    pack.put_json(
        &id.with_path_prefix("models/block/"),
        &block_model(&texture, shapes().canonical()),
    );
    pack.put_json(&id.with_path_prefix("models/item/"), &item_model(&model_id));
}

/// Lang key for a variant: `block.<ns>.<prefix>.<absolute lang path>`.
pub fn lang_key(block: &VariantBlock) -> String {
    format!("block.{}", block.id().to_string().replace([':', '/'], "."))
}

/// Source key the variant name is read from: `<ns>.slab_type.<lang path>`.
pub fn slab_type_key(namespace: &str, block: &VariantBlock) -> String {
    format!("{namespace}.slab_type.{}", block.family().lang_path())
}

pub fn register_lang(lang: &mut LangBuilder, namespace: &str, block: &VariantBlock) {
    lang.add_entry(&lang_key(block), &slab_type_key(namespace, block), &[]);
}

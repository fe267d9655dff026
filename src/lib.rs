//! Vertical slab generation.
//!
//! `SlabGen` watches blocks as the host registers them, groups them into
//! families and creates one vertical slab per family that has a slab. The
//! generated server data (loot tables, tags) and client data (blockstates,
//! models, lang) are rebuilt on demand into in-memory packs.

pub mod assets;
pub mod config;
pub mod host;

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;
use slabgen_blocks::component::{ComponentKind, KindSet};
use slabgen_blocks::ledger::CallbackId;
use slabgen_blocks::types::DiscoveredBlock;
use slabgen_blocks::variant::variant_id;
use slabgen_blocks::{Family, FamilyRegistry, Identifier, VariantBlock, VariantSet};
use slabgen_pack::{LangBuilder, PackMeta, ResourceType, VirtualPack, datagen};

pub use config::SlabGenConfig;
pub use host::{BlockHost, RecordingHost};

/// Host registration deferred until the registry lock is released.
type Registration = Box<dyn FnOnce() + Send>;

pub struct SlabGen {
    config: SlabGenConfig,
    registry: Mutex<FamilyRegistry>,
    pending: Arc<Mutex<VecDeque<Registration>>>,
    variants: VariantSet,
    data: VirtualPack,
    client: VirtualPack,
}

impl SlabGen {
    pub fn new(config: SlabGenConfig) -> Self {
        let data = new_pack(&config, ResourceType::ServerData);
        let client = new_pack(&config, ResourceType::ClientResources);
        Self {
            config,
            registry: Mutex::new(FamilyRegistry::new()),
            pending: Arc::new(Mutex::new(VecDeque::new())),
            variants: VariantSet::new(),
            data,
            client,
        }
    }

    /// Reads `slabgen.toml` under `root`, falling back to defaults.
    pub fn from_assets_root(root: &Path) -> Self {
        Self::new(SlabGenConfig::load_or_default(assets::config_path(root)))
    }

    #[inline]
    pub fn config(&self) -> &SlabGenConfig {
        &self.config
    }

    /// Registers the variant-creating callback. Every family with a slab,
    /// already discovered or not, gets exactly one variant registered with
    /// `host`.
    ///
    /// `host` is called after the registry lock is released, so it may
    /// report the new block back through `on_block_registered`.
    pub fn init<H: BlockHost + 'static>(&self, host: Arc<Mutex<H>>) -> CallbackId {
        let namespace = self.config.namespace.clone();
        let prefix = self.config.variant_prefix.clone();
        let item_group = self.config.item_group.clone();
        let variants = self.variants.clone();
        let pending = Arc::clone(&self.pending);
        let create = move |family: &Arc<Family>| {
            let Some(slab) = family.component(ComponentKind::Slab) else {
                return;
            };
            let id = match variant_id(&namespace, &prefix, family) {
                Ok(id) => id,
                Err(e) => {
                    log::error!("no variant for {family}: {e}");
                    return;
                }
            };
            let block = Arc::new(VariantBlock::new(id, Arc::clone(family), &slab, item_group.clone()));
            variants.push(Arc::clone(&block));
            let host = Arc::clone(&host);
            pending.lock().push_back(Box::new(move || {
                host.lock().register_block(block.id(), block.descriptor());
                log::debug!("registered {} for {}", block.id(), block.family());
            }));
        };
        let id = self
            .registry
            .lock()
            .register_callback(KindSet::from(ComponentKind::Slab), create);
        self.flush_registrations();
        id
    }

    /// Host hook, called once per registered block.
    ///
    /// Blocks in the generated namespace are ignored, so a host that
    /// reports variants back here does not turn them into families.
    pub fn on_block_registered(&self, raw: &str, block: DiscoveredBlock) -> Option<Arc<Family>> {
        let id = match Identifier::parse(raw) {
            Ok(id) => id,
            Err(e) => {
                log::trace!(target: "registry", "skipping {raw:?}: {e}");
                return None;
            }
        };
        if id.namespace() == self.config.namespace {
            log::trace!(target: "registry", "ignoring generated block {id}");
            return None;
        }
        let family = self.registry.lock().discover(id, block);
        self.flush_registrations();
        family
    }

    // Runs queued host registrations with no lock held. The queue lock is
    // released before each registration so the host may re-enter.
    fn flush_registrations(&self) {
        loop {
            let Some(register) = self.pending.lock().pop_front() else {
                break;
            };
            register();
        }
    }

    pub fn find_family(&self, id: &Identifier) -> Option<Arc<Family>> {
        self.registry.lock().find_by_id(id)
    }

    pub fn family_count(&self) -> usize {
        self.registry.lock().len()
    }

    #[inline]
    pub fn variants(&self) -> &VariantSet {
        &self.variants
    }

    /// Regenerates loot tables and the variant tags.
    pub fn rebuild_data(&mut self) -> &VirtualPack {
        self.data.clear();
        let blocks = self.variants.snapshot();
        for block in &blocks {
            datagen::register_loot_table(&mut self.data, block, &self.config.dynamic_drop);
        }
        match Identifier::new(&self.config.namespace, &self.config.tag_name) {
            Ok(tag_id) => {
                let ids: Vec<Identifier> = blocks.iter().map(|b| b.id().clone()).collect();
                datagen::register_tag(&mut self.data, &["blocks", "items"], &tag_id, &ids);
            }
            Err(e) => log::error!("skipping variant tag: {e}"),
        }
        log::info!("rebuilt server data: {} entries for {} variants", self.data.len(), blocks.len());
        &self.data
    }

    /// Regenerates blockstates, models and lang files, reading shipped
    /// locales from `assets_root`.
    pub fn rebuild_client(&mut self, assets_root: &Path) -> &VirtualPack {
        self.client.clear();
        let namespace = &self.config.namespace;
        let mut lang = LangBuilder::new(self.config.fallback_locale.clone());
        lang.load(&assets::lang_dir(assets_root, namespace));

        let blocks = self.variants.snapshot();
        for block in &blocks {
            if self.config.skip_client_data.contains(block.family().id()) {
                log::debug!("no client data for {}", block.family());
                continue;
            }
            datagen::register_block_models(&mut self.client, block);
            datagen::register_lang(&mut lang, namespace, block);
        }
        lang.write(&mut self.client, namespace);
        log::info!("rebuilt client data: {} entries for {} variants", self.client.len(), blocks.len());
        &self.client
    }

    #[inline]
    pub fn data_pack(&self) -> &VirtualPack {
        &self.data
    }

    #[inline]
    pub fn client_pack(&self) -> &VirtualPack {
        &self.client
    }

    /// Forgets all families, callbacks, variants and generated data.
    /// `init` must be called again afterwards.
    pub fn reset(&mut self) {
        self.registry.lock().reset();
        self.pending.lock().clear();
        self.variants = VariantSet::new();
        self.data.clear();
        self.client.clear();
    }
}

fn new_pack(config: &SlabGenConfig, kind: ResourceType) -> VirtualPack {
    let meta = PackMeta {
        pack_format: config.pack_format,
        description: config.pack_description.clone(),
    };
    let pack = VirtualPack::new(kind, meta);
    match &config.debug_dump_dir {
        Some(dir) => pack.with_debug_dir(dir.clone()),
        None => pack,
    }
}

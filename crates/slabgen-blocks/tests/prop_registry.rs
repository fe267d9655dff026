use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use proptest::prelude::*;
use slabgen_blocks::component::{ComponentKind, KindSet};
use slabgen_blocks::types::{DiscoveredBlock, MapColor};
use slabgen_blocks::{Family, FamilyRegistry, Identifier};

fn block() -> DiscoveredBlock {
    DiscoveredBlock::new("stone", MapColor::STONE, "stone")
}

fn id(s: &str) -> Identifier {
    Identifier::parse(s).unwrap()
}

type Log = Arc<Mutex<Vec<(u32, String)>>>;

fn tagged(log: &Log, tag: u32) -> impl Fn(&Arc<Family>) + Send + Sync + 'static {
    let log = Arc::clone(log);
    move |f: &Arc<Family>| log.lock().push((tag, f.id().to_string()))
}

fn fired(log: &Log, tag: u32) -> Vec<String> {
    log.lock()
        .iter()
        .filter(|(t, _)| *t == tag)
        .map(|(_, f)| f.clone())
        .collect()
}

#[test]
fn granite_slab_derives_granite_family() {
    let mut reg = FamilyRegistry::new();
    let family = reg.on_discover("granite_slab", block()).expect("classified");
    assert_eq!(family.id(), &id("granite"));
    assert!(family.has(ComponentKind::Slab));
    assert!(reg.find_by_id(&id("granite")).is_some());
    assert!(reg.find_by_id(&id("granite_slab")).is_none());
}

#[test]
fn callback_fires_once_per_family() {
    let _ = env_logger::builder().is_test(true).try_init();
    let log: Log = Default::default();
    let mut reg = FamilyRegistry::new();
    reg.register_callback(KindSet::from(ComponentKind::Base), tagged(&log, 0));

    reg.on_discover("stone", block());
    // A later component on the same family must not re-trigger it.
    reg.on_discover("stone_slab", block());
    assert_eq!(fired(&log, 0), vec!["minecraft:stone"]);
}

#[test]
#[should_panic(expected = "already has a slab component")]
fn duplicate_component_is_fatal() {
    let mut reg = FamilyRegistry::new();
    reg.on_discover("mod:stone_slab", block());
    reg.on_discover("mod:stone_slab", block());
}

#[test]
fn duplicate_component_leaves_fire_count_at_one() {
    let log: Log = Default::default();
    let mut reg = FamilyRegistry::new();
    reg.register_callback(KindSet::from(ComponentKind::Slab), tagged(&log, 0));
    reg.on_discover("mod:stone_slab", block());
    assert_eq!(fired(&log, 0), vec!["mod:stone"]);

    let second = panic::catch_unwind(AssertUnwindSafe(|| {
        reg.on_discover("mod:stone_slab", block());
    }));
    assert!(second.is_err());
    assert_eq!(fired(&log, 0), vec!["mod:stone"]);
    assert_eq!(reg.pending_count(&id("mod:stone")), Some(0));
}

#[test]
fn late_registration_fires_synchronously() {
    let log: Log = Default::default();
    let mut reg = FamilyRegistry::new();
    reg.on_discover("andesite_slab", block());
    reg.on_discover("diorite", block());

    reg.register_callback(KindSet::from(ComponentKind::Slab), tagged(&log, 7));
    assert_eq!(fired(&log, 7), vec!["minecraft:andesite"]);

    // diorite still waits for its slab
    assert_eq!(reg.pending_count(&id("diorite")), Some(1));
    reg.on_discover("diorite_slab", block());
    assert_eq!(fired(&log, 7), vec!["minecraft:andesite", "minecraft:diorite"]);
}

#[test]
fn subset_waits_for_both_kinds() {
    let both = KindSet::of(&[ComponentKind::Slab, ComponentKind::Base]);
    for order in [["tuff", "tuff_slab"], ["tuff_slab", "tuff"]] {
        let log: Log = Default::default();
        let mut reg = FamilyRegistry::new();
        reg.register_callback(both, tagged(&log, 1));
        reg.on_discover(order[0], block());
        assert!(fired(&log, 1).is_empty(), "fired after only {}", order[0]);
        reg.on_discover(order[1], block());
        assert_eq!(fired(&log, 1), vec!["minecraft:tuff"]);
    }
}

#[test]
fn satisfied_callbacks_fire_in_registration_order() {
    let log: Log = Default::default();
    let mut reg = FamilyRegistry::new();
    reg.register_callback(KindSet::from(ComponentKind::Slab), tagged(&log, 1));
    reg.register_callback(KindSet::from(ComponentKind::Base), tagged(&log, 2));
    reg.register_callback(KindSet::from(ComponentKind::Slab), tagged(&log, 3));
    reg.on_discover("mod:basalt_slab", block());
    let tags: Vec<u32> = log.lock().iter().map(|(t, _)| *t).collect();
    assert_eq!(tags, vec![1, 3]);
}

#[test]
fn for_each_visits_in_creation_order() {
    let mut reg = FamilyRegistry::new();
    for raw in ["c_slab", "a", "b_slab", "c", "Not Valid"] {
        reg.on_discover(raw, block());
    }
    let mut seen = Vec::new();
    reg.for_each(|f| seen.push(f.id().path().to_string()));
    assert_eq!(seen, vec!["c", "a", "b"]);
    assert_eq!(reg.len(), 3);
}

fn arb_family_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-z]{1,6}", 1..6).prop_map(|s| s.into_iter().collect())
}

proptest! {
    // Whatever the discovery order and wherever the callback registration falls
    // within it, every family with a slab fires exactly once.
    #[test]
    fn discovery_order_does_not_matter(
        names in arb_family_names(),
        seed in any::<u64>(),
        register_at in 0usize..12,
    ) {
        let mut events: Vec<String> = Vec::new();
        for n in &names {
            events.push(n.clone());
            events.push(format!("{n}_slab"));
        }
        // deterministic shuffle from the seed
        let mut state = seed | 1;
        for i in (1..events.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            events.swap(i, (state % (i as u64 + 1)) as usize);
        }

        let log: Log = Default::default();
        let mut reg = FamilyRegistry::new();
        let both = KindSet::of(&[ComponentKind::Slab, ComponentKind::Base]);
        let split = register_at.min(events.len());
        for e in &events[..split] {
            reg.on_discover(e, block());
        }
        reg.register_callback(both, tagged(&log, 0));
        reg.register_callback(KindSet::from(ComponentKind::Slab), tagged(&log, 1));
        for e in &events[split..] {
            reg.on_discover(e, block());
        }

        let mut expected: Vec<String> = names.iter().map(|n| format!("minecraft:{n}")).collect();
        expected.sort();
        for tag in [0, 1] {
            let mut got = fired(&log, tag);
            got.sort();
            prop_assert_eq!(&got, &expected);
        }
        for n in &names {
            prop_assert_eq!(reg.pending_count(&id(n)), Some(0));
        }
    }
}
